//! # بررسی ارجاع‌ها (Cross-Reference Checker)
//!
//! store کلید خارجی نداره؛ این بررسی‌ها جای اون رو میگیرن.
//! همه بررسی‌ها «بخون بعد تصمیم بگیر» هستن و ایزوله نیستن: دو create همزمان
//! با یک کلید ممکنه هر دو موفق بشن.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::database::RecordStore;
use crate::error::{AppError, Result};
use crate::models::Collection;

/// پیام ارجاع به کلیدی که در کالکشن مقصد نیست
#[must_use]
pub fn dangling_message(target: Collection, value: impl std::fmt::Display) -> String {
    match target {
        Collection::Lecturer => format!("Invalid lecturer id. Lecturer id: {value} doesn't exist"),
        Collection::Student => format!("Invalid student id. Student id: {value} doesn't exist"),
        Collection::Course | Collection::CourseRegister | Collection::PresentedCourses => {
            format!("Invalid course id. Course id: {value} doesn't exist")
        }
    }
}

/// لیست نباید مقدار تکراری داشته باشه
///
/// # Errors
/// `DuplicateInList` با کل لیست در پیام
pub fn ensure_distinct(values: &[u64]) -> Result<()> {
    let mut seen = HashSet::with_capacity(values.len());
    if values.iter().all(|value| seen.insert(value)) {
        return Ok(());
    }

    debug!(?values, "Reference list has repeated values");
    Err(AppError::DuplicateInList(format!(
        "Duplicate value in list. value: {values:?}"
    )))
}

/// بررسی‌های ارجاعی روی یک `RecordStore`
#[derive(Clone, Copy)]
pub struct ReferenceChecker<'a> {
    store: &'a dyn RecordStore,
}

impl<'a> ReferenceChecker<'a> {
    #[must_use]
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self { store }
    }

    async fn exists(&self, collection: Collection, key: &str) -> Result<bool> {
        let found = self
            .store
            .find_one(collection, collection.key_field(), key)
            .await?;
        Ok(found.is_some())
    }

    /// کلید نباید در کالکشن وجود داشته باشه
    ///
    /// # Errors
    /// `Duplicate` با `message`
    pub async fn ensure_unique(&self, collection: Collection, key: &str, message: &str) -> Result<()> {
        if self.exists(collection, key).await? {
            debug!(%collection, key, "Duplicate key rejected");
            return Err(AppError::Duplicate(message.to_string()));
        }
        Ok(())
    }

    /// کلید باید در کالکشن وجود داشته باشه
    ///
    /// # Errors
    /// `DanglingReference` با `message`
    pub async fn ensure_exists(&self, collection: Collection, key: &str, message: &str) -> Result<()> {
        if !self.exists(collection, key).await? {
            warn!(%collection, key, "Dangling reference rejected");
            return Err(AppError::DanglingReference(message.to_string()));
        }
        Ok(())
    }

    /// کلید مالک (مثلا `cid` ثبت‌نام درس) باید در کالکشن مالک باشه
    ///
    /// # Errors
    /// `DanglingReference`
    pub async fn ensure_owner_exists(&self, owner: Collection, key: &str) -> Result<()> {
        let message = format!(
            "Invalid course id. Course id: {key} doesn't exist in the courses collection"
        );
        self.ensure_exists(owner, key, &message).await
    }

    /// اول تکراری نبودن، بعد وجود هر عضو به ترتیب
    ///
    /// # Errors
    /// - `DuplicateInList` اگه لیست تکراری داشته باشه (بدون هیچ جستجویی)
    /// - `DanglingReference` برای اولین عضوی که پیدا نشه
    pub async fn ensure_all_exist(&self, target: Collection, values: &[u64]) -> Result<()> {
        ensure_distinct(values)?;

        for value in values {
            let key = value.to_string();
            self.ensure_exists(target, &key, &dangling_message(target, value))
                .await?;
        }
        Ok(())
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{Document, MockRecordStore};
    use crate::error::ErrorKind;
    use mockall::Sequence;
    use pretty_assertions::assert_eq;

    fn record() -> Document {
        let mut doc = Document::new();
        doc.insert("cid".into(), "12342".into());
        doc
    }

    #[test]
    fn test_ensure_distinct() {
        assert!(ensure_distinct(&[]).is_ok());
        assert!(ensure_distinct(&[1, 2, 3]).is_ok());

        let err = ensure_distinct(&[777335, 777335]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateInList);
        assert_eq!(
            err.to_string(),
            "Duplicate value in list. value: [777335, 777335]"
        );
    }

    #[test]
    fn test_dangling_messages() {
        assert_eq!(
            dangling_message(Collection::Course, 12342),
            "Invalid course id. Course id: 12342 doesn't exist"
        );
        assert_eq!(
            dangling_message(Collection::Lecturer, 777335),
            "Invalid lecturer id. Lecturer id: 777335 doesn't exist"
        );
        assert_eq!(
            dangling_message(Collection::Student, 40211415035_u64),
            "Invalid student id. Student id: 40211415035 doesn't exist"
        );
    }

    #[tokio::test]
    async fn test_ensure_unique() {
        let mut store = MockRecordStore::new();
        store
            .expect_find_one()
            .withf(|collection, key, value| {
                *collection == Collection::Course && key == "cid" && value == "12342"
            })
            .returning(|_, _, _| Ok(Some(record())));
        store
            .expect_find_one()
            .withf(|_, _, value| value == "54321")
            .returning(|_, _, _| Ok(None));

        let checker = ReferenceChecker::new(&store);

        let err = checker
            .ensure_unique(Collection::Course, "12342", "Duplicate course id. Course already exists")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Duplicate);
        assert_eq!(err.to_string(), "Duplicate course id. Course already exists");

        assert!(checker
            .ensure_unique(Collection::Course, "54321", "dup")
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_owner_missing() {
        let mut store = MockRecordStore::new();
        store.expect_find_one().returning(|_, _, _| Ok(None));

        let err = ReferenceChecker::new(&store)
            .ensure_owner_exists(Collection::Course, "12342")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::DanglingReference);
        assert_eq!(
            err.to_string(),
            "Invalid course id. Course id: 12342 doesn't exist in the courses collection"
        );
    }

    #[tokio::test]
    async fn test_repeated_list_fails_before_any_lookup() {
        // بدون expectation: هر فراخوانی store باعث panic میشه
        let store = MockRecordStore::new();

        let err = ReferenceChecker::new(&store)
            .ensure_all_exist(Collection::Lecturer, &[777335, 777335])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateInList);
    }

    #[tokio::test]
    async fn test_first_missing_element_is_reported_in_order() {
        let mut store = MockRecordStore::new();
        let mut seq = Sequence::new();

        store
            .expect_find_one()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|collection, key, value| {
                *collection == Collection::Student && key == "stid" && value == "40211415035"
            })
            .returning(|_, _, _| Ok(Some(Document::new())));
        store
            .expect_find_one()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|_, _, value| value == "40211415036")
            .returning(|_, _, _| Ok(None));

        let err = ReferenceChecker::new(&store)
            .ensure_all_exist(Collection::Student, &[40211415035, 40211415036, 40211415037])
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Invalid student id. Student id: 40211415036 doesn't exist"
        );
    }

    #[tokio::test]
    async fn test_storage_errors_propagate() {
        let mut store = MockRecordStore::new();
        store
            .expect_find_one()
            .returning(|_, _, _| Err(AppError::Storage(sqlx::Error::PoolClosed)));

        let err = ReferenceChecker::new(&store)
            .ensure_exists(Collection::Course, "12342", "missing")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
    }
}
