//! # سرویس رکوردها
//!
//! منطق create / update / delete / get برای همه entity ها.
//! تفاوت entity ها فقط در `EntitySchema` هست، پس یک سرویس generic کافیه.
//!
//! ## ترتیب بررسی‌ها در create
//! 1. تکراری نبودن کلید در کالکشن خود entity
//! 2. وجود کلید مالک (CourseRegister و PresentedCourse)
//! 3. لیست‌های ارجاع: اول تکراری نبودن، بعد وجود
//! 4. قوانین فیلدها به ترتیب جدول
//! 5. insert
//!
//! اولین خطا برمیگرده و بقیه بررسی نمیشن.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::{
    database::{Document, RecordStore},
    error::{AppError, OptionExt, Result},
    models::{Deleted, Entity, EntitySchema, Updated},
    validation::{apply_rules, ensure_distinct, ReferenceChecker, RuleContext},
};

// =====================================
// Record Service
// =====================================
/// سرویس CRUD یک entity
pub struct RecordService<E> {
    store: Arc<dyn RecordStore>,
    ctx: RuleContext,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for RecordService<E> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            ctx: self.ctx,
            _entity: PhantomData,
        }
    }
}

/// تبدیل رکورد یا patch به سند JSON
fn to_document<T: Serialize>(value: &T) -> Result<Document> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::Internal("record is not a JSON object".to_string())),
    }
}

/// مقدار یک فیلد لیستی؛ `None` اگه فیلد نباشه
fn list_values(document: &Document, field: &str) -> Result<Option<Vec<u64>>> {
    match document.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|_| AppError::BadInput(format!("Field '{field}' must be a list of integers"))),
    }
}

impl<E: Entity> RecordService<E> {
    const SCHEMA: EntitySchema = E::SCHEMA;

    /// سرویس با سال جاری شمسی
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self::with_context(store, RuleContext::current())
    }

    /// سرویس با context مشخص
    #[must_use]
    pub fn with_context(store: Arc<dyn RecordStore>, ctx: RuleContext) -> Self {
        Self {
            store,
            ctx,
            _entity: PhantomData,
        }
    }

    fn checker(&self) -> ReferenceChecker<'_> {
        ReferenceChecker::new(self.store.as_ref())
    }

    /// ساخت رکورد جدید
    ///
    /// # Errors
    /// - `Duplicate`: کلید تکراری
    /// - `DanglingReference`: کلید مالک یا عضوی از لیست ارجاع وجود نداره
    /// - `DuplicateInList`: لیست ارجاع تکراری داره
    /// - `BadInput`: یکی از قوانین فیلدها
    #[instrument(skip(self, record), fields(collection = %Self::SCHEMA.collection, key = %record.key()))]
    pub async fn create(&self, record: E) -> Result<E> {
        let schema = Self::SCHEMA;
        let document = to_document(&record)?;
        let checker = self.checker();

        checker
            .ensure_unique(schema.collection, record.key(), schema.messages.duplicate)
            .await?;

        if let Some(owner) = schema.owner {
            checker.ensure_owner_exists(owner, record.key()).await?;
        }

        for reference in schema.references {
            if let Some(values) = list_values(&document, reference.field)? {
                checker.ensure_all_exist(reference.target, &values).await?;
            }
        }

        apply_rules(schema.rules, &document, &self.ctx)?;

        self.store.insert_one(schema.collection, &document).await?;

        info!("Record created");
        Ok(record)
    }

    /// به‌روزرسانی جزئی؛ فقط فیلدهای موجود در patch تغییر میکنن
    ///
    /// وجود رکورد قبل از هر اعتبارسنجی بررسی میشه. اگه patch همون کلید فعلی
    /// رو داشته باشه، تکراری حساب نمیشه.
    ///
    /// # Errors
    /// - `NotFound`: رکورد با این کلید نیست
    /// - بقیه مثل `create`
    #[instrument(skip(self, patch), fields(collection = %Self::SCHEMA.collection))]
    pub async fn update(&self, key: &str, patch: E::Patch) -> Result<Updated> {
        let schema = Self::SCHEMA;
        let key_field = schema.key_field();

        self.store
            .find_one(schema.collection, key_field, key)
            .await?
            .ok_or_not_found(schema.messages.not_found)?;

        let patch = to_document(&patch)?;
        let checker = self.checker();

        apply_rules(schema.rules, &patch, &self.ctx)?;

        if let Some(new_key) = patch.get(key_field).and_then(Value::as_str) {
            if new_key != key {
                checker
                    .ensure_unique(schema.collection, new_key, schema.messages.duplicate)
                    .await?;
            }
            if let Some(owner) = schema.owner {
                checker.ensure_owner_exists(owner, new_key).await?;
            }
        }

        let mut lists = Vec::with_capacity(schema.references.len());
        for reference in schema.references {
            if let Some(values) = list_values(&patch, reference.field)? {
                ensure_distinct(&values)?;
                lists.push((reference.target, values));
            }
        }
        for (target, values) in &lists {
            checker.ensure_all_exist(*target, values).await?;
        }

        self.store
            .find_one_and_update(schema.collection, key_field, key, &patch)
            .await?
            .ok_or_not_found(schema.messages.not_found)?;

        info!(fields = patch.len(), "Record updated");
        Ok(Updated {
            key: key.to_string(),
            updated_fields: patch,
        })
    }

    /// حذف با کلید طبیعی
    ///
    /// # Errors
    /// `NotFound` اگه چیزی حذف نشه
    #[instrument(skip(self), fields(collection = %Self::SCHEMA.collection))]
    pub async fn delete(&self, key: &str) -> Result<Deleted> {
        let schema = Self::SCHEMA;

        self.store
            .find_one_and_delete(schema.collection, schema.key_field(), key)
            .await?
            .ok_or_not_found(schema.messages.not_deleted)?;

        info!("Record deleted");
        Ok(Deleted::new(key))
    }

    /// گرفتن رکورد کامل
    ///
    /// # Errors
    /// `NotFound` اگه رکورد نباشه
    #[instrument(skip(self), fields(collection = %Self::SCHEMA.collection))]
    pub async fn get(&self, key: &str) -> Result<E> {
        let schema = Self::SCHEMA;

        let document = self
            .store
            .find_one(schema.collection, schema.key_field(), key)
            .await?
            .ok_or_not_found(schema.messages.missing)?;

        Ok(serde_json::from_value(Value::Object(document))?)
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MockRecordStore;
    use crate::error::ErrorKind;
    use crate::models::{Course, CoursePatch, CourseRegister, Lecturer, LecturerPatch};
    use mockall::Sequence;
    use pretty_assertions::assert_eq;

    fn course() -> Course {
        Course {
            cid: "12342".into(),
            cname: "میو".into(),
            department: "علوم پایه".into(),
            credit: "3".into(),
        }
    }

    fn service<E: Entity>(store: MockRecordStore) -> RecordService<E> {
        RecordService::with_context(Arc::new(store), RuleContext::with_year(1405))
    }

    #[tokio::test]
    async fn test_create_checks_duplicate_before_rules() {
        let mut store = MockRecordStore::new();
        store
            .expect_find_one()
            .times(1)
            .returning(|_, _, _| Ok(Some(Document::new())));

        let mut invalid = course();
        invalid.credit = "9".into();

        let err = service::<Course>(store).create(invalid).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Duplicate);
        assert_eq!(err.to_string(), "Duplicate course id. Course already exists");
    }

    #[tokio::test]
    async fn test_create_does_not_insert_on_rule_failure() {
        let mut store = MockRecordStore::new();
        store.expect_find_one().returning(|_, _, _| Ok(None));
        store.expect_insert_one().never();

        let mut invalid = course();
        invalid.credit = "9".into();

        let err = service::<Course>(store).create(invalid).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadInput);
    }

    #[tokio::test]
    async fn test_create_owner_checked_after_duplicate() {
        let mut store = MockRecordStore::new();
        let mut seq = Sequence::new();
        store
            .expect_find_one()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|collection, _, _| *collection == crate::models::Collection::CourseRegister)
            .returning(|_, _, _| Ok(None));
        store
            .expect_find_one()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|collection, _, _| *collection == crate::models::Collection::Course)
            .returning(|_, _, _| Ok(None));

        let register = CourseRegister {
            cid: "12342".into(),
            cname: "میوپنچ".into(),
            department: "علوم پایه".into(),
            credit: "3".into(),
            sid: vec![40211415035],
            fname: "ویلیام".into(),
            lname: "رولت".into(),
        };

        let err = service::<CourseRegister>(store)
            .create(register)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid course id. Course id: 12342 doesn't exist in the courses collection"
        );
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found_before_validation() {
        let mut store = MockRecordStore::new();
        store.expect_find_one().returning(|_, _, _| Ok(None));

        let patch = CoursePatch {
            credit: Some("not a number".into()),
            ..CoursePatch::default()
        };

        let err = service::<Course>(store)
            .update("12342", patch)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Course not found");
    }

    #[tokio::test]
    async fn test_update_same_key_is_not_duplicate() {
        let mut store = MockRecordStore::new();
        // فقط یک جستجو برای وجود رکورد؛ بررسی تکراری انجام نمیشه
        store
            .expect_find_one()
            .times(1)
            .returning(|_, _, _| Ok(Some(Document::new())));
        store
            .expect_find_one_and_update()
            .times(1)
            .returning(|_, _, _, patch| Ok(Some(patch.clone())));

        let patch = CoursePatch {
            cid: Some("12342".into()),
            credit: Some("2".into()),
            ..CoursePatch::default()
        };

        let updated = service::<Course>(store).update("12342", patch).await.unwrap();
        assert_eq!(updated.key, "12342");
        assert_eq!(updated.updated_fields.len(), 2);
    }

    #[tokio::test]
    async fn test_update_repeated_list_rejected() {
        let mut store = MockRecordStore::new();
        store
            .expect_find_one()
            .times(1)
            .returning(|_, _, _| Ok(Some(Document::new())));
        store.expect_find_one_and_update().never();

        let patch = LecturerPatch {
            lcourseids: Some(vec![12342, 12342]),
            ..LecturerPatch::default()
        };

        let err = service::<Lecturer>(store)
            .update("777335", patch)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateInList);
    }

    #[tokio::test]
    async fn test_delete_missing() {
        let mut store = MockRecordStore::new();
        store
            .expect_find_one_and_delete()
            .returning(|_, _, _| Ok(None));

        let err = service::<Lecturer>(store).delete("777335").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Lecturer was not deleted");
    }

    #[test]
    fn test_list_values() {
        let mut document = Document::new();
        document.insert("lids".into(), serde_json::json!([1, 2]));
        document.insert("bad".into(), serde_json::json!(["x"]));

        assert_eq!(list_values(&document, "lids").unwrap(), Some(vec![1, 2]));
        assert_eq!(list_values(&document, "missing").unwrap(), None);
        assert!(list_values(&document, "bad").is_err());
    }
}
