//! # Record Store
//!
//! یک لایه انتزاعی بین سرویس‌ها و ذخیره‌سازی اسناد.
//! - سرویس‌ها نمیدونن سند کجا ذخیره میشه
//! - تست‌های checker با `MockRecordStore` نوشته میشن
//!
//! قرارداد عملیات‌ها مثل یک document store هست: جستجو با یک فیلد و مقدار،
//! و حذف/به‌روزرسانی اتمیک که سند رو برمیگردونه.
//!
//! ## مفاهیم Rust:
//! - **Traits**: تعریف interface
//! - **async_trait**: امکان async در traits
//! - **Trait Objects**: `Arc<dyn RecordStore>` در state برنامه

use async_trait::async_trait;
use serde_json::Value;

use super::{Database, Document};
use crate::error::{AppError, Result};
use crate::models::Collection;

// =====================================
// RecordStore Trait
// =====================================
/// عملیات‌های پایه روی کالکشن‌ها
///
/// `key` نام فیلد و `value` مقدار رشته‌ای اون هست (مثلا `("cid", "12342")`).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// اولین سندی که `key == value` داره
    async fn find_one(&self, collection: Collection, key: &str, value: &str)
        -> Result<Option<Document>>;

    /// اضافه کردن سند
    async fn insert_one(&self, collection: Collection, document: &Document) -> Result<()>;

    /// حذف اتمیک؛ سند قبل از حذف برمیگرده
    async fn find_one_and_delete(
        &self,
        collection: Collection,
        key: &str,
        value: &str,
    ) -> Result<Option<Document>>;

    /// ادغام اتمیک فیلدهای سطح بالای `patch`؛ سند بعد از تغییر برمیگرده
    async fn find_one_and_update(
        &self,
        collection: Collection,
        key: &str,
        value: &str,
        patch: &Document,
    ) -> Result<Option<Document>>;
}

// =====================================
// SQLite Implementation
// =====================================
/// پیاده‌سازی `RecordStore` روی جدول `documents`
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// ساخت store جدید
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

/// مسیر JSON فیلد برای `json_extract`
fn json_path(key: &str) -> String {
    format!("$.{key}")
}

fn parse_body(body: Option<String>) -> Result<Option<Document>> {
    let Some(text) = body else {
        return Ok(None);
    };

    match serde_json::from_str::<Value>(&text)? {
        Value::Object(map) => Ok(Some(map)),
        _ => Err(AppError::Internal(
            "stored document is not a JSON object".to_string(),
        )),
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn find_one(
        &self,
        collection: Collection,
        key: &str,
        value: &str,
    ) -> Result<Option<Document>> {
        let body = sqlx::query_scalar::<_, String>(
            r#"
            SELECT body
            FROM documents
            WHERE collection = ? AND json_extract(body, ?) = ?
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(collection.name())
        .bind(json_path(key))
        .bind(value)
        .fetch_optional(self.db.pool())
        .await?;

        parse_body(body)
    }

    async fn insert_one(&self, collection: Collection, document: &Document) -> Result<()> {
        let body = serde_json::to_string(document)?;

        sqlx::query("INSERT INTO documents (collection, body) VALUES (?, ?)")
            .bind(collection.name())
            .bind(body)
            .execute(self.db.pool())
            .await?;

        Ok(())
    }

    async fn find_one_and_delete(
        &self,
        collection: Collection,
        key: &str,
        value: &str,
    ) -> Result<Option<Document>> {
        let body = sqlx::query_scalar::<_, String>(
            r#"
            DELETE FROM documents
            WHERE id = (
                SELECT id FROM documents
                WHERE collection = ? AND json_extract(body, ?) = ?
                ORDER BY id
                LIMIT 1
            )
            RETURNING body
            "#,
        )
        .bind(collection.name())
        .bind(json_path(key))
        .bind(value)
        .fetch_optional(self.db.pool())
        .await?;

        parse_body(body)
    }

    async fn find_one_and_update(
        &self,
        collection: Collection,
        key: &str,
        value: &str,
        patch: &Document,
    ) -> Result<Option<Document>> {
        let patch = serde_json::to_string(patch)?;

        let body = sqlx::query_scalar::<_, String>(
            r#"
            UPDATE documents
            SET body = json_patch(body, ?), updated_at = CURRENT_TIMESTAMP
            WHERE id = (
                SELECT id FROM documents
                WHERE collection = ? AND json_extract(body, ?) = ?
                ORDER BY id
                LIMIT 1
            )
            RETURNING body
            "#,
        )
        .bind(patch)
        .bind(collection.name())
        .bind(json_path(key))
        .bind(value)
        .fetch_optional(self.db.pool())
        .await?;

        parse_body(body)
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    async fn store() -> SqliteStore {
        SqliteStore::new(Database::in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = store().await;
        let course = doc(json!({"cid": "12342", "cname": "میو", "credit": "3"}));

        store.insert_one(Collection::Course, &course).await.unwrap();

        let found = store
            .find_one(Collection::Course, "cid", "12342")
            .await
            .unwrap();
        assert_eq!(found, Some(course));

        let missing = store
            .find_one(Collection::Course, "cid", "99999")
            .await
            .unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn test_collections_are_separate() {
        let store = store().await;
        store
            .insert_one(Collection::Course, &doc(json!({"cid": "12342"})))
            .await
            .unwrap();

        let found = store
            .find_one(Collection::CourseRegister, "cid", "12342")
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_one_and_delete() {
        let store = store().await;
        let course = doc(json!({"cid": "12342"}));
        store.insert_one(Collection::Course, &course).await.unwrap();

        let deleted = store
            .find_one_and_delete(Collection::Course, "cid", "12342")
            .await
            .unwrap();
        assert_eq!(deleted, Some(course));

        let again = store
            .find_one_and_delete(Collection::Course, "cid", "12342")
            .await
            .unwrap();
        assert!(again.is_none());
    }

    #[tokio::test]
    async fn test_find_one_and_update_merges_top_level_fields() {
        let store = store().await;
        store
            .insert_one(
                Collection::Student,
                &doc(json!({"stid": "40211415035", "fname": "احمد", "lids": [1, 2], "married": true})),
            )
            .await
            .unwrap();

        let updated = store
            .find_one_and_update(
                Collection::Student,
                "stid",
                "40211415035",
                &doc(json!({"fname": "رضا", "lids": [3]})),
            )
            .await
            .unwrap();

        assert_eq!(
            updated,
            Some(doc(json!({
                "stid": "40211415035",
                "fname": "رضا",
                "lids": [3],
                "married": true
            })))
        );
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let store = store().await;
        let updated = store
            .find_one_and_update(Collection::Course, "cid", "12342", &doc(json!({"credit": "2"})))
            .await
            .unwrap();
        assert!(updated.is_none());
    }
}
