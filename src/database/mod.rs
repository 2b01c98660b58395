//! # ماژول دیتابیس (Database Layer)
//!
//! رکوردها به صورت سند JSON در SQLite ذخیره میشن.
//! یک جدول `documents` همه کالکشن‌ها رو نگه میداره و جستجو با
//! `json_extract` روی فیلد کلید انجام میشه.
//!
//! ## مفاهیم Rust:
//! - **Arc<T>**: Reference Counting برای اشتراک داده بین threads
//! - **async/await**: برنامه‌نویسی غیرهمزمان
//! - **async_trait**: پشتیبانی از async در traits
//!
//! ## الگوهای طراحی:
//! - Repository Pattern: جداسازی لایه داده از منطق (`RecordStore`)
//! - Connection Pool: مدیریت اتصالات دیتابیس

mod repository;

pub use repository::*;

use std::sync::Arc;
use std::time::Duration;

use sqlx::{
    migrate::Migrator,
    sqlite::{SqlitePool, SqlitePoolOptions},
};

use crate::error::Result;

/// سند JSON (یک شیء سطح بالا)
pub type Document = serde_json::Map<String, serde_json::Value>;

// مسیر migration‌ها
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

// =====================================
// Database Connection
// =====================================
/// اتصال به دیتابیس با Connection Pool
///
/// `Arc<SqlitePool>`: هر clone فقط counter رو زیاد میکنه، pool کپی نمیشه.
#[derive(Debug, Clone)]
pub struct Database {
    pool: Arc<SqlitePool>,
}

impl Database {
    /// اتصال به دیتابیس
    ///
    /// # Arguments
    /// * `database_url` - آدرس دیتابیس (مثلا `sqlite://data/records.db?mode=rwc`)
    ///
    /// # Errors
    /// خطا برمیگردونه اگه پوشه دیتابیس ساخته نشه یا اتصال موفق نباشه
    pub async fn connect(database_url: impl AsRef<str>) -> Result<Self> {
        Self::connect_with(database_url, DEFAULT_MAX_CONNECTIONS).await
    }

    /// اتصال با تعداد مشخص اتصال در pool
    ///
    /// # Errors
    /// مثل `connect`
    pub async fn connect_with(database_url: impl AsRef<str>, max_connections: u32) -> Result<Self> {
        let url = database_url.as_ref();

        // ساخت پوشه فایل دیتابیس اگه وجود نداره
        if let Some(path) = url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if let Some(parent) = std::path::Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .connect(url)
            .await?;

        tracing::debug!(max_connections, "Database pool created");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// دیتابیس in-memory با migration اجرا شده (برای تست‌ها)
    ///
    /// فقط یک اتصال نگه داشته میشه و هیچوقت بسته نمیشه، چون هر اتصال
    /// `:memory:` دیتابیس جداگانه خودش رو داره.
    ///
    /// # Errors
    /// خطا برمیگردونه اگه اتصال یا migration موفق نباشه
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let db = Self {
            pool: Arc::new(pool),
        };

        db.migrate().await?;
        Ok(db)
    }

    /// اجرای migration‌ها
    ///
    /// # Errors
    /// خطای `Migrate` اگه migration ها اجرا نشن
    pub async fn migrate(&self) -> Result<()> {
        MIGRATOR.run(&*self.pool).await?;
        Ok(())
    }

    /// دسترسی به pool
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// بررسی سلامت دیتابیس
    ///
    /// # Errors
    /// خطای `Storage` اگه query ساده اجرا نشه
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&*self.pool).await?;
        Ok(())
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_is_migrated() {
        let db = Database::in_memory().await.unwrap();
        db.health_check().await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_connect_creates_parent_directory() {
        let dir = std::env::temp_dir().join(format!("records-{}", nanoid::nanoid!(8)));
        let url = format!("sqlite://{}/records.db?mode=rwc", dir.display());

        let db = Database::connect(&url).await.unwrap();
        db.migrate().await.unwrap();
        assert!(dir.exists());

        let _ = std::fs::remove_dir_all(dir);
    }
}
