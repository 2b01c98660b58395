//! # University Records Library
//!
//! سرویس نگهداری سوابق دانشگاه: درس‌ها، اساتید، دانشجوها، ثبت‌نام درس‌ها و
//! درس‌های ارائه شده، با اعتبارسنجی فیلدها و بررسی ارجاع بین کالکشن‌ها.
//!
//! ## ساختار پروژه
//!
//! ```text
//! src/
//! ├── lib.rs          # نقطه ورود کتابخانه - اینجا!
//! ├── main.rs         # نقطه ورود باینری
//! ├── config/         # مدیریت تنظیمات
//! ├── error/          # تعریف خطاها
//! ├── validation/     # قوانین فیلدها و بررسی ارجاع‌ها
//! ├── database/       # RecordStore و SQLite
//! ├── models/         # entity ها و schema هاشون
//! ├── services/       # منطق create / update / delete / get
//! ├── api/            # لایه HTTP
//! └── utils/          # تقویم شمسی
//! ```
//!
//! ## مثال استفاده
//!
//! ```rust,no_run
//! use university_records::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let db = Database::in_memory().await?;
//!     let state = AppState::new(db, Config::default());
//!
//!     let course = Course {
//!         cid: "12342".into(),
//!         cname: "میو".into(),
//!         department: "علوم پایه".into(),
//!         credit: "3".into(),
//!     };
//!     state.records::<Course>().create(course).await?;
//!     Ok(())
//! }
//! ```

// =====================================
// Module Declarations
// =====================================

/// ماژول مدیریت تنظیمات برنامه
pub mod config;

/// ماژول تعریف و مدیریت خطاها
pub mod error;

/// ماژول ارتباط با دیتابیس
pub mod database;

/// ماژول مدل‌های داده (Domain Models)
pub mod models;

/// ماژول اعتبارسنجی
pub mod validation;

/// ماژول سرویس‌ها (Business Logic)
pub mod services;

/// ماژول API و HTTP Handlers
pub mod api;

/// ماژول توابع کمکی
pub mod utils;

// =====================================
// Re-exports
// =====================================

/// نتیجه عملیات با خطای سفارشی ما
pub use error::Result;

/// خطای اصلی برنامه
pub use error::AppError;

// =====================================
// Prelude Module
// =====================================
/// ماژول prelude برای import راحت‌تر آیتم‌های پرکاربرد
///
/// کاربرد:
/// ```rust
/// use university_records::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::database::{Database, Document, RecordStore, SqliteStore};
    pub use crate::error::{AppError, ErrorKind, Result};
    pub use crate::models::*;
    pub use crate::services::*;
    pub use crate::validation::RuleContext;
}
