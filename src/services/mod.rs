//! # ماژول سرویس‌ها (Business Logic Layer)
//!
//! ## لایه‌بندی معماری
//!
//! ```text
//! ┌─────────────────┐
//! │    API Layer    │  <-- HTTP handlers (axum)
//! ├─────────────────┤
//! │  Service Layer  │  <-- RecordService<E> (اینجا!)
//! ├─────────────────┤
//! │   Validation    │  <-- قوانین فیلدها و بررسی ارجاع‌ها
//! ├─────────────────┤
//! │  Record Store   │  <-- RecordStore trait
//! ├─────────────────┤
//! │    Database     │  <-- SQLite
//! └─────────────────┘
//! ```
//!
//! ## مفاهیم Rust:
//! - **Dependency Injection**: store به صورت `Arc<dyn RecordStore>` تزریق میشه
//! - **Generics**: یک سرویس برای همه entity ها

mod record_service;

pub use record_service::*;

use std::sync::Arc;

use crate::{
    config::Config,
    database::{Database, RecordStore, SqliteStore},
    models::Entity,
    validation::RuleContext,
};

// =====================================
// Application State
// =====================================
/// وضعیت برنامه که بین همه handlers اشتراک‌گذاری میشه
///
/// `Clone` فقط Arc ها رو clone میکنه، نه داده رو.
#[derive(Clone)]
pub struct AppState {
    /// تنظیمات برنامه
    pub config: Arc<Config>,

    /// دیتابیس (برای health check)
    pub database: Database,

    /// store اسناد
    pub store: Arc<dyn RecordStore>,

    /// اگه ست بشه، سال شمسی قوانین ثابت میمونه
    rule_context: Option<RuleContext>,
}

impl AppState {
    /// ساخت AppState جدید
    #[must_use]
    pub fn new(database: Database, config: Config) -> Self {
        let store: Arc<dyn RecordStore> = Arc::new(SqliteStore::new(database.clone()));

        Self {
            config: Arc::new(config),
            database,
            store,
            rule_context: None,
        }
    }

    /// ثابت کردن context قوانین (برای تست‌ها)
    #[must_use]
    pub fn with_rule_context(mut self, ctx: RuleContext) -> Self {
        self.rule_context = Some(ctx);
        self
    }

    /// سرویس رکوردهای یک entity
    ///
    /// سال جاری شمسی در هر درخواست دوباره حساب میشه.
    #[must_use]
    pub fn records<E: Entity>(&self) -> RecordService<E> {
        let ctx = self.rule_context.unwrap_or_else(RuleContext::current);
        RecordService::with_context(Arc::clone(&self.store), ctx)
    }

    /// دسترسی به config
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}
