//! # ماژول تنظیمات (Configuration)
//!
//! این ماژول مسئول خوندن و مدیریت تنظیمات سرویس هست.
//!
//! ترتیب لایه‌ها (هر لایه قبلی رو override میکنه):
//! 1. مقادیر پیش‌فرض
//! 2. فایل اختیاری `records.toml`
//! 3. متغیرهای محیطی با پیشوند `RECORDS_` (مثلا `RECORDS_PORT=8080`)
//!
//! ## مفاهیم Rust:
//! - **Default Trait**: مقادیر پیش‌فرض
//! - **Serde**: دسریالایز از منابع مختلف
//! - **Builder Pattern**: ساخت تدریجی آبجکت

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, Result};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/records.db?mode=rwc";
const DEFAULT_REQUEST_TIMEOUT_SECS: u32 = 30;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// تنظیمات اصلی برنامه
///
/// # مثال
/// ```rust
/// use university_records::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.port, 8000);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Config {
    /// آدرس هاست سرور
    pub host: String,

    /// پورت سرور
    #[validate(range(min = 1, message = "port must not be 0"))]
    pub port: u16,

    /// آدرس اتصال به دیتابیس
    #[validate(length(min = 1, message = "database_url must not be empty"))]
    pub database_url: String,

    /// محیط اجرا (development, testing, production)
    pub environment: Environment,

    /// حداکثر زمان پردازش هر درخواست (ثانیه)
    #[validate(range(min = 1, message = "request_timeout_secs must be at least 1"))]
    pub request_timeout_secs: u64,

    /// حداکثر اتصالات همزمان pool
    #[validate(range(min = 1, message = "max_connections must be at least 1"))]
    pub max_connections: u32,
}

/// محیط اجرای برنامه
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Environment {
    /// محیط توسعه - لاگ خوانا
    #[default]
    Development,

    /// محیط تست
    Testing,

    /// محیط تولید - لاگ JSON
    Production,
}

impl Environment {
    /// آیا در محیط توسعه هستیم؟
    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    /// آیا در محیط تولید هستیم؟
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// تبدیل String به Environment
///
/// هر مقدار ناشناخته به `Development` تبدیل میشه.
impl From<String> for Environment {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "testing" | "test" => Environment::Testing,
            _ => Environment::Development,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            environment: Environment::Development,
            request_timeout_secs: u64::from(DEFAULT_REQUEST_TIMEOUT_SECS),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl Config {
    /// لود تنظیمات از پیش‌فرض‌ها، فایل `records.toml` و متغیرهای محیطی
    ///
    /// # Errors
    /// خطا برمیگردونه اگه یکی از منابع قابل parse نباشه یا اعتبارسنجی fail بشه
    pub fn load() -> Result<Self> {
        let settings = ::config::Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("database_url", DEFAULT_DATABASE_URL)?
            .set_default("environment", "development")?
            .set_default("request_timeout_secs", i64::from(DEFAULT_REQUEST_TIMEOUT_SECS))?
            .set_default("max_connections", i64::from(DEFAULT_MAX_CONNECTIONS))?
            .add_source(::config::File::with_name("records").required(false))
            .add_source(::config::Environment::with_prefix("RECORDS").try_parsing(true))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.check()?;

        Ok(config)
    }

    /// اعتبارسنجی تنظیمات
    ///
    /// # Errors
    /// - مقادیر خارج از بازه (`validator`)
    /// - دیتابیس in-memory در production
    pub fn check(&self) -> Result<()> {
        self.validate()?;

        if self.environment.is_production() && self.database_url.contains(":memory:") {
            return Err(AppError::Config(
                "in-memory database is not allowed in production".to_string(),
            ));
        }

        Ok(())
    }

    /// آدرس کامل سرور
    #[must_use]
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =====================================
// Builder Pattern
// =====================================
/// ساخت Config با Builder Pattern (بیشتر برای تست‌ها)
///
/// # مثال
/// ```rust
/// use university_records::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .port(8080)
///     .database_url("sqlite::memory:")
///     .build();
/// assert_eq!(config.port, 8080);
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// ساخت builder جدید
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// تنظیم پورت
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// تنظیم هاست
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// تنظیم database_url
    #[must_use]
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database_url = url.into();
        self
    }

    /// تنظیم محیط
    #[must_use]
    pub fn environment(mut self, env: Environment) -> Self {
        self.config.environment = env;
        self
    }

    /// تنظیم timeout درخواست
    #[must_use]
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs;
        self
    }

    /// ساخت Config نهایی
    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }

    /// ساخت Config با اعتبارسنجی
    ///
    /// # Errors
    /// خطا برمیگردونه اگه اعتبارسنجی fail بشه
    pub fn build_checked(self) -> Result<Config> {
        let config = self.build();
        config.check()?;
        Ok(config)
    }
}
