//! # ماژول مدیریت خطاها (Error Handling)
//!
//! همه خطاهای اعتبارسنجی، ارجاع و ذخیره‌سازی اینجا تعریف میشن.
//!
//! ## دسته‌بندی خطا
//!
//! | نوع | HTTP |
//! |---|---|
//! | `BadInput` | 400 |
//! | `NotFound`, `DanglingReference` | 404 |
//! | `Duplicate`, `DuplicateInList` | 409 |
//! | `Storage`, `Internal` | 500 |
//!
//! متن پیام خطا بخشی از قرارداد API هست و تست‌ها روی اون assert میکنن.
//!
//! ## مفاهیم Rust:
//! - **thiserror**: derive macro برای Error trait
//! - **From Trait**: تبدیل خودکار خطاها با `#[from]`
//! - **Result Type Alias**: alias برای ساده‌تر شدن کد

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

// =====================================
// Result Type Alias
// =====================================
/// نوع Result سفارشی برنامه
///
/// به جای `Result<Course, AppError>` میتونیم بنویسیم `Result<Course>`
pub type Result<T, E = AppError> = std::result::Result<T, E>;

// =====================================
// Error Kind
// =====================================
/// نوع خطا که ماشین میتونه تشخیصش بده
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    BadInput,
    NotFound,
    DanglingReference,
    Duplicate,
    DuplicateInList,
    Storage,
    Internal,
}

impl ErrorKind {
    /// کد متنی که در بدنه پاسخ خطا قرار میگیره
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadInput => "BAD_INPUT",
            Self::NotFound => "NOT_FOUND",
            Self::DanglingReference => "DANGLING_REFERENCE",
            Self::Duplicate => "DUPLICATE",
            Self::DuplicateInList => "DUPLICATE_IN_LIST",
            Self::Storage => "STORAGE_ERROR",
            Self::Internal => "INTERNAL",
        }
    }

    /// HTTP status متناظر
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadInput => StatusCode::BAD_REQUEST,
            Self::NotFound | Self::DanglingReference => StatusCode::NOT_FOUND,
            Self::Duplicate | Self::DuplicateInList => StatusCode::CONFLICT,
            Self::Storage | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// =====================================
// Custom Error Enum
// =====================================
/// خطای اصلی برنامه
///
/// # مفاهیم:
/// - هر variant یک نوع خطا با داده‌های متفاوت هست
/// - `#[error("{0}")]`: پیام خطا دقیقا همون متن قانونیه که fail شده
/// - `#[from]`: تبدیل خودکار از نوع‌های دیگه
#[derive(Debug, Error)]
pub enum AppError {
    // ----------------------------------------
    // خطاهای کاربر (4xx)
    // ----------------------------------------

    /// ورودی نامعتبر - 400
    #[error("{0}")]
    BadInput(String),

    /// رکورد پیدا نشد - 404
    #[error("{0}")]
    NotFound(String),

    /// ارجاع به رکوردی که وجود نداره - 404
    #[error("{0}")]
    DanglingReference(String),

    /// کلید تکراری در کالکشن - 409
    #[error("{0}")]
    Duplicate(String),

    /// مقدار تکراری داخل یک لیست ارجاع - 409
    #[error("{0}")]
    DuplicateInList(String),

    // ----------------------------------------
    // خطاهای سرور (5xx)
    // ----------------------------------------

    /// خطای داخلی سرور
    #[error("Internal server error: {0}")]
    Internal(String),

    /// خطای سرور HTTP
    #[error("Server error: {0}")]
    Server(String),

    /// خطای تنظیمات
    #[error("Configuration error: {0}")]
    Config(String),

    // ----------------------------------------
    // خطاهای تبدیل شده از کتابخانه‌ها
    // ----------------------------------------

    /// خطای دیتابیس (StorageError)
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// خطای migration
    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// خطای IO
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// خطای JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// نوع خطا
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BadInput(_) => ErrorKind::BadInput,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::DanglingReference(_) => ErrorKind::DanglingReference,
            Self::Duplicate(_) => ErrorKind::Duplicate,
            Self::DuplicateInList(_) => ErrorKind::DuplicateInList,
            Self::Storage(_) | Self::Migrate(_) | Self::Io(_) => ErrorKind::Storage,
            Self::Internal(_) | Self::Server(_) | Self::Config(_) | Self::Json(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// گرفتن HTTP status code متناسب با خطا
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        self.kind().status_code()
    }

    /// آیا این یه خطای سرور هست؟
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// ساخت خطای BadInput
    pub fn bad_input(message: impl Into<String>) -> Self {
        Self::BadInput(message.into())
    }
}

// =====================================
// Error Response DTO
// =====================================
/// ساختار پاسخ خطا در API
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// کد خطا (مثلا "DUPLICATE")
    pub error: String,

    /// پیام خطا
    pub message: String,

    /// کد وضعیت HTTP
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl ErrorResponse {
    /// ساخت پاسخ خطای جدید
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code: None,
        }
    }

    /// اضافه کردن کد وضعیت
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status_code = Some(status.as_u16());
        self
    }
}

// =====================================
// IntoResponse Implementation
// =====================================
/// تبدیل AppError به Response HTTP
///
/// خطاهای سرور لاگ میشن و جزئیاتشون به کلاینت نمیرسه.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status = kind.status_code();

        let message = if self.is_server_error() {
            error!(error = %self, "Server error occurred");
            status.canonical_reason().unwrap_or("Error").to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse::new(kind.code(), message).with_status(status);

        (status, Json(body)).into_response()
    }
}

// =====================================
// From Implementations
// =====================================
impl From<::config::ConfigError> for AppError {
    fn from(err: ::config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Config(err.to_string())
    }
}

// =====================================
// Option Extensions
// =====================================
/// Extension trait برای Option
pub trait OptionExt<T> {
    /// تبدیل None به AppError::NotFound
    fn ok_or_not_found(self, message: impl Into<String>) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, message: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| AppError::NotFound(message.into()))
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::BadInput("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::DanglingReference("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Duplicate("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::DuplicateInList("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_message_is_rule_text() {
        let err = AppError::Duplicate("Duplicate course id. Course already exists".into());
        assert_eq!(err.to_string(), "Duplicate course id. Course already exists");
        assert_eq!(err.kind(), ErrorKind::Duplicate);
    }

    #[test]
    fn test_bad_input_constructor() {
        let err = AppError::bad_input(format!("Field '{}' must be a string", "credit"));
        assert_eq!(err.kind(), ErrorKind::BadInput);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Field 'credit' must be a string");
    }

    #[test]
    fn test_storage_kind() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert!(err.is_server_error());
    }

    #[test]
    fn test_error_response() {
        let response = ErrorResponse::new("NOT_FOUND", "Course not found")
            .with_status(StatusCode::NOT_FOUND);

        assert_eq!(response.status_code, Some(404));
    }

    #[test]
    fn test_option_extension() {
        let some_value: Option<i32> = Some(42);
        let none_value: Option<i32> = None;

        assert!(some_value.ok_or_not_found("not found").is_ok());
        let err = none_value.ok_or_not_found("Course not found");
        assert!(matches!(err, Err(AppError::NotFound(ref m)) if m == "Course not found"));
    }
}
