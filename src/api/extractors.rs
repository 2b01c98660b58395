//! # Custom Extractors
//!
//! Extractor‌های سفارشی برای استخراج داده از request
//!
//! ## مفاهیم Rust + Axum:
//! - **FromRequest**: extractor که بدنه request رو مصرف میکنه
//! - **FromRequestParts**: extractor که فقط header/URI رو میخونه
//! - **Rejection**: نوع خطا برای extractors

use axum::{
    async_trait,
    body::Body,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts},
    http::{request::Parts, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

// =====================================
// JSON Body
// =====================================
/// استخراج JSON که خطای parse رو به `BadInput` تبدیل میکنه
///
/// `axum::Json` برای بدنه خراب 422 یا 415 برمیگردونه؛ این extractor
/// همه رو به 400 با بدنه خطای استاندارد برنامه تبدیل میکنه.
///
/// # استفاده:
/// ```rust,ignore
/// async fn handler(RecordJson(course): RecordJson<Course>) -> ... {
///     // course کامل deserialize شده
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RecordJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for RecordJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data): Json<T> = Json::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| AppError::BadInput(format!("Invalid JSON: {}", e.body_text())))?;

        Ok(RecordJson(data))
    }
}

// =====================================
// Request ID Extractor
// =====================================
/// Request ID که middleware روی request گذاشته
///
/// # مفاهیم:
/// - برای tracing و لاگینگ
/// - اگه header نباشه، ID جدید ساخته میشه
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

impl RequestId {
    /// Header name برای request ID
    pub const HEADER_NAME: &'static str = "X-Request-Id";
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RequestId {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let request_id = parts
            .headers
            .get(Self::HEADER_NAME)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
            .unwrap_or_else(|| nanoid::nanoid!(12));

        Ok(RequestId(request_id))
    }
}
