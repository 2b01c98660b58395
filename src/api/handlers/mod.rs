//! # HTTP Handlers
//!
//! ## Handler چیه؟
//! تابعی که request میگیره و response برمیگردونه.
//! در axum، هر handler یک async function هست.
//!
//! handler های رکوردها generic هستن و برای هر entity یک بار در router
//! نمونه‌سازی میشن.

pub mod health;
pub mod records;
