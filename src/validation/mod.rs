//! # ماژول اعتبارسنجی (Validation)
//!
//! سه لایه داره:
//! - `primitives`: توابع خالص روی رشته
//! - `rules`: قوانین فیلدها با پیام خطای دقیق
//! - `references`: بررسی وجود و تکراری نبودن کلیدها در store

pub mod primitives;
pub mod references;
pub mod rules;

pub use references::{dangling_message, ensure_distinct, ReferenceChecker};
pub use rules::{apply_rules, FieldRule, Rule, RuleContext};
