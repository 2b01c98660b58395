//! # ماژول مدل‌ها (Domain Models)
//!
//! هر entity یک رکورد کامل (برای create و get) و یک patch (برای update جزئی) داره.
//! رفتار اعتبارسنجی هر entity در یک `EntitySchema` ثابت تعریف میشه:
//! جدول قوانین فیلدها، کلید مالک و لیست‌های ارجاع.
//!
//! ## مفاهیم Rust:
//! - **Associated Types / Consts**: `Entity::Patch` و `Entity::SCHEMA`
//! - **Serialize/Deserialize**: تبدیل JSON
//! - **Static data**: schema ها در زمان کامپایل ساخته میشن
//!
//! ## تفاوت انواع مدل:
//! - **Record**: سندی که در کالکشن ذخیره میشه
//! - **Patch**: فقط فیلدهایی که کاربر فرستاده
//! - **DTO**: پاسخ‌های API

mod course;
mod course_register;
mod dto;
mod lecturer;
mod presented_course;
mod student;

pub use course::*;
pub use course_register::*;
pub use dto::*;
pub use lecturer::*;
pub use presented_course::*;
pub use student::*;

use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::validation::rules::FieldRule;

// =====================================
// Collection
// =====================================
/// کالکشن‌های ذخیره‌سازی
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collection {
    #[serde(rename = "course")]
    Course,
    #[serde(rename = "lecturer")]
    Lecturer,
    #[serde(rename = "student")]
    Student,
    #[serde(rename = "courseregister")]
    CourseRegister,
    #[serde(rename = "presentedcourses")]
    PresentedCourses,
}

impl Collection {
    /// نام کالکشن در store
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Course => "course",
            Self::Lecturer => "lecturer",
            Self::Student => "student",
            Self::CourseRegister => "courseregister",
            Self::PresentedCourses => "presentedcourses",
        }
    }

    /// فیلد کلید طبیعی
    #[must_use]
    pub fn key_field(&self) -> &'static str {
        match self {
            Self::Course | Self::CourseRegister | Self::PresentedCourses => "cid",
            Self::Lecturer => "lid",
            Self::Student => "stid",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =====================================
// Schema
// =====================================
/// یک فیلد لیستی که به کلید کالکشن دیگه ارجاع میده
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListReference {
    pub field: &'static str,
    pub target: Collection,
}

/// پیام‌های خطای هر entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityMessages {
    /// کلید تکراری در create/update
    pub duplicate: &'static str,
    /// update روی کلیدی که وجود نداره
    pub not_found: &'static str,
    /// get روی کلیدی که وجود نداره
    pub missing: &'static str,
    /// delete روی کلیدی که وجود نداره
    pub not_deleted: &'static str,
}

/// رفتار اعتبارسنجی یک entity
#[derive(Debug, Clone, Copy)]
pub struct EntitySchema {
    pub collection: Collection,
    /// قوانین فیلدها به ترتیب اجرا
    pub rules: &'static [FieldRule],
    /// کالکشنی که `cid` این entity باید درش وجود داشته باشه
    pub owner: Option<Collection>,
    /// لیست‌های ارجاع به ترتیب بررسی
    pub references: &'static [ListReference],
    pub messages: EntityMessages,
}

impl EntitySchema {
    /// فیلد کلید طبیعی
    #[must_use]
    pub fn key_field(&self) -> &'static str {
        self.collection.key_field()
    }
}

const COURSE_MESSAGES: EntityMessages = EntityMessages {
    duplicate: "Duplicate course id. Course already exists",
    not_found: "Course not found",
    missing: "Invalid course id. Course not found",
    not_deleted: "Course was not deleted",
};

// =====================================
// Entity Trait
// =====================================
/// رکوردی که در یک کالکشن ذخیره میشه
///
/// سرویس عمومی `RecordService<E>` فقط با این trait کار میکنه.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// نوع update جزئی
    type Patch: Serialize + DeserializeOwned + Send + Sync + 'static;

    const SCHEMA: EntitySchema;

    /// مقدار کلید طبیعی
    fn key(&self) -> &str;
}
