//! # مدل ثبت‌نام درس (CourseRegister)

use serde::{Deserialize, Serialize};

use super::{Collection, Entity, EntitySchema, ListReference, COURSE_MESSAGES};
use crate::validation::rules::OFFERING_RULES;

/// ثبت‌نام دانشجوها در یک درس
///
/// `cid` باید در کالکشن درس‌ها وجود داشته باشه.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRegister {
    pub cid: String,
    pub cname: String,
    pub department: String,
    pub credit: String,
    /// دانشجوهای ثبت‌نام شده (stid)
    pub sid: Vec<u64>,
    /// نام استاد
    pub fname: String,
    pub lname: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRegisterPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lname: Option<String>,
}

impl Entity for CourseRegister {
    type Patch = CourseRegisterPatch;

    const SCHEMA: EntitySchema = EntitySchema {
        collection: Collection::CourseRegister,
        rules: OFFERING_RULES,
        owner: Some(Collection::Course),
        references: &[ListReference {
            field: "sid",
            target: Collection::Student,
        }],
        messages: COURSE_MESSAGES,
    };

    fn key(&self) -> &str {
        &self.cid
    }
}
