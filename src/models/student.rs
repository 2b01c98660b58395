//! # مدل دانشجو (Student)

use serde::{Deserialize, Serialize};

use super::{Collection, Entity, EntityMessages, EntitySchema, ListReference};
use crate::validation::rules::STUDENT_RULES;

/// دانشجو
///
/// شماره دانشجویی ۱۱ کاراکتره و کاراکترهای ۳ تا ۹ همیشه `114150` هستن.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub stid: String,
    pub fname: String,
    pub lname: String,
    /// نام پدر
    pub father: String,
    pub birth: String,
    pub department: String,
    pub major: String,
    pub married: bool,
    /// اساتید دانشجو (lid)
    pub lids: Vec<u64>,
    /// درس‌های دانشجو (cid)
    pub scourseids: Vec<u64>,
    pub borncity: String,
    /// سریال شناسنامه
    pub ids: String,
    pub address: String,
    pub postalcode: String,
    pub cphone: String,
    pub hphone: String,
    /// کد ملی
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub married: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lids: Option<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scourseids: Option<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borncity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ids: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postalcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cphone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hphone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Entity for Student {
    type Patch = StudentPatch;

    const SCHEMA: EntitySchema = EntitySchema {
        collection: Collection::Student,
        rules: STUDENT_RULES,
        owner: None,
        references: &[
            ListReference {
                field: "lids",
                target: Collection::Lecturer,
            },
            ListReference {
                field: "scourseids",
                target: Collection::Course,
            },
        ],
        messages: EntityMessages {
            duplicate: "Duplicate student id. Student already exists",
            not_found: "Student not found",
            missing: "Invalid student id. Student not found",
            not_deleted: "Student was not deleted",
        },
    };

    fn key(&self) -> &str {
        &self.stid
    }
}
