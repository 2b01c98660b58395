//! # مدل استاد (Lecturer)

use serde::{Deserialize, Serialize};

use super::{Collection, Entity, EntityMessages, EntitySchema, ListReference};
use crate::validation::rules::LECTURER_RULES;

/// استاد
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecturer {
    /// کد استادی (۶ رقم)
    pub lid: String,
    pub fname: String,
    pub lname: String,
    pub department: String,
    pub major: String,
    /// تاریخ تولد شمسی `YYYY/MM/DD`
    pub birth: String,
    pub borncity: String,
    /// درس‌هایی که استاد ارائه میده (cid)
    pub lcourseids: Vec<u64>,
    /// کد ملی
    pub id: String,
    pub address: String,
    pub postalcode: String,
    pub cphone: String,
    pub hphone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LecturerPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borncity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lcourseids: Option<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postalcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cphone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hphone: Option<String>,
}

impl Entity for Lecturer {
    type Patch = LecturerPatch;

    const SCHEMA: EntitySchema = EntitySchema {
        collection: Collection::Lecturer,
        rules: LECTURER_RULES,
        owner: None,
        references: &[ListReference {
            field: "lcourseids",
            target: Collection::Course,
        }],
        messages: EntityMessages {
            duplicate: "Duplicate lecturer id. lecturer already exists",
            not_found: "Lecturer not found",
            missing: "Invalid lecturer id. Lecturer not found",
            not_deleted: "Lecturer was not deleted",
        },
    };

    fn key(&self) -> &str {
        &self.lid
    }
}
