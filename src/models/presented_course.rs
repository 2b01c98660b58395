//! # مدل درس ارائه شده (PresentedCourse)

use serde::{Deserialize, Serialize};

use super::{Collection, Entity, EntitySchema, ListReference, COURSE_MESSAGES};
use crate::validation::rules::OFFERING_RULES;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentedCourse {
    pub cid: String,
    pub cname: String,
    pub department: String,
    pub credit: String,
    /// اساتید ارائه‌دهنده (lid)
    pub lid: Vec<u64>,
    pub fname: String,
    pub lname: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentedCoursePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lid: Option<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lname: Option<String>,
}

impl Entity for PresentedCourse {
    type Patch = PresentedCoursePatch;

    const SCHEMA: EntitySchema = EntitySchema {
        collection: Collection::PresentedCourses,
        rules: OFFERING_RULES,
        owner: Some(Collection::Course),
        references: &[ListReference {
            field: "lid",
            target: Collection::Lecturer,
        }],
        messages: COURSE_MESSAGES,
    };

    fn key(&self) -> &str {
        &self.cid
    }
}
