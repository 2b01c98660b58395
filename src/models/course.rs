//! # مدل درس (Course)

use serde::{Deserialize, Serialize};

use super::{Collection, Entity, EntitySchema, COURSE_MESSAGES};
use crate::validation::rules::COURSE_RULES;

/// درس
///
/// # مثال
/// ```rust
/// use university_records::models::Course;
///
/// let json = r#"{"cid":"12342","cname":"میو","department":"علوم پایه","credit":"3"}"#;
/// let course: Course = serde_json::from_str(json).unwrap();
/// assert_eq!(course.cid, "12342");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// کد درس (۵ رقم)
    pub cid: String,
    pub cname: String,
    pub department: String,
    /// تعداد واحد (۱ تا ۳)
    pub credit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoursePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit: Option<String>,
}

impl Entity for Course {
    type Patch = CoursePatch;

    const SCHEMA: EntitySchema = EntitySchema {
        collection: Collection::Course,
        rules: COURSE_RULES,
        owner: None,
        references: &[],
        messages: COURSE_MESSAGES,
    };

    fn key(&self) -> &str {
        &self.cid
    }
}
