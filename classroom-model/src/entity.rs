//! Student and teacher records.
//!
//! Both records are open maps on the wire: the known fields are typed, any
//! other key is kept in `extra` so a round trip through the client never
//! drops data the API added.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The two kinds of entity the application manages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Student,
    Teacher,
}

impl EntityKind {
    /// Resource tag used in URLs such as `/404/student`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
        }
    }

    /// REST collection name (e.g., "students").
    pub fn collection(self) -> &'static str {
        match self {
            Self::Student => "students",
            Self::Teacher => "teachers",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field value: either a single string or a list of strings.
///
/// `Other` keeps anything else the API sends (numeric ids, nulls) intact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    Other(serde_json::Value),
}

/// Lists render comma-separated; other JSON values as JSON.
impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::List(items) => f.write_str(&items.join(", ")),
            Self::Other(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Common behaviour of records held by an entity store.
pub trait Entity: Clone + Serialize + DeserializeOwned + 'static {
    const KIND: EntityKind;

    /// The identifying key (`studentId` / `teacherId`).
    fn id(&self) -> &str;

    /// Look up a field by its wire name, including unknown fields.
    fn field(&self, name: &str) -> Option<FieldValue>;
}

/// A student record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub surname: String,

    pub student_id: String,

    /// URL of the profile picture
    #[serde(default)]
    pub profile_image: String,

    /// Course codes the student is enrolled in
    #[serde(default)]
    pub course_list: Vec<String>,

    /// Advisor (references `Teacher::teacher_id`)
    #[serde(default)]
    pub teacher_id: String,

    #[serde(default)]
    pub comment: String,

    /// Fields not modelled above
    #[serde(flatten)]
    pub extra: BTreeMap<String, FieldValue>,
}

impl Entity for Student {
    const KIND: EntityKind = EntityKind::Student;

    fn id(&self) -> &str {
        &self.student_id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let text = |s: &str| Some(FieldValue::from(s));
        match name {
            "name" => text(&self.name),
            "surname" => text(&self.surname),
            "studentId" => text(&self.student_id),
            "profileImage" => text(&self.profile_image),
            "courseList" => Some(FieldValue::List(self.course_list.clone())),
            "teacherId" => text(&self.teacher_id),
            "comment" => text(&self.comment),
            other => self.extra.get(other).cloned(),
        }
    }
}

/// A teacher record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub surname: String,

    #[serde(default)]
    pub profile_image: String,

    pub teacher_id: String,

    #[serde(flatten)]
    pub extra: BTreeMap<String, FieldValue>,
}

impl Entity for Teacher {
    const KIND: EntityKind = EntityKind::Teacher;

    fn id(&self) -> &str {
        &self.teacher_id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let text = |s: &str| Some(FieldValue::from(s));
        match name {
            "name" => text(&self.name),
            "surname" => text(&self.surname),
            "profileImage" => text(&self.profile_image),
            "teacherId" => text(&self.teacher_id),
            other => self.extra.get(other).cloned(),
        }
    }
}
