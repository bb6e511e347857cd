//! Edit-form shapes for students.
//!
//! The form keeps the course list as a single comma-separated string (what
//! the user types); records keep it as a list.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::entity::Student;

/// Student fields as edited in a form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentDraft {
    pub name: String,
    pub surname: String,
    pub student_id: String,

    /// Comma-separated course codes
    pub course_list: String,

    /// Read-only rendering of the course list for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_list_display: Option<String>,

    pub teacher_id: String,
    pub comment: String,

    /// Uploaded image URL, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Per-field validation messages, keyed by wire field name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, String>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl StudentDraft {
    /// Fields that must be non-blank before a draft can be saved.
    pub const REQUIRED: [&'static str; 4] = ["name", "surname", "studentId", "teacherId"];

    /// Check required fields. Returns an empty map when the draft is valid.
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        for field in Self::REQUIRED {
            let value = match field {
                "name" => &self.name,
                "surname" => &self.surname,
                "studentId" => &self.student_id,
                _ => &self.teacher_id,
            };
            if value.trim().is_empty() {
                errors.insert(field, format!("{field} is required"));
            }
        }
        errors
    }

    /// Split the comma-separated course list, dropping blanks.
    pub fn courses(&self) -> Vec<String> {
        self.course_list
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Apply this draft on top of an existing record.
    ///
    /// Unknown fields of `base` are kept; the profile image is only replaced
    /// when the draft carries a new one.
    pub fn apply_to(&self, base: &Student) -> Student {
        Student {
            name: self.name.trim().to_string(),
            surname: self.surname.trim().to_string(),
            student_id: self.student_id.trim().to_string(),
            profile_image: self
                .image
                .clone()
                .unwrap_or_else(|| base.profile_image.clone()),
            course_list: self.courses(),
            teacher_id: self.teacher_id.trim().to_string(),
            comment: self.comment.clone(),
            extra: base.extra.clone(),
        }
    }
}

impl From<&Student> for StudentDraft {
    fn from(student: &Student) -> Self {
        let joined = student.course_list.join(", ");
        Self {
            name: student.name.clone(),
            surname: student.surname.clone(),
            student_id: student.student_id.clone(),
            course_list: joined.clone(),
            course_list_display: Some(joined),
            teacher_id: student.teacher_id.clone(),
            comment: student.comment.clone(),
            image: None,
        }
    }
}
