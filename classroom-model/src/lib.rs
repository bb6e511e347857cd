//! Shared entity types for the classroom application.
//!
//! This crate defines the records exchanged between:
//! - the REST API serving students and teachers
//! - the entity stores that cache them client-side
//! - the edit forms that produce new or updated records
//!
//! # Modules
//! - [`entity`] - Student and teacher records plus the open field map
//! - [`form`] - Edit-form draft and validation errors

pub mod entity;
pub mod form;

// Re-export commonly used types at crate root
pub use entity::{Entity, EntityKind, FieldValue, Student, Teacher};
pub use form::{FormErrors, StudentDraft};
