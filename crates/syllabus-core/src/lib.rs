//! Syllabus Core - Domain models, error taxonomy, and validation.
//!
//! This crate contains the exam and content records exchanged with the
//! syllabus REST API, the drafts an instructor edits before submitting them,
//! and the presence checks that gate every submission. It performs no I/O.

pub mod content;
pub mod error;
pub mod exam;
pub mod id;
pub mod status;
pub mod validation;

// Re-exports for convenience
pub use content::{ContentDraft, ContentRecord};
pub use error::{RequestError, ValidationError};
pub use exam::{ExamDraft, ExamRecord};
pub use id::RecordId;
pub use status::StatusState;
pub use validation::Validator;
