use crate::content::ContentDraft;
use crate::error::ValidationError;
use crate::exam::ExamDraft;

/// Presence checks run before any request leaves the client.
pub struct Validator;

impl Validator {
    /// Title must contain something other than whitespace.
    pub fn validate_content_draft(draft: &ContentDraft) -> Result<(), ValidationError> {
        if draft.title.trim().is_empty() {
            return Err(ValidationError::MissingContentTitle);
        }
        Ok(())
    }

    /// Name must contain something other than whitespace and a date must be picked.
    pub fn validate_exam_draft(draft: &ExamDraft) -> Result<(), ValidationError> {
        if draft.name.trim().is_empty() {
            return Err(ValidationError::MissingExamName);
        }
        if draft.date.is_none() {
            return Err(ValidationError::MissingExamDate);
        }
        Ok(())
    }
}
