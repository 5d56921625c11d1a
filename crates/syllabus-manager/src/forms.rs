use syllabus_core::{ContentDraft, ExamDraft};

/// The two independent input groups on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub content: ContentDraft,
    pub exam: ExamDraft,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }
}
