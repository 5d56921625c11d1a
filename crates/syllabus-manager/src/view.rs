use syllabus_core::{ContentDraft, ExamDraft, RecordId, StatusState};

use crate::forms::FormState;
use crate::store::RecordStore;

/// Placeholder shown when no exam is scheduled.
pub const EMPTY_EXAMS_LINE: &str = "No exams scheduled yet.";

/// One line of the scheduled-exams list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamRow {
    pub id: RecordId,
    pub label: String,
}

/// Everything a presentation layer needs to draw the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyllabusView {
    pub status: StatusState,
    /// Buttons are disabled while a request is in flight.
    pub controls_enabled: bool,
    pub content_draft: ContentDraft,
    pub exam_draft: ExamDraft,
    pub exams: Vec<ExamRow>,
}

impl SyllabusView {
    pub fn build(store: &RecordStore, forms: &FormState, status: StatusState) -> Self {
        let exams = store
            .iter()
            .map(|exam| ExamRow {
                id: exam.id.clone(),
                label: exam.display_line(),
            })
            .collect();

        Self {
            controls_enabled: !status.busy,
            status,
            content_draft: forms.content.clone(),
            exam_draft: forms.exam.clone(),
            exams,
        }
    }

    /// Text lines of the exam list, or the placeholder when empty.
    pub fn exam_lines(&self) -> Vec<String> {
        if self.exams.is_empty() {
            return vec![EMPTY_EXAMS_LINE.to_string()];
        }
        self.exams.iter().map(|row| row.label.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use syllabus_core::ExamRecord;

    #[test]
    fn test_empty_list_placeholder() {
        let view = SyllabusView::build(
            &RecordStore::new(),
            &FormState::new(),
            StatusState::default(),
        );

        assert!(view.exams.is_empty());
        assert_eq!(view.exam_lines(), vec![EMPTY_EXAMS_LINE.to_string()]);
        assert!(view.controls_enabled);
    }

    #[test]
    fn test_rows_follow_store_order() {
        let mut store = RecordStore::new();
        store.append(ExamRecord::new(
            RecordId::Int(1),
            "Parcial 1",
            NaiveDate::from_ymd_opt(2025, 10, 25).unwrap(),
        ));
        store.append(ExamRecord::new(
            RecordId::Int(2),
            "Final",
            NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
        ));

        let view = SyllabusView::build(&store, &FormState::new(), StatusState::default());

        assert_eq!(
            view.exam_lines(),
            vec!["Parcial 1 / 2025-10-25", "Final / 2025-12-01"]
        );
        assert_eq!(view.exams[1].id, RecordId::Int(2));
    }

    #[test]
    fn test_controls_disabled_while_busy() {
        let status = StatusState {
            busy: true,
            ..Default::default()
        };
        let view = SyllabusView::build(&RecordStore::new(), &FormState::new(), status);

        assert!(!view.controls_enabled);
    }
}
