use std::time::Duration;

use chrono::NaiveDate;
use thiserror::Error;

use syllabus_api::ApiGateway;
use syllabus_core::{
    ContentRecord, ExamRecord, RecordId, RequestError, StatusState, ValidationError, Validator,
};

use crate::config::ManagerConfig;
use crate::confirm::ConfirmationGate;
use crate::forms::FormState;
use crate::status::{StatusHandle, StatusTracker};
use crate::store::RecordStore;
use crate::view::SyllabusView;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this exam?";

const LOAD_FAILED: &str = "Could not load the exams.";
const CREATE_FAILED: &str = "Error saving exam.";
const UPDATE_FAILED: &str = "Error updating exam.";
const DELETE_FAILED: &str = "Error deleting exam.";
const CONTENT_FAILED: &str = "Error saving content.";

const EXAM_ADDED: &str = "Exam added.";
const EXAM_UPDATED: &str = "Exam updated.";
const EXAM_DELETED: &str = "Exam deleted.";
const CONTENT_SAVED: &str = "Content saved.";

/// Why an action did not complete.
///
/// The same failure is also shown through the status message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("Exam {0} is not in the list.")]
    UnknownExam(RecordId),
}

/// Outcome of a delete request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Removed,
    /// The confirmation prompt was declined. Nothing changed.
    Declined,
}

/// State and actions behind the syllabus page.
///
/// Actions take `&mut self`, so at most one runs at a time per manager, and
/// no action can touch a manager that has been dropped.
pub struct SyllabusManager<G, C> {
    gateway: G,
    confirm: C,
    store: RecordStore,
    forms: FormState,
    status: StatusTracker,
    config: ManagerConfig,
}

impl<G, C> SyllabusManager<G, C>
where
    G: ApiGateway,
    C: ConfirmationGate,
{
    pub fn new(gateway: G, confirm: C, config: ManagerConfig) -> Self {
        Self {
            gateway,
            confirm,
            store: RecordStore::new(),
            forms: FormState::new(),
            status: StatusTracker::new(),
            config,
        }
    }

    /// Create a manager and run the initial fetch.
    ///
    /// A failed fetch leaves the list empty and shows an error status.
    pub async fn mount(gateway: G, confirm: C, config: ManagerConfig) -> Self {
        let mut manager = Self::new(gateway, confirm, config);
        if let Err(e) = manager.load_all().await {
            tracing::debug!("Mounted without exams: {}", e);
        }
        manager
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn exams(&self) -> &[ExamRecord] {
        self.store.as_slice()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn forms(&self) -> &FormState {
        &self.forms
    }

    pub fn forms_mut(&mut self) -> &mut FormState {
        &mut self.forms
    }

    pub fn status(&self) -> StatusState {
        self.status.snapshot()
    }

    /// Handle that observes the status from outside the manager.
    pub fn status_handle(&self) -> StatusHandle {
        self.status.handle()
    }

    pub fn view(&self) -> SyllabusView {
        SyllabusView::build(&self.store, &self.forms, self.status.snapshot())
    }

    pub fn set_content_title(&mut self, title: impl Into<String>) {
        self.forms.content.title = title.into();
    }

    pub fn set_content_description(&mut self, description: impl Into<String>) {
        self.forms.content.description = description.into();
    }

    pub fn set_exam_name(&mut self, name: impl Into<String>) {
        self.forms.exam.name = name.into();
    }

    pub fn set_exam_date(&mut self, date: Option<NaiveDate>) {
        self.forms.exam.date = date;
    }

    /// Replace the list with the server's collection. Returns how many exams
    /// are now held.
    pub async fn load_all(&mut self) -> Result<usize, ActionError> {
        self.status.clear_messages();
        let _busy = self.status.begin_busy();

        match self.gateway.fetch_exams().await {
            Ok(exams) => {
                let count = self.store.replace_all(exams);
                tracing::info!("Loaded {} exams", count);
                Ok(count)
            }
            Err(e) => {
                tracing::error!("Failed to load exams: {}", e);
                Err(self.fail(e, LOAD_FAILED, self.config.mutation_notice))
            }
        }
    }

    /// Fetch the collection again, discarding the local list on success.
    pub async fn refresh(&mut self) -> Result<usize, ActionError> {
        tracing::debug!("Refreshing exams");
        self.load_all().await
    }

    /// Create an exam from the exam draft and append it to the list.
    pub async fn submit_exam(&mut self) -> Result<ExamRecord, ActionError> {
        self.status.clear_messages();
        let (name, date) = match self.exam_input() {
            Ok(input) => input,
            Err(e) => return Err(self.reject(e)),
        };
        let _busy = self.status.begin_busy();

        match self.gateway.create_exam(&name, date).await {
            Ok(exam) => {
                tracing::info!("Created exam {} ({})", exam.id, exam.name);
                self.store.append(exam.clone());
                self.forms.exam.clear();
                self.status.set_success(EXAM_ADDED, self.config.mutation_notice);
                Ok(exam)
            }
            Err(e) => {
                tracing::error!("Failed to create exam: {}", e);
                Err(self.fail(e, CREATE_FAILED, self.config.mutation_notice))
            }
        }
    }

    /// Overwrite exam `id` with the exam draft, keeping its list position.
    pub async fn update_exam(&mut self, id: &RecordId) -> Result<ExamRecord, ActionError> {
        self.status.clear_messages();
        let (name, date) = match self.exam_input() {
            Ok(input) => input,
            Err(e) => return Err(self.reject(e)),
        };
        if !self.store.contains(id) {
            tracing::warn!("Update requested for unknown exam {}", id);
            return Err(self.reject(ActionError::UnknownExam(id.clone())));
        }
        let _busy = self.status.begin_busy();

        match self.gateway.update_exam(id, &name, date).await {
            Ok(exam) => {
                tracing::info!("Updated exam {}", id);
                self.store.replace(id, exam.clone());
                self.forms.exam.clear();
                self.status.set_success(EXAM_UPDATED, self.config.mutation_notice);
                Ok(exam)
            }
            Err(e) => {
                tracing::error!("Failed to update exam {}: {}", id, e);
                Err(self.fail(e, UPDATE_FAILED, self.config.mutation_notice))
            }
        }
    }

    /// Delete exam `id` after the user confirms.
    pub async fn remove_exam(&mut self, id: &RecordId) -> Result<Removal, ActionError> {
        if !self.confirm.confirm(DELETE_PROMPT) {
            tracing::debug!("Deletion of exam {} declined", id);
            return Ok(Removal::Declined);
        }
        self.status.clear_messages();
        let _busy = self.status.begin_busy();

        match self.gateway.delete_exam(id).await {
            Ok(()) => {
                tracing::info!("Deleted exam {}", id);
                self.store.remove(id);
                self.status.set_success(EXAM_DELETED, self.config.removal_notice);
                Ok(Removal::Removed)
            }
            Err(e) => {
                tracing::error!("Failed to delete exam {}: {}", id, e);
                Err(self.fail(e, DELETE_FAILED, self.config.removal_notice))
            }
        }
    }

    /// Send the content draft. Nothing is kept locally besides the status.
    pub async fn submit_content(&mut self) -> Result<ContentRecord, ActionError> {
        self.status.clear_messages();
        if let Err(e) = Validator::validate_content_draft(&self.forms.content) {
            return Err(self.reject(e));
        }
        let _busy = self.status.begin_busy();

        let draft = &self.forms.content;
        match self
            .gateway
            .create_content(&draft.title, &draft.description)
            .await
        {
            Ok(content) => {
                tracing::info!("Saved content {:?}", content.title);
                self.forms.content.clear();
                self.status.set_success(CONTENT_SAVED, self.config.mutation_notice);
                Ok(content)
            }
            Err(e) => {
                tracing::error!("Failed to save content: {}", e);
                Err(self.fail(e, CONTENT_FAILED, self.config.mutation_notice))
            }
        }
    }

    /// Validated name and date from the exam draft, sent as typed.
    fn exam_input(&self) -> Result<(String, NaiveDate), ValidationError> {
        let draft = &self.forms.exam;
        Validator::validate_exam_draft(draft)?;
        let date = draft.date.ok_or(ValidationError::MissingExamDate)?;
        Ok((draft.name.clone(), date))
    }

    /// Report a failure caught before any request was sent.
    fn reject(&mut self, err: impl Into<ActionError>) -> ActionError {
        let err = err.into();
        tracing::debug!("Action rejected: {}", err);
        self.status.set_error(err.to_string(), self.config.mutation_notice);
        err
    }

    /// Report a failed request with a generic message.
    fn fail(&mut self, err: RequestError, message: &str, clear_after: Duration) -> ActionError {
        self.status.set_error(message, clear_after);
        ActionError::Request(err)
    }
}
