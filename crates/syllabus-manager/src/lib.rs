//! Syllabus Manager - State and behavior behind the syllabus page.
//!
//! [`SyllabusManager`] owns the exam list mirrored from the server, the two
//! form drafts, and the busy/error/success feedback. All network access goes
//! through an [`syllabus_api::ApiGateway`].

pub mod config;
pub mod confirm;
pub mod forms;
pub mod logging;
pub mod manager;
pub mod status;
pub mod store;
pub mod view;

pub use config::ManagerConfig;
pub use confirm::{AlwaysConfirm, ConfirmationGate};
pub use forms::FormState;
pub use manager::{ActionError, Removal, SyllabusManager};
pub use status::{BusyGuard, StatusHandle, StatusTracker};
pub use store::RecordStore;
pub use view::{ExamRow, SyllabusView};
