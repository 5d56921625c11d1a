use thiserror::Error;

/// A required field is empty; the request is never sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a title for the content.")]
    MissingContentTitle,

    #[error("Please enter the exam name.")]
    MissingExamName,

    #[error("Please enter the exam date.")]
    MissingExamDate,
}

/// Any failure talking to the syllabus API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// Transport failure: connect, DNS, timeout.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// A 2xx response whose body did not have the expected shape.
    #[error("Invalid response: {0}")]
    Decode(String),

    /// The id cannot be used as a path segment (`""`, `"."` or `".."`).
    /// Nothing was sent.
    #[error("Id {0:?} cannot be addressed in a request path")]
    InvalidId(String),
}

impl RequestError {
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
