//! Syllabus API - HTTP gateway to the syllabus REST backend.
//!
//! Everything that touches the network lives here. Callers depend on the
//! [`ApiGateway`] trait; [`HttpApiGateway`] is the reqwest-backed
//! implementation and attaches session cookies and the anti-forgery token
//! supplied by a [`CredentialProvider`].

pub mod config;
pub mod credentials;
pub mod gateway;
pub mod protocol;

pub use config::{ApiConfig, ConfigError};
pub use credentials::{CookieCredentials, CredentialProvider, NoCredentials};
pub use gateway::{ApiGateway, HttpApiGateway};
pub use protocol::{ContentPayload, ExamPayload};
