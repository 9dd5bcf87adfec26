//! Error types for bugform-core

use thiserror::Error;

/// Result type alias using bugform-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while setting up or configuring a form session.
///
/// Submission failures are not errors; they surface as
/// [`SubmissionOutcome`](crate::workflow::SubmissionOutcome) values.
#[derive(Error, Debug)]
pub enum Error {
    /// A capability the host must provide was not supplied
    #[error("Bug report form expected {0}")]
    MissingCapability(&'static str),

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
