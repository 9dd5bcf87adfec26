use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] bugform_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Bug report is incomplete: {0}")]
    Invalid(String),
    #[error("Bug report was not accepted: {0}")]
    Rejected(String),
    #[error("{0}")]
    Network(String),
}
