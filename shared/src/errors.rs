//! Shared error types for the mixer graph components

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Invalid {kind} document: {message}")]
    InvalidDocument { kind: &'static str, message: String },

    #[error("Missing field `{field}` in {kind} document")]
    MissingField { kind: &'static str, field: &'static str },
}

impl SharedError {
    pub(crate) fn invalid(kind: &'static str, error: serde_json::Error) -> Self {
        SharedError::InvalidDocument {
            kind,
            message: error.to_string(),
        }
    }
}

pub type SharedResult<T> = Result<T, SharedError>;
