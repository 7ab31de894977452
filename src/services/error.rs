use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{message}")]
    InvalidRequest { field: &'static str, message: String },
    #[error("{0}")]
    NotFound(String),
    #[error("insufficient words available: {available} of {requested}")]
    InsufficientWords { available: usize, requested: usize },
    #[error("{0}")]
    Forbidden(String),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl EngineError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        EngineError::InvalidRequest {
            field,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::InvalidRequest { .. } => "validation_error",
            EngineError::NotFound(_) => "not_found",
            EngineError::InsufficientWords { .. } => "insufficient_words",
            EngineError::Forbidden(_) => "forbidden",
            EngineError::Storage(_) => "storage_error",
        }
    }

    /// Only storage failures are worth retrying unchanged.
    pub fn is_retryable(&self) -> bool {
        match self {
            EngineError::Storage(err) => err.is_retryable(),
            _ => false,
        }
    }
}
