//! Error types for the projection engine

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("invalid date range: {reason}")]
    InvalidDateRange { reason: String },

    #[error("projection produced a non-finite value for {field}")]
    NonFinite { field: &'static str },
}

impl EngineError {
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub fn invalid_dates(reason: impl Into<String>) -> Self {
        EngineError::InvalidDateRange {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
