//! Application-wide error types.

use thiserror::Error;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Validation error (bad upload, missing input).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input was well-formed but could not be processed (e.g. unreadable workbook).
    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    /// File storage error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Unprocessable(_) => 422,
            Self::Storage(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the generic error code for API responses.
    ///
    /// Routes with a more specific code (e.g. `missing_file`) override it.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NotFound(_) => "not_found",
            Self::Unprocessable(_) => "unprocessable",
            Self::Storage(_) => "storage_error",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Returns the message without the variant prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(msg)
            | Self::NotFound(msg)
            | Self::Unprocessable(msg)
            | Self::Storage(msg)
            | Self::Internal(msg) => msg,
        }
    }
}
