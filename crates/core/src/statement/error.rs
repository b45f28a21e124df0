//! Statement error types.

use thiserror::Error;

/// Errors that can occur while rendering a statement.
#[derive(Debug, Error)]
pub enum StatementError {
    /// The PDF document could not be assembled.
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    /// The destination could not be written.
    #[error("failed to write statement: {0}")]
    Write(#[from] std::io::Error),
}
