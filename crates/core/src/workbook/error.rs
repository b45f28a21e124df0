//! Workbook error types.

use thiserror::Error;

/// Errors that can occur while reading a transaction workbook.
#[derive(Debug, Error)]
pub enum WorkbookError {
    /// The bytes are not a readable spreadsheet.
    #[error("workbook could not be read: {0}")]
    Unreadable(String),

    /// The workbook contains no worksheet.
    #[error("workbook has no worksheet")]
    NoWorksheet,

    /// A header label line is absent or has an empty value.
    #[error("header field '{0}' is missing or empty")]
    MissingHeaderField(&'static str),

    /// No row names the transaction table columns.
    #[error("transaction table header not found")]
    MissingTableHeader,

    /// The table header lacks a required column.
    #[error("required column '{0}' not found")]
    MissingColumn(&'static str),
}

impl WorkbookError {
    /// Create an unreadable workbook error.
    #[must_use]
    pub fn unreadable(msg: impl Into<String>) -> Self {
        Self::Unreadable(msg.into())
    }
}
