//! Statement renderer.

use std::io::Write;

use super::error::StatementError;
use super::layout::StatementLayout;
use super::pdf;
use crate::storage::sanitize_filename;
use crate::summary::MonthlySummary;

/// Renders monthly summaries as a one-page PDF statement.
pub struct StatementRenderer;

impl StatementRenderer {
    /// Renders `summary` and writes the document to `sink`.
    ///
    /// The document is assembled in memory first; `sink` is only touched once the
    /// PDF is complete.
    pub fn render<W: Write>(summary: &MonthlySummary, sink: &mut W) -> Result<(), StatementError> {
        let bytes = Self::render_to_bytes(summary)?;
        sink.write_all(&bytes)?;
        sink.flush()?;
        Ok(())
    }

    /// Renders `summary` to PDF bytes.
    pub fn render_to_bytes(summary: &MonthlySummary) -> Result<Vec<u8>, StatementError> {
        pdf::render(&StatementLayout::from_summary(summary))
    }

    /// Download file name: `Laporan_{business}_{month}.pdf`, restricted to safe characters.
    #[must_use]
    pub fn file_name(summary: &MonthlySummary) -> String {
        sanitize_filename(&format!(
            "Laporan_{}_{}.pdf",
            summary.business_name(),
            summary.month()
        ))
    }
}
