//! Monthly financial statement.
//!
//! The statement is built in two steps:
//! - [`StatementLayout`] fixes the text, order and styling of every line
//! - the PDF writer places that layout on a single A5 landscape page

mod error;
mod layout;
mod metrics;
mod pdf;
mod renderer;

pub use error::StatementError;
pub use layout::{FOOTER_TEXT, RowStyle, STATEMENT_TITLE, StatementLayout, StatementRow};
pub use renderer::StatementRenderer;
