//! Monthly summary aggregation.
//!
//! This module turns parsed transaction rows into the fixed-shape record the
//! statement is rendered from:
//! - Period label parsing ("Januari 2024" -> month and year)
//! - Per-category accumulation through a [`Classifier`](crate::classification::Classifier)
//! - Derived totals (total expense, net profit), with overflow reported as an error
//! - Chart totals per canonical transaction label

mod error;
pub mod service;
pub mod types;


pub use error::SummaryError;
pub use service::SummaryService;
pub use types::*;
