//! Summary error types.

use thiserror::Error;

/// Errors that can occur while aggregating transactions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummaryError {
    /// A running total no longer fits in a decimal.
    #[error("total for '{0}' is out of range")]
    AmountOutOfRange(&'static str),
}
