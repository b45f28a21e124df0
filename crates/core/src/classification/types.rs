//! Classification result types.

use serde::{Deserialize, Serialize};

/// Statement category a transaction label resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Owner investment (Modal).
    Capital,
    /// Incoming money (Pendapatan / Uang Masuk / Penjualan).
    Revenue,
    /// Business-related outflow (Beban Usaha).
    OperatingExpense,
    /// Non-operating outflow (Beban Lain-lain).
    OtherExpense,
    /// Matched no rule; excluded from every total.
    Unclassified,
}

impl Category {
    /// Statement label for this category.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Capital => "Modal",
            Self::Revenue => "Pendapatan",
            Self::OperatingExpense => "Beban Usaha",
            Self::OtherExpense => "Beban Lain-lain",
            Self::Unclassified => "Tidak Terklasifikasi",
        }
    }
}
