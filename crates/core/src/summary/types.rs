//! Summary data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::SummaryError;
use crate::classification::Category;

/// One transaction line from the uploaded workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRow {
    /// Free-text transaction type ("Jenis Transaksi").
    pub kind: String,
    /// Free-text description ("Keterangan"); not used in aggregation.
    pub description: String,
    /// Amount in whole Rupiah ("Jumlah (Rp)"); zero when the cell was not numeric.
    pub amount: Decimal,
}

impl TransactionRow {
    /// Creates a new row.
    #[must_use]
    pub fn new(kind: impl Into<String>, description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            kind: kind.into(),
            description: description.into(),
            amount,
        }
    }
}

/// Reporting period split from a label such as "Januari 2024".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Period {
    /// Month token.
    pub month: String,
    /// Year token, empty when the label had no whitespace.
    pub year: String,
}

impl Period {
    /// Parses a period label.
    ///
    /// A label containing whitespace yields its first token as the month and its last
    /// token as the year. A label without whitespace is taken whole as the month, with
    /// an empty year.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        if !label.chars().any(char::is_whitespace) {
            return Self {
                month: label.to_string(),
                year: String::new(),
            };
        }

        let mut tokens = label.split_whitespace();
        let month = tokens.next().unwrap_or_default().to_string();
        let year = tokens.next_back().unwrap_or(&month).to_string();

        Self { month, year }
    }
}

/// Running totals per statement category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryTotals {
    /// Modal.
    pub capital: Decimal,
    /// Pendapatan.
    pub revenue: Decimal,
    /// Beban Usaha.
    pub operating_expense: Decimal,
    /// Beban Lain-lain.
    pub other_expense: Decimal,
}

impl CategoryTotals {
    /// Adds `amount` to the bucket for `category`.
    ///
    /// Unclassified amounts are dropped. The bucket is left untouched when the sum
    /// would overflow.
    pub fn add(&mut self, category: Category, amount: Decimal) -> Result<(), SummaryError> {
        let bucket = match category {
            Category::Capital => &mut self.capital,
            Category::Revenue => &mut self.revenue,
            Category::OperatingExpense => &mut self.operating_expense,
            Category::OtherExpense => &mut self.other_expense,
            Category::Unclassified => return Ok(()),
        };

        *bucket = bucket
            .checked_add(amount)
            .ok_or(SummaryError::AmountOutOfRange(category.label()))?;
        Ok(())
    }
}

/// Monthly statement record.
///
/// Total expense and net profit are derived once, when the summary is built, and
/// the record is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlySummary {
    business_name: String,
    period: Period,
    totals: CategoryTotals,
    total_expense: Decimal,
    net_profit: Decimal,
}

impl MonthlySummary {
    /// Creates a summary from identity fields and accumulated totals.
    ///
    /// Fails when a derived total does not fit in a decimal.
    pub fn new(
        business_name: impl Into<String>,
        period: Period,
        totals: CategoryTotals,
    ) -> Result<Self, SummaryError> {
        let total_expense = totals
            .operating_expense
            .checked_add(totals.other_expense)
            .ok_or(SummaryError::AmountOutOfRange("Total Beban"))?;
        let net_profit = totals
            .revenue
            .checked_sub(total_expense)
            .ok_or(SummaryError::AmountOutOfRange("Laba Bersih"))?;

        Ok(Self {
            business_name: business_name.into(),
            period,
            totals,
            total_expense,
            net_profit,
        })
    }

    /// Business name ("Nama Usaha").
    #[must_use]
    pub fn business_name(&self) -> &str {
        &self.business_name
    }

    /// Reporting period.
    #[must_use]
    pub fn period(&self) -> &Period {
        &self.period
    }

    /// Month token of the reporting period.
    #[must_use]
    pub fn month(&self) -> &str {
        &self.period.month
    }

    /// Year token of the reporting period.
    #[must_use]
    pub fn year(&self) -> &str {
        &self.period.year
    }

    /// Category totals.
    #[must_use]
    pub fn totals(&self) -> &CategoryTotals {
        &self.totals
    }

    /// Modal.
    #[must_use]
    pub fn capital(&self) -> Decimal {
        self.totals.capital
    }

    /// Pendapatan.
    #[must_use]
    pub fn revenue(&self) -> Decimal {
        self.totals.revenue
    }

    /// Beban Usaha.
    #[must_use]
    pub fn operating_expense(&self) -> Decimal {
        self.totals.operating_expense
    }

    /// Beban Lain-lain.
    #[must_use]
    pub fn other_expense(&self) -> Decimal {
        self.totals.other_expense
    }

    /// Total Beban = Beban Usaha + Beban Lain-lain.
    #[must_use]
    pub fn total_expense(&self) -> Decimal {
        self.total_expense
    }

    /// Laba Bersih = Pendapatan - Total Beban.
    #[must_use]
    pub fn net_profit(&self) -> Decimal {
        self.net_profit
    }
}

/// Total for one canonical transaction label, used for the report chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindTotal {
    /// Transaction label.
    pub label: String,
    /// Sum of amounts carrying exactly this label.
    pub value: Decimal,
}
