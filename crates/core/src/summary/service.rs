//! Summary service.

use rust_decimal::Decimal;

use super::error::SummaryError;
use super::types::{CategoryTotals, KindTotal, MonthlySummary, Period, TransactionRow};
use crate::classification::{Classifier, KeywordClassifier};

/// Labels shown in the report chart, in display order.
pub const CHART_LABELS: [&str; 3] = ["Modal", "Uang Masuk", "Uang Keluar"];

/// Service for aggregating transactions into a monthly summary.
pub struct SummaryService;

impl SummaryService {
    /// Summarizes rows with the keyword classifier.
    pub fn summarize(
        rows: &[TransactionRow],
        business_name: &str,
        period_label: &str,
    ) -> Result<MonthlySummary, SummaryError> {
        Self::summarize_with(&KeywordClassifier, rows, business_name, period_label)
    }

    /// Summarizes rows with any classifier.
    ///
    /// Rows the classifier leaves unclassified contribute to no total.
    pub fn summarize_with(
        classifier: &dyn Classifier,
        rows: &[TransactionRow],
        business_name: &str,
        period_label: &str,
    ) -> Result<MonthlySummary, SummaryError> {
        let mut totals = CategoryTotals::default();
        for row in rows {
            totals.add(classifier.classify(&row.kind), row.amount)?;
        }

        MonthlySummary::new(business_name, Period::parse(period_label), totals)
    }

    /// Totals per canonical transaction label for the report chart.
    ///
    /// Labels are trimmed and compared exactly; every row with another label is
    /// ignored. All [`CHART_LABELS`] are always present, in order.
    pub fn kind_breakdown(rows: &[TransactionRow]) -> Result<Vec<KindTotal>, SummaryError> {
        CHART_LABELS
            .iter()
            .map(|&label| {
                let value = rows
                    .iter()
                    .filter(|row| row.kind.trim() == label)
                    .try_fold(Decimal::ZERO, |sum, row| sum.checked_add(row.amount))
                    .ok_or(SummaryError::AmountOutOfRange(label))?;

                Ok(KindTotal {
                    label: label.to_string(),
                    value,
                })
            })
            .collect()
    }
}
