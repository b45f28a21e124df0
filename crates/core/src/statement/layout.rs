//! Statement layout: what goes on the page, independent of how it is drawn.

use finansi_shared::types::format_rupiah;

use crate::summary::MonthlySummary;

/// Bold title line of the header block.
pub const STATEMENT_TITLE: &str = "LAPORAN KEUANGAN BULANAN";

/// Attribution line under the table.
pub const FOOTER_TEXT: &str = "Laporan otomatis oleh FinansiAI";

/// Visual treatment of a table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    /// Column captions, bold with a rule below.
    ColumnHeader,
    /// Regular line item.
    Item,
    /// Blank separator row.
    Spacer,
    /// Group caption without an amount ("Beban :").
    Section,
    /// Net profit: shaded, bold, rule above.
    NetProfit,
}

impl RowStyle {
    /// Bold text.
    #[must_use]
    pub fn is_bold(self) -> bool {
        matches!(self, Self::ColumnHeader | Self::NetProfit)
    }

    /// Shaded background.
    #[must_use]
    pub fn is_shaded(self) -> bool {
        matches!(self, Self::NetProfit)
    }

    /// Rule drawn along the top edge.
    #[must_use]
    pub fn has_rule_above(self) -> bool {
        matches!(self, Self::NetProfit)
    }

    /// Rule drawn along the bottom edge.
    #[must_use]
    pub fn has_rule_below(self) -> bool {
        matches!(self, Self::ColumnHeader)
    }
}

/// One row of the line-item table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementRow {
    /// First column.
    pub label: String,
    /// Second column (indented sub-items).
    pub sub_label: String,
    /// Formatted amount, right-aligned; empty when the row has none.
    pub amount: String,
    /// Row styling.
    pub style: RowStyle,
}

impl StatementRow {
    fn new(label: &str, sub_label: &str, amount: String, style: RowStyle) -> Self {
        Self {
            label: label.to_string(),
            sub_label: sub_label.to_string(),
            amount,
            style,
        }
    }

    fn spacer() -> Self {
        Self::new("", "", String::new(), RowStyle::Spacer)
    }
}

/// Everything printed on the statement page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementLayout {
    /// Quoted business name, first header line (italic).
    pub business_line: String,
    /// Title, second header line (bold).
    pub title: String,
    /// Period, third header line.
    pub period_line: String,
    /// Table rows in print order.
    pub rows: Vec<StatementRow>,
    /// Footer line (small italic).
    pub footer: String,
}

impl StatementLayout {
    /// Builds the fixed statement layout for a summary.
    #[must_use]
    pub fn from_summary(summary: &MonthlySummary) -> Self {
        let rows = vec![
            StatementRow::new(
                "Keterangan",
                "",
                "Jumlah (Rp)".to_string(),
                RowStyle::ColumnHeader,
            ),
            StatementRow::new("Modal", "", format_rupiah(summary.capital()), RowStyle::Item),
            StatementRow::new(
                "Pendapatan",
                "",
                format_rupiah(summary.revenue()),
                RowStyle::Item,
            ),
            StatementRow::spacer(),
            StatementRow::new("Beban :", "", String::new(), RowStyle::Section),
            StatementRow::new(
                "",
                "Beban Usaha",
                format_rupiah(summary.operating_expense()),
                RowStyle::Item,
            ),
            StatementRow::new(
                "",
                "Beban Lain-lain",
                format_rupiah(summary.other_expense()),
                RowStyle::Item,
            ),
            StatementRow::new(
                "",
                "Total Beban",
                format_rupiah(summary.total_expense()),
                RowStyle::Item,
            ),
            StatementRow::spacer(),
            StatementRow::new(
                "Laba Bersih",
                "",
                format_rupiah(summary.net_profit()),
                RowStyle::NetProfit,
            ),
        ];

        Self {
            business_line: format!("\"{}\"", summary.business_name()),
            title: STATEMENT_TITLE.to_string(),
            period_line: format!(
                "Untuk Bulan \"{}\" Tahun \"{}\"",
                summary.month(),
                summary.year()
            ),
            rows,
            footer: FOOTER_TEXT.to_string(),
        }
    }

    /// Finds the first row whose label or sub-label equals `caption`.
    #[must_use]
    pub fn row(&self, caption: &str) -> Option<&StatementRow> {
        self.rows
            .iter()
            .find(|row| row.label == caption || row.sub_label == caption)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::{CategoryTotals, Period};
    use rust_decimal_macros::dec;

    fn scenario_summary() -> MonthlySummary {
        MonthlySummary::new(
            "Warung Sejahtera",
            Period::parse("Januari 2024"),
            CategoryTotals {
                capital: dec!(1000000),
                revenue: dec!(500000),
                operating_expense: dec!(200000),
                other_expense: dec!(50000),
            },
        )
        .expect("valid totals")
    }

    #[test]
    fn test_header_block() {
        let layout = StatementLayout::from_summary(&scenario_summary());

        assert_eq!(layout.business_line, "\"Warung Sejahtera\"");
        assert_eq!(layout.title, "LAPORAN KEUANGAN BULANAN");
        assert_eq!(layout.period_line, "Untuk Bulan \"Januari\" Tahun \"2024\"");
        assert_eq!(layout.footer, "Laporan otomatis oleh FinansiAI");
    }

    #[test]
    fn test_row_order_and_text() {
        let layout = StatementLayout::from_summary(&scenario_summary());

        let cells: Vec<(&str, &str, &str)> = layout
            .rows
            .iter()
            .map(|r| (r.label.as_str(), r.sub_label.as_str(), r.amount.as_str()))
            .collect();

        assert_eq!(
            cells,
            vec![
                ("Keterangan", "", "Jumlah (Rp)"),
                ("Modal", "", "Rp 1.000.000"),
                ("Pendapatan", "", "Rp 500.000"),
                ("", "", ""),
                ("Beban :", "", ""),
                ("", "Beban Usaha", "Rp 200.000"),
                ("", "Beban Lain-lain", "Rp 50.000"),
                ("", "Total Beban", "Rp 250.000"),
                ("", "", ""),
                ("Laba Bersih", "", "Rp 250.000"),
            ]
        );
    }

    #[test]
    fn test_total_and_net_profit_share_value_not_style() {
        let layout = StatementLayout::from_summary(&scenario_summary());

        let total = layout.row("Total Beban").expect("total row");
        let net = layout.row("Laba Bersih").expect("net profit row");

        assert_eq!(total.amount, "Rp 250.000");
        assert_eq!(net.amount, total.amount);
        assert_eq!(total.style, RowStyle::Item);
        assert_eq!(net.style, RowStyle::NetProfit);
        assert!(net.style.is_shaded() && net.style.is_bold() && net.style.has_rule_above());
        assert!(!total.style.is_shaded() && !total.style.is_bold());
    }

    #[test]
    fn test_net_profit_is_last_row() {
        let layout = StatementLayout::from_summary(&scenario_summary());
        assert_eq!(layout.rows.len(), 10);
        assert_eq!(
            layout.rows.last().map(|r| r.style),
            Some(RowStyle::NetProfit)
        );
        assert!(layout.rows[0].style.has_rule_below());
    }

    #[test]
    fn test_period_without_year() {
        let summary = MonthlySummary::new("Toko", Period::parse("2024"), CategoryTotals::default())
            .expect("valid totals");
        let layout = StatementLayout::from_summary(&summary);
        assert_eq!(layout.period_line, "Untuk Bulan \"2024\" Tahun \"\"");
        assert_eq!(layout.row("Laba Bersih").map(|r| r.amount.as_str()), Some("Rp 0"));
    }
}
