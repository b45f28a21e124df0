//! Workbook parser.

use std::io::Cursor;
use std::str::FromStr;
use std::sync::LazyLock;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::error::WorkbookError;
use crate::summary::TransactionRow;

/// Transaction type column; also marks the table header row.
pub const KIND_COLUMN: &str = "Jenis Transaksi";
/// Description column.
pub const DESCRIPTION_COLUMN: &str = "Keterangan";
/// Amount column.
pub const AMOUNT_COLUMN: &str = "Jumlah (Rp)";

/// Rows whose type mentions this (any case) are subtotal lines, not transactions.
const TOTAL_MARKER: &str = "total";

static BUSINESS_NAME_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)nama\s*usaha").expect("valid business name pattern"));

static PERIOD_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)bulan").expect("valid period pattern"));

/// Result of reading a transaction workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedWorkbook {
    /// Value of the "Nama Usaha" label line.
    pub business_name: String,
    /// Value of the "Bulan" label line, e.g. "Januari 2024".
    pub period_label: String,
    /// Transaction rows in sheet order.
    pub rows: Vec<TransactionRow>,
    /// Optional columns that were absent from the table header.
    pub missing_columns: Vec<String>,
}

/// Reads the Finansi transaction template.
pub struct WorkbookParser;

impl WorkbookParser {
    /// Parses `.xlsx` bytes, reading the first worksheet.
    pub fn parse_bytes(bytes: &[u8]) -> Result<ParsedWorkbook, WorkbookError> {
        let grid = read_first_sheet(bytes)?;
        Self::parse_grid(&grid)
    }

    /// Parses an already-loaded cell grid whose first column is sheet column A.
    ///
    /// Header labels are looked up before the table header, so a workbook missing
    /// both reports the missing label.
    pub fn parse_grid(grid: &[Vec<Data>]) -> Result<ParsedWorkbook, WorkbookError> {
        let header_index = grid.iter().position(|row| is_table_header(row));
        let labels = HeaderLabels::scan(&grid[..header_index.unwrap_or(grid.len())]);

        let business_name = labels
            .business_name
            .filter(|v| !v.is_empty())
            .ok_or(WorkbookError::MissingHeaderField("Nama Usaha"))?;
        let period_label = labels
            .period_label
            .filter(|v| !v.is_empty())
            .ok_or(WorkbookError::MissingHeaderField("Bulan"))?;

        let header_index = header_index.ok_or(WorkbookError::MissingTableHeader)?;
        let columns = ColumnMap::from_header(&grid[header_index])?;

        let rows = grid[header_index + 1..]
            .iter()
            .filter(|row| !is_blank(row))
            .map(|row| columns.read_row(row))
            .filter(|row| !row.kind.to_lowercase().contains(TOTAL_MARKER))
            .collect();

        Ok(ParsedWorkbook {
            business_name,
            period_label,
            rows,
            missing_columns: columns.missing(),
        })
    }
}

fn read_first_sheet(bytes: &[u8]) -> Result<Vec<Vec<Data>>, WorkbookError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| WorkbookError::unreadable(e.to_string()))?;

    let first_sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(WorkbookError::NoWorksheet)?;

    let range = workbook
        .worksheet_range(&first_sheet)
        .map_err(|e| WorkbookError::unreadable(e.to_string()))?;

    // The range starts at the first used cell; pad so index 0 is always column A.
    let leading_columns = range
        .start()
        .and_then(|(_, col)| usize::try_from(col).ok())
        .unwrap_or(0);

    Ok(range
        .rows()
        .map(|row| {
            std::iter::repeat_n(Data::Empty, leading_columns)
                .chain(row.iter().cloned())
                .collect()
        })
        .collect())
}

/// Label lines found above the table.
#[derive(Debug, Default)]
struct HeaderLabels {
    business_name: Option<String>,
    period_label: Option<String>,
}

impl HeaderLabels {
    /// Scans column A. Later lines override earlier ones.
    fn scan(rows: &[Vec<Data>]) -> Self {
        let mut labels = Self::default();

        for row in rows {
            let Some(Data::String(text)) = row.first() else {
                continue;
            };

            if BUSINESS_NAME_LABEL.is_match(text) {
                labels.business_name = Some(value_after_colon(text));
            } else if PERIOD_LABEL.is_match(text) {
                labels.period_label = Some(value_after_colon(text));
            }
        }

        labels
    }
}

/// Text after the last colon, trimmed. A line without a colon is taken whole.
fn value_after_colon(text: &str) -> String {
    text.rsplit(':').next().unwrap_or(text).trim().to_string()
}

fn is_table_header(row: &[Data]) -> bool {
    row.iter()
        .any(|cell| matches!(cell, Data::String(text) if text.contains(KIND_COLUMN)))
}

fn is_blank(row: &[Data]) -> bool {
    row.iter().all(|cell| matches!(cell, Data::Empty))
}

/// Positions of the known columns in the table header.
#[derive(Debug)]
struct ColumnMap {
    kind: usize,
    description: Option<usize>,
    amount: Option<usize>,
}

impl ColumnMap {
    fn from_header(header: &[Data]) -> Result<Self, WorkbookError> {
        let find = |name: &str| {
            header
                .iter()
                .position(|cell| matches!(cell, Data::String(text) if text.trim() == name))
        };

        Ok(Self {
            kind: find(KIND_COLUMN).ok_or(WorkbookError::MissingColumn(KIND_COLUMN))?,
            description: find(DESCRIPTION_COLUMN),
            amount: find(AMOUNT_COLUMN),
        })
    }

    fn missing(&self) -> Vec<String> {
        [
            (self.description, DESCRIPTION_COLUMN),
            (self.amount, AMOUNT_COLUMN),
        ]
        .into_iter()
        .filter(|(index, _)| index.is_none())
        .map(|(_, name)| name.to_string())
        .collect()
    }

    fn read_row(&self, row: &[Data]) -> TransactionRow {
        TransactionRow {
            kind: cell_text(row.get(self.kind)),
            description: cell_text(self.description.and_then(|i| row.get(i))),
            amount: coerce_amount(self.amount.and_then(|i| row.get(i))),
        }
    }
}

fn cell_text(cell: Option<&Data>) -> String {
    cell.map(ToString::to_string).unwrap_or_default()
}

/// Numeric cells convert directly, text is parsed, anything else is zero.
fn coerce_amount(cell: Option<&Data>) -> Decimal {
    match cell {
        Some(Data::Int(value)) => Decimal::from(*value),
        Some(Data::Float(value)) => Decimal::from_f64(*value).unwrap_or(Decimal::ZERO),
        Some(Data::String(text)) => {
            let text = text.trim();
            Decimal::from_str(text)
                .or_else(|_| Decimal::from_scientific(text))
                .unwrap_or(Decimal::ZERO)
        }
        _ => Decimal::ZERO,
    }
}
