//! Transaction workbook reading.
//!
//! The upload is the Finansi input template: a few label lines in column A
//! ("Nama Usaha : ...", "Bulan : ...") followed by a transaction table whose header row
//! names the "Jenis Transaksi", "Keterangan" and "Jumlah (Rp)" columns.

mod error;
mod parser;

pub use error::WorkbookError;
pub use parser::{
    AMOUNT_COLUMN, DESCRIPTION_COLUMN, KIND_COLUMN, ParsedWorkbook, WorkbookParser,
};
