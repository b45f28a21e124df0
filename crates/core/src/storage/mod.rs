//! Ephemeral file storage for uploads and their parsed snapshots, using Apache OpenDAL.
//!
//! Each report session owns two objects:
//! - `uploads/{session}.xlsx`: the workbook as uploaded
//! - `uploads/{session}.json`: the parsed workbook snapshot
//!
//! Both are deleted once the statement has been downloaded.

mod config;
mod error;
mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::{StorageService, sanitize_filename, snapshot_key, upload_key};
