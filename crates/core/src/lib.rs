//! Core business logic for Finansi.
//!
//! This crate contains pure business logic with ZERO web dependencies.
//! Everything between an uploaded workbook and a rendered statement lives here.
//!
//! # Modules
//!
//! - `classification` - Keyword rules mapping transaction labels to categories
//! - `summary` - Monthly aggregation and derived totals
//! - `workbook` - Reading the transaction template from `.xlsx` bytes
//! - `statement` - Statement layout and PDF rendering
//! - `storage` - Ephemeral file storage for uploads and snapshots

pub mod classification;
pub mod statement;
pub mod storage;
pub mod summary;
pub mod workbook;
