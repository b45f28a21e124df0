//! Shared errors, configuration, and money formatting for Finansi.
//!
//! This crate provides common types used across all other crates:
//! - Rupiah formatting for statement and API output
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::AppError;
