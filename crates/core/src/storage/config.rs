//! Storage configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageProvider {
    /// Local filesystem.
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
    /// Process memory; contents vanish with the process.
    Memory,
}

impl StorageProvider {
    /// Create local filesystem provider.
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Get the provider name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::LocalFs { .. } => "local",
            Self::Memory => "memory",
        }
    }
}

/// Storage service configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
}

impl StorageConfig {
    /// Create a new storage config.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self { provider }
    }

    /// In-memory storage, for tests.
    #[must_use]
    pub fn memory() -> Self {
        Self::new(StorageProvider::Memory)
    }
}
