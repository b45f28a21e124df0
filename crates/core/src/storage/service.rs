//! Storage service implementation using Apache OpenDAL.

use opendal::{Operator, services};
use uuid::Uuid;

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// Key of the uploaded workbook for a session.
#[must_use]
pub fn upload_key(session_id: Uuid) -> String {
    format!("uploads/{session_id}.xlsx")
}

/// Key of the parsed workbook snapshot for a session.
#[must_use]
pub fn snapshot_key(session_id: Uuid) -> String {
    format!("uploads/{session_id}.json")
}

/// Storage service for session files.
#[derive(Debug, Clone)]
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        match provider {
            StorageProvider::LocalFs { root } => {
                let root = root.to_str().ok_or_else(|| {
                    StorageError::Backend(format!("root is not valid UTF-8: {}", root.display()))
                })?;

                Ok(Operator::new(services::Fs::default().root(root))
                    .map_err(|e| StorageError::Backend(e.to_string()))?
                    .finish())
            }
            StorageProvider::Memory => Ok(Operator::new(services::Memory::default())
                .map_err(|e| StorageError::Backend(e.to_string()))?
                .finish()),
        }
    }

    /// Write `bytes` under `key`, replacing any previous content.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn write(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        self.operator
            .write(key, bytes)
            .await
            .map_err(StorageError::io("write", key))?;
        Ok(())
    }

    /// Read the whole object stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if nothing is stored under `key`.
    pub async fn read(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        self.operator
            .read(key)
            .await
            .map(|buffer| buffer.to_vec())
            .map_err(StorageError::io("read", key))
    }

    /// Delete a file from storage. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.operator
            .delete(key)
            .await
            .map_err(StorageError::io("delete", key))
    }

    /// Check if a file exists in storage.
    pub async fn exists(&self, key: &str) -> bool {
        self.operator.stat(key).await.is_ok()
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }
}

/// Sanitize a file name for storage keys and download headers.
///
/// Only allows ASCII alphanumeric characters, dots, hyphens, and underscores;
/// everything else becomes an underscore.
#[must_use]
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
