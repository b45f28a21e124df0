//! Storage error types.

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Nothing is stored under the key.
    #[error("no object stored under '{0}'")]
    NotFound(String),

    /// The backend could not be set up.
    #[error("storage backend could not be initialised: {0}")]
    Backend(String),

    /// A backend call failed.
    #[error("storage {op} failed for '{key}': {source}")]
    Io {
        /// Operation name ("read", "write", "delete").
        op: &'static str,
        /// Key the operation targeted.
        key: String,
        /// Underlying OpenDAL error.
        #[source]
        source: opendal::Error,
    },
}

impl StorageError {
    /// Wraps an OpenDAL error for `op` on `key`, keeping not-found distinct.
    pub(crate) fn io(op: &'static str, key: &str) -> impl FnOnce(opendal::Error) -> Self {
        let key = key.to_string();
        move |source| {
            if source.kind() == opendal::ErrorKind::NotFound {
                Self::NotFound(key)
            } else {
                Self::Io { op, key, source }
            }
        }
    }
}
