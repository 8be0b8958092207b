//! Persistence Errors

use std::path::PathBuf;

/// Errors that can occur while reading or writing the durable slot
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// Filesystem error on the slot
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Injected or backend-specific write refusal
    #[error("Slot unavailable: {0}")]
    Unavailable(String),
}

impl PersistenceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
