//! Error types for the script registry

use std::path::PathBuf;

use thiserror::Error;

/// Core error type for registry operations
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Persisted registry is not the expected structure
    #[error("Malformed registry: {0}")]
    Malformed(String),

    /// No entry for the requested script name
    #[error("Script not found: {0}")]
    NotFound(String),

    /// Registry file could not be read
    #[error("Failed to read registry {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Registry could not be written back to its persisted form
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

impl RegistryError {
    /// Whether the dispatcher can recover from this error.
    ///
    /// Only a failed lookup is recoverable; anything raised while loading
    /// leaves the process without a usable registry.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RegistryError::NotFound(_))
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        RegistryError::Malformed(err.to_string())
    }
}
