//! Error types for xrefgraph-ir
//!
//! Every variant is fatal for an indexing run. Recoverable problems (an
//! expression without type information) are recorded as diagnostics in the
//! graph store instead.

use thiserror::Error;
use xrefgraph_storage::StorageError;

use crate::config::ConfigError;

/// Main error type for indexing operations
#[derive(Debug, Error)]
pub enum IndexError {
    /// A symbol name was empty or whitespace
    #[error("Invalid symbol name '{0}'")]
    InvalidName(String),

    /// An id passed to the sink was not minted by the store
    #[error("Invalid {what} id {id}")]
    InvalidId { what: &'static str, id: i64 },

    /// A location pointed at a file that could not be registered
    #[error("Unable to resolve file '{0}'")]
    UnresolvedFile(String),

    /// Output destination missing or unusable
    #[error("Invalid output: {0}")]
    InvalidOutput(String),

    /// Worker pool could not be built
    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    /// Provider snapshot could not be read
    #[error("Provider error: {0}")]
    Provider(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl IndexError {
    pub fn invalid_id(what: &'static str, id: i64) -> Self {
        IndexError::InvalidId { what, id }
    }

    pub fn provider(msg: impl Into<String>) -> Self {
        IndexError::Provider(msg.into())
    }
}

impl From<serde_json::Error> for IndexError {
    fn from(err: serde_json::Error) -> Self {
        IndexError::Provider(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for IndexError {
    fn from(err: std::io::Error) -> Self {
        IndexError::Provider(format!("IO error: {}", err))
    }
}

/// Result type alias for indexing operations
pub type Result<T> = std::result::Result<T, IndexError>;
