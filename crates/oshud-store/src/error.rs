//! # Store Error Types
//!
//! Error types for data file operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error / CoreError                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds path and entity context               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in CLI) ← Serialized for --json output                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use oshud_core::CoreError;
use thiserror::Error;

/// Data store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found in the document.
    ///
    /// ## When This Occurs
    /// - Unknown salary record id
    /// - Adjustment for an employee not on the current roster
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Reading or writing the data file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The data file is not a valid document.
    #[error("Invalid data file {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Encoding the document failed.
    #[error("Failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),

    /// Business rule violation from oshud-core, e.g. paying out an empty
    /// roster.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
