//! Error types for the store layer.

use lodestone_types::{AttrValueError, RecordId};
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors a content store may surface to the engine.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// An attribute value that cannot be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored attribute value outside the scalar-or-flat-list shape.
    #[error("invalid attribute value: {0}")]
    InvalidAttr(#[from] AttrValueError),

    /// A stored id that does not parse as a UUID.
    #[error("invalid record id: {0}")]
    InvalidId(#[from] uuid::Error),

    /// The record does not exist.
    #[error("record not found: {0}")]
    NotFound(RecordId),

    /// The store refused the write.
    #[error("write rejected: {0}")]
    Rejected(String),
}
