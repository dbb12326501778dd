//! Error types for the engine.

use lodestone_store::StoreError;
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised while locating or writing records.
///
/// These never escape [`Reconciler::reconcile`](crate::Reconciler::reconcile):
/// the driver logs them, counts the record as failed and moves on, and the
/// next pass retries naturally.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The store failed or refused an operation.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A pass was started while another was still running.
    #[error("reconciliation already in progress")]
    AlreadyRunning,
}

/// Why a definition set was rejected at registration.
///
/// Registration fails closed: one bad definition rejects the whole set and
/// the registry keeps its previous state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("record type must not be empty")]
    EmptyRecordType,

    #[error("definition {index} has an empty slug")]
    EmptySlug { index: usize },

    #[error("definition '{slug}' has an empty title")]
    EmptyTitle { slug: String },

    #[error("slug '{slug}' is declared more than once")]
    DuplicateSlug { slug: String },

    #[error("attribute key '{key}' on '{slug}' uses the reserved prefix")]
    ReservedAttrKey { slug: String, key: String },
}
