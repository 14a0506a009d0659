//! Typed error enum for the service layer.

use grove_storage::StorageError;
use thiserror::Error;

/// Service-layer error. Taxon source failures never appear here: sub-query
/// failures are absorbed and a failed search falls back to the store.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (DB, not found, duplicate, etc.).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Caller provided invalid input (blank name, malformed data).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An id-shaped species reference that matches no canonical row.
    #[error("invalid reference: {0}")]
    InvalidReference(String),
}

impl ServiceError {
    /// Whether this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_not_found())
    }

    /// Whether this error represents a duplicate/conflict.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_duplicate())
    }
}
