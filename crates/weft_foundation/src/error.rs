//! Error types for the Weft lowering infrastructure.
//!
//! Uses `thiserror` for ergonomic error definition. These errors are for
//! conditions under which the lowering contract cannot be satisfied at
//! all (an unavailable type oracle, an internal invariant breach). User
//! problems in the source being lowered never surface here; they go to
//! the diagnostic sink and the pass continues.

use thiserror::Error;

/// Result type for lowering infrastructure operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Weft operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates an oracle-unavailable error.
    #[must_use]
    pub fn oracle_unavailable(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::OracleUnavailable(detail.into()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(detail.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The type-check oracle could not be queried at all.
    #[error("type oracle unavailable: {0}")]
    OracleUnavailable(String),

    /// A cyclic import was detected during the collection scan.
    #[error("cyclic import detected: {0}")]
    CyclicImport(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}
