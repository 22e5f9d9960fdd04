//! Store error types

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by the store capability.
///
/// `ConstraintViolation` is the store rejecting values on constraint
/// grounds; the dispatcher passes the message through verbatim.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Statement references a table the engine does not know
    #[error("no such table: {0}")]
    NoSuchTable(String),

    /// Statement references a column the table does not declare
    #[error("no such column: {0}.{1}")]
    NoSuchColumn(String, String),

    /// Positional parameter count does not match the statement
    #[error("statement expects {expected} parameters, got {got}")]
    ParameterMismatch { expected: usize, got: usize },

    /// Row rejected by a column or uniqueness constraint
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// Routine name not registered with the engine
    #[error("no such routine: {0}")]
    NoSuchRoutine(String),

    /// Scalar function name not registered with the engine
    #[error("no such function: {0}")]
    NoSuchFunction(String),

    /// Value cannot be bound as a statement parameter
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    /// Connection pool has shut down
    #[error("connection pool closed")]
    PoolClosed,
}
