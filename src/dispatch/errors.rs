//! Dispatcher error types

use thiserror::Error;

use crate::store::StoreError;

/// Result type for dispatch operations
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Errors from the generic command dispatcher.
///
/// The two Unknown variants are client-input errors, detected before any
/// connection is touched. Everything else is a store-level failure with
/// the underlying message preserved.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// Resource name absent from the schema or primary-key registry
    #[error("unknown resource: {0}")]
    UnknownResource(String),

    /// Query or function name absent from the catalog
    #[error("unknown query: {0}")]
    UnknownQuery(String),

    /// Store rejected or failed the operation
    #[error(transparent)]
    Store(#[from] StoreError),
}
