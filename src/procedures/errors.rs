//! Procedure orchestrator error types

use thiserror::Error;

use crate::store::StoreError;

/// Result type for orchestrated procedures
pub type ProcedureResult<T> = Result<T, ProcedureError>;

/// Errors from routine invocations and their dependent statements.
#[derive(Debug, Clone, Error)]
pub enum ProcedureError {
    /// Routine ran but left no usable value in its output variable
    #[error("routine produced no usable {0} output")]
    MissingOutput(&'static str),

    /// Routine invocation or a dependent statement failed
    #[error(transparent)]
    Store(#[from] StoreError),
}
