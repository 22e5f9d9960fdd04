//! CLI-specific error types

use std::io;

use thiserror::Error;

/// Result type for CLI commands
pub type CliResult<T> = Result<T, CliError>;

/// Fatal startup errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Runtime construction or server I/O failed
    #[error("server error: {0}")]
    Io(#[from] io::Error),
}
