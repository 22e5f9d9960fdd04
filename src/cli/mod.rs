//! CLI module
//!
//! Provides the command-line interface:
//! - start: wire the store, registries and dispatcher, serve HTTP

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{build_dispatcher, run};
pub use errors::{CliError, CliResult};
