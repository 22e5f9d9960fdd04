//! CLI argument definitions using clap
//!
//! Commands:
//! - zooapi start [--host H] [--port P] [--pool-size N] [--cors-origin O]...

use clap::{Parser, Subcommand};

/// zooapi - schema-driven data-access API for zoo operations records
#[derive(Parser, Debug)]
#[command(name = "zooapi")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the API server
    Start {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to bind to
        #[arg(long, default_value_t = 3000)]
        port: u16,

        /// Ceiling on concurrent store connections
        #[arg(long, default_value_t = 10)]
        pool_size: usize,

        /// Allowed CORS origin (repeatable; none means permissive)
        #[arg(long)]
        cors_origin: Vec<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
