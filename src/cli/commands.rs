//! CLI command implementations
//!
//! `start` wires the whole system: engine with the zoo table
//! declarations, bounded connection pool, the three registries, the
//! dispatcher, and finally the HTTP server.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::catalog::{PrimaryKeyRegistry, ResourceRegistry, StatementCatalog};
use crate::dispatch::Dispatcher;
use crate::http_server::{ApiState, HttpServer, HttpServerConfig};
use crate::store::{zoo_schema, ConnectionPool, Engine, PoolConfig};

use super::args::{Cli, Command};
use super::errors::CliResult;

/// Parse arguments and dispatch to the selected command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    match cli.command {
        Command::Start {
            host,
            port,
            pool_size,
            cors_origin,
        } => start(host, port, pool_size, cors_origin),
    }
}

/// Boot sequence: logging, store, registries, dispatcher, server.
fn start(host: String, port: u16, pool_size: usize, cors_origins: Vec<String>) -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("zooapi=info,tower_http=info")),
        )
        .init();

    let state = Arc::new(ApiState::new(build_dispatcher(pool_size)));
    let config = HttpServerConfig {
        host,
        port,
        cors_origins,
    };

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(HttpServer::with_config(state, config).start())?;
    Ok(())
}

/// Construct the registries and dispatcher over a fresh engine.
pub fn build_dispatcher(pool_size: usize) -> Dispatcher {
    let engine = Arc::new(Engine::new(zoo_schema::table_defs()));
    let pool = ConnectionPool::new(
        engine,
        PoolConfig {
            max_connections: pool_size,
        },
    );
    Dispatcher::new(
        StatementCatalog::new(),
        ResourceRegistry::new(),
        PrimaryKeyRegistry::new(),
        pool,
    )
}
