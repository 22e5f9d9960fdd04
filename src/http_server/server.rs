//! # HTTP Server
//!
//! Combines the API routes into one axum server with CORS and request
//! tracing applied.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::api_routes::{api_routes, ApiState};
use super::config::HttpServerConfig;

/// HTTP server for the zoo operations API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration
    pub fn new(state: Arc<ApiState>) -> Self {
        Self::with_config(state, HttpServerConfig::default())
    }

    /// Create a new HTTP server with custom configuration
    pub fn with_config(state: Arc<ApiState>, config: HttpServerConfig) -> Self {
        let router = Self::build_router(state, &config);
        Self { config, router }
    }

    /// Build the router with all endpoints and middleware
    fn build_router(state: Arc<ApiState>, config: &HttpServerConfig) -> Router {
        let cors = if config.cors_origins.is_empty() {
            // No origins configured: permissive, for development
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .nest("/api", api_routes(state))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        info!(%addr, "zoo API listening");
        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
