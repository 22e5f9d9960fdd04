//! # HTTP Server Module
//!
//! The exposed surface of the data-access API: one axum server nesting
//! the `/api` routes, with CORS and request tracing. Routing shape only;
//! all behavior lives in the dispatcher and the procedure orchestrator.
//!
//! # Endpoints
//!
//! - `GET  /api/query?v=<name>` - named catalog reads
//! - `POST /api/insert/:resource` - generic insert
//! - `DELETE /api/delete/:resource/:id` - generic delete
//! - `POST /api/schedule_event`, `POST /api/assign_employee` - procedures
//! - `POST /api/feed_log` - feeding events
//! - `GET  /api/notifications`, `GET /api/health`

pub mod api_routes;
pub mod config;
pub mod errors;
pub mod server;

pub use api_routes::{api_routes, ApiState};
pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
