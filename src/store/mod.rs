//! # Store capability
//!
//! Everything the dispatcher consumes from the relational store:
//! structured statements, scalar values, the in-memory engine, and the
//! bounded connection pool with its session-variable channel.

pub mod engine;
pub mod errors;
pub mod pool;
pub mod statement;
pub mod value;
pub mod zoo_schema;

pub use engine::{ColumnDef, Engine, InsertOutcome, TableDef};
pub use errors::{StoreError, StoreResult};
pub use pool::{Connection, ConnectionPool, PoolConfig};
pub use statement::{ConflictPolicy, Delete, Direction, Insert, Join, JoinKind, Projection, Select};
pub use value::{row_to_json, Row, SqlValue};
