//! Bounded connection pool
//!
//! Checkout is exclusive for the duration of a (possibly multi-statement)
//! sequence; callers over the ceiling wait instead of failing. Release is
//! unconditional via `Drop`, so no exit path can leak a checkout. Session
//! variables live with the pooled session and survive across checkouts,
//! which is why routine callers initialize output variables to a known
//! default before invoking.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use super::engine::{Engine, InsertOutcome};
use super::errors::{StoreError, StoreResult};
use super::statement::{Delete, Insert, Select};
use super::value::{Row, SqlValue};

/// Connection-scoped variables (the output-parameter channel).
type Session = HashMap<String, SqlValue>;

/// Pool configuration
#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    /// Ceiling on concurrent checkouts
    pub max_connections: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self { max_connections: 10 }
    }
}

/// Bounded pool of store connections. Cheap to clone; clones share the
/// same ceiling and idle set.
#[derive(Debug, Clone)]
pub struct ConnectionPool {
    engine: Arc<Engine>,
    permits: Arc<Semaphore>,
    idle: Arc<Mutex<Vec<Session>>>,
    checkouts: Arc<AtomicU64>,
}

impl ConnectionPool {
    pub fn new(engine: Arc<Engine>, config: PoolConfig) -> Self {
        let idle = (0..config.max_connections).map(|_| Session::new()).collect();
        Self {
            engine,
            permits: Arc::new(Semaphore::new(config.max_connections)),
            idle: Arc::new(Mutex::new(idle)),
            checkouts: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Check out one connection, waiting if the pool is exhausted.
    pub async fn acquire(&self) -> StoreResult<Connection> {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| StoreError::PoolClosed)?;
        self.checkouts.fetch_add(1, Ordering::Relaxed);
        let session = self
            .idle
            .lock()
            .expect("pool idle list poisoned")
            .pop()
            .unwrap_or_default();
        Ok(Connection {
            engine: Arc::clone(&self.engine),
            session: Some(session),
            idle: Arc::clone(&self.idle),
            _permit: permit,
        })
    }

    /// Run one self-contained read on a transient checkout.
    pub async fn select(&self, query: &Select) -> StoreResult<Vec<Row>> {
        let conn = self.acquire().await?;
        conn.select(query).await
    }

    /// Total checkouts since the pool was built (test observability).
    pub fn checkouts(&self) -> u64 {
        self.checkouts.load(Ordering::Relaxed)
    }
}

/// An exclusively checked-out connection. Statements issued through one
/// connection execute strictly in the order issued.
#[derive(Debug)]
pub struct Connection {
    engine: Arc<Engine>,
    session: Option<Session>,
    idle: Arc<Mutex<Vec<Session>>>,
    _permit: OwnedSemaphorePermit,
}

impl Connection {
    pub async fn select(&self, query: &Select) -> StoreResult<Vec<Row>> {
        self.engine.select(query).await
    }

    pub async fn insert(&self, stmt: &Insert, params: &[SqlValue]) -> StoreResult<InsertOutcome> {
        self.engine.insert(stmt, params).await
    }

    pub async fn delete(&self, stmt: &Delete, key: &SqlValue) -> StoreResult<u64> {
        self.engine.delete(stmt, key).await
    }

    pub async fn call_routine(&mut self, name: &str, params: &[SqlValue]) -> StoreResult<()> {
        let vars = self.session.as_mut().expect("session taken before drop");
        self.engine.call_routine(name, params, vars).await
    }

    pub async fn scalar(&self, name: &str, params: &[SqlValue]) -> StoreResult<SqlValue> {
        self.engine.scalar(name, params).await
    }

    /// Write a session variable.
    pub fn set_var(&mut self, name: &str, value: SqlValue) {
        self.session
            .as_mut()
            .expect("session taken before drop")
            .insert(name.to_string(), value);
    }

    /// Read a session variable back; unset variables read as Null.
    pub fn read_var(&self, name: &str) -> SqlValue {
        self.session
            .as_ref()
            .expect("session taken before drop")
            .get(name)
            .cloned()
            .unwrap_or(SqlValue::Null)
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            if let Ok(mut idle) = self.idle.lock() {
                idle.push(session);
            }
        }
        // _permit drops here, reopening the checkout slot
    }
}
