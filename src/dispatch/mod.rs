//! # Command Dispatcher
//!
//! The active layer between the HTTP surface and the store: resolves an
//! incoming resource or query name against the registries, applies value
//! coercion, holds one connection for the duration of a (possibly
//! multi-statement) operation, and shapes the outcome.
//!
//! Resolution always happens before any connection is checked out, so an
//! unknown name can never cost a pool slot.

pub mod errors;

use serde_json::{Map, Value};
use tracing::debug;

use crate::catalog::{PreInsert, PrimaryKeyRegistry, ResourceRegistry, StatementCatalog};
use crate::store::{Connection, ConnectionPool, Delete, Row, SqlValue};

pub use errors::{DispatchError, DispatchResult};

/// Scalar functions exposed through the read surface.
const SCALAR_FUNCTIONS: [&str; 2] = ["animal_age", "enclosure_remaining_capacity"];

/// Outcome of a generic delete. A zero-row delete is a normal outcome,
/// not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub deleted: bool,
}

/// Generic, schema-driven command dispatcher.
///
/// Registries are constructed once at startup and never mutated; the
/// dispatcher only ever reads them.
#[derive(Debug)]
pub struct Dispatcher {
    catalog: StatementCatalog,
    resources: ResourceRegistry,
    keys: PrimaryKeyRegistry,
    pool: ConnectionPool,
}

impl Dispatcher {
    pub fn new(
        catalog: StatementCatalog,
        resources: ResourceRegistry,
        keys: PrimaryKeyRegistry,
        pool: ConnectionPool,
    ) -> Self {
        Self {
            catalog,
            resources,
            keys,
            pool,
        }
    }

    /// Run a catalog query by name and return its rows verbatim.
    pub async fn run_query(&self, name: &str) -> DispatchResult<Vec<Row>> {
        let query = self
            .catalog
            .resolve(name)
            .ok_or_else(|| DispatchError::UnknownQuery(name.to_string()))?;
        Ok(self.pool.select(query).await?)
    }

    /// Insert one row for a registered resource and return its generated
    /// identity. One connection is held across hook, coercion and the
    /// insert itself; release happens on every path.
    pub async fn run_insert(&self, resource: &str, body: &Map<String, Value>) -> DispatchResult<i64> {
        let schema = self
            .resources
            .lookup(resource)
            .ok_or_else(|| DispatchError::UnknownResource(resource.to_string()))?;

        let mut conn = self.pool.acquire().await?;
        let mut input = body.clone();

        if let Some(hook) = schema.pre_insert {
            self.run_pre_insert(hook, &mut conn, &mut input).await?;
        }

        let params = schema
            .fields
            .iter()
            .map(|field| SqlValue::coerced(input.get(*field)))
            .collect::<Result<Vec<_>, _>>()?;

        let outcome = conn.insert(&schema.insert, &params).await?;
        debug!(resource, id = outcome.last_insert_id, "insert dispatched");
        Ok(outcome.last_insert_id)
    }

    /// Delete a single row by identity. Reports whether a row actually
    /// went away.
    pub async fn run_delete(&self, resource: &str, raw_id: &str) -> DispatchResult<DeleteOutcome> {
        let key_column = self
            .keys
            .key_column(resource)
            .ok_or_else(|| DispatchError::UnknownResource(resource.to_string()))?;

        let stmt = Delete::single_row(resource, key_column);
        let key = SqlValue::identity(raw_id);
        let conn = self.pool.acquire().await?;
        let affected = conn.delete(&stmt, &key).await?;
        debug!(resource, raw_id, affected, "delete dispatched");
        Ok(DeleteOutcome {
            deleted: affected > 0,
        })
    }

    /// Evaluate a named scalar function over one identity argument.
    pub async fn run_scalar(&self, function: &str, argument: i64) -> DispatchResult<SqlValue> {
        if !SCALAR_FUNCTIONS.contains(&function) {
            return Err(DispatchError::UnknownQuery(function.to_string()));
        }
        let conn = self.pool.acquire().await?;
        Ok(conn.scalar(function, &[SqlValue::Int(argument)]).await?)
    }

    /// The pool, shared with the procedure orchestrator.
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Run a resource's pre-insert hook against the live connection.
    /// A hook failure aborts the operation before the main insert.
    async fn run_pre_insert(
        &self,
        hook: PreInsert,
        conn: &mut Connection,
        input: &mut Map<String, Value>,
    ) -> DispatchResult<()> {
        match hook {
            PreInsert::EnsureVisitor => {
                let missing = match input.get("visitor_id") {
                    None | Some(Value::Null) => true,
                    Some(Value::String(s)) => s.is_empty(),
                    Some(_) => false,
                };
                if !missing {
                    return Ok(());
                }

                let visitor = self
                    .resources
                    .lookup("visitor")
                    .ok_or_else(|| DispatchError::UnknownResource("visitor".to_string()))?;
                let outcome = conn
                    .insert(
                        &visitor.insert,
                        &[
                            SqlValue::Text("Child Visitor".to_string()),
                            SqlValue::Int(12),
                            SqlValue::Null,
                        ],
                    )
                    .await?;
                debug!(visitor_id = outcome.last_insert_id, "placeholder visitor created");
                input.insert(
                    "visitor_id".to_string(),
                    Value::Number(outcome.last_insert_id.into()),
                );
                Ok(())
            }
        }
    }
}
