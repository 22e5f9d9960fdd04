//! In-memory relational engine
//!
//! Implements the store capability the dispatcher consumes: parameterized
//! statements over declared tables, stored routines that report results
//! through session variables, and named scalar functions. Tables are
//! declared once at construction; constraints are NOT NULL columns and an
//! optional unique column pair per table.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Utc};
use tokio::sync::Mutex;

use super::errors::{StoreError, StoreResult};
use super::statement::{ConflictPolicy, Delete, Direction, Insert, JoinKind, Projection, Select};
use super::value::{Row, SqlValue};

/// Declared column: name plus whether Null is rejected on insert.
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub name: String,
    pub required: bool,
    /// Filled by the engine with the insert timestamp when not supplied
    pub auto_timestamp: bool,
}

impl ColumnDef {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            required: false,
            auto_timestamp: false,
        }
    }

    pub fn required(name: &str) -> Self {
        Self {
            name: name.to_string(),
            required: true,
            auto_timestamp: false,
        }
    }

    pub fn timestamp(name: &str) -> Self {
        Self {
            name: name.to_string(),
            required: false,
            auto_timestamp: true,
        }
    }
}

/// Declared table: one auto-increment identity column, non-key columns,
/// and at most one unique column pair.
#[derive(Debug, Clone)]
pub struct TableDef {
    pub name: String,
    pub key_column: String,
    pub columns: Vec<ColumnDef>,
    pub unique_pair: Option<(String, String)>,
}

impl TableDef {
    pub fn new(name: &str, key_column: &str, columns: Vec<ColumnDef>) -> Self {
        Self {
            name: name.to_string(),
            key_column: key_column.to_string(),
            columns,
            unique_pair: None,
        }
    }

    pub fn unique_pair(mut self, first: &str, second: &str) -> Self {
        self.unique_pair = Some((first.to_string(), second.to_string()));
        self
    }

    fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }
}

#[derive(Debug)]
struct Table {
    def: TableDef,
    next_id: i64,
    rows: Vec<Row>,
}

/// Outcome of an insert statement.
#[derive(Debug, Clone, Copy)]
pub struct InsertOutcome {
    /// Identity of the affected row; for a keep-existing conflict this is
    /// the identity of the row that was kept
    pub last_insert_id: i64,
    /// 1 for a new row, 0 for a conflict no-op
    pub affected: u64,
}

/// The engine proper. All table access is serialized behind one lock;
/// callers suspend at every round trip.
#[derive(Debug)]
pub struct Engine {
    tables: Mutex<HashMap<String, Table>>,
}

impl Engine {
    /// Build an engine with the given table declarations, all empty.
    pub fn new(defs: Vec<TableDef>) -> Self {
        let tables = defs
            .into_iter()
            .map(|def| {
                (
                    def.name.clone(),
                    Table {
                        def,
                        next_id: 1,
                        rows: Vec::new(),
                    },
                )
            })
            .collect();
        Self {
            tables: Mutex::new(tables),
        }
    }

    // ==================
    // Select
    // ==================

    pub async fn select(&self, query: &Select) -> StoreResult<Vec<Row>> {
        let tables = self.tables.lock().await;
        let base = tables
            .get(&query.table)
            .ok_or_else(|| StoreError::NoSuchTable(query.table.clone()))?;

        // Working rows carry qualified keys ("table.column") so joined
        // tables never collide.
        let mut working: Vec<Row> = base
            .rows
            .iter()
            .map(|row| qualify(&query.table, row))
            .collect();

        for join in &query.joins {
            let right = tables
                .get(&join.table)
                .ok_or_else(|| StoreError::NoSuchTable(join.table.clone()))?;
            if right.def.column(&join.right).is_none() && right.def.key_column != join.right {
                return Err(StoreError::NoSuchColumn(
                    join.table.clone(),
                    join.right.clone(),
                ));
            }
            let left_key = qualified(&query.table, &join.left);

            let mut joined = Vec::new();
            for row in working {
                let left_value = row.get(&left_key).filter(|v| !v.is_null());
                let matches: Vec<&Row> = match left_value {
                    Some(value) => right
                        .rows
                        .iter()
                        .filter(|r| r.get(&join.right) == Some(value))
                        .collect(),
                    None => Vec::new(),
                };
                if matches.is_empty() {
                    if join.kind == JoinKind::Left {
                        joined.push(row);
                    }
                } else {
                    for m in matches {
                        let mut merged = row.clone();
                        merged.extend(qualify(&join.table, m));
                        joined.push(merged);
                    }
                }
            }
            working = joined;
        }

        for (column, direction) in query.order.iter().rev() {
            let key = qualified(&query.table, column);
            working.sort_by(|a, b| {
                let left = a.get(&key).unwrap_or(&SqlValue::Null);
                let right = b.get(&key).unwrap_or(&SqlValue::Null);
                match direction {
                    Direction::Asc => left.compare(right),
                    Direction::Desc => right.compare(left),
                }
            });
        }

        if let Some(limit) = query.limit {
            working.truncate(limit);
        }

        Ok(match &query.projection {
            Projection::All => working
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|(key, value)| {
                            let plain = key.split_once('.').map_or(key.clone(), |(_, c)| c.to_string());
                            (plain, value)
                        })
                        .collect()
                })
                .collect(),
            Projection::Columns(columns) => working
                .into_iter()
                .map(|row| {
                    columns
                        .iter()
                        .map(|col| {
                            let key = qualified(&query.table, &col.source);
                            let value = row.get(&key).cloned().unwrap_or(SqlValue::Null);
                            (col.alias.clone(), value)
                        })
                        .collect()
                })
                .collect(),
        })
    }

    // ==================
    // Insert
    // ==================

    pub async fn insert(&self, stmt: &Insert, params: &[SqlValue]) -> StoreResult<InsertOutcome> {
        if params.len() != stmt.columns.len() {
            return Err(StoreError::ParameterMismatch {
                expected: stmt.columns.len(),
                got: params.len(),
            });
        }

        let mut tables = self.tables.lock().await;
        let table = tables
            .get_mut(&stmt.table)
            .ok_or_else(|| StoreError::NoSuchTable(stmt.table.clone()))?;

        for column in &stmt.columns {
            if table.def.column(column).is_none() {
                return Err(StoreError::NoSuchColumn(stmt.table.clone(), column.clone()));
            }
        }

        let mut row = Row::new();
        for def in &table.def.columns {
            let value = if def.auto_timestamp {
                SqlValue::Text(Utc::now().to_rfc3339())
            } else {
                SqlValue::Null
            };
            row.insert(def.name.clone(), value);
        }
        for (column, value) in stmt.columns.iter().zip(params) {
            if !value.is_null() {
                row.insert(column.clone(), value.clone());
            }
        }

        for def in &table.def.columns {
            if def.required && row.get(&def.name).map_or(true, SqlValue::is_null) {
                return Err(StoreError::ConstraintViolation(format!(
                    "column {}.{} cannot be null",
                    stmt.table, def.name
                )));
            }
        }

        if let Some((first, second)) = table.def.unique_pair.clone() {
            let pair = (row.get(&first).cloned(), row.get(&second).cloned());
            if let Some(existing) = table
                .rows
                .iter()
                .find(|r| (r.get(&first).cloned(), r.get(&second).cloned()) == pair)
            {
                return match stmt.on_conflict {
                    ConflictPolicy::KeepExisting => Ok(InsertOutcome {
                        last_insert_id: existing
                            .get(&table.def.key_column)
                            .and_then(SqlValue::as_int)
                            .unwrap_or(0),
                        affected: 0,
                    }),
                    ConflictPolicy::Reject => Err(StoreError::ConstraintViolation(format!(
                        "duplicate ({first}, {second}) in {}",
                        stmt.table
                    ))),
                };
            }
        }

        let id = table.next_id;
        table.next_id += 1;
        row.insert(table.def.key_column.clone(), SqlValue::Int(id));
        table.rows.push(row);

        Ok(InsertOutcome {
            last_insert_id: id,
            affected: 1,
        })
    }

    // ==================
    // Delete
    // ==================

    pub async fn delete(&self, stmt: &Delete, key: &SqlValue) -> StoreResult<u64> {
        let mut tables = self.tables.lock().await;
        let table = tables
            .get_mut(&stmt.table)
            .ok_or_else(|| StoreError::NoSuchTable(stmt.table.clone()))?;
        if table.def.key_column != stmt.key_column && table.def.column(&stmt.key_column).is_none() {
            return Err(StoreError::NoSuchColumn(
                stmt.table.clone(),
                stmt.key_column.clone(),
            ));
        }

        let before = table.rows.len();
        table.rows.retain(|row| row.get(&stmt.key_column) != Some(key));
        Ok((before - table.rows.len()) as u64)
    }

    // ==================
    // Stored routines
    // ==================

    /// Invoke a stored routine. Routines never return row sets; results
    /// go into the caller's session variables.
    pub async fn call_routine(
        &self,
        name: &str,
        params: &[SqlValue],
        vars: &mut HashMap<String, SqlValue>,
    ) -> StoreResult<()> {
        match name {
            "schedule_event" => self.schedule_event_routine(params, vars).await,
            "assign_employee" => self.assign_employee_routine(params, vars).await,
            _ => Err(StoreError::NoSuchRoutine(name.to_string())),
        }
    }

    /// schedule_event(title, e_date, e_id, capacity) -> @out_ev_id
    async fn schedule_event_routine(
        &self,
        params: &[SqlValue],
        vars: &mut HashMap<String, SqlValue>,
    ) -> StoreResult<()> {
        let [title, e_date, e_id, capacity] = positional::<4>(params)?;
        let insert = Insert::into_table("event", &["title", "e_date", "e_id", "location", "capacity"]);
        let outcome = self
            .insert(
                &insert,
                &[title, e_date, e_id, SqlValue::Null, capacity],
            )
            .await?;
        vars.insert("out_ev_id".to_string(), SqlValue::Int(outcome.last_insert_id));
        Ok(())
    }

    /// assign_employee(emp_id, e_id, role_desc) -> @p_success
    ///
    /// Writes 1 when both referenced rows exist and the assignment row was
    /// created, 0 otherwise. A miss is not an error.
    async fn assign_employee_routine(
        &self,
        params: &[SqlValue],
        vars: &mut HashMap<String, SqlValue>,
    ) -> StoreResult<()> {
        let [emp_id, e_id, role_desc] = positional::<3>(params)?;
        let employee_exists = self.exists("employee", "emp_id", &emp_id).await?;
        let enclosure_exists = self.exists("enclosure", "e_id", &e_id).await?;

        if !(employee_exists && enclosure_exists) {
            vars.insert("p_success".to_string(), SqlValue::Int(0));
            return Ok(());
        }

        let today = Utc::now().date_naive().to_string();
        let insert = Insert::into_table(
            "employee_enclosure",
            &["emp_id", "e_id", "assigned_from", "assigned_to", "role_desc"],
        );
        self.insert(
            &insert,
            &[emp_id, e_id, SqlValue::Text(today), SqlValue::Null, role_desc],
        )
        .await?;
        vars.insert("p_success".to_string(), SqlValue::Int(1));
        Ok(())
    }

    async fn exists(&self, table: &str, key_column: &str, key: &SqlValue) -> StoreResult<bool> {
        let tables = self.tables.lock().await;
        let table = tables
            .get(table)
            .ok_or_else(|| StoreError::NoSuchTable(table.to_string()))?;
        Ok(table.rows.iter().any(|row| row.get(key_column) == Some(key)))
    }

    // ==================
    // Scalar functions
    // ==================

    /// Evaluate a named scalar function. Unknown inputs yield Null, the
    /// way the original SQL functions did.
    pub async fn scalar(&self, name: &str, params: &[SqlValue]) -> StoreResult<SqlValue> {
        match name {
            "animal_age" => {
                let [a_id] = positional::<1>(params)?;
                self.animal_age(&a_id).await
            }
            "enclosure_remaining_capacity" => {
                let [e_id] = positional::<1>(params)?;
                self.enclosure_remaining_capacity(&e_id).await
            }
            _ => Err(StoreError::NoSuchFunction(name.to_string())),
        }
    }

    /// Whole years between the animal's birth date and today.
    async fn animal_age(&self, a_id: &SqlValue) -> StoreResult<SqlValue> {
        let tables = self.tables.lock().await;
        let animals = tables
            .get("animal")
            .ok_or_else(|| StoreError::NoSuchTable("animal".to_string()))?;
        let birth_date = animals
            .rows
            .iter()
            .find(|row| row.get("a_id") == Some(a_id))
            .and_then(|row| row.get("birth_date"))
            .and_then(|v| v.as_text())
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());

        Ok(match birth_date {
            Some(birth) => {
                let today = Utc::now().date_naive();
                let mut age = today.year() - birth.year();
                if (today.month(), today.day()) < (birth.month(), birth.day()) {
                    age -= 1;
                }
                SqlValue::Int(i64::from(age))
            }
            None => SqlValue::Null,
        })
    }

    /// Capacity minus open animal assignments (assigned_to still Null).
    async fn enclosure_remaining_capacity(&self, e_id: &SqlValue) -> StoreResult<SqlValue> {
        let tables = self.tables.lock().await;
        let enclosures = tables
            .get("enclosure")
            .ok_or_else(|| StoreError::NoSuchTable("enclosure".to_string()))?;
        let capacity = enclosures
            .rows
            .iter()
            .find(|row| row.get("e_id") == Some(e_id))
            .and_then(|row| row.get("capacity"))
            .and_then(SqlValue::as_int);

        let Some(capacity) = capacity else {
            return Ok(SqlValue::Null);
        };

        let assignments = tables
            .get("animal_enclosure")
            .ok_or_else(|| StoreError::NoSuchTable("animal_enclosure".to_string()))?;
        let occupied = assignments
            .rows
            .iter()
            .filter(|row| {
                row.get("e_id") == Some(e_id)
                    && row.get("assigned_to").map_or(true, SqlValue::is_null)
            })
            .count() as i64;

        Ok(SqlValue::Int(capacity - occupied))
    }
}

/// Qualify all keys of a row with its table name.
fn qualify(table: &str, row: &Row) -> Row {
    row.iter()
        .map(|(column, value)| (format!("{table}.{column}"), value.clone()))
        .collect()
}

/// Qualify a column reference against the base table unless it already
/// carries a table prefix.
fn qualified(base_table: &str, column: &str) -> String {
    if column.contains('.') {
        column.to_string()
    } else {
        format!("{base_table}.{column}")
    }
}

fn positional<const N: usize>(params: &[SqlValue]) -> StoreResult<[SqlValue; N]> {
    params.to_vec().try_into().map_err(|_| StoreError::ParameterMismatch {
        expected: N,
        got: params.len(),
    })
}
