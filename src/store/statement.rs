//! Structured statement forms
//!
//! The store consumes statements as data rather than SQL text: a select
//! with optional joins and ordering, a positional insert with an explicit
//! conflict policy, and a single-row delete keyed on one column.

/// How an insert behaves when it hits the table's unique constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Duplicate key is an error
    Reject,
    /// Duplicate key leaves the existing row untouched (conflict-as-no-op)
    KeepExisting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
}

/// One equi-join step. `left` names a column in the rows joined so far
/// (qualified as `table.column`, or unqualified for the base table);
/// `right` names a plain column of the joined table.
#[derive(Debug, Clone)]
pub struct Join {
    pub kind: JoinKind,
    pub table: String,
    pub left: String,
    pub right: String,
}

/// Sort direction for one ORDER BY key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// Projected output column: a (possibly qualified) source and the alias
/// it is returned under.
#[derive(Debug, Clone)]
pub struct Column {
    pub source: String,
    pub alias: String,
}

/// Output shape of a select.
#[derive(Debug, Clone)]
pub enum Projection {
    /// Every column of the base table (single-table selects only)
    All,
    /// Explicit aliased columns
    Columns(Vec<Column>),
}

/// A self-contained read statement.
#[derive(Debug, Clone)]
pub struct Select {
    pub table: String,
    pub joins: Vec<Join>,
    pub projection: Projection,
    pub order: Vec<(String, Direction)>,
    pub limit: Option<usize>,
}

impl Select {
    pub fn from(table: &str) -> Self {
        Self {
            table: table.to_string(),
            joins: Vec::new(),
            projection: Projection::All,
            order: Vec::new(),
            limit: None,
        }
    }

    pub fn join(mut self, kind: JoinKind, table: &str, left: &str, right: &str) -> Self {
        self.joins.push(Join {
            kind,
            table: table.to_string(),
            left: left.to_string(),
            right: right.to_string(),
        });
        self
    }

    pub fn columns(mut self, columns: &[(&str, &str)]) -> Self {
        self.projection = Projection::Columns(
            columns
                .iter()
                .map(|(source, alias)| Column {
                    source: (*source).to_string(),
                    alias: (*alias).to_string(),
                })
                .collect(),
        );
        self
    }

    pub fn order_asc(mut self, column: &str) -> Self {
        self.order.push((column.to_string(), Direction::Asc));
        self
    }

    pub fn order_desc(mut self, column: &str) -> Self {
        self.order.push((column.to_string(), Direction::Desc));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// A positional insert template. Parameters bind to `columns` in order.
#[derive(Debug, Clone)]
pub struct Insert {
    pub table: String,
    pub columns: Vec<String>,
    pub on_conflict: ConflictPolicy,
}

impl Insert {
    pub fn into_table(table: &str, columns: &[&str]) -> Self {
        Self {
            table: table.to_string(),
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            on_conflict: ConflictPolicy::Reject,
        }
    }

    pub fn or_keep_existing(mut self) -> Self {
        self.on_conflict = ConflictPolicy::KeepExisting;
        self
    }
}

/// Single-row delete predicated on one identity column.
#[derive(Debug, Clone)]
pub struct Delete {
    pub table: String,
    pub key_column: String,
}

impl Delete {
    pub fn single_row(table: &str, key_column: &str) -> Self {
        Self {
            table: table.to_string(),
            key_column: key_column.to_string(),
        }
    }
}
