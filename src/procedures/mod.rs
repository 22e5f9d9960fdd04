//! # Procedure Orchestrator
//!
//! Operations that invoke a server-side routine and then run dependent
//! statements on the same reserved connection. Routine results come back
//! through a connection-scoped variable, not a return row set; the
//! two-step invoke-then-read protocol is wrapped behind
//! [`call_with_output`] so callers see one typed call.
//!
//! There is no compensating rollback: if a dependent statement fails
//! after the routine committed, the partial outcome stands and is logged.

pub mod errors;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::store::{Connection, ConnectionPool, Insert, SqlValue};

pub use errors::{ProcedureError, ProcedureResult};

/// Invoke a routine and read its output parameter back in one call.
///
/// The output variable is first forced to `default` so a value left over
/// from a prior use of the same pooled connection can never leak through.
pub async fn call_with_output(
    conn: &mut Connection,
    routine: &str,
    params: &[SqlValue],
    out_var: &str,
    default: SqlValue,
) -> ProcedureResult<SqlValue> {
    conn.set_var(out_var, default);
    conn.call_routine(routine, params).await?;
    Ok(conn.read_var(out_var))
}

// ==================
// Schedule event
// ==================

/// Request body for the schedule-event operation.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleEventRequest {
    pub title: Option<String>,
    pub e_date: Option<String>,
    pub e_id: Option<i64>,
    pub capacity: Option<i64>,
    #[serde(default)]
    pub infra_ids: Vec<i64>,
}

/// Outcome of a schedule-event invocation.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleEventOutcome {
    pub event_id: i64,
    pub assigned_infra: Vec<i64>,
}

/// Schedule an event through the `schedule_event` routine, then assign
/// each supplied infrastructure item at quantity 1 (re-assignment of an
/// existing pair is a no-op, never an overwrite) and log one
/// notification summarizing the batch.
pub async fn schedule_event(
    pool: &ConnectionPool,
    request: ScheduleEventRequest,
) -> ProcedureResult<ScheduleEventOutcome> {
    let mut conn = pool.acquire().await?;

    let params = [
        text_or_null(request.title),
        text_or_null(request.e_date),
        int_or_null(request.e_id),
        int_or_null(request.capacity),
    ];
    let out = call_with_output(&mut conn, "schedule_event", &params, "out_ev_id", SqlValue::Null)
        .await?;
    let event_id = out
        .as_int()
        .ok_or(ProcedureError::MissingOutput("out_ev_id"))?;

    if let Err(err) = assign_infra(&mut conn, event_id, &request.infra_ids).await {
        // The event row is already committed; later steps are aborted
        // and the partial outcome is surfaced to the caller.
        warn!(event_id, error = %err, "event scheduled but infra assignment incomplete");
        return Err(err);
    }

    info!(event_id, infra = request.infra_ids.len(), "event scheduled");
    Ok(ScheduleEventOutcome {
        event_id,
        assigned_infra: request.infra_ids,
    })
}

/// Dependent statements for schedule-event: one keep-existing upsert per
/// infra item, then a single audit notification when anything was
/// assigned.
async fn assign_infra(
    conn: &mut Connection,
    event_id: i64,
    infra_ids: &[i64],
) -> ProcedureResult<()> {
    if infra_ids.is_empty() {
        return Ok(());
    }

    let upsert =
        Insert::into_table("event_infra", &["ev_id", "i_id", "quantity"]).or_keep_existing();
    for infra_id in infra_ids {
        conn.insert(
            &upsert,
            &[SqlValue::Int(event_id), SqlValue::Int(*infra_id), SqlValue::Int(1)],
        )
        .await?;
    }

    let notification = Insert::into_table("notifications", &["level", "message"]);
    conn.insert(
        &notification,
        &[
            SqlValue::Text("INFO".to_string()),
            SqlValue::Text(format!("Infra assigned manually for event {event_id}")),
        ],
    )
    .await?;
    Ok(())
}

// ==================
// Assign employee
// ==================

/// Request body for the assign-employee operation.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignEmployeeRequest {
    pub emp_id: Option<i64>,
    pub e_id: Option<i64>,
    pub role_desc: Option<String>,
}

/// Outcome of an assign-employee invocation: 1 on success, 0 otherwise.
#[derive(Debug, Clone, Serialize)]
pub struct AssignEmployeeOutcome {
    pub success: i64,
}

/// Assign an employee to an enclosure through the `assign_employee`
/// routine. The routine reports via the `p_success` output variable and
/// has no dependent statements.
pub async fn assign_employee(
    pool: &ConnectionPool,
    request: AssignEmployeeRequest,
) -> ProcedureResult<AssignEmployeeOutcome> {
    let mut conn = pool.acquire().await?;

    let params = [
        int_or_null(request.emp_id),
        int_or_null(request.e_id),
        text_or_null(request.role_desc),
    ];
    let out = call_with_output(&mut conn, "assign_employee", &params, "p_success", SqlValue::Int(0))
        .await?;

    Ok(AssignEmployeeOutcome {
        success: out.as_int().unwrap_or(0),
    })
}

fn text_or_null(value: Option<String>) -> SqlValue {
    match value {
        Some(s) if !s.is_empty() => SqlValue::Text(s),
        _ => SqlValue::Null,
    }
}

fn int_or_null(value: Option<i64>) -> SqlValue {
    value.map_or(SqlValue::Null, SqlValue::Int)
}
