//! Zoo API HTTP Routes
//!
//! The full `/api` surface: catalog reads, generic insert/delete,
//! scalar-function reads, the two routine-backed operations, feed-log
//! writes and the notification feed.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::dispatch::Dispatcher;
use crate::procedures::{
    self, AssignEmployeeOutcome, AssignEmployeeRequest, ScheduleEventOutcome, ScheduleEventRequest,
};
use crate::store::row_to_json;

use super::errors::{ApiError, ApiResult};

/// Notification feed page size
const NOTIFICATION_FEED_LIMIT: usize = 50;

// ==================
// Shared State
// ==================

/// API state shared across handlers
pub struct ApiState {
    pub dispatcher: Dispatcher,
}

impl ApiState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct QueryParams {
    /// Catalog query name
    pub v: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InsertResponse {
    pub inserted_id: i64,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
    pub id: String,
    pub resource: String,
}

#[derive(Debug, Deserialize)]
pub struct FeedLogRequest {
    pub a_id: Option<Value>,
    pub f_id: Option<Value>,
    pub amount: Option<Value>,
    pub unit: Option<Value>,
    pub fed_by: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedLogResponse {
    pub insert_id: i64,
}

// ==================
// Routes
// ==================

/// Create the `/api` routes
pub fn api_routes(state: Arc<ApiState>) -> Router {
    Router::new()
        // Catalog reads
        .route("/query", get(query_handler))
        .route("/notifications", get(notifications_handler))
        // Scalar functions
        .route("/animal_age/:id", get(animal_age_handler))
        .route("/enclosure_remaining/:id", get(enclosure_remaining_handler))
        // Generic insert/delete
        .route("/insert/:resource", post(insert_handler))
        .route("/delete/:resource/:id", delete(delete_handler))
        // Routine-backed operations
        .route("/schedule_event", post(schedule_event_handler))
        .route("/assign_employee", post(assign_employee_handler))
        // Feeding events
        .route("/feed_log", post(feed_log_handler))
        // Health
        .route("/health", get(health_handler))
        .with_state(state)
}

// ==================
// Read Handlers
// ==================

async fn query_handler(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<QueryParams>,
) -> ApiResult<Json<Value>> {
    let name = params.v.ok_or(ApiError::MissingParam("v"))?;
    let rows = state.dispatcher.run_query(&name).await?;
    Ok(Json(Value::Array(rows.iter().map(row_to_json).collect())))
}

async fn notifications_handler(State(state): State<Arc<ApiState>>) -> ApiResult<Json<Value>> {
    let rows = state.dispatcher.run_query("notifications").await?;
    let latest: Vec<Value> = rows
        .iter()
        .take(NOTIFICATION_FEED_LIMIT)
        .map(row_to_json)
        .collect();
    Ok(Json(Value::Array(latest)))
}

async fn animal_age_handler(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let age = state.dispatcher.run_scalar("animal_age", id).await?;
    Ok(Json(json!({ "age": age.to_json() })))
}

async fn enclosure_remaining_handler(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let remaining = state
        .dispatcher
        .run_scalar("enclosure_remaining_capacity", id)
        .await?;
    Ok(Json(json!({ "remaining": remaining.to_json() })))
}

// ==================
// Write Handlers
// ==================

async fn insert_handler(
    State(state): State<Arc<ApiState>>,
    Path(resource): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Json<InsertResponse>> {
    let body = body.as_object().cloned().unwrap_or_default();
    let inserted_id = state.dispatcher.run_insert(&resource, &body).await?;
    Ok(Json(InsertResponse { inserted_id }))
}

async fn delete_handler(
    State(state): State<Arc<ApiState>>,
    Path((resource, id)): Path<(String, String)>,
) -> ApiResult<Json<DeleteResponse>> {
    let outcome = state.dispatcher.run_delete(&resource, &id).await?;
    Ok(Json(DeleteResponse {
        deleted: outcome.deleted,
        id,
        resource,
    }))
}

async fn schedule_event_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<ScheduleEventRequest>,
) -> ApiResult<Json<ScheduleEventOutcome>> {
    let outcome = procedures::schedule_event(state.dispatcher.pool(), request).await?;
    Ok(Json(outcome))
}

async fn assign_employee_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<AssignEmployeeRequest>,
) -> ApiResult<Json<AssignEmployeeOutcome>> {
    let outcome = procedures::assign_employee(state.dispatcher.pool(), request).await?;
    Ok(Json(outcome))
}

async fn feed_log_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<FeedLogRequest>,
) -> ApiResult<Json<FeedLogResponse>> {
    let mut body = Map::new();
    body.insert("a_id".to_string(), request.a_id.unwrap_or(Value::Null));
    body.insert("f_id".to_string(), request.f_id.unwrap_or(Value::Null));
    body.insert("amount".to_string(), defaulted(request.amount, json!(0)));
    body.insert("unit".to_string(), defaulted(request.unit, json!("kg")));
    body.insert("fed_by".to_string(), request.fed_by.unwrap_or(Value::Null));

    let insert_id = state.dispatcher.run_insert("feed_log", &body).await?;
    Ok(Json(FeedLogResponse { insert_id }))
}

/// Default applied when the field is omitted, null, or an empty string.
fn defaulted(value: Option<Value>, default: Value) -> Value {
    match value {
        None | Some(Value::Null) => default,
        Some(Value::String(s)) if s.is_empty() => default,
        Some(other) => other,
    }
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "ok": true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_log_defaults() {
        assert_eq!(defaulted(None, json!(0)), json!(0));
        assert_eq!(defaulted(Some(Value::Null), json!("kg")), json!("kg"));
        assert_eq!(defaulted(Some(json!("")), json!("kg")), json!("kg"));
        assert_eq!(defaulted(Some(json!(2.5)), json!(0)), json!(2.5));
    }
}
