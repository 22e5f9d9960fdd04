//! HTTP Surface Tests
//!
//! Router-level tests driving the axum service directly:
//! - unknown names yield structured 400 rejections
//! - store-level rejections yield structured 500 with the message
//! - response shapes match the documented surface

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use zooapi::cli::build_dispatcher;
use zooapi::http_server::{ApiState, HttpServer, HttpServerConfig};

// =============================================================================
// Helper Functions
// =============================================================================

fn router() -> Router {
    let state = Arc::new(ApiState::new(build_dispatcher(4)));
    HttpServer::with_config(state, HttpServerConfig::default()).router()
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder().method(method).uri(uri).body(Body::empty()).unwrap(),
    };
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

// =============================================================================
// Health & reads
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = router();
    let (status, body) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true}));
}

#[tokio::test]
async fn test_query_endpoint_returns_rows() {
    let app = router();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/insert/species",
        Some(json!({"scientific_name": "Panthera leo", "common_name": "Lion"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (status, body) = send(&app, Method::GET, "/api/query?v=species", None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["common_name"], json!("Lion"));
}

#[tokio::test]
async fn test_unknown_query_is_bad_request() {
    let app = router();
    let (status, body) = send(&app, Method::GET, "/api/query?v=drop_tables", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("drop_tables"));

    let (status, _) = send(&app, Method::GET, "/api/query", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Insert / delete
// =============================================================================

#[tokio::test]
async fn test_insert_returns_generated_identity() {
    let app = router();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/insert/animal",
        Some(json!({"name": "Leo", "species_id": 3, "birth_date": "2020-01-01", "gender": "M"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"inserted_id": 1}));
}

#[tokio::test]
async fn test_insert_unknown_resource_is_bad_request() {
    let app = router();
    let (status, body) = send(&app, Method::POST, "/api/insert/unicorn", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("unicorn"));
}

#[tokio::test]
async fn test_insert_constraint_rejection_is_server_error() {
    let app = router();
    let (status, body) = send(&app, Method::POST, "/api/insert/animal", Some(json!({}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("animal.name"));
}

#[tokio::test]
async fn test_delete_reports_outcome_shape() {
    let app = router();
    send(
        &app,
        Method::POST,
        "/api/insert/visitor",
        Some(json!({"name": "Ada"})),
    )
    .await;

    let (status, body) = send(&app, Method::DELETE, "/api/delete/visitor/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"deleted": true, "id": "1", "resource": "visitor"}));

    let (status, body) = send(&app, Method::DELETE, "/api/delete/visitor/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], json!(false));
}

// =============================================================================
// Procedures
// =============================================================================

#[tokio::test]
async fn test_schedule_event_endpoint() {
    let app = router();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/schedule_event",
        Some(json!({
            "title": "Night Safari",
            "e_date": "2026-10-01",
            "e_id": 1,
            "capacity": 120,
            "infra_ids": [5, 6]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["event_id"], json!(1));
    assert_eq!(body["assigned_infra"], json!([5, 6]));

    let (_, notifications) = send(&app, Method::GET, "/api/notifications", None).await;
    assert_eq!(notifications.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_assign_employee_endpoint_miss_returns_zero() {
    let app = router();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/assign_employee",
        Some(json!({"emp_id": 1, "e_id": 1, "role_desc": "keeper"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": 0}));
}

// =============================================================================
// Feed log
// =============================================================================

#[tokio::test]
async fn test_feed_log_applies_defaults() {
    let app = router();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/feed_log",
        Some(json!({"a_id": 1, "f_id": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"insertId": 1}));

    let (_, rows) = send(&app, Method::GET, "/api/query?v=feed_log", None).await;
    let row = &rows.as_array().unwrap()[0];
    assert_eq!(row["amount"], json!(0));
    assert_eq!(row["unit"], json!("kg"));
    assert_eq!(row["fed_by"], json!(null));
}

// =============================================================================
// Scalar functions
// =============================================================================

#[tokio::test]
async fn test_animal_age_endpoint() {
    let app = router();
    send(
        &app,
        Method::POST,
        "/api/insert/animal",
        Some(json!({"name": "Leo", "birth_date": "2020-01-01"})),
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/api/animal_age/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["age"].as_i64().is_some_and(|a| a >= 5));

    // Unknown animal yields a null age, not an error.
    let (status, body) = send(&app, Method::GET, "/api/animal_age/99", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["age"], json!(null));
}

#[tokio::test]
async fn test_enclosure_remaining_endpoint() {
    let app = router();
    send(
        &app,
        Method::POST,
        "/api/insert/enclosure",
        Some(json!({"name": "Aviary", "capacity": 3})),
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/api/enclosure_remaining/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["remaining"], json!(3));
}
