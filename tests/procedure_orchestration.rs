//! Procedure Orchestration Tests
//!
//! Routine-plus-follow-up sequences on one reserved connection:
//! - schedule_event yields the new identity via the output channel,
//!   upserts infra associations at quantity 1, and logs one notification
//! - re-assignment of an existing (event, infra) pair never changes the
//!   stored quantity
//! - assign_employee reports success through the same channel with no
//!   dependent statements, and never reads a stale output value

use serde_json::{json, Map, Value};
use zooapi::cli::build_dispatcher;
use zooapi::dispatch::Dispatcher;
use zooapi::procedures::{
    assign_employee, schedule_event, AssignEmployeeRequest, ScheduleEventRequest,
};
use zooapi::store::SqlValue;

// =============================================================================
// Helper Functions
// =============================================================================

fn dispatcher() -> Dispatcher {
    build_dispatcher(4)
}

fn body(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("test body must be an object")
}

fn schedule_request(title: &str, infra_ids: Vec<i64>) -> ScheduleEventRequest {
    ScheduleEventRequest {
        title: Some(title.to_string()),
        e_date: Some("2026-10-01".to_string()),
        e_id: Some(1),
        capacity: Some(100),
        infra_ids,
    }
}

// =============================================================================
// Schedule event
// =============================================================================

#[tokio::test]
async fn test_schedule_event_assigns_infra_and_logs_notification() {
    let dispatcher = dispatcher();
    let outcome = schedule_event(dispatcher.pool(), schedule_request("Night Safari", vec![5, 6]))
        .await
        .unwrap();
    assert!(outcome.event_id > 0);
    assert_eq!(outcome.assigned_infra, vec![5, 6]);

    let associations = dispatcher.run_query("event_infra").await.unwrap();
    assert_eq!(associations.len(), 2);

    let detailed = dispatcher.run_query("events").await.unwrap();
    assert_eq!(detailed.len(), 1);

    let notifications = dispatcher.run_query("notifications").await.unwrap();
    assert_eq!(notifications.len(), 1);
    let message = notifications[0].get("message").and_then(|v| v.as_text()).unwrap();
    assert!(message.contains(&outcome.event_id.to_string()));
    assert_eq!(
        notifications[0].get("level"),
        Some(&SqlValue::Text("INFO".to_string()))
    );
}

#[tokio::test]
async fn test_schedule_event_without_infra_skips_notification() {
    let dispatcher = dispatcher();
    let outcome = schedule_event(dispatcher.pool(), schedule_request("Quiet day", vec![]))
        .await
        .unwrap();
    assert!(outcome.assigned_infra.is_empty());

    assert!(dispatcher.run_query("event_infra").await.unwrap().is_empty());
    assert!(dispatcher.run_query("notifications").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_rescheduling_same_infra_does_not_change_quantity() {
    let dispatcher = dispatcher();
    let pool = dispatcher.pool();

    dispatcher
        .run_insert("infra", &body(json!({"name": "Stage", "type": "structure"})))
        .await
        .unwrap();

    schedule_event(pool, schedule_request("Opening", vec![1])).await.unwrap();
    schedule_event(pool, schedule_request("Opening again", vec![1])).await.unwrap();

    let joined = dispatcher.run_query("inner_event_infra").await.unwrap();
    let quantities: Vec<_> = joined
        .iter()
        .filter(|row| row.get("infra_id") == Some(&SqlValue::Int(1)))
        .map(|row| row.get("quantity").cloned().unwrap())
        .collect();
    // One association per event, each still at quantity 1.
    assert_eq!(quantities, vec![SqlValue::Int(1), SqlValue::Int(1)]);
}

#[tokio::test]
async fn test_two_infra_items_each_at_quantity_one() {
    let dispatcher = dispatcher();
    dispatcher
        .run_insert("infra", &body(json!({"name": "Stage"})))
        .await
        .unwrap();
    dispatcher
        .run_insert("infra", &body(json!({"name": "Sound rig"})))
        .await
        .unwrap();

    let outcome = schedule_event(dispatcher.pool(), schedule_request("Gala", vec![1, 2]))
        .await
        .unwrap();

    let joined = dispatcher.run_query("inner_event_infra").await.unwrap();
    let rows: Vec<_> = joined
        .iter()
        .filter(|row| row.get("ev_id") == Some(&SqlValue::Int(outcome.event_id)))
        .collect();
    assert_eq!(rows.len(), 2);
    for row in rows {
        assert_eq!(row.get("quantity"), Some(&SqlValue::Int(1)));
    }
}

// =============================================================================
// Assign employee
// =============================================================================

#[tokio::test]
async fn test_assign_employee_success_and_miss() {
    let dispatcher = dispatcher();
    dispatcher
        .run_insert("employee", &body(json!({"name": "Sam", "role": "keeper"})))
        .await
        .unwrap();
    dispatcher
        .run_insert("enclosure", &body(json!({"name": "Savannah", "capacity": 12})))
        .await
        .unwrap();

    let ok = assign_employee(
        dispatcher.pool(),
        AssignEmployeeRequest {
            emp_id: Some(1),
            e_id: Some(1),
            role_desc: Some("night shift".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(ok.success, 1);

    let miss = assign_employee(
        dispatcher.pool(),
        AssignEmployeeRequest {
            emp_id: Some(99),
            e_id: Some(1),
            role_desc: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(miss.success, 0);

    let assignments = dispatcher.run_query("employee_enclosure").await.unwrap();
    assert_eq!(assignments.len(), 1);
}

#[tokio::test]
async fn test_output_variable_never_reads_stale() {
    // Pool of one: both invocations reuse the same session, so a stale
    // p_success=1 would leak into the miss unless it is re-initialized.
    let dispatcher = build_dispatcher(1);
    dispatcher
        .run_insert("employee", &body(json!({"name": "Sam"})))
        .await
        .unwrap();
    dispatcher
        .run_insert("enclosure", &body(json!({"name": "Aviary"})))
        .await
        .unwrap();

    let ok = assign_employee(
        dispatcher.pool(),
        AssignEmployeeRequest {
            emp_id: Some(1),
            e_id: Some(1),
            role_desc: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(ok.success, 1);

    let miss = assign_employee(
        dispatcher.pool(),
        AssignEmployeeRequest {
            emp_id: Some(42),
            e_id: Some(1),
            role_desc: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(miss.success, 0);
}
