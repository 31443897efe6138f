//! Unit tests for API types serialization/deserialization.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use sproutlab::api::{
    ActivateRequest, ActivateResponse, ComponentResponse, HealthResponse, StateResponse,
    StatusResponse, ToggleRequest, ToggleResponse,
};
use sproutlab_core::{ComponentStatus, ToggleOutcome};

// =============================================================================
// HEALTH RESPONSE TESTS
// =============================================================================

#[test]
fn test_health_response_default() {
    let health = HealthResponse::default();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

#[test]
fn test_health_response_serialization() {
    let health = HealthResponse {
        status: "ok".to_string(),
        version: "0.1.0".to_string(),
    };

    let json = serde_json::to_string(&health).unwrap();
    assert!(json.contains("\"status\":\"ok\""));
    assert!(json.contains("\"version\":\"0.1.0\""));
}

// =============================================================================
// STATE RESPONSE TESTS
// =============================================================================

#[test]
fn test_state_response_serialization() {
    let state = StateResponse {
        completed: vec![1, 2],
        active: 3,
        celebrating: true,
        pending_advances: 1,
    };

    let json = serde_json::to_string(&state).unwrap();
    assert!(json.contains("\"completed\":[1,2]"));
    assert!(json.contains("\"active\":3"));
    assert!(json.contains("\"celebrating\":true"));
    assert!(json.contains("\"pending_advances\":1"));
}

#[test]
fn test_state_response_deserialization() {
    let json = r#"{"completed":[1],"active":2,"celebrating":false,"pending_advances":0}"#;
    let state: StateResponse = serde_json::from_str(json).unwrap();

    assert_eq!(state.completed, vec![1]);
    assert_eq!(state.active, 2);
    assert!(!state.celebrating);
    assert_eq!(state.pending_advances, 0);
}

// =============================================================================
// STATUS RESPONSE TESTS
// =============================================================================

#[test]
fn test_status_response_deserialization() {
    let json = r#"{"completion_percent":42,"completion_ratio":0.42857142857142855,"powered_on":false,"data_flowing":false,"components":[]}"#;
    let status: StatusResponse = serde_json::from_str(json).unwrap();

    assert_eq!(status.completion_percent, 42);
    assert!(!status.powered_on);
    assert!(!status.data_flowing);
    assert!(status.components.is_empty());
}

// =============================================================================
// COMPONENT RESPONSE TESTS
// =============================================================================

#[test]
fn test_component_response_found() {
    let response = ComponentResponse::found(
        "brain",
        ComponentStatus {
            is_active: false,
            is_done: false,
            is_locked: true,
        },
    );

    assert!(response.success);
    assert!(response.error.is_none());
    let status = response.component.unwrap();
    assert_eq!(status.component, "brain");
    assert!(status.is_locked);
}

#[test]
fn test_component_response_not_found() {
    let response = ComponentResponse::not_found("Unknown component 'widget'");

    assert!(!response.success);
    assert!(response.component.is_none());
    assert_eq!(response.error.as_deref(), Some("Unknown component 'widget'"));
}

// =============================================================================
// ACTIVATE REQUEST/RESPONSE TESTS
// =============================================================================

#[test]
fn test_activate_request_deserialization() {
    let json = r#"{"step":4}"#;
    let request: ActivateRequest = serde_json::from_str(json).unwrap();

    assert_eq!(request.step, 4);
}

#[test]
fn test_activate_response_applied() {
    let response = ActivateResponse::applied(false, 1);

    assert!(response.success);
    assert_eq!(response.changed, Some(false));
    assert_eq!(response.active, Some(1));
    assert!(response.error.is_none());
}

#[test]
fn test_activate_response_error() {
    let response = ActivateResponse::error("Step 9 is out of range");

    assert!(!response.success);
    assert!(response.changed.is_none());
    assert!(response.active.is_none());
    assert_eq!(response.error.as_deref(), Some("Step 9 is out of range"));
}

// =============================================================================
// TOGGLE REQUEST/RESPONSE TESTS
// =============================================================================

#[test]
fn test_toggle_request_deserialization() {
    let json = r#"{"step":1}"#;
    let request: ToggleRequest = serde_json::from_str(json).unwrap();

    assert_eq!(request.step, 1);
}

#[test]
fn test_toggle_response_from_completed_outcome() {
    let response = ToggleResponse::from_outcome(ToggleOutcome::Completed { fires_at: 700 });

    assert!(response.success);
    assert_eq!(response.completed, Some(true));
    assert_eq!(response.fires_at, Some(700));
    assert!(response.error.is_none());
}

#[test]
fn test_toggle_response_from_uncompleted_outcome() {
    let response = ToggleResponse::from_outcome(ToggleOutcome::Uncompleted);

    assert!(response.success);
    assert_eq!(response.completed, Some(false));
    assert!(response.fires_at.is_none());
}

#[test]
fn test_toggle_response_error() {
    let response = ToggleResponse::error("Step 0 is out of range");

    assert!(!response.success);
    assert!(response.completed.is_none());
    assert_eq!(response.error.as_deref(), Some("Step 0 is out of range"));
}
