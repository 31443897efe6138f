//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.
//!
//! Completing a step arms a real timer: the toggle handler spawns a tokio
//! task that sleeps for the celebration window and then pumps the core
//! timer queue under the write lock. The core decides what the expiry
//! means; the task only supplies wall-clock time.

use super::{
    AppState,
    types::{
        ActivateRequest, ActivateResponse, CatalogResponse, ComponentResponse, HealthResponse,
        StateResponse, StatusResponse, StepJson, ToggleRequest, ToggleResponse,
    },
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sproutlab_core::{CELEBRATION_DELAY_MS, Component, StepId, ToggleOutcome};
use std::str::FromStr;
use std::time::Duration;

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// CATALOG HANDLER
// =============================================================================

/// Get the ordered step catalog.
pub async fn catalog_handler(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.session.read().await;
    let steps: Vec<StepJson> = session.catalog().iter().map(StepJson::from).collect();
    (StatusCode::OK, Json(CatalogResponse { steps }))
}

// =============================================================================
// STATE HANDLER
// =============================================================================

/// Get the current session state snapshot.
pub async fn state_handler(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.session.read().await;
    (StatusCode::OK, Json(StateResponse::from(session.snapshot())))
}

// =============================================================================
// STATUS HANDLER
// =============================================================================

/// Get the derived status projection.
pub async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.session.read().await;
    (
        StatusCode::OK,
        Json(StatusResponse::from(session.status_overview())),
    )
}

// =============================================================================
// COMPONENT HANDLER
// =============================================================================

/// Get the derived status of a single component by its wire tag.
pub async fn component_handler(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> impl IntoResponse {
    let component = match Component::from_str(&tag) {
        Ok(c) => c,
        Err(e) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ComponentResponse::not_found(e.to_string())),
            );
        }
    };

    let session = state.session.read().await;
    match session.component_status(component) {
        Some(status) => (
            StatusCode::OK,
            Json(ComponentResponse::found(component.as_str(), status)),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Json(ComponentResponse::not_found(format!(
                "No step uses component '{}'",
                component
            ))),
        ),
    }
}

// =============================================================================
// ACTIVATE HANDLER
// =============================================================================

/// Move the active pointer to a step.
///
/// A locked target is not an error: the request succeeds with
/// `changed == false` and the pointer stays where it was.
pub async fn activate_handler(
    State(state): State<AppState>,
    Json(request): Json<ActivateRequest>,
) -> impl IntoResponse {
    let mut session = state.session.write().await;
    match session.set_active(StepId(request.step)) {
        Ok(changed) => {
            let active = session.state().active.value();
            (StatusCode::OK, Json(ActivateResponse::applied(changed, active)))
        }
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ActivateResponse::error(e.to_string())),
        ),
    }
}

// =============================================================================
// TOGGLE HANDLER
// =============================================================================

/// Toggle a step's completion.
///
/// Marking a step complete arms a one-shot advance timer. Timers are never
/// cancelled, so un-completing the step before the deadline does not stop
/// the pending advance.
pub async fn toggle_handler(
    State(state): State<AppState>,
    Json(request): Json<ToggleRequest>,
) -> impl IntoResponse {
    let outcome = {
        let mut session = state.session.write().await;
        match session.toggle_complete(StepId(request.step), state.now_ms()) {
            Ok(outcome) => outcome,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ToggleResponse::error(e.to_string())),
                );
            }
        }
    };

    if let ToggleOutcome::Completed { fires_at } = outcome {
        let task_state = state.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(CELEBRATION_DELAY_MS)).await;
            let mut session = task_state.session.write().await;
            let applied = session.advance_due(task_state.now_ms());
            for entry in applied {
                tracing::debug!(
                    step = entry.step.value(),
                    fires_at = entry.fires_at,
                    "Advance timer fired"
                );
            }
        });
        tracing::debug!(
            step = request.step,
            fires_at,
            "Step completed, advance timer armed"
        );
    }

    (StatusCode::OK, Json(ToggleResponse::from_outcome(outcome)))
}
