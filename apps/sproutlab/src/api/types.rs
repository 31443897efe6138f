//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use serde::{Deserialize, Serialize};
use sproutlab_core::{BuildStep, ComponentStatus, GuideSnapshot, GuideStatus, ToggleOutcome};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// CATALOG RESPONSE
// =============================================================================

/// One build step as exposed over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepJson {
    pub id: u8,
    pub title: String,
    pub description: String,
    pub component: String,
    pub subtasks: Vec<String>,
    pub victory_label: String,
}

impl From<&BuildStep> for StepJson {
    fn from(step: &BuildStep) -> Self {
        Self {
            id: step.id.value(),
            title: step.title.clone(),
            description: step.description.clone(),
            component: step.component.as_str().to_string(),
            subtasks: step.subtasks.clone(),
            victory_label: step.victory_label.clone(),
        }
    }
}

/// The ordered catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub steps: Vec<StepJson>,
}

// =============================================================================
// STATE RESPONSE
// =============================================================================

/// Snapshot of the mutable session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateResponse {
    pub completed: Vec<u8>,
    pub active: u8,
    pub celebrating: bool,
    pub pending_advances: usize,
}

impl From<GuideSnapshot> for StateResponse {
    fn from(snapshot: GuideSnapshot) -> Self {
        Self {
            completed: snapshot.completed.iter().map(|id| id.value()).collect(),
            active: snapshot.active.value(),
            celebrating: snapshot.celebrating,
            pending_advances: snapshot.pending_advances,
        }
    }
}

// =============================================================================
// STATUS RESPONSE
// =============================================================================

/// Per-component derived status entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentStatusJson {
    pub component: String,
    pub is_active: bool,
    pub is_done: bool,
    pub is_locked: bool,
}

/// Derived status scalars plus the per-component map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub completion_percent: u8,
    pub completion_ratio: f64,
    pub powered_on: bool,
    pub data_flowing: bool,
    pub components: Vec<ComponentStatusJson>,
}

impl From<GuideStatus> for StatusResponse {
    fn from(status: GuideStatus) -> Self {
        Self {
            completion_percent: status.completion_percent,
            completion_ratio: status.completion_ratio,
            powered_on: status.powered_on,
            data_flowing: status.data_flowing,
            components: status
                .components
                .into_iter()
                .map(|(component, cs)| ComponentStatusJson {
                    component: component.as_str().to_string(),
                    is_active: cs.is_active,
                    is_done: cs.is_done,
                    is_locked: cs.is_locked,
                })
                .collect(),
        }
    }
}

// =============================================================================
// COMPONENT RESPONSE
// =============================================================================

/// Single-component status lookup response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentResponse {
    pub success: bool,
    pub component: Option<ComponentStatusJson>,
    pub error: Option<String>,
}

impl ComponentResponse {
    pub fn found(component: &str, status: ComponentStatus) -> Self {
        Self {
            success: true,
            component: Some(ComponentStatusJson {
                component: component.to_string(),
                is_active: status.is_active,
                is_done: status.is_done,
                is_locked: status.is_locked,
            }),
            error: None,
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            component: None,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// ACTIVATE REQUEST/RESPONSE
// =============================================================================

/// Focus request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivateRequest {
    pub step: u8,
}

/// Focus response. A locked step is a success with `changed == false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivateResponse {
    pub success: bool,
    pub changed: Option<bool>,
    pub active: Option<u8>,
    pub error: Option<String>,
}

impl ActivateResponse {
    pub fn applied(changed: bool, active: u8) -> Self {
        Self {
            success: true,
            changed: Some(changed),
            active: Some(active),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            changed: None,
            active: None,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// TOGGLE REQUEST/RESPONSE
// =============================================================================

/// Completion toggle request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleRequest {
    pub step: u8,
}

/// Completion toggle response.
///
/// `completed == true` means the step was just marked complete and an
/// advance timer is in flight (`fires_at` is its deadline in session
/// milliseconds); `false` means the step was un-marked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub success: bool,
    pub completed: Option<bool>,
    pub fires_at: Option<u64>,
    pub error: Option<String>,
}

impl ToggleResponse {
    pub fn from_outcome(outcome: ToggleOutcome) -> Self {
        match outcome {
            ToggleOutcome::Completed { fires_at } => Self {
                success: true,
                completed: Some(true),
                fires_at: Some(fires_at),
                error: None,
            },
            ToggleOutcome::Uncompleted => Self {
                success: true,
                completed: Some(false),
                fires_at: None,
                error: None,
            },
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            completed: None,
            fires_at: None,
            error: Some(msg.into()),
        }
    }
}
