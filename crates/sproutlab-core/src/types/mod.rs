//! # Core Type Definitions
//!
//! This module contains all core types for the SproutLab progression engine:
//! - Step identity (`StepId`)
//! - Sub-assembly tags (`Component`)
//! - Catalog entries (`BuildStep`)
//! - Error types (`GuideError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module implement `Ord` for deterministic ordering in
//! `BTreeSet`, and state mutation uses integer arithmetic only.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// STEP IDENTITY
// =============================================================================

/// Unique identifier for a build step.
///
/// Step ids are 1-based, dense, and define the total build order.
/// `StepId(1)` is always accessible; every later step unlocks only once
/// its predecessor is completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StepId(pub u8);

/// The first step of every catalog.
pub const FIRST_STEP: StepId = StepId(1);

impl StepId {
    /// Get the raw 1-based id value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Check whether this id lies within a catalog of `step_count` steps.
    #[must_use]
    pub const fn in_range(self, step_count: u8) -> bool {
        self.0 >= 1 && self.0 <= step_count
    }

    /// The step immediately before this one, if any.
    #[must_use]
    pub const fn predecessor(self) -> Option<StepId> {
        if self.0 > 1 {
            Some(StepId(self.0 - 1))
        } else {
            None
        }
    }

    /// The step immediately after this one, or `None` at the final step.
    #[must_use]
    pub const fn successor(self, step_count: u8) -> Option<StepId> {
        if self.0 < step_count {
            Some(StepId(self.0 + 1))
        } else {
            None
        }
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// COMPONENT TAGS
// =============================================================================

/// Sub-assembly tag identifying which part of the lab a step activates.
///
/// The component list is closed and exhaustively known: every catalog step
/// owns exactly one tag, and the schematic layer resolves tags back to steps
/// through the catalog. String forms match the reference kit wiring labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    /// The whole unboxed kit ("all").
    #[serde(rename = "all")]
    Kit,
    /// The ESP32 controller and antenna.
    Brain,
    /// The plant camera.
    Camera,
    /// The soil moisture probe.
    Probe,
    /// The ventilation fan.
    Fan,
    /// The power supply.
    Power,
    /// The grow box itself (final assembly).
    Box,
}

impl Component {
    /// Get the wire-format tag for this component.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Component::Kit => "all",
            Component::Brain => "brain",
            Component::Camera => "camera",
            Component::Probe => "probe",
            Component::Fan => "fan",
            Component::Power => "power",
            Component::Box => "box",
        }
    }

    /// All components, in catalog order.
    #[must_use]
    pub const fn all() -> [Component; 7] {
        [
            Component::Kit,
            Component::Brain,
            Component::Camera,
            Component::Probe,
            Component::Fan,
            Component::Power,
            Component::Box,
        ]
    }
}

impl FromStr for Component {
    type Err = GuideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Component::Kit),
            "brain" => Ok(Component::Brain),
            "camera" => Ok(Component::Camera),
            "probe" => Ok(Component::Probe),
            "fan" => Ok(Component::Fan),
            "power" => Ok(Component::Power),
            "box" => Ok(Component::Box),
            other => Err(GuideError::UnknownComponent(other.to_string())),
        }
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// BUILD STEP
// =============================================================================

/// One immutable entry of the build catalog.
///
/// Steps are defined at process start and never change afterwards. The
/// `subtasks` list is ordered but purely descriptive; sub-tasks are not
/// separately trackable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStep {
    /// 1-based position in the build order.
    pub id: StepId,
    /// Short step title.
    pub title: String,
    /// One-sentence description shown while the step is active.
    pub description: String,
    /// The sub-assembly this step activates.
    pub component: Component,
    /// Ordered, purely descriptive sub-task lines.
    pub subtasks: Vec<String>,
    /// Display string shown once the step is completed.
    pub victory_label: String,
}

impl BuildStep {
    /// Create a new build step.
    #[must_use]
    pub fn new(
        id: u8,
        title: &str,
        description: &str,
        component: Component,
        subtasks: &[&str],
        victory_label: &str,
    ) -> Self {
        Self {
            id: StepId(id),
            title: title.to_string(),
            description: description.to_string(),
            component,
            subtasks: subtasks.iter().map(|s| (*s).to_string()).collect(),
            victory_label: victory_label.to_string(),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the SproutLab system.
///
/// - No silent failures for contract violations: out-of-range step ids are
///   rejected loudly, since the catalog is fixed and finite.
/// - Accessibility gating is NOT an error: focusing a locked step is a
///   defined silent no-op, never a `GuideError`.
/// - The engine never panics; all errors are recoverable.
#[derive(Debug, Error)]
pub enum GuideError {
    /// A step id outside 1..=N was passed to an engine operation.
    #[error("Step id {0} is outside the catalog range")]
    StepOutOfRange(StepId),

    /// A component tag did not match any catalog entry.
    #[error("Unknown component tag: {0:?}")]
    UnknownComponent(String),

    /// A catalog failed the density/uniqueness invariant.
    #[error("Malformed catalog: {0}")]
    MalformedCatalog(String),

    /// A configuration file could not be parsed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An I/O error occurred (app layer only; the core does no I/O).
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_id_range() {
        assert!(StepId(1).in_range(7));
        assert!(StepId(7).in_range(7));
        assert!(!StepId(0).in_range(7));
        assert!(!StepId(8).in_range(7));
    }

    #[test]
    fn step_id_neighbours() {
        assert_eq!(StepId(1).predecessor(), None);
        assert_eq!(StepId(2).predecessor(), Some(StepId(1)));
        assert_eq!(StepId(7).successor(7), None);
        assert_eq!(StepId(6).successor(7), Some(StepId(7)));
    }

    #[test]
    fn component_round_trip() {
        for component in Component::all() {
            let parsed: Component = component.as_str().parse().expect("parse");
            assert_eq!(parsed, component);
        }
    }

    #[test]
    fn component_unknown_tag_is_loud() {
        let err = "thruster".parse::<Component>();
        assert!(matches!(err, Err(GuideError::UnknownComponent(_))));
    }

    #[test]
    fn component_serde_uses_wire_tags() {
        let json = serde_json::to_string(&Component::Kit).expect("serialize");
        assert_eq!(json, "\"all\"");
        let back: Component = serde_json::from_str("\"power\"").expect("deserialize");
        assert_eq!(back, Component::Power);
    }
}
