//! # sproutlab-core
//!
//! The deterministic build-guide progression engine for SproutLab - THE LOGIC.
//!
//! This crate implements the CORE of the build guide: a fixed, ordered step
//! catalog, a sequential-unlock progression state machine, a pure derived
//! status projector, and an explicit one-shot timer queue governing the
//! celebrate-then-advance hand-off.
//!
//! ## Architectural Constraints
//!
//! The CORE:
//! - Is the ONLY place where progression state exists (stateful)
//! - Is minimal: if a feature is not essential to progression tracking, it
//!   is removed
//! - Never reads clocks; callers pass session time explicitly
//! - Has NO async, NO network dependencies (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod catalog;
pub mod primitives;
pub mod progress;
pub mod session;
pub mod status;
pub mod timer;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{BuildStep, Component, FIRST_STEP, GuideError, StepId};

// =============================================================================
// RE-EXPORTS: Progression Engine
// =============================================================================

pub use catalog::Catalog;
pub use progress::ProgressionState;
pub use session::{GuideSession, GuideSnapshot, ToggleOutcome};
pub use status::{ComponentStatus, GuideStatus, StatusProjector};
pub use timer::{PendingAdvance, TimerQueue};

// =============================================================================
// RE-EXPORTS: Primitives
// =============================================================================

pub use primitives::{CELEBRATION_DELAY_MS, STEP_COUNT};
