//! # Guide Session
//!
//! Session management combining the step catalog, the mutable progression
//! state and the transition timer queue.
//!
//! A `GuideSession` is the single high-level interface consumed by the app
//! layer: the two mutators, the timer pump, and every derived read. It is
//! created fresh per user session and discarded when the session ends —
//! there is no persistence.
//!
//! The session is clock-free: callers pass session time as `now_ms`. There
//! must be exactly one logical mutator per session; multi-threaded hosts
//! wrap the session in a single lock so toggles, focus changes and timer
//! expiries never interleave.

use crate::catalog::Catalog;
use crate::primitives::CELEBRATION_DELAY_MS;
use crate::progress::ProgressionState;
use crate::status::{ComponentStatus, GuideStatus, StatusProjector};
use crate::timer::{PendingAdvance, TimerQueue};
use crate::types::{BuildStep, Component, GuideError, StepId};
use serde::{Deserialize, Serialize};

/// Outcome of a completion toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The step was marked complete; one advance timer was scheduled.
    Completed {
        /// Session time (milliseconds) at which the scheduled advance fires.
        fires_at: u64,
    },
    /// The step was un-marked; nothing was scheduled.
    Uncompleted,
}

/// Read-only copy of the session's mutable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideSnapshot {
    /// Completed step ids, ascending.
    pub completed: Vec<StepId>,
    /// The currently focused step.
    pub active: StepId,
    /// Whether a celebration window is open.
    pub celebrating: bool,
    /// Number of advance timers still pending.
    pub pending_advances: usize,
}

/// A guide session: catalog + progression state + timer queue.
#[derive(Debug, Clone)]
pub struct GuideSession {
    catalog: Catalog,
    state: ProgressionState,
    timers: TimerQueue,
}

impl Default for GuideSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GuideSession {
    /// Create a fresh session over the standard seven-step catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(Catalog::standard())
    }

    /// Create a fresh session over a custom catalog.
    #[must_use]
    pub fn with_catalog(catalog: Catalog) -> Self {
        let state = ProgressionState::new(catalog.step_count());
        Self {
            catalog,
            state,
            timers: TimerQueue::new(),
        }
    }

    /// The immutable step catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Direct read access to the progression state.
    #[must_use]
    pub fn state(&self) -> &ProgressionState {
        &self.state
    }

    /// Read-only copy of the mutable state.
    #[must_use]
    pub fn snapshot(&self) -> GuideSnapshot {
        GuideSnapshot {
            completed: self.state.completed.iter().copied().collect(),
            active: self.state.active,
            celebrating: self.state.celebrating,
            pending_advances: self.timers.len(),
        }
    }

    // =========================================================================
    // MUTATORS
    // =========================================================================

    /// Focus a step. Locked steps are a silent no-op (`Ok(false)`).
    ///
    /// # Errors
    ///
    /// Returns [`GuideError::StepOutOfRange`] for ids outside the catalog.
    pub fn set_active(&mut self, id: StepId) -> Result<bool, GuideError> {
        self.state.set_active(id)
    }

    /// Toggle a step's completion at session time `now_ms`.
    ///
    /// Marking complete opens the celebration window and schedules one
    /// advance timer at `now_ms + CELEBRATION_DELAY_MS`; the call returns
    /// immediately and the advancement happens later via [`advance_due`].
    /// Un-marking removes the step from the completed set and schedules
    /// nothing — pending timers from earlier completions are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`GuideError::StepOutOfRange`] for ids outside the catalog.
    ///
    /// [`advance_due`]: GuideSession::advance_due
    pub fn toggle_complete(
        &mut self,
        id: StepId,
        now_ms: u64,
    ) -> Result<ToggleOutcome, GuideError> {
        if self.state.is_complete(id) {
            self.state.uncomplete(id)?;
            return Ok(ToggleOutcome::Uncompleted);
        }

        self.state.complete(id)?;
        self.state.celebrating = true;
        let entry = self
            .timers
            .schedule(id, now_ms.saturating_add(CELEBRATION_DELAY_MS));
        Ok(ToggleOutcome::Completed {
            fires_at: entry.fires_at,
        })
    }

    /// Fire every timer due at `now_ms`. Returns the fired entries in
    /// application order.
    pub fn advance_due(&mut self, now_ms: u64) -> Vec<PendingAdvance> {
        self.timers.advance_due(&mut self.state, now_ms)
    }

    /// Number of advance timers still pending.
    #[must_use]
    pub fn pending_advances(&self) -> usize {
        self.timers.len()
    }

    // =========================================================================
    // DERIVED READS
    // =========================================================================

    /// Borrow a projector over this session's catalog and state.
    #[must_use]
    pub fn projector(&self) -> StatusProjector<'_> {
        StatusProjector::new(&self.catalog, &self.state)
    }

    /// Whether the step is in the completed set.
    #[must_use]
    pub fn is_complete(&self, id: StepId) -> bool {
        self.state.is_complete(id)
    }

    /// Whether the step is unreachable from the current completed set.
    #[must_use]
    pub fn is_locked(&self, id: StepId) -> bool {
        self.projector().is_locked(id)
    }

    /// Integer completion share, 0..=100.
    #[must_use]
    pub fn completion_percent(&self) -> u8 {
        self.projector().completion_percent()
    }

    /// Exact completion share in [0, 1].
    #[must_use]
    pub fn completion_ratio(&self) -> f64 {
        self.projector().completion_ratio()
    }

    /// True iff the power step is completed.
    #[must_use]
    pub fn powered_on(&self) -> bool {
        self.projector().powered_on()
    }

    /// True iff the final step is completed.
    #[must_use]
    pub fn data_flowing(&self) -> bool {
        self.projector().data_flowing()
    }

    /// Status of a single component's owning step.
    #[must_use]
    pub fn component_status(&self, component: Component) -> Option<ComponentStatus> {
        self.projector().component_status(component)
    }

    /// Full derived overview.
    #[must_use]
    pub fn status_overview(&self) -> GuideStatus {
        self.projector().overview()
    }

    /// Look up a catalog step by id.
    #[must_use]
    pub fn step(&self, id: StepId) -> Option<&BuildStep> {
        self.catalog.step(id)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_marks_and_celebrates_immediately() {
        let mut session = GuideSession::new();
        let outcome = session.toggle_complete(StepId(1), 0).expect("in range");

        assert_eq!(outcome, ToggleOutcome::Completed { fires_at: 700 });
        assert!(session.is_complete(StepId(1)));
        assert!(session.state().celebrating);
        // The advancement is asynchronous; active has not moved yet.
        assert_eq!(session.state().active, StepId(1));
        assert_eq!(session.pending_advances(), 1);
    }

    #[test]
    fn advance_fires_after_delay() {
        let mut session = GuideSession::new();
        session.toggle_complete(StepId(1), 0).expect("in range");

        assert!(session.advance_due(699).is_empty());
        let fired = session.advance_due(700);
        assert_eq!(fired.len(), 1);
        assert_eq!(session.state().active, StepId(2));
        assert!(!session.state().celebrating);
    }

    #[test]
    fn untoggle_schedules_nothing() {
        let mut session = GuideSession::new();
        session.toggle_complete(StepId(1), 0).expect("in range");
        session.advance_due(700);

        let outcome = session.toggle_complete(StepId(1), 1000).expect("in range");
        assert_eq!(outcome, ToggleOutcome::Uncompleted);
        assert!(!session.is_complete(StepId(1)));
        // Active pointer and celebration untouched by un-marking.
        assert_eq!(session.state().active, StepId(2));
        assert!(!session.state().celebrating);
        assert_eq!(session.pending_advances(), 0);
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut session = GuideSession::new();
        session.toggle_complete(StepId(1), 0).expect("in range");
        let snapshot = session.snapshot();

        assert_eq!(snapshot.completed, vec![StepId(1)]);
        assert_eq!(snapshot.active, StepId(1));
        assert!(snapshot.celebrating);
        assert_eq!(snapshot.pending_advances, 1);
    }
}
