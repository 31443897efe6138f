//! # Progression State
//!
//! The mutable per-session progression record and its accessibility rules.
//!
//! `ProgressionState` is an explicit owned struct created fresh per session
//! (never ambient static state), mutated only through the engine operations
//! and discarded when the session ends. No persistence.
//!
//! ## Accessibility invariant
//!
//! Step `id` is accessible iff `id == 1` or `id - 1` is completed. The
//! active pointer is only ever moved to an accessible step by [`set_active`];
//! un-completing an early step deliberately does NOT clamp the pointer or
//! cascade-revoke later completions.
//!
//! [`set_active`]: ProgressionState::set_active

use crate::types::{FIRST_STEP, GuideError, StepId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Mutable progression record for one guide session.
///
/// Uses `BTreeSet` for deterministic ordering of the completed set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionState {
    /// Ids the user has confirmed as built. Unordered, grows on completion
    /// and shrinks only via explicit un-complete.
    pub completed: BTreeSet<StepId>,
    /// The single step currently expanded/focused.
    pub active: StepId,
    /// Transient flag, true only inside the post-completion delay window.
    pub celebrating: bool,
    /// Catalog size this state is bound to; ids are validated against it.
    step_count: u8,
}

impl ProgressionState {
    /// Create a fresh state: nothing completed, step 1 focused, no
    /// celebration in flight.
    #[must_use]
    pub fn new(step_count: u8) -> Self {
        Self {
            completed: BTreeSet::new(),
            active: FIRST_STEP,
            celebrating: false,
            step_count,
        }
    }

    /// The catalog size this state validates ids against.
    #[must_use]
    pub fn step_count(&self) -> u8 {
        self.step_count
    }

    /// Check whether a step is reachable: the first step always is, every
    /// other step requires its predecessor to be completed.
    #[must_use]
    pub fn can_access(&self, id: StepId) -> bool {
        match id.predecessor() {
            None => id == FIRST_STEP,
            Some(previous) => self.completed.contains(&previous),
        }
    }

    /// Check whether a step has been confirmed as built.
    #[must_use]
    pub fn is_complete(&self, id: StepId) -> bool {
        self.completed.contains(&id)
    }

    /// Focus a step.
    ///
    /// Locked steps are a silent no-op (`Ok(false)`): the engine must never
    /// unlock a step as a side effect of focusing it. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`GuideError::StepOutOfRange`] for ids outside the catalog;
    /// that is a contract violation, not a gating outcome.
    pub fn set_active(&mut self, id: StepId) -> Result<bool, GuideError> {
        self.ensure_in_range(id)?;
        if !self.can_access(id) {
            return Ok(false);
        }
        self.active = id;
        Ok(true)
    }

    /// Insert a step into the completed set. Returns `false` if it was
    /// already completed.
    ///
    /// Accessibility is deliberately not re-validated here: the rendering
    /// layer only offers the toggle from a reachable step, and the engine
    /// mirrors that lenient contract.
    ///
    /// # Errors
    ///
    /// Returns [`GuideError::StepOutOfRange`] for ids outside the catalog.
    pub fn complete(&mut self, id: StepId) -> Result<bool, GuideError> {
        self.ensure_in_range(id)?;
        Ok(self.completed.insert(id))
    }

    /// Remove a step from the completed set. Returns `false` if it was not
    /// completed.
    ///
    /// Later completions stay in place and the active pointer is not
    /// clamped, even if this removal re-locks them.
    ///
    /// # Errors
    ///
    /// Returns [`GuideError::StepOutOfRange`] for ids outside the catalog.
    pub fn uncomplete(&mut self, id: StepId) -> Result<bool, GuideError> {
        self.ensure_in_range(id)?;
        Ok(self.completed.remove(&id))
    }

    fn ensure_in_range(&self, id: StepId) -> Result<(), GuideError> {
        if id.in_range(self.step_count) {
            Ok(())
        } else {
            Err(GuideError::StepOutOfRange(id))
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
