//! # Transition Timer Queue
//!
//! Governs the timed hand-off from "step marked complete" to "next step
//! becomes active".
//!
//! The queue holds explicit one-shot entries instead of host timers so the
//! core stays clock-free: callers pass the current session time in
//! milliseconds, and expiry is a plain comparison. The app layer supplies
//! real time; tests supply whatever time they like.
//!
//! ## Semantics
//!
//! - One entry per completion event. Entries are independent,
//!   non-coalescing and non-cancelling: scheduling a new advance never
//!   removes an older pending one.
//! - On expiry (in `(fires_at, seq)` order) each entry clears the
//!   celebration flag and, unless its step was the final one, moves the
//!   active pointer to the step after it.

use crate::progress::ProgressionState;
use crate::types::StepId;
use serde::{Deserialize, Serialize};

/// One scheduled advancement, created by a completion toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAdvance {
    /// Monotonic scheduling sequence number; ties on `fires_at` resolve in
    /// scheduling order.
    pub seq: u64,
    /// Session time (milliseconds) at which this entry fires.
    pub fires_at: u64,
    /// The step whose completion scheduled this advance.
    pub step: StepId,
}

/// Queue of pending one-shot advancement timers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerQueue {
    entries: Vec<PendingAdvance>,
    next_seq: u64,
}

impl TimerQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an advance for `step`, firing at `fires_at`.
    ///
    /// Never cancels or coalesces with existing entries.
    pub fn schedule(&mut self, step: StepId, fires_at: u64) -> PendingAdvance {
        let entry = PendingAdvance {
            seq: self.next_seq,
            fires_at,
            step,
        };
        self.next_seq = self.next_seq.saturating_add(1);
        self.entries.push(entry);
        entry
    }

    /// Number of timers still pending.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no timer is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fire every entry due at `now_ms`, applying its effect to `state`.
    ///
    /// Entries are applied in `(fires_at, seq)` order; each one clears the
    /// celebration flag and advances the active pointer past its step when
    /// a successor exists. Returns the fired entries in application order.
    pub fn advance_due(&mut self, state: &mut ProgressionState, now_ms: u64) -> Vec<PendingAdvance> {
        let mut due: Vec<PendingAdvance> = self
            .entries
            .iter()
            .copied()
            .filter(|e| e.fires_at <= now_ms)
            .collect();
        if due.is_empty() {
            return due;
        }
        due.sort_by_key(|e| (e.fires_at, e.seq));
        self.entries.retain(|e| e.fires_at > now_ms);

        for entry in &due {
            state.celebrating = false;
            if let Some(next) = entry.step.successor(state.step_count()) {
                state.active = next;
            }
        }
        due
    }
}

// =============================================================================
// TESTS
// =============================================================================
