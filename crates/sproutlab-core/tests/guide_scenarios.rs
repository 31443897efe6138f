//! Scenario tests for the build-guide progression engine.
//!
//! Each test drives a full user-visible scenario through `GuideSession`
//! with explicit session time, covering accessibility gating, the
//! celebrate-then-advance hand-off, and the deliberate leniencies.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic, clippy::float_arithmetic)]

use sproutlab_core::{
    CELEBRATION_DELAY_MS, Component, GuideError, GuideSession, STEP_COUNT, StepId, ToggleOutcome,
};

/// Complete steps `1..=upto` in order, firing each timer before the next
/// toggle. Returns the session and the final session time.
fn build_in_order(upto: u8) -> (GuideSession, u64) {
    let mut session = GuideSession::new();
    let mut now = 0u64;
    for id in 1..=upto {
        session.toggle_complete(StepId(id), now).unwrap();
        now += CELEBRATION_DELAY_MS;
        session.advance_due(now);
    }
    (session, now)
}

// =============================================================================
// ACCESSIBILITY
// =============================================================================

#[test]
fn accessibility_law_holds_for_every_id() {
    let (session, _) = build_in_order(3);
    let state = session.state();

    for id in 1..=STEP_COUNT {
        let step = StepId(id);
        let expected = id == 1 || state.is_complete(StepId(id - 1));
        assert_eq!(state.can_access(step), expected, "step {id}");
    }
}

#[test]
fn locked_set_active_leaves_focus_unchanged() {
    let mut session = GuideSession::new();
    let changed = session.set_active(StepId(5)).unwrap();
    assert!(!changed);
    assert_eq!(session.state().active, StepId(1));
}

#[test]
fn set_active_twice_equals_once() {
    let (mut session, _) = build_in_order(1);
    session.set_active(StepId(2)).unwrap();
    let once = session.snapshot();
    session.set_active(StepId(2)).unwrap();
    assert_eq!(session.snapshot(), once);
}

// =============================================================================
// TOGGLE + TIMER HAND-OFF
// =============================================================================

#[test]
fn completion_celebrates_then_advances() {
    let mut session = GuideSession::new();
    let outcome = session.toggle_complete(StepId(1), 100).unwrap();
    assert_eq!(
        outcome,
        ToggleOutcome::Completed {
            fires_at: 100 + CELEBRATION_DELAY_MS
        }
    );

    // Immediately: completed and celebrating, not yet advanced.
    assert!(session.is_complete(StepId(1)));
    assert!(session.state().celebrating);
    assert_eq!(session.state().active, StepId(1));

    // After the fixed delay: celebration over, focus moved forward.
    session.advance_due(100 + CELEBRATION_DELAY_MS);
    assert!(!session.state().celebrating);
    assert_eq!(session.state().active, StepId(2));
}

#[test]
fn completing_final_step_does_not_advance() {
    let (mut session, now) = build_in_order(6);
    session.set_active(StepId(7)).unwrap();
    session.toggle_complete(StepId(7), now).unwrap();
    session.advance_due(now + CELEBRATION_DELAY_MS);

    assert_eq!(session.state().active, StepId(7));
    assert!(!session.state().celebrating);
    assert!(session.data_flowing());
}

#[test]
fn overlapping_toggles_keep_independent_timers() {
    let mut session = GuideSession::new();

    // toggle(1), then toggle(2) before step 1's timer fires.
    session.toggle_complete(StepId(1), 0).unwrap();
    session.toggle_complete(StepId(2), 300).unwrap();
    assert_eq!(session.pending_advances(), 2);

    // Both timers eventually fire.
    session.advance_due(CELEBRATION_DELAY_MS);
    session.advance_due(300 + CELEBRATION_DELAY_MS);

    let snapshot = session.snapshot();
    assert_eq!(snapshot.completed, vec![StepId(1), StepId(2)]);
    assert_eq!(snapshot.active, StepId(3));
    assert!(!snapshot.celebrating);
    assert_eq!(snapshot.pending_advances, 0);
}

#[test]
fn untoggle_leaves_active_and_celebration_untouched() {
    let (mut session, now) = build_in_order(3);
    let before = session.snapshot();

    let outcome = session.toggle_complete(StepId(2), now).unwrap();
    assert_eq!(outcome, ToggleOutcome::Uncompleted);

    let after = session.snapshot();
    assert_eq!(after.active, before.active);
    assert_eq!(after.celebrating, before.celebrating);
    assert_eq!(after.pending_advances, 0);
    assert!(!session.is_complete(StepId(2)));
}

// =============================================================================
// DERIVED STATUS
// =============================================================================

#[test]
fn completion_ratio_is_exact() {
    let (session, _) = build_in_order(3);
    assert_eq!(session.completion_ratio(), 3.0 / 7.0);
    assert_eq!(session.completion_percent(), 43);
}

#[test]
fn powered_on_flips_exactly_at_step_six() {
    let (session, _) = build_in_order(5);
    assert!(!session.powered_on());

    let (session, _) = build_in_order(6);
    assert!(session.powered_on());
    assert!(!session.data_flowing());
}

#[test]
fn data_flowing_requires_the_full_build() {
    let (session, _) = build_in_order(6);
    assert!(!session.data_flowing());

    let (session, _) = build_in_order(7);
    assert!(session.data_flowing());
    assert_eq!(session.completion_percent(), 100);
}

#[test]
fn component_status_resolves_through_catalog() {
    let (session, _) = build_in_order(2);
    let camera = session.component_status(Component::Camera).unwrap();
    assert!(camera.is_active, "auto-advance focused step 3");
    assert!(!camera.is_done);
    assert!(!camera.is_locked);

    let power = session.component_status(Component::Power).unwrap();
    assert!(power.is_locked);
}

// =============================================================================
// LENIENCIES
// =============================================================================

#[test]
fn uncompleting_early_step_strands_later_completions() {
    let (mut session, now) = build_in_order(4);
    session.toggle_complete(StepId(2), now).unwrap();

    // Steps 3 and 4 stay completed but are locked from a fresh-access
    // standpoint; active is not clamped.
    assert!(session.is_complete(StepId(3)));
    assert!(session.is_complete(StepId(4)));
    assert!(session.is_locked(StepId(3)));
    assert_eq!(session.state().active, StepId(5));
    assert_eq!(session.completion_ratio(), 3.0 / 7.0);
}

#[test]
fn out_of_range_ids_are_contract_violations() {
    let mut session = GuideSession::new();
    assert!(matches!(
        session.toggle_complete(StepId(0), 0),
        Err(GuideError::StepOutOfRange(_))
    ));
    assert!(matches!(
        session.toggle_complete(StepId(STEP_COUNT + 1), 0),
        Err(GuideError::StepOutOfRange(_))
    ));
    assert!(matches!(
        session.set_active(StepId(255)),
        Err(GuideError::StepOutOfRange(_))
    ));
}
