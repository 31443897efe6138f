//! # Derived Status Projection
//!
//! Pure reads over the authoritative progression state, for consumption by
//! any rendering layer.
//!
//! The projector exists so the engine never needs to know about rendering
//! concerns. Everything here is recomputed on every read — no cache, no
//! invalidation bugs; the catalog holds at most seven steps, so each read
//! is a trivial O(N) scan.

use crate::catalog::Catalog;
use crate::progress::ProgressionState;
use crate::types::{Component, StepId};
use serde::{Deserialize, Serialize};

/// Render-facing status of a single sub-assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentStatus {
    /// The owning step is currently focused.
    pub is_active: bool,
    /// The owning step is completed.
    pub is_done: bool,
    /// The owning step is not reachable from the current completed set.
    pub is_locked: bool,
}

/// Aggregated derived status of the whole build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideStatus {
    /// Integer completion share, 0..=100.
    pub completion_percent: u8,
    /// Exact completion share, `|completed| / N` in [0, 1].
    pub completion_ratio: f64,
    /// The power step is completed — the lab is energized.
    pub powered_on: bool,
    /// The final step is completed — telemetry is flowing.
    pub data_flowing: bool,
    /// Per-component status, in catalog order.
    pub components: Vec<(Component, ComponentStatus)>,
}

/// Pure projector over `(catalog, state)`.
///
/// Cheap to construct; borrow one per read site.
#[derive(Debug, Clone, Copy)]
pub struct StatusProjector<'a> {
    catalog: &'a Catalog,
    state: &'a ProgressionState,
}

impl<'a> StatusProjector<'a> {
    /// Create a projector over the given catalog and state.
    #[must_use]
    pub fn new(catalog: &'a Catalog, state: &'a ProgressionState) -> Self {
        Self { catalog, state }
    }

    /// Whether the step is in the completed set.
    #[must_use]
    pub fn is_complete(&self, id: StepId) -> bool {
        self.state.is_complete(id)
    }

    /// Whether the step is unreachable from the current completed set.
    #[must_use]
    pub fn is_locked(&self, id: StepId) -> bool {
        !self.state.can_access(id)
    }

    /// Exact completion share in [0, 1].
    // Presentation-only value; it never flows back into state, so the
    // workspace float denial does not apply here.
    #[allow(clippy::float_arithmetic)]
    #[must_use]
    pub fn completion_ratio(&self) -> f64 {
        self.state.completed.len() as f64 / self.catalog.len() as f64
    }

    /// Integer completion share, 0..=100, rounded to the nearest point
    /// (3 of 7 steps displays as 43%). Integer math only.
    #[must_use]
    pub fn completion_percent(&self) -> u8 {
        let total = self.catalog.len();
        if total == 0 {
            return 0;
        }
        let scaled = self.state.completed.len().saturating_mul(200) + total;
        (scaled / (2 * total)) as u8
    }

    /// True iff the step tagged `power` is completed.
    #[must_use]
    pub fn powered_on(&self) -> bool {
        self.catalog
            .power_step()
            .is_some_and(|id| self.state.is_complete(id))
    }

    /// True iff the final catalog step is completed.
    #[must_use]
    pub fn data_flowing(&self) -> bool {
        self.state.is_complete(self.catalog.final_step())
    }

    /// Resolve a component tag to the status of its owning step.
    ///
    /// Returns `None` only when the component has no owning catalog entry.
    /// Never panics: the component list is exhaustively known.
    #[must_use]
    pub fn component_status(&self, component: Component) -> Option<ComponentStatus> {
        let step = self.catalog.step_for_component(component)?;
        Some(ComponentStatus {
            is_active: self.state.active == step.id,
            is_done: self.state.is_complete(step.id),
            is_locked: !self.state.can_access(step.id),
        })
    }

    /// Full derived overview, in catalog order.
    #[must_use]
    pub fn overview(&self) -> GuideStatus {
        let components = self
            .catalog
            .iter()
            .map(|step| {
                (
                    step.component,
                    ComponentStatus {
                        is_active: self.state.active == step.id,
                        is_done: self.state.is_complete(step.id),
                        is_locked: !self.state.can_access(step.id),
                    },
                )
            })
            .collect();

        GuideStatus {
            completion_percent: self.completion_percent(),
            completion_ratio: self.completion_ratio(),
            powered_on: self.powered_on(),
            data_flowing: self.data_flowing(),
            components,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (Catalog, ProgressionState) {
        let catalog = Catalog::standard();
        let state = ProgressionState::new(catalog.step_count());
        (catalog, state)
    }

    #[test]
    fn fresh_projection() {
        let (catalog, state) = fixture();
        let projector = StatusProjector::new(&catalog, &state);

        assert_eq!(projector.completion_percent(), 0);
        assert!(!projector.powered_on());
        assert!(!projector.data_flowing());
        assert!(!projector.is_locked(StepId(1)));
        assert!(projector.is_locked(StepId(2)));
    }

    #[test]
    #[allow(clippy::float_arithmetic)]
    fn ratio_is_exact() {
        let (catalog, mut state) = fixture();
        for id in 1..=3 {
            state.complete(StepId(id)).expect("in range");
        }
        let projector = StatusProjector::new(&catalog, &state);
        assert_eq!(projector.completion_ratio(), 3.0 / 7.0);
        assert_eq!(projector.completion_percent(), 43);
    }

    #[test]
    fn percent_rounds_to_nearest() {
        let (catalog, mut state) = fixture();
        let expected = [14, 29, 43, 57, 71, 86, 100];
        for id in 1..=7u8 {
            state.complete(StepId(id)).expect("in range");
            let projector = StatusProjector::new(&catalog, &state);
            assert_eq!(
                projector.completion_percent(),
                expected[usize::from(id) - 1],
                "{id} of 7 steps"
            );
        }
    }

    #[test]
    fn powered_on_tracks_power_step_only() {
        let (catalog, mut state) = fixture();
        for id in 1..=5 {
            state.complete(StepId(id)).expect("in range");
        }
        assert!(!StatusProjector::new(&catalog, &state).powered_on());

        state.complete(StepId(6)).expect("in range");
        let projector = StatusProjector::new(&catalog, &state);
        assert!(projector.powered_on());
        assert!(!projector.data_flowing());
    }

    #[test]
    fn data_flowing_requires_final_step() {
        let (catalog, mut state) = fixture();
        for id in 1..=7 {
            state.complete(StepId(id)).expect("in range");
        }
        let projector = StatusProjector::new(&catalog, &state);
        assert!(projector.data_flowing());
        assert_eq!(projector.completion_percent(), 100);
        assert_eq!(projector.completion_ratio(), 1.0);
    }

    #[test]
    fn component_status_reflects_active_and_locks() {
        let (catalog, mut state) = fixture();
        state.complete(StepId(1)).expect("in range");
        state.set_active(StepId(2)).expect("in range");

        let projector = StatusProjector::new(&catalog, &state);
        let brain = projector.component_status(Component::Brain).expect("brain");
        assert!(brain.is_active);
        assert!(!brain.is_done);
        assert!(!brain.is_locked);

        let camera = projector.component_status(Component::Camera).expect("camera");
        assert!(!camera.is_active);
        assert!(camera.is_locked);
    }

    #[test]
    fn overview_lists_all_components_in_order() {
        let (catalog, state) = fixture();
        let overview = StatusProjector::new(&catalog, &state).overview();
        let order: Vec<Component> = overview.components.iter().map(|(c, _)| *c).collect();
        assert_eq!(order.as_slice(), Component::all().as_slice());
    }
}
