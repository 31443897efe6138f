//! # Step Catalog
//!
//! The ordered, immutable list of build steps.
//!
//! The catalog is defined at process start and never changes afterwards.
//! Its invariant: exactly [`STEP_COUNT`](crate::primitives::STEP_COUNT)
//! entries with dense 1-based ids and no duplicates. Ids define the total
//! build order; component tags double as the grouping key for derived
//! status lookups.

#[cfg(test)]
use crate::primitives::STEP_COUNT;
use crate::types::{BuildStep, Component, GuideError, StepId};

/// The ordered build-step catalog.
///
/// Constructed once per session via [`Catalog::standard`] (or, for custom
/// guides, [`Catalog::from_steps`] which enforces the density invariant).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    steps: Vec<BuildStep>,
}

impl Catalog {
    /// The standard seven-step SproutLab build guide.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            steps: vec![
                BuildStep::new(
                    1,
                    "Unbox Your Lab",
                    "Spread everything out! Organization is the first step of a great scientist.",
                    Component::Kit,
                    &[
                        "Find the ESP32 brain",
                        "Locate the sensors",
                        "Identify the mini-fan",
                        "Get your USB cable ready",
                    ],
                    "Ready! 📦",
                ),
                BuildStep::new(
                    2,
                    "Brain & Antenna",
                    "Give your lab its thinking power and Wi-Fi ears!",
                    Component::Brain,
                    &["Seat the CPU in mount", "Attach Wi-Fi antenna", "Ensure a firm click"],
                    "Brain Online! 🧠",
                ),
                BuildStep::new(
                    3,
                    "Smart Eye Cam",
                    "Let your AI see! The camera watches your plants grow.",
                    Component::Camera,
                    &["Connect ribbon cable", "Lock the camera tab", "Mount to bracket"],
                    "I Can See! 👁️",
                ),
                BuildStep::new(
                    4,
                    "Soil Senses",
                    "Connect the probe so your lab knows when to water.",
                    Component::Probe,
                    &["Connect JST cable", "Thread through baseplate", "Avoid touching tips"],
                    "Senses Active! 🌡️",
                ),
                BuildStep::new(
                    5,
                    "Breathing Fan",
                    "Plants need fresh air! Mount the fan to help them breathe.",
                    Component::Fan,
                    &["Check air arrows", "Connect to 5V Header", "Secure with screws"],
                    "Air Flowing! 💨",
                ),
                BuildStep::new(
                    6,
                    "Energize!",
                    "Plug it in and watch the lights come to life.",
                    Component::Power,
                    &["Plug USB-C cable", "Connect power brick", "Check status LED"],
                    "Power Up! ⚡",
                ),
                BuildStep::new(
                    7,
                    "Seed Launch",
                    "Plant your seed and start your AI growth journey.",
                    Component::Box,
                    &["Run diagnostic", "Add 50ml water", "Plant at 1cm depth"],
                    "Launched! 🚀",
                ),
            ],
        }
    }

    /// Build a catalog from explicit steps, validating the density invariant.
    ///
    /// # Errors
    ///
    /// Returns [`GuideError::MalformedCatalog`] if the list is empty or the
    /// ids are not exactly 1..=N in order.
    pub fn from_steps(steps: Vec<BuildStep>) -> Result<Self, GuideError> {
        if steps.is_empty() {
            return Err(GuideError::MalformedCatalog("catalog is empty".to_string()));
        }
        if steps.len() > usize::from(u8::MAX) {
            return Err(GuideError::MalformedCatalog(format!(
                "catalog has {} steps, more than a StepId can address",
                steps.len()
            )));
        }
        for (index, step) in steps.iter().enumerate() {
            let expected = StepId(index as u8 + 1);
            if step.id != expected {
                return Err(GuideError::MalformedCatalog(format!(
                    "step at position {} has id {}, expected {}",
                    index, step.id, expected
                )));
            }
        }
        Ok(Self { steps })
    }

    /// Number of steps in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// The catalog can never be empty; kept for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of steps as a `StepId` bound.
    #[must_use]
    pub fn step_count(&self) -> u8 {
        self.steps.len() as u8
    }

    /// Look up a step by id.
    #[must_use]
    pub fn step(&self, id: StepId) -> Option<&BuildStep> {
        if id.in_range(self.step_count()) {
            self.steps.get(usize::from(id.0) - 1)
        } else {
            None
        }
    }

    /// Resolve a component tag to its owning step.
    ///
    /// Returns `None` only if the component has no owning catalog entry;
    /// with the standard catalog every component resolves.
    #[must_use]
    pub fn step_for_component(&self, component: Component) -> Option<&BuildStep> {
        self.steps.iter().find(|s| s.component == component)
    }

    /// The step that energizes the lab (component tag `power`).
    #[must_use]
    pub fn power_step(&self) -> Option<StepId> {
        self.step_for_component(Component::Power).map(|s| s.id)
    }

    /// The final step of the build (data starts flowing once it completes).
    #[must_use]
    pub fn final_step(&self) -> StepId {
        StepId(self.step_count())
    }

    /// Iterate the steps in build order.
    pub fn iter(&self) -> std::slice::Iter<'_, BuildStep> {
        self.steps.iter()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a BuildStep;
    type IntoIter = std::slice::Iter<'a, BuildStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

// =============================================================================
// TESTS
// =============================================================================
