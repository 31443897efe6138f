//! # Innate Primitives
//!
//! Hardcoded runtime constants for the SproutLab progression engine.
//!
//! The guide starts with zero progress but fixed rules. These primitives
//! are compiled into the binary and are immutable at runtime.

/// Number of steps in the standard build catalog.
///
/// The catalog is fixed-size with dense 1-based ids; every engine operation
/// validates ids against this bound and rejects out-of-range ids loudly.
pub const STEP_COUNT: u8 = 7;

/// Delay between marking a step complete and auto-advancing to the next one.
///
/// - Marking a step complete enters the transient "celebrating" window.
/// - After exactly this delay the celebration flag clears and, unless the
///   completed step was the final one, the active pointer moves forward.
/// - Timers are one-shot, independent, non-coalescing and non-cancelling:
///   a new completion never cancels an older pending advance.
pub const CELEBRATION_DELAY_MS: u64 = 700;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_seven_steps() {
        assert_eq!(STEP_COUNT, 7);
    }

    #[test]
    fn celebration_delay_is_700ms() {
        assert_eq!(CELEBRATION_DELAY_MS, 700);
    }
}
