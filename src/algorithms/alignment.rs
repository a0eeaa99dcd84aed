//! Alignment predicate and the haptic arming state machine

use crate::core::DEFAULT_ALIGNMENT_TOLERANCE_DEG;
use serde::{Deserialize, Serialize};

use super::bearing::normalize_signed_degrees;

/// Whether the arrow points straight ahead within the default 5° cone
pub fn is_aligned(arrow_rotation: f64) -> bool {
    is_aligned_within(arrow_rotation, DEFAULT_ALIGNMENT_TOLERANCE_DEG)
}

/// Whether `|normalize(arrow_rotation)| < tolerance_deg`.
///
/// The comparison is strict and periodic in 360°, so accumulated full turns
/// never change the result.
pub fn is_aligned_within(arrow_rotation: f64, tolerance_deg: f64) -> bool {
    normalize_signed_degrees(arrow_rotation).abs() < tolerance_deg
}

/// True only on the false -> true transition of the alignment signal
pub fn alignment_edge_trigger(previous_aligned: bool, current_aligned: bool) -> bool {
    !previous_aligned && current_aligned
}

/// Haptic arming state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HapticState {
    /// Haptic may fire on the next alignment
    #[default]
    Armed,
    /// Haptic consumed; waits for alignment to be lost
    Fired,
}

/// Edge-triggered notifier: fires once per approach, re-arms on exit
#[derive(Debug, Clone, Default)]
pub struct AlignmentNotifier {
    previous_aligned: bool,
    state: HapticState,
    fire_count: u32,
}

impl AlignmentNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current alignment flag; returns true when the haptic should fire
    pub fn update(&mut self, aligned: bool) -> bool {
        let fire = alignment_edge_trigger(self.previous_aligned, aligned);
        self.previous_aligned = aligned;

        self.state = match (self.state, aligned) {
            (HapticState::Armed, true) => HapticState::Fired,
            (HapticState::Fired, false) => HapticState::Armed,
            (state, _) => state,
        };

        if fire {
            self.fire_count += 1;
        }
        fire
    }

    pub fn state(&self) -> HapticState {
        self.state
    }

    /// Number of times the notifier has fired since creation or reset
    pub fn fire_count(&self) -> u32 {
        self.fire_count
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_boundaries() {
        assert!(is_aligned(0.0));
        assert!(!is_aligned(5.0));
        assert!(is_aligned(4.99));
        assert!(is_aligned(-4.99));
        assert!(!is_aligned(-5.0));
        assert!(!is_aligned(180.0));
        assert!(!is_aligned(-180.0));
    }

    #[test]
    fn test_alignment_is_periodic() {
        assert!(!is_aligned(370.0));
        assert!(!is_aligned(10.0));
        assert!(is_aligned(362.0));
        assert!(is_aligned(-358.0));
        assert!(is_aligned(720.0));

        let mut x = -1080.0;
        while x <= 1080.0 {
            assert_eq!(is_aligned(x), is_aligned(x + 360.0), "mismatch at {}", x);
            x += 0.75;
        }
    }

    #[test]
    fn test_custom_tolerance() {
        assert!(is_aligned_within(9.0, 10.0));
        assert!(!is_aligned_within(9.0, 5.0));
        assert!(!is_aligned_within(0.0, 0.0));
    }

    #[test]
    fn test_nan_is_never_aligned() {
        assert!(!is_aligned(f64::NAN));
    }

    #[test]
    fn test_edge_trigger_truth_table() {
        assert!(alignment_edge_trigger(false, true));
        assert!(!alignment_edge_trigger(true, true));
        assert!(!alignment_edge_trigger(true, false));
        assert!(!alignment_edge_trigger(false, false));
    }

    #[test]
    fn test_notifier_fires_once_per_approach() {
        let mut notifier = AlignmentNotifier::new();
        assert_eq!(notifier.state(), HapticState::Armed);

        let fired: Vec<bool> = [false, true, true, true, false, false, true, false]
            .into_iter()
            .map(|aligned| notifier.update(aligned))
            .collect();

        assert_eq!(fired, vec![false, true, false, false, false, false, true, false]);
        assert_eq!(notifier.fire_count(), 2);
        assert_eq!(notifier.state(), HapticState::Armed);
    }

    #[test]
    fn test_notifier_states() {
        let mut notifier = AlignmentNotifier::new();
        notifier.update(true);
        assert_eq!(notifier.state(), HapticState::Fired);
        notifier.update(true);
        assert_eq!(notifier.state(), HapticState::Fired);
        notifier.update(false);
        assert_eq!(notifier.state(), HapticState::Armed);

        notifier.update(true);
        notifier.reset();
        assert_eq!(notifier.state(), HapticState::Armed);
        assert_eq!(notifier.fire_count(), 0);
    }
}
