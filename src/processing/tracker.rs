use crate::algorithms::{radians_to_degrees, BearingEngine, HighlightOffset, TiltMapper};
use crate::api::types::NavigationSnapshot;
use crate::core::{DerivedState, DeviceState};
use crate::hardware::SensorUpdate;

/// Owns the device state and recomputes the derived state after each update.
///
/// Every call to [`NavigationTracker::apply`] mutates `DeviceState` and then
/// performs one full recompute; nothing is patched incrementally and nothing
/// is computed lazily. Until the first fix the derived state stays `None`.
#[derive(Debug, Clone)]
pub struct NavigationTracker {
    engine: BearingEngine,
    tilt: TiltMapper,
    device: DeviceState,
    derived: Option<DerivedState>,
    highlight: HighlightOffset,
    sequence_number: u64,
}

impl Default for NavigationTracker {
    fn default() -> Self {
        Self::new(BearingEngine::default(), TiltMapper::default())
    }
}

impl NavigationTracker {
    pub fn new(engine: BearingEngine, tilt: TiltMapper) -> Self {
        Self {
            engine,
            tilt,
            device: DeviceState::default(),
            derived: None,
            highlight: HighlightOffset::default(),
            sequence_number: 0,
        }
    }

    /// Apply one sensor reading and recompute; returns the fresh snapshot
    pub fn apply(&mut self, update: SensorUpdate) -> NavigationSnapshot {
        match update {
            SensorUpdate::Location(point) => {
                if !point.is_valid() {
                    log::warn!("Out-of-range fix ({}, {}), using it anyway", point.lat, point.lon);
                }
                self.device.position = Some(point);
            }
            SensorUpdate::Heading(reading) => {
                self.device.heading = reading.resolve();
            }
            SensorUpdate::Attitude { pitch_radians, roll_radians } => {
                self.device.pitch = radians_to_degrees(pitch_radians);
                self.device.roll = radians_to_degrees(roll_radians);
            }
        }

        self.recompute();
        self.snapshot()
    }

    fn recompute(&mut self) {
        if let Some(derived) = self.engine.derive(&self.device) {
            log::debug!(
                "bearing {:.2} distance {:.1} rotation {:.2} aligned {}",
                derived.bearing_to_target,
                derived.distance_meters,
                derived.arrow_rotation,
                derived.is_aligned
            );
            self.derived = Some(derived);
        }
        self.highlight = self.tilt.highlight(self.device.pitch, self.device.roll);
        self.sequence_number += 1;
    }

    /// Read-only copy of the current state for the rendering layer
    pub fn snapshot(&self) -> NavigationSnapshot {
        NavigationSnapshot {
            position: self.device.position,
            heading: self.device.heading,
            pitch: self.device.pitch,
            roll: self.device.roll,
            derived: self.derived,
            highlight: self.highlight,
            highlight_px: self.tilt.highlight_px(&self.highlight),
            sequence_number: self.sequence_number,
        }
    }

    pub fn device(&self) -> &DeviceState {
        &self.device
    }

    pub fn derived(&self) -> Option<&DerivedState> {
        self.derived.as_ref()
    }

    pub fn engine(&self) -> &BearingEngine {
        &self.engine
    }

    /// Forget every reading, as if the app had just started
    pub fn reset(&mut self) {
        self.device = DeviceState::default();
        self.derived = None;
        self.highlight = HighlightOffset::default();
        self.sequence_number = 0;
    }
}
