//! Scripted sensor providers for simulation and testing

use crate::core::{GeoPoint, HeadingReading, EARTH_RADIUS_M};
use crate::hardware::{
    AuthorizationStatus, LocationProvider, MotionProvider, SensorError, SensorResult, SensorUpdate,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::time::Duration;

/// Location provider replaying a queue of fixes and headings
pub struct MockLocationProvider {
    queue: VecDeque<SensorUpdate>,
    authorization: AuthorizationStatus,
    grant_on_request: bool,
    connected: bool,
    /// Standard jitter applied to fixes (meters) and headings (degrees)
    jitter: Option<(f64, f64)>,
    error_probability: f32,
    rng: StdRng,
    delivered: u32,
}

impl MockLocationProvider {
    /// Create a provider that grants permission when asked
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            authorization: AuthorizationStatus::NotDetermined,
            grant_on_request: true,
            connected: true,
            jitter: None,
            error_probability: 0.0,
            rng: StdRng::seed_from_u64(0),
            delivered: 0,
        }
    }

    /// A provider whose user refuses location access
    pub fn denying() -> Self {
        Self {
            grant_on_request: false,
            ..Self::new()
        }
    }

    /// Script a straight walk from `start` to `end` in `steps` fixes,
    /// each followed by a heading reading of `heading_deg`
    pub fn walk(start: GeoPoint, end: GeoPoint, steps: usize, heading_deg: f64) -> Self {
        let mut provider = Self::new();
        let steps = steps.max(1);
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            provider.push_fix(GeoPoint::new(
                start.lat + (end.lat - start.lat) * t,
                start.lon + (end.lon - start.lon) * t,
            ));
            provider.push_heading(HeadingReading::magnetic(heading_deg));
        }
        provider
    }

    /// Enable seeded uniform jitter on fixes and headings.
    /// Non-finite amplitudes are treated as zero.
    pub fn with_jitter(mut self, position_m: f64, heading_deg: f64, seed: u64) -> Self {
        let amplitude = |value: f64, what: &str| {
            if value.is_finite() {
                value.abs()
            } else {
                log::warn!("Ignoring non-finite {} jitter {}", what, value);
                0.0
            }
        };
        self.jitter = Some((amplitude(position_m, "position"), amplitude(heading_deg, "heading")));
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn push_fix(&mut self, point: GeoPoint) {
        self.queue.push_back(SensorUpdate::Location(point));
    }

    pub fn push_heading(&mut self, reading: HeadingReading) {
        self.queue.push_back(SensorUpdate::Heading(reading));
    }

    /// Enable error simulation with given probability (0.0 to 1.0)
    pub fn simulate_errors(&mut self, probability: f32) {
        self.error_probability = probability.clamp(0.0, 1.0);
    }

    /// Simulate the GPS being switched off
    pub fn disconnect(&mut self) {
        self.connected = false;
    }

    pub fn reconnect(&mut self) {
        self.connected = true;
    }

    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn delivered_count(&self) -> u32 {
        self.delivered
    }

    fn perturb(&mut self, update: SensorUpdate) -> SensorUpdate {
        let Some((position_m, heading_deg)) = self.jitter else {
            return update;
        };

        match update {
            SensorUpdate::Location(point) if position_m > 0.0 => {
                let north = self.rng.gen_range(-position_m..=position_m);
                let east = self.rng.gen_range(-position_m..=position_m);
                let dlat = (north / EARTH_RADIUS_M).to_degrees();
                let dlon = (east / (EARTH_RADIUS_M * point.lat.to_radians().cos())).to_degrees();
                SensorUpdate::Location(GeoPoint::new(point.lat + dlat, point.lon + dlon))
            }
            SensorUpdate::Heading(mut reading) if heading_deg > 0.0 => {
                let noise = self.rng.gen_range(-heading_deg..=heading_deg);
                reading.magnetic = (reading.magnetic + noise).rem_euclid(360.0);
                SensorUpdate::Heading(reading)
            }
            other => other,
        }
    }
}

impl Default for MockLocationProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationProvider for MockLocationProvider {
    fn request_authorization(&mut self) -> SensorResult<AuthorizationStatus> {
        if self.authorization == AuthorizationStatus::NotDetermined {
            self.authorization = if self.grant_on_request {
                AuthorizationStatus::Authorized
            } else {
                AuthorizationStatus::Denied
            };
        }
        Ok(self.authorization)
    }

    fn authorization_status(&self) -> AuthorizationStatus {
        self.authorization
    }

    fn poll(&mut self) -> SensorResult<Option<SensorUpdate>> {
        if !self.authorization.is_authorized() {
            return Err(SensorError::NotAuthorized {
                status: self.authorization,
            });
        }

        if !self.connected {
            return Err(SensorError::Unavailable {
                sensor: "location".to_string(),
            });
        }

        if self.error_probability > 0.0 && self.rng.gen::<f32>() < self.error_probability {
            return Err(SensorError::Platform {
                code: 1001,
                description: "Simulated location failure".to_string(),
            });
        }

        match self.queue.pop_front() {
            Some(update) => {
                self.delivered += 1;
                Ok(Some(self.perturb(update)))
            }
            None => Ok(None),
        }
    }
}

/// Motion provider replaying attitude samples (radians)
pub struct MockMotionProvider {
    samples: VecDeque<(f64, f64)>,
    interval: Duration,
    available: bool,
}

impl MockMotionProvider {
    pub fn new(interval: Duration) -> Self {
        Self {
            samples: VecDeque::new(),
            interval,
            available: true,
        }
    }

    /// A device without a gyroscope
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new(Duration::from_millis(crate::core::DEFAULT_MOTION_INTERVAL_MS))
        }
    }

    /// Script a gentle sway: `count` samples of a sine wave with the given
    /// amplitude in degrees
    pub fn sway(interval: Duration, count: usize, amplitude_deg: f64) -> Self {
        let mut provider = Self::new(interval);
        for i in 0..count {
            let phase = i as f64 * 0.3;
            provider.push_degrees(amplitude_deg * phase.sin(), amplitude_deg * 0.5 * phase.cos());
        }
        provider
    }

    pub fn push_radians(&mut self, pitch: f64, roll: f64) {
        self.samples.push_back((pitch, roll));
    }

    pub fn push_degrees(&mut self, pitch: f64, roll: f64) {
        self.push_radians(pitch.to_radians(), roll.to_radians());
    }

    pub fn is_exhausted(&self) -> bool {
        self.samples.is_empty()
    }
}

impl MotionProvider for MockMotionProvider {
    fn sample_interval(&self) -> Duration {
        self.interval
    }

    fn poll(&mut self) -> SensorResult<Option<SensorUpdate>> {
        if !self.available {
            return Err(SensorError::Unavailable {
                sensor: "motion".to_string(),
            });
        }

        Ok(self.samples.pop_front().map(|(pitch, roll)| SensorUpdate::Attitude {
            pitch_radians: pitch,
            roll_radians: roll,
        }))
    }
}
