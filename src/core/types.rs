//! Core data types for the pointing engine

use serde::{Deserialize, Serialize};

/// Geodetic position in degrees (WGS84)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Latitude within [-90, 90] and longitude within [-180, 180]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Raw compass reading as delivered by a location provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadingReading {
    /// Magnetic heading (degrees)
    pub magnetic: f64,
    /// True heading (degrees); negative or missing means unavailable
    pub true_heading: Option<f64>,
}

impl HeadingReading {
    pub fn magnetic(magnetic: f64) -> Self {
        Self { magnetic, true_heading: None }
    }

    pub fn with_true_heading(mut self, true_heading: f64) -> Self {
        self.true_heading = Some(true_heading);
        self
    }

    /// True heading when the platform has one, magnetic otherwise
    pub fn resolve(&self) -> f64 {
        match self.true_heading {
            Some(t) if t >= 0.0 => t,
            _ => self.magnetic,
        }
    }
}

/// Last known sensor state of the device
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceState {
    /// Last fix; absent until the first one arrives
    pub position: Option<GeoPoint>,
    /// Heading in degrees [0, 360)
    pub heading: f64,
    /// Tilt about the lateral axis (degrees)
    pub pitch: f64,
    /// Tilt about the forward axis (degrees)
    pub roll: f64,
}

/// Values recomputed from `DeviceState` after every update
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedState {
    /// Initial great-circle bearing to the target, [0, 360)
    pub bearing_to_target: f64,
    /// Great-circle distance to the target (meters)
    pub distance_meters: f64,
    /// `bearing_to_target - heading`, unnormalized
    pub arrow_rotation: f64,
    pub is_aligned: bool,
}
