//! Great-circle bearing and distance to the target
//!
//! Everything here is a pure function of its inputs. Bearings are measured
//! clockwise from true north, distances on a spherical Earth of radius
//! [`EARTH_RADIUS_M`], which is well inside GPS-fix precision at city scale.

use crate::core::{
    DerivedState, DeviceState, GeoPoint, DEFAULT_ALIGNMENT_TOLERANCE_DEG, EARTH_RADIUS_M, STADIUM,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use super::alignment::is_aligned_within;

/// Fold any angle into [0, 360)
pub fn normalize_degrees(degrees: f64) -> f64 {
    let folded = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0
    if folded >= 360.0 {
        0.0
    } else {
        folded
    }
}

/// Fold any angle into (-180, 180]
pub fn normalize_signed_degrees(degrees: f64) -> f64 {
    let folded = (degrees + 180.0).rem_euclid(360.0) - 180.0;
    if folded <= -180.0 {
        180.0
    } else {
        folded
    }
}

/// Initial bearing (degrees, [0, 360)) and haversine distance (meters)
/// from `current` to `target`.
///
/// Coincident points give bearing 0 and distance 0.
pub fn compute_bearing_and_distance(current: GeoPoint, target: GeoPoint) -> (f64, f64) {
    let lat1 = current.lat.to_radians();
    let lat2 = target.lat.to_radians();
    let delta_lat = lat2 - lat1;
    let delta_lon = (target.lon - current.lon).to_radians();

    let y = delta_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();
    let bearing = normalize_degrees(y.atan2(x).to_degrees() + 360.0);

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    // Clamp guards sqrt(1 - a) against a drifting a hair above 1 for antipodes
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    (bearing, EARTH_RADIUS_M * c)
}

/// Rotation to apply to the dial arrow; deliberately unnormalized
pub fn arrow_rotation(bearing: f64, heading: f64) -> f64 {
    bearing - heading
}

/// Sixteen-wind compass rose label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display)]
pub enum CompassPoint {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

impl CompassPoint {
    /// Nearest of the 16 points for an angle in degrees
    pub fn from_degrees(degrees: f64) -> Self {
        let idx = (normalize_degrees(degrees) / 22.5 + 0.5).floor() as usize % 16;
        Self::iter().nth(idx).unwrap_or(CompassPoint::N)
    }

    /// Center angle of this point (degrees)
    pub fn degrees(&self) -> f64 {
        *self as usize as f64 * 22.5
    }
}

/// Bearing engine bound to a fixed target and alignment tolerance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BearingEngine {
    target: GeoPoint,
    tolerance_deg: f64,
}

impl Default for BearingEngine {
    fn default() -> Self {
        Self::new(STADIUM)
    }
}

impl BearingEngine {
    pub fn new(target: GeoPoint) -> Self {
        Self {
            target,
            tolerance_deg: DEFAULT_ALIGNMENT_TOLERANCE_DEG,
        }
    }

    pub fn with_tolerance(mut self, tolerance_deg: f64) -> Self {
        self.tolerance_deg = tolerance_deg;
        self
    }

    pub fn target(&self) -> GeoPoint {
        self.target
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance_deg
    }

    /// Full recompute of the derived values; `None` until a fix exists
    pub fn derive(&self, device: &DeviceState) -> Option<DerivedState> {
        let position = device.position?;
        let (bearing, distance) = compute_bearing_and_distance(position, self.target);
        let rotation = arrow_rotation(bearing, device.heading);

        Some(DerivedState {
            bearing_to_target: bearing,
            distance_meters: distance,
            arrow_rotation: rotation,
            is_aligned: is_aligned_within(rotation, self.tolerance_deg),
        })
    }
}
