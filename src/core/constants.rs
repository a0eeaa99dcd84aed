//! Physical constants and application parameters

use super::types::GeoPoint;

/// Mean Earth radius for the spherical model (meters)
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// The stadium the dial points at (Tottenham Hotspur Stadium, London)
pub const STADIUM: GeoPoint = GeoPoint::new(51.6043, -0.0664);

/// Default half-width of the alignment cone (degrees)
pub const DEFAULT_ALIGNMENT_TOLERANCE_DEG: f64 = 5.0;

/// Default tilt-to-highlight gain (surface units per degree)
pub const DEFAULT_TILT_GAIN: f64 = 0.0025;

/// Default motion sampling interval (milliseconds, ~10 Hz)
pub const DEFAULT_MOTION_INTERVAL_MS: u64 = 100;

/// Distances at or above this are shown in kilometers
pub const KILOMETER_THRESHOLD_M: f64 = 1000.0;

/// Default dial surface edge length (pixels)
pub const DEFAULT_SURFACE_SIZE_PX: f64 = 300.0;
