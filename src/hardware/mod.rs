//! Sensor abstraction layer
//!
//! This module describes what the location and motion providers deliver and
//! ships scripted mock providers for simulation and testing. Real platform
//! bindings implement the same traits and push [`SensorUpdate`]s into the
//! update loop.

pub mod provider;
pub mod mock;
pub mod error;

pub use provider::{AuthorizationStatus, LocationProvider, MotionProvider};
pub use mock::{MockLocationProvider, MockMotionProvider};
pub use error::{SensorError, SensorResult};

use crate::core::{GeoPoint, HeadingReading};
use serde::{Deserialize, Serialize};

/// A single reading from one of the providers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SensorUpdate {
    /// New position fix
    Location(GeoPoint),
    /// New compass heading
    Heading(HeadingReading),
    /// Device attitude as delivered by the motion provider (radians)
    Attitude { pitch_radians: f64, roll_radians: f64 },
}

impl SensorUpdate {
    pub fn attitude_degrees(pitch_deg: f64, roll_deg: f64) -> Self {
        SensorUpdate::Attitude {
            pitch_radians: pitch_deg.to_radians(),
            roll_radians: roll_deg.to_radians(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SensorUpdate::Location(_) => "location",
            SensorUpdate::Heading(_) => "heading",
            SensorUpdate::Attitude { .. } => "attitude",
        }
    }
}
