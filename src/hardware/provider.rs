//! Sensor provider traits

use crate::hardware::{SensorResult, SensorUpdate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Runtime permission state for location access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthorizationStatus {
    /// The user has not been asked yet
    NotDetermined,
    /// Access granted while the app is in use
    Authorized,
    /// The user refused access
    Denied,
}

impl AuthorizationStatus {
    pub fn is_authorized(&self) -> bool {
        matches!(self, AuthorizationStatus::Authorized)
    }
}

/// Source of position fixes and compass headings
pub trait LocationProvider {
    /// Ask for runtime permission; must be called before the first poll
    fn request_authorization(&mut self) -> SensorResult<AuthorizationStatus>;

    fn authorization_status(&self) -> AuthorizationStatus;

    /// Returns Ok(Some(update)) when a fix or heading is available,
    /// Ok(None) when nothing new arrived since the last poll
    fn poll(&mut self) -> SensorResult<Option<SensorUpdate>>;
}

/// Source of device attitude at a fixed sampling interval
pub trait MotionProvider {
    fn sample_interval(&self) -> Duration;

    /// Returns the next attitude sample, or Ok(None) when none is pending
    fn poll(&mut self) -> SensorResult<Option<SensorUpdate>>;
}
