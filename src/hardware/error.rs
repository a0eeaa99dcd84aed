//! Sensor error types and handling

use thiserror::Error;

/// Failures reported by location and motion providers
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SensorError {
    /// The user has not (yet) granted location access
    #[error("Location access not authorized ({status:?})")]
    NotAuthorized { status: super::AuthorizationStatus },
    /// The sensor is missing or switched off on this device
    #[error("Sensor unavailable: {sensor}")]
    Unavailable { sensor: String },
    /// Platform-specific failure
    #[error("Sensor failure {code}: {description}")]
    Platform { code: u32, description: String },
}

/// Result type for sensor operations
pub type SensorResult<T> = Result<T, SensorError>;

impl SensorError {
    /// Whether polling again later can succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            SensorError::NotAuthorized { status } => {
                matches!(status, super::AuthorizationStatus::NotDetermined)
            }
            SensorError::Unavailable { .. } => false,
            SensorError::Platform { .. } => true,
        }
    }
}
