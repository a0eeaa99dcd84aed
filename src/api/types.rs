//! Common API types and data structures

use crate::algorithms::HighlightOffset;
use crate::core::{DerivedState, GeoPoint};
use crate::hardware::SensorError;
use crate::utils::config::ConfigError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    /// The update loop has shut down and no longer accepts readings
    #[error("Update channel closed")]
    ChannelClosed,
    /// Unknown or already removed callback handle
    #[error("Invalid callback handle {handle}")]
    InvalidHandle { handle: u32 },
    /// The consumer thread panicked while processing updates
    #[error("Update loop thread panicked")]
    LoopPanicked,
    #[error("Failed to spawn update loop: {0}")]
    Spawn(#[from] std::io::Error),
    /// A provider refused or failed a request
    #[error(transparent)]
    Sensor(#[from] SensorError),
    /// Rejected configuration
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Read-only view of the navigation state handed to the rendering layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavigationSnapshot {
    pub position: Option<GeoPoint>,
    /// Heading in degrees
    pub heading: f64,
    /// Pitch in degrees
    pub pitch: f64,
    /// Roll in degrees
    pub roll: f64,
    /// `None` until the first fix arrives
    pub derived: Option<DerivedState>,
    pub highlight: HighlightOffset,
    /// Highlight position on the dial surface (pixels)
    pub highlight_px: (f64, f64),
    /// Number of recomputes so far
    pub sequence_number: u64,
}

impl NavigationSnapshot {
    pub fn is_aligned(&self) -> bool {
        self.derived.map(|d| d.is_aligned).unwrap_or(false)
    }
}

/// Haptic notification fired on the armed -> fired edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentEvent {
    /// Sequence number of the snapshot that triggered the haptic
    pub sequence_number: u64,
    pub bearing_to_target: f64,
    pub distance_meters: f64,
    /// Total haptics fired so far, this one included
    pub fire_count: u32,
}
