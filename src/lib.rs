//! Stadium Compass
//!
//! Points a compass-style dial at a fixed stadium using the device's
//! location and orientation sensors: great-circle bearing and distance to
//! the target, arrow rotation against the device heading, an alignment
//! predicate with edge-triggered haptics, and tilt-driven highlight offsets.

pub mod core;
pub mod algorithms;
pub mod processing;
pub mod utils;
pub mod hardware;
pub mod api;

// Re-export commonly used types
pub use self::core::{DerivedState, DeviceState, GeoPoint, HeadingReading, STADIUM};
pub use algorithms::{
    alignment_edge_trigger, arrow_rotation, compute_bearing_and_distance, is_aligned, is_aligned_within,
    AlignmentNotifier, BearingEngine, CompassPoint, HapticState, HighlightOffset, TiltMapper,
};
pub use processing::NavigationTracker;
pub use hardware::{
    AuthorizationStatus, LocationProvider, MockLocationProvider, MockMotionProvider, MotionProvider,
    SensorError, SensorUpdate,
};
pub use api::{
    format_distance, AlignmentEvent, ApiError, ApiResult, CallbackNavigationApi, JsonFormatter,
    NavigationSnapshot, SnapshotFormatter, TextFormatter, UpdateLoop, UpdateSender,
};
pub use utils::{AppConfig, AppConfigBuilder, ConfigError, ConfigurationManager};
