//! Front-end facing API
//!
//! Snapshot and haptic callbacks, the channel-driven update loop that feeds
//! them, and text/JSON/CSV formatting of snapshots.

pub mod callback;
pub mod service;
pub mod types;
pub mod formatting;

// Re-export commonly used API types
pub use types::{AlignmentEvent, ApiError, ApiResult, NavigationSnapshot};
pub use callback::{
    ensure_location_access, CallbackHandle, CallbackNavigationApi, HapticCallback, SnapshotCallback,
};
pub use service::{UpdateLoop, UpdateSender};
pub use formatting::{
    format_degrees, format_direction, format_distance, CsvFormatter, FormattedSnapshot, JsonFormatter,
    SnapshotFormatter, TextFormatter,
};
