//! Bearing, alignment and tilt computations

pub mod bearing;
pub mod alignment;
pub mod tilt;

pub use bearing::{
    arrow_rotation, compute_bearing_and_distance, normalize_degrees, normalize_signed_degrees,
    BearingEngine, CompassPoint,
};
pub use alignment::{alignment_edge_trigger, is_aligned, is_aligned_within, AlignmentNotifier, HapticState};
pub use tilt::{radians_to_degrees, HighlightOffset, TiltMapper};
