//! Sensor update processing

pub mod tracker;

pub use tracker::NavigationTracker;
