//! Tilt-to-highlight mapping for the pseudo-3D dial
//!
//! Pitch and roll shift a specular highlight across the dial face. The
//! result is cosmetic and never feeds back into the bearing computation.

use crate::core::{DEFAULT_SURFACE_SIZE_PX, DEFAULT_TILT_GAIN};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Highlight position in unit-surface coordinates ([0, 1] on both axes)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighlightOffset {
    pub x: f64,
    pub y: f64,
}

impl Default for HighlightOffset {
    fn default() -> Self {
        Self { x: 0.5, y: 0.5 }
    }
}

impl HighlightOffset {
    /// Scale to pixel coordinates on a surface of the given size
    pub fn to_surface(&self, width: f64, height: f64) -> (f64, f64) {
        (self.x * width, self.y * height)
    }
}

/// Maps device tilt to highlight offsets on a surface of known size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltMapper {
    base: Vector2<f64>,
    gain: f64,
    /// Surface width and height (pixels)
    surface: Vector2<f64>,
}

impl Default for TiltMapper {
    fn default() -> Self {
        Self::new(DEFAULT_TILT_GAIN)
    }
}

impl TiltMapper {
    pub fn new(gain: f64) -> Self {
        Self {
            base: Vector2::new(0.5, 0.5),
            gain,
            surface: Vector2::new(DEFAULT_SURFACE_SIZE_PX, DEFAULT_SURFACE_SIZE_PX),
        }
    }

    pub fn with_surface(mut self, width: f64, height: f64) -> Self {
        self.surface = Vector2::new(width, height);
        self
    }

    pub fn surface(&self) -> (f64, f64) {
        (self.surface.x, self.surface.y)
    }

    pub fn with_base(mut self, x: f64, y: f64) -> Self {
        self.base = Vector2::new(x, y);
        self
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// `x = base_x - roll * k`, `y = base_y - pitch * k`, clamped to the surface
    pub fn highlight(&self, pitch_deg: f64, roll_deg: f64) -> HighlightOffset {
        let shifted = self.base - Vector2::new(roll_deg, pitch_deg) * self.gain;
        let clamped = shifted.map(|v| v.clamp(0.0, 1.0));
        HighlightOffset {
            x: clamped.x,
            y: clamped.y,
        }
    }

    /// Highlight position in pixels on the configured surface
    pub fn highlight_px(&self, offset: &HighlightOffset) -> (f64, f64) {
        offset.to_surface(self.surface.x, self.surface.y)
    }
}

/// Convert a motion-provider angle from radians to degrees
pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_device_is_centered() {
        let mapper = TiltMapper::default();
        assert_eq!(mapper.highlight(0.0, 0.0), HighlightOffset::default());
    }

    #[test]
    fn test_tilt_shifts_highlight() {
        let mapper = TiltMapper::new(0.0025);
        let offset = mapper.highlight(20.0, -40.0);

        assert!((offset.x - 0.6).abs() < 1e-12);
        assert!((offset.y - 0.45).abs() < 1e-12);
    }

    #[test]
    fn test_highlight_stays_on_surface() {
        let mapper = TiltMapper::new(0.003);
        let offset = mapper.highlight(-900.0, 900.0);

        assert_eq!(offset.x, 0.0);
        assert_eq!(offset.y, 1.0);
        assert_eq!(offset.to_surface(300.0, 200.0), (0.0, 200.0));
    }

    #[test]
    fn test_custom_base() {
        let offset = TiltMapper::new(0.002).with_base(0.3, 0.2).highlight(0.0, 0.0);
        assert!((offset.x - 0.3).abs() < 1e-12);
        assert!((offset.y - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_highlight_in_pixels() {
        let mapper = TiltMapper::new(0.0025).with_surface(400.0, 200.0);
        assert_eq!(mapper.surface(), (400.0, 200.0));

        let centered = mapper.highlight(0.0, 0.0);
        assert_eq!(mapper.highlight_px(&centered), (200.0, 100.0));

        let shifted = mapper.highlight(20.0, -40.0);
        let (x, y) = mapper.highlight_px(&shifted);
        assert!((x - 240.0).abs() < 1e-9);
        assert!((y - 90.0).abs() < 1e-9);

        assert_eq!(TiltMapper::default().surface(), (300.0, 300.0));
    }

    #[test]
    fn test_radians_to_degrees() {
        assert!((radians_to_degrees(std::f64::consts::FRAC_PI_2) - 90.0).abs() < 1e-12);
        assert!((radians_to_degrees(-std::f64::consts::PI) + 180.0).abs() < 1e-12);
    }
}
