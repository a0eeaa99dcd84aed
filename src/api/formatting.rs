//! Snapshot output formatting and serialization
//!
//! The dial shows distance, bearing and heading as text. This module turns a
//! [`NavigationSnapshot`] into those strings and into human-readable, JSON
//! and CSV records.

use crate::algorithms::{normalize_degrees, CompassPoint};
use crate::api::types::NavigationSnapshot;
use crate::core::KILOMETER_THRESHOLD_M;
use serde::{Deserialize, Serialize};

/// `"<N> m"` below one kilometer, `"<N.N> km"` from there on
pub fn format_distance(meters: f64) -> String {
    // Decide on the displayed value so 999.6 m never reads "1000 m"
    if meters.round() < KILOMETER_THRESHOLD_M {
        format!("{:.0} m", meters)
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

/// Whole degrees in [0, 360) with a degree sign
pub fn format_degrees(degrees: f64) -> String {
    // Round first so 359.6 reads as 0° rather than 360°
    format!("{:.0}°", normalize_degrees(degrees.round()))
}

/// Degrees plus the nearest 16-wind compass label, e.g. `"19° NNE"`
pub fn format_direction(degrees: f64) -> String {
    format!("{} {}", format_degrees(degrees), CompassPoint::from_degrees(degrees))
}

/// Text fields the dial displays, plus the raw values they came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedSnapshot {
    pub sequence_number: u64,
    pub latitude_deg: Option<f64>,
    pub longitude_deg: Option<f64>,
    pub heading_deg: f64,
    pub heading_text: String,
    pub bearing_deg: Option<f64>,
    pub bearing_text: Option<String>,
    pub distance_m: Option<f64>,
    pub distance_text: Option<String>,
    pub arrow_rotation_deg: Option<f64>,
    pub aligned: bool,
    pub pitch_deg: f64,
    pub roll_deg: f64,
    pub highlight_x_px: f64,
    pub highlight_y_px: f64,
}

/// Converts snapshots into [`FormattedSnapshot`] records
#[derive(Debug, Clone, Default)]
pub struct SnapshotFormatter;

impl SnapshotFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format(&self, snapshot: &NavigationSnapshot) -> FormattedSnapshot {
        let derived = snapshot.derived;
        FormattedSnapshot {
            sequence_number: snapshot.sequence_number,
            latitude_deg: snapshot.position.map(|p| p.lat),
            longitude_deg: snapshot.position.map(|p| p.lon),
            heading_deg: snapshot.heading,
            heading_text: format_direction(snapshot.heading),
            bearing_deg: derived.map(|d| d.bearing_to_target),
            bearing_text: derived.map(|d| format_direction(d.bearing_to_target)),
            distance_m: derived.map(|d| d.distance_meters),
            distance_text: derived.map(|d| format_distance(d.distance_meters)),
            arrow_rotation_deg: derived.map(|d| d.arrow_rotation),
            aligned: snapshot.is_aligned(),
            pitch_deg: snapshot.pitch,
            roll_deg: snapshot.roll,
            highlight_x_px: snapshot.highlight_px.0,
            highlight_y_px: snapshot.highlight_px.1,
        }
    }
}

/// Human-readable text formatter
#[derive(Debug, Clone, Default)]
pub struct TextFormatter {
    /// Single line instead of a block
    pub compact: bool,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compact() -> Self {
        Self { compact: true }
    }

    pub fn format_text(&self, formatted: &FormattedSnapshot) -> String {
        let distance = formatted.distance_text.as_deref().unwrap_or("--");
        let bearing = formatted.bearing_text.as_deref().unwrap_or("--");
        let marker = if formatted.aligned { " [ALIGNED]" } else { "" };

        if self.compact {
            return format!(
                "#{} Dist: {} | Brg: {} | Hdg: {}{}",
                formatted.sequence_number, distance, bearing, formatted.heading_text, marker
            );
        }

        let mut output = String::new();
        match (formatted.latitude_deg, formatted.longitude_deg) {
            (Some(lat), Some(lon)) => {
                output.push_str(&format!("Position:  {:.6}°, {:.6}°\n", lat, lon));
            }
            _ => output.push_str("Position:  waiting for fix\n"),
        }
        output.push_str(&format!("Distance:  {}\n", distance));
        output.push_str(&format!("Bearing:   {}\n", bearing));
        output.push_str(&format!("Heading:   {}\n", formatted.heading_text));
        if let Some(rotation) = formatted.arrow_rotation_deg {
            output.push_str(&format!("Arrow:     {:+.1}°{}\n", rotation, marker));
        }
        output.push_str(&format!(
            "Tilt:      pitch {:.1}°, roll {:.1}°\n",
            formatted.pitch_deg, formatted.roll_deg
        ));
        output.push_str(&format!(
            "Highlight: ({:.0}, {:.0}) px\n",
            formatted.highlight_x_px, formatted.highlight_y_px
        ));
        output
    }
}

/// JSON formatter for structured output
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn format_json(&self, formatted: &FormattedSnapshot) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(formatted)
        } else {
            serde_json::to_string(formatted)
        }
    }
}

/// CSV formatter for logging tracks
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    pub separator: char,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self { separator: ',' }
    }
}

impl CsvFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(&self) -> String {
        [
            "sequence", "latitude", "longitude", "heading", "bearing", "distance_m", "arrow_rotation",
            "aligned", "pitch", "roll", "highlight_x", "highlight_y",
        ]
        .join(&self.separator.to_string())
    }

    pub fn format_csv(&self, formatted: &FormattedSnapshot) -> String {
        let opt = |v: Option<f64>, precision: usize| {
            v.map(|x| format!("{:.*}", precision, x)).unwrap_or_default()
        };
        [
            formatted.sequence_number.to_string(),
            opt(formatted.latitude_deg, 6),
            opt(formatted.longitude_deg, 6),
            format!("{:.2}", formatted.heading_deg),
            opt(formatted.bearing_deg, 2),
            opt(formatted.distance_m, 1),
            opt(formatted.arrow_rotation_deg, 2),
            formatted.aligned.to_string(),
            format!("{:.2}", formatted.pitch_deg),
            format!("{:.2}", formatted.roll_deg),
            format!("{:.1}", formatted.highlight_x_px),
            format!("{:.1}", formatted.highlight_y_px),
        ]
        .join(&self.separator.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GeoPoint, HeadingReading};
    use crate::hardware::SensorUpdate;
    use crate::processing::NavigationTracker;

    fn london_snapshot() -> NavigationSnapshot {
        let mut tracker = NavigationTracker::default();
        tracker.apply(SensorUpdate::Location(GeoPoint::new(51.5007, -0.1246)));
        tracker.apply(SensorUpdate::Heading(HeadingReading::magnetic(18.0)))
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(999.0), "999 m");
        assert_eq!(format_distance(1000.0), "1.0 km");
        assert_eq!(format_distance(1500.0), "1.5 km");
        assert_eq!(format_distance(0.0), "0 m");
        assert_eq!(format_distance(12_202.38), "12.2 km");
    }

    #[test]
    fn test_format_distance_near_one_kilometer() {
        assert_eq!(format_distance(999.4), "999 m");
        assert_eq!(format_distance(999.5), "1.0 km");
        assert_eq!(format_distance(999.6), "1.0 km");
    }

    #[test]
    fn test_format_degrees() {
        assert_eq!(format_degrees(19.23), "19°");
        assert_eq!(format_degrees(359.6), "0°");
        assert_eq!(format_degrees(-90.0), "270°");
        assert_eq!(format_direction(19.23), "19° NNE");
    }

    #[test]
    fn test_snapshot_formatting() {
        let formatted = SnapshotFormatter::new().format(&london_snapshot());

        assert_eq!(formatted.distance_text.as_deref(), Some("12.2 km"));
        assert_eq!(formatted.bearing_text.as_deref(), Some("19° NNE"));
        assert_eq!(formatted.heading_text, "18° NNE");
        assert!(formatted.aligned);
        assert_eq!(formatted.sequence_number, 2);
    }

    #[test]
    fn test_text_output() {
        let formatted = SnapshotFormatter::new().format(&london_snapshot());

        let line = TextFormatter::compact().format_text(&formatted);
        assert_eq!(line, "#2 Dist: 12.2 km | Brg: 19° NNE | Hdg: 18° NNE [ALIGNED]");

        let block = TextFormatter::new().format_text(&formatted);
        assert!(block.contains("Distance:  12.2 km"));
        assert!(block.contains("Arrow:     +1.2° [ALIGNED]"));
        assert!(block.contains("Highlight: (150, 150) px"));
    }

    #[test]
    fn test_text_before_fix() {
        let mut tracker = NavigationTracker::default();
        let snap = tracker.apply(SensorUpdate::Heading(HeadingReading::magnetic(90.0)));
        let formatted = SnapshotFormatter::new().format(&snap);

        assert_eq!(
            TextFormatter::compact().format_text(&formatted),
            "#1 Dist: -- | Brg: -- | Hdg: 90° E"
        );
        assert!(TextFormatter::new().format_text(&formatted).contains("waiting for fix"));
    }

    #[test]
    fn test_json_output() {
        let formatted = SnapshotFormatter::new().format(&london_snapshot());
        let json = JsonFormatter::new().format_json(&formatted).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["distance_text"], "12.2 km");
        assert_eq!(value["aligned"], true);

        let pretty = JsonFormatter::pretty().format_json(&formatted).unwrap();
        assert!(pretty.contains('\n'));
        let parsed: FormattedSnapshot = serde_json::from_str(&pretty).unwrap();
        assert_eq!(parsed.bearing_text, formatted.bearing_text);
        assert_eq!(parsed.sequence_number, 2);
    }

    #[test]
    fn test_csv_output() {
        let csv = CsvFormatter::new();
        let formatted = SnapshotFormatter::new().format(&london_snapshot());
        let row = csv.format_csv(&formatted);

        assert_eq!(csv.header().split(',').count(), row.split(',').count());
        assert!(row.starts_with("2,51.500700,-0.124600,18.00,19.23,12202.4,"));
        assert!(row.contains(",true,"));
        assert!(row.ends_with(",150.0,150.0"));
    }
}
