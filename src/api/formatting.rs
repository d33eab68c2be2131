//! Track update output formatting
//!
//! Turns `TrackUpdate`s into display-ready values and renders them as text,
//! JSON or CSV. Grid coordinates are shown split into whole kilometres and
//! the metre remainder, the way the values are read off a grid map.

use crate::api::types::TrackUpdate;
use crate::core::{GeodeticFix, PlanarCoordinates, TrackTotals};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::io;

/// Short human-readable description of an optional fix
pub fn describe_fix(fix: Option<&GeodeticFix>) -> String {
    match fix {
        Some(fix) => format!("({}, {})", fix.latitude_deg, fix.longitude_deg),
        None => "Unknown location".to_string(),
    }
}

/// One grid axis split into kilometres and metres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridAxis {
    /// Whole kilometres, truncated toward zero
    pub km: i64,
    /// Remainder in metres, same sign as the full value
    pub m: f64,
}

impl GridAxis {
    pub fn split(value_m: f64) -> Self {
        Self {
            km: (value_m / 1000.0).trunc() as i64,
            m: value_m % 1000.0,
        }
    }
}

/// Planar coordinates prepared for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridReading {
    pub north: GridAxis,
    pub east: GridAxis,
    pub height: GridAxis,
}

impl GridReading {
    pub fn from_point(point: &PlanarCoordinates) -> Self {
        Self {
            north: GridAxis::split(point.x),
            east: GridAxis::split(point.y),
            height: GridAxis::split(point.z),
        }
    }

    /// Height kilometre label; blank below one kilometre
    pub fn height_km_label(&self) -> String {
        if self.height.km > 0 {
            self.height.km.to_string()
        } else {
            String::new()
        }
    }
}

/// Quality values reported by the location source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityIndicators {
    pub accuracy_m: f32,
    pub vertical_accuracy_m: Option<f32>,
    pub speed_mps: f32,
    pub speed_accuracy_mps: Option<f32>,
    pub provider: String,
}

/// Timing information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingInfo {
    /// Fix timestamp (milliseconds since epoch)
    pub timestamp_ms: u64,
    /// Time of day, hh:mm:ss (UTC unless local time was requested)
    pub time_of_day: String,
    pub sequence_number: u32,
}

/// Display-ready track update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedUpdate {
    pub point: PlanarCoordinates,
    pub grid: GridReading,
    pub totals: TrackTotals,
    pub quality: QualityIndicators,
    pub timing: TimingInfo,
}

/// Builds `FormattedUpdate`s with values rounded to a fixed precision
pub struct UpdateFormatter {
    /// Decimal places kept for metre values
    pub precision: u8,
    /// Render the time of day in the local time zone instead of UTC
    pub local_time: bool,
}

impl Default for UpdateFormatter {
    fn default() -> Self {
        Self {
            precision: 2,
            local_time: false,
        }
    }
}

impl UpdateFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_local_time(mut self, local_time: bool) -> Self {
        self.local_time = local_time;
        self
    }

    pub fn format(&self, update: &TrackUpdate) -> FormattedUpdate {
        let point = PlanarCoordinates::new(
            self.round_to_precision(update.point.x),
            self.round_to_precision(update.point.y),
            self.round_to_precision(update.point.z),
        );

        // Split the unrounded value; remainders are clamped below a full kilometre
        let raw = GridReading::from_point(&update.point);
        let grid = GridReading {
            north: self.round_axis(raw.north),
            east: self.round_axis(raw.east),
            height: self.round_axis(raw.height),
        };

        FormattedUpdate {
            point,
            grid,
            totals: TrackTotals::new(
                self.round_to_precision(update.totals.distance_m),
                self.round_to_precision(update.totals.ascent_m),
                self.round_to_precision(update.totals.descent_m),
            ),
            quality: QualityIndicators {
                accuracy_m: update.fix.accuracy_m,
                vertical_accuracy_m: update.fix.vertical_accuracy_m,
                speed_mps: update.fix.speed_mps,
                speed_accuracy_mps: update.fix.speed_accuracy_mps,
                provider: update.fix.provider.clone(),
            },
            timing: TimingInfo {
                timestamp_ms: update.fix.timestamp_ms,
                time_of_day: time_of_day(update.fix.timestamp_ms, self.local_time),
                sequence_number: update.sequence_number,
            },
        }
    }

    fn round_axis(&self, axis: GridAxis) -> GridAxis {
        let limit = 1000.0 - 10_f64.powi(-(self.precision as i32));
        GridAxis {
            km: axis.km,
            m: self.round_to_precision(axis.m).clamp(-limit, limit),
        }
    }

    fn round_to_precision(&self, value: f64) -> f64 {
        let multiplier = 10_f64.powi(self.precision as i32);
        (value * multiplier).round() / multiplier
    }
}

fn time_of_day(timestamp_ms: u64, local_time: bool) -> String {
    let utc = match i64::try_from(timestamp_ms).ok().and_then(DateTime::from_timestamp_millis) {
        Some(utc) => utc,
        None => return "--:--:--".to_string(),
    };
    if local_time {
        utc.with_timezone(&Local).format("%H:%M:%S").to_string()
    } else {
        utc.format("%H:%M:%S").to_string()
    }
}

fn optional(value: Option<f32>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".to_string())
}

/// Human-readable text formatter
#[derive(Default)]
pub struct TextFormatter {
    /// Single-line output
    pub compact: bool,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compact() -> Self {
        Self { compact: true }
    }

    pub fn format_text(&self, update: &FormattedUpdate) -> String {
        let grid = &update.grid;
        let totals = &update.totals;

        if self.compact {
            return format!(
                "#{} {} | X {} km {:.2} m, Y {} km {:.2} m, Z {:.2} m | dist {:.1} m, +{:.1} m, -{:.1} m",
                update.timing.sequence_number,
                update.timing.time_of_day,
                grid.north.km, grid.north.m,
                grid.east.km, grid.east.m,
                update.point.z,
                totals.distance_m, totals.ascent_m, totals.descent_m,
            );
        }

        let mut output = String::new();
        output.push_str(&format!(
            "Fix #{} at {}\n",
            update.timing.sequence_number, update.timing.time_of_day
        ));
        output.push_str("Grid position:\n");
        output.push_str(&format!("  X: {:>4} km {:>7.2} m\n", grid.north.km, grid.north.m));
        output.push_str(&format!("  Y: {:>4} km {:>7.2} m\n", grid.east.km, grid.east.m));
        output.push_str(&format!("  Z: {:>4} km {:>7.2} m\n", grid.height_km_label(), grid.height.m));
        output.push_str("Quality:\n");
        output.push_str(&format!("  Accuracy:          {:.2} m\n", update.quality.accuracy_m));
        output.push_str(&format!("  Altitude accuracy: {} m\n", optional(update.quality.vertical_accuracy_m)));
        output.push_str(&format!("  Speed:             {:.2} m/s\n", update.quality.speed_mps));
        output.push_str(&format!("  Speed accuracy:    {} m/s\n", optional(update.quality.speed_accuracy_mps)));
        output.push_str(&format!("  Provider:          {}\n", update.quality.provider));
        output.push_str("Totals:\n");
        output.push_str(&format!("  Distance: {:.2} m\n", totals.distance_m));
        output.push_str(&format!("  Ascent:   {:.2} m\n", totals.ascent_m));
        output.push_str(&format!("  Descent:  {:.2} m\n", totals.descent_m));
        output
    }

    pub fn format_summary(&self, totals: &TrackTotals, fix_count: u32) -> String {
        format!(
            "{} fixes, distance {:.2} m, ascent {:.2} m, descent {:.2} m",
            fix_count, totals.distance_m, totals.ascent_m, totals.descent_m
        )
    }
}

/// JSON formatter for structured output
#[derive(Default)]
pub struct JsonFormatter {
    /// Pretty print JSON
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn format_json(&self, update: &FormattedUpdate) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(update)
        } else {
            serde_json::to_string(update)
        }
    }

    pub fn format_summary(&self, totals: &TrackTotals) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(totals)
        } else {
            serde_json::to_string(totals)
        }
    }
}

/// CSV formatter for data logging
pub struct CsvFormatter {
    /// Include header row
    pub include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self { include_header: true }
    }
}

impl CsvFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(&self) -> String {
        "sequence,timestamp_ms,x,y,z,distance,ascent,descent,accuracy,vertical_accuracy,speed,provider".to_string()
    }

    /// Render one row; text fields are quoted as needed
    pub fn format_csv(&self, update: &FormattedUpdate) -> Result<String, csv::Error> {
        let quality = &update.quality;
        write_row(&[
            update.timing.sequence_number.to_string(),
            update.timing.timestamp_ms.to_string(),
            format!("{:.2}", update.point.x),
            format!("{:.2}", update.point.y),
            format!("{:.2}", update.point.z),
            format!("{:.2}", update.totals.distance_m),
            format!("{:.2}", update.totals.ascent_m),
            format!("{:.2}", update.totals.descent_m),
            format!("{:.2}", quality.accuracy_m),
            quality
                .vertical_accuracy_m
                .map(|v| format!("{:.2}", v))
                .unwrap_or_default(),
            format!("{:.2}", quality.speed_mps),
            quality.provider.clone(),
        ])
    }
}

fn write_row(fields: &[String]) -> Result<String, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(fields)?;

    let bytes = writer.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;
    let row = String::from_utf8(bytes)
        .map_err(|e| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, e)))?;
    Ok(row.trim_end_matches('\n').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Displacement, LocationFix};

    fn sample_update() -> TrackUpdate {
        let fix = LocationFix::new(GeodeticFix::new(46.951, 7.4386, 1540.0), 1_642_780_800_000)
            .with_accuracy(4.5)
            .with_speed(1.25, None)
            .with_provider("gps");

        TrackUpdate {
            fix,
            point: PlanarCoordinates::new(199990.8136, 599997.5126, 1490.4412),
            step: Displacement {
                distance_m: 12.0,
                meters_up: 3.0,
                meters_down: 0.0,
            },
            totals: TrackTotals::new(1234.567, 210.004, 98.126),
            sequence_number: 7,
        }
    }

    #[test]
    fn test_describe_fix() {
        let fix = GeodeticFix::new(46.5, 7.25, 0.0);
        assert_eq!(describe_fix(Some(&fix)), "(46.5, 7.25)");
        assert_eq!(describe_fix(None), "Unknown location");
    }

    #[test]
    fn test_grid_axis_split() {
        let axis = GridAxis::split(199990.8136);
        assert_eq!(axis.km, 199);
        assert!((axis.m - 990.8136).abs() < 1e-6);

        let negative = GridAxis::split(-49.55);
        assert_eq!(negative.km, 0);
        assert!((negative.m + 49.55).abs() < 1e-9);
    }

    #[test]
    fn test_height_label_blank_below_one_km() {
        let low = GridReading::from_point(&PlanarCoordinates::new(0.0, 0.0, 850.0));
        assert_eq!(low.height_km_label(), "");

        let high = GridReading::from_point(&PlanarCoordinates::new(0.0, 0.0, 2350.0));
        assert_eq!(high.height_km_label(), "2");
    }

    #[test]
    fn test_update_formatter_rounds_values() {
        let formatted = UpdateFormatter::new().format(&sample_update());

        assert_eq!(formatted.point.x, 199990.81);
        assert_eq!(formatted.totals.distance_m, 1234.57);
        assert_eq!(formatted.totals.ascent_m, 210.0);
        assert_eq!(formatted.grid.north.km, 199);
        assert_eq!(formatted.grid.north.m, 990.81);
        assert_eq!(formatted.grid.height.km, 1);
        assert_eq!(formatted.timing.sequence_number, 7);
        assert_eq!(formatted.timing.time_of_day, "16:00:00");
    }

    #[test]
    fn test_remainder_never_rounds_to_full_kilometre() {
        let mut update = sample_update();
        update.point = PlanarCoordinates::new(200999.999, 0.0, 0.0);

        let formatted = UpdateFormatter::new().format(&update);
        assert_eq!(formatted.grid.north.km, 200);
        assert!(formatted.grid.north.m < 1000.0);
    }

    #[test]
    fn test_text_formatter_marks_missing_values() {
        let formatted = UpdateFormatter::new().format(&sample_update());
        let text = TextFormatter::new().format_text(&formatted);

        assert!(text.contains("Fix #7 at 16:00:00"));
        assert!(text.contains("X:  199 km  990.81 m"));
        assert!(text.contains("Altitude accuracy: - m"));
        assert!(text.contains("Ascent:   210.00 m"));

        let compact = TextFormatter::compact().format_text(&formatted);
        assert!(!compact.contains('\n'));
        assert!(compact.starts_with("#7 16:00:00"));
    }

    #[test]
    fn test_json_formatter() {
        let formatted = UpdateFormatter::new().format(&sample_update());
        let json = JsonFormatter::new().format_json(&formatted).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["timing"]["sequence_number"], 7);
        assert_eq!(value["grid"]["east"]["km"], 599);
        assert!(value["quality"]["vertical_accuracy_m"].is_null());

        let pretty = JsonFormatter::pretty().format_json(&formatted).unwrap();
        assert!(pretty.contains('\n'));
    }

    #[test]
    fn test_csv_formatter() {
        let formatter = CsvFormatter::new();
        let formatted = UpdateFormatter::new().format(&sample_update());
        let row = formatter.format_csv(&formatted).unwrap();

        assert_eq!(
            formatter.header().split(',').count(),
            row.split(',').count()
        );
        assert!(row.starts_with("7,1642780800000,199990.81,599997.51,1490.44"));
        assert!(row.ends_with(",4.50,,1.25,gps"));
    }

    #[test]
    fn test_csv_formatter_quotes_provider_with_comma() {
        let mut update = sample_update();
        update.fix.provider = "fused, network".to_string();

        let formatter = CsvFormatter::new();
        let row = formatter.format_csv(&UpdateFormatter::new().format(&update)).unwrap();
        assert!(row.ends_with(",\"fused, network\""));

        let table = format!("{}\n{}\n", formatter.header(), row);
        let mut reader = csv::Reader::from_reader(table.as_bytes());
        let header_len = reader.headers().unwrap().len();
        let record = reader.records().next().unwrap().unwrap();

        assert_eq!(record.len(), header_len);
        assert_eq!(&record[11], "fused, network");
    }

    #[test]
    fn test_local_time_of_day() {
        let update = sample_update();
        let expected = DateTime::from_timestamp_millis(update.fix.timestamp_ms as i64)
            .unwrap()
            .with_timezone(&Local)
            .format("%H:%M:%S")
            .to_string();

        let formatted = UpdateFormatter::new().with_local_time(true).format(&update);
        assert_eq!(formatted.timing.time_of_day, expected);

        let utc = UpdateFormatter::new().format(&update);
        assert_eq!(utc.timing.time_of_day, "16:00:00");
    }
}
