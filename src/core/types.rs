//! Core data types for the tracking pipeline

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// WGS84 position as delivered by a location source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeodeticFix {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_m: f64,
}

impl GeodeticFix {
    pub fn new(latitude_deg: f64, longitude_deg: f64, altitude_m: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            altitude_m,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude_deg.is_finite() && self.longitude_deg.is_finite() && self.altitude_m.is_finite()
    }
}

/// Swiss-grid style planar coordinates in meters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanarCoordinates {
    /// North axis
    pub x: f64,
    /// East axis
    pub y: f64,
    /// Height
    pub z: f64,
}

impl PlanarCoordinates {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

/// Running totals of a tracking session.
///
/// Totals are replaced, never mutated: every integration step returns a new
/// value whose fields are each >= the previous ones.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackTotals {
    pub distance_m: f64,
    pub ascent_m: f64,
    pub descent_m: f64,
}

impl TrackTotals {
    pub fn new(distance_m: f64, ascent_m: f64, descent_m: f64) -> Self {
        Self {
            distance_m,
            ascent_m,
            descent_m,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.distance_m == 0.0 && self.ascent_m == 0.0 && self.descent_m == 0.0
    }
}

/// 3D displacement between two planar points, vertical part split by sign
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Displacement {
    pub distance_m: f64,
    pub meters_up: f64,
    pub meters_down: f64,
}

/// A geodetic fix together with the metadata the location source reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub position: GeodeticFix,
    /// Fix time (milliseconds since epoch)
    pub timestamp_ms: u64,
    /// Horizontal accuracy radius (meters)
    pub accuracy_m: f32,
    /// Vertical accuracy (meters), not every source reports it
    pub vertical_accuracy_m: Option<f32>,
    /// Ground speed (m/s)
    pub speed_mps: f32,
    pub speed_accuracy_mps: Option<f32>,
    /// Name of the source that produced the fix
    pub provider: String,
}

impl LocationFix {
    pub fn new(position: GeodeticFix, timestamp_ms: u64) -> Self {
        Self {
            position,
            timestamp_ms,
            accuracy_m: 0.0,
            vertical_accuracy_m: None,
            speed_mps: 0.0,
            speed_accuracy_mps: None,
            provider: DEFAULT_PROVIDER.to_string(),
        }
    }

    pub fn with_accuracy(mut self, accuracy_m: f32) -> Self {
        self.accuracy_m = accuracy_m;
        self
    }

    pub fn with_vertical_accuracy(mut self, vertical_accuracy_m: f32) -> Self {
        self.vertical_accuracy_m = Some(vertical_accuracy_m);
        self
    }

    pub fn with_speed(mut self, speed_mps: f32, speed_accuracy_mps: Option<f32>) -> Self {
        self.speed_mps = speed_mps;
        self.speed_accuracy_mps = speed_accuracy_mps;
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }
}

/// Provider name used when a source does not report one
pub const DEFAULT_PROVIDER: &str = "gps";
