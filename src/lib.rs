//! Altitude Tracker
//!
//! Projects WGS84 location fixes onto the Swiss grid and integrates a track
//! into total distance, ascent and descent.

pub mod core;
pub mod algorithms;
pub mod processing;
pub mod validation;
pub mod utils;
pub mod api;

// Re-export commonly used types
pub use crate::core::{Displacement, GeodeticFix, LocationFix, PlanarCoordinates, TrackTotals};
pub use crate::algorithms::{accumulate, delta, integrate_path, project};
pub use crate::processing::{FixLogReader, TrackingSession};
pub use crate::validation::{FixValidator, ValidationConfig, ValidationError};
pub use crate::utils::{ConfigError, ConfigurationManager, TrackerConfig};
pub use crate::api::{
    describe_fix, CsvFormatter, FormattedUpdate, JsonFormatter, LogLevel, OutputFormat, TextFormatter,
    TrackUpdate, UpdateFormatter,
};
