//! Fix log reader
//!
//! Reads recorded location fixes from CSV. Expected header:
//!
//! ```text
//! timestamp_ms,latitude,longitude,altitude,accuracy,vertical_accuracy,speed,speed_accuracy,provider
//! ```
//!
//! Everything after `altitude` is optional and may be left empty or omitted.

use crate::core::{GeodeticFix, LocationFix, DEFAULT_PROVIDER};
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Errors raised while reading a fix log
#[derive(Debug)]
pub enum FixLogError {
    /// The log file could not be opened
    Io { path: String, message: String },
    /// A record could not be decoded
    Csv { line: Option<u64>, message: String },
}

impl fmt::Display for FixLogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixLogError::Io { path, message } => {
                write!(f, "Failed to open fix log '{}': {}", path, message)
            }
            FixLogError::Csv { line: Some(line), message } => {
                write!(f, "Invalid fix record on line {}: {}", line, message)
            }
            FixLogError::Csv { line: None, message } => {
                write!(f, "Invalid fix record: {}", message)
            }
        }
    }
}

impl std::error::Error for FixLogError {}

impl From<csv::Error> for FixLogError {
    fn from(error: csv::Error) -> Self {
        FixLogError::Csv {
            line: error.position().map(|p| p.line()),
            message: error.to_string(),
        }
    }
}

pub type FixLogResult<T> = Result<T, FixLogError>;

#[derive(Debug, Deserialize)]
struct FixRecord {
    timestamp_ms: u64,
    latitude: f64,
    longitude: f64,
    altitude: f64,
    #[serde(default)]
    accuracy: Option<f32>,
    #[serde(default)]
    vertical_accuracy: Option<f32>,
    #[serde(default)]
    speed: Option<f32>,
    #[serde(default)]
    speed_accuracy: Option<f32>,
    #[serde(default)]
    provider: Option<String>,
}

impl From<FixRecord> for LocationFix {
    fn from(record: FixRecord) -> Self {
        LocationFix {
            position: GeodeticFix::new(record.latitude, record.longitude, record.altitude),
            timestamp_ms: record.timestamp_ms,
            accuracy_m: record.accuracy.unwrap_or(0.0),
            vertical_accuracy_m: record.vertical_accuracy,
            speed_mps: record.speed.unwrap_or(0.0),
            speed_accuracy_mps: record.speed_accuracy,
            provider: record
                .provider
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PROVIDER.to_string()),
        }
    }
}

/// Streaming reader over a CSV fix log
pub struct FixLogReader<R: Read> {
    reader: csv::Reader<R>,
}

impl FixLogReader<BufReader<File>> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> FixLogResult<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        let file = File::open(&path).map_err(|e| FixLogError::Io {
            path: path_str,
            message: e.to_string(),
        })?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: Read> FixLogReader<R> {
    pub fn from_reader(reader: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        Self { reader }
    }

    /// Iterate over the records, decoding each one lazily
    pub fn records(&mut self) -> impl Iterator<Item = FixLogResult<LocationFix>> + '_ {
        self.reader
            .deserialize::<FixRecord>()
            .map(|record| record.map(LocationFix::from).map_err(FixLogError::from))
    }

    /// Read every record, failing on the first malformed one
    pub fn read_all(&mut self) -> FixLogResult<Vec<LocationFix>> {
        self.records().collect()
    }
}
