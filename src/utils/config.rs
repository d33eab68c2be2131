use crate::api::types::{LogLevel, OutputFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Highest supported decimal precision for metre values
pub const MAX_PRECISION: u8 = 6;

/// Tracker configuration, persisted as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Whether location tracking is switched on
    pub tracking_enabled: bool,
    /// Output format for track updates
    pub output_format: OutputFormat,
    /// Decimal places for metre values
    pub precision: u8,
    /// Drop fixes with a horizontal accuracy worse than this (meters)
    pub max_accuracy_m: Option<f32>,
    /// Warn about fixes outside the projection's calibrated area
    pub warn_outside_calibration: bool,
    /// Log level for the command line tool
    pub log_level: LogLevel,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            tracking_enabled: false,
            output_format: OutputFormat::Text,
            precision: 2,
            max_accuracy_m: None,
            warn_outside_calibration: true,
            log_level: LogLevel::Warn,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Invalid parameter value
    InvalidParameter { parameter: String, value: String, reason: String },
    /// Configuration file I/O error
    IoError { message: String },
    /// JSON serialization/deserialization error
    SerializationError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidParameter { parameter, value, reason } => {
                write!(f, "Invalid parameter {} = {}: {}", parameter, value, reason)
            }
            ConfigError::IoError { message } => write!(f, "I/O error: {}", message),
            ConfigError::SerializationError { message } => {
                write!(f, "Serialization error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Owns the tracker configuration and its backing file
pub struct ConfigurationManager {
    config: TrackerConfig,
    config_file_path: Option<String>,
    is_modified: bool,
}

impl Default for ConfigurationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationManager {
    /// Create a new configuration manager with default settings
    pub fn new() -> Self {
        Self {
            config: TrackerConfig::default(),
            config_file_path: None,
            is_modified: false,
        }
    }

    /// Create configuration manager and load from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let mut manager = Self::new();
        manager.load_from_file(path)?;
        Ok(manager)
    }

    /// Load from `path` if it exists, otherwise start from defaults bound to `path`
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            let mut manager = Self::new();
            manager.config_file_path = Some(path.as_ref().to_string_lossy().to_string());
            Ok(manager)
        }
    }

    pub fn get_config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Replace the configuration after validation
    pub fn update_config(&mut self, config: TrackerConfig) -> ConfigResult<()> {
        self.validate_config(&config)?;
        self.config = config;
        self.is_modified = true;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> ConfigResult<()> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            message: format!("Failed to read config file '{}': {}", path_str, e),
        })?;

        let config: TrackerConfig = serde_json::from_str(&content).map_err(|e| ConfigError::SerializationError {
            message: format!("Failed to parse config file '{}': {}", path_str, e),
        })?;

        self.validate_config(&config)?;

        self.config = config;
        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> ConfigResult<()> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = serde_json::to_string_pretty(&self.config).map_err(|e| ConfigError::SerializationError {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(&path, content).map_err(|e| ConfigError::IoError {
            message: format!("Failed to write config file '{}': {}", path_str, e),
        })?;

        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    /// Save to the file the configuration was loaded from
    pub fn save(&mut self) -> ConfigResult<()> {
        match self.config_file_path.clone() {
            Some(path) => self.save_to_file(path),
            None => Err(ConfigError::IoError {
                message: "No config file path set".to_string(),
            }),
        }
    }

    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    /// Switch tracking on or off, returning the previous state
    pub fn set_tracking_enabled(&mut self, enabled: bool) -> bool {
        let old = self.config.tracking_enabled;
        if old != enabled {
            self.config.tracking_enabled = enabled;
            self.is_modified = true;
        }
        old
    }

    pub fn is_tracking_enabled(&self) -> bool {
        self.config.tracking_enabled
    }

    pub fn set_precision(&mut self, precision: u8) -> ConfigResult<u8> {
        if precision > MAX_PRECISION {
            return Err(ConfigError::InvalidParameter {
                parameter: "precision".to_string(),
                value: precision.to_string(),
                reason: format!("Precision must be between 0 and {}", MAX_PRECISION),
            });
        }

        let old = self.config.precision;
        self.config.precision = precision;
        self.is_modified = true;
        Ok(old)
    }

    pub fn set_max_accuracy(&mut self, max_accuracy_m: Option<f32>) -> ConfigResult<Option<f32>> {
        Self::check_max_accuracy(max_accuracy_m)?;

        let old = self.config.max_accuracy_m;
        self.config.max_accuracy_m = max_accuracy_m;
        self.is_modified = true;
        Ok(old)
    }

    pub fn set_output_format(&mut self, format: OutputFormat) -> OutputFormat {
        let old = self.config.output_format;
        self.config.output_format = format;
        self.is_modified = true;
        old
    }

    pub fn set_log_level(&mut self, level: LogLevel) -> LogLevel {
        let old = self.config.log_level;
        self.config.log_level = level;
        self.is_modified = true;
        old
    }

    pub fn validate_config(&self, config: &TrackerConfig) -> ConfigResult<()> {
        if config.precision > MAX_PRECISION {
            return Err(ConfigError::InvalidParameter {
                parameter: "precision".to_string(),
                value: config.precision.to_string(),
                reason: format!("Precision must be between 0 and {}", MAX_PRECISION),
            });
        }
        Self::check_max_accuracy(config.max_accuracy_m)
    }

    fn check_max_accuracy(max_accuracy_m: Option<f32>) -> ConfigResult<()> {
        match max_accuracy_m {
            Some(value) if !(value.is_finite() && value > 0.0) => Err(ConfigError::InvalidParameter {
                parameter: "max_accuracy_m".to_string(),
                value: value.to_string(),
                reason: "Accuracy limit must be a positive number of meters".to_string(),
            }),
            _ => Ok(()),
        }
    }
}
