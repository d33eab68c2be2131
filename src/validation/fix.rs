//! Optional pre-validation of location fixes
//!
//! The projection and integration functions accept anything and propagate
//! garbage. Callers that want to drop unusable fixes run them through a
//! `FixValidator` first.

use crate::algorithms::is_within_calibration_area;
use crate::core::LocationFix;
use std::fmt;

/// Configuration for fix validation
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Reject fixes whose horizontal accuracy is worse than this (meters)
    pub max_accuracy_m: Option<f32>,
    /// Emit a warning for fixes outside the projection's calibrated area
    pub warn_outside_calibration: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_accuracy_m: None,
            warn_outside_calibration: true,
        }
    }
}

/// Reasons a fix is rejected
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    NonFiniteCoordinate { field: &'static str, value: f64 },
    LatitudeOutOfRange { latitude: f64 },
    LongitudeOutOfRange { longitude: f64 },
    InvalidAccuracy { accuracy_m: f32 },
    AccuracyTooLow { accuracy_m: f32, max_accuracy_m: f32 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NonFiniteCoordinate { field, value } => {
                write!(f, "Non-finite {}: {}", field, value)
            }
            ValidationError::LatitudeOutOfRange { latitude } => {
                write!(f, "Latitude {:.6} outside [-90, 90]", latitude)
            }
            ValidationError::LongitudeOutOfRange { longitude } => {
                write!(f, "Longitude {:.6} outside [-180, 180]", longitude)
            }
            ValidationError::InvalidAccuracy { accuracy_m } => {
                write!(f, "Invalid accuracy: {} m", accuracy_m)
            }
            ValidationError::AccuracyTooLow { accuracy_m, max_accuracy_m } => {
                write!(f, "Accuracy {:.1} m worse than limit {:.1} m", accuracy_m, max_accuracy_m)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Non-fatal findings about an accepted fix
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidationWarning {
    /// Projected coordinates will have low accuracy
    OutsideCalibrationArea,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationWarning::OutsideCalibrationArea => {
                write!(f, "Fix outside calibrated projection area")
            }
        }
    }
}

/// Accepted fix with any warnings attached
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationOutcome {
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationOutcome {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct FixValidator {
    config: ValidationConfig,
}

impl FixValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    pub fn validate(&self, fix: &LocationFix) -> ValidationResult<ValidationOutcome> {
        let position = &fix.position;

        for (field, value) in [
            ("latitude", position.latitude_deg),
            ("longitude", position.longitude_deg),
            ("altitude", position.altitude_m),
        ] {
            if !value.is_finite() {
                return Err(ValidationError::NonFiniteCoordinate { field, value });
            }
        }

        if !(-90.0..=90.0).contains(&position.latitude_deg) {
            return Err(ValidationError::LatitudeOutOfRange {
                latitude: position.latitude_deg,
            });
        }
        if !(-180.0..=180.0).contains(&position.longitude_deg) {
            return Err(ValidationError::LongitudeOutOfRange {
                longitude: position.longitude_deg,
            });
        }

        if !fix.accuracy_m.is_finite() || fix.accuracy_m < 0.0 {
            return Err(ValidationError::InvalidAccuracy {
                accuracy_m: fix.accuracy_m,
            });
        }
        if let Some(max_accuracy_m) = self.config.max_accuracy_m {
            if fix.accuracy_m > max_accuracy_m {
                return Err(ValidationError::AccuracyTooLow {
                    accuracy_m: fix.accuracy_m,
                    max_accuracy_m,
                });
            }
        }

        let mut outcome = ValidationOutcome::default();
        if self.config.warn_outside_calibration && !is_within_calibration_area(position) {
            outcome.warnings.push(ValidationWarning::OutsideCalibrationArea);
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GeodeticFix;

    fn fix(lat: f64, lon: f64, alt: f64) -> LocationFix {
        LocationFix::new(GeodeticFix::new(lat, lon, alt), 0).with_accuracy(5.0)
    }

    #[test]
    fn test_valid_swiss_fix() {
        let outcome = FixValidator::new().validate(&fix(46.951, 7.4386, 540.0)).unwrap();
        assert!(outcome.is_clean());
    }

    #[test]
    fn test_out_of_range_coordinates() {
        let validator = FixValidator::new();

        assert_eq!(
            validator.validate(&fix(91.0, 7.4, 0.0)),
            Err(ValidationError::LatitudeOutOfRange { latitude: 91.0 })
        );
        assert_eq!(
            validator.validate(&fix(46.9, -200.0, 0.0)),
            Err(ValidationError::LongitudeOutOfRange { longitude: -200.0 })
        );
    }

    #[test]
    fn test_non_finite_values() {
        let validator = FixValidator::new();

        let result = validator.validate(&fix(46.9, 7.4, f64::NAN));
        assert!(matches!(
            result,
            Err(ValidationError::NonFiniteCoordinate { field: "altitude", .. })
        ));

        let mut bad_accuracy = fix(46.9, 7.4, 0.0);
        bad_accuracy.accuracy_m = -1.0;
        assert!(matches!(
            validator.validate(&bad_accuracy),
            Err(ValidationError::InvalidAccuracy { .. })
        ));
    }

    #[test]
    fn test_accuracy_limit() {
        let validator = FixValidator::with_config(ValidationConfig {
            max_accuracy_m: Some(10.0),
            ..Default::default()
        });

        assert!(validator.validate(&fix(46.9, 7.4, 0.0)).is_ok());
        let poor = fix(46.9, 7.4, 0.0).with_accuracy(25.0);
        let error = validator.validate(&poor).unwrap_err();
        assert_eq!(error.to_string(), "Accuracy 25.0 m worse than limit 10.0 m");
    }

    #[test]
    fn test_outside_calibration_area_warns() {
        let validator = FixValidator::new();
        let outcome = validator.validate(&fix(48.8566, 2.3522, 35.0)).unwrap();
        assert_eq!(outcome.warnings, vec![ValidationWarning::OutsideCalibrationArea]);

        let quiet = FixValidator::with_config(ValidationConfig {
            warn_outside_calibration: false,
            ..Default::default()
        });
        assert!(quiet.validate(&fix(48.8566, 2.3522, 35.0)).unwrap().is_clean());
    }
}
