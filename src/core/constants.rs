//! Projection constants and calibration limits

/// Latitude offset of the grid origin (arc seconds)
pub const ORIGIN_LATITUDE_ARCSEC: f64 = 169028.66;
/// Longitude offset of the grid origin (arc seconds)
pub const ORIGIN_LONGITUDE_ARCSEC: f64 = 26782.5;
/// Auxiliary values are expressed in units of 10000"
pub const ARCSEC_SCALE: f64 = 10000.0;

pub const FALSE_EASTING: f64 = 2000000.00;
pub const FALSE_NORTHING: f64 = 1000000.00;

/// Bounding box the polynomial is calibrated for (degrees)
pub const CALIBRATION_MIN_LATITUDE: f64 = 45.8;
pub const CALIBRATION_MAX_LATITUDE: f64 = 47.9;
pub const CALIBRATION_MIN_LONGITUDE: f64 = 5.9;
pub const CALIBRATION_MAX_LONGITUDE: f64 = 10.6;
