//! WGS84 to Swiss grid projection
//!
//! Approximates the national grid with a fixed empirical polynomial in the
//! auxiliary values phi/lambda (offsets from the Bern origin in units of
//! 10000"). Accuracy is in the order of a meter inside Switzerland, which is
//! plenty for altitude tracking but not for surveying. Outside the calibrated
//! area the result is still defined, just not meaningful.
//!
//! The output follows the local convention: x points north, y points east and
//! z is the height above the grid's reference surface.

use crate::core::{
    GeodeticFix, PlanarCoordinates, ARCSEC_SCALE, CALIBRATION_MAX_LATITUDE, CALIBRATION_MAX_LONGITUDE,
    CALIBRATION_MIN_LATITUDE, CALIBRATION_MIN_LONGITUDE, FALSE_EASTING, FALSE_NORTHING,
    ORIGIN_LATITUDE_ARCSEC, ORIGIN_LONGITUDE_ARCSEC,
};

/// Project a geodetic fix onto the planar grid.
///
/// Pure arithmetic: non-finite input yields non-finite output.
pub fn project(fix: GeodeticFix) -> PlanarCoordinates {
    let (phi, lambda) = auxiliary_values(&fix);

    let e = 2600072.37
        + 211455.93 * lambda
        - 10938.51 * lambda * phi
        - 0.36 * lambda * phi * phi
        - 44.54 * lambda * lambda * lambda;
    let y = e - FALSE_EASTING;

    let n = 1200147.07
        + 308807.95 * phi
        + 3745.25 * lambda * lambda
        + 76.63 * phi * phi
        - 194.56 * lambda * lambda * phi
        + 119.79 * phi * phi * phi;
    let x = n - FALSE_NORTHING;

    let h = fix.altitude_m - 49.55
        + 2.73 * lambda
        + 6.94 * phi;

    PlanarCoordinates { x, y, z: h }
}

/// Offsets (phi, lambda) from the grid origin in units of 10000"
pub fn auxiliary_values(fix: &GeodeticFix) -> (f64, f64) {
    let phi = (3600.0 * fix.latitude_deg - ORIGIN_LATITUDE_ARCSEC) / ARCSEC_SCALE;
    let lambda = (3600.0 * fix.longitude_deg - ORIGIN_LONGITUDE_ARCSEC) / ARCSEC_SCALE;
    (phi, lambda)
}

/// Whether the fix lies inside the area the polynomial was fitted for
pub fn is_within_calibration_area(fix: &GeodeticFix) -> bool {
    (CALIBRATION_MIN_LATITUDE..=CALIBRATION_MAX_LATITUDE).contains(&fix.latitude_deg)
        && (CALIBRATION_MIN_LONGITUDE..=CALIBRATION_MAX_LONGITUDE).contains(&fix.longitude_deg)
}
