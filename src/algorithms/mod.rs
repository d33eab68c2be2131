//! Core tracking algorithms

pub mod projection;
pub mod integration;

pub use projection::{project, is_within_calibration_area};
pub use integration::{accumulate, delta, integrate_path};
