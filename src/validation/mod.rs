//! Input validation for location fixes

pub mod fix;

pub use fix::{FixValidator, ValidationConfig, ValidationError, ValidationOutcome, ValidationWarning};
