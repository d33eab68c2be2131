//! Fix sequencing and input processing

pub mod session;
pub mod parser;

pub use session::TrackingSession;
pub use parser::{FixLogError, FixLogReader, FixLogResult};
