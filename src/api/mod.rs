//! Output types and formatting for track updates

pub mod types;
pub mod formatting;

pub use types::{LogLevel, OutputFormat, TrackUpdate};
pub use formatting::{
    describe_fix, CsvFormatter, FormattedUpdate, GridAxis, GridReading, JsonFormatter, TextFormatter,
    UpdateFormatter,
};
