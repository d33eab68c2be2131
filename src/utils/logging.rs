//! Minimal stderr backend for the `log` facade
//!
//! The library only emits records; binaries call `init` once at startup.

use crate::api::types::LogLevel;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Install the stderr logger with the given maximum level
pub fn init(level: LogLevel) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    set_level(level);
    Ok(())
}

/// Change the maximum level after `init`
pub fn set_level(level: LogLevel) {
    log::set_max_level(level.to_level_filter());
}

pub fn current_level() -> LevelFilter {
    log::max_level()
}
