use std::sync::OnceLock;

use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::config::{PROGRAM_LOG_LEVEL, PROGRAM_NAME};

pub struct Logger {
    level: Level,
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        eprintln!(
            "{} {} {} [{}] {}",
            timestamp,
            PROGRAM_NAME,
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}

fn get_level_from_env() -> Level {
    std::env::var(PROGRAM_LOG_LEVEL)
        .ok()
        .and_then(|s| s.parse::<LevelFilter>().ok())
        .and_then(|filter| filter.to_level())
        .unwrap_or(Level::Warn)
}

/// Raise `base` by `verbosity` steps (Warn -> Info -> Debug -> Trace).
/// The environment sets the floor, `-v` flags only ever make output louder.
pub fn bump_level(base: Level, verbosity: u8) -> Level {
    let mut level = base;
    for _ in 0..verbosity {
        level = match level {
            Level::Error => Level::Warn,
            Level::Warn => Level::Info,
            Level::Info => Level::Debug,
            Level::Debug | Level::Trace => Level::Trace,
        };
    }
    level
}

/// Install the stderr logger at the level named by `FILESIFT_LOG_LEVEL`.
pub fn init() -> Result<(), SetLoggerError> {
    init_with_verbosity(0)
}

pub fn init_with_verbosity(verbosity: u8) -> Result<(), SetLoggerError> {
    _init(bump_level(get_level_from_env(), verbosity))
}

pub fn _init(level: Level) -> Result<(), SetLoggerError> {
    static LOGGER: OnceLock<Logger> = OnceLock::new();

    // Only the first call installs the logger. Later calls must not touch the
    // max level either, or it would drift from the level the logger holds.
    let init_call = LOGGER.get().is_none();

    let logger = LOGGER.get_or_init(|| Logger { level });

    if init_call {
        log::set_logger(logger)?;
        log::set_max_level(level.to_level_filter());
    }

    Ok(())
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
