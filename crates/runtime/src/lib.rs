mod config;
pub mod logging;

pub use config::{
    ALL_TYPES_LABEL, BYTES_PER_MEGABYTE, DATE_FORMAT, DATETIME_FORMAT, PROGRAM_LOG_LEVEL,
    PROGRAM_NAME, TIME_FORMAT, UNKNOWN_LABEL,
};

pub use logging::init;
