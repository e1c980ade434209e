pub const PROGRAM_NAME: &str = "filesift";
pub const PROGRAM_LOG_LEVEL: &str = "FILESIFT_LOG_LEVEL";

/// Divisor used to turn a byte count into the megabyte figure shown and
/// filtered on. Binary megabytes, not SI.
pub const BYTES_PER_MEGABYTE: f64 = (1024 * 1024) as f64;

/// Label for a field that could not be resolved during a scan.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Label for the type wildcard, i.e. "no restriction on file type".
pub const ALL_TYPES_LABEL: &str = ".all";

/// Display format for calendar dates in domains and criteria.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Display format for time-of-day values.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Display format for full timestamps.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
