use std::{
    fmt,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use filesift_runtime::{BYTES_PER_MEGABYTE, DATETIME_FORMAT, UNKNOWN_LABEL};
use serde::{Serialize, Serializer};

/// A file timestamp resolved to the local time zone, or `Unknown` when the
/// platform could not report it (e.g. birth time on filesystems without it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Timestamp {
    Known(NaiveDateTime),
    Unknown,
}

impl Timestamp {
    pub fn from_system_time(t: Option<SystemTime>) -> Self {
        let Some(t) = t else {
            return Timestamp::Unknown;
        };

        let secs = match t.duration_since(UNIX_EPOCH) {
            Ok(d) => i64::try_from(d.as_secs()).ok(),
            // Pre-epoch times are legal on most filesystems. Floor, so that
            // 1.5s before the epoch lands on -2 rather than -1.
            Err(e) => {
                let before = e.duration();
                let partial = i64::from(before.subsec_nanos() > 0);
                i64::try_from(before.as_secs()).ok().map(|s| -(s + partial))
            }
        };

        secs.map_or(Timestamp::Unknown, Timestamp::from_unix_secs)
    }

    pub fn from_unix_secs(secs: i64) -> Self {
        match DateTime::from_timestamp(secs, 0) {
            Some(utc) => Timestamp::Known(utc.with_timezone(&Local).naive_local()),
            None => Timestamp::Unknown,
        }
    }

    #[inline]
    pub fn is_known(&self) -> bool {
        matches!(self, Timestamp::Known(_))
    }

    #[inline]
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Timestamp::Known(dt) => Some(dt.date()),
            Timestamp::Unknown => None,
        }
    }

    /// Time of day at whole-second granularity.
    #[inline]
    pub fn time(&self) -> Option<NaiveTime> {
        match self {
            Timestamp::Known(dt) => dt.time().with_nanosecond(0),
            Timestamp::Unknown => None,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Known(dt) => write!(f, "{}", dt.format(DATETIME_FORMAT)),
            Timestamp::Unknown => f.write_str(UNKNOWN_LABEL),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Lowercase extension of a file, or `Unknown` when it has none.
///
/// The sentinel is its own variant, so a file literally named `notes.unknown`
/// (extension `unknown`) never compares equal to it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileType {
    Ext(String),
    Unknown,
}

impl FileType {
    /// Everything after the last `.` of the file name. Dotfiles like
    /// `.bashrc` and names ending in `.` carry no extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|os| os.to_str()) {
            Some(ext) if !ext.is_empty() => FileType::Ext(ext.to_lowercase()),
            _ => FileType::Unknown,
        }
    }

    /// Normalise user input: strips one leading dot and lowercases.
    /// Returns `None` for empty input.
    pub fn from_ext(ext: &str) -> Option<Self> {
        let ext = ext.trim();
        let ext = ext.strip_prefix('.').unwrap_or(ext);
        if ext.is_empty() {
            return None;
        }
        Some(FileType::Ext(ext.to_lowercase()))
    }

    pub fn extension(&self) -> Option<&str> {
        match self {
            FileType::Ext(e) => Some(e),
            FileType::Unknown => None,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Ext(e) => write!(f, ".{e}"),
            FileType::Unknown => f.write_str(UNKNOWN_LABEL),
        }
    }
}

impl Serialize for FileType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Metadata snapshot of one regular file, taken at scan time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileRecord {
    pub full_path: PathBuf,
    /// File name
    pub name: String,
    /// Birth time where the platform reports one
    pub created: Timestamp,
    pub modified: Timestamp,
    /// May lag behind reality on `noatime`/`relatime` mounts
    pub accessed: Timestamp,
    pub size_bytes: u64,
    /// `size_bytes` in binary megabytes, rounded to 2 decimals
    pub size_mb: f64,
    pub file_type: FileType,
}

/// Bytes to megabytes (1024 * 1024), rounded half away from zero to two
/// decimal places. Lossy on purpose: size filters compare against this value.
pub fn bytes_to_megabytes(bytes: u64) -> f64 {
    (bytes as f64 / BYTES_PER_MEGABYTE * 100.0).round() / 100.0
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
