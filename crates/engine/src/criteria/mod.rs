use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use filesift_fs::FileType;
use filesift_runtime::ALL_TYPES_LABEL;
use serde::{Serialize, Serializer};

mod parse;

pub use parse::{parse_date_range, parse_size_range, parse_time_range, parse_type_filter};

/// Inclusive `[min, max]` range.
///
/// Bounds are taken as given: an inverted range (`min > max`) is legal and
/// simply contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd> Bounds<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, value: &T) -> bool {
        self.min <= *value && *value <= self.max
    }

    #[inline]
    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }
}

impl<T: PartialOrd + Clone> Bounds<T> {
    /// Single-value range, `min == max`.
    pub fn exact(value: T) -> Self {
        Self {
            min: value.clone(),
            max: value,
        }
    }
}

/// Type criterion: one exact type, or the wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeFilter {
    Any,
    Only(FileType),
}

impl TypeFilter {
    #[inline]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, TypeFilter::Any)
    }

    #[inline]
    pub fn matches(&self, file_type: &FileType) -> bool {
        match self {
            TypeFilter::Any => true,
            TypeFilter::Only(wanted) => wanted == file_type,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::Any => f.write_str(ALL_TYPES_LABEL),
            TypeFilter::Only(t) => fmt::Display::fmt(t, f),
        }
    }
}

impl Serialize for TypeFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The set of criteria a user picked. `None` means the criterion is switched
/// off and restricts nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterCriteria {
    pub file_type: Option<TypeFilter>,
    /// Megabytes, compared against `FileRecord::size_mb`.
    pub size_mb: Option<Bounds<f64>>,
    pub created_date: Option<Bounds<NaiveDate>>,
    /// Time of day only; combine with `created_date` for a date window.
    pub created_time: Option<Bounds<NaiveTime>>,
    pub modified_date: Option<Bounds<NaiveDate>>,
    pub accessed_date: Option<Bounds<NaiveDate>>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file_type(mut self, filter: TypeFilter) -> Self {
        self.file_type = Some(filter);
        self
    }

    pub fn with_size_mb(mut self, bounds: Bounds<f64>) -> Self {
        self.size_mb = Some(bounds);
        self
    }

    pub fn with_created_date(mut self, bounds: Bounds<NaiveDate>) -> Self {
        self.created_date = Some(bounds);
        self
    }

    pub fn with_created_time(mut self, bounds: Bounds<NaiveTime>) -> Self {
        self.created_time = Some(bounds);
        self
    }

    pub fn with_modified_date(mut self, bounds: Bounds<NaiveDate>) -> Self {
        self.modified_date = Some(bounds);
        self
    }

    pub fn with_accessed_date(mut self, bounds: Bounds<NaiveDate>) -> Self {
        self.accessed_date = Some(bounds);
        self
    }

    pub fn enabled_count(&self) -> usize {
        [
            self.file_type.is_some(),
            self.size_mb.is_some(),
            self.created_date.is_some(),
            self.created_time.is_some(),
            self.modified_date.is_some(),
            self.accessed_date.is_some(),
        ]
        .into_iter()
        .filter(|enabled| *enabled)
        .count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.enabled_count() == 0
    }
}
