use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveTime};
use filesift_fs::{FileRecord, FileType, Timestamp};
use hashbrown::HashSet;
use serde::Serialize;

use crate::{Bounds, TypeFilter};

/// Values a front end needs to offer sensible choices for each criterion.
///
/// Date and time domains are sorted ascending and leave out `Unknown`
/// timestamps. `types` keeps first-seen order behind the wildcard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSummary {
    pub created_dates: Vec<NaiveDate>,
    pub created_times: Vec<NaiveTime>,
    pub modified_dates: Vec<NaiveDate>,
    pub accessed_dates: Vec<NaiveDate>,
    /// `None` only for an empty scan.
    pub size_mb: Option<Bounds<f64>>,
    pub types: Vec<TypeFilter>,
}

impl RangeSummary {
    /// Full span of each date domain, ready to seed a criterion.
    pub fn created_span(&self) -> Option<Bounds<NaiveDate>> {
        span(&self.created_dates)
    }

    pub fn created_time_span(&self) -> Option<Bounds<NaiveTime>> {
        span(&self.created_times)
    }

    pub fn modified_span(&self) -> Option<Bounds<NaiveDate>> {
        span(&self.modified_dates)
    }

    pub fn accessed_span(&self) -> Option<Bounds<NaiveDate>> {
        span(&self.accessed_dates)
    }
}

fn span<T: PartialOrd + Copy>(sorted: &[T]) -> Option<Bounds<T>> {
    Some(Bounds::new(*sorted.first()?, *sorted.last()?))
}

fn distinct_dates<'a>(stamps: impl Iterator<Item = &'a Timestamp>) -> Vec<NaiveDate> {
    stamps
        .filter_map(Timestamp::date)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn derive_ranges(records: &[FileRecord]) -> RangeSummary {
    let created_dates = distinct_dates(records.iter().map(|r| &r.created));
    let modified_dates = distinct_dates(records.iter().map(|r| &r.modified));
    let accessed_dates = distinct_dates(records.iter().map(|r| &r.accessed));

    let created_times = records
        .iter()
        .filter_map(|r| r.created.time())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let size_mb = records.iter().map(|r| r.size_mb).fold(None, |acc, size| {
        Some(match acc {
            None => Bounds::exact(size),
            Some(Bounds { min, max }) => Bounds::new(f64::min(min, size), f64::max(max, size)),
        })
    });

    let mut seen: HashSet<&FileType> = HashSet::new();
    let mut types = vec![TypeFilter::Any];
    for rec in records {
        if seen.insert(&rec.file_type) {
            types.push(TypeFilter::Only(rec.file_type.clone()));
        }
    }

    RangeSummary {
        created_dates,
        created_times,
        modified_dates,
        accessed_dates,
        size_mb,
        types,
    }
}

#[cfg(test)]
#[path = "ranges_tests.rs"]
mod tests;
