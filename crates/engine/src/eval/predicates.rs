use chrono::{NaiveDate, NaiveTime};
use filesift_fs::{FileRecord, Timestamp};

use crate::{Bounds, FilterCriteria, TypeFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Created,
    Modified,
    Accessed,
}

impl DateField {
    #[inline]
    fn of(self, rec: &FileRecord) -> &Timestamp {
        match self {
            DateField::Created => &rec.created,
            DateField::Modified => &rec.modified,
            DateField::Accessed => &rec.accessed,
        }
    }
}

/// One enabled criterion, lowered to the form the evaluator runs.
#[derive(Debug, Clone)]
pub enum Predicate {
    Type(TypeFilter),
    Size(Bounds<f64>),
    Date(DateField, Bounds<NaiveDate>),
    /// Time of day of the creation timestamp.
    TimeOfDay(Bounds<NaiveTime>),
}

impl Predicate {
    pub fn name(&self) -> &'static str {
        match self {
            Predicate::Type(_) => "type",
            Predicate::Size(_) => "size",
            Predicate::Date(DateField::Created, _) => "creation date",
            Predicate::Date(DateField::Modified, _) => "modification date",
            Predicate::Date(DateField::Accessed, _) => "access date",
            Predicate::TimeOfDay(_) => "creation time",
        }
    }

    pub fn is_inverted(&self) -> bool {
        match self {
            Predicate::Type(_) => false,
            Predicate::Size(b) => b.is_inverted(),
            Predicate::Date(_, b) => b.is_inverted(),
            Predicate::TimeOfDay(b) => b.is_inverted(),
        }
    }

    /// Unknown timestamps never fall inside a date or time range.
    pub fn matches(&self, rec: &FileRecord) -> bool {
        match self {
            Predicate::Type(filter) => filter.matches(&rec.file_type),
            Predicate::Size(bounds) => bounds.contains(&rec.size_mb),
            Predicate::Date(field, bounds) => field
                .of(rec)
                .date()
                .is_some_and(|d| bounds.contains(&d)),
            Predicate::TimeOfDay(bounds) => {
                rec.created.time().is_some_and(|t| bounds.contains(&t))
            }
        }
    }
}

pub fn lower_criteria(criteria: &FilterCriteria) -> Vec<Predicate> {
    let mut preds = Vec::with_capacity(criteria.enabled_count());

    if let Some(filter) = &criteria.file_type {
        preds.push(Predicate::Type(filter.clone()));
    }
    if let Some(bounds) = criteria.size_mb {
        preds.push(Predicate::Size(bounds));
    }
    if let Some(bounds) = criteria.created_date {
        preds.push(Predicate::Date(DateField::Created, bounds));
    }
    if let Some(bounds) = criteria.created_time {
        preds.push(Predicate::TimeOfDay(bounds));
    }
    if let Some(bounds) = criteria.modified_date {
        preds.push(Predicate::Date(DateField::Modified, bounds));
    }
    if let Some(bounds) = criteria.accessed_date {
        preds.push(Predicate::Date(DateField::Accessed, bounds));
    }

    preds
}

/// Keep the candidates (indices into `records`) that satisfy `pred`.
/// Candidate order is preserved.
pub fn eval_predicate(
    records: &[FileRecord],
    pred: &Predicate,
    candidates: &[usize],
) -> Vec<usize> {
    if let Predicate::Type(filter) = pred
        && filter.is_wildcard()
    {
        return candidates.to_vec();
    }

    candidates
        .iter()
        .copied()
        .filter(|&idx| pred.matches(&records[idx]))
        .collect()
}
