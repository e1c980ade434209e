//! Text forms of the criteria, as typed on a command line or into a form.
//!
//! Every range accepts either `MIN..MAX` or a single value, which is read
//! as the exact range `value..value`.

use chrono::{NaiveDate, NaiveTime};
use filesift_fs::FileType;
use filesift_runtime::{ALL_TYPES_LABEL, DATE_FORMAT, TIME_FORMAT, UNKNOWN_LABEL};

use crate::{Bounds, CriteriaParseError, TypeFilter};

const RANGE_SEPARATOR: &str = "..";

/// `.txt`, `TXT`, `Unknown` (files without extension), or `.all` / `*` for
/// the wildcard. A bare `all` is the real extension `.all`, which is the only
/// way to select it.
pub fn parse_type_filter(s: &str) -> Result<TypeFilter, CriteriaParseError> {
    let s = s.trim();

    if s == "*" || s.eq_ignore_ascii_case(ALL_TYPES_LABEL) {
        return Ok(TypeFilter::Any);
    }

    // Case-sensitive: `.unknown` / `unknown` is a real extension.
    if s == UNKNOWN_LABEL {
        return Ok(TypeFilter::Only(FileType::Unknown));
    }

    FileType::from_ext(s)
        .map(TypeFilter::Only)
        .ok_or(CriteriaParseError::Empty("type"))
}

pub fn parse_size_range(s: &str) -> Result<Bounds<f64>, CriteriaParseError> {
    parse_bounds(s, "size", parse_size_mb)
}

pub fn parse_date_range(s: &str) -> Result<Bounds<NaiveDate>, CriteriaParseError> {
    parse_bounds(s, "date", parse_ymd_date)
}

pub fn parse_time_range(s: &str) -> Result<Bounds<NaiveTime>, CriteriaParseError> {
    parse_bounds(s, "time", parse_hms_time)
}

fn parse_bounds<T, F>(
    s: &str,
    what: &'static str,
    parse_one: F,
) -> Result<Bounds<T>, CriteriaParseError>
where
    T: PartialOrd + Clone,
    F: Fn(&str) -> Result<T, CriteriaParseError>,
{
    let s = s.trim();
    if s.is_empty() {
        return Err(CriteriaParseError::Empty(what));
    }

    match s.split_once(RANGE_SEPARATOR) {
        Some((min, max)) => {
            let (min, max) = (min.trim(), max.trim());
            if min.is_empty() || max.is_empty() {
                return Err(CriteriaParseError::Empty(what));
            }
            Ok(Bounds::new(parse_one(min)?, parse_one(max)?))
        }
        None => parse_one(s).map(Bounds::exact),
    }
}

/// Plain decimal megabytes. A trailing `MB` (any case) is tolerated.
fn parse_size_mb(s: &str) -> Result<f64, CriteriaParseError> {
    let invalid = || CriteriaParseError::InvalidSize(s.to_owned());

    let bytes = s.as_bytes();
    let num = if bytes.len() > 2 && bytes[bytes.len() - 2..].eq_ignore_ascii_case(b"mb") {
        &s[..s.len() - 2]
    } else {
        s
    };

    let value: f64 = num.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok(value)
}

fn parse_ymd_date(s: &str) -> Result<NaiveDate, CriteriaParseError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|_| CriteriaParseError::InvalidDate(s.to_owned()))
}

fn parse_hms_time(s: &str) -> Result<NaiveTime, CriteriaParseError> {
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|_| CriteriaParseError::InvalidTime(s.to_owned()))
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
