mod planner;
mod predicates;

use filesift_fs::FileRecord;
use log::{debug, warn};
use serde::Serialize;

pub use planner::{Cost, estimate_cost};
pub use predicates::{DateField, Predicate, eval_predicate, lower_criteria};

use crate::{FilterCriteria, FilterError};

/// Records that passed every enabled criterion, in scan order.
///
/// Hits borrow from the scanned slice, so a result is always a subset of its
/// input by identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FilterResult<'a> {
    hits: Vec<&'a FileRecord>,
}

impl<'a> FilterResult<'a> {
    #[inline]
    pub fn hits(&self) -> &[&'a FileRecord] {
        &self.hits
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a FileRecord> + '_ {
        self.hits.iter().copied()
    }

    pub fn total_bytes(&self) -> u64 {
        self.hits.iter().map(|r| r.size_bytes).sum()
    }

    pub fn into_hits(self) -> Vec<&'a FileRecord> {
        self.hits
    }
}

pub struct FilterEngine<'a> {
    records: &'a [FileRecord],
}

impl<'a> FilterEngine<'a> {
    pub fn new(records: &'a [FileRecord]) -> Self {
        Self { records }
    }

    /// Apply every enabled criterion conjunctively.
    ///
    /// Fails with [`FilterError::NoCriteriaSelected`] when nothing is
    /// enabled. Inverted ranges are kept as given and match nothing.
    pub fn apply(&self, criteria: &FilterCriteria) -> Result<FilterResult<'a>, FilterError> {
        let mut preds = lower_criteria(criteria);
        if preds.is_empty() {
            return Err(FilterError::NoCriteriaSelected);
        }

        for pred in preds.iter().filter(|p| p.is_inverted()) {
            warn!(
                "[filter] {} range has min > max and will match nothing",
                pred.name()
            );
        }

        // AND is commutative, so the order only affects how much work
        // later predicates see.
        preds.sort_by_key(estimate_cost);

        let mut current: Vec<usize> = (0..self.records.len()).collect();
        for pred in &preds {
            if current.is_empty() {
                break;
            }
            let before = current.len();
            current = eval_predicate(self.records, pred, &current);
            debug!(
                "[filter] {}: {} -> {} candidates",
                pred.name(),
                before,
                current.len()
            );
        }

        Ok(FilterResult {
            hits: current.into_iter().map(|idx| &self.records[idx]).collect(),
        })
    }
}

/// Free-function form of [`FilterEngine::apply`].
pub fn apply_filters<'a>(
    records: &'a [FileRecord],
    criteria: &FilterCriteria,
) -> Result<FilterResult<'a>, FilterError> {
    FilterEngine::new(records).apply(criteria)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
