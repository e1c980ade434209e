mod criteria;
mod error;
mod eval;
mod ranges;

pub use criteria::*;
pub use error::{CriteriaParseError, FilterError};
pub use eval::*;
pub use ranges::{RangeSummary, derive_ranges};
