use thiserror::Error;

/// Rejections from [`apply_filters`](crate::apply_filters). These are user
/// input problems: callers should re-prompt rather than abort.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("no filter criteria selected")]
    NoCriteriaSelected,
}

/// A criterion given as text could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriteriaParseError {
    #[error("empty {0} criterion")]
    Empty(&'static str),

    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid time {0:?}, expected HH:MM:SS or HH:MM")]
    InvalidTime(String),

    #[error("invalid size {0:?}, expected a non-negative number of megabytes")]
    InvalidSize(String),
}
