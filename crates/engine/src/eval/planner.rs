use crate::eval::predicates::Predicate;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cost(pub u64);

impl Cost {
    /// Matches everything, evaluating it is pure overhead.
    pub const FREE: Cost = Cost(0);
}

/// Static per-record cost of a predicate. Cheap comparisons run first so
/// the expensive ones see the smallest candidate set.
pub fn estimate_cost(pred: &Predicate) -> Cost {
    match pred {
        Predicate::Type(filter) if filter.is_wildcard() => Cost::FREE,
        Predicate::Type(_) => Cost(10),
        Predicate::Size(_) => Cost(20),
        Predicate::Date(..) => Cost(25),
        // Needs the timestamp split into date and time first.
        Predicate::TimeOfDay(_) => Cost(30),
    }
}
