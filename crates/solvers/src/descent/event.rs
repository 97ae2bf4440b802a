use crate::line_search::LineSearch;

use super::IterationRecord;

/// An iteration seen by an observer.
///
/// `record` is the entry just appended to the history. On the converging
/// iteration there is no line search and no next point.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a> {
    pub record: &'a IterationRecord,

    /// How the step size was chosen.
    pub line_search: Option<&'a LineSearch>,

    /// The point the step moves to.
    pub next_point: Option<&'a [f64]>,
}

impl<'a> Event<'a> {
    pub(super) fn converged(record: &'a IterationRecord) -> Self {
        Self {
            record,
            line_search: None,
            next_point: None,
        }
    }

    pub(super) fn stepped(
        record: &'a IterationRecord,
        line_search: &'a LineSearch,
        next_point: &'a [f64],
    ) -> Self {
        Self {
            record,
            line_search: Some(line_search),
            next_point: Some(next_point),
        }
    }

    /// Returns `true` if this iteration met the convergence test.
    pub fn is_converged(&self) -> bool {
        self.line_search.is_none()
    }
}
