use super::IterationRecord;

/// Why the run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// The gradient norm fell below the tolerance.
    Converged,

    /// Reached the iteration limit without converging.
    Exhausted,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of a steepest descent run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    pub status: Status,

    /// The last current point.
    ///
    /// For a converged run this is the point of the final record; otherwise
    /// it is where the final step landed.
    pub point: Vec<f64>,

    /// Objective value at `point`.
    pub objective: f64,

    /// One record per executed iteration.
    pub history: Vec<IterationRecord>,
}

impl Solution {
    /// Returns the number of iterations executed.
    pub fn iters(&self) -> usize {
        self.history.len()
    }

    /// Returns `true` if the run converged.
    pub fn is_converged(&self) -> bool {
        self.status == Status::Converged
    }
}
