use thiserror::Error;

use crate::evaluate::EvaluationError;

use super::IterationRecord;

/// Errors that can occur during steepest descent.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("initial point has {actual} coordinates but the model has {expected} variables")]
    Dimension { expected: usize, actual: usize },

    /// The objective or gradient was undefined at a visited point.
    ///
    /// `iter` is the iteration that needed the value; a failure at the final
    /// point after the last iteration reports the iteration after it.
    #[error("iteration {iter}: {source}")]
    Evaluation {
        iter: usize,
        source: EvaluationError,
        history: Vec<IterationRecord>,
    },
}

impl Error {
    pub(super) fn evaluation(
        iter: usize,
        source: EvaluationError,
        history: Vec<IterationRecord>,
    ) -> Self {
        Self::Evaluation {
            iter,
            source,
            history,
        }
    }

    /// Returns the iterations completed before the error.
    pub fn history(&self) -> &[IterationRecord] {
        match self {
            Self::Dimension { .. } => &[],
            Self::Evaluation { history, .. } => history,
        }
    }
}
