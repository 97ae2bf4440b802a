//! Numeric evaluation of a symbolic model at a point.
//!
//! These are pure functions of the model and the point, so they are safe to
//! call from any number of independent runs.

use nalgebra::DMatrix;
use thiserror::Error;

use steepest_core::{EvalError, SymbolicModel};

/// Errors raised when part of a model is undefined at a point.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("objective is undefined at {point:?}: {source}")]
    Objective { point: Vec<f64>, source: EvalError },

    #[error("gradient component {index} is undefined at {point:?}: {source}")]
    Gradient {
        index: usize,
        point: Vec<f64>,
        source: EvalError,
    },

    #[error("Hessian entry ({row}, {col}) is undefined at {point:?}: {source}")]
    Hessian {
        row: usize,
        col: usize,
        point: Vec<f64>,
        source: EvalError,
    },
}

impl EvaluationError {
    /// Returns the point where evaluation failed.
    pub fn point(&self) -> &[f64] {
        match self {
            Self::Objective { point, .. }
            | Self::Gradient { point, .. }
            | Self::Hessian { point, .. } => point,
        }
    }
}

/// Evaluates the objective at `point`.
///
/// # Errors
///
/// Returns [`EvaluationError::Objective`] if the objective is not a finite
/// real number at `point`.
pub fn objective(model: &SymbolicModel, point: &[f64]) -> Result<f64, EvaluationError> {
    model
        .objective()
        .eval(point)
        .map_err(|source| EvaluationError::Objective {
            point: point.to_vec(),
            source,
        })
}

/// Evaluates every gradient component at `point`.
///
/// # Errors
///
/// Returns [`EvaluationError::Gradient`] for the first component that is not
/// a finite real number.
pub fn gradient(model: &SymbolicModel, point: &[f64]) -> Result<Vec<f64>, EvaluationError> {
    model
        .gradient()
        .iter()
        .enumerate()
        .map(|(index, partial)| {
            partial
                .eval(point)
                .map_err(|source| EvaluationError::Gradient {
                    index,
                    point: point.to_vec(),
                    source,
                })
        })
        .collect()
}

/// Evaluates the Hessian at `point`.
///
/// # Errors
///
/// Returns [`EvaluationError::Hessian`] for the first entry, in row-major
/// order, that is not a finite real number.
pub fn hessian(model: &SymbolicModel, point: &[f64]) -> Result<DMatrix<f64>, EvaluationError> {
    let n = model.dimension();
    let mut values = DMatrix::zeros(n, n);
    for (row, entries) in model.hessian().iter().enumerate() {
        for (col, entry) in entries.iter().enumerate() {
            values[(row, col)] = entry
                .eval(point)
                .map_err(|source| EvaluationError::Hessian {
                    row,
                    col,
                    point: point.to_vec(),
                    source,
                })?;
        }
    }
    Ok(values)
}

/// Returns the Euclidean norm of `v`.
pub fn norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Returns `point + step * direction`.
pub fn advance(point: &[f64], direction: &[f64], step: f64) -> Vec<f64> {
    point
        .iter()
        .zip(direction)
        .map(|(p, d)| p + step * d)
        .collect()
}
