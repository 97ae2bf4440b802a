//! Exact line search through the roots of the directional derivative.

use thiserror::Error;

use steepest_core::{Expr, Polynomial, SymbolicModel};

use crate::Goal;

use super::roots::real_roots;

/// Leading coefficients below this fraction of the largest are dropped.
const TRIM_TOL: f64 = 1e-12;

/// Values this close, relative to `1 + |v|`, are treated as a tie.
const TIE_TOL: f64 = 1e-12;

/// The objective restricted to a line, as an expression in the step size.
///
/// Both expressions use variable index 0 for the step size `h`, in a variable
/// space of their own, so they never collide with the model's variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Directional {
    /// `g(h) = f(point + h * direction)`.
    pub objective: Expr,

    /// `g'(h)`.
    pub derivative: Expr,
}

/// Why the exact attempt did not produce a step.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SolveFailure {
    #[error("directional derivative is not a polynomial in h")]
    NotPolynomial,

    #[error("directional derivative is constant in h")]
    Degenerate,

    #[error("directional derivative has no real root")]
    NoRealRoot,

    #[error("objective is undefined at every root")]
    NoUsableRoot,
}

/// A step chosen from the real roots of `g'(h)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExactStep {
    pub step: f64,

    /// Every distinct real root, ascending.
    pub roots: Vec<f64>,
}

/// Builds `g(h)` and `g'(h)` by substituting `xᵢ → pᵢ + h·dᵢ`.
///
/// `point` and `direction` have one entry per model variable.
pub(crate) fn directional(
    model: &SymbolicModel,
    point: &[f64],
    direction: &[f64],
) -> Directional {
    let h = Expr::var(0);
    let objective = model.objective().substitute(&|i| {
        Expr::constant(point[i]) + Expr::constant(direction[i]) * h.clone()
    });
    let derivative = objective.derivative(0);

    Directional {
        objective,
        derivative,
    }
}

/// Solves `g'(h) = 0` and picks the best real root.
///
/// Among roots where the objective is defined, the one with the best
/// objective for `goal` wins. Ties go to the smaller `|h|`, then to the
/// smaller `h`, so the choice does not depend on root ordering.
///
/// # Errors
///
/// Returns a [`SolveFailure`] when no root is usable; callers fall back to a
/// numeric search.
pub fn solve(directional: &Directional, goal: Goal) -> Result<ExactStep, SolveFailure> {
    let derivative = Polynomial::from_expr(&directional.derivative, 0)
        .ok_or(SolveFailure::NotPolynomial)?
        .trimmed(TRIM_TOL);

    if derivative.degree() == 0 {
        return Err(SolveFailure::Degenerate);
    }

    let roots = real_roots(&derivative);
    if roots.is_empty() {
        return Err(SolveFailure::NoRealRoot);
    }

    let step = roots
        .iter()
        .filter_map(|&h| {
            let value = directional.objective.eval(&[h]).ok()?;
            Some((h, goal.transform(value)))
        })
        .reduce(|best, candidate| if prefer(candidate, best) { candidate } else { best })
        .map(|(h, _)| h)
        .ok_or(SolveFailure::NoUsableRoot)?;

    Ok(ExactStep { step, roots })
}

/// Returns `true` if `candidate` beats `incumbent`; both are `(h, score)`.
fn prefer(candidate: (f64, f64), incumbent: (f64, f64)) -> bool {
    let (h, score) = candidate;
    let (best_h, best_score) = incumbent;

    if (score - best_score).abs() > TIE_TOL * (1.0 + best_score.abs()) {
        return score < best_score;
    }
    let (size, best_size) = (h.abs(), best_h.abs());
    if (size - best_size).abs() > TIE_TOL * (1.0 + best_size) {
        return size < best_size;
    }
    h < best_h
}
