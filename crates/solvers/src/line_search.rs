//! Step-size selection along the steepest direction.
//!
//! The step size search first tries to solve `g'(h) = 0` exactly, where
//! `g(h) = f(point + h * direction)`. When the derivative is not a polynomial
//! in `h`, or none of its roots is usable, it falls back to a golden section
//! search of `h` over a fixed bracket.

pub mod exact;
pub mod golden_section;

mod roots;

use steepest_core::{Expr, SymbolicModel};

use crate::Goal;

pub use exact::{Directional, ExactStep, SolveFailure};

/// Name used when printing expressions in the step size.
pub const STEP_VARIABLE: &str = "h";

/// How a step size was chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum Method {
    /// A real root of `g'(h)`.
    Exact {
        /// Every distinct real root, ascending.
        roots: Vec<f64>,
    },

    /// Golden section search, after the exact attempt failed.
    GoldenSection {
        reason: SolveFailure,
        solution: golden_section::Solution,
    },
}

/// The outcome of one line search.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSearch {
    /// The chosen step size `h`.
    pub step: f64,

    /// The search direction: the gradient when maximizing, its negation
    /// when minimizing.
    pub direction: Vec<f64>,

    /// `g(h)` and `g'(h)`.
    pub directional: Directional,

    pub method: Method,
}

impl LineSearch {
    /// Returns `true` if the step came from the golden section fallback.
    pub fn used_fallback(&self) -> bool {
        matches!(self.method, Method::GoldenSection { .. })
    }

    /// Returns a printable view of an expression in the step size.
    pub fn display(expr: &Expr) -> impl std::fmt::Display + '_ {
        expr.named(&[STEP_VARIABLE])
    }
}

/// Chooses the step size along the steepest direction from `point`.
///
/// The search never fails: when the exact attempt reports a
/// [`SolveFailure`], the golden section fallback scores points where the
/// objective is undefined as worse than any real value.
///
/// `point` and `gradient` have one entry per model variable; the driver
/// checks the initial point before the first search.
pub(crate) fn find_step_size(
    model: &SymbolicModel,
    goal: Goal,
    point: &[f64],
    gradient: &[f64],
    config: &golden_section::Config,
) -> LineSearch {
    let direction = goal.direction(gradient);
    let directional = exact::directional(model, point, &direction);

    let (step, method) = match exact::solve(&directional, goal) {
        Ok(ExactStep { step, roots }) => (step, Method::Exact { roots }),
        Err(reason) => {
            let score = |h: f64| {
                directional
                    .objective
                    .eval(&[h])
                    .map_or(f64::INFINITY, |value| goal.transform(value))
            };
            let solution = golden_section::minimize(score, config);
            (solution.x, Method::GoldenSection { reason, solution })
        }
    };

    LineSearch {
        step,
        direction,
        directional,
        method,
    }
}
