//! Steepest descent and ascent with exact line search.
//!
//! # Algorithm
//!
//! Each iteration evaluates the gradient at the current point. If its
//! Euclidean norm is below the tolerance the run has converged. Otherwise the
//! [line search](crate::line_search) picks a step size `h` along the search
//! direction (the negated gradient for descent, the gradient for ascent) and
//! the point moves to `point + h * direction`.
//!
//! The step is always taken, even when it worsens the objective. With an
//! exact line search on an indefinite or concave objective, descent can walk
//! toward a maximum along the line; [`classify`](crate::classify) the final
//! point to find out what was reached.
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] per iteration, after the iteration's record
//! is appended to the history. A converging iteration emits an event with no
//! line search. Observers can return [`Action::StopEarly`] to end the run
//! after the current step is applied.

mod action;
mod config;
mod error;
mod event;
mod record;
mod solution;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use record::IterationRecord;
pub use solution::{Solution, Status};

use steepest_core::{Observer, SymbolicModel};

use crate::{
    Goal,
    evaluate::{self, EvaluationError},
    line_search::find_step_size,
};

/// Runs steepest descent (or ascent) from `initial`.
///
/// See the [module docs](self) for details on the iteration and events.
///
/// # Errors
///
/// Returns [`Error::Dimension`] if `initial` does not have one coordinate
/// per model variable, and [`Error::Evaluation`] if the objective or gradient
/// is undefined at a visited point. The latter carries the history gathered
/// before the failure.
pub fn optimize<Obs>(
    model: &SymbolicModel,
    goal: Goal,
    initial: &[f64],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    if initial.len() != model.dimension() {
        return Err(Error::Dimension {
            expected: model.dimension(),
            actual: initial.len(),
        });
    }

    let mut point = initial.to_vec();
    let mut history: Vec<IterationRecord> = Vec::new();
    let mut status = Status::Exhausted;

    for iter in 1..=config.max_iters() {
        let record = match IterationRecord::at(model, iter, &point) {
            Ok(record) => record,
            Err(source) => return Err(Error::evaluation(iter, source, history)),
        };

        if record.gradient_norm < config.tolerance() {
            history.push(record);
            if let Some(record) = history.last() {
                observer.observe(&Event::converged(record));
            }
            status = Status::Converged;
            break;
        }

        let search = find_step_size(
            model,
            goal,
            &point,
            &record.gradient,
            config.line_search(),
        );
        let next = evaluate::advance(&point, &search.direction, search.step);

        history.push(IterationRecord {
            step: Some(search.step),
            ..record
        });
        let action = history
            .last()
            .and_then(|record| observer.observe(&Event::stepped(record, &search, &next)));

        point = next;
        if matches!(action, Some(Action::StopEarly)) {
            status = Status::StoppedByObserver;
            break;
        }
    }

    let objective = match evaluate::objective(model, &point) {
        Ok(value) => value,
        Err(source) => return Err(Error::evaluation(history.len() + 1, source, history)),
    };

    Ok(Solution {
        status,
        point,
        objective,
        history,
    })
}

/// Runs steepest descent toward a minimum.
///
/// # Errors
///
/// See [`optimize`].
pub fn minimize<Obs>(
    model: &SymbolicModel,
    initial: &[f64],
    config: &Config,
    observer: Obs,
) -> Result<Solution, Error>
where
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    optimize(model, Goal::Minimize, initial, config, observer)
}

/// Runs steepest descent toward a minimum without observer support.
///
/// # Errors
///
/// See [`optimize`].
pub fn minimize_unobserved(
    model: &SymbolicModel,
    initial: &[f64],
    config: &Config,
) -> Result<Solution, Error> {
    minimize(model, initial, config, ())
}

/// Runs steepest ascent toward a maximum.
///
/// # Errors
///
/// See [`optimize`].
pub fn maximize<Obs>(
    model: &SymbolicModel,
    initial: &[f64],
    config: &Config,
    observer: Obs,
) -> Result<Solution, Error>
where
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    optimize(model, Goal::Maximize, initial, config, observer)
}

/// Runs steepest ascent toward a maximum without observer support.
///
/// # Errors
///
/// See [`optimize`].
pub fn maximize_unobserved(
    model: &SymbolicModel,
    initial: &[f64],
    config: &Config,
) -> Result<Solution, Error> {
    maximize(model, initial, config, ())
}

impl IterationRecord {
    /// Evaluates the gradient, its norm and the objective at `point`.
    fn at(model: &SymbolicModel, iter: usize, point: &[f64]) -> Result<Self, EvaluationError> {
        let gradient = evaluate::gradient(model, point)?;
        let objective = evaluate::objective(model, point)?;
        Ok(Self {
            iter,
            point: point.to_vec(),
            objective,
            gradient_norm: evaluate::norm(&gradient),
            gradient,
            step: None,
        })
    }
}
