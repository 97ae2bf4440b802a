use approx::assert_relative_eq;

use steepest_core::{EvalError, SymbolicModel};

use crate::{
    Goal,
    evaluate::EvaluationError,
    line_search::{Method, golden_section},
};

use super::{
    Action, Config, Error, Event, Status, maximize_unobserved, minimize, minimize_unobserved,
    optimize,
};

fn model(text: &str, variables: &[&str]) -> SymbolicModel {
    SymbolicModel::parse(text, variables).expect("valid objective")
}

fn reference() -> SymbolicModel {
    model("2*x*y + 4*x - 2*x**2 - y**2", &["x", "y"])
}

#[test]
fn reference_run_reaches_the_critical_point() {
    let solution = minimize_unobserved(&reference(), &[0.5, 0.5], &Config::default())
        .expect("should converge");

    assert_eq!(solution.status, Status::Converged);
    assert!(solution.iters() < 100);

    let first = &solution.history[0];
    assert_eq!(first.iter, 1);
    assert_relative_eq!(first.objective, 1.75);
    assert_relative_eq!(first.gradient[0], 3.0);
    assert_relative_eq!(first.gradient[1], 0.0);
    assert_relative_eq!(first.step.unwrap(), -0.25, epsilon = 1e-12);

    let second = &solution.history[1];
    assert_relative_eq!(second.point[0], 1.25, epsilon = 1e-12);
    assert_relative_eq!(second.point[1], 0.5, epsilon = 1e-12);

    assert_relative_eq!(solution.point[0], 2.0, epsilon = 1e-5);
    assert_relative_eq!(solution.point[1], 2.0, epsilon = 1e-5);
    assert_relative_eq!(solution.objective, 4.0, epsilon = 1e-9);
}

#[test]
fn converged_history_ends_at_the_final_point() {
    let solution = minimize_unobserved(&reference(), &[0.5, 0.5], &Config::default()).unwrap();

    let last = solution.history.last().unwrap();
    assert_eq!(last.point, solution.point);
    assert_eq!(last.step, None);
    assert!(last.gradient_norm < Config::default().tolerance());
    assert!(solution.history[..solution.iters() - 1]
        .iter()
        .all(|record| record.step.is_some()));
    for (i, record) in solution.history.iter().enumerate() {
        assert_eq!(record.iter, i + 1);
    }
}

#[test]
fn isotropic_quadratic_converges_in_one_step() {
    let model = model(
        "3*(x - 1)**2 + 3*(y + 2)**2 + 3*z**2",
        &["x", "y", "z"],
    );

    let solution = minimize_unobserved(&model, &[4.0, -1.0, 7.0], &Config::default()).unwrap();

    assert_eq!(solution.status, Status::Converged);
    assert_eq!(solution.iters(), 2);
    assert_relative_eq!(solution.history[0].step.unwrap(), 1.0 / 6.0, epsilon = 1e-12);
    assert_relative_eq!(solution.point[0], 1.0, epsilon = 1e-12);
    assert_relative_eq!(solution.point[1], -2.0, epsilon = 1e-12);
    assert_relative_eq!(solution.point[2], 0.0, epsilon = 1e-12);
}

#[test]
fn ascent_climbs_to_the_maximum() {
    let model = model("-(x**2 + y**2)", &["x", "y"]);

    let solution = maximize_unobserved(&model, &[1.0, 1.0], &Config::default()).unwrap();

    assert_eq!(solution.status, Status::Converged);
    assert_eq!(solution.iters(), 2);
    assert_relative_eq!(solution.point[0], 0.0, epsilon = 1e-12);
    assert_relative_eq!(solution.point[1], 0.0, epsilon = 1e-12);
    assert_relative_eq!(solution.objective, 0.0, epsilon = 1e-12);
}

#[test]
fn exhausts_the_iteration_budget() {
    let config = Config::new(1, 1e-6).unwrap();

    let solution = minimize_unobserved(&reference(), &[0.5, 0.5], &config).unwrap();

    assert_eq!(solution.status, Status::Exhausted);
    assert_eq!(solution.iters(), 1);
    assert_relative_eq!(solution.point[0], 1.25, epsilon = 1e-12);
    assert_relative_eq!(solution.point[1], 0.5, epsilon = 1e-12);
    assert_relative_eq!(solution.objective, 2.875, epsilon = 1e-12);
}

#[test]
fn fallback_still_makes_progress() {
    let model = model("exp(x) + x**2", &["x"]);

    let mut fallbacks = 0;
    let observer = |event: &Event<'_>| {
        if let Some(search) = event.line_search {
            assert!(matches!(search.method, Method::GoldenSection { .. }));
            fallbacks += 1;
        }
        None
    };
    let solution = minimize(&model, &[1.0], &Config::default(), observer).unwrap();

    assert_eq!(solution.status, Status::Converged);
    assert!(fallbacks >= 1);
    assert!(solution.iters() <= 5);
    assert_relative_eq!(solution.point[0], -0.351_733_711_249_195_8, epsilon = 1e-6);
    assert!(solution.objective < solution.history[0].objective);
}

#[test]
fn rejects_wrong_dimension() {
    let result = minimize_unobserved(&reference(), &[1.0, 2.0, 3.0], &Config::default());

    assert_eq!(
        result,
        Err(Error::Dimension {
            expected: 2,
            actual: 3
        })
    );
}

#[test]
fn evaluation_failure_keeps_partial_history() {
    // A zero-width fallback bracket forces h = 4, which moves x from 2 to 0,
    // where the gradient 1 - 1/x is undefined.
    let model = model("x - log(x)", &["x"]);
    let line_search = golden_section::Config::new([4.0, 4.0], 1e-6, 200).unwrap();
    let config = Config::default().with_line_search(line_search);

    let error = minimize_unobserved(&model, &[2.0], &config).unwrap_err();

    let Error::Evaluation { iter, source, .. } = &error else {
        panic!("expected an evaluation error, got {error:?}");
    };
    assert_eq!(*iter, 2);
    assert_eq!(
        *source,
        EvaluationError::Gradient {
            index: 0,
            point: vec![0.0],
            source: EvalError::DivisionByZero,
        }
    );
    assert_eq!(error.history().len(), 1);
    assert_eq!(error.history()[0].step, Some(4.0));
}

#[test]
fn failure_at_the_start_has_no_history() {
    let model = model("sqrt(x)", &["x"]);

    let error = minimize_unobserved(&model, &[-1.0], &Config::default()).unwrap_err();

    assert!(matches!(error, Error::Evaluation { iter: 1, .. }));
    assert!(error.history().is_empty());
}

#[test]
fn observer_sees_every_iteration() {
    let mut seen = Vec::new();
    let observer = |event: &Event<'_>| {
        seen.push((event.record.iter, event.is_converged()));
        if let (Some(search), Some(next)) = (event.line_search, event.next_point) {
            for ((p, d), n) in event.record.point.iter().zip(&search.direction).zip(next) {
                assert_relative_eq!(p + search.step * d, *n);
            }
        }
        None
    };

    let solution = optimize(
        &reference(),
        Goal::Minimize,
        &[0.5, 0.5],
        &Config::default(),
        observer,
    )
    .unwrap();

    assert_eq!(seen.len(), solution.iters());
    assert_eq!(seen.last(), Some(&(solution.iters(), true)));
    assert!(seen[..seen.len() - 1].iter().all(|(_, converged)| !converged));
}

#[test]
fn observer_can_stop_early() {
    let observer = |event: &Event<'_>| (event.record.iter == 2).then_some(Action::StopEarly);

    let solution = minimize(&reference(), &[0.5, 0.5], &Config::default(), observer).unwrap();

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_eq!(solution.iters(), 2);
    // Stopping takes effect after the step is applied.
    assert_relative_eq!(solution.point[0], 1.25, epsilon = 1e-12);
    assert_relative_eq!(solution.point[1], 1.25, epsilon = 1e-12);
}

#[test]
fn runs_are_independent() {
    let model = reference();
    let config = Config::default();

    let first = minimize_unobserved(&model, &[0.5, 0.5], &config).unwrap();
    let second = minimize_unobserved(&model, &[0.5, 0.5], &config).unwrap();

    assert_eq!(first, second);
}

#[test]
fn short_point_is_rejected_before_any_search() {
    let result = minimize_unobserved(&reference(), &[1.0], &Config::default());

    assert_eq!(
        result,
        Err(Error::Dimension {
            expected: 2,
            actual: 1
        })
    );
}
