use approx::assert_relative_eq;

use super::{Config, Status, minimize};

#[test]
fn minimizes_cubic() {
    // x³ - 4x has a local minimum at 2/√3 inside [-2, 2].
    let expected_x = 2.0 / 3.0_f64.sqrt();

    let solution = minimize(|x: f64| x.powi(3) - 4.0 * x, &Config::default());

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x, expected_x, epsilon = 1e-6);
    assert!(solution.iters < 40, "took {} iterations", solution.iters);
}

#[test]
fn maximizes_by_negating() {
    let expected_x = -2.0 / 3.0_f64.sqrt();

    let solution = minimize(|x: f64| -(x.powi(3) - 4.0 * x), &Config::default());

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x, expected_x, epsilon = 1e-6);
}

#[test]
fn undefined_points_are_avoided() {
    let score = |x: f64| if x < 0.0 { f64::INFINITY } else { (x - 1.0).powi(2) };

    let solution = minimize(score, &Config::default());

    assert_relative_eq!(solution.x, 1.0, epsilon = 1e-6);
}

#[test]
fn optimum_outside_bracket_lands_on_the_edge() {
    let solution = minimize(|x: f64| (x - 10.0).powi(2), &Config::default());

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x, 2.0, epsilon = 1e-6);
}

#[test]
fn stops_at_iteration_limit() {
    let config = Config::new([-2.0, 2.0], 0.0, 10).unwrap();

    let solution = minimize(|x: f64| x * x, &config);

    assert_eq!(solution.status, Status::MaxIters);
    assert_eq!(solution.iters, 10);
}

#[test]
fn is_deterministic() {
    let score = |x: f64| (x - 0.3).powi(2) + (3.0 * x).sin();
    let config = Config::default();

    assert_eq!(minimize(score, &config), minimize(score, &config));
}

#[test]
fn honors_custom_bracket() {
    let config = Config::new([5.0, 0.0], 1e-9, 200).unwrap();

    let solution = minimize(|x: f64| (x - 4.0).powi(2), &config);

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x, 4.0, epsilon = 1e-8);
}
