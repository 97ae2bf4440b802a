//! Real roots of a polynomial.
//!
//! Degrees one and two use closed forms. Higher degrees take the eigenvalues
//! of the companion matrix, keep the ones that are real to within a small
//! tolerance, and polish them with a few Newton steps.

use nalgebra::DMatrix;

use steepest_core::Polynomial;

/// Imaginary parts up to this fraction of `1 + |re|` are treated as zero.
const IMAG_TOL: f64 = 1e-9;

/// Roots closer than this fraction of `1 + |r|` are merged.
const MERGE_TOL: f64 = 1e-9;

const NEWTON_STEPS: usize = 4;

/// Returns the distinct real roots of `p`, sorted ascending.
///
/// Constant polynomials have no isolated roots, so the result is empty.
pub(super) fn real_roots(p: &Polynomial) -> Vec<f64> {
    let mut roots = match *p.coefficients() {
        [] | [_] => Vec::new(),
        [c0, c1] => vec![-c0 / c1],
        [c, b, a] => quadratic(a, b, c),
        _ => companion(p),
    };

    roots.retain(|r| r.is_finite());
    roots.sort_by(f64::total_cmp);
    roots.dedup_by(|a, b| (*a - *b).abs() <= MERGE_TOL * (1.0 + b.abs()));
    roots
}

/// Solves `a t² + b t + c = 0` without cancellation.
#[allow(clippy::float_cmp)]
fn quadratic(a: f64, b: f64, c: f64) -> Vec<f64> {
    let mut disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        // Rounding can push a double root slightly negative.
        if disc.abs() > 1e-12 * (b * b).max((4.0 * a * c).abs()) {
            return Vec::new();
        }
        disc = 0.0;
    }

    let q = -0.5 * (b + b.signum() * disc.sqrt());
    if q == 0.0 {
        // Only when b = 0 and c = 0.
        return vec![0.0];
    }
    vec![q / a, c / q]
}

fn companion(p: &Polynomial) -> Vec<f64> {
    let coeffs = p.coefficients();
    let n = p.degree();
    let lead = coeffs[n];

    let mut matrix = DMatrix::<f64>::zeros(n, n);
    for i in 1..n {
        matrix[(i, i - 1)] = 1.0;
    }
    for (i, c) in coeffs[..n].iter().enumerate() {
        matrix[(i, n - 1)] = -c / lead;
    }

    let derivative = p.derivative();
    matrix
        .complex_eigenvalues()
        .iter()
        .filter(|z| z.im.abs() <= IMAG_TOL * (1.0 + z.re.abs()))
        .map(|z| polish(p, &derivative, z.re))
        .collect()
}

/// Refines a root estimate with Newton's method, keeping only improvements.
#[allow(clippy::float_cmp)]
fn polish(p: &Polynomial, derivative: &Polynomial, mut t: f64) -> f64 {
    for _ in 0..NEWTON_STEPS {
        let slope = derivative.eval(t);
        if slope == 0.0 {
            break;
        }
        let next = t - p.eval(t) / slope;
        if !next.is_finite() || p.eval(next).abs() >= p.eval(t).abs() {
            break;
        }
        t = next;
    }
    t
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn roots_of(coeffs: &[f64]) -> Vec<f64> {
        real_roots(&Polynomial::new(coeffs.to_vec()))
    }

    #[test]
    fn constant_has_no_roots() {
        assert!(roots_of(&[]).is_empty());
        assert!(roots_of(&[3.0]).is_empty());
    }

    #[test]
    fn linear_root() {
        // -9 - 36h = 0
        assert_eq!(roots_of(&[-9.0, -36.0]), vec![-0.25]);
    }

    #[test]
    fn quadratic_roots_are_sorted() {
        // (t - 1)(t + 3) = t² + 2t - 3
        let roots = roots_of(&[-3.0, 2.0, 1.0]);
        assert_eq!(roots.len(), 2);
        assert_relative_eq!(roots[0], -3.0);
        assert_relative_eq!(roots[1], 1.0);
    }

    #[test]
    fn quadratic_double_and_missing_roots() {
        // (t - 2)²
        let roots = roots_of(&[4.0, -4.0, 1.0]);
        assert_eq!(roots.len(), 1);
        assert_relative_eq!(roots[0], 2.0);

        assert!(roots_of(&[1.0, 0.0, 1.0]).is_empty());
        assert_eq!(roots_of(&[0.0, 0.0, 5.0]), vec![0.0]);
    }

    #[test]
    fn quadratic_avoids_cancellation() {
        // t² - 1e8 t + 1 has a root near 1e-8.
        let roots = roots_of(&[1.0, -1e8, 1.0]);
        assert_relative_eq!(roots[0], 1e-8, max_relative = 1e-12);
        assert_relative_eq!(roots[1], 1e8, max_relative = 1e-12);
    }

    #[test]
    fn cubic_roots_from_companion_matrix() {
        // (t + 2)(t - 0.5)(t - 3) = t³ - 1.5t² - 5.5t + 3
        let roots = roots_of(&[3.0, -5.5, -1.5, 1.0]);
        assert_eq!(roots.len(), 3);
        assert_relative_eq!(roots[0], -2.0, epsilon = 1e-10);
        assert_relative_eq!(roots[1], 0.5, epsilon = 1e-10);
        assert_relative_eq!(roots[2], 3.0, epsilon = 1e-10);
    }

    #[test]
    fn complex_pairs_are_dropped() {
        // (t - 1)(t² + 1) = t³ - t² + t - 1
        let roots = roots_of(&[-1.0, 1.0, -1.0, 1.0]);
        assert_eq!(roots.len(), 1);
        assert_relative_eq!(roots[0], 1.0, epsilon = 1e-10);
    }

    #[test]
    fn symmetric_cubic_roots() {
        // 4t³ - 4t, the derivative of t⁴ - 2t²
        let roots = roots_of(&[0.0, -4.0, 0.0, 4.0]);
        assert_eq!(roots.len(), 3);
        assert_relative_eq!(roots[0], -1.0, epsilon = 1e-10);
        assert_relative_eq!(roots[1], 0.0, epsilon = 1e-10);
        assert_relative_eq!(roots[2], 1.0, epsilon = 1e-10);
    }
}
