//! Critical-point classification from the Hessian.
//!
//! The eigenvalue test is authoritative: a point is a minimum when every
//! eigenvalue of the Hessian is strictly positive, a maximum when every one is
//! strictly negative, and a saddle otherwise. A zero eigenvalue counts as
//! neither sign, so semidefinite Hessians are reported as saddles.
//!
//! For two variables, the determinant/trace shortcut is also reported. It
//! agrees with the eigenvalue test whenever it is conclusive.

use std::fmt;

use nalgebra::{DMatrix, DVector};

use steepest_core::SymbolicModel;

use crate::evaluate::{self, EvaluationError};

/// The kind of critical point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Nature {
    Minimum,
    Maximum,
    Saddle,
}

impl fmt::Display for Nature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Minimum => "Local Minimum",
            Self::Maximum => "Local Maximum",
            Self::Saddle => "Saddle Point",
        })
    }
}

/// The outcome of the two-variable determinant/trace test.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeterminantTest {
    pub determinant: f64,
    pub trace: f64,

    /// `None` when the test is inconclusive.
    pub nature: Option<Nature>,
}

impl DeterminantTest {
    /// Applies the test to a 2×2 Hessian.
    ///
    /// - `det > 0` and `tr > 0`: minimum
    /// - `det > 0` and `tr < 0`: maximum
    /// - `det < 0`: saddle
    /// - otherwise: inconclusive
    #[must_use]
    pub fn new(hessian: &DMatrix<f64>) -> Self {
        let determinant = hessian.determinant();
        let trace = hessian.trace();
        let nature = if determinant > 0.0 && trace > 0.0 {
            Some(Nature::Minimum)
        } else if determinant > 0.0 && trace < 0.0 {
            Some(Nature::Maximum)
        } else if determinant < 0.0 {
            Some(Nature::Saddle)
        } else {
            None
        };

        Self {
            determinant,
            trace,
            nature,
        }
    }
}

/// The Hessian at a point and what it says about the point.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub hessian: DMatrix<f64>,

    /// Eigenvalues of `hessian`, ascending.
    pub eigenvalues: DVector<f64>,

    pub nature: Nature,

    /// Present only for two-variable models.
    pub determinant_test: Option<DeterminantTest>,
}

/// Classifies `point` from the model's Hessian.
///
/// The point is not checked for being critical; classifying a point with a
/// nonzero gradient describes the local curvature only.
///
/// # Errors
///
/// Returns an [`EvaluationError`] if a Hessian entry is undefined at `point`.
pub fn classify(model: &SymbolicModel, point: &[f64]) -> Result<Analysis, EvaluationError> {
    let hessian = evaluate::hessian(model, point)?;

    let mut values: Vec<f64> = hessian.symmetric_eigenvalues().iter().copied().collect();
    values.sort_by(f64::total_cmp);
    let eigenvalues = DVector::from_vec(values);

    let nature = if eigenvalues.iter().all(|&v| v > 0.0) {
        Nature::Minimum
    } else if eigenvalues.iter().all(|&v| v < 0.0) {
        Nature::Maximum
    } else {
        Nature::Saddle
    };

    let determinant_test = (model.dimension() == 2).then(|| DeterminantTest::new(&hessian));

    Ok(Analysis {
        hessian,
        eigenvalues,
        nature,
        determinant_test,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn analyze(text: &str, variables: &[&str], point: &[f64]) -> Analysis {
        let model = SymbolicModel::parse(text, variables).unwrap();
        classify(&model, point).unwrap()
    }

    #[test]
    fn reference_critical_point_is_a_maximum() {
        let analysis = analyze("2*x*y + 4*x - 2*x**2 - y**2", &["x", "y"], &[2.0, 2.0]);

        assert_eq!(analysis.nature, Nature::Maximum);
        assert_eq!(analysis.nature.to_string(), "Local Maximum");
        assert_eq!(
            analysis.hessian,
            DMatrix::from_row_slice(2, 2, &[-4.0, 2.0, 2.0, -2.0])
        );

        // λ = -3 ∓ √5
        assert_relative_eq!(analysis.eigenvalues[0], -3.0 - 5.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(analysis.eigenvalues[1], -3.0 + 5.0_f64.sqrt(), epsilon = 1e-12);

        let test = analysis.determinant_test.unwrap();
        assert_relative_eq!(test.determinant, 4.0, epsilon = 1e-12);
        assert_relative_eq!(test.trace, -6.0);
        assert_eq!(test.nature, Some(Nature::Maximum));
    }

    #[test]
    fn bowl_is_a_minimum() {
        let analysis = analyze("x**2 + y**2", &["x", "y"], &[0.0, 0.0]);
        assert_eq!(analysis.nature, Nature::Minimum);
        assert_eq!(
            analysis.determinant_test.and_then(|t| t.nature),
            Some(Nature::Minimum)
        );
    }

    #[test]
    fn saddle_has_mixed_signs() {
        let analysis = analyze("x**2 - y**2", &["x", "y"], &[0.0, 0.0]);
        assert_eq!(analysis.nature, Nature::Saddle);
        assert_eq!(
            analysis.determinant_test.and_then(|t| t.nature),
            Some(Nature::Saddle)
        );
    }

    #[test]
    fn zero_eigenvalue_is_a_saddle_and_inconclusive() {
        let analysis = analyze("x**2", &["x", "y"], &[0.0, 0.0]);
        assert_eq!(analysis.nature, Nature::Saddle);

        let test = analysis.determinant_test.unwrap();
        assert_relative_eq!(test.determinant, 0.0);
        assert_eq!(test.nature, None);
    }

    #[test]
    fn determinant_test_only_for_two_variables() {
        let one = analyze("x**4 + x**2", &["x"], &[0.0]);
        assert_eq!(one.nature, Nature::Minimum);
        assert!(one.determinant_test.is_none());

        let three = analyze("-(x**2) - y**2 - z**2 + x*y", &["x", "y", "z"], &[0.0, 0.0, 0.0]);
        assert_eq!(three.nature, Nature::Maximum);
        assert!(three.determinant_test.is_none());
        let values = three.eigenvalues.as_slice();
        assert!(values.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn quadratic_tests_agree_when_conclusive() {
        let objectives = [
            "3*x**2 + x*y + 2*y**2",
            "-x**2 + 3*x*y - 5*y**2",
            "x*y",
            "2*x**2 - 7*x*y + y**2",
            "-4*x**2 - y**2",
        ];
        for text in objectives {
            let analysis = analyze(text, &["x", "y"], &[0.3, -1.2]);
            let test = analysis.determinant_test.unwrap();
            if let Some(nature) = test.nature {
                assert_eq!(nature, analysis.nature, "{text}");
            }
        }
    }
}
