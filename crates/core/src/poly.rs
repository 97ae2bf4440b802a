//! Dense real polynomials in one variable.
//!
//! [`Polynomial::from_expr`] recognizes expressions that are polynomials in a
//! chosen variable, which is how a directional derivative `g'(h)` is turned
//! into something with closed-form or companion-matrix roots.

use std::ops::{Add, Mul, Neg, Sub};

use crate::Expr;

/// Largest integer exponent expanded when extracting a polynomial.
const MAX_EXPANDED_POWER: f64 = 64.0;

/// A polynomial with coefficients in ascending order of degree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polynomial {
    coeffs: Vec<f64>,
}

impl Polynomial {
    /// Creates a polynomial from ascending coefficients.
    ///
    /// Trailing exact zeros are dropped; the zero polynomial has no
    /// coefficients.
    #[must_use]
    pub fn new(mut coeffs: Vec<f64>) -> Self {
        while coeffs.last() == Some(&0.0) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// The polynomial `t`.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(vec![0.0, 1.0])
    }

    /// Returns coefficients in ascending order of degree.
    pub fn coefficients(&self) -> &[f64] {
        &self.coeffs
    }

    /// Returns the degree; constants (including zero) have degree 0.
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Returns the value if the polynomial is constant.
    pub fn as_constant(&self) -> Option<f64> {
        match self.coeffs.as_slice() {
            [] => Some(0.0),
            [c] => Some(*c),
            _ => None,
        }
    }

    /// Evaluates with Horner's rule.
    pub fn eval(&self, t: f64) -> f64 {
        self.coeffs.iter().rev().fold(0.0, |acc, c| acc * t + c)
    }

    #[must_use]
    pub fn derivative(&self) -> Self {
        Self::new(
            self.coeffs
                .iter()
                .enumerate()
                .skip(1)
                .map(|(power, c)| c * power as f64)
                .collect(),
        )
    }

    /// Drops leading coefficients that are negligible next to the largest.
    ///
    /// Floating-point cancellation can leave a `1e-17` where an exact
    /// computation gives zero; treating it as a real leading term would
    /// invent spurious roots far from the origin.
    #[must_use]
    pub fn trimmed(&self, rel_tol: f64) -> Self {
        let scale = self.coeffs.iter().fold(0.0_f64, |m, c| m.max(c.abs()));
        let mut coeffs = self.coeffs.clone();
        while coeffs.last().is_some_and(|c| c.abs() <= rel_tol * scale) {
            coeffs.pop();
        }
        Self::new(coeffs)
    }

    fn scale(&self, factor: f64) -> Self {
        Self::new(self.coeffs.iter().map(|c| c * factor).collect())
    }

    fn powi(&self, n: usize) -> Self {
        (0..n).fold(Self::constant(1.0), |acc, _| &acc * self)
    }

    /// Extracts `expr` as a polynomial in the variable at index `var`.
    ///
    /// Returns `None` if the expression references another variable, divides
    /// by a non-constant, raises a non-constant to anything other than a
    /// non-negative integer (up to 64), or applies a function to a
    /// non-constant argument. Constant subexpressions are folded, so
    /// `sin(2) * t` is accepted.
    #[must_use]
    pub fn from_expr(expr: &Expr, var: usize) -> Option<Self> {
        let poly = match expr {
            Expr::Const(value) => Self::constant(*value),
            Expr::Var(index) if *index == var => Self::identity(),
            Expr::Var(_) => return None,
            Expr::Neg(e) => -Self::from_expr(e, var)?,
            Expr::Add(a, b) => &Self::from_expr(a, var)? + &Self::from_expr(b, var)?,
            Expr::Sub(a, b) => &Self::from_expr(a, var)? - &Self::from_expr(b, var)?,
            Expr::Mul(a, b) => &Self::from_expr(a, var)? * &Self::from_expr(b, var)?,
            Expr::Div(a, b) => {
                let divisor = Self::from_expr(b, var)?.as_constant()?;
                if divisor == 0.0 {
                    return None;
                }
                Self::from_expr(a, var)?.scale(1.0 / divisor)
            }
            Expr::Pow(a, b) => {
                let base = Self::from_expr(a, var)?;
                let exponent = Self::from_expr(b, var)?.as_constant()?;
                if let Some(c) = base.as_constant() {
                    Self::constant(Expr::power(c.into(), exponent.into()).as_const()?)
                } else if exponent >= 0.0
                    && exponent.fract() == 0.0
                    && exponent <= MAX_EXPANDED_POWER
                {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    let n = exponent as usize;
                    base.powi(n)
                } else {
                    return None;
                }
            }
            Expr::Call(func, arg) => {
                let arg = Self::from_expr(arg, var)?.as_constant()?;
                Self::constant(Expr::call(*func, arg.into()).as_const()?)
            }
        };

        poly.coeffs.iter().all(|c| c.is_finite()).then_some(poly)
    }
}

impl Neg for Polynomial {
    type Output = Self;

    fn neg(self) -> Self {
        self.scale(-1.0)
    }
}

impl Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: Self) -> Polynomial {
        let len = self.coeffs.len().max(rhs.coeffs.len());
        let at = |p: &Polynomial, i: usize| p.coeffs.get(i).copied().unwrap_or(0.0);
        Polynomial::new((0..len).map(|i| at(self, i) + at(rhs, i)).collect())
    }
}

impl Sub for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: Self) -> Polynomial {
        self + &rhs.scale(-1.0)
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Self) -> Polynomial {
        if self.coeffs.is_empty() || rhs.coeffs.is_empty() {
            return Polynomial::new(Vec::new());
        }
        let mut coeffs = vec![0.0; self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] += a * b;
            }
        }
        Polynomial::new(coeffs)
    }
}
