use thiserror::Error;

use super::{Expr, Func};

/// Errors that can occur when evaluating an expression at a point.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("{func} is undefined at {arg}")]
    Domain { func: Func, arg: f64 },

    #[error("{base} raised to {exponent} is not real")]
    NonRealPower { base: f64, exponent: f64 },

    #[error("variable index {0} has no value")]
    Unbound(usize),

    #[error("result is not finite")]
    NonFinite,
}

impl Expr {
    /// Evaluates the expression with `values[i]` bound to variable `i`.
    ///
    /// # Errors
    ///
    /// Returns an [`EvalError`] if any subexpression leaves the real numbers:
    /// division by zero, a logarithm of a non-positive value, a square root
    /// of a negative value, a non-real power, or a non-finite result.
    pub fn eval(&self, values: &[f64]) -> Result<f64, EvalError> {
        let value = match self {
            Self::Const(value) => *value,
            Self::Var(index) => *values.get(*index).ok_or(EvalError::Unbound(*index))?,
            Self::Neg(e) => -e.eval(values)?,
            Self::Add(a, b) => a.eval(values)? + b.eval(values)?,
            Self::Sub(a, b) => a.eval(values)? - b.eval(values)?,
            Self::Mul(a, b) => a.eval(values)? * b.eval(values)?,
            Self::Div(a, b) => {
                let numerator = a.eval(values)?;
                let denominator = b.eval(values)?;
                if denominator == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                numerator / denominator
            }
            Self::Pow(a, b) => power(a.eval(values)?, b.eval(values)?)?,
            Self::Call(func, e) => call(*func, e.eval(values)?)?,
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::NonFinite)
        }
    }
}

fn power(base: f64, exponent: f64) -> Result<f64, EvalError> {
    if base == 0.0 && exponent < 0.0 {
        return Err(EvalError::DivisionByZero);
    }
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(EvalError::NonRealPower { base, exponent });
    }
    Ok(base.powf(exponent))
}

fn call(func: Func, arg: f64) -> Result<f64, EvalError> {
    let outside = match func {
        Func::Ln => arg <= 0.0,
        Func::Sqrt => arg < 0.0,
        Func::Sin | Func::Cos | Func::Tan | Func::Exp => false,
    };
    if outside {
        return Err(EvalError::Domain { func, arg });
    }
    Ok(func.apply(arg))
}
