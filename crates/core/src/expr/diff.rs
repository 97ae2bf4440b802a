use super::{Expr, Func};

impl Expr {
    /// Returns the partial derivative with respect to the variable at `var`.
    ///
    /// Applies the sum, product, quotient, power and chain rules. A constant
    /// exponent uses the power rule `n * b^(n-1) * b'`; a variable exponent
    /// uses `b^e * (e' * ln(b) + e * b' / b)`.
    #[must_use]
    pub fn derivative(&self, var: usize) -> Self {
        match self {
            Self::Const(_) => Self::Const(0.0),
            Self::Var(index) => Self::Const(if *index == var { 1.0 } else { 0.0 }),
            Self::Neg(e) => -e.derivative(var),
            Self::Add(a, b) => a.derivative(var) + b.derivative(var),
            Self::Sub(a, b) => a.derivative(var) - b.derivative(var),
            Self::Mul(a, b) => {
                a.derivative(var) * (**b).clone() + (**a).clone() * b.derivative(var)
            }
            Self::Div(a, b) => {
                let numerator = a.derivative(var) * (**b).clone() - (**a).clone() * b.derivative(var);
                numerator / (**b).clone().pow(2.0)
            }
            Self::Pow(base, exponent) => power_derivative(self, base, exponent, var),
            Self::Call(func, arg) => outer_derivative(*func, arg) * arg.derivative(var),
        }
    }
}

fn power_derivative(this: &Expr, base: &Expr, exponent: &Expr, var: usize) -> Expr {
    let d_base = base.derivative(var);

    if let Some(n) = exponent.as_const() {
        return Expr::constant(n) * base.clone().pow(n - 1.0) * d_base;
    }

    let d_exponent = exponent.derivative(var);
    let log_term = d_exponent * Expr::call(Func::Ln, base.clone());
    let base_term = exponent.clone() * d_base / base.clone();
    this.clone() * (log_term + base_term)
}

/// Derivative of `func` with respect to its argument, evaluated at `arg`.
fn outer_derivative(func: Func, arg: &Expr) -> Expr {
    let arg = arg.clone();
    match func {
        Func::Sin => Expr::call(Func::Cos, arg),
        Func::Cos => -Expr::call(Func::Sin, arg),
        Func::Tan => Expr::constant(1.0) / Expr::call(Func::Cos, arg).pow(2.0),
        Func::Exp => Expr::call(Func::Exp, arg),
        Func::Ln => Expr::constant(1.0) / arg,
        Func::Sqrt => Expr::constant(1.0) / (Expr::constant(2.0) * Expr::call(Func::Sqrt, arg)),
    }
}
