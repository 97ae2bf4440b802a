//! Symbolic expression trees.
//!
//! An [`Expr`] is an immutable tree over numeric constants and indexed
//! variables. Variables are referenced by position, so one tree can be
//! evaluated at any point whose coordinates follow the same order. Names are
//! only needed to parse text and to print.
//!
//! The constructors [`Expr::sum`], [`Expr::product`] and friends fold
//! constants and drop identity operands as they build, which keeps
//! derivatives small. The arithmetic operators on `Expr` use them.

mod diff;
mod display;
mod eval;
mod parse;

use std::{
    collections::BTreeSet,
    f64::consts,
    fmt,
    ops::{Add, Div, Mul, Neg, Sub},
};

use crate::ExpressionError;

pub use display::Named;
pub use eval::EvalError;

/// A symbolic scalar expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expr {
    /// A numeric constant.
    Const(f64),

    /// The variable at this position in the owning variable list.
    Var(usize),

    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),

    /// `base ** exponent`.
    Pow(Box<Expr>, Box<Expr>),

    /// A built-in function applied to one argument.
    Call(Func, Box<Expr>),
}

/// Built-in single-argument functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Exp,
    /// Natural logarithm; parsed from both `ln` and `log`.
    Ln,
    Sqrt,
}

impl Func {
    /// Looks up a function by the name used in expression text.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" => Some(Self::Tan),
            "exp" => Some(Self::Exp),
            "ln" | "log" => Some(Self::Ln),
            "sqrt" => Some(Self::Sqrt),
            _ => None,
        }
    }

    /// Returns the name used when printing.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Exp => "exp",
            Self::Ln => "log",
            Self::Sqrt => "sqrt",
        }
    }

    /// Applies the function without domain checks.
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Exp => x.exp(),
            Self::Ln => x.ln(),
            Self::Sqrt => x.sqrt(),
        }
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Expr {
    /// Parses expression text, resolving identifiers against `variables`.
    ///
    /// The grammar accepts numbers, identifiers, `+ - * /`, powers written as
    /// `**` or `^`, unary signs, parentheses, the functions `sin cos tan exp
    /// log ln sqrt`, and the constants `pi` and `E`. A declared variable
    /// shadows a constant of the same name.
    ///
    /// # Errors
    ///
    /// Returns an [`ExpressionError`] if the text is malformed, calls an
    /// unknown function, or names an undeclared variable.
    pub fn parse<S: AsRef<str>>(text: &str, variables: &[S]) -> Result<Self, ExpressionError> {
        parse::parse(text, variables)
    }

    /// Returns the named constants recognized by the parser.
    pub(crate) fn named_constant(name: &str) -> Option<f64> {
        match name {
            "pi" => Some(consts::PI),
            "E" => Some(consts::E),
            _ => None,
        }
    }

    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::Const(value)
    }

    #[must_use]
    pub fn var(index: usize) -> Self {
        Self::Var(index)
    }

    /// Returns the value if this expression is a constant.
    pub fn as_const(&self) -> Option<f64> {
        match self {
            Self::Const(value) => Some(*value),
            _ => None,
        }
    }

    #[allow(clippy::float_cmp)]
    fn is_const(&self, value: f64) -> bool {
        self.as_const() == Some(value)
    }

    /// Builds `-e`, folding constants and double negation.
    #[must_use]
    pub fn negate(e: Self) -> Self {
        match e {
            Self::Const(value) => Self::Const(-value),
            Self::Neg(inner) => *inner,
            other => Self::Neg(Box::new(other)),
        }
    }

    /// Builds `a + b`.
    #[must_use]
    pub fn sum(a: Self, b: Self) -> Self {
        match (a.as_const(), b.as_const()) {
            (Some(x), Some(y)) => Self::Const(x + y),
            _ if a.is_const(0.0) => b,
            _ if b.is_const(0.0) => a,
            _ => Self::Add(Box::new(a), Box::new(b)),
        }
    }

    /// Builds `a - b`.
    #[must_use]
    pub fn difference(a: Self, b: Self) -> Self {
        match (a.as_const(), b.as_const()) {
            (Some(x), Some(y)) => Self::Const(x - y),
            _ if b.is_const(0.0) => a,
            _ if a.is_const(0.0) => Self::negate(b),
            _ => Self::Sub(Box::new(a), Box::new(b)),
        }
    }

    /// Builds `a * b`.
    ///
    /// A constant factor is moved to the front and merged with any constant
    /// already leading the other operand, so `2 * (2 * x)` becomes `4 * x`.
    #[must_use]
    pub fn product(a: Self, b: Self) -> Self {
        match (a, b) {
            (Self::Const(x), Self::Const(y)) => Self::Const(x * y),
            (Self::Const(c), other) | (other, Self::Const(c)) => Self::scaled(c, other),
            (a, b) => Self::Mul(Box::new(a), Box::new(b)),
        }
    }

    #[allow(clippy::float_cmp)]
    fn scaled(factor: f64, e: Self) -> Self {
        if factor == 0.0 {
            return Self::Const(0.0);
        }
        if factor == 1.0 {
            return e;
        }
        if factor == -1.0 {
            return Self::negate(e);
        }
        match e {
            Self::Mul(lead, rest) => match *lead {
                Self::Const(inner) => Self::scaled(factor * inner, *rest),
                lead => Self::Mul(
                    Box::new(Self::Const(factor)),
                    Box::new(Self::Mul(Box::new(lead), rest)),
                ),
            },
            Self::Neg(inner) => Self::scaled(-factor, *inner),
            other => Self::Mul(Box::new(Self::Const(factor)), Box::new(other)),
        }
    }

    /// Builds `a / b`.
    ///
    /// Division by a constant zero is kept symbolic so that evaluation
    /// reports it.
    #[must_use]
    pub fn quotient(a: Self, b: Self) -> Self {
        match (a.as_const(), b.as_const()) {
            (Some(x), Some(y)) if y != 0.0 => Self::Const(x / y),
            _ if b.is_const(1.0) => a,
            _ if a.is_const(0.0) && !b.is_const(0.0) => Self::Const(0.0),
            _ => Self::Div(Box::new(a), Box::new(b)),
        }
    }

    /// Builds `base ** exponent`.
    #[must_use]
    pub fn power(base: Self, exponent: Self) -> Self {
        match (base.as_const(), exponent.as_const()) {
            (Some(b), Some(e)) if b.powf(e).is_finite() && !(b < 0.0 && e.fract() != 0.0) => {
                Self::Const(b.powf(e))
            }
            (_, Some(e)) if e == 0.0 => Self::Const(1.0),
            (_, Some(e)) if e == 1.0 => base,
            _ => Self::Pow(Box::new(base), Box::new(exponent)),
        }
    }

    /// Builds `func(arg)`, folding constant arguments inside the domain.
    #[must_use]
    pub fn call(func: Func, arg: Self) -> Self {
        match arg.as_const() {
            Some(x) if func.apply(x).is_finite() => Self::Const(func.apply(x)),
            _ => Self::Call(func, Box::new(arg)),
        }
    }

    /// Builds `self ** exponent`.
    #[must_use]
    pub fn pow(self, exponent: impl Into<Self>) -> Self {
        Self::power(self, exponent.into())
    }

    /// Replaces every variable with the expression `f` returns for its index.
    ///
    /// The tree is rebuilt with the folding constructors, so substituting
    /// constants collapses the affected subtrees.
    #[must_use]
    pub fn substitute<F>(&self, f: &F) -> Self
    where
        F: Fn(usize) -> Self,
    {
        match self {
            Self::Const(value) => Self::Const(*value),
            Self::Var(index) => f(*index),
            Self::Neg(e) => Self::negate(e.substitute(f)),
            Self::Add(a, b) => Self::sum(a.substitute(f), b.substitute(f)),
            Self::Sub(a, b) => Self::difference(a.substitute(f), b.substitute(f)),
            Self::Mul(a, b) => Self::product(a.substitute(f), b.substitute(f)),
            Self::Div(a, b) => Self::quotient(a.substitute(f), b.substitute(f)),
            Self::Pow(a, b) => Self::power(a.substitute(f), b.substitute(f)),
            Self::Call(func, e) => Self::call(*func, e.substitute(f)),
        }
    }

    /// Returns the indices of all variables the expression references.
    pub fn variables(&self) -> BTreeSet<usize> {
        let mut found = BTreeSet::new();
        self.collect_variables(&mut found);
        found
    }

    fn collect_variables(&self, found: &mut BTreeSet<usize>) {
        match self {
            Self::Const(_) => {}
            Self::Var(index) => {
                found.insert(*index);
            }
            Self::Neg(e) | Self::Call(_, e) => e.collect_variables(found),
            Self::Add(a, b)
            | Self::Sub(a, b)
            | Self::Mul(a, b)
            | Self::Div(a, b)
            | Self::Pow(a, b) => {
                a.collect_variables(found);
                b.collect_variables(found);
            }
        }
    }

    /// Returns a printable view that renders variables by name.
    pub fn named<'a, S: AsRef<str>>(&'a self, names: &'a [S]) -> Named<'a, S> {
        Named::new(self, names)
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Self::Const(value)
    }
}

impl Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self {
        Self::negate(self)
    }
}

impl Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::sum(self, rhs)
    }
}

impl Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::difference(self, rhs)
    }
}

impl Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::product(self, rhs)
    }
}

impl Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self::quotient(self, rhs)
    }
}
