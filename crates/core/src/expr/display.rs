use std::fmt;

use super::Expr;

/// A printable view of an [`Expr`] that renders variables by name.
///
/// Parentheses are inserted only where precedence requires them, and powers
/// print as `**`, so the output parses back to an equivalent expression.
pub struct Named<'a, S> {
    expr: &'a Expr,
    names: &'a [S],
}

impl<'a, S: AsRef<str>> Named<'a, S> {
    pub(super) fn new(expr: &'a Expr, names: &'a [S]) -> Self {
        Self { expr, names }
    }
}

impl<S: AsRef<str>> fmt::Display for Named<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(f, self.expr, self.names, Precedence::Sum)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Sum,
    Product,
    Unary,
    Power,
    Atom,
}

fn precedence(expr: &Expr) -> Precedence {
    match expr {
        Expr::Const(value) if value.is_sign_negative() && *value != 0.0 => Precedence::Unary,
        Expr::Const(_) | Expr::Var(_) | Expr::Call(_, _) => Precedence::Atom,
        Expr::Neg(_) => Precedence::Unary,
        Expr::Add(_, _) | Expr::Sub(_, _) => Precedence::Sum,
        Expr::Mul(_, _) | Expr::Div(_, _) => Precedence::Product,
        Expr::Pow(_, _) => Precedence::Power,
    }
}

fn write_expr<S: AsRef<str>>(
    f: &mut fmt::Formatter<'_>,
    expr: &Expr,
    names: &[S],
    min: Precedence,
) -> fmt::Result {
    let wrap = precedence(expr) < min;
    if wrap {
        f.write_str("(")?;
    }

    match expr {
        Expr::Const(value) => write!(f, "{value}")?,
        Expr::Var(index) => match names.get(*index) {
            Some(name) => f.write_str(name.as_ref())?,
            None => write!(f, "_{index}")?,
        },
        Expr::Neg(e) => {
            f.write_str("-")?;
            write_expr(f, e, names, Precedence::Unary)?;
        }
        Expr::Add(a, b) => {
            write_expr(f, a, names, Precedence::Sum)?;
            match negated(b) {
                Some(inner) => {
                    f.write_str(" - ")?;
                    write_negated(f, &inner, names, Precedence::Product)?;
                }
                None => {
                    f.write_str(" + ")?;
                    write_expr(f, b, names, Precedence::Sum)?;
                }
            }
        }
        Expr::Sub(a, b) => {
            write_expr(f, a, names, Precedence::Sum)?;
            f.write_str(" - ")?;
            write_expr(f, b, names, Precedence::Product)?;
        }
        Expr::Mul(a, b) => {
            write_expr(f, a, names, Precedence::Product)?;
            f.write_str("*")?;
            write_expr(f, b, names, Precedence::Power)?;
        }
        Expr::Div(a, b) => {
            write_expr(f, a, names, Precedence::Product)?;
            f.write_str("/")?;
            write_expr(f, b, names, Precedence::Power)?;
        }
        Expr::Pow(a, b) => {
            write_expr(f, a, names, Precedence::Atom)?;
            f.write_str("**")?;
            write_expr(f, b, names, Precedence::Power)?;
        }
        Expr::Call(func, e) => {
            write!(f, "{func}(")?;
            write_expr(f, e, names, Precedence::Sum)?;
            f.write_str(")")?;
        }
    }

    if wrap {
        f.write_str(")")?;
    }
    Ok(())
}

/// The operand of a negation, if `expr` prints with a leading minus.
enum Negated<'a> {
    Expr(&'a Expr),
    Const(f64),
    /// `c * e` with `c > 0`, from a product led by `-c`.
    Scaled(f64, &'a Expr),
}

fn negated(expr: &Expr) -> Option<Negated<'_>> {
    match expr {
        Expr::Neg(inner) => Some(Negated::Expr(inner)),
        Expr::Const(value) if value.is_sign_negative() && *value != 0.0 => {
            Some(Negated::Const(-value))
        }
        Expr::Mul(lead, rest) => match **lead {
            Expr::Const(value) if value.is_sign_negative() && value != 0.0 => {
                Some(Negated::Scaled(-value, rest))
            }
            _ => None,
        },
        _ => None,
    }
}

fn write_negated<S: AsRef<str>>(
    f: &mut fmt::Formatter<'_>,
    negated: &Negated<'_>,
    names: &[S],
    min: Precedence,
) -> fmt::Result {
    match negated {
        Negated::Expr(e) => write_expr(f, e, names, min),
        Negated::Const(value) => write!(f, "{value}"),
        Negated::Scaled(value, e) => {
            write!(f, "{value}*")?;
            write_expr(f, e, names, Precedence::Power)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: [&str; 2] = ["x", "y"];

    fn round_trip(text: &str) -> String {
        let e = Expr::parse(text, &NAMES).unwrap();
        e.named(&NAMES).to_string()
    }

    #[test]
    fn prints_with_minimal_parentheses() {
        assert_eq!(round_trip("2*x*y + 4*x - 2*x**2 - y**2"), "2*x*y + 4*x - 2*x**2 - y**2");
        assert_eq!(round_trip("-(x**2 + y**2)"), "-(x**2 + y**2)");
        assert_eq!(round_trip("(x + 1)**2"), "(x + 1)**2");
        assert_eq!(round_trip("x - (y - 1)"), "x - (y - 1)");
        assert_eq!(round_trip("x / (2*y)"), "x/(2*y)");
        assert_eq!(round_trip("sin(x)**2"), "sin(x)**2");
    }

    #[test]
    fn adding_a_negation_prints_as_subtraction() {
        let e = Expr::var(0) + Expr::constant(-3.0);
        assert_eq!(e.named(&NAMES).to_string(), "x - 3");

        let e = Expr::var(0) + -(Expr::var(1) * Expr::var(1));
        assert_eq!(e.named(&NAMES).to_string(), "x - y*y");

        let e = Expr::constant(0.5) + Expr::constant(-3.0) * Expr::var(0);
        assert_eq!(e.named(&NAMES).to_string(), "0.5 - 3*x");
    }

    #[test]
    fn negative_exponent_is_parenthesized() {
        let e = Expr::var(0).pow(-1.0);
        assert_eq!(e.named(&NAMES).to_string(), "x**(-1)");
    }

    #[test]
    fn printed_text_parses_back() {
        for text in ["exp(x*y)/(1 + y**2)", "-x**2 + 3*sqrt(y)", "x**y**2"] {
            let e = Expr::parse(text, &NAMES).unwrap();
            let printed = e.named(&NAMES).to_string();
            assert_eq!(Expr::parse(&printed, &NAMES).unwrap(), e, "{printed}");
        }
    }
}
