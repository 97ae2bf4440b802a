use crate::ExpressionError;

use super::{Expr, Func};

/// Parses `text` into an expression over `variables`.
///
/// Precedence, lowest first: `+ -`, `* /`, unary signs, `**`/`^`. Powers are
/// right-associative and bind tighter than a leading minus, so `-x**2` is
/// `-(x**2)` and `2**-1` is `2**(-1)`.
pub(super) fn parse<S: AsRef<str>>(text: &str, variables: &[S]) -> Result<Expr, ExpressionError> {
    let tokens = tokenize(text)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        end: text.len(),
        variables,
    };

    let expr = parser.sum()?;
    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(ExpressionError::parse(
            token.offset,
            format!("unexpected {}", token.kind.describe()),
        )),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Kind {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

impl Kind {
    fn describe(&self) -> String {
        match self {
            Self::Number(value) => format!("number `{value}`"),
            Self::Ident(name) => format!("identifier `{name}`"),
            Self::Plus => "`+`".into(),
            Self::Minus => "`-`".into(),
            Self::Star => "`*`".into(),
            Self::Slash => "`/`".into(),
            Self::Caret => "power operator".into(),
            Self::LParen => "`(`".into(),
            Self::RParen => "`)`".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Token {
    kind: Kind,
    offset: usize,
}

fn tokenize(text: &str) -> Result<Vec<Token>, ExpressionError> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        let start = i;

        let kind = match c {
            b' ' | b'\t' | b'\n' | b'\r' => {
                i += 1;
                continue;
            }
            b'+' => Kind::Plus,
            b'-' => Kind::Minus,
            b'/' => Kind::Slash,
            b'^' => Kind::Caret,
            b'(' => Kind::LParen,
            b')' => Kind::RParen,
            b'*' if bytes.get(i + 1) == Some(&b'*') => {
                i += 1;
                Kind::Caret
            }
            b'*' => Kind::Star,
            b'0'..=b'9' | b'.' => {
                i = scan_number(bytes, i);
                let literal = &text[start..i];
                let value = literal.parse::<f64>().map_err(|_| {
                    ExpressionError::parse(start, format!("invalid number `{literal}`"))
                })?;
                tokens.push(Token {
                    kind: Kind::Number(value),
                    offset: start,
                });
                continue;
            }
            c if c.is_ascii_alphabetic() || c == b'_' => {
                while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                    i += 1;
                }
                tokens.push(Token {
                    kind: Kind::Ident(text[start..i].to_owned()),
                    offset: start,
                });
                continue;
            }
            _ => {
                let found = text[start..].chars().next().unwrap_or('?');
                return Err(ExpressionError::parse(
                    start,
                    format!("unexpected character `{found}`"),
                ));
            }
        };

        i += 1;
        tokens.push(Token { kind, offset: start });
    }

    Ok(tokens)
}

/// Returns the end of the numeric literal starting at `start`.
fn scan_number(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
        i += 1;
    }

    // Exponent only if digits follow, so `2e` stays a number then an identifier.
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }

    i
}

struct Parser<'a, S> {
    tokens: Vec<Token>,
    pos: usize,
    end: usize,
    variables: &'a [S],
}

impl<S: AsRef<str>> Parser<'_, S> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next_if(&mut self, kind: &Kind) -> bool {
        if self.peek().is_some_and(|token| token.kind == *kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn sum(&mut self) -> Result<Expr, ExpressionError> {
        let mut expr = self.product()?;
        loop {
            if self.next_if(&Kind::Plus) {
                expr = Expr::sum(expr, self.product()?);
            } else if self.next_if(&Kind::Minus) {
                expr = Expr::difference(expr, self.product()?);
            } else {
                return Ok(expr);
            }
        }
    }

    fn product(&mut self) -> Result<Expr, ExpressionError> {
        let mut expr = self.unary()?;
        loop {
            if self.next_if(&Kind::Star) {
                expr = Expr::product(expr, self.unary()?);
            } else if self.next_if(&Kind::Slash) {
                expr = Expr::quotient(expr, self.unary()?);
            } else {
                return Ok(expr);
            }
        }
    }

    fn unary(&mut self) -> Result<Expr, ExpressionError> {
        if self.next_if(&Kind::Minus) {
            return Ok(Expr::negate(self.unary()?));
        }
        if self.next_if(&Kind::Plus) {
            return self.unary();
        }
        self.power()
    }

    fn power(&mut self) -> Result<Expr, ExpressionError> {
        let base = self.atom()?;
        if self.next_if(&Kind::Caret) {
            let exponent = self.unary()?;
            return Ok(Expr::power(base, exponent));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Expr, ExpressionError> {
        let Some(token) = self.tokens.get(self.pos).cloned() else {
            return Err(ExpressionError::parse(self.end, "unexpected end of expression"));
        };
        self.pos += 1;

        match token.kind {
            Kind::Number(value) => Ok(Expr::Const(value)),
            Kind::LParen => {
                let inner = self.sum()?;
                self.expect_close(token.offset)?;
                Ok(inner)
            }
            Kind::Ident(name) if self.next_if(&Kind::LParen) => {
                let func = Func::from_name(&name).ok_or(ExpressionError::UnknownFunction(name))?;
                let arg = self.sum()?;
                self.expect_close(token.offset)?;
                Ok(Expr::call(func, arg))
            }
            Kind::Ident(name) => self.resolve(name),
            other => Err(ExpressionError::parse(
                token.offset,
                format!("expected a value, found {}", other.describe()),
            )),
        }
    }

    fn expect_close(&mut self, open: usize) -> Result<(), ExpressionError> {
        if self.next_if(&Kind::RParen) {
            Ok(())
        } else {
            let offset = self.peek().map_or(self.end, |token| token.offset);
            Err(ExpressionError::parse(
                offset,
                format!("unclosed `(` opened at offset {open}"),
            ))
        }
    }

    fn resolve(&self, name: String) -> Result<Expr, ExpressionError> {
        if let Some(index) = self.variables.iter().position(|v| v.as_ref() == name) {
            return Ok(Expr::Var(index));
        }
        match Expr::named_constant(&name) {
            Some(value) => Ok(Expr::Const(value)),
            None => Err(ExpressionError::UndeclaredVariable(name)),
        }
    }
}
