use std::collections::HashSet;

use crate::{
    ExpressionError,
    expr::{Expr, Named},
};

/// An objective expression together with its gradient and Hessian.
///
/// The variable list fixes the coordinate order of every point the model is
/// evaluated at. The gradient and Hessian are derived once, at construction,
/// and the model is immutable afterwards, so a single model can back any
/// number of independent optimization runs.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolicModel {
    variables: Vec<String>,
    objective: Expr,
    gradient: Vec<Expr>,
    hessian: Vec<Vec<Expr>>,
}

impl SymbolicModel {
    /// Parses `objective` over the ordered `variables`.
    ///
    /// # Errors
    ///
    /// Returns an [`ExpressionError`] if the variable list is empty, contains
    /// duplicates or invalid names, or if the text fails to parse or
    /// references an undeclared symbol.
    pub fn parse<S: AsRef<str>>(objective: &str, variables: &[S]) -> Result<Self, ExpressionError> {
        let variables = validate_variables(variables)?;
        let objective = Expr::parse(objective, &variables)?;
        Ok(Self::build(objective, variables))
    }

    /// Builds a model from an already constructed expression.
    ///
    /// # Errors
    ///
    /// Returns an [`ExpressionError`] if the variable list is invalid or the
    /// expression references a variable index outside of it.
    pub fn new<S: AsRef<str>>(objective: Expr, variables: &[S]) -> Result<Self, ExpressionError> {
        let variables = validate_variables(variables)?;
        if let Some(&index) = objective.variables().last() {
            if index >= variables.len() {
                return Err(ExpressionError::VariableOutOfRange {
                    index,
                    count: variables.len(),
                });
            }
        }
        Ok(Self::build(objective, variables))
    }

    fn build(objective: Expr, variables: Vec<String>) -> Self {
        let n = variables.len();
        let gradient: Vec<Expr> = (0..n).map(|i| objective.derivative(i)).collect();
        let hessian = gradient
            .iter()
            .map(|partial| (0..n).map(|j| partial.derivative(j)).collect())
            .collect();

        Self {
            variables,
            objective,
            gradient,
            hessian,
        }
    }

    /// Returns the variable names in coordinate order.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Returns the number of variables.
    pub fn dimension(&self) -> usize {
        self.variables.len()
    }

    pub fn objective(&self) -> &Expr {
        &self.objective
    }

    /// Returns `∂f/∂xᵢ` for each variable, in coordinate order.
    pub fn gradient(&self) -> &[Expr] {
        &self.gradient
    }

    /// Returns the Hessian; entry `[i][j]` is `∂/∂xⱼ (∂f/∂xᵢ)`.
    pub fn hessian(&self) -> &[Vec<Expr>] {
        &self.hessian
    }

    /// Returns a printable view of `expr` using this model's variable names.
    pub fn display<'a>(&'a self, expr: &'a Expr) -> Named<'a, String> {
        expr.named(&self.variables)
    }
}

fn validate_variables<S: AsRef<str>>(variables: &[S]) -> Result<Vec<String>, ExpressionError> {
    if variables.is_empty() {
        return Err(ExpressionError::NoVariables);
    }

    let mut seen = HashSet::new();
    variables
        .iter()
        .map(|name| {
            let name = name.as_ref();
            if !is_identifier(name) {
                return Err(ExpressionError::InvalidVariable(name.to_owned()));
            }
            if !seen.insert(name) {
                return Err(ExpressionError::DuplicateVariable(name.to_owned()));
            }
            Ok(name.to_owned())
        })
        .collect()
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
