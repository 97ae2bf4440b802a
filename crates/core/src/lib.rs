//! Core types and traits for steepest descent.
//!
//! This crate defines the shared abstractions that solvers and observers
//! build on:
//!
//! - [`Expr`] — a symbolic expression over indexed variables, with parsing,
//!   differentiation, substitution, evaluation, and printing
//! - [`Polynomial`] — a dense real polynomial extracted from an [`Expr`]
//! - [`SymbolicModel`] — an objective with its gradient and Hessian, built once
//! - [`Observer`] — receives solver events and optionally returns control actions

mod error;
mod model;
mod observer;

pub mod expr;
pub mod poly;

pub use error::ExpressionError;
pub use expr::{EvalError, Expr, Func};
pub use model::SymbolicModel;
pub use observer::Observer;
pub use poly::Polynomial;
