//! Steepest descent and ascent over symbolic objectives.
//!
//! The pieces, in the order data flows through them:
//!
//! - [`evaluate`] — evaluates a [`SymbolicModel`]'s objective, gradient and
//!   Hessian at a numeric point
//! - [`line_search`] — picks the step size along the search direction, exactly
//!   when the directional derivative is a polynomial and by golden section
//!   search otherwise
//! - [`descent`] — the iteration driver: gradient, convergence test, line
//!   search, update, history
//! - [`classify`] — labels the final point from the Hessian's eigenvalues
//!
//! [`SymbolicModel`]: steepest_core::SymbolicModel

mod goal;

pub mod classify;
pub mod descent;
pub mod evaluate;
pub mod line_search;

pub use goal::Goal;
