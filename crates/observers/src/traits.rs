//! Capability traits for reusable observers.
//!
//! These traits abstract over solver-specific event and action types, so an
//! observer can be written once against the capabilities it needs.
//!
//! # Event traits
//!
//! - [`HasGradientNorm`] — events that carry a gradient norm
//! - [`HasObjective`] — events that carry an objective value
//!
//! # Action traits
//!
//! - [`CanStopEarly`] — actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use steepest_core::Observer;
//! use steepest_observers::traits::{CanStopEarly, HasGradientNorm};
//!
//! struct GoodEnough {
//!     tolerance: f64,
//!     min_iters: usize,
//!     iter: usize,
//! }
//!
//! impl<E: HasGradientNorm, A: CanStopEarly> Observer<E, A> for GoodEnough {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         self.iter += 1;
//!         if self.iter >= self.min_iters && event.gradient_norm() < self.tolerance {
//!             return Some(A::stop_early());
//!         }
//!         None
//!     }
//! }
//! ```

use steepest_solvers::descent;

/// An event that carries a gradient norm.
pub trait HasGradientNorm {
    /// Returns the Euclidean norm of the gradient for this event.
    fn gradient_norm(&self) -> f64;
}

/// An event that carries an objective value.
pub trait HasObjective {
    /// Returns the objective for this event.
    fn objective(&self) -> f64;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

impl HasGradientNorm for descent::Event<'_> {
    fn gradient_norm(&self) -> f64 {
        self.record.gradient_norm
    }
}

impl HasObjective for descent::Event<'_> {
    fn objective(&self) -> f64 {
        self.record.objective
    }
}

impl CanStopEarly for descent::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
