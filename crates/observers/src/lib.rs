//! Reusable observers for steepest descent runs.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work with the solvers in `steepest-solvers`.
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for reusable observers
//!   ([`HasGradientNorm`], [`HasObjective`], [`CanStopEarly`])
//!
//! # Observers
//!
//! - [`TraceObserver`] — Builds a human-readable, step-by-step trace of a run,
//!   finished with the critical-point analysis.
//! - [`LogObserver`] — Emits structured `tracing` events per iteration.
//!
//! [`Observer`]: steepest_core::Observer
//! [`HasGradientNorm`]: traits::HasGradientNorm
//! [`HasObjective`]: traits::HasObjective
//! [`CanStopEarly`]: traits::CanStopEarly

pub mod traits;

mod log;
mod trace;

pub use log::LogObserver;
pub use trace::TraceObserver;
