use steepest_core::Observer;
use steepest_solvers::{
    descent::Event,
    line_search::{LineSearch, Method},
};
use tracing::{debug, info};

/// Emits one `tracing` event per solver iteration.
///
/// Steps are logged at `DEBUG` with the iteration, objective, gradient norm,
/// step size and line search method as fields. Convergence is logged at
/// `INFO`. The observer never alters the run.
///
/// Install a subscriber (for example `tracing_subscriber::fmt`) to see the
/// output.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl<A> Observer<Event<'_>, A> for LogObserver {
    fn observe(&mut self, event: &Event<'_>) -> Option<A> {
        let record = event.record;

        let Some(search) = event.line_search else {
            info!(
                iter = record.iter,
                objective = record.objective,
                gradient_norm = record.gradient_norm,
                "converged"
            );
            return None;
        };

        if let Method::GoldenSection { reason, solution } = &search.method {
            debug!(
                iter = record.iter,
                reason = %reason,
                status = ?solution.status,
                bracket_iters = solution.iters,
                "exact line search failed, used golden section"
            );
        }

        debug!(
            iter = record.iter,
            objective = record.objective,
            gradient_norm = record.gradient_norm,
            step = search.step,
            method = method_name(search),
            "step taken"
        );
        None
    }
}

fn method_name(search: &LineSearch) -> &'static str {
    if search.used_fallback() {
        "golden_section"
    } else {
        "exact"
    }
}
