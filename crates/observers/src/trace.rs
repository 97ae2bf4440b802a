//! A human-readable, step-by-step trace of a steepest descent run.
//!
//! [`TraceObserver`] writes the gradient formulas, each iteration's gradient,
//! the line search algebra, the point update and whether the objective
//! improved. [`TraceObserver::finish`] appends the final results and the
//! critical-point analysis and returns the text.
//!
//! Each observer holds the trace of one run. Create a new one per call.
//!
//! # Example
//!
//! ```rust
//! use steepest_core::SymbolicModel;
//! use steepest_observers::TraceObserver;
//! use steepest_solvers::{Goal, classify::classify, descent};
//!
//! let model = SymbolicModel::parse("x**2 + y**2", &["x", "y"]).unwrap();
//! let config = descent::Config::default();
//!
//! let mut trace = TraceObserver::new(&model, Goal::Minimize, &config);
//! let solution = descent::minimize(&model, &[1.0, 1.0], &config, &mut trace).unwrap();
//! let analysis = classify(&model, &solution.point).ok();
//!
//! let text = trace.finish(&solution, analysis.as_ref());
//! assert!(text.contains("Local Minimum"));
//! ```

use std::fmt::{self, Write};

use steepest_core::{Expr, Observer, Polynomial, SymbolicModel};
use steepest_solvers::{
    Goal,
    classify::Analysis,
    descent::{self, Event, IterationRecord, Solution},
    evaluate,
    line_search::{LineSearch, Method, STEP_VARIABLE},
};

const WIDE_RULE: &str =
    "================================================================================";
const NARROW_RULE: &str = "========================================";
const THIN_RULE: &str =
    "--------------------------------------------------------------------------------";

/// Builds the step-by-step trace of one run.
///
/// Pass `&mut TraceObserver` to a solver so the trace can be finished after
/// the run completes.
pub struct TraceObserver<'m> {
    model: &'m SymbolicModel,
    goal: Goal,
    tolerance: f64,
    text: String,
}

impl<'m> TraceObserver<'m> {
    /// Creates an empty trace for a run of `model` toward `goal`.
    ///
    /// The tolerance is read from `config` for the convergence message.
    #[must_use]
    pub fn new(model: &'m SymbolicModel, goal: Goal, config: &descent::Config) -> Self {
        Self {
            model,
            goal,
            tolerance: config.tolerance(),
            text: String::new(),
        }
    }

    /// Returns the trace written so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Appends the final results and returns the complete trace.
    ///
    /// Without an `analysis`, the Hessian section reports that the
    /// classification is unavailable.
    #[must_use]
    pub fn finish(mut self, solution: &Solution, analysis: Option<&Analysis>) -> String {
        // Writing to a String cannot fail.
        let _ = self.write_results(solution, analysis);
        self.text
    }

    fn record(&mut self, event: &Event<'_>) -> fmt::Result {
        let record = event.record;
        if record.iter == 1 {
            self.write_header(record)?;
        }
        self.write_gradient(record)?;

        let (Some(search), Some(next)) = (event.line_search, event.next_point) else {
            let out = &mut self.text;
            writeln!(
                out,
                "\n CONVERGED! Gradient norm {:.6} < tolerance {}",
                record.gradient_norm, self.tolerance
            )?;
            return writeln!(
                out,
                "The gradient is approximately zero, indicating we're at a critical point."
            );
        };

        self.write_line_search(record, search)?;
        self.write_update(record, search, next)?;
        self.write_improvement(record, next)
    }

    fn write_header(&mut self, record: &IterationRecord) -> fmt::Result {
        let names = self.model.variables().join(", ");
        let (method, target) = match self.goal {
            Goal::Minimize => ("Steepest Descent", "minimum"),
            Goal::Maximize => ("Steepest Ascent", "maximum"),
        };
        let coordinates = record
            .point
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        let out = &mut self.text;
        writeln!(out, "\n{WIDE_RULE}")?;
        writeln!(out, "{method} Algorithm - Detailed Steps")?;
        writeln!(out, "{WIDE_RULE}")?;
        writeln!(
            out,
            "Function: f({names}) = {}",
            self.model.display(self.model.objective())
        )?;
        writeln!(out, "Objective: Find {target}")?;
        writeln!(out, "Initial point: {:?}", record.point)?;
        writeln!(
            out,
            "Initial function value: f({coordinates}) = {}",
            record.objective
        )?;

        writeln!(out, "\nGradient formulas:")?;
        for (name, partial) in self.model.variables().iter().zip(self.model.gradient()) {
            writeln!(out, "  ∂f/∂{name} = {}", self.model.display(partial))?;
        }
        writeln!(out, "{THIN_RULE}")
    }

    fn write_gradient(&mut self, record: &IterationRecord) -> fmt::Result {
        let out = &mut self.text;
        writeln!(out, "\n ITERATION {}:", record.iter)?;
        writeln!(out, "{NARROW_RULE}")?;
        writeln!(
            out,
            "Step 1: Calculate gradient at current point {:?}",
            record.point
        )?;
        for ((name, partial), value) in self
            .model
            .variables()
            .iter()
            .zip(self.model.gradient())
            .zip(&record.gradient)
        {
            writeln!(
                out,
                "  ∂f/∂{name} = {} = {value}",
                self.model.display(partial)
            )?;
        }
        writeln!(out, "  Gradient vector: ∇f = {}", fixed(&record.gradient))?;
        writeln!(out, "  Gradient norm: ||∇f|| = {:.6}", record.gradient_norm)
    }

    fn write_line_search(&mut self, record: &IterationRecord, search: &LineSearch) -> fmt::Result {
        let kind = match self.goal {
            Goal::Minimize => "descent",
            Goal::Maximize => "ascent",
        };

        let out = &mut self.text;
        writeln!(out, "\nStep 2: Find optimal step size")?;
        writeln!(
            out,
            "    Direction vector (for {kind}): {}",
            fixed(&search.direction)
        )?;
        writeln!(out, "    Formula: x_(i+1) = x_i + {STEP_VARIABLE} * direction")?;
        writeln!(out, "    New point expressions:")?;
        for ((name, p), d) in self
            .model
            .variables()
            .iter()
            .zip(&record.point)
            .zip(&search.direction)
        {
            let moved = Expr::constant(*p) + Expr::constant(*d) * Expr::var(0);
            writeln!(
                out,
                "      {name}_(i+1) = {p} + {STEP_VARIABLE} * ({d}) = {}",
                LineSearch::display(&moved)
            )?;
        }

        let directional = &search.directional;
        writeln!(
            out,
            "\n    g({STEP_VARIABLE}) = f(x_(i+1)) = {}",
            LineSearch::display(&directional.objective)
        )?;
        writeln!(
            out,
            "    dg/d{STEP_VARIABLE} = {}",
            LineSearch::display(&directional.derivative)
        )?;
        if let Some(expanded) = Polynomial::from_expr(&directional.derivative, 0) {
            writeln!(
                out,
                "    Expanded: dg/d{STEP_VARIABLE} = {}",
                polynomial(&expanded)
            )?;
        }
        writeln!(out, "    Setting dg/d{STEP_VARIABLE} = 0 to find optimal {STEP_VARIABLE}:")?;

        match &search.method {
            Method::Exact { roots } => {
                writeln!(out, "    Real roots: {roots:?}")?;
            }
            Method::GoldenSection { reason, solution } => {
                writeln!(
                    out,
                    "    Analytical solution failed ({reason}), using golden section search"
                )?;
                writeln!(
                    out,
                    "    Golden section search: {:?} after {} iterations",
                    solution.status, solution.iters
                )?;
            }
        }
        writeln!(out, "    Solution: {STEP_VARIABLE} = {}", search.step)
    }

    fn write_update(
        &mut self,
        record: &IterationRecord,
        search: &LineSearch,
        next: &[f64],
    ) -> fmt::Result {
        let out = &mut self.text;
        writeln!(out, "\nStep 3: Update point using optimal step size")?;
        writeln!(out, "  Step size {STEP_VARIABLE} = {:.6}", search.step)?;
        writeln!(out, "  Direction vector: {}", fixed(&search.direction))?;
        writeln!(out, "  New point calculation:")?;
        for (((name, p), d), n) in self
            .model
            .variables()
            .iter()
            .zip(&record.point)
            .zip(&search.direction)
            .zip(next)
        {
            writeln!(
                out,
                "    {name}_(new) = {p} + ({:.6}) * ({d:.6}) = {n:.6}",
                search.step
            )?;
        }
        Ok(())
    }

    fn write_improvement(&mut self, record: &IterationRecord, next: &[f64]) -> fmt::Result {
        let old = record.objective;

        let out = &mut self.text;
        writeln!(out, "\nStep 4: Verify improvement")?;
        writeln!(out, "  f(old point) = {old:.6}")?;
        match evaluate::objective(self.model, next) {
            Ok(new) => {
                writeln!(out, "  f(new point) = {new:.6}")?;
                let better = self.goal.is_better(new, old);
                let relation = match (self.goal, better) {
                    (Goal::Minimize, true) => "<",
                    (Goal::Minimize, false) => ">=",
                    (Goal::Maximize, true) => ">",
                    (Goal::Maximize, false) => "<=",
                };
                let verdict = if better { "Better" } else { "Worse" };
                writeln!(out, "  {verdict}: {new:.6} {relation} {old:.6}")
            }
            Err(error) => writeln!(out, "  f(new point) is undefined: {error}"),
        }
    }

    fn write_results(&mut self, solution: &Solution, analysis: Option<&Analysis>) -> fmt::Result {
        let model = self.model;
        let out = &mut self.text;

        writeln!(out, "\n{WIDE_RULE}")?;
        writeln!(out, " FINAL RESULTS")?;
        writeln!(out, "{WIDE_RULE}")?;
        writeln!(
            out,
            "Status: {:?} after {} iterations",
            solution.status,
            solution.iters()
        )?;
        let coordinates = model
            .variables()
            .iter()
            .zip(&solution.point)
            .map(|(name, value)| format!("{name}={value:.6}"))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(out, "Optimal point: ({coordinates})")?;
        writeln!(out, "Optimal value: {:.6}", solution.objective)?;

        writeln!(out, "\nHessian Analysis:")?;
        writeln!(out, "Hessian matrix symbolic form:")?;
        for row in model.hessian() {
            let entries = row
                .iter()
                .map(|entry| model.display(entry).to_string())
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(out, "  [{entries}]")?;
        }

        let Some(analysis) = analysis else {
            return writeln!(out, "Hessian could not be evaluated at the final point.");
        };

        writeln!(out, "Hessian matrix at optimal point:")?;
        for row in analysis.hessian.row_iter() {
            let values: Vec<f64> = row.iter().copied().collect();
            writeln!(out, "  {}", fixed(&values))?;
        }
        writeln!(out, "Eigenvalues: {}", fixed(analysis.eigenvalues.as_slice()))?;
        writeln!(out, "Nature of critical point: {}", analysis.nature)?;

        if let Some(test) = &analysis.determinant_test {
            writeln!(out, "Determinant: {:.6}", test.determinant)?;
            writeln!(out, "Trace: {:.6}", test.trace)?;
            match test.nature {
                Some(nature) if test.determinant < 0.0 => {
                    writeln!(out, " det(H) < 0 → {nature}")?;
                }
                Some(nature) if test.trace > 0.0 => {
                    writeln!(out, " det(H) > 0 and tr(H) > 0 → {nature}")?;
                }
                Some(nature) => {
                    writeln!(out, " det(H) > 0 and tr(H) < 0 → {nature}")?;
                }
                None => writeln!(out, "  Inconclusive test")?,
            }
        }
        Ok(())
    }
}

impl<A> Observer<Event<'_>, A> for TraceObserver<'_> {
    fn observe(&mut self, event: &Event<'_>) -> Option<A> {
        // Writing to a String cannot fail.
        let _ = self.record(event);
        None
    }
}

/// Allows `&mut TraceObserver` to be passed to solvers that take an observer
/// by value, so [`TraceObserver::finish`] can be called after the run.
impl<A> Observer<Event<'_>, A> for &mut TraceObserver<'_> {
    fn observe(&mut self, event: &Event<'_>) -> Option<A> {
        (**self).observe(event)
    }
}

/// Formats values as `[a, b, ...]` with six decimals.
fn fixed(values: &[f64]) -> String {
    let inner = values
        .iter()
        .map(|v| format!("{v:.6}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{inner}]")
}

/// Formats a polynomial in the step size, lowest degree first.
#[allow(clippy::float_cmp)]
fn polynomial(p: &Polynomial) -> String {
    let mut text = String::new();
    for (degree, &c) in p.coefficients().iter().enumerate() {
        if c == 0.0 {
            continue;
        }

        let magnitude = c.abs();
        if text.is_empty() {
            if c < 0.0 {
                text.push('-');
            }
        } else {
            text.push_str(if c < 0.0 { " - " } else { " + " });
        }

        let unit = magnitude == 1.0;
        let _ = match degree {
            0 => write!(text, "{magnitude}"),
            1 if unit => write!(text, "{STEP_VARIABLE}"),
            1 => write!(text, "{magnitude}*{STEP_VARIABLE}"),
            _ if unit => write!(text, "{STEP_VARIABLE}**{degree}"),
            _ => write!(text, "{magnitude}*{STEP_VARIABLE}**{degree}"),
        };
    }

    if text.is_empty() {
        text.push('0');
    }
    text
}

#[cfg(test)]
mod tests {
    use steepest_solvers::classify::classify;

    use super::*;

    fn run(text: &str, variables: &[&str], goal: Goal, initial: &[f64]) -> String {
        let model = SymbolicModel::parse(text, variables).unwrap();
        let config = descent::Config::default();

        let mut trace = TraceObserver::new(&model, goal, &config);
        let solution = descent::optimize(&model, goal, initial, &config, &mut trace).unwrap();
        let analysis = classify(&model, &solution.point).ok();
        trace.finish(&solution, analysis.as_ref())
    }

    #[test]
    fn reference_trace_shows_each_step() {
        let text = run(
            "2*x*y + 4*x - 2*x**2 - y**2",
            &["x", "y"],
            Goal::Minimize,
            &[0.5, 0.5],
        );

        assert!(text.contains("Steepest Descent Algorithm - Detailed Steps"));
        assert!(text.contains("Function: f(x, y) = 2*x*y + 4*x - 2*x**2 - y**2"));
        assert!(text.contains("Initial function value: f(0.5, 0.5) = 1.75"));
        assert!(text.contains("  ∂f/∂x = 2*y + 4 - 4*x\n"));
        assert!(text.contains(" ITERATION 1:"));
        assert!(text.contains("  Gradient vector: ∇f = [3.000000, 0.000000]"));
        assert!(text.contains("      x_(i+1) = 0.5 + h * (-3) = 0.5 - 3*h"));
        assert!(text.contains("    Expanded: dg/dh = -9 - 36*h"));
        assert!(text.contains("    Solution: h = -0.25"));
        assert!(text.contains("    x_(new) = 0.5 + (-0.250000) * (-3.000000) = 1.250000"));
        assert!(text.contains("  Worse: 2.875000 >= 1.750000"));
        assert!(text.contains(" CONVERGED!"));
        assert!(text.contains("Optimal point: (x=2.000000, y=2.000000)"));
        assert!(text.contains("Optimal value: 4.000000"));
        assert!(text.contains("  [-4, 2]\n  [2, -2]"));
        assert!(text.contains("Nature of critical point: Local Maximum"));
        assert!(text.contains(" det(H) > 0 and tr(H) < 0 → Local Maximum"));
    }

    #[test]
    fn ascent_trace_reports_improvement() {
        let text = run("-(x**2 + y**2)", &["x", "y"], Goal::Maximize, &[1.0, 1.0]);

        assert!(text.contains("Steepest Ascent Algorithm"));
        assert!(text.contains("Objective: Find maximum"));
        assert!(text.contains("Direction vector (for ascent): [-2.000000, -2.000000]"));
        assert!(text.contains("  Better: "));
        assert!(text.contains(" > -2.000000"));
        assert!(text.contains("Nature of critical point: Local Maximum"));
    }

    #[test]
    fn fallback_is_explained() {
        let text = run("exp(x) + x**2", &["x"], Goal::Minimize, &[1.0]);

        assert!(text.contains(
            "Analytical solution failed (directional derivative is not a polynomial in h)"
        ));
        assert!(!text.contains("Expanded:"));
        assert!(!text.contains("Determinant:"));
    }

    #[test]
    fn each_run_has_its_own_trace() {
        let first = run("x**2 + y**2", &["x", "y"], Goal::Minimize, &[1.0, 1.0]);
        let second = run("x**2 + y**2", &["x", "y"], Goal::Minimize, &[1.0, 1.0]);

        assert_eq!(first, second);
        assert_eq!(first.matches(" ITERATION 1:").count(), 1);
        assert_eq!(first.matches("FINAL RESULTS").count(), 1);
    }

    #[test]
    fn polynomials_print_lowest_degree_first() {
        assert_eq!(polynomial(&Polynomial::new(vec![-9.0, -36.0])), "-9 - 36*h");
        assert_eq!(polynomial(&Polynomial::new(vec![0.0, 1.0, 0.0, -2.5])), "h - 2.5*h**3");
        assert_eq!(polynomial(&Polynomial::new(vec![])), "0");
    }
}
