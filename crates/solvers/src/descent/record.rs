/// What one iteration saw and did.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IterationRecord {
    /// 1-based iteration number.
    pub iter: usize,

    /// The point at the start of the iteration.
    pub point: Vec<f64>,

    /// Objective value at `point`.
    pub objective: f64,

    /// Gradient at `point`.
    pub gradient: Vec<f64>,

    /// Euclidean norm of `gradient`.
    pub gradient_norm: f64,

    /// The step size taken, or `None` on the iteration that converged.
    pub step: Option<f64>,
}
