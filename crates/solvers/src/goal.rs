/// The optimization direction.
///
/// Solvers always minimize internally. [`Goal::transform`] maps an objective
/// value to the score being minimized, and [`Goal::direction`] maps a gradient
/// to the search direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Goal {
    /// Find a minimum by following the negated gradient.
    #[default]
    Minimize,

    /// Find a maximum by following the gradient.
    Maximize,
}

impl Goal {
    /// Transforms an objective value into a score to minimize.
    ///
    /// - [`Goal::Minimize`]: returns the value unchanged
    /// - [`Goal::Maximize`]: negates the value
    #[inline]
    pub fn transform(self, value: f64) -> f64 {
        match self {
            Self::Minimize => value,
            Self::Maximize => -value,
        }
    }

    /// Returns the search direction for a gradient.
    ///
    /// No check is made for a zero gradient; callers only search when the
    /// gradient norm exceeds their tolerance.
    pub fn direction(self, gradient: &[f64]) -> Vec<f64> {
        match self {
            Self::Minimize => gradient.iter().map(|g| -g).collect(),
            Self::Maximize => gradient.to_vec(),
        }
    }

    /// Returns `true` if `candidate` is strictly better than `incumbent`.
    pub fn is_better(self, candidate: f64, incumbent: f64) -> bool {
        self.transform(candidate) < self.transform(incumbent)
    }
}
