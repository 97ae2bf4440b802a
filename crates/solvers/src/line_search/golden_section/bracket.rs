/// The golden ratio: φ = (1 + √5) / 2
const PHI: f64 = 1.618_033_988_749_895;

/// The inverse golden ratio: 1/φ = φ - 1.
const INV_PHI: f64 = PHI - 1.0;

/// An interval `[left, right]` with two interior points at golden-ratio
/// positions.
///
/// Shrinking toward either side reuses one interior point, so each step needs
/// one new evaluation.
#[derive(Debug, Clone, Copy)]
pub(super) struct GoldenBracket {
    pub(super) left: f64,
    pub(super) right: f64,

    /// `left + (1 - φ⁻¹) * width`.
    pub(super) inner_left: f64,

    /// `left + φ⁻¹ * width`.
    pub(super) inner_right: f64,
}

impl GoldenBracket {
    /// Creates a bracket, swapping reversed bounds.
    pub(super) fn new(bounds: [f64; 2]) -> Self {
        let [a, b] = bounds;
        let (left, right) = if a <= b { (a, b) } else { (b, a) };
        let width = right - left;
        Self {
            left,
            right,
            inner_left: left + (1.0 - INV_PHI) * width,
            inner_right: left + INV_PHI * width,
        }
    }

    pub(super) fn width(&self) -> f64 {
        self.right - self.left
    }

    pub(super) fn midpoint(&self) -> f64 {
        0.5 * (self.left + self.right)
    }

    /// Narrows to `[left, inner_right]`.
    ///
    /// The old `inner_left` becomes `inner_right`; the new `inner_left` is the
    /// point that needs evaluating.
    pub(super) fn shrink_right(&mut self) {
        self.right = self.inner_right;
        self.inner_right = self.inner_left;
        self.inner_left = self.left + (1.0 - INV_PHI) * self.width();
    }

    /// Narrows to `[inner_left, right]`.
    ///
    /// The old `inner_right` becomes `inner_left`; the new `inner_right` is
    /// the point that needs evaluating.
    pub(super) fn shrink_left(&mut self) {
        self.left = self.inner_left;
        self.inner_left = self.inner_right;
        self.inner_right = self.left + INV_PHI * self.width();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn interior_points_split_by_golden_ratio() {
        let bracket = GoldenBracket::new([-2.0, 2.0]);

        assert_relative_eq!(bracket.width(), 4.0);
        assert_relative_eq!(bracket.inner_left, -2.0 + 4.0 * (1.0 - INV_PHI));
        assert_relative_eq!(bracket.inner_right, -2.0 + 4.0 * INV_PHI);
        assert_relative_eq!(bracket.inner_left + bracket.inner_right, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn reversed_bounds_are_swapped() {
        let bracket = GoldenBracket::new([1.0, -2.0]);
        assert_relative_eq!(bracket.left, -2.0);
        assert_relative_eq!(bracket.right, 1.0);
    }

    #[test]
    fn shrinking_reuses_an_interior_point() {
        let mut bracket = GoldenBracket::new([0.0, 1.0]);
        let old_inner_left = bracket.inner_left;
        bracket.shrink_right();
        assert_relative_eq!(bracket.right, INV_PHI);
        assert_relative_eq!(bracket.inner_right, old_inner_left);

        let old_inner_right = bracket.inner_right;
        bracket.shrink_left();
        assert_relative_eq!(bracket.inner_left, old_inner_right);
        assert_relative_eq!(
            bracket.inner_right,
            bracket.left + INV_PHI * bracket.width()
        );
    }
}
