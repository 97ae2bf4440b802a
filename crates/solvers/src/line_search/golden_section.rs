//! Golden section search over a bounded step-size interval.
//!
//! This is the fallback used when the directional derivative has no usable
//! closed-form root. It assumes the scored function is unimodal on the
//! bracket; when it is not, or when the true optimum lies outside the
//! bracket, the result is a point inside the bracket that is not optimal.
//!
//! The scored function is always minimized. Callers that maximize negate
//! first, and map undefined points to `f64::INFINITY` so they are treated as
//! worse than any real value.

mod bracket;
mod config;

#[cfg(test)]
mod tests;

pub use config::{Config, ConfigError};

use bracket::GoldenBracket;

/// Indicates whether the search converged or hit the iteration limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// The bracket narrowed to within the configured width.
    Converged,

    /// Reached the iteration limit first.
    MaxIters,
}

/// The result of a golden section search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    pub status: Status,

    /// Midpoint of the final bracket.
    pub x: f64,

    /// Number of shrink iterations performed.
    pub iters: usize,
}

/// Minimizes `score` over the configured bracket.
///
/// Each iteration keeps the side of the interior point with the strictly
/// lower score and narrows the bracket by the golden ratio. Ties shrink from
/// the left. The search stops once the bracket width is within
/// [`Config::x_abs_tol`] and returns its midpoint.
pub fn minimize<F>(score: F, config: &Config) -> Solution
where
    F: Fn(f64) -> f64,
{
    let mut bracket = GoldenBracket::new(config.bracket());
    let mut left_score = score(bracket.inner_left);
    let mut right_score = score(bracket.inner_right);

    let mut iters = 0;
    while bracket.width() > config.x_abs_tol() {
        if iters == config.max_iters() {
            return Solution {
                status: Status::MaxIters,
                x: bracket.midpoint(),
                iters,
            };
        }

        if left_score < right_score {
            bracket.shrink_right();
            right_score = left_score;
            left_score = score(bracket.inner_left);
        } else {
            bracket.shrink_left();
            left_score = right_score;
            right_score = score(bracket.inner_right);
        }
        iters += 1;
    }

    Solution {
        status: Status::Converged,
        x: bracket.midpoint(),
        iters,
    }
}
