use thiserror::Error;

use crate::line_search::golden_section;

/// Configuration for steepest descent.
///
/// Deserializing goes through [`Config::new`], so invalid settings are
/// rejected there too.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawConfig")
)]
pub struct Config {
    max_iters: usize,
    tolerance: f64,
    line_search: golden_section::Config,
}

/// Errors that can occur when validating a steepest descent config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_iters must be at least 1")]
    MaxIters,

    #[error("tolerance must be finite and positive")]
    Tolerance,
}

/// The unvalidated form of [`Config`] read by `serde`.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawConfig {
    max_iters: usize,
    tolerance: f64,
    line_search: golden_section::Config,
}

#[cfg(feature = "serde")]
impl TryFrom<RawConfig> for Config {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let config = Self::new(raw.max_iters, raw.tolerance)?;
        Ok(config.with_line_search(raw.line_search))
    }
}

impl Default for Config {
    /// 100 iterations, a gradient-norm tolerance of `1e-6`, and the default
    /// golden section fallback.
    fn default() -> Self {
        Self {
            max_iters: 100,
            tolerance: 1e-6,
            line_search: golden_section::Config::default(),
        }
    }
}

impl Config {
    /// Creates a new config with the default line search fallback.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_iters` is zero or `tolerance` is not a finite
    /// positive number.
    pub fn new(max_iters: usize, tolerance: f64) -> Result<Self, ConfigError> {
        if max_iters == 0 {
            return Err(ConfigError::MaxIters);
        }
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigError::Tolerance);
        }

        Ok(Self {
            max_iters,
            tolerance,
            line_search: golden_section::Config::default(),
        })
    }

    /// Replaces the golden section fallback settings.
    #[must_use]
    pub fn with_line_search(self, line_search: golden_section::Config) -> Self {
        Self {
            line_search,
            ..self
        }
    }

    /// Returns the maximum number of iterations.
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the gradient-norm threshold for convergence.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the golden section fallback settings.
    pub fn line_search(&self) -> &golden_section::Config {
        &self.line_search
    }
}
