use thiserror::Error;

/// Configuration for the golden section fallback.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawConfig")
)]
pub struct Config {
    bracket: [f64; 2],
    x_abs_tol: f64,
    max_iters: usize,
}

/// Errors that can occur when validating a golden section config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("bracket bounds must be finite")]
    Bracket,

    #[error("x_abs_tol must be finite and non-negative")]
    XAbs,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawConfig {
    bracket: [f64; 2],
    x_abs_tol: f64,
    max_iters: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawConfig> for Config {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        Self::new(raw.bracket, raw.x_abs_tol, raw.max_iters)
    }
}

impl Default for Config {
    /// Searches `[-2, 2]` down to a width of `1e-6`, capped at 200 shrinks.
    fn default() -> Self {
        Self {
            bracket: [-2.0, 2.0],
            x_abs_tol: 1e-6,
            max_iters: 200,
        }
    }
}

impl Config {
    /// Creates a new config.
    ///
    /// Reversed bracket bounds are accepted and swapped when searching.
    ///
    /// # Errors
    ///
    /// Returns an error if a bracket bound is non-finite or the tolerance is
    /// negative or non-finite.
    pub fn new(bracket: [f64; 2], x_abs_tol: f64, max_iters: usize) -> Result<Self, ConfigError> {
        if !bracket.iter().all(|b| b.is_finite()) {
            return Err(ConfigError::Bracket);
        }
        if !x_abs_tol.is_finite() || x_abs_tol < 0.0 {
            return Err(ConfigError::XAbs);
        }

        Ok(Self {
            bracket,
            x_abs_tol,
            max_iters,
        })
    }

    /// Returns the initial bracket for the step size.
    pub fn bracket(&self) -> [f64; 2] {
        self.bracket
    }

    /// Returns the bracket width at which the search stops.
    pub fn x_abs_tol(&self) -> f64 {
        self.x_abs_tol
    }

    /// Returns the maximum number of shrink iterations.
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_inputs() {
        assert!(Config::new([-1.0, 1.0], 1e-8, 50).is_ok());
        assert_eq!(
            Config::new([f64::NEG_INFINITY, 1.0], 1e-8, 50),
            Err(ConfigError::Bracket)
        );
        assert_eq!(Config::new([-1.0, 1.0], -1e-8, 50), Err(ConfigError::XAbs));
        assert_eq!(Config::new([-1.0, 1.0], f64::NAN, 50), Err(ConfigError::XAbs));
    }

    #[test]
    fn default_is_valid() {
        let config = Config::default();
        assert_eq!(
            Config::new(config.bracket(), config.x_abs_tol(), config.max_iters()),
            Ok(config)
        );
    }
}
