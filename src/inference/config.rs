//! Inference configuration.
//!
//! [`InferenceConfig`] holds the parameters of an [`InferenceEngine`](super::InferenceEngine).

use crate::error::ConfigError;

/// Default minimum confidence an estimate must exceed.
pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// Order of estimates with equal confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TieBreaker {
    /// Keep the order in which categories first qualified while walking
    /// the rule table (stable sort).
    #[default]
    TableOrder,

    /// Order by category name.
    Category,
}

/// Configuration for the inference engine.
///
/// # Defaults
///
/// ```
/// use u_infer::inference::{InferenceConfig, TieBreaker};
///
/// let config = InferenceConfig::default();
/// assert!((config.threshold - 0.4).abs() < 1e-12);
/// assert_eq!(config.tie_breaker, TieBreaker::TableOrder);
/// assert!(!config.parallel);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_infer::inference::{InferenceConfig, TieBreaker};
///
/// let config = InferenceConfig::default()
///     .with_threshold(0.5)
///     .with_tie_breaker(TieBreaker::Category);
/// assert!(config.validate().is_ok());
///
/// assert!(InferenceConfig::default().with_threshold(1.5).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InferenceConfig {
    /// Estimates must have a confidence strictly above this value (0.0–1.0).
    ///
    /// Not clamped: out-of-range values fail [`validate`](Self::validate).
    pub threshold: f64,

    /// Ordering of estimates with equal confidence.
    pub tie_breaker: TieBreaker,

    /// Whether to evaluate rules in parallel using rayon.
    ///
    /// Only honored with the `parallel` feature. Results are identical
    /// either way.
    pub parallel: bool,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            tie_breaker: TieBreaker::TableOrder,
            parallel: false,
        }
    }
}

impl InferenceConfig {
    /// Sets the confidence threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the tie-breaking strategy.
    pub fn with_tie_breaker(mut self, tb: TieBreaker) -> Self {
        self.tie_breaker = tb;
        self
    }

    /// Enables or disables parallel rule evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Preset keeping only well-supported estimates (threshold 0.6).
    pub fn strict() -> Self {
        Self {
            threshold: 0.6,
            ..Self::default()
        }
    }

    /// Preset keeping every estimate with a non-zero confidence.
    pub fn permissive() -> Self {
        Self {
            threshold: 0.0,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_threshold(self.threshold)
    }
}

pub(crate) fn check_threshold(threshold: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(ConfigError::ThresholdOutOfRange(threshold))
    }
}
