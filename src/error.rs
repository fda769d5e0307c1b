//! Error types.
//!
//! Errors only arise while loading rules or configuring the engine.
//! Evaluation itself is total over validated inputs.

use thiserror::Error;

/// Result type for rule table construction.
pub type RuleResult<T> = Result<T, RuleError>;

/// A rule record rejected at load time.
///
/// Every variant names the offending rule by its position in the table
/// and its category.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("rule #{index} ({category:?}): field `{field}` {reason}")]
    InvalidField {
        index: usize,
        category: String,
        field: String,
        reason: String,
    },

    #[error("rule #{index} ({category:?}): `{field}` references unknown attribute `{attribute}`")]
    UnknownAttribute {
        index: usize,
        category: String,
        field: String,
        attribute: String,
    },

    #[error("rule #{index} ({category:?}): `{field}.{attribute}` expects a {expected} condition")]
    KindMismatch {
        index: usize,
        category: String,
        field: String,
        attribute: String,
        expected: &'static str,
    },

    #[error("rule #{index} ({category:?}): {value:?} is not an option of `{field}.{attribute}`")]
    UnknownOption {
        index: usize,
        category: String,
        field: String,
        attribute: String,
        value: String,
    },

    /// The table is not a JSON array of records.
    #[cfg(feature = "serde")]
    #[error("malformed rule table: {0}")]
    Syntax(#[from] serde_json::Error),

    /// One record could not be read as a rule.
    #[cfg(feature = "serde")]
    #[error("rule #{index} ({:?}): {source}", .category.as_deref().unwrap_or("unnamed"))]
    Parse {
        index: usize,
        category: Option<String>,
        source: serde_json::Error,
    },
}

/// An invalid engine configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("confidence threshold must be within [0, 1], got {0}")]
    ThresholdOutOfRange(f64),
}
