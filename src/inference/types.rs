//! Inference results.

use crate::rules::Rule;
use std::fmt;

/// Qualitative reading of a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfidenceLevel {
    /// Below 0.6.
    Low,
    /// From 0.6 up to 0.8.
    Medium,
    /// 0.8 and above.
    High,
}

impl ConfidenceLevel {
    /// Classifies a confidence in `[0, 1]`.
    pub fn of(confidence: f64) -> Self {
        if confidence >= 0.8 {
            ConfidenceLevel::High
        } else if confidence >= 0.6 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConfidenceLevel::Low => "low",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::High => "high",
        })
    }
}

/// One ranked estimate: the best-scoring rule of a category.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Estimate {
    pub category: String,

    /// Confidence in `[0, 1]`.
    pub confidence: f64,

    /// Description of the rule that produced this estimate.
    pub description: String,

    pub range_min: f64,
    pub range_max: f64,

    /// Table position of the producing rule.
    pub rule_index: usize,
}

impl Estimate {
    pub(crate) fn from_rule(rule: &Rule, rule_index: usize, confidence: f64) -> Self {
        Self {
            category: rule.category.clone(),
            confidence,
            description: rule.description.clone(),
            range_min: rule.range_min,
            range_max: rule.range_max,
            rule_index,
        }
    }

    /// Qualitative confidence level.
    pub fn level(&self) -> ConfidenceLevel {
        ConfidenceLevel::of(self.confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_boundaries() {
        assert_eq!(ConfidenceLevel::of(0.8), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::of(0.7999), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::of(0.6), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::of(0.5999), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::of(0.0), ConfidenceLevel::Low);
        assert!(ConfidenceLevel::High > ConfidenceLevel::Low);
    }

    #[test]
    fn test_from_rule_copies_bracket() {
        let rule = Rule::new("Budget", 500.0, 799.0, "Everyday");
        let est = Estimate::from_rule(&rule, 3, 0.65);
        assert_eq!(est.category, "Budget");
        assert_eq!(est.description, "Everyday");
        assert_eq!(est.range_min, 500.0);
        assert_eq!(est.range_max, 799.0);
        assert_eq!(est.rule_index, 3);
        assert_eq!(est.level(), ConfidenceLevel::Medium);
        assert_eq!(est.level().to_string(), "medium");
    }
}
