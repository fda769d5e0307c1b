//! Per-rule evaluation.

use super::matcher::{count_satisfied, satisfies};
use crate::facts::FactSource;
use crate::rules::Rule;

/// Minimum share of required conditions that must hold for a rule to fire.
pub const REQUIRED_QUORUM: f64 = 0.5;

/// Share of the base confidence kept regardless of the required ratio.
pub const REQUIRED_FLOOR: f64 = 0.7;

/// Share of the base confidence scaled by the required ratio.
pub const REQUIRED_WEIGHT: f64 = 0.3;

/// Largest bonus optional conditions can add.
pub const OPTIONAL_BONUS_CAP: f64 = 0.15;

/// Outcome of evaluating one rule against a fact base.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    /// An excluding condition on `attribute` holds.
    Vetoed { attribute: String },

    /// Fewer than half of the required conditions hold.
    BelowQuorum { ratio: f64 },

    /// The rule fires.
    Fired {
        /// Final confidence in `[0, 1]`.
        confidence: f64,
        /// Share of required conditions satisfied.
        required_ratio: f64,
        /// Bonus contributed by optional conditions.
        optional_bonus: f64,
    },
}

impl Evaluation {
    /// Returns `true` if the rule fired.
    pub fn fires(&self) -> bool {
        matches!(self, Evaluation::Fired { .. })
    }

    /// Confidence of a fired rule; `0.0` otherwise.
    pub fn confidence(&self) -> f64 {
        match self {
            Evaluation::Fired { confidence, .. } => *confidence,
            _ => 0.0,
        }
    }
}

/// Evaluates `rule` against `facts`.
///
/// Steps, short-circuiting:
///
/// 1. Any satisfied excluding condition vetoes the rule.
/// 2. The required ratio is satisfied / total (1.0 with no required
///    conditions); below [`REQUIRED_QUORUM`] the rule does not fire.
/// 3. `confidence = base * (REQUIRED_FLOOR + REQUIRED_WEIGHT * ratio)`.
/// 4. Optional matches add up to [`OPTIONAL_BONUS_CAP`] in proportion.
/// 5. The sum is capped at 1.0.
///
/// # Examples
///
/// ```
/// use u_infer::facts::AttributeMap;
/// use u_infer::inference::evaluate;
/// use u_infer::rules::{Condition, Rule};
///
/// let rule = Rule::new("Entry", 0.0, 499.0, "Basic")
///     .with_required("cpu", Condition::any_of(["A", "B"]))
///     .with_base_confidence(0.8);
///
/// let hit = evaluate(&rule, &AttributeMap::new().with("cpu", "A"));
/// assert!(hit.fires());
/// assert!((hit.confidence() - 0.8).abs() < 1e-12);
///
/// let miss = evaluate(&rule, &AttributeMap::new().with("cpu", "C"));
/// assert!(!miss.fires());
/// assert_eq!(miss.confidence(), 0.0);
/// ```
pub fn evaluate<F: FactSource + ?Sized>(rule: &Rule, facts: &F) -> Evaluation {
    if let Some((attribute, _)) = rule
        .excluding
        .iter()
        .find(|(attribute, condition)| satisfies(attribute, condition, facts))
    {
        return Evaluation::Vetoed {
            attribute: attribute.to_string(),
        };
    }

    let ratio = if rule.required.is_empty() {
        1.0
    } else {
        count_satisfied(&rule.required, facts) as f64 / rule.required.len() as f64
    };
    if ratio < REQUIRED_QUORUM {
        return Evaluation::BelowQuorum { ratio };
    }

    let confidence = rule.base_confidence * (REQUIRED_FLOOR + REQUIRED_WEIGHT * ratio);

    let bonus = if rule.optional.is_empty() {
        0.0
    } else {
        count_satisfied(&rule.optional, facts) as f64 / rule.optional.len() as f64
            * OPTIONAL_BONUS_CAP
    };

    Evaluation::Fired {
        confidence: (confidence + bonus).min(1.0),
        required_ratio: ratio,
        optional_bonus: bonus,
    }
}
