//! Inference driver.

use super::config::{check_threshold, InferenceConfig, TieBreaker};
use super::evaluator::{evaluate, Evaluation};
use super::types::Estimate;
use crate::error::ConfigError;
use crate::facts::FactSource;
use crate::rules::{Rule, RuleTable};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;

/// Number of estimates a presentation layer typically shows.
pub const DEFAULT_DISPLAY_COUNT: usize = 3;

/// Runs a rule table against fact bases.
///
/// The rule table is shared read-only through an [`Arc`], so one table can
/// serve any number of engines and concurrent calls. The engine keeps no
/// state between calls besides its configuration.
///
/// # Examples
///
/// ```
/// use u_infer::facts::AttributeMap;
/// use u_infer::inference::{InferenceConfig, InferenceEngine};
/// use u_infer::rules::{Condition, Rule, RuleTable};
///
/// let table = RuleTable::new(vec![
///     Rule::new("Value", 800.0, 1199.0, "Mainstream laptop")
///         .with_required("ram", Condition::any_of(["8 GB", "16 GB"]))
///         .with_base_confidence(0.6),
///     Rule::new("Value", 800.0, 1199.0, "Entry MacBook")
///         .with_required("brand", Condition::any_of(["Apple"]))
///         .with_base_confidence(0.8),
/// ])
/// .unwrap();
///
/// let engine = InferenceEngine::new(table, InferenceConfig::default()).unwrap();
/// let facts = AttributeMap::new().with("ram", "8 GB").with("brand", "Apple");
///
/// let estimates = engine.infer(&facts);
/// assert_eq!(estimates.len(), 1);
/// assert_eq!(estimates[0].description, "Entry MacBook");
/// ```
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    rules: Arc<RuleTable>,
    config: InferenceConfig,
}

impl InferenceEngine {
    /// Creates an engine after validating `config`.
    pub fn new(
        rules: impl Into<Arc<RuleTable>>,
        config: InferenceConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            rules: rules.into(),
            config,
        })
    }

    /// Creates an engine with [`InferenceConfig::default`].
    pub fn with_defaults(rules: impl Into<Arc<RuleTable>>) -> Self {
        Self {
            rules: rules.into(),
            config: InferenceConfig::default(),
        }
    }

    /// Returns the rule table this engine evaluates.
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Current confidence threshold.
    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }

    /// Changes the confidence threshold.
    ///
    /// Values outside `[0, 1]` are rejected and leave the engine unchanged.
    pub fn set_threshold(&mut self, threshold: f64) -> Result<(), ConfigError> {
        check_threshold(threshold)?;
        tracing::debug!(
            old = self.config.threshold,
            new = threshold,
            "confidence threshold changed"
        );
        self.config.threshold = threshold;
        Ok(())
    }

    /// Evaluates every rule, in table order.
    pub fn evaluations<F: FactSource + ?Sized>(&self, facts: &F) -> Vec<Evaluation> {
        evaluate_rules(self.rules.rules(), facts, self.config.parallel)
    }

    /// Runs inference and returns every qualifying estimate, best first.
    ///
    /// 1. Rules that do not fire, or fire at or below the threshold, are
    ///    skipped.
    /// 2. One estimate per category: a later rule replaces the current
    ///    estimate only with a strictly higher confidence.
    /// 3. Estimates are sorted by descending confidence; ties follow
    ///    [`TieBreaker`].
    ///
    /// An empty list means no rule supports an estimate.
    pub fn infer<F: FactSource + ?Sized>(&self, facts: &F) -> Vec<Estimate> {
        let evaluations = self.evaluations(facts);
        let threshold = self.config.threshold;
        let mut estimates: Vec<Estimate> = Vec::new();

        for (index, (rule, evaluation)) in self.rules.iter().zip(&evaluations).enumerate() {
            let confidence = match evaluation {
                Evaluation::Fired { confidence, .. } => *confidence,
                Evaluation::Vetoed { attribute } => {
                    tracing::debug!(index, category = %rule.category, %attribute, "rule vetoed");
                    continue;
                }
                Evaluation::BelowQuorum { ratio } => {
                    tracing::debug!(index, category = %rule.category, ratio, "rule below quorum");
                    continue;
                }
            };
            if confidence <= threshold {
                tracing::trace!(
                    index,
                    category = %rule.category,
                    confidence,
                    threshold,
                    "rule below threshold"
                );
                continue;
            }
            tracing::debug!(index, category = %rule.category, confidence, "rule fired");
            merge(&mut estimates, rule, index, confidence);
        }

        sort_estimates(&mut estimates, self.config.tie_breaker);

        tracing::debug!(
            rules = self.rules.len(),
            estimates = estimates.len(),
            "inference complete"
        );
        estimates
    }

    /// Returns the highest-confidence estimate, if any.
    pub fn best<F: FactSource + ?Sized>(&self, facts: &F) -> Option<Estimate> {
        self.infer(facts).into_iter().next()
    }

    /// Returns at most `n` estimates, best first.
    pub fn top<F: FactSource + ?Sized>(&self, facts: &F, n: usize) -> Vec<Estimate> {
        let mut estimates = self.infer(facts);
        estimates.truncate(n);
        estimates
    }
}

/// Keeps the single best estimate per category. A replacement takes over
/// the slot of the estimate it replaces.
fn merge(estimates: &mut Vec<Estimate>, rule: &Rule, index: usize, confidence: f64) {
    match estimates.iter_mut().find(|e| e.category == rule.category) {
        Some(existing) => {
            if confidence > existing.confidence {
                tracing::debug!(
                    category = %rule.category,
                    from_rule = existing.rule_index,
                    to_rule = index,
                    confidence,
                    "estimate replaced"
                );
                *existing = Estimate::from_rule(rule, index, confidence);
            }
        }
        None => estimates.push(Estimate::from_rule(rule, index, confidence)),
    }
}

fn sort_estimates(estimates: &mut [Estimate], tie_breaker: TieBreaker) {
    estimates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
            .then_with(|| match tie_breaker {
                TieBreaker::TableOrder => Ordering::Equal,
                TieBreaker::Category => a.category.cmp(&b.category),
            })
    });
}

#[cfg(feature = "parallel")]
fn evaluate_rules<F: FactSource + ?Sized>(
    rules: &[Rule],
    facts: &F,
    parallel: bool,
) -> Vec<Evaluation> {
    if parallel {
        rules.par_iter().map(|rule| evaluate(rule, facts)).collect()
    } else {
        rules.iter().map(|rule| evaluate(rule, facts)).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate_rules<F: FactSource + ?Sized>(
    rules: &[Rule],
    facts: &F,
    _parallel: bool,
) -> Vec<Evaluation> {
    rules.iter().map(|rule| evaluate(rule, facts)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::AttributeMap;
    use crate::rules::Condition;
    use proptest::prelude::*;

    fn entry_rule() -> Rule {
        Rule::new("Entry", 0.0, 499.0, "Basic")
            .with_required("cpu", Condition::any_of(["A", "B"]))
            .with_base_confidence(0.8)
    }

    fn engine(rules: Vec<Rule>) -> InferenceEngine {
        InferenceEngine::with_defaults(RuleTable::new(rules).unwrap())
    }

    /// Rule with no required conditions: fires at exactly `base`.
    fn flat(category: &str, description: &str, base: f64) -> Rule {
        Rule::new(category, 0.0, 1.0, description).with_base_confidence(base)
    }

    #[test]
    fn test_end_to_end_full_match() {
        let e = engine(vec![entry_rule()]);
        let out = e.infer(&AttributeMap::new().with("cpu", "A"));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].category, "Entry");
        assert!((out[0].confidence - 0.8).abs() < 1e-12);
        assert_eq!(out[0].range_min, 0.0);
        assert_eq!(out[0].range_max, 499.0);
    }

    #[test]
    fn test_end_to_end_no_match() {
        let e = engine(vec![entry_rule()]);
        assert!(e.infer(&AttributeMap::new().with("cpu", "C")).is_empty());
        assert!(e.infer(&AttributeMap::new()).is_empty());
        assert!(e.best(&AttributeMap::new()).is_none());
    }

    #[test]
    fn test_empty_table() {
        let e = engine(vec![]);
        assert!(e.infer(&AttributeMap::new().with("cpu", "A")).is_empty());
    }

    #[test]
    fn test_category_dedup_keeps_highest() {
        let mut b = flat("Mid", "rule B", 0.8);
        b.range_min = 10.0;
        b.range_max = 20.0;
        let e = engine(vec![flat("Mid", "rule A", 0.6), b]);
        let out = e.infer(&AttributeMap::new());
        assert_eq!(out.len(), 1);
        assert!((out[0].confidence - 0.8).abs() < 1e-12);
        assert_eq!(out[0].description, "rule B");
        assert_eq!(out[0].range_min, 10.0);
        assert_eq!(out[0].range_max, 20.0);
        assert_eq!(out[0].rule_index, 1);
    }

    #[test]
    fn test_dedup_ignores_lower_and_equal_later_rules() {
        let e = engine(vec![
            flat("Mid", "first", 0.8),
            flat("Mid", "lower", 0.6),
            flat("Mid", "equal", 0.8),
        ]);
        let out = e.infer(&AttributeMap::new());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].description, "first");
    }

    #[test]
    fn test_threshold_is_strict() {
        let rule = entry_rule();
        let facts = AttributeMap::new().with("cpu", "B");
        let confidence = evaluate(&rule, &facts).confidence();

        let config = InferenceConfig::default().with_threshold(confidence);
        let at = InferenceEngine::new(RuleTable::new(vec![rule.clone()]).unwrap(), config).unwrap();
        assert!(at.infer(&facts).is_empty());

        let config = InferenceConfig::default().with_threshold(confidence - 1e-9);
        let below = InferenceEngine::new(RuleTable::new(vec![rule]).unwrap(), config).unwrap();
        assert_eq!(below.infer(&facts).len(), 1);
    }

    #[test]
    fn test_low_confidence_only_rule_is_dropped() {
        let e = engine(vec![flat("Weak", "weak", 0.3)]);
        assert!(e.infer(&AttributeMap::new()).is_empty());
    }

    #[test]
    fn test_sorted_descending() {
        let e = engine(vec![
            flat("Low", "l", 0.5),
            flat("High", "h", 0.9),
            flat("Mid", "m", 0.7),
        ]);
        let cats: Vec<String> = e
            .infer(&AttributeMap::new())
            .into_iter()
            .map(|est| est.category)
            .collect();
        assert_eq!(cats, vec!["High", "Mid", "Low"]);
    }

    #[test]
    fn test_tie_break_table_order() {
        let e = engine(vec![flat("Zeta", "z", 0.7), flat("Alpha", "a", 0.7)]);
        let out = e.infer(&AttributeMap::new());
        assert_eq!(out[0].category, "Zeta");
        assert_eq!(out[1].category, "Alpha");
    }

    #[test]
    fn test_tie_break_replacement_keeps_first_qualified_slot() {
        // Zeta qualifies first, Alpha second; Zeta's later replacement
        // raises it to Alpha's confidence without moving it back.
        let e = engine(vec![
            flat("Zeta", "z1", 0.5),
            flat("Alpha", "a", 0.7),
            flat("Zeta", "z2", 0.7),
        ]);
        let out = e.infer(&AttributeMap::new());
        assert_eq!(out[0].category, "Zeta");
        assert_eq!(out[0].description, "z2");
        assert_eq!(out[1].category, "Alpha");
    }

    #[test]
    fn test_tie_break_category() {
        let table = RuleTable::new(vec![flat("Zeta", "z", 0.7), flat("Alpha", "a", 0.7)]).unwrap();
        let config = InferenceConfig::default().with_tie_breaker(TieBreaker::Category);
        let e = InferenceEngine::new(table, config).unwrap();
        let out = e.infer(&AttributeMap::new());
        assert_eq!(out[0].category, "Alpha");
        assert_eq!(out[1].category, "Zeta");
    }

    #[test]
    fn test_top_and_best() {
        let e = engine(vec![
            flat("A", "a", 0.5),
            flat("B", "b", 0.9),
            flat("C", "c", 0.7),
            flat("D", "d", 0.6),
        ]);
        let facts = AttributeMap::new();
        let top = e.top(&facts, DEFAULT_DISPLAY_COUNT);
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].category, "B");
        assert_eq!(e.top(&facts, 10).len(), 4);
        assert_eq!(e.best(&facts).map(|est| est.category), Some("B".to_string()));
    }

    #[test]
    fn test_evaluations_in_table_order() {
        let e = engine(vec![
            entry_rule(),
            entry_rule().with_excluding("cpu", Condition::any_of(["A"])),
        ]);
        let evals = e.evaluations(&AttributeMap::new().with("cpu", "A"));
        assert_eq!(evals.len(), 2);
        assert!(evals[0].fires());
        assert_eq!(
            evals[1],
            Evaluation::Vetoed {
                attribute: "cpu".into()
            }
        );
    }

    #[test]
    fn test_new_rejects_invalid_threshold() {
        let err = InferenceEngine::new(
            RuleTable::empty(),
            InferenceConfig::default().with_threshold(1.2),
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::ThresholdOutOfRange(1.2));
    }

    #[test]
    fn test_set_threshold() {
        let mut e = engine(vec![flat("Weak", "weak", 0.3)]);
        assert!(e.infer(&AttributeMap::new()).is_empty());

        e.set_threshold(0.2).unwrap();
        assert_eq!(e.infer(&AttributeMap::new()).len(), 1);

        assert!(e.set_threshold(-0.5).is_err());
        assert!(e.set_threshold(f64::INFINITY).is_err());
        assert!((e.threshold() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_shared_table_across_engines() {
        let table = Arc::new(RuleTable::new(vec![entry_rule()]).unwrap());
        let lax = InferenceEngine::new(Arc::clone(&table), InferenceConfig::permissive()).unwrap();
        let strict = InferenceEngine::new(Arc::clone(&table), InferenceConfig::strict()).unwrap();
        let facts = AttributeMap::new().with("cpu", "A");
        assert_eq!(lax.infer(&facts), strict.infer(&facts));
        assert_eq!(Arc::strong_count(&table), 3);
        assert_eq!(lax.rules(), strict.rules());
        assert_eq!(strict.config(), &InferenceConfig::strict());
    }

    #[test]
    fn test_concurrent_calls_share_engine() {
        let e = Arc::new(engine(vec![entry_rule()]));
        let handles: Vec<_> = ["A", "B", "C"]
            .into_iter()
            .map(|cpu| {
                let e = Arc::clone(&e);
                std::thread::spawn(move || e.infer(&AttributeMap::new().with("cpu", cpu)).len())
            })
            .collect();
        let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(counts, vec![1, 1, 0]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_serial() {
        let rules: Vec<Rule> = (0..64)
            .map(|i| {
                Rule::new(format!("C{}", i % 7), 0.0, 1.0, format!("r{i}"))
                    .with_required("a", Condition::any_of([format!("v{}", i % 3)]))
                    .with_optional("b", Condition::flag(i % 2 == 0))
                    .with_base_confidence(0.5 + (i % 5) as f64 * 0.1)
            })
            .collect();
        let table = Arc::new(RuleTable::new(rules).unwrap());
        let serial = InferenceEngine::new(Arc::clone(&table), InferenceConfig::default()).unwrap();
        let parallel = InferenceEngine::new(
            Arc::clone(&table),
            InferenceConfig::default().with_parallel(true),
        )
        .unwrap();
        let facts = AttributeMap::new().with("a", "v1").with("b", true);
        assert_eq!(serial.infer(&facts), parallel.infer(&facts));
    }

    fn arb_table() -> impl Strategy<Value = Vec<Rule>> {
        prop::collection::vec(
            (0usize..4, 0.0..=1.0f64, 0usize..3, any::<bool>(), 0usize..3),
            0..12,
        )
        .prop_map(|specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (cat, base, req, opt, excl))| {
                    Rule::new(format!("cat{cat}"), 0.0, 1.0, format!("rule {i}"))
                        .with_required("x", Condition::any_of([format!("x{req}")]))
                        .with_optional("f", Condition::flag(opt))
                        .with_excluding("y", Condition::any_of([format!("y{excl}")]))
                        .with_base_confidence(base)
                })
                .collect()
        })
    }

    fn arb_facts() -> impl Strategy<Value = AttributeMap> {
        (0usize..3, 0usize..4, any::<bool>()).prop_map(|(x, y, f)| {
            AttributeMap::new()
                .with("x", format!("x{x}"))
                .with("y", format!("y{y}"))
                .with("f", f)
        })
    }

    proptest! {
        #[test]
        fn prop_deterministic(rules in arb_table(), facts in arb_facts()) {
            let e = engine(rules);
            prop_assert_eq!(e.infer(&facts), e.infer(&facts));
        }

        #[test]
        fn prop_result_invariants(rules in arb_table(), facts in arb_facts()) {
            let e = engine(rules);
            let out = e.infer(&facts);
            for pair in out.windows(2) {
                prop_assert!(pair[0].confidence >= pair[1].confidence);
            }
            for (i, est) in out.iter().enumerate() {
                prop_assert!(est.confidence > e.threshold() && est.confidence <= 1.0);
                prop_assert!(out[i + 1..].iter().all(|o| o.category != est.category));
            }
        }

        #[test]
        fn prop_vetoed_rules_never_reported(rules in arb_table(), facts in arb_facts()) {
            let e = engine(rules);
            let evals = e.evaluations(&facts);
            for est in e.infer(&facts) {
                prop_assert!(evals[est.rule_index].fires());
            }
        }
    }
}
