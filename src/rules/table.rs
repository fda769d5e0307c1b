//! Ordered, validated rule collection.

use super::types::{Condition, Rule, Section};
use crate::error::{RuleError, RuleResult};
use crate::facts::{AttributeKind, Vocabulary};

/// The rule table walked by the inference engine.
///
/// Table order is traversal order. It does not weight rules; it only
/// decides which category comes first among equal confidences (see
/// [`TieBreaker`](crate::inference::TieBreaker)).
///
/// Every rule is validated on entry, so evaluation never meets a
/// malformed record.
///
/// # Examples
///
/// ```
/// use u_infer::rules::{Condition, Rule, RuleTable};
///
/// let mut table = RuleTable::empty();
/// table
///     .add(Rule::new("Budget", 500.0, 799.0, "Everyday laptop")
///         .with_required("ram", Condition::any_of(["8 GB"])))
///     .unwrap();
///
/// assert_eq!(table.len(), 1);
/// assert!(table.find("Budget").is_some());
/// assert!(table.add(Rule::new("Broken", 0.0, 1.0, "x").with_base_confidence(2.0)).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Creates an empty table.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a table, validating every rule.
    ///
    /// Fails on the first malformed rule, naming its position, category
    /// and the offending field.
    pub fn new(rules: Vec<Rule>) -> RuleResult<Self> {
        for (index, rule) in rules.iter().enumerate() {
            rule.validate(index)?;
        }
        Ok(Self { rules })
    }

    /// Parses a JSON array of rule records.
    ///
    /// `optional` and `excluding` may be omitted; every other field is
    /// mandatory. A condition is either an array of strings or a boolean,
    /// and an attribute may appear once per section. A record that cannot
    /// be read fails with [`RuleError::Parse`], naming its position and,
    /// when present, its category.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_infer::rules::RuleTable;
    ///
    /// let table = RuleTable::from_json(r#"[{
    ///     "category": "Entry",
    ///     "range_min": 0, "range_max": 499,
    ///     "description": "Basic laptop",
    ///     "required": { "cpu": ["Intel Core i3"] },
    ///     "optional": { "numeric_keypad": true },
    ///     "base_confidence": 0.75
    /// }]"#).unwrap();
    ///
    /// assert_eq!(table.len(), 1);
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> RuleResult<Self> {
        let records: Vec<Box<serde_json::value::RawValue>> = serde_json::from_str(json)?;
        let rules = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                serde_json::from_str::<Rule>(record.get()).map_err(|source| RuleError::Parse {
                    index,
                    category: record_category(record.get()),
                    source,
                })
            })
            .collect::<RuleResult<Vec<Rule>>>()?;
        Self::new(rules)
    }

    /// Serializes the table as a JSON array of rule records.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> RuleResult<String> {
        Ok(serde_json::to_string_pretty(&self.rules)?)
    }

    /// Appends a rule after validating it.
    pub fn add(&mut self, rule: Rule) -> RuleResult<()> {
        rule.validate(self.rules.len())?;
        if let Some(existing) = self.find(&rule.category) {
            if existing.range_min != rule.range_min || existing.range_max != rule.range_max {
                tracing::warn!(
                    category = %rule.category,
                    existing_min = existing.range_min,
                    existing_max = existing.range_max,
                    new_min = rule.range_min,
                    new_max = rule.range_max,
                    "rule added to an existing category with a different range"
                );
            }
        }
        tracing::debug!(category = %rule.category, index = self.rules.len(), "rule added");
        self.rules.push(rule);
        Ok(())
    }

    /// Removes the first rule with `category`.
    pub fn remove(&mut self, category: &str) -> Option<Rule> {
        let pos = self.rules.iter().position(|r| r.category == category)?;
        tracing::debug!(category, index = pos, "rule removed");
        Some(self.rules.remove(pos))
    }

    /// Removes every rule with `category`. Returns how many were removed.
    pub fn remove_all(&mut self, category: &str) -> usize {
        let before = self.rules.len();
        self.rules.retain(|r| r.category != category);
        let removed = before - self.rules.len();
        if removed > 0 {
            tracing::debug!(category, removed, "rules removed");
        }
        removed
    }

    /// Returns the first rule with `category`.
    pub fn find(&self, category: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.category == category)
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for rule in &self.rules {
            if !seen.contains(&rule.category.as_str()) {
                seen.push(&rule.category);
            }
        }
        seen
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Checks every condition against a declared vocabulary.
    ///
    /// Evaluation treats an unknown attribute as a silent non-match, so a
    /// misspelled attribute name makes a rule quietly under-match. This
    /// check catches such typos: every condition key must be declared,
    /// flag conditions must target flag attributes, and value sets must
    /// target choice attributes and list only declared options.
    pub fn validate_against(&self, vocabulary: &Vocabulary) -> RuleResult<()> {
        for (index, rule) in self.rules.iter().enumerate() {
            for section in Section::ALL {
                for (attribute, condition) in rule.section(section).iter() {
                    check_condition(index, rule, section, attribute, condition, vocabulary)?;
                }
            }
        }
        Ok(())
    }
}

fn check_condition(
    index: usize,
    rule: &Rule,
    section: Section,
    attribute: &str,
    condition: &Condition,
    vocabulary: &Vocabulary,
) -> RuleResult<()> {
    let kind = vocabulary
        .kind(attribute)
        .ok_or_else(|| RuleError::UnknownAttribute {
            index,
            category: rule.category.clone(),
            field: section.field().to_string(),
            attribute: attribute.to_string(),
        })?;

    let mismatch = |expected: &'static str| RuleError::KindMismatch {
        index,
        category: rule.category.clone(),
        field: section.field().to_string(),
        attribute: attribute.to_string(),
        expected,
    };

    match (condition, kind) {
        (Condition::Flag(_), AttributeKind::Flag) => Ok(()),
        (Condition::Flag(_), AttributeKind::Choice(_)) => Err(mismatch("value-set")),
        (Condition::AnyOf(_), AttributeKind::Flag) => Err(mismatch("flag")),
        (Condition::AnyOf(values), AttributeKind::Choice(options)) => {
            match values.iter().find(|v| !options.contains(*v)) {
                Some(value) => Err(RuleError::UnknownOption {
                    index,
                    category: rule.category.clone(),
                    field: section.field().to_string(),
                    attribute: attribute.to_string(),
                    value: value.clone(),
                }),
                None => Ok(()),
            }
        }
    }
}

/// Best-effort category of a record that failed to parse.
#[cfg(feature = "serde")]
fn record_category(record: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(record).ok()?;
    value.get("category")?.as_str().map(str::to_string)
}

impl<'a> IntoIterator for &'a RuleTable {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> Rule {
        Rule::new("Entry", 0.0, 499.0, "Basic")
            .with_required("cpu", Condition::any_of(["A", "B"]))
            .with_base_confidence(0.8)
    }

    fn gaming() -> Rule {
        Rule::new("Gaming", 1200.0, 1799.0, "Gaming")
            .with_required("gpu", Condition::any_of(["RTX"]))
            .with_optional("rgb", Condition::flag(true))
    }

    #[test]
    fn test_new_validates_each_rule() {
        let bad = Rule::new("Bad", 0.0, 1.0, "x").with_base_confidence(-0.1);
        let err = RuleTable::new(vec![entry(), gaming(), bad]).unwrap_err();
        match err {
            RuleError::InvalidField { index, category, .. } => {
                assert_eq!(index, 2);
                assert_eq!(category, "Bad");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_add_find_remove() {
        let mut table = RuleTable::new(vec![entry()]).unwrap();
        table.add(gaming()).unwrap();
        table.add(entry().with_base_confidence(0.9)).unwrap();
        assert_eq!(table.len(), 3);

        let first = table.find("Entry").unwrap();
        assert!((first.base_confidence - 0.8).abs() < 1e-12);

        let removed = table.remove("Entry").unwrap();
        assert!((removed.base_confidence - 0.8).abs() < 1e-12);
        assert_eq!(table.len(), 2);
        assert!((table.find("Entry").unwrap().base_confidence - 0.9).abs() < 1e-12);

        assert!(table.remove("Missing").is_none());
    }

    #[test]
    fn test_add_rejects_malformed_rule() {
        let mut table = RuleTable::empty();
        assert!(table.add(Rule::new("", 0.0, 1.0, "x")).is_err());
        assert!(table.is_empty());
    }

    #[test]
    fn test_remove_all() {
        let mut table = RuleTable::new(vec![entry(), gaming(), entry()]).unwrap();
        assert_eq!(table.remove_all("Entry"), 2);
        assert_eq!(table.remove_all("Entry"), 0);
        assert_eq!(table.categories(), vec!["Gaming"]);
    }

    #[test]
    fn test_categories_in_first_appearance_order() {
        let table = RuleTable::new(vec![gaming(), entry(), gaming()]).unwrap();
        assert_eq!(table.categories(), vec!["Gaming", "Entry"]);
    }

    #[test]
    fn test_iteration_preserves_table_order() {
        let table = RuleTable::new(vec![gaming(), entry()]).unwrap();
        let cats: Vec<&str> = (&table).into_iter().map(|r| r.category.as_str()).collect();
        assert_eq!(cats, vec!["Gaming", "Entry"]);
    }

    fn vocab() -> Vocabulary {
        Vocabulary::new()
            .with_choice("cpu", ["A", "B", "C"])
            .with_choice("gpu", ["RTX", "iGPU"])
            .with_flag("rgb")
    }

    #[test]
    fn test_validate_against_ok() {
        let table = RuleTable::new(vec![entry(), gaming()]).unwrap();
        assert!(table.validate_against(&vocab()).is_ok());
    }

    #[test]
    fn test_validate_against_unknown_attribute() {
        let typo = entry().with_excluding("cpuu", Condition::any_of(["C"]));
        let table = RuleTable::new(vec![typo]).unwrap();
        match table.validate_against(&vocab()).unwrap_err() {
            RuleError::UnknownAttribute { attribute, field, .. } => {
                assert_eq!(attribute, "cpuu");
                assert_eq!(field, "excluding");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_against_kind_mismatch() {
        let table = RuleTable::new(vec![entry().with_optional("rgb", Condition::any_of(["on"]))])
            .unwrap();
        assert!(matches!(
            table.validate_against(&vocab()),
            Err(RuleError::KindMismatch { expected: "flag", .. })
        ));

        let table = RuleTable::new(vec![entry().with_optional("gpu", Condition::flag(true))])
            .unwrap();
        assert!(matches!(
            table.validate_against(&vocab()),
            Err(RuleError::KindMismatch { expected: "value-set", .. })
        ));
    }

    #[test]
    fn test_validate_against_unknown_option() {
        let table = RuleTable::new(vec![entry().with_required("gpu", Condition::any_of(["GTX"]))])
            .unwrap();
        match table.validate_against(&vocab()).unwrap_err() {
            RuleError::UnknownOption { value, .. } => assert_eq!(value, "GTX"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(feature = "serde")]
    mod json {
        use super::*;

        #[test]
        fn test_from_json_defaults_optional_sections() {
            let table = RuleTable::from_json(
                r#"[{
                    "category": "Entry",
                    "range_min": 0,
                    "range_max": 499,
                    "description": "Basic",
                    "required": { "cpu": ["A", "B"], "touch": false },
                    "base_confidence": 0.8
                }]"#,
            )
            .unwrap();
            let rule = &table.rules()[0];
            assert_eq!(rule.required.get("touch"), Some(&Condition::Flag(false)));
            assert!(rule.optional.is_empty());
            assert!(rule.excluding.is_empty());
        }

        #[test]
        fn test_from_json_missing_field() {
            let err = RuleTable::from_json(
                r#"[{ "category": "Entry", "range_min": 0, "range_max": 1,
                      "required": {}, "base_confidence": 0.5 }]"#,
            )
            .unwrap_err();
            assert!(matches!(err, RuleError::Parse { index: 0, .. }));
            let msg = err.to_string();
            assert!(msg.contains("#0"), "{msg}");
            assert!(msg.contains("Entry"), "{msg}");
            assert!(msg.contains("description"), "{msg}");
        }

        #[test]
        fn test_from_json_wrong_condition_type() {
            let err = RuleTable::from_json(
                r#"[{ "category": "Entry", "range_min": 0, "range_max": 1,
                      "description": "d", "required": { "cpu": ["A"] },
                      "base_confidence": 0.5 },
                    { "category": "Budget", "range_min": 500, "range_max": 799,
                      "description": "d", "required": { "cpu": "A" },
                      "base_confidence": 0.5 }]"#,
            )
            .unwrap_err();
            match &err {
                RuleError::Parse { index, category, .. } => {
                    assert_eq!(*index, 1);
                    assert_eq!(category.as_deref(), Some("Budget"));
                }
                other => panic!("unexpected error: {other}"),
            }
            let msg = err.to_string();
            assert!(msg.contains("#1"), "{msg}");
            assert!(msg.contains("Budget"), "{msg}");
            assert!(msg.contains("`cpu`"), "{msg}");
            assert!(msg.contains("an array of strings or a boolean"), "{msg}");
        }

        #[test]
        fn test_from_json_rejects_duplicate_condition() {
            let err = RuleTable::from_json(
                r#"[{ "category": "Entry", "range_min": 0, "range_max": 1,
                      "description": "d", "required": { "cpu": ["A"], "cpu": ["B"] },
                      "base_confidence": 0.5 }]"#,
            )
            .unwrap_err();
            assert!(matches!(err, RuleError::Parse { index: 0, .. }));
            assert!(err.to_string().contains("duplicate condition on `cpu`"));
        }

        #[test]
        fn test_from_json_unnamed_record() {
            let err = RuleTable::from_json(r#"[{ "range_min": 0 }]"#).unwrap_err();
            match err {
                RuleError::Parse { category, .. } => assert!(category.is_none()),
                other => panic!("unexpected error: {other}"),
            }
        }

        #[test]
        fn test_from_json_not_an_array() {
            let err = RuleTable::from_json(r#"{ "category": "Entry" }"#).unwrap_err();
            assert!(matches!(err, RuleError::Syntax(_)));
        }

        #[test]
        fn test_from_json_validates_values() {
            let err = RuleTable::from_json(
                r#"[{ "category": "Entry", "range_min": 0, "range_max": 1,
                      "description": "d", "required": {}, "base_confidence": 1.5 }]"#,
            )
            .unwrap_err();
            assert!(matches!(err, RuleError::InvalidField { .. }));
        }

        #[test]
        fn test_json_round_trip_preserves_table() {
            let table = RuleTable::new(vec![entry(), gaming()]).unwrap();
            let json = table.to_json().unwrap();
            assert_eq!(RuleTable::from_json(&json).unwrap(), table);
        }
    }
}
