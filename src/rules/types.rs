//! Conditions and rule records.

use crate::error::{RuleError, RuleResult};
use std::collections::BTreeMap;

/// Base confidence given to rules built without an explicit value.
pub const DEFAULT_BASE_CONFIDENCE: f64 = 0.75;

/// What an attribute must look like for a condition to hold.
///
/// With the `serde` feature a condition is written as a JSON array of
/// accepted strings or as a bare boolean.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Condition {
    /// The observed text value is one of these.
    AnyOf(Vec<String>),
    /// The observed flag equals this value.
    Flag(bool),
}

impl Condition {
    /// Builds an accepted-value set.
    pub fn any_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Condition::AnyOf(values.into_iter().map(Into::into).collect())
    }

    /// Builds a flag condition.
    pub fn flag(value: bool) -> Self {
        Condition::Flag(value)
    }
}

/// Conditions keyed by attribute name.
///
/// When read from JSON, an attribute listed twice is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ConditionSet {
    entries: BTreeMap<String, Condition>,
}

impl ConditionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the condition on `attribute`, replacing any previous one.
    pub fn insert(&mut self, attribute: impl Into<String>, condition: Condition) {
        self.entries.insert(attribute.into(), condition);
    }

    pub fn get(&self, attribute: &str) -> Option<&Condition> {
        self.entries.get(attribute)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Condition)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Condition)> for ConditionSet {
    fn from_iter<I: IntoIterator<Item = (K, Condition)>>(iter: I) -> Self {
        let mut set = ConditionSet::new();
        for (k, c) in iter {
            set.insert(k, c);
        }
        set
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Condition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de;

        struct ConditionVisitor;

        impl<'de> de::Visitor<'de> for ConditionVisitor {
            type Value = Condition;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("an array of strings or a boolean")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(Condition::Flag(v))
            }

            fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(value) = seq.next_element::<String>()? {
                    values.push(value);
                }
                Ok(Condition::AnyOf(values))
            }
        }

        deserializer.deserialize_any(ConditionVisitor)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ConditionSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de;

        struct ConditionSetVisitor;

        impl<'de> de::Visitor<'de> for ConditionSetVisitor {
            type Value = ConditionSet;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a map from attribute names to conditions")
            }

            fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = BTreeMap::new();
                while let Some(attribute) = map.next_key::<String>()? {
                    let condition = map.next_value::<Condition>().map_err(|e| {
                        <A::Error as de::Error>::custom(format_args!(
                            "condition on `{attribute}`: {e}"
                        ))
                    })?;
                    if entries.contains_key(&attribute) {
                        return Err(de::Error::custom(format_args!(
                            "duplicate condition on `{attribute}`"
                        )));
                    }
                    entries.insert(attribute, condition);
                }
                Ok(ConditionSet { entries })
            }
        }

        deserializer.deserialize_map(ConditionSetVisitor)
    }
}

/// The three condition groups of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Required,
    Optional,
    Excluding,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Required, Section::Optional, Section::Excluding];

    /// Field name as written in rule records.
    pub fn field(self) -> &'static str {
        match self {
            Section::Required => "required",
            Section::Optional => "optional",
            Section::Excluding => "excluding",
        }
    }
}

/// A hand-authored inference rule.
///
/// # Examples
///
/// ```
/// use u_infer::rules::{Condition, Rule};
///
/// let rule = Rule::new("Upper mid-range", 1200.0, 1799.0, "Gaming laptop")
///     .with_required("usage", Condition::any_of(["Gaming"]))
///     .with_required("ram", Condition::any_of(["16 GB"]))
///     .with_optional("rgb_keyboard", Condition::flag(true))
///     .with_excluding("refresh_rate", Condition::any_of(["60 Hz"]))
///     .with_base_confidence(0.84);
///
/// assert_eq!(rule.required.len(), 2);
/// assert!((rule.base_confidence - 0.84).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rule {
    /// Output class this rule supports. Several rules may share one.
    pub category: String,

    /// Lower bound of the value bracket associated with the category.
    pub range_min: f64,

    /// Upper bound of the value bracket.
    pub range_max: f64,

    /// Human-readable explanation shown with the estimate.
    pub description: String,

    /// Conditions of which at least half must hold.
    pub required: ConditionSet,

    /// Conditions contributing a confidence bonus.
    #[cfg_attr(feature = "serde", serde(default))]
    pub optional: ConditionSet,

    /// Conditions that veto the rule when any one holds.
    #[cfg_attr(feature = "serde", serde(default))]
    pub excluding: ConditionSet,

    /// A-priori reliability in `[0, 1]`.
    pub base_confidence: f64,
}

impl Rule {
    /// Creates a rule with no conditions and [`DEFAULT_BASE_CONFIDENCE`].
    pub fn new(
        category: impl Into<String>,
        range_min: f64,
        range_max: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            range_min,
            range_max,
            description: description.into(),
            required: ConditionSet::new(),
            optional: ConditionSet::new(),
            excluding: ConditionSet::new(),
            base_confidence: DEFAULT_BASE_CONFIDENCE,
        }
    }

    /// Adds a required condition.
    pub fn with_required(mut self, attribute: impl Into<String>, condition: Condition) -> Self {
        self.required.insert(attribute, condition);
        self
    }

    /// Adds an optional condition.
    pub fn with_optional(mut self, attribute: impl Into<String>, condition: Condition) -> Self {
        self.optional.insert(attribute, condition);
        self
    }

    /// Adds an excluding condition.
    pub fn with_excluding(mut self, attribute: impl Into<String>, condition: Condition) -> Self {
        self.excluding.insert(attribute, condition);
        self
    }

    /// Sets the base confidence. Not clamped; out-of-range values are
    /// rejected when the rule enters a table.
    pub fn with_base_confidence(mut self, confidence: f64) -> Self {
        self.base_confidence = confidence;
        self
    }

    /// Returns the condition group for `section`.
    pub fn section(&self, section: Section) -> &ConditionSet {
        match section {
            Section::Required => &self.required,
            Section::Optional => &self.optional,
            Section::Excluding => &self.excluding,
        }
    }

    /// Checks the record shape. `index` is the rule's table position,
    /// used to name it in errors.
    pub(crate) fn validate(&self, index: usize) -> RuleResult<()> {
        let invalid = |field: &str, reason: String| RuleError::InvalidField {
            index,
            category: self.category.clone(),
            field: field.to_string(),
            reason,
        };

        if self.category.trim().is_empty() {
            return Err(invalid("category", "must not be empty".into()));
        }
        if !self.range_min.is_finite() {
            return Err(invalid("range_min", format!("must be finite, got {}", self.range_min)));
        }
        if !self.range_max.is_finite() {
            return Err(invalid("range_max", format!("must be finite, got {}", self.range_max)));
        }
        if self.range_min > self.range_max {
            return Err(invalid(
                "range_min",
                format!(
                    "must not exceed range_max ({} > {})",
                    self.range_min, self.range_max
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.base_confidence) {
            return Err(invalid(
                "base_confidence",
                format!("must be within [0, 1], got {}", self.base_confidence),
            ));
        }
        for section in Section::ALL {
            for (attribute, condition) in self.section(section).iter() {
                if matches!(condition, Condition::AnyOf(values) if values.is_empty()) {
                    return Err(invalid(
                        &format!("{}.{}", section.field(), attribute),
                        "must list at least one accepted value".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}
