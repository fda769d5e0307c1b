//! Declared attribute vocabulary.

use super::types::AttributeValue;
use std::collections::BTreeMap;

/// The type of a declared attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeKind {
    /// Exactly one of a finite list of options.
    Choice(Vec<String>),
    /// A yes/no attribute.
    Flag,
}

impl AttributeKind {
    /// Short name used in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            AttributeKind::Choice(_) => "choice",
            AttributeKind::Flag => "flag",
        }
    }
}

/// Closed set of attribute names and their value domains.
///
/// # Examples
///
/// ```
/// use u_infer::facts::{AttributeValue, Vocabulary};
///
/// let vocab = Vocabulary::new()
///     .with_choice("ram", ["8 GB", "16 GB"])
///     .with_flag("thunderbolt");
///
/// assert!(vocab.accepts("ram", &AttributeValue::from("16 GB")));
/// assert!(!vocab.accepts("ram", &AttributeValue::from("12 GB")));
/// assert!(vocab.accepts("thunderbolt", &AttributeValue::from(false)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vocabulary {
    attributes: BTreeMap<String, AttributeKind>,
}

impl Vocabulary {
    /// Creates an empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a choice attribute with its options.
    pub fn with_choice<I, S>(mut self, name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = options.into_iter().map(Into::into).collect();
        self.attributes
            .insert(name.into(), AttributeKind::Choice(options));
        self
    }

    /// Declares a flag attribute.
    pub fn with_flag(mut self, name: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), AttributeKind::Flag);
        self
    }

    /// Returns the kind of `name`, if declared.
    pub fn kind(&self, name: &str) -> Option<&AttributeKind> {
        self.attributes.get(name)
    }

    /// Returns `true` if `name` is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Declared attribute names, in name order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// Options of a choice attribute. `None` for flags and unknown names.
    pub fn options(&self, name: &str) -> Option<&[String]> {
        match self.attributes.get(name)? {
            AttributeKind::Choice(options) => Some(options),
            AttributeKind::Flag => None,
        }
    }

    /// Returns `true` if `value` lies in the domain of `name`.
    pub fn accepts(&self, name: &str, value: &AttributeValue) -> bool {
        match (self.attributes.get(name), value) {
            (Some(AttributeKind::Choice(options)), AttributeValue::Text(v)) => {
                options.iter().any(|o| o == v)
            }
            (Some(AttributeKind::Flag), AttributeValue::Flag(_)) => true,
            _ => false,
        }
    }

    /// Number of declared attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if nothing is declared.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
