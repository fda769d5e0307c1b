//! Attribute values and the fact base.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A single observed attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum AttributeValue {
    /// One option out of the attribute's finite option set.
    Text(String),
    /// A yes/no attribute.
    Flag(bool),
}

impl AttributeValue {
    /// Returns the text value, or `None` for a flag.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            AttributeValue::Flag(_) => None,
        }
    }

    /// Returns the flag value, or `None` for a text value.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            AttributeValue::Flag(b) => Some(*b),
            AttributeValue::Text(_) => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Text(s) => f.write_str(s),
            AttributeValue::Flag(true) => f.write_str("yes"),
            AttributeValue::Flag(false) => f.write_str("no"),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::Text(s)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Flag(b)
    }
}

/// Read access to observed facts.
///
/// Sources must be `Sync` because the engine may evaluate rules in
/// parallel against one shared fact base.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use u_infer::facts::{AttributeValue, FactSource};
///
/// let mut facts = HashMap::new();
/// facts.insert("ram".to_string(), AttributeValue::from("16 GB"));
///
/// assert_eq!(facts.fact("ram"), Some(&AttributeValue::from("16 GB")));
/// assert!(facts.fact("gpu").is_none());
/// ```
pub trait FactSource: Sync {
    /// Returns the observed value of `name`, or `None` if it is unknown.
    fn fact(&self, name: &str) -> Option<&AttributeValue>;
}

impl FactSource for HashMap<String, AttributeValue> {
    fn fact(&self, name: &str) -> Option<&AttributeValue> {
        self.get(name)
    }
}

impl FactSource for BTreeMap<String, AttributeValue> {
    fn fact(&self, name: &str) -> Option<&AttributeValue> {
        self.get(name)
    }
}

/// The fact base of one evaluation session.
///
/// Keys iterate in name order.
///
/// # Examples
///
/// ```
/// use u_infer::facts::{AttributeMap, AttributeValue};
///
/// let facts = AttributeMap::new()
///     .with("cpu", "Intel Core i7")
///     .with("thunderbolt", true);
///
/// assert_eq!(facts.len(), 2);
/// assert_eq!(facts.get("thunderbolt"), Some(&AttributeValue::Flag(true)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AttributeMap {
    values: BTreeMap<String, AttributeValue>,
}

impl AttributeMap {
    /// Creates an empty fact base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a fact and returns the map (builder style).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds or replaces a fact. Returns the previous value, if any.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue> {
        self.values.insert(name.into(), value.into())
    }

    /// Returns the value of `name`.
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.values.get(name)
    }

    /// Removes a fact, making the attribute unknown again.
    pub fn remove(&mut self, name: &str) -> Option<AttributeValue> {
        self.values.remove(name)
    }

    /// Returns `true` if `name` has an observed value.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of known attributes.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no attribute is known.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Forgets every fact, starting a new session.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Iterates `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FactSource for AttributeMap {
    fn fact(&self, name: &str) -> Option<&AttributeValue> {
        self.get(name)
    }
}

impl<K, V> FromIterator<(K, V)> for AttributeMap
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = AttributeMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<K, V> Extend<(K, V)> for AttributeMap
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}
