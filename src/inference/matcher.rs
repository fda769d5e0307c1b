//! Condition matching.

use crate::facts::{AttributeValue, FactSource};
use crate::rules::{Condition, ConditionSet};

/// Returns `true` if the observed value of `attribute` meets `condition`.
///
/// - An unknown attribute never matches, whatever the condition.
/// - A value set matches a text value that is a member of the set.
/// - A flag condition matches a flag value that is exactly equal.
///
/// Text never matches a flag condition and vice versa.
///
/// # Examples
///
/// ```
/// use u_infer::facts::AttributeMap;
/// use u_infer::inference::satisfies;
/// use u_infer::rules::Condition;
///
/// let facts = AttributeMap::new().with("cpu", "A").with("rgb", true);
///
/// assert!(satisfies("cpu", &Condition::any_of(["A", "B"]), &facts));
/// assert!(!satisfies("cpu", &Condition::any_of(["C"]), &facts));
/// assert!(satisfies("rgb", &Condition::flag(true), &facts));
/// assert!(!satisfies("ram", &Condition::any_of(["8 GB"]), &facts));
/// ```
pub fn satisfies<F: FactSource + ?Sized>(attribute: &str, condition: &Condition, facts: &F) -> bool {
    let Some(observed) = facts.fact(attribute) else {
        return false;
    };
    match (condition, observed) {
        (Condition::AnyOf(accepted), AttributeValue::Text(value)) => {
            accepted.iter().any(|a| a == value)
        }
        (Condition::Flag(expected), AttributeValue::Flag(value)) => expected == value,
        _ => false,
    }
}

/// Counts the entries of `conditions` that `facts` satisfy.
pub fn count_satisfied<F: FactSource + ?Sized>(conditions: &ConditionSet, facts: &F) -> usize {
    conditions
        .iter()
        .filter(|(attribute, condition)| satisfies(attribute, condition, facts))
        .count()
}
