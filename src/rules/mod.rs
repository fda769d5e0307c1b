//! Rule records and the rule table.
//!
//! A [`Rule`] supports one output category. It carries three
//! [`ConditionSet`]s:
//!
//! - **required**: at least half must hold for the rule to fire; the
//!   matched share scales the confidence.
//! - **optional**: each match adds to a bounded confidence bonus.
//! - **excluding**: any match vetoes the rule outright.
//!
//! A [`RuleTable`] is the ordered, validated collection the engine walks.
//! Malformed records are rejected when the table is built, never during
//! evaluation.

mod table;
mod types;

pub use table::RuleTable;
pub use types::{Condition, ConditionSet, Rule, Section, DEFAULT_BASE_CONFIDENCE};
