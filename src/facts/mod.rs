//! Observed attribute values.
//!
//! An [`AttributeMap`] is the fact base of one evaluation session: it is
//! filled once by an input adapter (console prompts, a form, a request
//! body) and then borrowed immutably by the engine. Attributes absent from
//! the map are unknown and never satisfy a condition.
//!
//! The engine reads facts through the [`FactSource`] trait, so callers may
//! evaluate against their own map types.
//!
//! A [`Vocabulary`] describes the closed set of attributes an adapter asks
//! for. The engine never requires one; it backs strict rule validation
//! ([`RuleTable::validate_against`](crate::rules::RuleTable::validate_against)).

mod types;
mod vocabulary;

pub use types::{AttributeMap, AttributeValue, FactSource};
pub use vocabulary::{AttributeKind, Vocabulary};
