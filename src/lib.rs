//! Forward-chaining rule inference engine.
//!
//! Estimates a category (for example a price bracket) from a set of
//! declared attributes by matching them against a table of hand-authored
//! rules:
//!
//! - **Facts**: the observed attribute values ([`facts::AttributeMap`]) and
//!   the optional attribute [`facts::Vocabulary`].
//! - **Rules**: required, optional and excluding conditions plus a base
//!   confidence, collected in a validated [`rules::RuleTable`].
//! - **Inference**: the condition matcher, the per-rule evaluator and the
//!   [`inference::InferenceEngine`] that merges results per category and
//!   ranks them by confidence.
//! - **Catalog**: a ready-made laptop price table built on the above.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use u_infer::facts::AttributeMap;
//! use u_infer::inference::{InferenceConfig, InferenceEngine};
//! use u_infer::rules::{Condition, Rule, RuleTable};
//!
//! let table = RuleTable::new(vec![Rule::new("Entry", 0.0, 499.0, "Basic machine")
//!     .with_required("cpu", Condition::any_of(["A", "B"]))
//!     .with_base_confidence(0.8)])
//! .unwrap();
//!
//! let engine = InferenceEngine::new(Arc::new(table), InferenceConfig::default()).unwrap();
//! let facts = AttributeMap::new().with("cpu", "A");
//!
//! let estimates = engine.infer(&facts);
//! assert_eq!(estimates.len(), 1);
//! assert_eq!(estimates[0].category, "Entry");
//! ```
//!
//! # Cargo features
//!
//! - `serde`: serialization for data types and [`rules::RuleTable::from_json`].
//! - `parallel`: evaluates rules with rayon when
//!   [`inference::InferenceConfig::parallel`] is set.

pub mod catalog;
pub mod error;
pub mod facts;
pub mod inference;
pub mod rules;

pub use error::{ConfigError, RuleError};
