//! Forward-chaining inference over a rule table.
//!
//! Three layers, bottom-up:
//!
//! - [`satisfies`]: does one attribute meet one condition?
//! - [`evaluate`]: does one rule fire, and with what confidence?
//!   Exclusions veto first; then at least half of the required conditions
//!   must hold; the confidence is the base confidence scaled by the
//!   required-match ratio plus a bounded bonus for optional matches.
//! - [`InferenceEngine`]: walks the whole table, keeps the best estimate
//!   per category above the confidence threshold and ranks the survivors.
//!
//! # Scoring
//!
//! ```text
//! ratio      = satisfied_required / total_required      (1.0 when none)
//! fires      = no exclusion holds && ratio >= 0.5
//! confidence = min(1, base * (0.7 + 0.3 * ratio) + 0.15 * satisfied_optional / total_optional)
//! ```

mod config;
mod engine;
mod evaluator;
mod matcher;
mod types;

pub use config::{InferenceConfig, TieBreaker, DEFAULT_THRESHOLD};
pub use engine::{InferenceEngine, DEFAULT_DISPLAY_COUNT};
pub use evaluator::{
    evaluate, Evaluation, OPTIONAL_BONUS_CAP, REQUIRED_FLOOR, REQUIRED_QUORUM, REQUIRED_WEIGHT,
};
pub use matcher::{count_satisfied, satisfies};
pub use types::{ConfidenceLevel, Estimate};
