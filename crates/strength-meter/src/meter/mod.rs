//! Strength scoring and fusion.
//!
//! The aggregator runs the rule battery over a scrubbed residue and folds the signals through
//! a coefficient table into a heuristic score. The fusion engine keeps one record per password
//! hash, merges the heuristic with a guess-number estimate that arrives later, and redelivers
//! to the registered callback whenever the estimate lands.

pub mod aggregator;
pub mod assessment;
pub mod builtin;
pub mod cache;
pub mod engine;
pub mod feedback;
pub mod model;
pub mod neural;
pub mod router;
pub mod rules;
pub mod services;

#[cfg(test)]
mod tests;

pub use aggregator::{HeuristicOutcome, ScoreAggregator, MAX_SCORE};
pub use assessment::{ComplianceVerdict, DictionaryAssessment, PolicyMetric, RuleAssessment};
pub use builtin::{BuiltinRules, PolicyCompliance};
pub use cache::BoundedCache;
pub use engine::{
    fuse, RecordState, ScoreFusionEngine, StrengthCallback, StrengthReport, StrengthRequest,
};
pub use feedback::{FeedbackAssembler, FeedbackSource, TipBundle};
pub use model::{CoefficientTable, Features, ModelError, FEATURE_COUNT, SCALING_FACTOR};
pub use neural::{
    spawn_guess_worker, BruteForceModel, DetachedEstimator, GuessModel, GuessNumberEstimator,
    NeuralScore, QueuedEstimator,
};
pub use router::{default_password_hash, strength_router};
pub use rules::{ComplianceEvaluator, Rule, RuleBattery, ScrubPass};
pub use services::MeterServices;
