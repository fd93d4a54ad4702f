use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::aggregator::MAX_SCORE;
use super::engine::ScoreFusionEngine;
use super::model::SCALING_FACTOR;

/// Guess-number score memoized per password value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(tag = "state", content = "score", rename_all = "snake_case")]
pub enum NeuralScore {
    #[default]
    Absent,
    /// A query is in flight; no further query is issued for the same password.
    Pending,
    Resolved(f64),
}

impl NeuralScore {
    /// Finite, non-negative value usable by fusion.
    pub fn usable(self) -> Option<f64> {
        match self {
            NeuralScore::Resolved(score) if score.is_finite() && score >= 0.0 => Some(score),
            _ => None,
        }
    }
}

/// Outbound side of the guess-number estimator. Fire-and-forget: results come back through
/// [`ScoreFusionEngine::report_neural_score`].
pub trait GuessNumberEstimator: Send + Sync {
    fn query_guess_number(&self, password: &str);
}

/// Estimator that never answers. Records stay heuristic-only.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedEstimator;

impl GuessNumberEstimator for DetachedEstimator {
    fn query_guess_number(&self, _password: &str) {}
}

/// Hands queries to a background worker over an unbounded channel.
#[derive(Debug, Clone)]
pub struct QueuedEstimator {
    sender: mpsc::UnboundedSender<String>,
}

impl QueuedEstimator {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl GuessNumberEstimator for QueuedEstimator {
    fn query_guess_number(&self, password: &str) {
        if self.sender.send(password.to_string()).is_err() {
            debug!("guess-number worker stopped; query dropped");
        }
    }
}

/// Model that turns a password into a guess-number-derived score on the display scale.
pub trait GuessModel: Send + Sync {
    fn guess_score(&self, password: &str) -> f64;
}

/// Exhaustive-search estimate: log10 of the search space for the password's character
/// classes, on the same scale as the heuristic.
#[derive(Debug, Default, Clone, Copy)]
pub struct BruteForceModel;

impl GuessModel for BruteForceModel {
    fn guess_score(&self, password: &str) -> f64 {
        let length = password.chars().count();
        if length == 0 {
            return 0.0;
        }

        let mut alphabet = 0u32;
        if password.chars().any(|c| c.is_ascii_lowercase()) {
            alphabet += 26;
        }
        if password.chars().any(|c| c.is_ascii_uppercase()) {
            alphabet += 26;
        }
        if password.chars().any(|c| c.is_ascii_digit()) {
            alphabet += 10;
        }
        if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
            alphabet += 33;
        }

        let log_guesses = length as f64 * f64::from(alphabet.max(1)).log10();
        (log_guesses * SCALING_FACTOR).min(MAX_SCORE)
    }
}

/// Drain queued passwords through `model` and report each result to `engine`.
pub fn spawn_guess_worker(
    mut receiver: mpsc::UnboundedReceiver<String>,
    model: Arc<dyn GuessModel>,
    engine: Arc<ScoreFusionEngine>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(password) = receiver.recv().await {
            let score = model.guess_score(&password);
            engine.report_neural_score(&password, score);
            tokio::task::yield_now().await;
        }
        info!("guess-number worker stopped");
    })
}
