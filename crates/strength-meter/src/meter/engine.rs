use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::aggregator::{ScoreAggregator, MAX_SCORE};
use super::cache::BoundedCache;
use super::neural::{GuessNumberEstimator, NeuralScore};
use super::rules::ComplianceEvaluator;
use super::services::MeterServices;

/// Receives every delivery for the password hash it was registered under.
pub type StrengthCallback = Arc<dyn Fn(StrengthReport) + Send + Sync>;

/// Payload handed to the registered callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthReport {
    pub password_hash: String,
    pub score: f64,
    pub compliant: bool,
    /// JSON array of policy violation explanations.
    pub problems: String,
    /// JSON object with `public_tips`, `sensitive_tips` and `reason_why`.
    pub feedback: String,
}

/// Inputs for one strength request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthRequest {
    pub password: String,
    pub password_hash: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub core_info: Vec<String>,
    #[serde(default)]
    pub all_info: Vec<String>,
}

/// Lifecycle of a password hash inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordState {
    NoScore,
    HeuristicReady,
    Fused,
}

/// Combine a heuristic score and a neural score into the displayed value.
///
/// The heuristic is taken when present and non-negative. A usable neural score replaces it
/// when nothing non-zero is known yet or when it is lower. Half the password length is the
/// floor and [`MAX_SCORE`] the ceiling. An empty password always yields zero.
pub fn fuse(heuristic: Option<f64>, neural: NeuralScore, password_length: usize) -> f64 {
    let mut overall = 0.0;

    if password_length > 0 {
        if let Some(score) = heuristic.filter(|score| *score >= 0.0) {
            overall = score;
        }
        if let Some(score) = neural.usable() {
            if overall == 0.0 || score < overall {
                overall = score;
            }
        }
    }

    overall.max(password_length as f64 / 2.0).min(MAX_SCORE)
}

struct ScoreRecord {
    password: String,
    heuristic: Option<f64>,
    compliant: bool,
    problems: String,
    feedback: String,
    revision: u64,
    delivered: u64,
    callback: StrengthCallback,
}

impl fmt::Debug for ScoreRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoreRecord")
            .field("heuristic", &self.heuristic)
            .field("compliant", &self.compliant)
            .field("revision", &self.revision)
            .field("delivered", &self.delivered)
            .finish_non_exhaustive()
    }
}

struct EngineState {
    records: BoundedCache<String, ScoreRecord>,
    neural: BoundedCache<String, NeuralScore>,
}

impl EngineState {
    fn neural_for(&self, password: &str) -> NeuralScore {
        self.neural.peek(password).copied().unwrap_or_default()
    }

    fn report_for(&self, hash: &str, record: &ScoreRecord) -> StrengthReport {
        let neural = self.neural_for(&record.password);
        StrengthReport {
            password_hash: hash.to_string(),
            score: fuse(record.heuristic, neural, record.password.chars().count()),
            compliant: record.compliant,
            problems: record.problems.clone(),
            feedback: record.feedback.clone(),
        }
    }
}

struct Delivery {
    report: StrengthReport,
    revision: u64,
}

/// Per-hash score store that merges the synchronous heuristic with the asynchronously
/// arriving guess-number score and notifies the registered callback on every improvement.
pub struct ScoreFusionEngine {
    aggregator: ScoreAggregator,
    compliance: Arc<dyn ComplianceEvaluator>,
    estimator: Arc<dyn GuessNumberEstimator>,
    state: Mutex<EngineState>,
}

impl ScoreFusionEngine {
    pub fn new(services: &MeterServices) -> Self {
        let capacity = services.config.cache_capacity;
        Self {
            aggregator: ScoreAggregator::new(services),
            compliance: services.compliance.clone(),
            estimator: services.estimator.clone(),
            state: Mutex::new(EngineState {
                records: BoundedCache::new(capacity),
                neural: BoundedCache::new(capacity),
            }),
        }
    }

    /// Longest password the engine scores in full.
    pub fn max_length(&self) -> usize {
        self.aggregator.max_length()
    }

    fn state(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Score `request`, deliver the result to `callback` before returning, and issue a
    /// guess-number query unless one already exists for the same password text.
    pub fn get_strength_and_feedback(&self, callback: StrengthCallback, request: StrengthRequest) {
        let StrengthRequest {
            password,
            password_hash,
            username,
            core_info,
            all_info,
        } = request;

        let outcome = self
            .aggregator
            .compute(&password, &username, &core_info, &all_info);
        let verdict = self
            .compliance
            .verify(&password, &username, &core_info, &all_info);
        let problems = to_json(&verdict.violations(), "[]");
        let feedback = to_json(&outcome.tips, "{}");

        let (delivery, dispatch) = {
            let mut state = self.state();

            let dispatch = if state.neural.get_mut(password.as_str()).is_some() {
                false
            } else {
                state.neural.insert(password.clone(), NeuralScore::Pending);
                true
            };

            let (revision, delivered) = state
                .records
                .peek(password_hash.as_str())
                .map(|record| (record.revision + 1, record.delivered))
                .unwrap_or((1, 0));
            let record = ScoreRecord {
                password: password.clone(),
                heuristic: Some(outcome.score),
                compliant: verdict.compliant,
                problems,
                feedback,
                revision,
                delivered,
                callback,
            };
            let report = state.report_for(&password_hash, &record);
            for (hash, _) in state.records.insert(password_hash.clone(), record) {
                debug!(password_hash = %hash, "score record evicted");
            }

            (Delivery { report, revision }, dispatch)
        };

        debug!(
            password_hash = %password_hash,
            heuristic = outcome.score,
            score = delivery.report.score,
            "heuristic result ready"
        );
        self.deliver(delivery);

        if dispatch {
            info!(
                password_hash = %password_hash,
                length = password.chars().count(),
                "guess-number query dispatched"
            );
            self.estimator.query_guess_number(&password);
        }
    }

    /// Record a resolved guess-number score and redeliver for every hash scored from
    /// `password`.
    pub fn report_neural_score(&self, password: &str, score: f64) {
        let deliveries: Vec<Delivery> = {
            let mut state = self.state();
            state
                .neural
                .insert(password.to_string(), NeuralScore::Resolved(score));

            let hashes: Vec<String> = state
                .records
                .iter()
                .filter(|(_, record)| record.password == password)
                .map(|(hash, _)| hash.clone())
                .collect();

            let mut deliveries = Vec::with_capacity(hashes.len());
            for hash in hashes {
                let revision = match state.records.get_mut(hash.as_str()) {
                    Some(record) => {
                        record.revision += 1;
                        record.revision
                    }
                    None => continue,
                };
                if let Some(record) = state.records.peek(hash.as_str()) {
                    let report = state.report_for(&hash, record);
                    deliveries.push(Delivery { report, revision });
                }
            }
            deliveries
        };

        if deliveries.is_empty() {
            warn!(
                length = password.chars().count(),
                "guess-number score arrived with no live record"
            );
            return;
        }

        info!(
            score,
            hashes = deliveries.len(),
            "guess-number score fused"
        );
        for delivery in deliveries {
            self.deliver(delivery);
        }
    }

    /// Current neural entry for `password`.
    pub fn query_neural_score(&self, password: &str) -> NeuralScore {
        self.state().neural_for(password)
    }

    /// Latest fused view of a hash without invoking its callback.
    pub fn latest(&self, password_hash: &str) -> Option<StrengthReport> {
        let state = self.state();
        let record = state.records.peek(password_hash)?;
        Some(state.report_for(password_hash, record))
    }

    pub fn record_state(&self, password_hash: &str) -> RecordState {
        let state = self.state();
        match state.records.peek(password_hash) {
            None => RecordState::NoScore,
            Some(record) => match state.neural_for(&record.password) {
                NeuralScore::Resolved(_) => RecordState::Fused,
                NeuralScore::Absent | NeuralScore::Pending => RecordState::HeuristicReady,
            },
        }
    }

    /// Invoke the callback unless a newer revision already reached it. The callback runs
    /// outside the state lock so it may call back into the engine.
    fn deliver(&self, delivery: Delivery) {
        let callback = {
            let mut state = self.state();
            let Some(record) = state.records.get_mut(delivery.report.password_hash.as_str()) else {
                return;
            };
            if delivery.revision <= record.delivered {
                debug!(
                    password_hash = %delivery.report.password_hash,
                    revision = delivery.revision,
                    "stale delivery dropped"
                );
                return;
            }
            record.delivered = delivery.revision;
            record.callback.clone()
        };

        callback(delivery.report);
    }
}

fn to_json<T: Serialize>(value: &T, fallback: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| fallback.to_string())
}
