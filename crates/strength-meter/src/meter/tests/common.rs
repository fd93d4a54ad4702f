use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::config::MeterConfig;
use crate::meter::assessment::{
    ComplianceVerdict, DictionaryAssessment, PolicyMetric, RuleAssessment,
};
use crate::meter::engine::{ScoreFusionEngine, StrengthCallback, StrengthReport, StrengthRequest};
use crate::meter::model::{CoefficientTable, FEATURE_COUNT};
use crate::meter::neural::GuessNumberEstimator;
use crate::meter::rules::{ComplianceEvaluator, Rule, RuleBattery, ScrubPass};
use crate::meter::services::MeterServices;

/// Rule battery returning canned assessments. Unconfigured scrubs pass the password through,
/// everything else is silent.
#[derive(Default)]
pub(super) struct StubRules {
    pub(super) scrubs: HashMap<ScrubPass, RuleAssessment>,
    pub(super) rules: HashMap<Rule, RuleAssessment>,
    pub(super) dictionary: DictionaryAssessment,
    pub(super) common: RuleAssessment,
    pub(super) identity: RuleAssessment,
    pub(super) residues: Mutex<Vec<String>>,
}

impl StubRules {
    pub(super) fn with_scrub(mut self, pass: ScrubPass, assessment: RuleAssessment) -> Self {
        self.scrubs.insert(pass, assessment);
        self
    }

    pub(super) fn with_rule(mut self, rule: Rule, assessment: RuleAssessment) -> Self {
        self.rules.insert(rule, assessment);
        self
    }

    pub(super) fn with_dictionary(mut self, assessment: RuleAssessment) -> Self {
        self.dictionary = DictionaryAssessment {
            assessment,
            dictionary_tokens: 1.0,
            substitution_commonness: 0.0,
        };
        self
    }

    pub(super) fn with_common(mut self, assessment: RuleAssessment) -> Self {
        self.common = assessment;
        self
    }

    pub(super) fn with_identity(mut self, assessment: RuleAssessment) -> Self {
        self.identity = assessment;
        self
    }

    /// Residues seen by the dictionary check, in call order.
    pub(super) fn residues(&self) -> Vec<String> {
        self.residues.lock().expect("residue mutex poisoned").clone()
    }
}

impl RuleBattery for StubRules {
    fn scrub(&self, pass: ScrubPass, password: &str, _tokens: &[String]) -> RuleAssessment {
        self.scrubs
            .get(&pass)
            .cloned()
            .unwrap_or_else(|| RuleAssessment::silent(0.0).with_remaining(Some(password.into())))
    }

    fn assess(&self, rule: Rule, _password: &str) -> RuleAssessment {
        self.rules.get(&rule).cloned().unwrap_or_default()
    }

    fn dictionary(&self, password: &str) -> DictionaryAssessment {
        self.residues
            .lock()
            .expect("residue mutex poisoned")
            .push(password.to_string());
        self.dictionary.clone()
    }

    fn common_passwords(&self, _substrings: &[&str]) -> RuleAssessment {
        self.common.clone()
    }

    fn identity_info(&self, _password: &str, _all_info: &[String]) -> RuleAssessment {
        self.identity.clone()
    }
}

pub(super) struct FixedCompliance {
    pub(super) violations: Vec<&'static str>,
}

impl FixedCompliance {
    pub(super) fn compliant() -> Self {
        Self {
            violations: Vec::new(),
        }
    }
}

impl ComplianceEvaluator for FixedCompliance {
    fn verify(
        &self,
        _password: &str,
        _username: &str,
        _core_info: &[String],
        _all_info: &[String],
    ) -> ComplianceVerdict {
        let metrics = self
            .violations
            .iter()
            .enumerate()
            .map(|(index, explanation)| {
                (
                    format!("metric-{index}"),
                    PolicyMetric {
                        satisfied: false,
                        explanation: explanation.to_string(),
                    },
                )
            })
            .collect();
        ComplianceVerdict {
            compliant: self.violations.is_empty(),
            metrics,
        }
    }
}

#[derive(Default)]
pub(super) struct RecordingEstimator {
    queries: Mutex<Vec<String>>,
}

impl RecordingEstimator {
    pub(super) fn queries(&self) -> Vec<String> {
        self.queries.lock().expect("estimator mutex poisoned").clone()
    }
}

impl GuessNumberEstimator for RecordingEstimator {
    fn query_guess_number(&self, password: &str) {
        self.queries
            .lock()
            .expect("estimator mutex poisoned")
            .push(password.to_string());
    }
}

/// Collects every report delivered to the callbacks it hands out.
#[derive(Clone, Default)]
pub(super) struct ReportSink {
    reports: Arc<Mutex<Vec<StrengthReport>>>,
}

impl ReportSink {
    pub(super) fn callback(&self) -> StrengthCallback {
        let reports = self.reports.clone();
        Arc::new(move |report| {
            reports.lock().expect("sink mutex poisoned").push(report);
        })
    }

    pub(super) fn reports(&self) -> Vec<StrengthReport> {
        self.reports.lock().expect("sink mutex poisoned").clone()
    }

    pub(super) fn scores(&self) -> Vec<f64> {
        self.reports().iter().map(|report| report.score).collect()
    }
}

/// Coefficient table whose raw score is exactly `score` when every signal is zero.
pub(super) fn flat_table(score: f64) -> CoefficientTable {
    CoefficientTable {
        version: "test-flat".to_string(),
        intercept: score,
        weights: vec![0.0; FEATURE_COUNT],
        scaling_factor: 1.0,
    }
}

pub(super) fn meter_config() -> MeterConfig {
    MeterConfig {
        min_length: 8,
        min_classes: 3,
        cache_capacity: 64,
        max_length: 256,
        model_path: None,
    }
}

pub(super) fn services(
    config: MeterConfig,
    table: CoefficientTable,
    rules: StubRules,
    estimator: Arc<dyn GuessNumberEstimator>,
) -> MeterServices {
    MeterServices::new(
        config,
        table,
        Arc::new(rules),
        Arc::new(FixedCompliance::compliant()),
        estimator,
    )
}

/// Engine with silent rules, a flat heuristic of `heuristic`, and a recording estimator.
pub(super) fn engine_with_heuristic(
    heuristic: f64,
    config: MeterConfig,
) -> (Arc<ScoreFusionEngine>, Arc<RecordingEstimator>) {
    let estimator = Arc::new(RecordingEstimator::default());
    let services = services(
        config,
        flat_table(heuristic),
        StubRules::default(),
        estimator.clone(),
    );
    (Arc::new(ScoreFusionEngine::new(&services)), estimator)
}

pub(super) fn request(password: &str, password_hash: &str) -> StrengthRequest {
    StrengthRequest {
        password: password.to_string(),
        password_hash: password_hash.to_string(),
        ..StrengthRequest::default()
    }
}

pub(super) fn tip(public: &str, problem: &str) -> RuleAssessment {
    RuleAssessment::with_tip(1.0, public, format!("{public} (details)"), "because", problem)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
