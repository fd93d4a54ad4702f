use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Uniform result every rule evaluator hands back to the aggregator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleAssessment {
    /// Count or score; meaning is defined per rule.
    pub signal: f64,
    pub public_text: String,
    pub sensitive_text: String,
    pub reason_why: String,
    /// Canonical problem description used when suppressing redundant tips.
    pub problem_text: String,
    /// Password with matched content removed. Only scrubbing passes set this;
    /// `None` means the pass consumed the whole password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining: Option<String>,
}

impl RuleAssessment {
    /// Assessment that contributes a signal but no feedback.
    pub fn silent(signal: f64) -> Self {
        Self {
            signal,
            ..Self::default()
        }
    }

    pub fn with_tip(
        signal: f64,
        public_text: impl Into<String>,
        sensitive_text: impl Into<String>,
        reason_why: impl Into<String>,
        problem_text: impl Into<String>,
    ) -> Self {
        Self {
            signal,
            public_text: public_text.into(),
            sensitive_text: sensitive_text.into(),
            reason_why: reason_why.into(),
            problem_text: problem_text.into(),
            remaining: None,
        }
    }

    pub fn with_remaining(mut self, remaining: Option<String>) -> Self {
        self.remaining = remaining;
        self
    }

    pub fn has_tip(&self) -> bool {
        !self.public_text.is_empty()
    }
}

/// Dictionary matching reports three signals rather than one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DictionaryAssessment {
    /// `signal` carries the number of characters covered by dictionary words.
    pub assessment: RuleAssessment,
    pub dictionary_tokens: f64,
    pub substitution_commonness: f64,
}

/// Outcome of the external minimum-requirement policy check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceVerdict {
    pub compliant: bool,
    pub metrics: BTreeMap<String, PolicyMetric>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyMetric {
    pub satisfied: bool,
    pub explanation: String,
}

impl ComplianceVerdict {
    /// Explanations for every failed metric; empty when the verdict is compliant.
    pub fn violations(&self) -> Vec<String> {
        if self.compliant {
            return Vec::new();
        }

        self.metrics
            .values()
            .filter(|metric| !metric.satisfied)
            .map(|metric| metric.explanation.clone())
            .collect()
    }
}
