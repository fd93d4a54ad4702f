use std::collections::BTreeMap;

use crate::config::MeterConfig;
use crate::meter::assessment::{ComplianceVerdict, PolicyMetric};
use crate::meter::rules::ComplianceEvaluator;

use super::{contains_ignore_case, distinct_classes};

/// Usernames shorter than this are not checked for containment.
const MIN_USERNAME_CHECK: usize = 3;

/// Minimum-requirement policy: length, character classes, and no embedded username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyCompliance {
    min_length: usize,
    min_classes: usize,
}

impl PolicyCompliance {
    pub fn new(min_length: usize, min_classes: usize) -> Self {
        Self {
            min_length,
            min_classes: min_classes.min(4),
        }
    }

    pub fn from_config(config: &MeterConfig) -> Self {
        Self::new(config.min_length, config.min_classes)
    }
}

impl Default for PolicyCompliance {
    fn default() -> Self {
        Self::from_config(&MeterConfig::default())
    }
}

impl ComplianceEvaluator for PolicyCompliance {
    fn verify(
        &self,
        password: &str,
        username: &str,
        _core_info: &[String],
        _all_info: &[String],
    ) -> ComplianceVerdict {
        let mut metrics = BTreeMap::new();

        metrics.insert(
            "length".to_string(),
            PolicyMetric {
                satisfied: password.chars().count() >= self.min_length,
                explanation: format!("Use at least {} characters", self.min_length),
            },
        );
        metrics.insert(
            "classes".to_string(),
            PolicyMetric {
                satisfied: distinct_classes(password) >= self.min_classes,
                explanation: format!(
                    "Use at least {} of: lowercase letters, uppercase letters, digits, symbols",
                    self.min_classes
                ),
            },
        );
        let username = username.trim();
        metrics.insert(
            "username".to_string(),
            PolicyMetric {
                satisfied: username.chars().count() < MIN_USERNAME_CHECK
                    || !contains_ignore_case(password, username),
                explanation: "Do not include your username".to_string(),
            },
        );

        let compliant = metrics.values().all(|metric| metric.satisfied);
        ComplianceVerdict { compliant, metrics }
    }
}
