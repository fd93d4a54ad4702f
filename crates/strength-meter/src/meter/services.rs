use std::sync::Arc;

use crate::config::MeterConfig;

use super::builtin::{BuiltinRules, PolicyCompliance};
use super::model::{CoefficientTable, ModelError};
use super::neural::GuessNumberEstimator;
use super::rules::{ComplianceEvaluator, RuleBattery};

/// Everything the meter depends on, constructed once at startup and handed to each component.
#[derive(Clone)]
pub struct MeterServices {
    pub config: MeterConfig,
    pub model: Arc<CoefficientTable>,
    pub rules: Arc<dyn RuleBattery>,
    pub compliance: Arc<dyn ComplianceEvaluator>,
    pub estimator: Arc<dyn GuessNumberEstimator>,
}

impl MeterServices {
    pub fn new(
        config: MeterConfig,
        model: CoefficientTable,
        rules: Arc<dyn RuleBattery>,
        compliance: Arc<dyn ComplianceEvaluator>,
        estimator: Arc<dyn GuessNumberEstimator>,
    ) -> Self {
        Self {
            config,
            model: Arc::new(model),
            rules,
            compliance,
            estimator,
        }
    }

    /// Built-in rules and policy, with the coefficient table taken from
    /// `config.model_path` when one is configured.
    pub fn builtin(
        config: MeterConfig,
        estimator: Arc<dyn GuessNumberEstimator>,
    ) -> Result<Self, ModelError> {
        let model = match &config.model_path {
            Some(path) => CoefficientTable::load(path)?,
            None => CoefficientTable::reference(),
        };
        let compliance = Arc::new(PolicyCompliance::from_config(&config));

        Ok(Self::new(
            config,
            model,
            Arc::new(BuiltinRules::default()),
            compliance,
            estimator,
        ))
    }
}
