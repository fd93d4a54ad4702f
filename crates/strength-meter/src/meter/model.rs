use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Number of weighted features, excluding the intercept.
pub const FEATURE_COUNT: usize = 23;

/// Makes a guess space of 10^15 fill two thirds of the 0..=100 display range.
pub const SCALING_FACTOR: f64 = 67.0 / 15.0;

/// Errors raised while loading a coefficient table.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("unable to read coefficient table {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("coefficient table is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("coefficient table has {found} weights, expected {expected}")]
    WeightCount { expected: usize, found: usize },
}

/// Linear regression artifact mapping rule signals to a heuristic score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientTable {
    pub version: String,
    pub intercept: f64,
    /// One weight per entry of [`Features::to_vector`]; several are intentionally zero.
    pub weights: Vec<f64>,
    pub scaling_factor: f64,
}

impl CoefficientTable {
    /// Regression fitted against guess numbers; weights follow [`Features`] field order.
    pub fn reference() -> Self {
        Self {
            version: "reference-2017".to_string(),
            intercept: 1.530,
            weights: vec![
                0.3129, 0.9912, 0.04637, -0.03885, -0.1172, -0.2976, -0.0008581, -0.3008,
                -0.5566, 0.0, 0.9108, 0.7369, 0.7578, 0.0, -0.1213, -0.2402, -0.1364, -0.5534,
                1.927, 0.001496, -0.3946, -2.0, -1.0,
            ],
            scaling_factor: SCALING_FACTOR,
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, ModelError> {
        let table: Self = serde_json::from_str(raw)?;
        table.validate()?;
        Ok(table)
    }

    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ModelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.weights.len() != FEATURE_COUNT {
            return Err(ModelError::WeightCount {
                expected: FEATURE_COUNT,
                found: self.weights.len(),
            });
        }
        Ok(())
    }

    /// Intercept plus weighted features, multiplied by the scaling factor. No clamping.
    pub fn raw_score(&self, features: &Features) -> f64 {
        let weighted: f64 = self
            .weights
            .iter()
            .zip(features.to_vector())
            .map(|(weight, value)| weight * value)
            .sum();
        (self.intercept + weighted) * self.scaling_factor
    }
}

impl Default for CoefficientTable {
    fn default() -> Self {
        Self::reference()
    }
}

/// Rule signals in the order the coefficient table expects.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Features {
    pub length: f64,
    pub character_classes: f64,
    pub duplicated_characters: f64,
    pub repeats: f64,
    pub keyboard_patterns: f64,
    pub repeated_sections: f64,
    pub structure_predictable: f64,
    pub uppercase_predictable: f64,
    pub digits_predictable: f64,
    pub symbols_predictable: f64,
    pub uppercase_count: f64,
    pub lowercase_count: f64,
    pub digit_count: f64,
    pub symbol_count: f64,
    pub dates: f64,
    pub alphabetic_sequences: f64,
    pub common_substrings: f64,
    pub dictionary_length: f64,
    pub dictionary_tokens: f64,
    pub substitution_commonness: f64,
    pub common_passwords: f64,
    pub personal_info: f64,
    pub identity_info: f64,
}

impl Features {
    pub fn to_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            self.length,
            self.character_classes,
            self.duplicated_characters,
            self.repeats,
            self.keyboard_patterns,
            self.repeated_sections,
            self.structure_predictable,
            self.uppercase_predictable,
            self.digits_predictable,
            self.symbols_predictable,
            self.uppercase_count,
            self.lowercase_count,
            self.digit_count,
            self.symbol_count,
            self.dates,
            self.alphabetic_sequences,
            self.common_substrings,
            self.dictionary_length,
            self.dictionary_tokens,
            self.substitution_commonness,
            self.common_passwords,
            self.personal_info,
            self.identity_info,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_table_is_valid() {
        let table = CoefficientTable::reference();
        table.validate().expect("reference table validates");
        assert_eq!(table.weights.len(), FEATURE_COUNT);
    }

    #[test]
    fn empty_features_score_the_intercept() {
        let table = CoefficientTable::reference();
        let score = table.raw_score(&Features::default());
        assert!((score - 1.530 * SCALING_FACTOR).abs() < 1e-9);
    }

    #[test]
    fn rejects_tables_with_missing_weights() {
        let raw = r#"{"version":"short","intercept":1.0,"weights":[0.5,0.5],"scaling_factor":1.0}"#;
        match CoefficientTable::from_json(raw) {
            Err(ModelError::WeightCount { expected, found }) => {
                assert_eq!(expected, FEATURE_COUNT);
                assert_eq!(found, 2);
            }
            other => panic!("expected weight count error, got {other:?}"),
        }
    }

    #[test]
    fn json_round_trip_preserves_version() {
        let table = CoefficientTable::reference();
        let raw = serde_json::to_string(&table).expect("serializes");
        let parsed = CoefficientTable::from_json(&raw).expect("parses");
        assert_eq!(parsed.version, "reference-2017");
    }
}
