use std::sync::Arc;

use tracing::debug;

use super::feedback::{FeedbackAssembler, FeedbackSource, TipBundle};
use super::model::{CoefficientTable, Features};
use super::rules::{Rule, RuleBattery, ScrubPass};
use super::services::MeterServices;

/// Upper bound of the display range.
pub const MAX_SCORE: f64 = 100.0;

/// Shortest substring handed to the common-password check.
const COMMON_PASSWORD_MIN_SUBSTRING: usize = 4;

/// Heuristic score plus the tips that explain it.
#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicOutcome {
    pub score: f64,
    pub tips: TipBundle,
    pub features: Features,
    /// What was left after the contextual, personal-info, and blacklist passes.
    pub residue: String,
}

/// Runs the rule battery and folds its signals through the coefficient table.
#[derive(Clone)]
pub struct ScoreAggregator {
    rules: Arc<dyn RuleBattery>,
    model: Arc<CoefficientTable>,
    min_length: usize,
    max_length: usize,
}

impl ScoreAggregator {
    pub fn new(services: &MeterServices) -> Self {
        Self {
            rules: services.rules.clone(),
            model: services.model.clone(),
            min_length: services.config.min_length,
            max_length: services.config.max_length,
        }
    }

    /// Characters of a password that take part in scoring.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn compute(
        &self,
        password: &str,
        username: &str,
        core_info: &[String],
        all_info: &[String],
    ) -> HeuristicOutcome {
        let original_length = password.chars().count();
        let password = truncate_chars(password, self.max_length);
        let mut feedback = FeedbackAssembler::new();

        let context = vec![username.to_string()];
        let contextual = self.rules.scrub(ScrubPass::Contextual, password, &context);
        let residue = contextual.remaining.clone().unwrap_or_default();

        let personal = self.rules.scrub(ScrubPass::PersonalInfo, &residue, core_info);
        let residue = personal.remaining.clone().unwrap_or_default();

        let blacklist = self.rules.scrub(ScrubPass::Blacklist, &residue, &[]);
        let residue = blacklist.remaining.clone().unwrap_or_default();

        let mut features = Features {
            personal_info: personal.signal,
            ..Features::default()
        };
        feedback.record(FeedbackSource::Contextual, contextual);
        feedback.record(FeedbackSource::PersonalInfo, personal);
        feedback.record(FeedbackSource::Blacklist, blacklist);

        for rule in Rule::ALL {
            let assessment = self.rules.assess(rule, &residue);
            let signal = assessment.signal;
            let slot = match rule {
                Rule::Length => &mut features.length,
                Rule::CharacterClasses => &mut features.character_classes,
                Rule::DuplicatedCharacters => &mut features.duplicated_characters,
                Rule::Repeats => &mut features.repeats,
                Rule::KeyboardPatterns => &mut features.keyboard_patterns,
                Rule::RepeatedSections => &mut features.repeated_sections,
                Rule::StructurePredictable => &mut features.structure_predictable,
                Rule::UppercasePredictable => &mut features.uppercase_predictable,
                Rule::DigitsPredictable => &mut features.digits_predictable,
                Rule::SymbolsPredictable => &mut features.symbols_predictable,
                Rule::UppercaseCount => &mut features.uppercase_count,
                Rule::LowercaseCount => &mut features.lowercase_count,
                Rule::DigitCount => &mut features.digit_count,
                Rule::SymbolCount => &mut features.symbol_count,
                Rule::Dates => &mut features.dates,
                Rule::AlphabeticSequences => &mut features.alphabetic_sequences,
                Rule::CommonSubstrings => &mut features.common_substrings,
            };
            *slot = signal;

            if let Some(source) = feedback_source(rule) {
                feedback.record(source, assessment);
            }
        }

        let dictionary = self.rules.dictionary(&residue);
        features.dictionary_length = dictionary.assessment.signal;
        features.dictionary_tokens = dictionary.dictionary_tokens;
        features.substitution_commonness = dictionary.substitution_commonness;
        feedback.record(FeedbackSource::Dictionary, dictionary.assessment);

        let substrings = substrings_at_least(&residue, COMMON_PASSWORD_MIN_SUBSTRING);
        let common = self.rules.common_passwords(&substrings);
        features.common_passwords = common.signal;
        feedback.record(FeedbackSource::CommonPassword, common);

        let identity = self.rules.identity_info(&residue, all_info);
        features.identity_info = identity.signal;
        feedback.record(FeedbackSource::IdentityInfo, identity);

        let residue_length = residue.chars().count();
        let mut score = self.model.raw_score(&features);
        if residue_length < self.min_length {
            score = 0.0;
        }
        // Some progress stays visible even for weak passwords.
        let score = score.max(original_length as f64 / 2.0).min(MAX_SCORE);

        let tips = feedback.assemble();
        debug!(
            original_length,
            residue_length,
            score,
            tips = tips.len(),
            model = %self.model.version,
            "heuristic score computed"
        );

        HeuristicOutcome {
            score,
            tips,
            features,
            residue,
        }
    }
}

fn feedback_source(rule: Rule) -> Option<FeedbackSource> {
    let source = match rule {
        Rule::Length => FeedbackSource::Length,
        Rule::CharacterClasses => return None,
        Rule::DuplicatedCharacters => FeedbackSource::DuplicatedCharacters,
        Rule::Repeats => FeedbackSource::Repeats,
        Rule::KeyboardPatterns => FeedbackSource::KeyboardPatterns,
        Rule::RepeatedSections => FeedbackSource::RepeatedSections,
        Rule::StructurePredictable => FeedbackSource::StructurePredictable,
        Rule::UppercasePredictable => FeedbackSource::UppercasePredictable,
        Rule::DigitsPredictable => FeedbackSource::DigitsPredictable,
        Rule::SymbolsPredictable => FeedbackSource::SymbolsPredictable,
        Rule::UppercaseCount => FeedbackSource::UppercaseCount,
        Rule::LowercaseCount => FeedbackSource::LowercaseCount,
        Rule::DigitCount => FeedbackSource::DigitCount,
        Rule::SymbolCount => FeedbackSource::SymbolCount,
        Rule::Dates => FeedbackSource::Dates,
        Rule::AlphabeticSequences => FeedbackSource::AlphabeticSequences,
        Rule::CommonSubstrings => FeedbackSource::CommonSubstring,
    };
    Some(source)
}

/// The first `max` characters of `password`.
fn truncate_chars(password: &str, max: usize) -> &str {
    match password.char_indices().nth(max) {
        Some((cut, _)) => &password[..cut],
        None => password,
    }
}

/// Every contiguous substring with at least `min` characters, borrowed from `password`.
pub(crate) fn substrings_at_least(password: &str, min: usize) -> Vec<&str> {
    let bounds: Vec<usize> = password
        .char_indices()
        .map(|(index, _)| index)
        .chain(std::iter::once(password.len()))
        .collect();
    let mut substrings = Vec::new();
    for start in 0..bounds.len() {
        for end in (start + min)..bounds.len() {
            substrings.push(&password[bounds[start]..bounds[end]]);
        }
    }
    substrings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substrings_cover_every_window() {
        let substrings = substrings_at_least("abcde", 4);
        assert_eq!(substrings, vec!["abcd", "abcde", "bcde"]);
    }

    #[test]
    fn substrings_respect_multibyte_boundaries() {
        let substrings = substrings_at_least("pässe", 4);
        assert_eq!(substrings, vec!["päss", "pässe", "ässe"]);
    }

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate_chars("pässwort", 3), "päs");
        assert_eq!(truncate_chars("short", 256), "short");
        assert_eq!(truncate_chars("", 4), "");
    }

    #[test]
    fn substrings_of_short_input_are_empty() {
        assert!(substrings_at_least("abc", 4).is_empty());
        assert!(substrings_at_least("", 4).is_empty());
    }

    #[test]
    fn character_classes_never_produce_feedback() {
        assert_eq!(feedback_source(Rule::CharacterClasses), None);
        assert_eq!(
            feedback_source(Rule::CommonSubstrings),
            Some(FeedbackSource::CommonSubstring)
        );
    }
}
