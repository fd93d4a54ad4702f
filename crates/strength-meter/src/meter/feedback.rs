use serde::{Deserialize, Serialize};

use super::assessment::RuleAssessment;

/// Length ratio above which one problem description is considered a restatement of another.
const REDUNDANCY_RATIO: f64 = 0.7;

/// Every assessment that can produce a tip, listed in display priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackSource {
    Contextual,
    PersonalInfo,
    Blacklist,
    IdentityInfo,
    Dictionary,
    KeyboardPatterns,
    Repeats,
    Dates,
    RepeatedSections,
    AlphabeticSequences,
    CommonPassword,
    UppercasePredictable,
    DigitsPredictable,
    SymbolsPredictable,
    DuplicatedCharacters,
    Length,
    SymbolCount,
    UppercaseCount,
    DigitCount,
    LowercaseCount,
    CommonSubstring,
    StructurePredictable,
}

impl FeedbackSource {
    pub const PRIORITY: [FeedbackSource; 22] = [
        FeedbackSource::Contextual,
        FeedbackSource::PersonalInfo,
        FeedbackSource::Blacklist,
        FeedbackSource::IdentityInfo,
        FeedbackSource::Dictionary,
        FeedbackSource::KeyboardPatterns,
        FeedbackSource::Repeats,
        FeedbackSource::Dates,
        FeedbackSource::RepeatedSections,
        FeedbackSource::AlphabeticSequences,
        FeedbackSource::CommonPassword,
        FeedbackSource::UppercasePredictable,
        FeedbackSource::DigitsPredictable,
        FeedbackSource::SymbolsPredictable,
        FeedbackSource::DuplicatedCharacters,
        FeedbackSource::Length,
        FeedbackSource::SymbolCount,
        FeedbackSource::UppercaseCount,
        FeedbackSource::DigitCount,
        FeedbackSource::LowercaseCount,
        FeedbackSource::CommonSubstring,
        FeedbackSource::StructurePredictable,
    ];

    /// Sources whose tips are dropped when they restate an earlier problem.
    pub fn dedup_sensitive(self) -> bool {
        matches!(
            self,
            FeedbackSource::Dictionary
                | FeedbackSource::CommonPassword
                | FeedbackSource::CommonSubstring
        )
    }

    /// Whether an emitted tip's problem text is remembered for later redundancy checks.
    pub fn records_problem(self) -> bool {
        !matches!(
            self,
            FeedbackSource::Length
                | FeedbackSource::SymbolCount
                | FeedbackSource::UppercaseCount
                | FeedbackSource::DigitCount
                | FeedbackSource::LowercaseCount
                | FeedbackSource::CommonSubstring
                | FeedbackSource::StructurePredictable
        )
    }
}

/// Ordered tip lists shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipBundle {
    pub public_tips: Vec<String>,
    pub sensitive_tips: Vec<String>,
    pub reason_why: Vec<String>,
}

impl TipBundle {
    pub fn len(&self) -> usize {
        self.public_tips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.public_tips.is_empty()
    }

    fn push(&mut self, assessment: &RuleAssessment) {
        self.public_tips.push(assessment.public_text.clone());
        self.sensitive_tips.push(assessment.sensitive_text.clone());
        self.reason_why.push(assessment.reason_why.clone());
    }
}

/// Collects tips from a finished rule battery in priority order.
#[derive(Debug, Default)]
pub struct FeedbackAssembler {
    entries: Vec<(FeedbackSource, RuleAssessment)>,
}

impl FeedbackAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, source: FeedbackSource, assessment: RuleAssessment) {
        self.entries.push((source, assessment));
    }

    /// Insertion order does not matter; output follows [`FeedbackSource::PRIORITY`].
    pub fn assemble(&self) -> TipBundle {
        let mut tips = TipBundle::default();
        let mut problems: Vec<String> = Vec::new();

        for source in FeedbackSource::PRIORITY {
            for (_, assessment) in self.entries.iter().filter(|(kind, _)| *kind == source) {
                if !assessment.has_tip() {
                    continue;
                }
                if source.dedup_sensitive() && redundant(&assessment.problem_text, &problems) {
                    continue;
                }

                tips.push(assessment);
                if source.records_problem() {
                    problems.push(assessment.problem_text.clone());
                }
            }
        }

        tips
    }
}

/// True when `problem` is substring-contained in (or contains) an earlier problem and the
/// shorter of the two covers at least 70% of the longer. Case-insensitive; empty texts never
/// match.
pub fn redundant(problem: &str, earlier: &[String]) -> bool {
    let candidate = problem.to_lowercase();
    if candidate.is_empty() {
        return false;
    }
    let candidate_len = candidate.chars().count() as f64;

    earlier.iter().any(|prior| {
        let prior = prior.to_lowercase();
        if prior.is_empty() {
            return false;
        }
        let prior_len = prior.chars().count() as f64;

        (prior.contains(&candidate) && candidate_len >= REDUNDANCY_RATIO * prior_len)
            || (candidate.contains(&prior) && prior_len >= REDUNDANCY_RATIO * candidate_len)
    })
}
