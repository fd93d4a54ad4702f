use super::assessment::{ComplianceVerdict, DictionaryAssessment, RuleAssessment};

/// Scrubbing passes run before every other rule. Each one removes what it matched so later
/// rules only see the residue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrubPass {
    /// Tokens from the surrounding form, such as the username.
    Contextual,
    /// Core personal information (names, birthdays).
    PersonalInfo,
    /// Site-specific blacklisted terms.
    Blacklist,
}

/// Structural and statistical rules evaluated on the scrubbed residue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Length,
    CharacterClasses,
    DuplicatedCharacters,
    Repeats,
    KeyboardPatterns,
    RepeatedSections,
    StructurePredictable,
    UppercasePredictable,
    DigitsPredictable,
    SymbolsPredictable,
    UppercaseCount,
    LowercaseCount,
    DigitCount,
    SymbolCount,
    Dates,
    AlphabeticSequences,
    CommonSubstrings,
}

impl Rule {
    /// Evaluation order used by the aggregator.
    pub const ALL: [Rule; 17] = [
        Rule::Length,
        Rule::CharacterClasses,
        Rule::DuplicatedCharacters,
        Rule::Repeats,
        Rule::KeyboardPatterns,
        Rule::RepeatedSections,
        Rule::StructurePredictable,
        Rule::UppercasePredictable,
        Rule::DigitsPredictable,
        Rule::SymbolsPredictable,
        Rule::UppercaseCount,
        Rule::LowercaseCount,
        Rule::DigitCount,
        Rule::SymbolCount,
        Rule::Dates,
        Rule::AlphabeticSequences,
        Rule::CommonSubstrings,
    ];
}

/// The battery of rule evaluators the aggregator consults. Implementations must be pure:
/// identical inputs yield identical assessments.
pub trait RuleBattery: Send + Sync {
    fn scrub(&self, pass: ScrubPass, password: &str, tokens: &[String]) -> RuleAssessment;
    fn assess(&self, rule: Rule, password: &str) -> RuleAssessment;
    fn dictionary(&self, password: &str) -> DictionaryAssessment;
    /// Receives every substring of the residue that is at least four characters long.
    fn common_passwords(&self, substrings: &[&str]) -> RuleAssessment;
    /// Matches against the full identity list without scrubbing.
    fn identity_info(&self, password: &str, all_info: &[String]) -> RuleAssessment;
}

/// Minimum-requirement policy check, consumed as a black box.
pub trait ComplianceEvaluator: Send + Sync {
    fn verify(
        &self,
        password: &str,
        username: &str,
        core_info: &[String],
        all_info: &[String],
    ) -> ComplianceVerdict;
}
