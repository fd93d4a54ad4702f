use std::collections::{BTreeSet, HashSet};

use crate::meter::assessment::{DictionaryAssessment, RuleAssessment};
use crate::meter::rules::{Rule, RuleBattery, ScrubPass};

use super::{count_class, distinct_classes, CharClass};

/// Tokens shorter than this are ignored by the scrubbing passes.
const MIN_SCRUB_TOKEN: usize = 3;
const RECOMMENDED_LENGTH: usize = 12;
const MIN_RUN: usize = 3;
const MIN_KEYBOARD_RUN: usize = 4;

const KEYBOARD_ROWS: [&str; 4] = ["`1234567890-=", "qwertyuiop[]\\", "asdfghjkl;'", "zxcvbnm,./"];

const PREDICTABLE_STRUCTURES: [&str; 10] = [
    "L", "D", "LD", "UL", "ULD", "LDS", "ULDS", "ULSD", "LSD", "DL",
];

const BLACKLIST: [&str; 4] = ["meter", "strength", "login", "account"];

const COMMON_SUBSTRINGS: [&str; 14] = [
    "123", "111", "000", "abc", "qwe", "asd", "pass", "word", "love", "admin", "welcome",
    "iloveyou", "letmein", "!@#",
];

const DICTIONARY: [&str; 40] = [
    "password", "monkey", "dragon", "master", "shadow", "sunshine", "princess", "football",
    "baseball", "soccer", "hockey", "summer", "winter", "flower", "secret", "freedom",
    "hello", "welcome", "trouble", "troubadour", "horse", "battery", "staple", "correct",
    "orange", "banana", "cookie", "purple", "silver", "golden", "tiger", "eagle", "angel",
    "love", "house", "money", "happy", "letmein", "charlie", "computer",
];

const COMMON_PASSWORDS: [&str; 30] = [
    "password", "password1", "12345678", "123456789", "1234567890", "qwerty", "qwertyuiop",
    "1qaz2wsx", "iloveyou", "sunshine", "princess", "football", "baseball", "welcome",
    "monkey", "dragon", "master", "shadow", "letmein", "trustno1", "abc123", "superman",
    "batman", "starwars", "passw0rd", "p@ssw0rd", "qazwsx", "michael", "jennifer", "1234",
];

/// Reference rule battery with small embedded word lists.
#[derive(Debug, Clone)]
pub struct BuiltinRules {
    blacklist: Vec<String>,
    dictionary: Vec<String>,
    common_passwords: HashSet<String>,
    common_substrings: Vec<String>,
}

impl Default for BuiltinRules {
    fn default() -> Self {
        Self {
            blacklist: BLACKLIST.iter().map(|word| word.to_string()).collect(),
            dictionary: DICTIONARY.iter().map(|word| word.to_string()).collect(),
            common_passwords: COMMON_PASSWORDS.iter().map(|word| word.to_string()).collect(),
            common_substrings: COMMON_SUBSTRINGS.iter().map(|word| word.to_string()).collect(),
        }
    }
}

impl BuiltinRules {
    pub fn with_blacklist(mut self, words: impl IntoIterator<Item = String>) -> Self {
        self.blacklist = words.into_iter().map(|word| word.to_lowercase()).collect();
        self
    }

    fn assess_length(&self, password: &str) -> RuleAssessment {
        let length = password.chars().count();
        if length >= RECOMMENDED_LENGTH {
            return RuleAssessment::silent(length as f64);
        }
        RuleAssessment::with_tip(
            length as f64,
            "Make your password longer",
            format!("Your password is only {length} characters once common parts are removed"),
            "Every additional character multiplies the guesses an attacker needs",
            "too short",
        )
    }

    fn assess_duplicates(&self, password: &str) -> RuleAssessment {
        let length = password.chars().count();
        let distinct: HashSet<char> = password.chars().collect();
        let duplicated = length - distinct.len();
        if length == 0 || duplicated * 2 <= length {
            return RuleAssessment::silent(duplicated as f64);
        }
        RuleAssessment::with_tip(
            duplicated as f64,
            "Use more distinct characters",
            format!("{duplicated} of your {length} characters are reused"),
            "Passwords built from few distinct characters have a small search space",
            "reused characters",
        )
    }

    fn assess_repeats(&self, password: &str) -> RuleAssessment {
        let runs: Vec<String> = runs_where(password, |a, b| a == b)
            .into_iter()
            .filter(|run| run.chars().count() >= MIN_RUN)
            .collect();
        match runs.first() {
            None => RuleAssessment::silent(0.0),
            Some(run) => RuleAssessment::with_tip(
                runs.len() as f64,
                "Avoid repeating the same character",
                format!("Avoid repeating characters like '{run}'"),
                "Attackers try runs of the same character early",
                format!("repeated character {run}"),
            ),
        }
    }

    fn assess_keyboard(&self, password: &str) -> RuleAssessment {
        let runs: Vec<String> = runs_where(password, keyboard_adjacent)
            .into_iter()
            .filter(|run| run.chars().count() >= MIN_KEYBOARD_RUN)
            .collect();
        let covered: usize = runs.iter().map(|run| run.chars().count()).sum();
        match runs.first() {
            None => RuleAssessment::silent(0.0),
            Some(run) => RuleAssessment::with_tip(
                covered as f64,
                "Avoid keyboard patterns",
                format!("Avoid keyboard patterns like '{run}'"),
                "Keys next to each other on a keyboard are guessed early",
                format!("keyboard pattern {}", run.to_lowercase()),
            ),
        }
    }

    fn assess_repeated_sections(&self, password: &str) -> RuleAssessment {
        let chars: Vec<char> = password.chars().collect();
        let mut repeated = BTreeSet::new();
        for start in 0..chars.len().saturating_sub(MIN_RUN - 1) {
            let window = &chars[start..start + MIN_RUN];
            let later = start + MIN_RUN;
            if later + MIN_RUN > chars.len() {
                continue;
            }
            if chars[later..].windows(MIN_RUN).any(|other| other == window) {
                repeated.insert(window.iter().collect::<String>());
            }
        }
        match repeated.iter().next() {
            None => RuleAssessment::silent(0.0),
            Some(section) => RuleAssessment::with_tip(
                repeated.len() as f64,
                "Avoid repeating sections",
                format!("Avoid repeating sections like '{section}'"),
                "Repeated chunks add little to what an attacker must guess",
                format!("repeated section {section}"),
            ),
        }
    }

    fn assess_structure(&self, password: &str) -> RuleAssessment {
        if password.is_empty() {
            return RuleAssessment::silent(0.0);
        }
        let structure = structure_of(password);
        if !PREDICTABLE_STRUCTURES.contains(&structure.as_str()) {
            return RuleAssessment::silent(0.0);
        }
        RuleAssessment::with_tip(
            1.0,
            "Mix character types throughout your password",
            format!("Your password follows the common layout {structure}"),
            "Most passwords put letters first and digits or symbols last",
            "predictable structure",
        )
    }

    fn assess_uppercase_predictable(&self, password: &str) -> RuleAssessment {
        let uppercase: Vec<usize> = positions(password, CharClass::Upper);
        if uppercase != [0] || password.chars().count() < 2 {
            return RuleAssessment::silent(0.0);
        }
        RuleAssessment::with_tip(
            1.0,
            "Capitalize a letter other than the first",
            "Only the first letter of your password is capitalized",
            "Capitalizing the first letter is the most common choice",
            "capitalized first letter",
        )
    }

    fn assess_suffix_predictable(&self, password: &str, class: CharClass) -> RuleAssessment {
        let length = password.chars().count();
        let found = positions(password, class);
        let in_suffix = !found.is_empty()
            && found.len() < length
            && found
                .iter()
                .enumerate()
                .all(|(offset, position)| *position == length - found.len() + offset);
        if !in_suffix {
            return RuleAssessment::silent(0.0);
        }
        let (public, noun) = match class {
            CharClass::Digit => ("Move your digits away from the end", "digits"),
            _ => ("Move your symbols away from the end", "symbols"),
        };
        RuleAssessment::with_tip(
            1.0,
            public,
            format!("All of your {noun} are at the end"),
            format!("Attackers expect {noun} at the end of a password"),
            format!("{noun} at the end"),
        )
    }

    fn assess_class_count(&self, password: &str, class: CharClass) -> RuleAssessment {
        let count = count_class(password, class);
        if count > 0 || password.is_empty() {
            return RuleAssessment::silent(count as f64);
        }
        let (public, noun) = match class {
            CharClass::Upper => ("Consider adding an uppercase letter", "uppercase letters"),
            CharClass::Lower => ("Consider adding a lowercase letter", "lowercase letters"),
            CharClass::Digit => ("Consider adding a digit", "digits"),
            CharClass::Symbol => ("Consider adding a symbol", "symbols"),
        };
        RuleAssessment::with_tip(
            0.0,
            public,
            format!("Your password has no {noun}"),
            "Each character type you add enlarges the search space",
            format!("no {noun}"),
        )
    }

    fn assess_dates(&self, password: &str) -> RuleAssessment {
        let years: Vec<String> = runs_where(password, |a, b| a.is_ascii_digit() && b.is_ascii_digit())
            .into_iter()
            .filter_map(|run| find_year(&run))
            .collect();
        match years.first() {
            None => RuleAssessment::silent(0.0),
            Some(year) => RuleAssessment::with_tip(
                years.len() as f64,
                "Avoid dates",
                format!("'{year}' looks like a year"),
                "Dates, especially birthdays, are easy to guess",
                format!("date {year}"),
            ),
        }
    }

    fn assess_alphabetic_sequences(&self, password: &str) -> RuleAssessment {
        let runs: Vec<String> = sequence_runs(password)
            .into_iter()
            .filter(|run| run.chars().count() >= MIN_RUN)
            .collect();
        match runs.first() {
            None => RuleAssessment::silent(0.0),
            Some(run) => RuleAssessment::with_tip(
                runs.len() as f64,
                "Avoid alphabetic or numeric sequences",
                format!("Avoid sequences like '{run}'"),
                "Sequences such as 'abc' or '123' are guessed early",
                format!("sequence {}", run.to_lowercase()),
            ),
        }
    }

    fn assess_common_substrings(&self, password: &str) -> RuleAssessment {
        let lowered = password.to_lowercase();
        let found: Vec<&String> = self
            .common_substrings
            .iter()
            .filter(|substring| lowered.contains(substring.as_str()))
            .collect();
        match found.iter().max_by_key(|substring| substring.chars().count()) {
            None => RuleAssessment::silent(0.0),
            Some(substring) => RuleAssessment::with_tip(
                found.len() as f64,
                "Avoid common sequences",
                format!("Your password contains the common sequence '{substring}'"),
                "Common fragments are tried first by guessing tools",
                substring.to_string(),
            ),
        }
    }

    fn scrub_tokens(
        &self,
        password: &str,
        tokens: &[String],
        texts: (&str, &str, &str),
    ) -> RuleAssessment {
        let mut residue = password.to_string();
        let mut removed = Vec::new();
        let mut count = 0;
        for token in tokens {
            let token = token.trim();
            if token.chars().count() < MIN_SCRUB_TOKEN {
                continue;
            }
            let (stripped, hits) = strip_ignore_case(&residue, token);
            if hits > 0 {
                removed.push(token.to_string());
                count += hits;
                residue = stripped;
            }
        }

        let remaining = if count > 0 && residue.is_empty() {
            None
        } else {
            Some(residue)
        };
        if count == 0 {
            return RuleAssessment::silent(0.0).with_remaining(remaining);
        }

        let (public, reason, problem) = texts;
        RuleAssessment::with_tip(
            count as f64,
            public,
            format!("Your password contains '{}'", removed.join("', '")),
            reason,
            format!("{problem} {}", removed.join(" ").to_lowercase()),
        )
        .with_remaining(remaining)
    }
}

impl RuleBattery for BuiltinRules {
    fn scrub(&self, pass: ScrubPass, password: &str, tokens: &[String]) -> RuleAssessment {
        match pass {
            ScrubPass::Contextual => self.scrub_tokens(
                password,
                tokens,
                (
                    "Avoid using your username",
                    "Information from this site is the first thing attackers try",
                    "contains username",
                ),
            ),
            ScrubPass::PersonalInfo => self.scrub_tokens(
                password,
                tokens,
                (
                    "Avoid personal information",
                    "Names and birthdays can be found by anyone who knows you",
                    "contains personal information",
                ),
            ),
            ScrubPass::Blacklist => {
                let mut words = self.blacklist.clone();
                words.extend(tokens.iter().cloned());
                self.scrub_tokens(
                    password,
                    &words,
                    (
                        "Avoid words related to this site",
                        "Site-related words are among the first guesses",
                        "contains site word",
                    ),
                )
            }
        }
    }

    fn assess(&self, rule: Rule, password: &str) -> RuleAssessment {
        match rule {
            Rule::Length => self.assess_length(password),
            Rule::CharacterClasses => RuleAssessment::silent(distinct_classes(password) as f64),
            Rule::DuplicatedCharacters => self.assess_duplicates(password),
            Rule::Repeats => self.assess_repeats(password),
            Rule::KeyboardPatterns => self.assess_keyboard(password),
            Rule::RepeatedSections => self.assess_repeated_sections(password),
            Rule::StructurePredictable => self.assess_structure(password),
            Rule::UppercasePredictable => self.assess_uppercase_predictable(password),
            Rule::DigitsPredictable => self.assess_suffix_predictable(password, CharClass::Digit),
            Rule::SymbolsPredictable => {
                self.assess_suffix_predictable(password, CharClass::Symbol)
            }
            Rule::UppercaseCount => self.assess_class_count(password, CharClass::Upper),
            Rule::LowercaseCount => self.assess_class_count(password, CharClass::Lower),
            Rule::DigitCount => self.assess_class_count(password, CharClass::Digit),
            Rule::SymbolCount => self.assess_class_count(password, CharClass::Symbol),
            Rule::Dates => self.assess_dates(password),
            Rule::AlphabeticSequences => self.assess_alphabetic_sequences(password),
            Rule::CommonSubstrings => self.assess_common_substrings(password),
        }
    }

    fn dictionary(&self, password: &str) -> DictionaryAssessment {
        let original: Vec<char> = password.chars().collect();
        let plain: Vec<char> = original
            .iter()
            .map(|c| unsubstitute(c.to_ascii_lowercase()))
            .collect();

        let mut covered = 0;
        let mut words = Vec::new();
        let mut substitutions = 0;
        let mut index = 0;
        while index < plain.len() {
            let longest = self
                .dictionary
                .iter()
                .filter(|word| starts_with_at(&plain, index, word))
                .max_by_key(|word| word.chars().count());
            match longest {
                Some(word) => {
                    let length = word.chars().count();
                    substitutions += original[index..index + length]
                        .iter()
                        .filter(|c| !c.is_alphabetic())
                        .count();
                    covered += length;
                    words.push(word.clone());
                    index += length;
                }
                None => index += 1,
            }
        }

        let assessment = match words.first() {
            None => RuleAssessment::silent(0.0),
            Some(word) => RuleAssessment::with_tip(
                covered as f64,
                "Avoid dictionary words",
                format!("Your password contains the word '{}'", words.join("', '")),
                "Attackers combine dictionary words with common substitutions",
                word.clone(),
            ),
        };

        DictionaryAssessment {
            assessment,
            dictionary_tokens: words.len() as f64,
            substitution_commonness: substitutions as f64,
        }
    }

    fn common_passwords(&self, substrings: &[&str]) -> RuleAssessment {
        let found: Vec<String> = substrings
            .iter()
            .map(|substring| substring.to_lowercase())
            .filter(|substring| self.common_passwords.contains(substring))
            .collect();
        match found.iter().max_by_key(|password| password.chars().count()) {
            None => RuleAssessment::silent(0.0),
            Some(password) => RuleAssessment::with_tip(
                found.len() as f64,
                "Avoid common passwords",
                format!("'{password}' is one of the most common passwords"),
                "Lists of leaked passwords are the first thing attackers try",
                password.clone(),
            ),
        }
    }

    fn identity_info(&self, password: &str, all_info: &[String]) -> RuleAssessment {
        let lowered = password.to_lowercase();
        let found: Vec<&str> = all_info
            .iter()
            .map(|info| info.trim())
            .filter(|info| info.chars().count() >= MIN_SCRUB_TOKEN)
            .filter(|info| lowered.contains(&info.to_lowercase()))
            .collect();
        if found.is_empty() {
            return RuleAssessment::silent(0.0);
        }
        RuleAssessment::with_tip(
            found.len() as f64,
            "Avoid information about yourself",
            format!("Your password contains '{}'", found.join("', '")),
            "Details about you are easy to look up",
            format!("contains identity information {}", found.join(" ").to_lowercase()),
        )
    }
}

/// Remove every case-insensitive occurrence of `token`, returning the residue and hit count.
fn strip_ignore_case(haystack: &str, token: &str) -> (String, usize) {
    let hay: Vec<char> = haystack.chars().collect();
    let pattern: Vec<char> = token.chars().flat_map(char::to_lowercase).collect();
    let lowered: Vec<char> = hay
        .iter()
        .map(|c| c.to_lowercase().next().unwrap_or(*c))
        .collect();

    let mut residue = String::with_capacity(haystack.len());
    let mut hits = 0;
    let mut index = 0;
    while index < hay.len() {
        if !pattern.is_empty()
            && index + pattern.len() <= hay.len()
            && lowered[index..index + pattern.len()] == pattern[..]
        {
            hits += 1;
            index += pattern.len();
        } else {
            residue.push(hay[index]);
            index += 1;
        }
    }
    (residue, hits)
}

/// Maximal runs where every adjacent pair satisfies `linked`.
fn runs_where(password: &str, linked: impl Fn(char, char) -> bool) -> Vec<String> {
    let mut runs = Vec::new();
    let mut current = String::new();
    let mut previous: Option<char> = None;
    for c in password.chars() {
        match previous {
            Some(prev) if linked(prev, c) => current.push(c),
            _ => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
                current.push(c);
            }
        }
        previous = Some(c);
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

fn keyboard_adjacent(a: char, b: char) -> bool {
    let (a, b) = (a.to_ascii_lowercase(), b.to_ascii_lowercase());
    KEYBOARD_ROWS.iter().any(|row| {
        match (row.find(a), row.find(b)) {
            (Some(x), Some(y)) => x.abs_diff(y) == 1,
            _ => false,
        }
    })
}

/// Runs of characters whose codes step by a constant +1 or -1.
fn sequence_runs(password: &str) -> Vec<String> {
    let chars: Vec<char> = password.chars().map(|c| c.to_ascii_lowercase()).collect();
    let original: Vec<char> = password.chars().collect();
    let mut runs = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let mut end = start + 1;
        let mut step = 0i64;
        while end < chars.len() {
            let delta = chars[end] as i64 - chars[end - 1] as i64;
            let same_kind = chars[end].is_ascii_alphanumeric()
                && chars[end - 1].is_ascii_alphanumeric()
                && chars[end].is_ascii_digit() == chars[end - 1].is_ascii_digit();
            if !same_kind || delta.abs() != 1 || (step != 0 && delta != step) {
                break;
            }
            step = delta;
            end += 1;
        }
        runs.push(original[start..end].iter().collect());
        start = if end - start > 1 { end } else { start + 1 };
    }
    runs
}

fn structure_of(password: &str) -> String {
    let mut structure = String::new();
    for c in password.chars() {
        let symbol = CharClass::of(c).symbol();
        if !structure.ends_with(symbol) {
            structure.push(symbol);
        }
    }
    structure
}

fn positions(password: &str, class: CharClass) -> Vec<usize> {
    password
        .chars()
        .enumerate()
        .filter(|(_, c)| CharClass::of(*c) == class)
        .map(|(index, _)| index)
        .collect()
}

fn find_year(digits: &str) -> Option<String> {
    let chars: Vec<char> = digits.chars().collect();
    if chars.len() < 4 {
        return None;
    }
    chars.windows(4).find_map(|window| {
        let year: String = window.iter().collect();
        match year.parse::<u32>() {
            Ok(value) if (1900..=2099).contains(&value) => Some(year),
            _ => None,
        }
    })
}

fn unsubstitute(c: char) -> char {
    match c {
        '0' => 'o',
        '1' | '!' => 'i',
        '3' => 'e',
        '4' | '@' => 'a',
        '5' | '$' => 's',
        '7' => 't',
        other => other,
    }
}

fn starts_with_at(haystack: &[char], index: usize, word: &str) -> bool {
    let mut position = index;
    for expected in word.chars() {
        match haystack.get(position) {
            Some(found) if *found == expected => position += 1,
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> BuiltinRules {
        BuiltinRules::default()
    }

    #[test]
    fn contextual_scrub_removes_username_case_insensitively() {
        let assessment = rules().scrub(
            ScrubPass::Contextual,
            "AliceRocks99",
            &["alice".to_string()],
        );
        assert_eq!(assessment.signal, 1.0);
        assert_eq!(assessment.remaining.as_deref(), Some("Rocks99"));
        assert!(assessment.has_tip());
    }

    #[test]
    fn scrub_reports_fully_consumed_password_as_none() {
        let assessment = rules().scrub(ScrubPass::PersonalInfo, "bobbob", &["bob".to_string()]);
        assert_eq!(assessment.signal, 2.0);
        assert_eq!(assessment.remaining, None);
    }

    #[test]
    fn scrub_ignores_short_tokens() {
        let assessment = rules().scrub(ScrubPass::Contextual, "jo2024!!", &["jo".to_string()]);
        assert_eq!(assessment.signal, 0.0);
        assert_eq!(assessment.remaining.as_deref(), Some("jo2024!!"));
        assert!(!assessment.has_tip());
    }

    #[test]
    fn blacklist_scrub_uses_configured_words() {
        let rules = rules().with_blacklist(vec!["Acme".to_string()]);
        let assessment = rules.scrub(ScrubPass::Blacklist, "acme4ever!", &[]);
        assert_eq!(assessment.remaining.as_deref(), Some("4ever!"));
        assert_eq!(assessment.problem_text, "contains site word acme");

        let untouched = rules.scrub(ScrubPass::Blacklist, "strength99", &[]);
        assert_eq!(untouched.remaining.as_deref(), Some("strength99"));
    }

    #[test]
    fn keyboard_patterns_detect_rows() {
        let assessment = rules().assess(Rule::KeyboardPatterns, "xqwerty9");
        assert_eq!(assessment.signal, 6.0);
        assert!(assessment.problem_text.contains("qwerty"));
    }

    #[test]
    fn sequences_and_repeats_are_counted() {
        assert_eq!(rules().assess(Rule::AlphabeticSequences, "abc-987").signal, 2.0);
        assert_eq!(rules().assess(Rule::Repeats, "aaab111").signal, 2.0);
        assert_eq!(rules().assess(Rule::RepeatedSections, "abcXabc").signal, 1.0);
    }

    #[test]
    fn predictability_rules_flag_common_layouts() {
        assert_eq!(rules().assess(Rule::UppercasePredictable, "Monkey12").signal, 1.0);
        assert_eq!(rules().assess(Rule::DigitsPredictable, "monkey12").signal, 1.0);
        assert_eq!(rules().assess(Rule::DigitsPredictable, "mon12key").signal, 0.0);
        assert_eq!(rules().assess(Rule::SymbolsPredictable, "monkey!!").signal, 1.0);
        assert_eq!(rules().assess(Rule::StructurePredictable, "monkey12").signal, 1.0);
    }

    #[test]
    fn dates_detect_years_inside_digit_runs() {
        let assessment = rules().assess(Rule::Dates, "born19870412");
        assert_eq!(assessment.signal, 1.0);
        assert!(assessment.sensitive_text.contains("1987"));
    }

    #[test]
    fn dictionary_undoes_common_substitutions() {
        let assessment = rules().dictionary("M0nk3y!");
        assert_eq!(assessment.assessment.signal, 6.0);
        assert_eq!(assessment.dictionary_tokens, 1.0);
        assert_eq!(assessment.substitution_commonness, 2.0);
        assert_eq!(assessment.assessment.problem_text, "monkey");
    }

    #[test]
    fn dictionary_counts_tokens_and_substitutions() {
        let assessment = rules().dictionary("p4ssw0rdmonkey");
        assert_eq!(assessment.assessment.signal, 14.0);
        assert_eq!(assessment.dictionary_tokens, 2.0);
        assert_eq!(assessment.substitution_commonness, 2.0);
        assert_eq!(assessment.assessment.problem_text, "password");
    }

    #[test]
    fn common_passwords_prefer_longest_match() {
        let substrings = ["pass", "password", "1234"];
        let assessment = rules().common_passwords(&substrings);
        assert_eq!(assessment.signal, 2.0);
        assert_eq!(assessment.problem_text, "password");
    }

    #[test]
    fn identity_info_matches_without_scrubbing() {
        let assessment = rules().identity_info(
            "pittsburgh1987",
            &["Pittsburgh".to_string(), "x".to_string()],
        );
        assert_eq!(assessment.signal, 1.0);
        assert!(assessment.remaining.is_none());
    }
}
