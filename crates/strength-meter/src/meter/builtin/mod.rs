//! Stand-alone collaborators so the meter can run without external rule or policy services.
//! Both are deliberately small and deterministic.

mod policy;
mod rules;

pub use policy::PolicyCompliance;
pub use rules::BuiltinRules;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) enum CharClass {
    Lower,
    Upper,
    Digit,
    Symbol,
}

impl CharClass {
    pub(crate) fn of(c: char) -> Self {
        if c.is_lowercase() {
            CharClass::Lower
        } else if c.is_uppercase() {
            CharClass::Upper
        } else if c.is_numeric() {
            CharClass::Digit
        } else {
            CharClass::Symbol
        }
    }

    pub(crate) fn symbol(self) -> char {
        match self {
            CharClass::Lower => 'L',
            CharClass::Upper => 'U',
            CharClass::Digit => 'D',
            CharClass::Symbol => 'S',
        }
    }
}

pub(crate) fn count_class(password: &str, class: CharClass) -> usize {
    password.chars().filter(|c| CharClass::of(*c) == class).count()
}

pub(crate) fn distinct_classes(password: &str) -> usize {
    let mut seen = [false; 4];
    for c in password.chars() {
        seen[CharClass::of(c) as usize] = true;
    }
    seen.iter().filter(|present| **present).count()
}

/// Case-insensitive containment; an empty needle never matches.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && haystack.to_lowercase().contains(&needle.to_lowercase())
}
