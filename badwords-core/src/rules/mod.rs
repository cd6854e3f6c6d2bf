//! Pattern generation rules.
//!
//! A rule rewrites the pattern text generated for a [`Word`], one step at a
//! time. [`FilterConfig`](crate::config::FilterConfig) runs its rules in order, feeding each
//! rule the previous rule's output, starting from the escaped word text.
//!
//! The set of rules is closed: character substitution, whitespace tolerance
//! and word boundaries. All three serialize with a `type` tag so that a YAML
//! configuration can list them in application order.
//!
//! License: MIT OR APACHE 2.0

pub mod boundary;
pub mod character;
pub mod whitespace;

use serde::{Deserialize, Serialize};

use crate::errors::BadwordsError;
use crate::word::Word;

pub use character::{CharacterRule, Repetition};
pub use whitespace::WhitespaceRule;

/// A single pattern generation step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rule {
    Character(CharacterRule),
    Whitespace(WhitespaceRule),
    /// Applies the word's `must_start_word` / `must_end_word` flags.
    Boundary,
}

impl Rule {
    /// Applies the rule to `pattern`, which was generated for `word`.
    pub fn apply(&self, pattern: &str, word: &Word) -> String {
        match self {
            Rule::Character(rule) => rule.apply(pattern),
            Rule::Whitespace(rule) => rule.apply(pattern),
            Rule::Boundary => boundary::apply(pattern, word),
        }
    }
}

impl From<CharacterRule> for Rule {
    fn from(rule: CharacterRule) -> Self {
        Rule::Character(rule)
    }
}

impl From<WhitespaceRule> for Rule {
    fn from(rule: WhitespaceRule) -> Self {
        Rule::Whitespace(rule)
    }
}

/// Escapes the characters that carry meaning in a filter pattern.
pub fn escape_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(
            c,
            '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Characters that may appear in place of another, e.g. `@` for `a`.
///
/// Entries are single lowercase characters, unique, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct AlternativeCharacters(Vec<char>);

impl AlternativeCharacters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, alternative: &str) -> Result<&mut Self, BadwordsError> {
        let c = clean_alternative(alternative)?;
        if !self.0.contains(&c) {
            self.0.push(c);
        }
        Ok(self)
    }

    /// Adds all alternatives, or none of them if any entry is invalid.
    pub fn add_many<S: AsRef<str>>(&mut self, alternatives: &[S]) -> Result<&mut Self, BadwordsError> {
        let cleaned = clean_alternatives(alternatives)?;
        for c in cleaned {
            if !self.0.contains(&c) {
                self.0.push(c);
            }
        }
        Ok(self)
    }

    /// Replaces the current alternatives, or leaves them untouched if any
    /// entry is invalid.
    pub fn set<S: AsRef<str>>(&mut self, alternatives: &[S]) -> Result<&mut Self, BadwordsError> {
        let cleaned = clean_alternatives(alternatives)?;
        self.0.clear();
        for c in cleaned {
            if !self.0.contains(&c) {
                self.0.push(c);
            }
        }
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[char] {
        &self.0
    }

    /// Builds `(?:head|alt1|alt2...)` with every alternative escaped.
    pub(crate) fn alternation(&self, head: &str) -> String {
        let mut out = String::from("(?:");
        out.push_str(head);
        for c in &self.0 {
            out.push('|');
            out.push_str(&escape_pattern(&c.to_string()));
        }
        out.push(')');
        out
    }
}

impl TryFrom<Vec<String>> for AlternativeCharacters {
    type Error = BadwordsError;

    fn try_from(values: Vec<String>) -> Result<Self, Self::Error> {
        let mut alternatives = AlternativeCharacters::new();
        alternatives.set(&values)?;
        Ok(alternatives)
    }
}

impl From<AlternativeCharacters> for Vec<String> {
    fn from(alternatives: AlternativeCharacters) -> Self {
        alternatives.0.into_iter().map(String::from).collect()
    }
}

fn clean_alternatives<S: AsRef<str>>(alternatives: &[S]) -> Result<Vec<char>, BadwordsError> {
    alternatives
        .iter()
        .enumerate()
        .map(|(index, alternative)| {
            clean_alternative(alternative.as_ref()).map_err(|_| {
                BadwordsError::invalid(format!(
                    "Invalid alternative character \"{}\" at index {}. Please provide a single character string.",
                    alternative.as_ref(),
                    index
                ))
            })
        })
        .collect()
}

fn clean_alternative(alternative: &str) -> Result<char, BadwordsError> {
    let mut chars = alternative.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(lowercase_char(c)),
        _ => Err(BadwordsError::invalid(format!(
            "Invalid alternative character \"{}\". Please provide a single character string.",
            alternative
        ))),
    }
}

/// Lowercases `c` when its lowercase form is itself a single character.
pub(crate) fn lowercase_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}
