//! Whitespace tolerance rule.
//!
//! Lets words made of several parts match with the whitespace between them
//! missing, repeated, or replaced by alternative characters:
//! `some phrase` also matches `somephrase`, `some   phrase` and, with `!` as
//! an alternative, `some!!phrase`.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};

use super::AlternativeCharacters;
use crate::errors::BadwordsError;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("static whitespace regex is valid"));
static WHITESPACE_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\s").expect("static whitespace class regex is valid"));

/// Rule for the whitespace in a word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WhitespaceRule {
    #[serde(default)]
    alternative_characters: AlternativeCharacters,
}

impl WhitespaceRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alternatives<S: AsRef<str>>(mut self, alternatives: &[S]) -> Result<Self, BadwordsError> {
        self.alternative_characters.set(alternatives)?;
        Ok(self)
    }

    pub fn alternative_characters(&self) -> &AlternativeCharacters {
        &self.alternative_characters
    }

    pub fn alternative_characters_mut(&mut self) -> &mut AlternativeCharacters {
        &mut self.alternative_characters
    }

    /// Turns every whitespace run into an optional whitespace token.
    pub fn apply(&self, pattern: &str) -> String {
        let pattern = WHITESPACE_RUN.replace_all(pattern, NoExpand(r"\s*"));
        if self.alternative_characters.is_empty() {
            return pattern.into_owned();
        }
        let alternation = self.alternative_characters.alternation(r"\s");
        WHITESPACE_CLASS
            .replace_all(&pattern, NoExpand(&alternation))
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_becomes_optional() {
        let rule = WhitespaceRule::new();
        assert_eq!(rule.apply("some phrase"), r"some\s*phrase");
        assert_eq!(rule.apply("some \t  phrase"), r"some\s*phrase");
        assert_eq!(rule.apply("single"), "single");
    }

    #[test]
    fn test_whitespace_alternatives() {
        let one = WhitespaceRule::new().with_alternatives(&["!"]).unwrap();
        assert_eq!(one.apply("some phrase"), r"some(?:\s|!)*phrase");

        let two = WhitespaceRule::new().with_alternatives(&["!", "*"]).unwrap();
        assert_eq!(
            two.apply("some other phrase"),
            r"some(?:\s|!|\*)*other(?:\s|!|\*)*phrase"
        );
    }

    #[test]
    fn test_generated_pattern_matches_variants() {
        let rule = WhitespaceRule::new().with_alternatives(&["!"]).unwrap();
        let regex = Regex::new(&rule.apply("some phrase")).unwrap();
        for text in ["some phrase", "somephrase", "some   phrase", "some!!phrase", "some ! phrase"] {
            assert!(regex.is_match(text), "{} should match", text);
        }
        assert!(!regex.is_match("some-phrase"));
    }

    #[test]
    fn test_invalid_alternative_is_rejected() {
        assert!(WhitespaceRule::new().with_alternatives(&["!!"]).is_err());
    }
}
