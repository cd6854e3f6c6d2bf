//! Character substitution and repetition rule.
//!
//! For a target character the rule can:
//!
//! * detect the character being repeated (`baaad` for `bad`), optionally only
//!   once a minimum run length is present in the word itself;
//! * accept alternative characters in its place (`b@d` for `bad`).
//!
//! Runs of 2 to 4 consecutive occurrences that are not covered by repetition
//! detection are always collapsed into exact counts (`aa` becomes `a{2}`).
//!
//! License: MIT OR APACHE 2.0

use serde::{Deserialize, Serialize};

use super::{escape_pattern, lowercase_char, AlternativeCharacters};
use crate::errors::BadwordsError;

/// Longest run collapsed or quantified as a unit.
const MAX_RUN: usize = 4;

/// Whether repeated occurrences of the character are detected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRepetition", into = "RawRepetition")]
pub enum Repetition {
    #[default]
    Off,
    /// Detect repetition wherever the word contains at least this many
    /// consecutive occurrences.
    MinRun(u32),
}

impl Repetition {
    /// Detect repetition of every occurrence ("one or more").
    pub fn detect() -> Self {
        Repetition::MinRun(1)
    }

    pub fn min_run(count: u32) -> Result<Self, BadwordsError> {
        if count == 0 {
            return Err(BadwordsError::invalid(
                "Invalid detect repetition minimum consecutive occurrences value \"0\". Please provide a boolean or integer greater than 0.",
            ));
        }
        Ok(Repetition::MinRun(count))
    }

    fn minimum(self) -> Option<usize> {
        match self {
            Repetition::Off => None,
            Repetition::MinRun(count) => Some(count as usize),
        }
    }
}

impl From<bool> for Repetition {
    fn from(detect: bool) -> Self {
        if detect {
            Repetition::detect()
        } else {
            Repetition::Off
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawRepetition {
    Flag(bool),
    Count(i64),
}

impl TryFrom<RawRepetition> for Repetition {
    type Error = BadwordsError;

    fn try_from(raw: RawRepetition) -> Result<Self, Self::Error> {
        match raw {
            RawRepetition::Flag(detect) => Ok(detect.into()),
            RawRepetition::Count(count) => {
                let count = u32::try_from(count).map_err(|_| {
                    BadwordsError::invalid(format!(
                        "Invalid detect repetition minimum consecutive occurrences value \"{}\". Please provide a boolean or integer greater than 0.",
                        count
                    ))
                })?;
                Repetition::min_run(count)
            }
        }
    }
}

impl From<Repetition> for RawRepetition {
    fn from(repetition: Repetition) -> Self {
        match repetition {
            Repetition::Off => RawRepetition::Flag(false),
            Repetition::MinRun(count) => RawRepetition::Count(i64::from(count)),
        }
    }
}

/// Rule for one specific character of a word.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCharacterRule", into = "RawCharacterRule")]
pub struct CharacterRule {
    character: char,
    alternative_characters: AlternativeCharacters,
    repetition: Repetition,
}

impl CharacterRule {
    /// Creates a rule for `character`, which must be exactly one character.
    pub fn new(character: &str) -> Result<Self, BadwordsError> {
        Ok(Self {
            character: parse_character(character)?,
            alternative_characters: AlternativeCharacters::new(),
            repetition: Repetition::Off,
        })
    }

    pub fn with_alternatives<S: AsRef<str>>(mut self, alternatives: &[S]) -> Result<Self, BadwordsError> {
        self.alternative_characters.set(alternatives)?;
        Ok(self)
    }

    pub fn with_repetition(mut self, repetition: Repetition) -> Self {
        self.repetition = repetition;
        self
    }

    pub fn character(&self) -> char {
        self.character
    }

    pub fn set_character(&mut self, character: &str) -> Result<&mut Self, BadwordsError> {
        self.character = parse_character(character)?;
        Ok(self)
    }

    pub fn repetition(&self) -> Repetition {
        self.repetition
    }

    pub fn set_repetition(&mut self, repetition: Repetition) -> &mut Self {
        self.repetition = repetition;
        self
    }

    pub fn alternative_characters(&self) -> &AlternativeCharacters {
        &self.alternative_characters
    }

    pub fn alternative_characters_mut(&mut self) -> &mut AlternativeCharacters {
        &mut self.alternative_characters
    }

    /// Rewrites every run of the character found in `pattern`.
    ///
    /// Matching is case-insensitive. A run is a maximal sequence of
    /// consecutive occurrences; each run is emitted as one token.
    pub fn apply(&self, pattern: &str) -> String {
        let form = escape_pattern(&self.character.to_string());
        let token = if self.alternative_characters.is_empty() {
            form.clone()
        } else {
            self.alternative_characters.alternation(&form)
        };

        let mut out = String::with_capacity(pattern.len() * 2);
        let mut rest = pattern;
        while !rest.is_empty() {
            let (run, consumed) = leading_run(rest, &form);
            if run == 0 {
                let mut chars = rest.chars();
                if let Some(c) = chars.next() {
                    out.push(c);
                }
                rest = chars.as_str();
                continue;
            }
            rest = &rest[consumed..];
            self.render_run(&mut out, &token, run, rest.chars().next());
        }
        out
    }

    fn render_run(&self, out: &mut String, token: &str, run: usize, next: Option<char>) {
        if let Some(minimum) = self.repetition.minimum() {
            // Minimums above the cap have no open-ended form and fall
            // through to the exact collapse.
            if run >= 2 && run >= minimum && minimum <= MAX_RUN {
                out.push_str(&format!("{}{{{},}}", token, run.min(MAX_RUN)));
                return;
            }
            if run == 1 && minimum == 1 {
                out.push_str(token);
                if !matches!(next, Some('{') | Some('+')) {
                    out.push('+');
                }
                return;
            }
        }

        // Runs not covered by repetition detection are collapsed into exact
        // counts, longest chunks first.
        for _ in 0..run / MAX_RUN {
            out.push_str(&format!("{}{{{}}}", token, MAX_RUN));
        }
        match run % MAX_RUN {
            0 => {}
            1 => out.push_str(token),
            n => out.push_str(&format!("{}{{{}}}", token, n)),
        }
    }
}

/// Counts consecutive case-insensitive occurrences of `form` at the start of
/// `text`, returning the count and the number of bytes they span.
fn leading_run(text: &str, form: &str) -> (usize, usize) {
    let mut run = 0;
    let mut consumed = 0;
    while let Some(len) = match_at(&text[consumed..], form) {
        run += 1;
        consumed += len;
    }
    (run, consumed)
}

fn match_at(text: &str, form: &str) -> Option<usize> {
    let mut text_chars = text.char_indices();
    for expected in form.chars() {
        let (_, actual) = text_chars.next()?;
        if lowercase_char(actual) != lowercase_char(expected) {
            return None;
        }
    }
    Some(text_chars.next().map_or(text.len(), |(index, _)| index))
}

fn parse_character(character: &str) -> Result<char, BadwordsError> {
    let mut chars = character.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(lowercase_char(c)),
        _ => Err(BadwordsError::invalid(format!(
            "Invalid character \"{}\". Please provide a single character string.",
            character
        ))),
    }
}

#[derive(Serialize, Deserialize)]
struct RawCharacterRule {
    character: String,
    #[serde(default)]
    alternative_characters: AlternativeCharacters,
    #[serde(default)]
    repetition: Repetition,
}

impl TryFrom<RawCharacterRule> for CharacterRule {
    type Error = BadwordsError;

    fn try_from(raw: RawCharacterRule) -> Result<Self, Self::Error> {
        Ok(CharacterRule {
            character: parse_character(&raw.character)?,
            alternative_characters: raw.alternative_characters,
            repetition: raw.repetition,
        })
    }
}

impl From<CharacterRule> for RawCharacterRule {
    fn from(rule: CharacterRule) -> Self {
        RawCharacterRule {
            character: rule.character.to_string(),
            alternative_characters: rule.alternative_characters,
            repetition: rule.repetition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::RegexBuilder;

    fn rule(character: &str, alternatives: &[&str], repetition: Repetition) -> CharacterRule {
        CharacterRule::new(character)
            .unwrap()
            .with_alternatives(alternatives)
            .unwrap()
            .with_repetition(repetition)
    }

    fn assert_matches_once(pattern: &str, text: &str) {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build().unwrap();
        assert_eq!(regex.find_iter(text).count(), 1, "{} should match {} once", pattern, text);
    }

    #[test]
    fn test_construct_defaults() {
        let rule = CharacterRule::new("B").unwrap();
        assert_eq!(rule.character(), 'b');
        assert!(rule.alternative_characters().is_empty());
        assert_eq!(rule.repetition(), Repetition::Off);
    }

    #[test]
    fn test_invalid_characters_are_rejected() {
        for invalid in ["", "fd", "    "] {
            assert!(CharacterRule::new(invalid).is_err(), "{:?} should be rejected", invalid);
        }
        assert!(CharacterRule::new(" ").is_ok());
    }

    #[test]
    fn test_repetition_values() {
        assert_eq!(Repetition::from(true), Repetition::MinRun(1));
        assert_eq!(Repetition::from(false), Repetition::Off);
        assert!(Repetition::min_run(0).is_err());
        assert_eq!(Repetition::min_run(2).unwrap(), Repetition::MinRun(2));

        let parsed: Repetition = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, Repetition::MinRun(3));
        let parsed: Repetition = serde_json::from_str("true").unwrap();
        assert_eq!(parsed, Repetition::MinRun(1));
        assert!(serde_json::from_str::<Repetition>("0").is_err());
        assert!(serde_json::from_str::<Repetition>("-1").is_err());
        assert!(serde_json::from_str::<Repetition>("\"foobar\"").is_err());
    }

    #[test]
    fn test_apply_reference_patterns() {
        let cases: Vec<(&str, &str, Vec<&str>, Repetition)> = vec![
            ("baza{2}rs", "a", vec![], Repetition::Off),
            ("ba(?:z|@)aars", "z", vec!["@"], Repetition::Off),
            (r"ba(?:z|@|\*)aars", "z", vec!["@", "*"], Repetition::Off),
            ("ba+za{2,}rs", "a", vec![], Repetition::detect()),
            ("baza{2,}rs", "a", vec![], Repetition::MinRun(2)),
            ("baza{2}rs", "a", vec![], Repetition::MinRun(3)),
            ("b(?:a|@)+z(?:a|@){2,}rs", "a", vec!["@"], Repetition::detect()),
            (r"b(?:a|@|\*)+z(?:a|@|\*){2,}rs", "a", vec!["@", "*"], Repetition::detect()),
            ("b(?:a|@)z(?:a|@){2,}rs", "a", vec!["@"], Repetition::MinRun(2)),
            (r"b(?:a|@|\*)z(?:a|@|\*){2,}rs", "a", vec!["@", "*"], Repetition::MinRun(2)),
            ("b(?:a|@)z(?:a|@){2}rs", "a", vec!["@"], Repetition::MinRun(3)),
            (r"b(?:a|@|\*)z(?:a|@|\*){2}rs", "a", vec!["@", "*"], Repetition::MinRun(3)),
        ];

        for (expected, character, alternatives, repetition) in cases {
            let pattern = rule(character, &alternatives, repetition).apply("bazaars");
            assert_eq!(pattern, expected);
            assert_matches_once(&pattern, "bazaars");
        }
    }

    #[test]
    fn test_min_run_two_quantifies_double_letter() {
        let pattern = rule("s", &[], Repetition::MinRun(2)).apply("bass");
        assert_eq!(pattern, "bas{2,}");
        assert!(!pattern.contains("ss"));
        assert_matches_once(&pattern, "bass");
        assert_matches_once(&pattern, "basssss");
        assert!(!regex::Regex::new(&pattern).unwrap().is_match("bas"));
    }

    #[test]
    fn test_collapse_runs_without_detection() {
        let plain = CharacterRule::new("o").unwrap();
        assert_eq!(plain.apply("foo"), "fo{2}");
        assert_eq!(plain.apply("fooo"), "fo{3}");
        assert_eq!(plain.apply("foooo"), "fo{4}");
        assert_eq!(plain.apply("fooooo"), "fo{4}o");
        assert_eq!(plain.apply("foooooo"), "fo{4}o{2}");
        assert_eq!(plain.apply("bar"), "bar");
    }

    #[test]
    fn test_long_runs_are_capped_at_four() {
        let detect = rule("e", &[], Repetition::detect());
        assert_eq!(detect.apply("beeeeeep"), "be{4,}p");
        assert_eq!(detect.apply("bee"), "be{2,}");
    }

    #[test]
    fn test_minimum_above_cap_uses_exact_counts() {
        let strict = rule("a", &[], Repetition::min_run(5).unwrap());
        let pattern = strict.apply("baaaaad");
        assert_eq!(pattern, "ba{4}ad");
        let regex = regex::Regex::new(&pattern).unwrap();
        assert!(regex.is_match("baaaaad"));
        assert!(!regex.is_match("baaaad"));
        assert_eq!(strict.apply("baad"), "ba{2}d");
    }

    #[test]
    fn test_detect_does_not_double_quantify() {
        let detect = rule("a", &[], Repetition::detect());
        assert_eq!(detect.apply("a"), "a+");
        assert_eq!(detect.apply("aba"), "a+ba+");
        assert_eq!(detect.apply("a{2}"), "a{2}");
    }

    #[test]
    fn test_apply_is_case_insensitive() {
        let plain = CharacterRule::new("a").unwrap().with_alternatives(&["@"]).unwrap();
        assert_eq!(plain.apply("bAd"), "b(?:a|@)d");
    }

    #[test]
    fn test_special_characters_are_matched_in_escaped_form() {
        let dot = CharacterRule::new(".").unwrap().with_alternatives(&["-"]).unwrap();
        assert_eq!(dot.apply(r"a\.b"), r"a(?:\.|-)b");
        assert_eq!(dot.apply(r"a\.\.b"), r"a(?:\.|-){2}b");
    }

    #[test]
    fn test_yaml_round_trip() {
        let yaml = "character: S\nalternative_characters: ['5', '$']\nrepetition: 2\n";
        let rule: CharacterRule = serde_yml::from_str(yaml).unwrap();
        assert_eq!(rule.character(), 's');
        assert_eq!(rule.alternative_characters().as_slice(), &['5', '$']);
        assert_eq!(rule.repetition(), Repetition::MinRun(2));

        let back: CharacterRule = serde_yml::from_str(&serde_yml::to_string(&rule).unwrap()).unwrap();
        assert_eq!(back, rule);

        assert!(serde_yml::from_str::<CharacterRule>("character: ab\n").is_err());
    }
}
