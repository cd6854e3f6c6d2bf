//! Configuration management for `badwords-core`.
//!
//! A [`FilterConfig`] holds the ordered rules that turn a [`Word`] into its
//! match pattern, split into three phases (pre, standard, post), and the
//! whitelist of matched strings that must never be reported.
//!
//! Configurations serialize to YAML. The standard preset ships embedded in
//! the library and is parsed exactly like a user-supplied file.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, info};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::Path;

use crate::errors::BadwordsError;
use crate::rules::{escape_pattern, Rule};
use crate::word::Word;

const STANDARD_CONFIG_YAML: &str = include_str!("../config/standard.yaml");

/// The rule lists of a [`FilterConfig`], in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Pre,
    Standard,
    Post,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Pre, Phase::Standard, Phase::Post];
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Phase::Pre => "pre",
            Phase::Standard => "standard",
            Phase::Post => "post",
        };
        f.write_str(name)
    }
}

/// A whitelist entry given either as plain text or as a [`Word`].
#[derive(Debug, Clone)]
pub enum WhitelistEntry {
    Text(String),
    Word(Word),
}

impl WhitelistEntry {
    fn normalized(&self) -> Result<String, BadwordsError> {
        match self {
            WhitelistEntry::Word(word) => Ok(word.text().to_string()),
            WhitelistEntry::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Err(BadwordsError::invalid(format!(
                        "Invalid whitelisted word \"{}\". Expected non-empty string.",
                        text
                    )));
                }
                Ok(trimmed.to_lowercase())
            }
        }
    }
}

impl From<&str> for WhitelistEntry {
    fn from(text: &str) -> Self {
        WhitelistEntry::Text(text.to_string())
    }
}

impl From<String> for WhitelistEntry {
    fn from(text: String) -> Self {
        WhitelistEntry::Text(text)
    }
}

impl From<&String> for WhitelistEntry {
    fn from(text: &String) -> Self {
        WhitelistEntry::Text(text.clone())
    }
}

impl From<Word> for WhitelistEntry {
    fn from(word: Word) -> Self {
        WhitelistEntry::Word(word)
    }
}

impl From<&Word> for WhitelistEntry {
    fn from(word: &Word) -> Self {
        WhitelistEntry::Word(word.clone())
    }
}

/// Rules and whitelist used to generate and filter patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFilterConfig")]
pub struct FilterConfig {
    pre_rules: Vec<Rule>,
    rules: Vec<Rule>,
    post_rules: Vec<Rule>,
    whitelist: Vec<String>,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard preset: leet-speak alternatives for common letters,
    /// whitespace tolerance, and word boundaries.
    pub fn standard() -> Result<Self, BadwordsError> {
        debug!("Loading standard configuration from embedded string...");
        Self::from_yaml_str(STANDARD_CONFIG_YAML)
    }

    /// Loads a configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, BadwordsError> {
        let path = path.as_ref();
        info!("Loading filter configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&text).map_err(|e| match e {
            BadwordsError::Serialization(message) => BadwordsError::Serialization(format!(
                "{} ({})",
                message,
                path.display()
            )),
            other => other,
        })?;
        info!(
            "Loaded {} rules and {} whitelisted words from {}.",
            config.rule_count(),
            config.whitelist.len(),
            path.display()
        );
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, BadwordsError> {
        serde_yml::from_str(yaml).map_err(|e| BadwordsError::Serialization(e.to_string()))
    }

    pub fn to_yaml_string(&self) -> Result<String, BadwordsError> {
        serde_yml::to_string(self).map_err(|e| BadwordsError::Serialization(e.to_string()))
    }

    /// Stable hex digest of the configuration, usable in cache keys across
    /// processes.
    pub fn fingerprint(&self) -> Result<String, BadwordsError> {
        let canonical =
            serde_json::to_vec(self).map_err(|e| BadwordsError::Serialization(e.to_string()))?;
        Ok(hex::encode(Sha256::digest(&canonical)))
    }

    /// Generates the match pattern for `word`: its escaped text run through
    /// the pre, standard and post rules in order.
    pub fn apply_rules_to_word(&self, word: &Word) -> String {
        let mut pattern = escape_pattern(word.text());
        for phase in Phase::ALL {
            for rule in self.rules(phase) {
                pattern = rule.apply(&pattern, word);
            }
        }
        pattern
    }

    pub fn rules(&self, phase: Phase) -> &[Rule] {
        match phase {
            Phase::Pre => &self.pre_rules,
            Phase::Standard => &self.rules,
            Phase::Post => &self.post_rules,
        }
    }

    fn rules_mut(&mut self, phase: Phase) -> &mut Vec<Rule> {
        match phase {
            Phase::Pre => &mut self.pre_rules,
            Phase::Standard => &mut self.rules,
            Phase::Post => &mut self.post_rules,
        }
    }

    fn rule_count(&self) -> usize {
        self.pre_rules.len() + self.rules.len() + self.post_rules.len()
    }

    /// Appends `rule` to `phase` unless an equal rule is already there.
    pub fn add_rule(&mut self, phase: Phase, rule: impl Into<Rule>) -> &mut Self {
        push_unique(self.rules_mut(phase), rule.into());
        self
    }

    pub fn add_rules<I>(&mut self, phase: Phase, rules: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Rule>,
    {
        let target = self.rules_mut(phase);
        for rule in rules {
            push_unique(target, rule.into());
        }
        self
    }

    pub fn set_rules<I>(&mut self, phase: Phase, rules: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Rule>,
    {
        self.rules_mut(phase).clear();
        self.add_rules(phase, rules)
    }

    pub fn whitelisted_words(&self) -> &[String] {
        &self.whitelist
    }

    /// Whether `text` (compared lowercased and trimmed) is whitelisted.
    pub fn is_whitelisted(&self, text: &str) -> bool {
        let normalized = text.trim().to_lowercase();
        self.whitelist.iter().any(|w| *w == normalized)
    }

    pub fn add_whitelisted_word(
        &mut self,
        entry: impl Into<WhitelistEntry>,
    ) -> Result<&mut Self, BadwordsError> {
        let normalized = entry.into().normalized()?;
        push_unique(&mut self.whitelist, normalized);
        Ok(self)
    }

    /// Adds every entry, or none of them if any is invalid.
    pub fn add_whitelisted_words<I>(&mut self, entries: I) -> Result<&mut Self, BadwordsError>
    where
        I: IntoIterator,
        I::Item: Into<WhitelistEntry>,
    {
        for normalized in normalize_whitelist(entries)? {
            push_unique(&mut self.whitelist, normalized);
        }
        Ok(self)
    }

    /// Replaces the whitelist, or leaves it untouched if any entry is invalid.
    pub fn set_whitelisted_words<I>(&mut self, entries: I) -> Result<&mut Self, BadwordsError>
    where
        I: IntoIterator,
        I::Item: Into<WhitelistEntry>,
    {
        let normalized = normalize_whitelist(entries)?;
        self.whitelist.clear();
        for entry in normalized {
            push_unique(&mut self.whitelist, entry);
        }
        Ok(self)
    }
}

fn push_unique<T: PartialEq>(target: &mut Vec<T>, value: T) {
    if !target.contains(&value) {
        target.push(value);
    }
}

fn normalize_whitelist<I>(entries: I) -> Result<Vec<String>, BadwordsError>
where
    I: IntoIterator,
    I::Item: Into<WhitelistEntry>,
{
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            entry.into().normalized().map_err(|e| match e {
                BadwordsError::InvalidInput(message) => {
                    BadwordsError::invalid(format!("{} (whitelist index {})", message, index))
                }
                other => other,
            })
        })
        .collect()
}

#[derive(Deserialize)]
struct RawFilterConfig {
    #[serde(default)]
    pre_rules: Vec<Rule>,
    #[serde(default)]
    rules: Vec<Rule>,
    #[serde(default)]
    post_rules: Vec<Rule>,
    #[serde(default)]
    whitelist: Vec<String>,
}

impl TryFrom<RawFilterConfig> for FilterConfig {
    type Error = BadwordsError;

    fn try_from(raw: RawFilterConfig) -> Result<Self, Self::Error> {
        let mut config = FilterConfig::new();
        config
            .set_rules(Phase::Pre, raw.pre_rules)
            .set_rules(Phase::Standard, raw.rules)
            .set_rules(Phase::Post, raw.post_rules)
            .set_whitelisted_words(raw.whitelist)?;
        Ok(config)
    }
}
