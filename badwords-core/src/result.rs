//! The outcome of filtering one piece of content.
//!
//! A [`FilterResult`] records which strings each dictionary matched, resolves
//! risk levels across dictionaries, and renders the content as HTML with the
//! matches wrapped in `<span>` elements.
//!
//! License: MIT OR APACHE 2.0

use log::warn;
use regex::RegexBuilder;
use serde::{Serialize, Serializer};
use std::sync::Arc;

use crate::errors::BadwordsError;

pub const DEFAULT_HIGHLIGHT_CLASS: &str = "badword";
pub const DEFAULT_RISK_LEVEL_CLASS_PREFIX: &str = "risk-level-";

// Placeholders are built from private-use code points only, so no match text
// can ever be found inside one.
const PLACEHOLDER_START: char = '\u{E000}';
const PLACEHOLDER_END: char = '\u{E001}';
const PLACEHOLDER_DIGIT_BASE: u32 = 0xE010;

/// The strings one dictionary matched, deduplicated, in first-occurrence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DictionaryMatches {
    pub dictionary_id: String,
    pub matches: Vec<String>,
}

/// Risk level per dictionary id, in dictionary order.
pub type RiskLevels = Arc<[(String, Option<u32>)]>;

/// Matches found in one piece of content.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterResult {
    content: String,
    matches: Vec<DictionaryMatches>,
    risk_levels: RiskLevels,
    highlight_class: String,
    risk_level_class_prefix: String,
}

impl FilterResult {
    pub fn new(
        content: impl Into<String>,
        matches: Vec<DictionaryMatches>,
        risk_levels: impl Into<RiskLevels>,
    ) -> Self {
        Self {
            content: content.into(),
            matches,
            risk_levels: risk_levels.into(),
            highlight_class: DEFAULT_HIGHLIGHT_CLASS.to_string(),
            risk_level_class_prefix: DEFAULT_RISK_LEVEL_CLASS_PREFIX.to_string(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn dictionaries(&self) -> &[DictionaryMatches] {
        &self.matches
    }

    /// Every matched string across all dictionaries, without duplicates.
    pub fn matches(&self) -> Vec<&str> {
        let mut all: Vec<&str> = Vec::new();
        for m in self.matches.iter().flat_map(|d| d.matches.iter()) {
            if !all.contains(&m.as_str()) {
                all.push(m);
            }
        }
        all
    }

    /// Every matched string with the highest risk level of the dictionaries
    /// that matched it.
    pub fn matches_and_risk_levels(&self) -> Vec<(&str, Option<u32>)> {
        let mut out: Vec<(&str, Option<u32>)> = Vec::new();
        for dictionary in &self.matches {
            let level = self.dictionary_risk_level(&dictionary.dictionary_id);
            for m in &dictionary.matches {
                match out.iter_mut().find(|(existing, _)| *existing == m.as_str()) {
                    Some((_, current)) => *current = max_level(*current, level),
                    None => out.push((m, level)),
                }
            }
        }
        out
    }

    pub fn dictionary_matches(&self, dictionary_id: &str) -> &[String] {
        self.matches
            .iter()
            .find(|d| d.dictionary_id == dictionary_id)
            .map(|d| d.matches.as_slice())
            .unwrap_or(&[])
    }

    /// Highest risk level among dictionaries with at least one match.
    pub fn risk_level(&self) -> Option<u32> {
        self.matches
            .iter()
            .filter(|d| !d.matches.is_empty())
            .map(|d| self.dictionary_risk_level(&d.dictionary_id))
            .fold(None, max_level)
    }

    pub fn is_clean(&self) -> bool {
        self.matches.iter().all(|d| d.matches.is_empty())
    }

    fn dictionary_risk_level(&self, dictionary_id: &str) -> Option<u32> {
        self.risk_levels
            .iter()
            .find(|(id, _)| id == dictionary_id)
            .and_then(|(_, level)| *level)
    }

    pub fn highlight_class(&self) -> &str {
        &self.highlight_class
    }

    pub fn set_highlight_class(&mut self, class: &str) -> Result<&mut Self, BadwordsError> {
        self.highlight_class = non_empty_class(class, "highlight CSS class")?;
        Ok(self)
    }

    pub fn risk_level_class_prefix(&self) -> &str {
        &self.risk_level_class_prefix
    }

    pub fn set_risk_level_class_prefix(&mut self, prefix: &str) -> Result<&mut Self, BadwordsError> {
        self.risk_level_class_prefix = non_empty_class(prefix, "risk level CSS class prefix")?;
        Ok(self)
    }

    /// The HTML-escaped content with every match wrapped in a `<span>`.
    ///
    /// Matches are located in the raw content and swapped for placeholders
    /// before escaping, so entities produced by escaping are never searched.
    /// Longer matches are placed first, so a match contained in another one
    /// never splits it.
    pub fn highlighted_content(&self) -> String {
        let mut content = self.content.clone();
        let mut ordered = self.matches_and_risk_levels();
        ordered.sort_by_key(|(m, _)| std::cmp::Reverse(m.chars().count()));

        let mut markup: Vec<String> = Vec::new();
        for (m, level) in ordered {
            let search = match RegexBuilder::new(&regex::escape(m))
                .case_insensitive(true)
                .build()
            {
                Ok(search) => search,
                Err(e) => {
                    warn!("Skipping highlight of a match that could not be searched: {}", e);
                    continue;
                }
            };
            let class = match level {
                Some(level) => format!(
                    "{} {}{}",
                    self.highlight_class, self.risk_level_class_prefix, level
                ),
                None => self.highlight_class.clone(),
            };
            content = search
                .replace_all(&content, |caps: &regex::Captures| {
                    markup.push(format!(
                        "<span class=\"{}\">{}</span>",
                        class,
                        html_escape(&caps[0])
                    ));
                    placeholder(markup.len() - 1)
                })
                .into_owned();
        }

        restore_placeholders(&html_escape(&content), &markup)
    }
}

impl Serialize for FilterResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct MatchReport<'a> {
            text: &'a str,
            risk_level: Option<u32>,
        }

        #[derive(Serialize)]
        struct Report<'a> {
            content: &'a str,
            clean: bool,
            risk_level: Option<u32>,
            matches: Vec<MatchReport<'a>>,
            dictionaries: &'a [DictionaryMatches],
        }

        Report {
            content: &self.content,
            clean: self.is_clean(),
            risk_level: self.risk_level(),
            matches: self
                .matches_and_risk_levels()
                .into_iter()
                .map(|(text, risk_level)| MatchReport { text, risk_level })
                .collect(),
            dictionaries: &self.matches,
        }
        .serialize(serializer)
    }
}

fn max_level(current: Option<u32>, candidate: Option<u32>) -> Option<u32> {
    match (current, candidate) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

fn non_empty_class(value: &str, what: &str) -> Result<String, BadwordsError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BadwordsError::invalid(format!(
            "Invalid {} \"{}\". Expected non-empty string.",
            what, value
        )));
    }
    Ok(trimmed.to_string())
}

/// Escapes text for inclusion in HTML content and attribute values.
pub fn html_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn placeholder(index: usize) -> String {
    let mut out = String::new();
    out.push(PLACEHOLDER_START);
    for digit in index.to_string().chars() {
        let value = digit.to_digit(10).unwrap_or(0);
        if let Some(c) = char::from_u32(PLACEHOLDER_DIGIT_BASE + value) {
            out.push(c);
        }
    }
    out.push(PLACEHOLDER_END);
    out
}

fn restore_placeholders(content: &str, markup: &[String]) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(start) = rest.find(PLACEHOLDER_START) {
        out.push_str(&rest[..start]);
        let after = &rest[start + PLACEHOLDER_START.len_utf8()..];
        match parse_placeholder(after).and_then(|(index, len)| Some((markup.get(index)?, len))) {
            Some((replacement, len)) => {
                out.push_str(replacement);
                rest = &after[len..];
            }
            None => {
                out.push(PLACEHOLDER_START);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Parses the digits and end marker following a placeholder start, returning
/// the index and the number of bytes consumed.
fn parse_placeholder(text: &str) -> Option<(usize, usize)> {
    let mut index = 0usize;
    let mut digits = 0;
    for (offset, c) in text.char_indices() {
        if c == PLACEHOLDER_END {
            return (digits > 0).then_some((index, offset + c.len_utf8()));
        }
        let digit = (c as u32).checked_sub(PLACEHOLDER_DIGIT_BASE).filter(|d| *d < 10)?;
        index = index.checked_mul(10)?.checked_add(digit as usize)?;
        digits += 1;
    }
    None
}
