//! A single flagged term and its word-boundary settings.

use serde::{Deserialize, Serialize};

use crate::errors::BadwordsError;

/// A flagged word. The text is always trimmed, lowercased and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawWord", into = "RawWord")]
pub struct Word {
    text: String,
    must_start_word: bool,
    must_end_word: bool,
}

impl Word {
    /// Creates a word with neither boundary constraint set.
    pub fn new(text: &str) -> Result<Self, BadwordsError> {
        Self::with_boundaries(text, false, false)
    }

    /// Creates a word that, depending on the flags, may only match at the
    /// start and/or end of a word in the filtered content.
    pub fn with_boundaries(
        text: &str,
        must_start_word: bool,
        must_end_word: bool,
    ) -> Result<Self, BadwordsError> {
        Ok(Self {
            text: normalize_text(text)?,
            must_start_word,
            must_end_word,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn must_start_word(&self) -> bool {
        self.must_start_word
    }

    pub fn must_end_word(&self) -> bool {
        self.must_end_word
    }

    pub fn set_text(&mut self, text: &str) -> Result<&mut Self, BadwordsError> {
        self.text = normalize_text(text)?;
        Ok(self)
    }

    pub fn set_must_start_word(&mut self, must_start_word: bool) -> &mut Self {
        self.must_start_word = must_start_word;
        self
    }

    pub fn set_must_end_word(&mut self, must_end_word: bool) -> &mut Self {
        self.must_end_word = must_end_word;
        self
    }
}

fn normalize_text(text: &str) -> Result<String, BadwordsError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(BadwordsError::invalid(format!(
            "Invalid word \"{}\". Expected non-empty string.",
            text
        )));
    }
    Ok(trimmed.to_lowercase())
}

#[derive(Serialize, Deserialize)]
struct RawWord {
    word: String,
    #[serde(default)]
    must_start_word: bool,
    #[serde(default)]
    must_end_word: bool,
}

impl TryFrom<RawWord> for Word {
    type Error = BadwordsError;

    fn try_from(raw: RawWord) -> Result<Self, Self::Error> {
        Word::with_boundaries(&raw.word, raw.must_start_word, raw.must_end_word)
    }
}

impl From<Word> for RawWord {
    fn from(word: Word) -> Self {
        RawWord {
            word: word.text,
            must_start_word: word.must_start_word,
            must_end_word: word.must_end_word,
        }
    }
}
