//! Dictionaries: identified, risk-rated lists of [`Word`]s.
//!
//! [`WordListDictionary`] builds its words from a [`WordSource`] the first
//! time they are requested, going through the configured [`Cache`] first.
//! Its id is derived from the source content and the boundary defaults, so
//! two dictionaries built from the same data share cache entries.
//!
//! License: MIT OR APACHE 2.0

pub mod sources;

use log::{debug, info};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::Debug;
use std::sync::Arc;

use crate::cache::{load_cached, store_cached, Cache, NoCache};
use crate::errors::BadwordsError;
use crate::word::Word;

pub use sources::{ArraySource, CsvSource, YamlSource};

/// A list of words to filter for.
pub trait Dictionary: Debug + Send + Sync {
    /// Stable identifier, unique per word list content.
    fn id(&self) -> &str;

    /// Risk level attached to matches of this dictionary, if any.
    fn risk_level(&self) -> Option<u32>;

    /// The words of the dictionary, deduplicated, in source order.
    fn words(&self) -> Result<&[Word], BadwordsError>;
}

/// Raw word entry as provided by a source. Missing flags fall back to the
/// dictionary defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordData {
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub must_start_word: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub must_end_word: Option<bool>,
}

impl WordData {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            must_start_word: None,
            must_end_word: None,
        }
    }

    pub fn with_boundaries(
        word: impl Into<String>,
        must_start_word: Option<bool>,
        must_end_word: Option<bool>,
    ) -> Self {
        Self {
            word: word.into(),
            must_start_word,
            must_end_word,
        }
    }
}

/// Where a [`WordListDictionary`] gets its raw entries from.
pub trait WordSource: Debug + Send + Sync {
    /// Short name of the source type, used as the dictionary id prefix.
    fn kind(&self) -> &'static str;

    /// Text identifying the source content (word list or canonical path).
    fn fingerprint(&self) -> String;

    fn load(&self) -> Result<Vec<WordData>, BadwordsError>;
}

/// A dictionary backed by a [`WordSource`].
#[derive(Debug)]
pub struct WordListDictionary<S: WordSource> {
    id: String,
    source: S,
    risk_level: Option<u32>,
    must_start_word_default: bool,
    must_end_word_default: bool,
    cache: Arc<dyn Cache>,
    words: OnceCell<Vec<Word>>,
}

impl<S: WordSource> WordListDictionary<S> {
    pub fn new(source: S) -> Self {
        let mut dictionary = Self {
            id: String::new(),
            source,
            risk_level: None,
            must_start_word_default: false,
            must_end_word_default: false,
            cache: Arc::new(NoCache),
            words: OnceCell::new(),
        };
        dictionary.refresh_id();
        dictionary
    }

    pub fn with_risk_level(mut self, risk_level: Option<u32>) -> Result<Self, BadwordsError> {
        self.set_risk_level(risk_level)?;
        Ok(self)
    }

    pub fn with_cache(mut self, cache: Arc<dyn Cache>) -> Self {
        self.set_cache(cache);
        self
    }

    pub fn with_boundary_defaults(mut self, must_start_word: bool, must_end_word: bool) -> Self {
        self.set_must_start_word_default(must_start_word);
        self.set_must_end_word_default(must_end_word);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Replaces the source. Previously loaded words are discarded.
    pub fn set_source(&mut self, source: S) -> &mut Self {
        self.source = source;
        self.refresh_id();
        self.clear_words();
        self
    }

    /// Sets the risk level; `Some(0)` is rejected.
    pub fn set_risk_level(&mut self, risk_level: Option<u32>) -> Result<&mut Self, BadwordsError> {
        if risk_level == Some(0) {
            return Err(BadwordsError::invalid(
                "Invalid risk level \"0\". Please provide an integer greater than 0, or none.",
            ));
        }
        self.risk_level = risk_level;
        Ok(self)
    }

    pub fn cache(&self) -> &Arc<dyn Cache> {
        &self.cache
    }

    pub fn set_cache(&mut self, cache: Arc<dyn Cache>) -> &mut Self {
        self.cache = cache;
        self
    }

    pub fn must_start_word_default(&self) -> bool {
        self.must_start_word_default
    }

    pub fn set_must_start_word_default(&mut self, must_start_word: bool) -> &mut Self {
        if must_start_word != self.must_start_word_default {
            self.must_start_word_default = must_start_word;
            self.refresh_id();
            self.clear_words();
        }
        self
    }

    pub fn must_end_word_default(&self) -> bool {
        self.must_end_word_default
    }

    pub fn set_must_end_word_default(&mut self, must_end_word: bool) -> &mut Self {
        if must_end_word != self.must_end_word_default {
            self.must_end_word_default = must_end_word;
            self.refresh_id();
            self.clear_words();
        }
        self
    }

    fn clear_words(&mut self) {
        self.words = OnceCell::new();
    }

    fn refresh_id(&mut self) {
        let mut hasher = Sha256::new();
        hasher.update(self.source.fingerprint().as_bytes());
        hasher.update(b";");
        hasher.update(flag(self.must_start_word_default).as_bytes());
        hasher.update(b";");
        hasher.update(flag(self.must_end_word_default).as_bytes());
        self.id = format!("{}_{}", self.source.kind(), hex::encode(hasher.finalize()));
    }

    fn cache_key(&self) -> String {
        format!("{}_words_data", self.id)
    }

    fn load_words(&self) -> Result<Vec<Word>, BadwordsError> {
        let key = self.cache_key();
        let data = match load_cached::<Vec<WordData>>(self.cache.as_ref(), &key) {
            Some(cached) if !cached.is_empty() => cached,
            _ => {
                let loaded = self.source.load()?;
                if loaded.is_empty() {
                    return Err(BadwordsError::Generation(format!(
                        "Words could not be loaded for dictionary '{}'. The source was empty.",
                        self.id
                    )));
                }
                if !store_cached(self.cache.as_ref(), &key, &loaded) {
                    debug!("Word data for dictionary '{}' was not cached.", self.id);
                }
                loaded
            }
        };

        let mut words: Vec<Word> = Vec::with_capacity(data.len());
        for (index, entry) in data.iter().enumerate() {
            let word = Word::with_boundaries(
                &entry.word,
                entry.must_start_word.unwrap_or(self.must_start_word_default),
                entry.must_end_word.unwrap_or(self.must_end_word_default),
            )
            .map_err(|e| {
                BadwordsError::source_load(
                    self.source.kind(),
                    format!("entry {}", index + 1),
                    e.to_string(),
                )
            })?;
            if !words.contains(&word) {
                words.push(word);
            }
        }

        info!("Loaded {} words for dictionary '{}'.", words.len(), self.id);
        Ok(words)
    }
}

impl<S: WordSource> Dictionary for WordListDictionary<S> {
    fn id(&self) -> &str {
        &self.id
    }

    fn risk_level(&self) -> Option<u32> {
        self.risk_level
    }

    fn words(&self) -> Result<&[Word], BadwordsError> {
        self.words
            .get_or_try_init(|| self.load_words())
            .map(Vec::as_slice)
    }
}

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}
