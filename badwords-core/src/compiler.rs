//! compiler.rs - Generates, batches and compiles dictionary patterns.
//!
//! Every word of a dictionary is turned into a pattern fragment by the
//! [`FilterConfig`] rules. Fragments are joined into alternations whose length
//! stays under [`MAX_BATCH_LENGTH`] characters, so that one very large
//! dictionary never produces a single oversized expression. Generated batches
//! go through the [`Cache`] keyed by dictionary id and configuration
//! fingerprint, then are compiled for matching.
//!
//! License: MIT OR APACHE 2.0

use fancy_regex::{Regex, RegexBuilder};
use log::debug;

use crate::cache::{load_cached, store_cached, Cache};
use crate::config::FilterConfig;
use crate::dictionary::Dictionary;
use crate::errors::BadwordsError;

/// Maximum length, in characters, of a batch holding more than one fragment.
pub const MAX_BATCH_LENGTH: usize = 3000;

/// Upper bound on backtracking steps for a single search.
pub const BACKTRACK_LIMIT: usize = 1_000_000;

/// The compiled batches of one dictionary.
#[derive(Debug)]
pub struct CompiledPatterns {
    pub dictionary_id: String,
    pub regexes: Vec<Regex>,
}

/// Groups pattern fragments into `|`-joined batches.
///
/// Each fragment is wrapped in a non-capturing group. A fragment joins the
/// current batch while the batch, separators included, stays within
/// [`MAX_BATCH_LENGTH`] characters; a fragment that is too long on its own
/// gets a batch to itself.
pub fn batch_fragments<S: AsRef<str>>(fragments: &[S]) -> Vec<String> {
    let mut batches = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for fragment in fragments {
        let wrapped = format!("(?:{})", fragment.as_ref());
        let wrapped_len = wrapped.chars().count();

        if current_len > 0 && current_len + 1 + wrapped_len > MAX_BATCH_LENGTH {
            batches.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push('|');
            current_len += 1;
        }
        current.push_str(&wrapped);
        current_len += wrapped_len;
    }

    if current_len > 0 {
        batches.push(current);
    }
    batches
}

/// Builds the batches for `dictionary` from scratch.
pub fn generate_patterns(
    dictionary: &dyn Dictionary,
    config: &FilterConfig,
) -> Result<Vec<String>, BadwordsError> {
    let fragments: Vec<String> = dictionary
        .words()?
        .iter()
        .map(|word| config.apply_rules_to_word(word))
        .collect();
    let batches = batch_fragments(&fragments);
    debug!(
        target: "badwords_core::compiler",
        "Generated {} batch(es) from {} word(s) for dictionary '{}'.",
        batches.len(),
        fragments.len(),
        dictionary.id()
    );
    Ok(batches)
}

pub fn pattern_cache_key(dictionary_id: &str, config: &FilterConfig) -> Result<String, BadwordsError> {
    Ok(format!("{}_patterns_{}", dictionary_id, config.fingerprint()?))
}

/// Reads the batches for `dictionary` from `cache`, generating and storing
/// them on a miss.
pub fn load_or_generate_patterns(
    dictionary: &dyn Dictionary,
    config: &FilterConfig,
    cache: &dyn Cache,
) -> Result<Vec<String>, BadwordsError> {
    let key = pattern_cache_key(dictionary.id(), config)?;
    if let Some(cached) = load_cached::<Vec<String>>(cache, &key) {
        if !cached.is_empty() {
            debug!(
                target: "badwords_core::compiler",
                "Serving patterns for dictionary '{}' from cache.",
                dictionary.id()
            );
            return Ok(cached);
        }
    }

    let batches = generate_patterns(dictionary, config)?;
    if batches.is_empty() {
        return Err(BadwordsError::Generation(format!(
            "Error while generating patterns for dictionary '{}': no patterns produced.",
            dictionary.id()
        )));
    }
    store_cached(cache, &key, &batches);
    Ok(batches)
}

/// Compiles the batches of one dictionary. Matching is case-insensitive.
pub fn compile_patterns(
    dictionary_id: &str,
    patterns: &[String],
) -> Result<CompiledPatterns, BadwordsError> {
    let mut regexes = Vec::with_capacity(patterns.len());
    for pattern in patterns {
        let regex = RegexBuilder::new(&format!("(?i){}", pattern))
            .backtrack_limit(BACKTRACK_LIMIT)
            .build()
            .map_err(|e| BadwordsError::PatternCompilation {
                dictionary: dictionary_id.to_string(),
                pattern_len: pattern.chars().count(),
                error: Box::new(e),
            })?;
        regexes.push(regex);
    }
    debug!(
        target: "badwords_core::compiler",
        "Compiled {} pattern(s) for dictionary '{}'.",
        regexes.len(),
        dictionary_id
    );
    Ok(CompiledPatterns {
        dictionary_id: dictionary_id.to_string(),
        regexes,
    })
}
