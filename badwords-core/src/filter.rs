//! The filter: runs dictionary patterns over content.
//!
//! A [`Filter`] owns a set of dictionaries, the [`FilterConfig`] used to turn
//! their words into patterns, and a [`Cache`] for generated patterns.
//! Compiled patterns are kept per dictionary for the lifetime of the filter
//! and dropped whenever the configuration changes.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::cache::{Cache, NoCache};
use crate::compiler::{compile_patterns, load_or_generate_patterns, CompiledPatterns};
use crate::config::FilterConfig;
use crate::dictionary::Dictionary;
use crate::errors::BadwordsError;
use crate::result::{DictionaryMatches, FilterResult, RiskLevels};

#[derive(Debug)]
pub struct Filter {
    dictionaries: Vec<Arc<dyn Dictionary>>,
    config: FilterConfig,
    cache: Arc<dyn Cache>,
    compiled: RwLock<HashMap<String, Arc<CompiledPatterns>>>,
}

impl Filter {
    pub fn new(dictionaries: Vec<Arc<dyn Dictionary>>, config: FilterConfig) -> Self {
        let mut filter = Self {
            dictionaries: Vec::new(),
            config,
            cache: Arc::new(NoCache),
            compiled: RwLock::new(HashMap::new()),
        };
        filter.add_dictionaries(dictionaries);
        filter
    }

    pub fn with_cache(mut self, cache: Arc<dyn Cache>) -> Self {
        self.set_cache(cache);
        self
    }

    pub fn dictionaries(&self) -> &[Arc<dyn Dictionary>] {
        &self.dictionaries
    }

    /// Adds `dictionary` unless one with the same id is already present.
    pub fn add_dictionary(&mut self, dictionary: Arc<dyn Dictionary>) -> &mut Self {
        if self.dictionaries.iter().any(|d| d.id() == dictionary.id()) {
            debug!("Dictionary '{}' is already registered.", dictionary.id());
            return self;
        }
        self.dictionaries.push(dictionary);
        self
    }

    pub fn add_dictionaries<I>(&mut self, dictionaries: I) -> &mut Self
    where
        I: IntoIterator<Item = Arc<dyn Dictionary>>,
    {
        for dictionary in dictionaries {
            self.add_dictionary(dictionary);
        }
        self
    }

    pub fn set_dictionaries<I>(&mut self, dictionaries: I) -> &mut Self
    where
        I: IntoIterator<Item = Arc<dyn Dictionary>>,
    {
        self.dictionaries.clear();
        self.compiled_mut().clear();
        self.add_dictionaries(dictionaries)
    }

    /// Removes the dictionary with id `id`, returning it if present.
    pub fn remove_dictionary(&mut self, id: &str) -> Option<Arc<dyn Dictionary>> {
        let position = self.dictionaries.iter().position(|d| d.id() == id)?;
        self.compiled_mut().remove(id);
        Some(self.dictionaries.remove(position))
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Replaces the configuration, discarding every compiled pattern.
    pub fn set_config(&mut self, config: FilterConfig) -> &mut Self {
        if config != self.config {
            self.compiled_mut().clear();
        }
        self.config = config;
        self
    }

    pub fn cache(&self) -> &Arc<dyn Cache> {
        &self.cache
    }

    pub fn set_cache(&mut self, cache: Arc<dyn Cache>) -> &mut Self {
        self.cache = cache;
        self
    }

    fn compiled_mut(&mut self) -> &mut HashMap<String, Arc<CompiledPatterns>> {
        self.compiled
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Filters one piece of content.
    pub fn filter(&self, content: &str) -> Result<FilterResult, BadwordsError> {
        if content.trim().is_empty() {
            return Err(BadwordsError::invalid(
                "Invalid content. Please provide a non-empty string.",
            ));
        }
        let risk_levels = self.risk_levels();
        Ok(FilterResult::new(
            content,
            self.filter_string(content)?,
            risk_levels,
        ))
    }

    /// Filters several pieces of content, one result each, in input order.
    /// Nothing is filtered if any item is empty.
    pub fn filter_all<S: AsRef<str>>(&self, contents: &[S]) -> Result<Vec<FilterResult>, BadwordsError> {
        if let Some(index) = contents.iter().position(|c| c.as_ref().trim().is_empty()) {
            return Err(BadwordsError::invalid(format!(
                "Invalid content at index {}. Please provide a non-empty string.",
                index
            )));
        }

        let risk_levels = self.risk_levels();
        contents
            .iter()
            .map(|content| {
                let content = content.as_ref();
                Ok(FilterResult::new(
                    content,
                    self.filter_string(content)?,
                    Arc::clone(&risk_levels),
                ))
            })
            .collect()
    }

    /// Runs every dictionary over `text`. Dictionaries without matches are
    /// left out.
    pub fn filter_string(&self, text: &str) -> Result<Vec<DictionaryMatches>, BadwordsError> {
        let mut results = Vec::new();
        for dictionary in &self.dictionaries {
            let compiled = self.get_or_compile(dictionary.as_ref())?;
            let mut found: Vec<String> = Vec::new();
            for regex in &compiled.regexes {
                for m in regex.find_iter(text) {
                    let m = m.map_err(|e| {
                        BadwordsError::Matching(dictionary.id().to_string(), e.to_string())
                    })?;
                    let matched = m.as_str();
                    if self.config.is_whitelisted(matched) {
                        debug!("Skipping whitelisted match for dictionary '{}'.", dictionary.id());
                        continue;
                    }
                    if !found.iter().any(|f| f == matched) {
                        found.push(matched.to_string());
                    }
                }
            }
            if !found.is_empty() {
                info!(
                    "Dictionary '{}' matched {} distinct string(s).",
                    dictionary.id(),
                    found.len()
                );
                results.push(DictionaryMatches {
                    dictionary_id: dictionary.id().to_string(),
                    matches: found,
                });
            }
        }
        Ok(results)
    }

    fn risk_levels(&self) -> RiskLevels {
        self.dictionaries
            .iter()
            .map(|d| (d.id().to_string(), d.risk_level()))
            .collect::<Vec<_>>()
            .into()
    }

    /// Gets the compiled patterns of `dictionary`, generating them through
    /// the cache if needed.
    fn get_or_compile(&self, dictionary: &dyn Dictionary) -> Result<Arc<CompiledPatterns>, BadwordsError> {
        {
            let compiled = self.compiled.read().unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some(patterns) = compiled.get(dictionary.id()) {
                return Ok(Arc::clone(patterns));
            }
        }

        debug!("Compiling patterns for dictionary '{}'.", dictionary.id());
        let patterns = load_or_generate_patterns(dictionary, &self.config, self.cache.as_ref())?;
        let compiled = Arc::new(compile_patterns(dictionary.id(), &patterns)?);

        match self.compiled.write() {
            Ok(mut entries) => {
                entries.insert(dictionary.id().to_string(), Arc::clone(&compiled));
            }
            Err(_) => warn!("Compiled pattern store is poisoned; patterns will be rebuilt."),
        }
        Ok(compiled)
    }
}
