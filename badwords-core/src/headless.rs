//! `headless.rs`
//! One-shot convenience wrapper around [`Filter`] for named word lists.
//!
//! [`Badwords`] turns each named list into an in-memory dictionary whose risk
//! level is the list's 1-based position, so later lists rank higher, and
//! wires them to a filter using the given configuration or the standard
//! preset.

use log::debug;
use std::sync::Arc;

use crate::config::FilterConfig;
use crate::dictionary::{ArraySource, Dictionary, WordListDictionary};
use crate::errors::BadwordsError;
use crate::filter::Filter;
use crate::result::FilterResult;

#[derive(Debug)]
pub struct Badwords {
    rules: Vec<(String, String)>,
    filter: Filter,
}

impl Badwords {
    /// Builds a filter from `(name, words)` lists.
    ///
    /// # Arguments
    ///
    /// * `lists` - Named word lists; names must be unique.
    /// * `config` - Filter configuration; `None` selects the standard preset.
    pub fn new<N, W, S>(lists: impl IntoIterator<Item = (N, W)>, config: Option<FilterConfig>) -> Result<Self, BadwordsError>
    where
        N: Into<String>,
        W: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let config = match config {
            Some(config) => config,
            None => FilterConfig::standard()?,
        };

        let mut rules: Vec<(String, String)> = Vec::new();
        let mut dictionaries: Vec<Arc<dyn Dictionary>> = Vec::new();
        for (position, (name, words)) in lists.into_iter().enumerate() {
            let name = name.into();
            if rules.iter().any(|(existing, _)| *existing == name) {
                return Err(BadwordsError::invalid(format!(
                    "Duplicate word list name \"{}\".",
                    name
                )));
            }
            let words: Vec<String> = words.into_iter().map(|w| w.as_ref().to_string()).collect();
            let risk_level = u32::try_from(position + 1)
                .map_err(|_| BadwordsError::invalid("Too many word lists."))?;
            let dictionary = WordListDictionary::new(ArraySource::from_words(&words))
                .with_risk_level(Some(risk_level))?;
            debug!(
                "Registered word list '{}' as dictionary '{}' with risk level {}.",
                name,
                dictionary.id(),
                risk_level
            );
            rules.push((name, dictionary.id().to_string()));
            dictionaries.push(Arc::new(dictionary));
        }

        Ok(Self {
            rules,
            filter: Filter::new(dictionaries, config),
        })
    }

    /// Word list names with the id of the dictionary built for each.
    pub fn rules(&self) -> &[(String, String)] {
        &self.rules
    }

    pub fn dictionary_id(&self, name: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, id)| id.as_str())
    }

    pub fn dictionaries(&self) -> &[Arc<dyn Dictionary>] {
        self.filter.dictionaries()
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut Filter {
        &mut self.filter
    }

    pub fn check(&self, content: &str) -> Result<FilterResult, BadwordsError> {
        self.filter.filter(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_risk_level_follows_list_position() -> Result<()> {
        let badwords = Badwords::new(
            vec![("mild", vec!["darn"]), ("severe", vec!["heck"])],
            Some(FilterConfig::new()),
        )?;
        assert_eq!(badwords.rules().len(), 2);
        assert_eq!(badwords.dictionaries()[0].risk_level(), Some(1));
        assert_eq!(badwords.dictionaries()[1].risk_level(), Some(2));

        let result = badwords.check("darn, what the heck")?;
        assert_eq!(result.risk_level(), Some(2));
        let severe = badwords.dictionary_id("severe").unwrap_or_default();
        assert_eq!(result.dictionary_matches(severe), &["heck"]);
        Ok(())
    }

    #[test]
    fn test_standard_config_is_the_default() -> Result<()> {
        let badwords = Badwords::new(vec![("list", vec!["bass"])], None)?;
        assert_eq!(badwords.filter().config(), &FilterConfig::standard()?);
        assert!(!badwords.check("Ba$$ and ba55")?.is_clean());
        Ok(())
    }

    #[test]
    fn test_supplied_config_is_used() -> Result<()> {
        let badwords = Badwords::new(vec![("list", vec!["bass"])], Some(FilterConfig::new()))?;
        assert!(badwords.check("ba$$")?.is_clean());
        Ok(())
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let result = Badwords::new(vec![("a", vec!["x"]), ("a", vec!["y"])], None);
        assert!(matches!(result, Err(BadwordsError::InvalidInput(_))));
    }
}
