// badwords-core/src/lib.rs
//! # Badwords Core Library
//!
//! `badwords-core` detects flagged words in text, including their common
//! obfuscations: look-alike characters (`b@d`), repeated letters (`baaad`),
//! and missing or replaced whitespace inside phrases (`bad!word`).
//!
//! Each dictionary word is turned into a match pattern by an ordered list of
//! rules. Patterns are batched per dictionary, compiled once, and run over the
//! content. A result lists the matched strings per dictionary, resolves the
//! overall risk level and renders highlighted HTML.
//!
//! ## Modules
//!
//! * `word`: The [`Word`] value type.
//! * `rules`: Character, whitespace and boundary rules that build patterns.
//! * `config`: [`FilterConfig`], the phased rule lists plus the whitelist.
//! * `dictionary`: The [`Dictionary`] trait and word list sources (memory, CSV, YAML).
//! * `cache`: The [`Cache`] trait with [`NoCache`] and [`MemoryCache`].
//! * `compiler`: Pattern batching, caching and compilation.
//! * `filter`: [`Filter`], which runs dictionaries over content.
//! * `result`: [`FilterResult`], match aggregation and highlighting.
//! * `headless`: [`Badwords`], a one-shot wrapper for named word lists.
//!
//! ## Usage Example
//!
//! ```rust
//! use badwords_core::{Badwords, BadwordsError};
//!
//! fn main() -> Result<(), BadwordsError> {
//!     // Later lists carry a higher risk level.
//!     let badwords = Badwords::new(
//!         vec![("mild", vec!["lorem"]), ("severe", vec!["ipsum"])],
//!         None,
//!     )?;
//!
//!     let result = badwords.check("L0rem 1psum dolor.")?;
//!     assert_eq!(result.matches(), vec!["L0rem", "1psum"]);
//!     assert_eq!(result.risk_level(), Some(2));
//!     println!("{}", result.highlighted_content());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`BadwordsError`]. Batch mutators that
//! fail leave their target unchanged.
//!
//! ---
//! License: MIT OR APACHE 2.0

pub mod cache;
pub mod compiler;
pub mod config;
pub mod dictionary;
pub mod errors;
pub mod filter;
pub mod headless;
pub mod result;
pub mod rules;
pub mod word;

/// Re-exports the configuration types.
pub use config::{FilterConfig, Phase, WhitelistEntry};

/// Re-exports the custom error type for clear error reporting.
pub use errors::BadwordsError;

pub use rules::{AlternativeCharacters, CharacterRule, Repetition, Rule, WhitespaceRule};
pub use word::Word;

/// Re-exports dictionaries and their sources.
pub use dictionary::{
    ArraySource, CsvSource, Dictionary, WordData, WordListDictionary, WordSource, YamlSource,
};

pub use cache::{Cache, MemoryCache, NoCache};
pub use filter::Filter;
pub use result::{DictionaryMatches, FilterResult};

/// Re-exports the one-shot wrapper.
pub use headless::Badwords;
