//! errors.rs - Custom error types for the badwords-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `badwords-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BadwordsError {
    /// A constructor or setter received a malformed argument. Batch mutators
    /// that return this error leave their target unmodified.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A word list source is missing, unreadable or contains a malformed entry.
    #[error("Failed to load words from {source_name} at {location}: {message}")]
    SourceLoad {
        source_name: String,
        location: String,
        message: String,
    },

    /// Word list or pattern generation produced nothing usable.
    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Failed to compile pattern for dictionary '{dictionary}' ({pattern_len} chars): {error}")]
    PatternCompilation {
        dictionary: String,
        pattern_len: usize,
        error: Box<fancy_regex::Error>,
    },

    #[error("Pattern execution failed for dictionary '{0}': {1}")]
    Matching(String, String),

    #[error("Failed to serialize configuration: {0}")]
    Serialization(String),

    #[error("An unexpected I/O error occurred: {0}")]
    Io(#[from] std::io::Error),
}

impl BadwordsError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        BadwordsError::InvalidInput(message.into())
    }

    pub(crate) fn source_load(
        source_name: impl Into<String>,
        location: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        BadwordsError::SourceLoad {
            source_name: source_name.into(),
            location: location.into(),
            message: message.into(),
        }
    }
}
