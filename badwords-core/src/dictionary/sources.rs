//! Word sources: in-memory lists, CSV files and YAML files.

use log::{debug, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::{WordData, WordSource};
use crate::errors::BadwordsError;

/// Words held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArraySource(Vec<WordData>);

impl ArraySource {
    pub fn new(words: Vec<WordData>) -> Self {
        Self(words)
    }

    /// Plain words without boundary flags.
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Self {
        Self(words.iter().map(|w| WordData::new(w.as_ref())).collect())
    }

    pub fn entries(&self) -> &[WordData] {
        &self.0
    }
}

impl WordSource for ArraySource {
    fn kind(&self) -> &'static str {
        "array"
    }

    fn fingerprint(&self) -> String {
        self.0
            .iter()
            .map(|data| {
                format!(
                    "{}|{}|{}",
                    data.word,
                    optional_flag(data.must_start_word),
                    optional_flag(data.must_end_word)
                )
            })
            .collect::<Vec<_>>()
            .join(",")
    }

    fn load(&self) -> Result<Vec<WordData>, BadwordsError> {
        Ok(self.0.clone())
    }
}

fn optional_flag(flag: Option<bool>) -> &'static str {
    match flag {
        Some(true) => "1",
        Some(false) => "0",
        None => "",
    }
}

/// Validates that `path` names a readable file and returns its canonical form.
fn resolve_file(path: &Path) -> Result<PathBuf, BadwordsError> {
    let invalid = || {
        BadwordsError::invalid(format!(
            "Invalid path \"{}\". The specified path is either invalid, can not be found, or can not be read.",
            path.display()
        ))
    };
    let canonical = fs::canonicalize(path).map_err(|_| invalid())?;
    let metadata = fs::metadata(&canonical).map_err(|_| invalid())?;
    if !metadata.is_file() {
        return Err(invalid());
    }
    Ok(canonical)
}

fn read_source(kind: &str, path: &Path) -> Result<String, BadwordsError> {
    fs::read_to_string(path)
        .map_err(|e| BadwordsError::source_load(kind, path.display().to_string(), e.to_string()))
}

/// Comma separated word list without a header row.
///
/// Columns: `word[,must_start_word[,must_end_word]]`. Flags are `1`, `0`,
/// `true` or `false`; a blank or missing flag uses the dictionary default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, BadwordsError> {
        Ok(Self {
            path: resolve_file(path.as_ref())?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WordSource for CsvSource {
    fn kind(&self) -> &'static str {
        "csv"
    }

    fn fingerprint(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Vec<WordData>, BadwordsError> {
        debug!("Reading CSV word list: {}", self.path.display());
        let text = read_source(self.kind(), &self.path)?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let mut entries = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let row = index + 1;
            let location = || format!("{} row {}", self.path.display(), row);
            let record = record
                .map_err(|e| BadwordsError::source_load(self.kind(), location(), e.to_string()))?;

            let word = record.get(0).unwrap_or_default();
            if word.is_empty() {
                return Err(BadwordsError::source_load(
                    self.kind(),
                    location(),
                    "Expected word in column 1 to be non-empty string.",
                ));
            }
            let must_start_word = parse_flag(record.get(1), 2)
                .map_err(|message| BadwordsError::source_load(self.kind(), location(), message))?;
            let must_end_word = parse_flag(record.get(2), 3)
                .map_err(|message| BadwordsError::source_load(self.kind(), location(), message))?;
            if record.len() > 3 {
                warn!("Ignoring extra columns in {}.", location());
            }

            entries.push(WordData::with_boundaries(word, must_start_word, must_end_word));
        }
        Ok(entries)
    }
}

fn parse_flag(value: Option<&str>, column: usize) -> Result<Option<bool>, String> {
    match value.map(str::to_ascii_lowercase).as_deref() {
        None | Some("") => Ok(None),
        Some("1") | Some("true") => Ok(Some(true)),
        Some("0") | Some("false") => Ok(Some(false)),
        Some(other) => Err(format!(
            "Expected flag \"{}\" in column {} to be either 1, 0, or to be omitted.",
            other, column
        )),
    }
}

/// YAML sequence of words, each either a plain string or a map with
/// `word`, `must_start_word` and `must_end_word` keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YamlSource {
    path: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum YamlEntry {
    Plain(String),
    Full(WordData),
}

impl YamlSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, BadwordsError> {
        Ok(Self {
            path: resolve_file(path.as_ref())?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WordSource for YamlSource {
    fn kind(&self) -> &'static str {
        "yaml"
    }

    fn fingerprint(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Vec<WordData>, BadwordsError> {
        debug!("Reading YAML word list: {}", self.path.display());
        let text = read_source(self.kind(), &self.path)?;
        let values: Vec<serde_yml::Value> = serde_yml::from_str(&text).map_err(|e| {
            BadwordsError::source_load(self.kind(), self.path.display().to_string(), e.to_string())
        })?;

        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                let location = format!("{} entry {}", self.path.display(), index + 1);
                let entry: YamlEntry = serde_yml::from_value(value).map_err(|_| {
                    BadwordsError::source_load(
                        self.kind(),
                        location.clone(),
                        "Expected a word string or a map with a `word` key.",
                    )
                })?;
                let data = match entry {
                    YamlEntry::Plain(word) => WordData::new(word),
                    YamlEntry::Full(data) => data,
                };
                if data.word.trim().is_empty() {
                    return Err(BadwordsError::source_load(
                        self.kind(),
                        location,
                        "Expected word to be non-empty string.",
                    ));
                }
                Ok(data)
            })
            .collect()
    }
}
