// badwords/src/cli.rs
//! Command-line interface definition for the badwords application.
//! License: MIT OR APACHE 2.0

use clap::{Parser, Subcommand, ValueEnum};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "badwords",
    author = "Badwords Team",
    version = env!("CARGO_PKG_VERSION"),
    about = "Find bad words in text, including look-alike spellings",
    long_about = "Badwords scans text for words from one or more dictionaries. Each dictionary word is expanded into a pattern that also catches common obfuscations such as substituted characters (b@d), stretched letters (baaad) and punctuation inside phrases. Dictionaries can carry a risk level, and the report shows the highest one found.",
    arg_required_else_help = true,
)]
pub struct Cli {
    #[arg(long, short = 'q', help = "Suppress all log output.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', help = "Enable debug logging.")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scans a file or stdin against the given dictionaries.
    #[command(about = "Scan a file or stdin for dictionary words.")]
    Scan(ScanCommand),

    /// Prints the filter configuration that `scan` would use.
    #[command(about = "Print the effective filter configuration as YAML.")]
    Config(ConfigCommand),
}

/// Output format of the `scan` command.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One line per match plus a summary.
    #[default]
    Text,
    /// The full result as JSON.
    Json,
    /// The input as HTML with matches wrapped in spans.
    Html,
}

/// A dictionary file, optionally followed by `:RISK`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryArg {
    pub path: PathBuf,
    pub risk_level: Option<u32>,
}

impl FromStr for DictionaryArg {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        // Only a trailing all-digit segment is a risk level, so paths that
        // contain ':' still work.
        if let Some((path, risk)) = value.rsplit_once(':') {
            if !risk.is_empty() && risk.chars().all(|c| c.is_ascii_digit()) {
                let risk_level: u32 = risk
                    .parse()
                    .map_err(|_| format!("risk level '{}' is out of range", risk))?;
                if risk_level == 0 {
                    return Err("risk level must be a positive integer".to_string());
                }
                if path.is_empty() {
                    return Err("missing dictionary path before ':'".to_string());
                }
                return Ok(Self {
                    path: PathBuf::from(path),
                    risk_level: Some(risk_level),
                });
            }
        }
        if value.is_empty() {
            return Err("dictionary path must not be empty".to_string());
        }
        Ok(Self {
            path: PathBuf::from(value),
            risk_level: None,
        })
    }
}

impl fmt::Display for DictionaryArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.risk_level {
            Some(level) => write!(f, "{}:{}", self.path.display(), level),
            None => write!(f, "{}", self.path.display()),
        }
    }
}

/// Arguments for the `scan` command.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long = "input", short = 'i', value_name = "FILE", help = "Read input from a file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    #[arg(
        long = "dictionary",
        short = 'D',
        value_name = "PATH[:RISK]",
        required = true,
        help = "Word list file (.csv, .yaml or .yml), optionally with a risk level. Repeatable."
    )]
    pub dictionaries: Vec<DictionaryArg>,

    #[arg(long, short = 'c', value_name = "FILE", env = "BADWORDS_CONFIG", help = "Filter configuration YAML file.")]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        short = 'w',
        value_name = "WORDS",
        value_delimiter = ',',
        help = "Comma-separated words that are never reported."
    )]
    pub whitelist: Vec<String>,

    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Text, help = "Output format.")]
    pub format: OutputFormat,

    /// Exit with 0 even when matches are found.
    #[arg(long = "no-fail", help = "Exit with status 0 even when matches are found.")]
    pub no_fail: bool,

    #[arg(
        long = "whole-words",
        help = "Only match dictionary words that stand alone, unless the word list says otherwise."
    )]
    pub whole_words: bool,
}

/// Arguments for the `config` command.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    #[arg(long, short = 'c', value_name = "FILE", env = "BADWORDS_CONFIG", help = "Filter configuration YAML file.")]
    pub config: Option<PathBuf>,
}
