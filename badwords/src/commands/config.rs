//! `config` command and the configuration lookup shared with `scan`.
//!
//! An explicit `--config` file wins. Otherwise the first existing candidate
//! among `./badwords.yaml` and `<config dir>/badwords/config.yaml` is used,
//! falling back to the built-in standard preset.

use anyhow::{Context, Result};
use log::{debug, info};
use std::io::Write;
use std::path::{Path, PathBuf};

use badwords_core::FilterConfig;

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "badwords.yaml";

/// Config files searched when none is given, in order.
pub fn config_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("badwords").join("config.yaml"));
    }
    candidates
}

/// Loads the configuration `scan` and `config` operate with.
pub fn resolve_config(explicit: Option<&Path>) -> Result<FilterConfig> {
    if let Some(path) = explicit {
        info!("Loading filter configuration from {}", path.display());
        return FilterConfig::load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()));
    }

    for candidate in config_candidates() {
        if candidate.is_file() {
            info!("Using filter configuration found at {}", candidate.display());
            return FilterConfig::load_from_file(&candidate)
                .with_context(|| format!("Failed to load configuration from {}", candidate.display()));
        }
        debug!("No configuration at {}", candidate.display());
    }

    debug!("Falling back to the standard configuration.");
    FilterConfig::standard().context("Failed to load the standard configuration")
}

pub fn run_config_command<W: Write>(config: Option<&Path>, writer: &mut W) -> Result<()> {
    let config = resolve_config(config)?;
    let yaml = config
        .to_yaml_string()
        .context("Failed to serialize configuration")?;
    write!(writer, "{}", yaml)?;
    if !yaml.ends_with('\n') {
        writeln!(writer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use badwords_core::{Phase, Rule};
    use tempfile::NamedTempFile;

    #[test]
    fn test_explicit_config_is_loaded() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "post_rules:\n  - type: boundary\nwhitelist:\n  - Bass")?;

        let config = resolve_config(Some(file.path()))?;
        assert_eq!(config.rules(Phase::Post), &[Rule::Boundary]);
        assert!(config.rules(Phase::Standard).is_empty());
        assert!(config.is_whitelisted("BASS"));
        Ok(())
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let err = resolve_config(Some(Path::new("/nonexistent/badwords.yaml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to load configuration"));
    }

    #[test]
    fn test_config_command_prints_yaml() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "whitelist:\n  - grass")?;

        let mut out = Vec::new();
        run_config_command(Some(file.path()), &mut out)?;
        let printed = String::from_utf8(out)?;
        assert_eq!(FilterConfig::from_yaml_str(&printed)?, resolve_config(Some(file.path()))?);
        Ok(())
    }

    #[test]
    fn test_candidates_start_with_local_file() {
        assert_eq!(config_candidates()[0], PathBuf::from(LOCAL_CONFIG_FILE));
    }
}
