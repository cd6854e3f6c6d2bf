//! `scan` command: filters a file or stdin against word list files.

use anyhow::{bail, Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::sync::Arc;

use badwords_core::{
    CsvSource, Dictionary, Filter, FilterResult, WordListDictionary, YamlSource,
};

use crate::cli::{DictionaryArg, OutputFormat, ScanCommand};
use crate::commands::config::resolve_config;
use crate::ui::output_format;

fn info_msg(message: impl AsRef<str>) {
    let stderr = io::stderr();
    let enable_colors = stderr.is_terminal();
    // Best-effort: a closed stderr must not fail the scan.
    let _ = output_format::print_info_message(&mut stderr.lock(), message.as_ref(), enable_colors);
}

fn warn_msg(message: impl AsRef<str>) {
    let stderr = io::stderr();
    let enable_colors = stderr.is_terminal();
    let _ = output_format::print_warn_message(&mut stderr.lock(), message.as_ref(), enable_colors);
}

/// Builds a dictionary from a `.csv`, `.yaml` or `.yml` word list.
pub fn load_dictionary(arg: &DictionaryArg, whole_words: bool) -> Result<Arc<dyn Dictionary>> {
    let extension = arg
        .path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let dictionary: Arc<dyn Dictionary> = match extension.as_str() {
        "csv" => {
            let source = CsvSource::new(&arg.path)
                .with_context(|| format!("Cannot use dictionary {}", arg.path.display()))?;
            Arc::new(
                WordListDictionary::new(source)
                    .with_boundary_defaults(whole_words, whole_words)
                    .with_risk_level(arg.risk_level)?,
            )
        }
        "yaml" | "yml" => {
            let source = YamlSource::new(&arg.path)
                .with_context(|| format!("Cannot use dictionary {}", arg.path.display()))?;
            Arc::new(
                WordListDictionary::new(source)
                    .with_boundary_defaults(whole_words, whole_words)
                    .with_risk_level(arg.risk_level)?,
            )
        }
        _ => bail!(
            "Unsupported dictionary format for {}: expected a .csv, .yaml or .yml file",
            arg.path.display()
        ),
    };
    debug!("Dictionary {} registered as '{}'.", arg, dictionary.id());
    Ok(dictionary)
}

/// Reads the content to scan from `input_file`, or stdin when absent.
pub fn read_input(input_file: Option<&Path>) -> Result<String> {
    match input_file {
        Some(path) => {
            info!("Reading input from file: {}", path.display());
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file: {}", path.display()))
        }
        None => {
            info!("Reading input from stdin.");
            if io::stdin().is_terminal() {
                info_msg("Reading from stdin. Press Ctrl-D when done.");
            }
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

/// Messages for dictionaries that resolve to an already listed one. Only the
/// first of them takes part in the scan.
pub fn duplicate_dictionaries(args: &[DictionaryArg], dictionaries: &[Arc<dyn Dictionary>]) -> Vec<String> {
    let mut messages = Vec::new();
    for (index, dictionary) in dictionaries.iter().enumerate() {
        if let Some(first) = dictionaries[..index].iter().position(|d| d.id() == dictionary.id()) {
            messages.push(format!(
                "Dictionary {} is the same as {} and will be ignored.",
                args[index], args[first]
            ));
        }
    }
    messages
}

/// Scans `content` and writes the report to `writer`.
/// Returns whether anything was found.
pub fn scan_content<W: Write>(
    cmd: &ScanCommand,
    content: &str,
    writer: &mut W,
    enable_colors: bool,
) -> Result<bool> {
    if content.trim().is_empty() {
        bail!("Input is empty; nothing to scan");
    }

    let mut config = resolve_config(cmd.config.as_deref())?;
    config
        .add_whitelisted_words(&cmd.whitelist)
        .context("Invalid --whitelist value")?;

    let dictionaries = cmd
        .dictionaries
        .iter()
        .map(|arg| load_dictionary(arg, cmd.whole_words))
        .collect::<Result<Vec<_>>>()?;
    for message in duplicate_dictionaries(&cmd.dictionaries, &dictionaries) {
        warn_msg(message);
    }
    let filter = Filter::new(dictionaries, config);

    let result = filter.filter(content).context("Scan failed")?;
    info!(
        "Scan finished: {} match(es), risk level {:?}.",
        result.matches().len(),
        result.risk_level()
    );
    write_result(cmd.format, &result, writer, enable_colors)?;
    Ok(!result.is_clean())
}

fn write_result<W: Write>(
    format: OutputFormat,
    result: &FilterResult,
    writer: &mut W,
    enable_colors: bool,
) -> Result<()> {
    match format {
        OutputFormat::Text => output_format::print_text_report(writer, result, enable_colors)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, result)
                .context("Failed to serialize the result")?;
            writeln!(writer)?;
        }
        OutputFormat::Html => writeln!(writer, "{}", result.highlighted_content())?,
    }
    Ok(())
}

/// Runs `scan` against stdout. Returns whether anything was found.
pub fn run_scan_command(cmd: &ScanCommand) -> Result<bool> {
    let content = read_input(cmd.input_file.as_deref())?;
    let stdout = io::stdout();
    let enable_colors = stdout.is_terminal();
    let mut writer = stdout.lock();
    let found = scan_content(cmd, &content, &mut writer, enable_colors)?;
    writer.flush()?;
    Ok(found)
}
