//! Formatting of scan results and status messages for the terminal.
//!
//! Colors are applied only when the destination supports them; callers pass
//! that decision in so output written to pipes and files stays plain.

use std::io::{self, Write};

use badwords_core::FilterResult;
use owo_colors::{AnsiColors, OwoColorize};

fn paint(text: &str, color: AnsiColors, enable_colors: bool) -> String {
    if enable_colors {
        text.color(color).to_string()
    } else {
        text.to_string()
    }
}

/// Color used for a match of the given risk level.
pub fn risk_color(risk_level: Option<u32>) -> AnsiColors {
    match risk_level {
        None => AnsiColors::Cyan,
        Some(1) => AnsiColors::Yellow,
        Some(2) => AnsiColors::BrightRed,
        Some(_) => AnsiColors::Red,
    }
}

pub fn print_info_message<W: Write>(writer: &mut W, message: &str, enable_colors: bool) -> io::Result<()> {
    writeln!(writer, "{}", paint(message, AnsiColors::Blue, enable_colors))
}

pub fn print_warn_message<W: Write>(writer: &mut W, message: &str, enable_colors: bool) -> io::Result<()> {
    writeln!(
        writer,
        "{}",
        paint(&format!("WARNING: {}", message), AnsiColors::Yellow, enable_colors)
    )
}

pub fn print_error_message<W: Write>(writer: &mut W, message: &str, enable_colors: bool) -> io::Result<()> {
    writeln!(
        writer,
        "{}",
        paint(&format!("ERROR: {}", message), AnsiColors::Red, enable_colors)
    )
}

/// Writes a human-readable report: one line per match with its risk level,
/// then a summary line.
pub fn print_text_report<W: Write>(
    writer: &mut W,
    result: &FilterResult,
    enable_colors: bool,
) -> io::Result<()> {
    if result.is_clean() {
        return writeln!(writer, "{}", paint("No bad words found.", AnsiColors::Green, enable_colors));
    }

    for (text, risk_level) in result.matches_and_risk_levels() {
        let level = match risk_level {
            Some(level) => format!("risk {}", level),
            None => "no risk level".to_string(),
        };
        writeln!(
            writer,
            "  {} ({})",
            paint(text, risk_color(risk_level), enable_colors),
            level
        )?;
    }

    let total = result.matches().len();
    let summary = match result.risk_level() {
        Some(level) => format!("Found {} match(es), highest risk level {}.", total, level),
        None => format!("Found {} match(es).", total),
    };
    writeln!(writer, "{}", paint(&summary, AnsiColors::Magenta, enable_colors))
}
