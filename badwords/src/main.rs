// badwords/src/main.rs
//! Badwords entry point.

use is_terminal::IsTerminal;
use std::io;
use std::process::ExitCode;

use badwords::cli::Cli;
use badwords::ui::output_format;
use badwords::{logger, EXIT_ERROR};
use clap::Parser;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_logger(badwords::log_level(&cli));

    match badwords::run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            let stderr = io::stderr();
            let enable_colors = stderr.is_terminal();
            // Best-effort: there is nowhere left to report a failed stderr write.
            let _ = output_format::print_error_message(&mut stderr.lock(), &format!("{:#}", e), enable_colors);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
