// badwords/src/lib.rs
//! # Badwords CLI Application
//!
//! Command-line front end for `badwords-core`. `scan` checks text against
//! word list files and reports what it found; `config` prints the filter
//! configuration in effect.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;

use anyhow::Result;

use crate::cli::{Cli, Commands};

/// Exit status when nothing was found.
pub const EXIT_CLEAN: u8 = 0;
/// Exit status when matches were found and `--no-fail` was not given.
pub const EXIT_MATCHES: u8 = 1;
/// Exit status on any error.
pub const EXIT_ERROR: u8 = 2;

/// Log level implied by the global flags; `None` leaves `RUST_LOG` in charge.
pub fn log_level(cli: &Cli) -> Option<log::LevelFilter> {
    if cli.quiet {
        Some(log::LevelFilter::Off)
    } else if cli.debug {
        Some(log::LevelFilter::Debug)
    } else {
        None
    }
}

/// Runs the parsed command and returns the process exit status.
pub fn run(cli: &Cli) -> Result<u8> {
    match &cli.command {
        Commands::Scan(cmd) => {
            let found = commands::scan::run_scan_command(cmd)?;
            if found && !cmd.no_fail {
                Ok(EXIT_MATCHES)
            } else {
                Ok(EXIT_CLEAN)
            }
        }
        Commands::Config(cmd) => {
            let stdout = std::io::stdout();
            commands::config::run_config_command(cmd.config.as_deref(), &mut stdout.lock())?;
            Ok(EXIT_CLEAN)
        }
    }
}
