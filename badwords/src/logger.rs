// badwords/src/logger.rs
//! Logging setup for the command line.
//!
//! `RUST_LOG` is honored unless an explicit level is passed, which is how
//! `--quiet` and `--debug` take precedence over the environment.

use env_logger::{Builder, Env};
use log::LevelFilter;
use std::io::Write;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "warn";

/// Initializes the global logger. Calling it again is a no-op.
pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));
    if let Some(level) = level_override {
        builder.filter_level(level);
    }
    builder.format(|buf, record| {
        writeln!(
            buf,
            "[{} {}] {}",
            record.level(),
            record.target(),
            record.args()
        )
    });
    // Tests may have installed a logger already.
    let _ = builder.try_init();
}
