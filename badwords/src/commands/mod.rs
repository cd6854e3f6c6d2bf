// badwords/src/commands/mod.rs

pub mod config;
pub mod scan;
