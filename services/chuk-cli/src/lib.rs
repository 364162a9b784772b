//! Library half of the `chuk` binary: configuration and subcommands.

pub mod commands;
pub mod config;

pub use config::{ChukConfig, LogFormat, LoggingConfig};
