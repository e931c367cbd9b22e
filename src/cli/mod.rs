//! CLI module for nmt-eval
//!
//! Command handlers and console logging.

mod commands;
pub(crate) mod logging;

pub use commands::run_command;
pub use logging::{log, LogLevel};

// Re-export Cli from config for convenience
pub use crate::config::Cli;
