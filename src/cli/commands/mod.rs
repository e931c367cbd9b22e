//! CLI command implementations

mod score;
mod validate;


use crate::cli::LogLevel;
use crate::config::{Cli, Command};

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = LogLevel::from_flags(cli.quiet, cli.verbose);

    match cli.command {
        Command::Score(args) => score::run_score(args, log_level),
        Command::Validate(args) => validate::run_validate(args, log_level),
    }
}
