//! Logging utilities for CLI and evaluator output

/// Log level for console output
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    /// Suppress all output
    Quiet,
    /// Normal output level
    Normal,
    /// Per-sentence diagnostics
    Verbose,
}

impl LogLevel {
    /// Pick a level from the global `--quiet` / `--verbose` flags.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            LogLevel::Quiet
        } else if verbose {
            LogLevel::Verbose
        } else {
            LogLevel::Normal
        }
    }

    /// Whether a message logged at `required` would be printed.
    pub fn allows(self, required: LogLevel) -> bool {
        self != LogLevel::Quiet && (self == required || required == LogLevel::Normal)
    }
}

/// Log a message if the current level permits it
pub fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if level.allows(required) {
        println!("{msg}");
    }
}
