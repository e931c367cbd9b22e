//! Configuration: YAML evaluation spec, validation, and CLI arguments

mod cli;
mod spec;
mod validate;

pub use cli::{Cli, Command, OutputFormat, ScoreArgs, ValidateArgs};
pub use spec::{DataSpec, EvalOptions, EvalSpec};
pub use validate::ConfigValidator;
