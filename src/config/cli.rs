//! CLI types - Cli, Command, and argument structs

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// nmt-eval: translation quality scoring
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "nmt-eval")]
#[command(version)]
#[command(about = "Corpus BLEU and exact-match accuracy for sequence-to-sequence output")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Score hypotheses against references
    Score(ScoreArgs),

    /// Validate an evaluation configuration file
    Validate(ValidateArgs),
}

/// Arguments for the score command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ScoreArgs {
    /// Hypothesis file, one tokenized sentence per line
    #[arg(long = "hyp", value_name = "FILE")]
    pub hypotheses: PathBuf,

    /// Reference file aligned line by line with the hypotheses
    #[arg(long = "ref", value_name = "FILE")]
    pub references: PathBuf,

    /// Metric: bleu or accuracy
    #[arg(short, long, default_value = "bleu")]
    pub metric: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,
}

/// Output format for scores
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON object
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score() {
        let cli = Cli::try_parse_from([
            "nmt-eval", "score", "--hyp", "h.txt", "--ref", "r.txt", "--metric", "accuracy",
        ])
        .unwrap();
        match cli.command {
            Command::Score(args) => {
                assert_eq!(args.hypotheses, PathBuf::from("h.txt"));
                assert_eq!(args.references, PathBuf::from("r.txt"));
                assert_eq!(args.metric, "accuracy");
                assert_eq!(args.format, OutputFormat::Text);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from(["nmt-eval", "validate", "eval.yaml", "-q"]).unwrap();
        assert!(cli.quiet);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_json_format() {
        let cli = Cli::try_parse_from([
            "nmt-eval", "score", "--hyp", "h", "--ref", "r", "--format", "json",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Score(ScoreArgs { format: OutputFormat::Json, .. })));
    }

    #[test]
    fn test_score_requires_files() {
        assert!(Cli::try_parse_from(["nmt-eval", "score", "--hyp", "h"]).is_err());
    }
}
