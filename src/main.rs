//! nmt-eval CLI
//!
//! # Usage
//!
//! ```bash
//! # Corpus BLEU of a hypothesis file against references
//! nmt-eval score --hyp pred.txt --ref gold.txt
//!
//! # Exact-match accuracy as JSON
//! nmt-eval score --hyp pred.txt --ref gold.txt --metric accuracy --format json
//!
//! # Validate an evaluation config
//! nmt-eval validate eval.yaml
//! ```

use clap::Parser;
use nmt_eval::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
