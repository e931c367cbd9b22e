//! Score command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{OutputFormat, ScoreArgs};
use crate::data::Corpus;
use crate::error::{EvalError, Result};
use crate::eval::{compute_accuracy, corpus_stats, BleuReport, Metric};

/// Score aligned hypothesis/reference sentences and render the result.
pub fn format_score(
    hypotheses: &[Vec<String>],
    references: &[Vec<String>],
    metric: Metric,
    format: OutputFormat,
) -> Result<String> {
    match metric {
        Metric::Bleu => {
            let report = BleuReport::from_stats(&corpus_stats(hypotheses, references));
            match format {
                OutputFormat::Text => Ok(report.to_string()),
                OutputFormat::Json => serde_json::to_string(&report)
                    .map_err(|e| EvalError::Serialization { message: e.to_string() }),
            }
        }
        Metric::Accuracy => {
            let score = compute_accuracy(hypotheses, references)?;
            match format {
                OutputFormat::Text => Ok(format!(
                    "Accuracy = {score:.2} ({} sentences)",
                    hypotheses.len()
                )),
                OutputFormat::Json => Ok(serde_json::json!({
                    "metric": "accuracy",
                    "score": score,
                    "sentences": hypotheses.len(),
                })
                .to_string()),
            }
        }
    }
}

pub fn run_score(args: ScoreArgs, level: LogLevel) -> std::result::Result<(), String> {
    let metric: Metric = args.metric.parse().map_err(|e: EvalError| e.to_string())?;

    let hypotheses = Corpus::from_file(&args.hypotheses).map_err(|e| e.to_string())?;
    let references = Corpus::from_file(&args.references).map_err(|e| e.to_string())?;

    log(
        level,
        LogLevel::Verbose,
        &format!(
            "Scoring {} against {} with {metric}",
            args.hypotheses.display(),
            args.references.display()
        ),
    );

    if hypotheses.len() != references.len() {
        log(
            level,
            LogLevel::Normal,
            &format!(
                "Warning: {} hypotheses but {} references; scoring the first {}",
                hypotheses.len(),
                references.len(),
                hypotheses.len().min(references.len())
            ),
        );
    }

    let output = format_score(hypotheses.lines(), references.lines(), metric, args.format)
        .map_err(|e| e.to_string())?;

    match args.format {
        OutputFormat::Json => println!("{output}"),
        OutputFormat::Text => log(level, LogLevel::Normal, &output),
    }

    Ok(())
}
