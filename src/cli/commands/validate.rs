//! Validate command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{ConfigValidator, EvalSpec, ValidateArgs};
use crate::data::Corpus;
use crate::decode::format_length_warning;

/// Format the effective settings of a spec
pub fn format_spec_summary(spec: &EvalSpec) -> String {
    let mut lines = vec![
        format!("  Batch size: {}", spec.data.batch_size),
        format!("  Max length: {}", spec.data.max_src_length),
    ];
    if let Some(src) = &spec.data.src {
        lines.push(format!("  Source corpus: {}", src.display()));
    }
    if let Some(trg) = &spec.data.trg {
        lines.push(format!("  Target corpus: {}", trg.display()));
    }
    lines.push(format!("  Metric: {}", spec.eval.metric));
    lines.push(format!("  Verbose: {}", spec.eval.verbose));
    lines.join("\n")
}

/// Describe the loaded corpora and how many full batches they yield
pub fn format_corpus_summary(src: &Corpus, trg: &Corpus, batch_size: usize) -> String {
    let full_batches = if batch_size == 0 { 0 } else { src.len() / batch_size };
    let mut summary = format!(
        "Corpora: {} source, {} target sentences ({full_batches} full batches)",
        src.len(),
        trg.len()
    );
    if let Some(warning) = format_length_warning(src.len(), trg.len()) {
        summary.push('\n');
        summary.push_str(&warning);
    }
    summary
}

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Validating config: {}", args.config.display()),
    );

    let spec = EvalSpec::from_file(&args.config).map_err(|e| format!("Config error: {e}"))?;

    ConfigValidator::validate(&spec).map_err(|e| format!("Validation failed: {e}"))?;

    if spec.data.has_corpora() {
        let (src, trg) = spec
            .data
            .load_corpora()
            .map_err(|e| format!("Validation failed: {e}"))?;
        log(
            level,
            LogLevel::Normal,
            &format_corpus_summary(&src, &trg, spec.data.batch_size),
        );
    }

    log(level, LogLevel::Normal, "Configuration is valid");
    log(level, LogLevel::Verbose, &format_spec_summary(&spec));

    Ok(())
}
