//! Validation-set evaluation driven by greedy decoding

use super::greedy::{strip_prediction, strip_reference, GreedyDecoder};
use super::model::Seq2SeqModel;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::EvalSpec;
use crate::data::{get_minibatch, Vocab};
use crate::error::{EvalError, Result};
use crate::eval::{compute_accuracy, get_bleu, Metric};

const SEPARATOR: &str = "--------------------------------------";

/// Prediction line, reference line, then a dashed separator.
pub fn format_example(prediction: &[String], reference: &[String]) -> String {
    format!("{}\n{}\n{SEPARATOR}", prediction.join(" "), reference.join(" "))
}

/// Warning for a target side too short to pair with every source sentence.
pub fn format_length_warning(src_len: usize, trg_len: usize) -> Option<String> {
    (trg_len < src_len).then(|| {
        format!(
            "Warning: {src_len} source sentences but {trg_len} references; \
             predictions past the last reference are not scored"
        )
    })
}

/// Predictions, references, and the score computed from them.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalOutcome {
    pub metric: Metric,
    /// Score in [0, 100]
    pub score: f64,
    pub predictions: Vec<Vec<String>>,
    pub references: Vec<Vec<String>>,
    /// Full batches decoded
    pub batches: usize,
}

/// Decodes a validation set batch by batch and scores the result.
#[derive(Debug, Clone)]
pub struct Evaluator {
    batch_size: usize,
    max_src_length: usize,
    metric: Metric,
    level: LogLevel,
}

impl Evaluator {
    /// Per-example output is on by default; see [`Evaluator::with_log_level`].
    pub fn new(batch_size: usize, max_src_length: usize, metric: Metric) -> Self {
        Self {
            batch_size,
            max_src_length,
            metric,
            level: LogLevel::Verbose,
        }
    }

    /// Take sizes, metric, and verbosity from a loaded spec.
    pub fn from_spec(spec: &EvalSpec) -> Self {
        let level = if spec.eval.verbose {
            LogLevel::Verbose
        } else {
            LogLevel::Normal
        };
        Self::new(spec.data.batch_size, spec.data.max_src_length, spec.eval.metric)
            .with_log_level(level)
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn log_level(&self) -> LogLevel {
        self.level
    }

    /// Greedy-decode every full batch of `src_lines` and score against `trg_lines`.
    ///
    /// A trailing batch shorter than `batch_size` ends the loop and is not
    /// decoded. Predictions lose their `<s>` and everything from `</s>`;
    /// references lose everything from `</s>`.
    ///
    /// # Errors
    ///
    /// Fails on a zero batch size, on any model or vocabulary error, and
    /// with [`EvalError::EmptyPredictions`] when accuracy is requested but
    /// no full batch existed.
    pub fn evaluate<M, S, T>(
        &self,
        model: &M,
        src_vocab: &Vocab,
        src_lines: &[Vec<S>],
        trg_vocab: &Vocab,
        trg_lines: &[Vec<T>],
    ) -> Result<EvalOutcome>
    where
        M: Seq2SeqModel + ?Sized,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        if self.batch_size == 0 {
            return Err(EvalError::ConfigValue {
                field: "data.batch_size".into(),
                message: "Batch size must be positive".into(),
                suggestion: "Use a batch size like 64".into(),
            });
        }

        if let Some(warning) = format_length_warning(src_lines.len(), trg_lines.len()) {
            log(self.level, LogLevel::Normal, &warning);
        }

        let decoder = GreedyDecoder::new(model, trg_vocab, self.max_src_length);
        let mut predictions = Vec::new();
        let mut references = Vec::new();
        let mut batches = 0;

        for j in (0..src_lines.len()).step_by(self.batch_size) {
            let src = get_minibatch(
                src_lines,
                src_vocab,
                j,
                self.batch_size,
                self.max_src_length,
                true,
                true,
            );
            if src.len() != self.batch_size {
                break;
            }
            let gold = get_minibatch(
                trg_lines,
                trg_vocab,
                j,
                self.batch_size,
                self.max_src_length,
                true,
                true,
            );

            let decoded = decoder.decode(&src.input_ids)?;

            for (pred_ids, gold_ids) in decoded.rows().into_iter().zip(gold.output_ids.rows()) {
                let pred = strip_prediction(&trg_vocab.decode_ids(pred_ids.iter().copied())?);
                let reference = strip_reference(&trg_vocab.decode_ids(gold_ids.iter().copied())?);

                log(self.level, LogLevel::Verbose, &format_example(&pred, &reference));

                predictions.push(pred);
                references.push(reference);
            }
            batches += 1;
        }

        let score = match self.metric {
            Metric::Accuracy => compute_accuracy(&predictions, &references)?,
            Metric::Bleu => get_bleu(&predictions, &references),
        };

        Ok(EvalOutcome {
            metric: self.metric,
            score,
            predictions,
            references,
            batches,
        })
    }
}
