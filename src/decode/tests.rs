//! Decoding loop tests against stub models

use super::*;
use crate::cli::LogLevel;
use crate::data::{TokenId, Vocab};
use crate::error::{EvalError, Result};
use crate::eval::Metric;
use approx::assert_abs_diff_eq;
use ndarray::{Array2, Array3};
use std::cell::Cell;

fn toks(s: &str) -> Vec<String> {
    s.split_whitespace().map(String::from).collect()
}

fn sentences(lines: &[&str]) -> Vec<Vec<String>> {
    lines.iter().map(|l| toks(l)).collect()
}

/// Emits the source token at the next position, `</s>` once the source runs out.
struct CopyModel {
    vocab_size: usize,
    pad_id: TokenId,
    end_id: TokenId,
    calls: Cell<usize>,
}

impl CopyModel {
    fn new(vocab: &Vocab) -> Self {
        Self {
            vocab_size: vocab.len(),
            pad_id: vocab.pad_id(),
            end_id: vocab.end_id(),
            calls: Cell::new(0),
        }
    }
}

impl Seq2SeqModel for CopyModel {
    fn forward(&self, src: &Array2<TokenId>, trg: &Array2<TokenId>) -> Result<Array3<f32>> {
        self.calls.set(self.calls.get() + 1);
        let (batch, t) = trg.dim();
        let mut scores = Array3::zeros((batch, t, self.vocab_size));
        for i in 0..batch {
            let tok = if t < src.ncols() { src[[i, t]] } else { self.end_id };
            let tok = if tok == self.pad_id { self.end_id } else { tok };
            scores[[i, t - 1, tok as usize]] = 5.0;
        }
        Ok(scores)
    }
}

#[test]
fn test_copy_model_perfect_accuracy() {
    let corpus = sentences(&["a b c", "b c", "c a b d", "d"]);
    let vocab = Vocab::build(&corpus, None);
    let model = CopyModel::new(&vocab);

    let outcome = Evaluator::new(2, 6, Metric::Accuracy)
        .evaluate(&model, &vocab, &corpus, &vocab, &corpus)
        .unwrap();

    assert_eq!(outcome.batches, 2);
    assert_eq!(outcome.predictions, corpus);
    assert_eq!(outcome.references, corpus);
    assert_abs_diff_eq!(outcome.score, 100.0, epsilon = 1e-12);
}

#[test]
fn test_decoding_runs_fixed_number_of_steps() {
    let corpus = sentences(&["a b", "b a", "a a", "b b"]);
    let vocab = Vocab::build(&corpus, None);
    let model = CopyModel::new(&vocab);

    Evaluator::new(2, 5, Metric::Accuracy)
        .evaluate(&model, &vocab, &corpus, &vocab, &corpus)
        .unwrap();

    // 2 batches x 5 steps, no early stop on </s>
    assert_eq!(model.calls.get(), 10);
}

#[test]
fn test_short_tail_batch_is_dropped() {
    let corpus = sentences(&["a b", "b c", "c a", "a c", "b b"]);
    let vocab = Vocab::build(&corpus, None);
    let model = CopyModel::new(&vocab);

    let outcome = Evaluator::new(2, 4, Metric::Accuracy)
        .evaluate(&model, &vocab, &corpus, &vocab, &corpus)
        .unwrap();

    assert_eq!(outcome.batches, 2);
    assert_eq!(outcome.predictions.len(), 4);
    assert_eq!(outcome.predictions[3], toks("a c"));
}

#[test]
fn test_accuracy_against_different_targets() {
    let src = sentences(&["a b", "c d"]);
    let trg = sentences(&["a b", "c x"]);
    let src_vocab = Vocab::build(&src, None);
    let trg_vocab = Vocab::build(&[src.clone(), trg.clone()].concat(), None);

    // Source ids must mean the same words in the target vocabulary for a copy model.
    let model = |s: &Array2<TokenId>, t: &Array2<TokenId>| -> Result<Array3<f32>> {
        let (batch, len) = t.dim();
        let mut scores = Array3::zeros((batch, len, trg_vocab.len()));
        for i in 0..batch {
            let word = if len < s.ncols() {
                src_vocab.id_to_token(s[[i, len]]).unwrap_or("</s>")
            } else {
                "</s>"
            };
            let word = if word == "<pad>" { "</s>" } else { word };
            scores[[i, len - 1, trg_vocab.lookup(word) as usize]] = 1.0;
        }
        Ok(scores)
    };

    let outcome = Evaluator::new(2, 4, Metric::Accuracy)
        .evaluate(&model, &src_vocab, &src, &trg_vocab, &trg)
        .unwrap();

    assert_eq!(outcome.predictions, src);
    assert_eq!(outcome.references, trg);
    assert_abs_diff_eq!(outcome.score, 50.0, epsilon = 1e-12);
}

#[test]
fn test_bleu_routes_through_corpus_aggregation() {
    let corpus = sentences(&["a b c d", "d c b a e"]);
    let vocab = Vocab::build(&corpus, None);
    let model = CopyModel::new(&vocab);

    let outcome = Evaluator::new(2, 8, Metric::Bleu)
        .evaluate(&model, &vocab, &corpus, &vocab, &corpus)
        .unwrap();

    assert_eq!(outcome.metric, Metric::Bleu);
    assert_abs_diff_eq!(outcome.score, 100.0, epsilon = 1e-9);
}

#[test]
fn test_max_length_caps_prediction() {
    let corpus = sentences(&["a b c d e"]);
    let vocab = Vocab::build(&corpus, None);
    let model = CopyModel::new(&vocab);

    let outcome = Evaluator::new(1, 3, Metric::Accuracy)
        .evaluate(&model, &vocab, &corpus, &vocab, &corpus)
        .unwrap();

    // Source truncated to 3 tokens and only 3 steps decoded
    assert_eq!(outcome.predictions[0], toks("a b c"));
    assert_eq!(outcome.references[0], toks("a b c"));
}

#[test]
fn test_no_full_batch_accuracy_is_error() {
    let corpus = sentences(&["a b"]);
    let vocab = Vocab::build(&corpus, None);
    let model = CopyModel::new(&vocab);

    let err = Evaluator::new(4, 3, Metric::Accuracy)
        .evaluate(&model, &vocab, &corpus, &vocab, &corpus)
        .unwrap_err();
    assert!(matches!(err, EvalError::EmptyPredictions));
    assert_eq!(model.calls.get(), 0);
}

#[test]
fn test_no_full_batch_bleu_is_zero() {
    let corpus = sentences(&["a b"]);
    let vocab = Vocab::build(&corpus, None);
    let model = CopyModel::new(&vocab);

    let outcome = Evaluator::new(4, 3, Metric::Bleu)
        .evaluate(&model, &vocab, &corpus, &vocab, &corpus)
        .unwrap();
    assert_eq!(outcome.batches, 0);
    assert_eq!(outcome.score, 0.0);
}

#[test]
fn test_zero_batch_size_is_rejected() {
    let corpus = sentences(&["a b"]);
    let vocab = Vocab::build(&corpus, None);
    let model = CopyModel::new(&vocab);

    let err = Evaluator::new(0, 3, Metric::Accuracy)
        .evaluate(&model, &vocab, &corpus, &vocab, &corpus)
        .unwrap_err();
    assert!(matches!(err, EvalError::ConfigValue { .. }));
}

#[test]
fn test_model_error_propagates() {
    let corpus = sentences(&["a b", "b a"]);
    let vocab = Vocab::build(&corpus, None);
    let model = |_: &Array2<TokenId>, _: &Array2<TokenId>| -> Result<Array3<f32>> {
        Err(EvalError::Model { message: "device lost".into() })
    };

    let err = Evaluator::new(2, 3, Metric::Bleu)
        .evaluate(&model, &vocab, &corpus, &vocab, &corpus)
        .unwrap_err();
    assert!(err.to_string().contains("device lost"));
}

#[test]
fn test_from_spec_uses_config_values() {
    let mut spec = crate::config::EvalSpec::default();
    spec.data.batch_size = 1;
    spec.data.max_src_length = 4;
    spec.eval.metric = Metric::Bleu;
    spec.eval.verbose = false;

    let corpus = sentences(&["a b c d", "d c b a"]);
    let vocab = Vocab::build(&corpus, None);
    let model = CopyModel::new(&vocab);

    let outcome = Evaluator::from_spec(&spec)
        .evaluate(&model, &vocab, &corpus, &vocab, &corpus)
        .unwrap();

    assert_eq!(outcome.batches, 2);
    assert_eq!(outcome.metric, Metric::Bleu);
    assert_eq!(model.calls.get(), 8);
    assert_abs_diff_eq!(outcome.score, 100.0, epsilon = 1e-9);
}

#[test]
fn test_from_spec_verbose_selects_per_example_output() {
    let spec = crate::config::EvalSpec::default();
    assert_eq!(Evaluator::from_spec(&spec).log_level(), LogLevel::Verbose);

    let mut quiet = spec.clone();
    quiet.eval.verbose = false;
    assert_eq!(Evaluator::from_spec(&quiet).log_level(), LogLevel::Normal);
}

#[test]
fn test_new_defaults_to_verbose() {
    let evaluator = Evaluator::new(2, 4, Metric::Bleu);
    assert_eq!(evaluator.log_level(), LogLevel::Verbose);
    let evaluator = evaluator.with_log_level(LogLevel::Quiet);
    assert_eq!(evaluator.log_level(), LogLevel::Quiet);
}

#[test]
fn test_format_example_layout() {
    let text = format_example(&toks("a b c"), &toks("a b d"));
    assert_eq!(text, format!("a b c\na b d\n{}", "-".repeat(38)));
}

#[test]
fn test_format_example_empty_prediction() {
    let text = format_example(&[], &toks("x"));
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["", "x", "--------------------------------------"]);
}

#[test]
fn test_length_warning_only_for_short_targets() {
    let warning = format_length_warning(4, 2).unwrap();
    assert!(warning.starts_with("Warning: 4 source sentences but 2 references"));
    assert!(format_length_warning(2, 2).is_none());
    assert!(format_length_warning(2, 5).is_none());
}

#[test]
fn test_short_target_side_limits_scored_pairs() {
    let src = sentences(&["a b", "b a", "a a", "b b"]);
    let trg = sentences(&["a b", "b a"]);
    let vocab = Vocab::build(&src, None);
    let model = CopyModel::new(&vocab);

    let outcome = Evaluator::new(2, 4, Metric::Accuracy)
        .with_log_level(LogLevel::Quiet)
        .evaluate(&model, &vocab, &src, &vocab, &trg)
        .unwrap();

    // Both source batches decode, only the first has references to pair with.
    assert_eq!(outcome.batches, 2);
    assert_eq!(outcome.predictions.len(), 2);
    assert_eq!(outcome.references, trg);
    assert_abs_diff_eq!(outcome.score, 100.0, epsilon = 1e-12);
}
