//! Fixed-length greedy decoding

use ndarray::{Array2, ArrayView1, Axis};

use super::model::Seq2SeqModel;
use crate::data::{TokenId, Vocab, END_TOKEN};
use crate::error::{EvalError, Result};

/// Runs a model step by step, appending the argmax token each time.
///
/// No early stopping: every row is extended exactly `max_steps` times,
/// and `</s>` is handled afterwards by [`strip_prediction`].
pub struct GreedyDecoder<'a, M: ?Sized> {
    model: &'a M,
    start_id: TokenId,
    vocab_size: usize,
    max_steps: usize,
}

impl<'a, M: Seq2SeqModel + ?Sized> GreedyDecoder<'a, M> {
    pub fn new(model: &'a M, vocab: &Vocab, max_steps: usize) -> Self {
        Self {
            model,
            start_id: vocab.start_id(),
            vocab_size: vocab.len(),
            max_steps,
        }
    }

    /// Decode a source batch into `[batch, max_steps + 1]` ids, `<s>` first.
    ///
    /// # Errors
    ///
    /// Propagates model failures, rejects outputs whose shape is not
    /// `[batch, prefix_len, vocab]`, and reports NaN scores at the last
    /// position as [`EvalError::Model`].
    pub fn decode(&self, src: &Array2<TokenId>) -> Result<Array2<TokenId>> {
        let batch = src.nrows();
        let mut rows: Vec<Vec<TokenId>> = vec![vec![self.start_id]; batch];

        for step in 0..self.max_steps {
            let prefix_len = step + 1;
            let trg = Array2::from_shape_fn((batch, prefix_len), |(i, j)| rows[i][j]);

            let scores = self.model.forward(src, &trg)?;
            let (b, t, v) = scores.dim();
            if b != batch || t != prefix_len || v != self.vocab_size {
                return Err(EvalError::ShapeMismatch {
                    expected: vec![batch, prefix_len, self.vocab_size],
                    actual: vec![b, t, v],
                });
            }

            let last = scores.index_axis(Axis(1), t - 1).to_owned();
            let probs = softmax_2d(&last);
            if probs.iter().any(|p| p.is_nan()) {
                return Err(EvalError::Model {
                    message: format!("NaN in output scores at decoding step {step}"),
                });
            }
            for (row, dist) in rows.iter_mut().zip(probs.axis_iter(Axis(0))) {
                row.push(argmax(dist) as TokenId);
            }
        }

        let width = self.max_steps + 1;
        Ok(Array2::from_shape_fn((batch, width), |(i, j)| rows[i][j]))
    }
}

/// Softmax along the last axis of a 2D array.
fn softmax_2d(x: &Array2<f32>) -> Array2<f32> {
    let mut result = x.clone();

    for mut row in result.axis_iter_mut(Axis(0)) {
        let max_val = row.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
        row.mapv_inplace(|v| (v - max_val).exp());

        let sum: f32 = row.sum();
        row.mapv_inplace(|v| v / sum);
    }

    result
}

/// Index of the first maximum. NaN entries never win; callers reject them
/// before this point.
fn argmax(row: ArrayView1<f32>) -> usize {
    let mut best = 0;
    let mut best_val = f32::NEG_INFINITY;
    for (i, &v) in row.iter().enumerate() {
        if v > best_val {
            best_val = v;
            best = i;
        }
    }
    best
}

fn end_index(tokens: &[String]) -> usize {
    tokens.iter().position(|t| t == END_TOKEN).unwrap_or(tokens.len())
}

/// Drop the leading `<s>` and everything from the first `</s>` on.
pub fn strip_prediction(tokens: &[String]) -> Vec<String> {
    let end = end_index(tokens);
    tokens.get(1..end).map(<[String]>::to_vec).unwrap_or_default()
}

/// Drop everything from the first `</s>` on.
pub fn strip_reference(tokens: &[String]) -> Vec<String> {
    tokens[..end_index(tokens)].to_vec()
}
