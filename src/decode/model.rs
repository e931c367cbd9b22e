//! Forward-pass interface of a sequence-to-sequence model.

use ndarray::{Array2, Array3};

use crate::data::TokenId;
use crate::error::Result;

/// A model that scores every vocabulary entry at every target position.
///
/// Given source ids `[batch, src_len]` and a target prefix
/// `[batch, trg_len]`, returns scores of shape `[batch, trg_len, vocab]`.
/// The prefix grows by one column per decoding step.
pub trait Seq2SeqModel {
    fn forward(&self, src: &Array2<TokenId>, trg: &Array2<TokenId>) -> Result<Array3<f32>>;
}

impl<F> Seq2SeqModel for F
where
    F: Fn(&Array2<TokenId>, &Array2<TokenId>) -> Result<Array3<f32>>,
{
    fn forward(&self, src: &Array2<TokenId>, trg: &Array2<TokenId>) -> Result<Array3<f32>> {
        self(src, trg)
    }
}
