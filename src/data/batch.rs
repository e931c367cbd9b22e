//! Padded id minibatches for teacher-forced decoding.

use ndarray::Array2;

use super::vocab::{TokenId, Vocab, END_TOKEN, START_TOKEN};

/// One batch of sentences as padded id matrices.
///
/// `input_ids` holds each wrapped sentence minus its last token and
/// `output_ids` the same sentence minus its first, so position `t` of
/// `output_ids` is the target for position `t` of `input_ids`.
#[derive(Debug, Clone, PartialEq)]
pub struct Minibatch {
    /// `[batch, max_len]`
    pub input_ids: Array2<TokenId>,
    /// `[batch, max_len]`
    pub output_ids: Array2<TokenId>,
    /// Unpadded length of each row
    pub lengths: Vec<usize>,
    /// 1.0 on real positions, 0.0 on padding
    pub mask: Array2<f32>,
}

impl Minibatch {
    /// Number of rows in the batch
    pub fn len(&self) -> usize {
        self.input_ids.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Slice `lines[index..index + batch_size]` and turn it into a padded batch.
///
/// Each sentence is truncated to `max_len` tokens before the optional
/// start/end markers are added. Unknown words map to `<unk>`. The slice is
/// clamped to the corpus, so the final batch may be short (or empty).
pub fn get_minibatch<S: AsRef<str>>(
    lines: &[Vec<S>],
    vocab: &Vocab,
    index: usize,
    batch_size: usize,
    max_len: usize,
    add_start: bool,
    add_end: bool,
) -> Minibatch {
    let start = index.min(lines.len());
    let end = index.saturating_add(batch_size).min(lines.len());

    let rows: Vec<Vec<TokenId>> = lines[start..end]
        .iter()
        .map(|line| {
            let mut ids = Vec::with_capacity(line.len().min(max_len) + 2);
            if add_start {
                ids.push(vocab.lookup(START_TOKEN));
            }
            ids.extend(line.iter().take(max_len).map(|w| vocab.lookup(w.as_ref())));
            if add_end {
                ids.push(vocab.lookup(END_TOKEN));
            }
            ids
        })
        .collect();

    let lengths: Vec<usize> = rows.iter().map(|r| r.len().saturating_sub(1)).collect();
    let width = lengths.iter().copied().max().unwrap_or(0);
    let pad = vocab.pad_id();

    let mut input_ids = Array2::from_elem((rows.len(), width), pad);
    let mut output_ids = Array2::from_elem((rows.len(), width), pad);
    let mut mask = Array2::zeros((rows.len(), width));

    for (i, (row, &len)) in rows.iter().zip(&lengths).enumerate() {
        for j in 0..len {
            input_ids[[i, j]] = row[j];
            output_ids[[i, j]] = row[j + 1];
            mask[[i, j]] = 1.0;
        }
    }

    Minibatch { input_ids, output_ids, lengths, mask }
}
