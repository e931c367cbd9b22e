//! Corpus-level BLEU
//!
//! Per-sentence n-gram statistics are summed across the corpus first and
//! the BLEU formula is applied once to the aggregate. Sentence-level
//! scores are never averaged.

use std::collections::HashMap;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Highest n-gram order counted.
pub const MAX_NGRAM: usize = 4;

/// Sufficient statistics for BLEU over one or more sentence pairs.
///
/// The 10-tuple view (see [`BleuStats::as_array`]) is
/// `(hyp_len, ref_len, match_1, total_1, ..., match_4, total_4)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BleuStats {
    /// Hypothesis length in tokens
    pub hyp_len: usize,
    /// Reference length in tokens
    pub ref_len: usize,
    /// Clipped n-gram matches, index `n - 1`
    pub matches: [usize; MAX_NGRAM],
    /// Hypothesis n-gram counts, index `n - 1`
    pub totals: [usize; MAX_NGRAM],
}

impl BleuStats {
    /// Flatten into the 10-value layout.
    pub fn as_array(&self) -> [usize; 2 + 2 * MAX_NGRAM] {
        let mut out = [0; 2 + 2 * MAX_NGRAM];
        out[0] = self.hyp_len;
        out[1] = self.ref_len;
        for n in 0..MAX_NGRAM {
            out[2 + 2 * n] = self.matches[n];
            out[3 + 2 * n] = self.totals[n];
        }
        out
    }

    /// True if any of the 10 values is zero.
    pub fn has_zero(&self) -> bool {
        self.as_array().iter().any(|&x| x == 0)
    }
}

impl Add for BleuStats {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl AddAssign for BleuStats {
    fn add_assign(&mut self, rhs: Self) {
        self.hyp_len += rhs.hyp_len;
        self.ref_len += rhs.ref_len;
        for n in 0..MAX_NGRAM {
            self.matches[n] += rhs.matches[n];
            self.totals[n] += rhs.totals[n];
        }
    }
}

impl Sum for BleuStats {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Count every contiguous n-gram of `tokens`.
fn extract_ngrams<S: AsRef<str>>(tokens: &[S], n: usize) -> HashMap<Vec<&str>, usize> {
    let mut counts = HashMap::new();
    if tokens.len() >= n {
        for window in tokens.windows(n) {
            let key: Vec<&str> = window.iter().map(|t| t.as_ref()).collect();
            *counts.entry(key).or_insert(0) += 1;
        }
    }
    counts
}

/// Compute BLEU statistics for a single hypothesis/reference pair.
///
/// Matches are clipped: a hypothesis n-gram is credited at most as many
/// times as it occurs in the reference.
pub fn bleu_stats<S: AsRef<str>, T: AsRef<str>>(hypothesis: &[S], reference: &[T]) -> BleuStats {
    let mut stats = BleuStats {
        hyp_len: hypothesis.len(),
        ref_len: reference.len(),
        ..Default::default()
    };

    for n in 1..=MAX_NGRAM {
        let hyp_ngrams = extract_ngrams(hypothesis, n);
        let ref_ngrams = extract_ngrams(reference, n);

        stats.matches[n - 1] = hyp_ngrams
            .iter()
            .map(|(ngram, &count)| count.min(ref_ngrams.get(ngram).copied().unwrap_or(0)))
            .sum();
        stats.totals[n - 1] = (hypothesis.len() + 1).saturating_sub(n);
    }

    stats
}

/// Compute BLEU in [0, 1] from aggregated statistics.
///
/// Unsmoothed: any zero statistic (including a zero match count at a
/// single order) yields 0.
pub fn bleu(stats: &BleuStats) -> f64 {
    if stats.has_zero() {
        return 0.0;
    }

    let log_precision = stats
        .matches
        .iter()
        .zip(stats.totals.iter())
        .map(|(&m, &t)| (m as f64 / t as f64).ln())
        .sum::<f64>()
        / MAX_NGRAM as f64;

    let log_brevity = f64::min(0.0, 1.0 - stats.ref_len as f64 / stats.hyp_len as f64);

    (log_brevity + log_precision).exp()
}

/// Sum per-pair statistics over a corpus. Extra items on the longer side
/// are ignored.
pub fn corpus_stats<S: AsRef<str>, T: AsRef<str>>(
    hypotheses: &[Vec<S>],
    references: &[Vec<T>],
) -> BleuStats {
    hypotheses
        .iter()
        .zip(references)
        .fold(BleuStats::default(), |acc, (hyp, reference)| {
            acc + bleu_stats(hyp.as_slice(), reference.as_slice())
        })
}

/// Corpus BLEU scaled to [0, 100].
pub fn get_bleu<S: AsRef<str>, T: AsRef<str>>(hypotheses: &[Vec<S>], references: &[Vec<T>]) -> f64 {
    100.0 * bleu(&corpus_stats(hypotheses, references))
}
