//! Human-readable BLEU breakdown

use super::bleu::{bleu, BleuStats, MAX_NGRAM};
use serde::Serialize;
use std::fmt;

/// Corpus BLEU with the quantities it is built from.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BleuReport {
    /// BLEU in [0, 100]
    pub score: f64,
    /// Modified precision per order in [0, 100]
    pub precisions: [f64; MAX_NGRAM],
    /// Brevity penalty in [0, 1]
    pub brevity_penalty: f64,
    /// Hypothesis length over reference length
    pub ratio: f64,
    pub hyp_len: usize,
    pub ref_len: usize,
}

impl BleuReport {
    /// Build a report from aggregated statistics.
    pub fn from_stats(stats: &BleuStats) -> Self {
        let mut precisions = [0.0; MAX_NGRAM];
        for (p, (&m, &t)) in precisions
            .iter_mut()
            .zip(stats.matches.iter().zip(stats.totals.iter()))
        {
            if t > 0 {
                *p = 100.0 * m as f64 / t as f64;
            }
        }

        let brevity_penalty = if stats.hyp_len == 0 {
            0.0
        } else {
            f64::min(0.0, 1.0 - stats.ref_len as f64 / stats.hyp_len as f64).exp()
        };

        let ratio = if stats.ref_len == 0 {
            0.0
        } else {
            stats.hyp_len as f64 / stats.ref_len as f64
        };

        Self {
            score: 100.0 * bleu(stats),
            precisions,
            brevity_penalty,
            ratio,
            hyp_len: stats.hyp_len,
            ref_len: stats.ref_len,
        }
    }
}

impl fmt::Display for BleuReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precisions: Vec<String> = self.precisions.iter().map(|p| format!("{p:.1}")).collect();
        write!(
            f,
            "BLEU = {:.2}, {} (BP={:.3}, ratio={:.3}, hyp_len={}, ref_len={})",
            self.score,
            precisions.join("/"),
            self.brevity_penalty,
            self.ratio,
            self.hyp_len,
            self.ref_len
        )
    }
}
