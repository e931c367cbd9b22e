//! Translation quality metrics
//!
//! - `bleu`: n-gram statistics and corpus BLEU-4 (unsmoothed)
//! - `accuracy`: exact full-sequence match rate
//! - `report`: per-order precision and brevity penalty breakdown
//! - `metric`: which scorer the evaluator routes to

pub mod accuracy;
pub mod bleu;
pub mod metric;
pub mod report;


pub use accuracy::compute_accuracy;
pub use bleu::{bleu, bleu_stats, corpus_stats, get_bleu, BleuStats, MAX_NGRAM};
pub use metric::Metric;
pub use report::BleuReport;
