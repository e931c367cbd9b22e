//! Translation quality evaluation for sequence-to-sequence models.
//!
//! - **Metrics**: corpus BLEU-4 from clipped n-gram statistics, exact-match accuracy
//! - **Decoding**: fixed-length greedy decoding over a validation set
//! - **Data**: corpus loading, word vocabulary, padded minibatches
//!
//! # Example
//!
//! ```
//! use nmt_eval::eval::{bleu, bleu_stats, get_bleu};
//!
//! let hyp: Vec<String> = "the cat sat on the mat".split(' ').map(String::from).collect();
//! let stats = bleu_stats(&hyp, &hyp);
//! assert!((bleu(&stats) - 1.0).abs() < 1e-12);
//! assert!((get_bleu(&[hyp.clone()], &[hyp]) - 100.0).abs() < 1e-9);
//! ```

pub mod cli;
pub mod config;
pub mod data;
pub mod decode;
pub mod error;
pub mod eval;

pub use config::{ConfigValidator, EvalSpec};
pub use data::{Corpus, TokenId, Vocab};
pub use decode::{EvalOutcome, Evaluator, GreedyDecoder, Seq2SeqModel};
pub use error::{EvalError, Result};
pub use eval::{compute_accuracy, get_bleu, BleuReport, BleuStats, Metric};
