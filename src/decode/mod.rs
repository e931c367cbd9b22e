//! Greedy decoding and validation-set evaluation
//!
//! The model is reached only through [`Seq2SeqModel`], so the decoding
//! loop runs the same against a real network or a stub.

mod evaluator;
mod greedy;
mod model;

#[cfg(test)]
mod tests;

pub use evaluator::{format_example, format_length_warning, EvalOutcome, Evaluator};
pub use greedy::{strip_prediction, strip_reference, GreedyDecoder};
pub use model::Seq2SeqModel;
