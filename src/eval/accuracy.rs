//! Exact-match sequence accuracy

use crate::error::{EvalError, Result};

fn surface<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens.iter().map(|t| t.as_ref()).collect::<Vec<&str>>().join(" ")
}

/// Percentage of predictions whose space-joined surface form equals the gold one.
///
/// Pairs are zipped; the denominator is `preds.len()`.
///
/// # Errors
///
/// Returns [`EvalError::EmptyPredictions`] if `preds` is empty.
pub fn compute_accuracy<S: AsRef<str>, T: AsRef<str>>(
    preds: &[Vec<S>],
    golds: &[Vec<T>],
) -> Result<f64> {
    if preds.is_empty() {
        return Err(EvalError::EmptyPredictions);
    }

    let equal = preds
        .iter()
        .zip(golds)
        .filter(|(pred, gold)| surface(pred.as_slice()) == surface(gold.as_slice()))
        .count();

    Ok(equal as f64 / preds.len() as f64 * 100.0)
}
