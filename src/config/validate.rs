//! Configuration validation.
//!
//! Catches unusable settings before any batch is decoded.

use super::spec::{DataSpec, EvalSpec};
use crate::error::{EvalError, Result};

/// Validates an [`EvalSpec`].
pub struct ConfigValidator;

impl ConfigValidator {
    /// Returns `Ok(())` if valid, or an error with an actionable suggestion.
    pub fn validate(spec: &EvalSpec) -> Result<()> {
        Self::validate_data(&spec.data)
    }

    fn validate_data(data: &DataSpec) -> Result<()> {
        if data.batch_size == 0 {
            return Err(EvalError::ConfigValue {
                field: "data.batch_size".into(),
                message: "Batch size must be positive".into(),
                suggestion: "Use a batch size like 64; smaller values decode fewer sentences per step"
                    .into(),
            });
        }

        if data.max_src_length == 0 {
            return Err(EvalError::ConfigValue {
                field: "data.max_src_length".into(),
                message: "Maximum length must be positive".into(),
                suggestion: "Use a length at least as long as typical sentences (e.g. 50)".into(),
            });
        }

        Ok(())
    }
}
