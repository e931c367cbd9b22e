//! Error types with actionable diagnostics.
//!
//! Every variant carries enough context to fix the problem without
//! reading the source: the offending field, path, or shape, plus a hint.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for evaluation operations.
pub type Result<T> = std::result::Result<T, EvalError>;

/// Errors raised while loading data, decoding, or scoring.
#[derive(Error, Debug)]
pub enum EvalError {
    /// Configuration file not found at expected path.
    #[error("Configuration file not found: {path}\n  → Create a config file or pass a different path")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file has invalid syntax.
    #[error("Invalid configuration syntax in {path}:\n  {message}\n  → Check YAML syntax at the indicated line")]
    ConfigParsing { path: PathBuf, message: String },

    /// Configuration value is invalid.
    #[error("Invalid configuration value for '{field}': {message}\n  → {suggestion}")]
    ConfigValue { field: String, message: String, suggestion: String },

    /// Accuracy was requested over zero predictions.
    #[error("Cannot score an empty prediction set\n  → Ensure the validation set holds at least one full batch")]
    EmptyPredictions,

    /// Unknown metric name.
    #[error("Unknown metric: {name}\n  → Supported metrics: bleu, accuracy")]
    UnknownMetric { name: String },

    /// Vocabulary lacks a reserved token.
    #[error("Vocabulary is missing reserved token '{token}'\n  → Add {token} to the word-to-id map")]
    MissingSpecialToken { token: String },

    /// Word-to-id map whose ids are not a dense, unique `0..len` range.
    #[error("Invalid vocabulary entry '{word}' with id {id}: {message}\n  → Ids must be unique and cover 0..vocab_size with no gaps")]
    InvalidVocab { word: String, id: u32, message: String },

    /// Token id outside the vocabulary.
    #[error("Token id {id} is out of range for vocabulary of size {vocab_size}\n  → Check that the model and vocabulary were built together")]
    InvalidTokenId { id: u32, vocab_size: usize },

    /// Model output does not have the expected shape.
    #[error("Tensor shape mismatch: expected {expected:?}, got {actual:?}\n  → Check that the model returns [batch, target_len, vocab] scores")]
    ShapeMismatch { expected: Vec<usize>, actual: Vec<usize> },

    /// Model forward pass failed.
    #[error("Model forward pass failed: {message}")]
    Model { message: String },

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl EvalError {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    /// Check if this error is user-recoverable.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. }
                | Self::ConfigParsing { .. }
                | Self::ConfigValue { .. }
                | Self::EmptyPredictions
                | Self::UnknownMetric { .. }
                | Self::MissingSpecialToken { .. }
                | Self::InvalidVocab { .. }
        )
    }

    /// Get the error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigNotFound { .. } => "E001",
            Self::ConfigParsing { .. } => "E002",
            Self::ConfigValue { .. } => "E003",
            Self::EmptyPredictions => "E010",
            Self::UnknownMetric { .. } => "E011",
            Self::MissingSpecialToken { .. } => "E020",
            Self::InvalidTokenId { .. } => "E021",
            Self::InvalidVocab { .. } => "E022",
            Self::ShapeMismatch { .. } => "E040",
            Self::Model { .. } => "E041",
            Self::Io { .. } => "E050",
            Self::Serialization { .. } => "E051",
        }
    }
}
