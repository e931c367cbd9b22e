//! Tokenized sentence corpus

use std::path::Path;

use crate::error::{EvalError, Result};

/// Sentences split on whitespace, one per line of input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    lines: Vec<Vec<String>>,
}

impl Corpus {
    /// Tokenize each line of text.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines = lines
            .into_iter()
            .map(|line| line.as_ref().split_whitespace().map(String::from).collect())
            .collect();
        Self { lines }
    }

    /// Read a UTF-8 text file with one sentence per line.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| EvalError::io(format!("reading corpus: {}", path.display()), e))?;
        Ok(Self::from_lines(content.lines()))
    }

    pub fn lines(&self) -> &[Vec<String>] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_lines(self) -> Vec<Vec<String>> {
        self.lines
    }
}

impl From<Vec<Vec<String>>> for Corpus {
    fn from(lines: Vec<Vec<String>>) -> Self {
        Self { lines }
    }
}
