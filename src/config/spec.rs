//! Evaluation spec loaded from YAML

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::data::Corpus;
use crate::error::{EvalError, Result};
use crate::eval::Metric;

/// Complete evaluation configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalSpec {
    /// Batching and corpus locations
    #[serde(default)]
    pub data: DataSpec,
    /// Scoring options
    #[serde(default)]
    pub eval: EvalOptions,
}

impl EvalSpec {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(EvalError::ConfigNotFound { path: path.to_path_buf() });
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| EvalError::io(format!("reading config file: {}", path.display()), e))?;

        Self::from_yaml(&content, path)
    }

    /// Parse configuration from YAML string.
    pub fn from_yaml(content: &str, path: &Path) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| EvalError::ConfigParsing {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Data section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSpec {
    /// Sentences per decode batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Cap on decoding steps and on sentence truncation
    #[serde(default = "default_max_src_length")]
    pub max_src_length: usize,
    /// Source-side validation corpus
    #[serde(default)]
    pub src: Option<PathBuf>,
    /// Target-side validation corpus
    #[serde(default)]
    pub trg: Option<PathBuf>,
}

impl Default for DataSpec {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            max_src_length: default_max_src_length(),
            src: None,
            trg: None,
        }
    }
}

impl DataSpec {
    /// Load the source and target validation corpora named by `src` and `trg`.
    ///
    /// # Errors
    ///
    /// Fails with [`EvalError::ConfigValue`] if either path is unset, and
    /// with an IO error if a file cannot be read.
    pub fn load_corpora(&self) -> Result<(Corpus, Corpus)> {
        let src = corpus_path(self.src.as_deref(), "data.src")?;
        let trg = corpus_path(self.trg.as_deref(), "data.trg")?;
        Ok((Corpus::from_file(src)?, Corpus::from_file(trg)?))
    }

    /// Whether either corpus path is configured.
    pub fn has_corpora(&self) -> bool {
        self.src.is_some() || self.trg.is_some()
    }
}

fn corpus_path<'a>(path: Option<&'a Path>, field: &str) -> Result<&'a Path> {
    path.ok_or_else(|| EvalError::ConfigValue {
        field: field.to_string(),
        message: "Corpus path is not set".into(),
        suggestion: format!("Add {field} pointing at a text file with one sentence per line"),
    })
}

fn default_batch_size() -> usize {
    64
}

fn default_max_src_length() -> usize {
    50
}

/// Eval section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalOptions {
    #[serde(default)]
    pub metric: Metric,
    /// Print every prediction and reference
    #[serde(default = "bool_true")]
    pub verbose: bool,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self { metric: Metric::default(), verbose: true }
    }
}

fn bool_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full_spec() {
        let yaml = r#"
data:
  batch_size: 32
  max_src_length: 40
  src: val.en
  trg: val.de
eval:
  metric: bleu
  verbose: false
"#;
        let spec = EvalSpec::from_yaml(yaml, Path::new("eval.yaml")).unwrap();
        assert_eq!(spec.data.batch_size, 32);
        assert_eq!(spec.data.max_src_length, 40);
        assert_eq!(spec.data.src, Some(PathBuf::from("val.en")));
        assert_eq!(spec.eval.metric, Metric::Bleu);
        assert!(!spec.eval.verbose);
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let spec = EvalSpec::from_yaml("data:\n  batch_size: 8\n", Path::new("e.yaml")).unwrap();
        assert_eq!(spec.data.batch_size, 8);
        assert_eq!(spec.data.max_src_length, 50);
        assert_eq!(spec.eval.metric, Metric::Accuracy);
        assert!(spec.eval.verbose);
    }

    #[test]
    fn test_invalid_yaml_reports_path() {
        let err = EvalSpec::from_yaml("data: [", Path::new("broken.yaml")).unwrap_err();
        assert!(matches!(err, EvalError::ConfigParsing { .. }));
        assert!(err.to_string().contains("broken.yaml"));
    }

    #[test]
    fn test_unknown_metric_rejected() {
        let err = EvalSpec::from_yaml("eval:\n  metric: rouge\n", Path::new("e.yaml")).unwrap_err();
        assert!(matches!(err, EvalError::ConfigParsing { .. }));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "data:\n  batch_size: 16\n  max_src_length: 20").unwrap();
        let spec = EvalSpec::from_file(file.path()).unwrap();
        assert_eq!(spec.data.batch_size, 16);
    }

    #[test]
    fn test_load_corpora() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("val.src");
        let trg = dir.path().join("val.trg");
        std::fs::write(&src, "a b\nc d e\n").unwrap();
        std::fs::write(&trg, "x y\nz\n").unwrap();

        let data = DataSpec { src: Some(src), trg: Some(trg), ..Default::default() };
        let (src_corpus, trg_corpus) = data.load_corpora().unwrap();
        assert_eq!(src_corpus.len(), 2);
        assert_eq!(src_corpus.lines()[1], vec!["c", "d", "e"]);
        assert_eq!(trg_corpus.lines()[1], vec!["z"]);
    }

    #[test]
    fn test_load_corpora_requires_both_paths() {
        let data = DataSpec { src: Some(PathBuf::from("val.src")), ..Default::default() };
        assert!(data.has_corpora());
        let err = data.load_corpora().unwrap_err();
        assert!(matches!(err, EvalError::ConfigValue { ref field, .. } if field == "data.trg"));
        assert!(!DataSpec::default().has_corpora());
    }

    #[test]
    fn test_load_corpora_missing_file() {
        let data = DataSpec {
            src: Some(PathBuf::from("/nonexistent/val.src")),
            trg: Some(PathBuf::from("/nonexistent/val.trg")),
            ..Default::default()
        };
        assert!(matches!(data.load_corpora(), Err(EvalError::Io { .. })));
    }

    #[test]
    fn test_missing_file() {
        let err = EvalSpec::from_file("/nonexistent/eval.yaml").unwrap_err();
        assert!(matches!(err, EvalError::ConfigNotFound { .. }));
    }
}
