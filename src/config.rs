//! Analysis Configuration
//!
//! Everything a batch run needs lives in one explicit [`AnalysisConfig`]
//! passed to the pipeline: input and output roots, file extension,
//! embedding parameters, sample cap and homology limits. It can be read
//! from a JSON file; fields left out take their defaults.
//!
//! ```json
//! {
//!   "input_root": "/data/raw/pressure",
//!   "output_root": "/data/processed/pressure_analysis",
//!   "embedding": { "dimension": 3, "delay": 10 },
//!   "sparse": 1000
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::embedding::EmbeddingParameters;
use crate::topology::{DEFAULT_MAX_DEGREE, DEFAULT_MAX_POINTS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Paths and parameters for analyzing a directory of traces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Directory scanned for waveform files
    pub input_root: PathBuf,
    /// Directory receiving `stats/` and `diagrams/`
    pub output_root: PathBuf,
    /// Extension of waveform files, without the dot
    pub extension: String,
    pub embedding: EmbeddingParameters,
    /// Maximum samples read per file; `None` reads everything
    pub sparse: Option<usize>,
    /// Highest homology degree computed
    pub max_degree: usize,
    /// Largest embedded point cloud handed to the homology backend
    pub max_points: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input_root: PathBuf::from("data/raw"),
            output_root: PathBuf::from("data/processed"),
            extension: "txt".to_string(),
            embedding: EmbeddingParameters::default(),
            sparse: Some(1000),
            max_degree: DEFAULT_MAX_DEGREE,
            max_points: DEFAULT_MAX_POINTS,
        }
    }
}

impl AnalysisConfig {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn stats_dir(&self) -> PathBuf {
        self.output_root.join("stats")
    }

    pub fn diagrams_dir(&self) -> PathBuf {
        self.output_root.join("diagrams")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.embedding.dimension(), 3);
        assert_eq!(config.embedding.delay(), 10);
        assert_eq!(config.sparse, Some(1000));
        assert_eq!(config.max_degree, 1);
        assert_eq!(config.stats_dir(), PathBuf::from("data/processed/stats"));
    }

    #[test]
    fn test_partial_json() {
        let config = AnalysisConfig::from_json_str(
            r#"{"input_root": "/scope", "embedding": {"dimension": 2, "delay": 5}, "sparse": null}"#,
        )
        .unwrap();
        assert_eq!(config.input_root, PathBuf::from("/scope"));
        assert_eq!(config.embedding, EmbeddingParameters::new(2, 5).unwrap());
        assert_eq!(config.sparse, None);
        assert_eq!(config.extension, "txt");
    }

    #[test]
    fn test_rejects_invalid_embedding() {
        let err = AnalysisConfig::from_json_str(r#"{"embedding": {"dimension": 3, "delay": 0}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("delay"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"output_root": "out", "max_points": 500}}"#).unwrap();

        let config = AnalysisConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.output_root, PathBuf::from("out"));
        assert_eq!(config.max_points, 500);

        let missing = AnalysisConfig::from_json_file(Path::new("/nonexistent/config.json"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}
