//! Error taxonomy for the analysis pipeline.
//!
//! Every per-file failure maps to one [`ErrorKind`], so batch reports can
//! attribute each skipped file to a specific cause.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::pipeline::Stage;

/// Failure to obtain a waveform from an external source
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("time and amplitude lengths differ ({time} vs {amplitude})")]
    LengthMismatch { time: usize, amplitude: usize },

    #[error("waveform contains no samples")]
    Empty,
}

/// Failure to build a delay embedding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmbeddingError {
    #[error(
        "series of length {len} is too short for dimension {dimension} and delay {delay}"
    )]
    InsufficientLength {
        len: usize,
        dimension: usize,
        delay: usize,
    },

    #[error("invalid embedding parameters: {0}")]
    InvalidParameters(String),

    #[error("cannot embed an empty series")]
    EmptySeries,
}

/// Failure inside the homology engine or its backend
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HomologyComputeError {
    #[error("point cloud has no points")]
    EmptyCloud,

    #[error("point cloud has zero-width points")]
    ZeroDimension,

    #[error("non-finite coordinate at point {point}, coordinate {coordinate}")]
    NonFiniteCoordinate { point: usize, coordinate: usize },

    #[error("point cloud has {points} points, limit is {limit}")]
    TooManyPoints { points: usize, limit: usize },

    #[error("distance between points {first} and {second} is not finite")]
    DistanceOverflow { first: usize, second: usize },

    #[error("homology backend failed: {0}")]
    Backend(String),
}

/// Reserved for column shapes that cannot be summarized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummaryError {
    #[error("{labels} labels supplied for {columns} columns")]
    ColumnLabelMismatch { labels: usize, columns: usize },
}

/// Any failure of a single-file analysis
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Homology(#[from] HomologyComputeError),

    #[error(transparent)]
    Summary(#[from] SummaryError),
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::Load(_) => ErrorKind::Load,
            AnalysisError::Embedding(_) => ErrorKind::Embedding,
            AnalysisError::Homology(_) => ErrorKind::HomologyCompute,
            AnalysisError::Summary(_) => ErrorKind::Summary,
        }
    }

    /// The stage the pipeline was trying to reach when it failed
    pub fn failed_stage(&self) -> Stage {
        match self {
            AnalysisError::Load(_) => Stage::Loaded,
            AnalysisError::Embedding(_) => Stage::Embedded,
            AnalysisError::Homology(_) => Stage::HomologyComputed,
            AnalysisError::Summary(_) => Stage::Summarized,
        }
    }
}

/// Discriminant of [`AnalysisError`], used to attribute skipped files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ErrorKind {
    Load,
    Embedding,
    HomologyCompute,
    Summary,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Load => "LoadError",
            ErrorKind::Embedding => "EmbeddingError",
            ErrorKind::HomologyCompute => "HomologyComputeError",
            ErrorKind::Summary => "SummaryError",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_stage() {
        let err = AnalysisError::from(EmbeddingError::InsufficientLength {
            len: 5,
            dimension: 3,
            delay: 3,
        });
        assert_eq!(err.kind(), ErrorKind::Embedding);
        assert_eq!(err.failed_stage(), Stage::Embedded);
        assert!(err.to_string().contains("length 5"));

        let err = AnalysisError::from(HomologyComputeError::EmptyCloud);
        assert_eq!(err.kind(), ErrorKind::HomologyCompute);
        assert_eq!(err.kind().to_string(), "HomologyComputeError");
    }
}
