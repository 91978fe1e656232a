//! Result Writer
//!
//! Persists one `AnalysisResult` as
//!
//! - `stats/<base>_raw_stats.csv`: describe-style table, `time` and `amplitude` columns
//! - `stats/<base>_embedded_stats.csv`: same rows, one column per coordinate
//! - `diagrams/<base>_diagrams.json`: pairs per degree, `null` for infinite deaths
//!
//! NaN statistics are written as `NaN`.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::pipeline::AnalysisResult;
use crate::stats::DescriptiveStats;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize diagrams: {0}")]
    Json(#[from] serde_json::Error),
}

/// Paths produced for one result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    pub raw_stats: PathBuf,
    pub embedded_stats: PathBuf,
    pub diagrams: PathBuf,
}

/// Writes results below an output root
#[derive(Debug, Clone)]
pub struct ResultWriter {
    stats_dir: PathBuf,
    diagrams_dir: PathBuf,
}

impl ResultWriter {
    /// Create `stats/` and `diagrams/` under `output_root` if missing
    pub fn create(output_root: &Path) -> Result<Self, WriteError> {
        let stats_dir = output_root.join("stats");
        let diagrams_dir = output_root.join("diagrams");
        for dir in [&stats_dir, &diagrams_dir] {
            fs::create_dir_all(dir).map_err(|source| WriteError::Io {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(Self {
            stats_dir,
            diagrams_dir,
        })
    }

    /// Write all files for the trace named `base_name`
    pub fn write(&self, base_name: &str, result: &AnalysisResult) -> Result<WrittenFiles, WriteError> {
        let raw_stats = self.stats_dir.join(format!("{base_name}_raw_stats.csv"));
        let raw_csv = stats_csv(&[
            ("time", &result.time_stats),
            ("amplitude", &result.raw_stats),
        ]);
        write_file(&raw_stats, &raw_csv)?;

        let embedded_stats = self.stats_dir.join(format!("{base_name}_embedded_stats.csv"));
        let columns: Vec<(&str, &DescriptiveStats)> = result.embedded_stats.iter().collect();
        write_file(&embedded_stats, &stats_csv(&columns))?;

        let diagrams = self.diagrams_dir.join(format!("{base_name}_diagrams.json"));
        let json = serde_json::to_string_pretty(&result.diagrams)?;
        write_file(&diagrams, &json)?;

        Ok(WrittenFiles {
            raw_stats,
            embedded_stats,
            diagrams,
        })
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), WriteError> {
    fs::write(path, contents).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Statistic rows by column, first cell of each row is the statistic name
fn stats_csv(columns: &[(&str, &DescriptiveStats)]) -> String {
    let mut out = String::new();
    for (label, _) in columns {
        out.push(',');
        out.push_str(label);
    }
    out.push('\n');

    let rows: Vec<[(&'static str, f64); 8]> = columns.iter().map(|(_, s)| s.rows()).collect();
    for (r, label) in DescriptiveStats::ROW_LABELS.iter().enumerate() {
        out.push_str(label);
        for row in &rows {
            let _ = write!(out, ",{}", row[r].1);
        }
        out.push('\n');
    }
    out
}
