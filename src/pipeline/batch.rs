//! Batch analysis over many files with per-file isolation

use log::{info, warn};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::analyze::{AnalysisResult, Analyzer};
use crate::error::{AnalysisError, ErrorKind};
use crate::io::WaveformSource;
use crate::topology::PersistenceBackend;

/// What happened to one file
#[derive(Debug)]
pub enum FileOutcome {
    Succeeded(AnalysisResult),
    Skipped { kind: ErrorKind, message: String },
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FileOutcome::Succeeded(_))
    }
}

impl From<Result<AnalysisResult, AnalysisError>> for FileOutcome {
    fn from(result: Result<AnalysisResult, AnalysisError>) -> Self {
        match result {
            Ok(result) => FileOutcome::Succeeded(result),
            Err(e) => FileOutcome::Skipped {
                kind: e.kind(),
                message: e.to_string(),
            },
        }
    }
}

#[derive(Debug)]
pub struct FileReport {
    pub file: PathBuf,
    pub outcome: FileOutcome,
}

/// Outcomes of a batch, in input order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn succeeded(&self) -> impl Iterator<Item = (&Path, &AnalysisResult)> {
        self.files.iter().filter_map(|r| match &r.outcome {
            FileOutcome::Succeeded(result) => Some((r.file.as_path(), result)),
            FileOutcome::Skipped { .. } => None,
        })
    }

    pub fn skipped(&self) -> impl Iterator<Item = (&Path, ErrorKind, &str)> {
        self.files.iter().filter_map(|r| match &r.outcome {
            FileOutcome::Skipped { kind, message } => {
                Some((r.file.as_path(), *kind, message.as_str()))
            }
            FileOutcome::Succeeded(_) => None,
        })
    }

    pub fn succeeded_count(&self) -> usize {
        self.files.iter().filter(|r| r.outcome.is_success()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.len() - self.succeeded_count()
    }

    /// Number of skipped files per error kind
    pub fn skips_by_kind(&self) -> BTreeMap<ErrorKind, usize> {
        let mut counts = BTreeMap::new();
        for (_, kind, _) in self.skipped() {
            *counts.entry(kind).or_insert(0) += 1;
        }
        counts
    }
}

/// Load and analyze a single file
pub fn analyze_file<S, B>(
    file: &Path,
    source: &S,
    sparse: Option<usize>,
    analyzer: &Analyzer<B>,
) -> Result<AnalysisResult, AnalysisError>
where
    S: WaveformSource + ?Sized,
    B: PersistenceBackend,
{
    let sample = source.load(file, sparse)?;
    analyzer.analyze(&sample)
}

/// Analyze every file independently, in parallel
///
/// A failure in one file is recorded as a skip and never affects the
/// others. The report lists files in the order given.
pub fn run_batch<S, B>(
    files: &[PathBuf],
    source: &S,
    sparse: Option<usize>,
    analyzer: &Analyzer<B>,
) -> BatchReport
where
    S: WaveformSource + ?Sized,
    B: PersistenceBackend,
{
    let files: Vec<FileReport> = files
        .par_iter()
        .map(|file| {
            let result = analyze_file(file, source, sparse, analyzer);
            match &result {
                Ok(r) => info!(
                    "Analyzed {}: {} persistence pairs",
                    file.display(),
                    r.diagrams.total_pairs()
                ),
                Err(e) => warn!("Skipping {} ({}): {}", file.display(), e.kind(), e),
            }
            FileReport {
                file: file.clone(),
                outcome: result.into(),
            }
        })
        .collect();

    BatchReport { files }
}
