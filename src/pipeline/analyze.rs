//! Single-file analysis: embed, compute homology, summarize

use log::debug;
use serde::Serialize;
use std::fmt;

use crate::config::AnalysisConfig;
use crate::embedding::{embed, EmbeddingParameters};
use crate::error::AnalysisError;
use crate::signal::WaveformSample;
use crate::stats::{summarize, summarize_columns, ColumnSummary, DescriptiveStats};
use crate::topology::{HomologyEngine, PersistenceBackend, PersistenceDiagramSet, VietorisRips};

/// Progress of one analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Stage {
    Loaded,
    Embedded,
    HomologyComputed,
    Summarized,
    Done,
    /// Absorbing failure state
    Error,
}

impl Stage {
    /// The stage after this one on the success path
    pub fn next(self) -> Stage {
        match self {
            Stage::Loaded => Stage::Embedded,
            Stage::Embedded => Stage::HomologyComputed,
            Stage::HomologyComputed => Stage::Summarized,
            Stage::Summarized => Stage::Done,
            Stage::Done => Stage::Done,
            Stage::Error => Stage::Error,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Loaded => "LOADED",
            Stage::Embedded => "EMBEDDED",
            Stage::HomologyComputed => "HOMOLOGY_COMPUTED",
            Stage::Summarized => "SUMMARIZED",
            Stage::Done => "DONE",
            Stage::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// Everything derived from one waveform
///
/// Owned entirely by the caller; nothing in the pipeline keeps a reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub diagrams: PersistenceDiagramSet,
    /// Summary of the raw amplitude
    pub raw_stats: DescriptiveStats,
    /// Summary of the sample times
    pub time_stats: DescriptiveStats,
    /// One entry per embedded coordinate, `dim_1..dim_d`
    pub embedded_stats: ColumnSummary,
}

/// Embedding parameters plus a configured homology engine
#[derive(Debug, Clone)]
pub struct Analyzer<B = VietorisRips> {
    params: EmbeddingParameters,
    engine: HomologyEngine<B>,
}

impl Analyzer<VietorisRips> {
    pub fn new(params: EmbeddingParameters) -> Self {
        Self::with_engine(params, HomologyEngine::new())
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        let engine = HomologyEngine::new()
            .max_degree(config.max_degree)
            .max_points(config.max_points);
        Self::with_engine(config.embedding, engine)
    }
}

impl<B: PersistenceBackend> Analyzer<B> {
    pub fn with_engine(params: EmbeddingParameters, engine: HomologyEngine<B>) -> Self {
        Self { params, engine }
    }

    pub fn params(&self) -> EmbeddingParameters {
        self.params
    }

    pub fn engine(&self) -> &HomologyEngine<B> {
        &self.engine
    }

    /// Run the full pipeline on one waveform
    pub fn analyze(&self, sample: &WaveformSample) -> Result<AnalysisResult, AnalysisError> {
        let mut stage = Stage::Loaded;
        match self.run(sample, &mut stage) {
            Ok(result) => Ok(result),
            Err(e) => {
                debug!("{} -> {}: {}", stage, Stage::Error, e);
                Err(e)
            }
        }
    }

    fn run(
        &self,
        sample: &WaveformSample,
        stage: &mut Stage,
    ) -> Result<AnalysisResult, AnalysisError> {
        let cloud = embed(
            sample.amplitude(),
            self.params.dimension(),
            self.params.delay(),
        )?;
        advance(stage);

        let diagrams = self.engine.compute_persistence(&cloud)?;
        advance(stage);

        let raw_stats = summarize(sample.amplitude());
        let time_stats = summarize(sample.time());
        let embedded_stats = summarize_columns(&cloud)?;
        advance(stage);

        let result = AnalysisResult {
            diagrams,
            raw_stats,
            time_stats,
            embedded_stats,
        };
        advance(stage);
        Ok(result)
    }
}

fn advance(stage: &mut Stage) {
    let next = stage.next();
    debug!("{} -> {}", stage, next);
    *stage = next;
}

/// Analyze one waveform with the default homology engine
pub fn analyze(
    sample: &WaveformSample,
    params: EmbeddingParameters,
) -> Result<AnalysisResult, AnalysisError> {
    Analyzer::new(params).analyze(sample)
}
