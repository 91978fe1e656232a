//! # waveform-tda
//!
//! Topological fingerprints of pressure waveforms via delay embedding
//! and persistent homology.
//!
//! ## Pipeline
//!
//! 1. **Delay embedding**: a scalar trace s(t) becomes the point cloud
//!    x(t) = (s(t), s(t+τ), ..., s(t+(d-1)τ)), which by Takens' theorem
//!    reconstructs the shape of the underlying attractor
//!
//! 2. **Persistent homology**: the Vietoris-Rips filtration of that cloud
//!    yields birth/death pairs for connected components (H0) and loops
//!    (H1). A clean oscillation shows up as a single long-lived loop
//!
//! 3. **Descriptive statistics**: count, mean, std, min, quartiles and
//!    max of the raw trace and of every embedded coordinate, so results
//!    from different shots can be compared
//!
//! ## Example
//!
//! ```
//! use waveform_tda::{analyze, EmbeddingParameters, SyntheticTrace};
//!
//! let sample = SyntheticTrace::new(120).dt(0.01).frequency(2.0).generate();
//! let params = EmbeddingParameters::new(3, 10).unwrap();
//! let result = analyze(&sample, params).unwrap();
//!
//! assert_eq!(result.embedded_stats.len(), 3);
//! assert_eq!(result.diagrams.degree(0).unwrap().essential_count(), 1);
//! ```
//!
//! Decoding binary scope files, plotting and directory traversal are left
//! to callers; the [`io`] module holds plain-text adapters for them.
//!
//! ## References
//!
//! - Takens, "Detecting strange attractors in turbulence" (1981)
//! - Edelsbrunner & Harer, "Computational Topology" (2010)
//! - Bauer, "Ripser: efficient computation of Vietoris-Rips persistence
//!   barcodes" (2021)

pub mod config;
pub mod embedding;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod signal;
pub mod stats;
pub mod topology;

pub use config::{AnalysisConfig, ConfigError};

pub use embedding::{embed, EmbeddingParameters, PointCloud};

pub use error::{
    AnalysisError, EmbeddingError, ErrorKind, HomologyComputeError, LoadError, SummaryError,
};

pub use topology::{
    compute_persistence, HomologyEngine, PersistenceBackend, PersistenceDiagram,
    PersistenceDiagramSet, PersistencePair, VietorisRips,
};

pub use stats::{summarize, summarize_columns, ColumnSummary, DescriptiveStats};

pub use pipeline::{
    analyze, analyze_file, run_batch, AnalysisResult, Analyzer, BatchReport, FileOutcome,
    FileReport, Stage,
};

pub use signal::{SyntheticTrace, WaveformSample};

pub use io::{find_waveform_files, ResultWriter, TextWaveformSource, WaveformSource};
