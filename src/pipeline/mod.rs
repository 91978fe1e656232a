//! Pipeline Module: Per-File Analysis and Batch Orchestration
//!
//! A single analysis walks a fixed sequence of stages
//!
//! ```text
//!   Loaded ──► Embedded ──► HomologyComputed ──► Summarized ──► Done
//!      │           │               │                  │
//!      └───────────┴───────────────┴──────────────────┴──► Error
//! ```
//!
//! and either returns a complete [`AnalysisResult`] or an
//! [`AnalysisError`](crate::error::AnalysisError), never anything partial.
//!
//! Batches run files in parallel. A failing file becomes a skipped entry
//! in the [`BatchReport`] tagged with its error kind; the other files are
//! unaffected.

mod analyze;
mod batch;

pub use analyze::{analyze, AnalysisResult, Analyzer, Stage};
pub use batch::{analyze_file, run_batch, BatchReport, FileOutcome, FileReport};
