//! Stats Module: Descriptive Statistics of Raw and Embedded Signals
//!
//! Mirrors the familiar eight-row `describe()` summary (count, mean, std,
//! min, 25%, 50%, 75%, max) so that results from different files can be
//! compared side by side. The raw amplitude gets one summary; the
//! embedded point cloud gets one per coordinate, labelled `dim_1`,
//! `dim_2`, and so on.

mod describe;

pub use describe::{
    column_labels, summarize, summarize_columns, summarize_labelled, summarize_values,
    ColumnSummary, DescriptiveStats,
};
