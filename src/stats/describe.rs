//! Descriptive Statistics
//!
//! NaN values count as missing and are left out of every statistic.
//! With no values left, everything but `count` is NaN; with one value the
//! standard deviation is NaN because it uses the sample denominator n-1.
//!
//! Percentiles interpolate linearly between order statistics: the q-th
//! quantile of sorted values x sits at position h = (n-1)q and equals
//! x[⌊h⌋] + (h - ⌊h⌋)(x[⌊h⌋+1] - x[⌊h⌋]).

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::embedding::PointCloud;
use crate::error::SummaryError;

/// Eight-number summary of one column
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

impl DescriptiveStats {
    /// Summary of an empty column
    pub fn empty() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            p25: f64::NAN,
            p50: f64::NAN,
            p75: f64::NAN,
            max: f64::NAN,
        }
    }

    /// Row labels in `describe()` order
    pub const ROW_LABELS: [&'static str; 8] =
        ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

    /// Values in `describe()` order, paired with their row labels
    pub fn rows(&self) -> [(&'static str, f64); 8] {
        let values = [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.p25,
            self.p50,
            self.p75,
            self.max,
        ];
        std::array::from_fn(|i| (Self::ROW_LABELS[i], values[i]))
    }
}

/// Linear-interpolation quantile of already sorted, non-empty values
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let frac = h - lo as f64;
    if frac == 0.0 {
        sorted[lo]
    } else {
        sorted[lo] + frac * (sorted[hi] - sorted[lo])
    }
}

/// Summarize any stream of values
pub fn summarize_values<I>(values: I) -> DescriptiveStats
where
    I: IntoIterator<Item = f64>,
{
    let mut sorted: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return DescriptiveStats::empty();
    }
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let std = if n < 2 {
        f64::NAN
    } else {
        let ss: f64 = sorted.iter().map(|x| (x - mean).powi(2)).sum();
        (ss / (n - 1) as f64).sqrt()
    };

    DescriptiveStats {
        count: n,
        mean,
        std,
        min: sorted[0],
        p25: quantile(&sorted, 0.25),
        p50: quantile(&sorted, 0.5),
        p75: quantile(&sorted, 0.75),
        max: sorted[n - 1],
    }
}

/// Summarize a flat sequence
pub fn summarize(data: &[f64]) -> DescriptiveStats {
    summarize_values(data.iter().copied())
}

/// Per-column summaries in column order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnSummary {
    columns: Vec<(String, DescriptiveStats)>,
}

impl ColumnSummary {
    pub fn get(&self, label: &str) -> Option<&DescriptiveStats> {
        self.columns
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, stats)| stats)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DescriptiveStats)> {
        self.columns.iter().map(|(l, s)| (l.as_str(), s))
    }
}

impl Serialize for ColumnSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (label, stats) in &self.columns {
            map.serialize_entry(label, stats)?;
        }
        map.end()
    }
}

/// Default labels `dim_1..dim_d` for a d-dimensional embedding
pub fn column_labels(dimension: usize) -> Vec<String> {
    (1..=dimension).map(|k| format!("dim_{k}")).collect()
}

/// Summarize each coordinate of a point cloud under the given labels
pub fn summarize_labelled(
    cloud: &PointCloud,
    labels: &[String],
) -> Result<ColumnSummary, SummaryError> {
    if labels.len() != cloud.dimension() {
        return Err(SummaryError::ColumnLabelMismatch {
            labels: labels.len(),
            columns: cloud.dimension(),
        });
    }
    let columns = labels
        .iter()
        .zip(cloud.columns())
        .map(|(label, column)| (label.clone(), summarize_values(column.iter().copied())))
        .collect();
    Ok(ColumnSummary { columns })
}

/// Summarize each coordinate of a point cloud as `dim_1..dim_d`
pub fn summarize_columns(cloud: &PointCloud) -> Result<ColumnSummary, SummaryError> {
    summarize_labelled(cloud, &column_labels(cloud.dimension()))
}
