//! Takens Delay Embedding
//!
//! Point j of the embedding is
//!
//!   (s[j], s[j+τ], s[j+2τ], ..., s[j+(d-1)τ])
//!
//! for j in 0..m, where m = n - (d-1)τ. The embedding fails when m ≤ 0;
//! that case is detected arithmetically before any allocation.

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::EmbeddingError;

/// Embedding dimension and delay supplied by the caller
///
/// Always validated: `dimension ≥ 2` and `delay ≥ 1`. The defaults
/// (3, 10) are the values the pressure analysis has been run with so far,
/// not tuned constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawParameters")]
pub struct EmbeddingParameters {
    dimension: usize,
    delay: usize,
}

#[derive(Deserialize)]
struct RawParameters {
    dimension: usize,
    delay: usize,
}

impl TryFrom<RawParameters> for EmbeddingParameters {
    type Error = EmbeddingError;

    fn try_from(raw: RawParameters) -> Result<Self, Self::Error> {
        Self::new(raw.dimension, raw.delay)
    }
}

impl EmbeddingParameters {
    pub const DEFAULT_DIMENSION: usize = 3;
    pub const DEFAULT_DELAY: usize = 10;

    pub fn new(dimension: usize, delay: usize) -> Result<Self, EmbeddingError> {
        if dimension < 2 {
            return Err(EmbeddingError::InvalidParameters(format!(
                "dimension must be at least 2, got {dimension}"
            )));
        }
        if delay < 1 {
            return Err(EmbeddingError::InvalidParameters(
                "delay must be at least 1".to_string(),
            ));
        }
        Ok(Self { dimension, delay })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn delay(&self) -> usize {
        self.delay
    }

    /// Number of points an embedding of `len` samples produces, if any
    pub fn output_len(&self, len: usize) -> Option<usize> {
        embedded_len(len, self.dimension, self.delay)
    }
}

impl Default for EmbeddingParameters {
    fn default() -> Self {
        Self {
            dimension: Self::DEFAULT_DIMENSION,
            delay: Self::DEFAULT_DELAY,
        }
    }
}

/// Embedded point cloud: one row per point, one column per coordinate
///
/// Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    points: Array2<f64>,
}

impl PointCloud {
    /// Wrap an existing matrix of points, rejecting an empty one
    pub fn from_array(points: Array2<f64>) -> Option<Self> {
        if points.nrows() == 0 {
            None
        } else {
            Some(Self { points })
        }
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.points.nrows() == 0
    }

    /// Number of coordinates per point
    pub fn dimension(&self) -> usize {
        self.points.ncols()
    }

    pub fn point(&self, j: usize) -> ArrayView1<'_, f64> {
        self.points.row(j)
    }

    /// All values of coordinate k, in point order
    pub fn column(&self, k: usize) -> ArrayView1<'_, f64> {
        self.points.column(k)
    }

    pub fn columns(&self) -> impl Iterator<Item = ArrayView1<'_, f64>> {
        self.points.axis_iter(Axis(1))
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.points.view()
    }

    pub fn into_inner(self) -> Array2<f64> {
        self.points
    }
}

fn embedded_len(len: usize, dimension: usize, delay: usize) -> Option<usize> {
    let span = dimension.checked_sub(1)?.checked_mul(delay)?;
    len.checked_sub(span).filter(|&m| m > 0)
}

/// Delay-embed a scalar series
///
/// # Arguments
/// * `series` - Samples s[0..n]
/// * `dimension` - Coordinates per point (≥ 1; 1 reshapes the series)
/// * `delay` - Shift τ in samples between coordinates (≥ 1)
///
/// # Returns
/// * `PointCloud` with exactly n - (dimension-1)·delay points
pub fn embed(series: &[f64], dimension: usize, delay: usize) -> Result<PointCloud, EmbeddingError> {
    if dimension < 1 {
        return Err(EmbeddingError::InvalidParameters(
            "dimension must be at least 1".to_string(),
        ));
    }
    if delay < 1 {
        return Err(EmbeddingError::InvalidParameters(
            "delay must be at least 1".to_string(),
        ));
    }
    if series.is_empty() {
        return Err(EmbeddingError::EmptySeries);
    }

    let m = embedded_len(series.len(), dimension, delay).ok_or(
        EmbeddingError::InsufficientLength {
            len: series.len(),
            dimension,
            delay,
        },
    )?;

    let points = Array2::from_shape_fn((m, dimension), |(j, k)| series[j + k * delay]);
    Ok(PointCloud { points })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    #[test]
    fn test_consecutive_pairs() {
        let cloud = embed(&ramp(10), 2, 1).unwrap();
        assert_eq!(cloud.len(), 9);
        assert_eq!(cloud.dimension(), 2);
        for j in 0..9 {
            assert_eq!(cloud.point(j).to_vec(), vec![j as f64, (j + 1) as f64]);
        }
    }

    #[test]
    fn test_long_delay() {
        let cloud = embed(&ramp(10), 2, 5).unwrap();
        assert_eq!(cloud.len(), 5);
        let expected = [(0.0, 5.0), (1.0, 6.0), (2.0, 7.0), (3.0, 8.0), (4.0, 9.0)];
        for (j, &(a, b)) in expected.iter().enumerate() {
            assert_eq!(cloud.point(j).to_vec(), vec![a, b]);
        }
    }

    #[test]
    fn test_too_short() {
        let err = embed(&ramp(5), 3, 3).unwrap_err();
        assert_eq!(
            err,
            EmbeddingError::InsufficientLength {
                len: 5,
                dimension: 3,
                delay: 3
            }
        );

        // n == (d-1)τ exactly is still too short
        assert!(embed(&ramp(6), 3, 3).is_err());
        assert_eq!(embed(&ramp(7), 3, 3).unwrap().len(), 1);
    }

    #[test]
    fn test_span_overflow_is_insufficient_length() {
        let err = embed(&ramp(4), usize::MAX, 2).unwrap_err();
        assert!(matches!(err, EmbeddingError::InsufficientLength { .. }));
    }

    #[test]
    fn test_success_iff_long_enough() {
        let noisy: Vec<f64> = (0..40).map(|i| ((i * 37) % 11) as f64 * 0.3).collect();
        for n in 1..=noisy.len() {
            let series = &noisy[..n];
            for d in 1..=5 {
                for tau in 1..=6 {
                    let result = embed(series, d, tau);
                    if n > (d - 1) * tau {
                        let cloud = result.unwrap();
                        assert_eq!(cloud.len(), n - (d - 1) * tau);
                        for j in 0..cloud.len() {
                            for k in 0..d {
                                assert_eq!(cloud.point(j)[k], series[j + k * tau]);
                            }
                        }
                    } else {
                        assert!(result.is_err());
                    }
                }
            }
        }
    }

    #[test]
    fn test_dimension_one_is_reshape() {
        let series = vec![3.5, -1.0, 2.25, 0.0];
        let cloud = embed(&series, 1, 7).unwrap();
        assert_eq!(cloud.dimension(), 1);
        assert_eq!(cloud.column(0).to_vec(), series);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            embed(&ramp(10), 0, 1),
            Err(EmbeddingError::InvalidParameters(_))
        ));
        assert!(matches!(
            embed(&ramp(10), 2, 0),
            Err(EmbeddingError::InvalidParameters(_))
        ));
        assert_eq!(embed(&[], 2, 1), Err(EmbeddingError::EmptySeries));
    }

    #[test]
    fn test_parameters() {
        let params = EmbeddingParameters::default();
        assert_eq!((params.dimension(), params.delay()), (3, 10));
        assert_eq!(params.output_len(1000), Some(980));
        assert_eq!(params.output_len(20), None);

        assert!(EmbeddingParameters::new(1, 1).is_err());
        assert!(EmbeddingParameters::new(2, 0).is_err());

        let parsed: EmbeddingParameters =
            serde_json::from_str(r#"{"dimension": 4, "delay": 2}"#).unwrap();
        assert_eq!(parsed, EmbeddingParameters::new(4, 2).unwrap());
        assert!(serde_json::from_str::<EmbeddingParameters>(r#"{"dimension": 1, "delay": 2}"#).is_err());
    }
}
