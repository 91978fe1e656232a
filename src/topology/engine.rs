//! Homology Engine: validated access to a persistence backend
//!
//! The engine owns no topology of its own. It checks that a point cloud
//! is something a backend can digest (finite coordinates, bounded size),
//! hands it over, and returns the backend's diagrams untouched.
//!
//! Backends are deterministic, so a failure is reported once and never
//! retried.

use ndarray::ArrayView2;

use super::diagram::PersistenceDiagramSet;
use super::vietoris_rips::VietorisRips;
use crate::embedding::PointCloud;
use crate::error::HomologyComputeError;

/// Anything that turns a point cloud into persistence diagrams
///
/// `points` has one row per point. Implementations return one diagram
/// per degree in `0..=max_degree`.
pub trait PersistenceBackend: Send + Sync {
    fn compute(
        &self,
        points: ArrayView2<'_, f64>,
        max_degree: usize,
    ) -> Result<PersistenceDiagramSet, HomologyComputeError>;
}

/// Input validation in front of a [`PersistenceBackend`]
#[derive(Debug, Clone)]
pub struct HomologyEngine<B = VietorisRips> {
    backend: B,
    max_degree: usize,
    max_points: usize,
}

/// Degrees 0 and 1, as Ripser computes by default
pub const DEFAULT_MAX_DEGREE: usize = 1;
pub const DEFAULT_MAX_POINTS: usize = 1000;

impl HomologyEngine<VietorisRips> {
    pub fn new() -> Self {
        Self::with_backend(VietorisRips::new())
    }
}

impl Default for HomologyEngine<VietorisRips> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: PersistenceBackend> HomologyEngine<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            max_degree: DEFAULT_MAX_DEGREE,
            max_points: DEFAULT_MAX_POINTS,
        }
    }

    pub fn max_degree(mut self, max_degree: usize) -> Self {
        self.max_degree = max_degree;
        self
    }

    /// Largest point cloud accepted before the backend is invoked
    pub fn max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Compute persistence diagrams of a point cloud
    pub fn compute_persistence(
        &self,
        cloud: &PointCloud,
    ) -> Result<PersistenceDiagramSet, HomologyComputeError> {
        let points = cloud.view();
        self.validate(points)?;
        self.backend.compute(points, self.max_degree)
    }

    fn validate(&self, points: ArrayView2<'_, f64>) -> Result<(), HomologyComputeError> {
        if points.nrows() == 0 {
            return Err(HomologyComputeError::EmptyCloud);
        }
        if points.ncols() == 0 {
            return Err(HomologyComputeError::ZeroDimension);
        }
        if points.nrows() > self.max_points {
            return Err(HomologyComputeError::TooManyPoints {
                points: points.nrows(),
                limit: self.max_points,
            });
        }
        if let Some(((point, coordinate), _)) =
            points.indexed_iter().find(|(_, v)| !v.is_finite())
        {
            return Err(HomologyComputeError::NonFiniteCoordinate { point, coordinate });
        }
        Ok(())
    }
}

/// Persistence diagrams (degrees 0 and 1) with the default engine
pub fn compute_persistence(
    cloud: &PointCloud,
) -> Result<PersistenceDiagramSet, HomologyComputeError> {
    HomologyEngine::new().compute_persistence(cloud)
}
