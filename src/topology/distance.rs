//! Euclidean distances between embedded points

use ndarray::{Array2, ArrayView2};

/// Symmetric matrix of pairwise Euclidean distances
pub fn distance_matrix(points: ArrayView2<'_, f64>) -> Array2<f64> {
    let n = points.nrows();
    let dim = points.ncols();

    let mut dm = Array2::<f64>::zeros((n, n));

    for i in 0..n {
        for j in i + 1..n {
            let mut dist_sq = 0.0;
            for d in 0..dim {
                let diff = points[[i, d]] - points[[j, d]];
                dist_sq += diff * diff;
            }
            let dist = dist_sq.sqrt();
            dm[[i, j]] = dist;
            dm[[j, i]] = dist;
        }
    }

    dm
}

/// Enclosing radius: min over points of the distance to the farthest point
///
/// At this scale one vertex is adjacent to every other, so the Rips
/// complex is a cone and carries no homology beyond one component.
pub fn enclosing_radius(distances: &Array2<f64>) -> f64 {
    if distances.nrows() == 0 {
        return 0.0;
    }
    distances
        .rows()
        .into_iter()
        .map(|row| row.iter().copied().fold(0.0, f64::max))
        .fold(f64::INFINITY, f64::min)
}
