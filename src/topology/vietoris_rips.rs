//! Exact Vietoris-Rips Persistence via Cohomology Reduction
//!
//! Computes the same diagrams as Ripser with its default settings
//! (Euclidean metric, maximum degree 1, no threshold) for the point
//! clouds produced by the embedder.
//!
//! ## Algorithm Overview
//!
//! 1. Pairwise distances; the filtration stops at the enclosing radius
//! 2. Edges sorted by (length, vertices)
//! 3. H0 by Kruskal: an edge merging two components kills the younger one
//! 4. H1 by reducing edge coboundaries over Z/2, youngest edge first.
//!    Edges that merged components in step 3 are cleared (never reduced).
//!    Triangles are never stored: coboundaries are enumerated from the
//!    distance matrix when needed
//! 5. An edge whose oldest cofacet is born with the edge itself and has
//!    no owner yet is paired immediately (apparent pair)
//! 6. Pairs with zero persistence are dropped
//!
//! Memory is O(n²) for the distance matrix and edge list. Cohomology
//! yields the same pairs as the homology reduction of triangle boundaries.
//!
//! ## Reference
//!
//! Edelsbrunner, Letscher, Zomorodian (2002). "Topological Persistence
//! and Simplification". Discrete & Computational Geometry.
//! de Silva, Morozov, Vejdemo-Johansson (2011). "Dualities in persistent
//! (co)homology". Inverse Problems.
//! Bauer (2021). "Ripser: efficient computation of Vietoris-Rips
//! persistence barcodes". J. Appl. Comput. Topol.

use log::debug;
use ndarray::{Array2, ArrayView2};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

use super::diagram::{PersistenceDiagramSet, PersistencePair};
use super::distance::{distance_matrix, enclosing_radius};
use super::engine::PersistenceBackend;
use crate::error::HomologyComputeError;

/// Largest vertex count whose triangle indices fit in a u64
const MAX_VERTICES: usize = 1 << 21;

/// An edge of the filtration
#[derive(Debug, Clone, Copy)]
struct Edge {
    birth: f64,
    vertices: [u32; 2],
}

/// A triangle, known only by its birth and combinatorial index
///
/// Ordered by birth, then index; the minimum of a coboundary is its pivot.
#[derive(Debug, Clone, Copy)]
struct Cofacet {
    birth: f64,
    index: u64,
}

impl Ord for Cofacet {
    fn cmp(&self, other: &Self) -> Ordering {
        self.birth
            .total_cmp(&other.birth)
            .then(self.index.cmp(&other.index))
    }
}

impl PartialOrd for Cofacet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Cofacet {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cofacet {}

/// Combinatorial number of the triangle {a, b, c}
///
/// For a fixed edge (i, j), the index grows with the third vertex.
fn triangle_index(a: usize, b: usize, c: usize) -> u64 {
    let mut v = [a as u64, b as u64, c as u64];
    v.sort_unstable();
    let [x, y, z] = v;
    z * z.saturating_sub(1) * z.saturating_sub(2) / 6 + y * y.saturating_sub(1) / 2 + x
}

/// Union-find over vertex indices
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    /// Merge the sets of x and y; false if they were already merged
    fn union(&mut self, x: usize, y: usize) -> bool {
        let (rx, ry) = (self.find(x), self.find(y));
        if rx == ry {
            return false;
        }
        match self.rank[rx].cmp(&self.rank[ry]) {
            Ordering::Less => self.parent[rx] = ry,
            Ordering::Greater => self.parent[ry] = rx,
            Ordering::Equal => {
                self.parent[ry] = rx;
                self.rank[rx] += 1;
            }
        }
        true
    }
}

/// Euclidean Vietoris-Rips persistence backend
#[derive(Debug, Clone, Copy, Default)]
pub struct VietorisRips {
    /// Maximum filtration value; `None` uses the enclosing radius
    threshold: Option<f64>,
}

impl VietorisRips {
    pub fn new() -> Self {
        Self { threshold: None }
    }

    /// Truncate the filtration at `threshold`
    ///
    /// Classes still alive at the threshold are reported as essential.
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold: Some(threshold),
        }
    }

    /// Highest homology degree this backend computes
    pub const MAX_SUPPORTED_DEGREE: usize = 1;
}

impl PersistenceBackend for VietorisRips {
    fn compute(
        &self,
        points: ArrayView2<'_, f64>,
        max_degree: usize,
    ) -> Result<PersistenceDiagramSet, HomologyComputeError> {
        if max_degree > Self::MAX_SUPPORTED_DEGREE {
            return Err(HomologyComputeError::Backend(format!(
                "Vietoris-Rips backend computes degrees up to {}, {} requested",
                Self::MAX_SUPPORTED_DEGREE,
                max_degree
            )));
        }
        let n = points.nrows();
        if n > MAX_VERTICES {
            return Err(HomologyComputeError::TooManyPoints {
                points: n,
                limit: MAX_VERTICES,
            });
        }

        let distances = distance_matrix(points);
        // Row-major scan, so the first hit has first < second
        if let Some(((first, second), _)) = distances.indexed_iter().find(|(_, d)| !d.is_finite())
        {
            return Err(HomologyComputeError::DistanceOverflow { first, second });
        }

        let threshold = self
            .threshold
            .unwrap_or_else(|| enclosing_radius(&distances));

        let edges = sorted_edges(&distances, threshold);
        debug!(
            "Rips filtration: {} points, {} edges, threshold {:.6}",
            n,
            edges.len(),
            threshold
        );

        let mut diagrams = PersistenceDiagramSet::empty(max_degree);

        // H0 via Kruskal
        let mut components = UnionFind::new(n);
        let mut merges_components = vec![false; edges.len()];
        {
            let h0 = diagrams.degree_mut(0);
            for (idx, edge) in edges.iter().enumerate() {
                let [i, j] = edge.vertices;
                if components.union(i as usize, j as usize) {
                    merges_components[idx] = true;
                    if edge.birth > 0.0 {
                        h0.pairs.push(PersistencePair::new(0.0, edge.birth));
                    }
                }
            }
            for v in 0..n {
                if components.find(v) == v {
                    h0.pairs.push(PersistencePair::essential(0.0));
                }
            }
            h0.sort();
        }

        if max_degree >= 1 {
            let reduction = CoboundaryReduction::new(&distances, &edges, threshold);
            let h1 = diagrams.degree_mut(1);
            h1.pairs = reduction.run(&merges_components);
            h1.sort();
        }

        Ok(diagrams)
    }
}

fn sorted_edges(distances: &Array2<f64>, threshold: f64) -> Vec<Edge> {
    let n = distances.nrows();
    let mut edges = Vec::new();
    for i in 0..n {
        for j in i + 1..n {
            let d = distances[[i, j]];
            if d <= threshold {
                edges.push(Edge {
                    birth: d,
                    vertices: [i as u32, j as u32],
                });
            }
        }
    }
    edges.sort_by(|a, b| {
        a.birth
            .total_cmp(&b.birth)
            .then(a.vertices.cmp(&b.vertices))
    });
    edges
}

/// Degree-1 persistent cohomology over the edges of a Rips filtration
struct CoboundaryReduction<'a> {
    distances: &'a Array2<f64>,
    edges: &'a [Edge],
    threshold: f64,
    /// Column (edge index) owning each pivot triangle
    pivot_owner: HashMap<u64, u32>,
    /// Edges added into a column while reducing it, for columns that needed any
    reduction: HashMap<u32, Vec<u32>>,
}

impl<'a> CoboundaryReduction<'a> {
    fn new(distances: &'a Array2<f64>, edges: &'a [Edge], threshold: f64) -> Self {
        Self {
            distances,
            edges,
            threshold,
            pivot_owner: HashMap::with_capacity(edges.len()),
            reduction: HashMap::new(),
        }
    }

    /// H1 pairs, essential classes included
    fn run(mut self, cleared: &[bool]) -> Vec<PersistencePair> {
        let mut pairs = Vec::new();
        let mut heap = BinaryHeap::new();
        let mut added = Vec::new();
        let mut apparent = 0usize;

        for idx in (0..self.edges.len()).rev() {
            if cleared[idx] {
                continue;
            }
            let edge = self.edges[idx];
            let column = idx as u32;

            let pivot = match self.oldest_cofacet(&edge) {
                None => None,
                Some(p) if !self.pivot_owner.contains_key(&p.index) => {
                    apparent += 1;
                    Some(p)
                }
                Some(_) => self.reduce_column(column, &mut heap, &mut added),
            };

            match pivot {
                Some(p) => {
                    self.pivot_owner.insert(p.index, column);
                    if p.birth > edge.birth {
                        pairs.push(PersistencePair::new(edge.birth, p.birth));
                    }
                }
                None => pairs.push(PersistencePair::essential(edge.birth)),
            }
        }

        debug!(
            "Coboundary reduction: {} columns paired directly, {} reduced",
            apparent,
            self.reduction.len()
        );
        pairs
    }

    /// Pivot of the unreduced coboundary of `edge`
    ///
    /// Third vertices are scanned in index order, so the first cofacet born
    /// with the edge is the minimum and ends the scan.
    fn oldest_cofacet(&self, edge: &Edge) -> Option<Cofacet> {
        let [i, j] = edge.vertices.map(|v| v as usize);
        let (row_i, row_j) = (self.distances.row(i), self.distances.row(j));
        let mut oldest: Option<Cofacet> = None;

        for (k, (&dik, &djk)) in row_i.iter().zip(row_j.iter()).enumerate() {
            if k == i || k == j || dik > self.threshold || djk > self.threshold {
                continue;
            }
            let candidate = Cofacet {
                birth: edge.birth.max(dik).max(djk),
                index: triangle_index(i, j, k),
            };
            if dik <= edge.birth && djk <= edge.birth {
                return Some(candidate);
            }
            if oldest.map_or(true, |o| candidate < o) {
                oldest = Some(candidate);
            }
        }
        oldest
    }

    fn push_coboundary(&self, column: u32, heap: &mut BinaryHeap<Reverse<Cofacet>>) {
        let edge = &self.edges[column as usize];
        let [i, j] = edge.vertices.map(|v| v as usize);
        let (row_i, row_j) = (self.distances.row(i), self.distances.row(j));

        for (k, (&dik, &djk)) in row_i.iter().zip(row_j.iter()).enumerate() {
            if k == i || k == j || dik > self.threshold || djk > self.threshold {
                continue;
            }
            heap.push(Reverse(Cofacet {
                birth: edge.birth.max(dik).max(djk),
                index: triangle_index(i, j, k),
            }));
        }
    }

    /// Add earlier columns until the pivot is unowned; None if the column vanishes
    fn reduce_column(
        &mut self,
        column: u32,
        heap: &mut BinaryHeap<Reverse<Cofacet>>,
        added: &mut Vec<u32>,
    ) -> Option<Cofacet> {
        heap.clear();
        added.clear();
        self.push_coboundary(column, heap);

        while let Some(pivot) = pop_pivot(heap) {
            let Some(&owner) = self.pivot_owner.get(&pivot.index) else {
                if !added.is_empty() {
                    self.reduction.insert(column, cancel_pairs(added));
                }
                return Some(pivot);
            };

            heap.push(Reverse(pivot));
            added.push(owner);
            self.push_coboundary(owner, heap);
            if let Some(extra) = self.reduction.get(&owner) {
                for &e in extra {
                    added.push(e);
                    self.push_coboundary(e, heap);
                }
            }
        }
        None
    }
}

/// Pop the smallest entry that survives cancellation mod 2
fn pop_pivot(heap: &mut BinaryHeap<Reverse<Cofacet>>) -> Option<Cofacet> {
    while let Some(Reverse(top)) = heap.pop() {
        match heap.peek() {
            Some(Reverse(next)) if *next == top => {
                heap.pop();
            }
            _ => return Some(top),
        }
    }
    None
}

/// Entries occurring an odd number of times, sorted
fn cancel_pairs(columns: &mut [u32]) -> Vec<u32> {
    columns.sort_unstable();
    let mut kept = Vec::new();
    let mut i = 0;
    while i < columns.len() {
        if i + 1 < columns.len() && columns[i] == columns[i + 1] {
            i += 2;
        } else {
            kept.push(columns[i]);
            i += 1;
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array2};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::BTreeSet;

    fn compute(points: &Array2<f64>) -> PersistenceDiagramSet {
        VietorisRips::new().compute(points.view(), 1).unwrap()
    }

    /// H1 by reducing every triangle boundary, for cross-checking
    fn boundary_reduction_h1(points: &Array2<f64>) -> Vec<(f64, f64)> {
        let distances = distance_matrix(points.view());
        let threshold = enclosing_radius(&distances);
        let edges = sorted_edges(&distances, threshold);
        let position: HashMap<[u32; 2], usize> = edges
            .iter()
            .enumerate()
            .map(|(idx, e)| (e.vertices, idx))
            .collect();

        let n = points.nrows() as u32;
        let mut triangles = Vec::new();
        for i in 0..n {
            for j in i + 1..n {
                for k in j + 1..n {
                    let sides = [[i, j], [i, k], [j, k]];
                    if sides.iter().all(|s| position.contains_key(s)) {
                        let birth = sides
                            .iter()
                            .map(|s| edges[position[s]].birth)
                            .fold(0.0, f64::max);
                        let rows: BTreeSet<usize> = sides.iter().map(|s| position[s]).collect();
                        triangles.push((birth, rows));
                    }
                }
            }
        }
        triangles.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut pivots: HashMap<usize, BTreeSet<usize>> = HashMap::new();
        let mut pairs = Vec::new();
        for (birth, mut column) in triangles {
            while let Some(&low) = column.iter().next_back() {
                match pivots.get(&low) {
                    Some(other) => column = column.symmetric_difference(other).copied().collect(),
                    None => break,
                }
            }
            if let Some(&low) = column.iter().next_back() {
                if birth > edges[low].birth {
                    pairs.push((edges[low].birth, birth));
                }
                pivots.insert(low, column);
            }
        }
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
        pairs
    }

    fn assert_matches_boundary_reduction(points: &Array2<f64>) {
        let expected = boundary_reduction_h1(points);
        let pd = compute(points);
        let h1 = pd.degree(1).unwrap();

        assert_eq!(h1.essential_count(), 0);
        assert_eq!(h1.len(), expected.len());
        for (pair, (birth, death)) in h1.pairs.iter().zip(&expected) {
            assert_abs_diff_eq!(pair.birth, *birth, epsilon = 1e-12);
            assert_abs_diff_eq!(pair.death, *death, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_two_points() {
        let pd = compute(&array![[0.0, 0.0], [1.0, 0.0]]);

        let h0 = pd.degree(0).unwrap();
        let finite: Vec<_> = h0.finite().collect();
        assert_eq!(finite.len(), 1);
        assert_abs_diff_eq!(finite[0].birth, 0.0);
        assert_abs_diff_eq!(finite[0].death, 1.0);
        assert_eq!(h0.essential_count(), 1);
        assert!(pd.degree(1).unwrap().is_empty());
    }

    #[test]
    fn test_triangle() {
        // Equilateral triangle with side 1 fills as soon as its edges appear
        let h = 3.0_f64.sqrt() / 2.0;
        let pd = compute(&array![[0.0, 0.0], [1.0, 0.0], [0.5, h]]);

        assert_eq!(pd.degree(0).unwrap().finite().count(), 2);
        assert!(pd.degree(1).unwrap().is_empty());
    }

    #[test]
    fn test_square_cycle() {
        let s2 = 2.0_f64.sqrt();
        let pd = compute(&array![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);

        let h1 = pd.degree(1).unwrap();
        assert_eq!(h1.len(), 1, "square should have one H1 cycle");
        assert_abs_diff_eq!(h1.pairs[0].birth, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(h1.pairs[0].death, s2, epsilon = 1e-12);

        let h0 = pd.degree(0).unwrap();
        assert_eq!(h0.finite().count(), 3);
        assert!(h0.finite().all(|p| (p.death - 1.0).abs() < 1e-12));
    }

    #[test]
    fn test_circle_loop() {
        // 12 points on the unit circle: one loop born at the adjacent chord,
        // filled once chords spanning 4 steps form equilateral triangles
        let n = 12;
        let points = Array2::from_shape_fn((n, 2), |(i, k)| {
            let theta = 2.0 * std::f64::consts::PI * i as f64 / n as f64;
            if k == 0 {
                theta.cos()
            } else {
                theta.sin()
            }
        });
        let pd = compute(&points);

        let h1 = pd.degree(1).unwrap();
        assert_eq!(h1.len(), 1);
        let chord = 2.0 * (std::f64::consts::PI / 12.0).sin();
        assert_abs_diff_eq!(h1.pairs[0].birth, chord, epsilon = 1e-9);
        assert_abs_diff_eq!(h1.pairs[0].death, 3.0_f64.sqrt(), epsilon = 1e-9);

        let h0 = pd.degree(0).unwrap();
        assert_eq!(h0.finite().count(), n - 1);
        assert_eq!(h0.essential_count(), 1);
    }

    #[test]
    fn test_random_clouds_match_boundary_reduction() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let points = Array2::from_shape_fn((14, 2), |_| rng.random::<f64>());
            assert_matches_boundary_reduction(&points);
        }
    }

    #[test]
    fn test_grid_with_ties_matches_boundary_reduction() {
        // Many equal distances force columns through the full reduction
        let points = Array2::from_shape_fn((16, 2), |(i, k)| {
            if k == 0 {
                (i % 4) as f64
            } else {
                (i / 4) as f64
            }
        });
        assert_matches_boundary_reduction(&points);

        // Each unit square closes at 1 and fills when its diagonals appear
        let pd = compute(&points);
        let s2 = 2.0_f64.sqrt();
        let squares = pd
            .degree(1)
            .unwrap()
            .pairs
            .iter()
            .filter(|p| p.birth == 1.0 && (p.death - s2).abs() < 1e-12)
            .count();
        assert_eq!(squares, 9);
    }

    #[test]
    fn test_identical_points() {
        let pd = compute(&Array2::from_elem((5, 3), 0.25));

        let h0 = pd.degree(0).unwrap();
        assert_eq!(h0.len(), 1);
        assert!(h0.pairs[0].is_essential());
        assert_eq!(h0.pairs[0].birth, 0.0);
        assert!(pd.degree(1).unwrap().is_empty());
    }

    #[test]
    fn test_single_point() {
        let pd = compute(&array![[4.0, 2.0, 1.0]]);
        assert_eq!(pd.degree(0).unwrap().pairs, vec![PersistencePair::essential(0.0)]);
        assert!(pd.degree(1).unwrap().is_empty());
    }

    #[test]
    fn test_explicit_threshold_keeps_components_apart() {
        let points = array![[0.0], [1.0], [10.0]];
        let pd = VietorisRips::with_threshold(2.0)
            .compute(points.view(), 0)
            .unwrap();

        assert_eq!(pd.max_degree(), 0);
        let h0 = pd.degree(0).unwrap();
        assert_eq!(h0.finite().count(), 1);
        assert_eq!(h0.essential_count(), 2);
    }

    #[test]
    fn test_explicit_threshold_leaves_loop_open() {
        let pd = VietorisRips::with_threshold(1.2)
            .compute(array![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]].view(), 1)
            .unwrap();
        let h1 = pd.degree(1).unwrap();
        assert_eq!(h1.pairs, vec![PersistencePair::essential(1.0)]);
    }

    #[test]
    fn test_overflowing_distance_rejected() {
        let points = array![[0.0, 0.0], [1.0, 0.0], [1e200, 0.0]];
        let err = VietorisRips::new().compute(points.view(), 1).unwrap_err();
        assert_eq!(
            err,
            HomologyComputeError::DistanceOverflow {
                first: 0,
                second: 2
            }
        );
    }

    #[test]
    fn test_degree_two_unsupported() {
        let points = array![[0.0, 0.0]];
        let err = VietorisRips::new().compute(points.view(), 2).unwrap_err();
        assert!(matches!(err, HomologyComputeError::Backend(_)));
    }

    #[test]
    fn test_triangle_index_grows_with_third_vertex() {
        let (i, j) = (3, 7);
        let indices: Vec<u64> = (0..12)
            .filter(|&k| k != i && k != j)
            .map(|k| triangle_index(i, j, k))
            .collect();
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(triangle_index(0, 1, 2), 0);
        assert_eq!(triangle_index(2, 0, 1), 0);
        assert_eq!(triangle_index(0, 1, 3), 1);
    }

    #[test]
    fn test_pivot_cancels_mod_two() {
        let entry = |birth, index| Reverse(Cofacet { birth, index });
        let mut heap: BinaryHeap<_> = [
            entry(1.0, 4),
            entry(1.0, 4),
            entry(2.0, 9),
            entry(2.0, 9),
            entry(2.0, 9),
            entry(3.0, 1),
        ]
        .into_iter()
        .collect();

        assert_eq!(pop_pivot(&mut heap).map(|c| c.index), Some(9));
        assert_eq!(pop_pivot(&mut heap).map(|c| c.index), Some(1));
        assert_eq!(pop_pivot(&mut heap), None);
        assert_eq!(cancel_pairs(&mut [5, 2, 5, 7, 2, 2]), vec![2, 7]);
    }
}
