//! Persistence Diagrams
//!
//! A pair (b, d) records a homology class born at filtration value b and
//! killed at d. Essential classes never die and carry d = +∞.
//!
//! Diagrams are grouped by homology degree: degree 0 tracks connected
//! components, degree 1 tracks loops. A `PersistenceDiagramSet` always
//! holds one diagram per degree from 0 up to its maximum degree, even
//! when some of them are empty.
//!
//! When serialized to JSON an infinite death becomes `null`.

use serde::Serialize;

/// A (birth, death) pair with birth ≤ death
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PersistencePair {
    pub birth: f64,
    pub death: f64,
}

impl PersistencePair {
    pub fn new(birth: f64, death: f64) -> Self {
        debug_assert!(birth <= death, "birth {birth} after death {death}");
        Self { birth, death }
    }

    pub fn essential(birth: f64) -> Self {
        Self {
            birth,
            death: f64::INFINITY,
        }
    }

    /// Lifetime of the class
    pub fn persistence(&self) -> f64 {
        self.death - self.birth
    }

    pub fn is_essential(&self) -> bool {
        self.death.is_infinite()
    }
}

/// All pairs of one homology degree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersistenceDiagram {
    pub degree: usize,
    pub pairs: Vec<PersistencePair>,
}

impl PersistenceDiagram {
    pub fn new(degree: usize) -> Self {
        Self {
            degree,
            pairs: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn finite(&self) -> impl Iterator<Item = &PersistencePair> {
        self.pairs.iter().filter(|p| !p.is_essential())
    }

    pub fn essential_count(&self) -> usize {
        self.pairs.iter().filter(|p| p.is_essential()).count()
    }

    /// Longest finite lifetime, 0 if there is none
    pub fn max_persistence(&self) -> f64 {
        self.finite().map(|p| p.persistence()).fold(0.0, f64::max)
    }

    /// Sort pairs by (birth, death)
    pub(crate) fn sort(&mut self) {
        self.pairs.sort_by(|a, b| {
            a.birth
                .total_cmp(&b.birth)
                .then(a.death.total_cmp(&b.death))
        });
    }
}

/// One diagram per homology degree, indexed by degree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PersistenceDiagramSet {
    diagrams: Vec<PersistenceDiagram>,
}

impl PersistenceDiagramSet {
    /// Empty diagrams for degrees 0..=max_degree
    pub fn empty(max_degree: usize) -> Self {
        Self {
            diagrams: (0..=max_degree).map(PersistenceDiagram::new).collect(),
        }
    }

    pub fn max_degree(&self) -> usize {
        self.diagrams.len() - 1
    }

    pub fn degree(&self, d: usize) -> Option<&PersistenceDiagram> {
        self.diagrams.get(d)
    }

    pub(crate) fn degree_mut(&mut self, d: usize) -> &mut PersistenceDiagram {
        &mut self.diagrams[d]
    }

    pub fn iter(&self) -> impl Iterator<Item = &PersistenceDiagram> {
        self.diagrams.iter()
    }

    /// Total number of pairs across all degrees
    pub fn total_pairs(&self) -> usize {
        self.diagrams.iter().map(|d| d.len()).sum()
    }
}

impl<'a> IntoIterator for &'a PersistenceDiagramSet {
    type Item = &'a PersistenceDiagram;
    type IntoIter = std::slice::Iter<'a, PersistenceDiagram>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagrams.iter()
    }
}
