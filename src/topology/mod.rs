//! Topology Module: Persistent Homology of Embedded Waveforms
//!
//! For an embedded point cloud X we build the Vietoris-Rips filtration
//! VR_ε(X) under the Euclidean metric and track the birth and death of
//! connected components (H0) and loops (H1) as ε grows. A periodic
//! pressure oscillation embeds as a loop and shows up as one long-lived
//! H1 pair; noise produces short pairs near the diagonal.
//!
//! The homology algorithm sits behind [`PersistenceBackend`]. The bundled
//! [`VietorisRips`] backend reduces edge coboundaries exactly; any other
//! conforming implementation can be dropped into [`HomologyEngine`].

mod diagram;
mod distance;
mod engine;
mod vietoris_rips;

pub use diagram::{PersistenceDiagram, PersistenceDiagramSet, PersistencePair};
pub use distance::{distance_matrix, enclosing_radius};
pub use engine::{
    compute_persistence, HomologyEngine, PersistenceBackend, DEFAULT_MAX_DEGREE,
    DEFAULT_MAX_POINTS,
};
pub use vietoris_rips::VietorisRips;
