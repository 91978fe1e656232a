//! Embedding Module: Phase-Space Reconstruction from Scalar Signals
//!
//! A single pressure trace only shows one coordinate of the underlying
//! dynamics. Takens' theorem states that the time-shifted copies
//!
//!   x(t) = (s(t), s(t+τ), s(t+2τ), ..., s(t+(d-1)τ))
//!
//! trace out a point cloud diffeomorphic to the original attractor for
//! suitable embedding dimension d and delay τ. The resulting cloud is
//! what the topology module turns into persistence diagrams.

mod delay;

pub use delay::{embed, EmbeddingParameters, PointCloud};
