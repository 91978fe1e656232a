//! Signal Module: Waveform Samples and Synthetic Traces
//!
//! A [`WaveformSample`] is what an external trace decoder hands to the
//! analysis: index-aligned time and amplitude vectors. [`SyntheticTrace`]
//! produces reproducible oscillating traces with Gaussian noise for demos
//! and tests.

mod sample;
mod synthetic;

pub use sample::WaveformSample;
pub use synthetic::SyntheticTrace;
