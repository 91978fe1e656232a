//! Synthetic Pressure Traces
//!
//! A damped sinusoid with additive Gaussian noise:
//!
//!   p(t) = A · e^(-λt) · sin(2πft) + offset + η(t),   η ~ N(0, σ²)
//!
//! An undamped trace embeds as a closed loop (one persistent H1 class);
//! damping turns the loop into an inward spiral. Seeded, so repeated
//! calls produce identical traces.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

use super::WaveformSample;

/// Builder for reproducible synthetic traces
#[derive(Debug, Clone)]
pub struct SyntheticTrace {
    /// Number of samples
    n_samples: usize,
    /// Sampling interval
    dt: f64,
    /// Oscillation frequency
    frequency: f64,
    /// Peak amplitude A
    amplitude: f64,
    /// Exponential damping rate λ
    damping: f64,
    /// Constant baseline
    offset: f64,
    /// Noise standard deviation σ
    noise_std: f64,
    seed: u64,
}

impl Default for SyntheticTrace {
    fn default() -> Self {
        Self {
            n_samples: 1000,
            dt: 1e-3,
            frequency: 5.0,
            amplitude: 1.0,
            damping: 0.0,
            offset: 0.0,
            noise_std: 0.05,
            seed: 0,
        }
    }
}

impl SyntheticTrace {
    pub fn new(n_samples: usize) -> Self {
        Self {
            n_samples,
            ..Self::default()
        }
    }

    pub fn dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    pub fn frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Noise level; zero, negative or NaN disables noise
    pub fn noise(mut self, noise_std: f64) -> Self {
        self.noise_std = noise_std;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn generate(&self) -> WaveformSample {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let noise = if self.noise_std > 0.0 {
            Normal::new(0.0, self.noise_std).ok()
        } else {
            None
        };

        let amplitude = (0..self.n_samples)
            .map(|i| {
                let t = i as f64 * self.dt;
                let clean = self.amplitude
                    * (-self.damping * t).exp()
                    * (2.0 * PI * self.frequency * t).sin()
                    + self.offset;
                match &noise {
                    Some(normal) => clean + normal.sample(&mut rng),
                    None => clean,
                }
            })
            .collect();

        WaveformSample::from_amplitude(amplitude, self.dt)
    }
}
