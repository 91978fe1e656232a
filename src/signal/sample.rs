use serde::Serialize;

use crate::error::LoadError;

/// Time-indexed amplitude sequence
///
/// `time[i]` and `amplitude[i]` describe the same sample. Immutable once
/// constructed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaveformSample {
    time: Vec<f64>,
    amplitude: Vec<f64>,
}

impl WaveformSample {
    pub fn new(time: Vec<f64>, amplitude: Vec<f64>) -> Result<Self, LoadError> {
        if time.len() != amplitude.len() {
            return Err(LoadError::LengthMismatch {
                time: time.len(),
                amplitude: amplitude.len(),
            });
        }
        Ok(Self { time, amplitude })
    }

    /// Uniformly sampled amplitudes starting at t = 0
    pub fn from_amplitude(amplitude: Vec<f64>, dt: f64) -> Self {
        let time = (0..amplitude.len()).map(|i| i as f64 * dt).collect();
        Self { time, amplitude }
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn amplitude(&self) -> &[f64] {
        &self.amplitude
    }

    pub fn len(&self) -> usize {
        self.amplitude.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitude.is_empty()
    }

    /// Keep at most `max_samples` samples spread evenly over the record
    ///
    /// First and last samples are always kept. Returns the sample unchanged
    /// when it is already short enough.
    pub fn sparse(self, max_samples: usize) -> Self {
        let n = self.len();
        if max_samples >= n {
            return self;
        }
        let indices: Vec<usize> = match max_samples {
            0 => Vec::new(),
            1 => vec![0],
            k => (0..k).map(|i| i * (n - 1) / (k - 1)).collect(),
        };
        Self {
            time: indices.iter().map(|&i| self.time[i]).collect(),
            amplitude: indices.iter().map(|&i| self.amplitude[i]).collect(),
        }
    }
}
