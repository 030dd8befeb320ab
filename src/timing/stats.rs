use serde::Serialize;

use super::timer::measure_repeated;

/// Spread of several independent timing windows, in seconds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub samples: usize,
    pub mean: f64,
    /// Population standard deviation
    pub stddev: f64,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    /// Summarise raw per-window durations; `None` when there are none
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let count = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / count;
        let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / count;
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            samples: samples.len(),
            mean,
            stddev: variance.sqrt(),
            min,
            max,
        })
    }
}

/// Repeats a [`measure_repeated`] window several times to gauge noise
#[derive(Debug, Clone, Copy)]
pub struct Sampler {
    /// Calls per window
    pub repeats: u32,
    /// Number of windows
    pub windows: u32,
}

impl Sampler {
    pub fn new(repeats: u32, windows: u32) -> Self {
        Self { repeats, windows }
    }

    pub fn run<F>(&self, mut timed_op: F) -> Option<Summary>
    where
        F: FnMut(),
    {
        let samples: Vec<f64> = (0..self.windows)
            .map(|_| measure_repeated(&mut timed_op, self.repeats).as_secs_f64())
            .collect();
        Summary::from_samples(&samples)
    }
}
