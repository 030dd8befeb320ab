use std::fmt;

use serde::Serialize;

use super::timer::Timing;

/// One labelled measurement, ready for printing or JSON output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub label: String,
    pub trials: u32,
    pub repeats: u32,
    /// Total seconds across all trials
    pub seconds: f64,
    /// Seconds per call of the timed operation
    pub per_call: f64,
}

impl Report {
    pub fn new(label: impl Into<String>, timing: &Timing) -> Self {
        Self {
            label: label.into(),
            trials: timing.trials,
            repeats: timing.repeats,
            seconds: timing.as_secs_f64(),
            per_call: timing.per_call().as_secs_f64(),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let calls = u64::from(self.trials) * u64::from(self.repeats);
        write!(
            f,
            "Executing {} {} times took {:.6} seconds.",
            self.label, calls, self.seconds
        )
    }
}
