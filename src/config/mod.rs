//! Configuration management for parscan
//!
//! Settings are layered with figment: embedded defaults, then user and
//! repository files, then `PARSCAN_` environment variables, then command-line
//! overrides. The merged result is extracted into [`Settings`].

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::data::{DEFAULT_SEED, Target};
use crate::parallel::ExecutorKind;
use crate::search::{DEFAULT_FANOUT, MAX_FANOUT};

pub mod core;


pub use self::core::ParscanConfig;

/// Fully merged configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Parallel search configuration
    #[serde(default)]
    pub search: SearchSettings,

    /// Benchmark driver configuration
    #[serde(default)]
    pub bench: BenchSettings,
}

/// Parallel search configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub fanout: usize,
    pub early_exit: bool,
    pub executor: ExecutorKind,
    /// Threads for the pool executor (0 = number of CPUs)
    pub pool_threads: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            fanout: DEFAULT_FANOUT,
            early_exit: false,
            executor: ExecutorKind::Threads,
            pool_threads: 0,
        }
    }
}

/// Benchmark driver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchSettings {
    pub size: usize,
    pub trials: u32,
    pub repeats: u32,
    /// Extra timing windows for a spread estimate (0 = off)
    pub windows: u32,
    pub seed: u64,
    pub target: Target,
    pub sort: bool,
}

impl Default for BenchSettings {
    fn default() -> Self {
        Self {
            size: 50_000_000,
            trials: 5,
            repeats: 1,
            windows: 0,
            seed: DEFAULT_SEED,
            target: Target::Last,
            sort: false,
        }
    }
}

impl Settings {
    /// Reject values the search or the harness cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.search.fanout == 0 || self.search.fanout > MAX_FANOUT {
            bail!("search.fanout must be between 1 and {MAX_FANOUT}, got {}", self.search.fanout);
        }
        if self.bench.trials == 0 {
            bail!("bench.trials must be at least 1");
        }
        if self.bench.repeats == 0 {
            bail!("bench.repeats must be at least 1");
        }
        Ok(())
    }
}

/// Command-line values layered over every file and environment source
///
/// Unset fields are skipped so they never clobber lower layers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CliOverrides {
    #[serde(skip_serializing_if = "SearchOverrides::is_empty")]
    pub search: SearchOverrides,
    #[serde(skip_serializing_if = "BenchOverrides::is_empty")]
    pub bench: BenchOverrides,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fanout: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub early_exit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executor: Option<ExecutorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_threads: Option<usize>,
}

impl SearchOverrides {
    fn is_empty(&self) -> bool {
        self.fanout.is_none()
            && self.early_exit.is_none()
            && self.executor.is_none()
            && self.pool_threads.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BenchOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trials: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeats: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<bool>,
}

impl BenchOverrides {
    fn is_empty(&self) -> bool {
        self.size.is_none()
            && self.trials.is_none()
            && self.repeats.is_none()
            && self.windows.is_none()
            && self.seed.is_none()
            && self.target.is_none()
            && self.sort.is_none()
    }
}
