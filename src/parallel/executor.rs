use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::search::SearchError;

/// Outcome of one job: its return value, or the panic payload it died with
pub type JobOutcome<R> = thread::Result<R>;

/// Runs a batch of indexed jobs and joins every one of them before returning
///
/// Outcomes come back in job-index order regardless of completion order.
/// A panicking job is captured as an `Err` outcome; it never tears down the
/// caller or leaves sibling jobs running.
pub trait Executor {
    fn run<R, F>(&self, jobs: usize, job: F) -> Result<Vec<JobOutcome<R>>, SearchError>
    where
        R: Send,
        F: Fn(usize) -> R + Sync;
}

/// One freshly spawned OS thread per job, joined in job order
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopedThreads;

impl Executor for ScopedThreads {
    fn run<R, F>(&self, jobs: usize, job: F) -> Result<Vec<JobOutcome<R>>, SearchError>
    where
        R: Send,
        F: Fn(usize) -> R + Sync,
    {
        let job = &job;

        // Use crossbeam::thread::scope so workers can borrow the caller's data
        crossbeam::thread::scope(|s| {
            let mut handles = Vec::new();
            let mut spawn_error = None;

            for index in 0..jobs {
                let spawned = s
                    .builder()
                    .name(format!("parscan-worker-{index}"))
                    .spawn(move |_| job(index));

                match spawned {
                    Ok(handle) => {
                        trace!("spawned worker {}", index);
                        handles.push(handle);
                    }
                    Err(source) => {
                        warn!("failed to spawn worker {}: {}", index, source);
                        spawn_error = Some(SearchError::Spawn { partition: index, source });
                        break;
                    }
                }
            }

            // Join everything that did start, even when a later spawn failed
            let outcomes: Vec<_> = handles.into_iter().map(|handle| handle.join()).collect();
            trace!("joined {} workers", outcomes.len());

            match spawn_error {
                Some(error) => Err(error),
                None => Ok(outcomes),
            }
        })
        .map_err(|_| SearchError::ScopePanicked)?
    }
}

/// Runs jobs on a shared rayon pool instead of spawning threads per call
#[derive(Debug, Clone)]
pub struct RayonPool {
    pool: Arc<rayon::ThreadPool>,
}

impl RayonPool {
    /// Build a dedicated pool; `threads == 0` sizes it from the CPU count
    pub fn new(threads: usize) -> Result<Self, SearchError> {
        let threads = if threads == 0 { default_pool_threads() } else { threads };
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("parscan-pool-{index}"))
            .build()?;
        debug!("built worker pool with {} threads", threads);
        Ok(Self { pool: Arc::new(pool) })
    }

    /// Reuse a pool the caller already owns
    pub fn from_pool(pool: Arc<rayon::ThreadPool>) -> Self {
        Self { pool }
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl Executor for RayonPool {
    fn run<R, F>(&self, jobs: usize, job: F) -> Result<Vec<JobOutcome<R>>, SearchError>
    where
        R: Send,
        F: Fn(usize) -> R + Sync,
    {
        let job = &job;
        Ok(self.pool.install(|| {
            (0..jobs)
                .into_par_iter()
                .map(|index| panic::catch_unwind(AssertUnwindSafe(|| job(index))))
                .collect()
        }))
    }
}

/// Runs jobs one after another on the calling thread
///
/// This is the explicit sequential fallback; nothing switches to it silently.
#[derive(Debug, Clone, Copy, Default)]
pub struct Inline;

impl Executor for Inline {
    fn run<R, F>(&self, jobs: usize, job: F) -> Result<Vec<JobOutcome<R>>, SearchError>
    where
        R: Send,
        F: Fn(usize) -> R + Sync,
    {
        Ok((0..jobs)
            .map(|index| panic::catch_unwind(AssertUnwindSafe(|| job(index))))
            .collect())
    }
}

/// Executor selection as it appears in configuration and on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExecutorKind {
    /// Fresh scoped OS threads per search call
    #[default]
    Threads,
    /// Shared rayon worker pool
    Pool,
    /// Sequential, on the calling thread
    Inline,
}

impl ExecutorKind {
    /// Build the executor; `pool_threads` only matters for [`ExecutorKind::Pool`]
    pub fn build(self, pool_threads: usize) -> Result<AnyExecutor, SearchError> {
        Ok(match self {
            ExecutorKind::Threads => AnyExecutor::Threads(ScopedThreads),
            ExecutorKind::Pool => AnyExecutor::Pool(RayonPool::new(pool_threads)?),
            ExecutorKind::Inline => AnyExecutor::Inline(Inline),
        })
    }
}

impl std::fmt::Display for ExecutorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ExecutorKind::Threads => "threads",
            ExecutorKind::Pool => "pool",
            ExecutorKind::Inline => "inline",
        };
        f.write_str(name)
    }
}

/// Runtime-selected executor
#[derive(Debug, Clone)]
pub enum AnyExecutor {
    Threads(ScopedThreads),
    Pool(RayonPool),
    Inline(Inline),
}

impl Default for AnyExecutor {
    fn default() -> Self {
        AnyExecutor::Threads(ScopedThreads)
    }
}

impl Executor for AnyExecutor {
    fn run<R, F>(&self, jobs: usize, job: F) -> Result<Vec<JobOutcome<R>>, SearchError>
    where
        R: Send,
        F: Fn(usize) -> R + Sync,
    {
        match self {
            AnyExecutor::Threads(executor) => executor.run(jobs, job),
            AnyExecutor::Pool(executor) => executor.run(jobs, job),
            AnyExecutor::Inline(executor) => executor.run(jobs, job),
        }
    }
}

/// Pool size used when none is configured
pub fn default_pool_threads() -> usize {
    std::cmp::max(1, num_cpus::get())
}
