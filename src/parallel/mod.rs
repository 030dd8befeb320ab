//! Execution strategies for partitioned work
//!
//! This module owns *how* a batch of partition jobs runs; it knows nothing
//! about searching. The parallel search hands it `fanout` indexed jobs and
//! gets back one outcome per job, in job order, after every job has finished.
//!
//! # Strategies
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────────────────────────┐
//! │ ParallelSearch   │     │ Executor                             │
//! │                  │────▶│ • ScopedThreads  fresh OS threads    │
//! │ • partitions     │     │ • RayonPool      shared worker pool  │
//! │ • result order   │     │ • Inline         calling thread      │
//! └──────────────────┘     └──────────────────────────────────────┘
//! ```
//!
//! `ScopedThreads` spawns one crossbeam scoped thread per job, so jobs may
//! borrow the caller's slice without `'static` bounds. `RayonPool` lets a
//! caller amortise thread creation across many searches. `Inline` is the
//! explicit sequential policy.
//!
//! # Example Usage
//!
//! ```rust
//! use parscan::parallel::{Executor, ExecutorKind, ScopedThreads};
//!
//! let data = [3, 1, 4, 1, 5];
//! let outcomes = ScopedThreads.run(data.len(), |index| data[index] * 2).unwrap();
//! assert_eq!(outcomes.len(), 5);
//!
//! // Or pick one from configuration
//! let executor = ExecutorKind::Inline.build(0).unwrap();
//! assert!(executor.run(2, |index| index).unwrap().iter().all(|o| o.is_ok()));
//! ```

pub mod executor;

// Re-export main types for easier access
pub use executor::{
    AnyExecutor, Executor, ExecutorKind, Inline, JobOutcome, RayonPool, ScopedThreads,
    default_pool_threads,
};
