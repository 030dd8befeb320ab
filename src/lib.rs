//! # parscan - parallel find-first search
//!
//! A fixed-fanout parallel find-first primitive with the same answer as a
//! sequential scan, plus a timing harness for comparing the two fairly.
//!
//! ## Features
//!
//! - **Earliest match guaranteed**: partitions are read in index order, never
//!   in completion order
//! - **No leaked work**: every worker is joined before a search returns
//! - **Pluggable execution**: fresh scoped threads, a shared rayon pool, or
//!   the calling thread
//! - **Reset-aware timing**: an untimed reset step before every trial keeps
//!   in-place operations honest
//!
//! ## Quick Start
//!
//! ```rust
//! use parscan::search::{ParallelSearch, scan};
//! use parscan::timing::measure;
//!
//! let values: Vec<i32> = (0..10_000).rev().collect();
//! let search = ParallelSearch::new().fanout(4);
//!
//! let parallel = search.scan(&values, |&v| v == 42).unwrap();
//! assert_eq!(parallel, scan(&values, |&v| v == 42));
//!
//! let timing = measure(|| { search.scan(&values, |&v| v == 0).unwrap(); }, 3);
//! assert_eq!(timing.trials, 3);
//! ```

pub mod bench;
pub mod cli;
pub mod config;
pub mod data;
pub mod parallel;
pub mod search;
pub mod timing;

pub use cli::{Cli, Output};
pub use config::{ParscanConfig, Settings};
pub use search::{ParallelSearch, SearchError, parallel_scan, scan};

/// Result type alias for parscan operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
