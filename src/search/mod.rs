//! Find-first search over slices
//!
//! Two entry points with identical results:
//!
//! - [`scan`] walks the slice on the calling thread.
//! - [`ParallelSearch`] splits the slice into a fixed number of contiguous
//!   partitions, scans them concurrently, and reads the per-partition results
//!   in partition order so the earliest match always wins.
//!
//! Both return an index; "not found" is the end of the searched range
//! (`seq.len()` for a whole slice). The parallel path only accepts slices, so
//! inputs without random access are rejected at compile time.
//!
//! ```rust
//! use parscan::search::{parallel_scan, scan};
//!
//! let values: Vec<i32> = (0..16).collect();
//! assert_eq!(scan(&values, |&v| v > 100), values.len());
//! assert_eq!(parallel_scan(&values, |&v| v > 100).unwrap(), values.len());
//! ```

mod error;
mod parallel;
mod partition;
mod sequential;


pub use error::{BoxError, SearchError};
pub use parallel::{DEFAULT_FANOUT, ParallelSearch, parallel_scan};
pub use partition::{MAX_FANOUT, Partition, plan_partitions};
pub use sequential::{find_first, scan, scan_iter, scan_range, try_scan_range};
