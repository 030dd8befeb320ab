use std::any::Any;

use super::partition::MAX_FANOUT;

/// Boxed error produced by a fallible predicate
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures surfaced by the parallel search and its executors
///
/// Every variant is returned only after all spawned workers have been joined.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The requested fanout is zero or above [`MAX_FANOUT`]
    #[error("fanout must be between 1 and {max}, got {0}", max = MAX_FANOUT)]
    InvalidFanout(usize),

    /// The OS refused to create a worker thread
    #[error("failed to spawn worker for partition {partition}")]
    Spawn {
        partition: usize,
        #[source]
        source: std::io::Error,
    },

    /// The predicate panicked while scanning a partition
    #[error("worker for partition {partition} panicked: {message}")]
    WorkerPanicked { partition: usize, message: String },

    /// A fallible predicate returned an error while scanning a partition
    #[error("predicate failed in partition {partition}")]
    Predicate {
        partition: usize,
        #[source]
        source: BoxError,
    },

    /// The shared worker pool could not be built
    #[error("failed to build worker pool")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    /// The scoped thread group itself panicked outside of any worker
    #[error("worker scope panicked")]
    ScopePanicked,
}

impl SearchError {
    /// Partition index the failure is attributed to, if any
    pub fn partition(&self) -> Option<usize> {
        match self {
            SearchError::Spawn { partition, .. }
            | SearchError::WorkerPanicked { partition, .. }
            | SearchError::Predicate { partition, .. } => Some(*partition),
            _ => None,
        }
    }
}

/// Extract a readable message from a panic payload
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
