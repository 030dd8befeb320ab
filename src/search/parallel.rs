use std::convert::Infallible;
use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{debug, warn};

use super::error::{BoxError, SearchError, panic_message};
use super::partition::{Partition, check_fanout, plan_partitions};
use super::sequential::try_scan_range;
use crate::parallel::{Executor, JobOutcome, ScopedThreads};

/// Number of partitions used when none is configured
pub const DEFAULT_FANOUT: usize = 4;

/// Positions scanned between cancellation checks when early exit is on
const CANCEL_CHECK_INTERVAL: usize = 4096;

/// Sentinel for "no partition has reported yet"
const NO_HIT: usize = usize::MAX;

/// Fixed-fanout parallel find-first
///
/// The slice is split into `fanout` contiguous partitions, each scanned
/// concurrently by the executor. Results are read strictly in partition order,
/// so the answer is always the one a sequential [`scan`](super::scan) gives.
///
/// ```rust
/// use parscan::search::ParallelSearch;
///
/// let values = [5, 3, 8, 1, 9, 2, 7];
/// let search = ParallelSearch::new().fanout(4);
/// assert_eq!(search.scan(&values, |&v| v == 8).unwrap(), 2);
/// assert_eq!(search.scan(&values, |&v| v > 100).unwrap(), values.len());
/// ```
#[derive(Debug, Clone)]
pub struct ParallelSearch<E = ScopedThreads> {
    fanout: usize,
    early_exit: bool,
    executor: E,
}

impl ParallelSearch<ScopedThreads> {
    pub fn new() -> Self {
        Self {
            fanout: DEFAULT_FANOUT,
            early_exit: false,
            executor: ScopedThreads,
        }
    }
}

impl Default for ParallelSearch<ScopedThreads> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Executor> ParallelSearch<E> {
    /// Number of partitions, validated when a search runs
    pub fn fanout(mut self, fanout: usize) -> Self {
        self.fanout = fanout;
        self
    }

    /// Let partitions after the current earliest hit stop scanning early
    ///
    /// Off by default. Partitions before the earliest hit are never cut short.
    pub fn early_exit(mut self, enabled: bool) -> Self {
        self.early_exit = enabled;
        self
    }

    /// Swap the executor, e.g. for a shared [`RayonPool`](crate::parallel::RayonPool)
    pub fn executor<X: Executor>(self, executor: X) -> ParallelSearch<X> {
        ParallelSearch {
            fanout: self.fanout,
            early_exit: self.early_exit,
            executor,
        }
    }

    pub fn fanout_value(&self) -> usize {
        self.fanout
    }

    pub fn early_exit_enabled(&self) -> bool {
        self.early_exit
    }

    /// Index of the first element satisfying `pred`, or `seq.len()`
    pub fn scan<T, P>(&self, seq: &[T], pred: P) -> Result<usize, SearchError>
    where
        T: Sync,
        P: Fn(&T) -> bool + Sync,
    {
        self.try_scan(seq, |item| Ok::<_, Infallible>(pred(item)))
    }

    /// [`ParallelSearch::scan`] with the end sentinel mapped to `None`
    pub fn find_first<T, P>(&self, seq: &[T], pred: P) -> Result<Option<usize>, SearchError>
    where
        T: Sync,
        P: Fn(&T) -> bool + Sync,
    {
        let position = self.scan(seq, pred)?;
        Ok((position != seq.len()).then_some(position))
    }

    /// Search with a fallible predicate
    ///
    /// The outcome is decided by the lowest-indexed partition that either
    /// matched or failed, so a predicate error after the earliest match is
    /// ignored exactly as a sequential scan would never reach it.
    pub fn try_scan<T, P, Er>(&self, seq: &[T], pred: P) -> Result<usize, SearchError>
    where
        T: Sync,
        P: Fn(&T) -> Result<bool, Er> + Sync,
        Er: Into<BoxError> + Send,
    {
        check_fanout(self.fanout)?;

        let last = seq.len();
        if last == 0 {
            // Nothing to partition, skip spawning degenerate workers
            return Ok(last);
        }

        let partitions = plan_partitions(0..last, self.fanout)?;
        debug!(
            "searching {} elements across {} partitions (chunk {}, early exit {})",
            last,
            partitions.len(),
            last / self.fanout,
            self.early_exit
        );

        let earliest = AtomicUsize::new(NO_HIT);
        let stop = self.early_exit.then_some(&earliest);
        let outcomes = self.executor.run(partitions.len(), |index| {
            scan_partition(seq, partitions[index].clone(), &pred, index, stop)
        })?;

        resolve(outcomes, &partitions, last)
    }
}

/// Free-function form with the default fanout and scoped threads
pub fn parallel_scan<T, P>(seq: &[T], pred: P) -> Result<usize, SearchError>
where
    T: Sync,
    P: Fn(&T) -> bool + Sync,
{
    ParallelSearch::new().scan(seq, pred)
}

/// Scan one partition, optionally giving up once an earlier partition has hit
fn scan_partition<T, P, Er>(
    seq: &[T],
    range: Partition,
    pred: &P,
    index: usize,
    stop: Option<&AtomicUsize>,
) -> Result<usize, Er>
where
    P: Fn(&T) -> Result<bool, Er>,
{
    let Some(earliest) = stop else {
        return try_scan_range(seq, range, pred);
    };

    let end = range.end;
    for block_start in range.step_by(CANCEL_CHECK_INTERVAL) {
        if earliest.load(Ordering::Relaxed) < index {
            return Ok(end);
        }

        let block: Range<usize> = block_start..end.min(block_start + CANCEL_CHECK_INTERVAL);
        let block_end = block.end;
        let found = try_scan_range(seq, block, pred).inspect_err(|_| {
            earliest.fetch_min(index, Ordering::Relaxed);
        })?;

        if found != block_end {
            earliest.fetch_min(index, Ordering::Relaxed);
            return Ok(found);
        }
    }
    Ok(end)
}

/// Read joined outcomes in partition order and pick the earliest decision
fn resolve<Er>(
    outcomes: Vec<JobOutcome<Result<usize, Er>>>,
    partitions: &[Partition],
    last: usize,
) -> Result<usize, SearchError>
where
    Er: Into<BoxError>,
{
    for (index, (outcome, partition)) in outcomes.into_iter().zip(partitions).enumerate() {
        match outcome {
            Ok(Ok(found)) if found != partition.end => return Ok(found),
            Ok(Ok(_)) => continue,
            Ok(Err(source)) => {
                warn!("predicate failed in partition {}", index);
                return Err(SearchError::Predicate {
                    partition: index,
                    source: source.into(),
                });
            }
            Err(payload) => {
                let message = panic_message(&*payload);
                warn!("worker for partition {} panicked: {}", index, message);
                return Err(SearchError::WorkerPanicked {
                    partition: index,
                    message,
                });
            }
        }
    }
    Ok(last)
}
