use std::ops::Range;

use super::SearchError;

/// Contiguous sub-range handed to one worker
pub type Partition = Range<usize>;

/// Largest accepted fanout
///
/// Every partition gets its own job, and with the default executor its own OS
/// thread, so anything beyond this is a configuration mistake.
pub const MAX_FANOUT: usize = 4096;

/// Reject fanouts that cannot be planned
pub(crate) fn check_fanout(fanout: usize) -> Result<(), SearchError> {
    if fanout == 0 || fanout > MAX_FANOUT {
        return Err(SearchError::InvalidFanout(fanout));
    }
    Ok(())
}

/// Split `range` into `fanout` contiguous, non-overlapping partitions
///
/// Every partition but the last holds `len / fanout` positions; the last one
/// absorbs the remainder up to `range.end`. When `len < fanout` the leading
/// partitions are empty, which the scan tolerates.
pub fn plan_partitions(range: Range<usize>, fanout: usize) -> Result<Vec<Partition>, SearchError> {
    check_fanout(fanout)?;

    let chunk = range.len() / fanout;
    let mut partitions = Vec::with_capacity(fanout);
    let mut start = range.start;

    for _ in 0..fanout - 1 {
        partitions.push(start..start + chunk);
        start += chunk;
    }
    partitions.push(start..range.end);

    Ok(partitions)
}
