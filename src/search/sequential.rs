//! Sequential find-first scan
//!
//! Positions are plain indices into the slice. A scan that finds nothing
//! returns the end of the range it was given, never `None`, so partition
//! results can be compared against their own sub-range end.

use std::ops::Range;

/// Index of the first element of `seq` satisfying `pred`, or `seq.len()`
pub fn scan<T, P>(seq: &[T], pred: P) -> usize
where
    P: FnMut(&T) -> bool,
{
    scan_range(seq, 0..seq.len(), pred)
}

/// Index of the first element in `seq[range]` satisfying `pred`, or `range.end`
///
/// The returned index is absolute, not relative to `range.start`.
///
/// # Panics
/// Panics if `range` is out of bounds for `seq`, like slice indexing does.
pub fn scan_range<T, P>(seq: &[T], range: Range<usize>, mut pred: P) -> usize
where
    P: FnMut(&T) -> bool,
{
    let mut position = range.start;
    for item in &seq[range] {
        if pred(item) {
            break;
        }
        position += 1;
    }
    position
}

/// Fallible variant of [`scan_range`]
///
/// Stops at the first hit or the first error, whichever comes first.
pub fn try_scan_range<T, P, E>(seq: &[T], range: Range<usize>, mut pred: P) -> Result<usize, E>
where
    P: FnMut(&T) -> Result<bool, E>,
{
    let mut position = range.start;
    for item in &seq[range] {
        if pred(item)? {
            break;
        }
        position += 1;
    }
    Ok(position)
}

/// Scan any input iterator, no random access required
///
/// Returns how many elements were stepped over before the first hit, which is
/// the element count when nothing matches.
pub fn scan_iter<I, P>(iter: I, mut pred: P) -> usize
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> bool,
{
    let mut position = 0;
    for item in iter {
        if pred(&item) {
            break;
        }
        position += 1;
    }
    position
}

/// [`scan`] with the end sentinel mapped to `None`
pub fn find_first<T, P>(seq: &[T], pred: P) -> Option<usize>
where
    P: FnMut(&T) -> bool,
{
    let position = scan(seq, pred);
    (position != seq.len()).then_some(position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_finds_first_match() {
        let values = [5, 3, 8, 1, 9, 2, 7];
        assert_eq!(scan(&values, |&v| v == 8), 2);
        assert_eq!(scan(&values, |&v| v > 4), 0);
    }

    #[test]
    fn test_scan_returns_end_when_nothing_matches() {
        let values: Vec<i32> = (0..16).collect();
        assert_eq!(scan(&values, |&v| v > 100), values.len());
    }

    #[test]
    fn test_scan_empty() {
        let values: [u8; 0] = [];
        assert_eq!(scan(&values, |_| true), 0);
        assert_eq!(find_first(&values, |_| true), None);
    }

    #[test]
    fn test_scan_range_is_absolute() {
        let values = [1, 2, 3, 1, 2, 3];
        assert_eq!(scan_range(&values, 2..6, |&v| v == 1), 3);
        // Range end is the sentinel, not seq.len()
        assert_eq!(scan_range(&values, 0..2, |&v| v == 3), 2);
        assert_eq!(scan_range(&values, 4..4, |_| true), 4);
    }

    #[test]
    fn test_try_scan_range_stops_at_first_error() {
        let values = [1, 2, 3, 4];
        let mut calls = 0;
        let result: Result<usize, String> = try_scan_range(&values, 0..4, |&v| {
            calls += 1;
            if v == 2 { Err(format!("bad {v}")) } else { Ok(v == 4) }
        });
        assert_eq!(result, Err("bad 2".to_string()));
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_try_scan_range_hit_before_error() {
        let values = [1, 2, 3];
        let result: Result<usize, String> =
            try_scan_range(&values, 0..3, |&v| if v == 3 { Err("late".into()) } else { Ok(v == 2) });
        assert_eq!(result, Ok(1));
    }

    #[test]
    fn test_scan_iter_on_non_random_access_input() {
        let list: std::collections::LinkedList<i32> = [4, 6, 9, 12].into_iter().collect();
        assert_eq!(scan_iter(&list, |v| **v % 3 == 0), 2);
        assert_eq!(scan_iter(list.iter(), |v| **v > 50), 4);
    }

    #[test]
    fn test_find_first() {
        let words = ["alpha", "beta", "gamma"];
        assert_eq!(find_first(&words, |w| w.starts_with('g')), Some(2));
        assert_eq!(find_first(&words, |w| w.is_empty()), None);
    }
}
