use std::time::{Duration, Instant};

/// Accumulated wall-clock time of one harness invocation
///
/// `total` is the sum over all trials, not an average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub total: Duration,
    /// Number of timed windows
    pub trials: u32,
    /// Calls of the timed operation inside each window
    pub repeats: u32,
}

impl Timing {
    pub fn new(total: Duration, trials: u32, repeats: u32) -> Self {
        Self { total, trials, repeats }
    }

    /// Total elapsed seconds across all trials
    pub fn as_secs_f64(&self) -> f64 {
        self.total.as_secs_f64()
    }

    /// Mean duration of one trial window
    pub fn mean(&self) -> Duration {
        if self.trials == 0 {
            Duration::ZERO
        } else {
            self.total / self.trials
        }
    }

    /// Mean duration of a single call of the timed operation
    pub fn per_call(&self) -> Duration {
        let calls = self.trials.saturating_mul(self.repeats);
        if calls == 0 {
            Duration::ZERO
        } else {
            self.total / calls
        }
    }

    /// Number of times the timed operation ran
    pub fn calls(&self) -> u64 {
        u64::from(self.trials) * u64::from(self.repeats)
    }
}

/// Time `timed_op` once per trial and sum the elapsed times
pub fn measure<F>(timed_op: F, trials: u32) -> Timing
where
    F: FnMut(),
{
    measure_with_reset(|| {}, timed_op, trials)
}

/// Like [`measure`], running `reset_op` untimed before every trial
///
/// Use the reset step to restore whatever a previous trial changed, such as
/// re-shuffling data that the timed operation sorts in place.
pub fn measure_with_reset<R, F>(mut reset_op: R, mut timed_op: F, trials: u32) -> Timing
where
    R: FnMut(),
    F: FnMut(),
{
    measure_stateful(&mut (), |_| reset_op(), |_| timed_op(), trials)
}

/// Reset-then-time loop over state both steps need mutable access to
///
/// ```rust
/// use parscan::timing::measure_stateful;
///
/// let original = vec![3, 1, 2];
/// let mut work = Vec::new();
/// let timing = measure_stateful(
///     &mut work,
///     |work| work.clone_from(&original),
///     |work| work.sort_unstable(),
///     3,
/// );
/// assert_eq!(timing.trials, 3);
/// assert_eq!(work, vec![1, 2, 3]);
/// ```
pub fn measure_stateful<S, R, F>(state: &mut S, mut reset_op: R, mut timed_op: F, trials: u32) -> Timing
where
    S: ?Sized,
    R: FnMut(&mut S),
    F: FnMut(&mut S),
{
    let mut total = Duration::ZERO;
    for _ in 0..trials {
        reset_op(state);
        let start = Instant::now();
        timed_op(state);
        total += start.elapsed();
    }
    Timing::new(total, trials, 1)
}

/// Fallible [`measure`]; the first error aborts the measurement
pub fn try_measure<F, E>(timed_op: F, trials: u32) -> Result<Timing, E>
where
    F: FnMut() -> Result<(), E>,
{
    try_measure_with_reset(|| {}, timed_op, trials)
}

/// Fallible [`measure_with_reset`]; the first error aborts the measurement
pub fn try_measure_with_reset<R, F, E>(mut reset_op: R, mut timed_op: F, trials: u32) -> Result<Timing, E>
where
    R: FnMut(),
    F: FnMut() -> Result<(), E>,
{
    let mut total = Duration::ZERO;
    for _ in 0..trials {
        reset_op();
        let start = Instant::now();
        let outcome = timed_op();
        total += start.elapsed();
        outcome?;
    }
    Ok(Timing::new(total, trials, 1))
}

/// Run `timed_op` `repeats` times back to back inside a single timed window
///
/// For operations so cheap that reading the clock per call would dominate.
pub fn measure_repeated<F>(mut timed_op: F, repeats: u32) -> Timing
where
    F: FnMut(),
{
    let start = Instant::now();
    for _ in 0..repeats {
        timed_op();
    }
    Timing::new(start.elapsed(), 1, repeats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    const NAP: Duration = Duration::from_millis(5);

    #[test]
    fn test_zero_trials() {
        let mut calls = 0;
        let timing = measure(|| calls += 1, 0);
        assert_eq!(calls, 0);
        assert_eq!(timing.total, Duration::ZERO);
        assert_eq!(timing.mean(), Duration::ZERO);
        assert_eq!(timing.per_call(), Duration::ZERO);
    }

    #[test]
    fn test_measure_sums_trials() {
        let one = measure(|| thread::sleep(NAP), 1);
        let four = measure(|| thread::sleep(NAP), 4);

        assert_eq!(four.trials, 4);
        assert!(one.total >= NAP);
        assert!(four.total >= NAP * 4);
        // Sleep overshoot is bounded well under a full extra nap per trial on CI
        assert!(four.total < NAP * 4 + Duration::from_millis(250));
        assert!(four.mean() >= NAP);
    }

    #[test]
    fn test_reset_runs_before_each_trial() {
        let log = std::cell::RefCell::new(Vec::new());
        measure_with_reset(|| log.borrow_mut().push("reset"), || log.borrow_mut().push("timed"), 3);
        assert_eq!(*log.borrow(), vec!["reset", "timed", "reset", "timed", "reset", "timed"]);
    }

    #[test]
    fn test_reset_keeps_in_place_work_honest() {
        let original: Vec<u32> = (0..2_000).rev().collect();

        // Without a reset, every trial after the first sorts sorted data
        let mut sorted_inputs = 0;
        let mut work = original.clone();
        measure_stateful(
            &mut work,
            |_| {},
            |work| {
                if work.is_sorted() {
                    sorted_inputs += 1;
                }
                work.sort_unstable();
            },
            5,
        );
        assert_eq!(sorted_inputs, 4);

        // With a reset, each trial starts from the original order
        let mut sorted_inputs = 0;
        let mut work = Vec::new();
        measure_stateful(
            &mut work,
            |work| work.clone_from(&original),
            |work| {
                if work.is_sorted() {
                    sorted_inputs += 1;
                }
                work.sort_unstable();
            },
            5,
        );
        assert_eq!(sorted_inputs, 0);
    }

    #[test]
    fn test_try_measure_stops_at_first_error() {
        let mut calls = 0;
        let result = try_measure(
            || {
                calls += 1;
                if calls == 2 { Err("second call failed") } else { Ok(()) }
            },
            5,
        );
        assert_eq!(result, Err("second call failed"));
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_try_measure_success() {
        let timing = try_measure(|| Ok::<(), String>(()), 3).unwrap();
        assert_eq!(timing.trials, 3);
        assert_eq!(timing.calls(), 3);
    }

    #[test]
    fn test_measure_repeated_single_window() {
        let mut calls = 0;
        let timing = measure_repeated(|| calls += 1, 1_000);
        assert_eq!(calls, 1_000);
        assert_eq!(timing.trials, 1);
        assert_eq!(timing.repeats, 1_000);
        assert_eq!(timing.calls(), 1_000);
        assert!(timing.per_call() <= timing.total);
    }
}
