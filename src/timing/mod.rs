//! Wall-clock timing harness
//!
//! Everything here runs on the calling thread. The harness only brackets the
//! operation it is given; any concurrency lives inside that operation.

mod report;
mod stats;
mod timer;

pub use report::Report;
pub use stats::{Sampler, Summary};
pub use timer::{
    Timing, measure, measure_repeated, measure_stateful, measure_with_reset, try_measure,
    try_measure_with_reset,
};

/// Keep a computed value alive so the optimiser cannot drop the work behind it
pub use std::hint::black_box;
