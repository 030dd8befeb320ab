//! Find benchmark driver
//!
//! Times the crate's sequential and parallel find against the standard
//! library and rayon over one shared, seeded data set. Every variant is
//! checked against the sequential answer before it is timed; a variant that
//! fails or disagrees is reported and skipped, and the rest still run.
//!
//! With `windows` set, each find variant is also timed over that many
//! independent windows and reported with its mean and spread.

use anyhow::{Result, bail};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::data::{Target, random_permutation};
use crate::parallel::AnyExecutor;
use crate::search::{ParallelSearch, SearchError, scan};
use crate::timing::{Report, Sampler, Summary, Timing, black_box, measure_stateful, try_measure};

/// The find implementations being compared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindVariant {
    Sequential,
    Parallel,
    StdSequential,
    RayonFirst,
    RayonAny,
}

impl FindVariant {
    pub const ALL: [FindVariant; 5] = [
        FindVariant::Sequential,
        FindVariant::Parallel,
        FindVariant::StdSequential,
        FindVariant::RayonFirst,
        FindVariant::RayonAny,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FindVariant::Sequential => "Sequential find",
            FindVariant::Parallel => "Parallel find",
            FindVariant::StdSequential => "Std sequential find",
            FindVariant::RayonFirst => "Rayon parallel find",
            FindVariant::RayonAny => "Rayon parallel any-find",
        }
    }
}

/// Timed result of one benchmark
#[derive(Debug, Clone, Serialize)]
pub struct Measurement {
    #[serde(flatten)]
    pub report: Report,
    /// Spread over independent windows, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spread: Option<Summary>,
}

/// Result of one benchmark: a measurement or the reason it was skipped
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BenchOutcome {
    Measured(Measurement),
    Failed { label: String, error: String },
}

impl BenchOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, BenchOutcome::Failed { .. })
    }
}

/// Data set and search parameters shared by every variant
#[derive(Debug, Clone, Serialize)]
pub struct BenchParameters {
    pub size: usize,
    pub target: Target,
    pub needle: i32,
    /// Sequential answer; equals `size` when the needle is absent
    pub expected: usize,
    pub fanout: usize,
    pub executor: String,
    pub early_exit: bool,
    pub trials: u32,
    pub repeats: u32,
    pub windows: u32,
}

pub struct FindBench {
    data: Vec<i32>,
    search: ParallelSearch<AnyExecutor>,
    params: BenchParameters,
    sort: bool,
}

impl FindBench {
    /// Generate the data set and build the configured parallel search
    pub fn prepare(settings: &Settings) -> Result<Self> {
        let bench = &settings.bench;
        let data = random_permutation(bench.size, bench.seed)?;
        let needle = bench.target.needle(&data);
        let expected = scan(&data, |&v| v == needle);
        debug!("generated {} elements, needle {} at {}", data.len(), needle, expected);

        let executor = settings.search.executor.build(settings.search.pool_threads)?;
        let search = ParallelSearch::new()
            .fanout(settings.search.fanout)
            .early_exit(settings.search.early_exit)
            .executor(executor);

        let params = BenchParameters {
            size: data.len(),
            target: bench.target,
            needle,
            expected,
            fanout: settings.search.fanout,
            executor: settings.search.executor.to_string(),
            early_exit: settings.search.early_exit,
            trials: bench.trials,
            repeats: bench.repeats,
            windows: bench.windows,
        };

        Ok(Self {
            data,
            search,
            params,
            sort: bench.sort,
        })
    }

    pub fn parameters(&self) -> &BenchParameters {
        &self.params
    }

    /// Number of benchmarks [`FindBench::run`] will attempt
    pub fn len(&self) -> usize {
        FindVariant::ALL.len() + usize::from(self.sort)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run every benchmark, calling `on_start` with each label first
    pub fn run<F>(&self, mut on_start: F) -> Vec<BenchOutcome>
    where
        F: FnMut(&str),
    {
        let mut outcomes = Vec::with_capacity(self.len());

        for variant in FindVariant::ALL {
            let label = self.variant_label(variant);
            on_start(&label);
            outcomes.push(match self.measure_variant(variant, &label) {
                Ok(measurement) => {
                    info!("{}", measurement.report);
                    BenchOutcome::Measured(measurement)
                }
                Err(error) => {
                    warn!("benchmark '{}' failed: {:#}", label, error);
                    BenchOutcome::Failed {
                        label,
                        error: format!("{error:#}"),
                    }
                }
            });
        }

        if self.sort {
            let label = "In-place sort (reset each trial)";
            on_start(label);
            outcomes.push(BenchOutcome::Measured(Measurement {
                report: self.measure_sort(label),
                spread: None,
            }));
        }

        outcomes
    }

    fn variant_label(&self, variant: FindVariant) -> String {
        match variant {
            FindVariant::Parallel => format!(
                "{} ({} x {})",
                variant.label(),
                self.params.fanout,
                self.params.executor
            ),
            _ => variant.label().to_string(),
        }
    }

    /// Position of the needle according to `variant`, `data.len()` if absent
    fn find(&self, variant: FindVariant) -> Result<usize, SearchError> {
        let needle = self.params.needle;
        let data = &self.data;
        let position = match variant {
            FindVariant::Sequential => scan(data, |&v| v == needle),
            FindVariant::Parallel => self.search.scan(data, |&v| v == needle)?,
            FindVariant::StdSequential => data.iter().position(|&v| v == needle).unwrap_or(data.len()),
            FindVariant::RayonFirst => data
                .par_iter()
                .position_first(|&v| v == needle)
                .unwrap_or(data.len()),
            FindVariant::RayonAny => data
                .par_iter()
                .position_any(|&v| v == needle)
                .unwrap_or(data.len()),
        };
        Ok(position)
    }

    fn verify(&self, variant: FindVariant, position: usize) -> Result<()> {
        let expected = self.params.expected;
        let agrees = match variant {
            // Any matching element is a valid answer for position_any
            FindVariant::RayonAny => match self.data.get(position) {
                Some(&value) => value == self.params.needle,
                None => expected == self.data.len(),
            },
            _ => position == expected,
        };

        if !agrees {
            bail!("returned position {position}, sequential scan found {expected}");
        }
        Ok(())
    }

    fn measure_variant(&self, variant: FindVariant, label: &str) -> Result<Measurement> {
        self.verify(variant, self.find(variant)?)?;

        let repeats = self.params.repeats;
        let timing = try_measure(
            || {
                for _ in 0..repeats {
                    black_box(self.find(variant)?);
                }
                Ok::<(), SearchError>(())
            },
            self.params.trials,
        )?;

        let report = Report::new(label, &Timing { repeats, ..timing });
        let spread = self.sample_variant(variant)?;
        Ok(Measurement { report, spread })
    }

    /// Mean and spread over `windows` windows of `repeats` calls each
    fn sample_variant(&self, variant: FindVariant) -> Result<Option<Summary>, SearchError> {
        let sampler = Sampler::new(self.params.repeats, self.params.windows);
        let mut failure = None;
        let summary = sampler.run(|| {
            if failure.is_none()
                && let Err(error) = black_box(self.find(variant))
            {
                failure = Some(error);
            }
        });

        match failure {
            Some(error) => Err(error),
            None => Ok(summary),
        }
    }

    fn measure_sort(&self, label: &str) -> Report {
        let mut work = Vec::with_capacity(self.data.len());
        let timing = measure_stateful(
            &mut work,
            |work| work.clone_from(&self.data),
            |work| work.sort_unstable(),
            self.params.trials,
        );
        Report::new(label, &timing)
    }
}
