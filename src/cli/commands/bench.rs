//! Bench command implementation
//!
//! Generates the data set, times every find variant and prints one line per
//! benchmark. A failed benchmark is reported and the rest still run; the
//! command exits non-zero if any of them failed.

use crate::bench::{BenchOutcome, BenchParameters, FindBench};
use crate::cli::{BenchArgs, Output, OutputFormat};
use crate::config::ParscanConfig;
use anyhow::{Context, Result, bail};
use serde::Serialize;

/// JSON document emitted with `--format json`
#[derive(Serialize)]
struct BenchRun<'a> {
    parameters: &'a BenchParameters,
    results: &'a [BenchOutcome],
}

/// Execute the bench command
pub fn execute(args: &BenchArgs, config_path: Option<&str>, format: OutputFormat, output: &Output) -> Result<()> {
    let settings = ParscanConfig::load_with(config_path, Some(&args.overrides()))?.settings()?;
    if format == OutputFormat::Text {
        output.verbose(&format!(
            "seed {}, {} pool thread(s) requested",
            settings.bench.seed, settings.search.pool_threads
        ));
    }

    let spinner = output.spinner(&format!("Generating {} elements...", settings.bench.size));
    let bench = FindBench::prepare(&settings).context("Failed to prepare benchmark data");
    let bench = match bench {
        Ok(bench) => bench,
        Err(error) => {
            spinner.finish_and_clear();
            return Err(error);
        }
    };

    let params = bench.parameters();
    if format == OutputFormat::Text {
        spinner.suspend(|| print_parameters(params, output));
    }

    let total = bench.len();
    let mut current = 0;
    let outcomes = bench.run(|label| {
        current += 1;
        spinner.set_message(format!("[{current}/{total}] {label}"));
    });
    spinner.finish_and_clear();

    match format {
        OutputFormat::Json => {
            let run = BenchRun {
                parameters: params,
                results: &outcomes,
            };
            println!("{}", serde_json::to_string_pretty(&run)?);
        }
        OutputFormat::Text => {
            for outcome in &outcomes {
                match outcome {
                    BenchOutcome::Measured(measurement) => {
                        output.report(&measurement.report, measurement.spread.as_ref())
                    }
                    BenchOutcome::Failed { label, error } => output.error(&format!("{label}: {error}")),
                }
            }
        }
    }

    let failed = outcomes.iter().filter(|o| o.is_failed()).count();
    if failed > 0 {
        bail!("{failed} of {} benchmarks failed", outcomes.len());
    }
    Ok(())
}

fn print_parameters(params: &BenchParameters, output: &Output) {
    output.header("Find benchmark");
    output.key_value("elements:", &params.size.to_string(), false);
    output.key_value("target:", &format!("{} (value {})", params.target, params.needle), false);
    let expected = if params.expected == params.size {
        "end (not present)".to_string()
    } else {
        params.expected.to_string()
    };
    output.key_value("position:", &expected, true);
    output.key_value("fanout:", &params.fanout.to_string(), false);
    output.key_value("executor:", &params.executor, false);
    output.key_value("early exit:", &params.early_exit.to_string(), false);
    output.key_value(
        "trials:",
        &format!("{} x {} call(s)", params.trials, params.repeats),
        false,
    );
    if params.windows > 0 {
        output.key_value("windows:", &params.windows.to_string(), false);
    }
    output.blank_line();
}
