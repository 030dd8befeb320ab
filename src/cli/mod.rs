//! Command-line interface for parscan
//!
//! Wires configuration, logging and the benchmark driver together. All real
//! work lives in the library modules; this layer only parses and prints.

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::config::{BenchOverrides, CliOverrides, SearchOverrides};
use crate::data::Target;
use crate::parallel::ExecutorKind;

mod commands;
mod output;

pub use output::Output;

/// parscan - parallel find-first search and benchmark harness
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Enable quiet output (minimal)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Time sequential and parallel find over generated data
    Bench(BenchArgs),
    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Show version information
    Version,
}

/// Benchmark options; anything left unset falls back to configuration
#[derive(Args, Debug, Default)]
pub struct BenchArgs {
    /// Number of elements to search
    #[arg(long)]
    pub size: Option<usize>,

    /// Timed trials per benchmark
    #[arg(short, long)]
    pub trials: Option<u32>,

    /// Calls per timed trial
    #[arg(long)]
    pub repeats: Option<u32>,

    /// Extra timing windows per variant, summarised as mean and spread
    #[arg(short, long)]
    pub windows: Option<u32>,

    /// Number of partitions for the parallel search
    #[arg(short, long)]
    pub fanout: Option<usize>,

    /// How partitions are executed
    #[arg(long, value_enum)]
    pub executor: Option<ExecutorKind>,

    /// Worker threads for the pool executor (0 = number of CPUs)
    #[arg(long)]
    pub pool_threads: Option<usize>,

    /// Stop scanning later partitions once an earlier one has matched
    #[arg(long)]
    pub early_exit: bool,

    /// Which value to search for
    #[arg(long, value_enum)]
    pub target: Option<Target>,

    /// Seed for the generated data
    #[arg(long)]
    pub seed: Option<u64>,

    /// Also time an in-place sort that is reset before every trial
    #[arg(long)]
    pub sort: bool,
}

impl BenchArgs {
    /// Flags as a configuration layer; unset flags stay out of the merge
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            search: SearchOverrides {
                fanout: self.fanout,
                early_exit: self.early_exit.then_some(true),
                executor: self.executor,
                pool_threads: self.pool_threads,
            },
            bench: BenchOverrides {
                size: self.size,
                trials: self.trials,
                repeats: self.repeats,
                windows: self.windows,
                seed: self.seed,
                target: self.target,
                sort: self.sort.then_some(true),
            },
        }
    }
}

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the merged configuration
    Show {
        /// Dotted path of a single section or key, e.g. `search` or `bench.trials`
        section: Option<String>,
    },
    /// Validate configuration
    Validate,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);

        // Initialize output handler with global verbose and quiet settings
        let output = Output::new(self.verbose > 0, self.quiet);
        let config = self.config.as_deref();

        match self.command {
            Some(Commands::Bench(args)) => commands::bench::execute(&args, config, self.format, &output),
            Some(Commands::Config(cmd)) => commands::config::execute(cmd, config, self.format, &output),
            Some(Commands::Version) => commands::version::execute(&output),
            None => {
                // Show help when no command is provided
                let mut cmd = Cli::command();
                cmd.print_help()?;
                Ok(())
            }
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => tracing_subscriber::EnvFilter::new("warn"),
        1 => tracing_subscriber::EnvFilter::new("info"),
        2 => tracing_subscriber::EnvFilter::new("debug"),
        _ => tracing_subscriber::EnvFilter::new("trace"),
    });

    // try_init so a second Cli::run in the same process does not panic
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
