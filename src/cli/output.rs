//! Terminal output for parscan
//!
//! Keeps styling consistent across commands and honours `--verbose` and
//! `--quiet`. Machine-readable output bypasses this and goes straight to stdout.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::timing::{Report, Summary};

/// Output handler for consistent CLI formatting
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    /// Create a new output handler
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✔").green(), message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        // Errors are always shown, even in quiet mode
        eprintln!("{} {}", style("✖").red(), message);
    }

    /// Print a verbose message (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            println!("{} {}", style("ℹ").dim(), style(message).dim());
        }
    }

    /// Print a header/title
    pub fn header(&self, title: &str) {
        if !self.quiet {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    /// Print a category header with consistent styling
    pub fn category(&self, category: &str) {
        if !self.quiet {
            println!("\n{}", style(category).bold().cyan());
        }
    }

    /// Print a key-value pair with consistent styling
    pub fn key_value(&self, key: &str, value: &str, highlight: bool) {
        if !self.quiet {
            let styled_value = if highlight {
                style(value).green().bold()
            } else {
                style(value).white()
            };
            println!("  {:<14} {}", style(key).dim(), styled_value);
        }
    }

    /// Print one benchmark measurement
    ///
    /// Measurements are the point of the run, so they print even in quiet mode.
    pub fn report(&self, report: &Report, spread: Option<&Summary>) {
        println!("{} {}", style("⏱").cyan(), report);
        if let Some(spread) = spread {
            println!(
                "    {} {} windows: mean {:.6} s, stddev {:.6} s, min {:.6} s, max {:.6} s",
                style("•").cyan(),
                spread.samples,
                style(spread.mean).yellow(),
                spread.stddev,
                spread.min,
                spread.max
            );
        }
        if self.verbose && report.trials > 0 {
            println!(
                "    {} {:.9} s per call",
                style("•").cyan(),
                style(report.per_call).yellow()
            );
        }
    }

    /// Print blank line
    pub fn blank_line(&self) {
        if !self.quiet {
            println!();
        }
    }

    /// Create a spinner for indefinite progress
    pub fn spinner(&self, message: &str) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb.set_message(message.to_string());
        pb
    }
}
