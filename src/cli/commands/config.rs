//! Configuration command implementations

use crate::cli::{ConfigCommands, Output, OutputFormat};
use crate::config::ParscanConfig;
use anyhow::{Context, Result};

/// Execute config commands
pub fn execute(cmd: ConfigCommands, config_path: Option<&str>, format: OutputFormat, output: &Output) -> Result<()> {
    let config = ParscanConfig::load_with(config_path, None)?;
    match cmd {
        ConfigCommands::Show { section } => show(&config, section.as_deref(), format),
        ConfigCommands::Validate => validate(&config, output),
    }
}

fn show(config: &ParscanConfig, section: Option<&str>, format: OutputFormat) -> Result<()> {
    // Refuse to print a merge the benchmarks would reject
    config.settings()?;

    let value = match section {
        Some(path) => config
            .get_section(path)
            .with_context(|| format!("No configuration section '{path}'"))?,
        None => config.get_full_config()?,
    };

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&value)?,
        OutputFormat::Text if value.is_object() => {
            toml::to_string_pretty(&value).context("Failed to render configuration")?
        }
        // A single key renders as its bare value
        OutputFormat::Text => value.to_string(),
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

fn validate(config: &ParscanConfig, output: &Output) -> Result<()> {
    output.header("Validating Configuration");

    let settings = config.settings()?;
    output.key_value("fanout:", &settings.search.fanout.to_string(), false);
    output.key_value("executor:", &settings.search.executor.to_string(), false);
    output.key_value("trials:", &settings.bench.trials.to_string(), false);
    output.success("Configuration is valid");
    Ok(())
}
