use std::path::Path;

use anyhow::{Context, Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};

use super::{CliOverrides, Settings};

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

pub struct ParscanConfig {
    figment: Figment,
}

impl ParscanConfig {
    pub fn load() -> Result<Self> {
        Self::load_with(None, None)
    }

    pub fn load_with(custom_config: Option<&str>, cli_overrides: Option<&CliOverrides>) -> Result<Self> {
        tracing::trace!("CONFIG LOAD: Starting");

        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG)); // Embedded defaults

        // If custom config is specified, use only that + defaults + env vars
        if let Some(custom_path) = custom_config {
            // Figment skips missing files, which would quietly fall back to defaults
            if !Path::new(custom_path).is_file() {
                bail!("Configuration file not found: {custom_path}");
            }
            figment = match custom_path.rsplit('.').next() {
                Some("json") => figment.merge(Json::file(custom_path)),
                Some("yaml" | "yml") => figment.merge(Yaml::file(custom_path)),
                _ => figment.merge(Toml::file(custom_path)),
            };
        } else {
            let user_base = Self::user_config_base_path();
            figment = figment
                // User config - support multiple formats
                .merge(Toml::file(format!("{user_base}.toml")))
                .merge(Json::file(format!("{user_base}.json")))
                .merge(Yaml::file(format!("{user_base}.yaml")))
                // Repository config - support multiple formats
                .merge(Toml::file("parscan.toml"))
                .merge(Json::file("parscan.json"))
                .merge(Yaml::file("parscan.yaml"));
        }

        // Environment variables override every file
        figment = figment.merge(Env::prefixed("PARSCAN_").split("__"));

        // Command-line flags have the final say
        if let Some(overrides) = cli_overrides {
            tracing::trace!("CONFIG LOAD: Applying CLI overrides");
            figment = figment.merge(Serialized::defaults(overrides));
        }

        Ok(ParscanConfig { figment })
    }

    /// Extract and validate the typed settings
    pub fn settings(&self) -> Result<Settings> {
        let settings: Settings = self
            .figment
            .extract()
            .context("Failed to parse configuration")?;
        settings.validate()?;
        tracing::debug!("CONFIG LOAD: {:?}", settings);
        Ok(settings)
    }

    /// Get a nested object/section as JSON
    pub fn get_section(&self, path: &str) -> Result<serde_json::Value> {
        Ok(self.figment.extract_inner(path)?)
    }

    /// Get the full merged configuration as a structured value
    ///
    /// Unlike [`ParscanConfig::settings`] this keeps every merged key,
    /// including ones no setting reads.
    pub fn get_full_config(&self) -> Result<serde_json::Value> {
        Ok(self.figment.extract()?)
    }

    fn user_config_base_path() -> String {
        match std::env::var("HOME") {
            Ok(home) => format!("{home}/.config/parscan/config"),
            Err(_) => "~/.config/parscan/config".to_string(),
        }
    }
}
