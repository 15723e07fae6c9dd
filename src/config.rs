//! Layered configuration: serde defaults, optional TOML file, `RETDIST_*` env

use crate::errors::InputError;
use crate::report::WindowOptions;
use crate::units::DISPLAY_PRECISION;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix for environment overrides, e.g. `RETDIST_DISPLAY_PRECISION=3`
pub const ENV_PREFIX: &str = "RETDIST";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Ticker used in the total-return label
    pub symbol: String,
    /// Daily bar CSV to analyse
    pub input: Option<PathBuf>,
    pub format: OutputFormat,
    pub display_precision: u32,
    pub parallel: bool,
    pub histograms: bool,
    /// Fallback filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            symbol: "TICKER".to_string(),
            input: None,
            format: OutputFormat::Table,
            display_precision: DISPLAY_PRECISION,
            parallel: true,
            histograms: true,
            log_level: "info".to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Load defaults, then `path` (required when given), then the environment
    pub fn load(path: Option<&Path>) -> Result<Self, InputError> {
        Self::build(path, None, environment())
    }

    /// Parse a TOML document on top of the defaults, without the environment
    pub fn from_toml_str(toml: &str) -> Result<Self, InputError> {
        Self::build(None, Some(toml), None)
    }

    fn build(
        path: Option<&Path>,
        toml: Option<&str>,
        env: Option<config::Environment>,
    ) -> Result<Self, InputError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        if let Some(toml) = toml {
            builder = builder.add_source(config::File::from_str(toml, config::FileFormat::Toml));
        }
        if let Some(env) = env {
            builder = builder.add_source(env);
        }

        let config: AnalysisConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if self.symbol.trim().is_empty() {
            return Err(InputError::ConfigError {
                message: "symbol must not be empty".to_string(),
            });
        }
        if self.display_precision > 10 {
            return Err(InputError::ConfigError {
                message: format!(
                    "display_precision {} exceeds 10 decimal places",
                    self.display_precision
                ),
            });
        }
        Ok(())
    }

    pub fn window_options(&self) -> WindowOptions {
        WindowOptions {
            parallel: self.parallel,
            histograms: self.histograms,
            display_precision: self.display_precision,
        }
    }
}

fn environment() -> Option<config::Environment> {
    Some(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
}
