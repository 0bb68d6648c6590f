//! Configuration for the `cluck` runner
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. An explicit `--config` file
//! 4. Environment variable overrides with CLUCK_ prefix

use std::path::Path;

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{FeedPriceDefaults, UnitSystem};

use crate::output::OutputFormat;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// `tracing` filter used when RUST_LOG is unset
    pub log_filter: String,

    /// Emit log lines as JSON objects
    pub log_json: bool,

    pub output: OutputConfig,

    pub defaults: DefaultsConfig,

    /// Typical bag sizes and prices used to fill empty price fields
    pub prices: FeedPriceDefaults,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DefaultsConfig {
    /// Unit system when neither the scenario nor the flags name one
    pub units: UnitSystem,

    /// Fill empty bag weight and price from `prices`
    pub fill_missing_prices: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let environment =
            std::env::var("CLUCK_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let prices = FeedPriceDefaults::default();

        let mut builder = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("log_filter", "cluckulator_cli=info,shared=warn")?
            .set_default("log_json", false)?
            .set_default("output.format", "table")?
            .set_default("defaults.units", "imperial")?
            .set_default("defaults.fill_missing_prices", true)?
            .set_default("prices.imperial_bag_lb", prices.imperial_bag_lb)?
            .set_default("prices.imperial_price_per_lb", prices.imperial_price_per_lb)?
            .set_default("prices.metric_bag_kg", prices.metric_bag_kg)?
            .set_default("prices.metric_price_per_kg", prices.metric_price_per_kg)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false));

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            // Override with environment variables (CLUCK_ prefix)
            .add_source(
                Environment::with_prefix("CLUCK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
