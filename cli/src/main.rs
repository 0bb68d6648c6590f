//! Cluckulator command-line runner
//!
//! Calculates feed conversion, cost per egg and lay rate for one day of a
//! small laying flock, from flags or a scenario file.

mod commands;
mod config;
mod output;
mod scenario;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{calc, defaults};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use config::Config;

/// Cluckulator CLI
#[derive(Parser)]
#[command(name = "cluck")]
#[command(author, version, about = "Feed and production calculator for small laying flocks", long_about = None)]
pub struct Cli {
    /// Configuration file layered over config/{environment}
    #[arg(long, env = "CLUCK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (defaults to output.format from configuration)
    #[arg(long, short, value_enum)]
    pub format: Option<output::OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calculate metrics for one day's figures
    Calc(calc::CalcArgs),

    /// Show the bag sizes and prices used for empty price fields
    Defaults,
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_filter.as_str().into());
    let json = config.log_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let plain = (!config.log_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(plain)
        .init();
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config);
    tracing::debug!("Environment: {}", config.environment);

    let format = cli.format.unwrap_or(config.output.format);

    match &cli.command {
        Commands::Calc(args) => calc::run(args, &config, format)?,
        Commands::Defaults => defaults::show_defaults(&config.prices, format)?,
    }

    Ok(())
}
