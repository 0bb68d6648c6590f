//! Calculate one day's flock metrics

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use shared::{calculate, display, validate_inputs, Band, Calculation, UnitSystem};
use tabled::Tabled;
use tracing::info;

use crate::config::Config;
use crate::output::{
    color_band, gauge_bar, print_error, print_info, print_success, print_warning, render_table,
    OutputFormat,
};
use crate::scenario::Scenario;

#[derive(Debug, Args)]
pub struct CalcArgs {
    /// Scenario file (TOML); flags override its values
    #[arg(long, short)]
    pub scenario: Option<PathBuf>,

    /// Flock name shown in the report
    #[arg(long)]
    pub flock: Option<String>,

    /// Unit system (imperial, metric)
    #[arg(long, value_parser = parse_units)]
    pub units: Option<UnitSystem>,

    /// Number of birds
    #[arg(long)]
    pub birds: Option<i64>,

    /// Eggs collected today
    #[arg(long)]
    pub eggs: Option<i64>,

    /// Average egg weight (oz or g)
    #[arg(long)]
    pub egg_weight: Option<f64>,

    /// Feed consumed today (lb or kg)
    #[arg(long)]
    pub feed: Option<f64>,

    /// Bag weight (lb or kg)
    #[arg(long)]
    pub bag_weight: Option<f64>,

    /// Bag price
    #[arg(long)]
    pub bag_price: Option<f64>,

    /// Alternative feed amount (lb or kg)
    #[arg(long)]
    pub alt_amount: Option<f64>,

    /// Alternative feed price per lb or kg
    #[arg(long)]
    pub alt_price: Option<f64>,

    /// Leave an empty bag weight or price empty
    #[arg(long)]
    pub no_default_prices: bool,
}

fn parse_units(value: &str) -> Result<UnitSystem, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "imperial" => Ok(UnitSystem::Imperial),
        "metric" => Ok(UnitSystem::Metric),
        other => Err(format!("unknown unit system '{}'", other)),
    }
}

impl CalcArgs {
    fn overrides(&self) -> Scenario {
        Scenario {
            flock: self.flock.clone(),
            units: self.units,
            birds: self.birds,
            eggs: self.eggs,
            egg_weight: self.egg_weight,
            feed: self.feed,
            bag_weight: self.bag_weight,
            bag_price: self.bag_price,
            alt_amount: self.alt_amount,
            alt_price: self.alt_price,
        }
    }
}

/// JSON envelope for one calculation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<'a> {
    pub generated_at: DateTime<Utc>,
    pub flock: &'a str,
    pub calculation: &'a Calculation,
}

impl<'a> Report<'a> {
    pub fn new(flock: &'a str, calculation: &'a Calculation) -> Self {
        Self {
            generated_at: Utc::now(),
            flock,
            calculation,
        }
    }
}

/// Row for the metrics table
#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Band")]
    band: String,
}

fn band_for(calc: &Calculation, label: &str) -> Option<Band> {
    match label {
        "FCR" => calc.bands.fcr,
        "Lay rate" => calc.bands.lay,
        "Feed per bird" => calc.bands.feed_per_bird,
        _ => None,
    }
}

fn metric_rows(calc: &Calculation) -> Vec<MetricRow> {
    display::tiles(&calc.derived)
        .into_iter()
        .map(|tile| MetricRow {
            metric: tile.label,
            band: color_band(band_for(calc, tile.label)),
            value: tile.value,
        })
        .collect()
}

/// Run the calculation and print the report
pub fn run(args: &CalcArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let base = match &args.scenario {
        Some(path) => Scenario::load(path)
            .with_context(|| format!("Failed to load scenario {}", path.display()))?,
        None => Scenario::default(),
    };
    let scenario = base.merge(args.overrides());
    let mut inputs = scenario.to_inputs(config.defaults.units);

    let issues = validate_inputs(&inputs);
    if !issues.is_empty() {
        for issue in &issues {
            print_error(&issue.to_string());
        }
        bail!("{} input issue(s), nothing calculated", issues.len());
    }

    if config.defaults.fill_missing_prices && !args.no_default_prices {
        config.prices.apply(&mut inputs);
    }

    let calc = calculate(&inputs);
    info!(
        flock = scenario.flock_name(),
        units = %calc.units,
        computable = calc.derived.fcr.is_some(),
        "Calculated flock metrics"
    );

    let report = Report::new(scenario.flock_name(), &calc);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => print_report(&report),
    }

    if calc.has_errors() {
        bail!("{}", calc.plausibility.error_messages().join(" "));
    }
    Ok(())
}

fn print_report(report: &Report<'_>) {
    let calc = report.calculation;
    let title = if report.flock.is_empty() {
        "Flock Report".to_string()
    } else {
        format!("Flock Report: {}", report.flock)
    };
    println!("{}", title.bold());
    println!("{}", "=".repeat(50));
    println!(
        "Units: {}    Birds: {}    Eggs: {}",
        calc.units.to_string().cyan(),
        calc.bird_count,
        calc.egg_count
    );
    println!();

    println!("{}", render_table(&metric_rows(calc)));
    println!();

    println!("Efficiency  {}", gauge_bar(calc.scores.fcr));
    println!("Economy     {}", gauge_bar(calc.scores.econ));
    println!("Lay         {}", gauge_bar(calc.scores.lay));
    if let Some(rating) = calc.rating {
        println!("Rating:     {} ({})", rating.to_string().bold(), rating.description());
    }
    println!();

    for message in calc.plausibility.error_messages() {
        print_error(&message);
    }
    for message in calc.plausibility.warning_messages() {
        print_warning(&message);
    }
    for advisory in &calc.advisories {
        print_info(advisory.message());
    }
    if calc.plausibility.is_clean() && calc.advisories.is_empty() {
        print_success("All figures look plausible");
    }

    println!();
    println!(
        "Generated: {}",
        report
            .generated_at
            .format("%Y-%m-%d %H:%M UTC")
            .to_string()
            .dimmed()
    );
}
