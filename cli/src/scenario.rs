//! One day's flock figures, from a TOML file and/or command-line flags

use std::path::Path;

use config::{ConfigError, File};
use serde::Deserialize;
use shared::{RawInputs, RawValue, UnitSystem};

/// Values as entered, in the scenario's own unit system
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Scenario {
    pub flock: Option<String>,
    pub units: Option<UnitSystem>,
    pub birds: Option<i64>,
    pub eggs: Option<i64>,
    /// oz or g per egg
    pub egg_weight: Option<f64>,
    /// lb or kg for the day
    pub feed: Option<f64>,
    pub bag_weight: Option<f64>,
    pub bag_price: Option<f64>,
    pub alt_amount: Option<f64>,
    /// $ per lb or kg of alternative feed
    pub alt_price: Option<f64>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        config::Config::builder()
            .add_source(File::from(path).required(true))
            .build()?
            .try_deserialize()
    }

    /// Values set in `overrides` replace ours
    pub fn merge(self, overrides: Scenario) -> Scenario {
        Scenario {
            flock: overrides.flock.or(self.flock),
            units: overrides.units.or(self.units),
            birds: overrides.birds.or(self.birds),
            eggs: overrides.eggs.or(self.eggs),
            egg_weight: overrides.egg_weight.or(self.egg_weight),
            feed: overrides.feed.or(self.feed),
            bag_weight: overrides.bag_weight.or(self.bag_weight),
            bag_price: overrides.bag_price.or(self.bag_price),
            alt_amount: overrides.alt_amount.or(self.alt_amount),
            alt_price: overrides.alt_price.or(self.alt_price),
        }
    }

    pub fn flock_name(&self) -> &str {
        self.flock.as_deref().map(str::trim).unwrap_or_default()
    }

    pub fn to_inputs(&self, default_units: UnitSystem) -> RawInputs {
        RawInputs {
            units: self.units.unwrap_or(default_units),
            feed_consumed: self.feed.map(RawValue::Number),
            avg_egg_weight: self.egg_weight.map(RawValue::Number),
            bag_weight: self.bag_weight.map(RawValue::Number),
            bag_price: self.bag_price.map(RawValue::Number),
            alt_amount: self.alt_amount.map(RawValue::Number),
            alt_price_per_unit: self.alt_price.map(RawValue::Number),
            egg_count: self.eggs.unwrap_or(0),
            bird_count: self.birds.unwrap_or(0),
        }
    }
}
