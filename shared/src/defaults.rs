//! Fallback feed prices for when the price fields are left empty

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::units::{parse_optional_number, RawInputs, RawValue, UnitSystem};

/// Typical bag sizes and feed prices per unit system
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedPriceDefaults {
    pub imperial_bag_lb: f64,
    /// $/lb
    pub imperial_price_per_lb: f64,
    pub metric_bag_kg: f64,
    /// $/kg
    pub metric_price_per_kg: f64,
}

impl Default for FeedPriceDefaults {
    fn default() -> Self {
        Self {
            imperial_bag_lb: 50.0,
            imperial_price_per_lb: 0.45,
            metric_bag_kg: 25.0,
            metric_price_per_kg: 0.99,
        }
    }
}

impl FeedPriceDefaults {
    /// Default bag weight in the unit system's feed unit
    pub fn bag_weight(&self, units: UnitSystem) -> f64 {
        match units {
            UnitSystem::Imperial => self.imperial_bag_lb,
            UnitSystem::Metric => self.metric_bag_kg,
        }
    }

    /// Default bag price: default bag weight times unit price, to the cent
    pub fn bag_price(&self, units: UnitSystem) -> Decimal {
        let unit_price = match units {
            UnitSystem::Imperial => self.imperial_price_per_lb,
            UnitSystem::Metric => self.metric_price_per_kg,
        };
        let bag = Decimal::from_f64(self.bag_weight(units)).unwrap_or_default();
        let price = Decimal::from_f64(unit_price).unwrap_or_default();
        let mut cents = (bag * price).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        cents.rescale(2);
        cents
    }

    /// Fill an empty bag weight and/or bag price. Entered values are kept.
    pub fn apply(&self, inputs: &mut RawInputs) {
        let units = inputs.units;
        if is_blank(inputs.bag_weight.as_ref()) {
            inputs.bag_weight = Some(RawValue::Number(self.bag_weight(units)));
        }
        if is_blank(inputs.bag_price.as_ref()) {
            inputs.bag_price = Some(RawValue::Text(self.bag_price(units).to_string()));
        }
    }
}

fn is_blank(value: Option<&RawValue>) -> bool {
    match value {
        None => true,
        Some(RawValue::Text(text)) => text.trim().is_empty(),
        Some(number) => parse_optional_number(Some(number)).is_none(),
    }
}
