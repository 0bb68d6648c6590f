//! Show the feed prices used for empty bag fields

use anyhow::Result;
use serde::Serialize;
use shared::{FeedPriceDefaults, UnitSystem};
use tabled::Tabled;

use crate::output::{print_table, OutputFormat};

/// Row for the price defaults table
#[derive(Tabled, Serialize)]
#[serde(rename_all = "camelCase")]
struct PriceRow {
    #[tabled(rename = "Units")]
    units: UnitSystem,
    #[tabled(rename = "Bag")]
    bag: String,
    #[tabled(rename = "Unit price")]
    unit_price: String,
    #[tabled(rename = "Bag price")]
    bag_price: String,
}

fn price_rows(prices: &FeedPriceDefaults) -> Vec<PriceRow> {
    [
        (UnitSystem::Imperial, prices.imperial_price_per_lb),
        (UnitSystem::Metric, prices.metric_price_per_kg),
    ]
    .into_iter()
    .map(|(units, unit_price)| PriceRow {
        units,
        bag: format!("{} {}", prices.bag_weight(units), units.feed_unit()),
        unit_price: format!("${}/{}", unit_price, units.feed_unit()),
        bag_price: format!("${}", prices.bag_price(units)),
    })
    .collect()
}

pub fn show_defaults(prices: &FeedPriceDefaults, format: OutputFormat) -> Result<()> {
    print_table(&price_rows(prices), format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_rows() {
        let rows = price_rows(&FeedPriceDefaults::default());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].bag, "50 lb");
        assert_eq!(rows[0].unit_price, "$0.45/lb");
        assert_eq!(rows[0].bag_price, "$22.50");
        assert_eq!(rows[1].bag, "25 kg");
        assert_eq!(rows[1].bag_price, "$24.75");
    }

    #[test]
    fn test_rows_serialize_units_lowercase() {
        let rows = price_rows(&FeedPriceDefaults::default());
        let value = serde_json::to_value(&rows).unwrap();
        assert_eq!(value[1]["units"], "metric");
        assert_eq!(value[1]["bagPrice"], "$24.75");
    }
}
