//! Unit normalization
//!
//! Everything downstream of this module works in kilograms and grams. Form
//! values arrive in either unit system and may be numbers, numeric strings,
//! blanks or missing entirely; [`normalize`] turns them into a
//! [`MetricBundle`] without ever failing.

use serde::{Deserialize, Deserializer, Serialize};

/// Kilograms per avoirdupois pound.
pub const KG_PER_LB: f64 = 0.45359237;

/// Grams per avoirdupois ounce.
pub const G_PER_OZ: f64 = 28.349523125;

pub fn lb_to_kg(lb: f64) -> f64 {
    lb * KG_PER_LB
}

pub fn kg_to_lb(kg: f64) -> f64 {
    kg / KG_PER_LB
}

pub fn oz_to_g(oz: f64) -> f64 {
    oz * G_PER_OZ
}

pub fn g_to_oz(g: f64) -> f64 {
    g / G_PER_OZ
}

/// Unit system selected on the form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum UnitSystem {
    /// lb for feed and bags, oz for eggs
    Imperial,
    /// kg for feed and bags, g for eggs
    #[default]
    Metric,
}

impl UnitSystem {
    pub fn feed_unit(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "lb",
            UnitSystem::Metric => "kg",
        }
    }

    pub fn egg_weight_unit(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "oz",
            UnitSystem::Metric => "g",
        }
    }
}

impl From<&str> for UnitSystem {
    /// Anything other than `imperial` falls back to metric.
    fn from(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("imperial") {
            UnitSystem::Imperial
        } else {
            UnitSystem::Metric
        }
    }
}

impl From<String> for UnitSystem {
    fn from(value: String) -> Self {
        UnitSystem::from(value.as_str())
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitSystem::Imperial => write!(f, "Imperial"),
            UnitSystem::Metric => write!(f, "Metric"),
        }
    }
}

/// A form field as the browser hands it over: a number or the raw text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    /// Booleans, objects and arrays; never a number
    Other(serde_json::Value),
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

/// Parse an optional form value.
///
/// Absent, blank, unparsable and non-finite values all yield `None`.
pub fn parse_optional_number(value: Option<&RawValue>) -> Option<f64> {
    let parsed = match value? {
        RawValue::Number(n) => *n,
        RawValue::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        RawValue::Other(_) => return None,
    };
    parsed.is_finite().then_some(parsed)
}

/// Zero-fallback variant of [`parse_optional_number`].
pub fn number_or_zero(value: Option<&RawValue>) -> f64 {
    parse_optional_number(value).unwrap_or(0.0)
}

/// Parse a head or egg count; fractional entries truncate toward zero.
pub fn parse_count(value: Option<&RawValue>) -> i64 {
    number_or_zero(value).trunc() as i64
}

fn deserialize_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawValue>::deserialize(deserializer)?;
    Ok(parse_count(raw.as_ref()))
}

/// User-supplied form values for one calculation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawInputs {
    pub units: UnitSystem,
    /// lb or kg
    pub feed_consumed: Option<RawValue>,
    /// oz or g
    pub avg_egg_weight: Option<RawValue>,
    /// lb or kg
    pub bag_weight: Option<RawValue>,
    /// Currency per bag, independent of unit system
    pub bag_price: Option<RawValue>,
    /// lb or kg of alternative feed
    pub alt_amount: Option<RawValue>,
    /// Currency per lb or per kg of alternative feed
    pub alt_price_per_unit: Option<RawValue>,
    #[serde(deserialize_with = "deserialize_count")]
    pub egg_count: i64,
    #[serde(deserialize_with = "deserialize_count")]
    pub bird_count: i64,
}

impl RawInputs {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Bag price as entered, zero when missing.
    pub fn bag_price_value(&self) -> f64 {
        number_or_zero(self.bag_price.as_ref())
    }
}

/// Form values converted to canonical metric units
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MetricBundle {
    pub feed_consumed_kg: f64,
    pub avg_egg_weight_g: f64,
    pub bag_weight_kg: f64,
    pub alt_amount_kg: f64,
    /// `None` means no usable alternative-feed price was entered.
    pub alt_price_per_kg: Option<f64>,
}

fn mass(value: Option<&RawValue>, factor: f64) -> f64 {
    (number_or_zero(value) * factor).max(0.0)
}

/// Convert form values into a [`MetricBundle`].
pub fn normalize(units: UnitSystem, inputs: &RawInputs) -> MetricBundle {
    let (kg_factor, g_factor) = match units {
        UnitSystem::Imperial => (KG_PER_LB, G_PER_OZ),
        UnitSystem::Metric => (1.0, 1.0),
    };

    // $/lb becomes $/kg by dividing by kg per lb
    let alt_price_per_kg =
        parse_optional_number(inputs.alt_price_per_unit.as_ref()).map(|price| price / kg_factor);

    MetricBundle {
        feed_consumed_kg: mass(inputs.feed_consumed.as_ref(), kg_factor),
        avg_egg_weight_g: mass(inputs.avg_egg_weight.as_ref(), g_factor),
        bag_weight_kg: mass(inputs.bag_weight.as_ref(), kg_factor),
        alt_amount_kg: mass(inputs.alt_amount.as_ref(), kg_factor),
        alt_price_per_kg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_numeric_json_reads_as_missing() {
        let inputs = RawInputs::from_json(
            r#"{"feedConsumed": true, "avgEggWeight": [60], "altPricePerUnit": {"v": 1}, "eggCount": {}, "birdCount": false}"#,
        )
        .unwrap();
        assert_eq!(inputs.egg_count, 0);
        assert_eq!(inputs.bird_count, 0);
        assert_eq!(parse_optional_number(inputs.feed_consumed.as_ref()), None);

        let m = normalize(inputs.units, &inputs);
        assert_eq!(m.feed_consumed_kg, 0.0);
        assert_eq!(m.avg_egg_weight_g, 0.0);
        assert_eq!(m.alt_price_per_kg, None);
    }

    fn imperial(feed: &str, egg: &str, bag: &str) -> RawInputs {
        RawInputs {
            units: UnitSystem::Imperial,
            feed_consumed: Some(feed.into()),
            avg_egg_weight: Some(egg.into()),
            bag_weight: Some(bag.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_imperial_conversion() {
        let m = normalize(UnitSystem::Imperial, &imperial("10", "2", "50"));
        assert!((m.feed_consumed_kg - 4.5359237).abs() < 1e-12);
        assert!((m.avg_egg_weight_g - 56.69904625).abs() < 1e-12);
        assert!((m.bag_weight_kg - 22.6796185).abs() < 1e-12);
    }

    #[test]
    fn test_metric_passes_through() {
        let inputs = RawInputs {
            feed_consumed: Some(RawValue::Number(1.2)),
            avg_egg_weight: Some(RawValue::Number(60.0)),
            bag_weight: Some("25".into()),
            alt_amount: Some("0.2".into()),
            alt_price_per_unit: Some("0.5".into()),
            ..Default::default()
        };
        let m = normalize(UnitSystem::Metric, &inputs);
        assert_eq!(m.feed_consumed_kg, 1.2);
        assert_eq!(m.avg_egg_weight_g, 60.0);
        assert_eq!(m.bag_weight_kg, 25.0);
        assert_eq!(m.alt_amount_kg, 0.2);
        assert_eq!(m.alt_price_per_kg, Some(0.5));
    }

    #[test]
    fn test_alt_price_divides_under_imperial() {
        let inputs = RawInputs {
            alt_price_per_unit: Some("1".into()),
            ..Default::default()
        };
        let m = normalize(UnitSystem::Imperial, &inputs);
        let price = m.alt_price_per_kg.unwrap();
        assert!((price - 1.0 / KG_PER_LB).abs() < 1e-12);
        assert!(price > 2.2);
    }

    #[test]
    fn test_blank_alt_price_is_none_but_zero_is_zero() {
        let blank = RawInputs {
            alt_price_per_unit: Some("".into()),
            ..Default::default()
        };
        assert_eq!(normalize(UnitSystem::Imperial, &blank).alt_price_per_kg, None);

        let zero = RawInputs {
            alt_price_per_unit: Some("0".into()),
            ..Default::default()
        };
        assert_eq!(normalize(UnitSystem::Imperial, &zero).alt_price_per_kg, Some(0.0));

        let garbage = RawInputs {
            alt_price_per_unit: Some("cheap".into()),
            ..Default::default()
        };
        assert_eq!(normalize(UnitSystem::Metric, &garbage).alt_price_per_kg, None);
    }

    #[test]
    fn test_unparsable_values_become_zero() {
        let m = normalize(UnitSystem::Imperial, &imperial("lots", "", "NaN"));
        assert_eq!(m.feed_consumed_kg, 0.0);
        assert_eq!(m.avg_egg_weight_g, 0.0);
        assert_eq!(m.bag_weight_kg, 0.0);
        assert_eq!(m, MetricBundle::default());
    }

    #[test]
    fn test_negative_mass_floors_at_zero() {
        let inputs = RawInputs {
            feed_consumed: Some(RawValue::Number(-3.0)),
            ..Default::default()
        };
        assert_eq!(normalize(UnitSystem::Metric, &inputs).feed_consumed_kg, 0.0);
    }

    #[test]
    fn test_unknown_unit_system_is_metric() {
        assert_eq!(UnitSystem::from("furlongs"), UnitSystem::Metric);
        assert_eq!(UnitSystem::from("Imperial"), UnitSystem::Imperial);
        let inputs: RawInputs = serde_json::from_str(r#"{"units": "stone"}"#).unwrap();
        assert_eq!(inputs.units, UnitSystem::Metric);
    }

    #[test]
    fn test_parse_optional_number() {
        assert_eq!(parse_optional_number(None), None);
        assert_eq!(parse_optional_number(Some(&"  12.5 ".into())), Some(12.5));
        assert_eq!(parse_optional_number(Some(&"   ".into())), None);
        assert_eq!(parse_optional_number(Some(&"inf".into())), None);
        assert_eq!(parse_optional_number(Some(&RawValue::Number(f64::NAN))), None);
        assert_eq!(parse_optional_number(Some(&"1e3".into())), Some(1000.0));
    }

    #[test]
    fn test_raw_inputs_from_browser_json() {
        let json = r#"{
            "units": "imperial",
            "feedConsumed": "2.6",
            "avgEggWeight": 2.1,
            "bagWeight": "",
            "bagPrice": null,
            "eggCount": "10",
            "birdCount": 12
        }"#;
        let inputs = RawInputs::from_json(json).unwrap();
        assert_eq!(inputs.units, UnitSystem::Imperial);
        assert_eq!(inputs.egg_count, 10);
        assert_eq!(inputs.bird_count, 12);
        assert_eq!(inputs.bag_price, None);
        assert_eq!(inputs.alt_amount, None);
        assert_eq!(inputs.bag_price_value(), 0.0);
    }

    #[test]
    fn test_counts_truncate_and_default_to_zero() {
        assert_eq!(parse_count(Some(&"7.9".into())), 7);
        assert_eq!(parse_count(Some(&"seven".into())), 0);
        assert_eq!(parse_count(None), 0);
    }
}
