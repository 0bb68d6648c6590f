//! Plausibility checks on a finished calculation
//!
//! Findings are advisory; the derived figures are shown regardless.

use serde::{Deserialize, Serialize};

use crate::error::{PlausibilityError, PlausibilityWarning};

/// Values the checker looks at. `None` means the value was not entered or
/// could not be derived.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlausibilityInput {
    pub lay_rate: Option<f64>,
    pub fcr: Option<f64>,
    pub avg_egg_weight_g: Option<f64>,
    pub feed_per_egg_g: Option<f64>,
    pub bag_price: Option<f64>,
    pub bag_weight_kg: Option<f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct PlausibilityReport {
    pub warnings: Vec<PlausibilityWarning>,
    pub errors: Vec<PlausibilityError>,
}

impl PlausibilityReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty()
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

pub fn check(input: &PlausibilityInput) -> PlausibilityReport {
    let mut report = PlausibilityReport::default();

    match present(input.lay_rate) {
        None => report.warnings.push(PlausibilityWarning::LayRateMissing),
        Some(rate) if !(0.0..=100.0).contains(&rate) => {
            report.warnings.push(PlausibilityWarning::LayRateOutOfRange(rate))
        }
        Some(_) => {}
    }

    if let Some(fcr) = present(input.fcr) {
        if fcr < 1.2 {
            report.warnings.push(PlausibilityWarning::FcrUnusuallyLow(fcr));
        } else if fcr > 6.0 {
            report.warnings.push(PlausibilityWarning::FcrUnusuallyHigh(fcr));
        }
    }

    if let Some(grams) = present(input.avg_egg_weight_g) {
        if !(35.0..=80.0).contains(&grams) {
            report
                .warnings
                .push(PlausibilityWarning::EggWeightOutOfRange(grams));
        }
    }

    if let Some(grams) = present(input.feed_per_egg_g) {
        if !(50.0..=200.0).contains(&grams) {
            report
                .warnings
                .push(PlausibilityWarning::FeedPerEggOutOfRange(grams));
        }
    }

    if present(input.bag_price).is_some_and(|price| price < 0.0) {
        report.errors.push(PlausibilityError::NegativeBagPrice);
    }
    if present(input.bag_weight_kg).is_some_and(|kg| kg <= 0.0) {
        report.errors.push(PlausibilityError::NonPositiveBagWeight);
    }

    if !report.errors.is_empty() {
        tracing::warn!(errors = ?report.errors, "Feed price configuration rejected");
    }

    report
}

/// Husbandry prompts shown under the results
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Advisory {
    /// Under 80 g/day
    FeedPerBirdVeryLow,
    /// Over 150 g/day
    FeedPerBirdVeryHigh,
    /// Under 40 %
    LayRateLow,
    /// More than 130 % of bird count
    EggsExceedBirds,
}

impl Advisory {
    pub fn message(&self) -> &'static str {
        match self {
            Advisory::FeedPerBirdVeryLow => {
                "Feed per bird appears very low (<80 g/day). Check feeder access, crowding, or health."
            }
            Advisory::FeedPerBirdVeryHigh => {
                "Feed per bird appears very high (>150 g/day). Check spillage, pests, ration energy, or temperature."
            }
            Advisory::LayRateLow => {
                "Lay rate under 40% is low for mature in-lay hens. Review lighting (12–14 h), nutrition, and parasites."
            }
            Advisory::EggsExceedBirds => {
                "Eggs are more than 130% of bird count. Double-check values; enter average eggs collected per day."
            }
        }
    }
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

pub fn husbandry_advisories(
    lay_rate: Option<f64>,
    feed_per_bird_g: Option<f64>,
    egg_count: i64,
    bird_count: i64,
) -> Vec<Advisory> {
    let mut advisories = Vec::new();

    if let Some(grams) = feed_per_bird_g {
        if grams < 80.0 {
            advisories.push(Advisory::FeedPerBirdVeryLow);
        }
        if grams > 150.0 {
            advisories.push(Advisory::FeedPerBirdVeryHigh);
        }
    }
    if lay_rate.is_some_and(|rate| rate < 40.0) {
        advisories.push(Advisory::LayRateLow);
    }
    if bird_count > 0 && egg_count as f64 / bird_count as f64 > 1.3 {
        advisories.push(Advisory::EggsExceedBirds);
    }

    advisories
}
