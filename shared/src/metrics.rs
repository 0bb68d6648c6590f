//! Flock production metrics
//!
//! Pure functions over normalized metric inputs. A `None` result means the
//! value cannot be computed from what was entered; it is never a stand-in
//! for zero.

use serde::{Deserialize, Serialize};

use crate::units::MetricBundle;

/// Eggs in a dozen
pub const EGGS_PER_DOZEN: f64 = 12.0;

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Feed conversion figures for one period
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FcrResult {
    /// kg feed per kg egg mass
    pub fcr: Option<f64>,
    pub egg_mass_kg: f64,
    pub feed_per_egg_g: Option<f64>,
}

/// Feed conversion ratio, egg mass and feed per egg.
///
/// FCR is undefined when no egg mass was produced.
pub fn compute_fcr(feed_consumed_kg: f64, egg_count: i64, avg_egg_weight_g: f64) -> FcrResult {
    let feed_kg = finite_or_zero(feed_consumed_kg);
    let egg_g = finite_or_zero(avg_egg_weight_g);
    let eggs = egg_count as f64;

    let egg_mass_kg = if egg_count > 0 && egg_g > 0.0 {
        eggs * egg_g / 1000.0
    } else {
        0.0
    };
    let fcr = (egg_mass_kg > 0.0).then(|| feed_kg / egg_mass_kg);
    let feed_per_egg_g = (egg_count > 0).then(|| feed_kg * 1000.0 / eggs);

    FcrResult {
        fcr,
        egg_mass_kg,
        feed_per_egg_g,
    }
}

/// Feed cost per egg from bag price and bag size.
///
/// All four inputs must be strictly positive.
pub fn compute_cost_per_egg(
    bag_price: f64,
    bag_weight_kg: f64,
    egg_count: i64,
    feed_consumed_kg: f64,
) -> Option<f64> {
    let price = finite_or_zero(bag_price);
    let weight = finite_or_zero(bag_weight_kg);
    let feed_kg = finite_or_zero(feed_consumed_kg);

    if price <= 0.0 || weight <= 0.0 || egg_count <= 0 || feed_kg <= 0.0 {
        return None;
    }

    let cost_per_kg = price / weight;
    let total_cost = cost_per_kg * feed_kg;
    Some(total_cost / egg_count as f64).filter(|c| c.is_finite())
}

pub fn cost_per_dozen(cost_per_egg: Option<f64>) -> Option<f64> {
    cost_per_egg
        .filter(|c| c.is_finite())
        .map(|c| c * EGGS_PER_DOZEN)
}

/// Hen-day production as a percentage. Multi-day collections can exceed 100.
pub fn compute_lay_rate(egg_count: i64, bird_count: i64) -> Option<f64> {
    if bird_count <= 0 {
        return None;
    }
    Some(egg_count as f64 / bird_count as f64 * 100.0)
}

/// Grams of feed per bird for the period.
pub fn compute_feed_per_bird_g(feed_consumed_kg: f64, bird_count: i64) -> Option<f64> {
    if bird_count <= 0 {
        return None;
    }
    Some(finite_or_zero(feed_consumed_kg) * 1000.0 / bird_count as f64)
}

/// Inputs to the alternative-feed cost scenario
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AltScenarioInputs {
    pub feed_consumed_kg: f64,
    pub egg_count: i64,
    pub bag_price: f64,
    pub bag_weight_kg: f64,
    pub alt_amount_kg: f64,
    pub alt_price_per_kg: Option<f64>,
}

impl AltScenarioInputs {
    pub fn from_bundle(metric: &MetricBundle, egg_count: i64, bag_price: f64) -> Self {
        Self {
            feed_consumed_kg: metric.feed_consumed_kg,
            egg_count,
            bag_price,
            bag_weight_kg: metric.bag_weight_kg,
            alt_amount_kg: metric.alt_amount_kg,
            alt_price_per_kg: metric.alt_price_per_kg,
        }
    }
}

/// Cost outcome of substituting part of the feed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AltScenario {
    pub cost_per_egg_alt: Option<f64>,
    pub savings_total: Option<f64>,
    pub alt_share_pct: Option<f64>,
}

/// Price the period's feed with part of it replaced by an alternative feed.
///
/// Without a baseline bag price only the alternative share is reported.
/// Without a usable alternative price the whole amount is priced at the
/// baseline and no savings figure is given.
pub fn compute_alt_cost_scenario(inputs: &AltScenarioInputs) -> AltScenario {
    let total_kg = finite_or_zero(inputs.feed_consumed_kg);
    let eggs = inputs.egg_count;
    let price = finite_or_zero(inputs.bag_price);
    let weight = finite_or_zero(inputs.bag_weight_kg);

    let base_cost_per_kg = (price > 0.0 && weight > 0.0)
        .then(|| price / weight)
        .filter(|c| c.is_finite());

    // cannot substitute more feed than was fed
    let alt_kg = finite_or_zero(inputs.alt_amount_kg).min(total_kg).max(0.0);
    let base_kg_portion = (total_kg - alt_kg).max(0.0);

    let alt_share_pct = (total_kg != 0.0).then(|| alt_kg / total_kg * 100.0);
    let per_egg = |total: f64| {
        (eggs > 0)
            .then(|| total / eggs as f64)
            .filter(|c| c.is_finite())
    };

    let Some(base_cost_per_kg) = base_cost_per_kg else {
        return AltScenario {
            cost_per_egg_alt: None,
            savings_total: None,
            alt_share_pct,
        };
    };

    let baseline_total = base_cost_per_kg * total_kg;

    match inputs
        .alt_price_per_kg
        .filter(|p| p.is_finite() && *p >= 0.0)
    {
        None => AltScenario {
            cost_per_egg_alt: per_egg(baseline_total),
            savings_total: None,
            alt_share_pct,
        },
        Some(alt_price_per_kg) => {
            let scenario_total = base_kg_portion * base_cost_per_kg + alt_kg * alt_price_per_kg;
            AltScenario {
                cost_per_egg_alt: per_egg(scenario_total),
                savings_total: Some(baseline_total - scenario_total).filter(|s| s.is_finite()),
                alt_share_pct,
            }
        }
    }
}

/// Every derived figure for one calculation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DerivedBundle {
    pub egg_mass_kg: f64,
    pub fcr: Option<f64>,
    pub feed_per_egg_g: Option<f64>,
    /// Cost per egg
    pub cpe: Option<f64>,
    /// Cost per dozen
    pub cpd: Option<f64>,
    pub lay_rate: Option<f64>,
    #[serde(rename = "feedPerBird_g")]
    pub feed_per_bird_g: Option<f64>,
    pub alt_scenario: AltScenario,
}

/// Run every derivation against one normalized snapshot.
pub fn derive_metrics(metric: &MetricBundle, egg_count: i64, bird_count: i64, bag_price: f64) -> DerivedBundle {
    let FcrResult {
        fcr,
        egg_mass_kg,
        feed_per_egg_g,
    } = compute_fcr(metric.feed_consumed_kg, egg_count, metric.avg_egg_weight_g);

    let cpe = compute_cost_per_egg(
        bag_price,
        metric.bag_weight_kg,
        egg_count,
        metric.feed_consumed_kg,
    );

    DerivedBundle {
        egg_mass_kg,
        fcr,
        feed_per_egg_g,
        cpe,
        cpd: cost_per_dozen(cpe),
        lay_rate: compute_lay_rate(egg_count, bird_count),
        feed_per_bird_g: compute_feed_per_bird_g(metric.feed_consumed_kg, bird_count),
        alt_scenario: compute_alt_cost_scenario(&AltScenarioInputs::from_bundle(
            metric, egg_count, bag_price,
        )),
    }
}
