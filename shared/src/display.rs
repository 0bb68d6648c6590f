//! Result-tile text
//!
//! Values round half away from zero on their exact binary value, which is
//! what the browser's `toFixed` does. Missing values render as a dash.

use rust_decimal::prelude::*;

use crate::metrics::DerivedBundle;

/// Shown in place of a value that could not be computed
pub const PLACEHOLDER: &str = "—";

/// Fixed-point text for a finite value
pub fn fixed(value: f64, places: u32) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    // beyond Decimal's range; no midpoints left at that magnitude
    let Some(exact) = Decimal::from_f64_retain(value) else {
        return Some(format!("{:.*}", places as usize, value));
    };
    let rounded = exact.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    // round_dp never pads, so fix the scale explicitly
    let mut padded = rounded;
    padded.rescale(places);
    Some(padded.to_string())
}

fn render(value: Option<f64>, places: u32, prefix: &str, suffix: &str) -> String {
    value
        .filter(|v| v.is_finite())
        .and_then(|v| fixed(v, places))
        .map(|text| format!("{}{}{}", prefix, text, suffix))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

pub fn fcr(value: Option<f64>) -> String {
    render(value, 2, "", "")
}

pub fn grams(value: Option<f64>) -> String {
    render(value, 0, "", " g")
}

pub fn percent(value: Option<f64>) -> String {
    render(value, 0, "", "%")
}

/// Per-egg costs carry three decimals
pub fn cost_per_egg(value: Option<f64>) -> String {
    render(value, 3, "$", "")
}

pub fn currency(value: Option<f64>) -> String {
    render(value, 2, "$", "")
}

/// One labelled result tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub label: &'static str,
    pub value: String,
}

/// Tiles in the order the results panel lays them out
pub fn tiles(derived: &DerivedBundle) -> Vec<Tile> {
    let alt = &derived.alt_scenario;
    let tile = |label, value| Tile { label, value };
    vec![
        tile("FCR", fcr(derived.fcr)),
        tile("Feed per egg", grams(derived.feed_per_egg_g)),
        tile("Cost per egg", cost_per_egg(derived.cpe)),
        tile("Cost per dozen", currency(derived.cpd)),
        tile("Lay rate", percent(derived.lay_rate)),
        tile("Feed per bird", grams(derived.feed_per_bird_g)),
        tile("Cost per egg (alt feed)", cost_per_egg(alt.cost_per_egg_alt)),
        tile("Feed savings", currency(alt.savings_total)),
        tile("Alt feed share", percent(alt.alt_share_pct)),
    ]
}
