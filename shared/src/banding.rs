//! Performance bands and gauge scores
//!
//! Bands are broad and breed-agnostic, aimed at mature in-lay flocks.

use serde::{Deserialize, Serialize};

use crate::metrics::DerivedBundle;

/// FCR at or above this scores zero on the gauge
pub const WORST_FCR: f64 = 3.5;

/// Cost per egg at or above this scores zero on the gauge
pub const MAX_COST_PER_EGG: f64 = 0.5;

/// Qualitative tier for a metric, ordered best to worst
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Good,
    Avg,
    Watch,
    Poor,
}

impl Band {
    /// Whether the tile's info button should be highlighted
    pub fn needs_attention(&self) -> bool {
        matches!(self, Band::Watch | Band::Poor)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Good => "good",
            Band::Avg => "avg",
            Band::Watch => "watch",
            Band::Poor => "poor",
        }
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Band feed conversion ratio (kg feed / kg eggs); lower is better.
pub fn band_fcr(fcr: f64) -> Option<Band> {
    if !fcr.is_finite() {
        return None;
    }
    let band = if fcr <= 2.1 {
        Band::Good
    } else if fcr <= 2.5 {
        Band::Avg
    } else if fcr <= 3.0 {
        Band::Watch
    } else {
        Band::Poor
    };
    Some(band)
}

/// Band lay rate (% per hen per day); higher is better.
pub fn band_lay(lay_rate: f64) -> Option<Band> {
    if !lay_rate.is_finite() {
        return None;
    }
    let band = if lay_rate >= 80.0 {
        Band::Good
    } else if lay_rate >= 60.0 {
        Band::Avg
    } else if lay_rate >= 40.0 {
        Band::Watch
    } else {
        Band::Poor
    };
    Some(band)
}

/// Band daily feed intake per bird (g/day).
///
/// Both underfeeding and overfeeding band badly.
pub fn band_feed_per_bird(grams: f64) -> Option<Band> {
    if !grams.is_finite() {
        return None;
    }
    let band = if grams < 80.0 {
        Band::Poor
    } else if grams < 100.0 {
        Band::Watch
    } else if grams <= 120.0 {
        Band::Good
    } else if grams <= 150.0 {
        Band::Watch
    } else {
        Band::Poor
    };
    Some(band)
}

fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

fn capped_score(value: Option<f64>, cap: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() => clamp01((cap - v.min(cap)) / cap),
        _ => 0.0,
    }
}

/// Thermometer gauge: 1.0 for a perfect FCR, 0.0 at [`WORST_FCR`] or worse.
pub fn fcr_score(fcr: Option<f64>) -> f64 {
    capped_score(fcr, WORST_FCR)
}

/// Coin gauge: 1.0 for free eggs, 0.0 at [`MAX_COST_PER_EGG`] or dearer.
pub fn econ_score(cost_per_egg: Option<f64>) -> f64 {
    capped_score(cost_per_egg, MAX_COST_PER_EGG)
}

/// Egg-ring gauge fill
pub fn lay_score(lay_rate: Option<f64>) -> f64 {
    match lay_rate {
        Some(v) if v.is_finite() => clamp01(v / 100.0),
        _ => 0.0,
    }
}

/// Bands for the banded result tiles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Bands {
    pub fcr: Option<Band>,
    pub lay: Option<Band>,
    pub feed_per_bird: Option<Band>,
}

impl Bands {
    pub fn from_derived(derived: &DerivedBundle) -> Self {
        Self {
            fcr: derived.fcr.and_then(band_fcr),
            lay: derived.lay_rate.and_then(band_lay),
            feed_per_bird: derived.feed_per_bird_g.and_then(band_feed_per_bird),
        }
    }
}

/// 0–1 gauge scores, higher is better
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Scores {
    pub fcr: f64,
    pub econ: f64,
    pub lay: f64,
}

impl Scores {
    pub fn from_derived(derived: &DerivedBundle) -> Self {
        Self {
            fcr: fcr_score(derived.fcr),
            econ: econ_score(derived.cpe),
            lay: lay_score(derived.lay_rate),
        }
    }
}

/// Headline rating shown next to the FCR tile
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceRating {
    /// FCR ≤ 2.0
    Excellent,
    /// FCR ≤ 2.2
    Good,
    /// FCR ≤ 2.5
    Average,
    Poor,
}

impl PerformanceRating {
    pub fn for_fcr(fcr: Option<f64>) -> Option<Self> {
        let fcr = fcr.filter(|v| v.is_finite())?;
        let rating = if fcr <= 2.0 {
            PerformanceRating::Excellent
        } else if fcr <= 2.2 {
            PerformanceRating::Good
        } else if fcr <= 2.5 {
            PerformanceRating::Average
        } else {
            PerformanceRating::Poor
        };
        Some(rating)
    }

    pub fn description(&self) -> &'static str {
        match self {
            PerformanceRating::Excellent => "Outstanding efficiency",
            PerformanceRating::Good => "Solid performance",
            PerformanceRating::Average => "Room to improve",
            PerformanceRating::Poor => "Investigate nutrition, health, season",
        }
    }
}

impl std::fmt::Display for PerformanceRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PerformanceRating::Excellent => write!(f, "Excellent"),
            PerformanceRating::Good => write!(f, "Good"),
            PerformanceRating::Average => write!(f, "Average"),
            PerformanceRating::Poor => write!(f, "Poor"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_fcr_thresholds() {
        assert_eq!(band_fcr(1.8), Some(Band::Good));
        assert_eq!(band_fcr(2.1), Some(Band::Good));
        assert_eq!(band_fcr(2.11), Some(Band::Avg));
        assert_eq!(band_fcr(2.5), Some(Band::Avg));
        assert_eq!(band_fcr(3.0), Some(Band::Watch));
        assert_eq!(band_fcr(3.01), Some(Band::Poor));
        assert_eq!(band_fcr(f64::NAN), None);
        assert_eq!(band_fcr(f64::INFINITY), None);
    }

    #[test]
    fn test_band_lay_thresholds() {
        assert_eq!(band_lay(95.0), Some(Band::Good));
        assert_eq!(band_lay(80.0), Some(Band::Good));
        assert_eq!(band_lay(79.9), Some(Band::Avg));
        assert_eq!(band_lay(60.0), Some(Band::Avg));
        assert_eq!(band_lay(40.0), Some(Band::Watch));
        assert_eq!(band_lay(39.9), Some(Band::Poor));
        assert_eq!(band_lay(f64::NAN), None);
    }

    #[test]
    fn test_band_feed_per_bird_is_u_shaped() {
        assert_eq!(band_feed_per_bird(60.0), Some(Band::Poor));
        assert_eq!(band_feed_per_bird(80.0), Some(Band::Watch));
        assert_eq!(band_feed_per_bird(99.0), Some(Band::Watch));
        assert_eq!(band_feed_per_bird(100.0), Some(Band::Good));
        assert_eq!(band_feed_per_bird(110.0), Some(Band::Good));
        assert_eq!(band_feed_per_bird(120.0), Some(Band::Good));
        assert_eq!(band_feed_per_bird(121.0), Some(Band::Watch));
        assert_eq!(band_feed_per_bird(150.0), Some(Band::Watch));
        assert_eq!(band_feed_per_bird(150.5), Some(Band::Poor));
        assert_eq!(band_feed_per_bird(200.0), Some(Band::Poor));
    }

    #[test]
    fn test_needs_attention() {
        assert!(!Band::Good.needs_attention());
        assert!(!Band::Avg.needs_attention());
        assert!(Band::Watch.needs_attention());
        assert!(Band::Poor.needs_attention());
    }

    #[test]
    fn test_fcr_score() {
        assert_eq!(fcr_score(Some(0.0)), 1.0);
        assert!((fcr_score(Some(1.75)) - 0.5).abs() < 1e-12);
        assert_eq!(fcr_score(Some(3.5)), 0.0);
        assert_eq!(fcr_score(Some(9.0)), 0.0);
        assert_eq!(fcr_score(None), 0.0);
        assert_eq!(fcr_score(Some(f64::NAN)), 0.0);
    }

    #[test]
    fn test_econ_score() {
        assert!((econ_score(Some(0.25)) - 0.5).abs() < 1e-12);
        assert_eq!(econ_score(Some(0.75)), 0.0);
        assert_eq!(econ_score(None), 0.0);
    }

    #[test]
    fn test_scores_clamp_negative_inputs() {
        assert_eq!(fcr_score(Some(-1.0)), 1.0);
        assert_eq!(lay_score(Some(-5.0)), 0.0);
        assert_eq!(lay_score(Some(130.0)), 1.0);
    }

    #[test]
    fn test_performance_rating() {
        assert_eq!(PerformanceRating::for_fcr(Some(2.0)), Some(PerformanceRating::Excellent));
        assert_eq!(PerformanceRating::for_fcr(Some(2.2)), Some(PerformanceRating::Good));
        assert_eq!(PerformanceRating::for_fcr(Some(2.4)), Some(PerformanceRating::Average));
        assert_eq!(PerformanceRating::for_fcr(Some(4.0)), Some(PerformanceRating::Poor));
        assert_eq!(PerformanceRating::for_fcr(None), None);
        assert_eq!(format!("{}", PerformanceRating::Excellent), "Excellent");
    }

    #[test]
    fn test_bands_from_derived() {
        let derived = DerivedBundle {
            fcr: Some(2.3),
            lay_rate: Some(83.0),
            feed_per_bird_g: None,
            ..Default::default()
        };
        let bands = Bands::from_derived(&derived);
        assert_eq!(bands.fcr, Some(Band::Avg));
        assert_eq!(bands.lay, Some(Band::Good));
        assert_eq!(bands.feed_per_bird, None);
        let json = serde_json::to_value(bands).unwrap();
        assert_eq!(json["fcr"], "avg");
        assert!(json["feedPerBird"].is_null());
    }
}
