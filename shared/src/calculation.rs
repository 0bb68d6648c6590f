//! One calculation, start to finish
//!
//! Normalization, derivation, banding and checks run once per trigger and
//! the resulting [`Calculation`] is handed to every consumer by reference.

use serde::Serialize;

use crate::banding::{Bands, PerformanceRating, Scores};
use crate::metrics::{derive_metrics, DerivedBundle};
use crate::plausibility::{check, husbandry_advisories, Advisory, PlausibilityInput, PlausibilityReport};
use crate::units::{normalize, parse_optional_number, MetricBundle, RawInputs, UnitSystem};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Calculation {
    pub units: UnitSystem,
    pub egg_count: i64,
    pub bird_count: i64,
    pub metric: MetricBundle,
    pub derived: DerivedBundle,
    pub bands: Bands,
    pub scores: Scores,
    pub rating: Option<PerformanceRating>,
    pub plausibility: PlausibilityReport,
    pub advisories: Vec<Advisory>,
}

/// Run the full pipeline over one input snapshot.
pub fn calculate(inputs: &RawInputs) -> Calculation {
    let units = inputs.units;
    let metric = normalize(units, inputs);
    let bag_price = inputs.bag_price_value();
    let derived = derive_metrics(&metric, inputs.egg_count, inputs.bird_count, bag_price);

    // only check figures the user actually entered
    let plausibility = check(&PlausibilityInput {
        lay_rate: derived.lay_rate,
        fcr: derived.fcr,
        avg_egg_weight_g: parse_optional_number(inputs.avg_egg_weight.as_ref())
            .map(|_| metric.avg_egg_weight_g),
        feed_per_egg_g: derived.feed_per_egg_g,
        bag_price: parse_optional_number(inputs.bag_price.as_ref()),
        bag_weight_kg: parse_optional_number(inputs.bag_weight.as_ref())
            .map(|_| metric.bag_weight_kg),
    });

    let advisories = husbandry_advisories(
        derived.lay_rate,
        derived.feed_per_bird_g,
        inputs.egg_count,
        inputs.bird_count,
    );

    tracing::debug!(
        units = %units,
        fcr = ?derived.fcr,
        cpe = ?derived.cpe,
        lay_rate = ?derived.lay_rate,
        warnings = plausibility.warnings.len(),
        "Calculated flock metrics"
    );

    Calculation {
        units,
        egg_count: inputs.egg_count,
        bird_count: inputs.bird_count,
        metric,
        bands: Bands::from_derived(&derived),
        scores: Scores::from_derived(&derived),
        rating: PerformanceRating::for_fcr(derived.fcr),
        derived,
        plausibility,
        advisories,
    }
}

impl Calculation {
    /// Whether the checker found the price configuration unusable
    pub fn has_errors(&self) -> bool {
        !self.plausibility.errors.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
