//! WebAssembly module for the Cluckulator flock calculator
//!
//! Provides client-side computation for:
//! - Unit normalization of form values
//! - FCR, cost per egg and alternative-feed scenarios
//! - Performance bands and gauge scores
//! - Form validation and result-tile text
//!
//! Structured values cross the boundary as JSON strings.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::console;

// Re-export shared types for use in JavaScript
pub use shared::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn parse_inputs(inputs_json: &str) -> Result<RawInputs, String> {
    RawInputs::from_json(inputs_json).map_err(|e| format!("Invalid inputs JSON: {}", e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Failed to encode result: {}", e))
}

fn log_calculation(calc: &Calculation) {
    console::debug_1(&JsValue::from_str(&format!(
        "calculated {} metrics: fcr={:?} cpe={:?}",
        calc.units, calc.derived.fcr, calc.derived.cpe
    )));
    for message in calc.plausibility.error_messages() {
        console::warn_1(&JsValue::from_str(&message));
    }
}

fn calculate_json(inputs_json: &str) -> Result<(Calculation, String), String> {
    let calc = calculate(&parse_inputs(inputs_json)?);
    let json = to_json(&calc)?;
    Ok((calc, json))
}

/// Run the full calculation and return it as JSON
#[wasm_bindgen]
pub fn calculate_metrics(inputs_json: &str) -> Result<String, JsValue> {
    let (calc, json) = calculate_json(inputs_json).map_err(|e| JsValue::from_str(&e))?;
    log_calculation(&calc);
    Ok(json)
}

fn normalize_json(units: &str, inputs_json: &str) -> Result<String, String> {
    let inputs = parse_inputs(inputs_json)?;
    to_json(&normalize(UnitSystem::from(units), &inputs))
}

/// Convert form values to metric; `units` overrides the payload's own
#[wasm_bindgen]
pub fn normalize_units(units: &str, inputs_json: &str) -> Result<String, JsValue> {
    normalize_json(units, inputs_json).map_err(|e| JsValue::from_str(&e))
}

fn validate_json(inputs_json: &str) -> Result<String, String> {
    let issues: Vec<String> = validate_inputs(&parse_inputs(inputs_json)?)
        .iter()
        .map(ToString::to_string)
        .collect();
    to_json(&issues)
}

/// Form issues as a JSON array of messages; empty when the form is fine
#[wasm_bindgen]
pub fn validate_form(inputs_json: &str) -> Result<String, JsValue> {
    validate_json(inputs_json).map_err(|e| JsValue::from_str(&e))
}

#[derive(Serialize)]
struct TileView {
    label: &'static str,
    value: String,
}

fn tiles_json(inputs_json: &str) -> Result<String, String> {
    let calc = calculate(&parse_inputs(inputs_json)?);
    let tiles: Vec<TileView> = display::tiles(&calc.derived)
        .into_iter()
        .map(|t| TileView {
            label: t.label,
            value: t.value,
        })
        .collect();
    to_json(&tiles)
}

/// Result tiles as `[{label, value}]` with placeholders for missing values
#[wasm_bindgen]
pub fn result_tiles(inputs_json: &str) -> Result<String, JsValue> {
    tiles_json(inputs_json).map_err(|e| JsValue::from_str(&e))
}

fn defaults_json(inputs_json: &str) -> Result<String, String> {
    let mut inputs = parse_inputs(inputs_json)?;
    FeedPriceDefaults::default().apply(&mut inputs);
    to_json(&inputs)
}

/// Fill empty bag weight and price with typical values
#[wasm_bindgen]
pub fn apply_price_defaults(inputs_json: &str) -> Result<String, JsValue> {
    defaults_json(inputs_json).map_err(|e| JsValue::from_str(&e))
}

/// Calculate feed cost per egg; undefined when not computable
#[wasm_bindgen]
pub fn calculate_cost_per_egg(
    bag_price: f64,
    bag_weight_kg: f64,
    egg_count: i32,
    feed_consumed_kg: f64,
) -> Option<f64> {
    compute_cost_per_egg(
        bag_price,
        bag_weight_kg,
        i64::from(egg_count),
        feed_consumed_kg,
    )
}

/// Calculate feed conversion ratio; undefined without egg mass
#[wasm_bindgen]
pub fn calculate_fcr(feed_consumed_kg: f64, egg_count: i32, avg_egg_weight_g: f64) -> Option<f64> {
    compute_fcr(feed_consumed_kg, i64::from(egg_count), avg_egg_weight_g).fcr
}

#[wasm_bindgen]
pub fn calculate_lay_rate(egg_count: i32, bird_count: i32) -> Option<f64> {
    compute_lay_rate(i64::from(egg_count), i64::from(bird_count))
}

#[wasm_bindgen]
pub fn calculate_feed_per_bird(feed_consumed_kg: f64, bird_count: i32) -> Option<f64> {
    compute_feed_per_bird_g(feed_consumed_kg, i64::from(bird_count))
}

#[wasm_bindgen]
pub fn classify_fcr(fcr: f64) -> Option<String> {
    band_fcr(fcr).map(|b| b.to_string())
}

#[wasm_bindgen]
pub fn classify_lay_rate(lay_rate: f64) -> Option<String> {
    band_lay(lay_rate).map(|b| b.to_string())
}

#[wasm_bindgen]
pub fn classify_feed_per_bird(grams: f64) -> Option<String> {
    band_feed_per_bird(grams).map(|b| b.to_string())
}

/// Thermometer gauge fill, 0–1
#[wasm_bindgen]
pub fn fcr_gauge(fcr: Option<f64>) -> f64 {
    fcr_score(fcr)
}

/// Coin gauge fill, 0–1
#[wasm_bindgen]
pub fn econ_gauge(cost_per_egg: Option<f64>) -> f64 {
    econ_score(cost_per_egg)
}

#[wasm_bindgen]
pub fn pounds_to_kilograms(lb: f64) -> f64 {
    lb_to_kg(lb)
}

#[wasm_bindgen]
pub fn ounces_to_grams(oz: f64) -> f64 {
    oz_to_g(oz)
}

/// Page-level calculator state
#[wasm_bindgen]
pub struct Calculator {
    session: CalculatorSession,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Calculator {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            session: CalculatorSession::new(),
        }
    }

    /// Calculate for a flock and keep the result as the latest
    pub fn calculate(&mut self, inputs_json: &str, flock: &str) -> Result<String, JsValue> {
        let inputs = parse_inputs(inputs_json).map_err(|e| JsValue::from_str(&e))?;
        let calc = self.session.calculate(&inputs, flock);
        log_calculation(calc);
        to_json(calc).map_err(|e| JsValue::from_str(&e))
    }

    /// Call whenever a form input changes
    #[wasm_bindgen(js_name = markDirty)]
    pub fn mark_dirty(&mut self) {
        self.session.mark_dirty();
    }

    #[wasm_bindgen(js_name = needsRecalc)]
    pub fn needs_recalc(&self) -> bool {
        self.session.needs_recalc()
    }

    #[wasm_bindgen(js_name = isFreshFor)]
    pub fn is_fresh_for(&self, flock: &str) -> bool {
        self.session.is_fresh_for(flock)
    }

    /// Last calculation as JSON, for context-aware help
    #[wasm_bindgen(js_name = lastJson)]
    pub fn last_json(&self) -> Option<String> {
        self.session.last().and_then(|calc| calc.to_json().ok())
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_calculate_metrics_rejects_bad_json() {
        assert!(calculate_metrics("{").is_err());
    }

    #[wasm_bindgen_test]
    fn test_calculator_remembers_flock() {
        let mut calculator = Calculator::new();
        let json = calculator
            .calculate(r#"{"feedConsumed": 1.2, "avgEggWeight": 60, "eggCount": 10, "birdCount": 12}"#, "Barn B")
            .unwrap();
        assert!(json.contains("\"fcr\""));
        assert!(calculator.is_fresh_for("Barn B"));
        assert!(calculator.last_json().is_some());

        calculator.mark_dirty();
        assert!(!calculator.is_fresh_for("Barn B"));
    }
}
