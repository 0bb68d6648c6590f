//! Calculator state for one open page
//!
//! Holds the "needs recalculation" flag and the last calculation so the
//! presentation layer does not keep its own copies.

use crate::calculation::{calculate, Calculation};
use crate::units::RawInputs;

#[derive(Debug, Clone)]
pub struct CalculatorSession {
    needs_recalc: bool,
    last: Option<Calculation>,
    last_calc_flock: String,
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorSession {
    pub fn new() -> Self {
        Self {
            needs_recalc: true,
            last: None,
            last_calc_flock: String::new(),
        }
    }

    /// Record that an input changed since the last calculation.
    pub fn mark_dirty(&mut self) {
        self.needs_recalc = true;
    }

    pub fn needs_recalc(&self) -> bool {
        self.needs_recalc
    }

    /// Calculate and keep the result as the latest.
    pub fn calculate(&mut self, inputs: &RawInputs, flock: &str) -> &Calculation {
        self.needs_recalc = false;
        self.last_calc_flock = flock.trim().to_string();
        self.last.insert(calculate(inputs))
    }

    pub fn last(&self) -> Option<&Calculation> {
        self.last.as_ref()
    }

    pub fn last_calc_flock(&self) -> &str {
        &self.last_calc_flock
    }

    /// A result exists, nothing changed since, and it was made for this flock.
    pub fn is_fresh_for(&self, flock: &str) -> bool {
        self.last.is_some() && !self.needs_recalc && self.last_calc_flock == flock.trim()
    }
}
