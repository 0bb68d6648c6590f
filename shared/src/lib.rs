//! Feed and production calculations for small laying flocks
//!
//! This crate holds the arithmetic shared by the browser (via WASM) and the
//! command-line runner: unit normalization, derived metrics, banding and
//! plausibility checks.

pub mod banding;
pub mod calculation;
pub mod defaults;
pub mod display;
pub mod error;
pub mod metrics;
pub mod plausibility;
pub mod session;
pub mod units;
pub mod validation;

pub use banding::*;
pub use calculation::*;
pub use defaults::*;
pub use error::*;
pub use metrics::*;
pub use plausibility::*;
pub use session::*;
pub use units::*;
pub use validation::*;
