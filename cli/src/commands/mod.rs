pub mod calc;
pub mod defaults;
