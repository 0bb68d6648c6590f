//! Issue types raised around a calculation
//!
//! Form issues are shown on the input panel before calculating. Plausibility
//! findings sit alongside the results and never stop a calculation.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Problems with the form values themselves
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputIssue {
    #[error("Bird count must be at least 1.")]
    BirdCountTooLow,

    #[error("Egg count cannot be negative.")]
    NegativeEggCount,

    #[error("Avg egg weight looks unusual for {unit} (typical ~{typical}).")]
    UnusualEggWeight { unit: &'static str, typical: &'static str },

    #[error("Enter total feed consumed for the period.")]
    MissingFeedConsumed,

    #[error("Alt feed amount cannot be negative.")]
    NegativeAltAmount,

    #[error("Alt feed amount cannot exceed total feed consumed.")]
    AltAmountExceedsFeed,

    #[error("Alt feed price cannot be negative.")]
    NegativeAltPrice,
}

/// Unusual but possible readings
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlausibilityWarning {
    #[error("Lay rate is unavailable.")]
    LayRateMissing,

    #[error("Lay rate of {0:.0}% is outside 0–100%. Enter average eggs collected per day.")]
    LayRateOutOfRange(f64),

    #[error("FCR of {0:.2} is unusually low. Double-check feed and egg figures.")]
    FcrUnusuallyLow(f64),

    #[error("FCR of {0:.2} is unusually high. Double-check feed and egg figures.")]
    FcrUnusuallyHigh(f64),

    #[error("Average egg weight of {0:.0} g is outside the usual 35–80 g.")]
    EggWeightOutOfRange(f64),

    #[error("Feed per egg of {0:.0} g is outside the usual 50–200 g.")]
    FeedPerEggOutOfRange(f64),
}

/// Configuration that cannot be priced
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlausibilityError {
    #[error("Bag price cannot be negative.")]
    NegativeBagPrice,

    #[error("Bag weight must be greater than zero.")]
    NonPositiveBagWeight,
}

macro_rules! serialize_as_message {
    ($($ty:ty),+) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.collect_str(self)
                }
            }
        )+
    };
}

serialize_as_message!(InputIssue, PlausibilityWarning, PlausibilityError);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let issue = InputIssue::UnusualEggWeight {
            unit: "oz",
            typical: "2.1",
        };
        assert_eq!(
            issue.to_string(),
            "Avg egg weight looks unusual for oz (typical ~2.1)."
        );
        assert_eq!(
            PlausibilityWarning::FcrUnusuallyHigh(7.25).to_string(),
            "FCR of 7.25 is unusually high. Double-check feed and egg figures."
        );
    }

    #[test]
    fn test_serializes_as_message() {
        let json = serde_json::to_string(&PlausibilityError::NegativeBagPrice).unwrap();
        assert_eq!(json, "\"Bag price cannot be negative.\"");
    }
}
