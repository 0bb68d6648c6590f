//! Form validation for the input panel
//!
//! Returns every issue found; the caller decides whether to block the
//! calculation on them.

use crate::error::InputIssue;
use crate::units::{number_or_zero, parse_optional_number, RawInputs, UnitSystem};

/// Typical egg weight bounds in the unit the form is using
fn egg_weight_bounds(units: UnitSystem) -> (f64, f64, &'static str) {
    match units {
        UnitSystem::Imperial => (1.2, 3.0, "2.1"),
        UnitSystem::Metric => (40.0, 80.0, "60"),
    }
}

pub fn validate_inputs(inputs: &RawInputs) -> Vec<InputIssue> {
    let mut issues = Vec::new();

    if inputs.bird_count < 1 {
        issues.push(InputIssue::BirdCountTooLow);
    }
    if inputs.egg_count < 0 {
        issues.push(InputIssue::NegativeEggCount);
    }

    let egg_weight = number_or_zero(inputs.avg_egg_weight.as_ref());
    let (min, max, typical) = egg_weight_bounds(inputs.units);
    if egg_weight < min || egg_weight > max {
        issues.push(InputIssue::UnusualEggWeight {
            unit: match inputs.units {
                UnitSystem::Imperial => "oz",
                UnitSystem::Metric => "grams",
            },
            typical,
        });
    }

    let feed = number_or_zero(inputs.feed_consumed.as_ref());
    if feed <= 0.0 {
        issues.push(InputIssue::MissingFeedConsumed);
    }

    let alt_amount = number_or_zero(inputs.alt_amount.as_ref());
    if alt_amount < 0.0 {
        issues.push(InputIssue::NegativeAltAmount);
    }
    if alt_amount > feed {
        issues.push(InputIssue::AltAmountExceedsFeed);
    }
    if parse_optional_number(inputs.alt_price_per_unit.as_ref()).is_some_and(|p| p < 0.0) {
        issues.push(InputIssue::NegativeAltPrice);
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::RawValue;

    fn valid_metric() -> RawInputs {
        RawInputs {
            units: UnitSystem::Metric,
            feed_consumed: Some(RawValue::Number(1.2)),
            avg_egg_weight: Some(RawValue::Number(60.0)),
            bag_weight: Some(RawValue::Number(25.0)),
            bag_price: Some(RawValue::Number(24.75)),
            alt_amount: Some(RawValue::Number(0.2)),
            alt_price_per_unit: Some(RawValue::Number(0.5)),
            egg_count: 10,
            bird_count: 12,
        }
    }

    #[test]
    fn test_valid_inputs() {
        assert!(validate_inputs(&valid_metric()).is_empty());
    }

    #[test]
    fn test_counts() {
        let mut inputs = valid_metric();
        inputs.bird_count = 0;
        inputs.egg_count = -1;
        assert_eq!(
            validate_inputs(&inputs),
            vec![InputIssue::BirdCountTooLow, InputIssue::NegativeEggCount]
        );
    }

    #[test]
    fn test_egg_weight_bounds_follow_units() {
        let mut inputs = valid_metric();
        inputs.units = UnitSystem::Imperial;
        // 60 oz is not an egg
        let issues = validate_inputs(&inputs);
        assert!(issues.contains(&InputIssue::UnusualEggWeight {
            unit: "oz",
            typical: "2.1"
        }));

        inputs.avg_egg_weight = Some("2.1".into());
        inputs.alt_amount = None;
        assert!(validate_inputs(&inputs).is_empty());
    }

    #[test]
    fn test_missing_feed() {
        let mut inputs = valid_metric();
        inputs.feed_consumed = Some("".into());
        inputs.alt_amount = None;
        assert_eq!(validate_inputs(&inputs), vec![InputIssue::MissingFeedConsumed]);
    }

    #[test]
    fn test_alt_feed_issues() {
        let mut inputs = valid_metric();
        inputs.alt_amount = Some(RawValue::Number(5.0));
        inputs.alt_price_per_unit = Some("-0.1".into());
        assert_eq!(
            validate_inputs(&inputs),
            vec![InputIssue::AltAmountExceedsFeed, InputIssue::NegativeAltPrice]
        );

        inputs.alt_amount = Some(RawValue::Number(-1.0));
        inputs.alt_price_per_unit = Some("".into());
        assert_eq!(validate_inputs(&inputs), vec![InputIssue::NegativeAltAmount]);
    }
}
