//! Duration tier classification.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::config::TimeThresholds;
use super::models::DurationTier;

const HALF_DAY: &str = "Half Day";
const FULL_DAY: &str = "Full Day";

/// Classify total job hours (loading plus all driving) into a booking tier.
///
/// A property chain never books a half day.
pub fn classify(
    thresholds: &TimeThresholds,
    total_hours: Decimal,
    property_chain: bool,
) -> DurationTier {
    if total_hours <= thresholds.half_day_hours {
        return if property_chain {
            days(Decimal::ONE)
        } else {
            DurationTier {
                days: dec!(0.5),
                is_half_day: true,
                label: HALF_DAY.to_string(),
            }
        };
    }

    if total_hours <= thresholds.one_day_hours {
        days(Decimal::ONE)
    } else if total_hours <= thresholds.two_day_hours {
        days(Decimal::TWO)
    } else if total_hours <= thresholds.three_day_hours {
        days(Decimal::from(3))
    } else {
        days((total_hours / thresholds.hours_per_day).ceil())
    }
}

fn days(count: Decimal) -> DurationTier {
    let count = count.normalize();
    let label = if count == Decimal::ONE {
        FULL_DAY.to_string()
    } else {
        format!("{} Days", count)
    };
    DurationTier {
        days: count,
        is_half_day: false,
        label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::config::PricingConfig;

    fn thresholds() -> TimeThresholds {
        PricingConfig::standard().time
    }

    #[test]
    fn test_half_day_boundary_with_and_without_chain() {
        let chain = classify(&thresholds(), dec!(5.0), true);
        assert_eq!(chain.days, dec!(1));
        assert!(!chain.is_half_day);
        assert_eq!(chain.label, "Full Day");

        let no_chain = classify(&thresholds(), dec!(5.0), false);
        assert_eq!(no_chain.days, dec!(0.5));
        assert!(no_chain.is_half_day);
        assert_eq!(no_chain.label, "Half Day");
    }

    #[test]
    fn test_short_chain_job_is_full_day() {
        let tier = classify(&thresholds(), dec!(1.5), true);
        assert_eq!(tier.days, dec!(1));
        assert!(!tier.is_half_day);
    }

    #[test]
    fn test_day_tiers() {
        let t = thresholds();
        assert_eq!(classify(&t, dec!(5.01), false).days, dec!(1));
        assert_eq!(classify(&t, dec!(12), false).days, dec!(1));
        assert_eq!(classify(&t, dec!(12.5), false).days, dec!(2));
        assert_eq!(classify(&t, dec!(24), false).days, dec!(2));
        assert_eq!(classify(&t, dec!(24.1), false).days, dec!(3));
        assert_eq!(classify(&t, dec!(36), false).label, "3 Days");
    }

    #[test]
    fn test_beyond_three_days() {
        let tier = classify(&thresholds(), dec!(37), false);
        assert_eq!(tier.days, dec!(4));
        assert_eq!(tier.label, "4 Days");

        let tier = classify(&thresholds(), dec!(60), true);
        assert_eq!(tier.days, dec!(5));
        assert_eq!(tier.label, "5 Days");
    }

    #[test]
    fn test_chain_does_not_change_long_jobs() {
        let t = thresholds();
        assert_eq!(classify(&t, dec!(14), true), classify(&t, dec!(14), false));
    }
}
