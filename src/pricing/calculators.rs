//! Core pricing calculation functions.
//!
//! Pure functions for the cost lines of a quote: vans, movers, mileage and
//! overnight accommodation, plus the margin and rounding steps.

use rust_decimal::prelude::*;

use super::config::PricingConfig;
use super::models::DurationTier;

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Used for display amounts only; quote totals go through
/// [`round_to_increment`].
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use removals_quote::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Round to the nearest multiple of `increment`, halves rounding up.
pub fn round_to_increment(amount: Decimal, increment: Decimal) -> Decimal {
    (amount / increment).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        * increment
}

/// Gross a cost up so that `margin_fraction` of the resulting price is margin.
///
/// This is a share of the final price, not a markup on cost:
/// a 0.25 margin turns 75 into 100.
pub fn gross_up(cost: Decimal, margin_fraction: Decimal) -> Decimal {
    cost / (Decimal::ONE - margin_fraction)
}

/// Van hire for the booked duration.
pub fn van_cost(config: &PricingConfig, vans: u32, tier: &DurationTier) -> Decimal {
    let (rate, days) = if tier.is_half_day {
        (config.rates.van_half_day, Decimal::ONE)
    } else {
        (config.rates.van_full_day, tier.days)
    };
    Decimal::from(vans) * rate * days
}

/// Day rate for a crew: the first two movers at the pair rate, the rest at
/// the additional rate.
pub fn mover_day_rate(config: &PricingConfig, men: u32) -> Decimal {
    let rates = &config.rates;
    if men > 2 {
        Decimal::TWO * rates.mover_first_two + Decimal::from(men - 2) * rates.mover_additional
    } else {
        Decimal::from(men) * rates.mover_first_two
    }
}

/// Crew cost for the booked duration. Half days pay half the day rate.
pub fn mover_cost(config: &PricingConfig, men: u32, tier: &DurationTier) -> Decimal {
    let scale = if tier.is_half_day {
        Decimal::new(5, 1)
    } else {
        tier.days
    };
    mover_day_rate(config, men) * scale
}

/// Progressive mileage charge: each band's rate applies only to the miles
/// falling inside that band.
pub fn mileage_cost(config: &PricingConfig, total_miles: Decimal) -> Decimal {
    let mut cost = Decimal::ZERO;
    let mut floor = Decimal::ZERO;

    for band in &config.rates.mileage_bands {
        let ceiling = band.up_to.map_or(total_miles, |up_to| total_miles.min(up_to));
        if ceiling > floor {
            cost += (ceiling - floor) * band.rate;
        }
        match band.up_to {
            Some(up_to) if total_miles > up_to => floor = up_to,
            _ => break,
        }
    }

    cost
}

/// Overnight rooms for the crew on long drives.
///
/// Nothing is charged until the drive time exceeds the trigger.
pub fn accommodation_cost(config: &PricingConfig, drive_time_hours: Decimal, crew: u32) -> Decimal {
    let accommodation = &config.rates.accommodation;
    if drive_time_hours <= accommodation.trigger_hours {
        return Decimal::ZERO;
    }

    let nights = (drive_time_hours / accommodation.trigger_hours).ceil() - Decimal::ONE;
    let rooms = crew.div_ceil(accommodation.people_per_room);

    Decimal::from(rooms) * accommodation.per_room_rate * nights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::duration::classify;
    use rust_decimal_macros::dec;

    fn tier(hours: Decimal) -> DurationTier {
        classify(&PricingConfig::standard().time, hours, false)
    }

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_bankers_rounding_to_even() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(2));
        assert_eq!(round_money(dec!(3.5), 0), dec!(4));
        assert_eq!(round_money(dec!(2.25), 1), dec!(2.2));
        assert_eq!(round_money(dec!(2.35), 1), dec!(2.4));
    }

    #[test]
    fn test_round_money_normal_rounding() {
        assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.236), 2), dec!(1.24));
        assert_eq!(round_money(dec!(126.6666), 2), dec!(126.67));
    }

    // ==================== round_to_increment / gross_up ====================

    #[test]
    fn test_round_to_nearest_ten() {
        assert_eq!(round_to_increment(dec!(506.67), dec!(10)), dec!(510));
        assert_eq!(round_to_increment(dec!(504.99), dec!(10)), dec!(500));
        assert_eq!(round_to_increment(dec!(505), dec!(10)), dec!(510));
        assert_eq!(round_to_increment(dec!(0), dec!(10)), dec!(0));
    }

    #[test]
    fn test_gross_up_is_share_of_price() {
        assert_eq!(gross_up(dec!(75), dec!(0.25)), dec!(100));
        assert_eq!(gross_up(dec!(380), dec!(0)), dec!(380));
        // not a markup on cost
        assert_ne!(gross_up(dec!(100), dec!(0.25)), dec!(125));
    }

    // ==================== van / mover ====================

    #[test]
    fn test_van_cost_half_and_full_days() {
        let config = PricingConfig::standard();
        assert_eq!(van_cost(&config, 2, &tier(dec!(4))), dec!(180));
        assert_eq!(van_cost(&config, 2, &tier(dec!(10))), dec!(300));
        assert_eq!(van_cost(&config, 2, &tier(dec!(20))), dec!(600));
    }

    #[test]
    fn test_mover_day_rate() {
        let config = PricingConfig::standard();
        assert_eq!(mover_day_rate(&config, 0), dec!(0));
        assert_eq!(mover_day_rate(&config, 1), dec!(120));
        assert_eq!(mover_day_rate(&config, 2), dec!(240));
        assert_eq!(mover_day_rate(&config, 3), dec!(340));
        assert_eq!(mover_day_rate(&config, 5), dec!(540));
    }

    #[test]
    fn test_mover_cost_scales_with_duration() {
        let config = PricingConfig::standard();
        assert_eq!(mover_cost(&config, 3, &tier(dec!(5))), dec!(170));
        assert_eq!(mover_cost(&config, 3, &tier(dec!(9))), dec!(340));
        assert_eq!(mover_cost(&config, 3, &tier(dec!(30))), dec!(1020));
    }

    // ==================== mileage ====================

    #[test]
    fn test_mileage_within_first_band() {
        let config = PricingConfig::standard();
        assert_eq!(mileage_cost(&config, dec!(0)), dec!(0));
        assert_eq!(mileage_cost(&config, dec!(30)), dec!(30));
        assert_eq!(mileage_cost(&config, dec!(50)), dec!(50));
    }

    #[test]
    fn test_mileage_is_additive_across_bands() {
        let config = PricingConfig::standard();
        let expected = dec!(50) * dec!(1.00) + dec!(50) * dec!(0.80) + dec!(20) * dec!(0.60);
        assert_eq!(mileage_cost(&config, dec!(120)), expected);
        assert_eq!(mileage_cost(&config, dec!(120)), dec!(102));
        assert_eq!(mileage_cost(&config, dec!(75)), dec!(70));
        assert_eq!(mileage_cost(&config, dec!(100)), dec!(90));
    }

    // ==================== accommodation ====================

    #[test]
    fn test_no_accommodation_up_to_trigger() {
        let config = PricingConfig::standard();
        assert_eq!(accommodation_cost(&config, dec!(3), 4), dec!(0));
        assert_eq!(accommodation_cost(&config, dec!(10), 4), dec!(0));
    }

    #[test]
    fn test_accommodation_nights_and_rooms() {
        let config = PricingConfig::standard();
        // ceil(10.5/10) - 1 = 1 night, 3 crew -> 2 rooms
        assert_eq!(accommodation_cost(&config, dec!(10.5), 3), dec!(170));
        // ceil(25/10) - 1 = 2 nights, 4 crew -> 2 rooms
        assert_eq!(accommodation_cost(&config, dec!(25), 4), dec!(340));
        // exactly two triggers is still one night
        assert_eq!(accommodation_cost(&config, dec!(20), 2), dec!(85));
    }
}
