//! Complication adjustments.

use std::collections::BTreeSet;

use rust_decimal::Decimal;

use super::config::PricingConfig;
use super::error::{PricingError, Result};
use super::models::{Complication, Resources};

/// Resources after additive bumps, plus the cost multiplier to apply later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjusted {
    pub resources: Resources,
    pub multiplier: Decimal,
}

/// Apply complication rules to base resources.
///
/// Factors compose multiplicatively into a cost multiplier; `add_men` and
/// `add_vans` bump headcount directly. Repeated complications count once.
pub fn apply_complications(
    config: &PricingConfig,
    resources: Resources,
    complications: impl IntoIterator<Item = Complication>,
) -> Result<Adjusted> {
    let unique: BTreeSet<Complication> = complications.into_iter().collect();

    let mut adjusted = Adjusted {
        resources,
        multiplier: Decimal::ONE,
    };

    for complication in unique {
        let rule = config.complications.get(&complication).ok_or_else(|| {
            PricingError::configuration(format!("no rule for complication {:?}", complication))
        })?;

        if let Some(factor) = rule.factor {
            adjusted.multiplier *= factor;
        }
        adjusted.resources.men = bump(adjusted.resources.men, rule.add_men, "men")?;
        adjusted.resources.vans = bump(adjusted.resources.vans, rule.add_vans, "vans")?;
    }

    Ok(adjusted)
}

fn bump(current: u32, extra: u32, what: &str) -> Result<u32> {
    current.checked_add(extra).ok_or_else(|| {
        PricingError::invalid_facts(format!(
            "{} {} plus {} exceeds the supported range",
            current, what, extra
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn base() -> Resources {
        Resources::new(3, 2, dec!(4))
    }

    #[test]
    fn test_no_complications() {
        let config = PricingConfig::standard();
        let adjusted = apply_complications(&config, base(), []).unwrap();
        assert_eq!(adjusted.multiplier, Decimal::ONE);
        assert_eq!(adjusted.resources, base());
    }

    #[test]
    fn test_factors_compose() {
        let config = PricingConfig::standard();
        let adjusted = apply_complications(
            &config,
            base(),
            [Complication::Stairs, Complication::NarrowAccess],
        )
        .unwrap();
        assert_eq!(adjusted.multiplier, dec!(1.265));
        assert_eq!(adjusted.resources, base());

        let reversed = apply_complications(
            &config,
            base(),
            [Complication::NarrowAccess, Complication::Stairs],
        )
        .unwrap();
        assert_eq!(reversed.multiplier, adjusted.multiplier);
    }

    #[test]
    fn test_additive_bumps() {
        let config = PricingConfig::standard();
        let adjusted = apply_complications(&config, base(), [Complication::Plants]).unwrap();
        assert_eq!(adjusted.resources.vans, 3);
        assert_eq!(adjusted.resources.men, 3);
        assert_eq!(adjusted.multiplier, Decimal::ONE);
    }

    #[test]
    fn test_factor_and_bump_together() {
        let config = PricingConfig::standard();
        let adjusted = apply_complications(&config, base(), [Complication::Piano]).unwrap();
        assert_eq!(adjusted.resources.men, 4);
        assert_eq!(adjusted.multiplier, dec!(1.20));
        assert_eq!(adjusted.resources.load_time, dec!(4));
    }

    #[test]
    fn test_duplicates_apply_once() {
        let config = PricingConfig::standard();
        let adjusted = apply_complications(
            &config,
            base(),
            [Complication::Plants, Complication::Stairs, Complication::Plants, Complication::Stairs],
        )
        .unwrap();
        assert_eq!(adjusted.resources.vans, 3);
        assert_eq!(adjusted.multiplier, dec!(1.10));
    }

    #[test]
    fn test_missing_rule_is_config_error() {
        let mut config = PricingConfig::standard();
        config.complications.remove(&Complication::Loft);
        assert!(apply_complications(&config, base(), [Complication::Loft]).is_err());
    }

    #[test]
    fn test_bump_past_u32_is_invalid_facts() {
        let config = PricingConfig::standard();
        let full = Resources::new(u32::MAX, u32::MAX, dec!(4));

        let err = apply_complications(&config, full, [Complication::Piano]).unwrap_err();
        assert_eq!(err.error_type(), "invalid_facts");

        let err = apply_complications(&config, full, [Complication::Plants]).unwrap_err();
        assert_eq!(err.error_type(), "invalid_facts");

        // Factor-only rules never touch headcount.
        assert!(apply_complications(&config, full, [Complication::Stairs]).is_ok());
    }
}
