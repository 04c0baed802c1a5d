//! Cubic-volume estimation for home and office jobs.

use rust_decimal::prelude::*;

use super::config::PricingConfig;
use super::error::{PricingError, Result};
use super::models::{OfficeSize, PropertySize, SliderPosition};

/// Estimate cubic feet for a residential property.
///
/// The slider picks a bucket of the property's `{few, average, many}`
/// triple and scales it by the position's modifier. The product is rounded
/// to the nearest whole cubic foot.
pub fn estimate_cubes(
    config: &PricingConfig,
    property_size: PropertySize,
    slider_position: SliderPosition,
) -> Result<u32> {
    let triple = config
        .volume
        .property_cubes
        .get(&property_size)
        .ok_or_else(|| {
            PricingError::configuration(format!(
                "no cube triple for property size '{}'",
                property_size.as_str()
            ))
        })?;
    let setting = config.slider_setting(slider_position)?;

    let base = Decimal::from(triple.get(setting.category));
    (base * setting.modifier)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .ok_or_else(|| {
            PricingError::configuration(format!(
                "slider modifier {} yields an invalid cube estimate",
                setting.modifier
            ))
        })
}

/// Estimate cubic feet for an office move.
pub fn estimate_office_cubes(config: &PricingConfig, office_size: OfficeSize) -> Result<u32> {
    config
        .volume
        .office_cubes
        .get(&office_size)
        .copied()
        .ok_or_else(|| {
            PricingError::configuration(format!(
                "no cube estimate for office size '{}'",
                office_size.as_str()
            ))
        })
}
