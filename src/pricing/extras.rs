//! Pricing for optional add-on services.

use rust_decimal::Decimal;

use super::config::PricingConfig;
use super::error::{PricingError, Result};
use super::models::{
    AssemblyItem, CleaningService, Extras, ExtrasCost, PackingService, PropertySize,
    StorageService,
};

/// Packing price.
///
/// A packing tier is priced by the property's size bracket. Jobs without a
/// property size (offices, furniture), and the legacy `Standard` option,
/// fall back to the flat price for the job's cube bracket.
pub fn packing_cost(
    config: &PricingConfig,
    packing: PackingService,
    property_size: Option<PropertySize>,
    cubes: Option<u32>,
) -> Result<Decimal> {
    let extras = &config.extras;

    if let (PackingService::Tier(tier), Some(size)) = (packing, property_size) {
        let bracket = extras.property_brackets.get(&size).ok_or_else(|| {
            PricingError::configuration(format!(
                "no packing bracket for property size '{}'",
                size.as_str()
            ))
        })?;
        return extras
            .packing
            .get(&tier)
            .and_then(|prices| prices.get(bracket))
            .copied()
            .ok_or_else(|| {
                PricingError::configuration(format!(
                    "no packing price for tier {:?} / bracket {:?}",
                    tier, bracket
                ))
            });
    }

    let cubes = cubes.unwrap_or(0);
    extras
        .legacy_packing
        .iter()
        .find(|bracket| bracket.max_cubes.map_or(true, |max| cubes <= max))
        .map(|bracket| bracket.price)
        .ok_or_else(|| {
            PricingError::configuration(format!("no legacy packing bracket for {} cubes", cubes))
        })
}

/// Cleaning price by room count, scaled by the quick/deep tier.
pub fn cleaning_cost(config: &PricingConfig, cleaning: CleaningService) -> Result<Decimal> {
    if cleaning.rooms == 0 {
        return Ok(Decimal::ZERO);
    }

    let table = &config.extras.cleaning;
    let multiplier = table
        .tier_multipliers
        .get(&cleaning.tier)
        .ok_or_else(|| {
            PricingError::configuration(format!("no cleaning multiplier for {:?}", cleaning.tier))
        })?;

    let (&max_rooms, &max_price) = table
        .room_prices
        .iter()
        .next_back()
        .ok_or_else(|| PricingError::configuration("cleaning room prices are empty"))?;

    let base = if cleaning.rooms > max_rooms {
        max_price + Decimal::from(cleaning.rooms - max_rooms) * table.extra_room_price
    } else {
        *table.room_prices.get(&cleaning.rooms).ok_or_else(|| {
            PricingError::configuration(format!(
                "no cleaning price for {} rooms",
                cleaning.rooms
            ))
        })?
    };

    Ok(base * multiplier)
}

/// Storage price: the first weeks at a discount, the rest at the full rate.
pub fn storage_cost(config: &PricingConfig, storage: StorageService) -> Result<Decimal> {
    let table = &config.extras.storage;
    let weekly = table.weekly_rates.get(&storage.size).ok_or_else(|| {
        PricingError::configuration(format!("no storage rate for {:?}", storage.size))
    })?;

    let discounted_weeks = storage.weeks.min(table.discounted_weeks);
    let full_weeks = storage.weeks - discounted_weeks;

    Ok(*weekly * (Decimal::ONE - table.discount) * Decimal::from(discounted_weeks)
        + *weekly * Decimal::from(full_weeks))
}

/// Dismantling and reassembly, priced per item across all categories.
pub fn assembly_cost(config: &PricingConfig, items: &[AssemblyItem]) -> Result<Decimal> {
    items.iter().try_fold(Decimal::ZERO, |total, item| {
        let price = config.extras.assembly.get(&item.category).ok_or_else(|| {
            PricingError::configuration(format!("no assembly price for {:?}", item.category))
        })?;
        Ok(total + *price * Decimal::from(item.quantity))
    })
}

/// Price every selected extra.
pub fn extras_cost(
    config: &PricingConfig,
    extras: &Extras,
    property_size: Option<PropertySize>,
    cubes: Option<u32>,
) -> Result<ExtrasCost> {
    let packing = match extras.packing {
        Some(packing) => packing_cost(config, packing, property_size, cubes)?,
        None => Decimal::ZERO,
    };
    let cleaning = match extras.cleaning {
        Some(cleaning) => cleaning_cost(config, cleaning)?,
        None => Decimal::ZERO,
    };
    let storage = match extras.storage {
        Some(storage) => storage_cost(config, storage)?,
        None => Decimal::ZERO,
    };
    let assembly = assembly_cost(config, &extras.assembly)?;

    Ok(ExtrasCost {
        packing,
        cleaning,
        storage,
        assembly,
        total: packing + cleaning + storage + assembly,
    })
}
