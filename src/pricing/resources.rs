//! Resource sizing from cubic footage or furniture facts.

use rust_decimal::Decimal;
use tracing::debug;

use super::config::PricingConfig;
use super::error::{PricingError, Result};
use super::models::{CallbackReason, FurnitureDetails, Resources};

/// Base resources plus whether an instant quote is unsafe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sizing {
    pub resources: Resources,
    pub requires_callback: bool,
    pub callback_reason: Option<CallbackReason>,
}

impl Sizing {
    fn instant(resources: Resources) -> Self {
        Self {
            resources,
            requires_callback: false,
            callback_reason: None,
        }
    }

    fn callback(resources: Resources, reason: CallbackReason) -> Self {
        Self {
            resources,
            requires_callback: true,
            callback_reason: Some(reason),
        }
    }
}

/// Size a job from its cube estimate.
///
/// Cubes between table keys take the nearest lower key's row unchanged;
/// there is no interpolation. Beyond the last key the row is extrapolated
/// and the quote is flagged for a callback.
pub fn size_from_cubes(config: &PricingConfig, cubes: u32) -> Result<Sizing> {
    let table = &config.resources;

    if cubes < table.small_job_threshold {
        debug!("{} cubes below small job threshold", cubes);
        return Ok(Sizing::instant(table.small_job));
    }

    let extrapolation = &table.extrapolation;
    if cubes > extrapolation.base_cubes {
        let base = table
            .cube_table
            .get(&extrapolation.base_cubes)
            .ok_or_else(|| {
                PricingError::configuration(format!(
                    "no cube table row for extrapolation base {}",
                    extrapolation.base_cubes
                ))
            })?;
        let extra = cubes - extrapolation.base_cubes;

        let men = base.men + extra.div_ceil(extrapolation.men_step_cubes) * extrapolation.men_per_step;
        let vans =
            base.vans + extra.div_ceil(extrapolation.van_step_cubes) * extrapolation.vans_per_step;
        let load_time = base.load_time
            + Decimal::from(extra) / Decimal::from(extrapolation.load_step_cubes)
                * extrapolation.load_time_per_step;

        debug!(
            "{} cubes beyond table, extrapolated to {} men / {} vans",
            cubes, men, vans
        );
        return Ok(Sizing::callback(
            Resources::new(men, vans, load_time),
            CallbackReason::LargeProperty,
        ));
    }

    table
        .cube_table
        .range(..=cubes)
        .next_back()
        .map(|(_, row)| Sizing::instant(*row))
        .ok_or_else(|| {
            PricingError::configuration(format!("no cube table row at or below {}", cubes))
        })
}

/// Size a furniture-only job. Cubes are never consulted.
pub fn size_for_furniture(config: &PricingConfig, details: &FurnitureDetails) -> Result<Sizing> {
    if details.specialist_items {
        debug!("Specialist items flagged, callback required");
        return Ok(Sizing::callback(
            Resources::none(),
            CallbackReason::SpecialistItems,
        ));
    }

    let steps = &config.resources.furniture_load;
    let step = steps
        .iter()
        .find(|step| details.item_count <= step.max_items)
        .or_else(|| steps.last())
        .ok_or_else(|| PricingError::configuration("furniture load table is empty"))?;

    let men = if details.needs_two_people || details.any_item_over_40kg {
        2
    } else {
        1
    };

    Ok(Sizing::instant(Resources::new(
        men,
        config.resources.furniture_vans,
        step.hours,
    )))
}
