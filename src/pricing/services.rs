//! Quote assembly.
//!
//! Runs a job through the estimator, sizer, complication adjuster, duration
//! classifier and cost calculators, then grosses the subtotal up by margin
//! and rounds it to the display increment.

use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};

use super::calculators::{
    accommodation_cost, gross_up, mileage_cost, mover_cost, round_to_increment, van_cost,
};
use super::complications::{apply_complications, Adjusted};
use super::config::PricingConfig;
use super::duration::classify;
use super::error::{PricingError, Result};
use super::extras::extras_cost;
use super::models::{
    CallbackReason, CostBreakdown, JobFacts, JobKind, QuoteResult, Resources,
};
use super::overrides::validate_van_crew;
use super::resources::{size_for_furniture, size_from_cubes, Sizing};
use super::volume::{estimate_cubes, estimate_office_cubes};

/// Compute a quote for a job.
///
/// Returns `Ok(None)` when the facts are still incomplete (no job details or
/// no distances); [`JobFacts::missing_inputs`] says what to ask for.
/// Errors are reserved for configuration drift and structurally invalid
/// facts.
#[instrument(skip_all, fields(service = ?facts.service_type))]
pub fn quote(config: &PricingConfig, facts: &JobFacts) -> Result<Option<QuoteResult>> {
    let (Some(job), Some(distances)) = (&facts.job, &facts.distances) else {
        debug!("Incomplete facts, missing {:?}", facts.missing_inputs());
        return Ok(None);
    };

    if let Some(field) = distances.negative_field() {
        return Err(PricingError::invalid_facts(format!("{} must not be negative", field)));
    }
    if let Some((field, ceiling)) = distances.oversized_field() {
        return Err(PricingError::invalid_facts(format!(
            "{} must not exceed {}",
            field, ceiling
        )));
    }

    let (cubes, sizing) = size_job(config, job)?;
    let recommended = sizing.resources;
    debug!(?cubes, ?recommended, "Sized job");

    let specialist = sizing.callback_reason == Some(CallbackReason::SpecialistItems);

    // Specialist jobs carry no meaningful resources, so neither an override
    // nor complication bumps apply to them.
    let (adjusted, override_applied) = if specialist {
        (
            Adjusted {
                resources: recommended,
                multiplier: Decimal::ONE,
            },
            false,
        )
    } else {
        let (base, override_applied) = match facts.manual_override {
            Some(manual) => {
                let check = validate_van_crew(&config.limits, manual.vans, manual.men);
                if !check.valid {
                    return Err(PricingError::invalid_facts(check.message.unwrap_or_else(
                        || "manual override is outside crew limits".to_string(),
                    )));
                }
                (
                    Resources::new(manual.men, manual.vans, recommended.load_time),
                    true,
                )
            }
            None => (recommended, false),
        };
        (
            apply_complications(config, base, facts.complications.iter().copied())?,
            override_applied,
        )
    };
    let resources = adjusted.resources;

    let total_job_hours = resources.load_time + distances.drive_time_hours;
    let duration = classify(&config.time, total_job_hours, facts.property_chain);
    debug!(%total_job_hours, label = %duration.label, "Classified duration");

    let vans = van_cost(config, resources.vans, &duration);
    let movers = mover_cost(config, resources.men, &duration);
    let mileage = mileage_cost(config, distances.total_miles());
    let accommodation = accommodation_cost(config, distances.drive_time_hours, resources.men);
    let extras = extras_cost(config, &facts.extras, job.property_size(), cubes)?;

    let subtotal = vans + movers + mileage + accommodation + extras.total;
    let adjusted_subtotal = subtotal * adjusted.multiplier;
    let price_before_rounding = gross_up(adjusted_subtotal, config.margin.fraction);
    let total_price = round_to_increment(price_before_rounding, config.margin.rounding_increment);

    let show_multi_day_warning = total_job_hours > config.time.long_day_warning_hours
        && total_job_hours <= config.time.one_day_hours;

    if sizing.requires_callback {
        warn!(
            reason = ?sizing.callback_reason,
            "Instant quote not safe, callback required"
        );
    }

    Ok(Some(QuoteResult {
        total_price,
        resources,
        recommended,
        override_applied,
        cubic_feet: cubes,
        duration,
        total_job_hours,
        requires_callback: sizing.requires_callback,
        callback_reason: sizing.callback_reason,
        show_multi_day_warning,
        breakdown: CostBreakdown {
            vans,
            movers,
            mileage,
            accommodation,
            extras,
            complication_multiplier: adjusted.multiplier,
            subtotal,
            adjusted_subtotal,
            margin: price_before_rounding - adjusted_subtotal,
            price_before_rounding,
        },
    }))
}

/// Base resources the system recommends for a job, before any manual
/// override or complication bumps.
pub fn recommend_resources(config: &PricingConfig, job: &JobKind) -> Result<Resources> {
    size_job(config, job).map(|(_, sizing)| sizing.resources)
}

fn size_job(config: &PricingConfig, job: &JobKind) -> Result<(Option<u32>, Sizing)> {
    match job {
        JobKind::Home {
            property_size,
            slider_position,
        } => {
            let cubes = estimate_cubes(config, *property_size, *slider_position)?;
            Ok((Some(cubes), size_from_cubes(config, cubes)?))
        }
        JobKind::Office { office_size } => {
            let cubes = estimate_office_cubes(config, *office_size)?;
            Ok((Some(cubes), size_from_cubes(config, cubes)?))
        }
        JobKind::Furniture(details) => Ok((None, size_for_furniture(config, details)?)),
    }
}
