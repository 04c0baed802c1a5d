//! Pricing configuration.
//!
//! A single immutable table of constants consumed by the calculation
//! functions. Load it once (from [`PricingConfig::standard`] or a JSON file),
//! validate it, and share it by reference.

use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::{PricingError, Result};
use super::models::{
    AssemblyCategory, CleaningTier, Complication, OfficeSize, PackingTier, PropertySize,
    Resources, SliderPosition, StorageSize, VolumeCategory,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub volume: VolumeConfig,
    pub resources: ResourceConfig,
    pub rates: RateConfig,
    pub complications: BTreeMap<Complication, ComplicationRule>,
    pub time: TimeThresholds,
    pub extras: ExtrasConfig,
    pub margin: MarginConfig,
    pub limits: OverrideLimits,
}

/// Base cubic feet for a property at each volume category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CubeTriple {
    pub few: u32,
    pub average: u32,
    pub many: u32,
}

impl CubeTriple {
    pub fn get(&self, category: VolumeCategory) -> u32 {
        match category {
            VolumeCategory::Few => self.few,
            VolumeCategory::Average => self.average,
            VolumeCategory::Many => self.many,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderSetting {
    pub category: VolumeCategory,
    pub modifier: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeConfig {
    pub property_cubes: BTreeMap<PropertySize, CubeTriple>,
    /// Keyed by slider position (1..=5)
    pub slider: BTreeMap<u8, SliderSetting>,
    pub office_cubes: BTreeMap<OfficeSize, u32>,
}

/// Growth applied beyond the last cube table row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extrapolation {
    pub base_cubes: u32,
    pub men_step_cubes: u32,
    pub men_per_step: u32,
    pub van_step_cubes: u32,
    pub vans_per_step: u32,
    pub load_step_cubes: u32,
    pub load_time_per_step: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FurnitureLoadStep {
    /// Inclusive upper bound on item count
    pub max_items: u32,
    pub hours: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceConfig {
    pub small_job_threshold: u32,
    pub small_job: Resources,
    pub cube_table: BTreeMap<u32, Resources>,
    pub extrapolation: Extrapolation,
    pub furniture_load: Vec<FurnitureLoadStep>,
    pub furniture_vans: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MileageBand {
    /// Inclusive upper mile of the band, `None` for the open-ended last band
    pub up_to: Option<Decimal>,
    pub rate: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccommodationConfig {
    pub trigger_hours: Decimal,
    pub people_per_room: u32,
    pub per_room_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateConfig {
    pub van_half_day: Decimal,
    pub van_full_day: Decimal,
    /// Day rate for each of the first two movers
    pub mover_first_two: Decimal,
    /// Day rate for every mover beyond two
    pub mover_additional: Decimal,
    pub mileage_bands: Vec<MileageBand>,
    pub accommodation: AccommodationConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplicationRule {
    #[serde(default)]
    pub factor: Option<Decimal>,
    #[serde(default)]
    pub add_men: u32,
    #[serde(default)]
    pub add_vans: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeThresholds {
    pub half_day_hours: Decimal,
    pub one_day_hours: Decimal,
    pub two_day_hours: Decimal,
    pub three_day_hours: Decimal,
    pub hours_per_day: Decimal,
    /// Single-day jobs longer than this get a warning
    pub long_day_warning_hours: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyBracket {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CubeBracketPrice {
    pub max_cubes: Option<u32>,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningConfig {
    pub room_prices: BTreeMap<u32, Decimal>,
    pub extra_room_price: Decimal,
    pub tier_multipliers: BTreeMap<CleaningTier, Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub weekly_rates: BTreeMap<StorageSize, Decimal>,
    pub discounted_weeks: u32,
    /// Fraction taken off the weekly rate during the discounted weeks
    pub discount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtrasConfig {
    pub packing: BTreeMap<PackingTier, BTreeMap<PropertyBracket, Decimal>>,
    pub legacy_packing: Vec<CubeBracketPrice>,
    pub property_brackets: BTreeMap<PropertySize, PropertyBracket>,
    pub cleaning: CleaningConfig,
    pub storage: StorageConfig,
    pub assembly: BTreeMap<AssemblyCategory, Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginConfig {
    /// Share of the final price kept as margin
    pub fraction: Decimal,
    pub rounding_increment: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideLimits {
    pub min_per_van: u32,
    pub max_per_van: u32,
}

impl PricingConfig {
    /// The published constant set.
    pub fn standard() -> Self {
        let property_cubes = BTreeMap::from([
            (PropertySize::Studio, triple(200, 300, 400)),
            (PropertySize::OneBed, triple(350, 500, 650)),
            (PropertySize::TwoBed, triple(600, 750, 900)),
            (PropertySize::ThreeBed, triple(900, 1100, 1300)),
            (PropertySize::FourBed, triple(1250, 1500, 1750)),
            (PropertySize::FiveBed, triple(1600, 1900, 2200)),
        ]);

        let slider = BTreeMap::from([
            (1, setting(VolumeCategory::Few, dec!(0.9))),
            (2, setting(VolumeCategory::Few, dec!(1.0))),
            (3, setting(VolumeCategory::Average, dec!(1.0))),
            (4, setting(VolumeCategory::Many, dec!(1.0))),
            (5, setting(VolumeCategory::Many, dec!(1.15))),
        ]);

        let office_cubes = BTreeMap::from([
            (OfficeSize::Micro, 300),
            (OfficeSize::Small, 600),
            (OfficeSize::Medium, 1000),
            (OfficeSize::Large, 1600),
            (OfficeSize::ExtraLarge, 2400),
        ]);

        let cube_table = BTreeMap::from([
            (250, Resources::new(2, 1, dec!(2))),
            (500, Resources::new(2, 1, dec!(3))),
            (750, Resources::new(3, 2, dec!(4))),
            (1000, Resources::new(3, 2, dec!(5))),
            (1250, Resources::new(4, 2, dec!(6))),
            (1500, Resources::new(4, 3, dec!(7))),
            (1750, Resources::new(5, 3, dec!(8))),
            (2000, Resources::new(5, 3, dec!(9))),
        ]);

        let complications = BTreeMap::from([
            (Complication::Stairs, factor(dec!(1.10))),
            (Complication::NarrowAccess, factor(dec!(1.15))),
            (Complication::ParkingRestrictions, factor(dec!(1.10))),
            (Complication::LongCarry, factor(dec!(1.05))),
            (Complication::FragileItems, factor(dec!(1.05))),
            (
                Complication::Piano,
                ComplicationRule {
                    factor: Some(dec!(1.20)),
                    add_men: 1,
                    add_vans: 0,
                },
            ),
            (
                Complication::Plants,
                ComplicationRule {
                    factor: None,
                    add_men: 0,
                    add_vans: 1,
                },
            ),
            (Complication::Loft, factor(dec!(1.10))),
        ]);

        let packing = BTreeMap::from([
            (
                PackingTier::Fragile,
                BTreeMap::from([
                    (PropertyBracket::Small, dec!(95)),
                    (PropertyBracket::Medium, dec!(165)),
                    (PropertyBracket::Large, dec!(245)),
                ]),
            ),
            (
                PackingTier::Full,
                BTreeMap::from([
                    (PropertyBracket::Small, dec!(225)),
                    (PropertyBracket::Medium, dec!(395)),
                    (PropertyBracket::Large, dec!(595)),
                ]),
            ),
        ]);

        Self {
            volume: VolumeConfig {
                property_cubes,
                slider,
                office_cubes,
            },
            resources: ResourceConfig {
                small_job_threshold: 250,
                small_job: Resources::new(2, 1, dec!(1.5)),
                cube_table,
                extrapolation: Extrapolation {
                    base_cubes: 2000,
                    men_step_cubes: 250,
                    men_per_step: 1,
                    van_step_cubes: 500,
                    vans_per_step: 1,
                    load_step_cubes: 250,
                    load_time_per_step: dec!(1),
                },
                furniture_load: vec![
                    FurnitureLoadStep { max_items: 5, hours: dec!(1) },
                    FurnitureLoadStep { max_items: 7, hours: dec!(1.5) },
                    FurnitureLoadStep { max_items: 10, hours: dec!(2) },
                    FurnitureLoadStep { max_items: 999, hours: dec!(2.5) },
                ],
                furniture_vans: 1,
            },
            rates: RateConfig {
                van_half_day: dec!(90),
                van_full_day: dec!(150),
                mover_first_two: dec!(120),
                mover_additional: dec!(100),
                mileage_bands: vec![
                    MileageBand { up_to: Some(dec!(50)), rate: dec!(1.00) },
                    MileageBand { up_to: Some(dec!(100)), rate: dec!(0.80) },
                    MileageBand { up_to: None, rate: dec!(0.60) },
                ],
                accommodation: AccommodationConfig {
                    trigger_hours: dec!(10),
                    people_per_room: 2,
                    per_room_rate: dec!(85),
                },
            },
            complications,
            time: TimeThresholds {
                half_day_hours: dec!(5),
                one_day_hours: dec!(12),
                two_day_hours: dec!(24),
                three_day_hours: dec!(36),
                hours_per_day: dec!(12),
                long_day_warning_hours: dec!(8),
            },
            extras: ExtrasConfig {
                packing,
                legacy_packing: vec![
                    CubeBracketPrice { max_cubes: Some(500), price: dec!(150) },
                    CubeBracketPrice { max_cubes: Some(1000), price: dec!(250) },
                    CubeBracketPrice { max_cubes: Some(1500), price: dec!(350) },
                    CubeBracketPrice { max_cubes: None, price: dec!(450) },
                ],
                property_brackets: BTreeMap::from([
                    (PropertySize::Studio, PropertyBracket::Small),
                    (PropertySize::OneBed, PropertyBracket::Small),
                    (PropertySize::TwoBed, PropertyBracket::Medium),
                    (PropertySize::ThreeBed, PropertyBracket::Medium),
                    (PropertySize::FourBed, PropertyBracket::Large),
                    (PropertySize::FiveBed, PropertyBracket::Large),
                ]),
                cleaning: CleaningConfig {
                    room_prices: BTreeMap::from([
                        (1, dec!(80)),
                        (2, dec!(120)),
                        (3, dec!(160)),
                        (4, dec!(200)),
                        (5, dec!(240)),
                        (6, dec!(280)),
                    ]),
                    extra_room_price: dec!(40),
                    tier_multipliers: BTreeMap::from([
                        (CleaningTier::Quick, dec!(1.0)),
                        (CleaningTier::Deep, dec!(1.5)),
                    ]),
                },
                storage: StorageConfig {
                    weekly_rates: BTreeMap::from([
                        (StorageSize::Small, dec!(25)),
                        (StorageSize::Medium, dec!(40)),
                        (StorageSize::Large, dec!(60)),
                    ]),
                    discounted_weeks: 8,
                    discount: dec!(0.5),
                },
                assembly: BTreeMap::from([
                    (AssemblyCategory::Bed, dec!(35)),
                    (AssemblyCategory::Wardrobe, dec!(45)),
                    (AssemblyCategory::Table, dec!(25)),
                    (AssemblyCategory::Desk, dec!(30)),
                    (AssemblyCategory::Sofa, dec!(30)),
                    (AssemblyCategory::Other, dec!(20)),
                ]),
            },
            margin: MarginConfig {
                fraction: dec!(0.25),
                rounding_increment: dec!(10),
            },
            limits: OverrideLimits {
                min_per_van: 1,
                max_per_van: 3,
            },
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: PricingConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        info!("Loaded pricing config from {}", path.display());
        Ok(config)
    }

    /// Checks that every table the engine looks up covers the values the
    /// estimators can produce.
    pub fn validate(&self) -> Result<()> {
        for size in PropertySize::ALL {
            if !self.volume.property_cubes.contains_key(&size) {
                return Err(PricingError::configuration(format!(
                    "no cube triple for property size '{}'",
                    size.as_str()
                )));
            }
            if !self.extras.property_brackets.contains_key(&size) {
                return Err(PricingError::configuration(format!(
                    "no packing bracket for property size '{}'",
                    size.as_str()
                )));
            }
        }

        for position in SliderPosition::all() {
            if !self.volume.slider.contains_key(&position.get()) {
                return Err(PricingError::configuration(format!(
                    "no slider setting for position {}",
                    position.get()
                )));
            }
        }

        for size in OfficeSize::ALL {
            if !self.volume.office_cubes.contains_key(&size) {
                return Err(PricingError::configuration(format!(
                    "no cube estimate for office size '{}'",
                    size.as_str()
                )));
            }
        }

        let resources = &self.resources;
        match resources.cube_table.keys().next() {
            Some(&smallest) if smallest <= resources.small_job_threshold => {}
            _ => {
                return Err(PricingError::configuration(format!(
                    "cube table must start at or below the small job threshold ({})",
                    resources.small_job_threshold
                )))
            }
        }
        let extrapolation = &resources.extrapolation;
        if resources.cube_table.keys().next_back() != Some(&extrapolation.base_cubes) {
            return Err(PricingError::configuration(format!(
                "extrapolation base {} must be the last cube table key",
                extrapolation.base_cubes
            )));
        }
        if extrapolation.men_step_cubes == 0
            || extrapolation.van_step_cubes == 0
            || extrapolation.load_step_cubes == 0
        {
            return Err(PricingError::configuration(
                "extrapolation step sizes must be positive",
            ));
        }
        if resources.furniture_load.is_empty() {
            return Err(PricingError::configuration("furniture load table is empty"));
        }

        let bands = &self.rates.mileage_bands;
        if bands.last().map(|band| band.up_to.is_some()).unwrap_or(true) {
            return Err(PricingError::configuration(
                "mileage bands must end with an open-ended band",
            ));
        }
        let mut previous = Decimal::ZERO;
        for bound in bands.iter().filter_map(|band| band.up_to) {
            if bound <= previous {
                return Err(PricingError::configuration(
                    "mileage band bounds must be ascending",
                ));
            }
            previous = bound;
        }

        let accommodation = &self.rates.accommodation;
        if accommodation.people_per_room == 0 || accommodation.trigger_hours <= Decimal::ZERO {
            return Err(PricingError::configuration(
                "accommodation needs positive people per room and trigger hours",
            ));
        }

        if self.time.hours_per_day <= Decimal::ZERO {
            return Err(PricingError::configuration("hours per day must be positive"));
        }

        if self.margin.fraction < Decimal::ZERO || self.margin.fraction >= Decimal::ONE {
            return Err(PricingError::configuration(format!(
                "margin fraction {} must be in [0, 1)",
                self.margin.fraction
            )));
        }
        if self.margin.rounding_increment <= Decimal::ZERO {
            return Err(PricingError::configuration(
                "rounding increment must be positive",
            ));
        }

        if self.limits.min_per_van == 0 || self.limits.min_per_van > self.limits.max_per_van {
            return Err(PricingError::configuration(format!(
                "crew per van limits {}..={} are inconsistent",
                self.limits.min_per_van, self.limits.max_per_van
            )));
        }

        Ok(())
    }

    pub(crate) fn slider_setting(&self, position: SliderPosition) -> Result<&SliderSetting> {
        self.volume.slider.get(&position.get()).ok_or_else(|| {
            PricingError::configuration(format!(
                "no slider setting for position {}",
                position.get()
            ))
        })
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self::standard()
    }
}

fn triple(few: u32, average: u32, many: u32) -> CubeTriple {
    CubeTriple { few, average, many }
}

fn setting(category: VolumeCategory, modifier: Decimal) -> SliderSetting {
    SliderSetting { category, modifier }
}

fn factor(value: Decimal) -> ComplicationRule {
    ComplicationRule {
        factor: Some(value),
        ..ComplicationRule::default()
    }
}
