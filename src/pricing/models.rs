//! Value types for quoting.
//!
//! Everything here is plain data: the caller-supplied [`JobFacts`], the
//! intermediate [`Resources`] and [`DurationTier`], and the final
//! [`QuoteResult`]. None of these carry identity beyond their fields.

use std::collections::BTreeSet;
use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Kind of service requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Home,
    Office,
    Clearance,
}

/// Residential property size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertySize {
    Studio,
    OneBed,
    TwoBed,
    ThreeBed,
    FourBed,
    FiveBed,
}

impl PropertySize {
    pub const ALL: [PropertySize; 6] = [
        PropertySize::Studio,
        PropertySize::OneBed,
        PropertySize::TwoBed,
        PropertySize::ThreeBed,
        PropertySize::FourBed,
        PropertySize::FiveBed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertySize::Studio => "studio",
            PropertySize::OneBed => "one_bed",
            PropertySize::TwoBed => "two_bed",
            PropertySize::ThreeBed => "three_bed",
            PropertySize::FourBed => "four_bed",
            PropertySize::FiveBed => "five_bed",
        }
    }
}

/// Office size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfficeSize {
    Micro,
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl OfficeSize {
    pub const ALL: [OfficeSize; 5] = [
        OfficeSize::Micro,
        OfficeSize::Small,
        OfficeSize::Medium,
        OfficeSize::Large,
        OfficeSize::ExtraLarge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OfficeSize::Micro => "micro",
            OfficeSize::Small => "small",
            OfficeSize::Medium => "medium",
            OfficeSize::Large => "large",
            OfficeSize::ExtraLarge => "extra_large",
        }
    }
}

/// Bucket of the per-property cube triple picked by the slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeCategory {
    Few,
    Average,
    Many,
}

/// Position of the "how much stuff" slider, 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SliderPosition(u8);

impl SliderPosition {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(position: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX)
            .contains(&position)
            .then_some(SliderPosition(position))
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// All valid positions in ascending order
    pub fn all() -> impl Iterator<Item = SliderPosition> {
        (Self::MIN..=Self::MAX).map(SliderPosition)
    }
}

impl TryFrom<u8> for SliderPosition {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        SliderPosition::new(value).ok_or_else(|| {
            format!(
                "slider position must be between {} and {}, got {}",
                SliderPosition::MIN,
                SliderPosition::MAX,
                value
            )
        })
    }
}

impl From<SliderPosition> for u8 {
    fn from(position: SliderPosition) -> Self {
        position.0
    }
}

/// Facts for a furniture-only (small) job. Volume is never estimated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FurnitureDetails {
    pub item_count: u32,
    #[serde(default)]
    pub needs_two_people: bool,
    #[serde(default)]
    pub any_item_over_40kg: bool,
    #[serde(default)]
    pub specialist_items: bool,
}

/// What is being moved. Exactly one variant describes a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobKind {
    Home {
        property_size: PropertySize,
        slider_position: SliderPosition,
    },
    Office {
        office_size: OfficeSize,
    },
    Furniture(FurnitureDetails),
}

impl JobKind {
    pub fn property_size(&self) -> Option<PropertySize> {
        match self {
            JobKind::Home { property_size, .. } => Some(*property_size),
            _ => None,
        }
    }
}

/// Flagged job condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complication {
    Stairs,
    NarrowAccess,
    ParkingRestrictions,
    LongCarry,
    FragileItems,
    Piano,
    Plants,
    Loft,
}

impl Complication {
    pub const ALL: [Complication; 8] = [
        Complication::Stairs,
        Complication::NarrowAccess,
        Complication::ParkingRestrictions,
        Complication::LongCarry,
        Complication::FragileItems,
        Complication::Piano,
        Complication::Plants,
        Complication::Loft,
    ];
}

/// Longest single leg accepted, in miles (roughly once around the globe).
pub const MAX_LEG_MILES: Decimal = dec!(25000);

/// Longest total drive time accepted, in hours.
pub const MAX_DRIVE_TIME_HOURS: Decimal = dec!(1000);

/// Route figures from the mapping collaborator. Miles and hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distances {
    pub depot_to_from: Decimal,
    pub from_to_to: Decimal,
    pub to_to_depot: Decimal,
    /// Depot to origin, origin to destination, destination back to depot.
    pub drive_time_hours: Decimal,
}

impl Distances {
    pub fn total_miles(&self) -> Decimal {
        self.depot_to_from + self.from_to_to + self.to_to_depot
    }

    pub(crate) fn negative_field(&self) -> Option<&'static str> {
        [
            ("depot_to_from", self.depot_to_from),
            ("from_to_to", self.from_to_to),
            ("to_to_depot", self.to_to_depot),
            ("drive_time_hours", self.drive_time_hours),
        ]
        .into_iter()
        .find(|(_, value)| value.is_sign_negative() && !value.is_zero())
        .map(|(name, _)| name)
    }

    /// First field above its ceiling, with that ceiling. Keeps every
    /// downstream sum well inside `Decimal` range.
    pub(crate) fn oversized_field(&self) -> Option<(&'static str, Decimal)> {
        [
            ("depot_to_from", self.depot_to_from, MAX_LEG_MILES),
            ("from_to_to", self.from_to_to, MAX_LEG_MILES),
            ("to_to_depot", self.to_to_depot, MAX_LEG_MILES),
            ("drive_time_hours", self.drive_time_hours, MAX_DRIVE_TIME_HOURS),
        ]
        .into_iter()
        .find(|(_, value, ceiling)| value > ceiling)
        .map(|(name, _, ceiling)| (name, ceiling))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackingTier {
    Fragile,
    Full,
}

/// Packing add-on. `Standard` is the legacy flat price by cube bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackingService {
    Tier(PackingTier),
    Standard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningTier {
    Quick,
    Deep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningService {
    pub rooms: u32,
    pub tier: CleaningTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageSize {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageService {
    pub size: StorageSize,
    pub weeks: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssemblyCategory {
    Bed,
    Wardrobe,
    Table,
    Desk,
    Sofa,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyItem {
    pub category: AssemblyCategory,
    pub quantity: u32,
}

/// Optional add-on services
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extras {
    #[serde(default)]
    pub packing: Option<PackingService>,
    #[serde(default)]
    pub cleaning: Option<CleaningService>,
    #[serde(default)]
    pub storage: Option<StorageService>,
    #[serde(default)]
    pub assembly: Vec<AssemblyItem>,
}

/// A van/crew pairing, either recommended or chosen by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CrewSelection {
    pub men: u32,
    pub vans: u32,
}

/// Caller-supplied description of one job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFacts {
    pub service_type: ServiceType,
    #[serde(default)]
    pub job: Option<JobKind>,
    #[serde(default)]
    pub complications: BTreeSet<Complication>,
    #[serde(default)]
    pub property_chain: bool,
    #[serde(default)]
    pub distances: Option<Distances>,
    #[serde(default)]
    pub extras: Extras,
    #[serde(default)]
    pub manual_override: Option<CrewSelection>,
}

/// Input the engine still needs before it can quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingInput {
    JobDetails,
    Distances,
}

impl JobFacts {
    pub fn new(service_type: ServiceType, job: JobKind, distances: Distances) -> Self {
        Self {
            service_type,
            job: Some(job),
            complications: BTreeSet::new(),
            property_chain: false,
            distances: Some(distances),
            extras: Extras::default(),
            manual_override: None,
        }
    }

    /// Lists the inputs that must be collected before a quote can be given.
    pub fn missing_inputs(&self) -> Vec<MissingInput> {
        let mut missing = Vec::new();
        if self.job.is_none() {
            missing.push(MissingInput::JobDetails);
        }
        if self.distances.is_none() {
            missing.push(MissingInput::Distances);
        }
        missing
    }
}

/// Crew, vans and loading hours for a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    pub men: u32,
    pub vans: u32,
    pub load_time: Decimal,
}

impl Resources {
    pub fn new(men: u32, vans: u32, load_time: Decimal) -> Self {
        Self {
            men,
            vans,
            load_time,
        }
    }

    pub fn none() -> Self {
        Self::new(0, 0, Decimal::ZERO)
    }

    pub fn crew(&self) -> CrewSelection {
        CrewSelection {
            men: self.men,
            vans: self.vans,
        }
    }
}

/// Why an instant price cannot be relied upon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallbackReason {
    SpecialistItems,
    LargeProperty,
}

impl fmt::Display for CallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallbackReason::SpecialistItems => write!(f, "specialist_items"),
            CallbackReason::LargeProperty => write!(f, "large_property"),
        }
    }
}

/// Booked service length
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationTier {
    pub days: Decimal,
    pub is_half_day: bool,
    pub label: String,
}

/// Itemised cost of optional services
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtrasCost {
    pub packing: Decimal,
    pub cleaning: Decimal,
    pub storage: Decimal,
    pub assembly: Decimal,
    pub total: Decimal,
}

/// Cost lines before rounding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub vans: Decimal,
    pub movers: Decimal,
    pub mileage: Decimal,
    pub accommodation: Decimal,
    pub extras: ExtrasCost,
    pub complication_multiplier: Decimal,
    /// Sum of the cost lines
    pub subtotal: Decimal,
    /// Subtotal after the complication multiplier
    pub adjusted_subtotal: Decimal,
    pub margin: Decimal,
    /// Adjusted subtotal grossed up by margin, before rounding
    pub price_before_rounding: Decimal,
}

/// A fully computed quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResult {
    pub total_price: Decimal,
    pub resources: Resources,
    /// Sizer output before any manual override or complication bumps
    pub recommended: Resources,
    pub override_applied: bool,
    pub cubic_feet: Option<u32>,
    pub duration: DurationTier,
    pub total_job_hours: Decimal,
    pub requires_callback: bool,
    pub callback_reason: Option<CallbackReason>,
    pub show_multi_day_warning: bool,
    pub breakdown: CostBreakdown,
}
