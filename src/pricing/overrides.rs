//! Manual crew/van override checks.
//!
//! Both checks return values for display; neither rejects by error nor
//! clamps the caller's numbers.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::OverrideLimits;
use super::models::CrewSelection;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideValidation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl OverrideValidation {
    fn ok() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    fn rejected(message: String) -> Self {
        debug!("Override rejected: {}", message);
        Self {
            valid: false,
            message: Some(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideDiff {
    pub differs: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Check a van/crew pairing against the per-van crew limits.
///
/// Capacity is computed in `u64` so any pair of `u32` inputs is answered.
pub fn validate_van_crew(limits: &OverrideLimits, vans: u32, crew: u32) -> OverrideValidation {
    if vans == 0 {
        return OverrideValidation::rejected("At least one van is required.".to_string());
    }

    let crew_wide = u64::from(crew);
    let min_crew = u64::from(vans) * u64::from(limits.min_per_van);
    if crew_wide < min_crew {
        return OverrideValidation::rejected(format!(
            "{} need at least {} so every van has a driver; {} selected.",
            count(vans.into(), "van", "vans"),
            count(min_crew, "crew member", "crew"),
            crew
        ));
    }

    let max_crew = u64::from(vans) * u64::from(limits.max_per_van);
    if crew_wide > max_crew {
        return OverrideValidation::rejected(format!(
            "{} can carry at most {}; {} selected.",
            count(vans.into(), "van", "vans"),
            count(max_crew, "crew member", "crew"),
            crew
        ));
    }

    OverrideValidation::ok()
}

/// Compare a manual selection with the recommendation. Advisory only.
pub fn diff(recommended: CrewSelection, manual: CrewSelection) -> OverrideDiff {
    if recommended == manual {
        return OverrideDiff {
            differs: false,
            message: None,
        };
    }

    OverrideDiff {
        differs: true,
        message: Some(format!(
            "You selected {} and {}; we recommend {} and {}.",
            count(manual.men.into(), "mover", "movers"),
            count(manual.vans.into(), "van", "vans"),
            count(recommended.men.into(), "mover", "movers"),
            count(recommended.vans.into(), "van", "vans"),
        )),
    }
}

fn count(n: u64, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, plural)
    }
}
