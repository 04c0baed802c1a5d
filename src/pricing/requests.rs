//! Request DTOs for quoting API endpoints.
//!
//! Quotes themselves take a [`JobFacts`](super::models::JobFacts) body
//! directly.

use serde::Deserialize;

use super::models::CrewSelection;

/// Request to check a manual van/crew pairing
#[derive(Debug, Deserialize)]
pub struct ValidateOverrideRequest {
    pub vans: u32,
    pub crew: u32,
}

/// Request to compare a manual pairing with the recommendation
#[derive(Debug, Deserialize)]
pub struct DiffOverrideRequest {
    pub recommended: CrewSelection,
    pub manual: CrewSelection,
}
