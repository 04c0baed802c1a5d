//! Response DTOs for quoting API endpoints.

use serde::Serialize;

use super::models::{MissingInput, QuoteResult};

/// Response for a computed quote
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub quote: QuoteResult,
    /// Served from the quote cache
    pub cached: bool,
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<MissingInput>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub cached_quotes: u64,
}
