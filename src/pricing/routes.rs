//! HTTP routes for the quoting engine.
//!
//! Every handler is a thin wrapper over a pure engine call; nothing is
//! persisted here.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, warn};

use crate::cache::QuoteCache;
use crate::error::{AppError, Result};
use crate::AppState;

use super::models::JobFacts;
use super::overrides::{self, OverrideDiff, OverrideValidation};
use super::requests::{DiffOverrideRequest, ValidateOverrideRequest};
use super::responses::QuoteResponse;
use super::services;
use super::submission::{build_submission, SubmissionData};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/quote", post(create_quote))
        .route("/api/quote/submission", post(create_submission))
        .route("/api/override/validate", post(validate_override))
        .route("/api/override/diff", post(diff_override))
}

/// Compute (or reuse) a quote
async fn create_quote(
    State(state): State<AppState>,
    Json(facts): Json<JobFacts>,
) -> Result<Json<QuoteResponse>> {
    let (quote, cached) = quote_with_cache(&state, &facts).await?;
    Ok(Json(QuoteResponse {
        quote: (*quote).clone(),
        cached,
    }))
}

/// Build the payload a submission layer would store alongside the lead
async fn create_submission(
    State(state): State<AppState>,
    Json(facts): Json<JobFacts>,
) -> Result<Json<SubmissionData>> {
    let (quote, _) = quote_with_cache(&state, &facts).await?;
    let submission = build_submission(&facts, &quote);
    info!(
        reference = %submission.reference,
        total = %submission.summary.total_price,
        "Prepared quote submission"
    );
    Ok(Json(submission))
}

async fn validate_override(
    State(state): State<AppState>,
    Json(request): Json<ValidateOverrideRequest>,
) -> Json<OverrideValidation> {
    let result = overrides::validate_van_crew(&state.pricing.limits, request.vans, request.crew);
    if !result.valid {
        warn!(vans = request.vans, crew = request.crew, "Invalid manual override");
    }
    Json(result)
}

async fn diff_override(Json(request): Json<DiffOverrideRequest>) -> Json<OverrideDiff> {
    Json(overrides::diff(request.recommended, request.manual))
}

async fn quote_with_cache(
    state: &AppState,
    facts: &JobFacts,
) -> Result<(Arc<super::models::QuoteResult>, bool)> {
    let key = QuoteCache::key(facts).map_err(|e| AppError::Internal(e.to_string()))?;
    if let Some(hit) = state.cache.get(&key).await {
        return Ok((hit, true));
    }

    let quote = services::quote(&state.pricing, facts)?
        .ok_or_else(|| AppError::Incomplete(facts.missing_inputs()))?;
    let quote = Arc::new(quote);
    state.cache.insert(key, Arc::clone(&quote)).await;

    Ok((quote, false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::config::PricingConfig;

    #[tokio::test]
    async fn test_second_quote_is_cached() {
        let state = AppState::new(PricingConfig::standard(), QuoteCache::default());
        let facts: JobFacts = serde_json::from_value(serde_json::json!({
            "service_type": "home",
            "job": { "kind": "furniture", "item_count": 3 },
            "distances": {
                "depot_to_from": "2",
                "from_to_to": "4",
                "to_to_depot": "3",
                "drive_time_hours": "0.75"
            }
        }))
        .unwrap();

        let (first, first_cached) = quote_with_cache(&state, &facts).await.unwrap();
        let (second, second_cached) = quote_with_cache(&state, &facts).await.unwrap();
        assert!(!first_cached);
        assert!(second_cached);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_incomplete_facts_are_reported() {
        let state = AppState::new(PricingConfig::standard(), QuoteCache::default());
        let facts: JobFacts =
            serde_json::from_value(serde_json::json!({ "service_type": "office" })).unwrap();

        match quote_with_cache(&state, &facts).await {
            Err(AppError::Incomplete(missing)) => assert_eq!(missing.len(), 2),
            other => panic!("expected incomplete, got {:?}", other.map(|(q, _)| q)),
        }
    }
}
