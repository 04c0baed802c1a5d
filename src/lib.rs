//! Removals quoting service.

pub mod cache;
pub mod config;
pub mod error;
pub mod pricing;

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use axum::extract::State;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::cache::QuoteCache;
use crate::pricing::responses::HealthResponse;
use crate::pricing::PricingConfig;

/// Shared state for request handlers
#[derive(Clone)]
pub struct AppState {
    pub pricing: Arc<PricingConfig>,
    pub cache: QuoteCache,
}

impl AppState {
    pub fn new(pricing: PricingConfig, cache: QuoteCache) -> Self {
        Self {
            pricing: Arc::new(pricing),
            cache,
        }
    }
}

/// Build the application router with middleware
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(pricing::router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        cached_quotes: state.cache.stats().quotes_size,
    })
}
