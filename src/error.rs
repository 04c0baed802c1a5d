//! Error handling for the HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::pricing::models::MissingInput;
use crate::pricing::responses::PricingErrorResponse;
use crate::pricing::PricingError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    #[error("Job facts are incomplete")]
    Incomplete(Vec<MissingInput>),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, missing) = match &self {
            AppError::Pricing(e @ PricingError::InvalidFacts { .. }) => {
                (StatusCode::BAD_REQUEST, e.error_type(), Vec::new())
            }
            AppError::Pricing(e) => {
                tracing::error!("Pricing error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.error_type(), Vec::new())
            }
            AppError::Incomplete(missing) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "incomplete", missing.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal", Vec::new())
            }
        };

        let body = PricingErrorResponse {
            error_type: error_type.to_string(),
            message: self.to_string(),
            missing,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
