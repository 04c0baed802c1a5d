//! Submission payload: the raw facts alongside the computed quote, for audit
//! and lead tracking. Persisting it is the caller's job.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::calculators::round_money;
use super::models::{CallbackReason, JobFacts, QuoteResult, ServiceType};

/// Flat record of the headline numbers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSummary {
    pub service_type: ServiceType,
    pub cubic_feet: Option<u32>,
    pub men: u32,
    pub vans: u32,
    pub duration: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub margin: Decimal,
    pub requires_callback: bool,
    pub callback_reason: Option<CallbackReason>,
    pub override_applied: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionData {
    pub reference: Uuid,
    pub generated_at: DateTime<Utc>,
    pub summary: QuoteSummary,
    pub facts: JobFacts,
    pub quote: QuoteResult,
}

/// Build the payload the submission layer stores.
pub fn build_submission(facts: &JobFacts, quote: &QuoteResult) -> SubmissionData {
    build_submission_at(facts, quote, Utc::now())
}

pub fn build_submission_at(
    facts: &JobFacts,
    quote: &QuoteResult,
    generated_at: DateTime<Utc>,
) -> SubmissionData {
    SubmissionData {
        reference: Uuid::new_v4(),
        generated_at,
        summary: QuoteSummary {
            service_type: facts.service_type,
            cubic_feet: quote.cubic_feet,
            men: quote.resources.men,
            vans: quote.resources.vans,
            duration: quote.duration.label.clone(),
            total_price: quote.total_price,
            margin: round_money(quote.breakdown.margin, 2),
            requires_callback: quote.requires_callback,
            callback_reason: quote.callback_reason,
            override_applied: quote.override_applied,
        },
        facts: facts.clone(),
        quote: quote.clone(),
    }
}
