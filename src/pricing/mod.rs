//! Quoting engine for removals jobs.
//!
//! Pure calculations over an immutable [`PricingConfig`]: volume estimation,
//! resource sizing, complication adjustment, duration classification, cost
//! lines, extras and margin. The HTTP routes wrap these without adding state.

pub mod calculators;
pub mod complications;
pub mod config;
pub mod duration;
pub mod error;
pub mod extras;
pub mod models;
pub mod overrides;
pub mod requests;
pub mod resources;
pub mod responses;
pub mod routes;
pub mod services;
pub mod submission;
pub mod volume;

// Re-export commonly used items
pub use calculators::round_money;
pub use config::PricingConfig;
pub use error::PricingError;
pub use models::{JobFacts, QuoteResult};
pub use routes::router;
pub use services::quote;
