//! Pricing engine error types.

/// Errors raised by the quoting engine.
///
/// Incomplete facts, callback outcomes and rejected overrides are ordinary
/// values, not errors.
#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    /// A lookup key has no entry in the pricing tables.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid job facts: {message}")]
    InvalidFacts { message: String },

    #[error("Could not read pricing config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not parse pricing config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl PricingError {
    pub fn configuration(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!("Pricing configuration error: {}", message);
        PricingError::Configuration { message }
    }

    pub fn invalid_facts(message: impl Into<String>) -> Self {
        PricingError::InvalidFacts {
            message: message.into(),
        }
    }

    /// Short machine-readable tag for API responses
    pub fn error_type(&self) -> &'static str {
        match self {
            PricingError::Configuration { .. } => "configuration",
            PricingError::InvalidFacts { .. } => "invalid_facts",
            PricingError::Io(_) => "config_io",
            PricingError::Parse(_) => "config_parse",
        }
    }
}

pub type Result<T> = std::result::Result<T, PricingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_error_display() {
        let err = PricingError::configuration("no cube triple for 'studio'");
        assert!(err.to_string().contains("studio"));
        assert_eq!(err.error_type(), "configuration");

        let err = PricingError::invalid_facts("from_to_to is negative");
        assert!(err.to_string().contains("from_to_to"));
        assert_eq!(err.error_type(), "invalid_facts");
    }
}
