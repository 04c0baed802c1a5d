//! Process configuration from the environment.
//!
//! Reads `.env` if present, then:
//!   QUOTE_BIND_ADDR       listen address (default 0.0.0.0:8080)
//!   QUOTE_PRICING_CONFIG  path to a JSON pricing config (default: built-in constants)
//!   QUOTE_CACHE_CAPACITY  max cached quotes (default 10000)
//!   QUOTE_CACHE_TTL_SECS  cached quote lifetime (default 600)

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use tracing::info;

use crate::pricing::{PricingConfig, PricingError};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub pricing_config_path: Option<PathBuf>,
    pub cache_capacity: u64,
    pub cache_ttl: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let bind_addr =
            std::env::var("QUOTE_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let pricing_config_path = std::env::var("QUOTE_PRICING_CONFIG").ok().map(PathBuf::from);
        let cache_capacity = parse_var("QUOTE_CACHE_CAPACITY", 10_000)?;
        let cache_ttl = Duration::from_secs(parse_var("QUOTE_CACHE_TTL_SECS", 600)?);

        Ok(Self {
            bind_addr,
            pricing_config_path,
            cache_capacity,
            cache_ttl,
        })
    }

    /// Load the pricing tables, falling back to the built-in constants.
    pub fn load_pricing(&self) -> Result<PricingConfig, PricingError> {
        match &self.pricing_config_path {
            Some(path) => PricingConfig::from_json_file(path),
            None => {
                info!("Using built-in pricing constants");
                let config = PricingConfig::standard();
                config.validate()?;
                Ok(config)
            }
        }
    }
}

fn parse_var(name: &str, default: u64) -> anyhow::Result<u64> {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("{} must be a whole number, got '{}'", name, value)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_pricing_loads() {
        let config = AppConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            pricing_config_path: None,
            cache_capacity: 10,
            cache_ttl: Duration::from_secs(1),
        };
        assert_eq!(config.load_pricing().unwrap(), PricingConfig::standard());
    }

    #[test]
    fn test_missing_pricing_file_fails() {
        let config = AppConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            pricing_config_path: Some(PathBuf::from("/nonexistent/pricing.json")),
            cache_capacity: 10,
            cache_ttl: Duration::from_secs(1),
        };
        assert!(config.load_pricing().is_err());
    }
}
