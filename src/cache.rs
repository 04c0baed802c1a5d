//! In-memory caching using moka
//!
//! Quotes are pure functions of the facts and the pricing config, so a
//! computed quote can be reused for identical facts until the config changes.

use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::pricing::models::{JobFacts, QuoteResult};

/// Application cache holding computed quotes
#[derive(Clone)]
pub struct QuoteCache {
    /// Canonical facts JSON -> QuoteResult
    pub quotes: Cache<String, Arc<QuoteResult>>,
}

impl QuoteCache {
    /// Create a new cache instance with the given capacity and TTL
    pub fn new(max_capacity: u64, time_to_live: Duration) -> Self {
        Self {
            quotes: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(time_to_live)
                .build(),
        }
    }

    /// Cache key for a set of facts.
    ///
    /// Facts serialize deterministically (complications are an ordered set),
    /// so equal facts always share a key.
    pub fn key(facts: &JobFacts) -> Result<String, serde_json::Error> {
        serde_json::to_string(facts)
    }

    pub async fn get(&self, key: &str) -> Option<Arc<QuoteResult>> {
        let hit = self.quotes.get(key).await;
        if hit.is_some() {
            debug!("Quote cache HIT");
        }
        hit
    }

    pub async fn insert(&self, key: String, quote: Arc<QuoteResult>) {
        self.quotes.insert(key, quote).await;
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            quotes_size: self.quotes.entry_count(),
        }
    }

    /// Invalidate all cached quotes, e.g. after a pricing config reload
    pub fn invalidate_all(&self) {
        self.quotes.invalidate_all();
        info!("Quote cache invalidated");
    }
}

impl Default for QuoteCache {
    fn default() -> Self {
        // 10k quotes, 10 min TTL
        Self::new(10_000, Duration::from_secs(10 * 60))
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub quotes_size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::config::PricingConfig;
    use crate::pricing::models::{
        Complication, Distances, JobKind, OfficeSize, ServiceType,
    };
    use crate::pricing::services::quote;
    use rust_decimal_macros::dec;

    fn facts() -> JobFacts {
        JobFacts::new(
            ServiceType::Office,
            JobKind::Office {
                office_size: OfficeSize::Small,
            },
            Distances {
                depot_to_from: dec!(3),
                from_to_to: dec!(12),
                to_to_depot: dec!(9),
                drive_time_hours: dec!(1.5),
            },
        )
    }

    #[test]
    fn test_key_ignores_complication_order() {
        let mut a = facts();
        a.complications.insert(Complication::Stairs);
        a.complications.insert(Complication::Loft);

        let mut b = facts();
        b.complications.insert(Complication::Loft);
        b.complications.insert(Complication::Stairs);

        assert_eq!(QuoteCache::key(&a).unwrap(), QuoteCache::key(&b).unwrap());
        assert_ne!(QuoteCache::key(&a).unwrap(), QuoteCache::key(&facts()).unwrap());
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let cache = QuoteCache::default();
        let facts = facts();
        let key = QuoteCache::key(&facts).unwrap();
        assert!(cache.get(&key).await.is_none());

        let result = quote(&PricingConfig::standard(), &facts).unwrap().unwrap();
        cache.insert(key.clone(), Arc::new(result.clone())).await;

        let cached = cache.get(&key).await.unwrap();
        assert_eq!(*cached, result);

        cache.invalidate_all();
        assert!(cache.get(&key).await.is_none());
    }
}
