//! removals-quote server.
//!
//! Serves the quoting engine over JSON/HTTP. See `config` for the
//! environment variables it reads.

use tokio::net::TcpListener;

use removals_quote::cache::QuoteCache;
use removals_quote::config::AppConfig;
use removals_quote::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,removals_quote=debug".into()),
        )
        .init();

    let config = AppConfig::from_env()?;
    let pricing = config.load_pricing()?;
    let cache = QuoteCache::new(config.cache_capacity, config.cache_ttl);

    let app = app(AppState::new(pricing, cache));

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("removals-quote listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
