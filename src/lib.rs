// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod aggregator;
pub mod api;
pub mod cache;
pub mod classify;
pub mod config;
pub mod error;
pub mod ingest;
pub mod location;
pub mod metrics;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

/// Default `RUST_LOG` directive. Subsystem events log under their own
/// targets (`ingest`, `aggregator`, `location`, `cache`), so each is named here.
pub const DEFAULT_LOG_FILTER: &str =
    "civic_newsfeed=info,ingest=info,aggregator=info,location=info,cache=info,warn";

// ---- Re-exports for stable public API ----
pub use crate::aggregator::{CategoryNewsResult, NewsAggregator, TopNewsResult};
pub use crate::api::{create_router, AppState};
pub use crate::cache::NewsCache;
pub use crate::config::NewsConfig;
pub use crate::error::{FetchError, LocationError};
pub use crate::ingest::{AggregateResult, Article, FetchPipeline, NewsApi, NewsApiClient};
pub use crate::location::{GeoSource, Locator, StaticPlatform};

/// Wire the production object graph from config: reqwest-backed client,
/// tier list, single-slot cache and (optionally) a static device position.
pub fn build_aggregator(cfg: &NewsConfig) -> anyhow::Result<NewsAggregator> {
    let api: Arc<dyn NewsApi> = Arc::new(NewsApiClient::from_config(cfg)?);
    let pipeline = FetchPipeline::from_config(api, cfg);
    let cache = Arc::new(NewsCache::with_ttl(Duration::from_secs(cfg.cache_ttl_secs)));
    let locator: Option<Arc<dyn Locator>> = cfg
        .device_fix
        .map(|fix| Arc::new(GeoSource::new(StaticPlatform::new(Some(fix)))) as Arc<dyn Locator>);

    info!(
        country = %cfg.country,
        tiers = pipeline.tiers().len(),
        cache_ttl_secs = cfg.cache_ttl_secs,
        has_api_key = !cfg.api_key.is_empty(),
        has_device_fix = locator.is_some(),
        "aggregator configured"
    );

    Ok(NewsAggregator::from_config(pipeline, cache, locator, cfg))
}
