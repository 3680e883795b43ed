//! Civic Newsfeed — Binary Entrypoint
//! Boots the Axum HTTP server: config, aggregator, metrics, routes.

use civic_newsfeed::{
    build_aggregator, create_router, metrics::Metrics, AppState, NewsConfig, DEFAULT_LOG_FILTER,
};
use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Compact logs by default; `NEWSFEED_LOG_JSON=1` switches to JSON lines.
/// A subscriber installed by the runtime takes precedence.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let json = std::env::var("NEWSFEED_LOG_JSON")
        .ok()
        .is_some_and(|v| v == "1");

    let registry = tracing_subscriber::registry().with(filter);
    let _ = if json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer().compact()).try_init()
    };
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cfg = NewsConfig::load_default()?;
    let aggregator = build_aggregator(&cfg)?;
    let metrics = Metrics::init(cfg.cache_ttl_secs)?;

    let router = create_router(AppState::new(aggregator)).merge(metrics.router());

    Ok(router.into())
}
