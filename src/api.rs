// src/api.rs
//! HTTP surface over the aggregator and the location-privacy helpers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use metrics::counter;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::aggregator::{CategoryNewsResult, NewsAggregator, TopNewsResult, DEFAULT_TOP_LIMIT};
use crate::ingest::types::AggregateResult;
use crate::location::privacy::{
    is_known_category, rationale_for, recommended_tier, reduce, urgency_of, validate,
    LocationValidation, PrecisionTier, ReportUrgency, UnsupportedTier,
};
use crate::location::types::{LocationFix, ReducedLocation};

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<NewsAggregator>,
}

impl AppState {
    pub fn new(aggregator: NewsAggregator) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/news/top", get(top_news))
        .route("/news/location", get(location_news))
        .route("/news/category/{category}", get(news_by_category))
        .route("/news/cache/clear", post(clear_cache))
        .route("/location/reduce", post(reduce_location))
        .route("/location/policy", get(location_policy))
        .route("/location/validate", post(validate_location))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Deserialize)]
struct TopQuery {
    #[serde(default)]
    limit: Option<usize>,
}

async fn top_news(State(state): State<AppState>, Query(q): Query<TopQuery>) -> Json<TopNewsResult> {
    let limit = q.limit.unwrap_or(DEFAULT_TOP_LIMIT);
    Json(state.aggregator.get_top_news(limit).await)
}

async fn location_news(State(state): State<AppState>) -> Json<AggregateResult> {
    Json(state.aggregator.get_location_news().await)
}

async fn news_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Json<CategoryNewsResult> {
    Json(state.aggregator.get_news_by_category(&category).await)
}

async fn clear_cache(State(state): State<AppState>) -> StatusCode {
    state.aggregator.clear_cache();
    StatusCode::NO_CONTENT
}

#[derive(Deserialize)]
struct ReduceReq {
    fix: LocationFix,
    tier: String,
}

async fn reduce_location(
    Json(body): Json<ReduceReq>,
) -> Result<Json<ReducedLocation>, (StatusCode, String)> {
    let tier: PrecisionTier = body
        .tier
        .parse()
        .map_err(|e: UnsupportedTier| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;
    counter!("location_reductions_total", "tier" => tier.as_str()).increment(1);
    Ok(Json(reduce(&body.fix, tier)))
}

#[derive(Deserialize)]
struct PolicyQuery {
    category: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PolicyResp {
    category: String,
    known: bool,
    recommended_tier: PrecisionTier,
    justification: &'static str,
    urgency: ReportUrgency,
    rationale: &'static str,
}

async fn location_policy(Query(q): Query<PolicyQuery>) -> Json<PolicyResp> {
    let tier = recommended_tier(&q.category);
    let urgency = urgency_of(&q.category);
    Json(PolicyResp {
        known: is_known_category(&q.category),
        recommended_tier: tier,
        justification: tier.justification(),
        urgency,
        rationale: rationale_for(urgency),
        category: q.category,
    })
}

#[derive(Deserialize)]
struct ValidateReq {
    location: ReducedLocation,
    category: String,
}

async fn validate_location(Json(body): Json<ValidateReq>) -> Json<LocationValidation> {
    Json(validate(&body.location, &body.category))
}
