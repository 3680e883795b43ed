// src/aggregator.rs
//! Public facade: location-aware news with graceful degradation.
//!
//! Every entry point resolves to a populated result. Location failures turn
//! into an "unknown location" label, upstream failures into a different
//! `source` tag; nothing is thrown at presentation code.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::cache::NewsCache;
use crate::classify::{Category, Priority};
use crate::config::NewsConfig;
use crate::ingest::pipeline::FetchPipeline;
use crate::ingest::types::{AggregateResult, Article, SourceTag};
use crate::location::geo::Locator;
use crate::location::privacy::{is_within_service_area, reduce, PrecisionTier};
use crate::location::types::LocationFix;

pub const DEFAULT_TOP_LIMIT: usize = 10;

/// `CivicServices` is the classifier's no-match default, so it only counts
/// through the headline keywords below.
const CIVIC_CATEGORIES: &[Category] = &[
    Category::Emergency,
    Category::Infrastructure,
    Category::Health,
    Category::Education,
    Category::Transport,
    Category::Safety,
    Category::Governance,
];

static CIVIC_HEADLINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:civic|municipal\w*|wards?|citizens?|public|residents?|city|water|electricity|roads?)\b",
    )
    .expect("valid civic headline pattern")
});

/// Civic-relevant: category in the civic set, urgent/high priority, or a
/// civic keyword in the headline.
pub fn is_civic_relevant(a: &Article) -> bool {
    CIVIC_CATEGORIES.contains(&a.category)
        || matches!(a.priority, Priority::Urgent | Priority::High)
        || CIVIC_HEADLINE.is_match(&a.headline)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopNewsResult {
    pub success: bool,
    pub news: Vec<Article>,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNewsResult {
    pub success: bool,
    pub news: Vec<Article>,
    pub source: String,
    pub category: String,
}

struct ResolvedLocation {
    label: String,
    hint: Option<String>,
    note: Option<String>,
}

pub struct NewsAggregator {
    pipeline: FetchPipeline,
    cache: Arc<NewsCache>,
    locator: Option<Arc<dyn Locator>>,
    region_label: String,
    unknown_location_label: String,
}

impl NewsAggregator {
    pub fn new(pipeline: FetchPipeline, cache: Arc<NewsCache>) -> Self {
        let defaults = NewsConfig::default();
        Self {
            pipeline,
            cache,
            locator: None,
            region_label: defaults.region_label,
            unknown_location_label: defaults.unknown_location_label,
        }
    }

    pub fn from_config(
        pipeline: FetchPipeline,
        cache: Arc<NewsCache>,
        locator: Option<Arc<dyn Locator>>,
        cfg: &NewsConfig,
    ) -> Self {
        Self {
            pipeline,
            cache,
            locator,
            region_label: cfg.region_label.clone(),
            unknown_location_label: cfg.unknown_location_label.clone(),
        }
    }

    pub fn with_locator(mut self, locator: Arc<dyn Locator>) -> Self {
        self.locator = Some(locator);
        self
    }

    pub fn cache(&self) -> &NewsCache {
        &self.cache
    }

    /// Deliberate refresh: drop the cache, locate, fetch, store.
    pub async fn get_location_news(&self) -> AggregateResult {
        self.cache.invalidate();

        let loc = self.resolve_location().await;
        let outcome = self.pipeline.fetch_articles(loc.hint.as_deref()).await;

        let degraded = outcome.source.is_degraded();
        let note = join_notes(degraded_note(&outcome.source), loc.note);
        let result = AggregateResult {
            success: true,
            news: outcome.articles,
            source: outcome.source.to_string(),
            location: loc.label,
            note,
        };
        info!(
            target: "aggregator",
            source = %result.source,
            count = result.news.len(),
            degraded,
            "location news ready"
        );
        self.cache.put(result.clone());
        result
    }

    /// Civic-relevant articles first, padded with the rest, capped at `limit`.
    pub async fn get_top_news(&self, limit: usize) -> TopNewsResult {
        let agg = self.get_location_news().await;
        let (mut civic, general): (Vec<Article>, Vec<Article>) =
            agg.news.into_iter().partition(is_civic_relevant);
        if civic.len() < limit {
            civic.extend(general);
        }
        civic.truncate(limit);
        TopNewsResult {
            success: agg.success,
            news: civic,
            source: agg.source,
        }
    }

    /// Filter the last aggregate by category (case-insensitive). Falls back
    /// to a fresh cycle when the cache holds nothing usable.
    pub async fn get_news_by_category(&self, category: &str) -> CategoryNewsResult {
        let agg = match self.cache.get() {
            Some(hit) => hit,
            None => self.get_location_news().await,
        };
        let wanted = Category::from_label(category);
        let news = match wanted {
            Some(c) => agg.news.into_iter().filter(|a| a.category == c).collect(),
            None => Vec::new(),
        };
        CategoryNewsResult {
            success: agg.success,
            news,
            source: agg.source,
            category: category.to_string(),
        }
    }

    pub fn clear_cache(&self) {
        self.cache.invalidate();
    }

    async fn resolve_location(&self) -> ResolvedLocation {
        let unknown = |note: Option<String>| ResolvedLocation {
            label: self.unknown_location_label.clone(),
            hint: None,
            note,
        };
        let Some(locator) = self.locator.as_ref() else {
            return unknown(None);
        };
        match locator.get_exact_fix().await {
            Ok(fix) if is_within_service_area(fix.latitude, fix.longitude) => ResolvedLocation {
                label: self.region_label.clone(),
                hint: Some(self.region_label.clone()),
                note: None,
            },
            Ok(fix) => ResolvedLocation {
                label: coarse_label(&fix),
                hint: None,
                note: Some("Your location is outside the service area.".to_string()),
            },
            Err(e) => {
                warn!(target: "aggregator", error = %e, "location unavailable; continuing without it");
                unknown(Some(format!("Location unavailable: {}", e.remediation())))
            }
        }
    }
}

/// Area-tier coordinate label, e.g. "51.507°N, 0.128°W".
fn coarse_label(fix: &LocationFix) -> String {
    let r = reduce(fix, PrecisionTier::Area);
    let ns = if r.latitude >= 0.0 { 'N' } else { 'S' };
    let ew = if r.longitude >= 0.0 { 'E' } else { 'W' };
    format!(
        "{:.3}°{ns}, {:.3}°{ew}",
        r.latitude.abs(),
        r.longitude.abs()
    )
}

fn degraded_note(source: &SourceTag) -> Option<String> {
    match source {
        SourceTag::Primary => None,
        SourceTag::Fallback(name) => Some(format!(
            "Top headlines were unavailable; showing {name} results."
        )),
        SourceTag::Placeholder => {
            Some("Live news is unavailable right now; showing offline highlights.".to_string())
        }
    }
}

fn join_notes(a: Option<String>, b: Option<String>) -> Option<String> {
    match (a, b) {
        (Some(a), Some(b)) => Some(format!("{a} {b}")),
        (a, b) => a.or(b),
    }
}
