// src/ingest/pipeline.rs
//! Fetch pipeline: an ordered list of upstream tiers tried one at a time.
//!
//! Order: primary headlines → civic keyword search → configured generic
//! fallbacks → static placeholder set. Tiers run sequentially; the next one
//! starts only after the previous one definitively failed. The fallback
//! order is plain data (`Vec<FetchTier>`), walked by `try_next`.

use chrono::{DateTime, Utc};
use metrics::{counter, histogram};
use std::sync::Arc;
use tracing::{info, warn};

use crate::classify::{classify, estimate_read_time, prioritize};
use crate::config::{FallbackSpec, NewsConfig};
use crate::error::FetchError;
use crate::ingest::newsapi::{FetchQuery, NewsApi};
use crate::ingest::placeholder::placeholder_articles;
use crate::ingest::types::{Article, RawArticle, SourceTag};
use crate::ingest::{clean_text, ensure_metrics_described};

/// Marker NewsAPI puts on articles pulled by the publisher.
const REMOVED_MARKER: &str = "[Removed]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TierQuery {
    Fixed(FetchQuery),
    /// Keyword search that prefers the caller's location hint.
    Regional { default_query: String, page_size: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTier {
    pub tag: SourceTag,
    pub query: TierQuery,
}

impl FetchTier {
    pub fn resolve(&self, location_hint: Option<&str>) -> FetchQuery {
        match &self.query {
            TierQuery::Fixed(q) => q.clone(),
            TierQuery::Regional {
                default_query,
                page_size,
            } => {
                let query = location_hint
                    .map(str::trim)
                    .filter(|h| !h.is_empty())
                    .unwrap_or(default_query)
                    .to_string();
                FetchQuery::Everything {
                    query,
                    page_size: *page_size,
                }
            }
        }
    }
}

/// Build the tier list: primary, civic, then the configured fallbacks in order.
pub fn tiers_from_config(cfg: &NewsConfig) -> Vec<FetchTier> {
    let page_size = cfg.page_size;
    let mut tiers = vec![
        FetchTier {
            tag: SourceTag::Primary,
            query: TierQuery::Fixed(FetchQuery::TopHeadlines {
                country: cfg.country.clone(),
                page_size,
            }),
        },
        FetchTier {
            tag: SourceTag::Fallback("civic".into()),
            query: TierQuery::Fixed(FetchQuery::Everything {
                query: cfg.civic_query.clone(),
                page_size,
            }),
        },
    ];
    for spec in &cfg.fallbacks {
        let tag = SourceTag::Fallback(spec.name().to_string());
        let query = match spec {
            FallbackSpec::Keyword { query, .. } => TierQuery::Fixed(FetchQuery::Everything {
                query: query.clone(),
                page_size,
            }),
            FallbackSpec::Regional { query, .. } => TierQuery::Regional {
                default_query: query.clone(),
                page_size,
            },
            FallbackSpec::Headlines { country, .. } => {
                TierQuery::Fixed(FetchQuery::TopHeadlines {
                    country: country.clone(),
                    page_size,
                })
            }
        };
        tiers.push(FetchTier { tag, query });
    }
    tiers
}

/// Result of walking the tier list.
#[derive(Debug)]
pub enum TierStep {
    Delivered { tag: SourceTag, articles: Vec<Article> },
    Exhausted,
}

/// What the pipeline hands back: always non-empty.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub source: SourceTag,
    pub articles: Vec<Article>,
}

pub struct FetchPipeline {
    api: Arc<dyn NewsApi>,
    tiers: Vec<FetchTier>,
    max_articles: usize,
}

impl FetchPipeline {
    pub fn new(api: Arc<dyn NewsApi>, tiers: Vec<FetchTier>, max_articles: usize) -> Self {
        Self {
            api,
            tiers,
            max_articles: max_articles.max(1),
        }
    }

    pub fn from_config(api: Arc<dyn NewsApi>, cfg: &NewsConfig) -> Self {
        Self::new(api, tiers_from_config(cfg), cfg.max_articles)
    }

    pub fn tiers(&self) -> &[FetchTier] {
        &self.tiers
    }

    /// Run the chain. Never fails: total exhaustion yields the placeholder set.
    pub async fn fetch_articles(&self, location_hint: Option<&str>) -> FetchOutcome {
        ensure_metrics_described();
        match self.try_next(&self.tiers, location_hint).await {
            TierStep::Delivered { tag, articles } => {
                info!(target: "ingest", source = %tag, count = articles.len(), "tier delivered");
                FetchOutcome {
                    source: tag,
                    articles,
                }
            }
            TierStep::Exhausted => {
                warn!(target: "ingest", tiers = self.tiers.len(), "all tiers exhausted; serving placeholders");
                counter!("news_placeholder_served_total").increment(1);
                FetchOutcome {
                    source: SourceTag::Placeholder,
                    articles: placeholder_articles(Utc::now()),
                }
            }
        }
    }

    /// Try `tiers` front to back, stopping at the first one that delivers.
    pub async fn try_next(&self, tiers: &[FetchTier], location_hint: Option<&str>) -> TierStep {
        let mut remaining = tiers;
        while let Some((tier, rest)) = remaining.split_first() {
            match self.attempt(tier, location_hint).await {
                Ok(articles) => {
                    return TierStep::Delivered {
                        tag: tier.tag.clone(),
                        articles,
                    }
                }
                Err(e) => {
                    warn!(target: "ingest", tier = %tier.tag, kind = e.kind(), error = %e, "tier failed");
                    counter!("news_fetch_failures_total", "tier" => tier.tag.to_string())
                        .increment(1);
                    remaining = rest;
                }
            }
        }
        TierStep::Exhausted
    }

    async fn attempt(
        &self,
        tier: &FetchTier,
        location_hint: Option<&str>,
    ) -> Result<Vec<Article>, FetchError> {
        counter!("news_fetch_attempts_total", "tier" => tier.tag.to_string()).increment(1);
        let t0 = std::time::Instant::now();
        let query = tier.resolve(location_hint);
        let raw = self.api.fetch(&query).await;
        histogram!("news_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);

        let articles = normalize_articles(raw?, Utc::now(), self.max_articles);
        if articles.is_empty() {
            return Err(FetchError::EmptyResult);
        }
        Ok(articles)
    }
}

/// Filter (title, description and image required), classify, truncate.
/// Upstream order is kept.
pub fn normalize_articles(raw: Vec<RawArticle>, now: DateTime<Utc>, max: usize) -> Vec<Article> {
    let cycle = now.timestamp_millis();
    raw.into_iter()
        .filter_map(to_article_parts)
        .take(max)
        .enumerate()
        .map(|(idx, p)| {
            let text = format!("{} {}", p.headline, p.summary);
            Article {
                id: format!("news-{cycle}-{idx}"),
                category: classify(&text),
                priority: prioritize(&text),
                read_time_minutes: estimate_read_time(&text),
                published_at: p.published_at.unwrap_or(now),
                headline: p.headline,
                summary: p.summary,
                image_url: Some(p.image_url),
                source: p.source,
                origin_url: p.origin_url,
                is_synthetic: false,
            }
        })
        .collect()
}

struct Parts {
    headline: String,
    summary: String,
    image_url: String,
    source: String,
    origin_url: Option<String>,
    published_at: Option<DateTime<Utc>>,
}

fn to_article_parts(raw: RawArticle) -> Option<Parts> {
    let headline = clean_text(raw.title.as_deref()?);
    let summary = clean_text(raw.description.as_deref()?);
    let image_url = raw.url_to_image?.trim().to_string();
    if headline.is_empty()
        || summary.is_empty()
        || image_url.is_empty()
        || headline == REMOVED_MARKER
    {
        return None;
    }
    let source = raw
        .source
        .and_then(|s| s.name)
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Unknown source".to_string());
    let published_at = raw
        .published_at
        .as_deref()
        .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
        .map(|dt| dt.with_timezone(&Utc));
    Some(Parts {
        headline,
        summary,
        image_url,
        source,
        origin_url: raw.url.filter(|u| !u.trim().is_empty()),
        published_at,
    })
}
