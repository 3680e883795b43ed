// src/ingest/mod.rs
pub mod newsapi;
pub mod pipeline;
pub mod placeholder;
pub mod types;

use metrics::{describe_counter, describe_histogram};
use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;

pub use newsapi::{FetchQuery, NewsApi, NewsApiClient};
pub use pipeline::{FetchOutcome, FetchPipeline, FetchTier, TierQuery, TierStep};
pub use types::{AggregateResult, Article, SourceTag};

/// One-time metrics registration (so series show up on /metrics).
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "news_fetch_attempts_total",
            "Upstream fetch attempts, labelled by tier."
        );
        describe_counter!(
            "news_fetch_failures_total",
            "Tier attempts that failed and advanced the fallback chain."
        );
        describe_counter!(
            "news_placeholder_served_total",
            "Cycles where every tier failed and placeholders were served."
        );
        describe_counter!("news_cache_hits_total", "Fresh cache reads.");
        describe_counter!(
            "news_cache_misses_total",
            "Cache reads that found nothing or an expired entry."
        );
        describe_counter!(
            "location_reductions_total",
            "Coordinates reduced, labelled by precision tier."
        );
        describe_histogram!("news_fetch_ms", "Upstream fetch time in milliseconds.");
    });
}

static RE_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)</?[^>]+>").expect("tag regex"));
static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("ws regex"));

/// Upper bound on normalized text, in chars.
const MAX_TEXT_CHARS: usize = 1500;

/// Normalize upstream text: decode entities, strip tags, fold quotes and whitespace.
pub fn clean_text(s: &str) -> String {
    // 1) HTML entity decode
    let mut out = html_escape::decode_html_entities(s).to_string();

    // 2) Strip HTML tags
    out = RE_TAGS.replace_all(&out, "").to_string();

    // 3) Normalize “ ” ‘ ’ « » to ASCII quotes
    out = out
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    // 4) Collapse whitespace
    out = RE_WS.replace_all(&out, " ").trim().to_string();

    // 5) Length cap
    if out.chars().count() > MAX_TEXT_CHARS {
        out = out.chars().take(MAX_TEXT_CHARS).collect();
    }

    out
}
