// src/ingest/types.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::classify::{Category, Priority};

/// A normalized article as handed to callers.
///
/// Headline and summary are never empty. Synthetic (placeholder) articles
/// carry no external URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub headline: String,
    pub summary: String,
    pub image_url: Option<String>,
    pub source: String,
    pub category: Category,
    pub published_at: DateTime<Utc>,
    pub read_time_minutes: u32,
    pub priority: Priority,
    pub origin_url: Option<String>,
    pub is_synthetic: bool,
}

impl Article {
    /// Short relative age for feed cards.
    pub fn time_ago(&self, now: DateTime<Utc>) -> String {
        let mins = (now - self.published_at).num_minutes().max(0);
        match mins {
            0 => "just now".to_string(),
            1..=59 => format!("{mins} min ago"),
            60..=1439 => format!("{} h ago", mins / 60),
            _ => format!("{} d ago", mins / 1440),
        }
    }
}

/// Which stage of the fetch chain produced a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceTag {
    Primary,
    Fallback(String),
    Placeholder,
}

impl SourceTag {
    pub fn is_degraded(&self) -> bool {
        !matches!(self, SourceTag::Primary)
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceTag::Primary => f.write_str("primary"),
            SourceTag::Fallback(name) => write!(f, "fallback:{name}"),
            SourceTag::Placeholder => f.write_str("placeholder"),
        }
    }
}

/// Output of one aggregation cycle. `success` means "a result exists",
/// not "the network succeeded"; degradation shows up in `source`/`note`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub success: bool,
    pub news: Vec<Article>,
    pub source: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

// --- upstream wire shapes (NewsAPI v2) ---

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsApiResponse {
    pub status: String,
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub articles: Vec<RawArticle>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub source: Option<RawSource>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawSource {
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn source_tag_display() {
        assert_eq!(SourceTag::Primary.to_string(), "primary");
        assert_eq!(SourceTag::Fallback("civic".into()).to_string(), "fallback:civic");
        assert_eq!(SourceTag::Placeholder.to_string(), "placeholder");
    }

    #[test]
    fn time_ago_buckets() {
        let now = Utc::now();
        let mut a = crate::ingest::placeholder::placeholder_articles(now).remove(0);
        a.published_at = now;
        assert_eq!(a.time_ago(now), "just now");
        a.published_at = now - Duration::minutes(5);
        assert_eq!(a.time_ago(now), "5 min ago");
        a.published_at = now - Duration::hours(3);
        assert_eq!(a.time_ago(now), "3 h ago");
        a.published_at = now - Duration::days(2);
        assert_eq!(a.time_ago(now), "2 d ago");
    }
}
