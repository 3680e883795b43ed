// src/ingest/newsapi.rs
//! Upstream news API client (NewsAPI v2 wire contract).
//!
//! Every response goes through `parse_response` once: HTTP status, JSON
//! shape and upstream `status` are checked there and nowhere else.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::config::NewsConfig;
use crate::error::FetchError;
use crate::ingest::types::{NewsApiResponse, RawArticle};

/// One upstream request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchQuery {
    /// `GET /v2/top-headlines?country=..&pageSize=..`
    TopHeadlines { country: String, page_size: u32 },
    /// `GET /v2/everything?q=..&language=en&sortBy=publishedAt&pageSize=..`
    Everything { query: String, page_size: u32 },
}

impl FetchQuery {
    fn path(&self) -> &'static str {
        match self {
            FetchQuery::TopHeadlines { .. } => "/v2/top-headlines",
            FetchQuery::Everything { .. } => "/v2/everything",
        }
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            FetchQuery::TopHeadlines { country, page_size } => vec![
                ("country", country.clone()),
                ("pageSize", page_size.to_string()),
            ],
            FetchQuery::Everything { query, page_size } => vec![
                ("q", query.clone()),
                ("language", "en".to_string()),
                ("sortBy", "publishedAt".to_string()),
                ("pageSize", page_size.to_string()),
            ],
        }
    }
}

/// Seam between the pipeline and the network.
#[async_trait]
pub trait NewsApi: Send + Sync {
    async fn fetch(&self, query: &FetchQuery) -> Result<Vec<RawArticle>, FetchError>;
}

pub struct NewsApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl NewsApiClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("civic-newsfeed/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(timeout)
            .build()
            .context("building news api http client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn from_config(cfg: &NewsConfig) -> Result<Self> {
        Self::new(
            &cfg.base_url,
            &cfg.api_key,
            Duration::from_secs(cfg.http_timeout_secs),
        )
    }
}

#[async_trait]
impl NewsApi for NewsApiClient {
    async fn fetch(&self, query: &FetchQuery) -> Result<Vec<RawArticle>, FetchError> {
        let url = format!("{}{}", self.base_url, query.path());
        let mut params = query.params();
        params.push(("apiKey", self.api_key.clone()));

        let resp = self.http.get(&url).query(&params).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        debug!(target: "ingest", path = query.path(), status, bytes = body.len(), "upstream response");
        parse_response(status, &body)
    }
}

/// Parse-and-validate a raw upstream response into articles.
pub fn parse_response(http_status: u16, body: &str) -> Result<Vec<RawArticle>, FetchError> {
    if !(200..300).contains(&http_status) {
        return Err(FetchError::UpstreamHttp {
            status: http_status,
        });
    }
    let parsed: NewsApiResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;
    if !parsed.status.eq_ignore_ascii_case("ok") {
        let message = parsed
            .message
            .or(parsed.code)
            .unwrap_or_else(|| format!("status '{}'", parsed.status));
        return Err(FetchError::UpstreamApi { message });
    }
    if parsed.articles.is_empty() {
        return Err(FetchError::EmptyResult);
    }
    Ok(parsed.articles)
}
