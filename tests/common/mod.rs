// tests/common/mod.rs
// Shared test doubles for the network and location seams.
#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use civic_newsfeed::cache::NewsCache;
use civic_newsfeed::config::NewsConfig;
use civic_newsfeed::error::{FetchError, LocationError};
use civic_newsfeed::ingest::newsapi::{FetchQuery, NewsApi};
use civic_newsfeed::ingest::pipeline::FetchPipeline;
use civic_newsfeed::ingest::types::{RawArticle, RawSource};
use civic_newsfeed::location::geo::{LocationPlatform, PermissionStatus, PositionOptions};
use civic_newsfeed::location::types::LocationFix;
use civic_newsfeed::NewsAggregator;

pub fn raw(title: &str, description: &str) -> RawArticle {
    RawArticle {
        title: Some(title.to_string()),
        description: Some(description.to_string()),
        url_to_image: Some("https://img.test/cover.jpg".to_string()),
        source: Some(RawSource {
            name: Some("Metro Daily".to_string()),
        }),
        published_at: Some("2024-06-01T08:30:00Z".to_string()),
        url: Some("https://news.test/story".to_string()),
        author: None,
    }
}

type Responder = dyn Fn(&FetchQuery) -> Result<Vec<RawArticle>, FetchError> + Send + Sync;

/// Answers each query through a closure and records every call in order.
pub struct ScriptedApi {
    respond: Box<Responder>,
    pub calls: Mutex<Vec<FetchQuery>>,
}

impl ScriptedApi {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&FetchQuery) -> Result<Vec<RawArticle>, FetchError> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn always_failing() -> Self {
        Self::new(|_| Err(FetchError::UpstreamHttp { status: 503 }))
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<FetchQuery> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NewsApi for ScriptedApi {
    async fn fetch(&self, query: &FetchQuery) -> Result<Vec<RawArticle>, FetchError> {
        self.calls.lock().unwrap().push(query.clone());
        (self.respond)(query)
    }
}

/// Healthy until `fail()` is called; then every tier returns HTTP 503.
pub struct SwitchApi {
    failing: AtomicBool,
    pub calls: AtomicUsize,
    articles: Vec<RawArticle>,
}

impl SwitchApi {
    pub fn new(articles: Vec<RawArticle>) -> Self {
        Self {
            failing: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
            articles,
        }
    }

    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl NewsApi for SwitchApi {
    async fn fetch(&self, _query: &FetchQuery) -> Result<Vec<RawArticle>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            Err(FetchError::UpstreamHttp { status: 503 })
        } else {
            Ok(self.articles.clone())
        }
    }
}

pub fn aggregator_with(api: Arc<dyn NewsApi>) -> NewsAggregator {
    let cfg = NewsConfig::default();
    let pipeline = FetchPipeline::from_config(api, &cfg);
    NewsAggregator::new(pipeline, Arc::new(NewsCache::default()))
}

/// Scriptable device: services on/off, permission before/after the one
/// request, a position (or none) and an artificial sensor delay. The read
/// options of the last sensor call are kept for inspection.
pub struct FakePlatform {
    pub enabled: bool,
    pub initial: PermissionStatus,
    pub after_request: PermissionStatus,
    pub fix: Option<LocationFix>,
    pub delay: Duration,
    pub requests: AtomicUsize,
    pub reads: AtomicUsize,
    pub last_opts: Mutex<Option<PositionOptions>>,
}

impl FakePlatform {
    pub fn granted(fix: LocationFix) -> Self {
        Self {
            enabled: true,
            initial: PermissionStatus::Granted,
            after_request: PermissionStatus::Granted,
            fix: Some(fix),
            delay: Duration::ZERO,
            requests: AtomicUsize::new(0),
            reads: AtomicUsize::new(0),
            last_opts: Mutex::new(None),
        }
    }
}

#[async_trait]
impl LocationPlatform for FakePlatform {
    async fn services_enabled(&self) -> bool {
        self.enabled
    }

    async fn permission_status(&self) -> PermissionStatus {
        self.initial
    }

    async fn request_permission(&self) -> PermissionStatus {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.after_request
    }

    async fn current_position(&self, opts: PositionOptions) -> Result<LocationFix, LocationError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        *self.last_opts.lock().unwrap() = Some(opts);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.fix.ok_or(LocationError::Timeout { waited_secs: 0 })
    }
}
