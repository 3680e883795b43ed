//! # News cache
//! Single-slot, time-boxed memo of the last aggregate result.
//!
//! There is exactly one slot, not keyed by query. Every fetch overwrites it
//! (last writer wins) and `invalidate()` empties it unconditionally.
//! Entries older than the TTL are never returned. Nothing is persisted.

use metrics::counter;
use std::{
    sync::{Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};
use tracing::debug;

use crate::ingest::types::AggregateResult;

pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub payload: AggregateResult,
    pub fetched_at: Instant,
}

#[derive(Debug)]
pub struct NewsCache {
    slot: Mutex<Option<CacheEntry>>,
    ttl: Duration,
}

impl Default for NewsCache {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }
}

impl NewsCache {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            slot: Mutex::new(None),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn lock(&self) -> MutexGuard<'_, Option<CacheEntry>> {
        // Poison is ignored: writes replace the slot wholesale.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fresh payload, or `None` when empty or older than the TTL.
    pub fn get(&self) -> Option<AggregateResult> {
        let mut slot = self.lock();
        let expired = matches!(slot.as_ref(), Some(e) if e.fetched_at.elapsed() > self.ttl);
        if expired {
            debug!(target: "cache", "entry expired");
            *slot = None;
        }
        let fresh = slot.as_ref().map(|e| e.payload.clone());
        if fresh.is_some() {
            counter!("news_cache_hits_total").increment(1);
        } else {
            counter!("news_cache_misses_total").increment(1);
        }
        fresh
    }

    pub fn put(&self, result: AggregateResult) {
        *self.lock() = Some(CacheEntry {
            payload: result,
            fetched_at: Instant::now(),
        });
    }

    pub fn invalidate(&self) {
        if self.lock().take().is_some() {
            debug!(target: "cache", "invalidated");
        }
    }
}
