//! Time-bounded cache for computed aggregation results.
//!
//! One entry per `(identity, limit, custom-flag)` triple. Entries
//! expire after a fixed TTL and the map is bounded, evicting the
//! oldest entry when full. Writes to the underlying match store never
//! invalidate entries, staleness is limited only by the TTL or an
//! explicit bypass by the caller.

use std::time::{Duration, Instant};

use crate::engine::AggregateParams;

pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60);

const MAX_ENTRIES: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    cache_id: String,
    limit: usize,
    custom: bool,
}

impl CacheKey {
    fn from_params(params: &AggregateParams) -> Self {
        Self {
            cache_id: params.cache_id.clone(),
            limit: params.limit,
            custom: params.only_custom,
        }
    }
}

#[derive(Debug)]
struct Entry {
    stored_at: Instant,
    data: common::AggregationResult,
}

#[derive(Debug)]
pub struct ResultCache {
    ttl: Duration,
    entries: std::sync::Mutex<std::collections::HashMap<CacheKey, Entry>>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::with_ttl(CACHE_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: std::sync::Mutex::new(std::collections::HashMap::new()),
        }
    }

    pub fn lookup(&self, params: &AggregateParams) -> Option<common::AggregationResult> {
        let key = CacheKey::from_params(params);
        let mut entries = self.entries.lock().unwrap();
        match entries.get(&key) {
            Some(entry) if entry.stored_at.elapsed() <= self.ttl => Some(entry.data.clone()),
            Some(_) => {
                entries.remove(&key);
                None
            }
            None => None,
        }
    }

    pub fn store(&self, params: &AggregateParams, data: &common::AggregationResult) {
        let key = CacheKey::from_params(params);
        let mut entries = self.entries.lock().unwrap();
        if entries.len() >= MAX_ENTRIES && !entries.contains_key(&key) {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.stored_at)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
            }
        }
        entries.insert(
            key,
            Entry {
                stored_at: Instant::now(),
                data: data.clone(),
            },
        );
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}
