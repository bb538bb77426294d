pub mod cache;
pub mod document;
pub mod engine;
pub mod scoring;

pub use cache::ResultCache;
pub use engine::{compute, AggregateParams};

/// Aggregation engine with its result cache. Shared process-wide, one
/// instance per server.
pub struct Aggregator {
    cache: ResultCache,
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            cache: ResultCache::new(),
        }
    }

    pub fn with_cache(cache: ResultCache) -> Self {
        Self { cache }
    }

    /// Compute the aggregated view, consulting the cache first unless
    /// `params.fresh` is set. The computed result is stored under the
    /// cache key either way.
    pub fn aggregate(
        &self,
        payloads: &[document::MatchDocument],
        params: &AggregateParams,
    ) -> common::AggregationResult {
        if !params.fresh {
            if let Some(hit) = self.cache.lookup(params) {
                tracing::debug!("Cache hit for {:?}", params.cache_id);
                return hit;
            }
        }

        let result = engine::compute(payloads, params);
        self.cache.store(params, &result);
        result
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}
