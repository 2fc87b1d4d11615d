//! The caching client
//!
//! [`CachedFetcher`] wraps any [`Fetcher`]. Flows, single flows and
//! structures go through a plain read-through cache. Data requests that
//! need no observation values go through the containment slot of their
//! flow: the slot keeps the data set fetched last together with the key it
//! was fetched with, and any later request whose key is contained by that
//! key is answered by filtering the stored data set. Requests for values
//! bypass the cache entirely.
//!
//! Concurrent misses on one slot are not coalesced. Both callers fetch and
//! the later write wins; every write replaces the stored key and its data
//! set together.

use crate::stats::{CacheStats, StatsSnapshot};
use crate::traits::Cache;
use crate::typed_id::{ResourceId, TypedId};
use statdx_core::constants::DEFAULT_TTL;
use statdx_core::{
    DataQuery, DataSet, Detail, FetchStrategy, Fetcher, Flow, FlowRef, Key, Result, Series,
    StructRef, Structure,
};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Whether containment between `stored` and `requested` is defined
///
/// A slot holding a key of another arity is refilled rather than failing
/// every later request until it expires.
fn comparable(stored: &Key, requested: &Key) -> bool {
    stored.is_all() || requested.is_all() || stored.size() == requested.size()
}

/// A [`Fetcher`] answering from a [`Cache`] whenever it can
pub struct CachedFetcher<F> {
    delegate: F,
    cache: Arc<dyn Cache>,
    resource: ResourceId,
    ttl: Duration,
    strategy: FetchStrategy,
    stats: CacheStats,
}

impl<F: Fetcher> CachedFetcher<F> {
    /// Wrap `delegate`, identified by `resource` in cache keys
    ///
    /// The fetch strategy is the one the delegate declares.
    pub fn new(delegate: F, cache: Arc<dyn Cache>, resource: ResourceId) -> Self {
        let strategy = delegate.fetch_strategy();
        Self {
            delegate,
            cache,
            resource,
            ttl: DEFAULT_TTL,
            strategy,
            stats: CacheStats::default(),
        }
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: FetchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn delegate(&self) -> &F {
        &self.delegate
    }

    pub fn cache(&self) -> &Arc<dyn Cache> {
        &self.cache
    }

    pub fn resource(&self) -> &ResourceId {
        &self.resource
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    fn read_through<T>(&self, id: &TypedId<T>, fetch: impl FnOnce() -> Result<T>) -> Result<T>
    where
        T: Clone,
    {
        if let Some(value) = id.peek(self.cache.as_ref()) {
            tracing::trace!(key = %id.key(), "cache hit");
            self.stats.record_hit();
            return Ok(value);
        }
        self.stats.record_miss();
        tracing::trace!(key = %id.key(), "cache miss");
        let value = fetch().inspect_err(|_| self.stats.record_fetch_failure())?;
        id.put(self.cache.as_ref(), value.clone(), self.ttl);
        Ok(value)
    }

    fn fetch_uncached(&self, flow_ref: &FlowRef, key: &Key, detail: Detail) -> Result<Vec<Series>> {
        self.stats.record_bypass();
        tracing::trace!(flow = %flow_ref, key = %key, detail = %detail, "cache bypassed");
        self.delegate
            .fetch_data(flow_ref, key, detail)
            .inspect_err(|_| self.stats.record_fetch_failure())
    }

    /// Serve `query` from the slot of `category`, refilling it on a miss
    fn fetch_contained(&self, flow_ref: &FlowRef, category: &str, query: &DataQuery) -> Result<DataSet> {
        let id = TypedId::data(&self.resource, category, flow_ref);

        if let Some(stored) = id.peek(self.cache.as_ref()) {
            if comparable(&stored.query.key, &query.key) && stored.query.key.contains(&query.key)? {
                tracing::debug!(
                    flow = %flow_ref,
                    stored = %stored.query.key,
                    requested = %query.key,
                    "containment hit"
                );
                self.stats.record_hit();
                return stored.filter(query);
            }
            tracing::debug!(
                flow = %flow_ref,
                stored = %stored.query.key,
                requested = %query.key,
                "stored key does not contain requested key"
            );
        }

        self.stats.record_miss();
        let fetch_key = self.strategy.fetch_key(&query.key);
        tracing::debug!(flow = %flow_ref, key = %fetch_key, "fetching for containment slot");
        let series = self
            .delegate
            .fetch_data(flow_ref, &fetch_key, Detail::SeriesKeysOnly)
            .inspect_err(|_| self.stats.record_fetch_failure())?;

        let fetched = DataSet::new(
            flow_ref.clone(),
            DataQuery::new(fetch_key, Detail::SeriesKeysOnly),
            series,
        );
        let answer = fetched.filter(query)?;
        id.put(self.cache.as_ref(), fetched, self.ttl);
        Ok(answer)
    }

    /// Fetch data as a [`DataSet`] tagged with the requested query
    pub fn fetch_data_set(&self, flow_ref: &FlowRef, query: &DataQuery) -> Result<DataSet> {
        match query.detail.cache_category() {
            Some(category) => self.fetch_contained(flow_ref, category, query),
            None => {
                let data = self.fetch_uncached(flow_ref, &query.key, query.detail)?;
                Ok(DataSet::new(flow_ref.clone(), query.clone(), data))
            }
        }
    }
}

impl<F: Fetcher> Fetcher for CachedFetcher<F> {
    fn fetch_flows(&self) -> Result<Vec<Flow>> {
        let id = TypedId::flows(&self.resource);
        self.read_through(&id, || self.delegate.fetch_flows())
    }

    fn fetch_flow(&self, flow_ref: &FlowRef) -> Result<Flow> {
        let id = TypedId::flow(&self.resource, flow_ref);
        self.read_through(&id, || self.delegate.fetch_flow(flow_ref))
    }

    fn fetch_structure(&self, struct_ref: &StructRef) -> Result<Structure> {
        let id = TypedId::structure(&self.resource, struct_ref);
        self.read_through(&id, || self.delegate.fetch_structure(struct_ref))
    }

    fn fetch_data(&self, flow_ref: &FlowRef, key: &Key, detail: Detail) -> Result<Vec<Series>> {
        if detail.requests_values() {
            return self.fetch_uncached(flow_ref, key, detail);
        }
        let query = DataQuery::new(key.clone(), detail);
        self.fetch_data_set(flow_ref, &query).map(|data_set| data_set.data)
    }

    fn fetch_strategy(&self) -> FetchStrategy {
        self.strategy
    }
}

impl<F> fmt::Debug for CachedFetcher<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedFetcher")
            .field("resource", &self.resource)
            .field("cache", &self.cache)
            .field("ttl", &self.ttl)
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}
