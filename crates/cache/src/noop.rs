//! The disabled cache

use crate::entry::{CacheEntry, Envelope};
use crate::traits::Cache;
use statdx_core::{EventListener, NoopListener};
use std::sync::Arc;
use std::time::Duration;

pub(crate) const SOURCE: &str = "cache";

/// Message emitted on every read of a disabled cache
pub const CACHE_DISABLED: &str = "cache disabled";

/// A cache that stores nothing
///
/// Every `get` reports [`CACHE_DISABLED`] to the listener and misses;
/// every `put` is discarded.
#[derive(Debug, Clone)]
pub struct NoOpCache {
    listener: Arc<dyn EventListener>,
}

impl NoOpCache {
    pub fn new(listener: Arc<dyn EventListener>) -> Self {
        Self { listener }
    }
}

impl Default for NoOpCache {
    fn default() -> Self {
        Self::new(Arc::new(NoopListener))
    }
}

impl Cache for NoOpCache {
    fn get(&self, _key: &str) -> Option<CacheEntry> {
        self.listener.on_event(SOURCE, CACHE_DISABLED);
        None
    }

    fn put(&self, _key: &str, _envelope: Envelope, _ttl: Duration) {}
}
