//! In-process cache backend

use crate::entry::{CacheEntry, Envelope};
use crate::traits::Cache;
use dashmap::DashMap;
use statdx_core::Clock;
use std::sync::Arc;
use std::time::Duration;

/// Concurrent map of entries, dropped with the process
#[derive(Debug)]
pub struct MemoryCache {
    entries: DashMap<String, CacheEntry>,
    clock: Arc<dyn Clock>,
}

impl MemoryCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }

    /// Number of stored entries, expired ones included until next read
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Option<CacheEntry> {
        let now = self.clock.now();
        let entry = {
            let guard = self.entries.get(key)?;
            guard.value().clone()
        };
        if entry.is_expired(now) {
            // A concurrent put may have replaced it since
            self.entries.remove_if(key, |_, stored| stored.is_expired(now));
            tracing::trace!(key = %key, "memory cache entry expired");
            return None;
        }
        Some(entry)
    }

    fn put(&self, key: &str, envelope: Envelope, ttl: Duration) {
        let entry = CacheEntry::new(envelope, self.clock.now(), ttl);
        self.entries.insert(key.to_string(), entry);
    }
}
