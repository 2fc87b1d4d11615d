//! The cache contract

use crate::entry::{CacheEntry, Envelope};
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

/// A string-keyed store of expiring envelopes
///
/// Implementations are shared between threads. A `get` never returns an
/// expired entry, and persistence failures are reported to a listener
/// rather than to the caller: the cache degrades to a miss.
pub trait Cache: Send + Sync + Debug {
    /// The live entry stored under `key`, if any
    fn get(&self, key: &str) -> Option<CacheEntry>;

    /// Store `envelope` under `key` for `ttl`, replacing any previous entry
    fn put(&self, key: &str, envelope: Envelope, ttl: Duration);
}

impl<C: Cache + ?Sized> Cache for Arc<C> {
    fn get(&self, key: &str) -> Option<CacheEntry> {
        (**self).get(key)
    }

    fn put(&self, key: &str, envelope: Envelope, ttl: Duration) {
        (**self).put(key, envelope, ttl)
    }
}
