//! Result cache for statdx clients
//!
//! ## Key Components
//!
//! - **`cached`**: [`CachedFetcher`], the caching client. Data requests
//!   without observation values are answered from a containment slot
//!   whenever the key fetched last contains the requested key.
//! - **`traits`**, **`entry`**: the [`Cache`] contract and the
//!   [`Envelope`]/[`CacheEntry`] it stores.
//! - **`memory`**, **`noop`**, **`storage`**: in-process, disabled and
//!   disk-backed caches.
//! - **`typed_id`**: cache identity strings and envelope conversions.
//! - **`codec`**: `bincode` and `json` encodings, optionally gzip-wrapped.
//! - **`registry`**, **`providers`**, **`config`**: ranked selection of
//!   caching backends and codecs from `caching.*` properties.
//!
//! ## Usage
//!
//! ```no_run
//! use statdx_cache::{CachedFetcher, CachingConfig, ProviderRegistry, ResourceId};
//! use statdx_core::{Properties, SystemClock, TracingListener};
//! use std::sync::Arc;
//!
//! # fn run<F: statdx_core::Fetcher>(driver: F) -> Result<(), Box<dyn std::error::Error>> {
//! let config = CachingConfig::from_properties(&Properties::new())?;
//! let cache = ProviderRegistry::builtin().open(
//!     &config,
//!     Arc::new(SystemClock),
//!     Arc::new(TracingListener),
//! )?;
//! let client = CachedFetcher::new(driver, cache, ResourceId::new("rest", "https://data.example.org"))
//!     .with_ttl(config.ttl);
//! # Ok(())
//! # }
//! ```

pub mod cached;
pub mod codec;
pub mod config;
pub mod entry;
pub mod errors;
pub mod memory;
pub mod noop;
pub mod providers;
pub mod registry;
pub mod stats;
pub mod storage;
pub mod traits;
pub mod typed_id;

pub use self::{
    cached::CachedFetcher,
    codec::{BincodeCodec, Codec, JsonCodec},
    config::{CachingConfig, CACHING_KEYS},
    entry::{CacheEntry, Envelope},
    errors::{CacheError, Result, SerializationOp},
    memory::MemoryCache,
    noop::{NoOpCache, CACHE_DISABLED},
    providers::{
        CacheContext, CachingProvider, FileCacheProvider, MemoryCacheProvider, NoCacheProvider,
        ProviderRegistry,
    },
    registry::{Provider, Registry},
    stats::{CacheStats, StatsSnapshot},
    storage::FileCache,
    traits::Cache,
    typed_id::{ResourceId, TypedId},
};
