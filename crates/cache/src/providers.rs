//! Built-in caching backends and the registry that opens them

use crate::codec::{BincodeCodec, Codec, JsonCodec};
use crate::config::CachingConfig;
use crate::errors::Result;
use crate::memory::MemoryCache;
use crate::noop::{NoOpCache, SOURCE};
use crate::registry::{Provider, Registry};
use crate::storage::FileCache;
use crate::traits::Cache;
use statdx_core::{Clock, EventListener};
use std::sync::Arc;

/// What a caching provider may draw on when creating its cache
#[derive(Debug)]
pub struct CacheContext<'a> {
    pub config: &'a CachingConfig,
    pub codecs: &'a Registry<dyn Codec>,
    pub clock: Arc<dyn Clock>,
    pub listener: Arc<dyn EventListener>,
}

impl CacheContext<'_> {
    fn disabled(&self) -> Arc<dyn Cache> {
        self.listener.on_event(SOURCE, "caching turned off by configuration");
        Arc::new(NoOpCache::new(Arc::clone(&self.listener)))
    }
}

/// A caching backend that can be selected by id or rank
pub trait CachingProvider: Provider {
    fn create(&self, context: &CacheContext<'_>) -> Result<Arc<dyn Cache>>;
}

/// Persists entries on disk through the selected codec
#[derive(Debug, Clone, Copy, Default)]
pub struct FileCacheProvider;

impl FileCacheProvider {
    pub const ID: &'static str = "file";
}

impl Provider for FileCacheProvider {
    fn id(&self) -> &str {
        Self::ID
    }

    fn rank(&self) -> i32 {
        300
    }
}

impl CachingProvider for FileCacheProvider {
    fn create(&self, context: &CacheContext<'_>) -> Result<Arc<dyn Cache>> {
        let config = context.config;
        // A pinned codec must exist even when caching is off
        let codec = context.codecs.select(config.persistence_id.as_deref())?;
        if config.no_cache {
            return Ok(context.disabled());
        }

        let cache = FileCache::new(
            config.cache_folder.clone(),
            Arc::clone(&codec),
            Arc::clone(&context.clock),
            Arc::clone(&context.listener),
        )
        .with_compression(config.compression);

        context.listener.on_event(
            SOURCE,
            &format!("cache enabled in '{}'", config.cache_folder.display()),
        );
        context.listener.on_event(
            SOURCE,
            &format!(
                "codec '{}' chosen, files end with '.{}'",
                codec.id(),
                cache.extension()
            ),
        );
        tracing::debug!(
            folder = %config.cache_folder.display(),
            codec = %codec.id(),
            compression = config.compression,
            "file cache opened"
        );
        Ok(Arc::new(cache))
    }
}

/// Keeps entries in process memory
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryCacheProvider;

impl MemoryCacheProvider {
    pub const ID: &'static str = "memory";
}

impl Provider for MemoryCacheProvider {
    fn id(&self) -> &str {
        Self::ID
    }

    fn rank(&self) -> i32 {
        200
    }
}

impl CachingProvider for MemoryCacheProvider {
    fn create(&self, context: &CacheContext<'_>) -> Result<Arc<dyn Cache>> {
        if context.config.no_cache {
            return Ok(context.disabled());
        }
        context.listener.on_event(SOURCE, "cache enabled in memory");
        Ok(Arc::new(MemoryCache::new(Arc::clone(&context.clock))))
    }
}

/// Caches nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCacheProvider;

impl NoCacheProvider {
    pub const ID: &'static str = "none";
}

impl Provider for NoCacheProvider {
    fn id(&self) -> &str {
        Self::ID
    }

    fn rank(&self) -> i32 {
        0
    }
}

impl CachingProvider for NoCacheProvider {
    fn create(&self, context: &CacheContext<'_>) -> Result<Arc<dyn Cache>> {
        Ok(context.disabled())
    }
}

/// Caching backends and codecs known to a process
///
/// Built explicitly and passed to whatever opens a cache; there is no
/// global instance.
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    caches: Registry<dyn CachingProvider>,
    codecs: Registry<dyn Codec>,
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ProviderRegistry {
    /// No providers at all
    pub fn empty() -> Self {
        Self {
            caches: Registry::new("caching provider"),
            codecs: Registry::new("codec"),
        }
    }

    /// The `file`, `memory` and `none` backends with the `bincode` and
    /// `json` codecs
    pub fn builtin() -> Self {
        Self::empty()
            .with_cache_provider(Arc::new(FileCacheProvider))
            .with_cache_provider(Arc::new(MemoryCacheProvider))
            .with_cache_provider(Arc::new(NoCacheProvider))
            .with_codec(Arc::new(BincodeCodec))
            .with_codec(Arc::new(JsonCodec))
    }

    #[must_use]
    pub fn with_cache_provider(mut self, provider: Arc<dyn CachingProvider>) -> Self {
        self.caches.register(provider);
        self
    }

    #[must_use]
    pub fn with_codec(mut self, codec: Arc<dyn Codec>) -> Self {
        self.codecs.register(codec);
        self
    }

    pub fn caches(&self) -> &Registry<dyn CachingProvider> {
        &self.caches
    }

    pub fn codecs(&self) -> &Registry<dyn Codec> {
        &self.codecs
    }

    /// Select a caching backend and create its cache
    ///
    /// Unknown or unavailable pinned ids fail here rather than on first use.
    pub fn open(
        &self,
        config: &CachingConfig,
        clock: Arc<dyn Clock>,
        listener: Arc<dyn EventListener>,
    ) -> Result<Arc<dyn Cache>> {
        let provider = self.caches.select(config.provider_id.as_deref())?;
        listener.on_event(
            SOURCE,
            &format!("caching provider '{}' selected", provider.id()),
        );
        let context = CacheContext {
            config,
            codecs: &self.codecs,
            clock,
            listener,
        };
        provider.create(&context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CacheError;
    use statdx_core::{NoopListener, SystemClock};
    use tempfile::TempDir;

    fn open(registry: &ProviderRegistry, config: &CachingConfig) -> Result<Arc<dyn Cache>> {
        registry.open(config, Arc::new(SystemClock), Arc::new(NoopListener))
    }

    fn config(dir: &TempDir) -> CachingConfig {
        CachingConfig {
            cache_folder: dir.path().to_path_buf(),
            ..CachingConfig::default()
        }
    }

    #[test]
    fn test_builtin_ranks() {
        let registry = ProviderRegistry::builtin();
        let caches: Vec<&str> = registry.caches().ranked().into_iter().map(|p| p.id()).collect();
        assert_eq!(caches, vec!["file", "memory", "none"]);
        let codecs: Vec<&str> = registry.codecs().ranked().into_iter().map(|p| p.id()).collect();
        assert_eq!(codecs, vec!["bincode", "json"]);
    }

    #[test]
    fn test_default_is_file_cache() {
        let dir = TempDir::new().unwrap();
        let cache = open(&ProviderRegistry::builtin(), &config(&dir)).unwrap();
        assert!(format!("{cache:?}").starts_with("FileCache"));
    }

    #[test]
    fn test_pinned_backend() {
        let dir = TempDir::new().unwrap();
        let config = CachingConfig {
            provider_id: Some("memory".to_string()),
            ..config(&dir)
        };
        let cache = open(&ProviderRegistry::builtin(), &config).unwrap();
        assert!(format!("{cache:?}").starts_with("MemoryCache"));
    }

    #[test]
    fn test_unknown_codec_fails_at_open() {
        let dir = TempDir::new().unwrap();
        let config = CachingConfig {
            persistence_id: Some("kryo".to_string()),
            no_cache: true,
            ..config(&dir)
        };
        let err = open(&ProviderRegistry::builtin(), &config).unwrap_err();
        assert!(matches!(err, CacheError::UnknownProvider { kind: "codec", .. }));
    }

    #[test]
    fn test_no_codec_registered() {
        let dir = TempDir::new().unwrap();
        let registry = ProviderRegistry::empty().with_cache_provider(Arc::new(FileCacheProvider));
        let err = open(&registry, &config(&dir)).unwrap_err();
        assert!(matches!(err, CacheError::NoProviderAvailable { kind: "codec" }));
    }
}
