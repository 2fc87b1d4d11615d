//! Caching options parsed from [`Properties`]

use crate::errors::Result;
use statdx_core::constants::{
    CACHING_CACHE_FOLDER, CACHING_NO_CACHE, CACHING_NO_COMPRESSION, CACHING_PERSISTENCE_ID,
    CACHING_PROVIDER_ID, CACHING_TTL, DEFAULT_TTL,
};
use statdx_core::Properties;
use statdx_utils::default_cache_dir;
use std::path::PathBuf;
use std::time::Duration;

/// Every property read by [`CachingConfig::from_properties`]
pub const CACHING_KEYS: [&str; 6] = [
    CACHING_NO_CACHE,
    CACHING_CACHE_FOLDER,
    CACHING_NO_COMPRESSION,
    CACHING_PERSISTENCE_ID,
    CACHING_PROVIDER_ID,
    CACHING_TTL,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachingConfig {
    /// Serve every read as a miss and discard every write
    pub no_cache: bool,
    /// Root of the disk backend
    pub cache_folder: PathBuf,
    /// gzip persisted entries
    pub compression: bool,
    /// Codec pinned by id
    pub persistence_id: Option<String>,
    /// Caching backend pinned by id
    pub provider_id: Option<String>,
    /// Time-to-live of new entries
    pub ttl: Duration,
}

impl Default for CachingConfig {
    fn default() -> Self {
        Self {
            no_cache: false,
            cache_folder: default_cache_dir(),
            compression: true,
            persistence_id: None,
            provider_id: None,
            ttl: DEFAULT_TTL,
        }
    }
}

impl CachingConfig {
    /// Parse the `caching.*` properties, defaulting what is unset
    pub fn from_properties(properties: &Properties) -> Result<Self> {
        let defaults = Self::default();
        let id = |key: &str| {
            properties
                .get(key)
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
        };
        Ok(Self {
            no_cache: properties.get_bool(CACHING_NO_CACHE)?.unwrap_or(defaults.no_cache),
            cache_folder: properties
                .get_path(CACHING_CACHE_FOLDER)
                .unwrap_or(defaults.cache_folder),
            compression: !properties
                .get_bool(CACHING_NO_COMPRESSION)?
                .unwrap_or(!defaults.compression),
            persistence_id: id(CACHING_PERSISTENCE_ID),
            provider_id: id(CACHING_PROVIDER_ID),
            ttl: properties
                .get_u64(CACHING_TTL)?
                .map(Duration::from_secs)
                .unwrap_or(defaults.ttl),
        })
    }

    /// Parse the `caching.*` properties from `STATDX_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_properties(&Properties::from_env(CACHING_KEYS))
    }
}
