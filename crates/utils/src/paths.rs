//! Default locations for persisted data

use statdx_core::constants::DEFAULT_CACHE_DIR_NAME;
use std::path::PathBuf;

/// `<system temp>/statdx/cache`
pub fn default_cache_dir() -> PathBuf {
    std::env::temp_dir()
        .join(DEFAULT_CACHE_DIR_NAME)
        .join("cache")
}
