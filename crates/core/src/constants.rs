/// Constants shared across the statdx workspace
use std::time::Duration;

// Caching properties
pub const CACHING_NO_CACHE: &str = "caching.noCache";
pub const CACHING_CACHE_FOLDER: &str = "caching.cacheFolder";
pub const CACHING_NO_COMPRESSION: &str = "caching.noCompression";
pub const CACHING_PERSISTENCE_ID: &str = "caching.persistenceId";
pub const CACHING_PROVIDER_ID: &str = "caching.providerId";
pub const CACHING_TTL: &str = "caching.ttl";

// Environment variables overriding properties are named STATDX_<KEY>
pub const ENV_PREFIX: &str = "STATDX_";

// Five minutes, long enough to cover an interactive session on one flow
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

// Directory under the system temporary folder used when no cache folder is set
pub const DEFAULT_CACHE_DIR_NAME: &str = "statdx";
