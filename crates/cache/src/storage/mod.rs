//! Disk-backed cache
//!
//! One file per cache key, named by [`paths::entry_path`]. The write
//! instant and TTL travel inside the encoded [`CacheEntry`]. Writers hold
//! an exclusive advisory lock on the file and readers a shared one, so a
//! reader never decodes a half-written entry.

pub mod paths;

use crate::codec::{compression, Codec};
use crate::entry::{CacheEntry, Envelope};
use crate::errors::{CacheError, Result};
use crate::noop::SOURCE;
use crate::traits::Cache;
use statdx_core::{Clock, EventListener};
use statdx_utils::LockedFile;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// A [`Cache`] persisting entries under a root directory
#[derive(Debug, Clone)]
pub struct FileCache {
    root: PathBuf,
    codec: Arc<dyn Codec>,
    compress: bool,
    clock: Arc<dyn Clock>,
    listener: Arc<dyn EventListener>,
}

impl FileCache {
    /// A gzip-compressing cache under `root`
    ///
    /// The directory is created on first write.
    pub fn new(
        root: impl Into<PathBuf>,
        codec: Arc<dyn Codec>,
        clock: Arc<dyn Clock>,
        listener: Arc<dyn EventListener>,
    ) -> Self {
        Self {
            root: root.into(),
            codec,
            compress: true,
            clock,
            listener,
        }
    }

    #[must_use]
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn codec(&self) -> &Arc<dyn Codec> {
        &self.codec
    }

    pub fn is_compressed(&self) -> bool {
        self.compress
    }

    /// Extension of the files this cache writes
    pub fn extension(&self) -> String {
        if self.compress {
            format!("{}.{}", self.codec.extension(), compression::GZIP_EXTENSION)
        } else {
            self.codec.extension().to_string()
        }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        paths::entry_path(&self.root, key, &self.extension())
    }

    /// Read the live entry stored under `key`
    ///
    /// Expired and undecodable files are deleted. An expired file reads as
    /// absent, an undecodable one as [`CacheError::Corruption`].
    pub fn read(&self, key: &str) -> Result<Option<CacheEntry>> {
        let path = self.path_for(key);
        let bytes = {
            let mut file = match LockedFile::open_shared(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
                Err(e) => return Err(CacheError::io(&path, "open cache file", e)),
            };
            file.read_all()
                .map_err(|e| CacheError::io(&path, "read cache file", e))?
        };

        // A writer has created the file but not yet filled it
        if bytes.is_empty() {
            return Ok(None);
        }

        let entry = match self.decode(&bytes) {
            Ok(entry) => entry,
            Err(e) => {
                self.remove_file(&path)?;
                return Err(CacheError::Corruption {
                    path,
                    reason: e.to_string(),
                });
            }
        };

        if entry.is_expired(self.clock.now()) {
            tracing::debug!(key = %key, path = %path.display(), "cache file expired");
            self.remove_expired(&path)?;
            return Ok(None);
        }
        Ok(Some(entry))
    }

    /// Persist `entry` under `key`, replacing any previous file
    pub fn write(&self, key: &str, entry: &CacheEntry) -> Result<()> {
        let path = self.path_for(key);
        let bytes = self.encode(entry)?;

        let mut file = LockedFile::create_exclusive(&path)
            .map_err(|e| CacheError::io(&path, "create cache file", e))?;
        file.write_all(&bytes)
            .map_err(|e| CacheError::io(&path, "write cache file", e))?;
        file.commit()
            .map_err(|e| CacheError::io(&path, "sync cache file", e))?;

        tracing::trace!(key = %key, path = %path.display(), bytes = bytes.len(), "cache file written");
        Ok(())
    }

    /// Delete the file stored under `key`, if any
    pub fn remove(&self, key: &str) -> Result<()> {
        self.remove_file(&self.path_for(key))
    }

    /// Delete every persisted entry
    pub fn clear(&self) -> Result<()> {
        match fs::remove_dir_all(&self.root) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::io(&self.root, "clear cache folder", e)),
        }
    }

    fn encode(&self, entry: &CacheEntry) -> Result<Vec<u8>> {
        let encoded = self.codec.encode(entry)?;
        if self.compress {
            compression::compress(&encoded)
        } else {
            Ok(encoded)
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<CacheEntry> {
        if self.compress {
            self.codec.decode(&compression::decompress(bytes)?)
        } else {
            self.codec.decode(bytes)
        }
    }

    /// Delete `path` if it still holds an expired entry
    ///
    /// Decided again under the exclusive lock, so an entry refreshed after
    /// the shared read is kept.
    fn remove_expired(&self, path: &Path) -> Result<()> {
        let mut file = match LockedFile::open_exclusive(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(CacheError::io(path, "open cache file", e)),
        };
        let bytes = file
            .read_all()
            .map_err(|e| CacheError::io(path, "read cache file", e))?;
        if bytes.is_empty() {
            return Ok(());
        }
        let expired = self
            .decode(&bytes)
            .map_or(true, |entry| entry.is_expired(self.clock.now()));
        if expired {
            self.remove_file(path)?;
        }
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::io(path, "remove cache file", e)),
        }
    }
}

impl Cache for FileCache {
    fn get(&self, key: &str) -> Option<CacheEntry> {
        match self.read(key) {
            Ok(entry) => entry,
            Err(e) => {
                self.listener.on_error(SOURCE, "failed to read cache entry", &e);
                None
            }
        }
    }

    fn put(&self, key: &str, envelope: Envelope, ttl: Duration) {
        let entry = CacheEntry::new(envelope, self.clock.now(), ttl);
        if let Err(e) = self.write(key, &entry) {
            self.listener.on_error(SOURCE, "failed to write cache entry", &e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{fixtures, BincodeCodec, JsonCodec};
    use statdx_core::{ManualClock, NoopListener};
    use tempfile::TempDir;

    fn cache(dir: &TempDir, codec: Arc<dyn Codec>, clock: Arc<ManualClock>) -> FileCache {
        FileCache::new(dir.path(), codec, clock, Arc::new(NoopListener))
    }

    #[test]
    fn test_extension_follows_codec_and_compression() {
        let dir = TempDir::new().unwrap();
        let clock = Arc::new(ManualClock::at_epoch());
        let bincode = cache(&dir, Arc::new(BincodeCodec), clock.clone());
        assert_eq!(bincode.extension(), "bin.gz");
        assert_eq!(bincode.with_compression(false).extension(), "bin");

        let json = cache(&dir, Arc::new(JsonCodec), clock);
        assert_eq!(json.extension(), "json.gz");
        assert!(json.path_for("k").to_string_lossy().ends_with(".json.gz"));
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let clock = Arc::new(ManualClock::at_epoch());
        let cache = cache(&dir, Arc::new(BincodeCodec), clock.clone());

        assert!(cache.read("k").unwrap().is_none());
        let entry = CacheEntry::new(Envelope::of_flows(vec![fixtures::flow()]), clock.now(), Duration::from_secs(60));
        cache.write("k", &entry).unwrap();

        assert!(cache.path_for("k").exists());
        assert_eq!(cache.read("k").unwrap(), Some(entry));
    }

    #[test]
    fn test_expired_file_is_deleted() {
        let dir = TempDir::new().unwrap();
        let clock = Arc::new(ManualClock::at_epoch());
        let cache = cache(&dir, Arc::new(BincodeCodec), clock.clone());
        cache.put("k", Envelope::default(), Duration::from_secs(60));

        clock.advance(Duration::from_secs(61));
        assert!(cache.read("k").unwrap().is_none());
        assert!(!cache.path_for("k").exists());
    }

    #[test]
    fn test_refreshed_file_survives_expiry_cleanup() {
        let dir = TempDir::new().unwrap();
        let clock = Arc::new(ManualClock::at_epoch());
        let cache = cache(&dir, Arc::new(BincodeCodec), clock.clone());
        cache.put("k", Envelope::default(), Duration::from_secs(60));
        clock.advance(Duration::from_secs(61));

        // A writer refreshes the entry after a reader saw it expired
        cache.put("k", Envelope::of_flows(vec![fixtures::flow()]), Duration::from_secs(60));
        cache.remove_expired(&cache.path_for("k")).unwrap();

        let entry = cache.read("k").unwrap().unwrap();
        assert_eq!(entry.envelope.flows, vec![fixtures::flow()]);
    }

    #[test]
    fn test_missing_values_round_trip_through_json_files() {
        let dir = TempDir::new().unwrap();
        let clock = Arc::new(ManualClock::at_epoch());
        for compress in [true, false] {
            let cache = cache(&dir, Arc::new(JsonCodec), clock.clone()).with_compression(compress);
            let data_set = fixtures::data_set();
            assert!(data_set.data[0].obs.iter().any(|obs| obs.value.is_nan()));

            cache.put("nan", Envelope::of_data_set(data_set.clone()), Duration::from_secs(60));
            let entry = cache.get("nan").unwrap();
            assert_eq!(entry.envelope.data_sets, vec![data_set]);
        }
    }

    #[test]
    fn test_corrupt_file_is_deleted() {
        let dir = TempDir::new().unwrap();
        let cache = cache(&dir, Arc::new(BincodeCodec), Arc::new(ManualClock::at_epoch()));
        let path = cache.path_for("k");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"garbage").unwrap();

        let err = cache.read("k").unwrap_err();
        assert!(matches!(err, CacheError::Corruption { .. }));
        assert!(!path.exists());
        assert!(cache.get("k").is_none());
    }

    #[test]
    fn test_empty_file_reads_as_absent() {
        let dir = TempDir::new().unwrap();
        let cache = cache(&dir, Arc::new(JsonCodec), Arc::new(ManualClock::at_epoch()));
        let path = cache.path_for("k");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"").unwrap();

        assert!(cache.read("k").unwrap().is_none());
    }

    #[test]
    fn test_clear() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("cache");
        let cache = FileCache::new(
            &root,
            Arc::new(BincodeCodec),
            Arc::new(ManualClock::at_epoch()),
            Arc::new(NoopListener),
        );
        cache.put("a", Envelope::default(), Duration::from_secs(60));
        cache.put("b", Envelope::default(), Duration::from_secs(60));
        cache.clear().unwrap();

        assert!(!root.exists());
        assert!(cache.get("a").is_none());
        cache.clear().unwrap();
    }
}
