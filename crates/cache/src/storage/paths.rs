//! Mapping of cache keys to files

use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Version of the persisted layout, mixed into every file name
///
/// Bumping it orphans the files written by earlier versions instead of
/// letting them fail to decode.
pub const FORMAT_VERSION: u32 = 1;

/// Hex SHA-256 of the key and the format version
pub fn hash_key(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hasher.update(FORMAT_VERSION.to_le_bytes());
    format!("{:x}", hasher.finalize())
}

/// `<root>/<first two hex digits>/<hash>.<extension>`
pub fn entry_path(root: &Path, key: &str, extension: &str) -> PathBuf {
    let hash = hash_key(key);
    let shard = &hash[..2];
    root.join(shard).join(format!("{hash}.{extension}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_stable_and_hex() {
        let hash = hash_key("cache:rest:https://data.example.org#flows");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(hash, hash_key("cache:rest:https://data.example.org#flows"));
        assert_ne!(hash, hash_key("cache:rest:https://data.example.org#flow"));
    }

    #[test]
    fn test_entry_path_is_sharded() {
        let path = entry_path(Path::new("/var/cache/statdx"), "k", "bin.gz");
        let hash = hash_key("k");
        assert_eq!(
            path,
            Path::new("/var/cache/statdx")
                .join(&hash[..2])
                .join(format!("{hash}.bin.gz"))
        );
    }
}
