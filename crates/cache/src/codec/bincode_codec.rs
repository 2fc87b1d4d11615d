use super::Codec;
use crate::entry::CacheEntry;
use crate::errors::{CacheError, Result, SerializationOp};
use crate::registry::Provider;

/// Compact binary encoding, the preferred codec
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeCodec;

impl BincodeCodec {
    pub const ID: &'static str = "bincode";
}

impl Provider for BincodeCodec {
    fn id(&self) -> &str {
        Self::ID
    }

    fn rank(&self) -> i32 {
        200
    }
}

impl Codec for BincodeCodec {
    fn extension(&self) -> &str {
        "bin"
    }

    fn encode(&self, entry: &CacheEntry) -> Result<Vec<u8>> {
        bincode::serialize(entry).map_err(|source| CacheError::Serialization {
            codec: Self::ID.to_string(),
            operation: SerializationOp::Encode,
            source,
        })
    }

    fn decode(&self, bytes: &[u8]) -> Result<CacheEntry> {
        bincode::deserialize(bytes).map_err(|source| CacheError::Serialization {
            codec: Self::ID.to_string(),
            operation: SerializationOp::Decode,
            source,
        })
    }
}
