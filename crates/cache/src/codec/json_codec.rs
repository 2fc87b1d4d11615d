use super::Codec;
use crate::entry::CacheEntry;
use crate::errors::{CacheError, Result, SerializationOp};
use crate::registry::Provider;

/// Human-readable encoding, handy when inspecting a cache folder
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    pub const ID: &'static str = "json";
}

impl Provider for JsonCodec {
    fn id(&self) -> &str {
        Self::ID
    }

    fn rank(&self) -> i32 {
        100
    }
}

impl Codec for JsonCodec {
    fn extension(&self) -> &str {
        "json"
    }

    fn encode(&self, entry: &CacheEntry) -> Result<Vec<u8>> {
        serde_json::to_vec(entry).map_err(|source| CacheError::Serialization {
            codec: Self::ID.to_string(),
            operation: SerializationOp::Encode,
            source: Box::new(source),
        })
    }

    fn decode(&self, bytes: &[u8]) -> Result<CacheEntry> {
        serde_json::from_slice(bytes).map_err(|source| CacheError::Serialization {
            codec: Self::ID.to_string(),
            operation: SerializationOp::Decode,
            source: Box::new(source),
        })
    }
}
