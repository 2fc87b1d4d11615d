//! Serialization codecs for persisted entries
//!
//! Each codec is a [`Provider`] with an id, a rank and a canonical file
//! extension. The disk backend picks one through the registry and may wrap
//! its output in gzip.

mod bincode_codec;
pub mod compression;
mod json_codec;

pub use bincode_codec::BincodeCodec;
pub use json_codec::JsonCodec;

use crate::entry::CacheEntry;
use crate::errors::Result;
use crate::registry::Provider;

/// Encodes and decodes whole cache entries
pub trait Codec: Provider {
    /// File extension of encoded entries, without the dot
    fn extension(&self) -> &str;

    fn encode(&self, entry: &CacheEntry) -> Result<Vec<u8>>;

    /// Decode a fresh entry; nothing is shared with earlier decodes
    fn decode(&self, bytes: &[u8]) -> Result<CacheEntry>;
}
