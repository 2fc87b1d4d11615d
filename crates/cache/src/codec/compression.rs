//! gzip wrapping of encoded entries

use crate::errors::{CacheError, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{Read, Write};

/// Extension suffix of gzip-wrapped files
pub const GZIP_EXTENSION: &str = "gz";

pub fn compress(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(bytes.len() / 2), Compression::default());
    encoder.write_all(bytes).map_err(|source| CacheError::Compression {
        operation: "compress",
        source,
    })?;
    encoder.finish().map_err(|source| CacheError::Compression {
        operation: "compress",
        source,
    })
}

pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(bytes);
    let mut decoded = Vec::new();
    decoder
        .read_to_end(&mut decoded)
        .map_err(|source| CacheError::Compression {
            operation: "decompress",
            source,
        })?;
    Ok(decoded)
}
