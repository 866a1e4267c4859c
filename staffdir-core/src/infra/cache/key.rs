use std::fmt;

use sha2::{Digest, Sha256};

/// Filesystem-safe cache key derived from a resource locator.
///
/// Always 64 lowercase hex characters, regardless of locator length.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageCacheKey(String);

impl ImageCacheKey {
    pub const LEN: usize = 64;

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_valid(raw: &str) -> bool {
        raw.len() == Self::LEN
            && raw
                .as_bytes()
                .iter()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }
}

impl fmt::Display for ImageCacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the cache key for a locator.
///
/// Hashes the exact UTF-8 bytes of the locator; no normalisation is applied,
/// so two spellings of the same URL are two cache entries.
pub fn derive_key(locator: &str) -> ImageCacheKey {
    let digest = Sha256::digest(locator.as_bytes());
    ImageCacheKey(hex::encode(digest))
}
