//! Content addressing.

use sha2::{Digest, Sha256};

/// Hex length of a content hash: 16 bytes of the SHA-256 digest.
///
/// The truncation matches the hosting API's key-length convention and must
/// not change; the hash doubles as upload key and manifest value.
const HASH_HEX_LEN: usize = 32;

/// Compute the content hash for a page's bytes.
#[must_use]
pub fn content_hash(content: &[u8]) -> String {
    let mut hash = hex::encode(Sha256::digest(content));
    hash.truncate(HASH_HEX_LEN);
    hash
}
