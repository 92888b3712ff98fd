//! Content hashes identifying documents in the graph.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ContentError;

type Blake2b256 = Blake2b<U32>;

/// A 32-byte Blake2b hash of a document's canonical content.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocHash([u8; 32]);

impl Default for DocHash {
    fn default() -> Self {
        Self::ZERO
    }
}

impl DocHash {
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Hash arbitrary bytes with Blake2b-256.
    pub fn digest(data: &[u8]) -> Self {
        let mut hasher = Blake2b256::new();
        hasher.update(data);
        let mut output = [0u8; 32];
        output.copy_from_slice(&hasher.finalize());
        Self(output)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Short form used in log lines and error messages.
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Debug for DocHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocHash({})", self.short())
    }
}

impl fmt::Display for DocHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

impl FromStr for DocHash {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| ContentError::InvalidHash(format!("{s}: {e}")))?;
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_deterministic() {
        assert_eq!(DocHash::digest(b"graph"), DocHash::digest(b"graph"));
        assert_ne!(DocHash::digest(b"graph"), DocHash::digest(b"graph!"));
    }

    #[test]
    fn display_is_full_hex() {
        let hash = DocHash::new([0xab; 32]);
        assert_eq!(hash.to_string().len(), 64);
        assert!(hash.to_string().starts_with("abab"));
        assert_eq!(hash.short(), "abababab");
    }

    #[test]
    fn parses_its_own_display() {
        let hash = DocHash::digest(b"proposal");
        assert_eq!(hash.to_string().parse::<DocHash>().unwrap(), hash);
        assert!(matches!(
            "abcd".parse::<DocHash>(),
            Err(ContentError::InvalidHash(_))
        ));
    }
}
