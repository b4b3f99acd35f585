//! Deterministic dataset fingerprints using SHA256 hashing.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Content fingerprint of an uploaded matches/deliveries pair.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetId(String);

impl DatasetId {
    /// Generate a DatasetId from the raw file contents.
    /// Uses SHA256 and takes the first 16 characters for brevity.
    pub fn generate(parts: &[&[u8]]) -> Self {
        let mut hasher = Sha256::new();
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                hasher.update(b"|");
            }
            hasher.update((part.len() as u64).to_le_bytes());
            hasher.update(part);
        }
        let hash = hex::encode(hasher.finalize());
        Self(hash[..16].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DatasetId({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_deterministic() {
        let a = DatasetId::generate(&[b"id,season\n1,2008\n", b"match_id\n1\n"]);
        let b = DatasetId::generate(&[b"id,season\n1,2008\n", b"match_id\n1\n"]);
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 16);
    }

    #[test]
    fn test_generate_respects_boundaries() {
        let a = DatasetId::generate(&[b"ab", b"c"]);
        let b = DatasetId::generate(&[b"a", b"bc"]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_display() {
        let id = DatasetId::generate(&[b"x"]);
        assert_eq!(format!("{}", id), id.as_str());
        assert!(format!("{:?}", id).starts_with("DatasetId("));
    }
}
