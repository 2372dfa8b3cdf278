//! Package fingerprints returned by the peer.

use serde::{Deserialize, Serialize};

/// Fingerprint of an installed package as reported by the peer.
///
/// The peer returns raw bytes; this newtype keeps them distinct from other
/// byte buffers and renders them as lowercase hex for display and logs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct PackageHash(#[serde(with = "hex::serde")] Vec<u8>);

impl PackageHash {
    /// Wrap raw hash bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Lowercase hex rendering.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl std::fmt::Display for PackageHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
