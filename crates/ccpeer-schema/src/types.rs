//! Chaincode identity newtypes.
//!
//! Names and versions are compared byte-for-byte. Unlike package names in a
//! registry, a chaincode name is never normalized: `MyCC` and `mycc` are two
//! different chaincodes.

use serde::{Deserialize, Serialize};

/// A chaincode name, stored exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ChaincodeName(String);

impl ChaincodeName {
    /// Create a chaincode name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Return the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChaincodeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Deref for ChaincodeName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for ChaincodeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ChaincodeName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ChaincodeName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<&str> for ChaincodeName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ChaincodeName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A chaincode version label. Versions are opaque labels, not semver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ChaincodeVersion(String);

impl ChaincodeVersion {
    /// Create a version label.
    pub fn new(v: impl Into<String>) -> Self {
        Self(v.into())
    }

    /// Return the version as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChaincodeVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Deref for ChaincodeVersion {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for ChaincodeVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ChaincodeVersion {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ChaincodeVersion {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<&str> for ChaincodeVersion {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ChaincodeVersion {
    fn from(s: String) -> Self {
        Self(s)
    }
}
