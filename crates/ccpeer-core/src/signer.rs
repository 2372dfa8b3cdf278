//! Signing identity.
//!
//! A [`Signer`] contributes two things to a proposal: the serialized creator
//! identity placed in the signature header, and the signature over the encoded
//! proposal. [`Ed25519Signer`] is the production implementation; the key file
//! holds a base64-encoded 32-byte ed25519 secret key.

use base64::Engine;
use ccpeer_schema::msp::SerializedIdentity;
use ed25519_dalek::{Signer as _, SigningKey, VerifyingKey};
use prost::Message;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignerError {
    #[error("Failed to read key file {path}: {source}")]
    KeyFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid signing key: {0}")]
    InvalidKey(String),

    #[error("Identity cannot be serialized: {0}")]
    Identity(String),

    #[error("Signing failed: {0}")]
    Signing(String),
}

/// Produces the creator identity and signatures for proposals.
///
/// Implementations must be safe to share between concurrent installs.
pub trait Signer: Send + Sync {
    /// Short human-readable identifier used in error messages.
    fn identifier(&self) -> String;

    /// Serialized identity embedded as the proposal creator.
    fn serialize(&self) -> Result<Vec<u8>, SignerError>;

    /// Signature over `message`.
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignerError>;
}

/// Ed25519 signing identity belonging to an MSP.
pub struct Ed25519Signer {
    msp_id: String,
    key: SigningKey,
}

impl std::fmt::Debug for Ed25519Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ed25519Signer")
            .field("msp_id", &self.msp_id)
            .field("public_key", &hex::encode(self.key.verifying_key().as_bytes()))
            .finish_non_exhaustive()
    }
}

impl Ed25519Signer {
    /// Create a signer from an in-memory key.
    pub fn new(msp_id: impl Into<String>, key: SigningKey) -> Self {
        Self {
            msp_id: msp_id.into(),
            key,
        }
    }

    /// Load the secret key from a file containing its base64 encoding.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not hold a
    /// base64-encoded 32-byte key.
    pub fn from_key_file(msp_id: impl Into<String>, path: &Path) -> Result<Self, SignerError> {
        let encoded = std::fs::read_to_string(path).map_err(|source| SignerError::KeyFile {
            path: path.display().to_string(),
            source,
        })?;

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|e| SignerError::InvalidKey(format!("not base64: {e}")))?;
        let secret: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
            SignerError::InvalidKey(format!("expected 32 bytes, got {}", bytes.len()))
        })?;

        Ok(Self::new(msp_id, SigningKey::from_bytes(&secret)))
    }

    /// Public half of the key, for verifying signatures produced here.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.key.verifying_key()
    }
}

impl Signer for Ed25519Signer {
    fn identifier(&self) -> String {
        let public = self.key.verifying_key();
        format!("{}:{}", self.msp_id, hex::encode(&public.as_bytes()[..8]))
    }

    fn serialize(&self) -> Result<Vec<u8>, SignerError> {
        if self.msp_id.is_empty() {
            return Err(SignerError::Identity("MSP id is empty".to_string()));
        }

        let identity = SerializedIdentity {
            mspid: self.msp_id.clone(),
            id_bytes: self.key.verifying_key().as_bytes().to_vec(),
        };
        Ok(identity.encode_to_vec())
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignerError> {
        Ok(self.key.sign(message).to_bytes().to_vec())
    }
}
