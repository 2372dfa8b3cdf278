//! Peer connection and signing identity settings.
//!
//! Settings come from `~/.ccpeer/config.toml` when present; command-line
//! flags and environment variables override individual fields.
//!
//! ```toml
//! [peer]
//! address = "http://peer0.org1.example.com:7051"
//! timeout_secs = 30
//! tls_root_cert_files = ["/etc/ccpeer/org1-ca.pem"]
//!
//! [identity]
//! msp_id = "Org1MSP"
//! key_file = "/etc/ccpeer/signer.key"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::fs;

/// Default request timeout when neither the file nor the flags set one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Missing setting: {0}")]
    Missing(&'static str),
}

/// Top-level layout of `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeerConfig {
    /// Endorsing peer settings.
    #[serde(default)]
    pub peer: PeerSection,
    /// Signing identity settings.
    #[serde(default)]
    pub identity: IdentitySection,
}

/// The `[peer]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeerSection {
    /// Endorser address, with or without a scheme.
    pub address: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// PEM root certificates trusted for `https://` peers.
    #[serde(default)]
    pub tls_root_cert_files: Vec<PathBuf>,
}

/// The `[identity]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentitySection {
    /// MSP the signing identity belongs to.
    pub msp_id: Option<String>,
    /// File holding the base64 ed25519 secret key.
    pub key_file: Option<PathBuf>,
}

impl PeerConfig {
    /// Load the configuration file at `path`.
    ///
    /// A missing file yields an empty configuration so that flags alone are enough.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from the default location (`~/.ccpeer/config.toml`).
    ///
    /// # Errors
    ///
    /// See [`PeerConfig::load`].
    pub async fn load_default() -> Result<Self, ConfigError> {
        match crate::paths::config_path() {
            Some(path) => Self::load(&path).await,
            None => Ok(Self::default()),
        }
    }

    /// Apply overrides from flags or environment; `None` or an empty list
    /// keeps the file value.
    pub fn with_overrides(
        mut self,
        address: Option<String>,
        msp_id: Option<String>,
        key_file: Option<PathBuf>,
        timeout_secs: Option<u64>,
        tls_root_cert_files: Vec<PathBuf>,
    ) -> Self {
        if !tls_root_cert_files.is_empty() {
            self.peer.tls_root_cert_files = tls_root_cert_files;
        }
        if address.is_some() {
            self.peer.address = address;
        }
        if timeout_secs.is_some() {
            self.peer.timeout_secs = timeout_secs;
        }
        if msp_id.is_some() {
            self.identity.msp_id = msp_id;
        }
        if key_file.is_some() {
            self.identity.key_file = key_file;
        }
        self
    }

    /// Endorser address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if no address was configured.
    pub fn peer_address(&self) -> Result<&str, ConfigError> {
        self.peer
            .address
            .as_deref()
            .filter(|a| !a.is_empty())
            .ok_or(ConfigError::Missing("peer address"))
    }

    /// MSP id of the signing identity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if no MSP id was configured.
    pub fn msp_id(&self) -> Result<&str, ConfigError> {
        self.identity
            .msp_id
            .as_deref()
            .filter(|m| !m.is_empty())
            .ok_or(ConfigError::Missing("MSP id"))
    }

    /// Path of the signing key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if no key file was configured.
    pub fn key_file(&self) -> Result<&Path, ConfigError> {
        self.identity
            .key_file
            .as_deref()
            .ok_or(ConfigError::Missing("key file"))
    }

    /// Root certificates to trust for the endorser, possibly none.
    pub fn tls_root_cert_files(&self) -> &[PathBuf] {
        &self.peer.tls_root_cert_files
    }

    /// Request timeout for the endorser.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.peer.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}
