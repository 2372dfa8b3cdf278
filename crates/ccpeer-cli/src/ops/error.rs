//! Errors of the install workflow

use ccpeer_core::io::TransportError;
use ccpeer_core::package::CodecError;
use ccpeer_core::packager::PackagingError;
use ccpeer_core::SignerError;
use ccpeer_schema::{ChaincodeName, ChaincodeVersion};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InstallError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Chaincode {name}:{version} is already installed")]
    AlreadyInstalled {
        name: ChaincodeName,
        version: ChaincodeVersion,
    },

    #[error("Failed to package chaincode: {0}")]
    PackagingFailed(#[from] PackagingError),

    #[error("Failed to read package {path}: {source}")]
    PackageUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid package {path}: {source}")]
    InvalidPackage {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("Requested chaincode {field} '{supplied}' does not match '{embedded}' in the package")]
    IdentityMismatch {
        field: &'static str,
        supplied: String,
        embedded: String,
    },

    #[error("Failed to encode proposal: {0}")]
    EncodingFailed(String),

    #[error("Failed to serialize signing identity: {0}")]
    IdentitySerializationFailed(String),

    #[error("Failed to sign proposal: {0}")]
    SigningFailed(#[source] SignerError),

    #[error("Failed to reach peer: {0}")]
    TransportFailed(#[from] TransportError),

    #[error("Malformed response from peer: {0}")]
    MalformedResponse(&'static str),

    #[error("Failed to decode install result: {0}")]
    ResultDecodeFailed(#[source] prost::DecodeError),

    #[error("Install rejected by peer (status {code}): {message}")]
    InstallRejected { code: i32, message: String },
}

/// Last state the workflow reached before it stopped.
///
/// A finished install yields an `InstallReceipt` instead, so there is no
/// terminal variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    Validated,
    Resolved,
    Built,
    Submitted,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Validated => "validated",
            Self::Resolved => "resolved",
            Self::Built => "built",
            Self::Submitted => "submitted",
        };
        f.write_str(name)
    }
}

/// Terminal failure of an install: the error plus the last state reached.
#[derive(Error, Debug)]
#[error("{error} (after stage: {stage})")]
pub struct InstallFailure {
    pub stage: Stage,
    #[source]
    pub error: InstallError,
}

impl InstallFailure {
    /// Adapter for `map_err` that records `stage`.
    pub fn at(stage: Stage) -> impl FnOnce(InstallError) -> Self {
        move |error| Self { stage, error }
    }

    /// The originating error.
    pub fn kind(&self) -> &InstallError {
        &self.error
    }
}
