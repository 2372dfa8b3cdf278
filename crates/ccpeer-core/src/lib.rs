//! Collaborators of the chaincode install workflow.
//!
//! The workflow itself only sequences stages; everything that touches keys,
//! files, the network or the package format is behind one of the traits
//! defined here so it can be swapped for a fake in tests:
//!
//! - [`Signer`]: serialized identity and signatures
//! - [`io::Reader`]: package file access
//! - [`io::EndorserClient`]: the single peer the request is sent to
//! - [`package::PackageObject`]: the two on-disk package shapes
//! - [`DeploymentSpecBuilder`]: synthesizes a package from a source tree
//! - [`ExistenceProbe`]: node-local "already installed" check

pub mod config;
pub mod io;
pub mod package;
pub mod packager;
pub mod paths;
pub mod probe;
pub mod signer;

pub use config::PeerConfig;
pub use packager::{ChaincodeTarget, DeploymentSpecBuilder, SourcePackager};
pub use paths::*;
pub use probe::{ExistenceProbe, InstallDirProbe};
pub use signer::{Ed25519Signer, Signer, SignerError};

/// User Agent string sent to peers
pub const USER_AGENT: &str = concat!("ccpeer/", env!("CARGO_PKG_VERSION"));
