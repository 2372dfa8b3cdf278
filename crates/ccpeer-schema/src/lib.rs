//! Wire messages and shared types for the chaincode install client.
//!
//! Everything that crosses a process boundary lives here: the protobuf
//! messages exchanged with a peer's endorser, the package shapes read from
//! disk, and the identity newtypes used to compare a caller's request with the
//! contents of a package.

pub mod common;
pub mod hash;
pub mod lifecycle;
pub mod msp;
pub mod peer;
pub mod types;

// Re-exports
pub use hash::PackageHash;
pub use types::*;

/// Namespace of the system chaincode that installs packages for the new lifecycle.
pub const LIFECYCLE_NAMESPACE: &str = "_lifecycle";

/// Function name invoked on [`LIFECYCLE_NAMESPACE`] to install a package.
pub const LIFECYCLE_INSTALL_FUNCTION: &str = "InstallChaincode";

/// Function name carried in the first argument of a legacy install invocation.
pub const LEGACY_INSTALL_FUNCTION: &str = "install";

/// Response status a peer uses to accept a proposal (`common.Status.SUCCESS`).
pub const STATUS_SUCCESS: i32 = 200;

/// Largest proposal a peer accepts by default (100 MiB).
pub const MAX_PROPOSAL_BYTES: usize = 100 * 1024 * 1024;
