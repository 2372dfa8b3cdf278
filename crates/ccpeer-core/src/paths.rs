//! Well-known locations on disk.

use dirs::home_dir;
use std::path::PathBuf;

/// Default root of a peer's file system, matching the peer's own default.
const DEFAULT_PEER_FILESYSTEM: &str = "/var/hyperledger/production";

/// Returns the client configuration directory, or None if the user's home cannot be resolved.
pub fn try_ccpeer_home() -> Option<PathBuf> {
    if let Ok(val) = std::env::var("CCPEER_HOME") {
        return Some(PathBuf::from(val));
    }
    home_dir().map(|h| h.join(".ccpeer"))
}

/// Optional TOML configuration file: ~/.ccpeer/config.toml
pub fn config_path() -> Option<PathBuf> {
    try_ccpeer_home().map(|h| h.join("config.toml"))
}

/// Directory holding locally installed legacy packages, one `<name>.<version>` file each.
pub fn chaincode_install_dir() -> PathBuf {
    let root = std::env::var("CORE_PEER_FILESYSTEMPATH")
        .unwrap_or_else(|_| DEFAULT_PEER_FILESYSTEM.to_string());
    PathBuf::from(root).join("chaincodes")
}
