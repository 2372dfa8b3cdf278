//! Node-local "already installed" check for legacy packages.

use ccpeer_schema::{ChaincodeName, ChaincodeVersion};
use std::path::PathBuf;

/// Answers whether a chaincode version is already in the local package store.
pub trait ExistenceProbe: Send + Sync {
    fn exists(&self, name: &ChaincodeName, version: &ChaincodeVersion) -> bool;
}

/// Looks for `<dir>/<name>.<version>`, the layout a peer uses for installed
/// legacy packages.
#[derive(Debug, Clone)]
pub struct InstallDirProbe {
    dir: PathBuf,
}

impl InstallDirProbe {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Probe over [`crate::paths::chaincode_install_dir`].
    pub fn from_env() -> Self {
        Self::new(crate::paths::chaincode_install_dir())
    }

    fn entry(&self, name: &ChaincodeName, version: &ChaincodeVersion) -> PathBuf {
        self.dir.join(format!("{name}.{version}"))
    }
}

impl ExistenceProbe for InstallDirProbe {
    fn exists(&self, name: &ChaincodeName, version: &ChaincodeVersion) -> bool {
        let path = self.entry(name, version);
        let found = path.exists();
        tracing::trace!("Probe {}: {}", path.display(), found);
        found
    }
}
