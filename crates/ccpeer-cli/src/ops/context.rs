//! Shared installation context.
//!
//! Groups the collaborators an install needs so stages take one argument
//! instead of five.

use ccpeer_core::io::{EndorserClient, Reader};
use ccpeer_core::{DeploymentSpecBuilder, ExistenceProbe, Signer};
use std::fmt;
use std::sync::Arc;

/// Collaborators used during an install.
#[derive(Clone)]
pub struct Context {
    pub signer: Arc<dyn Signer>,
    pub reader: Arc<dyn Reader>,
    pub endorser: Arc<dyn EndorserClient>,
    pub packager: Arc<dyn DeploymentSpecBuilder>,
    pub probe: Arc<dyn ExistenceProbe>,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("signer", &self.signer.identifier())
            .field("endorser", &self.endorser.address())
            .finish_non_exhaustive()
    }
}

impl Context {
    pub fn new(
        signer: Arc<dyn Signer>,
        reader: Arc<dyn Reader>,
        endorser: Arc<dyn EndorserClient>,
        packager: Arc<dyn DeploymentSpecBuilder>,
        probe: Arc<dyn ExistenceProbe>,
    ) -> Self {
        Self {
            signer,
            reader,
            endorser,
            packager,
            probe,
        }
    }
}
