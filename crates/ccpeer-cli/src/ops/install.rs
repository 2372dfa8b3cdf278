//! Chaincode install workflow.
//!
//! [`install`] walks one request through every stage in order and stops at
//! the first error. Nothing is rolled back because the only side effect, the
//! submission, happens last and either reaches the peer or does not.

use std::time::Instant;

use ccpeer_schema::{ChaincodeName, ChaincodeVersion, PackageHash};

use crate::ops::flow::{Dialect, InstallInput};
use crate::ops::{Context, InstallFailure, Stage};

/// Outcome of a successful install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReceipt {
    pub dialect: Dialect,
    pub name: ChaincodeName,
    pub version: ChaincodeVersion,
    pub tx_id: String,
    /// Hash reported by the peer; new lifecycle only.
    pub package_hash: Option<PackageHash>,
}

/// Runs the install workflow for `input` against the collaborators in `ctx`.
pub async fn install(ctx: &Context, input: InstallInput) -> Result<InstallReceipt, InstallFailure> {
    let start = Instant::now();
    let dialect = input.dialect;

    let validated = input.validate().map_err(InstallFailure::at(Stage::Start))?;
    tracing::debug!("{dialect} install: {}", Stage::Validated);

    let resolved = validated
        .resolve(ctx)
        .map_err(InstallFailure::at(Stage::Validated))?;
    tracing::debug!(
        "{dialect} install of {}:{}: {}",
        resolved.package.name(),
        resolved.package.version(),
        Stage::Resolved
    );

    let built = resolved
        .build(ctx.signer.as_ref())
        .map_err(InstallFailure::at(Stage::Resolved))?;
    tracing::debug!("{dialect} install {}: {}", built.request.tx_id, Stage::Built);

    let submitted = built
        .submit(ctx.signer.as_ref(), ctx.endorser.as_ref())
        .await
        .map_err(InstallFailure::at(Stage::Built))?;
    tracing::debug!("{dialect} install {}: {}", submitted.request.tx_id, Stage::Submitted);

    let receipt = submitted
        .finish()
        .map_err(InstallFailure::at(Stage::Submitted))?;

    match &receipt.package_hash {
        Some(hash) => tracing::info!(
            "Installed {}:{} on {} (package hash {hash}) in {:.2?}",
            receipt.name,
            receipt.version,
            ctx.endorser.address(),
            start.elapsed()
        ),
        None => tracing::info!(
            "Installed {}:{} on {} in {:.2?}",
            receipt.name,
            receipt.version,
            ctx.endorser.address(),
            start.elapsed()
        ),
    }

    Ok(receipt)
}
