//! Signing, submission and response interpretation.
//!
//! One signature, one request, one peer. Transport failures leave the verdict
//! unknown and are never retried here; a response that arrives but refuses
//! the install is reported separately as a rejection.

use ccpeer_core::Signer;
use ccpeer_core::io::EndorserClient;
use ccpeer_schema::lifecycle::InstallChaincodeResult;
use ccpeer_schema::peer::{ProposalResponse, Response, SignedProposal};
use ccpeer_schema::{PackageHash, STATUS_SUCCESS};
use prost::Message;

use crate::ops::flow::{BuiltInstall, Dialect, SubmittedInstall};
use crate::ops::{InstallError, InstallReceipt};

impl BuiltInstall {
    /// Signs the proposal and sends it to `endorser`.
    pub async fn submit(
        self,
        signer: &dyn Signer,
        endorser: &dyn EndorserClient,
    ) -> Result<SubmittedInstall, InstallError> {
        let signed = sign(&self, signer)?;

        tracing::debug!(
            "Submitting {} to {}",
            self.request.tx_id,
            endorser.address()
        );
        let response = endorser.process_proposal(&signed).await?;
        let verdict = check_verdict(response)?;

        Ok(SubmittedInstall {
            request: self.request,
            name: self.name,
            version: self.version,
            verdict,
        })
    }
}

fn sign(built: &BuiltInstall, signer: &dyn Signer) -> Result<SignedProposal, InstallError> {
    let proposal_bytes = built.request.proposal.encode_to_vec();
    let signature = signer
        .sign(&proposal_bytes)
        .map_err(InstallError::SigningFailed)?;

    Ok(SignedProposal {
        proposal_bytes,
        signature,
    })
}

/// Structural and status checks on the peer's answer.
pub fn check_verdict(response: Option<ProposalResponse>) -> Result<Response, InstallError> {
    let response = response.ok_or(InstallError::MalformedResponse(
        "peer returned no proposal response",
    ))?;
    let verdict = response.response.ok_or(InstallError::MalformedResponse(
        "proposal response carries no result",
    ))?;

    if verdict.status != STATUS_SUCCESS {
        return Err(InstallError::InstallRejected {
            code: verdict.status,
            message: verdict.message,
        });
    }

    Ok(verdict)
}

impl SubmittedInstall {
    /// Interprets the dialect-specific payload of an accepted install.
    pub fn finish(self) -> Result<InstallReceipt, InstallError> {
        let package_hash = match self.request.dialect {
            Dialect::Lifecycle => {
                let result = InstallChaincodeResult::decode(self.verdict.payload.as_slice())
                    .map_err(InstallError::ResultDecodeFailed)?;
                Some(PackageHash::new(result.hash))
            }
            Dialect::Legacy => None,
        };

        Ok(InstallReceipt {
            dialect: self.request.dialect,
            name: self.name,
            version: self.version,
            tx_id: self.request.tx_id,
            package_hash,
        })
    }
}
