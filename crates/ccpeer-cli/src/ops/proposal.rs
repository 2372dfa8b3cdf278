//! Proposal construction.
//!
//! Both dialects produce the same outer shape: a `Proposal` whose header
//! names the creator and the target chaincode and whose payload is a
//! chaincode invocation. They differ only in target and arguments:
//!
//! | Dialect   | Target                | Args                                      |
//! |-----------|-----------------------|-------------------------------------------|
//! | Legacy    | the chaincode itself  | `install`, encoded package message        |
//! | Lifecycle | `_lifecycle`          | `InstallChaincode`, `InstallChaincodeArgs` |

use ccpeer_core::Signer;
use ccpeer_schema::common::{ChannelHeader, Header, HeaderType, SignatureHeader, Timestamp};
use ccpeer_schema::lifecycle::InstallChaincodeArgs;
use ccpeer_schema::peer::{
    ChaincodeHeaderExtension, ChaincodeId, ChaincodeInput, ChaincodeInvocationSpec,
    ChaincodeProposalPayload, ChaincodeSpec, ChaincodeType, Proposal,
};
use ccpeer_schema::{
    LEGACY_INSTALL_FUNCTION, LIFECYCLE_INSTALL_FUNCTION, LIFECYCLE_NAMESPACE, MAX_PROPOSAL_BYTES,
};
use prost::Message;
use sha2::{Digest, Sha256};

use crate::ops::flow::{BuiltInstall, RequestEnvelope, ResolvedInstall, ResolvedPackage};
use crate::ops::InstallError;

/// Length of the random nonce in the signature header.
pub const NONCE_LEN: usize = 24;

impl ResolvedInstall {
    /// Builds the unsigned proposal, with `signer` as its creator.
    pub fn build(self, signer: &dyn Signer) -> Result<BuiltInstall, InstallError> {
        let creator = signer
            .serialize()
            .map_err(|e| InstallError::IdentitySerializationFailed(e.to_string()))?;
        if creator.is_empty() {
            return Err(InstallError::IdentitySerializationFailed(
                "signer produced an empty identity".to_string(),
            ));
        }

        let (cc_type, target, args) = invocation(&self.package)?;
        let nonce: [u8; NONCE_LEN] = rand::random();
        let tx_id = compute_tx_id(&nonce, &creator);
        let proposal = assemble(cc_type, &target, args, &tx_id, creator, nonce.to_vec());

        let size = proposal.encoded_len();
        if size > MAX_PROPOSAL_BYTES {
            return Err(InstallError::EncodingFailed(format!(
                "proposal is {size} bytes, larger than the {MAX_PROPOSAL_BYTES} byte limit"
            )));
        }

        tracing::debug!(
            "Built {} proposal {} for {} ({} bytes)",
            self.dialect,
            tx_id,
            target.name,
            size
        );

        Ok(BuiltInstall {
            name: self.package.name().clone(),
            version: self.package.version().clone(),
            request: RequestEnvelope {
                dialect: self.dialect,
                target,
                tx_id,
                proposal,
            },
        })
    }
}

/// Chaincode type, target and invocation arguments for a package.
fn invocation(
    package: &ResolvedPackage,
) -> Result<(ChaincodeType, ChaincodeId, Vec<Vec<u8>>), InstallError> {
    match package {
        ResolvedPackage::Opaque {
            bytes,
            name,
            version,
        } => {
            let install_args = InstallChaincodeArgs {
                name: name.to_string(),
                version: version.to_string(),
                chaincode_install_package: bytes.clone(),
            };
            Ok((
                ChaincodeType::Undefined,
                ChaincodeId::named(LIFECYCLE_NAMESPACE),
                vec![
                    LIFECYCLE_INSTALL_FUNCTION.as_bytes().to_vec(),
                    install_args.encode_to_vec(),
                ],
            ))
        }
        ResolvedPackage::Legacy {
            package,
            descriptor,
            ..
        } => {
            let spec = descriptor.chaincode_spec.as_ref();
            let target = spec
                .and_then(|s| s.chaincode_id.clone())
                .ok_or_else(|| {
                    InstallError::EncodingFailed(
                        "deployment spec has no chaincode identity".to_string(),
                    )
                })?;
            let cc_type = spec
                .and_then(|s| ChaincodeType::try_from(s.r#type).ok())
                .unwrap_or(ChaincodeType::Undefined);
            Ok((
                cc_type,
                target,
                vec![
                    LEGACY_INSTALL_FUNCTION.as_bytes().to_vec(),
                    package.encode_to_vec(),
                ],
            ))
        }
    }
}

fn assemble(
    cc_type: ChaincodeType,
    target: &ChaincodeId,
    args: Vec<Vec<u8>>,
    tx_id: &str,
    creator: Vec<u8>,
    nonce: Vec<u8>,
) -> Proposal {
    let extension = ChaincodeHeaderExtension {
        chaincode_id: Some(target.clone()),
    };
    let channel_header = ChannelHeader {
        r#type: HeaderType::EndorserTransaction as i32,
        timestamp: Some(now()),
        tx_id: tx_id.to_string(),
        extension: extension.encode_to_vec(),
        ..ChannelHeader::default()
    };
    let header = Header {
        channel_header: channel_header.encode_to_vec(),
        signature_header: SignatureHeader { creator, nonce }.encode_to_vec(),
    };

    let cis = ChaincodeInvocationSpec {
        chaincode_spec: Some(ChaincodeSpec {
            r#type: cc_type as i32,
            chaincode_id: Some(target.clone()),
            input: Some(ChaincodeInput {
                args,
                is_init: false,
            }),
            timeout: 0,
        }),
    };
    let payload = ChaincodeProposalPayload {
        input: cis.encode_to_vec(),
    };

    Proposal {
        header: header.encode_to_vec(),
        payload: payload.encode_to_vec(),
        extension: Vec::new(),
    }
}

/// Transaction id: lowercase hex of `sha256(nonce || creator)`.
pub fn compute_tx_id(nonce: &[u8], creator: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(nonce);
    hasher.update(creator);
    hex::encode(hasher.finalize())
}

fn now() -> Timestamp {
    let now = chrono::Utc::now();
    Timestamp {
        seconds: now.timestamp(),
        nanos: now.timestamp_subsec_nanos() as i32,
    }
}

/// Decoded view of a proposal, for tests and diagnostics.
#[derive(Debug)]
pub struct ProposalView {
    pub channel_header: ChannelHeader,
    pub signature_header: SignatureHeader,
    pub extension: ChaincodeHeaderExtension,
    pub spec: ChaincodeSpec,
}

impl ProposalView {
    /// Decodes the nested messages of `proposal`.
    pub fn decode(proposal: &Proposal) -> Result<Self, prost::DecodeError> {
        let header = Header::decode(proposal.header.as_slice())?;
        let channel_header = ChannelHeader::decode(header.channel_header.as_slice())?;
        let signature_header = SignatureHeader::decode(header.signature_header.as_slice())?;
        let extension = ChaincodeHeaderExtension::decode(channel_header.extension.as_slice())?;
        let payload = ChaincodeProposalPayload::decode(proposal.payload.as_slice())?;
        let cis = ChaincodeInvocationSpec::decode(payload.input.as_slice())?;

        Ok(Self {
            channel_header,
            signature_header,
            extension,
            spec: cis.chaincode_spec.unwrap_or_default(),
        })
    }

    /// Invocation arguments, function name first.
    pub fn args(&self) -> &[Vec<u8>] {
        self.spec.input.as_ref().map_or(&[][..], |i| i.args.as_slice())
    }
}
