//! Legacy chaincode package codec.
//!
//! A package file produced by the legacy `package` command holds one of two
//! shapes:
//!
//! ```text
//! ChaincodeDeploymentSpec                      (unsigned package)
//! Envelope { Payload { header: CHAINCODE_PACKAGE,
//!                      data: SignedChaincodeDeploymentSpec {
//!                          chaincode_deployment_spec, owner_endorsements } } }
//! ```
//!
//! [`PackageObject::parse`] tries the descriptor shape first and the signed
//! envelope second; anything else is rejected. [`PackageObject::descriptor`]
//! performs the explicit unwrap step for envelopes.

use ccpeer_schema::common::{ChannelHeader, Envelope, HeaderType, Payload};
use ccpeer_schema::peer::{ChaincodeDeploymentSpec, ChaincodeId, SignedChaincodeDeploymentSpec};
use prost::Message;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Package is empty")]
    Empty,

    #[error("Not a chaincode deployment spec or signed package envelope")]
    UnknownShape,

    #[error("Malformed {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: prost::DecodeError,
    },

    #[error("Signed package envelope has no header")]
    MissingHeader,

    #[error("Envelope header type {0} is not a chaincode package")]
    WrongHeaderType(i32),

    #[error("Deployment spec has no chaincode identity")]
    MissingIdentity,

    #[error("Deployment spec has an empty chaincode {0}")]
    EmptyIdentityField(&'static str),
}

/// One of the two package shapes found in a legacy package file.
#[derive(Debug, Clone, PartialEq)]
pub enum PackageObject {
    /// Unsigned package: the deployment spec itself.
    Descriptor(ChaincodeDeploymentSpec),
    /// Package co-signed by its owners.
    SignedEnvelope(Envelope),
}

impl PackageObject {
    /// Parse package bytes, descriptor shape first, then signed envelope.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnknownShape`] if neither shape matches.
    pub fn parse(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.is_empty() {
            return Err(CodecError::Empty);
        }

        if let Ok(cds) = ChaincodeDeploymentSpec::decode(bytes) {
            if validated_identity(&cds).is_ok() {
                return Ok(Self::Descriptor(cds));
            }
        }

        if let Ok(env) = Envelope::decode(bytes) {
            if extract_signed_deployment_spec(&env).is_ok() {
                return Ok(Self::SignedEnvelope(env));
            }
        }

        Err(CodecError::UnknownShape)
    }

    /// The deployment spec, unwrapping the envelope if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the envelope does not wrap a valid deployment spec.
    pub fn descriptor(&self) -> Result<ChaincodeDeploymentSpec, CodecError> {
        match self {
            Self::Descriptor(cds) => {
                validated_identity(cds)?;
                Ok(cds.clone())
            }
            Self::SignedEnvelope(env) => {
                let signed = extract_signed_deployment_spec(env)?;
                let cds = ChaincodeDeploymentSpec::decode(signed.chaincode_deployment_spec.as_slice())
                    .map_err(|source| CodecError::Decode {
                        what: "chaincode deployment spec",
                        source,
                    })?;
                validated_identity(&cds)?;
                Ok(cds)
            }
        }
    }

    /// Wire encoding of the package as it appeared on disk.
    pub fn encode_to_vec(&self) -> Vec<u8> {
        match self {
            Self::Descriptor(cds) => cds.encode_to_vec(),
            Self::SignedEnvelope(env) => env.encode_to_vec(),
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Descriptor(_) => "deployment spec",
            Self::SignedEnvelope(_) => "signed package envelope",
        }
    }
}

/// Unwrap the signed deployment spec carried by a package envelope.
///
/// # Errors
///
/// Returns an error if the payload, its header or its data are malformed, or
/// if the header does not mark the envelope as a chaincode package.
pub fn extract_signed_deployment_spec(
    env: &Envelope,
) -> Result<SignedChaincodeDeploymentSpec, CodecError> {
    let payload = Payload::decode(env.payload.as_slice()).map_err(|source| CodecError::Decode {
        what: "envelope payload",
        source,
    })?;
    let header = payload.header.ok_or(CodecError::MissingHeader)?;

    let channel_header =
        ChannelHeader::decode(header.channel_header.as_slice()).map_err(|source| {
            CodecError::Decode {
                what: "channel header",
                source,
            }
        })?;
    if channel_header.r#type != HeaderType::ChaincodePackage as i32 {
        return Err(CodecError::WrongHeaderType(channel_header.r#type));
    }

    SignedChaincodeDeploymentSpec::decode(payload.data.as_slice()).map_err(|source| {
        CodecError::Decode {
            what: "signed deployment spec",
            source,
        }
    })
}

/// The chaincode identity embedded in `cds`, which must name both a chaincode and a version.
///
/// # Errors
///
/// Returns an error if the identity is absent or has an empty name or version.
pub fn validated_identity(cds: &ChaincodeDeploymentSpec) -> Result<&ChaincodeId, CodecError> {
    let id = cds.chaincode_id().ok_or(CodecError::MissingIdentity)?;
    if id.name.is_empty() {
        return Err(CodecError::EmptyIdentityField("name"));
    }
    if id.version.is_empty() {
        return Err(CodecError::EmptyIdentityField("version"));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccpeer_schema::common::Header;
    use ccpeer_schema::peer::{ChaincodeSpec, ChaincodeType, Endorsement};

    fn cds(name: &str, version: &str) -> ChaincodeDeploymentSpec {
        ChaincodeDeploymentSpec {
            chaincode_spec: Some(ChaincodeSpec {
                r#type: ChaincodeType::Golang as i32,
                chaincode_id: Some(ChaincodeId {
                    path: "github.com/example/cc".to_string(),
                    name: name.to_string(),
                    version: version.to_string(),
                }),
                input: None,
                timeout: 0,
            }),
            code_package: b"tarball".to_vec(),
        }
    }

    fn envelope(cds: &ChaincodeDeploymentSpec, header_type: HeaderType) -> Envelope {
        let signed = SignedChaincodeDeploymentSpec {
            chaincode_deployment_spec: cds.encode_to_vec(),
            instantiation_policy: vec![],
            owner_endorsements: vec![Endorsement {
                endorser: b"owner".to_vec(),
                signature: b"sig".to_vec(),
            }],
        };
        let payload = Payload {
            header: Some(Header {
                channel_header: ChannelHeader {
                    r#type: header_type as i32,
                    ..ChannelHeader::default()
                }
                .encode_to_vec(),
                signature_header: vec![],
            }),
            data: signed.encode_to_vec(),
        };
        Envelope {
            payload: payload.encode_to_vec(),
            signature: b"owner-sig".to_vec(),
        }
    }

    #[test]
    fn parses_plain_deployment_spec() {
        let bytes = cds("mycc", "1.0").encode_to_vec();
        let pkg = PackageObject::parse(&bytes).unwrap();

        assert!(matches!(pkg, PackageObject::Descriptor(_)));
        assert_eq!(pkg.descriptor().unwrap(), cds("mycc", "1.0"));
        assert_eq!(pkg.encode_to_vec(), bytes);
    }

    #[test]
    fn parses_and_unwraps_signed_envelope() {
        let bytes = envelope(&cds("mycc", "1.0"), HeaderType::ChaincodePackage).encode_to_vec();
        let pkg = PackageObject::parse(&bytes).unwrap();

        assert!(matches!(pkg, PackageObject::SignedEnvelope(_)));
        let unwrapped = pkg.descriptor().unwrap();
        assert_eq!(unwrapped.chaincode_id().unwrap().name, "mycc");
        assert_eq!(pkg.encode_to_vec(), bytes);
    }

    #[test]
    fn envelope_with_other_header_type_is_rejected() {
        let env = envelope(&cds("mycc", "1.0"), HeaderType::EndorserTransaction);
        assert!(matches!(
            extract_signed_deployment_spec(&env),
            Err(CodecError::WrongHeaderType(3))
        ));
        assert!(matches!(
            PackageObject::parse(&env.encode_to_vec()),
            Err(CodecError::UnknownShape)
        ));
    }

    #[test]
    fn spec_without_version_is_rejected() {
        let bytes = cds("mycc", "").encode_to_vec();
        assert!(matches!(
            PackageObject::parse(&bytes),
            Err(CodecError::UnknownShape)
        ));
        assert!(matches!(
            validated_identity(&cds("mycc", "")),
            Err(CodecError::EmptyIdentityField("version"))
        ));
    }

    #[test]
    fn empty_and_random_bytes_are_rejected() {
        assert!(matches!(PackageObject::parse(&[]), Err(CodecError::Empty)));
        assert!(PackageObject::parse(b"definitely not protobuf \xff\xff").is_err());
    }
}
