//! Chaincode, proposal and proposal-response messages understood by a peer.

/// Name, version and (for source packages) path of a chaincode.
#[derive(Clone, PartialEq, Eq, Hash, prost::Message)]
pub struct ChaincodeId {
    /// Source path, only meaningful when the package was built from source.
    #[prost(string, tag = "1")]
    pub path: String,
    /// Chaincode name.
    #[prost(string, tag = "2")]
    pub name: String,
    /// Chaincode version.
    #[prost(string, tag = "3")]
    pub version: String,
}

impl ChaincodeId {
    /// Identity with only a name, as used to address system chaincodes.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Arguments of a chaincode invocation.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ChaincodeInput {
    /// Function name followed by its arguments.
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub args: Vec<Vec<u8>>,
    /// Whether this invocation runs the chaincode's init function.
    #[prost(bool, tag = "3")]
    pub is_init: bool,
}

/// Language a chaincode is written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ChaincodeType {
    /// Not specified.
    Undefined = 0,
    /// Go.
    Golang = 1,
    /// Node.js.
    Node = 2,
    /// Pre-built chaincode archive.
    Car = 3,
    /// Java.
    Java = 4,
}

impl ChaincodeType {
    /// Maps a `--lang` value (case-insensitive) to a chaincode type.
    pub fn from_language(lang: &str) -> Option<Self> {
        match lang.to_ascii_lowercase().as_str() {
            "golang" | "go" => Some(Self::Golang),
            "node" => Some(Self::Node),
            "car" => Some(Self::Car),
            "java" => Some(Self::Java),
            _ => None,
        }
    }
}

/// Everything needed to address and invoke a chaincode.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ChaincodeSpec {
    /// One of [`ChaincodeType`].
    #[prost(enumeration = "ChaincodeType", tag = "1")]
    pub r#type: i32,
    /// Target chaincode.
    #[prost(message, optional, tag = "2")]
    pub chaincode_id: Option<ChaincodeId>,
    /// Invocation arguments.
    #[prost(message, optional, tag = "3")]
    pub input: Option<ChaincodeInput>,
    /// Execution timeout in seconds, zero for the peer default.
    #[prost(int32, tag = "4")]
    pub timeout: i32,
}

/// A deployable chaincode: its spec plus the packaged code.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ChaincodeDeploymentSpec {
    /// Identity, language and constructor input.
    #[prost(message, optional, tag = "1")]
    pub chaincode_spec: Option<ChaincodeSpec>,
    /// Code package (a gzipped tar for source chaincode).
    #[prost(bytes = "vec", tag = "3")]
    pub code_package: Vec<u8>,
}

impl ChaincodeDeploymentSpec {
    /// Embedded chaincode identity, if the spec carries one.
    pub fn chaincode_id(&self) -> Option<&ChaincodeId> {
        self.chaincode_spec.as_ref()?.chaincode_id.as_ref()
    }
}

/// Invocation of a chaincode function.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ChaincodeInvocationSpec {
    /// Target and arguments.
    #[prost(message, optional, tag = "1")]
    pub chaincode_spec: Option<ChaincodeSpec>,
}

/// Deployment spec co-signed by its owners, carried inside a package envelope.
#[derive(Clone, PartialEq, prost::Message)]
pub struct SignedChaincodeDeploymentSpec {
    /// Encoded [`ChaincodeDeploymentSpec`].
    #[prost(bytes = "vec", tag = "1")]
    pub chaincode_deployment_spec: Vec<u8>,
    /// Encoded instantiation policy.
    #[prost(bytes = "vec", tag = "2")]
    pub instantiation_policy: Vec<u8>,
    /// One endorsement per package owner.
    #[prost(message, repeated, tag = "3")]
    pub owner_endorsements: Vec<Endorsement>,
}

/// An identity and its signature over some message.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Endorsement {
    /// Serialized identity of the signer.
    #[prost(bytes = "vec", tag = "1")]
    pub endorser: Vec<u8>,
    /// Signature.
    #[prost(bytes = "vec", tag = "2")]
    pub signature: Vec<u8>,
}

/// Proposal header extension naming the chaincode being acted upon.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ChaincodeHeaderExtension {
    /// Target chaincode.
    #[prost(message, optional, tag = "2")]
    pub chaincode_id: Option<ChaincodeId>,
}

/// Proposal payload for chaincode invocations.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ChaincodeProposalPayload {
    /// Encoded [`ChaincodeInvocationSpec`].
    #[prost(bytes = "vec", tag = "1")]
    pub input: Vec<u8>,
}

/// Unsigned request sent to an endorser.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Proposal {
    /// Encoded [`crate::common::Header`].
    #[prost(bytes = "vec", tag = "1")]
    pub header: Vec<u8>,
    /// Encoded [`ChaincodeProposalPayload`].
    #[prost(bytes = "vec", tag = "2")]
    pub payload: Vec<u8>,
    /// Optional extension, unused by install.
    #[prost(bytes = "vec", tag = "3")]
    pub extension: Vec<u8>,
}

/// Encoded [`Proposal`] plus the creator's signature over those bytes.
#[derive(Clone, PartialEq, prost::Message)]
pub struct SignedProposal {
    /// Encoded [`Proposal`].
    #[prost(bytes = "vec", tag = "1")]
    pub proposal_bytes: Vec<u8>,
    /// Signature over `proposal_bytes`.
    #[prost(bytes = "vec", tag = "2")]
    pub signature: Vec<u8>,
}

/// Application-level result of executing a proposal.
#[derive(Clone, PartialEq, Eq, prost::Message)]
pub struct Response {
    /// HTTP-like status code, 200 on success.
    #[prost(int32, tag = "1")]
    pub status: i32,
    /// Human-readable message, set on failure.
    #[prost(string, tag = "2")]
    pub message: String,
    /// Function-specific result.
    #[prost(bytes = "vec", tag = "3")]
    pub payload: Vec<u8>,
}

/// Endorser's reply to a [`SignedProposal`].
#[derive(Clone, PartialEq, prost::Message)]
pub struct ProposalResponse {
    /// Message protocol version.
    #[prost(int32, tag = "1")]
    pub version: i32,
    /// Creation time at the endorser.
    #[prost(message, optional, tag = "2")]
    pub timestamp: Option<crate::common::Timestamp>,
    /// Execution result; absent responses are a protocol violation.
    #[prost(message, optional, tag = "4")]
    pub response: Option<Response>,
    /// Encoded proposal response payload.
    #[prost(bytes = "vec", tag = "5")]
    pub payload: Vec<u8>,
    /// Endorser's signature over the payload.
    #[prost(message, optional, tag = "6")]
    pub endorsement: Option<Endorsement>,
}
