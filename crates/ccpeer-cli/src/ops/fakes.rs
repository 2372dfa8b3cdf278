//! In-memory collaborators for workflow tests.
//!
//! Every fake counts its calls so tests can assert that a stage was never
//! reached. The endorser replays queued replies in FIFO order and times out
//! once the queue is empty.

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ccpeer_core::io::{EndorserClient, Reader, TransportError};
use ccpeer_core::packager::PackagingError;
use ccpeer_core::{ChaincodeTarget, DeploymentSpecBuilder, ExistenceProbe, Signer, SignerError};
use ccpeer_schema::common::{ChannelHeader, Envelope, Header, HeaderType, Payload};
use ccpeer_schema::lifecycle::InstallChaincodeResult;
use ccpeer_schema::peer::{
    ChaincodeDeploymentSpec, ChaincodeId, ChaincodeSpec, ChaincodeType, Endorsement,
    ProposalResponse, Response, SignedChaincodeDeploymentSpec, SignedProposal,
};
use ccpeer_schema::{ChaincodeName, ChaincodeVersion, STATUS_SUCCESS};
use prost::Message;

use crate::ops::Context;

pub(crate) const FAKE_PEER: &str = "peer0.fake:7051";

/// Unsigned package for `name`/`version`.
pub(crate) fn descriptor(name: &str, version: &str) -> ChaincodeDeploymentSpec {
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
        code_package: b"code".to_vec(),
    }
}

/// Owner-signed package envelope around `cds`.
pub(crate) fn envelope(cds: &ChaincodeDeploymentSpec) -> Envelope {
    let signed = SignedChaincodeDeploymentSpec {
        chaincode_deployment_spec: cds.encode_to_vec(),
        instantiation_policy: Vec::new(),
        owner_endorsements: vec![Endorsement {
            endorser: b"owner".to_vec(),
            signature: b"owner-signature".to_vec(),
        }],
    };
    let payload = Payload {
        header: Some(Header {
            channel_header: ChannelHeader {
                r#type: HeaderType::ChaincodePackage as i32,
                ..ChannelHeader::default()
            }
            .encode_to_vec(),
            signature_header: Vec::new(),
        }),
        data: signed.encode_to_vec(),
    };
    Envelope {
        payload: payload.encode_to_vec(),
        signature: b"envelope-signature".to_vec(),
    }
}

/// Successful response whose payload is an install result carrying `hash`.
///
/// Legacy installs ignore the payload, so this doubles as a plain success.
pub(crate) fn accepted(hash: &[u8]) -> ProposalResponse {
    let result = InstallChaincodeResult {
        hash: hash.to_vec(),
    };
    response(STATUS_SUCCESS, "", result.encode_to_vec())
}

/// Successful response with a raw, unparsed payload.
pub(crate) fn accepted_raw(payload: &[u8]) -> ProposalResponse {
    response(STATUS_SUCCESS, "", payload.to_vec())
}

/// Response refusing the install.
pub(crate) fn rejected(status: i32, message: &str) -> ProposalResponse {
    response(status, message, Vec::new())
}

fn response(status: i32, message: &str, payload: Vec<u8>) -> ProposalResponse {
    ProposalResponse {
        response: Some(Response {
            status,
            message: message.to_string(),
            payload,
        }),
        ..ProposalResponse::default()
    }
}

pub(crate) struct FakeSigner {
    pub identity: Vec<u8>,
    fail_serialize: bool,
    fail_sign: bool,
}

impl FakeSigner {
    pub fn new() -> Self {
        Self::with_identity(b"Org1MSP:alice".to_vec())
    }

    pub fn with_identity(identity: Vec<u8>) -> Self {
        Self {
            identity,
            fail_serialize: false,
            fail_sign: false,
        }
    }

    pub fn failing_serialize() -> Self {
        Self {
            fail_serialize: true,
            ..Self::new()
        }
    }

    pub fn failing_sign() -> Self {
        Self {
            fail_sign: true,
            ..Self::new()
        }
    }
}

impl Signer for FakeSigner {
    fn identifier(&self) -> String {
        String::from_utf8_lossy(&self.identity).into_owned()
    }

    fn serialize(&self) -> Result<Vec<u8>, SignerError> {
        if self.fail_serialize {
            return Err(SignerError::Identity("no identity".to_string()));
        }
        Ok(self.identity.clone())
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignerError> {
        if self.fail_sign {
            return Err(SignerError::Signing("hsm offline".to_string()));
        }
        Ok(message.iter().rev().copied().collect())
    }
}

#[derive(Default)]
pub(crate) struct FakeReader {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
    calls: AtomicUsize,
}

impl FakeReader {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Reader for FakeReader {
    fn read_file(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let files = self.files.lock().map_err(|e| std::io::Error::other(e.to_string()))?;
        files
            .get(path)
            .cloned()
            .ok_or_else(|| std::io::Error::from(std::io::ErrorKind::NotFound))
    }
}

#[derive(Default)]
pub(crate) struct FakeEndorser {
    replies: Mutex<VecDeque<Option<ProposalResponse>>>,
    sent: Mutex<Vec<SignedProposal>>,
}

impl FakeEndorser {
    pub fn calls(&self) -> usize {
        self.sent().len()
    }

    pub fn sent(&self) -> Vec<SignedProposal> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl EndorserClient for FakeEndorser {
    fn address(&self) -> &str {
        FAKE_PEER
    }

    async fn process_proposal(
        &self,
        proposal: &SignedProposal,
    ) -> Result<Option<ProposalResponse>, TransportError> {
        let timeout = || TransportError::Timeout {
            address: FAKE_PEER.to_string(),
        };
        self.sent.lock().map_err(|_| timeout())?.push(proposal.clone());
        self.replies
            .lock()
            .map_err(|_| timeout())?
            .pop_front()
            .ok_or_else(timeout)
    }
}

#[derive(Default)]
pub(crate) struct FakePackager {
    fail: bool,
    calls: AtomicUsize,
}

impl FakePackager {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DeploymentSpecBuilder for FakePackager {
    fn build(&self, target: &ChaincodeTarget) -> Result<ChaincodeDeploymentSpec, PackagingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(PackagingError::SourceNotFound(PathBuf::from(&target.path)));
        }
        let mut cds = descriptor(&target.name, &target.version);
        if let Some(id) = cds
            .chaincode_spec
            .as_mut()
            .and_then(|s| s.chaincode_id.as_mut())
        {
            id.path.clone_from(&target.path);
        }
        Ok(cds)
    }
}

#[derive(Default)]
pub(crate) struct FakeProbe {
    installed: Mutex<HashSet<(String, String)>>,
}

impl ExistenceProbe for FakeProbe {
    fn exists(&self, name: &ChaincodeName, version: &ChaincodeVersion) -> bool {
        self.installed
            .lock()
            .is_ok_and(|set| set.contains(&(name.to_string(), version.to_string())))
    }
}

/// A full set of fakes, wired into a [`Context`] by [`Fakes::context`].
pub(crate) struct Fakes {
    pub signer: Arc<FakeSigner>,
    pub reader: Arc<FakeReader>,
    pub endorser: Arc<FakeEndorser>,
    pub packager: Arc<FakePackager>,
    pub probe: Arc<FakeProbe>,
}

impl Fakes {
    pub fn new() -> Self {
        Self {
            signer: Arc::new(FakeSigner::new()),
            reader: Arc::default(),
            endorser: Arc::default(),
            packager: Arc::default(),
            probe: Arc::default(),
        }
    }

    pub fn with_file(self, path: &str, bytes: Vec<u8>) -> Self {
        if let Ok(mut files) = self.reader.files.lock() {
            files.insert(PathBuf::from(path), bytes);
        }
        self
    }

    pub fn with_reply(self, response: ProposalResponse) -> Self {
        if let Ok(mut replies) = self.endorser.replies.lock() {
            replies.push_back(Some(response));
        }
        self
    }

    pub fn with_empty_reply(self) -> Self {
        if let Ok(mut replies) = self.endorser.replies.lock() {
            replies.push_back(None);
        }
        self
    }

    pub fn with_installed(self, name: &str, version: &str) -> Self {
        if let Ok(mut set) = self.probe.installed.lock() {
            set.insert((name.to_string(), version.to_string()));
        }
        self
    }

    pub fn with_failing_signer(mut self) -> Self {
        self.signer = Arc::new(FakeSigner::failing_sign());
        self
    }

    pub fn with_failing_packager(mut self) -> Self {
        self.packager = Arc::new(FakePackager {
            fail: true,
            calls: AtomicUsize::new(0),
        });
        self
    }

    pub fn context(&self) -> Context {
        Context::new(
            self.signer.clone(),
            self.reader.clone(),
            self.endorser.clone(),
            self.packager.clone(),
            self.probe.clone(),
        )
    }
}
