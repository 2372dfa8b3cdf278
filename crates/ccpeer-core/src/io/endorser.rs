//! Transport to a single endorsing peer.
//!
//! The install workflow talks to exactly one peer through an
//! [`EndorserClient`]. The client performs one attempt per call: no retry,
//! no backoff, no fan-out. Deadlines are the transport's job, so
//! [`HttpEndorserClient`] carries the request timeout.
//!
//! Peers behind a private CA are reached over `https://` once their root
//! certificates are passed to [`HttpEndorserClient::new`].

use async_trait::async_trait;
use ccpeer_schema::peer::{ProposalResponse, SignedProposal};
use prost::Message;
use reqwest::{Certificate, Client};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Route of the endorser's proposal handler.
pub const PROCESS_PROPOSAL_PATH: &str = "/protos.Endorser/ProcessProposal";

const PROTOBUF_CONTENT_TYPE: &str = "application/x-protobuf";

/// Failures below the application layer. When one of these is returned the
/// peer's verdict is unknown.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to {address} timed out")]
    Timeout { address: String },

    #[error("Peer {address} answered with HTTP {status}")]
    Status { address: String, status: u16 },

    #[error("Failed to read TLS root certificate {path}: {source}")]
    RootCert {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Response from {address} is not a proposal response: {source}")]
    Decode {
        address: String,
        #[source]
        source: prost::DecodeError,
    },
}

/// A peer that endorses signed proposals.
#[async_trait]
pub trait EndorserClient: Send + Sync {
    /// Address of the peer, for logs and errors.
    fn address(&self) -> &str;

    /// Sends `proposal` and returns the peer's response.
    ///
    /// `Ok(None)` means the peer answered without a response message.
    async fn process_proposal(
        &self,
        proposal: &SignedProposal,
    ) -> Result<Option<ProposalResponse>, TransportError>;
}

/// [`EndorserClient`] that posts encoded proposals over HTTP.
#[derive(Debug, Clone)]
pub struct HttpEndorserClient {
    client: Client,
    address: String,
    endpoint: String,
}

impl HttpEndorserClient {
    /// Create a client for `address`. A missing scheme defaults to `http://`.
    ///
    /// The PEM certificates in `root_certs` are trusted in addition to the
    /// built-in roots when the peer is reached over `https://`.
    ///
    /// # Errors
    ///
    /// Returns an error if a certificate cannot be read or parsed, or if the
    /// underlying HTTP client cannot be built.
    pub fn new(
        address: &str,
        timeout: Duration,
        root_certs: &[PathBuf],
    ) -> Result<Self, TransportError> {
        let mut builder = Client::builder()
            .user_agent(crate::USER_AGENT)
            .timeout(timeout);
        for path in root_certs {
            builder = builder.add_root_certificate(load_root_cert(path)?);
        }
        let client = builder.build()?;

        let base = if address.contains("://") {
            address.trim_end_matches('/').to_string()
        } else {
            format!("http://{}", address.trim_end_matches('/'))
        };

        Ok(Self {
            client,
            address: address.to_string(),
            endpoint: format!("{base}{PROCESS_PROPOSAL_PATH}"),
        })
    }
}

#[async_trait]
impl EndorserClient for HttpEndorserClient {
    fn address(&self) -> &str {
        &self.address
    }

    async fn process_proposal(
        &self,
        proposal: &SignedProposal,
    ) -> Result<Option<ProposalResponse>, TransportError> {
        tracing::debug!("Sending proposal to {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, PROTOBUF_CONTENT_TYPE)
            .body(proposal.encode_to_vec())
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                address: self.address.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        if body.is_empty() {
            return Ok(None);
        }

        ProposalResponse::decode(body.as_ref())
            .map(Some)
            .map_err(|source| TransportError::Decode {
                address: self.address.clone(),
                source,
            })
    }
}

fn load_root_cert(path: &Path) -> Result<Certificate, TransportError> {
    let pem = std::fs::read(path).map_err(|source| TransportError::RootCert {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Trusting TLS root certificate {}", path.display());
    Ok(Certificate::from_pem(&pem)?)
}

impl HttpEndorserClient {
    fn classify(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout {
                address: self.address.clone(),
            }
        } else {
            TransportError::Http(err)
        }
    }
}
