//! ccpeer - chaincode install client
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_panics_doc)]
//!
//! Packages, signs and submits chaincode install proposals to a single peer.
//!
//! # Overview
//!
//! `ccpeer chaincode install` speaks two dialects:
//!
//! - **Legacy**: the package (a deployment spec, or a signed envelope around
//!   one) is sent as the payload of an `install` invocation. Without a package
//!   file the deployment spec is synthesized from a source path.
//! - **Lifecycle** (`--new-lifecycle`): the package file bytes are forwarded
//!   untouched to `_lifecycle.InstallChaincode`, which answers with the
//!   package hash.
//!
//! # Architecture
//!
//! - **Typestate Pattern**: the workflow moves `InstallInput` →
//!   `ValidatedInstall` → `ResolvedInstall` → `BuiltInstall` →
//!   `SubmittedInstall`, so stages cannot run out of order.
//! - **Injected collaborators**: signer, reader, endorser, packager and probe
//!   are trait objects held by `ops::Context`.
//!
//! # Configuration
//!
//! ```text
//! ~/.ccpeer/
//! └── config.toml   # peer address, timeout, MSP id, key file
//! ```

pub mod cmd;
pub mod ops;
pub mod ui;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ccpeer")]
#[command(author, version, about = "ccpeer - install chaincode on a peer")]
pub struct Cli {
    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Chaincode operations
    Chaincode {
        #[command(subcommand)]
        command: ChaincodeCommands,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum ChaincodeCommands {
    /// Install a chaincode package on a peer
    Install(InstallArgs),
}

#[derive(Debug, Args)]
pub struct InstallArgs {
    /// Package file produced by `package` (required with --new-lifecycle)
    pub package_file: Option<PathBuf>,

    /// Name of the chaincode
    #[arg(short = 'n', long = "name")]
    pub name: Option<String>,

    /// Version of the chaincode
    #[arg(short = 'v', long = "version")]
    pub version: Option<String>,

    /// Path to the chaincode source (legacy install without a package file)
    #[arg(short = 'p', long = "path")]
    pub path: Option<String>,

    /// Language the chaincode is written in
    #[arg(short = 'l', long = "lang", default_value = "golang")]
    pub lang: String,

    /// Constructor message in JSON, e.g. '{"Args":["init","a","100"]}'
    #[arg(short = 'c', long = "ctor")]
    pub ctor: Option<String>,

    /// Install through the new chaincode lifecycle
    #[arg(long)]
    pub new_lifecycle: bool,

    #[command(flatten)]
    pub peer: PeerArgs,
}

#[derive(Debug, Args)]
pub struct PeerArgs {
    /// Address of the endorsing peer
    #[arg(long, env = "CCPEER_PEER_ADDRESS")]
    pub peer_address: Option<String>,

    /// MSP id of the signing identity
    #[arg(long, env = "CCPEER_MSP_ID")]
    pub msp_id: Option<String>,

    /// File holding the base64 ed25519 signing key
    #[arg(long, env = "CCPEER_KEY_FILE")]
    pub key_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// PEM root certificate trusted for an https:// peer (repeatable)
    #[arg(long = "tls-root-cert-file", value_name = "PEM")]
    pub tls_root_cert_files: Vec<PathBuf>,
}
