//! Chaincode install command

use std::sync::Arc;

use anyhow::{Context as _, Result};
use ccpeer_core::io::{FilesystemReader, HttpEndorserClient};
use ccpeer_core::{Ed25519Signer, InstallDirProbe, PeerConfig, SourcePackager};

use crate::InstallArgs;
use crate::ops::{self, Context, Dialect, InstallInput};
use crate::ui::Output;

/// Install a chaincode on the configured peer (CLI Entry Point)
pub async fn install(args: InstallArgs, quiet: bool) -> Result<()> {
    let output = Output::quiet(quiet);

    let config = PeerConfig::load_default()
        .await
        .context("Failed to load peer configuration")?
        .with_overrides(
            args.peer.peer_address,
            args.peer.msp_id,
            args.peer.key_file,
            args.peer.timeout,
            args.peer.tls_root_cert_files,
        );

    let dialect = if args.new_lifecycle {
        Dialect::Lifecycle
    } else {
        Dialect::Legacy
    };
    let mut input = InstallInput::new(dialect).language(args.lang);
    if let Some(file) = args.package_file {
        input = input.package_file(file);
    }
    if let Some(name) = args.name {
        input = input.name(name);
    }
    if let Some(version) = args.version {
        input = input.version(version);
    }
    if let Some(path) = args.path {
        input = input.path(path);
    }
    if let Some(ctor) = args.ctor {
        input = input.constructor(ctor);
    }

    let ctx = build_context(&config)?;
    output.info(&format!("Installing chaincode on {}", ctx.endorser.address()));

    let receipt = ops::install(&ctx, input)
        .await
        .context("Chaincode install failed")?;

    output.success(&format!(
        "Installed {}:{} ({})",
        receipt.name, receipt.version, receipt.dialect
    ));
    output.detail("txid", &receipt.tx_id);
    if let Some(hash) = &receipt.package_hash {
        output.detail("hash", &hash.to_hex());
    }
    Ok(())
}

/// Production collaborators, configured from `config`.
fn build_context(config: &PeerConfig) -> Result<Context> {
    let key_file = config.key_file()?;
    let signer = Ed25519Signer::from_key_file(config.msp_id()?, key_file)
        .with_context(|| format!("Failed to load signing identity from {}", key_file.display()))?;
    let endorser = HttpEndorserClient::new(
        config.peer_address()?,
        config.timeout(),
        config.tls_root_cert_files(),
    )?;

    Ok(Context::new(
        Arc::new(signer),
        Arc::new(FilesystemReader),
        Arc::new(endorser),
        Arc::new(SourcePackager::from_env()),
        Arc::new(InstallDirProbe::from_env()),
    ))
}
