//! Package resolution.
//!
//! Turns a validated request into the package that goes into the proposal:
//! opaque bytes for the new lifecycle, or a legacy package message plus its
//! unwrapped deployment spec. At most one file is read.

use std::path::Path;

use ccpeer_core::io::Reader;
use ccpeer_core::package::{self, PackageObject};
use ccpeer_core::{ChaincodeTarget, DeploymentSpecBuilder, ExistenceProbe};
use ccpeer_schema::{ChaincodeName, ChaincodeVersion};

use crate::ops::flow::{PackageSource, ResolvedInstall, ResolvedPackage, ValidatedInstall};
use crate::ops::{Context, InstallError};

impl ValidatedInstall {
    /// Loads, parses or synthesizes the package.
    pub fn resolve(self, ctx: &Context) -> Result<ResolvedInstall, InstallError> {
        let package = match self.source {
            PackageSource::Opaque {
                file,
                name,
                version,
            } => {
                let bytes = read_package(ctx.reader.as_ref(), &file)?;
                tracing::debug!("Read {} byte package from {}", bytes.len(), file.display());
                ResolvedPackage::Opaque {
                    bytes,
                    name,
                    version,
                }
            }
            PackageSource::File {
                file,
                name,
                version,
            } => resolve_file(
                ctx.reader.as_ref(),
                &file,
                name.as_ref(),
                version.as_ref(),
            )?,
            PackageSource::Synthesize(target) => {
                synthesize(ctx.probe.as_ref(), ctx.packager.as_ref(), &target)?
            }
        };

        Ok(ResolvedInstall {
            dialect: self.dialect,
            package,
        })
    }
}

fn read_package(reader: &dyn Reader, file: &Path) -> Result<Vec<u8>, InstallError> {
    reader
        .read_file(file)
        .map_err(|source| InstallError::PackageUnreadable {
            path: file.to_path_buf(),
            source,
        })
}

/// Reads and parses a legacy package file, then checks its embedded identity
/// against whatever the caller supplied.
fn resolve_file(
    reader: &dyn Reader,
    file: &Path,
    name: Option<&ChaincodeName>,
    version: Option<&ChaincodeVersion>,
) -> Result<ResolvedPackage, InstallError> {
    let invalid = |source| InstallError::InvalidPackage {
        path: file.to_path_buf(),
        source,
    };

    let bytes = read_package(reader, file)?;
    let package = PackageObject::parse(&bytes).map_err(invalid)?;
    let descriptor = package.descriptor().map_err(invalid)?;
    let id = package::validated_identity(&descriptor).map_err(invalid)?;

    let embedded_name = ChaincodeName::from(id.name.as_str());
    let embedded_version = ChaincodeVersion::from(id.version.as_str());
    check_identity("name", name.map(ChaincodeName::as_str), &embedded_name)?;
    check_identity("version", version.map(ChaincodeVersion::as_str), &embedded_version)?;

    tracing::debug!(
        "Resolved {} {}:{} from {}",
        package.kind(),
        embedded_name,
        embedded_version,
        file.display()
    );

    Ok(ResolvedPackage::Legacy {
        package,
        descriptor,
        name: embedded_name,
        version: embedded_version,
    })
}

/// Supplied values must equal the embedded ones byte for byte.
fn check_identity(
    field: &'static str,
    supplied: Option<&str>,
    embedded: &str,
) -> Result<(), InstallError> {
    match supplied {
        Some(supplied) if supplied != embedded => Err(InstallError::IdentityMismatch {
            field,
            supplied: supplied.to_string(),
            embedded: embedded.to_string(),
        }),
        _ => Ok(()),
    }
}

fn synthesize(
    probe: &dyn ExistenceProbe,
    packager: &dyn DeploymentSpecBuilder,
    target: &ChaincodeTarget,
) -> Result<ResolvedPackage, InstallError> {
    if probe.exists(&target.name, &target.version) {
        return Err(InstallError::AlreadyInstalled {
            name: target.name.clone(),
            version: target.version.clone(),
        });
    }

    let descriptor = packager.build(target)?;
    tracing::debug!(
        "Packaged {}:{} from {} ({} bytes)",
        target.name,
        target.version,
        target.path,
        descriptor.code_package.len()
    );

    Ok(ResolvedPackage::Legacy {
        package: PackageObject::Descriptor(descriptor.clone()),
        descriptor,
        name: target.name.clone(),
        version: target.version.clone(),
    })
}
