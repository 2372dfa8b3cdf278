//! Install Flow Typestate Pattern
//!
//! Models the install pipeline as a series of explicit state transitions:
//!
//! ```text
//! InstallInput --[validate()]--> ValidatedInstall --[resolve()]--> ResolvedInstall
//!     --[build()]--> BuiltInstall --[submit()]--> SubmittedInstall --[finish()]--> InstallReceipt
//! ```
//!
//! Each transition consumes the previous state, so a proposal cannot be built
//! from an unresolved package and nothing is sent before it is signed. The
//! dialect is fixed by `validate()`; later stages branch on it once.
//!
//! # Usage
//!
//! ```ignore
//! let validated = InstallInput::new(Dialect::Lifecycle)
//!     .name("mycc")
//!     .version("1.0")
//!     .package_file("mycc.tar.gz")
//!     .validate()?;
//! let resolved = validated.resolve(&ctx)?;
//! let built = resolved.build(ctx.signer.as_ref())?;
//! let receipt = built.submit(&ctx).await?.finish()?;
//! ```

use std::fmt;
use std::path::PathBuf;

use ccpeer_core::ChaincodeTarget;
use ccpeer_core::package::PackageObject;
use ccpeer_schema::peer::{ChaincodeDeploymentSpec, ChaincodeId, Proposal, Response};
use ccpeer_schema::{ChaincodeName, ChaincodeVersion};

use crate::ops::InstallError;

/// Request/response shape used to talk to the peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `install` invocation carrying a deployment spec or signed package.
    Legacy,
    /// `_lifecycle.InstallChaincode` carrying opaque package bytes.
    Lifecycle,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => f.write_str("legacy"),
            Self::Lifecycle => f.write_str("lifecycle"),
        }
    }
}

/// Language assumed when the caller does not name one.
pub const DEFAULT_LANGUAGE: &str = "golang";

/// What the caller asked for. Empty strings count as "not supplied".
#[derive(Debug, Clone)]
pub struct InstallInput {
    pub dialect: Dialect,
    pub name: Option<ChaincodeName>,
    pub version: Option<ChaincodeVersion>,
    pub language: String,
    pub package_file: Option<PathBuf>,
    pub path: Option<String>,
    pub constructor: Option<String>,
}

impl InstallInput {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            name: None,
            version: None,
            language: DEFAULT_LANGUAGE.to_string(),
            package_file: None,
            path: None,
            constructor: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = non_empty(name.into()).map(ChaincodeName::from);
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = non_empty(version.into()).map(ChaincodeVersion::from);
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = non_empty(language.into()).unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
        self
    }

    pub fn package_file(mut self, file: impl Into<PathBuf>) -> Self {
        let file = file.into();
        self.package_file = (!file.as_os_str().is_empty()).then_some(file);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = non_empty(path.into());
        self
    }

    pub fn constructor(mut self, ctor: impl Into<String>) -> Self {
        self.constructor = non_empty(ctor.into());
        self
    }
}

fn non_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}

/// Where the package comes from, decided by validation.
#[derive(Debug, Clone)]
pub enum PackageSource {
    /// Lifecycle: file bytes are forwarded untouched under the given identity.
    Opaque {
        file: PathBuf,
        name: ChaincodeName,
        version: ChaincodeVersion,
    },
    /// Legacy: a package file whose embedded identity must match any supplied one.
    File {
        file: PathBuf,
        name: Option<ChaincodeName>,
        version: Option<ChaincodeVersion>,
    },
    /// Legacy: a deployment spec synthesized from source.
    Synthesize(ChaincodeTarget),
}

/// State 1: input that satisfies its dialect's preconditions.
///
/// # Transitions
///
/// - [`resolve()`](Self::resolve) -> [`ResolvedInstall`]
#[derive(Debug, Clone)]
pub struct ValidatedInstall {
    pub dialect: Dialect,
    pub source: PackageSource,
}

/// The package ready to be placed in a proposal.
#[derive(Debug, Clone)]
pub enum ResolvedPackage {
    /// Lifecycle package bytes plus the identity they are installed under.
    Opaque {
        bytes: Vec<u8>,
        name: ChaincodeName,
        version: ChaincodeVersion,
    },
    /// Legacy package message, its unwrapped deployment spec and embedded identity.
    Legacy {
        package: PackageObject,
        descriptor: ChaincodeDeploymentSpec,
        name: ChaincodeName,
        version: ChaincodeVersion,
    },
}

impl ResolvedPackage {
    pub fn name(&self) -> &ChaincodeName {
        match self {
            Self::Opaque { name, .. } | Self::Legacy { name, .. } => name,
        }
    }

    pub fn version(&self) -> &ChaincodeVersion {
        match self {
            Self::Opaque { version, .. } | Self::Legacy { version, .. } => version,
        }
    }
}

/// State 2: the package and the identity it will be installed under.
///
/// # Transitions
///
/// - [`build()`](Self::build) -> [`BuiltInstall`]
#[derive(Debug, Clone)]
pub struct ResolvedInstall {
    pub dialect: Dialect,
    pub package: ResolvedPackage,
}

/// Unsigned proposal and what it is addressed to.
#[derive(Debug, Clone)]
pub struct RequestEnvelope {
    pub dialect: Dialect,
    /// `_lifecycle` for Lifecycle, the chaincode itself for Legacy.
    pub target: ChaincodeId,
    pub tx_id: String,
    pub proposal: Proposal,
}

/// State 3: an unsigned proposal.
///
/// # Transitions
///
/// - [`submit()`](Self::submit) -> [`SubmittedInstall`]
#[derive(Debug, Clone)]
pub struct BuiltInstall {
    pub request: RequestEnvelope,
    pub name: ChaincodeName,
    pub version: ChaincodeVersion,
}

/// State 4: the peer accepted the proposal.
///
/// # Transitions
///
/// - [`finish()`](Self::finish) -> [`crate::ops::InstallReceipt`]
#[derive(Debug, Clone)]
pub struct SubmittedInstall {
    pub request: RequestEnvelope,
    pub name: ChaincodeName,
    pub version: ChaincodeVersion,
    /// The peer's verdict, status already checked.
    pub verdict: Response,
}

impl InstallInput {
    /// Checks dialect preconditions. Performs no I/O.
    pub fn validate(self) -> Result<ValidatedInstall, InstallError> {
        let source = match self.dialect {
            Dialect::Lifecycle => {
                Self::validate_lifecycle(self.package_file, self.path, self.name, self.version)?
            }
            Dialect::Legacy => match self.package_file {
                Some(file) => {
                    if let Some(path) = &self.path {
                        tracing::warn!(
                            "Ignoring path {path}: installing from package file {}",
                            file.display()
                        );
                    }
                    PackageSource::File {
                        file,
                        name: self.name,
                        version: self.version,
                    }
                }
                None => PackageSource::Synthesize(ChaincodeTarget {
                    name: self.name.ok_or(InstallError::MissingParameter("chaincode name"))?,
                    version: self
                        .version
                        .ok_or(InstallError::MissingParameter("chaincode version"))?,
                    path: self.path.ok_or(InstallError::MissingParameter("chaincode path"))?,
                    language: self.language,
                    constructor: self.constructor,
                }),
            },
        };

        Ok(ValidatedInstall {
            dialect: self.dialect,
            source,
        })
    }

    fn validate_lifecycle(
        package_file: Option<PathBuf>,
        path: Option<String>,
        name: Option<ChaincodeName>,
        version: Option<ChaincodeVersion>,
    ) -> Result<PackageSource, InstallError> {
        if path.is_some() {
            return Err(InstallError::InvalidInput(
                "chaincode path is not used by the new lifecycle".to_string(),
            ));
        }
        let file = package_file.ok_or_else(|| {
            InstallError::InvalidInput("a package file is required by the new lifecycle".to_string())
        })?;
        let name = name.ok_or_else(|| {
            InstallError::InvalidInput("chaincode name is required by the new lifecycle".to_string())
        })?;
        let version = version.ok_or_else(|| {
            InstallError::InvalidInput("chaincode version is required by the new lifecycle".to_string())
        })?;

        Ok(PackageSource::Opaque { file, name, version })
    }
}
