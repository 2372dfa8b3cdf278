//! Synthesizing a deployment spec from a chaincode source tree.
//!
//! The code package is a gzipped tar. Go sources are stored under
//! `src/<import path>/` so the peer can rebuild them in a GOPATH layout;
//! other languages are stored under `src/`. Entries are written in file-name
//! order with deterministic headers, so the same tree always yields the same
//! bytes.

use ccpeer_schema::peer::{
    ChaincodeDeploymentSpec, ChaincodeId, ChaincodeInput, ChaincodeSpec, ChaincodeType,
};
use ccpeer_schema::{ChaincodeName, ChaincodeVersion};
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum PackagingError {
    #[error("Chaincode source not found at {0}")]
    SourceNotFound(PathBuf),

    #[error("Unsupported chaincode language: {0}")]
    UnsupportedLanguage(String),

    #[error("Invalid constructor message: {0}")]
    InvalidConstructor(#[from] serde_json::Error),

    #[error("Failed to archive chaincode source: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything needed to synthesize a deployment spec.
#[derive(Debug, Clone)]
pub struct ChaincodeTarget {
    pub name: ChaincodeName,
    pub version: ChaincodeVersion,
    /// Source location: an import path under the source root, or a directory.
    pub path: String,
    /// Advisory language name, e.g. `golang`.
    pub language: String,
    /// Optional `{"Args": [...]}` constructor message.
    pub constructor: Option<String>,
}

/// Builds a fresh deployment spec for a target.
pub trait DeploymentSpecBuilder: Send + Sync {
    fn build(&self, target: &ChaincodeTarget) -> Result<ChaincodeDeploymentSpec, PackagingError>;
}

/// [`DeploymentSpecBuilder`] that archives a source directory on disk.
#[derive(Debug, Clone)]
pub struct SourcePackager {
    source_root: PathBuf,
}

impl SourcePackager {
    /// Relative target paths are looked up under `source_root`.
    pub fn new(source_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
        }
    }

    /// Packager rooted at `$GOPATH/src`, or the current directory without a GOPATH.
    pub fn from_env() -> Self {
        match std::env::var_os("GOPATH") {
            Some(gopath) => Self::new(PathBuf::from(gopath).join("src")),
            None => Self::new("."),
        }
    }

    fn source_dir(&self, path: &str) -> PathBuf {
        let candidate = Path::new(path);
        if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.source_root.join(candidate)
        }
    }
}

impl DeploymentSpecBuilder for SourcePackager {
    fn build(&self, target: &ChaincodeTarget) -> Result<ChaincodeDeploymentSpec, PackagingError> {
        let lang = ChaincodeType::from_language(&target.language)
            .ok_or_else(|| PackagingError::UnsupportedLanguage(target.language.clone()))?;
        let input = parse_constructor(target.constructor.as_deref())?;

        let dir = self.source_dir(&target.path);
        if !dir.is_dir() {
            return Err(PackagingError::SourceNotFound(dir));
        }

        let prefix = match lang {
            ChaincodeType::Golang => Path::new("src").join(target.path.trim_start_matches('/')),
            _ => PathBuf::from("src"),
        };

        tracing::debug!("Packaging {} as {}", dir.display(), prefix.display());
        let code_package = archive_dir(&dir, &prefix)?;

        Ok(ChaincodeDeploymentSpec {
            chaincode_spec: Some(ChaincodeSpec {
                r#type: lang as i32,
                chaincode_id: Some(ChaincodeId {
                    path: target.path.clone(),
                    name: target.name.to_string(),
                    version: target.version.to_string(),
                }),
                input: Some(input),
                timeout: 0,
            }),
            code_package,
        })
    }
}

#[derive(Deserialize)]
struct ConstructorMessage {
    #[serde(rename = "Args", default)]
    args: Vec<String>,
}

/// Parse a `{"Args": [...]}` constructor message. `None` yields empty input.
///
/// # Errors
///
/// Returns an error if the message is not valid JSON of that shape.
pub fn parse_constructor(ctor: Option<&str>) -> Result<ChaincodeInput, PackagingError> {
    let Some(ctor) = ctor.filter(|c| !c.trim().is_empty()) else {
        return Ok(ChaincodeInput::default());
    };

    let msg: ConstructorMessage = serde_json::from_str(ctor)?;
    Ok(ChaincodeInput {
        args: msg.args.into_iter().map(String::into_bytes).collect(),
        is_init: false,
    })
}

/// Gzipped tar of every file under `dir`, stored below `prefix`.
///
/// Symlinks are skipped rather than followed.
fn archive_dir(dir: &Path, prefix: &Path) -> Result<Vec<u8>, PackagingError> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder.mode(tar::HeaderMode::Deterministic);
    builder.follow_symlinks(false);

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(dir)
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        builder.append_path_with_name(entry.path(), prefix.join(rel))?;
    }

    let encoder = builder.into_inner()?;
    Ok(encoder.finish()?)
}
