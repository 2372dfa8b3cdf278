//! Integration tests for the ccpeer CLI.

use ccpeer_schema::lifecycle::InstallChaincodeResult;
use ccpeer_schema::peer::{
    ChaincodeDeploymentSpec, ChaincodeId, ChaincodeSpec, ProposalResponse, Response,
};
use prost::Message;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// base64 of a fixed 32-byte ed25519 secret
const TEST_KEY: &str = "BwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwc=";

/// Test context with an isolated ccpeer home and a signing key on disk
struct TestContext {
    temp_dir: TempDir,
    ccpeer_home: PathBuf,
    key_file: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let ccpeer_home = temp_dir.path().join(".ccpeer");
        std::fs::create_dir_all(&ccpeer_home).expect("failed to create ccpeer home");

        let key_file = temp_dir.path().join("signer.key");
        std::fs::write(&key_file, TEST_KEY).expect("failed to write key");

        Self {
            temp_dir,
            ccpeer_home,
            key_file,
        }
    }

    fn ccpeer_cmd(&self) -> Command {
        let bin_path = env!("CARGO_BIN_EXE_ccpeer");
        let mut cmd = Command::new(bin_path);
        cmd.env("HOME", self.temp_dir.path());
        cmd.env("CCPEER_HOME", &self.ccpeer_home);
        cmd.env("CORE_PEER_FILESYSTEMPATH", self.temp_dir.path().join("peer"));
        cmd.env_remove("CCPEER_PEER_ADDRESS");
        cmd.env_remove("CCPEER_MSP_ID");
        cmd.env_remove("CCPEER_KEY_FILE");
        cmd
    }

    fn install_cmd(&self, peer: &str) -> Command {
        let mut cmd = self.ccpeer_cmd();
        cmd.args(["chaincode", "install"])
            .args(["--peer-address", peer])
            .args(["--msp-id", "Org1MSP"])
            .arg("--key-file")
            .arg(&self.key_file)
            .args(["--timeout", "5"]);
        cmd
    }

    fn write(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, bytes).expect("failed to write file");
        path
    }
}

fn descriptor(name: &str, version: &str) -> Vec<u8> {
    ChaincodeDeploymentSpec {
        chaincode_spec: Some(ChaincodeSpec {
            r#type: 1,
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
    .encode_to_vec()
}

#[test]
fn test_help_command() {
    let ctx = TestContext::new();
    let output = ctx
        .ccpeer_cmd()
        .arg("--help")
        .output()
        .expect("failed to run ccpeer");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
}

#[test]
fn test_version_command() {
    let ctx = TestContext::new();
    let output = ctx
        .ccpeer_cmd()
        .arg("--version")
        .output()
        .expect("failed to run ccpeer");
    assert!(output.status.success());
}

#[test]
fn test_install_help_lists_flags() {
    let ctx = TestContext::new();
    let output = ctx
        .ccpeer_cmd()
        .args(["chaincode", "install", "--help"])
        .output()
        .expect("failed to run ccpeer");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--name", "--version", "--path", "--lang", "--ctor", "--new-lifecycle"] {
        assert!(stdout.contains(flag), "missing {flag} in help");
    }
}

#[test]
fn test_completions_command() {
    let ctx = TestContext::new();
    let output = ctx
        .ccpeer_cmd()
        .args(["completions", "bash"])
        .output()
        .expect("failed to run ccpeer");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("ccpeer"));
}

#[test]
fn test_lifecycle_without_package_file_fails() {
    let ctx = TestContext::new();
    let output = ctx
        .install_cmd("127.0.0.1:1")
        .args(["--new-lifecycle", "-n", "mycc", "-v", "1.0"])
        .output()
        .expect("failed to run ccpeer");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("package file is required"), "stderr: {stderr}");
}

#[test]
fn test_legacy_identity_mismatch_fails_before_network() {
    let ctx = TestContext::new();
    let pkg = ctx.write("pkg.bin", &descriptor("mycc", "1.0"));
    let output = ctx
        .install_cmd("127.0.0.1:1")
        .arg(&pkg)
        .args(["-n", "othercc", "-v", "1.0"])
        .output()
        .expect("failed to run ccpeer");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not match"), "stderr: {stderr}");
}

#[test]
fn test_lifecycle_install_against_mock_peer() {
    let ctx = TestContext::new();
    let pkg = ctx.write("mycc.tar.gz", b"opaque package");

    let mut server = mockito::Server::new();
    let body = ProposalResponse {
        response: Some(Response {
            status: 200,
            message: String::new(),
            payload: InstallChaincodeResult {
                hash: vec![0xde, 0xad, 0xbe, 0xef],
            }
            .encode_to_vec(),
        }),
        ..ProposalResponse::default()
    }
    .encode_to_vec();
    let mock = server
        .mock("POST", "/protos.Endorser/ProcessProposal")
        .with_status(200)
        .with_body(body)
        .create();

    let output = ctx
        .install_cmd(&server.url())
        .arg(&pkg)
        .args(["--new-lifecycle", "-n", "mycc", "-v", "1.0"])
        .output()
        .expect("failed to run ccpeer");

    mock.assert();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("mycc:1.0"));
    assert!(stdout.contains("deadbeef"));
}

#[test]
fn test_rejected_install_reports_peer_message() {
    let ctx = TestContext::new();
    let pkg = ctx.write("mycc.tar.gz", b"opaque package");

    let mut server = mockito::Server::new();
    let body = ProposalResponse {
        response: Some(Response {
            status: 500,
            message: "chaincode already successfully installed".to_string(),
            payload: Vec::new(),
        }),
        ..ProposalResponse::default()
    }
    .encode_to_vec();
    let _mock = server
        .mock("POST", "/protos.Endorser/ProcessProposal")
        .with_status(200)
        .with_body(body)
        .create();

    let output = ctx
        .install_cmd(&server.url())
        .arg(&pkg)
        .args(["--new-lifecycle", "-n", "mycc", "-v", "1.0"])
        .output()
        .expect("failed to run ccpeer");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("already successfully installed"), "stderr: {stderr}");
}

#[test]
fn test_quiet_install_prints_nothing() {
    let ctx = TestContext::new();
    let pkg = ctx.write("mycc.tar.gz", b"opaque package");

    let mut server = mockito::Server::new();
    let body = ProposalResponse {
        response: Some(Response {
            status: 200,
            message: String::new(),
            payload: InstallChaincodeResult { hash: vec![0x01] }.encode_to_vec(),
        }),
        ..ProposalResponse::default()
    }
    .encode_to_vec();
    let _mock = server
        .mock("POST", "/protos.Endorser/ProcessProposal")
        .with_status(200)
        .with_body(body)
        .create();

    let output = ctx
        .install_cmd(&server.url())
        .arg("--quiet")
        .arg(&pkg)
        .args(["--new-lifecycle", "-n", "mycc", "-v", "1.0"])
        .output()
        .expect("failed to run ccpeer");

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_missing_tls_root_cert_fails_before_network() {
    let ctx = TestContext::new();
    let pkg = ctx.write("mycc.tar.gz", b"opaque package");
    let output = ctx
        .install_cmd("https://127.0.0.1:1")
        .arg("--tls-root-cert-file")
        .arg(ctx.temp_dir.path().join("missing-ca.pem"))
        .arg(&pkg)
        .args(["--new-lifecycle", "-n", "mycc", "-v", "1.0"])
        .output()
        .expect("failed to run ccpeer");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("TLS root certificate"), "stderr: {stderr}");
}
