//! Arguments and results of the `_lifecycle` install function.

/// Arguments of `_lifecycle.InstallChaincode`.
#[derive(Clone, PartialEq, Eq, prost::Message)]
pub struct InstallChaincodeArgs {
    /// Chaincode name.
    #[prost(string, tag = "1")]
    pub name: String,
    /// Chaincode version.
    #[prost(string, tag = "2")]
    pub version: String,
    /// Package file contents, passed through untouched.
    #[prost(bytes = "vec", tag = "3")]
    pub chaincode_install_package: Vec<u8>,
}

/// Result of `_lifecycle.InstallChaincode`.
#[derive(Clone, PartialEq, Eq, prost::Message)]
pub struct InstallChaincodeResult {
    /// Fingerprint of the installed package.
    #[prost(bytes = "vec", tag = "1")]
    pub hash: Vec<u8>,
}
