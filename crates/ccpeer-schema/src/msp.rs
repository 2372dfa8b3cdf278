//! Membership service provider identity encoding.

/// Identity as carried in proposal headers: the owning MSP plus its key material.
#[derive(Clone, PartialEq, Eq, prost::Message)]
pub struct SerializedIdentity {
    /// Membership service provider id.
    #[prost(string, tag = "1")]
    pub mspid: String,
    /// Certificate or public key bytes.
    #[prost(bytes = "vec", tag = "2")]
    pub id_bytes: Vec<u8>,
}
