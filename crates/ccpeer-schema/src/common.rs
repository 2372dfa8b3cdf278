//! Envelope and header messages shared by every ledger transaction type.

/// Seconds and nanoseconds since the Unix epoch (`google.protobuf.Timestamp`).
#[derive(Clone, Copy, PartialEq, Eq, prost::Message)]
pub struct Timestamp {
    /// Whole seconds.
    #[prost(int64, tag = "1")]
    pub seconds: i64,
    /// Sub-second nanoseconds.
    #[prost(int32, tag = "2")]
    pub nanos: i32,
}

/// Kind of payload carried by an [`Envelope`] or proposal header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum HeaderType {
    /// Unspecified or opaque message.
    Message = 0,
    /// Channel configuration.
    Config = 1,
    /// Channel configuration update.
    ConfigUpdate = 2,
    /// Proposal sent to an endorser.
    EndorserTransaction = 3,
    /// Transaction for the ordering service.
    OrdererTransaction = 4,
    /// Deliver request.
    DeliverSeekInfo = 5,
    /// Signed chaincode package.
    ChaincodePackage = 6,
}

/// Header fields common to all transactions on a channel.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ChannelHeader {
    /// One of [`HeaderType`].
    #[prost(int32, tag = "1")]
    pub r#type: i32,
    /// Message protocol version.
    #[prost(int32, tag = "2")]
    pub version: i32,
    /// Creation time at the sender.
    #[prost(message, optional, tag = "3")]
    pub timestamp: Option<Timestamp>,
    /// Target channel; empty for peer-local operations such as install.
    #[prost(string, tag = "4")]
    pub channel_id: String,
    /// Transaction id, `hex(sha256(nonce || creator))`.
    #[prost(string, tag = "5")]
    pub tx_id: String,
    /// Epoch the transaction belongs to.
    #[prost(uint64, tag = "6")]
    pub epoch: u64,
    /// Type-specific extension (a chaincode header extension for proposals).
    #[prost(bytes = "vec", tag = "7")]
    pub extension: Vec<u8>,
    /// Hash of the client TLS certificate, when mutual TLS is used.
    #[prost(bytes = "vec", tag = "8")]
    pub tls_cert_hash: Vec<u8>,
}

/// Identity of the message creator plus a replay-protection nonce.
#[derive(Clone, PartialEq, prost::Message)]
pub struct SignatureHeader {
    /// Serialized identity of the creator.
    #[prost(bytes = "vec", tag = "1")]
    pub creator: Vec<u8>,
    /// Random nonce, never reused.
    #[prost(bytes = "vec", tag = "2")]
    pub nonce: Vec<u8>,
}

/// Encoded channel and signature headers.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Header {
    /// Encoded [`ChannelHeader`].
    #[prost(bytes = "vec", tag = "1")]
    pub channel_header: Vec<u8>,
    /// Encoded [`SignatureHeader`].
    #[prost(bytes = "vec", tag = "2")]
    pub signature_header: Vec<u8>,
}

/// Header plus type-specific data, signed inside an [`Envelope`].
#[derive(Clone, PartialEq, prost::Message)]
pub struct Payload {
    /// Routing and creator information.
    #[prost(message, optional, tag = "1")]
    pub header: Option<Header>,
    /// Data whose type is given by the channel header.
    #[prost(bytes = "vec", tag = "2")]
    pub data: Vec<u8>,
}

/// Signed [`Payload`].
#[derive(Clone, PartialEq, prost::Message)]
pub struct Envelope {
    /// Encoded [`Payload`].
    #[prost(bytes = "vec", tag = "1")]
    pub payload: Vec<u8>,
    /// Creator's signature over `payload`.
    #[prost(bytes = "vec", tag = "2")]
    pub signature: Vec<u8>,
}
