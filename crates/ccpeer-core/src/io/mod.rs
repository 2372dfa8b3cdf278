//! IO modules - side effects (network, filesystem)

pub mod endorser;
pub mod reader;

pub use endorser::{EndorserClient, HttpEndorserClient, TransportError};
pub use reader::{FilesystemReader, Reader};
