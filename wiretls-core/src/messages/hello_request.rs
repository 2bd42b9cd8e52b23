//! HelloRequest message (RFC 5246 Section 7.4.1.1).

use crate::error::{Error, Result};
use crate::protocol::HandshakeType;

/// HelloRequest: the server asking the client to renegotiate. Empty body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HelloRequest;

impl HelloRequest {
    /// The wire tag of this message.
    pub fn handshake_type(&self) -> HandshakeType {
        HandshakeType::HelloRequest
    }

    /// Parse a HelloRequest body, which must be empty.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        if !buf.is_empty() {
            return Err(Error::decode("HelloRequest with a non-empty body"));
        }
        Ok(Self)
    }

    /// Serialize the (empty) message body.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }
}
