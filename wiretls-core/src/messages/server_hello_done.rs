//! ServerHelloDone message (RFC 5246 Section 7.4.5).

use crate::error::{Error, Result};
use crate::protocol::HandshakeType;

/// ServerHelloDone: the server has finished its half of the exchange.
/// Empty body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServerHelloDone;

impl ServerHelloDone {
    /// The wire tag of this message.
    pub fn handshake_type(&self) -> HandshakeType {
        HandshakeType::ServerHelloDone
    }

    /// Parse a ServerHelloDone body, which must be empty.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        if !buf.is_empty() {
            return Err(Error::decode("ServerHelloDone with a non-empty body"));
        }
        Ok(Self)
    }

    /// Serialize the (empty) message body.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body() {
        assert!(ServerHelloDone::decode(&[]).is_ok());
        assert!(ServerHelloDone::decode(&[0x01]).is_err());
    }
}
