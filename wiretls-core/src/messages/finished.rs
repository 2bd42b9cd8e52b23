//! Finished message (RFC 5246 Section 7.4.9).

use crate::error::{Error, Result};
use crate::protocol::HandshakeType;

/// Verify-data length of the TLS 1.2 PRF.
pub const TLS12_VERIFY_DATA_LEN: usize = 12;

/// Finished: transports the verify-data proving knowledge of the master
/// secret and the handshake transcript.
///
/// The verify-data itself is computed by the handshake state machine;
/// this message only carries it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finished {
    verify_data: Vec<u8>,
}

impl Finished {
    /// The wire tag of this message.
    pub fn handshake_type(&self) -> HandshakeType {
        HandshakeType::Finished
    }

    /// Create from PRF output.
    pub fn new(verify_data: Vec<u8>) -> Result<Self> {
        if verify_data.len() != TLS12_VERIFY_DATA_LEN {
            return Err(Error::InvalidArgument(format!(
                "Finished verify_data must be {} bytes, got {}",
                TLS12_VERIFY_DATA_LEN,
                verify_data.len()
            )));
        }
        Ok(Self { verify_data })
    }

    /// Parse a Finished body. The body is exactly the verify-data.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        if buf.len() != TLS12_VERIFY_DATA_LEN {
            return Err(Error::decode(format!(
                "Finished verify_data must be {} bytes, got {}",
                TLS12_VERIFY_DATA_LEN,
                buf.len()
            )));
        }
        Ok(Self {
            verify_data: buf.to_vec(),
        })
    }

    /// Serialize the message body.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        Ok(self.verify_data.clone())
    }

    /// The transported verify-data.
    pub fn verify_data(&self) -> &[u8] {
        &self.verify_data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let msg = Finished::new(vec![0xAB; 12]).unwrap();
        let bytes = msg.serialize().unwrap();
        let parsed = Finished::decode(&bytes).unwrap();
        assert_eq!(parsed, msg);
        assert_eq!(parsed.verify_data(), &[0xAB; 12]);
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(Finished::decode(&[0xAB; 11]).is_err());
        assert!(Finished::decode(&[0xAB; 13]).is_err());
        assert!(Finished::new(vec![0xAB; 32]).is_err());
    }
}
