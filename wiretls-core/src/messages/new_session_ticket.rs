//! NewSessionTicket message (RFC 5077 Section 3.3).

use crate::error::{Error, Result};
use crate::protocol::HandshakeType;
use crate::wire::{Reader, Writer};

/// NewSessionTicket: a server-issued resumption ticket.
///
/// ```text
/// struct {
///     uint32 ticket_lifetime_hint;
///     opaque ticket<0..2^16-1>;
/// } NewSessionTicket;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSessionTicket {
    lifetime_hint: u32,
    ticket: Vec<u8>,
}

impl NewSessionTicket {
    /// The wire tag of this message.
    pub fn handshake_type(&self) -> HandshakeType {
        HandshakeType::NewSessionTicket
    }

    /// Create a ticket with the given lifetime hint in seconds.
    pub fn new(lifetime_hint: u32, ticket: Vec<u8>) -> Self {
        Self {
            lifetime_hint,
            ticket,
        }
    }

    /// Parse a NewSessionTicket body. The slice must be consumed exactly.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(buf);

        let lifetime_hint = reader.get_u32()?;
        let ticket = reader.get_range_u8(2, 0, 65535)?;

        if reader.has_remaining() {
            return Err(Error::decode("Trailing bytes after NewSessionTicket"));
        }

        Ok(Self {
            lifetime_hint,
            ticket,
        })
    }

    /// Serialize the message body.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new();
        writer.put_u32(self.lifetime_hint);
        writer.append_length_value(&self.ticket, 2)?;
        Ok(writer.into_vec())
    }

    /// Suggested ticket lifetime in seconds.
    pub fn ticket_lifetime_hint(&self) -> u32 {
        self.lifetime_hint
    }

    /// The opaque ticket.
    pub fn ticket(&self) -> &[u8] {
        &self.ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let msg = NewSessionTicket::new(7200, vec![0xAA, 0xBB, 0xCC]);
        let bytes = msg.serialize().unwrap();
        assert_eq!(&bytes[..4], &7200u32.to_be_bytes());

        let parsed = NewSessionTicket::decode(&bytes).unwrap();
        assert_eq!(parsed, msg);
        assert_eq!(parsed.ticket_lifetime_hint(), 7200);
        assert_eq!(parsed.ticket(), &[0xAA, 0xBB, 0xCC]);
    }

    #[test]
    fn test_truncated_rejected() {
        assert!(NewSessionTicket::decode(&[0x00, 0x00]).is_err());
        assert!(NewSessionTicket::decode(&[0x00, 0x00, 0x1C, 0x20, 0x00, 0x05, 0xAA]).is_err());
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = NewSessionTicket::new(60, vec![]).serialize().unwrap();
        bytes.push(0);
        assert!(NewSessionTicket::decode(&bytes).is_err());
    }
}
