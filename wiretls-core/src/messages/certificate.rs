//! TLS 1.2 Certificate message (RFC 5246 Section 7.4.2).

use crate::error::{Error, Result};
use crate::protocol::HandshakeType;
use crate::wire::{Reader, Writer};

/// Certificate message: the sender's DER certificate chain, leaf first.
///
/// ```text
/// struct {
///     ASN.1Cert certificate_list<0..2^24-1>;
/// } Certificate;
/// ```
///
/// An empty chain is valid on the wire; whether it is acceptable is the
/// policy's decision, not this layer's.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Certificate {
    cert_chain: Vec<Vec<u8>>,
}

impl Certificate {
    /// The wire tag of this message.
    pub fn handshake_type(&self) -> HandshakeType {
        HandshakeType::Certificate
    }

    /// Create from a DER chain, leaf first.
    pub fn new(cert_chain: Vec<Vec<u8>>) -> Self {
        Self { cert_chain }
    }

    /// Parse a Certificate body. The slice must be consumed exactly.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(buf);

        let total_len = reader.get_u24()? as usize;
        if total_len != reader.remaining_bytes() {
            return Err(Error::decode("Certificate chain length mismatch"));
        }

        let mut cert_chain = Vec::new();
        while reader.has_remaining() {
            let cert_len = reader.get_u24()? as usize;
            cert_chain.push(reader.get_fixed(cert_len)?);
        }

        Ok(Self { cert_chain })
    }

    /// Serialize the message body.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new();
        writer.length_prefixed(3, |chain| {
            for cert in &self.cert_chain {
                chain.append_length_value(cert, 3)?;
            }
            Ok(())
        })?;
        Ok(writer.into_vec())
    }

    /// The DER certificates, leaf first.
    pub fn cert_chain(&self) -> &[Vec<u8>] {
        &self.cert_chain
    }

    /// The leaf certificate, if any.
    pub fn leaf(&self) -> Option<&[u8]> {
        self.cert_chain.first().map(Vec::as_slice)
    }

    /// Number of certificates in the chain.
    pub fn count(&self) -> usize {
        self.cert_chain.len()
    }

    /// Whether the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.cert_chain.is_empty()
    }
}
