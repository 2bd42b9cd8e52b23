//! TLS 1.2 handshake messages.
//!
//! One module per message type, a tagged [`HandshakeMessage`] over the
//! closed set, and the handshake header framing for stream and datagram
//! transports.

pub mod certificate;
pub mod certificate_request;
pub mod certificate_verify;
pub mod change_cipher_spec;
pub mod client_hello;
pub mod client_key_exchange;
pub mod finished;
pub mod hello_request;
pub mod hello_verify_request;
pub mod new_session_ticket;
pub mod server_hello;
pub mod server_hello_done;
pub mod server_key_exchange;

// Re-exports
pub use certificate::Certificate;
pub use certificate_request::{CertificateRequest, ClientCertType};
pub use certificate_verify::CertificateVerify;
pub use change_cipher_spec::ChangeCipherSpec;
pub use client_hello::{ClientHello, ClientHelloSettings};
pub use client_key_exchange::ClientKeyExchange;
pub use finished::{Finished, TLS12_VERIFY_DATA_LEN};
pub use hello_request::HelloRequest;
pub use hello_verify_request::{compute_hello_verify_cookie, HelloVerifyRequest};
pub use new_session_ticket::NewSessionTicket;
pub use server_hello::{ServerHello, ServerHelloSettings};
pub use server_hello_done::ServerHelloDone;
pub use server_key_exchange::{encode_dh_params, encode_ecdh_params, ServerKeyExchange};

use crate::algos::{AuthMethod, KexAlgo};
use crate::error::{Error, Result};
use crate::protocol::HandshakeType;
use crate::wire::{Reader, Writer};

/// Negotiation state a body parse may depend on.
///
/// The key-exchange messages change wire shape with the negotiated
/// suite; everything else parses context-free.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageContext {
    /// Key exchange of the negotiated suite, once known.
    pub kex_algo: Option<KexAlgo>,
    /// Authentication method of the negotiated suite, once known.
    pub auth_method: Option<AuthMethod>,
}

impl MessageContext {
    /// Context for the stage before a suite is negotiated.
    pub fn pre_negotiation() -> Self {
        Self::default()
    }

    /// Context carrying the negotiated suite's parameters.
    pub fn for_suite(kex_algo: KexAlgo, auth_method: AuthMethod) -> Self {
        Self {
            kex_algo: Some(kex_algo),
            auth_method: Some(auth_method),
        }
    }
}

/// A parsed handshake message: one variant per wire tag plus the
/// ChangeCipherSpec pseudo-message.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::large_enum_variant)]
pub enum HandshakeMessage {
    /// HelloRequest (0)
    HelloRequest(HelloRequest),
    /// ClientHello (1)
    ClientHello(ClientHello),
    /// ServerHello (2)
    ServerHello(ServerHello),
    /// HelloVerifyRequest (3)
    HelloVerifyRequest(HelloVerifyRequest),
    /// NewSessionTicket (4)
    NewSessionTicket(NewSessionTicket),
    /// Certificate (11)
    Certificate(Certificate),
    /// ServerKeyExchange (12)
    ServerKeyExchange(ServerKeyExchange),
    /// CertificateRequest (13)
    CertificateRequest(CertificateRequest),
    /// ServerHelloDone (14)
    ServerHelloDone(ServerHelloDone),
    /// CertificateVerify (15)
    CertificateVerify(CertificateVerify),
    /// ClientKeyExchange (16)
    ClientKeyExchange(ClientKeyExchange),
    /// Finished (20)
    Finished(Finished),
    /// ChangeCipherSpec pseudo-message
    ChangeCipherSpec(ChangeCipherSpec),
}

impl HandshakeMessage {
    /// The message's (pseudo-)tag.
    pub fn handshake_type(&self) -> HandshakeType {
        match self {
            HandshakeMessage::HelloRequest(m) => m.handshake_type(),
            HandshakeMessage::ClientHello(m) => m.handshake_type(),
            HandshakeMessage::ServerHello(m) => m.handshake_type(),
            HandshakeMessage::HelloVerifyRequest(m) => m.handshake_type(),
            HandshakeMessage::NewSessionTicket(m) => m.handshake_type(),
            HandshakeMessage::Certificate(m) => m.handshake_type(),
            HandshakeMessage::ServerKeyExchange(m) => m.handshake_type(),
            HandshakeMessage::CertificateRequest(m) => m.handshake_type(),
            HandshakeMessage::ServerHelloDone(m) => m.handshake_type(),
            HandshakeMessage::CertificateVerify(m) => m.handshake_type(),
            HandshakeMessage::ClientKeyExchange(m) => m.handshake_type(),
            HandshakeMessage::Finished(m) => m.handshake_type(),
            HandshakeMessage::ChangeCipherSpec(m) => m.handshake_type(),
        }
    }

    /// Serialize the message body.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        match self {
            HandshakeMessage::HelloRequest(m) => m.serialize(),
            HandshakeMessage::ClientHello(m) => m.serialize(),
            HandshakeMessage::ServerHello(m) => m.serialize(),
            HandshakeMessage::HelloVerifyRequest(m) => m.serialize(),
            HandshakeMessage::NewSessionTicket(m) => m.serialize(),
            HandshakeMessage::Certificate(m) => m.serialize(),
            HandshakeMessage::ServerKeyExchange(m) => m.serialize(),
            HandshakeMessage::CertificateRequest(m) => m.serialize(),
            HandshakeMessage::ServerHelloDone(m) => m.serialize(),
            HandshakeMessage::CertificateVerify(m) => m.serialize(),
            HandshakeMessage::ClientKeyExchange(m) => m.serialize(),
            HandshakeMessage::Finished(m) => m.serialize(),
            HandshakeMessage::ChangeCipherSpec(m) => m.serialize(),
        }
    }

    /// Parse a message body for `msg_type`.
    ///
    /// # Errors
    ///
    /// `InvalidState` for a key-exchange message when the context does
    /// not yet carry the negotiated suite parameters; `Decode` for any
    /// structural fault.
    pub fn parse(msg_type: HandshakeType, body: &[u8], ctx: &MessageContext) -> Result<Self> {
        let message = match msg_type {
            HandshakeType::HelloRequest => {
                HandshakeMessage::HelloRequest(HelloRequest::decode(body)?)
            },
            HandshakeType::ClientHello => {
                HandshakeMessage::ClientHello(ClientHello::decode(body)?)
            },
            HandshakeType::ServerHello => {
                HandshakeMessage::ServerHello(ServerHello::decode(body)?)
            },
            HandshakeType::HelloVerifyRequest => {
                HandshakeMessage::HelloVerifyRequest(HelloVerifyRequest::decode(body)?)
            },
            HandshakeType::NewSessionTicket => {
                HandshakeMessage::NewSessionTicket(NewSessionTicket::decode(body)?)
            },
            HandshakeType::Certificate => {
                HandshakeMessage::Certificate(Certificate::decode(body)?)
            },
            HandshakeType::ServerKeyExchange => {
                let kex = ctx.kex_algo.ok_or_else(|| {
                    Error::InvalidState("ServerKeyExchange before suite negotiation".into())
                })?;
                let auth = ctx.auth_method.ok_or_else(|| {
                    Error::InvalidState("ServerKeyExchange before suite negotiation".into())
                })?;
                HandshakeMessage::ServerKeyExchange(ServerKeyExchange::decode(body, kex, auth)?)
            },
            HandshakeType::CertificateRequest => {
                HandshakeMessage::CertificateRequest(CertificateRequest::decode(body)?)
            },
            HandshakeType::ServerHelloDone => {
                HandshakeMessage::ServerHelloDone(ServerHelloDone::decode(body)?)
            },
            HandshakeType::CertificateVerify => {
                HandshakeMessage::CertificateVerify(CertificateVerify::decode(body)?)
            },
            HandshakeType::ClientKeyExchange => {
                let kex = ctx.kex_algo.ok_or_else(|| {
                    Error::InvalidState("ClientKeyExchange before suite negotiation".into())
                })?;
                HandshakeMessage::ClientKeyExchange(ClientKeyExchange::decode(body, kex)?)
            },
            HandshakeType::Finished => HandshakeMessage::Finished(Finished::decode(body)?),
            HandshakeType::ChangeCipherSpec => {
                HandshakeMessage::ChangeCipherSpec(ChangeCipherSpec::decode(body)?)
            },
        };
        Ok(message)
    }
}

/// Frame a message body under the stream handshake header:
/// 1-byte type, 3-byte length.
pub fn encode_handshake(msg_type: HandshakeType, body: &[u8]) -> Result<Vec<u8>> {
    let mut writer = Writer::new();
    writer.put_u8(msg_type.to_u8());
    writer.append_length_value(body, 3)?;
    Ok(writer.into_vec())
}

/// Split one stream handshake frame off the front of `buf`.
///
/// Returns the tag, the body slice and the total bytes consumed.
pub fn decode_handshake_header(buf: &[u8]) -> Result<(HandshakeType, &[u8], usize)> {
    let mut reader = Reader::new(buf);

    let tag = reader.get_byte()?;
    let msg_type = HandshakeType::from_u8(tag)
        .ok_or_else(|| Error::Decode(format!("Unknown handshake message type {}", tag)))?;

    let length = reader.get_u24()? as usize;
    if length > reader.remaining_bytes() {
        return Err(Error::decode("Truncated handshake message"));
    }

    let start = reader.read_so_far();
    Ok((msg_type, &buf[start..start + length], start + length))
}

/// DTLS handshake header fields (RFC 6347 Section 4.2.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DtlsHandshakeHeader {
    /// Message tag.
    pub msg_type: HandshakeType,
    /// Length of the complete message body.
    pub length: u32,
    /// Sequence number of this message within the handshake.
    pub message_seq: u16,
    /// Offset of this fragment within the message body.
    pub fragment_offset: u32,
    /// Length of this fragment.
    pub fragment_length: u32,
}

impl DtlsHandshakeHeader {
    /// Whether the frame carries the whole message.
    pub fn is_complete(&self) -> bool {
        self.fragment_offset == 0 && self.fragment_length == self.length
    }
}

/// Frame a message body under the DTLS handshake header as a single,
/// unfragmented message. Fragmentation belongs to the record layer.
pub fn encode_dtls_handshake(
    msg_type: HandshakeType,
    message_seq: u16,
    body: &[u8],
) -> Result<Vec<u8>> {
    if body.len() >= (1 << 24) {
        return Err(Error::InvalidArgument("Handshake body too large".into()));
    }

    let mut writer = Writer::new();
    writer.put_u8(msg_type.to_u8());
    writer.put_u24(body.len() as u32);
    writer.put_u16(message_seq);
    writer.put_u24(0); // fragment_offset
    writer.put_u24(body.len() as u32); // fragment_length
    writer.put_slice(body);
    Ok(writer.into_vec())
}

/// Split one DTLS handshake frame off the front of `buf`.
///
/// Returns the header, the fragment bytes and the total bytes consumed.
/// Reassembly of partial fragments is the record layer's job.
pub fn decode_dtls_handshake_header(buf: &[u8]) -> Result<(DtlsHandshakeHeader, &[u8], usize)> {
    let mut reader = Reader::new(buf);

    let tag = reader.get_byte()?;
    let msg_type = HandshakeType::from_u8(tag)
        .ok_or_else(|| Error::Decode(format!("Unknown handshake message type {}", tag)))?;

    let length = reader.get_u24()?;
    let message_seq = reader.get_u16()?;
    let fragment_offset = reader.get_u24()?;
    let fragment_length = reader.get_u24()?;

    if fragment_offset
        .checked_add(fragment_length)
        .map_or(true, |end| end > length)
    {
        return Err(Error::decode("DTLS fragment exceeds its message length"));
    }
    if fragment_length as usize > reader.remaining_bytes() {
        return Err(Error::decode("Truncated DTLS handshake fragment"));
    }

    let header = DtlsHandshakeHeader {
        msg_type,
        length,
        message_seq,
        fragment_offset,
        fragment_length,
    };

    let start = reader.read_so_far();
    let end = start + fragment_length as usize;
    Ok((header, &buf[start..end], end))
}
