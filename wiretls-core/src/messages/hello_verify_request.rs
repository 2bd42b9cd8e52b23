//! DTLS HelloVerifyRequest (RFC 6347 Section 4.2.1).

use wiretls_crypto::{CryptoProvider, HashAlgorithm, Hmac};

use crate::error::{Error, Result};
use crate::protocol::{HandshakeType, ProtocolVersion};
use crate::wire::{Reader, Writer};

/// Derive a stateless hello-verify cookie.
///
/// A pure function of its inputs: HMAC-SHA-256 keyed with the server's
/// cookie secret over the client's transport identity and the client
/// hello bits (the hello serialized with an empty cookie field). The
/// server recomputes it on the second ClientHello instead of keeping
/// state.
pub fn compute_hello_verify_cookie(
    provider: &dyn CryptoProvider,
    client_hello_bits: &[u8],
    client_identity: &[u8],
    secret_key: &[u8],
) -> Result<Vec<u8>> {
    let mut hmac = provider.hmac(HashAlgorithm::Sha256, secret_key)?;
    hmac.update(client_identity);
    hmac.update(client_hello_bits);

    let cookie = hmac.finalize();
    debug_assert!(cookie.len() <= 255);
    Ok(cookie)
}

/// HelloVerifyRequest message.
///
/// ```text
/// struct {
///     ProtocolVersion server_version;
///     opaque cookie<0..2^8-1>;
/// } HelloVerifyRequest;
/// ```
///
/// The server_version field is fixed at DTLS 1.0 regardless of the
/// version being negotiated (RFC 6347 4.2.1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelloVerifyRequest {
    server_version: ProtocolVersion,
    cookie: Vec<u8>,
}

impl HelloVerifyRequest {
    /// The wire tag of this message.
    pub fn handshake_type(&self) -> HandshakeType {
        HandshakeType::HelloVerifyRequest
    }

    /// Construct a HelloVerifyRequest for the given client hello bits and
    /// client transport identity, deriving the cookie under `secret_key`.
    pub fn new(
        provider: &dyn CryptoProvider,
        client_hello_bits: &[u8],
        client_identity: &[u8],
        secret_key: &[u8],
    ) -> Result<Self> {
        let cookie =
            compute_hello_verify_cookie(provider, client_hello_bits, client_identity, secret_key)?;
        Ok(Self {
            server_version: ProtocolVersion::DTLS_V10,
            cookie,
        })
    }

    /// Parse a HelloVerifyRequest body. The slice must be consumed
    /// exactly.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(buf);

        let server_version = ProtocolVersion::from_u16(reader.get_u16()?);
        if !server_version.is_datagram_protocol() {
            return Err(Error::decode(
                "HelloVerifyRequest with a stream protocol version",
            ));
        }

        let cookie = reader.get_range_u8(1, 0, 255)?;
        if reader.has_remaining() {
            return Err(Error::decode("Trailing bytes after HelloVerifyRequest"));
        }

        Ok(Self {
            server_version,
            cookie,
        })
    }

    /// Serialize the message body.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new();
        writer.put_u16(self.server_version.to_u16());
        writer.append_length_value(&self.cookie, 1)?;
        Ok(writer.into_vec())
    }

    /// The server version field (DTLS 1.0 on the wire).
    pub fn server_version(&self) -> ProtocolVersion {
        self.server_version
    }

    /// The cookie the client must echo.
    pub fn cookie(&self) -> &[u8] {
        &self.cookie
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiretls_crypto_mock::MockProvider;

    #[test]
    fn test_cookie_derivation_is_deterministic() {
        let provider = MockProvider::new();

        let a = compute_hello_verify_cookie(&provider, b"hello-bits", b"198.51.100.7", b"secret")
            .unwrap();
        let b = compute_hello_verify_cookie(&provider, b"hello-bits", b"198.51.100.7", b"secret")
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 32);

        let other_client =
            compute_hello_verify_cookie(&provider, b"hello-bits", b"203.0.113.9", b"secret")
                .unwrap();
        assert_ne!(a, other_client);

        let other_secret =
            compute_hello_verify_cookie(&provider, b"hello-bits", b"198.51.100.7", b"rotated")
                .unwrap();
        assert_ne!(a, other_secret);
    }

    #[test]
    fn test_roundtrip() {
        let provider = MockProvider::new();
        let hvr = HelloVerifyRequest::new(&provider, b"bits", b"client", b"secret").unwrap();

        let bytes = hvr.serialize().unwrap();
        assert_eq!(&bytes[..2], &[0xFE, 0xFF]); // DTLS 1.0

        let parsed = HelloVerifyRequest::decode(&bytes).unwrap();
        assert_eq!(parsed, hvr);
        assert_eq!(parsed.cookie(), hvr.cookie());
    }

    #[test]
    fn test_stream_version_rejected() {
        assert!(HelloVerifyRequest::decode(&[0x03, 0x03, 0x00]).is_err());
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        assert!(HelloVerifyRequest::decode(&[0xFE, 0xFF, 0x01, 0xAA, 0xBB]).is_err());
    }
}
