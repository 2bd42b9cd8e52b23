//! CertificateVerify message (RFC 5246 Section 7.4.8).

use wiretls_crypto::{CryptoProvider, Signature, VerifyingKey};

use crate::algos::SignatureScheme;
use crate::error::{Error, Result};
use crate::protocol::HandshakeType;
use crate::wire::{Reader, Writer};

/// CertificateVerify: the client proving possession of its certificate
/// key by signing the handshake transcript.
///
/// ```text
/// struct {
///     SignatureAndHashAlgorithm algorithm;
///     opaque signature<0..2^16-1>;
/// } CertificateVerify;
/// ```
///
/// The signature itself is opaque here; checking it is delegated to the
/// signature capability selected by the scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateVerify {
    scheme: u16,
    signature: Vec<u8>,
}

impl CertificateVerify {
    /// The wire tag of this message.
    pub fn handshake_type(&self) -> HandshakeType {
        HandshakeType::CertificateVerify
    }

    /// Create from a known scheme and signature bytes.
    pub fn new(scheme: SignatureScheme, signature: Vec<u8>) -> Self {
        Self {
            scheme: scheme.to_u16(),
            signature,
        }
    }

    /// Parse a CertificateVerify body. The slice must be consumed
    /// exactly.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(buf);

        let scheme = reader.get_u16()?;
        let signature = reader.get_range_u8(2, 0, 65535)?;

        if reader.has_remaining() {
            return Err(Error::decode("Trailing bytes after CertificateVerify"));
        }

        Ok(Self { scheme, signature })
    }

    /// Serialize the message body.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new();
        writer.put_u16(self.scheme);
        writer.append_length_value(&self.signature, 2)?;
        Ok(writer.into_vec())
    }

    /// The signature scheme, if it is one this layer knows.
    pub fn scheme(&self) -> Option<SignatureScheme> {
        SignatureScheme::from_u16(self.scheme)
    }

    /// The raw scheme code from the wire.
    pub fn raw_scheme(&self) -> u16 {
        self.scheme
    }

    /// The signature bytes.
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Check the signature over `message` (the handshake transcript
    /// material, assembled by the state machine) against the peer's key.
    ///
    /// Returns `Ok(false)` when the signature simply does not verify;
    /// errors for unknown schemes or capability failures.
    pub fn verify(
        &self,
        provider: &dyn CryptoProvider,
        peer_key: &VerifyingKey,
        message: &[u8],
    ) -> Result<bool> {
        let scheme = self.scheme().ok_or_else(|| {
            Error::decode(format!(
                "CertificateVerify with unknown signature scheme {:04x}",
                self.scheme
            ))
        })?;

        let verifier = provider.signature(scheme.signature_algorithm())?;
        match verifier.verify(peer_key, message, &self.signature) {
            Ok(()) => Ok(true),
            Err(wiretls_crypto::Error::SignatureVerificationFailed) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiretls_crypto::{Signature, SigningKey};
    use wiretls_crypto_mock::MockProvider;

    #[test]
    fn test_roundtrip() {
        let msg = CertificateVerify::new(SignatureScheme::EcdsaSha256, vec![0xAB; 70]);
        let bytes = msg.serialize().unwrap();
        assert_eq!(&bytes[..2], &[0x04, 0x03]);

        let parsed = CertificateVerify::decode(&bytes).unwrap();
        assert_eq!(parsed, msg);
        assert_eq!(parsed.scheme(), Some(SignatureScheme::EcdsaSha256));
        assert_eq!(parsed.signature().len(), 70);
    }

    #[test]
    fn test_unknown_scheme_preserved() {
        let bytes = [0x7A, 0x7A, 0x00, 0x02, 0x01, 0x02];
        let parsed = CertificateVerify::decode(&bytes).unwrap();
        assert_eq!(parsed.scheme(), None);
        assert_eq!(parsed.raw_scheme(), 0x7A7A);
        assert_eq!(parsed.serialize().unwrap(), bytes.to_vec());
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let bytes = [0x04, 0x03, 0x00, 0x01, 0xAA, 0xFF];
        assert!(CertificateVerify::decode(&bytes).is_err());
    }

    #[test]
    fn test_verify_delegates_to_capability() {
        let provider = MockProvider::new();
        let signer = provider
            .signature(wiretls_crypto::SignatureAlgorithm::EcdsaSecp256r1Sha256)
            .unwrap();

        let key = SigningKey::from_bytes(b"key".to_vec());
        let peer_key = VerifyingKey::from_bytes(b"key".to_vec());
        let transcript = b"handshake-transcript";
        let signature = signer.sign(&key, transcript).unwrap();

        let msg = CertificateVerify::new(SignatureScheme::EcdsaSha256, signature);
        assert!(msg.verify(&provider, &peer_key, transcript).unwrap());
        assert!(!msg.verify(&provider, &peer_key, b"other").unwrap());
    }
}
