//! ServerKeyExchange message (RFC 5246 Section 7.4.3).

use wiretls_crypto::{CryptoProvider, Signature, VerifyingKey};

use crate::algos::{AuthMethod, KexAlgo, SignatureScheme};
use crate::error::{Error, Result};
use crate::protocol::HandshakeType;
use crate::wire::{Reader, Writer};

/// ServerKeyExchange: the server's ephemeral key exchange parameters.
///
/// The parameter block's shape depends on the negotiated key exchange:
///
/// ```text
/// DH:        opaque dh_p<1..2^16-1>; opaque dh_g<1..2^16-1>; opaque dh_Ys<1..2^16-1>;
/// ECDH:      ECCurveType curve_type(3); NamedCurve curve; opaque point<1..2^8-1>;
/// PSK:       opaque psk_identity_hint<0..2^16-1>;
/// ECDHE_PSK: psk_identity_hint then the ECDH block;
/// CECPQ1:    opaque key_exchange<1..2^16-1>;
/// ```
///
/// Unless the suite authenticates implicitly, the parameters are
/// followed by a signature scheme code and a 2-byte-prefixed signature
/// over client_random || server_random || params. The raw parameter
/// bytes are retained for that verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerKeyExchange {
    params: Vec<u8>,
    scheme: Option<u16>,
    signature: Vec<u8>,
}

impl ServerKeyExchange {
    /// The wire tag of this message.
    pub fn handshake_type(&self) -> HandshakeType {
        HandshakeType::ServerKeyExchange
    }

    /// Create from an already-encoded parameter block and its signature.
    pub fn new(
        params: Vec<u8>,
        scheme: Option<SignatureScheme>,
        signature: Vec<u8>,
    ) -> Result<Self> {
        if scheme.is_none() && !signature.is_empty() {
            return Err(Error::InvalidArgument(
                "Signature without a scheme in ServerKeyExchange".into(),
            ));
        }
        Ok(Self {
            params,
            scheme: scheme.map(SignatureScheme::to_u16),
            signature,
        })
    }

    /// Parse a ServerKeyExchange body for the negotiated key exchange and
    /// authentication method. The slice must be consumed exactly.
    pub fn decode(buf: &[u8], kex_alg: KexAlgo, sig_alg: AuthMethod) -> Result<Self> {
        let mut reader = Reader::new(buf);

        if kex_alg.is_psk() {
            // psk_identity_hint
            reader.get_range_u8(2, 0, 65535)?;
        }

        match kex_alg {
            KexAlgo::Dh => {
                // p, g, Ys
                for _ in 0..3 {
                    reader.get_range_u8(2, 1, 65535)?;
                }
            },
            KexAlgo::Ecdh | KexAlgo::EcdhePsk => {
                let curve_type = reader.get_byte()?;
                if curve_type != 3 {
                    return Err(Error::decode(format!(
                        "Server sent curve type {} rather than named_curve",
                        curve_type
                    )));
                }
                reader.get_u16()?; // named curve
                reader.get_range_u8(1, 1, 255)?; // point
            },
            KexAlgo::Cecpq1 => {
                reader.get_range_u8(2, 1, 65535)?;
            },
            KexAlgo::Psk => {},
            KexAlgo::StaticRsa => {
                return Err(Error::decode(
                    "ServerKeyExchange for a static RSA ciphersuite",
                ));
            },
        }

        let params = buf[..reader.read_so_far()].to_vec();

        let (scheme, signature) = if sig_alg != AuthMethod::Implicit {
            let scheme = reader.get_u16()?;
            let signature = reader.get_range_u8(2, 0, 65535)?;
            (Some(scheme), signature)
        } else {
            (None, Vec::new())
        };

        if reader.has_remaining() {
            return Err(Error::decode("Trailing bytes after ServerKeyExchange"));
        }

        Ok(Self {
            params,
            scheme,
            signature,
        })
    }

    /// Serialize the message body.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new();
        writer.put_slice(&self.params);
        if let Some(scheme) = self.scheme {
            writer.put_u16(scheme);
            writer.append_length_value(&self.signature, 2)?;
        }
        Ok(writer.into_vec())
    }

    /// The raw key exchange parameter block.
    pub fn params(&self) -> &[u8] {
        &self.params
    }

    /// The signature scheme, when the suite signs its parameters and the
    /// scheme is known.
    pub fn scheme(&self) -> Option<SignatureScheme> {
        self.scheme.and_then(SignatureScheme::from_u16)
    }

    /// The raw scheme code, when present.
    pub fn raw_scheme(&self) -> Option<u16> {
        self.scheme
    }

    /// The signature bytes (empty for implicit authentication).
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Verify the parameter signature against the server's key.
    ///
    /// The signed data is client_random || server_random || params.
    /// Returns `Ok(false)` when the signature does not verify.
    ///
    /// # Errors
    ///
    /// `InvalidState` for implicitly authenticated exchanges, which carry
    /// no signature.
    pub fn verify(
        &self,
        provider: &dyn CryptoProvider,
        server_key: &VerifyingKey,
        client_random: &[u8; 32],
        server_random: &[u8; 32],
    ) -> Result<bool> {
        let scheme_code = self.scheme.ok_or_else(|| {
            Error::InvalidState("No signature on an implicitly authenticated exchange".into())
        })?;
        let scheme = SignatureScheme::from_u16(scheme_code).ok_or_else(|| {
            Error::decode(format!(
                "ServerKeyExchange with unknown signature scheme {:04x}",
                scheme_code
            ))
        })?;

        let mut message = Vec::with_capacity(64 + self.params.len());
        message.extend_from_slice(client_random);
        message.extend_from_slice(server_random);
        message.extend_from_slice(&self.params);

        let verifier = provider.signature(scheme.signature_algorithm())?;
        match verifier.verify(server_key, &message, &self.signature) {
            Ok(()) => Ok(true),
            Err(wiretls_crypto::Error::SignatureVerificationFailed) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// Encode ECDH parameters (curve_type 3, the named curve, the point).
pub fn encode_ecdh_params(named_curve: u16, point: &[u8]) -> Result<Vec<u8>> {
    let mut writer = Writer::new();
    writer.put_u8(3); // named_curve
    writer.put_u16(named_curve);
    writer.append_length_value(point, 1)?;
    Ok(writer.into_vec())
}

/// Encode DH parameters (p, g, Ys, each 2-byte-prefixed).
pub fn encode_dh_params(p: &[u8], g: &[u8], ys: &[u8]) -> Result<Vec<u8>> {
    let mut writer = Writer::new();
    writer.append_length_value(p, 2)?;
    writer.append_length_value(g, 2)?;
    writer.append_length_value(ys, 2)?;
    Ok(writer.into_vec())
}
