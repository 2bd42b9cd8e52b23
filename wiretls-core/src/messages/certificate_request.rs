//! CertificateRequest message (RFC 5246 Section 7.4.4).

use crate::algos::SignatureScheme;
use crate::error::{Error, Result};
use crate::protocol::HandshakeType;
use crate::wire::{Reader, Writer};

/// Client certificate types the server may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ClientCertType {
    /// rsa_sign (1)
    RsaSign = 1,
    /// dss_sign (2)
    DssSign = 2,
    /// ecdsa_sign (64)
    EcdsaSign = 64,
}

impl ClientCertType {
    /// Create from wire format (u8).
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(ClientCertType::RsaSign),
            2 => Some(ClientCertType::DssSign),
            64 => Some(ClientCertType::EcdsaSign),
            _ => None,
        }
    }

    /// Convert to wire format (u8).
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Printable name.
    pub const fn name(self) -> &'static str {
        match self {
            ClientCertType::RsaSign => "RSA",
            ClientCertType::DssSign => "DSA",
            ClientCertType::EcdsaSign => "ECDSA",
        }
    }
}

/// CertificateRequest message.
///
/// ```text
/// struct {
///     ClientCertificateType certificate_types<1..2^8-1>;
///     SignatureAndHashAlgorithm supported_signature_algorithms<2..2^16-2>;
///     DistinguishedName certificate_authorities<0..2^16-1>;
/// } CertificateRequest;
/// ```
///
/// Certificate types and schemes are stored as raw wire values; CA names
/// are the DER-encoded distinguished names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateRequest {
    cert_types: Vec<u8>,
    schemes: Vec<u16>,
    acceptable_cas: Vec<Vec<u8>>,
}

impl CertificateRequest {
    /// The wire tag of this message.
    pub fn handshake_type(&self) -> HandshakeType {
        HandshakeType::CertificateRequest
    }

    /// Create a request for the given cert types, schemes and CA names.
    pub fn new(
        cert_types: Vec<ClientCertType>,
        schemes: Vec<SignatureScheme>,
        acceptable_cas: Vec<Vec<u8>>,
    ) -> Result<Self> {
        if cert_types.is_empty() || schemes.is_empty() {
            return Err(Error::InvalidArgument(
                "CertificateRequest needs at least one cert type and scheme".into(),
            ));
        }
        Ok(Self {
            cert_types: cert_types.into_iter().map(ClientCertType::to_u8).collect(),
            schemes: schemes.into_iter().map(SignatureScheme::to_u16).collect(),
            acceptable_cas,
        })
    }

    /// Parse a CertificateRequest body. The slice must be consumed
    /// exactly.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(buf);

        let cert_types = reader.get_range_u8(1, 1, 255)?;
        let schemes = reader.get_range_u16(2, 1, 32767)?;

        let ca_list_len = usize::from(reader.get_u16()?);
        if ca_list_len != reader.remaining_bytes() {
            return Err(Error::decode("CertificateRequest CA list length mismatch"));
        }

        let mut acceptable_cas = Vec::new();
        while reader.has_remaining() {
            acceptable_cas.push(reader.get_range_u8(2, 0, 65535)?);
        }

        Ok(Self {
            cert_types,
            schemes,
            acceptable_cas,
        })
    }

    /// Serialize the message body.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new();
        writer.append_length_value(&self.cert_types, 1)?;
        writer.length_prefixed(2, |schemes| {
            for &scheme in &self.schemes {
                schemes.put_u16(scheme);
            }
            Ok(())
        })?;
        writer.length_prefixed(2, |cas| {
            for dn in &self.acceptable_cas {
                cas.append_length_value(dn, 2)?;
            }
            Ok(())
        })?;
        Ok(writer.into_vec())
    }

    /// The known certificate types requested.
    pub fn acceptable_cert_types(&self) -> Vec<ClientCertType> {
        self.cert_types
            .iter()
            .filter_map(|&t| ClientCertType::from_u8(t))
            .collect()
    }

    /// The known signature schemes the server accepts.
    pub fn signature_schemes(&self) -> Vec<SignatureScheme> {
        self.schemes
            .iter()
            .filter_map(|&s| SignatureScheme::from_u16(s))
            .collect()
    }

    /// DER-encoded distinguished names of acceptable CAs.
    pub fn acceptable_cas(&self) -> &[Vec<u8>] {
        &self.acceptable_cas
    }
}
