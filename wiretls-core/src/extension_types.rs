//! Typed carriers for the known TLS extensions.
//!
//! Each carrier parses its own payload from a [`Reader`] positioned just
//! past the extension header, validating every length field against the
//! declared extension size, and serializes back to the payload bytes
//! (the container writes the outer code + size header).

use crate::algos::{GroupParams, SignatureScheme};
use crate::error::{Error, Result};
use crate::policy::Policy;
use crate::protocol::{ConnectionSide, HandshakeType, ProtocolVersion};
use crate::wire::{Reader, Writer};

/// EC point format codes (RFC 4492 Section 5.1.2).
const ECPOINT_UNCOMPRESSED: u8 = 0;
const ECPOINT_ANSIX962_COMPRESSED_PRIME: u8 = 1;

/// Server Name Indication (RFC 6066 Section 3).
///
/// The client form carries exactly one DNS host name; the empty form is
/// the server acknowledging that it used the name. Name types other than
/// DNS are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerNameIndicator {
    host_name: Option<String>,
}

impl ServerNameIndicator {
    /// Create a client-side SNI carrying `host_name`.
    pub fn new(host_name: impl Into<String>) -> Self {
        Self {
            host_name: Some(host_name.into()),
        }
    }

    /// The indicated host name, absent for the server-acknowledgement form.
    pub fn host_name(&self) -> Option<&str> {
        self.host_name.as_deref()
    }

    pub(crate) fn parse(reader: &mut Reader<'_>, size: usize) -> Result<Self> {
        // Zero-size form: the server confirming it knew the name.
        if size == 0 {
            return Ok(Self { host_name: None });
        }

        let mut name_bytes = usize::from(reader.get_u16()?);
        if name_bytes + 2 != size {
            return Err(Error::decode("Bad encoding of SNI extension"));
        }

        let mut host_name = None;
        while name_bytes > 0 {
            let name_type = reader.get_byte()?;
            name_bytes -= 1;

            if name_type == 0 {
                // DNS host name
                if host_name.is_some() {
                    return Err(Error::decode("SNI with more than one DNS name"));
                }
                let name = reader.get_string(2, 1, 65535)?;
                name_bytes = name_bytes
                    .checked_sub(2 + name.len())
                    .ok_or_else(|| Error::decode("SNI name overruns its list"))?;
                host_name = Some(name);
            } else {
                // Unknown name type: skip the rest of the list.
                reader.discard_next(name_bytes)?;
                name_bytes = 0;
            }
        }

        if host_name.is_none() {
            return Err(Error::decode("SNI list without a DNS host name"));
        }

        Ok(Self { host_name })
    }

    pub(crate) fn serialize(&self) -> Result<Vec<u8>> {
        let name = self.host_name.as_deref().unwrap_or_default();
        let mut writer = Writer::new();
        writer.put_u16((name.len() + 3) as u16);
        writer.put_u8(0); // DNS
        writer.put_u16(name.len() as u16);
        writer.put_slice(name.as_bytes());
        Ok(writer.into_vec())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.host_name.as_deref().map_or(true, str::is_empty)
    }
}

/// OCSP status request (RFC 6066 Section 8).
///
/// The client form carries responder ids and request extensions; the
/// zero-size form is the server agreeing to staple.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificateStatusRequest {
    responder_id_list: Vec<u8>,
    request_extensions: Vec<u8>,
}

impl CertificateStatusRequest {
    /// Create a client-side OCSP request.
    pub fn new(responder_id_list: Vec<u8>, request_extensions: Vec<u8>) -> Self {
        Self {
            responder_id_list,
            request_extensions,
        }
    }

    /// Raw DER responder id list.
    pub fn responder_id_list(&self) -> &[u8] {
        &self.responder_id_list
    }

    /// Raw DER request extensions.
    pub fn request_extensions(&self) -> &[u8] {
        &self.request_extensions
    }

    pub(crate) fn parse(
        reader: &mut Reader<'_>,
        size: usize,
        message_type: HandshakeType,
    ) -> Result<Self> {
        if size == 0 {
            // Only meaningful as the server's acknowledgement.
            if message_type != HandshakeType::ServerHello {
                return Err(Error::decode("Empty status_request outside ServerHello"));
            }
            return Ok(Self::default());
        }

        let status_type = reader.get_byte()?;
        if status_type != 1 {
            // Not OCSP: skip, retaining nothing.
            reader.discard_next(size - 1)?;
            return Ok(Self::default());
        }

        let responder_id_list = reader.get_range_u8(2, 0, 65535)?;
        let request_extensions = reader.get_range_u8(2, 0, 65535)?;

        if responder_id_list.len() + request_extensions.len() + 5 != size {
            return Err(Error::decode("Bad encoding of status_request extension"));
        }

        Ok(Self {
            responder_id_list,
            request_extensions,
        })
    }

    pub(crate) fn serialize(&self, side: ConnectionSide) -> Result<Vec<u8>> {
        match side {
            // Server acknowledgement is the empty payload.
            ConnectionSide::Server => Ok(Vec::new()),
            ConnectionSide::Client => {
                let mut writer = Writer::new();
                writer.put_u8(1); // OCSP
                writer.append_length_value(&self.responder_id_list, 2)?;
                writer.append_length_value(&self.request_extensions, 2)?;
                Ok(writer.into_vec())
            },
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        false
    }
}

/// Named group list (RFC 8422 Section 5.1.1, RFC 7919).
///
/// Stored as raw wire codes in offer order so that unknown groups round
/// trip; typed filters expose the known EC and DH subsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedGroups {
    groups: Vec<u16>,
}

impl SupportedGroups {
    /// Create from known groups, preserving order.
    pub fn new(groups: &[GroupParams]) -> Self {
        Self {
            groups: groups.iter().map(|g| g.to_u16()).collect(),
        }
    }

    /// All offered group codes in wire order.
    pub fn groups(&self) -> &[u16] {
        &self.groups
    }

    /// The known elliptic-curve groups, in offer order.
    pub fn ec_groups(&self) -> Vec<GroupParams> {
        self.groups
            .iter()
            .filter_map(|&code| GroupParams::from_u16(code))
            .filter(|g| !g.is_dh())
            .collect()
    }

    /// The known finite-field DH groups, in offer order.
    pub fn dh_groups(&self) -> Vec<GroupParams> {
        self.groups
            .iter()
            .filter_map(|&code| GroupParams::from_u16(code))
            .filter(|g| g.is_dh())
            .collect()
    }

    pub(crate) fn parse(reader: &mut Reader<'_>, size: usize) -> Result<Self> {
        let len = usize::from(reader.get_u16()?);
        if len + 2 != size {
            return Err(Error::decode(
                "Inconsistent length field in supported groups list",
            ));
        }
        if len % 2 == 1 {
            return Err(Error::decode("Supported groups list of odd size"));
        }

        let mut groups = Vec::with_capacity(len / 2);
        for _ in 0..len / 2 {
            groups.push(reader.get_u16()?);
        }
        Ok(Self { groups })
    }

    pub(crate) fn serialize(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new();
        writer.put_u16((self.groups.len() * 2) as u16);
        for &group in &self.groups {
            writer.put_u16(group);
        }
        Ok(writer.into_vec())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// EC point format list (RFC 4492 Section 5.1.2).
///
/// Reduced to the one bit this layer cares about: whether the peer
/// prefers compressed points. The list must include the uncompressed
/// format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedPointFormats {
    prefers_compressed: bool,
}

impl SupportedPointFormats {
    /// Create with the given compressed-point preference.
    pub fn new(prefers_compressed: bool) -> Self {
        Self { prefers_compressed }
    }

    /// Whether the first recognized format was a compressed one.
    pub fn prefers_compressed(&self) -> bool {
        self.prefers_compressed
    }

    pub(crate) fn parse(reader: &mut Reader<'_>, size: usize) -> Result<Self> {
        let len = usize::from(reader.get_byte()?);
        if len + 1 != size {
            return Err(Error::decode(
                "Inconsistent length field in point formats list",
            ));
        }

        let formats = reader.get_fixed(len)?;
        if !formats.contains(&ECPOINT_UNCOMPRESSED) {
            return Err(Error::decode(
                "Point formats list without uncompressed format",
            ));
        }

        let prefers_compressed = formats
            .iter()
            .find_map(|&f| match f {
                ECPOINT_UNCOMPRESSED => Some(false),
                ECPOINT_ANSIX962_COMPRESSED_PRIME => Some(true),
                _ => None,
            })
            .unwrap_or(false);

        Ok(Self { prefers_compressed })
    }

    pub(crate) fn serialize(&self) -> Result<Vec<u8>> {
        // If sent, the list MUST include uncompressed (RFC 4492 5.1).
        if self.prefers_compressed {
            Ok(vec![
                2,
                ECPOINT_ANSIX962_COMPRESSED_PRIME,
                ECPOINT_UNCOMPRESSED,
            ])
        } else {
            Ok(vec![1, ECPOINT_UNCOMPRESSED])
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        false
    }
}

/// Signature algorithm list (RFC 5246 Section 7.4.1.4.1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureAlgorithms {
    schemes: Vec<u16>,
}

impl SignatureAlgorithms {
    /// Create from known schemes, preserving order.
    pub fn new(schemes: &[SignatureScheme]) -> Self {
        Self {
            schemes: schemes.iter().map(|s| s.to_u16()).collect(),
        }
    }

    /// All offered scheme codes in wire order.
    pub fn schemes(&self) -> &[u16] {
        &self.schemes
    }

    /// The schemes this layer knows, in offer order.
    pub fn supported_schemes(&self) -> Vec<SignatureScheme> {
        self.schemes
            .iter()
            .filter_map(|&code| SignatureScheme::from_u16(code))
            .collect()
    }

    pub(crate) fn parse(reader: &mut Reader<'_>, size: usize) -> Result<Self> {
        let len = usize::from(reader.get_u16()?);
        if len + 2 != size || len % 2 == 1 || len == 0 {
            return Err(Error::decode(
                "Bad encoding on signature algorithms extension",
            ));
        }

        let mut schemes = Vec::with_capacity(len / 2);
        for _ in 0..len / 2 {
            schemes.push(reader.get_u16()?);
        }
        Ok(Self { schemes })
    }

    pub(crate) fn serialize(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new();
        writer.put_u16((self.schemes.len() * 2) as u16);
        for &scheme in &self.schemes {
            writer.put_u16(scheme);
        }
        Ok(writer.into_vec())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }
}

/// SRTP protection profiles (RFC 5764 Section 4.1.1).
///
/// The MKI is not supported and must be empty on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrtpProtectionProfiles {
    profiles: Vec<u16>,
}

impl SrtpProtectionProfiles {
    /// Create from profile codes, preserving order.
    pub fn new(profiles: Vec<u16>) -> Self {
        Self { profiles }
    }

    /// Offered profile codes.
    pub fn profiles(&self) -> &[u16] {
        &self.profiles
    }

    pub(crate) fn parse(reader: &mut Reader<'_>, size: usize) -> Result<Self> {
        let profiles = reader.get_range_u16(2, 0, 32767)?;
        let mki = reader.get_range_u8(1, 0, 255)?;

        if profiles.len() * 2 + mki.len() + 3 != size {
            return Err(Error::decode("Bad encoding for SRTP protection extension"));
        }
        if !mki.is_empty() {
            return Err(Error::decode(
                "Unhandled non-empty MKI for SRTP protection extension",
            ));
        }

        Ok(Self { profiles })
    }

    pub(crate) fn serialize(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new();
        writer.put_u16((self.profiles.len() * 2) as u16);
        for &profile in &self.profiles {
            writer.put_u16(profile);
        }
        writer.put_u8(0); // srtp_mki, always empty here
        Ok(writer.into_vec())
    }

    pub(crate) fn is_empty(&self) -> bool {
        false
    }
}

/// ALPN protocol list (RFC 7301).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlpnProtocols {
    protocols: Vec<String>,
}

impl AlpnProtocols {
    /// Create from protocol names, preserving order.
    pub fn new(protocols: Vec<String>) -> Self {
        Self { protocols }
    }

    /// Offered protocol names.
    pub fn protocols(&self) -> &[String] {
        &self.protocols
    }

    /// The single negotiated protocol of a server response.
    ///
    /// # Errors
    ///
    /// `InvalidState` unless exactly one protocol is present.
    pub fn single_protocol(&self) -> Result<&str> {
        if self.protocols.len() != 1 {
            return Err(Error::InvalidState(format!(
                "ALPN carries {} protocols, expected exactly one",
                self.protocols.len()
            )));
        }
        Ok(&self.protocols[0])
    }

    pub(crate) fn parse(
        reader: &mut Reader<'_>,
        size: usize,
        from: ConnectionSide,
    ) -> Result<Self> {
        if size == 0 {
            return Ok(Self::default());
        }

        let name_bytes = usize::from(reader.get_u16()?);
        let mut bytes_remaining = size - 2;
        if name_bytes != bytes_remaining {
            return Err(Error::decode(
                "Bad encoding of ALPN extension, bad length field",
            ));
        }

        let mut protocols = Vec::new();
        while bytes_remaining > 0 {
            let protocol = reader.get_string(1, 0, 255)?;

            bytes_remaining = bytes_remaining
                .checked_sub(protocol.len() + 1)
                .ok_or_else(|| Error::decode("Bad encoding of ALPN, length field too long"))?;

            if protocol.is_empty() {
                return Err(Error::decode("Empty ALPN protocol not allowed"));
            }

            protocols.push(protocol);
        }

        // RFC 7301 3.1: the server response carries exactly one name.
        if from == ConnectionSide::Server && protocols.len() != 1 {
            return Err(Error::Decode(format!(
                "Server sent {} protocols in ALPN extension response",
                protocols.len()
            )));
        }

        Ok(Self { protocols })
    }

    pub(crate) fn serialize(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new();
        writer.length_prefixed(2, |names| {
            for protocol in &self.protocols {
                if protocol.len() >= 256 {
                    return Err(Error::InvalidArgument("ALPN name too long".into()));
                }
                if !protocol.is_empty() {
                    names.append_length_value(protocol.as_bytes(), 1)?;
                }
            }
            Ok(())
        })?;
        Ok(writer.into_vec())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.protocols.is_empty()
    }
}

/// encrypt_then_mac marker (RFC 7366).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncryptThenMac;

impl EncryptThenMac {
    pub(crate) fn parse(_reader: &mut Reader<'_>, size: usize) -> Result<Self> {
        if size != 0 {
            return Err(Error::decode("Invalid encrypt_then_mac extension"));
        }
        Ok(Self)
    }

    pub(crate) fn serialize(&self) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }

    pub(crate) fn is_empty(&self) -> bool {
        false
    }
}

/// extended_master_secret marker (RFC 7627).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtendedMasterSecret;

impl ExtendedMasterSecret {
    pub(crate) fn parse(_reader: &mut Reader<'_>, size: usize) -> Result<Self> {
        if size != 0 {
            return Err(Error::decode("Invalid extended_master_secret extension"));
        }
        Ok(Self)
    }

    pub(crate) fn serialize(&self) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }

    pub(crate) fn is_empty(&self) -> bool {
        false
    }
}

/// Session ticket (RFC 5077).
///
/// An empty ticket requests a new one, so this carrier is never elided
/// from the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionTicket {
    ticket: Vec<u8>,
}

impl SessionTicket {
    /// Create a carrier resuming with `ticket` (empty requests a new one).
    pub fn new(ticket: Vec<u8>) -> Self {
        Self { ticket }
    }

    /// The opaque ticket bytes.
    pub fn ticket(&self) -> &[u8] {
        &self.ticket
    }

    pub(crate) fn parse(reader: &mut Reader<'_>, size: usize) -> Result<Self> {
        Ok(Self {
            ticket: reader.get_fixed(size)?,
        })
    }

    pub(crate) fn serialize(&self) -> Result<Vec<u8>> {
        Ok(self.ticket.clone())
    }

    pub(crate) fn is_empty(&self) -> bool {
        false
    }
}

/// supported_versions (RFC 8446 Section 4.2.1).
///
/// The client form is a length-prefixed list; the server form is a single
/// selected version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedVersions {
    versions: Vec<ProtocolVersion>,
}

impl SupportedVersions {
    /// Create from an explicit version list.
    pub fn new(versions: Vec<ProtocolVersion>) -> Self {
        Self { versions }
    }

    /// Build the offer list for `offer`, honoring the policy's version
    /// switches. The list is empty (and the extension elided) when the
    /// policy refuses the protocol family.
    pub fn for_offer(offer: ProtocolVersion, policy: &dyn Policy) -> Self {
        let mut versions = Vec::new();
        if offer.is_datagram_protocol() {
            if policy.allow_dtls12() {
                versions.push(ProtocolVersion::DTLS_V12);
            }
        } else if policy.allow_tls12() {
            versions.push(ProtocolVersion::TLS_V12);
        }
        Self { versions }
    }

    /// The carried versions (a single entry for the server form).
    pub fn versions(&self) -> &[ProtocolVersion] {
        &self.versions
    }

    /// Whether `version` is in the list.
    pub fn supports(&self, version: ProtocolVersion) -> bool {
        self.versions.contains(&version)
    }

    pub(crate) fn parse(
        reader: &mut Reader<'_>,
        size: usize,
        from: ConnectionSide,
    ) -> Result<Self> {
        match from {
            ConnectionSide::Server => {
                if size != 2 {
                    return Err(Error::decode(
                        "Server sent invalid supported_versions extension",
                    ));
                }
                Ok(Self {
                    versions: vec![ProtocolVersion::from_u16(reader.get_u16()?)],
                })
            },
            ConnectionSide::Client => {
                let raw = reader.get_range_u16(1, 1, 127)?;
                if size != 1 + 2 * raw.len() {
                    return Err(Error::decode(
                        "Client sent invalid supported_versions extension",
                    ));
                }
                Ok(Self {
                    versions: raw.into_iter().map(ProtocolVersion::from_u16).collect(),
                })
            },
        }
    }

    pub(crate) fn serialize(&self, side: ConnectionSide) -> Result<Vec<u8>> {
        let mut writer = Writer::new();
        match side {
            ConnectionSide::Server => {
                if self.versions.len() != 1 {
                    return Err(Error::InvalidArgument(
                        "Server supported_versions must carry exactly one version".into(),
                    ));
                }
                writer.put_u16(self.versions[0].to_u16());
            },
            ConnectionSide::Client => {
                if self.versions.is_empty() || self.versions.len() > 127 {
                    return Err(Error::InvalidArgument(
                        "Client supported_versions list size out of range".into(),
                    ));
                }
                writer.put_u8((self.versions.len() * 2) as u8);
                for version in &self.versions {
                    writer.put_u16(version.to_u16());
                }
            },
        }
        Ok(writer.into_vec())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

/// Secure renegotiation info (RFC 5746).
///
/// Empty verify-data still goes on the wire: it is how an initial
/// handshake signals support.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenegotiationExtension {
    reneg_data: Vec<u8>,
}

impl RenegotiationExtension {
    /// Create from the verify-data of the prior handshake.
    pub fn new(reneg_data: Vec<u8>) -> Self {
        Self { reneg_data }
    }

    /// Verify-data from the previous handshake on this connection.
    pub fn renegotiation_info(&self) -> &[u8] {
        &self.reneg_data
    }

    pub(crate) fn parse(reader: &mut Reader<'_>, size: usize) -> Result<Self> {
        let reneg_data = reader.get_range_u8(1, 0, 255)?;
        if reneg_data.len() + 1 != size {
            return Err(Error::decode(
                "Bad encoding for secure renegotiation extension",
            ));
        }
        Ok(Self { reneg_data })
    }

    pub(crate) fn serialize(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new();
        writer.append_length_value(&self.reneg_data, 1)?;
        Ok(writer.into_vec())
    }

    pub(crate) fn is_empty(&self) -> bool {
        false
    }
}

/// An extension code outside the registry.
///
/// The payload is retained byte-exactly for inspection, but the core
/// never forwards unknown extensions outbound: serialization fails with
/// an invalid-state error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownExtension {
    code: u16,
    value: Vec<u8>,
}

impl UnknownExtension {
    /// The unrecognized extension code.
    pub fn code(&self) -> u16 {
        self.code
    }

    /// The opaque payload as it appeared on the wire.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    pub(crate) fn parse(reader: &mut Reader<'_>, code: u16, size: usize) -> Result<Self> {
        Ok(Self {
            code,
            value: reader.get_fixed(size)?,
        })
    }

    pub(crate) fn serialize(&self) -> Result<Vec<u8>> {
        Err(Error::InvalidState(
            "Cannot encode an unknown TLS extension".into(),
        ))
    }

    pub(crate) fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_sni(payload: &[u8]) -> Result<ServerNameIndicator> {
        let mut reader = Reader::new(payload);
        ServerNameIndicator::parse(&mut reader, payload.len())
    }

    #[test]
    fn test_sni_roundtrip() {
        let sni = ServerNameIndicator::new("example.com");
        let bytes = sni.serialize().unwrap();
        let parsed = parse_sni(&bytes).unwrap();
        assert_eq!(parsed.host_name(), Some("example.com"));
    }

    #[test]
    fn test_sni_server_ack_form() {
        let parsed = parse_sni(&[]).unwrap();
        assert_eq!(parsed.host_name(), None);
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_sni_without_dns_name_rejected() {
        // List holds a single entry of unknown type 7; the trailing bytes
        // are skipped, leaving no DNS name.
        let payload = [0x00, 0x04, 0x07, 0xAA, 0xBB, 0xCC];
        assert!(parse_sni(&payload).is_err());
    }

    #[test]
    fn test_sni_double_name_rejected() {
        let mut payload = vec![0x00, 0x08];
        payload.extend_from_slice(&[0x00, 0x00, 0x01, b'a']); // DNS "a"
        payload.extend_from_slice(&[0x00, 0x00, 0x01, b'b']); // DNS "b"
        assert!(parse_sni(&payload).is_err());
    }

    #[test]
    fn test_supported_groups_roundtrip_and_filters() {
        let groups = SupportedGroups::new(&[
            GroupParams::X25519,
            GroupParams::Secp256r1,
            GroupParams::Ffdhe2048,
        ]);
        let bytes = groups.serialize().unwrap();

        let mut reader = Reader::new(&bytes);
        let parsed = SupportedGroups::parse(&mut reader, bytes.len()).unwrap();
        assert_eq!(parsed.groups(), &[29, 23, 256]);
        assert_eq!(
            parsed.ec_groups(),
            vec![GroupParams::X25519, GroupParams::Secp256r1]
        );
        assert_eq!(parsed.dh_groups(), vec![GroupParams::Ffdhe2048]);
    }

    #[test]
    fn test_supported_groups_odd_length_rejected() {
        let payload = [0x00, 0x03, 0x00, 0x17, 0x00];
        let mut reader = Reader::new(&payload);
        assert!(SupportedGroups::parse(&mut reader, payload.len()).is_err());
    }

    #[test]
    fn test_point_formats_preference() {
        let payload = [0x02, 0x01, 0x00];
        let mut reader = Reader::new(&payload);
        let parsed = SupportedPointFormats::parse(&mut reader, payload.len()).unwrap();
        assert!(parsed.prefers_compressed());

        let payload = [0x01, 0x00];
        let mut reader = Reader::new(&payload);
        let parsed = SupportedPointFormats::parse(&mut reader, payload.len()).unwrap();
        assert!(!parsed.prefers_compressed());
    }

    #[test]
    fn test_point_formats_require_uncompressed() {
        let payload = [0x01, 0x01];
        let mut reader = Reader::new(&payload);
        assert!(SupportedPointFormats::parse(&mut reader, payload.len()).is_err());
    }

    #[test]
    fn test_signature_algorithms_zero_length_rejected() {
        let payload = [0x00, 0x00];
        let mut reader = Reader::new(&payload);
        assert!(SignatureAlgorithms::parse(&mut reader, payload.len()).is_err());
    }

    #[test]
    fn test_signature_algorithms_roundtrip() {
        let algs =
            SignatureAlgorithms::new(&[SignatureScheme::EcdsaSha256, SignatureScheme::Ed25519]);
        let bytes = algs.serialize().unwrap();

        let mut reader = Reader::new(&bytes);
        let parsed = SignatureAlgorithms::parse(&mut reader, bytes.len()).unwrap();
        assert_eq!(parsed.schemes(), &[0x0403, 0x0807]);
        assert_eq!(
            parsed.supported_schemes(),
            vec![SignatureScheme::EcdsaSha256, SignatureScheme::Ed25519]
        );
    }

    #[test]
    fn test_srtp_nonempty_mki_rejected() {
        // One profile, then a 1-byte MKI.
        let payload = [0x00, 0x02, 0x00, 0x01, 0x01, 0xAA];
        let mut reader = Reader::new(&payload);
        assert!(SrtpProtectionProfiles::parse(&mut reader, payload.len()).is_err());
    }

    #[test]
    fn test_alpn_empty_name_rejected() {
        let payload = [0x00, 0x02, 0x00, 0x01];
        let mut reader = Reader::new(&payload);
        assert!(AlpnProtocols::parse(&mut reader, payload.len(), ConnectionSide::Client).is_err());
    }

    #[test]
    fn test_alpn_server_arity() {
        let mut payload = vec![0x00, 0x06];
        payload.extend_from_slice(&[0x02, b'h', b'2']);
        payload.extend_from_slice(&[0x02, b'h', b'3']);

        let mut reader = Reader::new(&payload);
        assert!(
            AlpnProtocols::parse(&mut reader, payload.len(), ConnectionSide::Server).is_err()
        );

        let mut reader = Reader::new(&payload);
        let parsed =
            AlpnProtocols::parse(&mut reader, payload.len(), ConnectionSide::Client).unwrap();
        assert_eq!(parsed.protocols(), &["h2".to_string(), "h3".to_string()]);
        assert!(parsed.single_protocol().is_err());
    }

    #[test]
    fn test_markers_reject_payload() {
        let payload = [0xAA];
        let mut reader = Reader::new(&payload);
        assert!(EncryptThenMac::parse(&mut reader, 1).is_err());

        let mut reader = Reader::new(&payload);
        assert!(ExtendedMasterSecret::parse(&mut reader, 1).is_err());
    }

    #[test]
    fn test_supported_versions_client_form() {
        let payload = [0x04, 0x03, 0x04, 0x03, 0x03];
        let mut reader = Reader::new(&payload);
        let parsed =
            SupportedVersions::parse(&mut reader, payload.len(), ConnectionSide::Client).unwrap();
        assert!(parsed.supports(ProtocolVersion::TLS_V12));
        assert!(parsed.supports(ProtocolVersion::TLS_V13));
        assert!(!parsed.supports(ProtocolVersion::TLS_V11));
    }

    #[test]
    fn test_supported_versions_server_form_size() {
        let payload = [0x03, 0x03, 0x00];
        let mut reader = Reader::new(&payload);
        assert!(
            SupportedVersions::parse(&mut reader, payload.len(), ConnectionSide::Server).is_err()
        );
    }

    #[test]
    fn test_renegotiation_length_mismatch() {
        // Prefix says 2 bytes but 3 follow within the declared size.
        let payload = [0x02, 0xAA, 0xBB, 0xCC];
        let mut reader = Reader::new(&payload);
        assert!(RenegotiationExtension::parse(&mut reader, payload.len()).is_err());
    }

    #[test]
    fn test_unknown_extension_preserved_not_serializable() {
        let payload = [0xDE, 0xAD, 0xBE, 0xEF];
        let mut reader = Reader::new(&payload);
        let parsed = UnknownExtension::parse(&mut reader, 0xFFAA, payload.len()).unwrap();
        assert_eq!(parsed.code(), 0xFFAA);
        assert_eq!(parsed.value(), &payload);
        assert!(matches!(
            parsed.serialize(),
            Err(Error::InvalidState(_))
        ));
    }
}
