//! The extensions container and the extension registry.
//!
//! An extensions block is an ordered sequence of `(code, size, payload)`
//! triples behind a 2-byte total-size prefix. The container enforces code
//! uniqueness, preserves insertion order as serialization order, and
//! round-trips bit-exactly except that a block whose every carrier is
//! elidable-empty serializes to nothing at all.

use crate::error::{Error, Result};
use crate::extension_types::{
    AlpnProtocols, CertificateStatusRequest, EncryptThenMac, ExtendedMasterSecret,
    RenegotiationExtension, ServerNameIndicator, SessionTicket, SignatureAlgorithms,
    SrtpProtectionProfiles, SupportedGroups, SupportedPointFormats, SupportedVersions,
    UnknownExtension,
};
use crate::protocol::{ConnectionSide, ExtensionType, HandshakeType};
use crate::wire::{Reader, Writer};

/// A single parsed extension: one variant per registry entry plus the
/// opaque carrier for unrecognized codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extension {
    /// server_name (0)
    ServerName(ServerNameIndicator),
    /// status_request (5)
    StatusRequest(CertificateStatusRequest),
    /// supported_groups (10)
    SupportedGroups(SupportedGroups),
    /// ec_point_formats (11)
    PointFormats(SupportedPointFormats),
    /// signature_algorithms (13)
    SignatureAlgorithms(SignatureAlgorithms),
    /// use_srtp (14)
    Srtp(SrtpProtectionProfiles),
    /// application_layer_protocol_negotiation (16)
    Alpn(AlpnProtocols),
    /// encrypt_then_mac (22)
    EncryptThenMac(EncryptThenMac),
    /// extended_master_secret (23)
    ExtendedMasterSecret(ExtendedMasterSecret),
    /// session_ticket (35)
    SessionTicket(SessionTicket),
    /// supported_versions (43)
    SupportedVersions(SupportedVersions),
    /// renegotiation_info (0xFF01)
    RenegotiationInfo(RenegotiationExtension),
    /// any other code, retained opaquely
    Unknown(UnknownExtension),
}

impl Extension {
    /// The 16-bit extension code of this carrier.
    pub fn code(&self) -> u16 {
        match self {
            Extension::ServerName(_) => ExtensionType::ServerName.to_u16(),
            Extension::StatusRequest(_) => ExtensionType::StatusRequest.to_u16(),
            Extension::SupportedGroups(_) => ExtensionType::SupportedGroups.to_u16(),
            Extension::PointFormats(_) => ExtensionType::EcPointFormats.to_u16(),
            Extension::SignatureAlgorithms(_) => ExtensionType::SignatureAlgorithms.to_u16(),
            Extension::Srtp(_) => ExtensionType::UseSrtp.to_u16(),
            Extension::Alpn(_) => {
                ExtensionType::ApplicationLayerProtocolNegotiation.to_u16()
            },
            Extension::EncryptThenMac(_) => ExtensionType::EncryptThenMac.to_u16(),
            Extension::ExtendedMasterSecret(_) => ExtensionType::ExtendedMasterSecret.to_u16(),
            Extension::SessionTicket(_) => ExtensionType::SessionTicket.to_u16(),
            Extension::SupportedVersions(_) => ExtensionType::SupportedVersions.to_u16(),
            Extension::RenegotiationInfo(_) => ExtensionType::RenegotiationInfo.to_u16(),
            Extension::Unknown(ext) => ext.code(),
        }
    }

    /// Whether the carrier's logical payload is empty and the extension
    /// is elided from the wire. The empty markers and the carriers whose
    /// zero-length form is meaningful report `false`.
    pub fn is_empty(&self) -> bool {
        match self {
            Extension::ServerName(ext) => ext.is_empty(),
            Extension::StatusRequest(ext) => ext.is_empty(),
            Extension::SupportedGroups(ext) => ext.is_empty(),
            Extension::PointFormats(ext) => ext.is_empty(),
            Extension::SignatureAlgorithms(ext) => ext.is_empty(),
            Extension::Srtp(ext) => ext.is_empty(),
            Extension::Alpn(ext) => ext.is_empty(),
            Extension::EncryptThenMac(ext) => ext.is_empty(),
            Extension::ExtendedMasterSecret(ext) => ext.is_empty(),
            Extension::SessionTicket(ext) => ext.is_empty(),
            Extension::SupportedVersions(ext) => ext.is_empty(),
            Extension::RenegotiationInfo(ext) => ext.is_empty(),
            Extension::Unknown(ext) => ext.is_empty(),
        }
    }

    /// Serialize the payload (without the outer code + size header).
    ///
    /// # Errors
    ///
    /// `InvalidState` for unknown extensions, which the core never
    /// forwards outbound.
    pub fn serialize(&self, side: ConnectionSide) -> Result<Vec<u8>> {
        match self {
            Extension::ServerName(ext) => ext.serialize(),
            Extension::StatusRequest(ext) => ext.serialize(side),
            Extension::SupportedGroups(ext) => ext.serialize(),
            Extension::PointFormats(ext) => ext.serialize(),
            Extension::SignatureAlgorithms(ext) => ext.serialize(),
            Extension::Srtp(ext) => ext.serialize(),
            Extension::Alpn(ext) => ext.serialize(),
            Extension::EncryptThenMac(ext) => ext.serialize(),
            Extension::ExtendedMasterSecret(ext) => ext.serialize(),
            Extension::SessionTicket(ext) => ext.serialize(),
            Extension::SupportedVersions(ext) => ext.serialize(side),
            Extension::RenegotiationInfo(ext) => ext.serialize(),
            Extension::Unknown(ext) => ext.serialize(),
        }
    }

    // The extension registry: a total function from code to carrier
    // constructor. The table is this match; it is fixed at compile time
    // and codes outside it land in UnknownExtension.
    fn parse(
        reader: &mut Reader<'_>,
        code: u16,
        size: usize,
        from: ConnectionSide,
        message_type: HandshakeType,
    ) -> Result<Extension> {
        let extension = match ExtensionType::from_u16(code) {
            Some(ExtensionType::ServerName) => {
                Extension::ServerName(ServerNameIndicator::parse(reader, size)?)
            },
            Some(ExtensionType::StatusRequest) => Extension::StatusRequest(
                CertificateStatusRequest::parse(reader, size, message_type)?,
            ),
            Some(ExtensionType::SupportedGroups) => {
                Extension::SupportedGroups(SupportedGroups::parse(reader, size)?)
            },
            Some(ExtensionType::EcPointFormats) => {
                Extension::PointFormats(SupportedPointFormats::parse(reader, size)?)
            },
            Some(ExtensionType::SignatureAlgorithms) => {
                Extension::SignatureAlgorithms(SignatureAlgorithms::parse(reader, size)?)
            },
            Some(ExtensionType::UseSrtp) => {
                Extension::Srtp(SrtpProtectionProfiles::parse(reader, size)?)
            },
            Some(ExtensionType::ApplicationLayerProtocolNegotiation) => {
                Extension::Alpn(AlpnProtocols::parse(reader, size, from)?)
            },
            Some(ExtensionType::EncryptThenMac) => {
                Extension::EncryptThenMac(EncryptThenMac::parse(reader, size)?)
            },
            Some(ExtensionType::ExtendedMasterSecret) => {
                Extension::ExtendedMasterSecret(ExtendedMasterSecret::parse(reader, size)?)
            },
            Some(ExtensionType::SessionTicket) => {
                Extension::SessionTicket(SessionTicket::parse(reader, size)?)
            },
            Some(ExtensionType::SupportedVersions) => {
                Extension::SupportedVersions(SupportedVersions::parse(reader, size, from)?)
            },
            Some(ExtensionType::RenegotiationInfo) => {
                Extension::RenegotiationInfo(RenegotiationExtension::parse(reader, size)?)
            },
            None => {
                tracing::debug!(code, size, "retaining unknown TLS extension");
                Extension::Unknown(UnknownExtension::parse(reader, code, size)?)
            },
        };
        Ok(extension)
    }
}

/// Ordered, uniqueness-enforcing extension collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extensions {
    entries: Vec<Extension>,
}

impl Extensions {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an extension.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if an extension with the same code is already
    /// present.
    pub fn add(&mut self, extension: Extension) -> Result<()> {
        if self.has_code(extension.code()) {
            return Err(Error::InvalidArgument(format!(
                "Cannot add the same extension twice: {}",
                extension.code()
            )));
        }
        self.entries.push(extension);
        Ok(())
    }

    /// Whether an extension with `code` is present.
    pub fn has_code(&self, code: u16) -> bool {
        self.entries.iter().any(|e| e.code() == code)
    }

    /// Whether a known extension type is present.
    pub fn has(&self, ext_type: ExtensionType) -> bool {
        self.has_code(ext_type.to_u16())
    }

    /// Get the extension with `code`, if present.
    pub fn get(&self, code: u16) -> Option<&Extension> {
        self.entries.iter().find(|e| e.code() == code)
    }

    /// Remove and return the extension with `code`.
    pub fn take(&mut self, code: u16) -> Option<Extension> {
        let index = self.entries.iter().position(|e| e.code() == code)?;
        Some(self.entries.remove(index))
    }

    /// The extension codes in insertion (= serialization) order.
    pub fn extension_types(&self) -> Vec<u16> {
        self.entries.iter().map(Extension::code).collect()
    }

    /// Number of extensions present.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection holds no extensions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse an extensions block, consuming the remainder of `reader`.
    ///
    /// An exhausted reader yields an empty collection (the block is
    /// optional in the hello messages). A present block must declare
    /// exactly the remaining bytes, and each `(code, size, payload)`
    /// triple is dispatched through the registry. A repeated code is a
    /// fatal decode error (alert DECODE_ERROR).
    pub fn deserialize(
        reader: &mut Reader<'_>,
        from: ConnectionSide,
        message_type: HandshakeType,
    ) -> Result<Self> {
        let mut extensions = Extensions::new();

        if !reader.has_remaining() {
            return Ok(extensions);
        }

        let all_extn_size = usize::from(reader.get_u16()?);
        if reader.remaining_bytes() != all_extn_size {
            return Err(Error::decode("Bad extensions block size"));
        }

        while reader.has_remaining() {
            let code = reader.get_u16()?;
            let size = usize::from(reader.get_u16()?);

            if extensions.has_code(code) {
                return Err(Error::decode("Peer sent duplicated extensions"));
            }

            let before = reader.read_so_far();
            let extension = Extension::parse(reader, code, size, from, message_type)?;
            if reader.read_so_far() - before != size {
                return Err(Error::decode(
                    "Extension payload disagrees with its declared size",
                ));
            }

            extensions.entries.push(extension);
        }

        Ok(extensions)
    }

    /// Serialize the block including its 2-byte total-size prefix.
    ///
    /// Carriers reporting an empty logical payload are elided. If nothing
    /// remains, the result is the empty byte sequence: no block at all
    /// rather than a block of length zero.
    pub fn serialize(&self, side: ConnectionSide) -> Result<Vec<u8>> {
        let mut writer = Writer::new();
        writer.length_prefixed(2, |body| {
            for extension in &self.entries {
                if extension.is_empty() {
                    continue;
                }
                let payload = extension.serialize(side)?;
                body.put_u16(extension.code());
                body.append_length_value(&payload, 2)?;
            }
            Ok(())
        })?;

        let buf = writer.into_vec();
        if buf.len() == 2 {
            return Ok(Vec::new());
        }
        Ok(buf)
    }

    // --- typed views over the entries ---------------------------------

    /// The server_name carrier, if present.
    pub fn server_name(&self) -> Option<&ServerNameIndicator> {
        match self.get(ExtensionType::ServerName.to_u16()) {
            Some(Extension::ServerName(ext)) => Some(ext),
            _ => None,
        }
    }

    /// The status_request carrier, if present.
    pub fn status_request(&self) -> Option<&CertificateStatusRequest> {
        match self.get(ExtensionType::StatusRequest.to_u16()) {
            Some(Extension::StatusRequest(ext)) => Some(ext),
            _ => None,
        }
    }

    /// The supported_groups carrier, if present.
    pub fn supported_groups(&self) -> Option<&SupportedGroups> {
        match self.get(ExtensionType::SupportedGroups.to_u16()) {
            Some(Extension::SupportedGroups(ext)) => Some(ext),
            _ => None,
        }
    }

    /// The ec_point_formats carrier, if present.
    pub fn point_formats(&self) -> Option<&SupportedPointFormats> {
        match self.get(ExtensionType::EcPointFormats.to_u16()) {
            Some(Extension::PointFormats(ext)) => Some(ext),
            _ => None,
        }
    }

    /// The signature_algorithms carrier, if present.
    pub fn signature_algorithms(&self) -> Option<&SignatureAlgorithms> {
        match self.get(ExtensionType::SignatureAlgorithms.to_u16()) {
            Some(Extension::SignatureAlgorithms(ext)) => Some(ext),
            _ => None,
        }
    }

    /// The use_srtp carrier, if present.
    pub fn srtp(&self) -> Option<&SrtpProtectionProfiles> {
        match self.get(ExtensionType::UseSrtp.to_u16()) {
            Some(Extension::Srtp(ext)) => Some(ext),
            _ => None,
        }
    }

    /// The ALPN carrier, if present.
    pub fn alpn(&self) -> Option<&AlpnProtocols> {
        match self.get(ExtensionType::ApplicationLayerProtocolNegotiation.to_u16()) {
            Some(Extension::Alpn(ext)) => Some(ext),
            _ => None,
        }
    }

    /// The session_ticket carrier, if present.
    pub fn session_ticket(&self) -> Option<&SessionTicket> {
        match self.get(ExtensionType::SessionTicket.to_u16()) {
            Some(Extension::SessionTicket(ext)) => Some(ext),
            _ => None,
        }
    }

    /// The supported_versions carrier, if present.
    pub fn supported_versions(&self) -> Option<&SupportedVersions> {
        match self.get(ExtensionType::SupportedVersions.to_u16()) {
            Some(Extension::SupportedVersions(ext)) => Some(ext),
            _ => None,
        }
    }

    /// The renegotiation_info carrier, if present.
    pub fn renegotiation_info(&self) -> Option<&RenegotiationExtension> {
        match self.get(ExtensionType::RenegotiationInfo.to_u16()) {
            Some(Extension::RenegotiationInfo(ext)) => Some(ext),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deserialize(
        bytes: &[u8],
        from: ConnectionSide,
        message_type: HandshakeType,
    ) -> Result<Extensions> {
        let mut reader = Reader::new(bytes);
        Extensions::deserialize(&mut reader, from, message_type)
    }

    #[test]
    fn test_empty_input_is_empty_block() {
        let extensions =
            deserialize(&[], ConnectionSide::Client, HandshakeType::ClientHello).unwrap();
        assert!(extensions.is_empty());
        assert_eq!(
            extensions.serialize(ConnectionSide::Client).unwrap(),
            Vec::<u8>::new()
        );
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let mut extensions = Extensions::new();
        extensions
            .add(Extension::EncryptThenMac(EncryptThenMac))
            .unwrap();
        let result = extensions.add(Extension::EncryptThenMac(EncryptThenMac));
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_wire_duplicate_is_decode_error() {
        // Two empty server_name acknowledgements: the first parses, the
        // second trips the duplicate check.
        let mut bytes = vec![0x00, 0x08];
        for _ in 0..2 {
            bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        }
        let result = deserialize(&bytes, ConnectionSide::Server, HandshakeType::ServerHello);
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_block_size_mismatch_rejected() {
        // Declares 8 bytes but only 6 follow.
        let bytes = [0x00, 0x08, 0x00, 0x17, 0x00, 0x00, 0x00, 0x00];
        let result = deserialize(&bytes, ConnectionSide::Client, HandshakeType::ClientHello);
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_unknown_extension_preserved_and_not_reencodable() {
        let bytes = [0x00, 0x08, 0xFF, 0xAA, 0x00, 0x04, 0xDE, 0xAD, 0xBE, 0xEF];
        let extensions =
            deserialize(&bytes, ConnectionSide::Client, HandshakeType::ClientHello).unwrap();

        assert_eq!(extensions.len(), 1);
        match extensions.get(0xFFAA) {
            Some(Extension::Unknown(unknown)) => {
                assert_eq!(unknown.value(), &[0xDE, 0xAD, 0xBE, 0xEF]);
            },
            other => panic!("unexpected entry: {:?}", other),
        }

        let result = extensions.serialize(ConnectionSide::Client);
        assert!(matches!(result, Err(Error::InvalidState(_))));
    }

    #[test]
    fn test_take_transfers_ownership() {
        let mut extensions = Extensions::new();
        extensions
            .add(Extension::SessionTicket(SessionTicket::new(vec![1, 2, 3])))
            .unwrap();

        let taken = extensions.take(ExtensionType::SessionTicket.to_u16());
        assert!(matches!(taken, Some(Extension::SessionTicket(_))));
        assert!(extensions.is_empty());
        assert!(extensions.take(ExtensionType::SessionTicket.to_u16()).is_none());
    }

    #[test]
    fn test_insertion_order_is_serialization_order() {
        let mut extensions = Extensions::new();
        extensions
            .add(Extension::ExtendedMasterSecret(ExtendedMasterSecret))
            .unwrap();
        extensions
            .add(Extension::EncryptThenMac(EncryptThenMac))
            .unwrap();

        let bytes = extensions.serialize(ConnectionSide::Client).unwrap();
        assert_eq!(bytes, vec![0x00, 0x08, 0x00, 0x17, 0x00, 0x00, 0x00, 0x16, 0x00, 0x00]);
        assert_eq!(extensions.extension_types(), vec![23, 22]);
    }

    #[test]
    fn test_markers_roundtrip_with_zero_size() {
        let bytes = [0x00, 0x08, 0x00, 0x17, 0x00, 0x00, 0x00, 0x16, 0x00, 0x00];
        let extensions =
            deserialize(&bytes, ConnectionSide::Client, HandshakeType::ClientHello).unwrap();
        assert!(extensions.has(ExtensionType::ExtendedMasterSecret));
        assert!(extensions.has(ExtensionType::EncryptThenMac));
        assert_eq!(
            extensions.serialize(ConnectionSide::Client).unwrap(),
            bytes.to_vec()
        );
    }
}
