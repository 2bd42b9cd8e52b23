//! Protocol constants: versions, content types, handshake tags,
//! extension codes.

/// TLS/DTLS protocol version as the on-wire (major, minor) pair.
///
/// Arbitrary pairs are representable so that version lists captured from
/// the wire (supported_versions, GREASE values, future versions) survive
/// a parse/serialize round trip bit-exactly. The named constants cover the
/// versions this layer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProtocolVersion {
    major: u8,
    minor: u8,
}

impl ProtocolVersion {
    /// TLS 1.0 (RFC 2246) - recognized for downgrade signaling only
    pub const TLS_V10: Self = Self::new(3, 1);

    /// TLS 1.1 (RFC 4346) - recognized for downgrade signaling only
    pub const TLS_V11: Self = Self::new(3, 2);

    /// TLS 1.2 (RFC 5246)
    pub const TLS_V12: Self = Self::new(3, 3);

    /// TLS 1.3 (RFC 8446) - may appear in supported_versions offers
    pub const TLS_V13: Self = Self::new(3, 4);

    /// DTLS 1.0 (RFC 4347) - used as the HelloVerifyRequest wire version
    pub const DTLS_V10: Self = Self::new(254, 255);

    /// DTLS 1.2 (RFC 6347)
    pub const DTLS_V12: Self = Self::new(254, 253);

    /// Create a version from its wire pair.
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    /// Create from the wire u16 (major byte first).
    pub const fn from_u16(value: u16) -> Self {
        Self::new((value >> 8) as u8, value as u8)
    }

    /// Convert to the wire u16.
    pub const fn to_u16(self) -> u16 {
        ((self.major as u16) << 8) | (self.minor as u16)
    }

    /// Major version byte.
    pub const fn major(self) -> u8 {
        self.major
    }

    /// Minor version byte.
    pub const fn minor(self) -> u8 {
        self.minor
    }

    /// Whether this is a datagram (DTLS) version.
    pub const fn is_datagram_protocol(self) -> bool {
        self.major == 254 || self.major == 255
    }

    /// Whether this layer negotiates the version (TLS 1.2 / DTLS 1.2).
    pub const fn is_negotiable(self) -> bool {
        self.to_u16() == Self::TLS_V12.to_u16() || self.to_u16() == Self::DTLS_V12.to_u16()
    }

    /// Printable name for known versions.
    pub const fn name(self) -> Option<&'static str> {
        match (self.major, self.minor) {
            (3, 1) => Some("TLS 1.0"),
            (3, 2) => Some("TLS 1.1"),
            (3, 3) => Some("TLS 1.2"),
            (3, 4) => Some("TLS 1.3"),
            (254, 255) => Some("DTLS 1.0"),
            (254, 253) => Some("DTLS 1.2"),
            _ => None,
        }
    }
}

/// Which peer produced a message or extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionSide {
    /// The connection initiator.
    Client,
    /// The connection responder.
    Server,
}

/// TLS record content type (RFC 5246 Section 6.2.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ContentType {
    /// Change cipher spec (20)
    ChangeCipherSpec = 20,

    /// Alert (21)
    Alert = 21,

    /// Handshake (22)
    Handshake = 22,

    /// Application data (23)
    ApplicationData = 23,
}

impl ContentType {
    /// Create from wire format (u8).
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            20 => Some(ContentType::ChangeCipherSpec),
            21 => Some(ContentType::Alert),
            22 => Some(ContentType::Handshake),
            23 => Some(ContentType::ApplicationData),
            _ => None,
        }
    }

    /// Convert to wire format (u8).
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

/// Handshake message type (RFC 5246 Section 7.4, RFC 6347 Section 4.3.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HandshakeType {
    /// HelloRequest (0)
    HelloRequest = 0,

    /// ClientHello (1)
    ClientHello = 1,

    /// ServerHello (2)
    ServerHello = 2,

    /// HelloVerifyRequest (3) - DTLS only
    HelloVerifyRequest = 3,

    /// NewSessionTicket (4)
    NewSessionTicket = 4,

    /// Certificate (11)
    Certificate = 11,

    /// ServerKeyExchange (12)
    ServerKeyExchange = 12,

    /// CertificateRequest (13)
    CertificateRequest = 13,

    /// ServerHelloDone (14)
    ServerHelloDone = 14,

    /// CertificateVerify (15)
    CertificateVerify = 15,

    /// ClientKeyExchange (16)
    ClientKeyExchange = 16,

    /// Finished (20)
    Finished = 20,

    /// ChangeCipherSpec pseudo-tag for internal routing. Carried on its
    /// own record content type, never inside a handshake header.
    ChangeCipherSpec = 254,
}

impl HandshakeType {
    /// Create from a wire tag. The ChangeCipherSpec pseudo-tag is not a
    /// wire value and is never returned here.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(HandshakeType::HelloRequest),
            1 => Some(HandshakeType::ClientHello),
            2 => Some(HandshakeType::ServerHello),
            3 => Some(HandshakeType::HelloVerifyRequest),
            4 => Some(HandshakeType::NewSessionTicket),
            11 => Some(HandshakeType::Certificate),
            12 => Some(HandshakeType::ServerKeyExchange),
            13 => Some(HandshakeType::CertificateRequest),
            14 => Some(HandshakeType::ServerHelloDone),
            15 => Some(HandshakeType::CertificateVerify),
            16 => Some(HandshakeType::ClientKeyExchange),
            20 => Some(HandshakeType::Finished),
            _ => None,
        }
    }

    /// Convert to wire format (u8).
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

/// TLS extension codes known to the registry (IANA registry values).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ExtensionType {
    /// server_name (0) - RFC 6066
    ServerName = 0,

    /// status_request (5) - RFC 6066, OCSP stapling
    StatusRequest = 5,

    /// supported_groups (10) - RFC 8422 / RFC 7919
    SupportedGroups = 10,

    /// ec_point_formats (11) - RFC 4492
    EcPointFormats = 11,

    /// signature_algorithms (13) - RFC 5246
    SignatureAlgorithms = 13,

    /// use_srtp (14) - RFC 5764
    UseSrtp = 14,

    /// application_layer_protocol_negotiation (16) - RFC 7301
    ApplicationLayerProtocolNegotiation = 16,

    /// encrypt_then_mac (22) - RFC 7366
    EncryptThenMac = 22,

    /// extended_master_secret (23) - RFC 7627
    ExtendedMasterSecret = 23,

    /// session_ticket (35) - RFC 5077
    SessionTicket = 35,

    /// supported_versions (43) - RFC 8446
    SupportedVersions = 43,

    /// renegotiation_info (0xFF01) - RFC 5746
    RenegotiationInfo = 0xFF01,
}

impl ExtensionType {
    /// Create from wire format (u16). Unknown codes return `None` and are
    /// carried opaquely by the extensions container.
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            0 => Some(ExtensionType::ServerName),
            5 => Some(ExtensionType::StatusRequest),
            10 => Some(ExtensionType::SupportedGroups),
            11 => Some(ExtensionType::EcPointFormats),
            13 => Some(ExtensionType::SignatureAlgorithms),
            14 => Some(ExtensionType::UseSrtp),
            16 => Some(ExtensionType::ApplicationLayerProtocolNegotiation),
            22 => Some(ExtensionType::EncryptThenMac),
            23 => Some(ExtensionType::ExtendedMasterSecret),
            35 => Some(ExtensionType::SessionTicket),
            43 => Some(ExtensionType::SupportedVersions),
            0xFF01 => Some(ExtensionType::RenegotiationInfo),
            _ => None,
        }
    }

    /// Convert to wire format (u16).
    pub const fn to_u16(self) -> u16 {
        self as u16
    }
}
