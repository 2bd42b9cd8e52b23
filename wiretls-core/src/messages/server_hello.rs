//! ServerHello message (RFC 5246 Section 7.4.1.3).

use wiretls_crypto::Random;

use crate::cipher::CipherSuite;
use crate::error::{Error, Result};
use crate::extension_types::{
    AlpnProtocols, EncryptThenMac, ExtendedMasterSecret, RenegotiationExtension, SessionTicket,
};
use crate::extensions::{Extension, Extensions};
use crate::messages::client_hello::ClientHello;
use crate::policy::Policy;
use crate::protocol::{ConnectionSide, ExtensionType, HandshakeType, ProtocolVersion};
use crate::random::{hello_random, random_signals_downgrade, Clock};
use crate::wire::{Reader, Writer};

/// Construction parameters for an outbound ServerHello.
#[derive(Debug, Clone)]
pub struct ServerHelloSettings {
    /// Negotiated protocol version.
    pub version: ProtocolVersion,

    /// Session id for the new session (may be empty).
    pub session_id: Vec<u8>,

    /// Selected ciphersuite code.
    pub ciphersuite: u16,

    /// Whether to offer a session ticket.
    pub offer_session_ticket: bool,
}

/// ServerHello message.
///
/// ```text
/// struct {
///     ProtocolVersion server_version;
///     Random random;
///     SessionID session_id;
///     CipherSuite cipher_suite;
///     CompressionMethod compression_method;
///     select (extensions_present) { case true: Extension extensions<0..2^16-1>; };
/// } ServerHello;
/// ```
#[derive(Debug, Clone)]
pub struct ServerHello {
    legacy_version: ProtocolVersion,
    random: [u8; 32],
    session_id: Vec<u8>,
    ciphersuite: u16,
    comp_method: u8,
    extensions: Extensions,
    cached_serialization: Option<Vec<u8>>,
}

impl PartialEq for ServerHello {
    fn eq(&self, other: &Self) -> bool {
        self.legacy_version == other.legacy_version
            && self.random == other.random
            && self.session_id == other.session_id
            && self.ciphersuite == other.ciphersuite
            && self.comp_method == other.comp_method
            && self.extensions == other.extensions
    }
}

impl Eq for ServerHello {}

impl ServerHello {
    /// The wire tag of this message.
    pub fn handshake_type(&self) -> HandshakeType {
        HandshakeType::ServerHello
    }

    /// Construct a ServerHello answering `client_hello`.
    ///
    /// Extensions are echoed only where the client offered them:
    /// renegotiation info, extended master secret, encrypt-then-MAC (for
    /// CBC suites), a session ticket offer, and the single negotiated
    /// ALPN protocol.
    pub fn build(
        rng: &dyn Random,
        clock: &dyn Clock,
        policy: &dyn Policy,
        reneg_info: &[u8],
        client_hello: &ClientHello,
        settings: ServerHelloSettings,
        next_protocol: Option<&str>,
    ) -> Result<Self> {
        if !settings.version.is_negotiable() {
            return Err(Error::InvalidArgument(format!(
                "Cannot select version {:04x}",
                settings.version.to_u16()
            )));
        }
        if settings.session_id.len() > 32 {
            return Err(Error::InvalidArgument("Session id too long".into()));
        }
        if !policy.acceptable_ciphersuite(settings.ciphersuite) {
            return Err(Error::policy_rejection(format!(
                "Policy refused ciphersuite {:04x}",
                settings.ciphersuite
            )));
        }
        if !client_hello.offered_suite(settings.ciphersuite) {
            return Err(Error::InvalidArgument(
                "Selecting a ciphersuite the client did not offer".into(),
            ));
        }

        let mut extensions = Extensions::new();
        if client_hello.secure_renegotiation() {
            extensions.add(Extension::RenegotiationInfo(RenegotiationExtension::new(
                reneg_info.to_vec(),
            )))?;
        }
        if client_hello.supports_extended_master_secret() {
            extensions.add(Extension::ExtendedMasterSecret(ExtendedMasterSecret))?;
        }
        let selected_is_cbc = CipherSuite::from_u16(settings.ciphersuite)
            .map(|suite| !suite.cipher_algo().is_aead())
            .unwrap_or(false);
        if client_hello.supports_encrypt_then_mac() && selected_is_cbc {
            extensions.add(Extension::EncryptThenMac(EncryptThenMac))?;
        }
        if settings.offer_session_ticket && client_hello.supports_session_ticket() {
            extensions.add(Extension::SessionTicket(SessionTicket::new(Vec::new())))?;
        }
        if let Some(protocol) = next_protocol {
            if !client_hello.supports_alpn() {
                return Err(Error::InvalidArgument(
                    "Selecting an ALPN protocol the client did not negotiate".into(),
                ));
            }
            extensions.add(Extension::Alpn(AlpnProtocols::new(vec![
                protocol.to_string()
            ])))?;
        }

        let mut hello = Self {
            legacy_version: settings.version,
            random: hello_random(rng, clock, policy)?,
            session_id: settings.session_id,
            ciphersuite: settings.ciphersuite,
            comp_method: 0,
            extensions,
            cached_serialization: None,
        };
        hello.cached_serialization = Some(hello.encode()?);
        Ok(hello)
    }

    /// Parse a ServerHello body. The slice must be consumed exactly.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(buf);

        let legacy_version = ProtocolVersion::from_u16(reader.get_u16()?);

        let random: [u8; 32] = reader
            .get_fixed(32)?
            .try_into()
            .map_err(|_| Error::decode("Truncated hello random"))?;

        let session_id = reader.get_range_u8(1, 0, 32)?;
        let ciphersuite = reader.get_u16()?;

        let comp_method = reader.get_byte()?;
        if comp_method != 0 {
            return Err(Error::decode("ServerHello with non-null compression"));
        }

        let extensions = Extensions::deserialize(
            &mut reader,
            ConnectionSide::Server,
            HandshakeType::ServerHello,
        )?;

        Ok(Self {
            legacy_version,
            random,
            session_id,
            ciphersuite,
            comp_method,
            extensions,
            cached_serialization: Some(buf.to_vec()),
        })
    }

    /// Serialize the message body.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        match &self.cached_serialization {
            Some(cached) => Ok(cached.clone()),
            None => self.encode(),
        }
    }

    fn encode(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new();
        writer.put_u16(self.legacy_version.to_u16());
        writer.put_slice(&self.random);
        writer.append_length_value(&self.session_id, 1)?;
        writer.put_u16(self.ciphersuite);
        writer.put_u8(self.comp_method);
        writer.put_slice(&self.extensions.serialize(ConnectionSide::Server)?);
        Ok(writer.into_vec())
    }

    /// The version carried in the legacy_version field.
    pub fn legacy_version(&self) -> ProtocolVersion {
        self.legacy_version
    }

    /// The negotiated version. For TLS 1.2 peers this is exactly the
    /// legacy_version field.
    pub fn selected_version(&self) -> ProtocolVersion {
        self.legacy_version
    }

    /// The 32-byte server random.
    pub fn random(&self) -> &[u8; 32] {
        &self.random
    }

    /// The session id for the negotiated session.
    pub fn session_id(&self) -> &[u8] {
        &self.session_id
    }

    /// The selected ciphersuite code.
    pub fn ciphersuite(&self) -> u16 {
        self.ciphersuite
    }

    /// The compression method (always null).
    pub fn compression_method(&self) -> u8 {
        self.comp_method
    }

    /// The extensions block.
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    /// Extension codes present, in wire order.
    pub fn extension_types(&self) -> Vec<u16> {
        self.extensions.extension_types()
    }

    /// Whether the server agreed to secure renegotiation.
    pub fn secure_renegotiation(&self) -> bool {
        self.extensions.has(ExtensionType::RenegotiationInfo)
    }

    /// Verify-data from the renegotiation extension.
    pub fn renegotiation_info(&self) -> Vec<u8> {
        self.extensions
            .renegotiation_info()
            .map(|reneg| reneg.renegotiation_info().to_vec())
            .unwrap_or_default()
    }

    /// The negotiated ALPN protocol, if any.
    pub fn next_protocol(&self) -> Option<String> {
        self.extensions
            .alpn()
            .and_then(|alpn| alpn.single_protocol().ok())
            .map(str::to_string)
    }

    /// Whether extended_master_secret was agreed.
    pub fn supports_extended_master_secret(&self) -> bool {
        self.extensions.has(ExtensionType::ExtendedMasterSecret)
    }

    /// Whether encrypt_then_mac was agreed.
    pub fn supports_encrypt_then_mac(&self) -> bool {
        self.extensions.has(ExtensionType::EncryptThenMac)
    }

    /// Whether the server will send a NewSessionTicket.
    pub fn supports_session_ticket(&self) -> bool {
        self.extensions.has(ExtensionType::SessionTicket)
    }

    /// Whether the server agreed to staple an OCSP response.
    pub fn supports_certificate_status_message(&self) -> bool {
        self.extensions.has(ExtensionType::StatusRequest)
    }

    /// The negotiated SRTP profile, if any.
    pub fn srtp_profile(&self) -> Option<u16> {
        let profiles = self.extensions.srtp()?.profiles();
        profiles.first().copied()
    }

    /// Whether the server prefers compressed EC points.
    pub fn prefers_compressed_ec_points(&self) -> bool {
        self.extensions
            .point_formats()
            .map(|formats| formats.prefers_compressed())
            .unwrap_or(false)
    }

    /// The downgrade the server random signals, if any.
    ///
    /// A TLS 1.3 capable server ends its random with a fixed sentinel
    /// when negotiating an older version; the returned value is the
    /// version the sentinel designates.
    pub fn random_signals_downgrade(&self) -> Option<ProtocolVersion> {
        random_signals_downgrade(&self.random)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::CipherSuite;
    use crate::messages::client_hello::{ClientHello, ClientHelloSettings};
    use crate::policy::DefaultPolicy;
    use crate::random::{DOWNGRADE_TLS10, DOWNGRADE_TLS11};
    use wiretls_crypto::CryptoProvider;
    use wiretls_crypto_mock::MockProvider;

    struct TestClock;

    impl Clock for TestClock {
        fn gmt_unix_time(&self) -> u32 {
            0x0102_0304
        }
    }

    fn client_hello() -> ClientHello {
        let provider = MockProvider::new();
        ClientHello::build(
            provider.random(),
            &TestClock,
            &DefaultPolicy,
            &[],
            ClientHelloSettings {
                version: ProtocolVersion::TLS_V12,
                hostname: None,
                session_id: Vec::new(),
                cipher_suites: vec![
                    CipherSuite::EcdheRsaWithAes128GcmSha256,
                    CipherSuite::EcdheRsaWithAes128CbcSha,
                ],
                srtp_profiles: Vec::new(),
                session_ticket: Some(Vec::new()),
            },
            &["h2".to_string()],
        )
        .unwrap()
    }

    fn build_server_hello(suite: u16) -> ServerHello {
        let provider = MockProvider::new();
        ServerHello::build(
            provider.random(),
            &TestClock,
            &DefaultPolicy,
            &[],
            &client_hello(),
            ServerHelloSettings {
                version: ProtocolVersion::TLS_V12,
                session_id: vec![0x01, 0x02],
                ciphersuite: suite,
                offer_session_ticket: true,
            },
            Some("h2"),
        )
        .unwrap()
    }

    #[test]
    fn test_build_and_reparse() {
        let hello = build_server_hello(0xC02F);
        let bytes = hello.serialize().unwrap();
        let parsed = ServerHello::decode(&bytes).unwrap();

        assert_eq!(parsed, hello);
        assert_eq!(parsed.selected_version(), ProtocolVersion::TLS_V12);
        assert_eq!(parsed.ciphersuite(), 0xC02F);
        assert_eq!(parsed.session_id(), &[0x01, 0x02]);
        assert_eq!(parsed.next_protocol(), Some("h2".to_string()));
        assert!(parsed.supports_session_ticket());
        assert!(parsed.supports_extended_master_secret());
        // GCM suite: no encrypt_then_mac echo.
        assert!(!parsed.supports_encrypt_then_mac());
    }

    #[test]
    fn test_encrypt_then_mac_echoed_for_cbc_suite() {
        let hello = build_server_hello(0xC013);
        assert!(hello.supports_encrypt_then_mac());
    }

    #[test]
    fn test_nonzero_compression_rejected() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&[0x03, 0x03]);
        bytes.extend_from_slice(&[0u8; 32]);
        bytes.push(0);
        bytes.extend_from_slice(&[0x00, 0x9C]);
        bytes.push(1); // non-null compression
        assert!(ServerHello::decode(&bytes).is_err());
    }

    #[test]
    fn test_unoffered_suite_rejected() {
        let provider = MockProvider::new();
        let result = ServerHello::build(
            provider.random(),
            &TestClock,
            &DefaultPolicy,
            &[],
            &client_hello(),
            ServerHelloSettings {
                version: ProtocolVersion::TLS_V12,
                session_id: Vec::new(),
                ciphersuite: 0x009C,
                offer_session_ticket: false,
            },
            None,
        );
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_downgrade_sentinels() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&[0x03, 0x03]);
        let mut random = [0u8; 32];
        random[24..].copy_from_slice(&DOWNGRADE_TLS11);
        bytes.extend_from_slice(&random);
        bytes.push(0);
        bytes.extend_from_slice(&[0x00, 0x9C]);
        bytes.push(0);
        bytes.extend_from_slice(&[0x00, 0x00]);

        let hello = ServerHello::decode(&bytes).unwrap();
        assert_eq!(
            hello.random_signals_downgrade(),
            Some(ProtocolVersion::TLS_V11)
        );

        let mut bytes10 = bytes.clone();
        bytes10[2 + 24..2 + 32].copy_from_slice(&DOWNGRADE_TLS10);
        let hello = ServerHello::decode(&bytes10).unwrap();
        assert_eq!(
            hello.random_signals_downgrade(),
            Some(ProtocolVersion::TLS_V10)
        );

        let mut plain = bytes.clone();
        plain[2 + 31] = 0x42;
        let hello = ServerHello::decode(&plain).unwrap();
        assert_eq!(hello.random_signals_downgrade(), None);
    }
}
