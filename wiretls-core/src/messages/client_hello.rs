//! ClientHello message (RFC 5246 Section 7.4.1.2, RFC 6347 Section 4.2.1).

use wiretls_crypto::Random;

use crate::algos::{GroupParams, SignatureScheme};
use crate::cipher::CipherSuite;
use crate::error::{Error, Result};
use crate::extension_types::{
    AlpnProtocols, RenegotiationExtension, ServerNameIndicator, SessionTicket,
    SignatureAlgorithms, SrtpProtectionProfiles, SupportedGroups, SupportedPointFormats,
    SupportedVersions,
};
use crate::extensions::{Extension, Extensions};
use crate::messages::hello_verify_request::HelloVerifyRequest;
use crate::policy::Policy;
use crate::protocol::{ConnectionSide, ExtensionType, HandshakeType, ProtocolVersion};
use crate::random::{hello_random, Clock};
use crate::wire::{Reader, Writer};

/// Construction parameters for an outbound ClientHello.
#[derive(Debug, Clone)]
pub struct ClientHelloSettings {
    /// Protocol family being offered (TLS 1.2 or DTLS 1.2).
    pub version: ProtocolVersion,

    /// Host name for the server_name extension, if any.
    pub hostname: Option<String>,

    /// Session id to resume, empty for a fresh session.
    pub session_id: Vec<u8>,

    /// Suites to offer, in preference order.
    pub cipher_suites: Vec<CipherSuite>,

    /// SRTP profiles for DTLS-SRTP, empty to omit the extension.
    pub srtp_profiles: Vec<u16>,

    /// `Some(ticket)` offers the ticket (empty requests a fresh one),
    /// `None` omits the extension.
    pub session_ticket: Option<Vec<u8>>,
}

/// ClientHello message.
///
/// ```text
/// struct {
///     ProtocolVersion client_version;
///     Random random;
///     SessionID session_id;
///     opaque cookie<0..2^8-1>;            /* DTLS only */
///     CipherSuite cipher_suites<2..2^16-2>;
///     CompressionMethod compression_methods<1..2^8-1>;
///     select (extensions_present) { case true: Extension extensions<0..2^16-1>; };
/// } ClientHello;
/// ```
///
/// Parsed instances cache the original bytes so re-serialization is
/// bit-exact; the DTLS cookie update is the one permitted mutation and
/// re-derives the cache.
#[derive(Debug, Clone)]
pub struct ClientHello {
    legacy_version: ProtocolVersion,
    random: [u8; 32],
    session_id: Vec<u8>,
    hello_cookie: Vec<u8>,
    cipher_suites: Vec<u16>,
    compression_methods: Vec<u8>,
    extensions: Extensions,
    cached_serialization: Option<Vec<u8>>,
}

impl PartialEq for ClientHello {
    fn eq(&self, other: &Self) -> bool {
        // The serialization cache is derived state.
        self.legacy_version == other.legacy_version
            && self.random == other.random
            && self.session_id == other.session_id
            && self.hello_cookie == other.hello_cookie
            && self.cipher_suites == other.cipher_suites
            && self.compression_methods == other.compression_methods
            && self.extensions == other.extensions
    }
}

impl Eq for ClientHello {}

impl ClientHello {
    /// The wire tag of this message.
    pub fn handshake_type(&self) -> HandshakeType {
        HandshakeType::ClientHello
    }

    /// Construct a fresh TLS 1.2 / DTLS 1.2 ClientHello.
    ///
    /// The legacy_version field always carries TLS 1.2 (or DTLS 1.2 for
    /// datagram offers) regardless of what the supported_versions
    /// extension announces.
    pub fn build(
        rng: &dyn Random,
        clock: &dyn Clock,
        policy: &dyn Policy,
        reneg_info: &[u8],
        settings: ClientHelloSettings,
        next_protocols: &[String],
    ) -> Result<Self> {
        if !settings.version.is_negotiable() {
            return Err(Error::InvalidArgument(format!(
                "Cannot offer version {:04x}",
                settings.version.to_u16()
            )));
        }
        if settings.session_id.len() > 32 {
            return Err(Error::InvalidArgument("Session id too long".into()));
        }

        let legacy_version = if settings.version.is_datagram_protocol() {
            ProtocolVersion::DTLS_V12
        } else {
            ProtocolVersion::TLS_V12
        };

        let cipher_suites: Vec<u16> = settings
            .cipher_suites
            .iter()
            .map(|s| s.to_u16())
            .filter(|&code| policy.acceptable_ciphersuite(code))
            .collect();
        if cipher_suites.is_empty() {
            return Err(Error::policy_rejection(
                "Policy refused every offered ciphersuite",
            ));
        }

        let mut extensions = Extensions::new();
        extensions.add(Extension::RenegotiationInfo(RenegotiationExtension::new(
            reneg_info.to_vec(),
        )))?;
        if let Some(hostname) = &settings.hostname {
            extensions.add(Extension::ServerName(ServerNameIndicator::new(
                hostname.as_str(),
            )))?;
        }
        extensions.add(Extension::ExtendedMasterSecret(Default::default()))?;
        if let Some(ticket) = settings.session_ticket {
            extensions.add(Extension::SessionTicket(SessionTicket::new(ticket)))?;
        }
        extensions.add(Extension::EncryptThenMac(Default::default()))?;

        let groups: Vec<GroupParams> = [
            GroupParams::X25519,
            GroupParams::Secp256r1,
            GroupParams::Secp384r1,
            GroupParams::Secp521r1,
            GroupParams::Ffdhe2048,
            GroupParams::Ffdhe3072,
        ]
        .into_iter()
        .filter(|&g| policy.acceptable_group(g))
        .collect();
        extensions.add(Extension::SupportedGroups(SupportedGroups::new(&groups)))?;
        extensions.add(Extension::PointFormats(SupportedPointFormats::new(false)))?;

        let schemes: Vec<SignatureScheme> = SignatureScheme::ALL
            .into_iter()
            .filter(|&s| policy.acceptable_signature_scheme(s))
            .collect();
        extensions.add(Extension::SignatureAlgorithms(SignatureAlgorithms::new(
            &schemes,
        )))?;

        if !settings.srtp_profiles.is_empty() {
            extensions.add(Extension::Srtp(SrtpProtectionProfiles::new(
                settings.srtp_profiles,
            )))?;
        }
        if !next_protocols.is_empty() {
            extensions.add(Extension::Alpn(AlpnProtocols::new(
                next_protocols.to_vec(),
            )))?;
        }
        extensions.add(Extension::SupportedVersions(SupportedVersions::for_offer(
            settings.version,
            policy,
        )))?;

        let mut hello = Self {
            legacy_version,
            random: hello_random(rng, clock, policy)?,
            session_id: settings.session_id,
            hello_cookie: Vec::new(),
            cipher_suites,
            compression_methods: vec![0],
            extensions,
            cached_serialization: None,
        };
        hello.cached_serialization = Some(hello.encode()?);
        Ok(hello)
    }

    /// Parse a ClientHello body. The slice must be consumed exactly.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(buf);

        let legacy_version = ProtocolVersion::from_u16(reader.get_u16()?);

        let random: [u8; 32] = reader
            .get_fixed(32)?
            .try_into()
            .map_err(|_| Error::decode("Truncated hello random"))?;

        let session_id = reader.get_range_u8(1, 0, 32)?;

        let hello_cookie = if legacy_version.is_datagram_protocol() {
            reader.get_range_u8(1, 0, 255)?
        } else {
            Vec::new()
        };

        let cipher_suites = reader.get_range_u16(2, 1, 32767)?;

        let compression_methods = reader.get_range_u8(1, 1, 255)?;
        if !compression_methods.contains(&0) {
            return Err(Error::decode(
                "ClientHello compression methods lack the null method",
            ));
        }

        let extensions = Extensions::deserialize(
            &mut reader,
            ConnectionSide::Client,
            HandshakeType::ClientHello,
        )?;

        Ok(Self {
            legacy_version,
            random,
            session_id,
            hello_cookie,
            cipher_suites,
            compression_methods,
            extensions,
            cached_serialization: Some(buf.to_vec()),
        })
    }

    /// Serialize the message body.
    ///
    /// Parsed or freshly built messages return their cached bytes, so a
    /// parse/serialize round trip is bit-exact.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        match &self.cached_serialization {
            Some(cached) => Ok(cached.clone()),
            None => self.encode(),
        }
    }

    fn encode(&self) -> Result<Vec<u8>> {
        self.encode_with_cookie(&self.hello_cookie)
    }

    fn encode_with_cookie(&self, cookie: &[u8]) -> Result<Vec<u8>> {
        let mut writer = Writer::new();

        writer.put_u16(self.legacy_version.to_u16());
        writer.put_slice(&self.random);
        writer.append_length_value(&self.session_id, 1)?;

        if self.legacy_version.is_datagram_protocol() {
            writer.append_length_value(cookie, 1)?;
        }

        writer.length_prefixed(2, |suites| {
            for &suite in &self.cipher_suites {
                suites.put_u16(suite);
            }
            Ok(())
        })?;

        writer.append_length_value(&self.compression_methods, 1)?;
        writer.put_slice(&self.extensions.serialize(ConnectionSide::Client)?);

        Ok(writer.into_vec())
    }

    /// The version carried in the legacy_version field. May differ from
    /// the versions announced in supported_versions.
    pub fn legacy_version(&self) -> ProtocolVersion {
        self.legacy_version
    }

    /// The 32-byte hello random.
    pub fn random(&self) -> &[u8; 32] {
        &self.random
    }

    /// The offered session id.
    pub fn session_id(&self) -> &[u8] {
        &self.session_id
    }

    /// The offered ciphersuite codes, in offer order.
    pub fn ciphersuites(&self) -> &[u16] {
        &self.cipher_suites
    }

    /// Whether `ciphersuite` was offered.
    pub fn offered_suite(&self, ciphersuite: u16) -> bool {
        self.cipher_suites.contains(&ciphersuite)
    }

    /// The offered compression methods (always includes null).
    pub fn compression_methods(&self) -> &[u8] {
        &self.compression_methods
    }

    /// The extensions block.
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    /// Extension codes present, in wire order.
    pub fn extension_types(&self) -> Vec<u16> {
        self.extensions.extension_types()
    }

    /// The SNI host name, if one was sent.
    pub fn sni_hostname(&self) -> Option<&str> {
        self.extensions.server_name().and_then(|sni| sni.host_name())
    }

    /// Versions announced in supported_versions (empty if absent).
    pub fn supported_versions(&self) -> Vec<ProtocolVersion> {
        self.extensions
            .supported_versions()
            .map(|sv| sv.versions().to_vec())
            .unwrap_or_default()
    }

    /// Known signature schemes from signature_algorithms, in offer order.
    pub fn signature_schemes(&self) -> Vec<SignatureScheme> {
        self.extensions
            .signature_algorithms()
            .map(|algs| algs.supported_schemes())
            .unwrap_or_default()
    }

    /// Whether a signature_algorithms extension was sent.
    pub fn sent_signature_algorithms(&self) -> bool {
        self.extensions.has(ExtensionType::SignatureAlgorithms)
    }

    /// Known elliptic-curve groups offered in supported_groups.
    pub fn supported_ecc_curves(&self) -> Vec<GroupParams> {
        self.extensions
            .supported_groups()
            .map(|groups| groups.ec_groups())
            .unwrap_or_default()
    }

    /// Known finite-field DH groups offered in supported_groups.
    pub fn supported_dh_groups(&self) -> Vec<GroupParams> {
        self.extensions
            .supported_groups()
            .map(|groups| groups.dh_groups())
            .unwrap_or_default()
    }

    /// Whether an ALPN extension was sent.
    pub fn supports_alpn(&self) -> bool {
        self.extensions
            .has(ExtensionType::ApplicationLayerProtocolNegotiation)
    }

    /// ALPN protocol names, in offer order.
    pub fn next_protocols(&self) -> Vec<String> {
        self.extensions
            .alpn()
            .map(|alpn| alpn.protocols().to_vec())
            .unwrap_or_default()
    }

    /// Offered SRTP protection profiles.
    pub fn srtp_profiles(&self) -> Vec<u16> {
        self.extensions
            .srtp()
            .map(|srtp| srtp.profiles().to_vec())
            .unwrap_or_default()
    }

    /// Whether the secure renegotiation extension was sent.
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

    /// Whether a session_ticket extension was sent.
    pub fn supports_session_ticket(&self) -> bool {
        self.extensions.has(ExtensionType::SessionTicket)
    }

    /// The offered session ticket (empty requests a new one).
    pub fn session_ticket(&self) -> Vec<u8> {
        self.extensions
            .session_ticket()
            .map(|ticket| ticket.ticket().to_vec())
            .unwrap_or_default()
    }

    /// Whether extended_master_secret was offered.
    pub fn supports_extended_master_secret(&self) -> bool {
        self.extensions.has(ExtensionType::ExtendedMasterSecret)
    }

    /// Whether encrypt_then_mac was offered.
    pub fn supports_encrypt_then_mac(&self) -> bool {
        self.extensions.has(ExtensionType::EncryptThenMac)
    }

    /// Whether an OCSP status request was sent.
    pub fn supports_cert_status_message(&self) -> bool {
        self.extensions.has(ExtensionType::StatusRequest)
    }

    /// Whether the client prefers compressed EC points.
    pub fn prefers_compressed_ec_points(&self) -> bool {
        self.extensions
            .point_formats()
            .map(|formats| formats.prefers_compressed())
            .unwrap_or(false)
    }

    /// The DTLS hello cookie (empty before HelloVerifyRequest).
    pub fn cookie(&self) -> &[u8] {
        &self.hello_cookie
    }

    /// The bytes fed into hello-verify cookie derivation: this hello
    /// serialized with an empty cookie field.
    pub fn cookie_input_data(&self) -> Result<Vec<u8>> {
        if !self.legacy_version.is_datagram_protocol() {
            return Err(Error::InvalidState(
                "Cookie input data exists only for DTLS hellos".into(),
            ));
        }

        // Splice the cached bytes rather than re-encoding, so hellos
        // carrying unknown extensions still produce their cookie input.
        if let Some(cached) = &self.cached_serialization {
            let cookie_start = 2 + 32 + 1 + self.session_id.len();
            let cookie_end = cookie_start + 1 + self.hello_cookie.len();
            let mut bits = Vec::with_capacity(cached.len() - self.hello_cookie.len());
            bits.extend_from_slice(&cached[..cookie_start]);
            bits.push(0);
            bits.extend_from_slice(&cached[cookie_end..]);
            return Ok(bits);
        }

        self.encode_with_cookie(&[])
    }

    /// Install the cookie from a HelloVerifyRequest and re-derive the
    /// cached serialization. The only permitted mutation of a hello.
    pub fn update_hello_cookie(&mut self, hello_verify: &HelloVerifyRequest) -> Result<()> {
        if !self.legacy_version.is_datagram_protocol() {
            return Err(Error::InvalidState(
                "Cannot use hello cookie with stream TLS".into(),
            ));
        }

        tracing::debug!(
            cookie_len = hello_verify.cookie().len(),
            "updating DTLS hello cookie"
        );
        self.hello_cookie = hello_verify.cookie().to_vec();
        self.cached_serialization = None;
        self.cached_serialization = Some(self.encode()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::DefaultPolicy;
    use wiretls_crypto::CryptoProvider;
    use wiretls_crypto_mock::MockProvider;

    struct TestClock;

    impl Clock for TestClock {
        fn gmt_unix_time(&self) -> u32 {
            0x1111_2222
        }
    }

    fn settings(version: ProtocolVersion) -> ClientHelloSettings {
        ClientHelloSettings {
            version,
            hostname: Some("example.com".into()),
            session_id: Vec::new(),
            cipher_suites: vec![
                CipherSuite::EcdheEcdsaWithAes128GcmSha256,
                CipherSuite::EcdheRsaWithChacha20Poly1305Sha256,
            ],
            srtp_profiles: Vec::new(),
            session_ticket: Some(Vec::new()),
        }
    }

    fn build_hello(version: ProtocolVersion) -> ClientHello {
        let provider = MockProvider::new();
        ClientHello::build(
            provider.random(),
            &TestClock,
            &DefaultPolicy,
            &[],
            settings(version),
            &["h2".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn test_build_and_reparse() {
        let hello = build_hello(ProtocolVersion::TLS_V12);
        let bytes = hello.serialize().unwrap();
        let parsed = ClientHello::decode(&bytes).unwrap();

        assert_eq!(parsed, hello);
        assert_eq!(parsed.legacy_version(), ProtocolVersion::TLS_V12);
        assert_eq!(parsed.sni_hostname(), Some("example.com"));
        assert!(parsed.offered_suite(0xC02B));
        assert!(!parsed.offered_suite(0x009C));
        assert!(parsed.supports_alpn());
        assert_eq!(parsed.next_protocols(), vec!["h2".to_string()]);
        assert!(parsed.supports_extended_master_secret());
        assert!(parsed.supports_encrypt_then_mac());
        assert!(parsed.supports_session_ticket());
        assert!(parsed.secure_renegotiation());
        assert!(parsed.supported_versions().contains(&ProtocolVersion::TLS_V12));
        assert!(!parsed.supported_ecc_curves().is_empty());
        assert_eq!(parsed.supported_dh_groups(),
            vec![GroupParams::Ffdhe2048, GroupParams::Ffdhe3072]);
    }

    #[test]
    fn test_legacy_version_is_tls12_on_wire() {
        let hello = build_hello(ProtocolVersion::TLS_V12);
        let bytes = hello.serialize().unwrap();
        assert_eq!(&bytes[..2], &[0x03, 0x03]);
    }

    #[test]
    fn test_parse_serialize_is_bit_exact() {
        let bytes = build_hello(ProtocolVersion::TLS_V12).serialize().unwrap();
        let parsed = ClientHello::decode(&bytes).unwrap();
        assert_eq!(parsed.serialize().unwrap(), bytes);
    }

    #[test]
    fn test_compression_without_null_rejected() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&[0x03, 0x03]);
        bytes.extend_from_slice(&[0u8; 32]);
        bytes.push(0); // session id
        bytes.extend_from_slice(&[0x00, 0x02, 0x00, 0x9C]); // one suite
        bytes.extend_from_slice(&[0x01, 0x01]); // compression = [1], no null
        let result = ClientHello::decode(&bytes);
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = build_hello(ProtocolVersion::TLS_V12).serialize().unwrap();
        bytes.push(0x00);
        assert!(ClientHello::decode(&bytes).is_err());
    }

    #[test]
    fn test_dtls_cookie_update_changes_only_cookie_field() {
        let mut hello = build_hello(ProtocolVersion::DTLS_V12);
        assert_eq!(&hello.serialize().unwrap()[..2], &[0xFE, 0xFD]);
        assert!(hello.cookie().is_empty());

        let before = hello.serialize().unwrap();
        let hvr_bytes = {
            let mut buf = vec![0xFE, 0xFF, 0x04];
            buf.extend_from_slice(&[0xAA, 0xBB, 0xCC, 0xDD]);
            buf
        };
        let hvr = HelloVerifyRequest::decode(&hvr_bytes).unwrap();

        hello.update_hello_cookie(&hvr).unwrap();
        let after = hello.serialize().unwrap();

        assert_eq!(hello.cookie(), &[0xAA, 0xBB, 0xCC, 0xDD]);
        assert_eq!(after.len(), before.len() + 4);
        // Fields before the cookie (version + random + sid length) match.
        assert_eq!(&after[..35], &before[..35]);
        // And everything after the cookie matches too.
        assert_eq!(&after[40..], &before[36..]);

        let reparsed = ClientHello::decode(&after).unwrap();
        assert_eq!(reparsed.cookie(), &[0xAA, 0xBB, 0xCC, 0xDD]);
        assert_eq!(reparsed.cookie_input_data().unwrap(), before);
    }

    #[test]
    fn test_cookie_update_on_stream_hello_rejected() {
        let mut hello = build_hello(ProtocolVersion::TLS_V12);
        let hvr = HelloVerifyRequest::decode(&[0xFE, 0xFF, 0x01, 0xAA]).unwrap();
        assert!(matches!(
            hello.update_hello_cookie(&hvr),
            Err(Error::InvalidState(_))
        ));
    }
}
