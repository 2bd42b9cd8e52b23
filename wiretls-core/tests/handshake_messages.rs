//! End-to-end message flows: building, framing, reparsing and the DTLS
//! cookie exchange, driven through the mock crypto provider.

use wiretls_core::algos::{AuthMethod, KexAlgo, SignatureScheme};
use wiretls_core::cipher::CipherSuite;
use wiretls_core::messages::{
    decode_dtls_handshake_header, decode_handshake_header, encode_dtls_handshake,
    encode_ecdh_params, encode_handshake, Certificate, CertificateRequest, CertificateVerify,
    ClientCertType, ClientHello, ClientHelloSettings, ClientKeyExchange, Finished,
    HandshakeMessage, HelloVerifyRequest, MessageContext, NewSessionTicket, ServerHello,
    ServerHelloSettings, ServerKeyExchange,
};
use wiretls_core::policy::DefaultPolicy;
use wiretls_core::random::Clock;
use wiretls_core::{HandshakeType, ProtocolVersion};
use wiretls_crypto::{CryptoProvider, Signature, SigningKey, VerifyingKey};
use wiretls_crypto_mock::MockProvider;
use zeroize::Zeroizing;

struct TestClock;

impl Clock for TestClock {
    fn gmt_unix_time(&self) -> u32 {
        1_700_000_000
    }
}

fn client_hello(version: ProtocolVersion) -> ClientHello {
    let provider = MockProvider::new();
    ClientHello::build(
        provider.random(),
        &TestClock,
        &DefaultPolicy,
        &[],
        ClientHelloSettings {
            version,
            hostname: Some("test.example".into()),
            session_id: Vec::new(),
            cipher_suites: vec![
                CipherSuite::EcdheEcdsaWithAes128GcmSha256,
                CipherSuite::EcdheRsaWithAes128GcmSha256,
            ],
            srtp_profiles: Vec::new(),
            session_ticket: Some(Vec::new()),
        },
        &["h2".to_string()],
    )
    .unwrap()
}

#[test]
fn test_hello_exchange_through_framing() {
    let provider = MockProvider::new();
    let hello = client_hello(ProtocolVersion::TLS_V12);

    // Client → server through the stream handshake header.
    let frame = encode_handshake(HandshakeType::ClientHello, &hello.serialize().unwrap()).unwrap();
    let (msg_type, body, consumed) = decode_handshake_header(&frame).unwrap();
    assert_eq!(msg_type, HandshakeType::ClientHello);
    assert_eq!(consumed, frame.len());

    let parsed = match HandshakeMessage::parse(msg_type, body, &MessageContext::pre_negotiation())
        .unwrap()
    {
        HandshakeMessage::ClientHello(hello) => hello,
        other => panic!("unexpected message: {:?}", other),
    };
    assert_eq!(parsed, hello);

    // Server answers.
    let server_hello = ServerHello::build(
        provider.random(),
        &TestClock,
        &DefaultPolicy,
        &[],
        &parsed,
        ServerHelloSettings {
            version: ProtocolVersion::TLS_V12,
            session_id: vec![0xAA; 16],
            ciphersuite: CipherSuite::EcdheEcdsaWithAes128GcmSha256.to_u16(),
            offer_session_ticket: true,
        },
        Some("h2"),
    )
    .unwrap();

    let reparsed = ServerHello::decode(&server_hello.serialize().unwrap()).unwrap();
    assert_eq!(reparsed, server_hello);
    assert_eq!(reparsed.next_protocol(), Some("h2".to_string()));
}

#[test]
fn test_dtls_cookie_exchange() {
    let provider = MockProvider::new();
    let mut hello = client_hello(ProtocolVersion::DTLS_V12);

    // Server derives a cookie from the first hello's bits.
    let hvr = HelloVerifyRequest::new(
        &provider,
        &hello.cookie_input_data().unwrap(),
        b"198.51.100.7:4433",
        b"cookie-secret",
    )
    .unwrap();

    // Client echoes it in the second hello.
    hello.update_hello_cookie(&hvr).unwrap();
    let second = ClientHello::decode(&hello.serialize().unwrap()).unwrap();
    assert_eq!(second.cookie(), hvr.cookie());

    // The server recomputes the cookie from the second hello and a
    // matching transport identity.
    let recomputed = wiretls_core::messages::compute_hello_verify_cookie(
        &provider,
        &second.cookie_input_data().unwrap(),
        b"198.51.100.7:4433",
        b"cookie-secret",
    )
    .unwrap();
    assert_eq!(second.cookie(), recomputed.as_slice());

    // A different client identity yields a different cookie.
    let impostor = wiretls_core::messages::compute_hello_verify_cookie(
        &provider,
        &second.cookie_input_data().unwrap(),
        b"203.0.113.5:4433",
        b"cookie-secret",
    )
    .unwrap();
    assert_ne!(second.cookie(), impostor.as_slice());
}

#[test]
fn test_dtls_framing_carries_message_seq() {
    let hello = client_hello(ProtocolVersion::DTLS_V12);
    let body = hello.serialize().unwrap();

    let frame = encode_dtls_handshake(HandshakeType::ClientHello, 1, &body).unwrap();
    let (header, fragment, consumed) = decode_dtls_handshake_header(&frame).unwrap();

    assert_eq!(header.msg_type, HandshakeType::ClientHello);
    assert_eq!(header.message_seq, 1);
    assert!(header.is_complete());
    assert_eq!(consumed, frame.len());

    let parsed = ClientHello::decode(fragment).unwrap();
    assert_eq!(parsed, hello);
}

#[test]
fn test_server_key_exchange_signed_flow() {
    let provider = MockProvider::new();
    let client_random = [0x01u8; 32];
    let server_random = [0x02u8; 32];

    let params = encode_ecdh_params(23, &[0x04; 65]).unwrap();
    let mut signed = Vec::new();
    signed.extend_from_slice(&client_random);
    signed.extend_from_slice(&server_random);
    signed.extend_from_slice(&params);

    let signer = provider
        .signature(SignatureScheme::EcdsaSha256.signature_algorithm())
        .unwrap();
    let signature = signer
        .sign(&SigningKey::from_bytes(b"server-key".to_vec()), &signed)
        .unwrap();

    let ske = ServerKeyExchange::new(params, Some(SignatureScheme::EcdsaSha256), signature)
        .unwrap();
    let bytes = ske.serialize().unwrap();

    let parsed = ServerKeyExchange::decode(&bytes, KexAlgo::Ecdh, AuthMethod::Ecdsa).unwrap();
    let peer_key = VerifyingKey::from_bytes(b"server-key".to_vec());
    assert!(parsed
        .verify(&provider, &peer_key, &client_random, &server_random)
        .unwrap());

    // Tampering with the randoms defeats the signature.
    assert!(!parsed
        .verify(&provider, &peer_key, &[0xFF; 32], &server_random)
        .unwrap());
}

#[test]
fn test_key_exchange_branches_roundtrip() {
    let cases: Vec<(KexAlgo, ClientKeyExchange)> = vec![
        (
            KexAlgo::StaticRsa,
            ClientKeyExchange::for_static_rsa(&[0xA1; 256]).unwrap(),
        ),
        (KexAlgo::Dh, ClientKeyExchange::for_dh(&[0xA2; 256]).unwrap()),
        (KexAlgo::Ecdh, ClientKeyExchange::for_ecdh(&[0x04; 65]).unwrap()),
        (KexAlgo::Psk, ClientKeyExchange::for_psk(b"alice").unwrap()),
        (
            KexAlgo::EcdhePsk,
            ClientKeyExchange::for_ecdhe_psk(b"alice", &[0x04; 65]).unwrap(),
        ),
        (
            KexAlgo::Cecpq1,
            ClientKeyExchange::for_cecpq1(&[0xA5; 1600]).unwrap(),
        ),
    ];

    for (kex, cke) in cases {
        let bytes = cke.serialize().unwrap();
        let parsed = ClientKeyExchange::decode(&bytes, kex).unwrap();
        assert_eq!(parsed, cke, "round trip failed for {:?}", kex);
    }
}

#[test]
fn test_server_side_premaster_recovery() {
    let bytes = ClientKeyExchange::for_static_rsa(&[0xEE; 256])
        .unwrap()
        .serialize()
        .unwrap();

    let mut cke = ClientKeyExchange::decode(&bytes, KexAlgo::StaticRsa).unwrap();
    assert!(cke.pre_master_secret().is_err());

    // The crypto layer decrypts and deposits the secret.
    let mut pre_master = vec![0x03, 0x03];
    pre_master.extend_from_slice(&[0x5A; 46]);
    cke.set_pre_master_secret(Zeroizing::new(pre_master));
    assert_eq!(cke.pre_master_secret().unwrap().len(), 48);
}

#[test]
fn test_client_auth_messages_roundtrip() {
    let request = CertificateRequest::new(
        vec![ClientCertType::RsaSign, ClientCertType::EcdsaSign],
        vec![SignatureScheme::EcdsaSha256, SignatureScheme::RsaPssSha256],
        vec![vec![0x30, 0x0A, 0x31, 0x08]],
    )
    .unwrap();
    let parsed = CertificateRequest::decode(&request.serialize().unwrap()).unwrap();
    assert_eq!(parsed, request);

    let certificate = Certificate::new(vec![vec![0x30, 0x82, 0x03, 0xE8]]);
    let parsed = Certificate::decode(&certificate.serialize().unwrap()).unwrap();
    assert_eq!(parsed, certificate);

    let provider = MockProvider::new();
    let signer = provider
        .signature(SignatureScheme::EcdsaSha256.signature_algorithm())
        .unwrap();
    let signature = signer
        .sign(&SigningKey::from_bytes(b"client-key".to_vec()), b"transcript")
        .unwrap();
    let verify = CertificateVerify::new(SignatureScheme::EcdsaSha256, signature);
    let parsed = CertificateVerify::decode(&verify.serialize().unwrap()).unwrap();
    assert!(parsed
        .verify(
            &provider,
            &VerifyingKey::from_bytes(b"client-key".to_vec()),
            b"transcript"
        )
        .unwrap());
}

#[test]
fn test_session_ticket_and_finished_roundtrip() {
    let ticket = NewSessionTicket::new(3600, vec![0x5C; 128]);
    let parsed = NewSessionTicket::decode(&ticket.serialize().unwrap()).unwrap();
    assert_eq!(parsed, ticket);

    let finished = Finished::new(vec![0x6D; 12]).unwrap();
    let parsed = Finished::decode(&finished.serialize().unwrap()).unwrap();
    assert_eq!(parsed, finished);
}

#[test]
fn test_message_enum_covers_all_wire_tags() {
    let ctx = MessageContext::for_suite(KexAlgo::Ecdh, AuthMethod::Rsa);

    let empty_ok = [
        HandshakeType::HelloRequest,
        HandshakeType::ServerHelloDone,
    ];
    for msg_type in empty_ok {
        let parsed = HandshakeMessage::parse(msg_type, &[], &ctx).unwrap();
        assert_eq!(parsed.handshake_type(), msg_type);
        assert!(parsed.serialize().unwrap().is_empty());
    }

    let parsed =
        HandshakeMessage::parse(HandshakeType::Certificate, &[0x00, 0x00, 0x00], &ctx).unwrap();
    assert_eq!(parsed.handshake_type(), HandshakeType::Certificate);
}
