//! Closed algorithm identifier enumerations: bulk cipher, PRF hash, AEAD
//! nonce construction, authentication method, signature scheme, named
//! group and key-exchange method.
//!
//! `SignatureScheme` and `GroupParams` match their IANA wire encodings;
//! the rest are internal tags selected by the negotiated ciphersuite.

use wiretls_crypto::SignatureAlgorithm;

/// Bulk cipher of a ciphersuite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherAlgo {
    /// ChaCha20-Poly1305 AEAD
    ChaCha20Poly1305,

    /// AES-128 in GCM mode
    Aes128Gcm,

    /// AES-256 in GCM mode
    Aes256Gcm,

    /// AES-128 in CCM mode
    Aes128Ccm,

    /// AES-128 in CCM mode with 8-byte tags
    Aes128Ccm8,

    /// AES-128 CBC with HMAC-SHA1 (legacy, encrypt-then-MAC capable)
    Aes128CbcHmacSha1,
}

impl CipherAlgo {
    /// Printable name.
    pub const fn name(self) -> &'static str {
        match self {
            CipherAlgo::ChaCha20Poly1305 => "CHACHA20_POLY1305",
            CipherAlgo::Aes128Gcm => "AES_128_GCM",
            CipherAlgo::Aes256Gcm => "AES_256_GCM",
            CipherAlgo::Aes128Ccm => "AES_128_CCM",
            CipherAlgo::Aes128Ccm8 => "AES_128_CCM_8",
            CipherAlgo::Aes128CbcHmacSha1 => "AES_128_CBC_HMAC_SHA1",
        }
    }

    /// Whether this cipher is an AEAD (as opposed to CBC + MAC).
    pub const fn is_aead(self) -> bool {
        !matches!(self, CipherAlgo::Aes128CbcHmacSha1)
    }
}

/// PRF hash of a TLS 1.2 ciphersuite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KdfAlgo {
    /// PRF over SHA-256
    Sha256,
    /// PRF over SHA-384
    Sha384,
}

impl KdfAlgo {
    /// Printable name.
    pub const fn name(self) -> &'static str {
        match self {
            KdfAlgo::Sha256 => "SHA-256",
            KdfAlgo::Sha384 => "SHA-384",
        }
    }
}

/// How the per-record nonce is formed for the negotiated cipher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NonceFormat {
    /// CBC mode: explicit IV per record.
    CbcMode,

    /// AEAD with a 4-byte implicit salt and 8-byte explicit part
    /// (AES-GCM, AES-CCM in TLS 1.2).
    AeadImplicit4,

    /// AEAD with a 12-byte implicit nonce XORed with the sequence number
    /// (ChaCha20-Poly1305).
    AeadXor12,
}

/// Authentication method of a ciphersuite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthMethod {
    /// RSA signature over the key exchange parameters.
    Rsa,

    /// ECDSA signature over the key exchange parameters.
    Ecdsa,

    /// Authentication implicit in the key exchange (static RSA, PSK).
    /// No ServerKeyExchange signature block is present.
    Implicit,
}

impl AuthMethod {
    /// Printable name.
    pub const fn name(self) -> &'static str {
        match self {
            AuthMethod::Rsa => "RSA",
            AuthMethod::Ecdsa => "ECDSA",
            AuthMethod::Implicit => "IMPLICIT",
        }
    }
}

/// TLS signature scheme (RFC 8446 registry, used by TLS 1.2 per RFC 5246
/// SignatureAndHashAlgorithm compatibility).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum SignatureScheme {
    /// rsa_pkcs1_sha256
    RsaPkcs1Sha256 = 0x0401,
    /// rsa_pkcs1_sha384
    RsaPkcs1Sha384 = 0x0501,
    /// rsa_pkcs1_sha512
    RsaPkcs1Sha512 = 0x0601,

    /// ecdsa_secp256r1_sha256
    EcdsaSha256 = 0x0403,
    /// ecdsa_secp384r1_sha384
    EcdsaSha384 = 0x0503,
    /// ecdsa_secp521r1_sha512
    EcdsaSha512 = 0x0603,

    /// rsa_pss_rsae_sha256
    RsaPssSha256 = 0x0804,
    /// rsa_pss_rsae_sha384
    RsaPssSha384 = 0x0805,
    /// rsa_pss_rsae_sha512
    RsaPssSha512 = 0x0806,

    /// ed25519
    Ed25519 = 0x0807,
    /// ed448
    Ed448 = 0x0808,
}

impl SignatureScheme {
    /// All schemes this layer knows, in preference order.
    pub const ALL: [SignatureScheme; 11] = [
        SignatureScheme::EcdsaSha256,
        SignatureScheme::EcdsaSha384,
        SignatureScheme::EcdsaSha512,
        SignatureScheme::Ed25519,
        SignatureScheme::Ed448,
        SignatureScheme::RsaPssSha256,
        SignatureScheme::RsaPssSha384,
        SignatureScheme::RsaPssSha512,
        SignatureScheme::RsaPkcs1Sha256,
        SignatureScheme::RsaPkcs1Sha384,
        SignatureScheme::RsaPkcs1Sha512,
    ];

    /// Create from wire format (u16).
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x0401 => Some(SignatureScheme::RsaPkcs1Sha256),
            0x0501 => Some(SignatureScheme::RsaPkcs1Sha384),
            0x0601 => Some(SignatureScheme::RsaPkcs1Sha512),
            0x0403 => Some(SignatureScheme::EcdsaSha256),
            0x0503 => Some(SignatureScheme::EcdsaSha384),
            0x0603 => Some(SignatureScheme::EcdsaSha512),
            0x0804 => Some(SignatureScheme::RsaPssSha256),
            0x0805 => Some(SignatureScheme::RsaPssSha384),
            0x0806 => Some(SignatureScheme::RsaPssSha512),
            0x0807 => Some(SignatureScheme::Ed25519),
            0x0808 => Some(SignatureScheme::Ed448),
            _ => None,
        }
    }

    /// Convert to wire format (u16).
    pub const fn to_u16(self) -> u16 {
        self as u16
    }

    /// Printable name (IANA registry spelling).
    pub const fn name(self) -> &'static str {
        match self {
            SignatureScheme::RsaPkcs1Sha256 => "rsa_pkcs1_sha256",
            SignatureScheme::RsaPkcs1Sha384 => "rsa_pkcs1_sha384",
            SignatureScheme::RsaPkcs1Sha512 => "rsa_pkcs1_sha512",
            SignatureScheme::EcdsaSha256 => "ecdsa_secp256r1_sha256",
            SignatureScheme::EcdsaSha384 => "ecdsa_secp384r1_sha384",
            SignatureScheme::EcdsaSha512 => "ecdsa_secp521r1_sha512",
            SignatureScheme::RsaPssSha256 => "rsa_pss_rsae_sha256",
            SignatureScheme::RsaPssSha384 => "rsa_pss_rsae_sha384",
            SignatureScheme::RsaPssSha512 => "rsa_pss_rsae_sha512",
            SignatureScheme::Ed25519 => "ed25519",
            SignatureScheme::Ed448 => "ed448",
        }
    }

    /// The capability-layer algorithm this scheme selects.
    pub const fn signature_algorithm(self) -> SignatureAlgorithm {
        match self {
            SignatureScheme::RsaPkcs1Sha256 => SignatureAlgorithm::RsaPkcs1Sha256,
            SignatureScheme::RsaPkcs1Sha384 => SignatureAlgorithm::RsaPkcs1Sha384,
            SignatureScheme::RsaPkcs1Sha512 => SignatureAlgorithm::RsaPkcs1Sha512,
            SignatureScheme::EcdsaSha256 => SignatureAlgorithm::EcdsaSecp256r1Sha256,
            SignatureScheme::EcdsaSha384 => SignatureAlgorithm::EcdsaSecp384r1Sha384,
            SignatureScheme::EcdsaSha512 => SignatureAlgorithm::EcdsaSecp521r1Sha512,
            SignatureScheme::RsaPssSha256 => SignatureAlgorithm::RsaPssRsaeSha256,
            SignatureScheme::RsaPssSha384 => SignatureAlgorithm::RsaPssRsaeSha384,
            SignatureScheme::RsaPssSha512 => SignatureAlgorithm::RsaPssRsaeSha512,
            SignatureScheme::Ed25519 => SignatureAlgorithm::Ed25519,
            SignatureScheme::Ed448 => SignatureAlgorithm::Ed448,
        }
    }

    /// Which authentication method this scheme serves.
    pub const fn auth_method(self) -> AuthMethod {
        match self {
            SignatureScheme::EcdsaSha256
            | SignatureScheme::EcdsaSha384
            | SignatureScheme::EcdsaSha512
            | SignatureScheme::Ed25519
            | SignatureScheme::Ed448 => AuthMethod::Ecdsa,
            _ => AuthMethod::Rsa,
        }
    }
}

/// Named group (RFC 8422 / RFC 7919 registry). Matches the wire encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum GroupParams {
    /// secp256r1 (23)
    Secp256r1 = 23,
    /// secp384r1 (24)
    Secp384r1 = 24,
    /// secp521r1 (25)
    Secp521r1 = 25,
    /// brainpoolP256r1 (26)
    Brainpool256r1 = 26,
    /// brainpoolP384r1 (27)
    Brainpool384r1 = 27,
    /// brainpoolP512r1 (28)
    Brainpool512r1 = 28,
    /// x25519 (29)
    X25519 = 29,

    /// ffdhe2048 (256)
    Ffdhe2048 = 256,
    /// ffdhe3072 (257)
    Ffdhe3072 = 257,
    /// ffdhe4096 (258)
    Ffdhe4096 = 258,
    /// ffdhe6144 (259)
    Ffdhe6144 = 259,
    /// ffdhe8192 (260)
    Ffdhe8192 = 260,
}

impl GroupParams {
    /// Create from wire format (u16).
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            23 => Some(GroupParams::Secp256r1),
            24 => Some(GroupParams::Secp384r1),
            25 => Some(GroupParams::Secp521r1),
            26 => Some(GroupParams::Brainpool256r1),
            27 => Some(GroupParams::Brainpool384r1),
            28 => Some(GroupParams::Brainpool512r1),
            29 => Some(GroupParams::X25519),
            256 => Some(GroupParams::Ffdhe2048),
            257 => Some(GroupParams::Ffdhe3072),
            258 => Some(GroupParams::Ffdhe4096),
            259 => Some(GroupParams::Ffdhe6144),
            260 => Some(GroupParams::Ffdhe8192),
            _ => None,
        }
    }

    /// Convert to wire format (u16).
    pub const fn to_u16(self) -> u16 {
        self as u16
    }

    /// Whether this is a finite-field DH group (as opposed to an
    /// elliptic-curve group).
    pub const fn is_dh(self) -> bool {
        matches!(
            self,
            GroupParams::Ffdhe2048
                | GroupParams::Ffdhe3072
                | GroupParams::Ffdhe4096
                | GroupParams::Ffdhe6144
                | GroupParams::Ffdhe8192
        )
    }

    /// Printable name.
    pub const fn name(self) -> &'static str {
        match self {
            GroupParams::Secp256r1 => "secp256r1",
            GroupParams::Secp384r1 => "secp384r1",
            GroupParams::Secp521r1 => "secp521r1",
            GroupParams::Brainpool256r1 => "brainpoolP256r1",
            GroupParams::Brainpool384r1 => "brainpoolP384r1",
            GroupParams::Brainpool512r1 => "brainpoolP512r1",
            GroupParams::X25519 => "x25519",
            GroupParams::Ffdhe2048 => "ffdhe2048",
            GroupParams::Ffdhe3072 => "ffdhe3072",
            GroupParams::Ffdhe4096 => "ffdhe4096",
            GroupParams::Ffdhe6144 => "ffdhe6144",
            GroupParams::Ffdhe8192 => "ffdhe8192",
        }
    }
}

/// Key-exchange method of a ciphersuite. Selects the wire shape of
/// ServerKeyExchange and ClientKeyExchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KexAlgo {
    /// RSA key transport: pre-master encrypted to the server certificate.
    StaticRsa,

    /// Ephemeral finite-field Diffie-Hellman.
    Dh,

    /// Ephemeral elliptic-curve Diffie-Hellman.
    Ecdh,

    /// CECPQ1 combined X25519 + NewHope exchange.
    Cecpq1,

    /// Pre-shared key.
    Psk,

    /// ECDHE combined with a pre-shared key.
    EcdhePsk,
}

impl KexAlgo {
    /// Printable name.
    pub const fn name(self) -> &'static str {
        match self {
            KexAlgo::StaticRsa => "RSA",
            KexAlgo::Dh => "DH",
            KexAlgo::Ecdh => "ECDH",
            KexAlgo::Cecpq1 => "CECPQ1",
            KexAlgo::Psk => "PSK",
            KexAlgo::EcdhePsk => "ECDHE_PSK",
        }
    }

    /// Whether the method involves a pre-shared key.
    pub const fn is_psk(self) -> bool {
        matches!(self, KexAlgo::Psk | KexAlgo::EcdhePsk)
    }
}
