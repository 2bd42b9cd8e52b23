//! TLS 1.2 ciphersuite definitions.
//!
//! A TLS 1.2 ciphersuite names the complete cryptographic bundle:
//! key exchange, authentication, bulk cipher and PRF hash.
//! Format: TLS_{KeyExchange}_{Authentication}_WITH_{Cipher}_{Hash}.
//!
//! Hello messages carry raw 16-bit codes so that unrecognized suites
//! survive a parse/serialize round trip; this enum is the name and
//! property mapping for the codes the layer understands.

use crate::algos::{AuthMethod, CipherAlgo, KdfAlgo, KexAlgo, NonceFormat};

/// TLS 1.2 ciphersuite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum CipherSuite {
    /// TLS_RSA_WITH_AES_128_CBC_SHA (0x002F) - RFC 5246
    RsaWithAes128CbcSha = 0x002F,

    /// TLS_RSA_WITH_AES_128_GCM_SHA256 (0x009C) - RFC 5288
    RsaWithAes128GcmSha256 = 0x009C,

    /// TLS_RSA_WITH_AES_256_GCM_SHA384 (0x009D) - RFC 5288
    RsaWithAes256GcmSha384 = 0x009D,

    /// TLS_DHE_RSA_WITH_AES_128_GCM_SHA256 (0x009E) - RFC 5288
    DheRsaWithAes128GcmSha256 = 0x009E,

    /// TLS_DHE_RSA_WITH_AES_256_GCM_SHA384 (0x009F) - RFC 5288
    DheRsaWithAes256GcmSha384 = 0x009F,

    /// TLS_PSK_WITH_AES_128_GCM_SHA256 (0x00A8) - RFC 5487
    PskWithAes128GcmSha256 = 0x00A8,

    /// TLS_PSK_WITH_AES_256_GCM_SHA384 (0x00A9) - RFC 5487
    PskWithAes256GcmSha384 = 0x00A9,

    /// TLS_CECPQ1_RSA_WITH_CHACHA20_POLY1305_SHA256 (0x16B7)
    Cecpq1RsaWithChacha20Poly1305Sha256 = 0x16B7,

    /// TLS_CECPQ1_ECDSA_WITH_CHACHA20_POLY1305_SHA256 (0x16B8)
    Cecpq1EcdsaWithChacha20Poly1305Sha256 = 0x16B8,

    /// TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA (0xC013) - RFC 8422
    EcdheRsaWithAes128CbcSha = 0xC013,

    /// TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256 (0xC02B) - RFC 5289
    EcdheEcdsaWithAes128GcmSha256 = 0xC02B,

    /// TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384 (0xC02C) - RFC 5289
    EcdheEcdsaWithAes256GcmSha384 = 0xC02C,

    /// TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256 (0xC02F) - RFC 5289
    EcdheRsaWithAes128GcmSha256 = 0xC02F,

    /// TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384 (0xC030) - RFC 5289
    EcdheRsaWithAes256GcmSha384 = 0xC030,

    /// TLS_ECDHE_ECDSA_WITH_AES_128_CCM (0xC0AC) - RFC 7251
    EcdheEcdsaWithAes128Ccm = 0xC0AC,

    /// TLS_ECDHE_ECDSA_WITH_AES_128_CCM_8 (0xC0AE) - RFC 7251
    EcdheEcdsaWithAes128Ccm8 = 0xC0AE,

    /// TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256 (0xCCA8) - RFC 7905
    EcdheRsaWithChacha20Poly1305Sha256 = 0xCCA8,

    /// TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256 (0xCCA9) - RFC 7905
    EcdheEcdsaWithChacha20Poly1305Sha256 = 0xCCA9,

    /// TLS_ECDHE_PSK_WITH_CHACHA20_POLY1305_SHA256 (0xCCAC) - RFC 7905
    EcdhePskWithChacha20Poly1305Sha256 = 0xCCAC,
}

impl CipherSuite {
    /// Create from wire format (u16 big-endian).
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x002F => Some(CipherSuite::RsaWithAes128CbcSha),
            0x009C => Some(CipherSuite::RsaWithAes128GcmSha256),
            0x009D => Some(CipherSuite::RsaWithAes256GcmSha384),
            0x009E => Some(CipherSuite::DheRsaWithAes128GcmSha256),
            0x009F => Some(CipherSuite::DheRsaWithAes256GcmSha384),
            0x00A8 => Some(CipherSuite::PskWithAes128GcmSha256),
            0x00A9 => Some(CipherSuite::PskWithAes256GcmSha384),
            0x16B7 => Some(CipherSuite::Cecpq1RsaWithChacha20Poly1305Sha256),
            0x16B8 => Some(CipherSuite::Cecpq1EcdsaWithChacha20Poly1305Sha256),
            0xC013 => Some(CipherSuite::EcdheRsaWithAes128CbcSha),
            0xC02B => Some(CipherSuite::EcdheEcdsaWithAes128GcmSha256),
            0xC02C => Some(CipherSuite::EcdheEcdsaWithAes256GcmSha384),
            0xC02F => Some(CipherSuite::EcdheRsaWithAes128GcmSha256),
            0xC030 => Some(CipherSuite::EcdheRsaWithAes256GcmSha384),
            0xC0AC => Some(CipherSuite::EcdheEcdsaWithAes128Ccm),
            0xC0AE => Some(CipherSuite::EcdheEcdsaWithAes128Ccm8),
            0xCCA8 => Some(CipherSuite::EcdheRsaWithChacha20Poly1305Sha256),
            0xCCA9 => Some(CipherSuite::EcdheEcdsaWithChacha20Poly1305Sha256),
            0xCCAC => Some(CipherSuite::EcdhePskWithChacha20Poly1305Sha256),
            _ => None,
        }
    }

    /// Convert to wire format (u16 big-endian).
    pub const fn to_u16(self) -> u16 {
        self as u16
    }

    /// Key-exchange method of this suite.
    pub const fn kex_algo(self) -> KexAlgo {
        match self {
            CipherSuite::RsaWithAes128CbcSha
            | CipherSuite::RsaWithAes128GcmSha256
            | CipherSuite::RsaWithAes256GcmSha384 => KexAlgo::StaticRsa,

            CipherSuite::DheRsaWithAes128GcmSha256
            | CipherSuite::DheRsaWithAes256GcmSha384 => KexAlgo::Dh,

            CipherSuite::PskWithAes128GcmSha256 | CipherSuite::PskWithAes256GcmSha384 => {
                KexAlgo::Psk
            },

            CipherSuite::Cecpq1RsaWithChacha20Poly1305Sha256
            | CipherSuite::Cecpq1EcdsaWithChacha20Poly1305Sha256 => KexAlgo::Cecpq1,

            CipherSuite::EcdhePskWithChacha20Poly1305Sha256 => KexAlgo::EcdhePsk,

            _ => KexAlgo::Ecdh,
        }
    }

    /// Authentication method of this suite.
    ///
    /// Static-RSA and pure-PSK suites authenticate implicitly through the
    /// key exchange; no ServerKeyExchange signature block is present.
    pub const fn auth_method(self) -> AuthMethod {
        match self {
            CipherSuite::RsaWithAes128CbcSha
            | CipherSuite::RsaWithAes128GcmSha256
            | CipherSuite::RsaWithAes256GcmSha384
            | CipherSuite::PskWithAes128GcmSha256
            | CipherSuite::PskWithAes256GcmSha384
            | CipherSuite::EcdhePskWithChacha20Poly1305Sha256 => AuthMethod::Implicit,

            CipherSuite::EcdheEcdsaWithAes128GcmSha256
            | CipherSuite::EcdheEcdsaWithAes256GcmSha384
            | CipherSuite::EcdheEcdsaWithAes128Ccm
            | CipherSuite::EcdheEcdsaWithAes128Ccm8
            | CipherSuite::EcdheEcdsaWithChacha20Poly1305Sha256
            | CipherSuite::Cecpq1EcdsaWithChacha20Poly1305Sha256 => AuthMethod::Ecdsa,

            _ => AuthMethod::Rsa,
        }
    }

    /// Bulk cipher of this suite.
    pub const fn cipher_algo(self) -> CipherAlgo {
        match self {
            CipherSuite::RsaWithAes128CbcSha | CipherSuite::EcdheRsaWithAes128CbcSha => {
                CipherAlgo::Aes128CbcHmacSha1
            },

            CipherSuite::RsaWithAes128GcmSha256
            | CipherSuite::DheRsaWithAes128GcmSha256
            | CipherSuite::PskWithAes128GcmSha256
            | CipherSuite::EcdheEcdsaWithAes128GcmSha256
            | CipherSuite::EcdheRsaWithAes128GcmSha256 => CipherAlgo::Aes128Gcm,

            CipherSuite::RsaWithAes256GcmSha384
            | CipherSuite::DheRsaWithAes256GcmSha384
            | CipherSuite::PskWithAes256GcmSha384
            | CipherSuite::EcdheEcdsaWithAes256GcmSha384
            | CipherSuite::EcdheRsaWithAes256GcmSha384 => CipherAlgo::Aes256Gcm,

            CipherSuite::EcdheEcdsaWithAes128Ccm => CipherAlgo::Aes128Ccm,
            CipherSuite::EcdheEcdsaWithAes128Ccm8 => CipherAlgo::Aes128Ccm8,

            _ => CipherAlgo::ChaCha20Poly1305,
        }
    }

    /// PRF hash of this suite.
    pub const fn kdf_algo(self) -> KdfAlgo {
        match self {
            CipherSuite::RsaWithAes256GcmSha384
            | CipherSuite::DheRsaWithAes256GcmSha384
            | CipherSuite::PskWithAes256GcmSha384
            | CipherSuite::EcdheEcdsaWithAes256GcmSha384
            | CipherSuite::EcdheRsaWithAes256GcmSha384 => KdfAlgo::Sha384,
            _ => KdfAlgo::Sha256,
        }
    }

    /// Nonce construction of this suite's record protection.
    pub const fn nonce_format(self) -> NonceFormat {
        match self.cipher_algo() {
            CipherAlgo::Aes128CbcHmacSha1 => NonceFormat::CbcMode,
            CipherAlgo::ChaCha20Poly1305 => NonceFormat::AeadXor12,
            _ => NonceFormat::AeadImplicit4,
        }
    }

    /// IANA suite name.
    pub const fn name(self) -> &'static str {
        match self {
            CipherSuite::RsaWithAes128CbcSha => "TLS_RSA_WITH_AES_128_CBC_SHA",
            CipherSuite::RsaWithAes128GcmSha256 => "TLS_RSA_WITH_AES_128_GCM_SHA256",
            CipherSuite::RsaWithAes256GcmSha384 => "TLS_RSA_WITH_AES_256_GCM_SHA384",
            CipherSuite::DheRsaWithAes128GcmSha256 => "TLS_DHE_RSA_WITH_AES_128_GCM_SHA256",
            CipherSuite::DheRsaWithAes256GcmSha384 => "TLS_DHE_RSA_WITH_AES_256_GCM_SHA384",
            CipherSuite::PskWithAes128GcmSha256 => "TLS_PSK_WITH_AES_128_GCM_SHA256",
            CipherSuite::PskWithAes256GcmSha384 => "TLS_PSK_WITH_AES_256_GCM_SHA384",
            CipherSuite::Cecpq1RsaWithChacha20Poly1305Sha256 => {
                "TLS_CECPQ1_RSA_WITH_CHACHA20_POLY1305_SHA256"
            },
            CipherSuite::Cecpq1EcdsaWithChacha20Poly1305Sha256 => {
                "TLS_CECPQ1_ECDSA_WITH_CHACHA20_POLY1305_SHA256"
            },
            CipherSuite::EcdheRsaWithAes128CbcSha => "TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA",
            CipherSuite::EcdheEcdsaWithAes128GcmSha256 => {
                "TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256"
            },
            CipherSuite::EcdheEcdsaWithAes256GcmSha384 => {
                "TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384"
            },
            CipherSuite::EcdheRsaWithAes128GcmSha256 => "TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256",
            CipherSuite::EcdheRsaWithAes256GcmSha384 => "TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384",
            CipherSuite::EcdheEcdsaWithAes128Ccm => "TLS_ECDHE_ECDSA_WITH_AES_128_CCM",
            CipherSuite::EcdheEcdsaWithAes128Ccm8 => "TLS_ECDHE_ECDSA_WITH_AES_128_CCM_8",
            CipherSuite::EcdheRsaWithChacha20Poly1305Sha256 => {
                "TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256"
            },
            CipherSuite::EcdheEcdsaWithChacha20Poly1305Sha256 => {
                "TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256"
            },
            CipherSuite::EcdhePskWithChacha20Poly1305Sha256 => {
                "TLS_ECDHE_PSK_WITH_CHACHA20_POLY1305_SHA256"
            },
        }
    }
}

/// Default suite preference: ECDHE AEAD suites first, ChaCha before AES.
pub fn default_cipher_suites() -> Vec<CipherSuite> {
    vec![
        CipherSuite::EcdheEcdsaWithChacha20Poly1305Sha256,
        CipherSuite::EcdheEcdsaWithAes256GcmSha384,
        CipherSuite::EcdheEcdsaWithAes128GcmSha256,
        CipherSuite::EcdheRsaWithChacha20Poly1305Sha256,
        CipherSuite::EcdheRsaWithAes256GcmSha384,
        CipherSuite::EcdheRsaWithAes128GcmSha256,
        CipherSuite::DheRsaWithAes256GcmSha384,
        CipherSuite::DheRsaWithAes128GcmSha256,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suite_code_roundtrip() {
        assert_eq!(
            CipherSuite::from_u16(0x009C),
            Some(CipherSuite::RsaWithAes128GcmSha256)
        );
        assert_eq!(CipherSuite::EcdheEcdsaWithAes128GcmSha256.to_u16(), 0xC02B);
        assert_eq!(CipherSuite::from_u16(0x1301), None); // TLS 1.3 suite
    }

    #[test]
    fn test_kex_branches_covered() {
        assert_eq!(
            CipherSuite::RsaWithAes128GcmSha256.kex_algo(),
            KexAlgo::StaticRsa
        );
        assert_eq!(CipherSuite::DheRsaWithAes128GcmSha256.kex_algo(), KexAlgo::Dh);
        assert_eq!(
            CipherSuite::EcdheRsaWithAes128GcmSha256.kex_algo(),
            KexAlgo::Ecdh
        );
        assert_eq!(CipherSuite::PskWithAes128GcmSha256.kex_algo(), KexAlgo::Psk);
        assert_eq!(
            CipherSuite::EcdhePskWithChacha20Poly1305Sha256.kex_algo(),
            KexAlgo::EcdhePsk
        );
        assert_eq!(
            CipherSuite::Cecpq1RsaWithChacha20Poly1305Sha256.kex_algo(),
            KexAlgo::Cecpq1
        );
    }

    #[test]
    fn test_auth_methods() {
        assert_eq!(
            CipherSuite::RsaWithAes128GcmSha256.auth_method(),
            AuthMethod::Implicit
        );
        assert_eq!(
            CipherSuite::EcdheEcdsaWithAes128Ccm.auth_method(),
            AuthMethod::Ecdsa
        );
        assert_eq!(
            CipherSuite::EcdheRsaWithAes256GcmSha384.auth_method(),
            AuthMethod::Rsa
        );
        assert_eq!(
            CipherSuite::EcdhePskWithChacha20Poly1305Sha256.auth_method(),
            AuthMethod::Implicit
        );
    }

    #[test]
    fn test_nonce_formats() {
        assert_eq!(
            CipherSuite::RsaWithAes128CbcSha.nonce_format(),
            NonceFormat::CbcMode
        );
        assert_eq!(
            CipherSuite::EcdheRsaWithAes128GcmSha256.nonce_format(),
            NonceFormat::AeadImplicit4
        );
        assert_eq!(
            CipherSuite::EcdheEcdsaWithChacha20Poly1305Sha256.nonce_format(),
            NonceFormat::AeadXor12
        );
    }

    #[test]
    fn test_kdf_algo() {
        assert_eq!(
            CipherSuite::EcdheRsaWithAes256GcmSha384.kdf_algo(),
            KdfAlgo::Sha384
        );
        assert_eq!(
            CipherSuite::EcdheEcdsaWithChacha20Poly1305Sha256.kdf_algo(),
            KdfAlgo::Sha256
        );
    }

    #[test]
    fn test_names() {
        assert_eq!(
            CipherSuite::RsaWithAes128GcmSha256.name(),
            "TLS_RSA_WITH_AES_128_GCM_SHA256"
        );
    }
}
