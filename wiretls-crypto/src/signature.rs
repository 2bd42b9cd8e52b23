//! Digital signature algorithms for TLS handshake authentication.

use crate::Result;
use zeroize::Zeroize;

/// Signature algorithms supported by the capability interface.
///
/// The variants mirror the TLS `SignatureScheme` registry entries that a
/// TLS 1.2 peer may negotiate for `ServerKeyExchange` and
/// `CertificateVerify` signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureAlgorithm {
    // ECDSA
    /// ECDSA with P-256 and SHA-256
    EcdsaSecp256r1Sha256,
    /// ECDSA with P-384 and SHA-384
    EcdsaSecp384r1Sha384,
    /// ECDSA with P-521 and SHA-512
    EcdsaSecp521r1Sha512,

    // EdDSA
    /// Ed25519 (EdDSA with Curve25519)
    Ed25519,
    /// Ed448 (EdDSA with Curve448)
    Ed448,

    // RSA-PSS
    /// RSA-PSS with SHA-256
    RsaPssRsaeSha256,
    /// RSA-PSS with SHA-384
    RsaPssRsaeSha384,
    /// RSA-PSS with SHA-512
    RsaPssRsaeSha512,

    // RSA PKCS#1 v1.5 (TLS 1.2)
    /// RSA PKCS#1 v1.5 with SHA-256
    RsaPkcs1Sha256,
    /// RSA PKCS#1 v1.5 with SHA-384
    RsaPkcs1Sha384,
    /// RSA PKCS#1 v1.5 with SHA-512
    RsaPkcs1Sha512,
}

impl SignatureAlgorithm {
    /// Get the IANA TLS SignatureScheme codepoint.
    pub const fn iana_codepoint(self) -> u16 {
        match self {
            SignatureAlgorithm::EcdsaSecp256r1Sha256 => 0x0403,
            SignatureAlgorithm::EcdsaSecp384r1Sha384 => 0x0503,
            SignatureAlgorithm::EcdsaSecp521r1Sha512 => 0x0603,
            SignatureAlgorithm::Ed25519 => 0x0807,
            SignatureAlgorithm::Ed448 => 0x0808,
            SignatureAlgorithm::RsaPssRsaeSha256 => 0x0804,
            SignatureAlgorithm::RsaPssRsaeSha384 => 0x0805,
            SignatureAlgorithm::RsaPssRsaeSha512 => 0x0806,
            SignatureAlgorithm::RsaPkcs1Sha256 => 0x0401,
            SignatureAlgorithm::RsaPkcs1Sha384 => 0x0501,
            SignatureAlgorithm::RsaPkcs1Sha512 => 0x0601,
        }
    }

    /// Create from an IANA codepoint.
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x0403 => Some(SignatureAlgorithm::EcdsaSecp256r1Sha256),
            0x0503 => Some(SignatureAlgorithm::EcdsaSecp384r1Sha384),
            0x0603 => Some(SignatureAlgorithm::EcdsaSecp521r1Sha512),
            0x0807 => Some(SignatureAlgorithm::Ed25519),
            0x0808 => Some(SignatureAlgorithm::Ed448),
            0x0804 => Some(SignatureAlgorithm::RsaPssRsaeSha256),
            0x0805 => Some(SignatureAlgorithm::RsaPssRsaeSha384),
            0x0806 => Some(SignatureAlgorithm::RsaPssRsaeSha512),
            0x0401 => Some(SignatureAlgorithm::RsaPkcs1Sha256),
            0x0501 => Some(SignatureAlgorithm::RsaPkcs1Sha384),
            0x0601 => Some(SignatureAlgorithm::RsaPkcs1Sha512),
            _ => None,
        }
    }

    /// Get the algorithm name.
    pub const fn name(self) -> &'static str {
        match self {
            SignatureAlgorithm::EcdsaSecp256r1Sha256 => "ecdsa_secp256r1_sha256",
            SignatureAlgorithm::EcdsaSecp384r1Sha384 => "ecdsa_secp384r1_sha384",
            SignatureAlgorithm::EcdsaSecp521r1Sha512 => "ecdsa_secp521r1_sha512",
            SignatureAlgorithm::Ed25519 => "ed25519",
            SignatureAlgorithm::Ed448 => "ed448",
            SignatureAlgorithm::RsaPssRsaeSha256 => "rsa_pss_rsae_sha256",
            SignatureAlgorithm::RsaPssRsaeSha384 => "rsa_pss_rsae_sha384",
            SignatureAlgorithm::RsaPssRsaeSha512 => "rsa_pss_rsae_sha512",
            SignatureAlgorithm::RsaPkcs1Sha256 => "rsa_pkcs1_sha256",
            SignatureAlgorithm::RsaPkcs1Sha384 => "rsa_pkcs1_sha384",
            SignatureAlgorithm::RsaPkcs1Sha512 => "rsa_pkcs1_sha512",
        }
    }
}

/// Signing key (private key).
///
/// This type wraps the private signing key and ensures it is zeroized
/// when dropped.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct SigningKey {
    bytes: Vec<u8>,
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("bytes", &"<redacted>")
            .finish()
    }
}

impl SigningKey {
    /// Create a new signing key from bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Get the signing key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Verification key (public key).
#[derive(Debug, Clone)]
pub struct VerifyingKey {
    bytes: Vec<u8>,
}

impl VerifyingKey {
    /// Create a new verifying key from bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Get the verifying key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Digital signature trait.
///
/// The handshake layer parses signature bytes off the wire and hands them
/// here; it never interprets them itself.
pub trait Signature: Send + Sync {
    /// Sign a message.
    ///
    /// # Errors
    ///
    /// - `InvalidPrivateKey` if the signing key is invalid
    /// - `CryptoError` for other errors
    fn sign(&self, signing_key: &SigningKey, message: &[u8]) -> Result<Vec<u8>>;

    /// Verify a signature.
    ///
    /// # Errors
    ///
    /// - `SignatureVerificationFailed` if the signature does not verify
    /// - `InvalidPublicKey` if the verifying key is invalid
    fn verify(&self, verifying_key: &VerifyingKey, message: &[u8], signature: &[u8])
        -> Result<()>;

    /// Get the algorithm this signature scheme implements.
    fn algorithm(&self) -> SignatureAlgorithm;
}
