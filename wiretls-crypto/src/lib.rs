//! # WireTLS Cryptographic Capability Interface
//!
//! This crate defines the cryptographic abstraction layer consumed by the
//! WireTLS handshake message layer. It provides trait-based interfaces that
//! allow pluggable cryptographic backends; no primitives are implemented
//! here.
//!
//! The handshake layer only ever touches three capabilities:
//!
//! ```text
//! CryptoProvider (main trait)
//! ├── Random    (CSPRNG for hello randoms and cookie secrets)
//! ├── Hmac      (DTLS hello-verify cookie derivation)
//! └── Signature (ServerKeyExchange / CertificateVerify signatures)
//! ```
//!
//! Everything else a full TLS stack needs (AEAD, KDF, key exchange) belongs
//! to the record layer and handshake state machine, which sit above this
//! message layer and carry their own capability seams.

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    unused_qualifications,
    missing_debug_implementations
)]

pub mod error;
pub mod hash;
pub mod hmac;
pub mod random;
pub mod signature;

pub use error::{Error, Result};
pub use hash::HashAlgorithm;
pub use hmac::Hmac;
pub use random::Random;
pub use signature::{Signature, SignatureAlgorithm, SigningKey, VerifyingKey};

/// The main cryptographic provider trait.
///
/// Implementations provide the cryptographic operations the handshake
/// message layer delegates. The trait is object-safe so the message layer
/// can hold providers behind `&dyn CryptoProvider`.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`.
pub trait CryptoProvider: Send + Sync {
    /// Get the random number generator.
    fn random(&self) -> &dyn Random;

    /// Get an HMAC instance keyed with `key`.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedAlgorithm` if the provider cannot compute HMAC
    /// over the requested hash.
    fn hmac(&self, algorithm: HashAlgorithm, key: &[u8]) -> Result<Box<dyn Hmac>>;

    /// Get a signature scheme instance.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedAlgorithm` if the algorithm is not available.
    fn signature(&self, algorithm: SignatureAlgorithm) -> Result<Box<dyn Signature>>;

    /// Check if the provider supports a specific signature algorithm.
    fn supports_signature(&self, algorithm: SignatureAlgorithm) -> bool {
        self.signature(algorithm).is_ok()
    }
}
