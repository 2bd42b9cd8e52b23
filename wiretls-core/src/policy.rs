//! The policy query surface consumed during message construction and
//! validation.
//!
//! The handshake layer never decides what is acceptable; it asks the
//! policy and surfaces refusals as fatal errors. Implementations live
//! outside this crate; [`DefaultPolicy`] provides the baseline used in
//! tests.

use crate::algos::{GroupParams, SignatureScheme};
use crate::cipher::CipherSuite;
use crate::error::{Error, Result};

/// Minimal description of a peer's public key, as far as policy checks
/// are concerned. Implemented by whatever key object the external
/// certificate layer produces.
pub trait PeerKey {
    /// Algorithm family name, e.g. "RSA", "ECDSA", "DH", "Ed25519".
    fn algorithm_name(&self) -> &str;

    /// Estimated security strength of the key in bits of work.
    fn estimated_strength_bits(&self) -> usize;
}

/// Acceptance queries the message layer issues while constructing or
/// vetting handshake messages.
pub trait Policy: Send + Sync {
    /// Whether TLS 1.2 may be negotiated.
    fn allow_tls12(&self) -> bool {
        true
    }

    /// Whether DTLS 1.2 may be negotiated.
    fn allow_dtls12(&self) -> bool {
        true
    }

    /// Whether the ciphersuite code is acceptable.
    fn acceptable_ciphersuite(&self, suite: u16) -> bool;

    /// Whether the named group is acceptable.
    fn acceptable_group(&self, group: GroupParams) -> bool;

    /// Whether the signature scheme is acceptable.
    fn acceptable_signature_scheme(&self, scheme: SignatureScheme) -> bool;

    /// Whether hello randoms lead with the current gmt unix time.
    fn include_time_in_hello_random(&self) -> bool {
        true
    }

    /// Vet a peer's public key.
    ///
    /// # Errors
    ///
    /// `PolicyRejection` (INSUFFICIENT_SECURITY) when the key is too weak,
    /// `PolicyRejection` (HANDSHAKE_FAILURE) when the algorithm is
    /// unacceptable.
    fn check_peer_key_acceptable(&self, key: &dyn PeerKey) -> Result<()>;
}

/// Baseline policy: every known suite, group and scheme is acceptable and
/// peer keys must clear the customary minimum strengths.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPolicy;

impl DefaultPolicy {
    /// Minimum work factor, in bits, demanded of a peer key.
    const MINIMUM_KEY_STRENGTH_BITS: usize = 110;
}

impl Policy for DefaultPolicy {
    fn acceptable_ciphersuite(&self, suite: u16) -> bool {
        CipherSuite::from_u16(suite).is_some()
    }

    fn acceptable_group(&self, _group: GroupParams) -> bool {
        true
    }

    fn acceptable_signature_scheme(&self, _scheme: SignatureScheme) -> bool {
        true
    }

    fn check_peer_key_acceptable(&self, key: &dyn PeerKey) -> Result<()> {
        let strength = key.estimated_strength_bits();
        if strength < Self::MINIMUM_KEY_STRENGTH_BITS {
            tracing::warn!(
                algorithm = key.algorithm_name(),
                strength,
                "rejecting peer key below minimum strength"
            );
            return Err(Error::insufficient_security(format!(
                "Peer {} key of strength {} bits is below the {}-bit minimum",
                key.algorithm_name(),
                strength,
                Self::MINIMUM_KEY_STRENGTH_BITS
            )));
        }
        Ok(())
    }
}
