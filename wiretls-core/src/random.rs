//! Hello random composition and the TLS 1.3 downgrade sentinels.

use std::time::{SystemTime, UNIX_EPOCH};

use wiretls_crypto::Random;

use crate::error::Result;
use crate::policy::Policy;
use crate::protocol::ProtocolVersion;

/// Sentinel in the last 8 bytes of the server random when a TLS 1.3
/// capable server negotiates TLS 1.2 or below, signaling a fallback to
/// TLS 1.1 (RFC 8446 Section 4.1.3: "DOWNGRD\x01").
pub const DOWNGRADE_TLS11: [u8; 8] = [0x44, 0x4F, 0x57, 0x4E, 0x47, 0x52, 0x44, 0x01];

/// Sentinel signaling a fallback to TLS 1.0 ("DOWNGRD\x00").
pub const DOWNGRADE_TLS10: [u8; 8] = [0x44, 0x4F, 0x57, 0x4E, 0x47, 0x52, 0x44, 0x00];

/// Source of the gmt unix time written into hello randoms.
///
/// Abstracted so tests can pin the clock; production code uses
/// [`SystemClock`].
pub trait Clock {
    /// Seconds since the Unix epoch, truncated to 32 bits per RFC 5246.
    fn gmt_unix_time(&self) -> u32;
}

/// Wall-clock time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn gmt_unix_time(&self) -> u32 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or(0)
    }
}

/// Compose a 32-byte hello random.
///
/// When the policy asks for it, the first four bytes carry the clock's
/// gmt unix time and the remaining 28 are from the RNG; otherwise all 32
/// bytes are random.
pub fn hello_random(
    rng: &dyn Random,
    clock: &dyn Clock,
    policy: &dyn Policy,
) -> Result<[u8; 32]> {
    let mut random = [0u8; 32];
    rng.fill(&mut random)?;

    if policy.include_time_in_hello_random() {
        random[..4].copy_from_slice(&clock.gmt_unix_time().to_be_bytes());
    }

    Ok(random)
}

/// Inspect the tail of a server random for a downgrade sentinel.
///
/// Returns the version the sentinel says the server fell back to, or
/// `None` when no sentinel is present.
pub fn random_signals_downgrade(random: &[u8; 32]) -> Option<ProtocolVersion> {
    let tail: &[u8] = &random[24..];
    if tail == DOWNGRADE_TLS11 {
        Some(ProtocolVersion::TLS_V11)
    } else if tail == DOWNGRADE_TLS10 {
        Some(ProtocolVersion::TLS_V10)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algos::{GroupParams, SignatureScheme};
    use crate::error::Result as TlsResult;
    use crate::policy::PeerKey;
    use wiretls_crypto::CryptoProvider;
    use wiretls_crypto_mock::MockProvider;

    struct FixedClock(u32);

    impl Clock for FixedClock {
        fn gmt_unix_time(&self) -> u32 {
            self.0
        }
    }

    struct TimePolicy(bool);

    impl Policy for TimePolicy {
        fn acceptable_ciphersuite(&self, _suite: u16) -> bool {
            true
        }

        fn acceptable_group(&self, _group: GroupParams) -> bool {
            true
        }

        fn acceptable_signature_scheme(&self, _scheme: SignatureScheme) -> bool {
            true
        }

        fn include_time_in_hello_random(&self) -> bool {
            self.0
        }

        fn check_peer_key_acceptable(&self, _key: &dyn PeerKey) -> TlsResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_hello_random_with_time_prefix() {
        let provider = MockProvider::new();
        let clock = FixedClock(0x5EED_BEEF);

        let random = hello_random(provider.random(), &clock, &TimePolicy(true)).unwrap();
        assert_eq!(&random[..4], &0x5EED_BEEFu32.to_be_bytes());
    }

    #[test]
    fn test_hello_random_without_time_prefix() {
        let provider = MockProvider::new();
        let clock = FixedClock(0x5EED_BEEF);

        let random = hello_random(provider.random(), &clock, &TimePolicy(false)).unwrap();
        assert_ne!(&random[..4], &0x5EED_BEEFu32.to_be_bytes());
    }

    #[test]
    fn test_downgrade_sentinel_detection() {
        let mut random = [0u8; 32];
        random[24..].copy_from_slice(&DOWNGRADE_TLS11);
        assert_eq!(
            random_signals_downgrade(&random),
            Some(ProtocolVersion::TLS_V11)
        );

        random[24..].copy_from_slice(&DOWNGRADE_TLS10);
        assert_eq!(
            random_signals_downgrade(&random),
            Some(ProtocolVersion::TLS_V10)
        );

        random[31] = 0x42;
        assert_eq!(random_signals_downgrade(&random), None);
    }
}
