//! Deterministic mock crypto provider for tests.
//!
//! Every operation here is predictable and completely insecure: the RNG is
//! a counter stream, the "HMAC" is a keyed mixing function and signatures
//! are recomputable tags. The point is to let `wiretls-core` exercise its
//! capability seams (hello randoms, cookie derivation, signature
//! delegation) in tests without pulling in a real crypto backend.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

use std::sync::atomic::{AtomicU64, Ordering};

use wiretls_crypto::{
    CryptoProvider, Error, HashAlgorithm, Hmac, Random, Result, Signature, SignatureAlgorithm,
    SigningKey, VerifyingKey,
};

/// Mock provider. Construct one per test.
#[derive(Debug, Default)]
pub struct MockProvider {
    rng: CountingRandom,
}

impl MockProvider {
    /// Create a provider whose RNG starts at zero.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CryptoProvider for MockProvider {
    fn random(&self) -> &dyn Random {
        &self.rng
    }

    fn hmac(&self, algorithm: HashAlgorithm, key: &[u8]) -> Result<Box<dyn Hmac>> {
        Ok(Box::new(MockHmac {
            algorithm,
            state: mix(0x6d61_6373, key),
        }))
    }

    fn signature(&self, algorithm: SignatureAlgorithm) -> Result<Box<dyn Signature>> {
        match algorithm {
            SignatureAlgorithm::Ed448 => Err(Error::UnsupportedAlgorithm(
                algorithm.name().to_string(),
            )),
            _ => Ok(Box::new(MockSignature { algorithm })),
        }
    }
}

/// RNG producing a deterministic counter stream.
#[derive(Debug, Default)]
struct CountingRandom {
    counter: AtomicU64,
}

impl Random for CountingRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<()> {
        for byte in dest.iter_mut() {
            let n = self.counter.fetch_add(1, Ordering::Relaxed);
            *byte = (n as u8).wrapping_mul(151).wrapping_add(0x5A);
        }
        Ok(())
    }
}

// A tiny keyed mixer. Deterministic, collision-prone, test-only.
fn mix(mut state: u64, data: &[u8]) -> u64 {
    for &b in data {
        state = state
            .rotate_left(13)
            .wrapping_mul(0x0100_0000_01b3)
            .wrapping_add(u64::from(b) ^ 0xA5);
    }
    state
}

struct MockHmac {
    algorithm: HashAlgorithm,
    state: u64,
}

impl Hmac for MockHmac {
    fn update(&mut self, data: &[u8]) {
        self.state = mix(self.state, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.output_size());
        let mut s = self.state;
        while out.len() < self.algorithm.output_size() {
            s = mix(s, &[out.len() as u8]);
            out.extend_from_slice(&s.to_be_bytes());
        }
        out.truncate(self.algorithm.output_size());
        out
    }

    fn output_size(&self) -> usize {
        self.algorithm.output_size()
    }

    fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }
}

struct MockSignature {
    algorithm: SignatureAlgorithm,
}

impl MockSignature {
    fn tag(&self, key_bytes: &[u8], message: &[u8]) -> Vec<u8> {
        let mut s = mix(u64::from(self.algorithm.iana_codepoint()), key_bytes);
        s = mix(s, message);
        s.to_be_bytes().to_vec()
    }
}

impl Signature for MockSignature {
    fn sign(&self, signing_key: &SigningKey, message: &[u8]) -> Result<Vec<u8>> {
        if signing_key.as_bytes().is_empty() {
            return Err(Error::InvalidPrivateKey);
        }
        Ok(self.tag(signing_key.as_bytes(), message))
    }

    fn verify(
        &self,
        verifying_key: &VerifyingKey,
        message: &[u8],
        signature: &[u8],
    ) -> Result<()> {
        if verifying_key.as_bytes().is_empty() {
            return Err(Error::InvalidPublicKey);
        }
        if self.tag(verifying_key.as_bytes(), message) == signature {
            Ok(())
        } else {
            Err(Error::SignatureVerificationFailed)
        }
    }

    fn algorithm(&self) -> SignatureAlgorithm {
        self.algorithm
    }
}
