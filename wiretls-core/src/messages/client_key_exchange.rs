//! ClientKeyExchange message (RFC 5246 Section 7.4.7).

use zeroize::Zeroizing;

use crate::algos::KexAlgo;
use crate::error::{Error, Result};
use crate::protocol::HandshakeType;
use crate::wire::{Reader, Writer};

/// ClientKeyExchange: the client's contribution to the pre-master
/// secret.
///
/// ```text
/// STATIC_RSA: opaque encrypted_pre_master<0..2^16-1>;
/// DH:         opaque dh_Yc<1..2^16-1>;
/// ECDH:       opaque point<1..2^8-1>;
/// PSK:        opaque psk_identity<0..2^16-1>;
/// ECDHE_PSK:  psk_identity then the ECDH point;
/// CECPQ1:     opaque key_exchange<1..2^16-1>;
/// ```
///
/// The carrier keeps the raw on-wire material; recovering the actual
/// pre-master secret is the crypto layer's job, and the server side
/// deposits the result here afterwards.
#[derive(Clone)]
pub struct ClientKeyExchange {
    key_material: Vec<u8>,
    pre_master: Option<Zeroizing<Vec<u8>>>,
}

impl std::fmt::Debug for ClientKeyExchange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientKeyExchange")
            .field("key_material", &self.key_material)
            .field(
                "pre_master",
                &self.pre_master.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl PartialEq for ClientKeyExchange {
    fn eq(&self, other: &Self) -> bool {
        // The recovered pre-master secret is session state, not part of
        // the message.
        self.key_material == other.key_material
    }
}

impl Eq for ClientKeyExchange {}

impl ClientKeyExchange {
    /// The wire tag of this message.
    pub fn handshake_type(&self) -> HandshakeType {
        HandshakeType::ClientKeyExchange
    }

    /// Static RSA: the encrypted pre-master secret, 2-byte-prefixed.
    pub fn for_static_rsa(encrypted_pre_master: &[u8]) -> Result<Self> {
        let mut writer = Writer::new();
        writer.append_length_value(encrypted_pre_master, 2)?;
        Ok(Self::from_material(writer.into_vec()))
    }

    /// Ephemeral DH: the client public value, 2-byte-prefixed.
    pub fn for_dh(public_value: &[u8]) -> Result<Self> {
        let mut writer = Writer::new();
        writer.append_length_value(public_value, 2)?;
        Ok(Self::from_material(writer.into_vec()))
    }

    /// Ephemeral ECDH: the client point, 1-byte-prefixed.
    pub fn for_ecdh(public_point: &[u8]) -> Result<Self> {
        let mut writer = Writer::new();
        writer.append_length_value(public_point, 1)?;
        Ok(Self::from_material(writer.into_vec()))
    }

    /// PSK: the chosen identity, 2-byte-prefixed.
    pub fn for_psk(identity: &[u8]) -> Result<Self> {
        let mut writer = Writer::new();
        writer.append_length_value(identity, 2)?;
        Ok(Self::from_material(writer.into_vec()))
    }

    /// ECDHE-PSK: the identity then the ECDH point.
    pub fn for_ecdhe_psk(identity: &[u8], public_point: &[u8]) -> Result<Self> {
        let mut writer = Writer::new();
        writer.append_length_value(identity, 2)?;
        writer.append_length_value(public_point, 1)?;
        Ok(Self::from_material(writer.into_vec()))
    }

    /// CECPQ1: the combined key exchange blob, 2-byte-prefixed.
    pub fn for_cecpq1(key_exchange: &[u8]) -> Result<Self> {
        let mut writer = Writer::new();
        writer.append_length_value(key_exchange, 2)?;
        Ok(Self::from_material(writer.into_vec()))
    }

    fn from_material(key_material: Vec<u8>) -> Self {
        Self {
            key_material,
            pre_master: None,
        }
    }

    /// Parse a ClientKeyExchange body for the negotiated key exchange.
    /// The slice must be consumed exactly.
    pub fn decode(buf: &[u8], kex_alg: KexAlgo) -> Result<Self> {
        let mut reader = Reader::new(buf);

        match kex_alg {
            // TLS 1.2 always carries the 2-byte length prefix here.
            KexAlgo::StaticRsa => {
                reader.get_range_u8(2, 0, 65535)?;
            },
            KexAlgo::Dh => {
                reader.get_range_u8(2, 1, 65535)?;
            },
            KexAlgo::Ecdh => {
                reader.get_range_u8(1, 1, 255)?;
            },
            KexAlgo::Psk => {
                reader.get_range_u8(2, 0, 65535)?;
            },
            KexAlgo::EcdhePsk => {
                reader.get_range_u8(2, 0, 65535)?;
                reader.get_range_u8(1, 1, 255)?;
            },
            KexAlgo::Cecpq1 => {
                reader.get_range_u8(2, 1, 65535)?;
            },
        }

        if reader.has_remaining() {
            return Err(Error::decode("Trailing bytes after ClientKeyExchange"));
        }

        Ok(Self::from_material(buf.to_vec()))
    }

    /// Serialize the message body: exactly the on-wire key material.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        Ok(self.key_material.clone())
    }

    /// The raw on-wire key material.
    pub fn key_material(&self) -> &[u8] {
        &self.key_material
    }

    /// Deposit the recovered pre-master secret (server side).
    pub fn set_pre_master_secret(&mut self, pre_master: Zeroizing<Vec<u8>>) {
        self.pre_master = Some(pre_master);
    }

    /// The recovered pre-master secret.
    ///
    /// # Errors
    ///
    /// `InvalidState` until the crypto layer has recovered it.
    pub fn pre_master_secret(&self) -> Result<&[u8]> {
        self.pre_master
            .as_deref()
            .map(Vec::as_slice)
            .ok_or_else(|| Error::InvalidState("Pre-master secret not yet recovered".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ecdh_roundtrip() {
        let msg = ClientKeyExchange::for_ecdh(&[0x04; 65]).unwrap();
        let bytes = msg.serialize().unwrap();
        assert_eq!(bytes.len(), 66);

        let parsed = ClientKeyExchange::decode(&bytes, KexAlgo::Ecdh).unwrap();
        assert_eq!(parsed, msg);
    }

    #[test]
    fn test_static_rsa_shape() {
        let msg = ClientKeyExchange::for_static_rsa(&[0xAA; 256]).unwrap();
        let bytes = msg.serialize().unwrap();
        assert_eq!(&bytes[..2], &[0x01, 0x00]);
        assert!(ClientKeyExchange::decode(&bytes, KexAlgo::StaticRsa).is_ok());
        // An ECDH parse of the same bytes misreads the prefix.
        assert!(ClientKeyExchange::decode(&bytes, KexAlgo::Ecdh).is_err());
    }

    #[test]
    fn test_ecdhe_psk_shape() {
        let msg = ClientKeyExchange::for_ecdhe_psk(b"identity", &[0xBB; 32]).unwrap();
        let bytes = msg.serialize().unwrap();
        let parsed = ClientKeyExchange::decode(&bytes, KexAlgo::EcdhePsk).unwrap();
        assert_eq!(parsed.key_material(), bytes.as_slice());
    }

    #[test]
    fn test_dh_empty_value_rejected() {
        let bytes = [0x00, 0x00];
        assert!(ClientKeyExchange::decode(&bytes, KexAlgo::Dh).is_err());
        // But an empty PSK identity is fine.
        assert!(ClientKeyExchange::decode(&bytes, KexAlgo::Psk).is_ok());
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = ClientKeyExchange::for_ecdh(&[0x04; 32])
            .unwrap()
            .serialize()
            .unwrap();
        bytes.push(0);
        assert!(ClientKeyExchange::decode(&bytes, KexAlgo::Ecdh).is_err());
    }

    #[test]
    fn test_pre_master_lifecycle() {
        let mut msg = ClientKeyExchange::for_static_rsa(&[0xAA; 48]).unwrap();
        assert!(matches!(
            msg.pre_master_secret(),
            Err(Error::InvalidState(_))
        ));

        msg.set_pre_master_secret(Zeroizing::new(vec![0x03, 0x03, 0x42]));
        assert_eq!(msg.pre_master_secret().unwrap(), &[0x03, 0x03, 0x42]);

        let rendered = format!("{:?}", msg);
        assert!(!rendered.contains("0x42"));
        assert!(rendered.contains("redacted"));
    }
}
