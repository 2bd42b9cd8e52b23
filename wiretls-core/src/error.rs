//! Error types for the handshake message layer.

use core::fmt;

/// Result type for handshake layer operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors produced while parsing, constructing or serializing handshake
/// messages.
///
/// Every decode failure is adversary-exposed: parsing aborts immediately,
/// no partial message is handed upward, and the state machine translates
/// the error into an outbound fatal alert via [`Error::alert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed bytes: truncation, inconsistent length prefixes,
    /// duplicate extension codes, unexpected trailing data.
    Decode(String),

    /// Programmer misuse: adding a duplicate extension outbound,
    /// constructing a message with inconsistent fields.
    InvalidArgument(String),

    /// Operation not valid for the object's current state, e.g.
    /// serializing an unknown extension or reading a pre-master secret
    /// that was never recovered.
    InvalidState(String),

    /// The policy refused a peer parameter (key, group, scheme, version).
    PolicyRejection {
        /// Human-readable reason for the rejection.
        reason: String,
        /// The alert this rejection surfaces as.
        alert: AlertDescription,
    },

    /// Failure reported by the cryptographic capability layer.
    Crypto(String),
}

impl Error {
    /// Decode error with a message.
    pub fn decode(msg: impl Into<String>) -> Self {
        Error::Decode(msg.into())
    }

    /// Policy rejection surfacing as HANDSHAKE_FAILURE.
    pub fn policy_rejection(reason: impl Into<String>) -> Self {
        Error::PolicyRejection {
            reason: reason.into(),
            alert: AlertDescription::HandshakeFailure,
        }
    }

    /// Policy rejection surfacing as INSUFFICIENT_SECURITY.
    pub fn insufficient_security(reason: impl Into<String>) -> Self {
        Error::PolicyRejection {
            reason: reason.into(),
            alert: AlertDescription::InsufficientSecurity,
        }
    }

    /// The fatal alert this error surfaces as on the wire.
    pub fn alert(&self) -> AlertDescription {
        match self {
            Error::Decode(_) => AlertDescription::DecodeError,
            Error::PolicyRejection { alert, .. } => *alert,
            Error::InvalidArgument(_) | Error::InvalidState(_) | Error::Crypto(_) => {
                AlertDescription::InternalError
            },
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Decode(msg) => write!(f, "Decode error: {}", msg),
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            Error::PolicyRejection { reason, .. } => write!(f, "Policy rejection: {}", reason),
            Error::Crypto(msg) => write!(f, "Cryptographic error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<wiretls_crypto::Error> for Error {
    fn from(e: wiretls_crypto::Error) -> Self {
        Error::Crypto(e.to_string())
    }
}

/// TLS alert descriptions (RFC 5246 Section 7.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AlertDescription {
    /// Close notify
    CloseNotify = 0,

    /// Unexpected message
    UnexpectedMessage = 10,

    /// Bad record MAC
    BadRecordMac = 20,

    /// Record overflow
    RecordOverflow = 22,

    /// Handshake failure
    HandshakeFailure = 40,

    /// Bad certificate
    BadCertificate = 42,

    /// Unsupported certificate
    UnsupportedCertificate = 43,

    /// Certificate revoked
    CertificateRevoked = 44,

    /// Certificate expired
    CertificateExpired = 45,

    /// Certificate unknown
    CertificateUnknown = 46,

    /// Illegal parameter
    IllegalParameter = 47,

    /// Unknown CA
    UnknownCa = 48,

    /// Access denied
    AccessDenied = 49,

    /// Decode error
    DecodeError = 50,

    /// Decrypt error
    DecryptError = 51,

    /// Protocol version not supported
    ProtocolVersion = 70,

    /// Insufficient security
    InsufficientSecurity = 71,

    /// Internal error
    InternalError = 80,

    /// Inappropriate fallback
    InappropriateFallback = 86,

    /// User canceled
    UserCanceled = 90,

    /// No renegotiation
    NoRenegotiation = 100,

    /// Unsupported extension
    UnsupportedExtension = 110,

    /// Unrecognized name
    UnrecognizedName = 112,

    /// No application protocol
    NoApplicationProtocol = 120,
}

impl AlertDescription {
    /// Convert from wire format (u8).
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(AlertDescription::CloseNotify),
            10 => Some(AlertDescription::UnexpectedMessage),
            20 => Some(AlertDescription::BadRecordMac),
            22 => Some(AlertDescription::RecordOverflow),
            40 => Some(AlertDescription::HandshakeFailure),
            42 => Some(AlertDescription::BadCertificate),
            43 => Some(AlertDescription::UnsupportedCertificate),
            44 => Some(AlertDescription::CertificateRevoked),
            45 => Some(AlertDescription::CertificateExpired),
            46 => Some(AlertDescription::CertificateUnknown),
            47 => Some(AlertDescription::IllegalParameter),
            48 => Some(AlertDescription::UnknownCa),
            49 => Some(AlertDescription::AccessDenied),
            50 => Some(AlertDescription::DecodeError),
            51 => Some(AlertDescription::DecryptError),
            70 => Some(AlertDescription::ProtocolVersion),
            71 => Some(AlertDescription::InsufficientSecurity),
            80 => Some(AlertDescription::InternalError),
            86 => Some(AlertDescription::InappropriateFallback),
            90 => Some(AlertDescription::UserCanceled),
            100 => Some(AlertDescription::NoRenegotiation),
            110 => Some(AlertDescription::UnsupportedExtension),
            112 => Some(AlertDescription::UnrecognizedName),
            120 => Some(AlertDescription::NoApplicationProtocol),
            _ => None,
        }
    }

    /// Convert to wire format (u8).
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Check if this alert is fatal.
    ///
    /// In TLS 1.2, close_notify, user_canceled and no_renegotiation are
    /// sent at warning level; everything else the handshake layer
    /// produces is fatal.
    pub const fn is_fatal(self) -> bool {
        !matches!(
            self,
            AlertDescription::CloseNotify
                | AlertDescription::UserCanceled
                | AlertDescription::NoRenegotiation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_description_conversion() {
        assert_eq!(
            AlertDescription::from_u8(50),
            Some(AlertDescription::DecodeError)
        );
        assert_eq!(AlertDescription::from_u8(255), None);
        assert_eq!(AlertDescription::HandshakeFailure.to_u8(), 40);
    }

    #[test]
    fn test_error_alert_mapping() {
        assert_eq!(
            Error::decode("bad").alert(),
            AlertDescription::DecodeError
        );
        assert_eq!(
            Error::policy_rejection("no").alert(),
            AlertDescription::HandshakeFailure
        );
        assert_eq!(
            Error::insufficient_security("weak key").alert(),
            AlertDescription::InsufficientSecurity
        );
        assert_eq!(
            Error::InvalidState("oops".into()).alert(),
            AlertDescription::InternalError
        );
    }

    #[test]
    fn test_alert_fatality() {
        assert!(!AlertDescription::CloseNotify.is_fatal());
        assert!(!AlertDescription::NoRenegotiation.is_fatal());
        assert!(AlertDescription::DecodeError.is_fatal());
        assert!(AlertDescription::InsufficientSecurity.is_fatal());
    }
}
