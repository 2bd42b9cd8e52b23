//! # WireTLS Core
//!
//! The TLS 1.2 / DTLS 1.2 handshake message layer: a wire-bit-exact codec
//! and in-memory model for handshake messages and their extensions.
//!
//! This crate sits between the record layer (which hands it byte
//! buffers) and the handshake state machine (which consumes the parsed
//! messages):
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │   Handshake state machine (external)    │
//! └─────────────────┬───────────────────────┘
//!                   │ typed messages
//! ┌─────────────────▼───────────────────────┐
//! │       wiretls-core (this crate)         │
//! │  ┌──────────────────────────────────┐   │
//! │  │   Handshake messages             │   │
//! │  ├──────────────────────────────────┤   │
//! │  │   Extensions framework           │   │
//! │  ├──────────────────────────────────┤   │
//! │  │   Wire primitives                │   │
//! │  └──────────────────────────────────┘   │
//! └─────────────────┬───────────────────────┘
//!                   │ byte buffers
//! ┌─────────────────▼───────────────────────┐
//! │      Record layer (external)            │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Parsing and serialization are pure transformations over byte slices;
//! nothing here does I/O, schedules work or enforces message ordering.
//! Cryptographic operations go through the `wiretls-crypto` capability
//! traits, and acceptability decisions go through the [`policy::Policy`]
//! seam. Every decode failure carries the alert it should surface as.

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    unused_qualifications
)]

// Re-export the crypto capability interface
pub use wiretls_crypto;

pub mod algos;
pub mod cipher;
pub mod error;
pub mod extension_types;
pub mod extensions;
pub mod messages;
pub mod policy;
pub mod protocol;
pub mod random;
pub mod wire;

// Re-exports
pub use error::{AlertDescription, Error, Result};
pub use protocol::{ConnectionSide, ContentType, ExtensionType, HandshakeType, ProtocolVersion};
