// error.rs - Typed errors for the RADIUS codec
//
// This module defines the error kinds the codec surfaces to callers.
// Codec functions never retry internally; they propagate one of these
// variants and let the caller decide what to do.

use thiserror::Error;

/// Errors produced by packet framing, AVP codecs, and the authenticator
/// cryptography layer, plus the thin dictionary/transport collaborators.
#[derive(Debug, Error)]
pub enum RadiusError {
    /// Buffer too short, length field inconsistent, or an AVP's length
    /// byte is out of range / overruns the buffer.
    #[error("malformed packet: {0}")]
    MalformedPacket(String),

    /// Caller attempted to encode an AVP whose value exceeds 253 bytes.
    #[error("AVP value too long: {len} bytes (max 253)")]
    AvpTooLong {
        /// Offending value length.
        len: usize,
    },

    /// Response/request authenticator digest did not match the received
    /// field.
    #[error("RADIUS Authenticator verification failed")]
    AuthenticatorMismatch,

    /// HMAC-MD5 of the zeroed-MA buffer differs from the received
    /// Message-Authenticator value.
    #[error("RADIUS Message-Authenticator verification failed")]
    MessageAuthenticatorMismatch,

    /// Encode was requested for a packet code whose authenticator recipe
    /// is undefined.
    #[error("unsupported packet code: {0}")]
    UnsupportedCode(u8),

    /// The entropy source failed while generating an authenticator.
    #[error("failed to generate random authenticator: {0}")]
    RngFailure(String),

    /// Transport I/O failure (the `transport` collaborator).
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Dictionary load/parse failure (the `dictionary` collaborator).
    #[error("dictionary error: {0}")]
    Dictionary(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RadiusError>;
