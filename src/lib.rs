//! rust-radius: a RADIUS protocol codec.
//!
//! Builds and parses RADIUS packets (RFC 2865 authentication, RFC 2866
//! accounting, RFC 3576 dynamic authorization, RFC 3579
//! Message-Authenticator), including the three authenticator digests,
//! User-Password obfuscation, and Vendor-Specific sub-attributes. A
//! minimal attribute dictionary and a synchronous UDP client round out
//! the crate, but the codec itself does no I/O.

pub mod avp;
pub mod codes;
pub mod config;
pub mod crypto;
pub mod dictionary;
pub mod error;
pub mod packet;
pub mod password;
pub mod transport;
pub mod vsa;

pub use codes::PacketCode;
pub use error::{RadiusError, Result};
pub use packet::Packet;

/// Crate version, as built.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
