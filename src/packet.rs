// packet.rs - RADIUS packet object: framing, accessors, and verification
//
// Header layout (big-endian):
//   offset 0  : code (1)
//   offset 1  : identifier (1)
//   offset 2  : length (2)     -- total packet length
//   offset 4  : authenticator (16)
//   offset 20 : concatenated AVPs

use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};

use rand::{rngs::OsRng, Rng, RngCore};

use crate::avp::Avp;
use crate::codes::PacketCode;
use crate::crypto;
use crate::error::{RadiusError, Result};
use crate::password;
use crate::vsa::{Vsa, VsaFormat};

/// User-Name (RFC 2865 §5.1)
pub const USER_NAME: u8 = 1;
/// User-Password (RFC 2865 §5.2)
pub const USER_PASSWORD: u8 = 2;
/// NAS-IP-Address (RFC 2865 §5.4)
pub const NAS_IP_ADDRESS: u8 = 4;
/// NAS-Port (RFC 2865 §5.5)
pub const NAS_PORT: u8 = 5;
/// Reply-Message (RFC 2865 §5.18)
pub const REPLY_MESSAGE: u8 = 18;
/// NAS-Identifier (RFC 2865 §5.32)
pub const NAS_IDENTIFIER: u8 = 32;
/// Acct-Status-Type (RFC 2866 §5.1)
pub const ACCT_STATUS_TYPE: u8 = 40;
/// Acct-Input-Octets (RFC 2866 §5.3)
pub const ACCT_INPUT_OCTETS: u8 = 42;
/// Acct-Output-Octets (RFC 2866 §5.4)
pub const ACCT_OUTPUT_OCTETS: u8 = 43;
/// Acct-Session-Id (RFC 2866 §5.5)
pub const ACCT_SESSION_ID: u8 = 44;
/// Acct-Input-Gigawords (RFC 2869 §5.1)
pub const ACCT_INPUT_GIGAWORDS: u8 = 52;
/// Acct-Output-Gigawords (RFC 2869 §5.2)
pub const ACCT_OUTPUT_GIGAWORDS: u8 = 53;
/// EAP-Message (RFC 3579 §3.1)
pub const EAP_MESSAGE: u8 = 79;
/// Message-Authenticator (RFC 3579 §3.2)
pub const MESSAGE_AUTHENTICATOR: u8 = 80;

/// Maximum encoded packet size, RFC 2865 §3.
pub const MAX_PACKET_LEN: usize = 4096;
/// Minimum encoded packet size (the 20-byte header).
pub const MIN_PACKET_LEN: usize = 20;

/// A RADIUS packet: header fields, shared secret, and an ordered AVP list.
///
/// Lifecycle: built via [`Packet::request`] (outgoing) or
/// [`Packet::decode_request`]/[`Packet::decode_reply`] (incoming), mutated
/// through the AVP accessors, then consumed by [`Packet::encode`] or by
/// [`Packet::reply`] to start a response.
#[derive(Clone)]
pub struct Packet {
    /// Packet code. `None` only between [`Packet::reply`] and the caller
    /// assigning a response code — `reply()` deliberately does not set
    /// one, mirroring the source it was distilled from.
    pub code: Option<PacketCode>,
    /// 8-bit sequence number.
    pub identifier: u8,
    /// 16-byte authenticator field.
    pub authenticator: [u8; 16],
    /// Shared secret. Never serialized onto the wire.
    pub secret: String,
    /// Ordered AVP list; duplicates are allowed.
    pub avps: Vec<Avp>,
    /// Informational source address, not present on the wire.
    pub client_addr: Option<SocketAddr>,
    /// Cleartext User-Password staged by [`Packet::set_password`],
    /// obfuscated lazily by `encode()` for Access-Request — see
    /// DESIGN.md for why this can't live in the AVP codec layer.
    password_cleartext: Option<String>,
}

impl fmt::Debug for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Packet")
            .field("code", &self.code)
            .field("identifier", &self.identifier)
            .field("authenticator", &self.authenticator)
            .field("secret", &"<redacted>")
            .field("avps", &self.avps)
            .field("client_addr", &self.client_addr)
            .finish()
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Code: {}",
            self.code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "unset".to_string())
        )?;
        writeln!(f, "Identifier: {}", self.identifier)?;
        writeln!(f, "Authenticator: {:02x?}", self.authenticator)?;
        for avp in &self.avps {
            writeln!(f, "  AVP {{type: {}, len: {}}}", avp.attr_type, avp.value.len())?;
        }
        Ok(())
    }
}

impl Packet {
    /// Create a new outgoing request with a random identifier.
    ///
    /// Access-Request and Status-Server additionally get a fresh 16-byte
    /// authenticator, since both seed response validation (and, for
    /// Access-Request, password obfuscation) with a nonce of their own
    /// rather than a digest.
    pub fn request(code: PacketCode, secret: impl Into<String>) -> Result<Self> {
        let mut packet = Self {
            code: Some(code),
            identifier: rand::thread_rng().gen::<u8>(),
            authenticator: [0u8; 16],
            secret: secret.into(),
            avps: Vec::new(),
            client_addr: None,
            password_cleartext: None,
        };
        if matches!(code, PacketCode::AccessRequest | PacketCode::StatusServer) {
            packet.randomize_authenticator()?;
        }
        Ok(packet)
    }

    /// Build a response packet inheriting `identifier`, `authenticator`,
    /// and `secret` from `self`, with an empty AVP list. The caller must
    /// assign `code` before encoding.
    pub fn reply(&self) -> Self {
        Self {
            code: None,
            identifier: self.identifier,
            authenticator: self.authenticator,
            secret: self.secret.clone(),
            avps: Vec::new(),
            client_addr: self.client_addr,
            password_cleartext: None,
        }
    }

    /// Deep-clone this packet.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    fn randomize_authenticator(&mut self) -> Result<()> {
        OsRng
            .try_fill_bytes(&mut self.authenticator)
            .map_err(|e| RadiusError::RngFailure(e.to_string()))
    }

    // ===== AVP accessors =====

    /// Whether an AVP of `attr_type` is present.
    pub fn has(&self, attr_type: u8) -> bool {
        self.avps.iter().any(|a| a.attr_type == attr_type)
    }

    /// The first AVP of `attr_type`, if any.
    pub fn get(&self, attr_type: u8) -> Option<&Avp> {
        self.avps.iter().find(|a| a.attr_type == attr_type)
    }

    /// Delete all AVPs of `avp.attr_type`, then append `avp`.
    pub fn set(&mut self, avp: Avp) {
        self.delete_all(avp.attr_type);
        self.avps.push(avp);
    }

    /// Append an AVP without removing any existing ones of the same type.
    pub fn add(&mut self, avp: Avp) {
        self.avps.push(avp);
    }

    /// Encode `vsa` and append it as a Vendor-Specific AVP.
    pub fn add_vsa(&mut self, vsa: Vsa, format: VsaFormat) -> Result<()> {
        self.add(vsa.to_avp(format)?);
        Ok(())
    }

    /// Delete the first AVP of `attr_type`.
    pub fn delete_first(&mut self, attr_type: u8) {
        if let Some(pos) = self.avps.iter().position(|a| a.attr_type == attr_type) {
            self.avps.remove(pos);
        }
    }

    /// Delete every AVP equal to `avp`.
    ///
    /// The source identifies the AVP to delete by pointer; Rust has no
    /// cheap equivalent that survives a `&mut self` borrow, so this
    /// matches by value instead (type and bytes), which is equivalent
    /// for any AVP that isn't a byte-for-byte duplicate of another.
    pub fn delete(&mut self, avp: &Avp) {
        self.avps.retain(|a| a != avp);
    }

    fn string_avp(&self, attr_type: u8) -> Option<String> {
        self.get(attr_type)
            .map(|avp| String::from_utf8_lossy(&avp.value).into_owned())
    }

    fn integer_avp(&self, attr_type: u8) -> Option<u32> {
        self.get(attr_type).and_then(|avp| {
            let bytes: [u8; 4] = avp.value.as_slice().try_into().ok()?;
            Some(u32::from_be_bytes(bytes))
        })
    }

    /// User-Name, decoded as text.
    pub fn username(&self) -> Option<String> {
        self.string_avp(USER_NAME)
    }

    /// Set User-Name.
    pub fn set_username(&mut self, value: &str) {
        self.set(Avp::new(USER_NAME, value.as_bytes().to_vec()));
    }

    /// User-Password, deobfuscated. Returns the value staged by
    /// [`Packet::set_password`] if encoding hasn't happened yet,
    /// otherwise deobfuscates the wire AVP using the current
    /// authenticator and secret.
    pub fn password(&self) -> Option<String> {
        if let Some(p) = &self.password_cleartext {
            return Some(p.clone());
        }
        self.get(USER_PASSWORD).map(|avp| {
            let plain = password::deobfuscate(&avp.value, &self.authenticator, &self.secret);
            String::from_utf8_lossy(&plain).into_owned()
        })
    }

    /// Stage a cleartext User-Password to be obfuscated during
    /// [`Packet::encode`] (Access-Request only).
    pub fn set_password(&mut self, cleartext: &str) {
        self.password_cleartext = Some(cleartext.to_string());
    }

    /// NAS-IP-Address.
    pub fn nas_ip_address(&self) -> Option<Ipv4Addr> {
        self.get(NAS_IP_ADDRESS).and_then(|avp| {
            let bytes: [u8; 4] = avp.value.as_slice().try_into().ok()?;
            Some(Ipv4Addr::from(bytes))
        })
    }

    /// Acct-Status-Type.
    pub fn acct_status_type(&self) -> Option<u32> {
        self.integer_avp(ACCT_STATUS_TYPE)
    }

    /// Acct-Session-Id.
    pub fn acct_session_id(&self) -> Option<String> {
        self.string_avp(ACCT_SESSION_ID)
    }

    /// NAS-Port.
    pub fn nas_port(&self) -> Option<u32> {
        self.integer_avp(NAS_PORT)
    }

    /// NAS-Identifier.
    pub fn nas_identifier(&self) -> Option<String> {
        self.string_avp(NAS_IDENTIFIER)
    }

    /// EAP-Message, as the raw envelope bytes (no EAP state machine).
    pub fn eap_message(&self) -> Option<&[u8]> {
        self.get(EAP_MESSAGE).map(|avp| avp.value.as_slice())
    }

    /// 64-bit accumulated input octets: the 32-bit counter plus its
    /// gigawords companion shifted into the high bits. An absent counter
    /// contributes 0.
    pub fn acct_total_input_octets(&self) -> u64 {
        let lo = self.integer_avp(ACCT_INPUT_OCTETS).unwrap_or(0) as u64;
        let hi = self.integer_avp(ACCT_INPUT_GIGAWORDS).unwrap_or(0) as u64;
        lo + (hi << 32)
    }

    /// 64-bit accumulated output octets; see [`Packet::acct_total_input_octets`].
    pub fn acct_total_output_octets(&self) -> u64 {
        let lo = self.integer_avp(ACCT_OUTPUT_OCTETS).unwrap_or(0) as u64;
        let hi = self.integer_avp(ACCT_OUTPUT_GIGAWORDS).unwrap_or(0) as u64;
        lo + (hi << 32)
    }

    // ===== framing =====

    /// Serialize header + AVPs without computing any authenticator
    /// digest. Returns a buffer whose length is `20 + sum(avp lengths)`.
    fn encode_no_hash(&self) -> Result<Vec<u8>> {
        let code = self.code.ok_or(RadiusError::UnsupportedCode(0))?;

        let mut buf = Vec::with_capacity(MIN_PACKET_LEN);
        buf.push(code as u8);
        buf.push(self.identifier);
        buf.extend_from_slice(&[0, 0]); // length placeholder
        buf.extend_from_slice(&self.authenticator);
        for avp in &self.avps {
            avp.encode(&mut buf)?;
        }

        if buf.len() > MAX_PACKET_LEN {
            return Err(RadiusError::MalformedPacket(format!(
                "encoded packet length {} exceeds {MAX_PACKET_LEN}",
                buf.len()
            )));
        }

        let len = buf.len() as u16;
        buf[2..4].copy_from_slice(&len.to_be_bytes());
        Ok(buf)
    }

    fn obfuscate_password_avp(&mut self) {
        if let Some(cleartext) = self.password_cleartext.clone() {
            let cipher = password::obfuscate(cleartext.as_bytes(), &self.authenticator, &self.secret);
            self.set(Avp::new(USER_PASSWORD, cipher));
        }
    }

    /// Encode this packet, computing whichever authenticator digests its
    /// `code` requires.
    ///
    /// Access-family packets additionally get a Message-Authenticator AVP
    /// (HMAC-MD5 over the full buffer) appended before the response
    /// authenticator is computed, per RFC 3579. See spec §4.3 for the
    /// exact ordering.
    pub fn encode(&mut self) -> Result<Vec<u8>> {
        let code = self.code.ok_or(RadiusError::UnsupportedCode(0))?;

        if code.is_access() {
            self.set(Avp::new(MESSAGE_AUTHENTICATOR, vec![0u8; 16]));
            if code == PacketCode::AccessRequest && self.authenticator[0] == 0 {
                self.randomize_authenticator()?;
            }
        }

        if code == PacketCode::AccessRequest {
            self.obfuscate_password_avp();
        }

        let mut buf = self.encode_no_hash()?;

        if code.is_access() {
            let mac = crypto::hmac_md5(&self.secret, &buf);
            let tail = buf.len() - 16;
            buf[tail..].copy_from_slice(&mac);
            if let Some(avp) = self
                .avps
                .iter_mut()
                .find(|a| a.attr_type == MESSAGE_AUTHENTICATOR)
            {
                avp.value.copy_from_slice(&mac);
            }
        }

        match code {
            PacketCode::AccessRequest | PacketCode::StatusServer => {
                // Authenticator is already final: the random nonce.
            }
            PacketCode::AccessAccept
            | PacketCode::AccessReject
            | PacketCode::AccessChallenge
            | PacketCode::AccountingRequest
            | PacketCode::AccountingResponse
            | PacketCode::DisconnectRequest
            | PacketCode::DisconnectAccept
            | PacketCode::DisconnectReject
            | PacketCode::CoARequest
            | PacketCode::CoAAccept
            | PacketCode::CoAReject => {
                let placeholder = if code.is_request() {
                    [0u8; 16]
                } else {
                    self.authenticator
                };
                let digest = crypto::response_authenticator(&buf[0..4], &placeholder, &buf[20..], &self.secret);
                self.authenticator = digest;
                buf[4..20].copy_from_slice(&digest);
            }
            PacketCode::StatusClient | PacketCode::Reserved => {
                tracing::warn!(?code, "encode requested for a code with no authenticator recipe");
                return Err(RadiusError::UnsupportedCode(code as u8));
            }
        }

        Ok(buf)
    }

    /// Decode an incoming request (no prior request authenticator to
    /// compare against).
    pub fn decode_request(secret: impl Into<String>, buf: &[u8]) -> Result<Self> {
        Self::decode_packet(secret.into(), buf, None)
    }

    /// Decode an incoming reply, verifying it against the authenticator
    /// of the request it answers.
    pub fn decode_reply(secret: impl Into<String>, buf: &[u8], request_auth: &[u8; 16]) -> Result<Self> {
        Self::decode_packet(secret.into(), buf, Some(request_auth))
    }

    fn decode_packet(secret: String, buf: &[u8], request_auth: Option<&[u8; 16]>) -> Result<Self> {
        if buf.len() < MIN_PACKET_LEN {
            return Err(RadiusError::MalformedPacket(format!(
                "buffer of {} bytes is shorter than the 20-byte header",
                buf.len()
            )));
        }

        let code = PacketCode::from_u8(buf[0])
            .ok_or_else(|| RadiusError::MalformedPacket(format!("unknown packet code {}", buf[0])))?;
        let identifier = buf[1];
        let declared_len = u16::from_be_bytes([buf[2], buf[3]]) as usize;
        if declared_len < MIN_PACKET_LEN {
            return Err(RadiusError::MalformedPacket(format!(
                "declared length {declared_len} is below the 20-byte header"
            )));
        }
        if declared_len > buf.len() {
            return Err(RadiusError::MalformedPacket(format!(
                "declared length {declared_len} exceeds buffer of {} bytes",
                buf.len()
            )));
        }
        let buf = &buf[..declared_len];

        let mut authenticator = [0u8; 16];
        authenticator.copy_from_slice(&buf[4..20]);

        verify_authenticator(buf, code, &authenticator, request_auth, &secret)?;

        let mut avps = Vec::new();
        let mut offset = MIN_PACKET_LEN;
        while offset < buf.len() {
            let (avp, consumed) = Avp::decode(&buf[offset..])?;
            offset += consumed;
            avps.push(avp);
        }

        let packet = Self {
            code: Some(code),
            identifier,
            authenticator,
            secret,
            avps,
            client_addr: None,
            password_cleartext: None,
        };

        packet.verify_message_authenticator(request_auth)?;

        Ok(packet)
    }

    /// Verify this packet's Message-Authenticator AVP, if present.
    ///
    /// Recomputes the HMAC-MD5 digest directly against a freshly built
    /// buffer (header + AVPs with the Message-Authenticator value
    /// zeroed) rather than mutating `self` and restoring it afterward —
    /// `self` is never touched, on success or failure.
    pub fn verify_message_authenticator(&self, request_auth: Option<&[u8; 16]>) -> Result<()> {
        let Some(pos) = self.avps.iter().position(|a| a.attr_type == MESSAGE_AUTHENTICATOR) else {
            return Ok(());
        };
        let saved = &self.avps[pos].value;
        if saved.len() != 16 {
            return Err(RadiusError::MalformedPacket(
                "Message-Authenticator must be 16 bytes".into(),
            ));
        }
        let mut expected_mac = [0u8; 16];
        expected_mac.copy_from_slice(saved);

        let code = self.code.ok_or(RadiusError::UnsupportedCode(0))?;
        let auth_for_hash = if code.is_request() {
            self.authenticator
        } else {
            *request_auth.ok_or_else(|| {
                RadiusError::MalformedPacket(
                    "verifying a reply's Message-Authenticator requires the request authenticator".into(),
                )
            })?
        };

        let mut buf = Vec::with_capacity(MIN_PACKET_LEN);
        buf.push(code as u8);
        buf.push(self.identifier);
        buf.extend_from_slice(&[0, 0]);
        buf.extend_from_slice(&auth_for_hash);
        for (i, avp) in self.avps.iter().enumerate() {
            if i == pos {
                Avp::new(avp.attr_type, vec![0u8; 16]).encode(&mut buf)?;
            } else {
                avp.encode(&mut buf)?;
            }
        }
        let len = buf.len() as u16;
        buf[2..4].copy_from_slice(&len.to_be_bytes());

        crypto::verify_hmac_md5(&self.secret, &buf, &expected_mac).inspect_err(|_| {
            tracing::warn!(code = ?self.code, "Message-Authenticator verification failed");
        })
    }

    /// Render this packet using `dictionary` for attribute names, the way
    /// the source's `String()` method does — but with an injected,
    /// read-only dictionary handle instead of a package-global table.
    pub fn describe(&self, dictionary: &crate::dictionary::Dictionary) -> String {
        let mut out = String::new();
        if let Some(addr) = self.client_addr {
            out.push_str(&format!("From: {addr}\n"));
        }
        out.push_str(&format!(
            "Code: {}\n",
            self.code.map(|c| c.to_string()).unwrap_or_else(|| "unset".into())
        ));
        out.push_str(&format!("Identifier: {}\n", self.identifier));
        out.push_str(&format!("Authenticator: {:02x?}\n", self.authenticator));
        for avp in &self.avps {
            let name = dictionary
                .attr_name(avp.attr_type)
                .unwrap_or("Unknown");
            let kind = dictionary.attr_kind_by_id(avp.attr_type);
            let rendered = match kind {
                Some(kind) => crate::avp::render(
                    kind,
                    avp,
                    &self.authenticator,
                    &self.secret,
                    VsaFormat::OneByteType,
                ),
                None => format!("{:02x?}", avp.value),
            };
            out.push_str(&format!("  {name} = {rendered}\n"));
        }
        out
    }
}

fn verify_authenticator(
    buf: &[u8],
    code: PacketCode,
    authenticator: &[u8; 16],
    request_auth: Option<&[u8; 16]>,
    secret: &str,
) -> Result<()> {
    if matches!(code, PacketCode::AccessRequest | PacketCode::StatusServer) {
        // Random nonce; nothing to verify.
        return Ok(());
    }

    let placeholder = if code.is_request() {
        [0u8; 16]
    } else {
        *request_auth.ok_or_else(|| {
            RadiusError::MalformedPacket(
                "verifying a reply's authenticator requires the request authenticator".into(),
            )
        })?
    };

    let expected = crypto::response_authenticator(&buf[0..4], &placeholder, &buf[20..], secret);
    if expected != *authenticator {
        tracing::warn!(?code, "authenticator verification failed");
        return Err(RadiusError::AuthenticatorMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "testing123";

    #[test]
    fn s5_accounting_request_authenticator() {
        let mut packet = Packet::request(PacketCode::AccountingRequest, SECRET).unwrap();
        packet.set_username("bob");
        let buf = packet.encode().unwrap();

        let expected = crypto::response_authenticator(&buf[0..4], &[0u8; 16], &buf[20..], SECRET);
        assert_eq!(&buf[4..20], &expected[..]);
        assert_eq!(packet.authenticator, expected);
    }

    #[test]
    fn s4_access_request_gets_message_authenticator() {
        let mut packet = Packet::request(PacketCode::AccessRequest, SECRET).unwrap();
        let original_auth = packet.authenticator;
        packet.set_username("a");
        packet.set_password("a");

        let buf = packet.encode().unwrap();

        assert!(packet.has(MESSAGE_AUTHENTICATOR));
        assert_eq!(packet.authenticator, original_auth);
        assert_eq!(&buf[4..20], &original_auth[..]);

        let ma = packet.get(MESSAGE_AUTHENTICATOR).unwrap();
        assert_eq!(ma.value.len(), 16);
        assert_ne!(ma.value, vec![0u8; 16]);
    }

    #[test]
    fn encode_decode_round_trip_preserves_avps() {
        let mut packet = Packet::request(PacketCode::AccessRequest, SECRET).unwrap();
        packet.set_username("carol");
        packet.set_password("hunter2");
        let buf = packet.encode().unwrap();

        let decoded = Packet::decode_request(SECRET, &buf).unwrap();
        assert_eq!(decoded.code, Some(PacketCode::AccessRequest));
        assert_eq!(decoded.username().as_deref(), Some("carol"));
        assert_eq!(decoded.password().as_deref(), Some("hunter2"));
    }

    #[test]
    fn reply_round_trip_verifies_against_request_authenticator() {
        let mut request = Packet::request(PacketCode::AccessRequest, SECRET).unwrap();
        request.set_username("dave");
        let request_auth = request.authenticator;
        let _ = request.encode().unwrap();

        let mut reply = request.reply();
        reply.code = Some(PacketCode::AccessAccept);
        reply.add(Avp::new(REPLY_MESSAGE, b"welcome".to_vec()));
        let reply_buf = reply.encode().unwrap();

        let decoded = Packet::decode_reply(SECRET, &reply_buf, &request_auth).unwrap();
        assert_eq!(decoded.code, Some(PacketCode::AccessAccept));
    }

    #[test]
    fn tampered_reply_authenticator_is_rejected() {
        let mut request = Packet::request(PacketCode::AccessRequest, SECRET).unwrap();
        let request_auth = request.authenticator;
        let _ = request.encode().unwrap();

        let mut reply = request.reply();
        reply.code = Some(PacketCode::AccessReject);
        let mut reply_buf = reply.encode().unwrap();
        reply_buf[4] ^= 0xff;

        let err = Packet::decode_reply(SECRET, &reply_buf, &request_auth).unwrap_err();
        assert!(matches!(err, RadiusError::AuthenticatorMismatch));
    }

    #[test]
    fn tampered_message_authenticator_is_rejected() {
        let mut packet = Packet::request(PacketCode::AccessRequest, SECRET).unwrap();
        packet.set_username("eve");
        let mut buf = packet.encode().unwrap();
        let last = buf.len() - 1;
        buf[last] ^= 0xff;

        let err = Packet::decode_request(SECRET, &buf).unwrap_err();
        assert!(matches!(err, RadiusError::MessageAuthenticatorMismatch));
    }

    #[test]
    fn decode_rejects_short_buffer() {
        let err = Packet::decode_request(SECRET, &[0u8; 10]).unwrap_err();
        assert!(matches!(err, RadiusError::MalformedPacket(_)));
    }

    #[test]
    fn decode_ignores_trailing_bytes_beyond_declared_length() {
        let mut packet = Packet::request(PacketCode::AccountingRequest, SECRET).unwrap();
        packet.set_username("frank");
        let mut buf = packet.encode().unwrap();
        buf.extend_from_slice(&[0u8; 50]); // simulates a reused fixed-size recv buffer

        let decoded = Packet::decode_request(SECRET, &buf).unwrap();
        assert_eq!(decoded.username().as_deref(), Some("frank"));
    }

    #[test]
    fn gigawords_combine_into_a_64_bit_total() {
        let mut packet = Packet::request(PacketCode::AccountingRequest, SECRET).unwrap();
        packet.add(Avp::new(ACCT_INPUT_OCTETS, 500u32.to_be_bytes().to_vec()));
        packet.add(Avp::new(ACCT_INPUT_GIGAWORDS, 1u32.to_be_bytes().to_vec()));
        assert_eq!(packet.acct_total_input_octets(), 500 + (1u64 << 32));
        assert_eq!(packet.acct_total_output_octets(), 0);
    }

    #[test]
    fn set_replaces_all_prior_avps_of_the_same_type() {
        let mut packet = Packet::request(PacketCode::AccessRequest, SECRET).unwrap();
        packet.add(Avp::new(USER_NAME, b"first".to_vec()));
        packet.add(Avp::new(USER_NAME, b"second".to_vec()));
        packet.set(Avp::new(USER_NAME, b"final".to_vec()));
        assert_eq!(
            packet.avps.iter().filter(|a| a.attr_type == USER_NAME).count(),
            1
        );
        assert_eq!(packet.username().as_deref(), Some("final"));
    }

    #[test]
    fn status_server_encodes_with_unchanged_random_authenticator() {
        let mut packet = Packet::request(PacketCode::StatusServer, SECRET).unwrap();
        let original_auth = packet.authenticator;

        let buf = packet.encode().unwrap();

        assert_eq!(packet.authenticator, original_auth);
        assert_eq!(&buf[4..20], &original_auth[..]);
    }

    #[test]
    fn unsupported_code_fails_to_encode() {
        let mut packet = Packet::request(PacketCode::StatusClient, SECRET).unwrap();
        assert!(matches!(
            packet.encode(),
            Err(RadiusError::UnsupportedCode(_))
        ));
    }
}
