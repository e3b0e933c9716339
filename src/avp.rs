// avp.rs - AVP framing and the per-type value codec
//
// On the wire an AVP is `type(1) | length(1) | value(length-2)` with
// `2 <= length <= 255`, so a value is at most 253 bytes. The dictionary
// type tag for an attribute selects the codec variant used to interpret
// its value; this module realizes that as a tagged enum dispatched by a
// single match, per the source's per-type-dispatch design note, rather
// than a runtime table of codec objects.

use std::net::Ipv4Addr;

use crate::error::{RadiusError, Result};
use crate::password;
use crate::vsa::{Vsa, VsaFormat};

/// Maximum value length a single AVP can carry (255 - 2 header bytes).
pub const MAX_VALUE_LEN: usize = 253;

/// A raw attribute-value pair as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avp {
    /// Attribute type tag.
    pub attr_type: u8,
    /// Attribute value bytes (0..=253 bytes).
    pub value: Vec<u8>,
}

impl Avp {
    /// Build an AVP from a type and value, without bounds-checking
    /// `value`'s length — use [`Avp::encode`] to get that check.
    pub fn new(attr_type: u8, value: Vec<u8>) -> Self {
        Self { attr_type, value }
    }

    /// Encode this AVP's `type, length, value` triple onto `out`.
    pub fn encode(&self, out: &mut Vec<u8>) -> Result<()> {
        if self.value.len() > MAX_VALUE_LEN {
            return Err(RadiusError::AvpTooLong {
                len: self.value.len(),
            });
        }
        out.push(self.attr_type);
        out.push((self.value.len() + 2) as u8);
        out.extend_from_slice(&self.value);
        Ok(())
    }

    /// Parse one `type, length, value` triple from the front of `buf`,
    /// returning the AVP and the number of bytes consumed.
    pub fn decode(buf: &[u8]) -> Result<(Self, usize)> {
        if buf.len() < 2 {
            return Err(RadiusError::MalformedPacket("incomplete AVP header".into()));
        }
        let attr_type = buf[0];
        let length = buf[1] as usize;
        if length < 2 {
            return Err(RadiusError::MalformedPacket(format!(
                "AVP length {length} below minimum of 2"
            )));
        }
        if length > buf.len() {
            return Err(RadiusError::MalformedPacket(
                "AVP extends beyond packet".into(),
            ));
        }
        let value = buf[2..length].to_vec();
        Ok((Self { attr_type, value }, length))
    }
}

/// Dictionary type tag that selects an AVP's value codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrKind {
    /// Raw UTF-8/opaque text.
    String,
    /// Raw bytes, no further interpretation.
    Octets,
    /// 4-byte big-endian unsigned integer.
    Integer,
    /// 4-byte IPv4 address in network order.
    IpAddr,
    /// RFC 2865 §5.2 obfuscated User-Password.
    Password,
    /// Vendor-Specific Attribute (nested VSA).
    Vsa,
}

/// A decoded, typed attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AvpValue {
    /// Decoded string value.
    String(String),
    /// Decoded opaque bytes.
    Octets(Vec<u8>),
    /// Decoded 32-bit integer.
    Integer(u32),
    /// Decoded IPv4 address.
    IpAddr(Ipv4Addr),
    /// Deobfuscated password.
    Password(String),
    /// Decoded vendor-specific sub-attribute.
    Vsa(Vsa),
}

/// Decode an AVP's value according to `kind`.
///
/// `authenticator`/`secret` are only consulted for [`AttrKind::Password`]
/// and come from the owning `Packet` — see the Open Question resolution
/// in DESIGN.md on why password (de)obfuscation cannot live purely at the
/// per-AVP layer.
pub fn decode(
    kind: AttrKind,
    avp: &Avp,
    authenticator: &[u8; 16],
    secret: &str,
    vsa_format: VsaFormat,
) -> Result<AvpValue> {
    match kind {
        AttrKind::String => Ok(AvpValue::String(
            String::from_utf8_lossy(&avp.value).into_owned(),
        )),
        AttrKind::Octets => Ok(AvpValue::Octets(avp.value.clone())),
        AttrKind::Integer => {
            let bytes: [u8; 4] = avp
                .value
                .as_slice()
                .try_into()
                .map_err(|_| RadiusError::MalformedPacket("integer AVP not 4 bytes".into()))?;
            Ok(AvpValue::Integer(u32::from_be_bytes(bytes)))
        }
        AttrKind::IpAddr => {
            let bytes: [u8; 4] = avp
                .value
                .as_slice()
                .try_into()
                .map_err(|_| RadiusError::MalformedPacket("ipaddr AVP not 4 bytes".into()))?;
            Ok(AvpValue::IpAddr(Ipv4Addr::from(bytes)))
        }
        AttrKind::Password => {
            let plain = password::deobfuscate(&avp.value, authenticator, secret);
            Ok(AvpValue::Password(String::from_utf8_lossy(&plain).into_owned()))
        }
        AttrKind::Vsa => Ok(AvpValue::Vsa(Vsa::from_avp(avp, vsa_format)?)),
    }
}

/// Render an AVP's value as a human-readable string (for logging/`Display`).
pub fn render(
    kind: AttrKind,
    avp: &Avp,
    authenticator: &[u8; 16],
    secret: &str,
    vsa_format: VsaFormat,
) -> String {
    match decode(kind, avp, authenticator, secret, vsa_format) {
        Ok(AvpValue::String(s)) => s,
        Ok(AvpValue::Octets(b)) => format!("{b:02x?}"),
        Ok(AvpValue::Integer(n)) => n.to_string(),
        Ok(AvpValue::IpAddr(ip)) => ip.to_string(),
        Ok(AvpValue::Password(_)) => "<password>".to_string(),
        Ok(AvpValue::Vsa(vsa)) => {
            format!(
                "{{Vendor: {}, Attr: {}, Value: {:02x?}}}",
                vsa.vendor, vsa.vsa_type, vsa.value
            )
        }
        Err(_) => format!("{:02x?}", avp.value),
    }
}

/// Parse a textual value back into wire bytes for `kind`.
///
/// This is an identity/forward transform only; it never obfuscates a
/// password, since that requires the secret and the request
/// authenticator. Encoding a `User-Password` AVP is handled by
/// [`crate::packet::Packet::encode`] instead — see the Open Question
/// resolution in DESIGN.md.
pub fn parse(kind: AttrKind, text: &str) -> Result<Vec<u8>> {
    match kind {
        AttrKind::String | AttrKind::Password => Ok(text.as_bytes().to_vec()),
        AttrKind::Octets => Ok(text.as_bytes().to_vec()),
        AttrKind::Integer => {
            let n: u32 = text
                .parse()
                .map_err(|_| RadiusError::MalformedPacket(format!("not an integer: {text}")))?;
            Ok(n.to_be_bytes().to_vec())
        }
        AttrKind::IpAddr => {
            let ip: Ipv4Addr = text
                .parse()
                .map_err(|_| RadiusError::MalformedPacket(format!("not an IPv4 address: {text}")))?;
            Ok(ip.octets().to_vec())
        }
        AttrKind::Vsa => Err(RadiusError::MalformedPacket(
            "Vendor-Specific values are not parsed from text directly".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avp_round_trips_through_the_wire() {
        let avp = Avp::new(1, b"carol".to_vec());
        let mut buf = Vec::new();
        avp.encode(&mut buf).unwrap();
        assert_eq!(buf, [1, 7, b'c', b'a', b'r', b'o', b'l']);

        let (decoded, consumed) = Avp::decode(&buf).unwrap();
        assert_eq!(consumed, buf.len());
        assert_eq!(decoded, avp);
    }

    #[test]
    fn avp_too_long_is_rejected() {
        let avp = Avp::new(1, vec![0u8; MAX_VALUE_LEN + 1]);
        let mut buf = Vec::new();
        assert!(matches!(
            avp.encode(&mut buf),
            Err(RadiusError::AvpTooLong { .. })
        ));
    }

    #[test]
    fn decode_rejects_length_below_minimum() {
        let buf = [1u8, 1];
        assert!(Avp::decode(&buf).is_err());
    }

    #[test]
    fn decode_rejects_overrun() {
        let buf = [1u8, 10, 1, 2, 3];
        assert!(Avp::decode(&buf).is_err());
    }

    #[test]
    fn integer_codec_round_trips() {
        let bytes = parse(AttrKind::Integer, "12345").unwrap();
        let avp = Avp::new(5, bytes);
        let value = decode(
            AttrKind::Integer,
            &avp,
            &[0u8; 16],
            "secret",
            VsaFormat::OneByteType,
        )
        .unwrap();
        assert_eq!(value, AvpValue::Integer(12345));
    }

    #[test]
    fn ipaddr_codec_round_trips() {
        let bytes = parse(AttrKind::IpAddr, "10.8.10.3").unwrap();
        let avp = Avp::new(4, bytes);
        let value = decode(
            AttrKind::IpAddr,
            &avp,
            &[0u8; 16],
            "secret",
            VsaFormat::OneByteType,
        )
        .unwrap();
        assert_eq!(value, AvpValue::IpAddr("10.8.10.3".parse().unwrap()));
    }
}
