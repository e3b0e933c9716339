// dictionary.rs - attribute name/type table
//
// A read-only collaborator mapping attribute and vendor names to their
// wire ids and codec kind, the way a FreeRADIUS-style dictionary file
// does. `Dictionary::standard()` comes pre-loaded with the RFC
// 2865/2866/3579 attributes this crate already knows the kind of;
// `load_str`/`load_file` add to that from a minimal subset of the
// classic dictionary grammar.
//
// $INCLUDE, BEGIN-VENDOR/END-VENDOR, and BEGIN-TLV/END-TLV are accepted
// but ignored: nesting attributes under a vendor block or a TLV isn't
// implemented, so every ATTRIBUTE/VENDOR line lands in the same flat
// top-level tables regardless of where it appears in the file.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::avp::AttrKind;
use crate::error::{RadiusError, Result};
use crate::packet::{
    ACCT_INPUT_GIGAWORDS, ACCT_INPUT_OCTETS, ACCT_OUTPUT_GIGAWORDS, ACCT_OUTPUT_OCTETS,
    ACCT_SESSION_ID, ACCT_STATUS_TYPE, EAP_MESSAGE, MESSAGE_AUTHENTICATOR, NAS_IDENTIFIER,
    NAS_IP_ADDRESS, NAS_PORT, REPLY_MESSAGE, USER_NAME, USER_PASSWORD,
};
use crate::vsa::VENDOR_SPECIFIC;

/// Name/id/kind table for RADIUS attributes and vendors.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    attr_id: HashMap<String, u8>,
    attr_name: HashMap<u8, String>,
    attr_kind: HashMap<u8, AttrKind>,
    vendor_id: HashMap<String, u32>,
    vendor_name: HashMap<u32, String>,
}

impl Dictionary {
    /// An empty dictionary with no attributes registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// A dictionary pre-loaded with the RFC 2865/2866/3579 attributes
    /// this crate's AVP accessors already understand.
    pub fn standard() -> Self {
        let mut dict = Self::new();
        let entries: &[(u8, &str, AttrKind)] = &[
            (USER_NAME, "User-Name", AttrKind::String),
            (USER_PASSWORD, "User-Password", AttrKind::Password),
            (NAS_IP_ADDRESS, "NAS-IP-Address", AttrKind::IpAddr),
            (NAS_PORT, "NAS-Port", AttrKind::Integer),
            (6, "Service-Type", AttrKind::Integer),
            (7, "Framed-Protocol", AttrKind::Integer),
            (8, "Framed-IP-Address", AttrKind::IpAddr),
            (11, "Filter-Id", AttrKind::String),
            (REPLY_MESSAGE, "Reply-Message", AttrKind::String),
            (VENDOR_SPECIFIC, "Vendor-Specific", AttrKind::Vsa),
            (30, "Called-Station-Id", AttrKind::String),
            (31, "Calling-Station-Id", AttrKind::String),
            (NAS_IDENTIFIER, "NAS-Identifier", AttrKind::String),
            (ACCT_STATUS_TYPE, "Acct-Status-Type", AttrKind::Integer),
            (41, "Acct-Delay-Time", AttrKind::Integer),
            (ACCT_INPUT_OCTETS, "Acct-Input-Octets", AttrKind::Integer),
            (ACCT_OUTPUT_OCTETS, "Acct-Output-Octets", AttrKind::Integer),
            (ACCT_SESSION_ID, "Acct-Session-Id", AttrKind::String),
            (45, "Acct-Authentic", AttrKind::Integer),
            (46, "Acct-Session-Time", AttrKind::Integer),
            (ACCT_INPUT_GIGAWORDS, "Acct-Input-Gigawords", AttrKind::Integer),
            (ACCT_OUTPUT_GIGAWORDS, "Acct-Output-Gigawords", AttrKind::Integer),
            (55, "Event-Timestamp", AttrKind::Integer),
            (61, "NAS-Port-Type", AttrKind::Integer),
            (EAP_MESSAGE, "EAP-Message", AttrKind::Octets),
            (MESSAGE_AUTHENTICATOR, "Message-Authenticator", AttrKind::Octets),
            (85, "Acct-Interim-Interval", AttrKind::Integer),
        ];
        for &(id, name, kind) in entries {
            dict.attr_id.insert(name.to_string(), id);
            dict.attr_name.insert(id, name.to_string());
            dict.attr_kind.insert(id, kind);
        }
        dict
    }

    /// Parse dictionary-file text, merging it into `self`.
    pub fn load_str(&mut self, text: &str) -> Result<()> {
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            self.parse_line(line)?;
        }
        Ok(())
    }

    /// Read and parse a dictionary file, merging it into `self`.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let text = fs::read_to_string(path.as_ref())
            .map_err(|e| RadiusError::Dictionary(format!("{}: {e}", path.as_ref().display())))?;
        self.load_str(&text)
    }

    fn parse_line(&mut self, line: &str) -> Result<()> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&cmd) = parts.first() else {
            return Ok(());
        };
        match cmd {
            "ATTRIBUTE" if parts.len() >= 4 => self.parse_attribute(parts[1], parts[2], parts[3]),
            "VENDOR" if parts.len() >= 3 => self.parse_vendor(parts[1], parts[2]),
            "VALUE" | "$INCLUDE" | "BEGIN-VENDOR" | "END-VENDOR" | "BEGIN-TLV" | "END-TLV" => {
                // Accepted, not implemented: value constants and vendor/TLV
                // nesting aren't part of this dictionary's grammar.
                Ok(())
            }
            _ => Err(RadiusError::Dictionary(format!("unsupported directive: {cmd}"))),
        }
    }

    fn parse_attribute(&mut self, name: &str, id: &str, kind: &str) -> Result<()> {
        let id = parse_numeric(id)
            .and_then(|n| u8::try_from(n).ok())
            .ok_or_else(|| RadiusError::Dictionary(format!("bad attribute id for {name}: {id}")))?;
        let kind = match kind {
            "integer" => AttrKind::Integer,
            "ipaddr" => AttrKind::IpAddr,
            "string" => AttrKind::String,
            "octets" => AttrKind::Octets,
            other => {
                return Err(RadiusError::Dictionary(format!(
                    "unsupported attribute type {other} for {name}"
                )))
            }
        };
        self.attr_id.insert(name.to_string(), id);
        self.attr_name.insert(id, name.to_string());
        self.attr_kind.insert(id, kind);
        Ok(())
    }

    fn parse_vendor(&mut self, name: &str, id: &str) -> Result<()> {
        let id = parse_numeric(id)
            .ok_or_else(|| RadiusError::Dictionary(format!("bad vendor id for {name}: {id}")))?;
        self.vendor_id.insert(name.to_string(), id);
        self.vendor_name.insert(id, name.to_string());
        Ok(())
    }

    /// Attribute id for `name`, if registered.
    pub fn attr_id(&self, name: &str) -> Option<u8> {
        self.attr_id.get(name).copied()
    }

    /// Attribute name for `id`, if registered.
    pub fn attr_name(&self, id: u8) -> Option<&str> {
        self.attr_name.get(&id).map(String::as_str)
    }

    /// Codec kind for `id`, if registered.
    pub fn attr_kind_by_id(&self, id: u8) -> Option<AttrKind> {
        self.attr_kind.get(&id).copied()
    }

    /// Vendor id for `name`, if registered.
    pub fn vendor_id(&self, name: &str) -> Option<u32> {
        self.vendor_id.get(name).copied()
    }

    /// Vendor name for `id`, if registered.
    pub fn vendor_name(&self, id: u32) -> Option<&str> {
        self.vendor_name.get(&id).map(String::as_str)
    }
}

fn parse_numeric(text: &str) -> Option<u32> {
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).ok()
    } else {
        text.parse().ok()
    }
}
