// vsa.rs - Vendor-Specific Attribute sub-TLV codec
//
// `VSA.encode -> AVP{type=Vendor-Specific, value = vendor(4) | vsa_type(1)
// | vsa_len(1) | vsa_value}` with `vsa_len = len(vsa_value) + 2`. A single
// outer AVP carries exactly one VSA entry; multi-entry packing within one
// Vendor-Specific AVP is out of scope.
//
// The sub-TLV header width is parameterized by `VsaFormat` rather than
// hardcoded to one byte: some vendors (Lucent among others) use a 2-byte
// vsa_type field. WiMAX's additional continuation byte is a documented
// limitation, not implemented — see DESIGN.md.

use crate::avp::Avp;
use crate::error::{RadiusError, Result};

/// Attribute type of the outer Vendor-Specific AVP, RFC 2865 §5.26.
pub const VENDOR_SPECIFIC: u8 = 26;

/// Sub-TLV header width used inside a Vendor-Specific AVP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VsaFormat {
    /// Standard RFC 2865 form: 1-byte vendor-attribute type, 1-byte length.
    #[default]
    OneByteType,
    /// Lucent-style form: 2-byte vendor-attribute type, 1-byte length.
    TwoByteType,
}

/// A decoded Vendor-Specific sub-attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vsa {
    /// SMI Private Enterprise Number.
    pub vendor: u32,
    /// Vendor-assigned sub-attribute type.
    pub vsa_type: u16,
    /// Sub-attribute value.
    pub value: Vec<u8>,
}

impl Vsa {
    /// Build a new VSA record.
    pub fn new(vendor: u32, vsa_type: u16, value: Vec<u8>) -> Self {
        Self {
            vendor,
            vsa_type,
            value,
        }
    }

    /// Encode this VSA as a Vendor-Specific AVP.
    pub fn to_avp(&self, format: VsaFormat) -> Result<Avp> {
        let header_len = match format {
            VsaFormat::OneByteType => 2,
            VsaFormat::TwoByteType => 3,
        };
        let vsa_len = self.value.len() + header_len;
        if vsa_len > 255 {
            return Err(RadiusError::AvpTooLong {
                len: self.value.len(),
            });
        }

        let mut inner = Vec::with_capacity(4 + header_len + self.value.len());
        inner.extend_from_slice(&self.vendor.to_be_bytes());
        match format {
            VsaFormat::OneByteType => {
                inner.push(self.vsa_type as u8);
                inner.push(vsa_len as u8);
            }
            VsaFormat::TwoByteType => {
                inner.extend_from_slice(&self.vsa_type.to_be_bytes());
                inner.push(vsa_len as u8);
            }
        }
        inner.extend_from_slice(&self.value);

        Ok(Avp::new(VENDOR_SPECIFIC, inner))
    }

    /// Decode a Vendor-Specific AVP's value into a VSA record.
    pub fn from_avp(avp: &Avp, format: VsaFormat) -> Result<Self> {
        let value = &avp.value;
        let header_len = match format {
            VsaFormat::OneByteType => 2,
            VsaFormat::TwoByteType => 3,
        };
        if value.len() < 4 + header_len {
            return Err(RadiusError::MalformedPacket(
                "Vendor-Specific attribute too short".into(),
            ));
        }
        let vendor = u32::from_be_bytes([value[0], value[1], value[2], value[3]]);
        let (vsa_type, vsa_len, data_start) = match format {
            VsaFormat::OneByteType => (value[4] as u16, value[5] as usize, 6),
            VsaFormat::TwoByteType => {
                (u16::from_be_bytes([value[4], value[5]]), value[6] as usize, 7)
            }
        };
        if vsa_len < header_len {
            return Err(RadiusError::MalformedPacket(
                "Vendor-Specific sub-attribute length below minimum".into(),
            ));
        }
        let data_len = vsa_len - header_len;
        if data_start + data_len > value.len() {
            return Err(RadiusError::MalformedPacket(
                "Vendor-Specific sub-attribute extends beyond AVP".into(),
            ));
        }

        Ok(Self {
            vendor,
            vsa_type,
            value: value[data_start..data_start + data_len].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s3_cisco_round_trip() {
        let vsa = Vsa::new(9, 26, b"abc".to_vec());
        let avp = vsa.to_avp(VsaFormat::OneByteType).unwrap();
        assert_eq!(avp.attr_type, VENDOR_SPECIFIC);
        assert_eq!(
            avp.value,
            [0x00, 0x00, 0x00, 0x09, 0x1A, 0x05, b'a', b'b', b'c']
        );

        let decoded = Vsa::from_avp(&avp, VsaFormat::OneByteType).unwrap();
        assert_eq!(decoded, vsa);
    }

    #[test]
    fn two_byte_type_round_trip() {
        let vsa = Vsa::new(4846, 300, b"xyz".to_vec());
        let avp = vsa.to_avp(VsaFormat::TwoByteType).unwrap();
        let decoded = Vsa::from_avp(&avp, VsaFormat::TwoByteType).unwrap();
        assert_eq!(decoded, vsa);
    }

    #[test]
    fn rejects_truncated_vsa() {
        let avp = Avp::new(VENDOR_SPECIFIC, vec![0, 0, 0, 9, 0x1A]);
        assert!(Vsa::from_avp(&avp, VsaFormat::OneByteType).is_err());
    }
}
