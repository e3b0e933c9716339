// codes.rs - RADIUS packet codes (RFC 2865, RFC 2866, RFC 3576)

use std::fmt;

/// RADIUS packet codes, the first byte of every packet on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PacketCode {
    /// Access-Request (1)
    AccessRequest = 1,
    /// Access-Accept (2)
    AccessAccept = 2,
    /// Access-Reject (3)
    AccessReject = 3,
    /// Accounting-Request (4)
    AccountingRequest = 4,
    /// Accounting-Response (5)
    AccountingResponse = 5,
    /// Access-Challenge (11)
    AccessChallenge = 11,
    /// Status-Server (12, experimental)
    StatusServer = 12,
    /// Status-Client (13, experimental)
    StatusClient = 13,
    /// Disconnect-Request (40)
    DisconnectRequest = 40,
    /// Disconnect-ACK (41)
    DisconnectAccept = 41,
    /// Disconnect-NAK (42)
    DisconnectReject = 42,
    /// CoA-Request (43)
    CoARequest = 43,
    /// CoA-ACK (44)
    CoAAccept = 44,
    /// CoA-NAK (45)
    CoAReject = 45,
    /// Reserved (255)
    Reserved = 255,
}

impl PacketCode {
    /// Convert a wire byte to a `PacketCode`.
    pub fn from_u8(code: u8) -> Option<Self> {
        Some(match code {
            1 => Self::AccessRequest,
            2 => Self::AccessAccept,
            3 => Self::AccessReject,
            4 => Self::AccountingRequest,
            5 => Self::AccountingResponse,
            11 => Self::AccessChallenge,
            12 => Self::StatusServer,
            13 => Self::StatusClient,
            40 => Self::DisconnectRequest,
            41 => Self::DisconnectAccept,
            42 => Self::DisconnectReject,
            43 => Self::CoARequest,
            44 => Self::CoAAccept,
            45 => Self::CoAReject,
            255 => Self::Reserved,
            _ => return None,
        })
    }

    /// Whether this code begins a new request (as opposed to a reply).
    pub fn is_request(self) -> bool {
        matches!(
            self,
            Self::AccessRequest
                | Self::AccountingRequest
                | Self::DisconnectRequest
                | Self::CoARequest
        )
    }

    /// Whether this code belongs to the Access family (RFC 2865), which
    /// mandates Message-Authenticator per RFC 3579.
    pub fn is_access(self) -> bool {
        matches!(
            self,
            Self::AccessRequest | Self::AccessAccept | Self::AccessReject | Self::AccessChallenge
        )
    }
}

impl fmt::Display for PacketCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AccessRequest => "Access-Request",
            Self::AccessAccept => "Access-Accept",
            Self::AccessReject => "Access-Reject",
            Self::AccountingRequest => "Accounting-Request",
            Self::AccountingResponse => "Accounting-Response",
            Self::AccessChallenge => "Access-Challenge",
            Self::StatusServer => "Status-Server",
            Self::StatusClient => "Status-Client",
            Self::DisconnectRequest => "Disconnect-Request",
            Self::DisconnectAccept => "Disconnect-ACK",
            Self::DisconnectReject => "Disconnect-NAK",
            Self::CoARequest => "CoA-Request",
            Self::CoAAccept => "CoA-ACK",
            Self::CoAReject => "CoA-NAK",
            Self::Reserved => "Reserved",
        };
        f.write_str(name)
    }
}
