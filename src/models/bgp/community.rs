use num_enum::{FromPrimitive, IntoPrimitive};
use std::fmt::{Display, Formatter};
use std::net::Ipv4Addr;

/// Regular community, RFC 1997. Rendered as `high:low`.
#[derive(Debug, PartialEq, Copy, Clone, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Community {
    pub high: u16,
    pub low: u16,
}

impl From<u32> for Community {
    fn from(value: u32) -> Self {
        Community {
            high: (value >> 16) as u16,
            low: value as u16,
        }
    }
}

impl Display for Community {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.high, self.low)
    }
}

/// Type definitions of extended communities
#[derive(Debug, FromPrimitive, IntoPrimitive, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ExtendedCommunityType {
    // transitive types
    TransitiveTwoOctetAs = 0x00,
    TransitiveIpv4Addr = 0x01,
    TransitiveFourOctetAs = 0x02,
    TransitiveOpaque = 0x03,

    // non-transitive types
    NonTransitiveTwoOctetAs = 0x40,
    NonTransitiveIpv4Addr = 0x41,
    NonTransitiveFourOctetAs = 0x42,
    NonTransitiveOpaque = 0x43,
    // the rest are either draft or experimental
    #[num_enum(catch_all)]
    Unknown(u8),
}

pub const EXT_SUB_TYPE_ROUTE_TARGET: u8 = 0x02;
pub const EXT_SUB_TYPE_ROUTE_ORIGIN: u8 = 0x03;

/// Extended Communities.
///
/// It is a 8-octet data that has flexible definition based on the types:
/// <https://datatracker.ietf.org/doc/html/rfc4360>
///
/// ```text
///        0                   1                   2                   3
///        0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
///       +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///       |  Type high    |  Type low(*)  |                               |
///       +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+          Value                |
///       |                                                               |
///       +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// ## Display
///
/// The administrator/local split depends on the type:
/// - two-octet AS (`0x00`/`0x40`): `AS(2 bytes):local(4 bytes)`
/// - IPv4 address (`0x01`/`0x41`): `address(4 bytes):local(2 bytes)`
/// - four-octet AS (`0x02`/`0x42`): `AS(4 bytes):local(2 bytes)`
///
/// Route targets are prefixed with `rt=` and route origins with `ro=`. Anything else renders
/// as `ext=<type>:<subtype>:<hex value>`.
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtCommunity {
    pub ec_type: u8,
    pub sub_type: u8,
    pub value: [u8; 6],
}

impl ExtCommunity {
    pub fn from_bytes(bytes: [u8; 8]) -> ExtCommunity {
        let mut value = [0u8; 6];
        value.copy_from_slice(&bytes[2..]);
        ExtCommunity {
            ec_type: bytes[0],
            sub_type: bytes[1],
            value,
        }
    }

    pub fn to_bytes(&self) -> [u8; 8] {
        let mut bytes = [0u8; 8];
        bytes[0] = self.ec_type;
        bytes[1] = self.sub_type;
        bytes[2..].copy_from_slice(&self.value);
        bytes
    }

    pub fn community_type(&self) -> ExtendedCommunityType {
        ExtendedCommunityType::from(self.ec_type)
    }

    /// `administrator:local` for the AS/IPv4 specific types.
    pub fn admin_value(&self) -> Option<String> {
        let v = &self.value;
        match self.community_type() {
            ExtendedCommunityType::TransitiveTwoOctetAs
            | ExtendedCommunityType::NonTransitiveTwoOctetAs => Some(format!(
                "{}:{}",
                u16::from_be_bytes([v[0], v[1]]),
                u32::from_be_bytes([v[2], v[3], v[4], v[5]])
            )),
            ExtendedCommunityType::TransitiveIpv4Addr
            | ExtendedCommunityType::NonTransitiveIpv4Addr => Some(format!(
                "{}:{}",
                Ipv4Addr::new(v[0], v[1], v[2], v[3]),
                u16::from_be_bytes([v[4], v[5]])
            )),
            ExtendedCommunityType::TransitiveFourOctetAs
            | ExtendedCommunityType::NonTransitiveFourOctetAs => Some(format!(
                "{}:{}",
                u32::from_be_bytes([v[0], v[1], v[2], v[3]]),
                u16::from_be_bytes([v[4], v[5]])
            )),
            _ => None,
        }
    }

    pub fn is_route_target(&self) -> bool {
        self.sub_type == EXT_SUB_TYPE_ROUTE_TARGET && self.admin_value().is_some()
    }
}

impl Display for ExtCommunity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self.sub_type, self.admin_value()) {
            (EXT_SUB_TYPE_ROUTE_TARGET, Some(admin)) => write!(f, "rt={}", admin),
            (EXT_SUB_TYPE_ROUTE_ORIGIN, Some(admin)) => write!(f, "ro={}", admin),
            _ => write!(
                f,
                "ext={}:{}:{}",
                self.ec_type,
                self.sub_type,
                hex::encode(self.value)
            ),
        }
    }
}
