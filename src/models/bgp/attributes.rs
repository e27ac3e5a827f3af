//! BGP path attribute containers.
use bitflags::bitflags;
use bytes::Bytes;
use num_enum::{FromPrimitive, IntoPrimitive, TryFromPrimitive};
use std::fmt::{Display, Formatter};

bitflags! {
    /// The high-order bits of the attribute flags octet, RFC 4271 section 4.3.
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct AttrFlags: u8 {
        const OPTIONAL   = 0b10000000;
        const TRANSITIVE = 0b01000000;
        const PARTIAL    = 0b00100000;
        const EXTENDED   = 0b00010000;
    }
}

/// Attribute types this crate gives names to.
///
/// The full registry lives at IANA:
/// <https://www.iana.org/assignments/bgp-parameters/bgp-parameters.xhtml#bgp-parameters-2>
#[allow(non_camel_case_types)]
#[derive(Debug, FromPrimitive, IntoPrimitive, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum AttrType {
    RESERVED = 0,
    ORIGIN = 1,
    AS_PATH = 2,
    NEXT_HOP = 3,
    MULTI_EXIT_DISCRIMINATOR = 4,
    LOCAL_PREFERENCE = 5,
    ATOMIC_AGGREGATE = 6,
    AGGREGATOR = 7,
    COMMUNITIES = 8,
    ORIGINATOR_ID = 9,
    CLUSTER_LIST = 10,
    /// <https://tools.ietf.org/html/rfc4760>
    MP_REACHABLE_NLRI = 14,
    MP_UNREACHABLE_NLRI = 15,
    /// <https://datatracker.ietf.org/doc/html/rfc4360>
    EXTENDED_COMMUNITIES = 16,
    AS4_PATH = 17,
    AS4_AGGREGATOR = 18,
    /// <https://datatracker.ietf.org/doc/html/rfc7752#section-3.3>
    BGP_LS_ATTRIBUTE = 29,
    LARGE_COMMUNITIES = 32,
    /// Catch all for any unknown attribute types
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// One undissected path attribute.
///
/// The value bytes share storage with the buffer the attribute block was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathAttribute {
    pub flags: AttrFlags,
    pub attr_type: AttrType,
    pub raw: Bytes,
}

/// The attribute block of one BGP UPDATE, in wire order.
///
/// Typed views over individual attributes are decoded on demand by accessor methods such as
/// `Update::as_path` and `Update::mp_reach`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Update {
    pub attributes: Vec<PathAttribute>,
}

impl Update {
    /// Look up an attribute by type. When a type repeats, the last occurrence wins.
    pub fn get(&self, attr_type: AttrType) -> Option<&PathAttribute> {
        self.attributes
            .iter()
            .rev()
            .find(|attr| attr.attr_type == attr_type)
    }

    pub fn has(&self, attr_type: AttrType) -> bool {
        self.get(attr_type).is_some()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

#[allow(non_camel_case_types)]
#[derive(Debug, TryFromPrimitive, IntoPrimitive, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Origin {
    IGP = 0,
    EGP = 1,
    INCOMPLETE = 2,
}

impl Display for Origin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::IGP => write!(f, "igp"),
            Origin::EGP => write!(f, "egp"),
            Origin::INCOMPLETE => write!(f, "incomplete"),
        }
    }
}
