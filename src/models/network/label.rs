use smallvec::SmallVec;
use std::fmt::{Display, Formatter};

/// Label value RFC 8277 reserves to mark a withdrawn labeled route.
pub const WITHDRAWN_LABEL: u32 = 0x800000;

/// One 3-byte MPLS label stack entry as carried in NLRI.
///
/// ```text
///  0                   1                   2
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                Label                  | Exp |S|
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MplsLabel {
    pub value: u32,
    pub exp: u8,
    pub bottom_of_stack: bool,
}

/// Most prefixes carry a single label.
pub type LabelStack = SmallVec<[MplsLabel; 2]>;

impl MplsLabel {
    pub fn from_bytes(bytes: [u8; 3]) -> MplsLabel {
        MplsLabel {
            value: Self::raw(bytes) >> 4,
            exp: (bytes[2] >> 1) & 0x07,
            bottom_of_stack: bytes[2] & 0x01 == 0x01,
        }
    }

    /// The full 24-bit field, used for sentinel checks and VXLAN VNIs.
    #[inline]
    pub fn raw(bytes: [u8; 3]) -> u32 {
        u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]])
    }

    pub fn to_bytes(&self) -> [u8; 3] {
        let raw = (self.value << 4) | ((self.exp as u32 & 0x07) << 1) | self.bottom_of_stack as u32;
        let b = raw.to_be_bytes();
        [b[1], b[2], b[3]]
    }
}

impl Display for MplsLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
