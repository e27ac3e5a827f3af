mod attr_01_origin;
mod attr_02_17_as_path;
mod attr_03_next_hop;
mod attr_04_med;
mod attr_05_local_pref;
mod attr_08_communities;
mod attr_14_15_nlri;
mod attr_16_extended_communities;
mod attr_29_linkstate;

use bytes::{Buf, Bytes};

use crate::error::ParserError;
use crate::models::*;
use crate::parser::ReadUtils;

pub use attr_01_origin::parse_origin;
pub use attr_02_17_as_path::{encode_as_path, parse_as_path};
pub use attr_03_next_hop::parse_next_hop;
pub use attr_04_med::{encode_med, parse_med};
pub use attr_05_local_pref::parse_local_pref;
pub use attr_08_communities::parse_regular_communities;
pub use attr_14_15_nlri::{encode_mp_reach, parse_mp_reach, parse_mp_unreach};
pub use attr_16_extended_communities::{encode_extended_communities, parse_extended_communities};
pub use attr_29_linkstate::parse_link_state_attribute;

/// Split the path attribute block of a BGP UPDATE into undissected attributes.
///
/// `data` holds the whole attribute section. Each attribute is a flags octet, a type octet,
/// a length of one octet (two when the extended-length flag is set) and the value. Values
/// are not interpreted here; see the accessors on [Update].
///
/// Trailing bytes too short for an attribute header, or a value running past the end of
/// the block, fail the whole block with [ParserError::TruncatedInput].
pub fn parse_attributes(mut data: Bytes) -> Result<Update, ParserError> {
    let mut attributes: Vec<PathAttribute> = Vec::with_capacity(12);

    while data.has_remaining() {
        data.require_n_remaining(3, "attribute header")?;
        let flags = AttrFlags::from_bits_retain(data.get_u8());
        let attr_type = AttrType::from(data.get_u8());
        let attr_length = match flags.contains(AttrFlags::EXTENDED) {
            false => data.read_u8()? as usize,
            true => data.read_u16()? as usize,
        };
        let raw = data.read_n_bytes(attr_length, "attribute value")?;
        attributes.push(PathAttribute {
            flags,
            attr_type,
            raw,
        });
    }

    Ok(Update { attributes })
}
