//! Value decoders for the segment-routing and capability TLVs shared by BGP-LS attributes.
use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::ParserError;
use crate::models::*;
use crate::parser::{expect_len, ReadUtils, TlvIter};

fn require_sid_header(value: &Bytes, what: &str) -> Result<(), ParserError> {
    if value.len() < 4 {
        return Err(ParserError::MalformedField(format!(
            "{} of {} bytes is shorter than its 4 byte header",
            what,
            value.len()
        )));
    }
    Ok(())
}

/// Prefix-SID TLV (1158).
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |     Flags     |   Algorithm   |           Reserved            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                  SID/Index/Label (variable)                   |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
pub fn parse_prefix_sid(mut value: Bytes) -> Result<PrefixSid, ParserError> {
    require_sid_header(&value, "prefix SID")?;
    let flags = value.get_u8();
    let algorithm = value.get_u8();
    value.advance(2);
    Ok(PrefixSid {
        flags,
        algorithm,
        sid: value.to_vec(),
    })
}

pub fn encode_prefix_sid(sid: &PrefixSid) -> Bytes {
    let mut output = BytesMut::with_capacity(4 + sid.sid.len());
    output.put_u8(sid.flags);
    output.put_u8(sid.algorithm);
    output.put_u16(0);
    output.put_slice(&sid.sid);
    output.freeze()
}

/// Adjacency-SID TLV (1099): flags, weight, two reserved bytes, then the SID.
pub fn parse_adjacency_sid(mut value: Bytes) -> Result<AdjacencySid, ParserError> {
    require_sid_header(&value, "adjacency SID")?;
    let flags = value.get_u8();
    let weight = value.get_u8();
    value.advance(2);
    Ok(AdjacencySid {
        flags,
        weight,
        sid: value.to_vec(),
    })
}

/// Node or Link MSD (266/267): `{type, value}` pairs.
pub fn parse_msd(mut value: Bytes) -> Result<Vec<Msd>, ParserError> {
    if value.len() % 2 != 0 {
        return Err(ParserError::MalformedField(format!(
            "MSD list of odd length {}",
            value.len()
        )));
    }
    let mut entries = Vec::with_capacity(value.len() / 2);
    while value.has_remaining() {
        entries.push(Msd {
            msd_type: value.get_u8(),
            value: value.get_u8(),
        });
    }
    Ok(entries)
}

const SID_LABEL_SUB_TLV: u16 = 1161;

/// SR Capabilities (1034) or SR Local Block (1036).
///
/// Flags and one reserved octet, followed by range entries, each a 3-byte range size and a
/// SID/Label sub-TLV (1161) holding a 3-byte label or a 4-byte index.
pub fn parse_sr_capabilities(mut value: Bytes) -> Result<SrCapabilities, ParserError> {
    let flags = value.read_u8()?;
    value.read_u8()?;
    let mut ranges = vec![];
    while value.has_remaining() {
        let range_size = value.read_u24()?;
        value.require_n_remaining(4, "SID/Label sub-TLV")?;
        let mut sub_tlvs = TlvIter::new(value.clone(), "SID/Label sub-TLV");
        let (sub_type, mut sub_value) = match sub_tlvs.next() {
            Some(item) => item?,
            None => break,
        };
        value.advance(4 + sub_value.len());
        if sub_type != SID_LABEL_SUB_TLV {
            return Err(ParserError::MalformedField(format!(
                "unexpected sub-TLV {} in SR range",
                sub_type
            )));
        }
        let first_sid = match sub_value.len() {
            3 => SidLabel::Label(sub_value.read_u24()? & 0x000F_FFFF),
            4 => SidLabel::Index(sub_value.read_u32()?),
            len => {
                return Err(ParserError::MalformedField(format!(
                    "SID/Label sub-TLV of {} bytes",
                    len
                )))
            }
        };
        ranges.push(SidRange {
            range_size,
            first_sid,
        });
    }
    Ok(SrCapabilities { flags, ranges })
}

/// SRv6 Capabilities TLV (1038): 2 bytes of flags, 2 reserved.
pub fn parse_srv6_capabilities(mut value: Bytes) -> Result<u16, ParserError> {
    value.require_n_remaining(4, "SRv6 capabilities")?;
    value.read_u16()
}

/// SRv6 Locator TLV (1162). Trailing sub-TLVs are ignored.
pub fn parse_srv6_locator(mut value: Bytes) -> Result<Srv6Locator, ParserError> {
    value.require_n_remaining(8, "SRv6 locator")?;
    let flags = value.get_u8();
    let algorithm = value.get_u8();
    value.advance(2);
    let metric = value.get_u32();
    Ok(Srv6Locator {
        flags,
        algorithm,
        metric,
    })
}

/// SRv6 Endpoint Behavior TLV (1250).
pub fn parse_srv6_endpoint_behavior(mut value: Bytes) -> Result<Srv6EndpointBehavior, ParserError> {
    expect_len(&value, 4, "SRv6 endpoint behavior")?;
    Ok(Srv6EndpointBehavior {
        behavior: value.get_u16(),
        flags: value.get_u8(),
        algorithm: value.get_u8(),
    })
}

/// SRv6 SID Structure TLV (1252).
pub fn parse_srv6_sid_structure(mut value: Bytes) -> Result<Srv6SidStructure, ParserError> {
    expect_len(&value, 4, "SRv6 SID structure")?;
    Ok(Srv6SidStructure {
        locator_block_len: value.get_u8(),
        locator_node_len: value.get_u8(),
        function_len: value.get_u8(),
        argument_len: value.get_u8(),
    })
}

/// IGP metric (1095) is 1 to 3 bytes wide depending on the IGP.
pub fn parse_igp_metric(value: Bytes) -> Result<u32, ParserError> {
    match value.len() {
        1..=3 => Ok(value.iter().fold(0u32, |acc, b| (acc << 8) | *b as u32)),
        len => Err(ParserError::MalformedField(format!(
            "IGP metric of {} bytes",
            len
        ))),
    }
}

pub fn parse_u32_list(mut value: Bytes, what: &str) -> Result<Vec<u32>, ParserError> {
    if value.len() % 4 != 0 {
        return Err(ParserError::MalformedField(format!(
            "{} list of length {}",
            what,
            value.len()
        )));
    }
    let mut out = Vec::with_capacity(value.len() / 4);
    while value.has_remaining() {
        out.push(value.get_u32());
    }
    Ok(out)
}

pub fn parse_bandwidth(mut value: Bytes) -> Result<f32, ParserError> {
    expect_len(&value, 4, "bandwidth")?;
    Ok(value.get_f32())
}
