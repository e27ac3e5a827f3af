use crate::models::*;
use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::{Buf, BufMut, Bytes, BytesMut};

const AS_PATH_AS_SET: u8 = 1;
const AS_PATH_AS_SEQUENCE: u8 = 2;
// https://datatracker.ietf.org/doc/html/rfc5065
const AS_PATH_CONFED_SEQUENCE: u8 = 3;
const AS_PATH_CONFED_SET: u8 = 4;

/// Parse AS_PATH or AS4_PATH into its segments, AS numbers read `asn_len` wide.
pub fn parse_as_path(
    mut input: Bytes,
    asn_len: AsnLength,
) -> Result<Vec<AsPathSegment>, ParserError> {
    let mut segments = Vec::with_capacity(2);
    while input.remaining() > 0 {
        segments.push(parse_as_path_segment(&mut input, asn_len)?);
    }
    Ok(segments)
}

fn parse_as_path_segment(
    input: &mut Bytes,
    asn_len: AsnLength,
) -> Result<AsPathSegment, ParserError> {
    let segment_type = input.read_u8()?;
    let count = input.read_u8()? as usize;
    let path = input.read_asns(asn_len, count)?;
    match segment_type {
        AS_PATH_AS_SET => Ok(AsPathSegment::AsSet(path)),
        AS_PATH_AS_SEQUENCE => Ok(AsPathSegment::AsSequence(path)),
        AS_PATH_CONFED_SEQUENCE => Ok(AsPathSegment::ConfedSequence(path)),
        AS_PATH_CONFED_SET => Ok(AsPathSegment::ConfedSet(path)),
        _ => Err(ParserError::MalformedField(format!(
            "invalid AS path segment type: {segment_type}"
        ))),
    }
}

pub fn encode_as_path(segments: &[AsPathSegment], asn_len: AsnLength) -> Bytes {
    let mut output = BytesMut::with_capacity(64);
    for segment in segments {
        let segment_type = match segment {
            AsPathSegment::AsSet(_) => AS_PATH_AS_SET,
            AsPathSegment::AsSequence(_) => AS_PATH_AS_SEQUENCE,
            AsPathSegment::ConfedSequence(_) => AS_PATH_CONFED_SEQUENCE,
            AsPathSegment::ConfedSet(_) => AS_PATH_CONFED_SET,
        };
        output.put_u8(segment_type);
        output.put_u8(segment.asns().len() as u8);
        for asn in segment.asns() {
            match asn_len {
                AsnLength::Bits16 => output.put_u16(*asn as u16),
                AsnLength::Bits32 => output.put_u32(*asn),
            }
        }
    }
    output.freeze()
}
