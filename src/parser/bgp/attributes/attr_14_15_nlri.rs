use crate::models::*;
use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::{Buf, BufMut, Bytes, BytesMut};

///
/// <https://datatracker.ietf.org/doc/html/rfc4760#section-3>
/// The attribute is encoded as shown below:
/// +---------------------------------------------------------+
/// | Address Family Identifier (2 octets)                    |
/// +---------------------------------------------------------+
/// | Subsequent Address Family Identifier (1 octet)          |
/// +---------------------------------------------------------+
/// | Length of Next Hop Network Address (1 octet)            |
/// +---------------------------------------------------------+
/// | Network Address of Next Hop (variable)                  |
/// +---------------------------------------------------------+
/// | Reserved (1 octet)                                      |
/// +---------------------------------------------------------+
/// | Network Layer Reachability Information (variable)       |
/// +---------------------------------------------------------+
///
/// The reserved octet is skipped whatever its value. The NLRI is returned undissected.
pub fn parse_mp_reach(mut input: Bytes) -> Result<MpReachNlri, ParserError> {
    let afi = input.read_u16()?;
    let safi = input.read_u8()?;
    let next_hop_length = input.read_u8()? as usize;
    if next_hop_length + 1 > input.remaining() {
        return Err(ParserError::MalformedField(format!(
            "MP_REACH next hop length {} leaves no room for the reserved octet ({} bytes left)",
            next_hop_length,
            input.remaining()
        )));
    }
    let next_hop = input.split_to(next_hop_length);
    input.advance(1);
    Ok(MpReachNlri {
        afi,
        safi,
        next_hop,
        nlri: input,
    })
}

/// <https://datatracker.ietf.org/doc/html/rfc4760#section-4>
pub fn parse_mp_unreach(mut input: Bytes) -> Result<MpUnreachNlri, ParserError> {
    let afi = input.read_u16()?;
    let safi = input.read_u8()?;
    Ok(MpUnreachNlri {
        afi,
        safi,
        withdrawn: input,
    })
}

pub fn encode_mp_reach(reach: &MpReachNlri) -> Bytes {
    let mut output = BytesMut::with_capacity(5 + reach.next_hop.len() + reach.nlri.len());
    output.put_u16(reach.afi);
    output.put_u8(reach.safi);
    output.put_u8(reach.next_hop.len() as u8);
    output.put_slice(&reach.next_hop);
    output.put_u8(0);
    output.put_slice(&reach.nlri);
    output.freeze()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mp_reach() {
        let input = Bytes::from(vec![
            0x40, 0x04, // afi 16388
            71,   // safi
            4, 10, 0, 0, 1, // next hop
            0,    // reserved
            0, 1, 0, 0, // nlri
        ]);
        let reach = parse_mp_reach(input.clone()).unwrap();
        assert_eq!(reach.afi, 16388);
        assert_eq!(reach.safi, 71);
        assert_eq!(reach.next_hop.as_ref(), &[10, 0, 0, 1]);
        assert_eq!(reach.nlri.as_ref(), &[0, 1, 0, 0]);
        assert_eq!(encode_mp_reach(&reach), input);
    }

    #[test]
    fn test_parse_mp_reach_reserved_nonzero_and_empty_nlri() {
        let input = Bytes::from(vec![0, 1, 1, 4, 10, 0, 0, 1, 0xff]);
        let reach = parse_mp_reach(input).unwrap();
        assert!(reach.nlri.is_empty());
    }

    #[test]
    fn test_parse_mp_reach_bad_next_hop_len() {
        // next hop claims 16 bytes with only 4 following
        let input = Bytes::from(vec![0, 2, 1, 16, 0, 0, 0, 0]);
        assert!(matches!(
            parse_mp_reach(input),
            Err(ParserError::MalformedField(_))
        ));
        // next hop fits but the reserved octet is missing
        let input = Bytes::from(vec![0, 1, 1, 4, 10, 0, 0, 1]);
        assert!(matches!(
            parse_mp_reach(input),
            Err(ParserError::MalformedField(_))
        ));
        assert!(matches!(
            parse_mp_reach(Bytes::from(vec![0, 1])),
            Err(ParserError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_parse_mp_unreach() {
        let unreach = parse_mp_unreach(Bytes::from(vec![0, 1, 1, 24, 10, 0, 130])).unwrap();
        assert_eq!(unreach.afi, 1);
        assert_eq!(unreach.safi, 1);
        assert_eq!(unreach.withdrawn.as_ref(), &[24, 10, 0, 130]);
    }
}
