//! Extended communities, RFC 4360.
use crate::models::*;
use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::{BufMut, Bytes, BytesMut};

/// Each entry is exactly 8 bytes; a trailing partial entry is an error.
pub fn parse_extended_communities(mut input: Bytes) -> Result<Vec<ExtCommunity>, ParserError> {
    let mut communities = Vec::with_capacity(input.len() / 8);
    while !input.is_empty() {
        let raw = input.read_array::<8>("extended community")?;
        communities.push(ExtCommunity::from_bytes(raw));
    }
    Ok(communities)
}

pub fn encode_extended_communities(communities: &[ExtCommunity]) -> Bytes {
    let mut output = BytesMut::with_capacity(communities.len() * 8);
    for community in communities {
        output.put_slice(&community.to_bytes());
    }
    output.freeze()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_route_target() {
        let communities = parse_extended_communities(Bytes::from(vec![
            0x00, 0x02, 0x02, 0x41, 0x00, 0x00, 0xfd, 0xec,
        ]))
        .unwrap();
        assert_eq!(communities.len(), 1);
        assert_eq!(communities[0].ec_type, 0);
        assert_eq!(communities[0].sub_type, 2);
        assert_eq!(communities[0].to_string(), "rt=577:65004");
    }

    #[test]
    fn test_round_trip() {
        let communities = vec![
            ExtCommunity {
                ec_type: 0x00,
                sub_type: 0x02,
                value: [0x02, 0x41, 0x00, 0x00, 0xfd, 0xec],
            },
            ExtCommunity {
                ec_type: 0x01,
                sub_type: 0x03,
                value: [10, 0, 0, 1, 0, 5],
            },
        ];
        let encoded = encode_extended_communities(&communities);
        assert_eq!(encoded.len(), 16);
        assert_eq!(parse_extended_communities(encoded).unwrap(), communities);
    }

    #[test]
    fn test_partial_entry() {
        assert!(matches!(
            parse_extended_communities(Bytes::from(vec![0x00, 0x02, 0x02, 0x41, 0x00])),
            Err(ParserError::TruncatedInput { .. })
        ));
    }
}
