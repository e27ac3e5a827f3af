use crate::models::*;
use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::{Buf, Bytes};

/// Regular communities, RFC 1997. Well-known values are kept numeric.
pub fn parse_regular_communities(mut input: Bytes) -> Result<Vec<Community>, ParserError> {
    let mut communities = Vec::with_capacity(input.remaining() / 4);
    while input.remaining() > 0 {
        communities.push(Community::from(input.read_u32()?));
    }
    Ok(communities)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test parsing of communities values, as defined in RFC1997.
    #[test]
    fn test_parse_communities() {
        let communities =
            parse_regular_communities(Bytes::from(vec![0, 10, 0, 10, 0, 20, 0, 20])).unwrap();
        assert_eq!(
            communities,
            vec![
                Community { high: 10, low: 10 },
                Community { high: 20, low: 20 }
            ]
        );

        let communities =
            parse_regular_communities(Bytes::from(vec![0xFF, 0xFF, 0xFF, 0x01])).unwrap();
        assert_eq!(communities[0].to_string(), "65535:65281");
    }

    #[test]
    fn test_parse_communities_partial() {
        assert!(matches!(
            parse_regular_communities(Bytes::from(vec![0, 10, 0, 10, 0, 20])),
            Err(ParserError::TruncatedInput { .. })
        ));
    }
}
