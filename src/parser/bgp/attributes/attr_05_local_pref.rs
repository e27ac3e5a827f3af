use crate::parser::{expect_len, ReadUtils};
use crate::ParserError;
use bytes::Bytes;

pub fn parse_local_pref(mut input: Bytes) -> Result<u32, ParserError> {
    expect_len(&input, 4, "LOCAL_PREF")?;
    input.read_u32()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_local_pref() {
        assert_eq!(
            parse_local_pref(Bytes::from(vec![0, 0, 0, 100])).unwrap(),
            100
        );
    }
}
