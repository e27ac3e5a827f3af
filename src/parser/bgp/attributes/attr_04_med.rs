use crate::parser::{expect_len, ReadUtils};
use crate::ParserError;
use bytes::Bytes;

pub fn parse_med(mut input: Bytes) -> Result<u32, ParserError> {
    expect_len(&input, 4, "MULTI_EXIT_DISC")?;
    input.read_u32()
}

pub fn encode_med(med: u32) -> Bytes {
    Bytes::from(med.to_be_bytes().to_vec())
}
