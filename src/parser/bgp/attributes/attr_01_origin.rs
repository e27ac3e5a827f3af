use crate::models::*;
use crate::parser::{expect_len, ReadUtils};
use crate::ParserError;
use bytes::Bytes;

pub fn parse_origin(mut input: Bytes) -> Result<Origin, ParserError> {
    expect_len(&input, 1, "ORIGIN")?;
    Ok(Origin::try_from(input.read_u8()?)?)
}
