use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::Bytes;
use std::net::IpAddr;

/// Legacy NEXT_HOP (type 3). Only IPv4 is defined for it, but a 16-byte value is
/// accepted too.
pub fn parse_next_hop(mut input: Bytes) -> Result<IpAddr, ParserError> {
    match input.len() {
        4 => Ok(input.read_ipv4_address()?.into()),
        16 => Ok(input.read_ipv6_address()?.into()),
        len => Err(ParserError::MalformedField(format!(
            "NEXT_HOP of {} bytes",
            len
        ))),
    }
}
