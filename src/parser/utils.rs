/*!
Provides IO utility functions for read bytes of different length and converting to corresponding structs.
*/
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::error::ParserError;
use crate::models::*;
use bytes::{Buf, Bytes};

impl ReadUtils for Bytes {}

/// Bounds-checked readers over a byte buffer.
///
/// Every read first checks the remaining length and reports a shortfall as
/// [ParserError::TruncatedInput], so no input can make a reader go out of bounds.
pub trait ReadUtils: Buf {
    #[inline]
    fn require_n_remaining(&self, n: usize, context: &'static str) -> Result<(), ParserError> {
        if self.remaining() < n {
            Err(ParserError::TruncatedInput {
                context,
                needed: n,
                remaining: self.remaining(),
            })
        } else {
            Ok(())
        }
    }

    #[inline]
    fn read_u8(&mut self) -> Result<u8, ParserError> {
        self.require_n_remaining(1, "u8")?;
        Ok(self.get_u8())
    }

    #[inline]
    fn read_u16(&mut self) -> Result<u16, ParserError> {
        self.require_n_remaining(2, "u16")?;
        Ok(self.get_u16())
    }

    #[inline]
    fn read_u24(&mut self) -> Result<u32, ParserError> {
        self.require_n_remaining(3, "u24")?;
        let mut buf = [0u8; 4];
        self.copy_to_slice(&mut buf[1..]);
        Ok(u32::from_be_bytes(buf))
    }

    #[inline]
    fn read_u32(&mut self) -> Result<u32, ParserError> {
        self.require_n_remaining(4, "u32")?;
        Ok(self.get_u32())
    }

    #[inline]
    fn read_u64(&mut self) -> Result<u64, ParserError> {
        self.require_n_remaining(8, "u64")?;
        Ok(self.get_u64())
    }

    fn read_ipv4_address(&mut self) -> Result<Ipv4Addr, ParserError> {
        self.require_n_remaining(4, "ipv4 address")?;
        Ok(Ipv4Addr::from(self.get_u32()))
    }

    fn read_ipv6_address(&mut self) -> Result<Ipv6Addr, ParserError> {
        self.require_n_remaining(16, "ipv6 address")?;
        Ok(Ipv6Addr::from(self.get_u128()))
    }

    fn read_array<const N: usize>(&mut self, context: &'static str) -> Result<[u8; N], ParserError> {
        self.require_n_remaining(N, context)?;
        let mut buf = [0u8; N];
        self.copy_to_slice(&mut buf);
        Ok(buf)
    }

    /// Take the next `n` bytes as a view. For [Bytes] this shares the underlying storage.
    fn read_n_bytes(&mut self, n: usize, context: &'static str) -> Result<Bytes, ParserError> {
        self.require_n_remaining(n, context)?;
        Ok(self.copy_to_bytes(n))
    }

    fn read_asns(&mut self, asn_len: AsnLength, count: usize) -> Result<Vec<u32>, ParserError> {
        self.require_n_remaining(count * asn_len.byte_len(), "as path segment")?;
        let mut path = Vec::with_capacity(count);
        for _ in 0..count {
            let asn = match asn_len {
                AsnLength::Bits16 => self.get_u16() as u32,
                AsnLength::Bits32 => self.get_u32(),
            };
            path.push(asn);
        }
        Ok(path)
    }

    /// Read one MPLS label stack entry.
    fn read_mpls_label(&mut self) -> Result<(MplsLabel, u32), ParserError> {
        let bytes = self.read_array::<3>("mpls label")?;
        Ok((MplsLabel::from_bytes(bytes), MplsLabel::raw(bytes)))
    }

    /// Read `{length in bits, ceil(bits/8) bytes}`, rejecting lengths above `max_bits`.
    fn read_ip_reachability(&mut self, max_bits: u8) -> Result<IpReachability, ParserError> {
        let length_in_bits = self.read_u8()?;
        if length_in_bits > max_bits {
            return Err(ParserError::MalformedField(format!(
                "prefix length {} exceeds {} bits",
                length_in_bits, max_bits
            )));
        }
        let prefix = self.read_n_bytes(IpReachability::byte_len(length_in_bits), "ip prefix")?;
        Ok(IpReachability {
            length_in_bits,
            prefix,
        })
    }
}

/// Walks a sequence of `{type: u16, length: u16, value}` TLVs.
///
/// Yields each TLV's value as a view into the input. A header or value that runs past the
/// end yields one [ParserError::TruncatedInput] and ends the walk.
pub struct TlvIter {
    data: Bytes,
    context: &'static str,
    done: bool,
}

impl TlvIter {
    pub fn new(data: Bytes, context: &'static str) -> TlvIter {
        TlvIter {
            data,
            context,
            done: false,
        }
    }

    fn read_next(&mut self) -> Result<(u16, Bytes), ParserError> {
        self.data.require_n_remaining(4, self.context)?;
        let tlv_type = self.data.get_u16();
        let length = self.data.get_u16() as usize;
        let value = self.data.read_n_bytes(length, self.context)?;
        Ok((tlv_type, value))
    }
}

impl Iterator for TlvIter {
    type Item = Result<(u16, Bytes), ParserError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || !self.data.has_remaining() {
            return None;
        }
        let item = self.read_next();
        if item.is_err() {
            self.done = true;
        }
        Some(item)
    }
}

/// Require a fixed-size TLV value.
pub(crate) fn expect_len(value: &Bytes, expected: usize, what: &str) -> Result<(), ParserError> {
    if value.len() != expected {
        return Err(ParserError::MalformedField(format!(
            "{} expects {} bytes, got {}",
            what,
            expected,
            value.len()
        )));
    }
    Ok(())
}

/// Parse a Multi-Topology ID TLV (263): a list of u16, reserved high bits dropped.
pub fn parse_multi_topology_ids(mut value: Bytes) -> Result<Vec<u16>, ParserError> {
    if value.len() % 2 != 0 {
        return Err(ParserError::MalformedField(format!(
            "multi-topology id list of odd length {}",
            value.len()
        )));
    }
    let mut ids = Vec::with_capacity(value.len() / 2);
    while value.has_remaining() {
        ids.push(value.read_u16()? & 0x0FFF);
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_primitives() {
        let mut data = Bytes::from(vec![1, 0, 2, 0, 0, 3, 0, 0, 0, 4]);
        assert_eq!(data.read_u8().unwrap(), 1);
        assert_eq!(data.read_u16().unwrap(), 2);
        assert_eq!(data.read_u24().unwrap(), 3);
        assert_eq!(data.read_u32().unwrap(), 4);
        assert!(matches!(
            data.read_u8(),
            Err(ParserError::TruncatedInput {
                needed: 1,
                remaining: 0,
                ..
            })
        ));
    }

    #[test]
    fn test_read_n_bytes_shares_buffer() {
        let mut data = Bytes::from(vec![1, 2, 3, 4, 5]);
        let head = data.read_n_bytes(3, "test").unwrap();
        assert_eq!(head.as_ref(), &[1, 2, 3]);
        assert_eq!(data.as_ref(), &[4, 5]);
        assert!(data.read_n_bytes(3, "test").is_err());
        // failed read leaves the cursor untouched
        assert_eq!(data.remaining(), 2);
    }

    #[test]
    fn test_read_asns() {
        let mut data = Bytes::from(vec![0x02, 0x41, 0x02, 0x42]);
        assert_eq!(
            data.read_asns(AsnLength::Bits16, 2).unwrap(),
            vec![577, 578]
        );
        let mut data = Bytes::from(vec![0, 0x0f, 0x42, 0x40, 0x00]);
        assert_eq!(
            data.read_asns(AsnLength::Bits32, 1).unwrap(),
            vec![1000000]
        );
        assert!(data.read_asns(AsnLength::Bits32, 1).is_err());
    }

    #[test]
    fn test_read_ip_reachability() {
        // 120 bits -> exactly 15 bytes, trailing byte left alone
        let mut raw = vec![120u8];
        raw.extend([0u8; 15]);
        raw.push(0xff);
        let mut data = Bytes::from(raw);
        let reach = data.read_ip_reachability(128).unwrap();
        assert_eq!(reach.length_in_bits, 120);
        assert_eq!(reach.prefix.len(), 15);
        assert_eq!(data.as_ref(), &[0xff]);

        let mut data = Bytes::from(vec![33, 10, 0, 0, 0, 0]);
        assert!(matches!(
            data.read_ip_reachability(32),
            Err(ParserError::MalformedField(_))
        ));
        let mut data = Bytes::from(vec![24, 10, 0]);
        assert!(matches!(
            data.read_ip_reachability(32),
            Err(ParserError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_tlv_iter() {
        let data = Bytes::from(vec![
            0x01, 0x00, 0x00, 0x02, 0xaa, 0xbb, // type 256, len 2
            0x01, 0x01, 0x00, 0x00, // type 257, empty
        ]);
        let tlvs: Vec<_> = TlvIter::new(data, "test")
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(tlvs.len(), 2);
        assert_eq!(tlvs[0].0, 256);
        assert_eq!(tlvs[0].1.as_ref(), &[0xaa, 0xbb]);
        assert_eq!(tlvs[1].0, 257);
        assert!(tlvs[1].1.is_empty());
    }

    #[test]
    fn test_tlv_iter_truncated() {
        // declared length 8 with only 2 bytes left
        let data = Bytes::from(vec![0x02, 0x00, 0x00, 0x04, 0, 0, 0, 1, 0x02, 0x01, 0x00, 0x08, 1, 2]);
        let mut iter = TlvIter::new(data, "node descriptor");
        assert!(iter.next().unwrap().is_ok());
        assert!(matches!(
            iter.next(),
            Some(Err(ParserError::TruncatedInput {
                context: "node descriptor",
                needed: 8,
                remaining: 2
            }))
        ));
        assert!(iter.next().is_none());

        // dangling partial header
        let mut iter = TlvIter::new(Bytes::from(vec![0x02, 0x00, 0x00]), "test");
        assert!(matches!(
            iter.next(),
            Some(Err(ParserError::TruncatedInput { .. }))
        ));
    }

    #[test]
    fn test_multi_topology_ids() {
        let ids = parse_multi_topology_ids(Bytes::from(vec![0x80, 0x02, 0x00, 0x00])).unwrap();
        assert_eq!(ids, vec![2, 0]);
        assert!(parse_multi_topology_ids(Bytes::from(vec![0x00])).is_err());
    }
}
