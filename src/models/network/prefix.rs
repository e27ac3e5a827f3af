use crate::error::ParserError;
use crate::models::Afi;
use bytes::Bytes;
use ipnet::IpNet;
use std::fmt::{Display, Formatter};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// A bit-length prefixed address fragment as it appears on the wire.
///
/// `prefix` always holds exactly `ceil(length_in_bits / 8)` bytes. Bits past
/// `length_in_bits` in the last byte are not trusted and get masked off by
/// [IpReachability::to_ip_net].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IpReachability {
    pub length_in_bits: u8,
    pub prefix: Bytes,
}

impl IpReachability {
    #[inline]
    pub const fn byte_len(length_in_bits: u8) -> usize {
        (length_in_bits as usize + 7) / 8
    }

    /// Convert into a network prefix for the given address family, zeroing host bits.
    pub fn to_ip_net(&self, afi: Afi) -> Result<IpNet, ParserError> {
        let addr = match afi {
            Afi::Ipv4 => {
                let mut buf = [0u8; 4];
                copy_prefix(&mut buf, &self.prefix)?;
                IpAddr::V4(Ipv4Addr::from(buf))
            }
            Afi::Ipv6 => {
                let mut buf = [0u8; 16];
                copy_prefix(&mut buf, &self.prefix)?;
                IpAddr::V6(Ipv6Addr::from(buf))
            }
            Afi::L2vpn | Afi::LinkState => {
                return Err(ParserError::MalformedField(format!(
                    "no IP prefix form for {:?}",
                    afi
                )))
            }
        };
        IpNet::new(addr, self.length_in_bits)
            .map(|net| net.trunc())
            .map_err(|_| {
                ParserError::MalformedField(format!(
                    "prefix length {} too long for {:?}",
                    self.length_in_bits, afi
                ))
            })
    }
}

fn copy_prefix(buf: &mut [u8], prefix: &[u8]) -> Result<(), ParserError> {
    if prefix.len() > buf.len() {
        return Err(ParserError::MalformedField(format!(
            "prefix of {} bytes does not fit a {} byte address",
            prefix.len(),
            buf.len()
        )));
    }
    buf[..prefix.len()].copy_from_slice(prefix);
    Ok(())
}

/// Route Distinguisher, RFC 4364 section 4.2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteDistinguisher(pub [u8; 8]);

impl RouteDistinguisher {
    #[inline]
    pub fn rd_type(&self) -> u16 {
        u16::from_be_bytes([self.0[0], self.0[1]])
    }
}

impl Display for RouteDistinguisher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let v = &self.0;
        match self.rd_type() {
            0 => write!(
                f,
                "{}:{}",
                u16::from_be_bytes([v[2], v[3]]),
                u32::from_be_bytes([v[4], v[5], v[6], v[7]])
            ),
            1 => write!(
                f,
                "{}:{}",
                Ipv4Addr::new(v[2], v[3], v[4], v[5]),
                u16::from_be_bytes([v[6], v[7]])
            ),
            2 => write!(
                f,
                "{}:{}",
                u32::from_be_bytes([v[2], v[3], v[4], v[5]]),
                u16::from_be_bytes([v[6], v[7]])
            ),
            _ => write!(f, "{}", hex::encode(v)),
        }
    }
}
