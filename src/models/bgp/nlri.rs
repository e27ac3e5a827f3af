use crate::models::{IpReachability, LabelStack, RouteDistinguisher};
use bytes::Bytes;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// MP_REACH_NLRI, RFC 4760 section 3.
///
/// `next_hop` and `nlri` are views into the attribute value; the NLRI payload is only
/// interpreted once the AFI/SAFI decoder for it has been selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MpReachNlri {
    pub afi: u16,
    pub safi: u8,
    pub next_hop: Bytes,
    pub nlri: Bytes,
}

/// MP_UNREACH_NLRI, RFC 4760 section 4.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MpUnreachNlri {
    pub afi: u16,
    pub safi: u8,
    pub withdrawn: Bytes,
}

/// One entry of unicast, labeled unicast or VPN NLRI.
///
/// `labels` is empty and `rd` is `None` unless the SAFI carries them. `path_id` is only
/// present on add-path sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixNlri {
    pub path_id: Option<u32>,
    pub labels: LabelStack,
    pub rd: Option<RouteDistinguisher>,
    pub prefix: IpReachability,
}

impl MpReachNlri {
    /// Pick the address to report as next hop.
    ///
    /// Handles plain IPv4/IPv6 next hops, the global + link-local pair (RFC 2545), and
    /// VPN next hops prefixed by an all-zero route distinguisher (RFC 4364, RFC 4659).
    pub fn next_hop_addr(&self) -> Option<IpAddr> {
        let nh = self.next_hop.as_ref();
        match nh.len() {
            4 => Some(IpAddr::V4(ipv4_at(nh, 0))),
            16 | 32 => Some(IpAddr::V6(ipv6_at(nh, 0))),
            12 => Some(IpAddr::V4(ipv4_at(nh, 8))),
            24 | 48 => Some(IpAddr::V6(ipv6_at(nh, 8))),
            _ => None,
        }
    }
}

fn ipv4_at(buf: &[u8], offset: usize) -> Ipv4Addr {
    let mut octets = [0u8; 4];
    octets.copy_from_slice(&buf[offset..offset + 4]);
    Ipv4Addr::from(octets)
}

fn ipv6_at(buf: &[u8], offset: usize) -> Ipv6Addr {
    let mut octets = [0u8; 16];
    octets.copy_from_slice(&buf[offset..offset + 16]);
    Ipv6Addr::from(octets)
}
