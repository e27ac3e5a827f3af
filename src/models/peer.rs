use crate::error::ParserError;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Peer metadata handed over by the BMP framing layer alongside each update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeerHeader {
    pub peer_ip: IpAddr,
    pub peer_asn: u32,
    pub timestamp: u64,
}

impl PeerHeader {
    /// Build from the raw per-peer address field.
    ///
    /// BMP carries the peer address in 16 bytes; with the IPv6 flag clear the IPv4
    /// address sits in the last 4. A bare 4-byte address is accepted as well.
    pub fn new(
        peer_address: &[u8],
        is_ipv6: bool,
        peer_asn: u32,
        timestamp: u64,
    ) -> Result<PeerHeader, ParserError> {
        let peer_ip = match (is_ipv6, peer_address.len()) {
            (true, 16) => {
                let mut octets = [0u8; 16];
                octets.copy_from_slice(peer_address);
                IpAddr::V6(Ipv6Addr::from(octets))
            }
            (false, 4) | (false, 16) => {
                let start = peer_address.len() - 4;
                let mut octets = [0u8; 4];
                octets.copy_from_slice(&peer_address[start..]);
                IpAddr::V4(Ipv4Addr::from(octets))
            }
            (_, len) => {
                return Err(ParserError::MalformedField(format!(
                    "peer address of {} bytes with ipv6 flag {}",
                    len, is_ipv6
                )))
            }
        };
        Ok(PeerHeader {
            peer_ip,
            peer_asn,
            timestamp,
        })
    }

    #[inline]
    pub fn is_ipv6(&self) -> bool {
        self.peer_ip.is_ipv6()
    }
}
