//! EVPN NLRI, RFC 7432 section 7 and RFC 9136 section 3.
use std::net::IpAddr;

use bytes::{Buf, Bytes};
use ipnet::IpNet;

use crate::error::ParserError;
use crate::models::*;
use crate::parser::ReadUtils;

fn read_rd(data: &mut Bytes) -> Result<RouteDistinguisher, ParserError> {
    Ok(RouteDistinguisher(data.read_array::<8>("route distinguisher")?))
}

fn read_esi(data: &mut Bytes) -> Result<EthernetSegmentIdentifier, ParserError> {
    Ok(EthernetSegmentIdentifier(
        data.read_array::<10>("ethernet segment identifier")?,
    ))
}

fn read_label(data: &mut Bytes) -> Result<MplsLabel, ParserError> {
    Ok(data.read_mpls_label()?.0)
}

/// An IP address preceded by its length in bits. Zero length means no address.
fn read_sized_ip(data: &mut Bytes) -> Result<Option<IpAddr>, ParserError> {
    match data.read_u8()? {
        0 => Ok(None),
        32 => Ok(Some(data.read_ipv4_address()?.into())),
        128 => Ok(Some(data.read_ipv6_address()?.into())),
        bits => Err(ParserError::MalformedField(format!(
            "EVPN IP address length of {} bits",
            bits
        ))),
    }
}

fn require_ip(ip: Option<IpAddr>, what: &str) -> Result<IpAddr, ParserError> {
    ip.ok_or_else(|| ParserError::MalformedField(format!("{} has no IP address", what)))
}

/// Decode the value of one EVPN route of the given type.
pub fn parse_evpn_route(route_type: u8, mut data: Bytes) -> Result<EvpnNlri, ParserError> {
    let route = match EvpnRouteType::from(route_type) {
        EvpnRouteType::EthernetAutoDiscovery => {
            EvpnNlri::EthernetAutoDiscovery(EthernetAutoDiscovery {
                rd: read_rd(&mut data)?,
                esi: read_esi(&mut data)?,
                ethernet_tag: data.read_u32()?,
                label: read_label(&mut data)?,
            })
        }
        EvpnRouteType::MacIpAdvertisement => {
            let rd = read_rd(&mut data)?;
            let esi = read_esi(&mut data)?;
            let ethernet_tag = data.read_u32()?;
            let mac_len = data.read_u8()?;
            if mac_len != 48 {
                return Err(ParserError::MalformedField(format!(
                    "MAC address length of {} bits",
                    mac_len
                )));
            }
            let mac = MacAddress(data.read_array::<6>("mac address")?);
            let ip = read_sized_ip(&mut data)?;
            let label1 = read_label(&mut data)?;
            let label2 = match data.has_remaining() {
                true => Some(read_label(&mut data)?),
                false => None,
            };
            EvpnNlri::MacIpAdvertisement(MacIpAdvertisement {
                rd,
                esi,
                ethernet_tag,
                mac,
                ip,
                label1,
                label2,
            })
        }
        EvpnRouteType::InclusiveMulticastEthernetTag => {
            let rd = read_rd(&mut data)?;
            let ethernet_tag = data.read_u32()?;
            let originating_router_ip =
                require_ip(read_sized_ip(&mut data)?, "inclusive multicast route")?;
            EvpnNlri::InclusiveMulticastEthernetTag(InclusiveMulticastEthernetTag {
                rd,
                ethernet_tag,
                originating_router_ip,
            })
        }
        EvpnRouteType::EthernetSegment => {
            let rd = read_rd(&mut data)?;
            let esi = read_esi(&mut data)?;
            let originating_router_ip =
                require_ip(read_sized_ip(&mut data)?, "ethernet segment route")?;
            EvpnNlri::EthernetSegment(EthernetSegment {
                rd,
                esi,
                originating_router_ip,
            })
        }
        EvpnRouteType::IpPrefix => {
            // address family is implied by the total length: 34 for IPv4, 58 for IPv6
            let ipv6 = match data.len() {
                34 => false,
                58 => true,
                len => {
                    return Err(ParserError::MalformedField(format!(
                        "IP prefix route of {} bytes",
                        len
                    )))
                }
            };
            let rd = read_rd(&mut data)?;
            let esi = read_esi(&mut data)?;
            let ethernet_tag = data.read_u32()?;
            let prefix_len = data.read_u8()?;
            let (addr, gateway): (IpAddr, IpAddr) = match ipv6 {
                false => (
                    data.read_ipv4_address()?.into(),
                    data.read_ipv4_address()?.into(),
                ),
                true => (
                    data.read_ipv6_address()?.into(),
                    data.read_ipv6_address()?.into(),
                ),
            };
            let prefix = IpNet::new(addr, prefix_len)
                .map_err(|_| {
                    ParserError::MalformedField(format!(
                        "EVPN prefix length {} too long",
                        prefix_len
                    ))
                })?
                .trunc();
            EvpnNlri::IpPrefix(IpPrefixRoute {
                rd,
                esi,
                ethernet_tag,
                prefix,
                gateway,
                label: read_label(&mut data)?,
            })
        }
        EvpnRouteType::Unknown(_) => EvpnNlri::Unknown {
            route_type,
            value: data,
        },
    };
    Ok(route)
}

/// Iterates `{route type: u8, length: u8, value}` EVPN entries.
///
/// A malformed route body yields an error for that route only. A length running past the
/// end of the payload ends the walk.
pub struct EvpnNlriIter {
    data: Bytes,
    done: bool,
}

impl EvpnNlriIter {
    pub fn new(data: Bytes) -> EvpnNlriIter {
        EvpnNlriIter { data, done: false }
    }

    fn read_entry(&mut self) -> Result<(u8, Bytes), ParserError> {
        self.data.require_n_remaining(2, "EVPN route header")?;
        let route_type = self.data.get_u8();
        let length = self.data.get_u8() as usize;
        let value = self.data.read_n_bytes(length, "EVPN route")?;
        Ok((route_type, value))
    }
}

impl Iterator for EvpnNlriIter {
    type Item = Result<EvpnNlri, ParserError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || !self.data.has_remaining() {
            return None;
        }
        match self.read_entry() {
            Ok((route_type, value)) => Some(parse_evpn_route(route_type, value)),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

pub fn parse_evpn_nlri(data: Bytes) -> EvpnNlriIter {
    EvpnNlriIter::new(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::{BufMut, BytesMut};

    const RD: [u8; 8] = [0, 1, 10, 0, 0, 1, 0, 5];

    fn entry(route_type: u8, value: &[u8]) -> BytesMut {
        let mut buf = BytesMut::new();
        buf.put_u8(route_type);
        buf.put_u8(value.len() as u8);
        buf.put_slice(value);
        buf
    }

    #[test]
    fn test_mac_ip_advertisement() {
        let mut value = BytesMut::new();
        value.put_slice(&RD);
        value.put_slice(&[0u8; 10]);
        value.put_u32(100);
        value.put_u8(48);
        value.put_slice(&[0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        value.put_u8(32);
        value.put_slice(&[192, 168, 0, 10]);
        value.put_slice(&[0x00, 0x27, 0x11]); // VNI-style label
        let routes: Vec<_> = parse_evpn_nlri(entry(2, &value).freeze()).collect();
        let route = match routes[0].as_ref().unwrap() {
            EvpnNlri::MacIpAdvertisement(r) => r.clone(),
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(route.rd.to_string(), "10.0.0.1:5");
        assert_eq!(route.ethernet_tag, 100);
        assert_eq!(route.mac.to_string(), "00:11:22:33:44:55");
        assert_eq!(route.ip.unwrap().to_string(), "192.168.0.10");
        assert_eq!(route.label1.value, 0x271);
        assert!(route.label2.is_none());
    }

    #[test]
    fn test_inclusive_multicast_and_unknown() {
        let mut value = BytesMut::new();
        value.put_slice(&RD);
        value.put_u32(0);
        value.put_u8(32);
        value.put_slice(&[10, 0, 0, 1]);
        let mut payload = entry(3, &value);
        payload.extend_from_slice(&entry(9, &[1, 2, 3]));

        let routes: Vec<_> = parse_evpn_nlri(payload.freeze())
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(
            routes[0].route_type(),
            EvpnRouteType::InclusiveMulticastEthernetTag
        );
        assert_eq!(routes[1].route_type(), EvpnRouteType::Unknown(9));
        assert!(routes[1].rd().is_none());
    }

    #[test]
    fn test_ip_prefix_route() {
        let mut value = BytesMut::new();
        value.put_slice(&RD);
        value.put_slice(&[0u8; 10]);
        value.put_u32(0);
        value.put_u8(24);
        value.put_slice(&[10, 20, 30, 99]);
        value.put_slice(&[0, 0, 0, 0]);
        value.put_slice(&[0x00, 0x00, 0x51]);
        let route = parse_evpn_route(5, value.freeze()).unwrap();
        match route {
            EvpnNlri::IpPrefix(r) => {
                assert_eq!(r.prefix.to_string(), "10.20.30.0/24");
                assert_eq!(r.label.value, 5);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_malformed_route_is_isolated() {
        // type 1 with a short body, then a valid type 4
        let mut payload = entry(1, &RD);
        let mut value = BytesMut::new();
        value.put_slice(&RD);
        value.put_slice(&[0u8; 10]);
        value.put_u8(32);
        value.put_slice(&[10, 0, 0, 2]);
        payload.extend_from_slice(&entry(4, &value));
        payload.extend_from_slice(&[2, 40, 0]);

        let routes: Vec<_> = parse_evpn_nlri(payload.freeze()).collect();
        assert_eq!(routes.len(), 3);
        assert!(matches!(routes[0], Err(ParserError::TruncatedInput { .. })));
        assert!(routes[1].is_ok());
        assert!(matches!(routes[2], Err(ParserError::TruncatedInput { .. })));
    }
}
