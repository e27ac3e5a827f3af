//! EVPN route types, RFC 7432 section 7 and RFC 9136.
use crate::models::{MplsLabel, RouteDistinguisher};
use bytes::Bytes;
use ipnet::IpNet;
use num_enum::{FromPrimitive, IntoPrimitive};
use std::fmt::{Display, Formatter};
use std::net::IpAddr;

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum EvpnRouteType {
    EthernetAutoDiscovery = 1,
    MacIpAdvertisement = 2,
    InclusiveMulticastEthernetTag = 3,
    EthernetSegment = 4,
    IpPrefix = 5,
    #[num_enum(catch_all)]
    Unknown(u8),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct EthernetSegmentIdentifier(pub [u8; 10]);

impl Display for EthernetSegmentIdentifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MacAddress(pub [u8; 6]);

impl Display for MacAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthernetAutoDiscovery {
    pub rd: RouteDistinguisher,
    pub esi: EthernetSegmentIdentifier,
    pub ethernet_tag: u32,
    pub label: MplsLabel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacIpAdvertisement {
    pub rd: RouteDistinguisher,
    pub esi: EthernetSegmentIdentifier,
    pub ethernet_tag: u32,
    pub mac: MacAddress,
    pub ip: Option<IpAddr>,
    pub label1: MplsLabel,
    pub label2: Option<MplsLabel>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InclusiveMulticastEthernetTag {
    pub rd: RouteDistinguisher,
    pub ethernet_tag: u32,
    pub originating_router_ip: IpAddr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthernetSegment {
    pub rd: RouteDistinguisher,
    pub esi: EthernetSegmentIdentifier,
    pub originating_router_ip: IpAddr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpPrefixRoute {
    pub rd: RouteDistinguisher,
    pub esi: EthernetSegmentIdentifier,
    pub ethernet_tag: u32,
    pub prefix: IpNet,
    pub gateway: IpAddr,
    pub label: MplsLabel,
}

/// One EVPN NLRI entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvpnNlri {
    EthernetAutoDiscovery(EthernetAutoDiscovery),
    MacIpAdvertisement(MacIpAdvertisement),
    InclusiveMulticastEthernetTag(InclusiveMulticastEthernetTag),
    EthernetSegment(EthernetSegment),
    IpPrefix(IpPrefixRoute),
    Unknown { route_type: u8, value: Bytes },
}

impl EvpnNlri {
    pub fn route_type(&self) -> EvpnRouteType {
        match self {
            EvpnNlri::EthernetAutoDiscovery(_) => EvpnRouteType::EthernetAutoDiscovery,
            EvpnNlri::MacIpAdvertisement(_) => EvpnRouteType::MacIpAdvertisement,
            EvpnNlri::InclusiveMulticastEthernetTag(_) => {
                EvpnRouteType::InclusiveMulticastEthernetTag
            }
            EvpnNlri::EthernetSegment(_) => EvpnRouteType::EthernetSegment,
            EvpnNlri::IpPrefix(_) => EvpnRouteType::IpPrefix,
            EvpnNlri::Unknown { route_type, .. } => EvpnRouteType::from(*route_type),
        }
    }

    pub fn rd(&self) -> Option<RouteDistinguisher> {
        match self {
            EvpnNlri::EthernetAutoDiscovery(r) => Some(r.rd),
            EvpnNlri::MacIpAdvertisement(r) => Some(r.rd),
            EvpnNlri::InclusiveMulticastEthernetTag(r) => Some(r.rd),
            EvpnNlri::EthernetSegment(r) => Some(r.rd),
            EvpnNlri::IpPrefix(r) => Some(r.rd),
            EvpnNlri::Unknown { .. } => None,
        }
    }
}
