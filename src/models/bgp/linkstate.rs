//! BGP Link-State data structures based on RFC 7752, RFC 9085 and RFC 9514.

use crate::models::IpReachability;
use bitflags::bitflags;
use itertools::Itertools;
use num_enum::{FromPrimitive, IntoPrimitive};
use std::fmt::{Display, Formatter};
use std::net::{Ipv4Addr, Ipv6Addr};

/// BGP Link-State NLRI Types as defined in RFC 7752 and IANA registry
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum NlriType {
    #[num_enum(default)]
    Reserved = 0,
    Node = 1,
    Link = 2,
    Ipv4TopologyPrefix = 3,
    Ipv6TopologyPrefix = 4,
    SrPolicyCandidatePath = 5,
    Srv6Sid = 6,
}

/// Record sub-type a BGP-LS NLRI is projected into.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum LsSubType {
    Node = 32,
    Link = 33,
    Ipv4Prefix = 34,
    Ipv6Prefix = 35,
    Srv6Sid = 36,
}

impl LsSubType {
    pub fn from_nlri_type(nlri_type: NlriType) -> Option<LsSubType> {
        match nlri_type {
            NlriType::Node => Some(LsSubType::Node),
            NlriType::Link => Some(LsSubType::Link),
            NlriType::Ipv4TopologyPrefix => Some(LsSubType::Ipv4Prefix),
            NlriType::Ipv6TopologyPrefix => Some(LsSubType::Ipv6Prefix),
            NlriType::Srv6Sid => Some(LsSubType::Srv6Sid),
            NlriType::Reserved | NlriType::SrPolicyCandidatePath => None,
        }
    }
}

/// Protocol Identifier as defined in RFC 7752
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ProtocolId {
    #[num_enum(default)]
    Reserved = 0,
    IsisL1 = 1,
    IsisL2 = 2,
    Ospfv2 = 3,
    Direct = 4,
    Static = 5,
    Ospfv3 = 6,
    Bgp = 7,
    RsvpTe = 8,
    SegmentRouting = 9,
}

impl ProtocolId {
    pub fn is_ospf(&self) -> bool {
        matches!(self, ProtocolId::Ospfv2 | ProtocolId::Ospfv3)
    }
}

impl Display for ProtocolId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ProtocolId::Reserved => "Unknown",
            ProtocolId::IsisL1 => "IS-IS Level 1",
            ProtocolId::IsisL2 => "IS-IS Level 2",
            ProtocolId::Ospfv2 => "OSPFv2",
            ProtocolId::Direct => "Direct",
            ProtocolId::Static => "Static configuration",
            ProtocolId::Ospfv3 => "OSPFv3",
            ProtocolId::Bgp => "BGP",
            ProtocolId::RsvpTe => "RSVP-TE",
            ProtocolId::SegmentRouting => "Segment Routing",
        };
        write!(f, "{}", name)
    }
}

/// NLRI-level descriptor TLV types.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum DescriptorType {
    #[num_enum(default)]
    Reserved = 0,
    LocalNodeDescriptors = 256,
    RemoteNodeDescriptors = 257,
}

/// Node Descriptor Sub-TLV Types
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum NodeDescriptorType {
    #[num_enum(default)]
    Reserved = 0,
    AutonomousSystem = 512,
    BgpLsIdentifier = 513,
    OspfAreaId = 514,
    IgpRouterId = 515,
    /// RFC 9086
    BgpRouterId = 516,
    /// RFC 9086
    MemberAsn = 517,
}

/// Link Descriptor Sub-TLV Types
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum LinkDescriptorType {
    #[num_enum(default)]
    Reserved = 0,
    LinkLocalRemoteIdentifiers = 258,
    Ipv4InterfaceAddress = 259,
    Ipv4NeighborAddress = 260,
    Ipv6InterfaceAddress = 261,
    Ipv6NeighborAddress = 262,
    MultiTopologyId = 263,
}

/// Prefix Descriptor Sub-TLV Types
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum PrefixDescriptorType {
    #[num_enum(default)]
    Reserved = 0,
    MultiTopologyId = 263,
    OspfRouteType = 264,
    IpReachabilityInformation = 265,
}

/// SRv6 SID Descriptor TLV Types, RFC 9514
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum Srv6SidDescriptorType {
    #[num_enum(default)]
    Reserved = 0,
    MultiTopologyId = 263,
    Srv6SidInformation = 518,
}

/// BGP-LS attribute TLV types, all families in one table.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum LinkStateAttrType {
    #[num_enum(default)]
    Reserved = 0,
    MultiTopologyId = 263,
    /// RFC 8814
    NodeMsd = 266,
    LinkMsd = 267,
    NodeFlagBits = 1024,
    NodeName = 1026,
    IsisAreaIdentifier = 1027,
    Ipv4RouterIdOfLocalNode = 1028,
    Ipv6RouterIdOfLocalNode = 1029,
    Ipv4RouterIdOfRemoteNode = 1030,
    Ipv6RouterIdOfRemoteNode = 1031,
    SrCapabilities = 1034,
    SrAlgorithm = 1035,
    SrLocalBlock = 1036,
    /// RFC 9514
    Srv6Capabilities = 1038,
    AdministrativeGroup = 1088,
    MaximumLinkBandwidth = 1089,
    MaxReservableLinkBandwidth = 1090,
    UnreservedBandwidth = 1091,
    TeDefaultMetric = 1092,
    IgpMetric = 1095,
    SharedRiskLinkGroups = 1096,
    LinkName = 1098,
    SrAdjacencySid = 1099,
    /// Unidirectional Link Delay - RFC 8571
    UnidirectionalLinkDelay = 1114,
    IgpFlags = 1152,
    IgpRouteTag = 1153,
    PrefixMetric = 1155,
    PrefixSid = 1158,
    SidLabel = 1161,
    /// RFC 9514
    Srv6Locator = 1162,
    /// Prefix Attribute Flags - RFC 9085
    PrefixAttributeFlags = 1170,
    /// RFC 9514
    Srv6EndpointBehavior = 1250,
    Srv6SidStructure = 1252,
}

bitflags! {
    /// Node Flag Bits TLV, RFC 7752 section 3.3.1.1.
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct NodeFlags: u8 {
        const OVERLOAD = 0x80;
        const ATTACHED = 0x40;
        const EXTERNAL = 0x20;
        const ABR      = 0x10;
        const ROUTER   = 0x08;
        const V6       = 0x04;
    }
}

/// TLV (Type-Length-Value) structure for Link-State information
#[derive(Debug, PartialEq, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tlv {
    pub tlv_type: u16,
    pub value: Vec<u8>,
}

impl Tlv {
    pub fn new(tlv_type: u16, value: Vec<u8>) -> Self {
        Self { tlv_type, value }
    }
}

/// IGP Router-ID as carried in sub-TLV 515.
///
/// The length tells the flavor: 4 bytes is an OSPF router ID, 6 an IS-IS system ID, 7 an
/// IS-IS pseudonode and 8 an OSPF designated router with its interface address.
#[derive(Debug, PartialEq, Clone, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IgpRouterId(pub Vec<u8>);

impl IgpRouterId {
    pub fn is_isis(&self) -> bool {
        matches!(self.0.len(), 6 | 7)
    }
}

impl Display for IgpRouterId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let b = &self.0;
        match b.len() {
            4 => write!(f, "{}", Ipv4Addr::new(b[0], b[1], b[2], b[3])),
            6 | 7 => {
                write!(
                    f,
                    "{:02x}{:02x}.{:02x}{:02x}.{:02x}{:02x}",
                    b[0], b[1], b[2], b[3], b[4], b[5]
                )?;
                if b.len() == 7 {
                    write!(f, ".{:02x}", b[6])?;
                }
                Ok(())
            }
            8 => write!(
                f,
                "{}:{}",
                Ipv4Addr::new(b[0], b[1], b[2], b[3]),
                Ipv4Addr::new(b[4], b[5], b[6], b[7])
            ),
            _ => write!(f, "{}", hex::encode(b)),
        }
    }
}

/// Node Descriptor TLVs
#[derive(Debug, PartialEq, Clone, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeDescriptor {
    pub autonomous_system: Option<u32>,
    pub bgp_ls_identifier: Option<u32>,
    pub ospf_area_id: Option<u32>,
    pub igp_router_id: Option<IgpRouterId>,
    pub bgp_router_id: Option<Ipv4Addr>,
    pub member_asn: Option<u32>,
    pub unknown_tlvs: Vec<Tlv>,
}

/// Link Descriptor TLVs
#[derive(Debug, PartialEq, Clone, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkDescriptor {
    pub link_local_remote_identifiers: Option<(u32, u32)>,
    pub ipv4_interface_address: Option<Ipv4Addr>,
    pub ipv4_neighbor_address: Option<Ipv4Addr>,
    pub ipv6_interface_address: Option<Ipv6Addr>,
    pub ipv6_neighbor_address: Option<Ipv6Addr>,
    pub multi_topology_ids: Vec<u16>,
    pub unknown_tlvs: Vec<Tlv>,
}

/// Prefix Descriptor TLVs
#[derive(Debug, PartialEq, Clone, Eq, Default)]
pub struct PrefixDescriptor {
    pub multi_topology_ids: Vec<u16>,
    pub ospf_route_type: Option<u8>,
    pub ip_reachability: Option<IpReachability>,
    pub unknown_tlvs: Vec<Tlv>,
}

/// SRv6 SID Descriptor TLVs
#[derive(Debug, PartialEq, Clone, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Srv6SidDescriptor {
    pub multi_topology_ids: Vec<u16>,
    pub srv6_sid: Option<Ipv6Addr>,
    pub unknown_tlvs: Vec<Tlv>,
}

/// BGP Link-State NLRI structure
///
/// Which descriptor groups are populated depends on `nlri_type`; a group that did not
/// appear on the wire stays `None`.
#[derive(Debug, PartialEq, Clone, Eq)]
pub struct LinkStateNlri {
    pub nlri_type: NlriType,
    pub protocol_id: ProtocolId,
    pub identifier: u64,
    pub local_node: Option<NodeDescriptor>,
    pub remote_node: Option<NodeDescriptor>,
    pub link: Option<LinkDescriptor>,
    pub prefix: Option<PrefixDescriptor>,
    pub srv6_sid: Option<Srv6SidDescriptor>,
    pub unknown_tlvs: Vec<Tlv>,
}

impl LinkStateNlri {
    pub fn new(nlri_type: NlriType, protocol_id: ProtocolId, identifier: u64) -> Self {
        LinkStateNlri {
            nlri_type,
            protocol_id,
            identifier,
            local_node: None,
            remote_node: None,
            link: None,
            prefix: None,
            srv6_sid: None,
            unknown_tlvs: vec![],
        }
    }

    pub fn sub_type(&self) -> Option<LsSubType> {
        LsSubType::from_nlri_type(self.nlri_type)
    }
}

/// Maximum SID Depth entry, RFC 8814.
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Msd {
    pub msd_type: u8,
    pub value: u8,
}

impl Display for Msd {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.msd_type, self.value)
    }
}

/// SID/Label sub-TLV (1161): a 3-byte label or a 4-byte index.
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SidLabel {
    Label(u32),
    Index(u32),
}

impl Display for SidLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SidLabel::Label(v) | SidLabel::Index(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SidRange {
    pub range_size: u32,
    pub first_sid: SidLabel,
}

/// SR Capabilities (1034) and SR Local Block (1036) share this layout.
#[derive(Debug, PartialEq, Clone, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SrCapabilities {
    pub flags: u8,
    pub ranges: Vec<SidRange>,
}

impl Display for SrCapabilities {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "flags={} {}",
            self.flags,
            self.ranges
                .iter()
                .map(|r| format!("{}/{}", r.first_sid, r.range_size))
                .join(" ")
        )
    }
}

/// Prefix-SID TLV (1158), RFC 9085 section 2.3.1.
#[derive(Debug, PartialEq, Clone, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrefixSid {
    pub flags: u8,
    pub algorithm: u8,
    pub sid: Vec<u8>,
}

/// Adjacency-SID TLV (1099), RFC 9085 section 2.2.1.
#[derive(Debug, PartialEq, Clone, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdjacencySid {
    pub flags: u8,
    pub weight: u8,
    pub sid: Vec<u8>,
}

/// Interpret a raw SID field: 3 bytes carry a label in the low 20 bits, 4 bytes an index.
pub fn sid_value(sid: &[u8]) -> Option<u32> {
    match sid.len() {
        3 => Some(u32::from_be_bytes([0, sid[0], sid[1], sid[2]]) & 0x000F_FFFF),
        4 => Some(u32::from_be_bytes([sid[0], sid[1], sid[2], sid[3]])),
        _ => None,
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Srv6Locator {
    pub flags: u8,
    pub algorithm: u8,
    pub metric: u32,
}

#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Srv6EndpointBehavior {
    pub behavior: u16,
    pub flags: u8,
    pub algorithm: u8,
}

#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Srv6SidStructure {
    pub locator_block_len: u8,
    pub locator_node_len: u8,
    pub function_len: u8,
    pub argument_len: u8,
}

/// BGP-LS attribute (path attribute 29), decoded.
///
/// Node, link, prefix and SRv6 SID attribute TLVs share one type space, so all of them
/// land here and the record builders pick what applies to their NLRI type.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct LinkStateAttribute {
    // node
    pub node_flags: Option<NodeFlags>,
    pub node_name: Option<String>,
    pub isis_area_id: Option<Vec<u8>>,
    pub local_ipv4_router_id: Option<Ipv4Addr>,
    pub local_ipv6_router_id: Option<Ipv6Addr>,
    pub multi_topology_ids: Vec<u16>,
    pub node_msd: Vec<Msd>,
    pub sr_capabilities: Option<SrCapabilities>,
    pub sr_algorithms: Vec<u8>,
    pub sr_local_block: Option<SrCapabilities>,
    pub srv6_capabilities_flags: Option<u16>,

    // link
    pub remote_ipv4_router_id: Option<Ipv4Addr>,
    pub remote_ipv6_router_id: Option<Ipv6Addr>,
    pub admin_group: Option<u32>,
    pub max_link_bandwidth: Option<f32>,
    pub max_reservable_bandwidth: Option<f32>,
    pub unreserved_bandwidth: Vec<f32>,
    pub te_default_metric: Option<u32>,
    pub igp_metric: Option<u32>,
    pub srlgs: Vec<u32>,
    pub link_name: Option<String>,
    pub adjacency_sids: Vec<AdjacencySid>,
    pub link_msd: Vec<Msd>,
    pub unidirectional_link_delay: Option<u32>,

    // prefix
    pub igp_flags: Option<u8>,
    pub route_tags: Vec<u32>,
    pub prefix_metric: Option<u32>,
    pub prefix_sid: Option<PrefixSid>,
    pub prefix_attr_flags: Option<u8>,
    pub srv6_locator: Option<Srv6Locator>,

    // srv6 sid
    pub srv6_endpoint_behavior: Option<Srv6EndpointBehavior>,
    pub srv6_sid_structure: Option<Srv6SidStructure>,

    pub unknown_tlvs: Vec<Tlv>,
}

impl LinkStateAttribute {
    /// Local router ID, preferring the IPv6 one when `ipv6` is set.
    pub fn local_router_id(&self, ipv6: bool) -> Option<String> {
        match ipv6 {
            true => self.local_ipv6_router_id.map(|a| a.to_string()),
            false => self.local_ipv4_router_id.map(|a| a.to_string()),
        }
    }

    pub fn remote_router_id(&self, ipv6: bool) -> Option<String> {
        match ipv6 {
            true => self.remote_ipv6_router_id.map(|a| a.to_string()),
            false => self.remote_ipv4_router_id.map(|a| a.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nlri_type_to_sub_type() {
        assert_eq!(NlriType::from(1), NlriType::Node);
        assert_eq!(NlriType::from(77), NlriType::Reserved);
        assert_eq!(
            LsSubType::from_nlri_type(NlriType::Node),
            Some(LsSubType::Node)
        );
        assert_eq!(u16::from(LsSubType::Link), 33);
        assert_eq!(u16::from(LsSubType::Srv6Sid), 36);
        assert_eq!(
            LsSubType::from_nlri_type(NlriType::SrPolicyCandidatePath),
            None
        );
    }

    #[test]
    fn test_protocol_id() {
        assert_eq!(ProtocolId::from(2), ProtocolId::IsisL2);
        assert_eq!(ProtocolId::IsisL2.to_string(), "IS-IS Level 2");
        assert!(ProtocolId::Ospfv3.is_ospf());
        assert_eq!(ProtocolId::from(42), ProtocolId::Reserved);
    }

    #[test]
    fn test_igp_router_id_display() {
        assert_eq!(IgpRouterId(vec![10, 0, 0, 1]).to_string(), "10.0.0.1");
        let isis = IgpRouterId(vec![0x00, 0x00, 0x00, 0x00, 0x00, 0x01]);
        assert!(isis.is_isis());
        assert_eq!(isis.to_string(), "0000.0000.0001");
        assert_eq!(
            IgpRouterId(vec![0x19, 0x21, 0x68, 0x00, 0x10, 0x01, 0x02]).to_string(),
            "1921.6800.1001.02"
        );
        assert_eq!(
            IgpRouterId(vec![10, 0, 0, 1, 10, 1, 1, 1]).to_string(),
            "10.0.0.1:10.1.1.1"
        );
    }

    #[test]
    fn test_sid_value() {
        assert_eq!(sid_value(&[0x00, 0x3e, 0x81]), Some(16001));
        assert_eq!(sid_value(&[0, 0, 0, 101]), Some(101));
        assert_eq!(sid_value(&[1, 2]), None);
    }

    #[test]
    fn test_router_id_selection() {
        let attr = LinkStateAttribute {
            local_ipv4_router_id: Some(Ipv4Addr::new(10, 0, 0, 1)),
            local_ipv6_router_id: Some("2001:db8::1".parse().unwrap()),
            ..Default::default()
        };
        assert_eq!(attr.local_router_id(false).unwrap(), "10.0.0.1");
        assert_eq!(attr.local_router_id(true).unwrap(), "2001:db8::1");
        assert_eq!(attr.remote_router_id(true), None);
    }
}
