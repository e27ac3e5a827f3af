//! Descriptor TLVs of BGP-LS NLRI, RFC 7752 section 3.2.
//!
//! The same code can mean different things depending on where it appears, so each descriptor
//! kind has its own decoder and the NLRI decoder picks one by NLRI type.
use bytes::{Buf, Bytes};

use crate::error::ParserError;
use crate::models::*;
use crate::parser::{expect_len, parse_multi_topology_ids, ReadUtils, TlvIter};

fn read_u32_value(mut value: Bytes, what: &str) -> Result<u32, ParserError> {
    expect_len(&value, 4, what)?;
    Ok(value.get_u32())
}

/// Parse the sub-TLVs of a Local (256) or Remote (257) Node Descriptors TLV.
///
/// ```text
/// +--------------------+-------------------+----------+
/// | Sub-TLV Code Point | Description       |   Length |
/// +--------------------+-------------------+----------+
/// |        512         | Autonomous System |        4 |
/// |        513         | BGP-LS Identifier |        4 |
/// |        514         | OSPF Area-ID      |        4 |
/// |        515         | IGP Router-ID     | Variable |
/// +--------------------+-------------------+----------+
/// ```
pub fn parse_node_descriptor(value: Bytes) -> Result<NodeDescriptor, ParserError> {
    let mut desc = NodeDescriptor::default();
    for tlv in TlvIter::new(value, "node descriptor") {
        let (tlv_type, tlv_value) = tlv?;
        match NodeDescriptorType::from(tlv_type) {
            NodeDescriptorType::AutonomousSystem => {
                desc.autonomous_system = Some(read_u32_value(tlv_value, "autonomous system")?);
            }
            NodeDescriptorType::BgpLsIdentifier => {
                desc.bgp_ls_identifier = Some(read_u32_value(tlv_value, "BGP-LS identifier")?);
            }
            NodeDescriptorType::OspfAreaId => {
                desc.ospf_area_id = Some(read_u32_value(tlv_value, "OSPF area id")?);
            }
            NodeDescriptorType::IgpRouterId => {
                if tlv_value.is_empty() {
                    return Err(ParserError::MalformedField(
                        "empty IGP router id".to_string(),
                    ));
                }
                desc.igp_router_id = Some(IgpRouterId(tlv_value.to_vec()));
            }
            NodeDescriptorType::BgpRouterId => {
                let mut tlv_value = tlv_value;
                expect_len(&tlv_value, 4, "BGP router id")?;
                desc.bgp_router_id = Some(tlv_value.read_ipv4_address()?);
            }
            NodeDescriptorType::MemberAsn => {
                desc.member_asn = Some(read_u32_value(tlv_value, "member ASN")?);
            }
            NodeDescriptorType::Reserved => {
                desc.unknown_tlvs.push(Tlv::new(tlv_type, tlv_value.to_vec()));
            }
        }
    }
    Ok(desc)
}

/// Apply one Link Descriptor TLV (258-263) to `desc`.
pub fn parse_link_descriptor_tlv(
    desc: &mut LinkDescriptor,
    tlv_type: u16,
    mut value: Bytes,
) -> Result<(), ParserError> {
    match LinkDescriptorType::from(tlv_type) {
        LinkDescriptorType::LinkLocalRemoteIdentifiers => {
            expect_len(&value, 8, "link local/remote identifiers")?;
            desc.link_local_remote_identifiers = Some((value.get_u32(), value.get_u32()));
        }
        LinkDescriptorType::Ipv4InterfaceAddress => {
            expect_len(&value, 4, "IPv4 interface address")?;
            desc.ipv4_interface_address = Some(value.read_ipv4_address()?);
        }
        LinkDescriptorType::Ipv4NeighborAddress => {
            expect_len(&value, 4, "IPv4 neighbor address")?;
            desc.ipv4_neighbor_address = Some(value.read_ipv4_address()?);
        }
        LinkDescriptorType::Ipv6InterfaceAddress => {
            expect_len(&value, 16, "IPv6 interface address")?;
            desc.ipv6_interface_address = Some(value.read_ipv6_address()?);
        }
        LinkDescriptorType::Ipv6NeighborAddress => {
            expect_len(&value, 16, "IPv6 neighbor address")?;
            desc.ipv6_neighbor_address = Some(value.read_ipv6_address()?);
        }
        LinkDescriptorType::MultiTopologyId => {
            desc.multi_topology_ids = parse_multi_topology_ids(value)?;
        }
        LinkDescriptorType::Reserved => {
            desc.unknown_tlvs.push(Tlv::new(tlv_type, value.to_vec()));
        }
    }
    Ok(())
}

/// Apply one Prefix Descriptor TLV (263-265) to `desc`.
///
/// The IP Reachability value is `{prefix length in bits, ceil(bits/8) bytes}`; anything
/// after the prefix bytes is ignored.
pub fn parse_prefix_descriptor_tlv(
    desc: &mut PrefixDescriptor,
    tlv_type: u16,
    mut value: Bytes,
) -> Result<(), ParserError> {
    match PrefixDescriptorType::from(tlv_type) {
        PrefixDescriptorType::MultiTopologyId => {
            desc.multi_topology_ids = parse_multi_topology_ids(value)?;
        }
        PrefixDescriptorType::OspfRouteType => {
            expect_len(&value, 1, "OSPF route type")?;
            desc.ospf_route_type = Some(value.get_u8());
        }
        PrefixDescriptorType::IpReachabilityInformation => {
            desc.ip_reachability = Some(value.read_ip_reachability(128)?);
        }
        PrefixDescriptorType::Reserved => {
            desc.unknown_tlvs.push(Tlv::new(tlv_type, value.to_vec()));
        }
    }
    Ok(())
}

/// Apply one SRv6 SID Descriptor TLV (263, 518) to `desc`, RFC 9514 section 6.
pub fn parse_srv6_sid_descriptor_tlv(
    desc: &mut Srv6SidDescriptor,
    tlv_type: u16,
    mut value: Bytes,
) -> Result<(), ParserError> {
    match Srv6SidDescriptorType::from(tlv_type) {
        Srv6SidDescriptorType::MultiTopologyId => {
            desc.multi_topology_ids = parse_multi_topology_ids(value)?;
        }
        Srv6SidDescriptorType::Srv6SidInformation => {
            expect_len(&value, 16, "SRv6 SID information")?;
            desc.srv6_sid = Some(value.read_ipv6_address()?);
        }
        Srv6SidDescriptorType::Reserved => {
            desc.unknown_tlvs.push(Tlv::new(tlv_type, value.to_vec()));
        }
    }
    Ok(())
}
