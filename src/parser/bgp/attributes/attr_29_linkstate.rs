//! BGP Link-State attribute parsing - RFC 7752 section 3.3, RFC 9085, RFC 9514

use bytes::{Buf, Bytes};

use crate::error::ParserError;
use crate::models::*;
use crate::parser::bgp::linkstate::*;
use crate::parser::{expect_len, parse_multi_topology_ids, ReadUtils, TlvIter};

fn utf8_value(value: Bytes, what: &str) -> Result<String, ParserError> {
    String::from_utf8(value.to_vec())
        .map_err(|_| ParserError::MalformedField(format!("{} is not valid UTF-8", what)))
}

fn u32_value(mut value: Bytes, what: &str) -> Result<u32, ParserError> {
    expect_len(&value, 4, what)?;
    Ok(value.get_u32())
}

fn u8_value(mut value: Bytes, what: &str) -> Result<u8, ParserError> {
    expect_len(&value, 1, what)?;
    Ok(value.get_u8())
}

/// Parse BGP Link-State attribute (type 29).
///
/// Node, link and prefix attribute TLVs share one code space, so they are decoded into a
/// single [LinkStateAttribute]. TLVs of unknown type are kept raw; a known TLV with the wrong
/// length fails the whole attribute.
pub fn parse_link_state_attribute(data: Bytes) -> Result<LinkStateAttribute, ParserError> {
    let mut attr = LinkStateAttribute::default();

    for tlv in TlvIter::new(data, "link-state attribute") {
        let (tlv_type, mut value) = tlv?;
        match LinkStateAttrType::from(tlv_type) {
            LinkStateAttrType::MultiTopologyId => {
                attr.multi_topology_ids = parse_multi_topology_ids(value)?;
            }
            LinkStateAttrType::NodeMsd => attr.node_msd = parse_msd(value)?,
            LinkStateAttrType::LinkMsd => attr.link_msd = parse_msd(value)?,

            // node attributes
            LinkStateAttrType::NodeFlagBits => {
                attr.node_flags = Some(NodeFlags::from_bits_retain(u8_value(
                    value,
                    "node flag bits",
                )?));
            }
            LinkStateAttrType::NodeName => {
                attr.node_name = Some(utf8_value(value, "node name")?);
            }
            LinkStateAttrType::IsisAreaIdentifier => {
                attr.isis_area_id = Some(value.to_vec());
            }
            LinkStateAttrType::Ipv4RouterIdOfLocalNode => {
                expect_len(&value, 4, "local IPv4 router id")?;
                attr.local_ipv4_router_id = Some(value.read_ipv4_address()?);
            }
            LinkStateAttrType::Ipv6RouterIdOfLocalNode => {
                expect_len(&value, 16, "local IPv6 router id")?;
                attr.local_ipv6_router_id = Some(value.read_ipv6_address()?);
            }
            LinkStateAttrType::Ipv4RouterIdOfRemoteNode => {
                expect_len(&value, 4, "remote IPv4 router id")?;
                attr.remote_ipv4_router_id = Some(value.read_ipv4_address()?);
            }
            LinkStateAttrType::Ipv6RouterIdOfRemoteNode => {
                expect_len(&value, 16, "remote IPv6 router id")?;
                attr.remote_ipv6_router_id = Some(value.read_ipv6_address()?);
            }
            LinkStateAttrType::SrCapabilities => {
                attr.sr_capabilities = Some(parse_sr_capabilities(value)?);
            }
            LinkStateAttrType::SrAlgorithm => attr.sr_algorithms = value.to_vec(),
            LinkStateAttrType::SrLocalBlock => {
                attr.sr_local_block = Some(parse_sr_capabilities(value)?);
            }
            LinkStateAttrType::Srv6Capabilities => {
                attr.srv6_capabilities_flags = Some(parse_srv6_capabilities(value)?);
            }

            // link attributes
            LinkStateAttrType::AdministrativeGroup => {
                attr.admin_group = Some(u32_value(value, "administrative group")?);
            }
            LinkStateAttrType::MaximumLinkBandwidth => {
                attr.max_link_bandwidth = Some(parse_bandwidth(value)?);
            }
            LinkStateAttrType::MaxReservableLinkBandwidth => {
                attr.max_reservable_bandwidth = Some(parse_bandwidth(value)?);
            }
            LinkStateAttrType::UnreservedBandwidth => {
                expect_len(&value, 32, "unreserved bandwidth")?;
                attr.unreserved_bandwidth = (0..8).map(|_| value.get_f32()).collect();
            }
            LinkStateAttrType::TeDefaultMetric => {
                attr.te_default_metric = Some(u32_value(value, "TE default metric")?);
            }
            LinkStateAttrType::IgpMetric => attr.igp_metric = Some(parse_igp_metric(value)?),
            LinkStateAttrType::SharedRiskLinkGroups => {
                attr.srlgs = parse_u32_list(value, "SRLG")?;
            }
            LinkStateAttrType::LinkName => {
                attr.link_name = Some(utf8_value(value, "link name")?);
            }
            LinkStateAttrType::SrAdjacencySid => {
                attr.adjacency_sids.push(parse_adjacency_sid(value)?);
            }
            LinkStateAttrType::UnidirectionalLinkDelay => {
                // A bit in the high byte, delay in the low 24 bits
                attr.unidirectional_link_delay =
                    Some(u32_value(value, "unidirectional link delay")? & 0x00FF_FFFF);
            }

            // prefix attributes
            LinkStateAttrType::IgpFlags => attr.igp_flags = Some(u8_value(value, "IGP flags")?),
            LinkStateAttrType::IgpRouteTag => {
                attr.route_tags = parse_u32_list(value, "route tag")?;
            }
            LinkStateAttrType::PrefixMetric => {
                attr.prefix_metric = Some(u32_value(value, "prefix metric")?);
            }
            LinkStateAttrType::PrefixSid => attr.prefix_sid = Some(parse_prefix_sid(value)?),
            LinkStateAttrType::Srv6Locator => {
                attr.srv6_locator = Some(parse_srv6_locator(value)?);
            }
            LinkStateAttrType::PrefixAttributeFlags => {
                // the flags field is variable length, only the first octet is defined
                value.require_n_remaining(1, "prefix attribute flags")?;
                attr.prefix_attr_flags = Some(value.get_u8());
            }

            // srv6 sid attributes
            LinkStateAttrType::Srv6EndpointBehavior => {
                attr.srv6_endpoint_behavior = Some(parse_srv6_endpoint_behavior(value)?);
            }
            LinkStateAttrType::Srv6SidStructure => {
                attr.srv6_sid_structure = Some(parse_srv6_sid_structure(value)?);
            }

            LinkStateAttrType::SidLabel | LinkStateAttrType::Reserved => {
                attr.unknown_tlvs.push(Tlv::new(tlv_type, value.to_vec()));
            }
        }
    }

    Ok(attr)
}
