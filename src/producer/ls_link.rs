use itertools::Itertools;

use super::{ospf_area_id, require, BuildContext};
use crate::error::ParserError;
use crate::models::*;

fn render_adjacency_sid(sid: &AdjacencySid) -> String {
    match sid_value(&sid.sid) {
        Some(value) => format!("{}:{}:{}", sid.flags, sid.weight, value),
        None => format!("{}:{}:{}", sid.flags, sid.weight, hex::encode(&sid.sid)),
    }
}

/// A link NLRI needs both end nodes and at least one link descriptor TLV.
pub(crate) fn build_ls_link(ctx: &BuildContext, nlri: &LinkStateNlri) -> Result<Record, ParserError> {
    let attrs = ctx.attrs();
    let local = require(nlri.local_node.as_ref(), "local node descriptor")?;
    let remote = require(nlri.remote_node.as_ref(), "remote node descriptor")?;
    let link = require(nlri.link.as_ref(), "link descriptor")?;

    let (local_link_ip, remote_link_ip) = match ctx.peer_ipv6 {
        true => (
            link.ipv6_interface_address.map(|a| a.to_string()),
            link.ipv6_neighbor_address.map(|a| a.to_string()),
        ),
        false => (
            link.ipv4_interface_address.map(|a| a.to_string()),
            link.ipv4_neighbor_address.map(|a| a.to_string()),
        ),
    };
    // fall back to whichever family the link is numbered in
    let local_link_ip = local_link_ip
        .or_else(|| link.ipv4_interface_address.map(|a| a.to_string()))
        .or_else(|| link.ipv6_interface_address.map(|a| a.to_string()));
    let remote_link_ip = remote_link_ip
        .or_else(|| link.ipv4_neighbor_address.map(|a| a.to_string()))
        .or_else(|| link.ipv6_neighbor_address.map(|a| a.to_string()));

    let mut record = LsLink {
        header: ctx.header.clone(),
        protocol_id: u8::from(nlri.protocol_id),
        protocol: nlri.protocol_id.to_string(),
        domain_id: nlri.identifier,
        nexthop: attrs.nexthop.clone(),
        igp_router_id: local.igp_router_id.as_ref().map(|id| id.to_string()),
        local_node_asn: local.autonomous_system,
        ls_id: local.bgp_ls_identifier,
        ospf_area_id: local.ospf_area_id.map(ospf_area_id),
        remote_igp_router_id: remote.igp_router_id.as_ref().map(|id| id.to_string()),
        remote_node_asn: remote.autonomous_system,
        local_link_id: link.link_local_remote_identifiers.map(|(l, _)| l),
        remote_link_id: link.link_local_remote_identifiers.map(|(_, r)| r),
        local_link_ip,
        remote_link_ip,
        mt_id: link.multi_topology_ids.first().copied(),
        as_path: attrs.as_path.clone(),
        med: attrs.med,
        ..Default::default()
    };

    if let Some(ls) = &attrs.link_state {
        record.router_id = ls.local_router_id(ctx.peer_ipv6);
        record.remote_router_id = ls.remote_router_id(ctx.peer_ipv6);
        record.admin_group = ls.admin_group;
        record.max_link_bw = ls.max_link_bandwidth.map(|bw| bw as u64);
        record.max_resv_bw = ls.max_reservable_bandwidth.map(|bw| bw as u64);
        if !ls.unreserved_bandwidth.is_empty() {
            record.unresv_bw = Some(
                ls.unreserved_bandwidth
                    .iter()
                    .map(|bw| *bw as u64)
                    .join(", "),
            );
        }
        record.te_default_metric = ls.te_default_metric;
        record.igp_metric = ls.igp_metric;
        if !ls.srlgs.is_empty() {
            record.srlg = Some(ls.srlgs.iter().join(", "));
        }
        record.link_name = ls.link_name.clone();
        if !ls.adjacency_sids.is_empty() {
            record.adjacency_sids =
                Some(ls.adjacency_sids.iter().map(render_adjacency_sid).join(", "));
        }
        if !ls.link_msd.is_empty() {
            record.link_msd = Some(ls.link_msd.iter().join(", "));
        }
        record.unidirectional_link_delay = ls.unidirectional_link_delay;
    }

    Ok(Record::LsLink(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::producer::attrs::AttrProjection;

    fn link_nlri() -> LinkStateNlri {
        let mut nlri = LinkStateNlri::new(NlriType::Link, ProtocolId::IsisL2, 0);
        nlri.local_node = Some(NodeDescriptor {
            autonomous_system: Some(65000),
            igp_router_id: Some(IgpRouterId(vec![0, 0, 0, 0, 0, 1])),
            ..Default::default()
        });
        nlri.remote_node = Some(NodeDescriptor {
            autonomous_system: Some(65000),
            igp_router_id: Some(IgpRouterId(vec![0, 0, 0, 0, 0, 2])),
            ..Default::default()
        });
        nlri.link = Some(LinkDescriptor {
            ipv4_interface_address: Some("10.1.1.1".parse().unwrap()),
            ipv4_neighbor_address: Some("10.1.1.2".parse().unwrap()),
            multi_topology_ids: vec![2],
            ..Default::default()
        });
        nlri
    }

    #[test]
    fn test_link_record() {
        let attrs = AttrProjection {
            link_state: Some(LinkStateAttribute {
                igp_metric: Some(10),
                max_link_bandwidth: Some(125_000_000.0),
                unreserved_bandwidth: vec![1000.0; 8],
                srlgs: vec![1, 2],
                adjacency_sids: vec![AdjacencySid {
                    flags: 0x30,
                    weight: 0,
                    sid: vec![0x00, 0x5d, 0xc0],
                }],
                ..Default::default()
            }),
            ..Default::default()
        };
        let ctx = BuildContext {
            header: RecordHeader::default(),
            attrs: &attrs,
            peer_ipv6: true,
        };
        let record = match build_ls_link(&ctx, &link_nlri()).unwrap() {
            Record::LsLink(r) => r,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(record.igp_router_id.as_deref(), Some("0000.0000.0001"));
        assert_eq!(record.remote_igp_router_id.as_deref(), Some("0000.0000.0002"));
        // peer is IPv6 but the link is only IPv4 numbered
        assert_eq!(record.local_link_ip.as_deref(), Some("10.1.1.1"));
        assert_eq!(record.remote_link_ip.as_deref(), Some("10.1.1.2"));
        assert_eq!(record.mt_id, Some(2));
        assert_eq!(record.igp_metric, Some(10));
        assert_eq!(record.max_link_bw, Some(125_000_000));
        assert_eq!(
            record.unresv_bw.as_deref(),
            Some("1000, 1000, 1000, 1000, 1000, 1000, 1000, 1000")
        );
        assert_eq!(record.srlg.as_deref(), Some("1, 2"));
        assert_eq!(record.adjacency_sids.as_deref(), Some("48:0:24000"));
    }

    #[test]
    fn test_link_requires_descriptors() {
        let attrs = AttrProjection::default();
        let ctx = BuildContext {
            header: RecordHeader::default(),
            attrs: &attrs,
            peer_ipv6: false,
        };

        let mut nlri = link_nlri();
        nlri.remote_node = None;
        assert_eq!(
            build_ls_link(&ctx, &nlri),
            Err(ParserError::MissingRequiredDescriptor("remote node descriptor"))
        );

        let mut nlri = link_nlri();
        nlri.link = None;
        assert_eq!(
            build_ls_link(&ctx, &nlri),
            Err(ParserError::MissingRequiredDescriptor("link descriptor"))
        );
    }
}
