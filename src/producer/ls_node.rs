use itertools::Itertools;

use super::{ospf_area_id, require, BuildContext};
use crate::error::ParserError;
use crate::models::*;

pub(crate) fn build_ls_node(ctx: &BuildContext, nlri: &LinkStateNlri) -> Result<Record, ParserError> {
    let attrs = ctx.attrs();
    let local = require(nlri.local_node.as_ref(), "local node descriptor")?;

    let mut record = LsNode {
        header: ctx.header.clone(),
        protocol_id: u8::from(nlri.protocol_id),
        protocol: nlri.protocol_id.to_string(),
        domain_id: nlri.identifier,
        nexthop: attrs.nexthop.clone(),
        igp_router_id: local.igp_router_id.as_ref().map(|id| id.to_string()),
        ls_id: local.bgp_ls_identifier,
        asn: local.autonomous_system,
        ospf_area_id: local.ospf_area_id.map(ospf_area_id),
        bgp_router_id: local.bgp_router_id.map(|id| id.to_string()),
        as_path: attrs.as_path.clone(),
        med: attrs.med,
        ..Default::default()
    };

    if let Some(ls) = &attrs.link_state {
        record.router_id = ls.local_router_id(ctx.peer_ipv6);
        record.name = ls.node_name.clone();
        record.node_flags = ls.node_flags.map(|f| f.bits());
        record.isis_area_id = ls.isis_area_id.as_ref().map(hex::encode);
        if !ls.multi_topology_ids.is_empty() {
            record.mt_id = Some(ls.multi_topology_ids.iter().join(", "));
        }
        if !ls.node_msd.is_empty() {
            record.node_msd = Some(ls.node_msd.iter().join(", "));
        }
        record.sr_capabilities = ls.sr_capabilities.as_ref().map(|c| c.to_string());
        if !ls.sr_algorithms.is_empty() {
            record.sr_algorithm = Some(ls.sr_algorithms.iter().join(", "));
        }
        record.sr_local_block = ls.sr_local_block.as_ref().map(|c| c.to_string());
        record.srv6_capabilities_flags = ls.srv6_capabilities_flags;
    }

    Ok(Record::LsNode(record))
}
