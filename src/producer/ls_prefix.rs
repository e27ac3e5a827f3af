use itertools::Itertools;

use super::{ospf_area_id, require, BuildContext};
use crate::error::ParserError;
use crate::models::*;

pub(crate) fn build_ls_prefix(ctx: &BuildContext, nlri: &LinkStateNlri) -> Result<Record, ParserError> {
    let attrs = ctx.attrs();
    let local = require(nlri.local_node.as_ref(), "local node descriptor")?;
    let descriptor = require(nlri.prefix.as_ref(), "prefix descriptor")?;
    let reachability = require(descriptor.ip_reachability.as_ref(), "ip reachability")?;

    let afi = match nlri.sub_type() {
        Some(LsSubType::Ipv6Prefix) => Afi::Ipv6,
        _ => Afi::Ipv4,
    };
    let net = reachability.to_ip_net(afi)?;

    let mut record = LsPrefix {
        header: ctx.header.clone(),
        protocol_id: u8::from(nlri.protocol_id),
        protocol: nlri.protocol_id.to_string(),
        domain_id: nlri.identifier,
        prefix: net.addr().to_string(),
        prefix_len: net.prefix_len(),
        nexthop: attrs.nexthop.clone(),
        igp_router_id: local.igp_router_id.as_ref().map(|id| id.to_string()),
        asn: local.autonomous_system,
        ls_id: local.bgp_ls_identifier,
        ospf_area_id: local.ospf_area_id.map(ospf_area_id),
        mt_id: descriptor.multi_topology_ids.first().copied(),
        ospf_route_type: descriptor.ospf_route_type,
        as_path: attrs.as_path.clone(),
        med: attrs.med,
        ..Default::default()
    };

    if let Some(ls) = &attrs.link_state {
        record.router_id = ls.local_router_id(ctx.peer_ipv6);
        record.igp_flags = ls.igp_flags;
        if !ls.route_tags.is_empty() {
            record.route_tags = Some(ls.route_tags.iter().join(", "));
        }
        record.prefix_metric = ls.prefix_metric;
        record.prefix_attr_flags = ls.prefix_attr_flags;
        if let Some(sid) = &ls.prefix_sid {
            record.prefix_sid_flags = Some(sid.flags);
            record.prefix_sid_algorithm = Some(sid.algorithm);
            record.prefix_sid = Some(sid.sid.clone());
            record.prefix_sid_value = sid_value(&sid.sid);
        }
        if let Some(locator) = &ls.srv6_locator {
            record.srv6_locator_flags = Some(locator.flags);
            record.srv6_locator_algorithm = Some(locator.algorithm);
            record.srv6_locator_metric = Some(locator.metric);
        }
    }

    Ok(Record::LsPrefix(record))
}
