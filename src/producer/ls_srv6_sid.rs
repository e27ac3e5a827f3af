use super::{ospf_area_id, require, BuildContext};
use crate::error::ParserError;
use crate::models::*;

pub(crate) fn build_ls_srv6_sid(
    ctx: &BuildContext,
    nlri: &LinkStateNlri,
) -> Result<Record, ParserError> {
    let attrs = ctx.attrs();
    let local = require(nlri.local_node.as_ref(), "local node descriptor")?;
    let descriptor = require(nlri.srv6_sid.as_ref(), "srv6 sid information")?;
    let sid = require(descriptor.srv6_sid, "srv6 sid information")?;

    let mut record = LsSrv6Sid {
        header: ctx.header.clone(),
        protocol_id: u8::from(nlri.protocol_id),
        protocol: nlri.protocol_id.to_string(),
        domain_id: nlri.identifier,
        srv6_sid: sid.to_string(),
        nexthop: attrs.nexthop.clone(),
        igp_router_id: local.igp_router_id.as_ref().map(|id| id.to_string()),
        asn: local.autonomous_system,
        ls_id: local.bgp_ls_identifier,
        ospf_area_id: local.ospf_area_id.map(ospf_area_id),
        mt_id: descriptor.multi_topology_ids.first().copied(),
        as_path: attrs.as_path.clone(),
        med: attrs.med,
        ..Default::default()
    };

    if let Some(ls) = &attrs.link_state {
        record.router_id = ls.local_router_id(ctx.peer_ipv6);
        if let Some(endpoint) = &ls.srv6_endpoint_behavior {
            record.endpoint_behavior = Some(endpoint.behavior);
            record.endpoint_flags = Some(endpoint.flags);
            record.endpoint_algorithm = Some(endpoint.algorithm);
        }
        record.sid_structure = ls.srv6_sid_structure.map(|s| {
            format!(
                "{}:{}:{}:{}",
                s.locator_block_len, s.locator_node_len, s.function_len, s.argument_len
            )
        });
    }

    Ok(Record::LsSrv6Sid(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::producer::attrs::AttrProjection;

    #[test]
    fn test_srv6_sid_record() {
        let mut nlri = LinkStateNlri::new(NlriType::Srv6Sid, ProtocolId::IsisL2, 0);
        nlri.local_node = Some(NodeDescriptor {
            autonomous_system: Some(65000),
            ..Default::default()
        });
        nlri.srv6_sid = Some(Srv6SidDescriptor {
            multi_topology_ids: vec![2],
            srv6_sid: Some("fc00:0:1:e000::".parse().unwrap()),
            ..Default::default()
        });
        let attrs = AttrProjection {
            link_state: Some(LinkStateAttribute {
                srv6_endpoint_behavior: Some(Srv6EndpointBehavior {
                    behavior: 48,
                    flags: 0,
                    algorithm: 0,
                }),
                srv6_sid_structure: Some(Srv6SidStructure {
                    locator_block_len: 32,
                    locator_node_len: 16,
                    function_len: 16,
                    argument_len: 0,
                }),
                ..Default::default()
            }),
            ..Default::default()
        };
        let ctx = BuildContext {
            header: RecordHeader::default(),
            attrs: &attrs,
            peer_ipv6: true,
        };
        let record = match build_ls_srv6_sid(&ctx, &nlri).unwrap() {
            Record::LsSrv6Sid(r) => r,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(record.srv6_sid, "fc00:0:1:e000::");
        assert_eq!(record.mt_id, Some(2));
        assert_eq!(record.endpoint_behavior, Some(48));
        assert_eq!(record.sid_structure.as_deref(), Some("32:16:16:0"));
    }

    #[test]
    fn test_missing_sid() {
        let mut nlri = LinkStateNlri::new(NlriType::Srv6Sid, ProtocolId::IsisL2, 0);
        nlri.local_node = Some(NodeDescriptor::default());
        let attrs = AttrProjection::default();
        let ctx = BuildContext {
            header: RecordHeader::default(),
            attrs: &attrs,
            peer_ipv6: false,
        };
        assert_eq!(
            build_ls_srv6_sid(&ctx, &nlri),
            Err(ParserError::MissingRequiredDescriptor("srv6 sid information"))
        );
    }
}
