use super::BuildContext;
use crate::error::ParserError;
use crate::models::*;

/// VXLAN carries the 24-bit VNI in the whole label field (RFC 8365 section 5.1.3).
fn vni(label: &MplsLabel) -> u32 {
    MplsLabel::raw(label.to_bytes())
}

pub(crate) fn build_evpn_prefix(ctx: &BuildContext, route: &EvpnNlri) -> Result<Record, ParserError> {
    let attrs = ctx.attrs();
    let rd = route.rd().ok_or(ParserError::UnsupportedSubType {
        family: "EVPN route type",
        code: u8::from(route.route_type()) as u32,
    })?;

    let mut record = EvpnPrefix {
        header: ctx.header.clone(),
        route_type: u8::from(route.route_type()),
        rd: rd.to_string(),
        nexthop: attrs.nexthop.clone(),
        origin: attrs.origin.clone(),
        as_path: attrs.as_path.clone(),
        as_path_count: attrs.as_path_count,
        origin_as: attrs.origin_as,
        med: attrs.med,
        local_pref: attrs.local_pref,
        community_list: attrs.community_list.clone(),
        ext_community_list: attrs.ext_community_list.clone(),
        ..Default::default()
    };

    let first_label = match route {
        EvpnNlri::EthernetAutoDiscovery(r) => {
            record.esi = Some(r.esi.to_string());
            record.ethernet_tag = Some(r.ethernet_tag);
            record.labels = Some(vec![r.label.value]);
            Some(r.label)
        }
        EvpnNlri::MacIpAdvertisement(r) => {
            record.esi = Some(r.esi.to_string());
            record.ethernet_tag = Some(r.ethernet_tag);
            record.mac = Some(r.mac.to_string());
            record.ip = r.ip.map(|ip| ip.to_string());
            let mut labels = vec![r.label1.value];
            labels.extend(r.label2.map(|l| l.value));
            record.labels = Some(labels);
            Some(r.label1)
        }
        EvpnNlri::InclusiveMulticastEthernetTag(r) => {
            record.ethernet_tag = Some(r.ethernet_tag);
            record.originating_router_ip = Some(r.originating_router_ip.to_string());
            None
        }
        EvpnNlri::EthernetSegment(r) => {
            record.esi = Some(r.esi.to_string());
            record.originating_router_ip = Some(r.originating_router_ip.to_string());
            None
        }
        EvpnNlri::IpPrefix(r) => {
            record.esi = Some(r.esi.to_string());
            record.ethernet_tag = Some(r.ethernet_tag);
            record.prefix = Some(r.prefix.addr().to_string());
            record.prefix_len = Some(r.prefix.prefix_len());
            record.gw_ip = Some(r.gateway.to_string());
            record.labels = Some(vec![r.label.value]);
            Some(r.label)
        }
        EvpnNlri::Unknown { .. } => None,
    };

    if attrs.vxlan {
        record.vni = first_label.as_ref().map(vni);
    }

    Ok(Record::Evpn(record))
}
