use super::unicast::label_values;
use super::{require, BuildContext};
use crate::error::ParserError;
use crate::models::*;

pub(crate) fn build_l3vpn_prefix(
    ctx: &BuildContext,
    entry: &PrefixNlri,
    afi: Afi,
) -> Result<Record, ParserError> {
    let attrs = ctx.attrs();
    let rd = require(entry.rd, "route distinguisher")?;
    let net = entry.prefix.to_ip_net(afi)?;
    Ok(Record::L3vpn(L3vpnPrefix {
        header: ctx.header.clone(),
        prefix: net.addr().to_string(),
        prefix_len: net.prefix_len(),
        rd: rd.to_string(),
        path_id: entry.path_id,
        nexthop: attrs.nexthop.clone(),
        labels: label_values(&entry.labels),
        origin: attrs.origin.clone(),
        as_path: attrs.as_path.clone(),
        as_path_count: attrs.as_path_count,
        origin_as: attrs.origin_as,
        med: attrs.med,
        local_pref: attrs.local_pref,
        community_list: attrs.community_list.clone(),
        ext_community_list: attrs.ext_community_list.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::producer::attrs::AttrProjection;
    use bytes::Bytes;
    use smallvec::smallvec;

    fn entry(rd: Option<RouteDistinguisher>) -> PrefixNlri {
        PrefixNlri {
            path_id: None,
            labels: smallvec![MplsLabel::from_bytes([0x00, 0x06, 0x41])],
            rd,
            prefix: IpReachability {
                length_in_bits: 64,
                prefix: Bytes::from_static(&[0x20, 0x01, 0x0d, 0xb8, 0, 1, 0, 0]),
            },
        }
    }

    #[test]
    fn test_vpn_prefix() {
        let attrs = AttrProjection::default();
        let ctx = BuildContext {
            header: RecordHeader::default(),
            attrs: &attrs,
            peer_ipv6: true,
        };
        let rd = RouteDistinguisher([0, 0, 0xfd, 0xe8, 0, 0, 0, 100]);
        let record = match build_l3vpn_prefix(&ctx, &entry(Some(rd)), Afi::Ipv6).unwrap() {
            Record::L3vpn(r) => r,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(record.rd, "65000:100");
        assert_eq!(record.prefix, "2001:db8:1::");
        assert_eq!(record.prefix_len, 64);
        assert_eq!(record.labels, Some(vec![100]));
    }

    #[test]
    fn test_missing_rd() {
        let attrs = AttrProjection::default();
        let ctx = BuildContext {
            header: RecordHeader::default(),
            attrs: &attrs,
            peer_ipv6: false,
        };
        assert_eq!(
            build_l3vpn_prefix(&ctx, &entry(None), Afi::Ipv6),
            Err(ParserError::MissingRequiredDescriptor("route distinguisher"))
        );
    }
}
