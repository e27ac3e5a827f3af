use super::BuildContext;
use crate::error::ParserError;
use crate::models::*;

pub(crate) fn label_values(labels: &LabelStack) -> Option<Vec<u32>> {
    match labels.is_empty() {
        true => None,
        false => Some(labels.iter().map(|l| l.value).collect()),
    }
}

pub(crate) fn build_unicast_prefix(
    ctx: &BuildContext,
    entry: &PrefixNlri,
    afi: Afi,
) -> Result<Record, ParserError> {
    let attrs = ctx.attrs();
    let net = entry.prefix.to_ip_net(afi)?;
    Ok(Record::UnicastPrefix(UnicastPrefix {
        header: ctx.header.clone(),
        prefix: net.addr().to_string(),
        prefix_len: net.prefix_len(),
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

    #[test]
    fn test_labeled_prefix() {
        let attrs = AttrProjection {
            nexthop: Some("192.0.2.1".to_string()),
            med: Some(5),
            ..Default::default()
        };
        let ctx = BuildContext {
            header: RecordHeader::default(),
            attrs: &attrs,
            peer_ipv6: false,
        };
        let entry = PrefixNlri {
            path_id: Some(7),
            labels: smallvec![MplsLabel::from_bytes([0x00, 0x00, 0x31])],
            rd: None,
            prefix: IpReachability {
                length_in_bits: 24,
                prefix: Bytes::from_static(&[10, 0, 130]),
            },
        };
        let record = match build_unicast_prefix(&ctx, &entry, Afi::Ipv4).unwrap() {
            Record::UnicastPrefix(r) => r,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(record.prefix, "10.0.130.0");
        assert_eq!(record.prefix_len, 24);
        assert_eq!(record.path_id, Some(7));
        assert_eq!(record.labels, Some(vec![3]));
        assert_eq!(record.nexthop.as_deref(), Some("192.0.2.1"));
        assert_eq!(record.med, Some(5));
        assert_eq!(record.as_path, None);
    }
}
