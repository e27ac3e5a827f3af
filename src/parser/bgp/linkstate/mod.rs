//! BGP-LS NLRI decoding, RFC 7752 section 3.2 and RFC 9514.
mod descriptors;
mod sub_tlvs;

pub use descriptors::*;
pub use sub_tlvs::*;

use bytes::{Buf, Bytes};

use crate::error::ParserError;
use crate::models::*;
use crate::parser::{ReadUtils, TlvIter};

/// Decode the body of one BGP-LS NLRI entry (everything after its type and length).
///
/// ```text
/// +-------------+------------+------------------+--------------------------+
/// | Protocol-ID | Identifier | Local Node (256) | Type specific descriptors |
/// | 1 octet     | 8 octets   | TLV              | TLVs                      |
/// +-------------+------------+------------------+--------------------------+
/// ```
///
/// Descriptor TLVs that do not belong to `nlri_type` are kept in
/// [LinkStateNlri::unknown_tlvs].
pub fn parse_link_state_nlri_value(
    nlri_type: NlriType,
    mut data: Bytes,
) -> Result<LinkStateNlri, ParserError> {
    data.require_n_remaining(9, "link-state NLRI header")?;
    let protocol_id = ProtocolId::from(data.get_u8());
    let identifier = data.get_u64();

    let mut nlri = LinkStateNlri::new(nlri_type, protocol_id, identifier);
    for tlv in TlvIter::new(data, "link-state descriptor") {
        let (tlv_type, value) = tlv?;
        match DescriptorType::from(tlv_type) {
            DescriptorType::LocalNodeDescriptors => {
                nlri.local_node = Some(parse_node_descriptor(value)?);
                continue;
            }
            DescriptorType::RemoteNodeDescriptors if nlri_type == NlriType::Link => {
                nlri.remote_node = Some(parse_node_descriptor(value)?);
                continue;
            }
            _ => {}
        }
        match nlri_type {
            NlriType::Link => {
                let link = nlri.link.get_or_insert_with(LinkDescriptor::default);
                parse_link_descriptor_tlv(link, tlv_type, value)?;
            }
            NlriType::Ipv4TopologyPrefix | NlriType::Ipv6TopologyPrefix => {
                let prefix = nlri.prefix.get_or_insert_with(PrefixDescriptor::default);
                parse_prefix_descriptor_tlv(prefix, tlv_type, value)?;
            }
            NlriType::Srv6Sid => {
                let sid = nlri.srv6_sid.get_or_insert_with(Srv6SidDescriptor::default);
                parse_srv6_sid_descriptor_tlv(sid, tlv_type, value)?;
            }
            _ => nlri.unknown_tlvs.push(Tlv::new(tlv_type, value.to_vec())),
        }
    }
    Ok(nlri)
}

/// Iterates the `{type: u16, length: u16, value}` entries of a BGP-LS NLRI payload.
///
/// Every entry is yielded independently: a malformed body yields an error for that entry
/// and the walk continues with the next one. An entry header or length running past the end
/// of the payload ends the walk with [ParserError::TruncatedInput]. Entries of an NLRI type
/// with no record counterpart yield [ParserError::UnsupportedSubType].
pub struct LinkStateNlriIter {
    entries: TlvIter,
}

impl LinkStateNlriIter {
    pub fn new(data: Bytes) -> LinkStateNlriIter {
        LinkStateNlriIter {
            entries: TlvIter::new(data, "link-state NLRI"),
        }
    }
}

impl Iterator for LinkStateNlriIter {
    type Item = Result<LinkStateNlri, ParserError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (raw_type, value) = match self.entries.next()? {
            Ok(entry) => entry,
            Err(e) => return Some(Err(e)),
        };
        let nlri_type = NlriType::from(raw_type);
        if LsSubType::from_nlri_type(nlri_type).is_none() {
            return Some(Err(ParserError::UnsupportedSubType {
                family: "link-state NLRI type",
                code: raw_type as u32,
            }));
        }
        Some(parse_link_state_nlri_value(nlri_type, value))
    }
}

/// Decode all BGP-LS NLRI entries of a payload, in wire order.
pub fn parse_link_state_nlri(data: Bytes) -> LinkStateNlriIter {
    LinkStateNlriIter::new(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::{BufMut, BytesMut};

    fn put_tlv(buf: &mut BytesMut, tlv_type: u16, value: &[u8]) {
        buf.put_u16(tlv_type);
        buf.put_u16(value.len() as u16);
        buf.put_slice(value);
    }

    fn node_descriptor(asn: u32, router_id: &[u8]) -> Vec<u8> {
        let mut buf = BytesMut::new();
        put_tlv(&mut buf, 512, &asn.to_be_bytes());
        put_tlv(&mut buf, 515, router_id);
        buf.to_vec()
    }

    fn nlri_body(protocol: u8, tlvs: &[(u16, Vec<u8>)]) -> Vec<u8> {
        let mut buf = BytesMut::new();
        buf.put_u8(protocol);
        buf.put_u64(0);
        for (t, v) in tlvs {
            put_tlv(&mut buf, *t, v);
        }
        buf.to_vec()
    }

    #[test]
    fn test_parse_node_nlri() {
        let mut payload = BytesMut::new();
        let body = nlri_body(2, &[(256, node_descriptor(65000, &[0, 0, 0, 0, 0, 1]))]);
        put_tlv(&mut payload, 1, &body);

        let nlris: Vec<_> = parse_link_state_nlri(payload.freeze())
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(nlris.len(), 1);
        let nlri = &nlris[0];
        assert_eq!(nlri.sub_type(), Some(LsSubType::Node));
        assert_eq!(nlri.protocol_id, ProtocolId::IsisL2);
        let local = nlri.local_node.as_ref().unwrap();
        assert_eq!(local.autonomous_system, Some(65000));
        assert!(nlri.remote_node.is_none());
    }

    #[test]
    fn test_parse_link_nlri_descriptor_scoped_mt_id() {
        let mut payload = BytesMut::new();
        let body = nlri_body(
            3,
            &[
                (256, node_descriptor(65000, &[10, 0, 0, 1])),
                (257, node_descriptor(65000, &[10, 0, 0, 2])),
                (259, vec![10, 1, 1, 1]),
                (263, vec![0x00, 0x02]),
            ],
        );
        put_tlv(&mut payload, 2, &body);
        let nlri = parse_link_state_nlri(payload.freeze())
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(nlri.sub_type(), Some(LsSubType::Link));
        assert_eq!(
            nlri.remote_node.unwrap().igp_router_id.unwrap().to_string(),
            "10.0.0.2"
        );
        let link = nlri.link.unwrap();
        assert_eq!(link.multi_topology_ids, vec![2]);
        assert!(nlri.prefix.is_none());
    }

    #[test]
    fn test_parse_prefix_nlri() {
        let mut payload = BytesMut::new();
        let body = nlri_body(
            3,
            &[
                (256, node_descriptor(65000, &[10, 0, 0, 1])),
                (264, vec![1]),
                (265, vec![24, 192, 168, 1]),
            ],
        );
        put_tlv(&mut payload, 3, &body);
        let nlri = parse_link_state_nlri(payload.freeze())
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(nlri.sub_type(), Some(LsSubType::Ipv4Prefix));
        let prefix = nlri.prefix.unwrap();
        assert_eq!(prefix.ospf_route_type, Some(1));
        assert_eq!(
            prefix
                .ip_reachability
                .unwrap()
                .to_ip_net(Afi::Ipv4)
                .unwrap()
                .to_string(),
            "192.168.1.0/24"
        );
    }

    #[test]
    fn test_unsupported_type_does_not_stop_the_walk() {
        let mut payload = BytesMut::new();
        put_tlv(&mut payload, 5, &[0u8; 9]);
        let body = nlri_body(1, &[(256, node_descriptor(1, &[0, 0, 0, 0, 0, 2]))]);
        put_tlv(&mut payload, 1, &body);

        let results: Vec<_> = parse_link_state_nlri(payload.freeze()).collect();
        assert_eq!(results.len(), 2);
        assert!(matches!(
            results[0],
            Err(ParserError::UnsupportedSubType { code: 5, .. })
        ));
        assert!(results[1].is_ok());
    }

    #[test]
    fn test_bad_entry_is_isolated() {
        let mut payload = BytesMut::new();
        // body shorter than protocol + identifier
        put_tlv(&mut payload, 1, &[2, 0, 0]);
        let body = nlri_body(2, &[(256, node_descriptor(1, &[0, 0, 0, 0, 0, 2]))]);
        put_tlv(&mut payload, 1, &body);
        // trailing entry that claims more than is left
        payload.put_slice(&[0, 1, 0, 40, 2]);

        let results: Vec<_> = parse_link_state_nlri(payload.freeze()).collect();
        assert_eq!(results.len(), 3);
        assert!(matches!(results[0], Err(ParserError::TruncatedInput { .. })));
        assert!(results[1].is_ok());
        assert!(matches!(results[2], Err(ParserError::TruncatedInput { .. })));
    }
}
