//! Attribute values every record of one update shares.
use std::net::IpAddr;

use itertools::Itertools;

use super::DecodeObserver;
use crate::error::ParserError;
use crate::models::*;

const EXT_TYPE_OPAQUE: u8 = 0x03;
const EXT_SUB_TYPE_ENCAPSULATION: u8 = 0x0c;
const TUNNEL_TYPE_VXLAN: u16 = 8;

/// Flat projection of an update's attributes, computed once and copied into each record.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct AttrProjection {
    pub nexthop: Option<String>,
    pub origin: Option<String>,
    pub as_path: Option<String>,
    pub as_path_count: Option<u32>,
    pub origin_as: Option<u32>,
    pub med: Option<u32>,
    pub local_pref: Option<u32>,
    pub community_list: Option<String>,
    pub ext_community_list: Option<String>,
    /// RFC 8365 encapsulation extended community announces VXLAN.
    pub vxlan: bool,
    pub link_state: Option<LinkStateAttribute>,
}

fn non_empty(s: String) -> Option<String> {
    match s.is_empty() {
        true => None,
        false => Some(s),
    }
}

/// Keep a decoded attribute value, or report the failure and leave the field unset.
fn decoded<T>(
    result: Result<T, ParserError>,
    attr_type: AttrType,
    observer: &dyn DecodeObserver,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            observer.attribute_failed(attr_type, &e);
            None
        }
    }
}

impl AttrProjection {
    /// Project the attributes read by records of `family`.
    ///
    /// Each attribute is decoded on its own: one that fails is reported to `observer` and
    /// left out, the others are still projected. `next_hop` is the next hop of the MP_REACH
    /// that carried the NLRI, the legacy NEXT_HOP attribute is used when it is absent. The
    /// BGP-LS attribute is only decoded for the BGP-LS family.
    pub fn from_update(
        update: &Update,
        as4_capable: bool,
        next_hop: Option<IpAddr>,
        family: NlriFamily,
        observer: &dyn DecodeObserver,
    ) -> AttrProjection {
        let nexthop = match next_hop {
            Some(addr) => Some(addr),
            None => decoded(update.next_hop(), AttrType::NEXT_HOP, observer).flatten(),
        };

        let as_path = decoded(
            update.effective_as_path(as4_capable),
            AttrType::AS_PATH,
            observer,
        );
        let (as_path, as_path_count, origin_as) =
            match (update.has(AttrType::AS_PATH) || update.has(AttrType::AS4_PATH), as_path) {
                (true, Some(segments)) => {
                    let asns = flatten_segments(&segments);
                    (
                        Some(asns.iter().join(" ")),
                        Some(asns.len() as u32),
                        asns.last().copied(),
                    )
                }
                _ => (None, None, None),
            };

        let ext_communities = decoded(
            update.ext_communities(),
            AttrType::EXTENDED_COMMUNITIES,
            observer,
        )
        .unwrap_or_default();
        let vxlan = ext_communities.iter().any(|ec| {
            ec.ec_type == EXT_TYPE_OPAQUE
                && ec.sub_type == EXT_SUB_TYPE_ENCAPSULATION
                && u16::from_be_bytes([ec.value[4], ec.value[5]]) == TUNNEL_TYPE_VXLAN
        });

        let link_state = match family {
            NlriFamily::BgpLs => {
                decoded(update.link_state(), AttrType::BGP_LS_ATTRIBUTE, observer).flatten()
            }
            _ => None,
        };

        AttrProjection {
            nexthop: nexthop.map(|a| a.to_string()),
            origin: decoded(update.origin(), AttrType::ORIGIN, observer)
                .flatten()
                .map(|o| o.to_string()),
            as_path,
            as_path_count,
            origin_as,
            med: decoded(update.med(), AttrType::MULTI_EXIT_DISCRIMINATOR, observer).flatten(),
            local_pref: decoded(update.local_pref(), AttrType::LOCAL_PREFERENCE, observer)
                .flatten(),
            community_list: decoded(update.community_string(), AttrType::COMMUNITIES, observer)
                .and_then(non_empty),
            ext_community_list: non_empty(ext_communities.iter().join(", ")),
            vxlan,
            link_state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::producer::NoopObserver;
    use bytes::Bytes;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FailedAttrs(Mutex<Vec<AttrType>>);

    impl DecodeObserver for FailedAttrs {
        fn attribute_failed(&self, attr_type: AttrType, _error: &ParserError) {
            self.0.lock().unwrap().push(attr_type);
        }
    }

    fn attr(t: u8, raw: &[u8]) -> PathAttribute {
        PathAttribute {
            flags: AttrFlags::TRANSITIVE,
            attr_type: AttrType::from(t),
            raw: Bytes::copy_from_slice(raw),
        }
    }

    fn project(update: &Update, family: NlriFamily) -> AttrProjection {
        AttrProjection::from_update(update, true, None, family, &NoopObserver)
    }

    #[test]
    fn test_projection() {
        let update = Update {
            attributes: vec![
                attr(1, &[0]),
                attr(2, &[2, 2, 0, 0, 0xfd, 0xe8, 0, 0, 0xfd, 0xe9]),
                attr(3, &[192, 0, 2, 1]),
                attr(4, &[0, 0, 0, 5]),
                attr(8, &[0, 10, 0, 10]),
                attr(16, &[0x03, 0x0c, 0, 0, 0, 0, 0, 8]),
            ],
        };
        let p = project(&update, NlriFamily::Ipv4Unicast);
        assert_eq!(p.nexthop.as_deref(), Some("192.0.2.1"));
        assert_eq!(p.origin.as_deref(), Some("igp"));
        assert_eq!(p.as_path.as_deref(), Some("65000 65001"));
        assert_eq!(p.as_path_count, Some(2));
        assert_eq!(p.origin_as, Some(65001));
        assert_eq!(p.med, Some(5));
        assert_eq!(p.local_pref, None);
        assert_eq!(p.community_list.as_deref(), Some("10:10"));
        assert!(p.vxlan);
    }

    #[test]
    fn test_empty_update() {
        let p = project(&Update::default(), NlriFamily::Ipv4Unicast);
        assert_eq!(p, AttrProjection::default());
    }

    #[test]
    fn test_mp_reach_next_hop_wins() {
        let update = Update {
            attributes: vec![attr(3, &[192, 0, 2, 1])],
        };
        let p = AttrProjection::from_update(
            &update,
            true,
            Some("2001:db8::1".parse().unwrap()),
            NlriFamily::Ipv6Unicast,
            &NoopObserver,
        );
        assert_eq!(p.nexthop.as_deref(), Some("2001:db8::1"));
    }

    #[test]
    fn test_bad_attribute_leaves_field_unset() {
        let update = Update {
            attributes: vec![
                attr(1, &[2]),
                attr(4, &[0, 0, 5]),
                attr(5, &[0, 0, 0, 100]),
            ],
        };
        let observer = FailedAttrs::default();
        let p = AttrProjection::from_update(
            &update,
            true,
            None,
            NlriFamily::Ipv4Unicast,
            &observer,
        );
        assert_eq!(p.med, None);
        assert_eq!(p.origin.as_deref(), Some("incomplete"));
        assert_eq!(p.local_pref, Some(100));
        assert_eq!(
            *observer.0.lock().unwrap(),
            vec![AttrType::MULTI_EXIT_DISCRIMINATOR]
        );
    }

    #[test]
    fn test_link_state_only_for_bgp_ls() {
        // node name TLV that is not UTF-8
        let update = Update {
            attributes: vec![attr(1, &[0]), attr(29, &[0x04, 0x02, 0x00, 0x01, 0xff])],
        };
        let observer = FailedAttrs::default();
        let p = AttrProjection::from_update(
            &update,
            true,
            None,
            NlriFamily::Ipv4Unicast,
            &observer,
        );
        assert_eq!(p.origin.as_deref(), Some("igp"));
        assert!(observer.0.lock().unwrap().is_empty());

        let p = AttrProjection::from_update(&update, true, None, NlriFamily::BgpLs, &observer);
        assert_eq!(p.link_state, None);
        assert_eq!(p.origin.as_deref(), Some("igp"));
        assert_eq!(
            *observer.0.lock().unwrap(),
            vec![AttrType::BGP_LS_ATTRIBUTE]
        );
    }
}
