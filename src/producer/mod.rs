/*!
Turns one decoded update into flat records and hands them to a sink.

A [Producer] holds the per-router context (router hash and address, AS4 and ADD-PATH
negotiation) and is cheap to clone. For each update it projects the shared attributes once,
walks every NLRI entry of the MP_REACH and MP_UNREACH payloads, and builds one record per
entry. Entries fail independently: a malformed entry yields one error and its siblings are
still built. An attribute that fails to decode is reported to the [DecodeObserver] and its
fields are left out of the records.

```
use bmp_ls_parser::models::*;
use bmp_ls_parser::parser::parse_attributes;
use bmp_ls_parser::{Producer, Published};

let attributes = bytes::Bytes::from_static(&[
    0x40, 0x01, 0x01, 0x00, // ORIGIN igp
    0x80, 0x0e, 0x0d, 0x00, 0x01, 0x01, 0x04, 192, 0, 2, 1, 0x00, 0x18, 10, 0, 130,
]);
let update = parse_attributes(attributes).unwrap();
let peer = PeerHeader::new(&[192, 0, 2, 1], false, 65000, 0).unwrap();

let mut sink: Vec<Published> = vec![];
let summary = Producer::new("r1").publish_update(&update, &peer, &mut sink).unwrap();
assert_eq!(summary.published, 1);
assert_eq!(sink[0].kind, RecordKind::UnicastPrefix);
```
*/
mod attrs;
mod evpn;
mod l3vpn;
mod ls_link;
mod ls_node;
mod ls_prefix;
mod ls_srv6_sid;
mod observer;
mod sink;
mod unicast;

pub use observer::*;
pub use sink::*;

use std::fmt::{Debug, Formatter};
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use bytes::Bytes;

use crate::error::ParserError;
use crate::models::*;
use crate::parser::{parse_attributes, parse_evpn_nlri, parse_link_state_nlri, parse_prefix_nlri};
use attrs::AttrProjection;

/// Per-update inputs shared by every record builder.
pub(crate) struct BuildContext<'a> {
    pub header: RecordHeader,
    attrs: &'a AttrProjection,
    pub peer_ipv6: bool,
}

impl<'a> BuildContext<'a> {
    pub fn attrs(&self) -> &'a AttrProjection {
        self.attrs
    }
}

pub(crate) fn require<T>(value: Option<T>, what: &'static str) -> Result<T, ParserError> {
    value.ok_or(ParserError::MissingRequiredDescriptor(what))
}

pub(crate) fn ospf_area_id(area: u32) -> String {
    Ipv4Addr::from(area).to_string()
}

#[derive(Clone)]
pub struct Producer {
    router_hash: String,
    router_ip: Option<IpAddr>,
    as4_capable: bool,
    add_path: bool,
    observer: Arc<dyn DecodeObserver>,
}

impl Debug for Producer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Producer")
            .field("router_hash", &self.router_hash)
            .field("router_ip", &self.router_ip)
            .field("as4_capable", &self.as4_capable)
            .field("add_path", &self.add_path)
            .finish_non_exhaustive()
    }
}

impl Producer {
    /// New producer for the router identified by `router_hash`, assuming a 4-octet AS
    /// capable session without ADD-PATH and logging through [LogObserver].
    pub fn new(router_hash: impl Into<String>) -> Producer {
        Producer {
            router_hash: router_hash.into(),
            router_ip: None,
            as4_capable: true,
            add_path: false,
            observer: Arc::new(LogObserver),
        }
    }

    pub fn with_router_ip(mut self, router_ip: IpAddr) -> Producer {
        self.router_ip = Some(router_ip);
        self
    }

    pub fn with_as4_capable(mut self, as4_capable: bool) -> Producer {
        self.as4_capable = as4_capable;
        self
    }

    /// Whether prefix NLRI carry a 4-byte path identifier (RFC 7911).
    ///
    /// Path identifiers are not detected from the NLRI bytes: on an ADD-PATH session this
    /// must be set, or every entry is misread.
    pub fn with_add_path(mut self, add_path: bool) -> Producer {
        self.add_path = add_path;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn DecodeObserver>) -> Producer {
        self.observer = observer;
        self
    }

    fn header(&self, action: Action, peer: &PeerHeader) -> RecordHeader {
        RecordHeader {
            action,
            router_hash: self.router_hash.clone(),
            router_ip: self.router_ip.map(|ip| ip.to_string()),
            peer_ip: peer.peer_ip.to_string(),
            peer_asn: peer.peer_asn,
            timestamp: peer.timestamp,
        }
    }

    /// Build records for one NLRI payload of the given AFI/SAFI.
    ///
    /// Unsupported families and BGP-LS NLRI types are reported to the observer and produce
    /// nothing. Attributes that fail to decode are reported and left out of the records.
    /// Announcements take their next hop from the update's MP_REACH when it carries the same
    /// AFI/SAFI.
    pub fn process(
        &self,
        action: Action,
        afi: u16,
        safi: u8,
        nlri: Bytes,
        update: &Update,
        peer: &PeerHeader,
    ) -> Vec<Result<Record, ParserError>> {
        let next_hop = match action {
            Action::Add => match update.mp_reach() {
                Ok(Some(reach)) if reach.afi == afi && reach.safi == safi => reach.next_hop_addr(),
                Ok(_) => None,
                Err(e) => {
                    self.observer.attribute_failed(AttrType::MP_REACHABLE_NLRI, &e);
                    None
                }
            },
            Action::Del => None,
        };
        self.process_nlri(action, afi, safi, nlri, next_hop, update, peer)
    }

    #[allow(clippy::too_many_arguments)]
    fn process_nlri(
        &self,
        action: Action,
        afi: u16,
        safi: u8,
        nlri: Bytes,
        next_hop: Option<IpAddr>,
        update: &Update,
        peer: &PeerHeader,
    ) -> Vec<Result<Record, ParserError>> {
        let family = match NlriFamily::from_afi_safi(afi, safi) {
            Ok(family) => family,
            Err(e) => {
                self.observer.skipped(&e);
                return vec![];
            }
        };
        self.observer.nlri_started(family, action);

        let attrs = AttrProjection::from_update(
            update,
            self.as4_capable,
            next_hop,
            family,
            self.observer.as_ref(),
        );
        let ctx = BuildContext {
            header: self.header(action, peer),
            attrs: &attrs,
            peer_ipv6: peer.is_ipv6(),
        };

        let results: Vec<Result<Record, ParserError>> = match family {
            NlriFamily::Ipv4Unicast
            | NlriFamily::Ipv6Unicast
            | NlriFamily::Ipv4LabeledUnicast
            | NlriFamily::Ipv6LabeledUnicast => {
                match parse_prefix_nlri(nlri, family, self.add_path) {
                    Ok(entries) => entries
                        .map(|e| e.and_then(|e| unicast::build_unicast_prefix(&ctx, &e, family.afi())))
                        .collect(),
                    Err(e) => vec![Err(e)],
                }
            }
            NlriFamily::Ipv4MplsVpn | NlriFamily::Ipv6MplsVpn => {
                match parse_prefix_nlri(nlri, family, self.add_path) {
                    Ok(entries) => entries
                        .map(|e| e.and_then(|e| l3vpn::build_l3vpn_prefix(&ctx, &e, family.afi())))
                        .collect(),
                    Err(e) => vec![Err(e)],
                }
            }
            NlriFamily::L2vpnEvpn => parse_evpn_nlri(nlri)
                .map(|r| r.and_then(|r| evpn::build_evpn_prefix(&ctx, &r)))
                .collect(),
            NlriFamily::BgpLs => parse_link_state_nlri(nlri)
                .map(|n| n.and_then(|n| build_link_state(&ctx, &n)))
                .collect(),
        };

        results
            .into_iter()
            .filter(|r| match r {
                Ok(record) => {
                    self.observer.record_built(record);
                    true
                }
                Err(e) if e.is_unsupported() => {
                    self.observer.skipped(e);
                    false
                }
                Err(e) => {
                    self.observer.record_failed(e);
                    true
                }
            })
            .collect()
    }

    /// Build records for everything an update announces (MP_REACH) and withdraws
    /// (MP_UNREACH), announcements first.
    pub fn process_update(
        &self,
        update: &Update,
        peer: &PeerHeader,
    ) -> Vec<Result<Record, ParserError>> {
        let mut records = vec![];
        match update.mp_reach() {
            Ok(Some(reach)) => {
                let next_hop = reach.next_hop_addr();
                records.extend(self.process_nlri(
                    Action::Add,
                    reach.afi,
                    reach.safi,
                    reach.nlri,
                    next_hop,
                    update,
                    peer,
                ))
            }
            Ok(None) => {}
            Err(e) => {
                self.observer.record_failed(&e);
                records.push(Err(e));
            }
        }
        match update.mp_unreach() {
            Ok(Some(unreach)) => records.extend(self.process_nlri(
                Action::Del,
                unreach.afi,
                unreach.safi,
                unreach.withdrawn,
                None,
                update,
                peer,
            )),
            Ok(None) => {}
            Err(e) => {
                self.observer.record_failed(&e);
                records.push(Err(e));
            }
        }
        records
    }

    /// Split a raw path attribute block and build its records.
    pub fn process_attributes(
        &self,
        data: Bytes,
        peer: &PeerHeader,
    ) -> Result<Vec<Result<Record, ParserError>>, ParserError> {
        let update = parse_attributes(data)?;
        self.observer.attributes_decoded(&update);
        Ok(self.process_update(&update, peer))
    }

    /// Build the update's records and publish each successful one, keyed by router hash.
    ///
    /// Stops at the first sink failure.
    pub fn publish_update<S: PublishSink>(
        &self,
        update: &Update,
        peer: &PeerHeader,
        sink: &mut S,
    ) -> Result<PublishSummary, S::Error> {
        let mut summary = PublishSummary::default();
        for result in self.process_update(update, peer) {
            match result {
                Ok(record) => {
                    sink.publish(&record, record.kind(), record.key())?;
                    summary.published += 1;
                }
                Err(_) => summary.failed += 1,
            }
        }
        Ok(summary)
    }
}

fn build_link_state(ctx: &BuildContext, nlri: &LinkStateNlri) -> Result<Record, ParserError> {
    match nlri.sub_type() {
        Some(LsSubType::Node) => ls_node::build_ls_node(ctx, nlri),
        Some(LsSubType::Link) => ls_link::build_ls_link(ctx, nlri),
        Some(LsSubType::Ipv4Prefix) | Some(LsSubType::Ipv6Prefix) => {
            ls_prefix::build_ls_prefix(ctx, nlri)
        }
        Some(LsSubType::Srv6Sid) => ls_srv6_sid::build_ls_srv6_sid(ctx, nlri),
        None => Err(ParserError::UnsupportedSubType {
            family: "link-state NLRI type",
            code: u16::from(nlri.nlri_type) as u32,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Counting {
        events: Mutex<Vec<String>>,
    }

    impl DecodeObserver for Counting {
        fn skipped(&self, error: &ParserError) {
            self.events.lock().unwrap().push(format!("skipped {}", error));
        }
        fn record_built(&self, record: &Record) {
            self.events.lock().unwrap().push(format!("built {}", record.kind()));
        }
        fn record_failed(&self, _error: &ParserError) {
            self.events.lock().unwrap().push("failed".to_string());
        }
        fn attribute_failed(&self, attr_type: AttrType, _error: &ParserError) {
            self.events
                .lock()
                .unwrap()
                .push(format!("attribute {:?}", attr_type));
        }
    }

    fn peer() -> PeerHeader {
        PeerHeader::new(&[192, 0, 2, 1], false, 65000, 1_700_000_000).unwrap()
    }

    fn attr(t: u8, raw: &[u8]) -> PathAttribute {
        PathAttribute {
            flags: AttrFlags::TRANSITIVE,
            attr_type: AttrType::from(t),
            raw: Bytes::copy_from_slice(raw),
        }
    }

    #[test]
    fn test_producer_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Producer>();
    }

    #[test]
    fn test_unsupported_family_is_skipped() {
        let observer = Arc::new(Counting::default());
        let producer = Producer::new("r1").with_observer(observer.clone());
        let records = producer.process(
            Action::Add,
            1,
            2,
            Bytes::from_static(&[24, 10, 0, 0]),
            &Update::default(),
            &peer(),
        );
        assert!(records.is_empty());
        let events = observer.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert!(events[0].starts_with("skipped"));
    }

    #[test]
    fn test_header_fields() {
        let producer = Producer::new("abcd").with_router_ip("10.0.0.1".parse().unwrap());
        let records = producer.process(
            Action::Del,
            1,
            1,
            Bytes::from_static(&[24, 10, 0, 130]),
            &Update::default(),
            &peer(),
        );
        let record = records[0].as_ref().unwrap();
        let header = record.header();
        assert_eq!(header.action, Action::Del);
        assert_eq!(header.router_hash, "abcd");
        assert_eq!(header.router_ip.as_deref(), Some("10.0.0.1"));
        assert_eq!(header.peer_ip, "192.0.2.1");
        assert_eq!(header.peer_asn, 65000);
        assert_eq!(header.timestamp, 1_700_000_000);
    }

    #[test]
    fn test_bad_attribute_keeps_records() {
        let update = Update {
            attributes: vec![attr(1, &[0]), attr(4, &[0, 0, 5])],
        };
        let observer = Arc::new(Counting::default());
        let producer = Producer::new("r1").with_observer(observer.clone());
        let records = producer.process(
            Action::Add,
            1,
            1,
            Bytes::from_static(&[24, 10, 0, 130, 16, 172, 16]),
            &update,
            &peer(),
        );
        assert_eq!(records.len(), 2);
        for record in &records {
            match record {
                Ok(Record::UnicastPrefix(r)) => {
                    assert_eq!(r.med, None);
                    assert_eq!(r.origin.as_deref(), Some("igp"));
                }
                other => panic!("unexpected {:?}", other),
            }
        }
        let events = observer.events.lock().unwrap();
        assert_eq!(events[0], "attribute MULTI_EXIT_DISCRIMINATOR");
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_process_update_actions() {
        let update = Update {
            attributes: vec![
                attr(14, &[0, 1, 1, 4, 192, 0, 2, 1, 0, 24, 10, 0, 130]),
                attr(15, &[0, 1, 1, 16, 172, 16]),
            ],
        };
        let records = Producer::new("r1").process_update(&update, &peer());
        assert_eq!(records.len(), 2);
        match (&records[0], &records[1]) {
            (Ok(Record::UnicastPrefix(add)), Ok(Record::UnicastPrefix(del))) => {
                assert_eq!(add.header.action, Action::Add);
                assert_eq!(add.prefix, "10.0.130.0");
                assert_eq!(add.nexthop.as_deref(), Some("192.0.2.1"));
                assert_eq!(del.header.action, Action::Del);
                assert_eq!(del.prefix, "172.16.0.0");
                assert_eq!(del.prefix_len, 16);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_link_state_type_is_skipped() {
        // NLRI type 5 (TE policy) has no record form
        let payload = Bytes::from_static(&[0, 5, 0, 9, 2, 0, 0, 0, 0, 0, 0, 0, 0]);
        let observer = Arc::new(Counting::default());
        let producer = Producer::new("r1").with_observer(observer.clone());
        let records = producer.process(
            Action::Add,
            16388,
            71,
            payload,
            &Update::default(),
            &peer(),
        );
        assert!(records.is_empty());
        assert!(observer.events.lock().unwrap()[0].starts_with("skipped"));
    }
}
