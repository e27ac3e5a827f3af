//! Canonical output records.
//!
//! Every record is flat: the shared [RecordHeader] is flattened into it on serialization and
//! each remaining field is an unsigned integer, a string, a list of those, or absent. Absent
//! fields are left out of the serialized form.
use std::fmt::{Display, Formatter};

/// Whether a record announces or withdraws what it describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Action {
    #[default]
    Add,
    Del,
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Add => write!(f, "add"),
            Action::Del => write!(f, "del"),
        }
    }
}

/// Fields every record carries: who produced it and which peer it came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RecordHeader {
    pub action: Action,
    pub router_hash: String,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub router_ip: Option<String>,
    pub peer_ip: String,
    pub peer_asn: u32,
    pub timestamp: u64,
}

macro_rules! define_record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(req $req:ident: $req_ty:ty,)*
            $(opt $opt:ident: $opt_ty:ty,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize))]
        pub struct $name {
            #[cfg_attr(feature = "serde", serde(flatten))]
            pub header: RecordHeader,
            $(pub $req: $req_ty,)*
            $(
                #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
                pub $opt: Option<$opt_ty>,
            )*
        }
    };
}

define_record! {
    /// A plain or labeled unicast prefix.
    pub struct UnicastPrefix {
        req prefix: String,
        req prefix_len: u8,
        opt path_id: u32,
        opt nexthop: String,
        opt labels: Vec<u32>,
        opt origin: String,
        opt as_path: String,
        opt as_path_count: u32,
        opt origin_as: u32,
        opt med: u32,
        opt local_pref: u32,
        opt community_list: String,
        opt ext_community_list: String,
    }
}

define_record! {
    /// An L3VPN (RFC 4364) prefix.
    pub struct L3vpnPrefix {
        req prefix: String,
        req prefix_len: u8,
        req rd: String,
        opt path_id: u32,
        opt nexthop: String,
        opt labels: Vec<u32>,
        opt origin: String,
        opt as_path: String,
        opt as_path_count: u32,
        opt origin_as: u32,
        opt med: u32,
        opt local_pref: u32,
        opt community_list: String,
        opt ext_community_list: String,
    }
}

define_record! {
    /// One EVPN route of any supported type.
    pub struct EvpnPrefix {
        req route_type: u8,
        req rd: String,
        opt esi: String,
        opt ethernet_tag: u32,
        opt mac: String,
        opt ip: String,
        opt prefix: String,
        opt prefix_len: u8,
        opt gw_ip: String,
        opt originating_router_ip: String,
        opt labels: Vec<u32>,
        opt vni: u32,
        opt nexthop: String,
        opt origin: String,
        opt as_path: String,
        opt as_path_count: u32,
        opt origin_as: u32,
        opt med: u32,
        opt local_pref: u32,
        opt community_list: String,
        opt ext_community_list: String,
    }
}

define_record! {
    /// BGP-LS node.
    pub struct LsNode {
        req protocol_id: u8,
        req protocol: String,
        req domain_id: u64,
        opt nexthop: String,
        opt igp_router_id: String,
        opt ls_id: u32,
        opt asn: u32,
        opt ospf_area_id: String,
        opt bgp_router_id: String,
        opt router_id: String,
        opt name: String,
        opt node_flags: u8,
        opt isis_area_id: String,
        opt mt_id: String,
        opt node_msd: String,
        opt sr_capabilities: String,
        opt sr_algorithm: String,
        opt sr_local_block: String,
        opt srv6_capabilities_flags: u16,
        opt as_path: String,
        opt med: u32,
    }
}

define_record! {
    /// BGP-LS link.
    pub struct LsLink {
        req protocol_id: u8,
        req protocol: String,
        req domain_id: u64,
        opt nexthop: String,
        opt igp_router_id: String,
        opt local_node_asn: u32,
        opt ls_id: u32,
        opt ospf_area_id: String,
        opt remote_igp_router_id: String,
        opt remote_node_asn: u32,
        opt local_link_id: u32,
        opt remote_link_id: u32,
        opt local_link_ip: String,
        opt remote_link_ip: String,
        opt mt_id: u16,
        opt router_id: String,
        opt remote_router_id: String,
        opt admin_group: u32,
        opt max_link_bw: u64,
        opt max_resv_bw: u64,
        opt unresv_bw: String,
        opt te_default_metric: u32,
        opt igp_metric: u32,
        opt srlg: String,
        opt link_name: String,
        opt adjacency_sids: String,
        opt link_msd: String,
        opt unidirectional_link_delay: u32,
        opt as_path: String,
        opt med: u32,
    }
}

define_record! {
    /// BGP-LS IPv4 or IPv6 prefix.
    pub struct LsPrefix {
        req protocol_id: u8,
        req protocol: String,
        req domain_id: u64,
        req prefix: String,
        req prefix_len: u8,
        opt nexthop: String,
        opt igp_router_id: String,
        opt asn: u32,
        opt ls_id: u32,
        opt ospf_area_id: String,
        opt router_id: String,
        opt mt_id: u16,
        opt ospf_route_type: u8,
        opt igp_flags: u8,
        opt route_tags: String,
        opt prefix_metric: u32,
        opt prefix_attr_flags: u8,
        opt prefix_sid_flags: u8,
        opt prefix_sid_algorithm: u8,
        opt prefix_sid: Vec<u8>,
        opt prefix_sid_value: u32,
        opt srv6_locator_flags: u8,
        opt srv6_locator_algorithm: u8,
        opt srv6_locator_metric: u32,
        opt as_path: String,
        opt med: u32,
    }
}

define_record! {
    /// BGP-LS SRv6 SID.
    pub struct LsSrv6Sid {
        req protocol_id: u8,
        req protocol: String,
        req domain_id: u64,
        req srv6_sid: String,
        opt nexthop: String,
        opt igp_router_id: String,
        opt asn: u32,
        opt ls_id: u32,
        opt ospf_area_id: String,
        opt router_id: String,
        opt mt_id: u16,
        opt endpoint_behavior: u16,
        opt endpoint_flags: u8,
        opt endpoint_algorithm: u8,
        opt sid_structure: String,
        opt as_path: String,
        opt med: u32,
    }
}

/// Which record family a [Record] belongs to, used by sinks to route it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecordKind {
    UnicastPrefix,
    L3vpn,
    Evpn,
    LsNode,
    LsLink,
    LsPrefix,
    LsSrv6Sid,
}

impl RecordKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            RecordKind::UnicastPrefix => "unicast_prefix",
            RecordKind::L3vpn => "l3vpn",
            RecordKind::Evpn => "evpn",
            RecordKind::LsNode => "ls_node",
            RecordKind::LsLink => "ls_link",
            RecordKind::LsPrefix => "ls_prefix",
            RecordKind::LsSrv6Sid => "ls_srv6_sid",
        }
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Record {
    UnicastPrefix(UnicastPrefix),
    L3vpn(L3vpnPrefix),
    Evpn(EvpnPrefix),
    LsNode(LsNode),
    LsLink(LsLink),
    LsPrefix(LsPrefix),
    LsSrv6Sid(LsSrv6Sid),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::UnicastPrefix(_) => RecordKind::UnicastPrefix,
            Record::L3vpn(_) => RecordKind::L3vpn,
            Record::Evpn(_) => RecordKind::Evpn,
            Record::LsNode(_) => RecordKind::LsNode,
            Record::LsLink(_) => RecordKind::LsLink,
            Record::LsPrefix(_) => RecordKind::LsPrefix,
            Record::LsSrv6Sid(_) => RecordKind::LsSrv6Sid,
        }
    }

    pub fn header(&self) -> &RecordHeader {
        match self {
            Record::UnicastPrefix(r) => &r.header,
            Record::L3vpn(r) => &r.header,
            Record::Evpn(r) => &r.header,
            Record::LsNode(r) => &r.header,
            Record::LsLink(r) => &r.header,
            Record::LsPrefix(r) => &r.header,
            Record::LsSrv6Sid(r) => &r.header,
        }
    }

    /// Publishing key: the router hash as raw bytes.
    pub fn key(&self) -> &[u8] {
        self.header().router_hash.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_kind_and_key() {
        let record = Record::LsNode(LsNode {
            header: RecordHeader {
                router_hash: "abc".to_string(),
                ..Default::default()
            },
            ..Default::default()
        });
        assert_eq!(record.kind(), RecordKind::LsNode);
        assert_eq!(record.kind().to_string(), "ls_node");
        assert_eq!(record.key(), b"abc");
        assert_eq!(record.header().action, Action::Add);
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_absent_fields_are_omitted() {
        let record = UnicastPrefix {
            header: RecordHeader {
                action: Action::Del,
                router_hash: "r1".to_string(),
                router_ip: None,
                peer_ip: "192.0.2.1".to_string(),
                peer_asn: 65000,
                timestamp: 1,
            },
            prefix: "10.0.130.0".to_string(),
            prefix_len: 24,
            med: Some(10),
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["action"], "del");
        assert_eq!(value["peer_ip"], "192.0.2.1");
        assert_eq!(value["prefix_len"], 24);
        assert_eq!(value["med"], 10);
        assert!(value.get("router_ip").is_none());
        assert!(value.get("as_path").is_none());
        assert!(value.get("header").is_none());
    }
}
