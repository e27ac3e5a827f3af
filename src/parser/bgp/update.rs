//! Typed accessors over the attributes of one [Update].
//!
//! Every accessor decodes its attribute from the raw bytes when called. Nothing is cached,
//! so calling one twice does the work twice and returns the same answer.
use std::net::IpAddr;

use itertools::Itertools;

use crate::error::ParserError;
use crate::models::*;
use crate::parser::bgp::attributes::*;

impl Update {
    fn decode<T>(
        &self,
        attr_type: AttrType,
        decoder: impl FnOnce(bytes::Bytes) -> Result<T, ParserError>,
    ) -> Result<Option<T>, ParserError> {
        self.get(attr_type)
            .map(|attr| decoder(attr.raw.clone()))
            .transpose()
    }

    /// AS_PATH segments, AS numbers read 4 bytes wide when the session is AS4-capable.
    pub fn as_path_segments(&self, as4_capable: bool) -> Result<Vec<AsPathSegment>, ParserError> {
        let asn_len = AsnLength::from_as4_capable(as4_capable);
        Ok(self
            .decode(AttrType::AS_PATH, |raw| parse_as_path(raw, asn_len))?
            .unwrap_or_default())
    }

    /// AS numbers of AS_PATH, all segments flattened in wire order. Set members are neither
    /// deduplicated nor reordered. Empty when the attribute is absent.
    pub fn as_path(&self, as4_capable: bool) -> Result<Vec<u32>, ParserError> {
        Ok(flatten_segments(&self.as_path_segments(as4_capable)?))
    }

    pub fn as4_path_segments(&self) -> Result<Vec<AsPathSegment>, ParserError> {
        Ok(self
            .decode(AttrType::AS4_PATH, |raw| parse_as_path(raw, AsnLength::Bits32))?
            .unwrap_or_default())
    }

    /// AS numbers of AS4_PATH, always 4 bytes wide.
    pub fn as4_path(&self) -> Result<Vec<u32>, ParserError> {
        Ok(flatten_segments(&self.as4_path_segments()?))
    }

    /// The AS path a 4-byte speaker would see.
    ///
    /// On an AS4-capable session AS_PATH already carries 4-byte numbers and AS4_PATH is
    /// ignored. Otherwise the two are merged, see [merge_as4_path].
    pub fn effective_as_path(&self, as4_capable: bool) -> Result<Vec<AsPathSegment>, ParserError> {
        let as_path = self.as_path_segments(as4_capable)?;
        if as4_capable {
            return Ok(as_path);
        }
        Ok(merge_as4_path(&as_path, &self.as4_path_segments()?))
    }

    /// Effective AS path as space separated AS numbers, `None` when there is no AS path.
    pub fn as_path_string(&self, as4_capable: bool) -> Result<Option<String>, ParserError> {
        if !self.has(AttrType::AS_PATH) && !self.has(AttrType::AS4_PATH) {
            return Ok(None);
        }
        let path = flatten_segments(&self.effective_as_path(as4_capable)?);
        Ok(Some(path.iter().join(" ")))
    }

    pub fn communities(&self) -> Result<Vec<Community>, ParserError> {
        Ok(self
            .decode(AttrType::COMMUNITIES, parse_regular_communities)?
            .unwrap_or_default())
    }

    /// Communities rendered `high:low` and joined by `", "`. Empty when absent.
    pub fn community_string(&self) -> Result<String, ParserError> {
        Ok(self.communities()?.iter().join(", "))
    }

    pub fn ext_communities(&self) -> Result<Vec<ExtCommunity>, ParserError> {
        Ok(self
            .decode(AttrType::EXTENDED_COMMUNITIES, parse_extended_communities)?
            .unwrap_or_default())
    }

    pub fn ext_community_string(&self) -> Result<String, ParserError> {
        Ok(self.ext_communities()?.iter().join(", "))
    }

    pub fn mp_reach(&self) -> Result<Option<MpReachNlri>, ParserError> {
        self.decode(AttrType::MP_REACHABLE_NLRI, parse_mp_reach)
    }

    pub fn mp_unreach(&self) -> Result<Option<MpUnreachNlri>, ParserError> {
        self.decode(AttrType::MP_UNREACHABLE_NLRI, parse_mp_unreach)
    }

    pub fn med(&self) -> Result<Option<u32>, ParserError> {
        self.decode(AttrType::MULTI_EXIT_DISCRIMINATOR, parse_med)
    }

    pub fn origin(&self) -> Result<Option<Origin>, ParserError> {
        self.decode(AttrType::ORIGIN, parse_origin)
    }

    pub fn local_pref(&self) -> Result<Option<u32>, ParserError> {
        self.decode(AttrType::LOCAL_PREFERENCE, parse_local_pref)
    }

    /// Legacy NEXT_HOP (type 3).
    pub fn next_hop(&self) -> Result<Option<IpAddr>, ParserError> {
        self.decode(AttrType::NEXT_HOP, parse_next_hop)
    }

    /// BGP-LS attribute (type 29).
    pub fn link_state(&self) -> Result<Option<LinkStateAttribute>, ParserError> {
        self.decode(AttrType::BGP_LS_ATTRIBUTE, parse_link_state_attribute)
    }
}
