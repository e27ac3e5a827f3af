/*!
bmp-ls-parser decodes the BGP payload of BMP route-monitoring messages into flat records.

The decoding core covers:
- BGP path attributes, split lazily and decoded on demand ([parser::parse_attributes]);
- unicast, labeled unicast and L3VPN prefixes ([parser::parse_prefix_nlri]);
- EVPN routes of types 1 to 5 ([parser::parse_evpn_nlri]);
- BGP-LS node, link, prefix and SRv6 SID NLRI with their descriptors and the BGP-LS
  attribute ([parser::parse_link_state_nlri], [parser::parse_link_state_attribute]).

A [Producer] ties these together: given one update and its peer header it builds
[models::Record]s and hands them to a [PublishSink].

BMP framing and transport are out of scope; callers pass in the attribute block and the
per-peer header fields they already extracted.
*/

pub mod error;
pub mod models;
pub mod parser;
pub mod producer;

pub use error::ParserError;
pub use producer::*;
