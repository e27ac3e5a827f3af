/*!
Provides parsing of the BGP UPDATE pieces: path attributes, BGP-LS NLRI and the other
NLRI families.
*/
pub mod attributes;
pub mod linkstate;
pub mod nlri;
mod update;

pub use attributes::parse_attributes;
pub use linkstate::parse_link_state_nlri;
pub use nlri::{parse_evpn_nlri, parse_prefix_nlri};
