//! BGP-related data structures.

pub mod aspath;
pub mod attributes;
pub mod community;
pub mod evpn;
pub mod linkstate;
pub mod nlri;

pub use aspath::*;
pub use attributes::*;
pub use community::*;
pub use evpn::*;
pub use linkstate::*;
pub use nlri::*;
