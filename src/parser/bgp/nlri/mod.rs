//! NLRI decoders for the non link-state families.
mod evpn;
mod unicast;

pub use evpn::*;
pub use unicast::*;
