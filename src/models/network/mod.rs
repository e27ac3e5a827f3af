//! Common network-related structs.

mod afi;
mod label;
mod prefix;

pub use afi::*;
pub use label::*;
pub use prefix::*;
