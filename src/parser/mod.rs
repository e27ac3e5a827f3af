/*!
parser module maintains the wire decoders.
*/
pub mod bgp;
pub mod utils;

pub use self::utils::*;
pub use bgp::attributes::*;
pub use bgp::linkstate::*;
pub use bgp::nlri::*;
