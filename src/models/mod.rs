/*!
Plain data types shared by the decoders and the record producer.
*/
mod bgp;
mod network;
mod peer;
mod records;

pub use bgp::*;
pub use network::*;
pub use peer::*;
pub use records::*;
