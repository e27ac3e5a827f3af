use crate::error::ParserError;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::net::IpAddr;

/// AFI -- Address Family Identifier
///
/// <https://www.iana.org/assignments/address-family-numbers/address-family-numbers.xhtml>
#[derive(Debug, PartialEq, TryFromPrimitive, IntoPrimitive, Clone, Copy, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum Afi {
    Ipv4 = 1,
    Ipv6 = 2,
    L2vpn = 25,
    LinkState = 16388,
}

impl From<IpAddr> for Afi {
    #[inline]
    fn from(value: IpAddr) -> Self {
        match value {
            IpAddr::V4(_) => Afi::Ipv4,
            IpAddr::V6(_) => Afi::Ipv6,
        }
    }
}

impl Afi {
    /// Address width in bits for the IP families, `None` otherwise.
    pub const fn max_prefix_len(&self) -> Option<u8> {
        match self {
            Afi::Ipv4 => Some(32),
            Afi::Ipv6 => Some(128),
            Afi::L2vpn | Afi::LinkState => None,
        }
    }
}

/// SAFI -- Subsequent Address Family Identifier
///
/// <https://www.iana.org/assignments/safi-namespace/safi-namespace.xhtml>
#[derive(Debug, PartialEq, TryFromPrimitive, IntoPrimitive, Clone, Copy, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Safi {
    Unicast = 1,
    Multicast = 2,
    /// <https://datatracker.ietf.org/doc/html/rfc8277>
    MplsLabel = 4,
    /// <https://datatracker.ietf.org/doc/html/rfc7432>
    Evpn = 70,
    /// <https://datatracker.ietf.org/doc/html/rfc7752>
    LinkState = 71,
    /// <https://datatracker.ietf.org/doc/html/rfc4364>
    MplsVpn = 128,
}

/// The NLRI families this crate knows how to decode.
///
/// Every (AFI, SAFI) pair is mapped onto exactly one variant or rejected by
/// [NlriFamily::from_afi_safi], so dispatch sites can match exhaustively.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NlriFamily {
    Ipv4Unicast,
    Ipv6Unicast,
    Ipv4LabeledUnicast,
    Ipv6LabeledUnicast,
    Ipv4MplsVpn,
    Ipv6MplsVpn,
    L2vpnEvpn,
    BgpLs,
}

impl NlriFamily {
    pub fn from_afi_safi(afi: u16, safi: u8) -> Result<NlriFamily, ParserError> {
        let unsupported = || ParserError::UnsupportedSubType {
            family: "afi/safi",
            code: ((afi as u32) << 8) | safi as u32,
        };
        let afi = Afi::try_from(afi).map_err(|_| unsupported())?;
        let safi = Safi::try_from(safi).map_err(|_| unsupported())?;
        let family = match (afi, safi) {
            (Afi::Ipv4, Safi::Unicast) => NlriFamily::Ipv4Unicast,
            (Afi::Ipv6, Safi::Unicast) => NlriFamily::Ipv6Unicast,
            (Afi::Ipv4, Safi::MplsLabel) => NlriFamily::Ipv4LabeledUnicast,
            (Afi::Ipv6, Safi::MplsLabel) => NlriFamily::Ipv6LabeledUnicast,
            (Afi::Ipv4, Safi::MplsVpn) => NlriFamily::Ipv4MplsVpn,
            (Afi::Ipv6, Safi::MplsVpn) => NlriFamily::Ipv6MplsVpn,
            (Afi::L2vpn, Safi::Evpn) => NlriFamily::L2vpnEvpn,
            (Afi::LinkState, Safi::LinkState) => NlriFamily::BgpLs,
            _ => return Err(unsupported()),
        };
        Ok(family)
    }

    pub const fn afi(&self) -> Afi {
        match self {
            NlriFamily::Ipv4Unicast | NlriFamily::Ipv4LabeledUnicast | NlriFamily::Ipv4MplsVpn => {
                Afi::Ipv4
            }
            NlriFamily::Ipv6Unicast | NlriFamily::Ipv6LabeledUnicast | NlriFamily::Ipv6MplsVpn => {
                Afi::Ipv6
            }
            NlriFamily::L2vpnEvpn => Afi::L2vpn,
            NlriFamily::BgpLs => Afi::LinkState,
        }
    }

    pub const fn safi(&self) -> Safi {
        match self {
            NlriFamily::Ipv4Unicast | NlriFamily::Ipv6Unicast => Safi::Unicast,
            NlriFamily::Ipv4LabeledUnicast | NlriFamily::Ipv6LabeledUnicast => Safi::MplsLabel,
            NlriFamily::Ipv4MplsVpn | NlriFamily::Ipv6MplsVpn => Safi::MplsVpn,
            NlriFamily::L2vpnEvpn => Safi::Evpn,
            NlriFamily::BgpLs => Safi::LinkState,
        }
    }
}
