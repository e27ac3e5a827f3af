//! Bit-length prefixed NLRI: plain unicast (RFC 4271), labeled unicast (RFC 8277) and
//! MPLS VPN (RFC 4364).
use bytes::{Buf, Bytes};

use crate::error::ParserError;
use crate::models::*;
use crate::parser::ReadUtils;

/// Decodes prefix entries one at a time, in wire order.
///
/// The wire format has no entry count: entries are read until the buffer is empty. An entry
/// that cannot be completed from the remaining bytes yields one error and ends the walk,
/// since there is no way to find where the next entry would start.
pub struct PrefixNlriIter {
    data: Bytes,
    afi: Afi,
    labeled: bool,
    vpn: bool,
    add_path: bool,
    done: bool,
}

impl PrefixNlriIter {
    pub fn new(data: Bytes, afi: Afi, labeled: bool, vpn: bool, add_path: bool) -> PrefixNlriIter {
        PrefixNlriIter {
            data,
            afi,
            labeled,
            vpn,
            add_path,
            done: false,
        }
    }

    fn read_entry(&mut self) -> Result<PrefixNlri, ParserError> {
        let path_id = match self.add_path {
            true => Some(self.data.read_u32()?),
            false => None,
        };
        let mut bits = self.data.read_u8()?;

        let mut labels = LabelStack::new();
        if self.labeled || self.vpn {
            loop {
                bits = bits.checked_sub(24).ok_or_else(|| {
                    ParserError::MalformedField(format!(
                        "prefix length {} too short for a label",
                        bits
                    ))
                })?;
                let (label, raw) = self.data.read_mpls_label()?;
                labels.push(label);
                if label.bottom_of_stack || raw == WITHDRAWN_LABEL {
                    break;
                }
            }
        }

        let rd = match self.vpn {
            true => {
                bits = bits.checked_sub(64).ok_or_else(|| {
                    ParserError::MalformedField(format!(
                        "prefix length {} too short for a route distinguisher",
                        bits
                    ))
                })?;
                Some(RouteDistinguisher(
                    self.data.read_array::<8>("route distinguisher")?,
                ))
            }
            false => None,
        };

        let max_bits = self.afi.max_prefix_len().unwrap_or(0);
        if bits > max_bits {
            return Err(ParserError::MalformedField(format!(
                "prefix length {} exceeds {} bits",
                bits, max_bits
            )));
        }
        let prefix = self
            .data
            .read_n_bytes(IpReachability::byte_len(bits), "ip prefix")?;

        Ok(PrefixNlri {
            path_id,
            labels,
            rd,
            prefix: IpReachability {
                length_in_bits: bits,
                prefix,
            },
        })
    }
}

impl Iterator for PrefixNlriIter {
    type Item = Result<PrefixNlri, ParserError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || !self.data.has_remaining() {
            return None;
        }
        let entry = self.read_entry();
        if entry.is_err() {
            self.done = true;
        }
        Some(entry)
    }
}

/// Decode the prefix entries of `data` for one of the unicast, labeled unicast or VPN
/// families. Other families yield [ParserError::UnsupportedSubType].
pub fn parse_prefix_nlri(
    data: Bytes,
    family: NlriFamily,
    add_path: bool,
) -> Result<PrefixNlriIter, ParserError> {
    let (labeled, vpn) = match family {
        NlriFamily::Ipv4Unicast | NlriFamily::Ipv6Unicast => (false, false),
        NlriFamily::Ipv4LabeledUnicast | NlriFamily::Ipv6LabeledUnicast => (true, false),
        NlriFamily::Ipv4MplsVpn | NlriFamily::Ipv6MplsVpn => (false, true),
        NlriFamily::L2vpnEvpn | NlriFamily::BgpLs => {
            return Err(ParserError::UnsupportedSubType {
                family: "prefix NLRI",
                code: ((u16::from(family.afi()) as u32) << 8) | u8::from(family.safi()) as u32,
            })
        }
    };
    Ok(PrefixNlriIter::new(data, family.afi(), labeled, vpn, add_path))
}
