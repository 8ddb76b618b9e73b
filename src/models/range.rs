//! Network, broadcast and host range of an address inside a prefix.

use super::mask::{CidrPrefix, SubnetMask};
use crate::error::Result;
use std::net::Ipv4Addr;

/// Prefixes from this length on have no host range between network and broadcast.
const NO_HOST_RANGE_FROM: u8 = 31;

/// Everything the network calculator shows for an address and a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkRange {
    /// The address the range was derived from.
    pub address: Ipv4Addr,
    pub prefix: CidrPrefix,
    pub subnet_mask: SubnetMask,
    pub network_id: Ipv4Addr,
    pub broadcast: Ipv4Addr,
    /// Network id with the last octet plus one. `None` for /31 and /32.
    pub first_host: Option<Ipv4Addr>,
    /// Broadcast with the last octet minus one. `None` for /31 and /32.
    pub last_host: Option<Ipv4Addr>,
    /// `2^(32 - prefix) - 2`, so 0 for /31 and -1 for /32.
    pub total_hosts: i64,
}

/// Bitwise AND of address and mask.
pub fn network_id(addr: Ipv4Addr, mask: SubnetMask) -> Ipv4Addr {
    Ipv4Addr::from(u32::from(addr) & mask.bits())
}

/// Network id ORed with the inverted mask, i.e. `octet | (255 - mask_octet)`.
pub fn broadcast(network_id: Ipv4Addr, mask: SubnetMask) -> Ipv4Addr {
    Ipv4Addr::from(u32::from(network_id) | !mask.bits())
}

/// Move the last octet by `delta`, refusing to leave `0..=255`.
fn step_last_octet(addr: Ipv4Addr, delta: i8) -> Option<Ipv4Addr> {
    let mut octets = addr.octets();
    octets[3] = octets[3].checked_add_signed(delta)?;
    Some(Ipv4Addr::from(octets))
}

/// Compute the [`NetworkRange`] for `addr` inside a `/len` network.
///
/// # Examples
/// ```
/// use ipv4_network_calculator::models::derive_range;
/// use std::net::Ipv4Addr;
/// let range = derive_range(Ipv4Addr::new(192, 168, 1, 77), 24).unwrap();
/// assert_eq!(range.network_id, Ipv4Addr::new(192, 168, 1, 0));
/// assert_eq!(range.total_hosts, 254);
/// ```
pub fn derive_range(addr: Ipv4Addr, len: u8) -> Result<NetworkRange> {
    let prefix = CidrPrefix::new(len)?;
    let subnet_mask = prefix.mask();
    let network_id = network_id(addr, subnet_mask);
    let broadcast = broadcast(network_id, subnet_mask);

    let (first_host, last_host) = if len >= NO_HOST_RANGE_FROM {
        log::debug!("derive_range({addr}/{len}) has no host range");
        (None, None)
    } else {
        (
            step_last_octet(network_id, 1),
            step_last_octet(broadcast, -1),
        )
    };

    Ok(NetworkRange {
        address: addr,
        prefix,
        subnet_mask,
        network_id,
        broadcast,
        first_host,
        last_host,
        total_hosts: prefix.total_hosts(),
    })
}
