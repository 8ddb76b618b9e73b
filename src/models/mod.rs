//! Address math for the calculator.
//!
//! Pure functions over IPv4 addresses, masks and prefixes:
//! - [`ipv4`] - parsing and decimal/binary conversion
//! - [`mask`] - [`SubnetMask`], [`CidrPrefix`] and conversions between them
//! - [`class`] - legacy [`IpClass`] detection
//! - [`range`] - network id, broadcast and host range ([`NetworkRange`])
//! - [`reference`] - the common subnet reference table

mod class;
mod ipv4;
mod mask;
mod range;
mod reference;

// Re-export public types
pub use class::{classify, IpClass};
pub use ipv4::{parse_address, parse_binary, to_binary, MAX_LENGTH, OCTETS};
pub use mask::{cidr_to_mask, mask_to_cidr, mask_to_cidr_strict, CidrPrefix, SubnetMask};
pub use range::{broadcast, derive_range, network_id, NetworkRange};
pub use reference::{common_subnets, SubnetReference, COMMON_PREFIXES};
