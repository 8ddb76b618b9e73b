//! Subnet masks and CIDR prefixes.

use super::ipv4::{parse_address, MAX_LENGTH};
use crate::error::{Error, Result};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// A CIDR prefix length in `0..=32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CidrPrefix(u8);

impl CidrPrefix {
    /// Create a prefix, rejecting lengths above 32.
    pub fn new(len: u8) -> Result<CidrPrefix> {
        if len > MAX_LENGTH {
            Err(Error::Range(format!(
                "CIDR prefix /{len} must be between 0 and {MAX_LENGTH}"
            )))
        } else {
            Ok(CidrPrefix(len))
        }
    }

    /// The prefix length in bits.
    pub fn length(self) -> u8 {
        self.0
    }

    /// The mask with `len` leading one bits.
    pub fn mask(self) -> SubnetMask {
        let right_len = MAX_LENGTH - self.0;
        let all_bits = u32::MAX as u64;
        let mask = (all_bits >> right_len) << right_len;
        SubnetMask(Ipv4Addr::from(mask as u32))
    }

    /// Number of addresses covered by the prefix, `2^(32 - len)`.
    pub fn block_size(self) -> u64 {
        1u64 << (MAX_LENGTH - self.0)
    }

    /// `2^(32 - len) - 2`, reserving the network and broadcast addresses.
    ///
    /// Not clamped: a /31 gives 0 and a /32 gives -1.
    pub fn total_hosts(self) -> i64 {
        self.block_size() as i64 - 2
    }
}

impl fmt::Display for CidrPrefix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "/{}", self.0)
    }
}

impl FromStr for CidrPrefix {
    type Err = Error;

    /// Accepts `24` or `/24`, with surrounding whitespace.
    fn from_str(s: &str) -> Result<CidrPrefix> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('/').unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidFormat(format!(
                "CIDR '{trimmed}' is not a number"
            )));
        }
        let len: u32 = digits.parse().map_err(|_| {
            Error::Range(format!("CIDR {digits} must be between 0 and {MAX_LENGTH}"))
        })?;
        let len = u8::try_from(len).map_err(|_| {
            Error::Range(format!("CIDR {len} must be between 0 and {MAX_LENGTH}"))
        })?;
        CidrPrefix::new(len)
    }
}

/// A dotted subnet mask such as `255.255.255.0`.
///
/// Any address is accepted as a mask. Use [`SubnetMask::is_contiguous`] or
/// [`mask_to_cidr_strict`] when the ones-then-zeros shape matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubnetMask(Ipv4Addr);

impl SubnetMask {
    /// Wrap an address as a mask without validation.
    pub fn new(addr: Ipv4Addr) -> SubnetMask {
        SubnetMask(addr)
    }

    /// Parse dotted decimal mask text.
    pub fn parse(text: &str) -> Result<SubnetMask> {
        parse_address(text).map(SubnetMask)
    }

    /// The mask as a dotted address.
    pub fn addr(self) -> Ipv4Addr {
        self.0
    }

    /// All 32 mask bits, first octet in the high byte.
    pub fn bits(self) -> u32 {
        u32::from(self.0)
    }

    /// True when no zero bit precedes a one bit across all 32 bits.
    pub fn is_contiguous(self) -> bool {
        let bits = self.bits();
        bits.leading_ones() + bits.trailing_zeros() == MAX_LENGTH as u32
    }
}

impl fmt::Display for SubnetMask {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Convert a prefix length to a subnet mask.
///
/// # Examples
/// ```
/// use ipv4_network_calculator::models::cidr_to_mask;
/// assert_eq!(cidr_to_mask(24).unwrap().to_string(), "255.255.255.0");
/// assert!(cidr_to_mask(33).is_err());
/// ```
pub fn cidr_to_mask(len: u8) -> Result<SubnetMask> {
    Ok(CidrPrefix::new(len)?.mask())
}

/// Count the one bits of every octet and add them up.
///
/// The bits do not have to be contiguous: `255.0.255.0` yields /16.
pub fn mask_to_cidr(mask: SubnetMask) -> CidrPrefix {
    let ones: u32 = mask.addr().octets().iter().map(|o| o.count_ones()).sum();
    CidrPrefix(ones as u8)
}

/// Like [`mask_to_cidr`] but rejects masks whose one bits are not contiguous.
pub fn mask_to_cidr_strict(mask: SubnetMask) -> Result<CidrPrefix> {
    if !mask.is_contiguous() {
        log::debug!("mask_to_cidr_strict({mask}) rejected, bits={:032b}", mask.bits());
        return Err(Error::InvalidFormat(format!(
            "subnet mask {mask} is not a contiguous run of ones followed by zeros"
        )));
    }
    Ok(mask_to_cidr(mask))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cidr_to_mask() {
        assert_eq!(cidr_to_mask(0).unwrap().to_string(), "0.0.0.0");
        assert_eq!(cidr_to_mask(8).unwrap().to_string(), "255.0.0.0");
        assert_eq!(cidr_to_mask(20).unwrap().to_string(), "255.255.240.0");
        assert_eq!(cidr_to_mask(24).unwrap().to_string(), "255.255.255.0");
        assert_eq!(cidr_to_mask(26).unwrap().to_string(), "255.255.255.192");
        assert_eq!(cidr_to_mask(32).unwrap().to_string(), "255.255.255.255");
        assert!(matches!(cidr_to_mask(33), Err(Error::Range(_))));
    }

    #[test]
    fn test_mask_to_cidr_every_prefix() {
        for len in 0..=MAX_LENGTH {
            let mask = cidr_to_mask(len).unwrap();
            assert!(mask.is_contiguous(), "{mask} should be contiguous");
            assert_eq!(mask_to_cidr(mask).length(), len);
            assert_eq!(mask_to_cidr_strict(mask).unwrap().length(), len);
        }
    }

    #[test]
    fn test_mask_to_cidr_lenient() {
        let mask = SubnetMask::parse("255.0.255.0").unwrap();
        assert!(!mask.is_contiguous());
        assert_eq!(mask_to_cidr(mask).length(), 16);
        assert!(matches!(
            mask_to_cidr_strict(mask),
            Err(Error::InvalidFormat(_))
        ));

        let mask = SubnetMask::parse("0.0.0.255").unwrap();
        assert_eq!(mask_to_cidr(mask).length(), 8);
        assert!(mask_to_cidr_strict(mask).is_err());
    }

    #[test]
    fn test_prefix_from_str() {
        assert_eq!("24".parse::<CidrPrefix>().unwrap().length(), 24);
        assert_eq!(" /8 ".parse::<CidrPrefix>().unwrap().length(), 8);
        assert!(matches!("33".parse::<CidrPrefix>(), Err(Error::Range(_))));
        assert!(matches!("300".parse::<CidrPrefix>(), Err(Error::Range(_))));
        assert!(matches!(
            "abc".parse::<CidrPrefix>(),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!("".parse::<CidrPrefix>(), Err(Error::InvalidFormat(_))));
        assert!(matches!(
            "-1".parse::<CidrPrefix>(),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_total_hosts() {
        assert_eq!(CidrPrefix::new(24).unwrap().total_hosts(), 254);
        assert_eq!(CidrPrefix::new(30).unwrap().total_hosts(), 2);
        assert_eq!(CidrPrefix::new(31).unwrap().total_hosts(), 0);
        assert_eq!(CidrPrefix::new(32).unwrap().total_hosts(), -1);
        assert_eq!(CidrPrefix::new(0).unwrap().total_hosts(), 4294967294);
    }
}
