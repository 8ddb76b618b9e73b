//! Legacy classful addressing.

use std::fmt;
use std::net::Ipv4Addr;

/// Address class decided by the first octet.
///
/// First octets 0 and 127 belong to no class in this scheme and map to
/// [`IpClass::Invalid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpClass {
    A,
    B,
    C,
    D,
    E,
    Invalid,
}

impl IpClass {
    /// Classify by first octet value.
    pub fn from_first_octet(octet: u8) -> IpClass {
        match octet {
            1..=126 => IpClass::A,
            128..=191 => IpClass::B,
            192..=223 => IpClass::C,
            224..=239 => IpClass::D,
            240..=255 => IpClass::E,
            0 | 127 => IpClass::Invalid,
        }
    }

    /// First and last address of the class.
    pub fn address_range(self) -> Option<(Ipv4Addr, Ipv4Addr)> {
        let (lo, hi) = match self {
            IpClass::A => (1, 126),
            IpClass::B => (128, 191),
            IpClass::C => (192, 223),
            IpClass::D => (224, 239),
            IpClass::E => (240, 255),
            IpClass::Invalid => return None,
        };
        Some((Ipv4Addr::new(lo, 0, 0, 0), Ipv4Addr::new(hi, 255, 255, 255)))
    }

    /// Classful default mask. Only A, B and C have one.
    pub fn default_mask(self) -> Option<Ipv4Addr> {
        match self {
            IpClass::A => Some(Ipv4Addr::new(255, 0, 0, 0)),
            IpClass::B => Some(Ipv4Addr::new(255, 255, 0, 0)),
            IpClass::C => Some(Ipv4Addr::new(255, 255, 255, 0)),
            _ => None,
        }
    }

    /// What the class is for, shown next to the range.
    pub fn description(self) -> String {
        match (self.default_mask(), self) {
            (Some(mask), _) => format!("Default subnet mask: {mask}"),
            (None, IpClass::D) => "Multicast address".to_string(),
            (None, IpClass::E) => "Reserved for research".to_string(),
            _ => "Not part of any class (0.x.x.x and 127.x.x.x)".to_string(),
        }
    }
}

impl fmt::Display for IpClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            IpClass::A => "A",
            IpClass::B => "B",
            IpClass::C => "C",
            IpClass::D => "D",
            IpClass::E => "E",
            IpClass::Invalid => "Invalid",
        };
        f.write_str(name)
    }
}

/// Classify an address by its first octet.
pub fn classify(addr: Ipv4Addr) -> IpClass {
    IpClass::from_first_octet(addr.octets()[0])
}
