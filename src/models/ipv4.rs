//! IPv4 address parsing and binary conversion.
//!
//! Addresses are plain [`Ipv4Addr`] values. Parsing is done here rather than
//! with `Ipv4Addr::from_str` so that the error tells the user *what* is wrong
//! (wrong arity, non-numeric octet, octet above 255) and so that leading zeros
//! such as `192.168.001.010` are accepted the way a human types them.

use crate::error::{Error, Result};
use itertools::Itertools;
use regex::Regex;
use std::net::Ipv4Addr;
use std::sync::OnceLock;

/// Number of bits in an IPv4 address.
pub const MAX_LENGTH: u8 = 32;

/// Number of octets in an IPv4 address.
pub const OCTETS: usize = 4;

static DECIMAL_OCTET: OnceLock<Regex> = OnceLock::new();
static BINARY_OCTET: OnceLock<Regex> = OnceLock::new();

fn decimal_octet_regex() -> &'static Regex {
    DECIMAL_OCTET.get_or_init(|| Regex::new(r"^[0-9]+$").expect("Invalid Regex"))
}

fn binary_octet_regex() -> &'static Regex {
    BINARY_OCTET.get_or_init(|| Regex::new(r"^[01]{8}$").expect("Invalid Regex"))
}

/// Split dotted text into exactly four parts.
fn split_octets<'a>(text: &'a str, what: &str) -> Result<[&'a str; OCTETS]> {
    let parts: Vec<&str> = text.trim().split('.').collect();
    <[&str; OCTETS]>::try_from(parts).map_err(|parts| {
        Error::InvalidFormat(format!(
            "{what} '{}' must have {OCTETS} parts separated by '.', found {}",
            text.trim(),
            parts.len()
        ))
    })
}

/// Parse a dotted decimal IPv4 address such as `192.168.1.10`.
///
/// # Arguments
/// * `text` - Four decimal octets separated by `.`, surrounding whitespace allowed
///
/// # Returns
/// * `Ok(Ipv4Addr)` - The parsed address
/// * `Err(Error::InvalidFormat)` - If there are not four numeric parts
/// * `Err(Error::Range)` - If an octet is above 255
///
/// # Examples
/// ```
/// use ipv4_network_calculator::models::parse_address;
/// assert_eq!(parse_address("10.0.0.1").unwrap().octets(), [10, 0, 0, 1]);
/// assert!(parse_address("1.2.3").is_err());
/// ```
pub fn parse_address(text: &str) -> Result<Ipv4Addr> {
    let parts = split_octets(text, "IP address")?;
    let mut octets = [0u8; OCTETS];
    for (octet, part) in octets.iter_mut().zip(parts) {
        *octet = parse_decimal_octet(part)?;
    }
    log::trace!("parse_address({text}) -> {octets:?}");
    Ok(Ipv4Addr::from(octets))
}

fn parse_decimal_octet(part: &str) -> Result<u8> {
    if !decimal_octet_regex().is_match(part) {
        return Err(Error::InvalidFormat(format!(
            "octet '{part}' is not a decimal number"
        )));
    }
    // Only digits remain, so the only parse failure left is overflow.
    let value: u32 = part
        .parse()
        .map_err(|_| Error::Range(format!("octet {part} is above 255")))?;
    u8::try_from(value).map_err(|_| Error::Range(format!("octet {value} is above 255")))
}

/// Render an address as four groups of eight binary digits.
///
/// `192.168.1.1` becomes `11000000.10101000.00000001.00000001`.
pub fn to_binary(addr: Ipv4Addr) -> String {
    addr.octets()
        .iter()
        .map(|octet| format!("{octet:08b}"))
        .join(".")
}

/// Parse the binary form produced by [`to_binary`].
///
/// Every group must be exactly eight characters drawn from `0` and `1`.
pub fn parse_binary(text: &str) -> Result<Ipv4Addr> {
    let parts = split_octets(text, "binary address")?;
    let mut octets = [0u8; OCTETS];
    for (octet, part) in octets.iter_mut().zip(parts) {
        if !binary_octet_regex().is_match(part) {
            return Err(Error::InvalidFormat(format!(
                "binary octet '{part}' must be exactly 8 digits of 0 or 1"
            )));
        }
        *octet = u8::from_str_radix(part, 2)
            .map_err(|e| Error::InvalidFormat(format!("binary octet '{part}': {e}")))?;
    }
    Ok(Ipv4Addr::from(octets))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address() {
        assert_eq!(
            parse_address("192.168.1.130").unwrap(),
            Ipv4Addr::new(192, 168, 1, 130)
        );
        assert_eq!(parse_address("0.0.0.0").unwrap(), Ipv4Addr::UNSPECIFIED);
        assert_eq!(
            parse_address(" 255.255.255.255 ").unwrap(),
            Ipv4Addr::BROADCAST
        );
    }

    #[test]
    fn test_parse_address_leading_zeros() {
        assert_eq!(
            parse_address("192.168.001.010").unwrap(),
            Ipv4Addr::new(192, 168, 1, 10)
        );
    }

    #[test]
    fn test_parse_address_out_of_range() {
        let err = parse_address("999.1.1.1").unwrap_err();
        assert!(matches!(err, Error::Range(_)), "got {err:?}");
        assert!(matches!(
            parse_address("1.2.3.256").unwrap_err(),
            Error::Range(_)
        ));
        assert!(matches!(
            parse_address("1.2.3.99999999999999999999").unwrap_err(),
            Error::Range(_)
        ));
    }

    #[test]
    fn test_parse_address_wrong_arity() {
        assert!(matches!(
            parse_address("1.2.3").unwrap_err(),
            Error::InvalidFormat(_)
        ));
        assert!(matches!(
            parse_address("1.2.3.4.5").unwrap_err(),
            Error::InvalidFormat(_)
        ));
        assert!(matches!(parse_address("").unwrap_err(), Error::InvalidFormat(_)));
    }

    #[test]
    fn test_parse_address_non_numeric() {
        for bad in ["a.b.c.d", "1.2.3.x", "1.2.3.-1", "1.2..4", "1.2.3.4a", "1. 2.3.4"] {
            assert!(
                matches!(parse_address(bad), Err(Error::InvalidFormat(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_to_binary() {
        assert_eq!(
            to_binary(Ipv4Addr::new(192, 168, 1, 1)),
            "11000000.10101000.00000001.00000001"
        );
        assert_eq!(
            to_binary(Ipv4Addr::UNSPECIFIED),
            "00000000.00000000.00000000.00000000"
        );
    }

    #[test]
    fn test_parse_binary() {
        assert_eq!(
            parse_binary("11111111.00000000.00000000.00000000").unwrap(),
            Ipv4Addr::new(255, 0, 0, 0)
        );
        assert_eq!(
            parse_binary("11000000.10101000.00000001.00000001")
                .unwrap()
                .to_string(),
            "192.168.1.1"
        );
    }

    #[test]
    fn test_parse_binary_rejects() {
        for bad in [
            "1111111.00000000.00000000.00000000",
            "111111111.00000000.00000000.00000000",
            "11111112.00000000.00000000.00000000",
            "11111111.00000000.00000000",
            "255.0.0.0",
        ] {
            assert!(
                matches!(parse_binary(bad), Err(Error::InvalidFormat(_))),
                "{bad} should be rejected"
            );
        }
    }
}
