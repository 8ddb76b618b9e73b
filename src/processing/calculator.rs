//! Calculator pages.
//!
//! Each page takes the raw text a user typed, validates it through the address
//! math in [`crate::models`] and returns a [`Report`] for a presenter. Nothing
//! here prints; errors go back to the caller to be shown to the user.

use crate::error::{Error, Result};
use crate::models::{
    cidr_to_mask, classify, common_subnets, derive_range, mask_to_cidr, mask_to_cidr_strict,
    parse_address, parse_binary, to_binary, CidrPrefix, SubnetMask,
};
use crate::output::Report;

/// Shown in place of a host address that does not exist (/31, /32).
pub const NOT_AVAILABLE: &str = "n/a";

/// Decimal address to binary.
pub fn binary_page(address_text: &str) -> Result<Report> {
    let addr = parse_address(address_text)?;
    Ok(Report::single(
        "IP Converter",
        vec![
            ("IP Address", addr.to_string()),
            ("Binary", to_binary(addr)),
        ],
    ))
}

/// Binary address to decimal.
pub fn decimal_page(binary_text: &str) -> Result<Report> {
    let addr = parse_binary(binary_text)?;
    Ok(Report::single(
        "IP Converter",
        vec![
            ("Binary", to_binary(addr)),
            ("IP Address", addr.to_string()),
        ],
    ))
}

/// Legacy class of an address, with its range and default mask.
pub fn class_page(address_text: &str) -> Result<Report> {
    let addr = parse_address(address_text)?;
    let class = classify(addr);
    let range = class
        .address_range()
        .map(|(lo, hi)| format!("{lo} - {hi}"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    log::debug!("class_page({addr}) -> {class}");
    Ok(Report::single(
        "IP Class Detector",
        vec![
            ("IP Address", addr.to_string()),
            ("Class", class.to_string()),
            ("Range", range),
            ("Notes", class.description()),
        ],
    ))
}

/// Network id, broadcast and host range of an address inside a prefix.
///
/// # Arguments
/// * `address_text` - Any address inside the network
/// * `cidr_text` - Prefix length, written `24` or `/24`
///
/// # Returns
/// * `Ok(Report)` - Network ID, broadcast, host count and host range
/// * `Err(Error::InvalidFormat)` - If either field is empty or malformed
/// * `Err(Error::Range)` - If the prefix is above 32
pub fn network_page(address_text: &str, cidr_text: &str) -> Result<Report> {
    if address_text.trim().is_empty() || cidr_text.trim().is_empty() {
        return Err(Error::InvalidFormat(
            "IP address and CIDR are required".to_string(),
        ));
    }
    let prefix: CidrPrefix = cidr_text.parse()?;
    let addr = parse_address(address_text)?;
    let range = derive_range(addr, prefix.length())?;

    let host = |h: Option<std::net::Ipv4Addr>| {
        h.map(|a| a.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    };
    Ok(Report::single(
        "Network Calculator",
        vec![
            ("IP Address", format!("{}{}", range.address, range.prefix)),
            ("Network ID", range.network_id.to_string()),
            ("Broadcast", range.broadcast.to_string()),
            ("Subnet Mask", range.subnet_mask.to_string()),
            ("Total Hosts", range.total_hosts.to_string()),
            ("First Host", host(range.first_host)),
            ("Last Host", host(range.last_host)),
        ],
    ))
}

/// Prefix to dotted mask.
pub fn mask_page(cidr_text: &str) -> Result<Report> {
    let prefix: CidrPrefix = cidr_text.parse()?;
    let mask = cidr_to_mask(prefix.length())?;
    Ok(Report::single(
        "Subnet Calculator",
        vec![("CIDR", prefix.to_string()), ("Subnet Mask", mask.to_string())],
    ))
}

/// Dotted mask to prefix.
///
/// With `strict` the mask must be contiguous; otherwise the one bits are
/// simply counted.
pub fn prefix_page(mask_text: &str, strict: bool) -> Result<Report> {
    let mask = SubnetMask::parse(mask_text).map_err(|e| match e {
        Error::InvalidFormat(msg) => Error::InvalidFormat(format!("subnet mask: {msg}")),
        other => other,
    })?;
    let prefix = if strict {
        mask_to_cidr_strict(mask)?
    } else {
        if !mask.is_contiguous() {
            log::warn!("Subnet mask {mask} is not contiguous, counting its one bits anyway");
        }
        mask_to_cidr(mask)
    };
    Ok(Report::single(
        "Subnet Calculator",
        vec![("Subnet Mask", mask.to_string()), ("CIDR", prefix.to_string())],
    ))
}

/// The common subnet reference table.
pub fn reference_page() -> Result<Report> {
    let mut report = Report::new(
        "Subnet Reference Table",
        &["CIDR", "Subnet Mask", "Available Hosts"],
    );
    for row in common_subnets()? {
        report.push_row(vec![
            row.prefix.to_string(),
            row.mask.to_string(),
            row.hosts.to_string(),
        ])?;
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_page() {
        let report = binary_page("192.168.1.1").unwrap();
        assert_eq!(
            report.value("Binary"),
            Some("11000000.10101000.00000001.00000001")
        );
        assert!(matches!(binary_page("192.168.1"), Err(Error::InvalidFormat(_))));
    }

    #[test]
    fn test_decimal_page() {
        let report = decimal_page("11111111.00000000.00000000.00000000").unwrap();
        assert_eq!(report.value("IP Address"), Some("255.0.0.0"));
        assert!(decimal_page("11111111.0.0.0").is_err());
    }

    #[test]
    fn test_class_page() {
        let report = class_page("172.16.0.1").unwrap();
        assert_eq!(report.value("Class"), Some("B"));
        assert_eq!(report.value("Range"), Some("128.0.0.0 - 191.255.255.255"));
        assert_eq!(report.value("Notes"), Some("Default subnet mask: 255.255.0.0"));

        let report = class_page("127.0.0.1").unwrap();
        assert_eq!(report.value("Class"), Some("Invalid"));
        assert_eq!(report.value("Range"), Some("n/a"));

        assert!(class_page("300.0.0.1").is_err());
    }

    #[test]
    fn test_network_page() {
        let report = network_page("192.168.1.130", "/26").unwrap();
        assert_eq!(report.value("IP Address"), Some("192.168.1.130/26"));
        assert_eq!(report.value("Network ID"), Some("192.168.1.128"));
        assert_eq!(report.value("Broadcast"), Some("192.168.1.191"));
        assert_eq!(report.value("Subnet Mask"), Some("255.255.255.192"));
        assert_eq!(report.value("Total Hosts"), Some("62"));
        assert_eq!(report.value("First Host"), Some("192.168.1.129"));
        assert_eq!(report.value("Last Host"), Some("192.168.1.190"));
    }

    #[test]
    fn test_network_page_32() {
        let report = network_page("10.0.0.7", "32").unwrap();
        assert_eq!(report.value("Total Hosts"), Some("-1"));
        assert_eq!(report.value("First Host"), Some("n/a"));
        assert_eq!(report.value("Last Host"), Some("n/a"));
    }

    #[test]
    fn test_network_page_errors() {
        assert!(matches!(
            network_page("", "24"),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            network_page("10.0.0.1", " "),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            network_page("10.0.0.1", "33"),
            Err(Error::Range(_))
        ));
        assert!(matches!(
            network_page("10.0.0.1", "abc"),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            network_page("10.0.0.256", "24"),
            Err(Error::Range(_))
        ));
    }

    #[test]
    fn test_mask_page() {
        let report = mask_page("20").unwrap();
        assert_eq!(report.value("Subnet Mask"), Some("255.255.240.0"));
        assert_eq!(report.value("CIDR"), Some("/20"));
        assert!(matches!(mask_page("40"), Err(Error::Range(_))));
    }

    #[test]
    fn test_prefix_page() {
        let report = prefix_page("255.255.255.224", true).unwrap();
        assert_eq!(report.value("CIDR"), Some("/27"));

        let report = prefix_page("255.0.255.0", false).unwrap();
        assert_eq!(report.value("CIDR"), Some("/16"));
        assert!(matches!(
            prefix_page("255.0.255.0", true),
            Err(Error::InvalidFormat(_))
        ));
        assert!(prefix_page("255.255.255", false).is_err());
    }

    #[test]
    fn test_reference_page() {
        let report = reference_page().unwrap();
        assert_eq!(report.rows.len(), 7);
        assert_eq!(report.rows[0], vec!["/24", "255.255.255.0", "254"]);
        assert_eq!(report.rows[6], vec!["/30", "255.255.255.252", "2"]);
    }
}
