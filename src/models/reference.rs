//! Reference table of the subnet sizes people look up most.

use super::mask::{CidrPrefix, SubnetMask};
use crate::error::Result;

/// Prefixes listed in the reference table.
pub const COMMON_PREFIXES: std::ops::RangeInclusive<u8> = 24..=30;

/// One row of the reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubnetReference {
    pub prefix: CidrPrefix,
    pub mask: SubnetMask,
    pub hosts: i64,
}

/// Rows for /24 through /30.
pub fn common_subnets() -> Result<Vec<SubnetReference>> {
    COMMON_PREFIXES
        .map(|len| {
            let prefix = CidrPrefix::new(len)?;
            Ok(SubnetReference {
                prefix,
                mask: prefix.mask(),
                hosts: prefix.total_hosts(),
            })
        })
        .collect()
}
