//! Calculator pages.
//!
//! This module turns raw user input into reports:
//! - [`calculator`] - one function per page (converter, class detector,
//!   network calculator, subnet calculator, reference table)

mod calculator;

// Re-export public functions
pub use calculator::{
    binary_page, class_page, decimal_page, mask_page, network_page, prefix_page, reference_page,
    NOT_AVAILABLE,
};
