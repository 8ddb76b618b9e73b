//! IPv4 network calculator.
//!
//! - [`models`] - address math: parsing, binary conversion, classes, masks,
//!   prefixes and network ranges
//! - [`processing`] - calculator pages turning raw input into [`output::Report`]s
//! - [`diagram`] - a network split into named subnets, and its renderers
//! - [`output`] - presenters (terminal, CSV, JSON, text) and file export
//! - [`config`] - settings and theme
//! - [`cmd`] - the `ipcalc` command line

pub mod cmd;
pub mod config;
pub mod diagram;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;

pub use error::{Error, Result};
