//! Output formatting for calculator results.
//!
//! Every page produces a [`Report`]; a [`Presenter`] turns it into text:
//! - [`terminal`] - coloured terminal output following the [`Theme`](crate::config::Theme)
//! - [`csv`] - CSV export
//! - [`json`] - JSON export
//! - [`text`] - plain text document export
//! - [`pdf`] - PDF document export
//! - [`export`] - writing a presented report to a file

mod csv;
mod export;
mod json;
mod pdf;
mod report;
mod terminal;
mod text;

pub use csv::{escape_csv_field, CsvPresenter};
pub use export::{export_path, export_report, output_path, ExportFormat};
pub use json::JsonPresenter;
pub use pdf::PdfWriter;
pub use report::{file_stem, Report};
pub use terminal::{format_field, TerminalPresenter};
pub use text::TextPresenter;

use crate::error::Result;

/// Renders computed values for one audience.
pub trait Presenter {
    fn present(&self, report: &Report) -> Result<String>;
}
