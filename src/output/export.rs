//! Writing presented reports to files.

use super::{CsvPresenter, JsonPresenter, PdfWriter, Presenter, Report, TextPresenter};
use crate::error::{Error, Result};
use chrono::DateTime;
use chrono_tz::Tz;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File formats a report can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Text,
    Pdf,
}

impl ExportFormat {
    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Text => "txt",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// Encode `report` in this format.
    ///
    /// # Arguments
    /// * `report` - The report to encode
    /// * `generated_at` - Timestamp written into JSON, text and PDF documents
    ///
    /// # Returns
    /// The file content
    pub fn render(self, report: &Report, generated_at: DateTime<Tz>) -> Result<Vec<u8>> {
        let text = match self {
            ExportFormat::Csv => CsvPresenter.present(report)?,
            ExportFormat::Json => JsonPresenter::new(generated_at).present(report)?,
            ExportFormat::Text => TextPresenter::new(generated_at).present(report)?,
            ExportFormat::Pdf => return PdfWriter::new(generated_at).write(report),
        };
        Ok(text.into_bytes())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<ExportFormat> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "text" | "txt" => Ok(ExportFormat::Text),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(Error::InvalidFormat(format!(
                "unknown export format '{other}', expected csv, json, text or pdf"
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Resolve an output target to a file path.
///
/// An existing directory gets `<stem>.<extension>` inside it; anything else is
/// used as the file path as given.
pub fn output_path(target: &Path, stem: &str, extension: &str) -> PathBuf {
    if target.is_dir() {
        target.join(format!("{stem}.{extension}"))
    } else {
        target.to_path_buf()
    }
}

/// Where the exported file goes for `target`, named after the report title.
pub fn export_path(report: &Report, format: ExportFormat, target: &Path) -> PathBuf {
    output_path(target, &report.file_stem(), format.extension())
}

/// Encode `report` as `format` and write it to `target`.
///
/// # Arguments
/// * `report` - The report to export
/// * `format` - File format
/// * `target` - A file path, or a directory to create the file in
/// * `generated_at` - Timestamp for the document header
///
/// # Returns
/// * `Ok(PathBuf)` - The path that was written
/// * `Err` - If the parent directory does not exist or the write fails
pub fn export_report(
    report: &Report,
    format: ExportFormat,
    target: &Path,
    generated_at: DateTime<Tz>,
) -> Result<PathBuf> {
    let path = export_path(report, format, target);
    let content = format.render(report, generated_at)?;
    log::info!(
        "Writing {format} export of '{}' to {}",
        report.title,
        path.display()
    );
    std::fs::write(&path, content)?;
    Ok(path)
}
