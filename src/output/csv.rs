//! CSV output for reports.

use super::{Presenter, Report};
use crate::error::Result;

/// Quote a field when it contains a comma, a double quote or a line break.
///
/// Quotes inside the field are doubled. No spaces are added after commas
/// because spreadsheets treat them as part of the next field.
pub fn escape_csv_field(input: &str) -> String {
    if input.contains([',', '"', '\n', '\r']) {
        let escaped = input.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        input.to_string()
    }
}

fn csv_line<'a, I: IntoIterator<Item = &'a String>>(fields: I) -> String {
    fields
        .into_iter()
        .map(|field| escape_csv_field(field))
        .collect::<Vec<String>>()
        .join(",")
}

/// Header line of column names followed by one line per row.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvPresenter;

impl Presenter for CsvPresenter {
    fn present(&self, report: &Report) -> Result<String> {
        log::debug!(
            "CsvPresenter: '{}' {} rows",
            report.title,
            report.rows.len()
        );
        let mut out = csv_line(&report.columns);
        out.push('\n');
        for row in &report.rows {
            out.push_str(&csv_line(row));
            out.push('\n');
        }
        Ok(out)
    }
}
