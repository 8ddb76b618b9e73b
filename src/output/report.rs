//! The values a calculator page hands to a presenter.

use crate::error::{Error, Result};
use itertools::Itertools;

/// A titled table of text cells.
///
/// Single-result pages produce one row; the reference table and the diagram
/// produce one row per entry. Every row has exactly one cell per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Report {
    /// Create an empty report with the given column names.
    pub fn new(title: &str, columns: &[&str]) -> Report {
        Report {
            title: title.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: vec![],
        }
    }

    /// Create a one-row report from `(column, value)` pairs.
    pub fn single(title: &str, fields: Vec<(&str, String)>) -> Report {
        let (columns, values): (Vec<&str>, Vec<String>) = fields.into_iter().unzip();
        let mut report = Report::new(title, &columns);
        report.rows.push(values);
        report
    }

    /// Append a row.
    ///
    /// # Arguments
    /// * `cells` - One value per column, in column order
    ///
    /// # Returns
    /// * `Ok(())` - The row was appended
    /// * `Err(Error::Output)` - The row width does not match the columns; the
    ///   report is left unchanged
    pub fn push_row(&mut self, cells: Vec<String>) -> Result<()> {
        if cells.len() != self.columns.len() {
            return Err(Error::Output(format!(
                "row of {} cells does not fit the {} columns of '{}'",
                cells.len(),
                self.columns.len(),
                self.title
            )));
        }
        self.rows.push(cells);
        Ok(())
    }

    /// `(column, value)` pairs of one row.
    pub fn fields(&self, row: usize) -> Vec<(&str, &str)> {
        match self.rows.get(row) {
            Some(cells) => self
                .columns
                .iter()
                .map(String::as_str)
                .zip(cells.iter().map(String::as_str))
                .collect(),
            None => vec![],
        }
    }

    /// Value of `column` in the first row.
    pub fn value(&self, column: &str) -> Option<&str> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.rows.first()?.get(index).map(String::as_str)
    }

    /// File name stem of the report, see [`file_stem`].
    pub fn file_stem(&self) -> String {
        file_stem(&self.title)
    }
}

/// File name stem for a title: lower-cased, whitespace runs turned into `-`.
pub fn file_stem(title: &str) -> String {
    title.to_lowercase().split_whitespace().join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single() {
        let report = Report::single(
            "Network Calculator",
            vec![("Network ID", "10.0.0.0".to_string()), ("Broadcast", "10.0.0.255".to_string())],
        );
        assert_eq!(report.columns, vec!["Network ID", "Broadcast"]);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.value("Broadcast"), Some("10.0.0.255"));
        assert_eq!(report.value("Missing"), None);
        assert_eq!(
            report.fields(0),
            vec![("Network ID", "10.0.0.0"), ("Broadcast", "10.0.0.255")]
        );
        assert!(report.fields(1).is_empty());
    }

    #[test]
    fn test_push_row_checks_width() {
        let mut report = Report::new("Subnets", &["CIDR", "Hosts"]);
        report.push_row(vec!["/24".to_string(), "254".to_string()]).unwrap();
        let err = report.push_row(vec!["/25".to_string()]).unwrap_err();
        assert!(matches!(err, Error::Output(_)));
        assert!(report
            .push_row(vec!["/26".into(), "62".into(), "extra".into()])
            .is_err());
        assert_eq!(report.rows.len(), 1);
    }

    #[test]
    fn test_file_stem() {
        let report = Report::new("  Subnet   Reference Table ", &[]);
        assert_eq!(report.file_stem(), "subnet-reference-table");
    }
}
