//! Coloured terminal output.

use super::{Presenter, Report};
use crate::config::Theme;
use crate::error::Result;
use colored::{ColoredString, Colorize};

/// Pad `value` on the right to `width` characters.
///
/// Values already at or over `width` are returned unchanged.
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    format!("{value_str:<width$}")
}

/// Colours for one [`Theme`].
#[derive(Debug, Clone, Copy)]
struct Palette {
    theme: Theme,
}

impl Palette {
    fn title(&self, text: &str) -> ColoredString {
        match self.theme {
            Theme::Dark => text.bold().bright_white().underline(),
            Theme::Light => text.bold().black().underline(),
        }
    }

    fn label(&self, text: &str) -> ColoredString {
        match self.theme {
            Theme::Dark => text.white(),
            Theme::Light => text.blue(),
        }
    }

    fn value(&self, text: &str) -> ColoredString {
        match self.theme {
            Theme::Dark => text.bright_cyan().bold(),
            Theme::Light => text.black().bold(),
        }
    }
}

/// Print reports as `label: value` lines, or as an aligned table when the
/// report has several rows.
#[derive(Debug, Clone, Copy)]
pub struct TerminalPresenter {
    palette: Palette,
}

impl TerminalPresenter {
    pub fn new(theme: Theme) -> TerminalPresenter {
        TerminalPresenter {
            palette: Palette { theme },
        }
    }

    fn present_fields(&self, report: &Report, out: &mut String) {
        let width = report.columns.iter().map(|c| c.len()).max().unwrap_or(0);
        for (label, value) in report.fields(0) {
            out.push_str(&format!(
                "  {}  {}\n",
                self.palette.label(&format_field(format!("{label}:"), width + 1)),
                self.palette.value(value)
            ));
        }
    }

    fn present_table(&self, report: &Report, out: &mut String) {
        let widths: Vec<usize> = report
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                report
                    .rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.len())
                    .chain(std::iter::once(column.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header: Vec<String> = report
            .columns
            .iter()
            .zip(&widths)
            .map(|(column, width)| self.palette.label(&format_field(column, *width)).to_string())
            .collect();
        out.push_str(&format!("  {}\n", header.join("  ")));

        for row in &report.rows {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, width)| self.palette.value(&format_field(cell, *width)).to_string())
                .collect();
            out.push_str(&format!("  {}\n", cells.join("  ")));
        }
    }
}

impl Presenter for TerminalPresenter {
    fn present(&self, report: &Report) -> Result<String> {
        let mut out = format!("{}\n", self.palette.title(&report.title));
        if report.rows.len() == 1 {
            self.present_fields(report, &mut out);
        } else {
            self.present_table(report, &mut out);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("test", 8), "test    ");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("long_value", 5), "long_value");
    }

    #[test]
    fn test_format_field_number() {
        assert_eq!(format_field(42, 4), "42  ");
    }

    #[test]
    fn test_present_single_row() {
        colored::control::set_override(false);
        let report = Report::single(
            "IP Class",
            vec![("Address", "10.1.2.3".to_string()), ("Class", "A".to_string())],
        );
        let out = TerminalPresenter::new(Theme::Dark).present(&report).unwrap();
        assert_eq!(out, "IP Class\n  Address:  10.1.2.3\n  Class:    A\n");
    }

    #[test]
    fn test_present_table() {
        colored::control::set_override(false);
        let mut report = Report::new("Subnets", &["CIDR", "Hosts"]);
        report.push_row(vec!["/24".to_string(), "254".to_string()]).unwrap();
        report.push_row(vec!["/30".to_string(), "2".to_string()]).unwrap();
        let out = TerminalPresenter::new(Theme::Light).present(&report).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Subnets");
        assert_eq!(lines[1], "  CIDR  Hosts");
        assert_eq!(lines[2], "  /24   254  ");
        assert_eq!(lines[3], "  /30   2    ");
    }
}
