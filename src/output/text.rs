//! Plain text document output.
//!
//! A printable page: the title, the time it was generated, then one block of
//! `key: value` lines per row.

use super::{Presenter, Report};
use crate::error::Result;
use chrono::DateTime;
use chrono_tz::Tz;

#[derive(Debug, Clone)]
pub struct TextPresenter {
    generated_at: DateTime<Tz>,
}

impl TextPresenter {
    pub fn new(generated_at: DateTime<Tz>) -> TextPresenter {
        TextPresenter { generated_at }
    }
}

impl Presenter for TextPresenter {
    fn present(&self, report: &Report) -> Result<String> {
        let mut out = format!(
            "{}\n{}\nGenerated: {}\n",
            report.title,
            "=".repeat(report.title.chars().count()),
            self.generated_at.format("%Y-%m-%d %H:%M:%S %Z")
        );
        let indent = if report.rows.len() > 1 { "    " } else { "" };
        for i in 0..report.rows.len() {
            out.push('\n');
            if report.rows.len() > 1 {
                out.push_str(&format!("{}:\n", i + 1));
            }
            for (key, value) in report.fields(i) {
                out.push_str(&format!("{indent}{key}: {value}\n"));
            }
        }
        Ok(out)
    }
}
