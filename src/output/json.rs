//! JSON output for reports.

use super::{Presenter, Report};
use crate::error::Result;
use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Serialize)]
struct JsonReport<'a> {
    title: &'a str,
    generated_at: String,
    rows: Vec<Map<String, Value>>,
}

/// Pretty printed `{title, generated_at, rows: [{column: value}]}`.
#[derive(Debug, Clone)]
pub struct JsonPresenter {
    generated_at: DateTime<Tz>,
}

impl JsonPresenter {
    pub fn new(generated_at: DateTime<Tz>) -> JsonPresenter {
        JsonPresenter { generated_at }
    }
}

impl Presenter for JsonPresenter {
    fn present(&self, report: &Report) -> Result<String> {
        let rows: Vec<Map<String, Value>> = (0..report.rows.len())
            .map(|i| {
                report
                    .fields(i)
                    .into_iter()
                    .map(|(column, value)| (column.to_string(), Value::from(value)))
                    .collect()
            })
            .collect();
        let json = JsonReport {
            title: &report.title,
            generated_at: self.generated_at.to_rfc3339(),
            rows,
        };
        Ok(serde_json::to_string_pretty(&json)?)
    }
}
