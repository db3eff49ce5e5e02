// src/reports/dates.rs

use super::Aggregate;
use crate::source::Row;
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Lenient parse of a `ValidDate` value to its calendar date.
/// Returns `None` for anything unrecognized; the range report treats such
/// rows as out of range rather than failing the run.
pub fn parse_valid_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Keeps the full rows whose `ValidDate` falls inside `start..=end`.
/// An inverted range matches nothing. Source order is preserved.
#[derive(Debug)]
pub struct DateRangeFilter {
    start: NaiveDate,
    end: NaiveDate,
    matched: Vec<Row>,
}

impl DateRangeFilter {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            matched: Vec::new(),
        }
    }
}

impl Aggregate for DateRangeFilter {
    type Output = Vec<Row>;

    fn push(&mut self, row: Row) -> Result<()> {
        let raw = row.field("ValidDate")?;
        match parse_valid_date(raw) {
            Some(date) => {
                if (self.start..=self.end).contains(&date) {
                    self.matched.push(row);
                }
            }
            None => debug!(valid_date = raw, "unparsable ValidDate, row excluded"),
        }
        Ok(())
    }

    fn finish(self) -> Vec<Row> {
        self.matched
    }
}
