// src/source.rs

use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use indexmap::IndexMap;
use serde::Serialize;
use std::{fs::File, io, path::Path};

/// One record from the input dataset. Field order follows the CSV header,
/// so a serialized row round-trips with its original column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Row {
    fields: IndexMap<String, String>,
}

impl Row {
    /// Look up a field by header name. A missing field fails the row rather
    /// than feeding a default into an aggregate.
    pub fn field(&self, name: &str) -> Result<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| anyhow!("row is missing expected field `{}`", name))
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Trim surrounding whitespace and lowercase. This is the grouping and
/// dedup key for both breeds and dog names.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Lazy iterator of rows over a headered CSV. Every report opens its own
/// source, so there is no shared cursor between reports.
pub struct CsvRowSource<R: io::Read> {
    headers: Vec<String>,
    records: csv::StringRecordsIntoIter<R>,
}

impl CsvRowSource<File> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("opening input file {}", path.display()))?;
        Self::new(file)
    }
}

impl<R: io::Read> CsvRowSource<R> {
    pub fn new(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers: Vec<String> = rdr
            .headers()
            .context("reading CSV header row")?
            .iter()
            .map(str::to_string)
            .collect();
        Ok(Self {
            headers,
            records: rdr.into_records(),
        })
    }
}

impl<R: io::Read> Iterator for CsvRowSource<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(r) => r,
            Err(e) => return Some(Err(e).context("reading CSV record")),
        };
        let fields = self
            .headers
            .iter()
            .cloned()
            .zip(record.iter().map(str::to_string))
            .collect();
        Some(Ok(Row { fields }))
    }
}
