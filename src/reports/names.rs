// src/reports/names.rs

use super::Aggregate;
use crate::source::{normalize, Row};
use anyhow::Result;
use indexmap::IndexMap;

/// Ranks the k most frequent normalized dog names.
///
/// Ties are broken by encounter order: the map iterates in insertion order
/// and the sort is stable, so of two names with equal counts the one seen
/// first in the source ranks first.
#[derive(Debug)]
pub struct TopNames {
    k: usize,
    counts: IndexMap<String, u64>,
}

impl TopNames {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            counts: IndexMap::new(),
        }
    }
}

impl Aggregate for TopNames {
    type Output = Vec<(String, u64)>;

    fn push(&mut self, row: Row) -> Result<()> {
        *self
            .counts
            .entry(normalize(row.field("DogName")?))
            .or_insert(0) += 1;
        Ok(())
    }

    fn finish(self) -> Vec<(String, u64)> {
        let mut ranked: Vec<(String, u64)> = self.counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(self.k);
        ranked
    }
}
