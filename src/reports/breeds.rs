// src/reports/breeds.rs

use super::Aggregate;
use crate::source::{normalize, Row};
use anyhow::Result;
use indexmap::IndexSet;

/// Collects the distinct normalized breed names, in first-seen order.
#[derive(Debug, Default)]
pub struct UniqueBreeds {
    breeds: IndexSet<String>,
}

impl UniqueBreeds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Aggregate for UniqueBreeds {
    type Output = Vec<String>;

    fn push(&mut self, row: Row) -> Result<()> {
        self.breeds.insert(normalize(row.field("Breed")?));
        Ok(())
    }

    fn finish(self) -> Vec<String> {
        self.breeds.into_iter().collect()
    }
}
