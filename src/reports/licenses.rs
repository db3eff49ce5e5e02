// src/reports/licenses.rs

use super::Aggregate;
use crate::source::{normalize, Row};
use anyhow::Result;
use indexmap::IndexMap;

/// Breed key → raw license type → number of licenses. Sparse: a pair only
/// appears once a row with it has been seen.
pub type LicenseCountTable = IndexMap<String, IndexMap<String, u64>>;

/// Counts license records grouped by (breed, license type). The breed is
/// normalized; the license type is kept verbatim.
#[derive(Debug, Default)]
pub struct LicenseCounts {
    counts: LicenseCountTable,
}

impl LicenseCounts {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Aggregate for LicenseCounts {
    type Output = LicenseCountTable;

    fn push(&mut self, row: Row) -> Result<()> {
        let breed = normalize(row.field("Breed")?);
        let license_type = row.field("LicenseType")?.to_string();
        *self
            .counts
            .entry(breed)
            .or_default()
            .entry(license_type)
            .or_insert(0) += 1;
        Ok(())
    }

    fn finish(self) -> LicenseCountTable {
        self.counts
    }
}
