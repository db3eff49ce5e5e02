// src/reports/mod.rs

use crate::source::Row;
use anyhow::Result;

pub mod breeds;
pub mod dates;
pub mod licenses;
pub mod names;

pub use breeds::UniqueBreeds;
pub use dates::{parse_valid_date, DateRangeFilter};
pub use licenses::{LicenseCountTable, LicenseCounts};
pub use names::TopNames;

/// One streaming report. Rows are pushed in source order; `finish` consumes
/// the accumulator and yields the final value exactly once. There is no way
/// back from finished to streaming.
pub trait Aggregate {
    type Output;

    fn push(&mut self, row: Row) -> Result<()>;

    fn finish(self) -> Self::Output;
}

/// Drive `rows` to exhaustion through `agg` and return the finished value.
///
/// Fail-fast: the first source error or bad row aborts the whole run and no
/// partial result escapes. Every row is visited, even when an aggregate
/// could in principle stop early.
pub fn run<A, I>(rows: I, mut agg: A) -> Result<A::Output>
where
    A: Aggregate,
    I: IntoIterator<Item = Result<Row>>,
{
    for row in rows {
        agg.push(row?)?;
    }
    Ok(agg.finish())
}
