//! Streaming reports over a dog-license CSV dataset.
//!
//! Each report is a single pass over its own open of the input: rows are
//! pushed through an [`reports::Aggregate`] and the final value is handed
//! back to the caller for serialization.

pub mod output;
pub mod reports;
pub mod source;
