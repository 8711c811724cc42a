//! Seams between the audit engine and the sheet it reads from and writes to.

use crate::row::{RowResult, SourceRow};
use crate::tally::BatchSummary;

/// Yields the `(name, group)` rows of a batch.
pub trait RowSource {
    fn rows(&self) -> &[SourceRow];
}

/// Accepts one audited row at a time.
pub trait ResultSink {
    type Error;

    fn record(&mut self, result: &RowResult) -> Result<(), Self::Error>;
}

/// Accepts the batch totals once every row has been recorded.
pub trait SummarySink {
    type Error;

    fn summarize(&mut self, summary: &BatchSummary) -> Result<(), Self::Error>;
}
