//! Auditing a batch of rows across worker threads.
//!
//! Rows are split into contiguous chunks, one per worker. Each worker keeps
//! its own results and tally; they are concatenated and merged once all
//! workers have finished, so output order matches input order and no
//! counter is shared between threads.

use std::panic;
use std::thread;
use std::time::Instant;

use cta_model::{BatchSummary, ResultSink, RowResult, RowSource, SourceRow, SummarySink};
use tracing::{info, info_span, trace};

use crate::engine::Auditor;

/// Results in input order plus the merged tally.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub results: Vec<RowResult>,
    pub summary: BatchSummary,
}

/// Audit every row, using up to `workers` threads.
pub fn audit_rows(auditor: &Auditor, rows: &[SourceRow], workers: usize) -> BatchOutcome {
    let workers = workers.clamp(1, rows.len().max(1));
    let span = info_span!("batch", rows = rows.len(), workers);
    let _guard = span.enter();
    let start = Instant::now();

    let outcome = if workers == 1 {
        audit_chunk(auditor, rows)
    } else {
        let chunk_size = rows.len().div_ceil(workers);
        thread::scope(|scope| {
            let handles: Vec<_> = rows
                .chunks(chunk_size)
                .map(|chunk| scope.spawn(move || audit_chunk(auditor, chunk)))
                .collect();
            let mut merged = BatchOutcome::default();
            for handle in handles {
                match handle.join() {
                    Ok(part) => {
                        merged.results.extend(part.results);
                        merged.summary.merge(&part.summary);
                    }
                    Err(payload) => panic::resume_unwind(payload),
                }
            }
            merged
        })
    };

    info!(
        processed = outcome.summary.overall.processed(),
        flagged = outcome.summary.overall.flagged(),
        skipped = outcome.summary.overall.skipped,
        duration_ms = start.elapsed().as_millis(),
        "batch audited"
    );
    outcome
}

fn audit_chunk(auditor: &Auditor, rows: &[SourceRow]) -> BatchOutcome {
    let mut outcome = BatchOutcome {
        results: Vec::with_capacity(rows.len()),
        summary: BatchSummary::default(),
    };
    for row in rows {
        let verdict = auditor.audit(&row.name);
        trace!(row = row.index, decision = %verdict.decision, "row audited");
        outcome.summary.record(&row.group, verdict.decision);
        outcome.results.push(RowResult {
            row: row.clone(),
            outcome: verdict,
        });
    }
    outcome
}

/// Audit a source and hand each result, then the totals, to `sink`.
///
/// The sink sees rows in source order. The first sink error stops the run.
pub fn run_batch<S>(
    auditor: &Auditor,
    source: &impl RowSource,
    workers: usize,
    sink: &mut S,
) -> Result<BatchSummary, <S as ResultSink>::Error>
where
    S: ResultSink + SummarySink<Error = <S as ResultSink>::Error>,
{
    let outcome = audit_rows(auditor, source.rows(), workers);
    for result in &outcome.results {
        sink.record(result)?;
    }
    sink.summarize(&outcome.summary)?;
    Ok(outcome.summary)
}
