//! Driving a batch through the sink traits.

use std::convert::Infallible;

use cta_audit::{Auditor, run_batch};
use cta_model::{
    BatchSummary, Decision, ResultSink, RowResult, RowSource, SourceRow, SummarySink,
    UNKNOWN_GROUP,
};
use cta_standards::RuleTable;

struct Sheet(Vec<SourceRow>);

impl RowSource for Sheet {
    fn rows(&self) -> &[SourceRow] {
        &self.0
    }
}

#[derive(Default)]
struct Collected {
    rows: Vec<RowResult>,
    summaries: Vec<BatchSummary>,
}

impl ResultSink for Collected {
    type Error = Infallible;

    fn record(&mut self, result: &RowResult) -> Result<(), Infallible> {
        self.rows.push(result.clone());
        Ok(())
    }
}

impl SummarySink for Collected {
    type Error = Infallible;

    fn summarize(&mut self, summary: &BatchSummary) -> Result<(), Infallible> {
        self.summaries.push(summary.clone());
        Ok(())
    }
}

struct Failing;

impl ResultSink for Failing {
    type Error = String;

    fn record(&mut self, result: &RowResult) -> Result<(), String> {
        Err(format!("row {} rejected", result.row.index))
    }
}

impl SummarySink for Failing {
    type Error = String;

    fn summarize(&mut self, _summary: &BatchSummary) -> Result<(), String> {
        Ok(())
    }
}

fn sheet() -> Sheet {
    let rows = [
        ("LG_20240115_SitePlan_Rev1.pdf", "Acme"),
        ("LG_2024-01-15_Site Plan.pdf", "Acme"),
        ("XYZ_20240101_Something.pdf", "Birch"),
        ("   ", ""),
        ("RFI_0042_Response.pdf", "Birch"),
    ];
    Sheet(
        rows.iter()
            .enumerate()
            .map(|(index, (name, group))| SourceRow {
                index,
                name: (*name).to_string(),
                group: (*group).to_string(),
            })
            .collect(),
    )
}

#[test]
fn sinks_receive_rows_in_order_then_totals() {
    let auditor = Auditor::new(RuleTable::builtin().unwrap());
    let mut collected = Collected::default();
    let summary = run_batch(&auditor, &sheet(), 3, &mut collected).unwrap();

    let decisions: Vec<Decision> = collected.rows.iter().map(|r| r.outcome.decision).collect();
    assert_eq!(
        decisions,
        [
            Decision::Compliant,
            Decision::NeedsChanges,
            Decision::NonCompliant,
            Decision::Empty,
            Decision::Skip,
        ]
    );
    assert_eq!(collected.summaries, [summary.clone()]);
    assert_eq!(summary.overall.flagged(), 2);
    assert_eq!(summary.overall.total(), 5);
    assert_eq!(summary.by_group["Acme"].needs_changes, 1);
    assert_eq!(summary.by_group["Birch"].skipped, 1);
    assert_eq!(summary.by_group[UNKNOWN_GROUP].empty, 1);
}

#[test]
fn first_sink_error_stops_the_run() {
    let auditor = Auditor::new(RuleTable::builtin().unwrap());
    let err = run_batch(&auditor, &sheet(), 1, &mut Failing).unwrap_err();
    assert_eq!(err, "row 0 rejected");
}
