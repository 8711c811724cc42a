use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use cta_audit::{Auditor, run_batch};
use cta_ingest::CsvSheet;
use cta_model::{BatchSummary, ResultSink, RowResult, SummarySink};
use cta_report::{AnalyzedSheet, JsonReport, ReportSet};
use cta_standards::{RuleTable, load_default_rules};

use crate::logging::redact_value;
use crate::types::{AuditOptions, AuditRun, CheckedName};

/// Load `path`, or fall back to `CTA_RULES_PATH` and then the built-in table.
pub fn load_rules(path: Option<&Path>) -> Result<RuleTable> {
    let rules = match path {
        Some(path) => RuleTable::load(path)
            .with_context(|| format!("load rule table {}", path.display()))?,
        None => load_default_rules().context("load default rule table")?,
    };
    debug!(
        ruleset = rules.ruleset(),
        origin = %rules.origin().display(),
        "rule table loaded"
    );
    Ok(rules)
}

/// Worker count used when `--workers` is not given.
pub fn default_workers() -> usize {
    std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
}

pub fn run_audit(options: &AuditOptions) -> Result<AuditRun> {
    let span = info_span!("audit", sheet = %options.sheet.display());
    let _guard = span.enter();
    let start = Instant::now();

    let rules = load_rules(options.rules.as_deref())?;
    let ruleset = rules.ruleset().to_string();
    let sheet = CsvSheet::open(&options.sheet)
        .with_context(|| format!("read sheet {}", options.sheet.display()))?;
    let layout_detected = sheet.layout().detected;

    let analyzed = options
        .output
        .clone()
        .unwrap_or_else(|| sheet.analyzed_path());
    let mut reports = ReportSet::new(AnalyzedSheet::new(&sheet), &analyzed);
    if let Some(path) = &options.json {
        let report = JsonReport::new(&ruleset, options.sheet.display().to_string());
        reports = reports.with_json(report, path);
    }

    let auditor = Auditor::new(rules);
    let mut sink = FlaggedRowLog::new(reports);
    let summary = run_batch(&auditor, &sheet, options.workers, &mut sink)
        .context("write audit reports")?;

    info!(
        processed = summary.overall.processed(),
        flagged = summary.overall.flagged(),
        duration_ms = start.elapsed().as_millis(),
        "audit complete"
    );
    Ok(AuditRun {
        sheet: options.sheet.clone(),
        analyzed,
        json: options.json.clone(),
        ruleset,
        layout_detected,
        summary,
    })
}

pub fn run_check(rules: RuleTable, names: &[String]) -> Vec<CheckedName> {
    let auditor = Auditor::new(rules);
    names
        .iter()
        .map(|name| {
            let outcome = auditor.audit(name);
            debug!(name = redact_value(name), decision = %outcome.decision, "name checked");
            CheckedName {
                name: name.clone(),
                outcome,
            }
        })
        .collect()
}

/// Passes rows through to the report files, logging the ones that need attention.
struct FlaggedRowLog<S> {
    inner: S,
}

impl<S> FlaggedRowLog<S> {
    fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: ResultSink> ResultSink for FlaggedRowLog<S> {
    type Error = S::Error;

    fn record(&mut self, result: &RowResult) -> Result<(), Self::Error> {
        if result.outcome.decision.needs_attention() {
            debug!(
                row = result.row.index + 1,
                name = redact_value(&result.row.name),
                decision = %result.outcome.decision,
                "row flagged"
            );
        }
        self.inner.record(result)
    }
}

impl<S: SummarySink> SummarySink for FlaggedRowLog<S> {
    type Error = S::Error;

    fn summarize(&mut self, summary: &BatchSummary) -> Result<(), Self::Error> {
        self.inner.summarize(summary)
    }
}
