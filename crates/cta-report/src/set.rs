//! The outputs of one run, fed through the sink traits.

use std::path::{Path, PathBuf};

use cta_model::{BatchSummary, ResultSink, RowResult, SummarySink};

use crate::analyzed::AnalyzedSheet;
use crate::error::{ReportError, Result};
use crate::json::JsonReport;

/// Analyzed sheet and optional JSON report, written once the batch ends.
#[derive(Debug, Clone)]
pub struct ReportSet {
    sheet: AnalyzedSheet,
    sheet_path: PathBuf,
    json: Option<(JsonReport, PathBuf)>,
    summary: Option<BatchSummary>,
}

impl ReportSet {
    pub fn new(sheet: AnalyzedSheet, sheet_path: impl Into<PathBuf>) -> Self {
        Self {
            sheet,
            sheet_path: sheet_path.into(),
            json: None,
            summary: None,
        }
    }

    #[must_use]
    pub fn with_json(mut self, report: JsonReport, path: impl Into<PathBuf>) -> Self {
        self.json = Some((report, path.into()));
        self
    }

    pub fn sheet(&self) -> &AnalyzedSheet {
        &self.sheet
    }

    pub fn sheet_path(&self) -> &Path {
        &self.sheet_path
    }

    pub fn json(&self) -> Option<&JsonReport> {
        self.json.as_ref().map(|(report, _)| report)
    }

    pub fn summary(&self) -> Option<&BatchSummary> {
        self.summary.as_ref()
    }
}

impl ResultSink for ReportSet {
    type Error = ReportError;

    fn record(&mut self, result: &RowResult) -> Result<()> {
        self.sheet.apply(result);
        if let Some((report, _)) = &mut self.json {
            report.push(result);
        }
        Ok(())
    }
}

impl SummarySink for ReportSet {
    type Error = ReportError;

    /// Totals arrive last, so this is where the files are written.
    fn summarize(&mut self, summary: &BatchSummary) -> Result<()> {
        self.sheet.save(&self.sheet_path)?;
        if let Some((report, path)) = &mut self.json {
            report.summary = summary.clone();
            report.save(path)?;
        }
        self.summary = Some(summary.clone());
        Ok(())
    }
}
