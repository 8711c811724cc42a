use std::path::PathBuf;

use cta_model::{AuditOutcome, BatchSummary};
use serde::Serialize;

/// Inputs for one sheet audit.
#[derive(Debug, Clone)]
pub struct AuditOptions {
    pub sheet: PathBuf,
    /// Analyzed sheet path; `<stem>_ANALYZED.csv` beside the input when unset.
    pub output: Option<PathBuf>,
    pub json: Option<PathBuf>,
    pub rules: Option<PathBuf>,
    pub workers: usize,
}

/// What a sheet audit produced.
#[derive(Debug, Clone)]
pub struct AuditRun {
    pub sheet: PathBuf,
    pub analyzed: PathBuf,
    pub json: Option<PathBuf>,
    pub ruleset: String,
    /// False when the header row fell back to the fixed position.
    pub layout_detected: bool,
    pub summary: BatchSummary,
}

impl AuditRun {
    pub fn has_flagged(&self) -> bool {
        self.summary.overall.flagged() > 0
    }
}

/// One name audited from the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckedName {
    pub name: String,
    #[serde(flatten)]
    pub outcome: AuditOutcome,
}
