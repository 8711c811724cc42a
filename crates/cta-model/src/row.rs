use serde::{Deserialize, Serialize};

use crate::decision::AuditOutcome;

/// One file name pulled from a tracking sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRow {
    /// Zero-based record index in the source, used to write results back.
    pub index: usize,
    pub name: String,
    pub group: String,
}

/// A source row paired with the engine's verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowResult {
    pub row: SourceRow,
    pub outcome: AuditOutcome,
}
