//! Machine-readable audit report.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use cta_model::{BatchSummary, RowResult};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ReportError, Result};

/// Everything a batch produced, in one serializable document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonReport {
    pub ruleset: String,
    pub source: String,
    /// RFC 3339 timestamp in UTC.
    pub generated_at: String,
    pub summary: BatchSummary,
    pub rows: Vec<RowResult>,
}

impl JsonReport {
    pub fn new(ruleset: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            ruleset: ruleset.into(),
            source: source.into(),
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            summary: BatchSummary::default(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, result: &RowResult) {
        self.rows.push(result.clone());
    }

    pub fn write_to<W: Write>(&self, mut writer: W, origin: &Path) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self).map_err(|source| ReportError::Json {
            path: origin.to_path_buf(),
            source,
        })?;
        writeln!(writer)
            .and_then(|()| writer.flush())
            .map_err(|source| ReportError::Write {
                path: origin.to_path_buf(),
                source,
            })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| ReportError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        self.write_to(BufWriter::new(file), path)?;
        info!(path = %path.display(), rows = self.rows.len(), "json report written");
        Ok(())
    }
}
