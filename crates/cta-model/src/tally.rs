use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::decision::Decision;

/// Group used when a row carries no grouping key.
pub const UNKNOWN_GROUP: &str = "Unknown";

/// Per-decision counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTally {
    pub compliant: usize,
    pub needs_changes: usize,
    pub non_compliant: usize,
    pub empty: usize,
    pub skipped: usize,
}

impl AuditTally {
    pub fn record(&mut self, decision: Decision) {
        match decision {
            Decision::Compliant => self.compliant += 1,
            Decision::NeedsChanges => self.needs_changes += 1,
            Decision::NonCompliant => self.non_compliant += 1,
            Decision::Empty => self.empty += 1,
            Decision::Skip => self.skipped += 1,
        }
    }

    pub fn merge(&mut self, other: &AuditTally) {
        self.compliant += other.compliant;
        self.needs_changes += other.needs_changes;
        self.non_compliant += other.non_compliant;
        self.empty += other.empty;
        self.skipped += other.skipped;
    }

    /// Rows that were actually judged (neither blank nor exempt).
    pub fn processed(&self) -> usize {
        self.compliant + self.needs_changes + self.non_compliant
    }

    /// Judged rows that did not pass as-is.
    pub fn flagged(&self) -> usize {
        self.needs_changes + self.non_compliant
    }

    pub fn total(&self) -> usize {
        self.processed() + self.empty + self.skipped
    }

    /// Share of processed rows that were flagged, in percent.
    pub fn flagged_rate(&self) -> f64 {
        let processed = self.processed();
        if processed == 0 {
            return 0.0;
        }
        self.flagged() as f64 / processed as f64 * 100.0
    }
}

/// Batch-wide counts, overall and per grouping key (e.g. company).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub overall: AuditTally,
    pub by_group: BTreeMap<String, AuditTally>,
}

impl BatchSummary {
    pub fn record(&mut self, group: &str, decision: Decision) {
        self.overall.record(decision);
        let key = if group.trim().is_empty() {
            UNKNOWN_GROUP
        } else {
            group
        };
        self.by_group
            .entry(key.to_string())
            .or_default()
            .record(decision);
    }

    pub fn merge(&mut self, other: &BatchSummary) {
        self.overall.merge(&other.overall);
        for (group, tally) in &other.by_group {
            self.by_group.entry(group.clone()).or_default().merge(tally);
        }
    }

    /// Groups ordered by flagged count (descending), then name (case-insensitive).
    pub fn ranked_groups(&self) -> Vec<(&str, &AuditTally)> {
        let mut groups: Vec<(&str, &AuditTally)> = self
            .by_group
            .iter()
            .map(|(name, tally)| (name.as_str(), tally))
            .collect();
        groups.sort_by(|a, b| {
            b.1.flagged()
                .cmp(&a.1.flagged())
                .then_with(|| a.0.to_lowercase().cmp(&b.0.to_lowercase()))
        });
        groups
    }
}
