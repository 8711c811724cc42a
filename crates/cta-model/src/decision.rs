use serde::{Deserialize, Serialize};

use crate::note::Note;

/// Final judgement for one file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Blank or whitespace-only input.
    Empty,
    /// Prefix is exempt from the convention; the row is left untouched.
    Skip,
    /// The name already follows the convention.
    Compliant,
    /// A compliant name was synthesized, or a fix note was recorded.
    NeedsChanges,
    /// No legal arrangement of the name exists.
    NonCompliant,
}

impl Decision {
    /// Rows that a document controller has to look at.
    pub fn needs_attention(self) -> bool {
        matches!(
            self,
            Decision::Empty | Decision::NeedsChanges | Decision::NonCompliant
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Empty => "empty",
            Decision::Skip => "skip",
            Decision::Compliant => "compliant",
            Decision::NeedsChanges => "needs_changes",
            Decision::NonCompliant => "non_compliant",
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural fields of a canonical name, after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedComponents {
    pub prefix: String,
    pub identifier: Option<String>,
    /// Eight digits, `YYYYMMDD`.
    pub date: String,
    pub title: String,
    /// `Rev` followed by one or two digits.
    pub revision: String,
}

/// Everything the engine reports for a single name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditOutcome {
    pub decision: Decision,
    /// `None` only for [`Decision::Skip`]; empty for `Empty` and `NonCompliant`.
    pub suggestion: Option<String>,
    pub notes: Vec<Note>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<NormalizedComponents>,
}

impl AuditOutcome {
    pub fn skip() -> Self {
        Self {
            decision: Decision::Skip,
            suggestion: None,
            notes: Vec::new(),
            components: None,
        }
    }

    /// Notes joined the way they are written into a report cell.
    pub fn joined_notes(&self) -> String {
        self.notes
            .iter()
            .map(|note| note.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// The suggestion, if it is non-empty and differs from `original`.
    pub fn replacement_for(&self, original: &str) -> Option<&str> {
        self.suggestion
            .as_deref()
            .filter(|suggestion| !suggestion.is_empty() && *suggestion != original)
    }
}
