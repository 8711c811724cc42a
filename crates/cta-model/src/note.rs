use serde::{Deserialize, Serialize};

/// Whether a note asks for a change or only records an allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    /// The name was (or must be) altered; the row needs attention.
    Fix,
    /// An accepted variation of the convention, reported for the record.
    Info,
}

/// A single human-readable diagnostic produced while auditing a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub kind: NoteKind,
    pub message: String,
}

impl Note {
    pub fn fix(message: impl Into<String>) -> Self {
        Self {
            kind: NoteKind::Fix,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoteKind::Info,
            message: message.into(),
        }
    }

    pub fn is_fix(&self) -> bool {
        self.kind == NoteKind::Fix
    }
}

impl std::fmt::Display for Note {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
