//! Ordered, de-duplicated note log threaded through one audit.

use cta_model::{Note, NoteKind};

/// Fixed note texts. Parameterized notes are built by the functions below.
pub mod msg {
    pub const EMPTY_VALUE: &str = "Empty value.";
    pub const SPACE_BEFORE_EXTENSION: &str = "Removed space before file extension.";
    pub const DOUBLE_UNDERSCORE: &str = "Removed double underscore.";

    pub const INVALID_DATE: &str = "Invalid or missing date.";
    pub const DATE_FROM_DASHED: &str = "Normalized date from YYYY-MM-DD.";
    pub const DATE_FROM_MONTH_FIRST: &str = "Normalized date from M/D/YYYY.";
    pub const DATE_FROM_YEAR_FIRST: &str = "Normalized date from YYYY/M/D.";
    pub const DATE_STRAY_ZERO: &str = "Normalized date from malformed token (dropped stray 0).";
    pub const SKIPPED_BEFORE_DATE: &str = "Removed non-date token(s) before date.";

    pub const CSI_FROM_SIX_DIGITS: &str = "Auto-formatted CSI from 6 digits.";
    pub const CSI_FROM_EIGHT_DIGITS: &str = "Auto-formatted CSI from 8 digits.";
    pub const CSI_HYPHENATION: &str = "Corrected malformed CSI hyphenation.";
    pub const MISSING_CSI: &str = "Missing CSI section.";
    pub const INVALID_CSI: &str = "Invalid CSI-Section (require NN-NN-NN or NN-NN-NN-NN).";
    pub const NO_CSI_ALLOWED: &str = "No CSI provided (allowed for overall warranty).";

    pub const INVALID_NUMBER: &str = "Invalid or missing date/identifier.";
    pub const TEXT_AFTER_DATE_DROPPED: &str = "Removed text after date (only the revision element is kept).";

    pub const REVISION_NORMALIZED: &str = "Normalized revision element.";
    pub const REVISION_LETTER_O: &str = "Corrected letter 'O' to digit '0' in revision.";
    pub const REVISION_EMBEDDED: &str = "Removed embedded revision token from title.";
    pub const REVISION_DEFAULTED: &str = "Added Rev0 (missing revision element).";
    pub const REVISION_PERIOD: &str = "Removed extra period after revision element.";

    pub const TITLE_EXTENSION: &str = "Removed extra extension token from title.";
    pub const TITLE_AMPERSAND: &str = "Replaced '&' with 'and' in title.";
    pub const TITLE_SPACES: &str = "Removed spaces from title.";
    pub const TITLE_UNDERSCORES: &str = "Removed internal underscores from title.";
    pub const TITLE_SPECIAL: &str = "Removed special characters from title.";
    pub const TITLE_NORMALIZED: &str = "Normalized title.";

    pub const UNDERSCORE_COUNT: &str = "Unexpected underscore count after normalization (check for missing title or extra separators).";

    pub fn does_not_follow(convention: &str) -> String {
        format!("Does not follow {convention} file naming convention.")
    }

    pub fn title_truncated(budget: usize) -> String {
        format!("File name exceeds {budget}-character limit (title truncated).")
    }

    pub fn id_spaces(label: &str) -> String {
        format!("Removed spaces from {label}.")
    }

    pub fn id_underscores(label: &str) -> String {
        format!("Removed underscores from {label}.")
    }

    pub fn id_special(label: &str) -> String {
        format!("Removed special characters from {label}.")
    }

    pub fn id_digits_only(label: &str) -> String {
        format!("Corrected {label} to digits/dashes only.")
    }

    pub fn id_joined(label: &str) -> String {
        format!("Joined {label} parts with a dash.")
    }

    pub fn missing_id(label: &str) -> String {
        format!("Missing {label}.")
    }

    pub fn invalid_id(label: &str) -> String {
        format!("Invalid or missing {label}.")
    }

    pub fn missing_id_and_date(label: &str) -> String {
        format!("Missing {label} and/or date.")
    }

    pub fn missing_id_before_date(label: &str, pattern: &str) -> String {
        format!("Missing {label} before date. Expected {pattern}.")
    }

    pub fn id_absent_allowed(label: &str, prefix: &str) -> String {
        format!("No {label} provided (allowed for {prefix}).")
    }

    pub fn title_reinterpreted(label: &str, prefix: &str) -> String {
        format!("Reinterpreted first token as Title (missing {label} allowed for {prefix}).")
    }
}

/// Append-only note log for a single name.
///
/// A message that is already present is not recorded again, so repeated
/// checks for the same condition collapse into one note.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    notes: Vec<Note>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a change that the row's owner has to act on.
    pub fn fix(&mut self, message: impl Into<String>) {
        self.push(NoteKind::Fix, message.into());
    }

    /// Record an accepted variation of the convention.
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NoteKind::Info, message.into());
    }

    fn push(&mut self, kind: NoteKind, message: String) {
        if self.contains(&message) {
            return;
        }
        self.notes.push(Note { kind, message });
    }

    pub fn contains(&self, message: &str) -> bool {
        self.notes.iter().any(|note| note.message == message)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn has_fixes(&self) -> bool {
        self.notes.iter().any(Note::is_fix)
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.notes.iter().map(|note| note.message.as_str())
    }

    pub fn into_notes(self) -> Vec<Note> {
        self.notes
    }
}

/// A normalized value plus the note describing its repair, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repaired {
    pub value: String,
    pub note: Option<&'static str>,
}

impl Repaired {
    pub(crate) fn unchanged(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            note: None,
        }
    }

    pub(crate) fn with_note(value: impl Into<String>, note: &'static str) -> Self {
        Self {
            value: value.into(),
            note: Some(note),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_messages_collapse() {
        let mut diag = Diagnostics::new();
        diag.fix(msg::TITLE_EXTENSION);
        diag.fix(msg::TITLE_EXTENSION);
        diag.info(msg::NO_CSI_ALLOWED);
        assert_eq!(diag.len(), 2);
        assert!(diag.has_fixes());
    }

    #[test]
    fn info_only_log_has_no_fixes() {
        let mut diag = Diagnostics::new();
        diag.info(msg::id_absent_allowed("FormID", "TF"));
        assert!(!diag.has_fixes());
        assert_eq!(
            diag.messages().collect::<Vec<_>>(),
            vec!["No FormID provided (allowed for TF)."]
        );
    }
}
