//! Rendering an outcome into the four audit cells of a sheet row.

use cta_model::{AuditOutcome, Decision};

pub const YES: &str = "Yes";
pub const NO: &str = "No";
pub const STATUS_OK: &str = "OK";
pub const STATUS_NEEDS_CHANGES: &str = "Needs Changes";

/// Text for the `File Name OK`, `Status`, `New file name` and `Notes` columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditCells {
    pub ok: &'static str,
    pub status: &'static str,
    pub new_name: String,
    pub notes: String,
}

/// Cells for one row, or `None` for skipped rows, which are left as they are.
pub fn render_cells(original: &str, outcome: &AuditOutcome) -> Option<AuditCells> {
    let (ok, status) = match outcome.decision {
        Decision::Skip => return None,
        Decision::Compliant => (YES, STATUS_OK),
        Decision::Empty | Decision::NeedsChanges | Decision::NonCompliant => {
            (NO, STATUS_NEEDS_CHANGES)
        }
    };
    Some(AuditCells {
        ok,
        status,
        new_name: outcome
            .replacement_for(original.trim())
            .unwrap_or_default()
            .to_string(),
        notes: outcome.joined_notes(),
    })
}

#[cfg(test)]
mod tests {
    use cta_model::Note;

    use super::*;

    fn outcome(decision: Decision, suggestion: Option<&str>, notes: &[&str]) -> AuditOutcome {
        AuditOutcome {
            decision,
            suggestion: suggestion.map(str::to_string),
            notes: notes.iter().map(|note| Note::fix(*note)).collect(),
            components: None,
        }
    }

    #[test]
    fn skipped_rows_have_no_cells() {
        assert_eq!(render_cells("RFI_1.pdf", &AuditOutcome::skip()), None);
    }

    #[test]
    fn empty_rows_need_changes() {
        let cells = render_cells("", &outcome(Decision::Empty, Some(""), &["Empty value."])).unwrap();
        assert_eq!((cells.ok, cells.status), (NO, STATUS_NEEDS_CHANGES));
        assert_eq!(cells.new_name, "");
        assert_eq!(cells.notes, "Empty value.");
    }

    #[test]
    fn new_name_only_when_different() {
        let changed = outcome(Decision::NeedsChanges, Some("LG_20240115_Plan_Rev1.pdf"), &["a.", "b."]);
        let cells = render_cells("LG_2024-01-15_Plan_Rev1.pdf", &changed).unwrap();
        assert_eq!(cells.new_name, "LG_20240115_Plan_Rev1.pdf");
        assert_eq!(cells.notes, "a.; b.");

        let same = outcome(Decision::Compliant, Some("LG_20240115_Plan_Rev1.pdf"), &[]);
        let cells = render_cells(" LG_20240115_Plan_Rev1.pdf ", &same).unwrap();
        assert_eq!((cells.ok, cells.status), (YES, STATUS_OK));
        assert_eq!(cells.new_name, "");
    }
}
