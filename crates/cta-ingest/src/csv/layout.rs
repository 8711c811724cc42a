//! Locating the header row, the file-name column and the audit columns.
//!
//! All positions are zero-based record/cell indices into the sheet grid.

use serde::{Deserialize, Serialize};

/// Header labels that mark the file-name column.
pub const FILE_NAME_LABELS: [&str; 4] = ["File Name", "Filename", "Document Name", "file_name"];

/// Header labels that mark the grouping (company) column.
pub const GROUP_LABELS: [&str; 3] = ["Company", "Owner", "Organization"];

/// Rows and columns searched for a file-name label.
pub const SEARCH_LIMIT: usize = 60;

/// Header position used when no label is found (row 6, column B).
pub const FALLBACK_HEADER_ROW: usize = 5;
pub const FALLBACK_NAME_COLUMN: usize = 1;

/// Consecutive blank file-name cells that end the data block.
pub const BLANK_RUN_LIMIT: usize = 5;

/// Headers written over the four audit columns.
pub const OK_HEADER: &str = "File Name OK";
pub const STATUS_HEADER: &str = "Status";
pub const NEW_NAME_HEADER: &str = "New file name";
pub const NOTES_HEADER: &str = "Notes";

/// Where audit results go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditColumns {
    pub ok: usize,
    pub status: usize,
    pub new_name: usize,
    pub notes: usize,
    /// At least one audit column already existed in the header row.
    pub reused: bool,
}

impl AuditColumns {
    pub fn headers(&self) -> [(usize, &'static str); 4] {
        [
            (self.ok, OK_HEADER),
            (self.status, STATUS_HEADER),
            (self.new_name, NEW_NAME_HEADER),
            (self.notes, NOTES_HEADER),
        ]
    }

    /// One past the right-most audit column.
    pub fn width(&self) -> usize {
        [self.ok, self.status, self.new_name, self.notes]
            .into_iter()
            .max()
            .map_or(0, |last| last + 1)
    }
}

/// Detected structure of a tracking sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLayout {
    pub header_row: usize,
    pub name_column: usize,
    pub group_column: Option<usize>,
    /// False when the fallback position was used.
    pub detected: bool,
    /// First record after the data block.
    pub data_end: usize,
    pub audit: AuditColumns,
}

impl SheetLayout {
    /// Record indices that hold data rows.
    pub fn data_rows(&self) -> std::ops::Range<usize> {
        self.header_row + 1..self.data_end
    }
}

fn cell(grid: &[Vec<String>], row: usize, column: usize) -> Option<&str> {
    grid.get(row)?.get(column).map(String::as_str)
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|text| text.trim().is_empty())
}

fn matches_label(value: &str, labels: &[&str]) -> bool {
    let value = value.trim();
    labels.iter().any(|label| label.eq_ignore_ascii_case(value))
}

/// First cell, scanning rows then columns, that carries a file-name label.
fn find_name_header(grid: &[Vec<String>]) -> Option<(usize, usize)> {
    grid.iter().take(SEARCH_LIMIT).enumerate().find_map(|(row, cells)| {
        cells
            .iter()
            .take(SEARCH_LIMIT)
            .position(|value| matches_label(value, &FILE_NAME_LABELS))
            .map(|column| (row, column))
    })
}

/// Index one past the last non-blank file-name cell, stopping at a run of blanks.
fn find_data_end(grid: &[Vec<String>], header_row: usize, name_column: usize) -> usize {
    let mut end = header_row + 1;
    let mut blanks = 0;
    let mut row = header_row + 1;
    while blanks < BLANK_RUN_LIMIT {
        if is_blank(cell(grid, row, name_column)) {
            blanks += 1;
        } else {
            blanks = 0;
            end = row + 1;
        }
        row += 1;
    }
    end
}

fn find_audit_columns(header: &[String]) -> AuditColumns {
    let position = |label: &str| header.iter().position(|value| matches_label(value, &[label]));
    let existing = [
        position(OK_HEADER),
        position(STATUS_HEADER),
        position(NEW_NAME_HEADER),
        position(NOTES_HEADER),
    ];
    let reused = existing.iter().any(Option::is_some);

    let mut next = header
        .iter()
        .rposition(|value| !value.trim().is_empty())
        .unwrap_or(0);
    let mut allocate = |found: Option<usize>| {
        found.unwrap_or_else(|| {
            next += 1;
            next
        })
    };
    let [ok, status, new_name, notes] = existing.map(&mut allocate);
    AuditColumns {
        ok,
        status,
        new_name,
        notes,
        reused,
    }
}

/// Detect the sheet layout from the raw grid.
pub fn detect_layout(grid: &[Vec<String>]) -> SheetLayout {
    let (header_row, name_column, detected) = match find_name_header(grid) {
        Some((row, column)) => (row, column, true),
        None => (FALLBACK_HEADER_ROW, FALLBACK_NAME_COLUMN, false),
    };
    let header: &[String] = grid.get(header_row).map_or(&[], Vec::as_slice);
    let group_column = header
        .iter()
        .position(|value| matches_label(value, &GROUP_LABELS));

    SheetLayout {
        header_row,
        name_column,
        group_column,
        detected,
        data_end: find_data_end(grid, header_row, name_column),
        audit: find_audit_columns(header),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
            .collect()
    }

    #[test]
    fn test_detects_labelled_header() {
        let grid = grid(&[
            &["Project tracker"],
            &[],
            &["#", "Company", " file name ", "Due"],
            &["1", "Acme", "LG_20240115_Plan_Rev1.pdf", ""],
        ]);
        let layout = detect_layout(&grid);
        assert!(layout.detected);
        assert_eq!(layout.header_row, 2);
        assert_eq!(layout.name_column, 2);
        assert_eq!(layout.group_column, Some(1));
        assert_eq!(layout.data_rows(), 3..4);
        assert!(!layout.audit.reused);
        assert_eq!(
            (layout.audit.ok, layout.audit.status, layout.audit.new_name, layout.audit.notes),
            (4, 5, 6, 7)
        );
    }

    #[test]
    fn test_falls_back_to_row_six_column_b() {
        let grid = grid(&[&["a"], &[], &[], &[], &[], &["x", "Doc"], &["", "LG_1"]]);
        let layout = detect_layout(&grid);
        assert!(!layout.detected);
        assert_eq!((layout.header_row, layout.name_column), (5, 1));
        assert_eq!(layout.data_rows(), 6..7);
        assert_eq!(layout.group_column, None);
    }

    #[test]
    fn test_data_ends_after_blank_run() {
        let mut rows = vec![vec!["File Name"], vec!["a"], vec![""], vec!["b"]];
        rows.extend(std::iter::repeat_n(vec![""], BLANK_RUN_LIMIT));
        rows.push(vec!["ignored"]);
        let grid: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(String::from).collect())
            .collect();
        let layout = detect_layout(&grid);
        assert_eq!(layout.data_rows(), 1..4);
    }

    #[test]
    fn test_reuses_existing_audit_columns() {
        let grid = grid(&[&["File Name", "Status", "", "Notes", "Owner"]]);
        let layout = detect_layout(&grid);
        assert!(layout.audit.reused);
        assert_eq!(layout.audit.status, 1);
        assert_eq!(layout.audit.notes, 3);
        assert_eq!(layout.audit.ok, 5);
        assert_eq!(layout.audit.new_name, 6);
        assert_eq!(layout.audit.width(), 7);
        assert_eq!(layout.group_column, Some(4));
    }
}
