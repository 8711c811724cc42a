//! Loading tracking sheets from files on disk.

use std::fs;
use std::path::Path;

use cta_ingest::{CsvSheet, IngestError};
use cta_model::RowSource;
use tempfile::TempDir;

fn write_sheet(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

const TRACKER: &str = "\
Document Tracker,,,
Prepared by,Controls,,
,,,
No.,Company,File Name,Comments
1,Acme,LG_20240115_SitePlan_Rev1.pdf,
2,Birch ,COR_01/15/2024_Site_Visit_Notes.pdf,late
3,,,
4,Acme,XYZ_20240101_Something.pdf,
,,,
,,,
,,,
,,,
,,,
9,Acme,after the gap,
";

#[test]
fn loads_rows_from_detected_layout() {
    let dir = TempDir::new().unwrap();
    let path = write_sheet(&dir, "tracker.csv", TRACKER);
    let sheet = CsvSheet::open(&path).unwrap();

    let layout = sheet.layout();
    assert!(layout.detected);
    assert_eq!(layout.header_row, 3);
    assert_eq!(layout.name_column, 2);
    assert_eq!(layout.group_column, Some(1));

    let rows = sheet.rows();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].index, 4);
    assert_eq!(rows[0].name, "LG_20240115_SitePlan_Rev1.pdf");
    assert_eq!(rows[1].group, "Birch");
    assert_eq!(rows[2].name, "");
    assert_eq!(rows[3].name, "XYZ_20240101_Something.pdf");
}

#[test]
fn analyzed_copy_sits_beside_input() {
    let dir = TempDir::new().unwrap();
    let path = write_sheet(&dir, "tracker.csv", TRACKER);
    let sheet = CsvSheet::open(&path).unwrap();
    assert_eq!(sheet.analyzed_path(), dir.path().join("tracker_ANALYZED.csv"));
}

#[test]
fn missing_file_is_reported() {
    let err = CsvSheet::open(Path::new("/definitely/not/here.csv")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn empty_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_sheet(&dir, "empty.csv", "");
    let err = CsvSheet::open(&path).unwrap_err();
    assert!(matches!(err, IngestError::EmptySheet { .. }));
}

#[test]
fn unlabelled_sheet_uses_fallback_position() {
    let dir = TempDir::new().unwrap();
    let contents = "a,b\n,\n,\n,\n,\nx,Docs\ny,LG_20240115_SitePlan_Rev1.pdf\n";
    let path = write_sheet(&dir, "plain.csv", contents);
    let sheet = CsvSheet::open(&path).unwrap();
    assert!(!sheet.layout().detected);
    assert_eq!(sheet.rows().len(), 1);
    assert_eq!(sheet.rows()[0].group, "");
}
