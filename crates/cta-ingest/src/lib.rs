//! Tracking-sheet ingestion.
//!
//! Loads a CSV export of the document tracking sheet, finds the header row
//! and the file-name, grouping and audit columns, and yields the data rows
//! as [`cta_model::SourceRow`]s.

pub mod csv;
pub mod error;
pub mod sheet;

pub use crate::csv::{AuditColumns, SheetLayout, detect_layout};
pub use error::{IngestError, Result};
pub use sheet::CsvSheet;
