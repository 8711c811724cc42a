//! Audit outputs.
//!
//! - **analyzed**: the tracking sheet with `File Name OK`, `Status`,
//!   `New file name` and `Notes` filled in, as CSV
//! - **json**: the full result set and summary as JSON
//! - **set**: both outputs behind the batch sink traits

pub mod analyzed;
pub mod cells;
pub mod error;
pub mod json;
pub mod set;

pub use analyzed::AnalyzedSheet;
pub use cells::{AuditCells, render_cells};
pub use error::{ReportError, Result};
pub use json::JsonReport;
pub use set::ReportSet;
