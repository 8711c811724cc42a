//! CSV reading and layout detection.

pub mod layout;
pub mod reader;

pub use layout::{AuditColumns, SheetLayout, detect_layout};
pub use reader::read_grid;
