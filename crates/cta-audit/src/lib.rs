//! File-name audit engine.
//!
//! [`Auditor::audit`] takes one raw name and returns a decision, a
//! suggested canonical name and the notes explaining every change:
//!
//! - **tokenize**: extension split and underscore tokens
//! - **dispatch**: per-family reading of identifier and date positions
//! - **date**, **csi**, **identifier**: field normalizers
//! - **revision**, **title**: `Rev##` extraction and title cleanup
//! - **assemble**: length budget and reassembly
//! - **batch**: multi-threaded auditing of whole sheets

pub mod assemble;
pub mod batch;
pub mod csi;
pub mod date;
pub mod diagnostics;
pub mod dispatch;
pub mod engine;
pub mod identifier;
pub mod revision;
mod scan;
pub mod title;
pub mod tokenize;

pub use batch::{BatchOutcome, audit_rows, run_batch};
pub use diagnostics::{Diagnostics, Repaired};
pub use engine::Auditor;
