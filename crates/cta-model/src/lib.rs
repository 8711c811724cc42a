//! Shared types for the file-name audit workspace.

pub mod decision;
pub mod note;
pub mod row;
pub mod sink;
pub mod tally;

pub use decision::{AuditOutcome, Decision, NormalizedComponents};
pub use note::{Note, NoteKind};
pub use row::{RowResult, SourceRow};
pub use sink::{ResultSink, RowSource, SummarySink};
pub use tally::{AuditTally, BatchSummary, UNKNOWN_GROUP};
