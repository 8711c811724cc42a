//! Rule tables for the document naming convention.
//!
//! The prefix families, exemption list, identifier labels, extension tokens
//! and length budget are data, loaded once into an immutable [`RuleTable`].

#![deny(unsafe_code)]

pub mod error;
pub mod family;
pub mod table;

pub use crate::error::RulesError;
pub use crate::family::{PrefixFamily, is_prefix_shape};
pub use crate::table::{DEFAULT_ID_LABEL, RULES_ENV_VAR, RuleTable, load_default_rules};
