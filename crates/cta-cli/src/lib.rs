//! Library side of the `cta-cli` binary: logging, commands, and console output.

pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
