//! Splitting a raw name into extension and underscore-delimited tokens.

use crate::diagnostics::{Diagnostics, msg};

/// A trimmed name split at its last period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitName<'a> {
    pub stem: &'a str,
    /// Extension including the leading period, or empty.
    pub extension: &'a str,
}

pub fn split_extension(name: &str) -> SplitName<'_> {
    match name.rfind('.') {
        Some(dot) => SplitName {
            stem: &name[..dot],
            extension: &name[dot..],
        },
        None => SplitName {
            stem: name,
            extension: "",
        },
    }
}

/// True when whitespace sits directly before a trailing alphanumeric extension.
pub fn has_space_before_extension(name: &str) -> bool {
    let Some(dot) = name.rfind('.') else {
        return false;
    };
    let extension = &name[dot + 1..];
    !extension.is_empty()
        && extension.bytes().all(|b| b.is_ascii_alphanumeric())
        && name[..dot].chars().next_back().is_some_and(char::is_whitespace)
}

/// Collapse underscore runs and split the stem into non-empty tokens.
pub fn tokenize(stem: &str, diag: &mut Diagnostics) -> Vec<String> {
    if stem.contains("__") {
        diag.fix(msg::DOUBLE_UNDERSCORE);
    }
    stem.split('_')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
