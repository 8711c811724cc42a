//! Identifier cleanup for the free-form and numeric identifier families.

use crate::diagnostics::{Diagnostics, msg};
use crate::scan::is_name_char;

/// Keep letters, digits and hyphens, noting each kind of removal under `label`.
pub fn sanitize_free_form(raw: &str, label: &str, diag: &mut Diagnostics) -> String {
    let mut id = raw.to_string();
    if id.contains(' ') {
        id.retain(|ch| !ch.is_whitespace());
        diag.fix(msg::id_spaces(label));
    }
    if id.contains('_') {
        id.retain(|ch| ch != '_');
        diag.fix(msg::id_underscores(label));
    }
    let allowed: String = id.chars().filter(|&ch| is_name_char(ch)).collect();
    if allowed != id {
        diag.fix(msg::id_special(label));
    }
    allowed
}

/// Keep digits and hyphens. The result must start with a digit.
pub fn sanitize_numeric(raw: &str, label: &str, diag: &mut Diagnostics) -> Option<String> {
    let mut id: String = raw.chars().filter(|ch| !ch.is_whitespace()).collect();
    if id.contains('_') {
        id.retain(|ch| ch != '_');
        diag.fix(msg::id_underscores(label));
    }
    let numeric: String = id.chars().filter(|&ch| ch.is_ascii_digit() || ch == '-').collect();
    if !numeric.starts_with(|ch: char| ch.is_ascii_digit()) {
        return None;
    }
    if numeric != raw {
        diag.fix(msg::id_digits_only(label));
    }
    Some(numeric)
}
