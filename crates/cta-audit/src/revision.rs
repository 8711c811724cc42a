//! Locating, normalizing and removing the `Rev##` element.
//!
//! The revision is looked for in three places, in order:
//!
//! 1. the canonical `_Rev#` / `_Rev##` suffix,
//! 2. any case of `Rev` at the end of the text, with separators on either side
//!    and `O` typed for zero,
//! 3. revision markers embedded in the title, which are removed; the last one
//!    supplies the digits.
//!
//! Without any of these the element defaults to `Rev0`.

use crate::diagnostics::{Diagnostics, msg};
use crate::scan::{is_revision_digit, is_revision_separator, is_title_edge, trim_end_chars, word_at};

const MARKER: &str = "rev";

/// Title text with its revision element removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionSplit {
    pub remainder: String,
    /// Canonical element such as `Rev2` or `Rev03`.
    pub revision: String,
}

/// A revision marker found in a run of characters.
#[derive(Debug, Clone, Copy)]
struct Marker {
    /// First character of the match, leading separators included.
    start: usize,
    /// One past the last revision digit.
    end: usize,
    digits_at: usize,
}

/// Split `trailing` into title remainder and revision element.
pub fn extract_revision(trailing: &str, diag: &mut Diagnostics) -> RevisionSplit {
    let chars: Vec<char> = trailing.trim_end().chars().collect();
    let trailing_period = has_period_after_revision(&chars);

    let (remainder, digits) = if let Some(start) = canonical_suffix(&chars) {
        let digits: String = chars[start + 4..].iter().collect();
        (collect_trimmed(&chars[..start]), Some(digits))
    } else if let Some(marker) = suffix_marker(&chars) {
        let raw: String = chars[marker.digits_at..marker.end].iter().collect();
        let digits = canonical_digits(&raw);
        if digits != raw {
            diag.fix(msg::REVISION_LETTER_O);
        }
        diag.fix(msg::REVISION_NORMALIZED);
        (collect_trimmed(&chars[..marker.start]), Some(digits))
    } else {
        let (kept, digits) = remove_embedded(&chars);
        if kept.len() != chars.len() {
            diag.fix(msg::REVISION_EMBEDDED);
            diag.fix(msg::REVISION_NORMALIZED);
        }
        (collect_trimmed(&kept), digits)
    };

    let digits = digits.unwrap_or_else(|| {
        diag.fix(msg::REVISION_DEFAULTED);
        "0".to_string()
    });
    if trailing_period {
        diag.fix(msg::REVISION_PERIOD);
    }
    RevisionSplit {
        remainder,
        revision: format!("Rev{digits}"),
    }
}

/// Digits of the end-anchored revision, or failing that the first embedded one.
///
/// Used when the grammar fixes the title and only the revision is read
/// from the leftover tokens.
pub fn find_revision_digits(text: &str) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    let marker = suffix_marker(&chars).or_else(|| {
        let mut at = 0;
        while at < chars.len() {
            if let Some(marker) = embedded_marker(&chars, at) {
                return Some(marker);
            }
            at += 1;
        }
        None
    })?;
    let raw: String = chars[marker.digits_at..marker.end].iter().collect();
    Some(canonical_digits(&raw))
}

/// Uppercase, `O` to `0`, at most two characters.
fn canonical_digits(raw: &str) -> String {
    raw.chars()
        .map(|ch| if ch.eq_ignore_ascii_case(&'o') { '0' } else { ch })
        .take(2)
        .collect()
}

/// Start of a case-sensitive `_Rev` followed by one or two digits at the end.
fn canonical_suffix(chars: &[char]) -> Option<usize> {
    let digits = chars.iter().rev().take_while(|ch| ch.is_ascii_digit()).count();
    if !(1..=2).contains(&digits) || chars.len() < digits + 4 {
        return None;
    }
    let start = chars.len() - digits - 4;
    let marker: String = chars[start..start + 4].iter().collect();
    (marker == "_Rev").then_some(start)
}

/// `Rev` plus one or two revision digits ending exactly at `end`.
fn marker_ending_at(chars: &[char], end: usize) -> Option<Marker> {
    (1..=2).find_map(|width| {
        if end < width {
            return None;
        }
        let digits_at = end - width;
        if !chars[digits_at..end].iter().all(|&ch| is_revision_digit(ch)) {
            return None;
        }
        let mut cursor = digits_at;
        while cursor > 0 && is_revision_separator(chars[cursor - 1]) {
            cursor -= 1;
        }
        if cursor < MARKER.len() || !word_at(chars, cursor - MARKER.len(), MARKER) {
            return None;
        }
        let mut start = cursor - MARKER.len();
        while start > 0 && is_revision_separator(chars[start - 1]) {
            start -= 1;
        }
        Some(Marker {
            start,
            end,
            digits_at,
        })
    })
}

fn suffix_marker(chars: &[char]) -> Option<Marker> {
    marker_ending_at(chars, chars.len())
}

/// True when a revision marker is followed by a single stray period.
fn has_period_after_revision(chars: &[char]) -> bool {
    match chars.split_last() {
        Some(('.', body)) => suffix_marker(body).is_some(),
        _ => false,
    }
}

/// Whether a marker or orphaned `Rev` may begin at `at`: start of text, or a
/// separator that the match consumes.
fn marker_word_start(chars: &[char], at: usize) -> Vec<usize> {
    let mut candidates = Vec::with_capacity(2);
    if at == 0 {
        candidates.push(0);
    }
    if at < chars.len() && is_revision_separator(chars[at]) {
        candidates.push(at + 1);
    }
    candidates
}

fn boundary_after(chars: &[char], at: usize) -> bool {
    at == chars.len() || is_revision_separator(chars[at])
}

/// A separated `Rev##` starting at `at`.
fn embedded_marker(chars: &[char], at: usize) -> Option<Marker> {
    marker_word_start(chars, at).into_iter().find_map(|word| {
        if !word_at(chars, word, MARKER) {
            return None;
        }
        let mut digits_at = word + MARKER.len();
        while digits_at < chars.len() && is_revision_separator(chars[digits_at]) {
            digits_at += 1;
        }
        [2, 1].into_iter().find_map(|width| {
            let end = digits_at + width;
            let fits = end <= chars.len()
                && chars[digits_at..end].iter().all(|&ch| is_revision_digit(ch))
                && boundary_after(chars, end);
            fits.then_some(Marker {
                start: at,
                end,
                digits_at,
            })
        })
    })
}

/// A separated `Rev` with no digits starting at `at`; returns its end.
fn orphan_marker(chars: &[char], at: usize) -> Option<usize> {
    marker_word_start(chars, at).into_iter().find_map(|word| {
        let end = word + MARKER.len();
        (word_at(chars, word, MARKER) && boundary_after(chars, end)).then_some(end)
    })
}

/// Drop every embedded marker; the last one supplies the digits. When none
/// carries digits, orphaned `Rev` words are dropped instead.
fn remove_embedded(chars: &[char]) -> (Vec<char>, Option<String>) {
    let mut kept = Vec::with_capacity(chars.len());
    let mut digits = None;
    let mut at = 0;
    while at < chars.len() {
        if let Some(marker) = embedded_marker(chars, at) {
            let raw: String = chars[marker.digits_at..marker.end].iter().collect();
            digits = Some(canonical_digits(&raw));
            at = marker.end;
        } else {
            kept.push(chars[at]);
            at += 1;
        }
    }
    if kept.len() != chars.len() {
        return (kept, digits);
    }

    kept.clear();
    let mut at = 0;
    while at < chars.len() {
        if let Some(end) = orphan_marker(chars, at) {
            at = end;
        } else {
            kept.push(chars[at]);
            at += 1;
        }
    }
    (kept, None)
}

fn collect_trimmed(chars: &[char]) -> String {
    trim_end_chars(chars, is_title_edge).iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_split(text: &str) -> (RevisionSplit, Vec<String>) {
        let mut diag = Diagnostics::new();
        let split = extract_revision(text, &mut diag);
        let notes = diag.messages().map(str::to_string).collect();
        (split, notes)
    }

    #[test]
    fn canonical_suffix_is_silent() {
        let (split, notes) = run_split("Inspection_Rev2");
        assert_eq!(split.remainder, "Inspection");
        assert_eq!(split.revision, "Rev2");
        assert!(notes.is_empty());

        let (split, _) = run_split("Report_Rev03");
        assert_eq!(split.revision, "Rev03");
    }

    #[test]
    fn loose_suffix_is_normalized() {
        let (split, notes) = run_split("Site Plan rev-1");
        assert_eq!(split.remainder, "Site Plan");
        assert_eq!(split.revision, "Rev1");
        assert_eq!(notes, [msg::REVISION_NORMALIZED]);
    }

    #[test]
    fn letter_o_becomes_zero() {
        let (split, notes) = run_split("Plan_RevO2");
        assert_eq!(split.revision, "Rev02");
        assert_eq!(notes, [msg::REVISION_LETTER_O, msg::REVISION_NORMALIZED]);
    }

    #[test]
    fn embedded_revision_is_removed() {
        let (split, notes) = run_split("Plan_Rev1_Final");
        assert_eq!(split.remainder, "Plan_Final");
        assert_eq!(split.revision, "Rev1");
        assert_eq!(notes, [msg::REVISION_EMBEDDED, msg::REVISION_NORMALIZED]);
    }

    #[test]
    fn last_embedded_revision_wins() {
        let (split, _) = run_split("Rev1_Plan_Rev2_Final");
        assert_eq!(split.remainder, "_Plan_Final");
        assert_eq!(split.revision, "Rev2");
    }

    #[test]
    fn orphaned_marker_is_dropped_and_defaulted() {
        let (split, notes) = run_split("Plan_Rev_Final");
        assert_eq!(split.remainder, "Plan_Final");
        assert_eq!(split.revision, "Rev0");
        assert_eq!(
            notes,
            [
                msg::REVISION_EMBEDDED,
                msg::REVISION_NORMALIZED,
                msg::REVISION_DEFAULTED
            ]
        );
    }

    #[test]
    fn missing_revision_defaults_to_zero() {
        let (split, notes) = run_split("Site_Plan");
        assert_eq!(split.remainder, "Site_Plan");
        assert_eq!(split.revision, "Rev0");
        assert_eq!(notes, [msg::REVISION_DEFAULTED]);
    }

    #[test]
    fn words_containing_rev_are_left_alone() {
        let (split, _) = run_split("Review_Notes");
        assert_eq!(split.remainder, "Review_Notes");
        assert_eq!(split.revision, "Rev0");
    }

    #[test]
    fn trailing_period_is_reported() {
        let (split, notes) = run_split("Plan_Rev1.");
        assert_eq!(split.remainder, "Plan");
        assert_eq!(split.revision, "Rev1");
        assert!(notes.contains(&msg::REVISION_PERIOD.to_string()));
    }

    #[test]
    fn finds_digits_for_fixed_titles() {
        assert_eq!(find_revision_digits("Rev02"), Some("02".to_string()));
        assert_eq!(find_revision_digits("Rev1_Copy"), Some("1".to_string()));
        assert_eq!(find_revision_digits("Copy"), None);
    }
}
