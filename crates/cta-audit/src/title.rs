//! Title cleanup: stray extension tokens and disallowed characters.

use crate::diagnostics::{Diagnostics, msg};
use crate::scan::{is_extension_delimiter, is_name_char, word_at};

/// Remove extension words that leaked into a title, then tidy delimiters.
///
/// A token is removed wherever it stands between delimiters; one more is
/// stripped if the text still ends with it. `extensions` must be lowercase
/// and ordered longest first.
pub fn strip_extension_tokens(text: &str, extensions: &[String], diag: &mut Diagnostics) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut kept: Vec<char> = Vec::with_capacity(chars.len());
    let mut at = 0;
    while at < chars.len() {
        match delimited_extension(&chars, at, extensions) {
            Some(end) => at = end,
            None => {
                kept.push(chars[at]);
                at += 1;
            }
        }
    }
    let trailing = extensions.iter().find(|ext| {
        let len = ext.chars().count();
        len <= kept.len() && word_at(&kept, kept.len() - len, ext)
    });
    if let Some(ext) = trailing {
        kept.truncate(kept.len() - ext.chars().count());
    }
    if kept != chars {
        diag.fix(msg::TITLE_EXTENSION);
    }
    tidy_delimiters(&kept)
}

/// End of an extension token that starts the text or follows a delimiter at `at`.
fn delimited_extension(chars: &[char], at: usize, extensions: &[String]) -> Option<usize> {
    let mut starts = Vec::with_capacity(2);
    if at == 0 {
        starts.push(0);
    }
    if is_extension_delimiter(chars[at]) {
        starts.push(at + 1);
    }
    starts.into_iter().find_map(|word| {
        extensions.iter().find_map(|ext| {
            let end = word + ext.chars().count();
            let bounded = end == chars.len() || (end < chars.len() && is_extension_delimiter(chars[end]));
            (word_at(chars, word, ext) && bounded).then_some(end)
        })
    })
}

/// Runs of two or more delimiters become one hyphen; edges lose delimiters.
fn tidy_delimiters(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len());
    let mut at = 0;
    while at < chars.len() {
        if is_extension_delimiter(chars[at]) {
            let run = chars[at..].iter().take_while(|&&ch| is_extension_delimiter(ch)).count();
            if run >= 2 {
                out.push('-');
            } else {
                out.push(chars[at]);
            }
            at += run;
        } else {
            out.push(chars[at]);
            at += 1;
        }
    }
    out.trim_matches(is_extension_delimiter).to_string()
}

/// Reduce a raw title to letters, digits and hyphens.
///
/// Each kind of change gets its own note. A change that none of them
/// describes is reported as a generic title normalization.
pub fn sanitize_title(raw: &str, extensions: &[String], diag: &mut Diagnostics) -> String {
    let before = diag.len();
    let mut title = strip_extension_tokens(raw, extensions, diag);

    if title.contains('&') {
        title = title.replace('&', "and");
        diag.fix(msg::TITLE_AMPERSAND);
    }
    if title.contains(' ') {
        title.retain(|ch| !ch.is_whitespace());
        diag.fix(msg::TITLE_SPACES);
    }
    if title.contains('_') {
        title.retain(|ch| ch != '_');
        diag.fix(msg::TITLE_UNDERSCORES);
    }
    let allowed: String = title.chars().filter(|&ch| is_name_char(ch)).collect();
    if allowed != title {
        diag.fix(msg::TITLE_SPECIAL);
    }
    let title = strip_extension_tokens(&allowed, extensions, diag);

    if title != raw && diag.len() == before {
        diag.fix(msg::TITLE_NORMALIZED);
    }
    title
}
