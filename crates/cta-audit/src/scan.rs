//! Character classes shared by the normalizers.

/// Separators tolerated around and inside a revision marker.
pub(crate) fn is_revision_separator(ch: char) -> bool {
    matches!(ch, '_' | '-' | '.') || ch.is_whitespace()
}

/// Delimiters around a stray extension token in a title.
pub(crate) fn is_extension_delimiter(ch: char) -> bool {
    matches!(ch, '_' | '-' | '.')
}

/// Characters trimmed from the right of a title once its revision is removed.
pub(crate) fn is_title_edge(ch: char) -> bool {
    matches!(ch, '_' | '-' | '.' | ' ')
}

/// Characters allowed in titles and free-form identifiers.
pub(crate) fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-'
}

/// Digits as typed in a revision, where `O` stands in for zero.
pub(crate) fn is_revision_digit(ch: char) -> bool {
    ch.is_ascii_digit() || ch == 'O' || ch == 'o'
}

/// Case-insensitive ASCII comparison of `chars[at..]` against `word`.
pub(crate) fn word_at(chars: &[char], at: usize, word: &str) -> bool {
    let len = word.chars().count();
    at + len <= chars.len()
        && chars[at..at + len]
            .iter()
            .zip(word.chars())
            .all(|(a, b)| a.eq_ignore_ascii_case(&b))
}

pub(crate) fn is_ascii_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

/// Remove trailing characters matching `pred`.
pub(crate) fn trim_end_chars(chars: &[char], pred: impl Fn(char) -> bool) -> &[char] {
    let mut end = chars.len();
    while end > 0 && pred(chars[end - 1]) {
        end -= 1;
    }
    &chars[..end]
}
