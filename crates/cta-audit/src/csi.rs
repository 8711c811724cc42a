//! CSI section codes: `NN-NN-NN` or `NN-NN-NN-NN`.

use crate::diagnostics::{Repaired, msg};
use crate::scan::is_ascii_digits;

/// Normalize a CSI section token, or `None` when it cannot be one.
///
/// Six or eight digits are regrouped in pairs whatever separators they
/// came with.
pub fn normalize_csi(token: &str) -> Option<Repaired> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    if is_canonical(token) {
        return Some(Repaired::unchanged(token));
    }
    let digits: Vec<char> = token.chars().filter(char::is_ascii_digit).collect();
    let note = match digits.len() {
        6 | 8 if token.contains('-') => msg::CSI_HYPHENATION,
        6 => msg::CSI_FROM_SIX_DIGITS,
        8 => msg::CSI_FROM_EIGHT_DIGITS,
        _ => return None,
    };
    let grouped = digits
        .chunks(2)
        .map(|pair| pair.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("-");
    Some(Repaired::with_note(grouped, note))
}

fn is_canonical(token: &str) -> bool {
    let groups: Vec<&str> = token.split('-').collect();
    matches!(groups.len(), 3 | 4) && groups.iter().all(|g| is_ascii_digits(g, 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_codes_are_unchanged() {
        assert_eq!(normalize_csi("03-07-08"), Some(Repaired::unchanged("03-07-08")));
        assert_eq!(normalize_csi("26-05-19-13"), Some(Repaired::unchanged("26-05-19-13")));
    }

    #[test]
    fn bare_digits_are_grouped() {
        let six = normalize_csi("030708").expect("six digits");
        assert_eq!(six.value, "03-07-08");
        assert_eq!(six.note, Some(msg::CSI_FROM_SIX_DIGITS));
        let eight = normalize_csi("26051913").expect("eight digits");
        assert_eq!(eight.value, "26-05-19-13");
        assert_eq!(eight.note, Some(msg::CSI_FROM_EIGHT_DIGITS));
    }

    #[test]
    fn bad_hyphenation_is_corrected() {
        let fixed = normalize_csi("0307-08").expect("regroupable");
        assert_eq!(fixed.value, "03-07-08");
        assert_eq!(fixed.note, Some(msg::CSI_HYPHENATION));
    }

    #[test]
    fn wrong_digit_counts_are_rejected() {
        for token in ["", "0307", "0307081", "3-7-8", "Inspection", "03-07-08-1"] {
            assert_eq!(normalize_csi(token), None, "{token}");
        }
    }
}
