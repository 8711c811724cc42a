//! Date token normalization to `YYYYMMDD`.

use chrono::NaiveDate;

use crate::diagnostics::{Repaired, msg};
use crate::scan::is_ascii_digits;

/// Normalize one date token.
///
/// Accepts `YYYYMMDD` unchanged and repairs `YYYY-MM-DD`, `M/D/YYYY`,
/// `YYYY/M/D` and the nine-digit `YYYY0MMDD` slip. The nine-digit form is
/// only taken when the repaired value is a real calendar date; the other
/// forms are reshaped without calendar checks.
pub fn normalize_date(token: &str) -> Option<Repaired> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    if is_ascii_digits(token, 8) {
        return Some(Repaired::unchanged(token));
    }
    if let Some(value) = parse_dashed(token) {
        return Some(Repaired::with_note(value, msg::DATE_FROM_DASHED));
    }
    if let Some(value) = parse_slashed(token) {
        return Some(value);
    }
    parse_stray_zero(token).map(|value| Repaired::with_note(value, msg::DATE_STRAY_ZERO))
}

fn parse_dashed(token: &str) -> Option<String> {
    let mut parts = token.split('-');
    let (year, month, day) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    if is_ascii_digits(year, 4) && is_ascii_digits(month, 2) && is_ascii_digits(day, 2) {
        Some(format!("{year}{month}{day}"))
    } else {
        None
    }
}

fn parse_slashed(token: &str) -> Option<Repaired> {
    let mut parts = token.split('/');
    let (first, second, third) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    if is_short_number(first) && is_short_number(second) && is_ascii_digits(third, 4) {
        let value = format!("{third}{:0>2}{:0>2}", first, second);
        return Some(Repaired::with_note(value, msg::DATE_FROM_MONTH_FIRST));
    }
    if is_ascii_digits(first, 4) && is_short_number(second) && is_short_number(third) {
        let value = format!("{first}{:0>2}{:0>2}", second, third);
        return Some(Repaired::with_note(value, msg::DATE_FROM_YEAR_FIRST));
    }
    None
}

fn parse_stray_zero(token: &str) -> Option<String> {
    if !is_ascii_digits(token, 9) || &token[4..5] != "0" {
        return None;
    }
    let (year, month, day) = (&token[..4], &token[5..7], &token[7..9]);
    let valid = NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?);
    valid.map(|_| format!("{year}{month}{day}"))
}

fn is_short_number(value: &str) -> bool {
    (1..=2).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(token: &str) -> Option<String> {
        normalize_date(token).map(|r| r.value)
    }

    #[test]
    fn compact_dates_pass_through() {
        assert_eq!(normalize_date("20240115"), Some(Repaired::unchanged("20240115")));
        assert_eq!(value(" 20240115 "), Some("20240115".to_string()));
    }

    #[test]
    fn dashed_and_slashed_forms() {
        assert_eq!(value("2024-01-15"), Some("20240115".to_string()));
        assert_eq!(value("1/5/2024"), Some("20240105".to_string()));
        assert_eq!(value("12/25/2023"), Some("20231225".to_string()));
        assert_eq!(value("2024/3/7"), Some("20240307".to_string()));
        assert_eq!(
            normalize_date("2024/3/7").and_then(|r| r.note),
            Some(msg::DATE_FROM_YEAR_FIRST)
        );
    }

    #[test]
    fn stray_zero_requires_a_real_date() {
        let repaired = normalize_date("202400115").expect("repairable");
        assert_eq!(repaired.value, "20240115");
        assert_eq!(repaired.note, Some(msg::DATE_STRAY_ZERO));
        assert_eq!(value("202401399"), None);
        assert_eq!(value("202410115"), None);
    }

    #[test]
    fn rejects_non_dates() {
        for token in ["", "2024011", "2024-1-15", "Jan2024", "03-07-08", "1/5/24", "123456789"] {
            assert_eq!(value(token), None, "{token}");
        }
    }
}
