//! Per-family interpretation of the tokens that follow the prefix.

use cta_standards::{PrefixFamily, RuleTable};

use crate::csi::normalize_csi;
use crate::date::normalize_date;
use crate::diagnostics::{Diagnostics, msg};
use crate::identifier::{sanitize_free_form, sanitize_numeric};
use crate::revision::{extract_revision, find_revision_digits};

/// Components read from the tokens, before revision and title cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub identifier: Option<String>,
    pub date: String,
    /// Remaining tokens joined with `_`; still carries the revision.
    pub title: String,
    /// Set when the grammar already settled the revision element.
    pub revision: Option<String>,
}

impl Extraction {
    fn new(identifier: Option<String>, date: String, rest: &[String], from: usize) -> Self {
        Self {
            identifier,
            date,
            title: join_from(rest, from),
            revision: None,
        }
    }
}

/// The tokens cannot be read under the prefix's grammar.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rejection {
    /// Specific reason, recorded ahead of the generic non-compliance note.
    pub reason: Option<String>,
}

impl Rejection {
    fn because(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
        }
    }
}

type Dispatch = Result<Extraction, Rejection>;

/// Interpret `rest` (the tokens after `prefix`) under `family`.
pub fn dispatch(
    prefix: &str,
    family: PrefixFamily,
    rest: &[String],
    rules: &RuleTable,
    diag: &mut Diagnostics,
) -> Dispatch {
    let label = rules.id_label(prefix);
    match family {
        PrefixFamily::NoId | PrefixFamily::Re => date_first(rest, diag),
        PrefixFamily::Cor => correspondence(rest, diag),
        PrefixFamily::IdAny | PrefixFamily::IdDigitsDashes | PrefixFamily::Au => {
            identified(prefix, label, family, rest, diag)
        }
        PrefixFamily::CsiRequired => csi_required(rest, diag),
        PrefixFamily::CsiOptional | PrefixFamily::Pn | PrefixFamily::Sp => {
            csi_optional(rest, false, diag)
        }
        PrefixFamily::Wr => csi_optional(rest, true, diag),
        PrefixFamily::Qa => optional_identifier(label, rest, diag),
        PrefixFamily::Fdm => task_identifiers(label, rest, diag),
        PrefixFamily::Tf => transmittal_form(prefix, label, rest, diag),
    }
}

fn join_from(rest: &[String], from: usize) -> String {
    rest.get(from..).map(|tokens| tokens.join("_")).unwrap_or_default()
}

/// Normalize a date token, recording the repair note on success.
fn read_date(token: Option<&String>, diag: &mut Diagnostics) -> Option<String> {
    let repaired = normalize_date(token?)?;
    if let Some(note) = repaired.note {
        diag.fix(note);
    }
    Some(repaired.value)
}

/// An identifier that reads as a date would be taken for the date on the
/// next audit, so it cannot stand in the identifier slot.
fn checked_identifier(identifier: String, label: &str) -> Result<String, Rejection> {
    if identifier.is_empty() || normalize_date(&identifier).is_some() {
        return Err(Rejection::because(msg::invalid_id(label)));
    }
    Ok(identifier)
}

fn required_date(token: Option<&String>, diag: &mut Diagnostics) -> Result<String, Rejection> {
    read_date(token, diag).ok_or_else(|| Rejection::because(msg::INVALID_DATE))
}

fn date_first(rest: &[String], diag: &mut Diagnostics) -> Dispatch {
    let date = required_date(rest.first(), diag)?;
    Ok(Extraction::new(None, date, rest, 1))
}

/// Correspondence takes the first date-like token; anything before it is dropped.
fn correspondence(rest: &[String], diag: &mut Diagnostics) -> Dispatch {
    let (index, date) = rest
        .iter()
        .enumerate()
        .find_map(|(index, token)| read_date(Some(token), diag).map(|date| (index, date)))
        .ok_or_else(|| Rejection::because(msg::INVALID_DATE))?;
    if index > 0 {
        diag.fix(msg::SKIPPED_BEFORE_DATE);
    }
    Ok(Extraction::new(None, date, rest, index + 1))
}

/// `PREFIX_[ID]_[Date]_...` with a mandatory identifier.
fn identified(
    prefix: &str,
    label: &str,
    family: PrefixFamily,
    rest: &[String],
    diag: &mut Diagnostics,
) -> Dispatch {
    if rest.len() < 2 {
        return Err(match family {
            PrefixFamily::Au => Rejection::because(msg::missing_id(label)),
            _ => Rejection::because(msg::missing_id_and_date(label)),
        });
    }
    if read_date(rest.first(), diag).is_some() {
        let expected = family.pattern(prefix, label);
        return Err(Rejection::because(msg::missing_id_before_date(label, &expected)));
    }
    let identifier = if family == PrefixFamily::IdDigitsDashes {
        sanitize_numeric(&rest[0], label, diag)
            .ok_or_else(|| Rejection::because(msg::INVALID_NUMBER))?
    } else {
        sanitize_free_form(&rest[0], label, diag)
    };
    let identifier = checked_identifier(identifier, label)?;
    let date = required_date(rest.get(1), diag)?;
    Ok(Extraction::new(Some(identifier), date, rest, 2))
}

fn csi_required(rest: &[String], diag: &mut Diagnostics) -> Dispatch {
    if rest.len() < 2 || read_date(rest.first(), diag).is_some() {
        return Err(Rejection::because(msg::MISSING_CSI));
    }
    let csi = normalize_csi(&rest[0]).ok_or_else(|| Rejection::because(msg::INVALID_CSI))?;
    if let Some(note) = csi.note {
        diag.fix(note);
    }
    let date = required_date(rest.get(1), diag)?;
    Ok(Extraction::new(Some(csi.value), date, rest, 2))
}

/// CSI may be omitted. With `announce` the omission is reported as allowed.
fn csi_optional(rest: &[String], announce: bool, diag: &mut Diagnostics) -> Dispatch {
    if let Some(date) = read_date(rest.first(), diag) {
        if announce {
            diag.info(msg::NO_CSI_ALLOWED);
        }
        return Ok(Extraction::new(None, date, rest, 1));
    }
    let csi = normalize_csi(&rest[0]).ok_or_else(Rejection::default)?;
    let date = required_date(rest.get(1), diag)?;
    if let Some(note) = csi.note {
        diag.fix(note);
    }
    Ok(Extraction::new(Some(csi.value), date, rest, 2))
}

fn optional_identifier(label: &str, rest: &[String], diag: &mut Diagnostics) -> Dispatch {
    if let Some(date) = read_date(rest.first(), diag) {
        return Ok(Extraction::new(None, date, rest, 1));
    }
    let identifier = sanitize_free_form(&rest[0], label, diag);
    if rest.len() < 2 {
        return Err(Rejection::default());
    }
    let identifier = checked_identifier(identifier, label)?;
    let date = required_date(rest.get(1), diag)?;
    Ok(Extraction::new(Some(identifier), date, rest, 2))
}

/// One or two identifier tokens before the date, joined with a dash.
fn task_identifiers(label: &str, rest: &[String], diag: &mut Diagnostics) -> Dispatch {
    let (index, date) = rest
        .iter()
        .enumerate()
        .find_map(|(index, token)| read_date(Some(token), diag).map(|date| (index, date)))
        .filter(|&(index, _)| index > 0)
        .ok_or_else(|| Rejection::because(msg::missing_id_and_date(label)))?;
    if index > 2 {
        diag.fix(msg::SKIPPED_BEFORE_DATE);
    }
    let parts: Vec<String> = rest[..index.min(2)]
        .iter()
        .map(|token| sanitize_free_form(token, label, diag))
        .filter(|part| !part.is_empty())
        .collect();
    if parts.is_empty() {
        return Err(Rejection::because(msg::missing_id(label)));
    }
    let identifier = checked_identifier(parts.join("-"), label)?;
    if parts.len() > 1 {
        diag.fix(msg::id_joined(label));
    }
    Ok(Extraction::new(Some(identifier), date, rest, index + 1))
}

/// Transmittal forms accept three shapes: no form id, a title ahead of the
/// date, or the regular identified layout.
fn transmittal_form(prefix: &str, label: &str, rest: &[String], diag: &mut Diagnostics) -> Dispatch {
    if let Some(date) = read_date(rest.first(), diag) {
        diag.info(msg::id_absent_allowed(label, prefix));
        return Ok(Extraction::new(None, date, rest, 1));
    }
    if let Some(date) = read_date(rest.get(1), diag) {
        let trailing = join_from(rest, 2);
        let trailing = strip_copy_suffix(&trailing);
        diag.fix(msg::title_reinterpreted(label, prefix));
        let leftover = extract_revision(trailing, &mut Diagnostics::new()).remainder;
        if leftover.chars().any(char::is_alphanumeric) {
            diag.fix(msg::TEXT_AFTER_DATE_DROPPED);
        }
        let revision = match find_revision_digits(trailing) {
            Some(digits) => {
                diag.fix(msg::REVISION_NORMALIZED);
                format!("Rev{}", numeric_revision(&digits))
            }
            None => {
                diag.fix(msg::REVISION_DEFAULTED);
                "Rev0".to_string()
            }
        };
        return Ok(Extraction {
            identifier: None,
            date,
            title: rest[0].clone(),
            revision: Some(revision),
        });
    }
    identified(prefix, label, PrefixFamily::IdAny, rest, diag)
}

/// Drop a trailing duplicate counter such as ` (1)`.
fn strip_copy_suffix(text: &str) -> &str {
    let trimmed = text.trim_end();
    let Some(inner) = trimmed.strip_suffix(')') else {
        return text;
    };
    let digits = inner.bytes().rev().take_while(u8::is_ascii_digit).count();
    let before = &inner[..inner.len() - digits];
    match before.strip_suffix('(') {
        Some(head) if digits > 0 => head.trim_end(),
        _ => text,
    }
}

/// `02` reads as `2`; anything unparsable is kept as typed.
fn numeric_revision(digits: &str) -> String {
    digits
        .parse::<u8>()
        .map_or_else(|_| digits.to_string(), |value| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> RuleTable {
        RuleTable::builtin().expect("builtin rules")
    }

    fn tokens(text: &str) -> Vec<String> {
        text.split('_').map(str::to_string).collect()
    }

    fn run(prefix: &str, rest: &str) -> (Dispatch, Vec<String>) {
        let rules = rules();
        let family = rules.family(prefix).expect("known prefix");
        let mut diag = Diagnostics::new();
        let result = dispatch(prefix, family, &tokens(rest), &rules, &mut diag);
        (result, diag.messages().map(str::to_string).collect())
    }

    #[test]
    fn date_first_family() {
        let (result, notes) = run("LG", "2024-01-15_Site Plan");
        let extraction = result.expect("readable");
        assert_eq!(extraction.identifier, None);
        assert_eq!(extraction.date, "20240115");
        assert_eq!(extraction.title, "Site Plan");
        assert_eq!(notes, [msg::DATE_FROM_DASHED]);
    }

    #[test]
    fn identified_family_rejects_date_in_id_position() {
        let (result, _) = run("SOP", "20240115_Plan");
        assert_eq!(
            result.expect_err("date first").reason.as_deref(),
            Some("Missing SOP-ID before date. Expected SOP_[SOP-ID]_[Date]_[Title]_Rev##.")
        );
    }

    #[test]
    fn audit_id_is_mandatory() {
        let (result, _) = run("AU", "20240115");
        assert_eq!(
            result.expect_err("too short").reason.as_deref(),
            Some("Missing Audit-ID.")
        );
    }

    #[test]
    fn numeric_identifier() {
        let (result, _) = run("CO", "0012_20240115_Scope_Rev1");
        let extraction = result.expect("readable");
        assert_eq!(extraction.identifier.as_deref(), Some("0012"));
        assert_eq!(extraction.title, "Scope_Rev1");
    }

    #[test]
    fn csi_required_family() {
        let (result, notes) = run("CA", "030708_20240115_Inspection");
        assert_eq!(result.expect("readable").identifier.as_deref(), Some("03-07-08"));
        assert_eq!(notes, [msg::CSI_FROM_SIX_DIGITS]);

        let (result, _) = run("CA", "20240115_Inspection");
        assert_eq!(result.expect_err("no csi").reason.as_deref(), Some(msg::MISSING_CSI));

        let (result, _) = run("CA", "0307_20240115_Inspection");
        assert_eq!(result.expect_err("short csi").reason.as_deref(), Some(msg::INVALID_CSI));
    }

    #[test]
    fn warranty_without_csi_is_informational() {
        let rules = rules();
        let mut diag = Diagnostics::new();
        let result = dispatch("WR", PrefixFamily::Wr, &tokens("20240115_Roof"), &rules, &mut diag);
        assert!(result.is_ok());
        assert!(!diag.has_fixes());
        assert!(diag.contains(msg::NO_CSI_ALLOWED));
    }

    #[test]
    fn correspondence_skips_to_first_date() {
        let (result, notes) = run("COR", "Owner_Letter_20240115_Response");
        let extraction = result.expect("readable");
        assert_eq!(extraction.date, "20240115");
        assert_eq!(extraction.title, "Response");
        assert_eq!(notes, [msg::SKIPPED_BEFORE_DATE]);
    }

    #[test]
    fn task_identifiers_join_with_dash() {
        let (result, notes) = run("FDM", "T12_C34_20240115_Memo");
        let extraction = result.expect("readable");
        assert_eq!(extraction.identifier.as_deref(), Some("T12-C34"));
        assert_eq!(extraction.title, "Memo");
        assert_eq!(notes, ["Joined TaskID/ContractID parts with a dash."]);

        let (result, notes) = run("FDM", "T12-C34_20240115_Memo");
        assert_eq!(result.expect("readable").identifier.as_deref(), Some("T12-C34"));
        assert!(notes.is_empty());

        let (result, _) = run("FDM", "20240115_Memo");
        assert_eq!(
            result.expect_err("no id").reason.as_deref(),
            Some("Missing TaskID/ContractID and/or date.")
        );
    }

    #[test]
    fn transmittal_title_before_date() {
        let (result, notes) = run("TF", "SiteMap_20240310_Rev02");
        let extraction = result.expect("readable");
        assert_eq!(extraction.title, "SiteMap");
        assert_eq!(extraction.revision.as_deref(), Some("Rev2"));
        assert_eq!(
            notes,
            [
                "Reinterpreted first token as Title (missing FormID allowed for TF).",
                msg::REVISION_NORMALIZED,
            ]
        );
    }

    #[test]
    fn transmittal_reinterpretation_reports_dropped_text() {
        let (result, notes) = run("TF", "F12_20240310_Transmittal_Rev1");
        let extraction = result.expect("readable");
        assert_eq!(extraction.title, "F12");
        assert_eq!(extraction.revision.as_deref(), Some("Rev1"));
        assert_eq!(
            notes,
            [
                "Reinterpreted first token as Title (missing FormID allowed for TF).",
                msg::TEXT_AFTER_DATE_DROPPED,
                msg::REVISION_NORMALIZED,
            ]
        );
    }

    #[test]
    fn date_shaped_identifiers_are_rejected() {
        for (prefix, rest, label) in [
            ("SOP", "2024 0115_20240301_Plan", "SOP-ID"),
            ("CO", "2024011a5_20240301_Plan", "ChangeOrder-Number"),
            ("QA", "2024 0115_20240301_Plan", "QMS-ID"),
            ("FDM", "2024_01-15_20240301_Plan", "TaskID/ContractID"),
        ] {
            let (result, _) = run(prefix, rest);
            assert_eq!(
                result.expect_err(prefix).reason,
                Some(format!("Invalid or missing {label}.")),
                "{prefix}_{rest}"
            );
        }
    }

    #[test]
    fn transmittal_without_form_id() {
        let (result, notes) = run("TF", "20240310_SiteMap_Rev2");
        assert_eq!(result.expect("readable").identifier, None);
        assert_eq!(notes, ["No FormID provided (allowed for TF)."]);
    }

    #[test]
    fn copy_counter_is_ignored() {
        assert_eq!(strip_copy_suffix("Rev1 (2)"), "Rev1");
        assert_eq!(strip_copy_suffix("Rev1 ()"), "Rev1 ()");
        assert_eq!(numeric_revision("02"), "2");
        assert_eq!(numeric_revision("00"), "0");
    }
}
