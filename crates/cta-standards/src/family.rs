//! Grammar families a prefix can belong to.

use serde::{Deserialize, Serialize};

/// How the tokens after a prefix are interpreted.
///
/// The set is closed: every prefix in the rule table maps to exactly one
/// variant, and the dispatcher matches on this enum exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefixFamily {
    /// `PREFIX_[Date]_[Title]_Rev##`
    NoId,
    /// `PREFIX_[ID]_[Date]_[Title]_Rev##`, identifier of letters, digits, dashes.
    IdAny,
    /// `PREFIX_[Number]_[Date]_[Title]_Rev##`, identifier of digits and dashes.
    IdDigitsDashes,
    /// `PREFIX_[CSI]_[Date]_[Title]_Rev##`
    CsiRequired,
    /// `PREFIX_[CSI]_[Date]_...` or `PREFIX_[Date]_...`
    CsiOptional,
    /// Correspondence: the first date-like token after the prefix is the date.
    Cor,
    /// Identifier optional, letters/digits/dashes.
    Qa,
    /// Identifier mandatory; a date in its place is an ordering error.
    Au,
    /// Up to two identifier tokens joined with a dash, then the date.
    Fdm,
    /// Form identifier may be absent, or the title may precede the date.
    Tf,
    Pn,
    Sp,
    /// Optional CSI; an omitted code is reported as an allowance.
    Wr,
    Re,
}

impl PrefixFamily {
    pub const ALL: [PrefixFamily; 14] = [
        PrefixFamily::NoId,
        PrefixFamily::IdAny,
        PrefixFamily::IdDigitsDashes,
        PrefixFamily::CsiRequired,
        PrefixFamily::CsiOptional,
        PrefixFamily::Cor,
        PrefixFamily::Qa,
        PrefixFamily::Au,
        PrefixFamily::Fdm,
        PrefixFamily::Tf,
        PrefixFamily::Pn,
        PrefixFamily::Sp,
        PrefixFamily::Wr,
        PrefixFamily::Re,
    ];

    /// Key used for this family in the rules TOML.
    pub fn key(self) -> &'static str {
        match self {
            PrefixFamily::NoId => "no_id",
            PrefixFamily::IdAny => "id_any",
            PrefixFamily::IdDigitsDashes => "id_digits_dashes",
            PrefixFamily::CsiRequired => "csi_required",
            PrefixFamily::CsiOptional => "csi_optional",
            PrefixFamily::Cor => "cor",
            PrefixFamily::Qa => "qa",
            PrefixFamily::Au => "au",
            PrefixFamily::Fdm => "fdm",
            PrefixFamily::Tf => "tf",
            PrefixFamily::Pn => "pn",
            PrefixFamily::Sp => "sp",
            PrefixFamily::Wr => "wr",
            PrefixFamily::Re => "re",
        }
    }

    /// Expected name shape, with `label` standing in for the identifier.
    pub fn pattern(self, prefix: &str, label: &str) -> String {
        match self {
            PrefixFamily::NoId | PrefixFamily::Cor | PrefixFamily::Re => {
                format!("{prefix}_[Date]_[Title]_Rev##")
            }
            PrefixFamily::IdAny
            | PrefixFamily::IdDigitsDashes
            | PrefixFamily::Au
            | PrefixFamily::Fdm => format!("{prefix}_[{label}]_[Date]_[Title]_Rev##"),
            PrefixFamily::CsiRequired => format!("{prefix}_[CSI]_[Date]_[Title]_Rev##"),
            PrefixFamily::CsiOptional | PrefixFamily::Pn | PrefixFamily::Sp | PrefixFamily::Wr => {
                format!("{prefix}_([CSI]_)[Date]_[Title]_Rev##")
            }
            PrefixFamily::Qa | PrefixFamily::Tf => {
                format!("{prefix}_([{label}]_)[Date]_[Title]_Rev##")
            }
        }
    }
}

impl std::fmt::Display for PrefixFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// True for 2-4 uppercase ASCII letters.
pub fn is_prefix_shape(value: &str) -> bool {
    (2..=4).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_uppercase())
}
