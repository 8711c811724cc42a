use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::RulesError;
use crate::family::{PrefixFamily, is_prefix_shape};

const MANIFEST_SCHEMA: &str = "cta.naming-rules";
const BUILTIN_RULES: &str = include_str!("../rules/naming_rules.toml");
const BUILTIN_ORIGIN: &str = "<builtin>";

/// Environment variable pointing at a replacement rules file.
pub const RULES_ENV_VAR: &str = "CTA_RULES_PATH";

/// Label used in notes when a prefix has no configured identifier label.
pub const DEFAULT_ID_LABEL: &str = "ID";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RulesDocument {
    manifest: ManifestHeader,
    convention: ConventionSection,
    families: FamilyLists,
    #[serde(default)]
    id_labels: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct ManifestHeader {
    schema: String,
    schema_version: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConventionSection {
    ruleset: String,
    name: String,
    max_stem_len: usize,
    #[serde(default)]
    exempt_prefixes: Vec<String>,
    #[serde(default)]
    extension_tokens: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FamilyLists {
    no_id: Vec<String>,
    id_any: Vec<String>,
    id_digits_dashes: Vec<String>,
    csi_required: Vec<String>,
    csi_optional: Vec<String>,
    cor: Vec<String>,
    qa: Vec<String>,
    au: Vec<String>,
    fdm: Vec<String>,
    tf: Vec<String>,
    pn: Vec<String>,
    sp: Vec<String>,
    wr: Vec<String>,
    re: Vec<String>,
}

impl FamilyLists {
    fn members(&self, family: PrefixFamily) -> &[String] {
        match family {
            PrefixFamily::NoId => &self.no_id,
            PrefixFamily::IdAny => &self.id_any,
            PrefixFamily::IdDigitsDashes => &self.id_digits_dashes,
            PrefixFamily::CsiRequired => &self.csi_required,
            PrefixFamily::CsiOptional => &self.csi_optional,
            PrefixFamily::Cor => &self.cor,
            PrefixFamily::Qa => &self.qa,
            PrefixFamily::Au => &self.au,
            PrefixFamily::Fdm => &self.fdm,
            PrefixFamily::Tf => &self.tf,
            PrefixFamily::Pn => &self.pn,
            PrefixFamily::Sp => &self.sp,
            PrefixFamily::Wr => &self.wr,
            PrefixFamily::Re => &self.re,
        }
    }
}

/// Immutable lookup tables driving the audit engine.
#[derive(Debug, Clone)]
pub struct RuleTable {
    origin: PathBuf,
    ruleset: String,
    convention: String,
    max_stem_len: usize,
    exempt_prefixes: Vec<String>,
    extension_tokens: Vec<String>,
    families: BTreeMap<String, PrefixFamily>,
    id_labels: BTreeMap<String, String>,
}

impl RuleTable {
    /// The rule table compiled into the binary.
    pub fn builtin() -> Result<Self, RulesError> {
        Self::from_toml_str(BUILTIN_RULES, Path::new(BUILTIN_ORIGIN))
    }

    /// Load and validate a rules file from disk.
    pub fn load(path: &Path) -> Result<Self, RulesError> {
        let contents = std::fs::read_to_string(path).map_err(|e| RulesError::io(path, e))?;
        Self::from_toml_str(&contents, path)
    }

    /// Parse and validate rules text; `origin` is only used in error messages.
    pub fn from_toml_str(contents: &str, origin: &Path) -> Result<Self, RulesError> {
        let document: RulesDocument = toml::from_str(contents).map_err(|e| RulesError::Toml {
            path: origin.to_path_buf(),
            source: e,
        })?;
        Self::compile(document, origin)
    }

    fn compile(document: RulesDocument, origin: &Path) -> Result<Self, RulesError> {
        if document.manifest.schema != MANIFEST_SCHEMA {
            return Err(RulesError::InvalidManifest {
                message: format!("unsupported schema: {}", document.manifest.schema),
            });
        }
        if document.manifest.schema_version != 1 {
            return Err(RulesError::InvalidManifest {
                message: format!(
                    "unsupported schema_version: {}",
                    document.manifest.schema_version
                ),
            });
        }

        let convention = document.convention;
        if convention.max_stem_len == 0 {
            return Err(RulesError::InvalidBudget);
        }

        let mut exempt_prefixes = Vec::with_capacity(convention.exempt_prefixes.len());
        for entry in convention.exempt_prefixes {
            let entry = entry.trim().to_string();
            if entry.is_empty() {
                return Err(RulesError::BlankExemption);
            }
            exempt_prefixes.push(entry);
        }

        let mut extension_tokens = Vec::with_capacity(convention.extension_tokens.len());
        for token in convention.extension_tokens {
            if token.is_empty() || !token.bytes().all(|b| b.is_ascii_alphanumeric()) {
                return Err(RulesError::InvalidExtensionToken { token });
            }
            let token = token.to_ascii_lowercase();
            if !extension_tokens.contains(&token) {
                extension_tokens.push(token);
            }
        }
        // Longest first so that `docx` is tried before `doc`.
        extension_tokens.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let mut families: BTreeMap<String, PrefixFamily> = BTreeMap::new();
        for family in PrefixFamily::ALL {
            for prefix in document.families.members(family) {
                if !is_prefix_shape(prefix) {
                    return Err(RulesError::InvalidPrefix {
                        prefix: prefix.clone(),
                        family: family.key().to_string(),
                    });
                }
                if let Some(existing) = families.insert(prefix.clone(), family) {
                    return Err(RulesError::DuplicatePrefix {
                        prefix: prefix.clone(),
                        first: existing.key().to_string(),
                        second: family.key().to_string(),
                    });
                }
            }
        }

        Ok(Self {
            origin: origin.to_path_buf(),
            ruleset: convention.ruleset,
            convention: convention.name,
            max_stem_len: convention.max_stem_len,
            exempt_prefixes,
            extension_tokens,
            families,
            id_labels: document.id_labels,
        })
    }

    pub fn origin(&self) -> &Path {
        &self.origin
    }

    /// Human-readable ruleset banner.
    pub fn ruleset(&self) -> &str {
        &self.ruleset
    }

    /// Short convention name used in the terminal note.
    pub fn convention(&self) -> &str {
        &self.convention
    }

    pub fn max_stem_len(&self) -> usize {
        self.max_stem_len
    }

    pub fn exempt_prefixes(&self) -> &[String] {
        &self.exempt_prefixes
    }

    /// Lowercase extension tokens, longest first.
    pub fn extension_tokens(&self) -> &[String] {
        &self.extension_tokens
    }

    pub fn family(&self, prefix: &str) -> Option<PrefixFamily> {
        self.families.get(prefix).copied()
    }

    /// True when `name` starts with any exemption entry.
    pub fn is_exempt(&self, name: &str) -> bool {
        self.exempt_prefixes
            .iter()
            .any(|prefix| name.starts_with(prefix.as_str()))
    }

    pub fn id_label(&self, prefix: &str) -> &str {
        self.id_labels
            .get(prefix)
            .map_or(DEFAULT_ID_LABEL, String::as_str)
    }

    /// All recognized prefixes with their family, sorted by prefix.
    pub fn prefixes(&self) -> impl Iterator<Item = (&str, PrefixFamily)> {
        self.families
            .iter()
            .map(|(prefix, family)| (prefix.as_str(), *family))
    }
}

/// Load the rule table named by [`RULES_ENV_VAR`], or the built-in table.
pub fn load_default_rules() -> Result<RuleTable, RulesError> {
    match std::env::var_os(RULES_ENV_VAR) {
        Some(path) if !path.is_empty() => RuleTable::load(&PathBuf::from(path)),
        _ => RuleTable::builtin(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_rules_load() {
        let rules = RuleTable::builtin().expect("builtin rules");
        assert_eq!(rules.max_stem_len(), 64);
        assert_eq!(rules.convention(), "CTA");
        assert_eq!(rules.family("COR"), Some(PrefixFamily::Cor));
        assert_eq!(rules.family("CA"), Some(PrefixFamily::CsiRequired));
        assert_eq!(rules.family("PE"), Some(PrefixFamily::IdDigitsDashes));
        assert_eq!(rules.family("XYZ"), None);
        assert_eq!(rules.id_label("TF"), "FormID");
        assert_eq!(rules.id_label("LG"), DEFAULT_ID_LABEL);
    }

    #[test]
    fn extension_tokens_longest_first() {
        let rules = RuleTable::builtin().expect("builtin rules");
        let tokens = rules.extension_tokens();
        let docx = tokens.iter().position(|t| t == "docx").expect("docx");
        let doc = tokens.iter().position(|t| t == "doc").expect("doc");
        assert!(docx < doc);
    }

    #[test]
    fn exemption_is_a_plain_prefix_match() {
        let rules = RuleTable::builtin().expect("builtin rules");
        assert!(rules.is_exempt("I-PAY_invoice_0001.pdf"));
        assert!(rules.is_exempt("PCOX"));
        assert!(!rules.is_exempt("pco_lowercase.pdf"));
    }
}
