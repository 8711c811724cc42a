//! The per-name audit: tokenize, dispatch, normalize, reassemble, decide.

use cta_model::{AuditOutcome, Decision, Note, NormalizedComponents};
use cta_standards::{RuleTable, is_prefix_shape};
use tracing::debug;

use crate::assemble::{StemParts, check_underscores};
use crate::diagnostics::{Diagnostics, msg};
use crate::dispatch::{Extraction, dispatch};
use crate::revision::extract_revision;
use crate::title::{sanitize_title, strip_extension_tokens};
use crate::tokenize::{has_space_before_extension, split_extension, tokenize};

/// Audits file names against one rule table.
///
/// The auditor holds no per-name state, so one instance can be shared by
/// every worker of a batch.
#[derive(Debug, Clone)]
pub struct Auditor {
    rules: RuleTable,
}

impl Auditor {
    pub fn new(rules: RuleTable) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Audit one raw file name.
    ///
    /// Surrounding whitespace is ignored. The outcome is a pure function of
    /// the name and the rule table.
    pub fn audit(&self, name: &str) -> AuditOutcome {
        let original = name.trim();
        if original.is_empty() {
            return AuditOutcome {
                decision: Decision::Empty,
                suggestion: Some(String::new()),
                notes: vec![Note::fix(msg::EMPTY_VALUE)],
                components: None,
            };
        }
        if self.rules.is_exempt(original) {
            return AuditOutcome::skip();
        }

        let mut diag = Diagnostics::new();
        if has_space_before_extension(original) {
            diag.fix(msg::SPACE_BEFORE_EXTENSION);
        }
        let split = split_extension(original);
        let tokens = tokenize(split.stem, &mut diag);
        let Some((prefix, rest)) = tokens.split_first() else {
            return self.reject(diag, None);
        };
        if rest.is_empty() || !is_prefix_shape(prefix) {
            return self.reject(diag, None);
        }
        let Some(family) = self.rules.family(prefix) else {
            return self.reject(diag, None);
        };

        match dispatch(prefix, family, rest, &self.rules, &mut diag) {
            Ok(extraction) => self.finalize(prefix, extraction, split.extension, original, diag),
            Err(rejection) => {
                debug!(%prefix, %family, "rejected by grammar");
                self.reject(diag, rejection.reason)
            }
        }
    }

    fn reject(&self, mut diag: Diagnostics, reason: Option<String>) -> AuditOutcome {
        if let Some(reason) = reason {
            diag.fix(reason);
        }
        diag.fix(msg::does_not_follow(self.rules.convention()));
        AuditOutcome {
            decision: Decision::NonCompliant,
            suggestion: Some(String::new()),
            notes: diag.into_notes(),
            components: None,
        }
    }

    /// A cut can leave an extension word or a delimiter at the new end of
    /// the title. Strip until nothing changes so the suggestion audits clean.
    fn settle_cut_title(&self, mut title: String, diag: &mut Diagnostics) -> String {
        loop {
            let stripped = strip_extension_tokens(&title, self.rules.extension_tokens(), diag);
            if stripped == title {
                return stripped;
            }
            title = stripped;
        }
    }

    fn finalize(
        &self,
        prefix: &str,
        extraction: Extraction,
        extension: &str,
        original: &str,
        mut diag: Diagnostics,
    ) -> AuditOutcome {
        let Extraction {
            identifier,
            date,
            title,
            revision,
        } = extraction;
        let (title, revision) = match revision {
            Some(revision) => (title, revision),
            None => {
                let split = extract_revision(&title, &mut diag);
                (split.remainder, split.revision)
            }
        };
        let title = sanitize_title(&title, self.rules.extension_tokens(), &mut diag);

        let parts = StemParts {
            prefix,
            identifier: identifier.as_deref(),
            date: &date,
            title: &title,
            revision: &revision,
        };
        let fitted = parts.fit_title(self.rules.max_stem_len(), &mut diag);
        let title = if fitted == title {
            fitted
        } else {
            self.settle_cut_title(fitted, &mut diag)
        };
        let stem = StemParts {
            title: &title,
            ..parts
        }
        .join();
        check_underscores(&stem, identifier.is_some(), &mut diag);

        let suggestion = format!("{stem}{extension}");
        let decision = if suggestion == original && !diag.has_fixes() {
            Decision::Compliant
        } else {
            Decision::NeedsChanges
        };
        AuditOutcome {
            decision,
            suggestion: Some(suggestion),
            notes: diag.into_notes(),
            components: Some(NormalizedComponents {
                prefix: prefix.to_string(),
                identifier,
                date,
                title,
                revision,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auditor() -> Auditor {
        Auditor::new(RuleTable::builtin().expect("builtin rules"))
    }

    #[test]
    fn blank_names_are_empty() {
        let outcome = auditor().audit("   ");
        assert_eq!(outcome.decision, Decision::Empty);
        assert_eq!(outcome.suggestion.as_deref(), Some(""));
        assert_eq!(outcome.joined_notes(), "Empty value.");
    }

    #[test]
    fn exempt_prefixes_are_skipped() {
        assert_eq!(auditor().audit("RFI_0042_Response.pdf"), AuditOutcome::skip());
    }

    #[test]
    fn malformed_prefix_is_non_compliant() {
        for name in ["Lg_20240115_Plan_Rev1.pdf", "LG", "ABCDE_20240115_Plan_Rev1.pdf"] {
            let outcome = auditor().audit(name);
            assert_eq!(outcome.decision, Decision::NonCompliant, "{name}");
            assert_eq!(outcome.suggestion.as_deref(), Some(""));
        }
    }

    #[test]
    fn components_are_reported() {
        let outcome = auditor().audit("SOP_AB12_20240115_Plan_Rev3.pdf");
        assert_eq!(outcome.decision, Decision::Compliant);
        let components = outcome.components.expect("components");
        assert_eq!(components.identifier.as_deref(), Some("AB12"));
        assert_eq!(components.title, "Plan");
        assert_eq!(components.revision, "Rev3");
    }
}
