//! Reassembly of the canonical stem and its final checks.

use crate::diagnostics::{Diagnostics, msg};

/// Normalized pieces of a stem, in output order.
#[derive(Debug, Clone, Copy)]
pub struct StemParts<'a> {
    pub prefix: &'a str,
    pub identifier: Option<&'a str>,
    pub date: &'a str,
    pub title: &'a str,
    pub revision: &'a str,
}

impl StemParts<'_> {
    /// Length of `prefix_[id_]date_title_revision`.
    fn len(&self) -> usize {
        let fixed = self.prefix.chars().count()
            + 1
            + self.identifier.map_or(0, |id| id.chars().count() + 1)
            + self.date.chars().count()
            + 1;
        fixed + self.title.chars().count() + 1 + self.revision.chars().count()
    }

    /// Shorten the title so the stem fits `budget`. Only the title is cut.
    pub fn fit_title(&self, budget: usize, diag: &mut Diagnostics) -> String {
        let overflow = self.len().saturating_sub(budget);
        if overflow == 0 {
            return self.title.to_string();
        }
        diag.fix(msg::title_truncated(budget));
        let keep = self.title.chars().count().saturating_sub(overflow);
        self.title.chars().take(keep).collect()
    }

    /// Join with `_`, collapsing repeats. The revision always closes the stem.
    pub fn join(&self) -> String {
        let mut stem = String::with_capacity(self.len());
        let pieces = [Some(self.prefix), self.identifier, Some(self.date), Some(self.title), Some(self.revision)];
        for piece in pieces.into_iter().flatten() {
            if !stem.is_empty() {
                stem.push('_');
            }
            stem.push_str(piece);
        }
        let mut collapsed = String::with_capacity(stem.len());
        for ch in stem.chars() {
            if ch == '_' && collapsed.ends_with('_') {
                continue;
            }
            collapsed.push(ch);
        }
        collapsed
    }
}

/// Number of `_` a well-formed stem carries.
pub fn expected_underscores(has_identifier: bool) -> usize {
    if has_identifier { 4 } else { 3 }
}

/// Flag stems whose separator count does not match the layout.
pub fn check_underscores(stem: &str, has_identifier: bool, diag: &mut Diagnostics) {
    if stem.matches('_').count() != expected_underscores(has_identifier) {
        diag.fix(msg::UNDERSCORE_COUNT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts<'a>(identifier: Option<&'a str>, title: &'a str) -> StemParts<'a> {
        StemParts {
            prefix: "SOP",
            identifier,
            date: "20240115",
            title,
            revision: "Rev1",
        }
    }

    #[test]
    fn joins_components() {
        assert_eq!(parts(Some("AB12"), "Plan").join(), "SOP_AB12_20240115_Plan_Rev1");
        assert_eq!(parts(None, "Plan").join(), "SOP_20240115_Plan_Rev1");
        assert_eq!(parts(None, "").join(), "SOP_20240115_Rev1");
    }

    #[test]
    fn long_titles_are_cut_to_budget() {
        let title = "A".repeat(80);
        let mut diag = Diagnostics::new();
        let parts = parts(None, &title);
        let fitted = parts.fit_title(64, &mut diag);
        let stem = StemParts { title: &fitted, ..parts }.join();
        assert_eq!(stem.chars().count(), 64);
        assert!(diag.contains("File name exceeds 64-character limit (title truncated)."));
    }

    #[test]
    fn short_titles_are_kept() {
        let mut diag = Diagnostics::new();
        assert_eq!(parts(None, "Plan").fit_title(64, &mut diag), "Plan");
        assert!(diag.is_empty());
    }

    #[test]
    fn underscore_count_follows_layout() {
        let mut diag = Diagnostics::new();
        check_underscores("SOP_AB12_20240115_Plan_Rev1", true, &mut diag);
        check_underscores("LG_20240115_Plan_Rev1", false, &mut diag);
        assert!(diag.is_empty());
        check_underscores("LG_20240115_Rev1", false, &mut diag);
        assert!(diag.contains(msg::UNDERSCORE_COUNT));
    }

    #[test]
    fn revision_closes_every_stem() {
        for stem in [parts(None, "").join(), parts(Some("AB12"), "").join(), parts(None, "Plan").join()] {
            assert!(stem.ends_with("_Rev1"), "{stem}");
            assert!(!stem.contains("__"), "{stem}");
        }
    }
}
