//! Path-based change classification.
//!
//! Category checks run in priority order and the first match wins. Locale
//! tags come from `/en/`, `/zh/`, `/fr/` path segments, defaulting to `en`.

use crate::models::change::{ChangeCategory, ChangeRecord, Locale};

/// Substring rules in priority order.
const CATEGORY_RULES: &[(&[&str], ChangeCategory)] = &[
    (&["analyzing-"], ChangeCategory::SkillAnalysis),
    (
        &["mcp-", "playwright", "webapp-testing"],
        ChangeCategory::Testing,
    ),
    (&["development", "tutorial"], ChangeCategory::Tutorial),
];

fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

/// Category for `path`; `Article` when no rule matches.
pub fn classify_category(path: &str) -> ChangeCategory {
    let path = normalize(path);
    CATEGORY_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| path.contains(n)))
        .map(|(_, category)| *category)
        .unwrap_or(ChangeCategory::Article)
}

/// Locale tags for `path`, in `en`, `zh`, `fr` order. Never empty.
pub fn detect_locales(path: &str) -> Vec<Locale> {
    let path = normalize(path);
    let found: Vec<Locale> = Locale::ALL
        .into_iter()
        .filter(|l| path.contains(&format!("/{}/", l.code())))
        .collect();
    if found.is_empty() {
        vec![Locale::En]
    } else {
        found
    }
}

/// Build the change record for one changed document.
pub fn classify(path: &str) -> ChangeRecord {
    ChangeRecord {
        file: path.to_string(),
        category: classify_category(path),
        locales: detect_locales(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_match_wins() {
        assert_eq!(
            classify_category("content/docs/en/mcp-analyzing-foo.mdx"),
            ChangeCategory::SkillAnalysis
        );
        assert_eq!(
            classify_category("content/docs/en/playwright-tutorial.mdx"),
            ChangeCategory::Testing
        );
        assert_eq!(
            classify_category("content/docs/zh/development/setup.mdx"),
            ChangeCategory::Tutorial
        );
        assert_eq!(
            classify_category("content/docs/fr/news.mdx"),
            ChangeCategory::Article
        );
    }

    #[test]
    fn locales_default_to_en() {
        assert_eq!(detect_locales("docs/guide.mdx"), vec![Locale::En]);
        assert_eq!(detect_locales("docs/zh/guide.mdx"), vec![Locale::Zh]);
        assert_eq!(
            detect_locales("docs/fr/mirror/en/guide.mdx"),
            vec![Locale::En, Locale::Fr]
        );
    }

    #[test]
    fn locale_marker_needs_both_slashes() {
        assert_eq!(detect_locales("en/guide.mdx"), vec![Locale::En]);
        assert_eq!(detect_locales("docs/french/guide.mdx"), vec![Locale::En]);
        assert_eq!(detect_locales("docs\\zh\\guide.mdx"), vec![Locale::Zh]);
    }

    #[test]
    fn classify_builds_record() {
        let record = classify("content/docs/zh/webapp-testing.mdx");
        assert_eq!(record.category, ChangeCategory::Testing);
        assert_eq!(record.locales, vec![Locale::Zh]);
        assert_eq!(record.file, "content/docs/zh/webapp-testing.mdx");
    }
}
