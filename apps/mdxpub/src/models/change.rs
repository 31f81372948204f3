//! Change-set models consumed by the commit message synthesizer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
/// Coarse classification of a changed document, derived from its path.
pub enum ChangeCategory {
    SkillAnalysis,
    Testing,
    Tutorial,
    Article,
}

impl ChangeCategory {
    /// Slug used in headlines and for body ordering.
    pub fn slug(self) -> &'static str {
        match self {
            ChangeCategory::SkillAnalysis => "skill-analysis",
            ChangeCategory::Testing => "testing",
            ChangeCategory::Tutorial => "tutorial",
            ChangeCategory::Article => "article",
        }
    }

    /// Slug with hyphens replaced by spaces and each word capitalized.
    pub fn title(self) -> String {
        self.slug()
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ChangeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
/// Supported locale tags. Variant order matches alphabetical code order.
pub enum Locale {
    En,
    Fr,
    Zh,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::En, Locale::Zh, Locale::Fr];

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
            Locale::Zh => "zh",
        }
    }

    pub fn from_code(code: &str) -> Option<Locale> {
        match code {
            "en" => Some(Locale::En),
            "fr" => Some(Locale::Fr),
            "zh" => Some(Locale::Zh),
            _ => None,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
/// One changed document. `locales` is never empty.
pub struct ChangeRecord {
    pub file: String,
    pub category: ChangeCategory,
    pub locales: Vec<Locale>,
}

impl ChangeRecord {
    /// File name including extension.
    pub fn basename(&self) -> String {
        Path::new(&self.file)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.file.clone())
    }

    /// File name without its extension.
    pub fn stem(&self) -> String {
        Path::new(&self.file)
            .file_stem()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.file.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Ordered change records for one publish invocation.
///
/// Groupings are computed on demand and never cached.
pub struct ChangeSet {
    records: Vec<ChangeRecord>,
}

impl ChangeSet {
    pub fn new(records: Vec<ChangeRecord>) -> Self {
        ChangeSet { records }
    }

    pub fn records(&self) -> &[ChangeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains_category(&self, category: ChangeCategory) -> bool {
        self.records.iter().any(|r| r.category == category)
    }

    /// Group records by category, preserving first-seen category order.
    pub fn by_category(&self) -> Vec<(ChangeCategory, Vec<&ChangeRecord>)> {
        let mut groups: Vec<(ChangeCategory, Vec<&ChangeRecord>)> = Vec::new();
        for record in &self.records {
            match groups.iter_mut().find(|(c, _)| *c == record.category) {
                Some((_, members)) => members.push(record),
                None => groups.push((record.category, vec![record])),
            }
        }
        groups
    }

    /// Group records by locale; keys iterate in sorted code order.
    pub fn by_locale(&self) -> BTreeMap<Locale, Vec<&ChangeRecord>> {
        let mut groups: BTreeMap<Locale, Vec<&ChangeRecord>> = BTreeMap::new();
        for record in &self.records {
            for locale in &record.locales {
                groups.entry(*locale).or_default().push(record);
            }
        }
        groups
    }
}

impl FromIterator<ChangeRecord> for ChangeSet {
    fn from_iter<T: IntoIterator<Item = ChangeRecord>>(iter: T) -> Self {
        ChangeSet::new(iter.into_iter().collect())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
/// Semantic commit type label.
pub enum CommitType {
    #[default]
    #[value(alias = "doc")]
    #[serde(alias = "doc")]
    Docs,
    #[value(alias = "feature")]
    #[serde(alias = "feature")]
    Feat,
    Fix,
    Chore,
}

impl CommitType {
    pub fn label(self) -> &'static str {
        match self {
            CommitType::Docs => "docs",
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Chore => "chore",
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
/// Derived commit description: headline plus body lines.
pub struct CommitPlan {
    pub primary_type: CommitType,
    pub headline: String,
    pub body: Vec<String>,
}

impl CommitPlan {
    /// Full commit message: headline, a blank line, then the body.
    pub fn message(&self) -> String {
        if self.body.is_empty() {
            return self.headline.clone();
        }
        format!("{}\n\n{}", self.headline, self.body.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(file: &str, category: ChangeCategory, locales: &[Locale]) -> ChangeRecord {
        ChangeRecord {
            file: file.into(),
            category,
            locales: locales.to_vec(),
        }
    }

    #[test]
    fn category_titles() {
        assert_eq!(ChangeCategory::SkillAnalysis.title(), "Skill Analysis");
        assert_eq!(ChangeCategory::Article.title(), "Article");
    }

    #[test]
    fn groups_by_category_in_first_seen_order() {
        let set = ChangeSet::new(vec![
            rec("docs/en/b.mdx", ChangeCategory::Tutorial, &[Locale::En]),
            rec("docs/en/a.mdx", ChangeCategory::Article, &[Locale::En]),
            rec("docs/zh/c.mdx", ChangeCategory::Tutorial, &[Locale::Zh]),
        ]);
        let groups = set.by_category();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, ChangeCategory::Tutorial);
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, ChangeCategory::Article);
        let locales: Vec<_> = set.by_locale().keys().map(|l| l.code()).collect();
        assert_eq!(locales, vec!["en", "zh"]);
    }

    #[test]
    fn record_names() {
        let r = rec("content/docs/en/guide.mdx", ChangeCategory::Article, &[Locale::En]);
        assert_eq!(r.basename(), "guide.mdx");
        assert_eq!(r.stem(), "guide");
    }

    #[test]
    fn plan_message_joins_body_after_blank_line() {
        let plan = CommitPlan {
            primary_type: CommitType::Docs,
            headline: "docs: publish x".into(),
            body: vec!["Article: x.mdx".into()],
        };
        assert_eq!(plan.message(), "docs: publish x\n\nArticle: x.mdx");
    }
}
