//! Deterministic semantic commit message synthesis from a `ChangeSet`.
//!
//! The primary type starts at the configured default and is escalated by the
//! first matching entry of `ESCALATIONS`. Output depends only on the change
//! set and the default type, so re-running yields identical text.

use crate::models::change::{ChangeCategory, ChangeSet, CommitPlan, CommitType};

/// Files listed per category line before eliding the rest.
const FILES_PER_CATEGORY: usize = 3;
/// Change sets larger than this escalate to a feature commit.
const LARGE_CHANGE_SET: usize = 3;

/// One escalation heuristic: when `applies` holds, use `escalate_to`.
pub struct Escalation {
    pub name: &'static str,
    pub applies: fn(&ChangeSet) -> bool,
    pub escalate_to: CommitType,
}

fn has_skill_analysis(set: &ChangeSet) -> bool {
    set.contains_category(ChangeCategory::SkillAnalysis)
}

fn is_large(set: &ChangeSet) -> bool {
    set.len() > LARGE_CHANGE_SET
}

/// Evaluated in order; the first rule that applies decides the type.
pub const ESCALATIONS: &[Escalation] = &[
    Escalation {
        name: "skill-analysis",
        applies: has_skill_analysis,
        escalate_to: CommitType::Feat,
    },
    Escalation {
        name: "large-change-set",
        applies: is_large,
        escalate_to: CommitType::Feat,
    },
];

/// Commit type after applying the escalation table.
pub fn primary_type(changes: &ChangeSet, default: CommitType) -> CommitType {
    match ESCALATIONS.iter().find(|rule| (rule.applies)(changes)) {
        Some(rule) => {
            tracing::debug!(rule = rule.name, to = %rule.escalate_to, "escalated commit type");
            rule.escalate_to
        }
        None => default,
    }
}

/// Build the commit plan for `changes`.
pub fn synthesize(changes: &ChangeSet, default: CommitType) -> CommitPlan {
    if changes.is_empty() {
        return CommitPlan {
            primary_type: default,
            headline: format!("{}: publish article", default),
            body: Vec::new(),
        };
    }

    let primary = primary_type(changes, default);
    let groups = changes.by_category();

    let headline = match changes.records() {
        [only] => format!("{}: publish {}", primary, only.stem()),
        _ => {
            let counts = groups
                .iter()
                .map(|(category, members)| format!("{} {}", members.len(), category))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}: publish multiple articles ({})", primary, counts)
        }
    };

    let mut sorted = groups;
    sorted.sort_by_key(|(category, _)| category.slug());
    let mut body: Vec<String> = sorted
        .iter()
        .map(|(category, members)| {
            let names = members
                .iter()
                .take(FILES_PER_CATEGORY)
                .map(|r| r.basename())
                .collect::<Vec<_>>()
                .join(", ");
            let more = if members.len() > FILES_PER_CATEGORY {
                "..."
            } else {
                ""
            };
            format!("{}: {}{}", category.title(), names, more)
        })
        .collect();

    let locales = changes.by_locale();
    if locales.len() > 1 {
        body.push(String::new());
        body.push(format!(
            "Languages: {}",
            locales
                .keys()
                .map(|l| l.code())
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }

    CommitPlan {
        primary_type: primary,
        headline,
        body,
    }
}
