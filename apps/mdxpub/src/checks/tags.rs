//! Whole-document open/close counting for simple inline HTML tags.

use crate::models::{Issue, Rule};
use regex::Regex;
use std::sync::OnceLock;

pub const BALANCED_TAGS: [&str; 6] = ["b", "i", "strong", "em", "code", "pre"];

struct TagPattern {
    tag: &'static str,
    open: Regex,
    close: Regex,
}

fn tag_patterns() -> &'static [TagPattern] {
    static P: OnceLock<Vec<TagPattern>> = OnceLock::new();
    P.get_or_init(|| {
        BALANCED_TAGS
            .iter()
            .map(|&tag| TagPattern {
                tag,
                open: Regex::new(&format!(r"<{}\b[^>]*>", tag)).expect("valid open-tag regex"),
                close: Regex::new(&format!(r"</{}>", tag)).expect("valid close-tag regex"),
            })
            .collect()
    })
}

/// Compare open and close counts per tag across the full text, frontmatter
/// included. Misnesting is not detected, only aggregate mismatch.
pub fn check_tag_balance(file: &str, content: &str) -> Vec<Issue> {
    tag_patterns()
        .iter()
        .filter_map(|p| {
            let opened = p.open.find_iter(content).count();
            let closed = p.close.find_iter(content).count();
            (opened != closed).then(|| {
                Issue::warning(
                    file,
                    0,
                    Rule::TagBalance,
                    format!(
                        "Tag <{tag}> appears {} times but </{tag}> appears {} times (may be intentional in MDX)",
                        opened,
                        closed,
                        tag = p.tag
                    ),
                )
            })
        })
        .collect()
}
