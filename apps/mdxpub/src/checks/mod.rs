//! Document checks applied to one MDX file.
//!
//! - `frontmatter`: leading metadata block (may emit errors).
//! - `content`: fence-aware body lints (warnings only).
//! - `tags`: whole-document tag count balance (warnings only).

pub mod content;
pub mod frontmatter;
pub mod tags;

use crate::models::Issue;
use crate::scan::{scan, split_frontmatter};

/// Run every check over `text` and return issues in detection order.
///
/// Body checks run even when the frontmatter is missing or malformed; in that
/// case the whole text is treated as body.
pub fn run_checks(file: &str, text: &str) -> Vec<Issue> {
    let mut issues = frontmatter::check_frontmatter(file, text);
    let (body, offset) = split_frontmatter(text).body_of(text);
    issues.extend(content::check_comparison_operators(file, scan(body, offset)));
    issues.extend(content::check_bare_angle_brackets(file, scan(body, offset)));
    issues.extend(tags::check_tag_balance(file, text));
    issues
}
