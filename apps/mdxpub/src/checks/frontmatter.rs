//! Frontmatter presence, required-field, and `lang` checks.

use crate::models::change::Locale;
use crate::models::{Issue, Rule};
use crate::scan::{split_frontmatter, Frontmatter};
use regex::Regex;
use std::sync::OnceLock;

/// Fields every document is expected to declare.
pub const REQUIRED_FIELDS: [&str; 3] = ["title", "description", "lang"];

/// Leading two-letter code of a `lang:` line; anything after it is ignored.
fn lang_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^lang:[ \t]*["']?([a-z]{2})"#).expect("valid lang regex")
    })
}

/// Validate the leading metadata block of `content`.
///
/// Field presence is a raw substring test on `"<field>:"`, so a field name
/// that appears inside another value also counts as present.
pub fn check_frontmatter(file: &str, content: &str) -> Vec<Issue> {
    let mut issues = Vec::new();
    let block = match split_frontmatter(content) {
        Frontmatter::Absent => {
            issues.push(Issue::warning(
                file,
                1,
                Rule::MissingFrontmatter,
                "File does not start with YAML frontmatter (---)",
            ));
            return issues;
        }
        Frontmatter::Unclosed => {
            issues.push(Issue::error(
                file,
                1,
                Rule::MalformedFrontmatter,
                "Invalid frontmatter format. Must be: ---\\n...\\n---",
            ));
            return issues;
        }
        Frontmatter::Present { block, .. } => block,
    };

    for field in REQUIRED_FIELDS {
        if !block.contains(&format!("{}:", field)) {
            issues.push(Issue::warning(
                file,
                1,
                Rule::MissingField,
                format!("Missing recommended field in frontmatter: {}", field),
            ));
        }
    }

    let lang = block
        .lines()
        .find_map(|line| lang_re().captures(line).map(|c| c[1].to_string()));
    match lang {
        None => issues.push(Issue::error(
            file,
            1,
            Rule::InvalidLang,
            "Missing or invalid lang field in frontmatter. Use 2-letter code like \"en\", \"zh\", \"fr\"",
        )),
        Some(code) if Locale::from_code(&code).is_none() => issues.push(Issue::warning(
            file,
            1,
            Rule::UnsupportedLang,
            format!(
                "Lang code \"{}\" may not be supported. Consider using en, zh, or fr.",
                code
            ),
        )),
        Some(_) => {}
    }
    issues
}
