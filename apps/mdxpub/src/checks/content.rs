//! Advisory body lints: unescaped comparison operators and bare `<`.
//!
//! Both families only look at prose lines (outside fenced code blocks and
//! not on a fence marker) and only emit warnings.

use crate::models::{Issue, Rule};
use crate::scan::ScannedLine;
use crate::utils::preview;
use regex::Regex;
use std::sync::OnceLock;

const COMPARISON_PREVIEW: usize = 80;
const ANGLE_PREVIEW: usize = 60;

/// Components that legitimately start with `<` in MDX bodies.
pub const ALLOWED_COMPONENTS: [&str; 10] = [
    "Callout",
    "Steps",
    "Cards",
    "Tab",
    "Tabs",
    "File",
    "Folder",
    "Files",
    "CodeBlock",
    "SourceAttribution",
];

struct Patterns {
    inline: Vec<Regex>,
    /// A `- **X**: >N%` item is flagged only on the line right after one of
    /// these headers; inline qualifiers are flagged anywhere.
    benchmark_header: Regex,
    benchmark_item: Regex,
    bare_angle: Regex,
    component: Regex,
}

fn patterns() -> &'static Patterns {
    static P: OnceLock<Patterns> = OnceLock::new();
    P.get_or_init(|| {
        let inline = [
            r"\*\*Good\*\*:\s*>\d+%",
            r"\*\*Excellent\*\*:\s*>\d+%",
            r"\*\*Outstanding\*\*:\s*>\d+%",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("valid comparison regex"))
        .collect();
        let component = format!(r"<({})", ALLOWED_COMPONENTS.join("|"));
        Patterns {
            inline,
            benchmark_header: Regex::new(r"(Typical benchmarks:|Jalons typiques\s*:|典型基准：)\s*$")
                .expect("valid header regex"),
            benchmark_item: Regex::new(r"^\s*- \*\*.*?\*\*\s*[:：]\s*>\d+%")
                .expect("valid item regex"),
            bare_angle: Regex::new(r"<[^/a-zA-Z]").expect("valid angle regex"),
            component: Regex::new(&component).expect("valid component regex"),
        }
    })
}

fn has_entity(line: &str) -> bool {
    line.contains("&gt;") || line.contains("&lt;")
}

/// Flag `**Good**: >90%`-style lines that MDX would parse as JSX.
pub fn check_comparison_operators<'a>(
    file: &str,
    lines: impl Iterator<Item = ScannedLine<'a>>,
) -> Vec<Issue> {
    let p = patterns();
    let mut issues = Vec::new();
    let mut after_header = false;
    for line in lines {
        if !line.is_prose() {
            after_header = false;
            continue;
        }
        let inline_hit = p.inline.iter().any(|re| re.is_match(line.text));
        let item_hit = after_header && p.benchmark_item.is_match(line.text);
        if (inline_hit || item_hit) && !has_entity(line.text) {
            issues.push(Issue::warning(
                file,
                line.number,
                Rule::UnescapedComparison,
                format!(
                    "Unescaped comparison operator found. Use &gt; instead of > in: {}",
                    preview(line.text.trim(), COMPARISON_PREVIEW)
                ),
            ));
        }
        after_header = p.benchmark_header.is_match(line.text);
    }
    issues
}

/// Flag `<` not followed by a letter or `/`, unless the line uses a known
/// component or already escapes with `&lt;`.
pub fn check_bare_angle_brackets<'a>(
    file: &str,
    lines: impl Iterator<Item = ScannedLine<'a>>,
) -> Vec<Issue> {
    let p = patterns();
    lines
        .filter(|l| l.is_prose())
        .filter(|l| p.bare_angle.is_match(l.text))
        .filter(|l| !p.component.is_match(l.text) && !l.text.contains("&lt;"))
        .map(|l| {
            Issue::warning(
                file,
                l.number,
                Rule::BareAngleBracket,
                format!(
                    "Potentially unescaped < character. Consider using &lt; or wrapping in code block: {}",
                    preview(l.text.trim(), ANGLE_PREVIEW)
                ),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::scan;

    #[test]
    fn comparison_outside_fence_warns_inside_does_not() {
        let outside = check_comparison_operators("a.mdx", scan("**Good**: >90%", 0));
        assert_eq!(outside.len(), 1);
        assert_eq!(outside[0].line, 1);
        assert!(outside[0].message.contains("**Good**: >90%"));

        let inside = check_comparison_operators("a.mdx", scan("```\n**Good**: >90%\n```", 0));
        assert!(inside.is_empty());
    }

    #[test]
    fn escaped_line_is_not_flagged() {
        let body = "**Excellent**: >95% or &gt;95%";
        assert!(check_comparison_operators("a.mdx", scan(body, 0)).is_empty());
    }

    #[test]
    fn benchmark_item_only_counts_after_header() {
        let body = "Typical benchmarks:\n- **Pass rate**: >80%\n- **Other**: >70%";
        let issues = check_comparison_operators("a.mdx", scan(body, 10));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, 12);
        assert!(check_comparison_operators("a.mdx", scan("- **Pass rate**: >80%", 0)).is_empty());
    }

    #[test]
    fn long_lines_are_truncated_in_message() {
        let body = format!("**Good**: >90% {}", "x".repeat(200));
        let issues = check_comparison_operators("a.mdx", scan(&body, 0));
        let quoted = issues[0].message.split(" in: ").nth(1).unwrap();
        assert_eq!(quoted.chars().count(), 80);
    }

    #[test]
    fn bare_angle_flags_comparisons_not_tags() {
        let body = "latency < 5ms\n<div>ok</div>\n<Callout type=\"info\"> a < b\n5 &lt; 6 and 1 < 2\n```\nif a < b {}\n```";
        let issues = check_bare_angle_brackets("a.mdx", scan(body, 0));
        let lines: Vec<usize> = issues.iter().map(|i| i.line).collect();
        assert_eq!(lines, vec![1]);
    }

    #[test]
    fn fence_marker_lines_are_skipped() {
        let body = "```text <- arrow\n**Good**: >90%\n``` **Good**: >90%\nafter\n";
        assert!(check_bare_angle_brackets("a.mdx", scan(body, 5)).is_empty());
        assert!(check_comparison_operators("a.mdx", scan(body, 5)).is_empty());
    }

    #[test]
    fn arrow_like_sequences_are_flagged() {
        let issues = check_bare_angle_brackets("a.mdx", scan("use <- or <= here", 0));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule, Rule::BareAngleBracket);
    }
}
