//! Line scanning with fenced-code-block awareness.
//!
//! `split_frontmatter` separates the leading `---` block from the body and
//! `FencedLines` walks the body, annotating each physical line with whether it
//! sits inside a triple-backtick fence. A fence marker line flips the state
//! for the lines after it; it is reported as outside the fence and flagged
//! as a marker so prose checks can skip it.

/// Frontmatter delimiter line.
pub const DELIMITER: &str = "---";
/// Fence marker that toggles code-block state.
pub const FENCE_MARKER: &str = "```";

/// Result of locating the frontmatter block at the top of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frontmatter<'a> {
    /// Document does not start with a delimiter line.
    Absent,
    /// Opening delimiter present but no closing delimiter line follows.
    Unclosed,
    /// Well-formed block. `body_offset` is the number of lines before the body.
    Present {
        block: &'a str,
        body: &'a str,
        body_offset: usize,
    },
}

impl<'a> Frontmatter<'a> {
    /// Body text and its line offset; the whole document when no valid block exists.
    pub fn body_of(&self, content: &'a str) -> (&'a str, usize) {
        match self {
            Frontmatter::Present {
                body, body_offset, ..
            } => (body, *body_offset),
            _ => (content, 0),
        }
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches(['\r', ' ', '\t']) == DELIMITER
}

/// Locate the frontmatter block between the first two delimiter lines.
pub fn split_frontmatter(content: &str) -> Frontmatter<'_> {
    let first_end = content.find('\n').unwrap_or(content.len());
    if !is_delimiter(&content[..first_end]) || first_end == content.len() {
        return Frontmatter::Absent;
    }
    let block_start = first_end + 1;
    let mut pos = block_start;
    let mut lines_seen = 1;
    while pos <= content.len() {
        let rest = &content[pos..];
        let line_len = rest.find('\n').unwrap_or(rest.len());
        lines_seen += 1;
        if is_delimiter(&rest[..line_len]) {
            let block = content[block_start..pos].trim_end_matches(['\n', '\r']);
            let body_start = (pos + line_len + 1).min(content.len());
            return Frontmatter::Present {
                block,
                body: &content[body_start..],
                body_offset: lines_seen,
            };
        }
        if line_len == rest.len() {
            break;
        }
        pos += line_len + 1;
    }
    Frontmatter::Unclosed
}

/// One body line annotated with its document line number and fence state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannedLine<'a> {
    pub number: usize,
    pub text: &'a str,
    pub in_fence: bool,
    pub is_marker: bool,
}

impl ScannedLine<'_> {
    /// Prose line: neither inside a fence nor a fence marker.
    pub fn is_prose(&self) -> bool {
        !self.in_fence && !self.is_marker
    }
}

/// Lazy iterator over annotated lines. Each call to `scan` starts fresh.
pub struct FencedLines<'a> {
    lines: std::str::Lines<'a>,
    next_number: usize,
    in_fence: bool,
}

impl<'a> Iterator for FencedLines<'a> {
    type Item = ScannedLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.lines.next()?;
        let number = self.next_number;
        self.next_number += 1;
        if text.trim_start().starts_with(FENCE_MARKER) {
            self.in_fence = !self.in_fence;
            return Some(ScannedLine {
                number,
                text,
                in_fence: false,
                is_marker: true,
            });
        }
        Some(ScannedLine {
            number,
            text,
            in_fence: self.in_fence,
            is_marker: false,
        })
    }
}

/// Scan `body`, numbering lines from `offset + 1` so numbers match the file.
pub fn scan(body: &str, offset: usize) -> FencedLines<'_> {
    FencedLines {
        lines: body.lines(),
        next_number: offset + 1,
        in_fence: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fence_markers_are_outside_and_toggle_following_lines() {
        let body = "text\n```js\ncode\n```\nafter";
        let flags: Vec<(usize, bool)> = scan(body, 0).map(|l| (l.number, l.in_fence)).collect();
        assert_eq!(
            flags,
            vec![(1, false), (2, false), (3, true), (4, false), (5, false)]
        );
    }

    #[test]
    fn marker_lines_are_not_prose() {
        let body = "```text <- arrow\ncode\n```\nplain";
        let prose: Vec<&str> = scan(body, 0).filter(|l| l.is_prose()).map(|l| l.text).collect();
        assert_eq!(prose, vec!["plain"]);
        let markers: Vec<usize> = scan(body, 5).filter(|l| l.is_marker).map(|l| l.number).collect();
        assert_eq!(markers, vec![6, 8]);
    }

    #[test]
    fn indented_marker_toggles_and_language_tag_is_ignored() {
        let body = "  ```python\nx\n  ```\ny";
        let inside: Vec<&str> = scan(body, 0).filter(|l| l.in_fence).map(|l| l.text).collect();
        assert_eq!(inside, vec!["x"]);
    }

    #[test]
    fn unclosed_fence_runs_to_end() {
        let inside = scan("```\na\nb", 0).filter(|l| l.in_fence).count();
        assert_eq!(inside, 2);
    }

    #[test]
    fn scan_is_restartable() {
        let body = "```\na\n```";
        let first: Vec<_> = scan(body, 3).collect();
        let second: Vec<_> = scan(body, 3).collect();
        assert_eq!(first, second);
        assert_eq!(first[0].number, 4);
    }

    #[test]
    fn splits_well_formed_frontmatter() {
        let doc = "---\ntitle: T\nlang: en\n---\n# Body\n";
        match split_frontmatter(doc) {
            Frontmatter::Present {
                block,
                body,
                body_offset,
            } => {
                assert_eq!(block, "title: T\nlang: en");
                assert_eq!(body, "# Body\n");
                assert_eq!(body_offset, 4);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn detects_absent_and_unclosed() {
        assert_eq!(split_frontmatter("# Title\n"), Frontmatter::Absent);
        assert_eq!(split_frontmatter("---"), Frontmatter::Absent);
        assert_eq!(
            split_frontmatter("---\ntitle: x\nbody"),
            Frontmatter::Unclosed
        );
    }

    #[test]
    fn closing_delimiter_at_end_of_file() {
        let doc = "---\nlang: en\n---";
        match split_frontmatter(doc) {
            Frontmatter::Present { block, body, .. } => {
                assert_eq!(block, "lang: en");
                assert_eq!(body, "");
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
