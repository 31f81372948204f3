//! Shared data models for validation reports and publish change sets.

pub mod change;

use serde::Serialize;
use std::fmt;

/// Sentinel file name used for issues raised by the external build check.
pub const BUILD_PSEUDO_FILE: &str = "build";

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// Issue severity. Only `Error` blocks a run.
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
/// Identifier of the check that produced an issue.
pub enum Rule {
    MissingFrontmatter,
    MalformedFrontmatter,
    MissingField,
    InvalidLang,
    UnsupportedLang,
    UnescapedComparison,
    BareAngleBracket,
    TagBalance,
    ReadError,
    Build,
}

impl Rule {
    pub fn as_str(self) -> &'static str {
        match self {
            Rule::MissingFrontmatter => "missing-frontmatter",
            Rule::MalformedFrontmatter => "malformed-frontmatter",
            Rule::MissingField => "missing-field",
            Rule::InvalidLang => "invalid-lang",
            Rule::UnsupportedLang => "unsupported-lang",
            Rule::UnescapedComparison => "unescaped-comparison",
            Rule::BareAngleBracket => "bare-angle-bracket",
            Rule::TagBalance => "tag-balance",
            Rule::ReadError => "read-error",
            Rule::Build => "build",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
/// A single validation finding. `line == 0` means the whole file.
pub struct Issue {
    pub file: String,
    pub line: usize,
    pub severity: Severity,
    pub rule: Rule,
    pub message: String,
}

impl Issue {
    pub fn error(file: &str, line: usize, rule: Rule, message: impl Into<String>) -> Self {
        Issue {
            file: file.to_string(),
            line,
            severity: Severity::Error,
            rule,
            message: message.into(),
        }
    }

    pub fn warning(file: &str, line: usize, rule: Rule, message: impl Into<String>) -> Self {
        Issue {
            file: file.to_string(),
            line,
            severity: Severity::Warning,
            rule,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Aggregated counts used by printers and exit-code decisions.
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub files_checked: usize,
    pub files_valid: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Accumulates issues over one validation run in detection order.
///
/// A file counts as valid when it contributed zero `Error` issues of its own;
/// warnings never invalidate a file.
pub struct ValidationReport {
    issues: Vec<Issue>,
    files_checked: usize,
    files_valid: usize,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one validated file together with the issues it produced.
    pub fn record_file(&mut self, issues: Vec<Issue>) {
        let file_has_error = issues.iter().any(Issue::is_error);
        self.files_checked += 1;
        if !file_has_error {
            self.files_valid += 1;
        }
        self.issues.extend(issues);
    }

    /// Append issues that are not tied to a checked document (e.g. the build).
    pub fn extend(&mut self, issues: impl IntoIterator<Item = Issue>) {
        self.issues.extend(issues);
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn files_checked(&self) -> usize {
        self.files_checked
    }

    pub fn files_valid(&self) -> usize {
        self.files_valid
    }

    /// True when the run must exit non-zero.
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            errors: self.error_count(),
            warnings: self.warning_count(),
            files_checked: self.files_checked,
            files_valid: self.files_valid,
        }
    }
}

#[derive(Serialize)]
/// Serializable view of a report for `--output json`.
pub struct ReportView<'a> {
    pub issues: &'a [Issue],
    pub summary: Summary,
}

impl<'a> From<&'a ValidationReport> for ReportView<'a> {
    fn from(report: &'a ValidationReport) -> Self {
        ReportView {
            issues: report.issues(),
            summary: report.summary(),
        }
    }
}
