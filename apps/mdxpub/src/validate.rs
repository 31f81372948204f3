//! Validation runner: document discovery and per-file checks.
//!
//! Files are checked in parallel, but results are collected by discovery
//! index so the issue order in the report matches a sequential run.

use crate::checks::run_checks;
use crate::models::{Issue, Rule, ValidationReport};
use glob::glob;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of validated documents.
pub const DOC_EXTENSION: &str = "mdx";

pub fn is_document(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == DOC_EXTENSION)
}

/// Documents under `target` in lexicographic order. A file target yields
/// itself when it is a document and nothing otherwise.
pub fn discover_documents(target: &Path) -> Vec<PathBuf> {
    if target.is_file() {
        return if is_document(target) {
            vec![target.to_path_buf()]
        } else {
            Vec::new()
        };
    }
    let pattern = format!(
        "{}/**/*.{}",
        glob::Pattern::escape(&target.to_string_lossy()),
        DOC_EXTENSION
    );
    let mut found: Vec<PathBuf> = match glob(&pattern) {
        Ok(paths) => paths.filter_map(Result::ok).filter(|p| p.is_file()).collect(),
        Err(err) => {
            tracing::warn!(%pattern, %err, "invalid discovery pattern");
            Vec::new()
        }
    };
    found.sort();
    tracing::debug!(count = found.len(), target = %target.display(), "discovered documents");
    found
}

/// Check one document. A read failure becomes a single error issue.
pub fn validate_file(path: &Path) -> Vec<Issue> {
    let file = path.to_string_lossy().to_string();
    match fs::read_to_string(path) {
        Ok(text) => {
            tracing::debug!(file = %file, "validating");
            run_checks(&file, &text)
        }
        Err(err) => vec![Issue::error(
            &file,
            0,
            Rule::ReadError,
            format!("Error reading file: {}", err),
        )],
    }
}

/// Validate `files` and aggregate into a report in the given order.
pub fn run_validation(files: &[PathBuf]) -> ValidationReport {
    let per_file: Vec<Vec<Issue>> = files.par_iter().map(|p| validate_file(p)).collect();
    let mut report = ValidationReport::new();
    for issues in per_file {
        report.record_file(issues);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;
    use tempfile::tempdir;

    const VALID: &str = "---\ntitle: T\ndescription: D\nlang: en\n---\n\n# Heading\n";

    #[test]
    fn discovery_is_recursive_and_sorted() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("en/b")).unwrap();
        fs::create_dir_all(root.join("zh")).unwrap();
        fs::write(root.join("zh/z.mdx"), VALID).unwrap();
        fs::write(root.join("en/b/a.mdx"), VALID).unwrap();
        fs::write(root.join("en/a.mdx"), VALID).unwrap();
        fs::write(root.join("en/notes.md"), VALID).unwrap();

        let found = discover_documents(root);
        let rel: Vec<String> = found
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(rel, vec!["en/a.mdx", "en/b/a.mdx", "zh/z.mdx"]);
    }

    #[test]
    fn single_file_targets() {
        let dir = tempdir().unwrap();
        let doc = dir.path().join("a.mdx");
        let other = dir.path().join("a.md");
        fs::write(&doc, VALID).unwrap();
        fs::write(&other, VALID).unwrap();
        assert_eq!(discover_documents(&doc), vec![doc.clone()]);
        assert!(discover_documents(&other).is_empty());
    }

    #[test]
    fn all_valid_run() {
        let dir = tempdir().unwrap();
        let files: Vec<PathBuf> = (0..4)
            .map(|i| {
                let p = dir.path().join(format!("{}.mdx", i));
                fs::write(&p, VALID).unwrap();
                p
            })
            .collect();
        let report = run_validation(&files);
        assert_eq!(report.files_checked(), 4);
        assert_eq!(report.files_valid(), 4);
        assert_eq!(report.error_count(), 0);
        assert!(!report.has_errors());
    }

    #[test]
    fn malformed_frontmatter_invalidates_only_that_file() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.mdx");
        let bad = dir.path().join("bad.mdx");
        fs::write(&good, VALID).unwrap();
        fs::write(&bad, "---\ntitle: x\n\nno closing\n").unwrap();
        let report = run_validation(&[bad.clone(), good.clone()]);
        assert_eq!(report.files_checked(), 2);
        assert_eq!(report.files_valid(), 1);
        let errors: Vec<&Issue> = report.errors().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, Rule::MalformedFrontmatter);
    }

    #[test]
    fn unreadable_file_is_reported_and_run_continues() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.mdx");
        let good = dir.path().join("good.mdx");
        fs::write(&good, VALID).unwrap();
        let report = run_validation(&[missing, good]);
        assert_eq!(report.files_checked(), 2);
        assert_eq!(report.files_valid(), 1);
        assert_eq!(report.issues()[0].rule, Rule::ReadError);
        assert_eq!(report.issues()[0].severity, Severity::Error);
    }

    #[test]
    fn issue_order_follows_discovery_order() {
        let dir = tempdir().unwrap();
        let files: Vec<PathBuf> = (0..16)
            .map(|i| {
                let p = dir.path().join(format!("{:02}.mdx", i));
                fs::write(&p, "no frontmatter\n").unwrap();
                p
            })
            .collect();
        let report = run_validation(&files);
        let order: Vec<String> = report.issues().iter().map(|i| i.file.clone()).collect();
        let expected: Vec<String> = files.iter().map(|p| p.to_string_lossy().to_string()).collect();
        assert_eq!(order, expected);
    }
}
